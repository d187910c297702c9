use secrecy::SecretString;
use serde_json::{json, Value};
use snyk_roles_core::run::{run_member_listing, run_role_update, RoleUpdateOptions};
use snyk_roles_core::updater::update_user_role;
use snyk_roles_core::{Context, ExplicitUsers, RoleMembers, SnykClient};
use std::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORG: &str = "org-1";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client(server: &MockServer) -> SnykClient {
    SnykClient::new(
        &Context::with_base_url(&server.uri()),
        SecretString::from("pat".to_string()),
    )
    .expect("client builds")
}

fn member(user_id: &str, username: &str, role_id: &str, role_name: &str) -> Value {
    json!({
        "relationships": {
            "user": { "data": { "id": user_id, "attributes": { "username": username } } },
            "role": { "data": { "id": role_id, "attributes": { "name": role_name } } }
        }
    })
}

async fn mount_memberships(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/orgs/{}/memberships", ORG)))
        .and(header("authorization", "Token pat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": items })))
        .mount(server)
        .await;
}

async fn mount_update(server: &MockServer, user_id: &str, role_id: &str, status: u16, calls: u64) {
    Mock::given(method("PUT"))
        .and(path(format!("/v1/org/{}/members/update/{}", ORG, user_id)))
        .and(header("authorization", "token pat"))
        .and(body_json(json!({ "rolePublicId": role_id })))
        .respond_with(ResponseTemplate::new(status))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_members_as_csv_skipping_broken_items() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_memberships(
        &server,
        vec![
            member("u1", "alice", "r-admin", "Org Admin"),
            json!({ "relationships": { "user": { "data": { "id": "u2" } } } }),
            member("u3", "carol", "r-collab", "Org Collaborator"),
        ],
    )
    .await;

    let mut out = Vec::new();
    let code = run_member_listing(&client(&server), ORG, &mut out)
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "username,user_id,role_name,role_id\n\
         alice,u1,Org Admin,r-admin\n\
         carol,u3,Org Collaborator,r-collab\n"
    );
}

#[tokio::test]
async fn listing_error_status_exits_one() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let code = run_member_listing(&client(&server), ORG, &mut out)
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert!(out.is_empty());
}

#[tokio::test]
async fn non_200_success_codes_are_failures() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_update(&server, "u200", "r1", 200, 1).await;
    mount_update(&server, "u201", "r1", 201, 1).await;
    mount_update(&server, "u204", "r1", 204, 1).await;

    let api = client(&server);
    let mut out = Vec::new();
    assert!(update_user_role(&api, ORG, "u200", "r1", &mut out).await.unwrap());
    assert!(!update_user_role(&api, ORG, "u201", "r1", &mut out).await.unwrap());
    assert!(!update_user_role(&api, ORG, "u204", "r1", &mut out).await.unwrap());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Successfully updated role for user: u200\n"
    );
}

#[tokio::test]
async fn explicit_users_are_each_updated_once() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_update(&server, "a", "R", 200, 1).await;
    mount_update(&server, "b", "R", 200, 1).await;
    mount_update(&server, "c", "R", 200, 1).await;

    let opts = RoleUpdateOptions {
        new_role_id: "R".to_string(),
        dry_run: false,
    };
    let mut out = Vec::new();
    let code = run_role_update(
        &client(&server),
        ORG,
        &ExplicitUsers::parse("a, b ,c"),
        &opts,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(code, 0);
    server.verify().await;
}

#[tokio::test]
async fn migration_moves_source_role_members_only() {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return;
    }
    let server = MockServer::start().await;
    mount_memberships(
        &server,
        vec![
            member("u1", "alice", "src", "Source"),
            member("u2", "bob", "other", "Other"),
            member("u3", "carol", "src", "Source"),
        ],
    )
    .await;
    mount_update(&server, "u1", "dst", 200, 1).await;
    mount_update(&server, "u2", "dst", 200, 0).await;
    mount_update(&server, "u3", "dst", 403, 1).await;

    let opts = RoleUpdateOptions {
        new_role_id: "dst".to_string(),
        dry_run: false,
    };
    let mut out = Vec::new();
    let code = run_role_update(
        &client(&server),
        ORG,
        &RoleMembers::new("src"),
        &opts,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(code, 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Successfully updated role for user: u1\n"));
    assert!(!out.contains("user: u3"));
    assert!(out.ends_with("Successful updates: 1\nFailed updates: 1\n"));
    server.verify().await;
}
