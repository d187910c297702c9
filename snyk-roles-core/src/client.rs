//! HTTP access to the membership and role update endpoints
//!
//! `MembershipApi` is the seam between the listing/update logic and the
//! network. `SnykClient` is the reqwest implementation used by the tools.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::constants::{JSON_API_CONTENT_TYPE, REST_TOKEN_SCHEME, USER_AGENT, V1_TOKEN_SCHEME};
use crate::context::Context;
use crate::error::{Result, SnykError};

/// Raw outcome of a role update call; interpreting the status is up to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleUpdateResponse {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait MembershipApi: Send + Sync {
    /// Fetch the raw memberships document of an organization.
    /// Non-success statuses are returned as `SnykError::Status`.
    async fn list_memberships(&self, org_id: &str) -> Result<Value>;

    /// Assign `role_id` to `user_id`. Any status the server answers with is `Ok`;
    /// only transport level failures are errors.
    async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<RoleUpdateResponse>;
}

#[derive(Serialize)]
struct RoleUpdateRequest<'a> {
    #[serde(rename = "rolePublicId")]
    role_public_id: &'a str,
}

pub struct SnykClient {
    http: Client,
    rest_api_url: Url,
    v1_api_url: Url,
    api_version: String,
    token: SecretString,
}

impl SnykClient {
    pub fn new(ctx: &Context, token: SecretString) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .tls_built_in_root_certs(true)
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()?;

        let rest_api_url = Url::parse(&ctx.rest_api_url)?;
        let v1_api_url = Url::parse(&ctx.v1_api_url)?;
        for base in [&rest_api_url, &v1_api_url] {
            if base.cannot_be_a_base() {
                return Err(SnykError::Config(format!("cannot be a base URL: {}", base)));
            }
        }

        Ok(SnykClient {
            http,
            rest_api_url,
            v1_api_url,
            api_version: ctx.api_version.clone(),
            token,
        })
    }

    /// `{rest}/orgs/{org_id}/memberships?version={api_version}`
    pub fn memberships_url(&self, org_id: &str) -> Result<Url> {
        let mut url = endpoint(&self.rest_api_url, &["orgs", org_id, "memberships"])?;
        url.query_pairs_mut().append_pair("version", &self.api_version);
        Ok(url)
    }

    /// `{v1}/org/{org_id}/members/update/{user_id}`
    pub fn role_update_url(&self, org_id: &str, user_id: &str) -> Result<Url> {
        endpoint(
            &self.v1_api_url,
            &["org", org_id, "members", "update", user_id],
        )
    }

    fn authorization(&self, scheme: &str) -> String {
        format!("{} {}", scheme, self.token.expose_secret())
    }
}

/// Append percent-encoded path segments to a base URL
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SnykError::Config(format!("cannot be a base URL: {}", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl MembershipApi for SnykClient {
    async fn list_memberships(&self, org_id: &str) -> Result<Value> {
        let url = self.memberships_url(org_id)?;
        debug!(%url, "GET memberships");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, JSON_API_CONTENT_TYPE)
            .header(AUTHORIZATION, self.authorization(REST_TOKEN_SCHEME))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<RoleUpdateResponse> {
        let url = self.role_update_url(org_id, user_id)?;
        debug!(%url, role_id, "PUT role update");

        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, self.authorization(V1_TOKEN_SCHEME))
            .json(&RoleUpdateRequest {
                role_public_id: role_id,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(RoleUpdateResponse { status, body })
    }
}

/// In-memory `MembershipApi` that records every update call
#[cfg(test)]
#[derive(Default)]
pub struct MockMembershipApi {
    /// Document served by `list_memberships`; `None` answers with a 503 status error
    pub memberships: Option<Value>,
    /// Per-user status override, 200 otherwise
    pub statuses: std::collections::HashMap<String, u16>,
    /// Users whose update fails before any response is received
    pub transport_failures: std::collections::HashSet<String>,
    pub update_calls: std::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
impl MockMembershipApi {
    pub fn with_memberships(memberships: Value) -> Self {
        Self {
            memberships: Some(memberships),
            ..Self::default()
        }
    }

    /// `(user_id, role_id)` of every update call, in call order
    pub fn updated(&self) -> Vec<(String, String)> {
        self.update_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, user, role)| (user.clone(), role.clone()))
            .collect()
    }
}

#[cfg(test)]
#[async_trait]
impl MembershipApi for MockMembershipApi {
    async fn list_memberships(&self, org_id: &str) -> Result<Value> {
        self.memberships.clone().ok_or_else(|| SnykError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            url: format!("mock://orgs/{}/memberships", org_id),
        })
    }

    async fn update_member_role(
        &self,
        org_id: &str,
        user_id: &str,
        role_id: &str,
    ) -> Result<RoleUpdateResponse> {
        self.update_calls.lock().unwrap().push((
            org_id.to_string(),
            user_id.to_string(),
            role_id.to_string(),
        ));
        if self.transport_failures.contains(user_id) {
            return Err(SnykError::Url(url::ParseError::EmptyHost));
        }
        let code = self.statuses.get(user_id).copied().unwrap_or(200);
        Ok(RoleUpdateResponse {
            status: StatusCode::from_u16(code).unwrap(),
            body: format!("{{\"status\":{}}}", code),
        })
    }
}
