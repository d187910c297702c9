use tracing::{error, info};

use crate::client::MembershipApi;
use crate::membership::{extract_members, user_ids_with_role, MembershipRecord};

/// List the members of an organization.
///
/// A failed request is logged with its failure class and yields an empty list,
/// the same as an organization without members.
pub async fn list_members(api: &dyn MembershipApi, org_id: &str) -> Vec<MembershipRecord> {
    match api.list_memberships(org_id).await {
        Ok(document) => {
            let members = extract_members(&document);
            info!(org_id, count = members.len(), "Retrieved organization members");
            members
        }
        Err(err) => {
            error!(org_id, kind = err.kind(), "{}", err);
            Vec::new()
        }
    }
}

/// User ids of the organization members that currently hold `role_id`
pub async fn list_user_ids_with_role(
    api: &dyn MembershipApi,
    org_id: &str,
    role_id: &str,
) -> Vec<String> {
    let members = list_members(api, org_id).await;
    let user_ids = user_ids_with_role(&members, role_id);
    info!(org_id, role_id, count = user_ids.len(), "Selected members by role");
    user_ids
}
