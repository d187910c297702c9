//! Strategies that pick the users whose role gets updated

use async_trait::async_trait;
use std::collections::HashSet;

use crate::client::MembershipApi;
use crate::lister::list_user_ids_with_role;

#[async_trait]
pub trait TargetSelector: Send + Sync {
    /// User ids to update, in update order
    async fn select(&self, api: &dyn MembershipApi, org_id: &str) -> Vec<String>;

    /// Diagnostic printed when `select` yields no users
    fn empty_message(&self) -> String;
}

/// Users named on the command line, independent of their current role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitUsers {
    user_ids: Vec<String>,
}

impl ExplicitUsers {
    /// Parse a comma separated list. Entries are trimmed, blanks and repeats dropped.
    pub fn parse(list: &str) -> Self {
        ExplicitUsers {
            user_ids: unique_in_order(list.split(',').map(str::trim)),
        }
    }

    pub fn user_ids(&self) -> &[String] {
        &self.user_ids
    }
}

#[async_trait]
impl TargetSelector for ExplicitUsers {
    async fn select(&self, _api: &dyn MembershipApi, _org_id: &str) -> Vec<String> {
        self.user_ids.clone()
    }

    fn empty_message(&self) -> String {
        "No user IDs provided.".to_string()
    }
}

/// Current holders of a role, discovered through the memberships listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMembers {
    role_id: String,
}

impl RoleMembers {
    pub fn new(role_id: impl Into<String>) -> Self {
        RoleMembers {
            role_id: role_id.into(),
        }
    }

    pub fn role_id(&self) -> &str {
        &self.role_id
    }
}

#[async_trait]
impl TargetSelector for RoleMembers {
    async fn select(&self, api: &dyn MembershipApi, org_id: &str) -> Vec<String> {
        let user_ids = list_user_ids_with_role(api, org_id, &self.role_id).await;
        unique_in_order(user_ids.iter().map(String::as_str))
    }

    fn empty_message(&self) -> String {
        format!("No users found with role {}.", self.role_id)
    }
}

fn unique_in_order<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
