//! Membership records and their extraction from the JSON:API memberships document
//!
//! Each membership item nests the related user and role under
//! `relationships.{user,role}.data`. Items missing one of those objects, or
//! the user or role `id`, are skipped. A missing username or role name falls
//! back to `N/A`.

use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::constants::NOT_AVAILABLE;

/// Flat projection of one organization membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub username: String,
    pub user_id: String,
    pub role_name: String,
    pub role_id: String,
}

/// A required object key was absent from a membership item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingKey(pub &'static str);

impl fmt::Display for MissingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

impl std::error::Error for MissingKey {}

impl MembershipRecord {
    /// Extract a record from one item of the `data` array
    pub fn from_item(item: &Value) -> Result<Self, MissingKey> {
        let relationships = object(item, "relationships")?;
        let user = object(object(relationships, "user")?, "data")?;
        let role = object(object(relationships, "role")?, "data")?;
        let user_attributes = object(user, "attributes")?;
        let role_attributes = object(role, "attributes")?;

        Ok(MembershipRecord {
            username: leaf(user_attributes, "username"),
            user_id: id(user)?,
            role_name: leaf(role_attributes, "name"),
            role_id: id(role)?,
        })
    }

    /// One CSV row, in `MEMBERS_CSV_HEADER` column order
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.username, self.user_id, self.role_name, self.role_id
        )
    }
}

fn object<'a>(value: &'a Value, key: &'static str) -> Result<&'a Value, MissingKey> {
    value
        .get(key)
        .filter(|v| v.is_object())
        .ok_or(MissingKey(key))
}

fn id(value: &Value) -> Result<String, MissingKey> {
    match value.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(MissingKey("id")),
    }
}

fn leaf(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => NOT_AVAILABLE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Extract all records of a memberships document, skipping malformed items.
/// A document without a `data` array has no records.
pub fn extract_members(document: &Value) -> Vec<MembershipRecord> {
    let Some(items) = document.get("data").and_then(Value::as_array) else {
        debug!("memberships document has no data array");
        return Vec::new();
    };

    let mut members = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match MembershipRecord::from_item(item) {
            Ok(record) => members.push(record),
            Err(missing) => {
                warn!(index, "Warning: Skipping a record due to missing key: {}", missing);
            }
        }
    }
    members
}

/// User ids of the records holding `role_id`, in document order
pub fn user_ids_with_role(members: &[MembershipRecord], role_id: &str) -> Vec<String> {
    members
        .iter()
        .filter(|m| m.role_id == role_id)
        .map(|m| m.user_id.clone())
        .collect()
}
