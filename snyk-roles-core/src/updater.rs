use reqwest::StatusCode;
use std::io::{self, Write};
use tracing::{error, info};

use crate::client::MembershipApi;

/// Counters of one update run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub selected: usize,
    pub successful: usize,
    pub failed: usize,
}

impl UpdateSummary {
    /// 1 when nothing was selected or any update failed, 0 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.selected == 0 || self.failed > 0 {
            1
        } else {
            0
        }
    }
}

/// Assign `new_role_id` to one user.
///
/// Only an exact 200 counts as success, other 2xx codes included. Transport
/// errors are logged and reported as `false`. The confirmation line goes to
/// `out`; only a failure to write it is an error.
pub async fn update_user_role<W: Write>(
    api: &dyn MembershipApi,
    org_id: &str,
    user_id: &str,
    new_role_id: &str,
    out: &mut W,
) -> io::Result<bool> {
    let updated = match api.update_member_role(org_id, user_id, new_role_id).await {
        Ok(response) if response.status == StatusCode::OK => {
            writeln!(out, "Successfully updated role for user: {}", user_id)?;
            true
        }
        Ok(response) => {
            error!(
                user_id,
                status = response.status.as_u16(),
                "Failed to update role for user: {}",
                user_id
            );
            error!("Status Code: {}", response.status.as_u16());
            error!("Response: {}", response.body);
            false
        }
        Err(err) => {
            error!(
                user_id,
                kind = err.kind(),
                "An error occurred while making the request for user {}: {}",
                user_id,
                err
            );
            false
        }
    };
    Ok(updated)
}

/// Update every user once, in order. A failed update never stops the loop.
pub async fn apply_role_updates<W: Write>(
    api: &dyn MembershipApi,
    org_id: &str,
    user_ids: &[String],
    new_role_id: &str,
    out: &mut W,
) -> io::Result<UpdateSummary> {
    let mut summary = UpdateSummary {
        selected: user_ids.len(),
        ..UpdateSummary::default()
    };

    for user_id in user_ids {
        if update_user_role(api, org_id, user_id, new_role_id, out).await? {
            summary.successful += 1;
        } else {
            summary.failed += 1;
        }
    }

    info!(
        org_id,
        new_role_id,
        successful = summary.successful,
        failed = summary.failed,
        "Role updates finished"
    );
    Ok(summary)
}
