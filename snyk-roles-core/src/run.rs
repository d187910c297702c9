//! Top level flows of the command line tools.
//! Each returns the process exit code; diagnostics go through `tracing`.

use std::io::{self, Write};
use tracing::{error, info};

use crate::client::MembershipApi;
use crate::lister::list_members;
use crate::report::{write_members_csv, write_summary, write_update_start};
use crate::selection::TargetSelector;
use crate::updater::{apply_role_updates, UpdateSummary};

/// List members as CSV. Exit code 1 when nothing was retrieved.
pub async fn run_member_listing<W: Write>(
    api: &dyn MembershipApi,
    org_id: &str,
    out: &mut W,
) -> io::Result<i32> {
    let members = list_members(api, org_id).await;
    if members.is_empty() {
        error!("No member data retrieved or an error occurred.");
        return Ok(1);
    }

    write_members_csv(out, &members)?;
    Ok(0)
}

/// Options shared by both role update tools
#[derive(Debug, Clone, Default)]
pub struct RoleUpdateOptions {
    pub new_role_id: String,
    pub dry_run: bool,
}

/// Select the target users and move each of them to the new role
pub async fn run_role_update<W: Write>(
    api: &dyn MembershipApi,
    org_id: &str,
    selector: &dyn TargetSelector,
    opts: &RoleUpdateOptions,
    out: &mut W,
) -> io::Result<i32> {
    let user_ids = selector.select(api, org_id).await;
    if user_ids.is_empty() {
        error!("{}", selector.empty_message());
        return Ok(1);
    }

    write_update_start(out, user_ids.len(), org_id)?;

    let summary = if opts.dry_run {
        info!("Dry run, no role will be changed");
        for user_id in &user_ids {
            writeln!(
                out,
                "Would update role for user: {} -> {}",
                user_id, opts.new_role_id
            )?;
        }
        UpdateSummary {
            selected: user_ids.len(),
            ..UpdateSummary::default()
        }
    } else {
        apply_role_updates(api, org_id, &user_ids, &opts.new_role_id, out).await?
    };

    write_summary(out, &summary)?;
    Ok(summary.exit_code())
}
