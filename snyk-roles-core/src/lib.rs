//! Snyk Roles Core Library
//!
//! Lists the members of a Snyk organization and reassigns member roles in
//! bulk. The command line tools in `snyk-roles-cli` are thin wrappers around
//! the flows in [`run`].

pub mod client;
pub mod constants;
pub mod context;
pub mod error;
pub mod lister;
pub mod membership;
pub mod report;
pub mod run;
pub mod selection;
pub mod updater;

// Re-export commonly used items
pub use client::{MembershipApi, RoleUpdateResponse, SnykClient};
pub use context::Context;
pub use error::{Result, SnykError};
pub use membership::MembershipRecord;
pub use selection::{ExplicitUsers, RoleMembers, TargetSelector};
pub use updater::UpdateSummary;
