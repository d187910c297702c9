use std::io::{self, Write};

use crate::constants::MEMBERS_CSV_HEADER;
use crate::membership::MembershipRecord;
use crate::updater::UpdateSummary;

/// Write the members as CSV, header first
pub fn write_members_csv<W: Write>(out: &mut W, members: &[MembershipRecord]) -> io::Result<()> {
    writeln!(out, "{}", MEMBERS_CSV_HEADER)?;
    for member in members {
        writeln!(out, "{}", member.csv_row())?;
    }
    Ok(())
}

pub fn write_update_start<W: Write>(out: &mut W, count: usize, org_id: &str) -> io::Result<()> {
    writeln!(
        out,
        "Starting role update for {} user(s) in organization {}...",
        count, org_id
    )
}

pub fn write_summary<W: Write>(out: &mut W, summary: &UpdateSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Update Summary ---")?;
    writeln!(out, "Successful updates: {}", summary.successful)?;
    writeln!(out, "Failed updates: {}", summary.failed)
}
