//! Scan command: the check-in/check-out toggle.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};

use lat_core::{ScanOutcome, calendar};
use lat_db::Database;

/// Processes one scan and prints the outcome plus today's stats.
///
/// `now` is supplied by the caller so the scan flow stays deterministic
/// under test; `tz` decides which local day "today" means and how the
/// scan time is displayed.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &mut Database,
    school_id: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    // Scanner payloads often carry trailing whitespace or a newline
    let school_id = school_id.trim();
    let outcome = db
        .process_scan(school_id, now)
        .context("scan failed, please re-scan")?;

    match &outcome {
        ScanOutcome::CheckedIn { student, at } => {
            let at = at.with_timezone(tz);
            writeln!(writer, "{} checked in at {}", student.name, at.format("%H:%M:%S"))?;
        }
        ScanOutcome::CheckedOut { student, at } => {
            let at = at.with_timezone(tz);
            writeln!(writer, "{} checked out at {}", student.name, at.format("%H:%M:%S"))?;
        }
        ScanOutcome::UnknownId(id) => {
            writeln!(writer, "No student registered with ID {id}")?;
        }
    }

    let today = now.with_timezone(tz).date_naive();
    let (start, end) = calendar::day_bounds(today, tz);
    let visits_today = db.count_entries_between(start, end)?;
    let inside = db.count_currently_present()?;
    writeln!(writer, "Visits today: {visits_today} | currently inside: {inside}")?;

    Ok(())
}
