//! Status command for showing registry and ledger totals.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use lat_core::calendar;
use lat_db::Database;

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &Database,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<()> {
    let today = now.with_timezone(tz).date_naive();
    let (start, end) = calendar::day_bounds(today, tz);

    writeln!(writer, "Library attendance status")?;
    writeln!(writer, "Students: {}", db.count_students()?)?;
    writeln!(writer, "Attendance records: {}", db.count_records()?)?;
    writeln!(writer, "Visits today: {}", db.count_entries_between(start, end)?)?;
    writeln!(writer, "Currently inside: {}", db.count_currently_present()?)?;
    writeln!(
        writer,
        "Server time: {}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    Ok(())
}
