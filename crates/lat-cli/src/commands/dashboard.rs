//! Dashboard command: daily counts, stage totals, and current visitors.

use std::io::Write;

use anyhow::Result;
use chrono::{Duration, NaiveDate, TimeZone};

use lat_core::{calendar, tally};
use lat_db::Database;

/// Prints visit counts for the last `days` days, per-stage totals, and the
/// students currently inside.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &Database,
    days: u32,
    today: NaiveDate,
    tz: &Tz,
) -> Result<()> {
    let days = days.max(1);
    let start = today - Duration::days(i64::from(days) - 1);

    let (window_start, window_end) = calendar::span_bounds(start, today, tz);
    let check_ins = db.entry_timestamps_between(window_start, window_end)?;

    writeln!(writer, "Visits, last {days} days:")?;
    for (date, count) in tally::daily_counts(&check_ins, start, today, tz) {
        writeln!(writer, "  {date}  {count}")?;
    }

    writeln!(writer, "Visits by stage:")?;
    for total in db.totals_by_stage(None)? {
        writeln!(writer, "  {}: {}", total.stage.label(), total.visits)?;
    }

    let present = db.currently_present()?;
    writeln!(writer, "Currently inside ({}):", present.len())?;
    for row in present {
        writeln!(
            writer,
            "  {} ({}) since {}",
            row.student.name,
            row.student.school_id,
            row.record.check_in.format("%H:%M:%S")
        )?;
    }

    writeln!(writer, "Registered students: {}", db.count_students()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};
    use lat_core::{EducationStage, SchoolId};

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn dashboard_charts_every_day_in_the_window() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_student(
            &SchoolId::new("S-1").unwrap(),
            "Lena Vogel",
            EducationStage::Elementary,
        )
        .unwrap();
        db.process_scan("S-1", ts("2024-03-15T08:00:00Z")).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        let mut output = Vec::new();
        run(&mut output, &db, 3, today, &Utc).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("2024-03-14  0"));
        assert!(output.contains("2024-03-15  1"));
        assert!(output.contains("2024-03-16  0"));
        assert!(output.contains("Elementary: 1"));
        assert!(output.contains("Currently inside (1):"));
        assert!(output.contains("Lena Vogel (S-1) since 08:00:00"));
        assert!(output.contains("Registered students: 1"));
    }
}
