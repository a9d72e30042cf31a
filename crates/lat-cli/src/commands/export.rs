//! Export command: the full ledger for external consumers.

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::SecondsFormat;

use lat_db::Database;

/// Writes the full ledger as CSV (default) or JSON lines.
pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let rows = db.export_rows(None)?;

    if json {
        for row in rows {
            serde_json::to_writer(&mut *writer, &row).context("failed to serialize row")?;
            writeln!(writer)?;
        }
        return Ok(());
    }

    writeln!(writer, "school_id,name,stage,check_in,check_out")?;
    for row in rows {
        let check_out = row.check_out.map_or_else(String::new, |at| {
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        });
        writeln!(
            writer,
            "{},{},{},{},{}",
            csv_field(&row.school_id),
            csv_field(&row.name),
            csv_field(row.stage.label()),
            row.check_in.to_rfc3339_opts(SecondsFormat::Secs, true),
            check_out
        )?;
    }
    Ok(())
}

/// Quotes a CSV field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
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
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("Vogel, Lena"), "\"Vogel, Lena\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn csv_export_has_header_and_open_records_have_empty_check_out() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_student(
            &SchoolId::new("S-1").unwrap(),
            "Vogel, Lena",
            EducationStage::Elementary,
        )
        .unwrap();
        db.process_scan("S-1", ts("2024-03-15T08:00:00Z")).unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, false).unwrap();
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "school_id,name,stage,check_in,check_out");
        assert_eq!(
            lines[1],
            "S-1,\"Vogel, Lena\",Elementary,2024-03-15T08:00:00Z,"
        );
    }

    #[test]
    fn json_export_is_one_object_per_line() {
        let mut db = Database::open_in_memory().unwrap();
        db.add_student(
            &SchoolId::new("S-1").unwrap(),
            "Lena Vogel",
            EducationStage::Elementary,
        )
        .unwrap();
        db.process_scan("S-1", ts("2024-03-15T08:00:00Z")).unwrap();
        db.process_scan("S-1", ts("2024-03-15T10:00:00Z")).unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, true).unwrap();
        let output = String::from_utf8(output).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);
        let row: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(row["school_id"], "S-1");
        assert_eq!(row["check_out"], "2024-03-15T10:00:00Z");
    }
}
