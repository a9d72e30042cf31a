//! Report command: the filtered ledger view.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone};

use lat_core::{EducationStage, calendar};
use lat_db::{Database, RecordFilter};

/// Raw filter arguments as typed on the command line.
#[derive(Debug, Default)]
pub struct ReportArgs<'a> {
    pub date: Option<&'a str>,
    pub stage: Option<&'a str>,
    pub search: Option<&'a str>,
    pub json: bool,
}

/// Prints records matching all provided filters.
///
/// With no date filter, today's records are shown. Unparseable date or stage
/// values degrade to "filter not applied" with a warning rather than failing
/// the whole report.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    db: &Database,
    args: &ReportArgs<'_>,
    today: NaiveDate,
    tz: &Tz,
) -> Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let filter = build_filter(args, tz);
    let rows = db.filtered_report(&filter, calendar::day_bounds(today, tz))?;

    if args.json {
        for row in rows {
            serde_json::to_writer(&mut *writer, &row).context("failed to serialize row")?;
            writeln!(writer)?;
        }
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No matching records.")?;
        return Ok(());
    }
    for row in rows {
        let check_in = row.record.check_in.with_timezone(tz);
        let check_out = row.record.check_out.map_or_else(
            || "inside".to_string(),
            |at| at.with_timezone(tz).format("%H:%M:%S").to_string(),
        );
        writeln!(
            writer,
            "{}  {} - {}  {} ({}, {})",
            check_in.format("%Y-%m-%d"),
            check_in.format("%H:%M:%S"),
            check_out,
            row.student.name,
            row.student.school_id,
            row.student.stage.label()
        )?;
    }
    Ok(())
}

/// Builds the database filter, dropping anything unparseable.
fn build_filter<Tz: TimeZone>(args: &ReportArgs<'_>, tz: &Tz) -> RecordFilter {
    let window = args.date.and_then(|raw| match raw.parse::<NaiveDate>() {
        Ok(date) => Some(calendar::day_bounds(date, tz)),
        Err(err) => {
            tracing::warn!(raw, %err, "ignoring unparseable date filter");
            None
        }
    });
    let stage = args
        .stage
        .and_then(|raw| match raw.parse::<EducationStage>() {
            Ok(stage) => Some(stage),
            Err(err) => {
                tracing::warn!(raw, %err, "ignoring unknown stage filter");
                None
            }
        });
    let search = args
        .search
        .map(str::trim)
        .filter(|search| !search.is_empty())
        .map(str::to_string);
    RecordFilter {
        window,
        stage,
        search,
    }
}
