//! Calendar-day boundary math.
//!
//! All ledger timestamps are stored in UTC, but counts and reports are framed
//! in terms of local calendar days ("how many visits on 2024-03-15?"). The
//! functions here convert local dates into half-open UTC windows so that
//! queries never have to consult an ambient clock or timezone themselves:
//! the caller decides which timezone a "day" means.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

/// Converts a date at local midnight to UTC.
/// Handles DST ambiguity by picking the earlier instant.
fn local_midnight_to_utc<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        // Single or ambiguous (DST fall-back): use the earlier time
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight is rare but possible.
            // Use 1am local which is guaranteed to exist.
            let one_am = date.and_time(NaiveTime::from_hms_opt(1, 0, 0).unwrap_or(NaiveTime::MIN));
            match tz.from_local_datetime(&one_am) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                LocalResult::None => Utc.from_utc_datetime(&midnight),
            }
        }
    }
}

/// The half-open UTC window `[start, end)` covering one local calendar day.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight_to_utc(date, tz);
    let end = local_midnight_to_utc(date + Duration::days(1), tz);
    (start, end)
}

/// The half-open UTC window covering an inclusive range of local days.
///
/// An inverted range (`end < start`) yields an empty window.
pub fn span_bounds<Tz: TimeZone>(
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> (DateTime<Utc>, DateTime<Utc>) {
    if end < start {
        let instant = local_midnight_to_utc(start, tz);
        return (instant, instant);
    }
    let window_start = local_midnight_to_utc(start, tz);
    let window_end = local_midnight_to_utc(end + Duration::days(1), tz);
    (window_start, window_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn utc_day_bounds_cover_midnight_to_midnight() {
        let (start, end) = day_bounds(date(2024, 3, 15), &Utc);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn offset_day_bounds_shift_into_utc() {
        // UTC+8: local midnight is 16:00 UTC the previous day
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let (start, end) = day_bounds(date(2024, 3, 15), &tz);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 14, 16, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 15, 16, 0, 0).unwrap());
    }

    #[test]
    fn span_bounds_cover_inclusive_range() {
        let (start, end) = span_bounds(date(2024, 3, 15), date(2024, 3, 17), &Utc);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 18, 0, 0, 0).unwrap());
    }

    #[test]
    fn single_day_span_equals_day_bounds() {
        let d = date(2024, 3, 15);
        assert_eq!(span_bounds(d, d, &Utc), day_bounds(d, &Utc));
    }

    #[test]
    fn inverted_span_is_empty() {
        let (start, end) = span_bounds(date(2024, 3, 17), date(2024, 3, 15), &Utc);
        assert_eq!(start, end);
    }
}
