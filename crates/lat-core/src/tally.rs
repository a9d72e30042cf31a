//! Windowed daily visit counts.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Per-day visit counts over an inclusive date range.
///
/// Yields one `(date, count)` pair per calendar day, ascending. Days with no
/// visits yield a count of 0 rather than being skipped, so a dashboard chart
/// always has a point per day. The iterator is finite and `Clone`, so a
/// consumer can restart it from the beginning at any time.
#[derive(Debug, Clone)]
pub struct DailyCounts {
    counts: HashMap<NaiveDate, u64>,
    next: NaiveDate,
    end: NaiveDate,
    done: bool,
}

impl Iterator for DailyCounts {
    type Item = (NaiveDate, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let date = self.next;
        let count = self.counts.get(&date).copied().unwrap_or(0);
        if date < self.end {
            self.next = date + chrono::Duration::days(1);
        } else {
            self.done = true;
        }
        Some((date, count))
    }
}

/// Buckets check-in timestamps into local calendar days over `[start, end]`.
///
/// Timestamps falling outside the range are ignored; the timezone decides
/// which local day a UTC instant belongs to. An inverted range yields an
/// empty iterator.
pub fn daily_counts<Tz: TimeZone>(
    check_ins: &[DateTime<Utc>],
    start: NaiveDate,
    end: NaiveDate,
    tz: &Tz,
) -> DailyCounts {
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for check_in in check_ins {
        let date = check_in.with_timezone(tz).date_naive();
        if date >= start && date <= end {
            *counts.entry(date).or_default() += 1;
        }
    }
    DailyCounts {
        counts,
        next: start,
        end,
        done: end < start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn missing_days_yield_zero() {
        let check_ins = vec![at(2024, 3, 15, 9), at(2024, 3, 15, 14), at(2024, 3, 17, 10)];
        let counts: Vec<_> =
            daily_counts(&check_ins, date(2024, 3, 15), date(2024, 3, 17), &Utc).collect();
        assert_eq!(
            counts,
            vec![
                (date(2024, 3, 15), 2),
                (date(2024, 3, 16), 0),
                (date(2024, 3, 17), 1),
            ]
        );
    }

    #[test]
    fn single_day_window_yields_one_pair() {
        let check_ins = vec![at(2024, 3, 15, 9), at(2024, 3, 15, 14), at(2024, 3, 16, 10)];
        let counts: Vec<_> =
            daily_counts(&check_ins, date(2024, 3, 15), date(2024, 3, 15), &Utc).collect();
        assert_eq!(counts, vec![(date(2024, 3, 15), 2)]);
    }

    #[test]
    fn iterator_is_restartable() {
        let check_ins = vec![at(2024, 3, 15, 9)];
        let counts = daily_counts(&check_ins, date(2024, 3, 14), date(2024, 3, 16), &Utc);
        let first: Vec<_> = counts.clone().collect();
        let second: Vec<_> = counts.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn timezone_decides_day_membership() {
        // 2024-03-15T20:00Z is already 2024-03-16 in UTC+8
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let check_ins = vec![at(2024, 3, 15, 20)];
        let counts: Vec<_> =
            daily_counts(&check_ins, date(2024, 3, 15), date(2024, 3, 16), &tz).collect();
        assert_eq!(
            counts,
            vec![(date(2024, 3, 15), 0), (date(2024, 3, 16), 1)]
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        let counts: Vec<_> =
            daily_counts(&[], date(2024, 3, 16), date(2024, 3, 15), &Utc).collect();
        assert!(counts.is_empty());
    }

    #[test]
    fn out_of_range_timestamps_are_ignored() {
        let check_ins = vec![at(2024, 3, 10, 9), at(2024, 3, 20, 9)];
        let total: u64 = daily_counts(&check_ins, date(2024, 3, 14), date(2024, 3, 16), &Utc)
            .map(|(_, count)| count)
            .sum();
        assert_eq!(total, 0);
    }
}
