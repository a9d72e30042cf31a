//! Attendance records and scan outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::student::Student;

/// One attendance session.
///
/// A record is *open* while its `check_out` is unset, meaning the student is
/// currently inside. Per student, at most one record may be open at any time;
/// the storage layer enforces this. `check_in` is immutable after creation
/// and `check_out` transitions exactly once, from `None` to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Internal database identifier.
    pub id: i64,
    /// The student this record belongs to.
    pub student_id: i64,
    /// When the student checked in.
    pub check_in: DateTime<Utc>,
    /// When the student checked out, if they have.
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    /// Whether this record is still open (the student is inside).
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

/// The result of processing one scan.
///
/// A scan is a pure toggle: a student with no open record checks in, a
/// student with an open record checks out. An unknown ID changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A new open record was created at `at`.
    CheckedIn { student: Student, at: DateTime<Utc> },
    /// The student's open record was closed at `at`.
    CheckedOut { student: Student, at: DateTime<Utc> },
    /// No student with this school ID is registered. The ledger is unchanged.
    UnknownId(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn open_record_has_no_check_out() {
        let record = AttendanceRecord {
            id: 1,
            student_id: 1,
            check_in: Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap(),
            check_out: None,
        };
        assert!(record.is_open());
    }

    #[test]
    fn closed_record_has_check_out() {
        let record = AttendanceRecord {
            id: 1,
            student_id: 1,
            check_in: Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap(),
            check_out: Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()),
        };
        assert!(!record.is_open());
    }
}
