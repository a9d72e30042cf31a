//! Core domain logic for the library attendance tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Students: validated identifiers and education stages
//! - Attendance: the open/closed record model and scan outcomes
//! - Calendar: converting local calendar days into UTC query windows
//! - Tally: windowed daily visit counts
//!
//! Nothing in this crate reads a clock or touches storage. Every
//! time-dependent operation takes its timestamps as parameters so the logic
//! stays deterministic and testable.

pub mod calendar;
pub mod record;
pub mod stage;
pub mod student;
pub mod tally;
mod types;

pub use record::{AttendanceRecord, ScanOutcome};
pub use stage::{EducationStage, UnknownStage};
pub use student::Student;
pub use tally::DailyCounts;
pub use types::{SchoolId, ValidationError};
