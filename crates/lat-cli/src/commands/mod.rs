//! Command implementations.

pub mod dashboard;
pub mod export;
pub mod report;
pub mod scan;
pub mod status;
pub mod students;
