//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// A validated school ID number.
///
/// This is the external identifier printed on a student's library card and
/// encoded in their QR code. It is an opaque string with no required format,
/// but it must be non-empty. Uniqueness across students is enforced at the
/// database level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchoolId(String);

impl SchoolId {
    /// Creates a new school ID after validation.
    ///
    /// Surrounding whitespace is trimmed before validation, since scanned
    /// input frequently carries stray whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "school ID" });
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SchoolId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SchoolId> for String {
    fn from(id: SchoolId) -> Self {
        id.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SchoolId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_id_rejects_empty() {
        assert!(SchoolId::new("").is_err());
        assert!(SchoolId::new("   ").is_err());
        assert!(SchoolId::new("S-2024-001").is_ok());
    }

    #[test]
    fn school_id_trims_whitespace() {
        let id = SchoolId::new("  S-2024-001\n").unwrap();
        assert_eq!(id.as_str(), "S-2024-001");
    }

    #[test]
    fn school_id_serde_roundtrip() {
        let id = SchoolId::new("S-2024-001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"S-2024-001\"");
        let parsed: SchoolId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn school_id_serde_rejects_empty() {
        let result: Result<SchoolId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
