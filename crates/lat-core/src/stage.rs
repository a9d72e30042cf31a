//! Education stage enum as the single source of truth for stage strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The education stage a student belongs to.
///
/// This is a fixed, small set: attendance totals are grouped by it and report
/// filters match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EducationStage {
    Elementary,
    HighSchool,
    College,
}

impl EducationStage {
    /// All stages, in display order.
    pub const ALL: [Self; 3] = [Self::Elementary, Self::HighSchool, Self::College];

    /// String representation for database storage and filter arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Elementary => "elementary",
            Self::HighSchool => "highschool",
            Self::College => "college",
        }
    }

    /// Human-readable label for reports and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Elementary => "Elementary",
            Self::HighSchool => "High School",
            Self::College => "College",
        }
    }
}

impl fmt::Display for EducationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EducationStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Legacy exports used upper-case stage names
        match s.to_ascii_lowercase().as_str() {
            "elementary" => Ok(Self::Elementary),
            "highschool" | "high-school" | "high_school" => Ok(Self::HighSchool),
            "college" => Ok(Self::College),
            _ => Err(UnknownStage(s.to_string())),
        }
    }
}

impl Serialize for EducationStage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EducationStage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown education stage strings.
#[derive(Debug, Clone)]
pub struct UnknownStage(String);

impl fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown education stage: {}", self.0)
    }
}

impl std::error::Error for UnknownStage {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in EducationStage::ALL {
            let s = variant.to_string();
            let parsed: EducationStage = s.parse().expect("should parse");
            assert_eq!(parsed, variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn legacy_casing_parses() {
        let stage: EducationStage = "HIGHSCHOOL".parse().expect("should parse");
        assert_eq!(stage, EducationStage::HighSchool);

        let stage: EducationStage = "Elementary".parse().expect("should parse");
        assert_eq!(stage, EducationStage::Elementary);
    }

    #[test]
    fn unknown_stage_errors() {
        let result: Result<EducationStage, _> = "kindergarten".parse();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown education stage: kindergarten");
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(EducationStage::HighSchool.label(), "High School");
    }
}
