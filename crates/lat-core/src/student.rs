//! Registered students.

use serde::{Deserialize, Serialize};

use crate::stage::EducationStage;
use crate::types::SchoolId;

/// A registered student.
///
/// Students are created administratively (manual entry or import) and never
/// by the scan flow. Deleting a student cascades to their attendance records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Internal database identifier.
    pub id: i64,
    /// The unique external identifier encoded on the student's card.
    pub school_id: SchoolId,
    /// Display name.
    pub name: String,
    /// Education stage used for grouping and filtering.
    pub stage: EducationStage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_serialization_roundtrip() {
        let student = Student {
            id: 7,
            school_id: SchoolId::new("S-2024-007").unwrap(),
            name: "Amara Okafor".to_string(),
            stage: EducationStage::College,
        };

        let json = serde_json::to_string(&student).unwrap();
        let parsed: Student = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, student);
    }

    #[test]
    fn student_rejects_empty_school_id() {
        let json = r#"{
            "id": 1,
            "school_id": "",
            "name": "Nobody",
            "stage": "college"
        }"#;
        let result: Result<Student, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
