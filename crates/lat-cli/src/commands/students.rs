//! Student registry administration.
//!
//! Registration is always explicit: scans never create students, so `add`
//! and `import` are the only ways a school ID becomes known.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use lat_core::{EducationStage, SchoolId};
use lat_db::{Database, NewStudent};

/// Registers a single student.
pub fn add<W: Write>(
    writer: &mut W,
    db: &mut Database,
    school_id: &str,
    name: &str,
    stage: &str,
) -> Result<()> {
    let school_id = SchoolId::new(school_id)?;
    let stage: EducationStage = stage.parse()?;
    let student = db.add_student(&school_id, name, stage)?;
    writeln!(
        writer,
        "Registered {} ({}, {})",
        student.name,
        student.school_id,
        student.stage.label()
    )?;
    Ok(())
}

/// Imports students from a file of `school_id,stage,name` lines.
///
/// Blank lines and `#` comments are allowed. Malformed lines are logged and
/// skipped; already-registered school IDs are ignored.
pub fn import<W: Write>(writer: &mut W, db: &mut Database, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut batch = Vec::new();
    let mut skipped = 0;
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(student) => batch.push(student),
            Err(message) => {
                tracing::warn!(line = index + 1, %message, "skipping malformed import line");
                skipped += 1;
            }
        }
    }

    let imported = db.import_students(&batch)?;
    let duplicates = batch.len() - imported;
    writeln!(
        writer,
        "Imported {imported} students ({duplicates} duplicates ignored, {skipped} lines skipped)"
    )?;
    Ok(())
}

/// Parses one `school_id,stage,name` line. The name may contain commas.
fn parse_line(line: &str) -> Result<NewStudent, String> {
    let mut parts = line.splitn(3, ',');
    let school_id = parts.next().unwrap_or_default().trim();
    let stage = parts.next().unwrap_or_default().trim();
    let name = parts.next().unwrap_or_default().trim();

    let school_id = SchoolId::new(school_id).map_err(|err| err.to_string())?;
    let stage: EducationStage = stage.parse().map_err(|err: lat_core::UnknownStage| err.to_string())?;
    if name.is_empty() {
        return Err("missing student name".to_string());
    }
    Ok(NewStudent {
        school_id,
        name: name.to_string(),
        stage,
    })
}

/// Lists registered students.
pub fn list<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let students = db.list_students()?;
    if students.is_empty() {
        writeln!(writer, "No students registered.")?;
        return Ok(());
    }
    for student in students {
        writeln!(
            writer,
            "{}  {}  {}",
            student.school_id,
            student.stage.label(),
            student.name
        )?;
    }
    Ok(())
}

/// Removes a student and, via cascade, their attendance records.
pub fn remove<W: Write>(writer: &mut W, db: &mut Database, school_id: &str) -> Result<()> {
    if db.remove_student(school_id)? {
        writeln!(writer, "Removed {school_id} and their attendance records")?;
    } else {
        writeln!(writer, "No student registered with ID {school_id}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_allows_commas_in_name() {
        let student = parse_line("S-1,college,Vogel, Lena").unwrap();
        assert_eq!(student.school_id.as_str(), "S-1");
        assert_eq!(student.stage, EducationStage::College);
        assert_eq!(student.name, "Vogel, Lena");
    }

    #[test]
    fn parse_line_rejects_missing_fields() {
        assert!(parse_line("S-1").is_err());
        assert!(parse_line("S-1,college").is_err());
        assert!(parse_line(",college,Lena").is_err());
        assert!(parse_line("S-1,kindergarten,Lena").is_err());
    }

    #[test]
    fn import_skips_malformed_lines() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("students.csv");
        std::fs::write(
            &path,
            "# roster\nS-1,elementary,Lena Vogel\nnot a valid line\nS-2,highschool,Maya Chen\n",
        )
        .unwrap();

        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        import(&mut output, &mut db, &path).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Imported 2 students (0 duplicates ignored, 1 lines skipped)"));
        assert_eq!(db.count_students().unwrap(), 2);
    }

    #[test]
    fn add_then_remove_roundtrip() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        add(&mut output, &mut db, "S-1", "Lena Vogel", "elementary").unwrap();
        assert_eq!(db.count_students().unwrap(), 1);

        let mut output = Vec::new();
        remove(&mut output, &mut db, "S-1").unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Removed S-1"));
        assert_eq!(db.count_students().unwrap(), 0);
    }
}
