//! Storage layer for the library attendance tracker.
//!
//! Provides persistence for students and attendance records using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! For multi-threaded access, either:
//! - Use a `Mutex<Database>` to serialize access
//! - Create a connection pool (e.g., with `r2d2`)
//! - Use separate `Database` instances per thread
//!
//! Independent of caller-side locking, the scan path itself is safe against
//! concurrent writers: [`Database::process_scan`] runs its read-modify-write
//! inside an immediate transaction, closes records with a conditional
//! `UPDATE … WHERE check_out IS NULL`, and a partial unique index rejects a
//! second open record per student. A lost race surfaces as a conflict and is
//! retried a bounded number of times with backoff.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in ISO 8601 format (e.g., `2024-03-15T08:30:00Z`).
//! This format is used by `chrono::DateTime<Utc>` serialization and ensures:
//! - Lexicographic ordering matches chronological ordering
//! - Human-readable values in the database
//! - Timezone-aware (always UTC)
//!
//! Calendar-day queries therefore take explicit half-open UTC windows; the
//! caller converts local dates with `lat_core::calendar`.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, ErrorCode, TransactionBehavior, params, params_from_iter};
use thiserror::Error;

use lat_core::{AttendanceRecord, EducationStage, SchoolId, ScanOutcome, Student};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A student with this school ID is already registered.
    #[error("school ID already registered: {0}")]
    DuplicateSchoolId(String),
    /// Another writer kept winning the race for this student's record.
    ///
    /// Transient; the caller should ask the user to re-scan.
    #[error("scan for {school_id} conflicted {attempts} times, giving up")]
    ScanContention { school_id: String, attempts: u32 },
    /// Internal marker for a lost write race, consumed by the retry loop.
    #[error("concurrent writer modified the record first")]
    WriteConflict,
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for record {record_id}: {timestamp}")]
    TimestampParse {
        record_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored student row failed domain validation.
    #[error("invalid student row {student_id}: {message}")]
    InvalidStudentRow { student_id: i64, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A student pending registration via [`Database::import_students`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub school_id: SchoolId,
    pub name: String,
    pub stage: EducationStage,
}

/// Visit count for one education stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTotal {
    pub stage: EducationStage,
    pub visits: u64,
}

/// Filters for report and export queries. All provided filters must match.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Half-open UTC window on the check-in timestamp.
    pub window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Restrict to students of this education stage.
    pub stage: Option<EducationStage>,
    /// Case-insensitive substring match on student name OR school ID.
    pub search: Option<String>,
}

/// One report line: a record joined with its student.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportRow {
    pub student: Student,
    pub record: AttendanceRecord,
}

/// The flat shape consumed by the export collaborator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExportRow {
    pub school_id: String,
    pub name: String,
    pub stage: EducationStage,
    pub check_in: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<DateTime<Utc>>,
}

const SCAN_MAX_ATTEMPTS: u32 = 3;

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY,
                school_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                stage TEXT NOT NULL
            );

            -- Attendance ledger: append-only, one row per visit
            -- check_in/check_out: ISO 8601 UTC (e.g., '2024-03-15T08:30:00Z')
            -- check_out IS NULL while the student is inside
            CREATE TABLE IF NOT EXISTS attendance_log (
                id INTEGER PRIMARY KEY,
                student_id INTEGER NOT NULL,
                check_in TEXT NOT NULL,
                check_out TEXT,
                FOREIGN KEY (student_id) REFERENCES students(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance_log(student_id);
            CREATE INDEX IF NOT EXISTS idx_attendance_check_in ON attendance_log(check_in);

            -- At most one open record per student, enforced by the storage layer
            CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open
                ON attendance_log(student_id) WHERE check_out IS NULL;
            ",
        )?;
        Ok(())
    }

    // ========== Student Registry ==========

    /// Registers a single student.
    ///
    /// Fails with [`DbError::DuplicateSchoolId`] if the school ID is taken.
    pub fn add_student(
        &mut self,
        school_id: &SchoolId,
        name: &str,
        stage: EducationStage,
    ) -> Result<Student, DbError> {
        let result = self.conn.execute(
            "INSERT INTO students (school_id, name, stage) VALUES (?1, ?2, ?3)",
            params![school_id.as_str(), name, stage.as_str()],
        );
        match result {
            Ok(_) => Ok(Student {
                id: self.conn.last_insert_rowid(),
                school_id: school_id.clone(),
                name: name.to_string(),
                stage,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(DbError::DuplicateSchoolId(school_id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Imports a batch of students in one transaction, ignoring duplicates by school ID.
    ///
    /// Returns the number of students actually inserted.
    pub fn import_students(&mut self, students: &[NewStudent]) -> Result<usize, DbError> {
        if students.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO students (school_id, name, stage) VALUES (?1, ?2, ?3)",
            )?;
            for student in students {
                inserted += stmt.execute(params![
                    student.school_id.as_str(),
                    student.name,
                    student.stage.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Looks up a student by their exact school ID.
    pub fn student_by_school_id(&self, school_id: &str) -> Result<Option<Student>, DbError> {
        student_by_school_id_in(&self.conn, school_id)
    }

    /// Lists all students ordered by name then ID.
    pub fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, school_id, name, stage FROM students ORDER BY name ASC, id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RawStudent {
                id: row.get(0)?,
                school_id: row.get(1)?,
                name: row.get(2)?,
                stage: row.get(3)?,
            })
        })?;
        let mut students = Vec::new();
        for row in rows {
            students.push(student_from_raw(row?)?);
        }
        Ok(students)
    }

    /// Removes a student and, via cascade, their attendance records.
    ///
    /// Returns whether a student was actually removed.
    pub fn remove_student(&mut self, school_id: &str) -> Result<bool, DbError> {
        let removed = self.conn.execute(
            "DELETE FROM students WHERE school_id = ?1",
            params![school_id],
        )?;
        Ok(removed > 0)
    }

    /// Total number of registered students.
    pub fn count_students(&self) -> Result<u64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count)
    }

    // ========== Presence Resolver ==========

    /// Returns the student's open attendance record, if any.
    ///
    /// With correct concurrency control there is at most one open record per
    /// student. If that invariant was somehow bypassed, the most recently
    /// created open record wins and the ambiguity is logged as a defect.
    pub fn find_open_record(&self, student_id: i64) -> Result<Option<AttendanceRecord>, DbError> {
        open_record_in(&self.conn, student_id)
    }

    // ========== Scan Processor ==========

    /// Processes one scan of a school ID at the given instant.
    ///
    /// A registered student with no open record checks in; one with an open
    /// record checks out. An unknown ID leaves the ledger untouched. The
    /// caller supplies `now` so the state machine never reads a clock.
    ///
    /// Lost races against concurrent writers are retried with backoff; if
    /// retries exhaust, [`DbError::ScanContention`] is returned and the user
    /// can simply re-scan.
    pub fn process_scan(
        &mut self,
        school_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, DbError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_scan(school_id, now) {
                Ok(outcome) => return Ok(outcome),
                Err(err) if is_write_conflict(&err) => {
                    if attempt >= SCAN_MAX_ATTEMPTS {
                        return Err(DbError::ScanContention {
                            school_id: school_id.to_string(),
                            attempts: attempt,
                        });
                    }
                    tracing::debug!(school_id, attempt, "scan write conflict, retrying");
                    std::thread::sleep(Duration::from_millis(10 << attempt));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One scan attempt as an atomic read-modify-write.
    fn try_scan(&mut self, school_id: &str, now: DateTime<Utc>) -> Result<ScanOutcome, DbError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let Some(student) = student_by_school_id_in(&tx, school_id)? else {
            tracing::debug!(school_id, "scan for unregistered ID");
            return Ok(ScanOutcome::UnknownId(school_id.to_string()));
        };

        let outcome = match open_record_in(&tx, student.id)? {
            Some(record) => {
                // Conditional close: a zero-row update means another writer
                // already closed this record since our read.
                let closed = tx.execute(
                    "UPDATE attendance_log SET check_out = ?1 WHERE id = ?2 AND check_out IS NULL",
                    params![format_timestamp(now), record.id],
                )?;
                if closed == 0 {
                    return Err(DbError::WriteConflict);
                }
                ScanOutcome::CheckedOut { student, at: now }
            }
            None => {
                // The partial unique index turns a racing double check-in
                // into a constraint violation here, caught by the retry loop.
                tx.execute(
                    "INSERT INTO attendance_log (student_id, check_in) VALUES (?1, ?2)",
                    params![student.id, format_timestamp(now)],
                )?;
                ScanOutcome::CheckedIn { student, at: now }
            }
        };
        tx.commit()?;
        Ok(outcome)
    }

    // ========== Aggregation Engine ==========

    /// Counts records whose check-in falls within the half-open UTC window.
    pub fn count_entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        if end <= start {
            return Ok(0);
        }
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM attendance_log WHERE check_in >= ?1 AND check_in < ?2",
            params![format_timestamp(start), format_timestamp(end)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Counts students currently inside (open records).
    ///
    /// By the one-open-record invariant this equals the number of students
    /// the presence resolver would report as inside.
    pub fn count_currently_present(&self) -> Result<u64, DbError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM attendance_log WHERE check_out IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Lists the students currently inside with their open records,
    /// ordered by check-in time.
    pub fn currently_present(&self) -> Result<Vec<ReportRow>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT s.id, s.school_id, s.name, s.stage, l.id, l.check_in, l.check_out
            FROM attendance_log l
            JOIN students s ON s.id = l.student_id
            WHERE l.check_out IS NULL
            ORDER BY l.check_in ASC, l.id ASC
            ",
        )?;
        let rows = stmt.query_map([], raw_report_row)?;
        let mut present = Vec::new();
        for row in rows {
            present.push(report_row_from_raw(row?)?);
        }
        Ok(present)
    }

    /// Visit counts per education stage, optionally windowed by check-in time.
    ///
    /// Every stage appears in the result, zero-filled if it has no visits.
    pub fn totals_by_stage(
        &self,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<StageTotal>, DbError> {
        let mut counts: Vec<(String, u64)> = Vec::new();
        match window {
            Some((start, end)) => {
                let mut stmt = self.conn.prepare(
                    "
                    SELECT s.stage, COUNT(l.id)
                    FROM students s
                    LEFT JOIN attendance_log l
                        ON l.student_id = s.id AND l.check_in >= ?1 AND l.check_in < ?2
                    GROUP BY s.stage
                    ",
                )?;
                let rows = stmt.query_map(
                    params![format_timestamp(start), format_timestamp(end)],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;
                for row in rows {
                    counts.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "
                    SELECT s.stage, COUNT(l.id)
                    FROM students s
                    LEFT JOIN attendance_log l ON l.student_id = s.id
                    GROUP BY s.stage
                    ",
                )?;
                let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
                for row in rows {
                    counts.push(row?);
                }
            }
        }

        let mut totals: Vec<StageTotal> = EducationStage::ALL
            .into_iter()
            .map(|stage| StageTotal { stage, visits: 0 })
            .collect();
        for (stage, visits) in counts {
            let Ok(stage) = stage.parse::<EducationStage>() else {
                tracing::warn!(%stage, "skipping unknown stage in totals");
                continue;
            };
            if let Some(total) = totals.iter_mut().find(|total| total.stage == stage) {
                total.visits = visits;
            }
        }
        Ok(totals)
    }

    /// Check-in timestamps within the half-open UTC window, ascending.
    ///
    /// Feed these to `lat_core::tally::daily_counts` for per-day counts.
    pub fn entry_timestamps_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, DbError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "
            SELECT id, check_in FROM attendance_log
            WHERE check_in >= ?1 AND check_in < ?2
            ORDER BY check_in ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            params![format_timestamp(start), format_timestamp(end)],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )?;
        let mut timestamps = Vec::new();
        for row in rows {
            let (id, check_in) = row?;
            timestamps.push(parse_timestamp(&check_in, id)?);
        }
        Ok(timestamps)
    }

    /// Records matching all provided filters, ordered by check-in time.
    ///
    /// When the filter carries no window, the caller-supplied `today` bounds
    /// apply. The default is a parameter rather than an ambient "now" so
    /// that an absent date filter is an explicit decision at the call site.
    pub fn filtered_report(
        &self,
        filter: &RecordFilter,
        today: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<Vec<ReportRow>, DbError> {
        let window = filter.window.unwrap_or(today);
        self.query_report(Some(window), filter.stage, filter.search.as_deref())
    }

    /// The full ledger (or a filtered subset) in export shape,
    /// ordered by check-in time.
    ///
    /// Unlike [`Database::filtered_report`], an absent window means the
    /// whole ledger, not today.
    pub fn export_rows(&self, filter: Option<&RecordFilter>) -> Result<Vec<ExportRow>, DbError> {
        let (window, stage, search) = match filter {
            Some(filter) => (filter.window, filter.stage, filter.search.as_deref()),
            None => (None, None, None),
        };
        let rows = self.query_report(window, stage, search)?;
        Ok(rows
            .into_iter()
            .map(|row| ExportRow {
                school_id: row.student.school_id.to_string(),
                name: row.student.name,
                stage: row.student.stage,
                check_in: row.record.check_in,
                check_out: row.record.check_out,
            })
            .collect())
    }

    /// Total number of attendance records.
    pub fn count_records(&self) -> Result<u64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM attendance_log", [], |row| row.get(0))?;
        Ok(count)
    }

    fn query_report(
        &self,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        stage: Option<EducationStage>,
        search: Option<&str>,
    ) -> Result<Vec<ReportRow>, DbError> {
        let mut sql = String::from(
            "
            SELECT s.id, s.school_id, s.name, s.stage, l.id, l.check_in, l.check_out
            FROM attendance_log l
            JOIN students s ON s.id = l.student_id
            WHERE 1 = 1
            ",
        );
        let mut bindings: Vec<String> = Vec::new();
        if let Some((start, end)) = window {
            sql.push_str(" AND l.check_in >= ? AND l.check_in < ?");
            bindings.push(format_timestamp(start));
            bindings.push(format_timestamp(end));
        }
        if let Some(stage) = stage {
            sql.push_str(" AND s.stage = ?");
            bindings.push(stage.as_str().to_string());
        }
        if let Some(search) = search {
            sql.push_str(
                " AND (LOWER(s.name) LIKE ? ESCAPE '\\' OR LOWER(s.school_id) LIKE ? ESCAPE '\\')",
            );
            let pattern = like_substring_pattern(&search.to_lowercase());
            bindings.push(pattern.clone());
            bindings.push(pattern);
        }
        sql.push_str(" ORDER BY l.check_in ASC, l.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings.iter()), raw_report_row)?;
        let mut report = Vec::new();
        for row in rows {
            report.push(report_row_from_raw(row?)?);
        }
        Ok(report)
    }
}

/// Wraps `search` in `%…%` for a literal substring match, escaping the LIKE
/// metacharacters so `S_1` does not match `SX1`.
fn like_substring_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn is_write_conflict(err: &DbError) -> bool {
    match err {
        DbError::WriteConflict => true,
        DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => matches!(
            err.code,
            ErrorCode::ConstraintViolation | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
        ),
        _ => false,
    }
}

// ========== Row Conversion ==========

#[derive(Debug)]
struct RawStudent {
    id: i64,
    school_id: String,
    name: String,
    stage: String,
}

#[derive(Debug)]
struct RawRecord {
    id: i64,
    student_id: i64,
    check_in: String,
    check_out: Option<String>,
}

fn student_from_raw(raw: RawStudent) -> Result<Student, DbError> {
    let school_id =
        SchoolId::new(raw.school_id).map_err(|err| DbError::InvalidStudentRow {
            student_id: raw.id,
            message: err.to_string(),
        })?;
    let stage = raw
        .stage
        .parse::<EducationStage>()
        .map_err(|err| DbError::InvalidStudentRow {
            student_id: raw.id,
            message: err.to_string(),
        })?;
    Ok(Student {
        id: raw.id,
        school_id,
        name: raw.name,
        stage,
    })
}

fn record_from_raw(raw: RawRecord) -> Result<AttendanceRecord, DbError> {
    let check_in = parse_timestamp(&raw.check_in, raw.id)?;
    let check_out = raw
        .check_out
        .as_deref()
        .map(|timestamp| parse_timestamp(timestamp, raw.id))
        .transpose()?;
    Ok(AttendanceRecord {
        id: raw.id,
        student_id: raw.student_id,
        check_in,
        check_out,
    })
}

fn raw_report_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<(RawStudent, RawRecord)> {
    let student = RawStudent {
        id: row.get(0)?,
        school_id: row.get(1)?,
        name: row.get(2)?,
        stage: row.get(3)?,
    };
    let record = RawRecord {
        id: row.get(4)?,
        student_id: student.id,
        check_in: row.get(5)?,
        check_out: row.get(6)?,
    };
    Ok((student, record))
}

fn report_row_from_raw(raw: (RawStudent, RawRecord)) -> Result<ReportRow, DbError> {
    let (student, record) = raw;
    Ok(ReportRow {
        student: student_from_raw(student)?,
        record: record_from_raw(record)?,
    })
}

fn student_by_school_id_in(
    conn: &Connection,
    school_id: &str,
) -> Result<Option<Student>, DbError> {
    let mut stmt =
        conn.prepare("SELECT id, school_id, name, stage FROM students WHERE school_id = ?1")?;
    let mut rows = stmt.query_map([school_id], |row| {
        Ok(RawStudent {
            id: row.get(0)?,
            school_id: row.get(1)?,
            name: row.get(2)?,
            stage: row.get(3)?,
        })
    })?;
    rows.next()
        .transpose()
        .map_err(DbError::from)?
        .map(student_from_raw)
        .transpose()
}

fn open_record_in(conn: &Connection, student_id: i64) -> Result<Option<AttendanceRecord>, DbError> {
    let mut stmt = conn.prepare(
        "
        SELECT id, student_id, check_in, check_out FROM attendance_log
        WHERE student_id = ?1 AND check_out IS NULL
        ORDER BY check_in DESC, id DESC
        ",
    )?;
    let rows = stmt.query_map([student_id], |row| {
        Ok(RawRecord {
            id: row.get(0)?,
            student_id: row.get(1)?,
            check_in: row.get(2)?,
            check_out: row.get(3)?,
        })
    })?;
    let mut open = Vec::new();
    for row in rows {
        open.push(row?);
    }
    if open.len() > 1 {
        // Should be unreachable with the partial unique index in place.
        tracing::warn!(
            student_id,
            open_records = open.len(),
            "multiple open records for one student; resolving to the most recent"
        );
    }
    open.into_iter().next().map(record_from_raw).transpose()
}

fn parse_timestamp(timestamp: &str, record_id: i64) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            record_id,
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
