//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Library attendance tracker.
///
/// Students check in and out by scanning their school ID; librarians view
/// dashboards, filtered reports, and exports over the attendance ledger.
#[derive(Debug, Parser)]
#[command(name = "lat", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Process one scan of a school ID (check in or check out).
    Scan {
        /// The scanned school ID.
        school_id: String,
    },

    /// Administer the student registry.
    Students {
        #[command(subcommand)]
        action: StudentsAction,
    },

    /// Show daily visit counts, stage totals, and who is currently inside.
    Dashboard {
        /// How many days back to chart.
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// List attendance records with optional filters (defaults to today).
    Report {
        /// Only records checked in on this date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,

        /// Only students of this education stage.
        #[arg(long)]
        stage: Option<String>,

        /// Case-insensitive match on student name or school ID.
        #[arg(long)]
        search: Option<String>,

        /// Output JSON lines instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Export the full attendance ledger.
    Export {
        /// Output JSON lines instead of CSV.
        #[arg(long)]
        json: bool,
    },

    /// Show registry and ledger totals.
    Status,
}

/// Student registry operations.
#[derive(Debug, Subcommand)]
pub enum StudentsAction {
    /// Register a single student.
    Add {
        /// The unique school ID.
        school_id: String,

        /// Display name.
        name: String,

        /// Education stage: elementary, highschool, or college.
        stage: String,
    },

    /// Import students from a file of `school_id,stage,name` lines.
    Import {
        /// Path to the import file.
        file: PathBuf,
    },

    /// List registered students.
    List,

    /// Remove a student and their attendance records.
    Remove {
        /// The school ID to remove.
        school_id: String,
    },
}
