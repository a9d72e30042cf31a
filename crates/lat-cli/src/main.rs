use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lat_cli::commands::{dashboard, export, report, scan, status, students};
use lat_cli::{Cli, Commands, Config, StudentsAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(lat_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = lat_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();

    match &cli.command {
        Some(Commands::Scan { school_id }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            scan::run(&mut writer, &mut db, school_id, Utc::now(), &Local)?;
        }
        Some(Commands::Students { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                StudentsAction::Add {
                    school_id,
                    name,
                    stage,
                } => students::add(&mut writer, &mut db, school_id, name, stage)?,
                StudentsAction::Import { file } => students::import(&mut writer, &mut db, file)?,
                StudentsAction::List => students::list(&mut writer, &db)?,
                StudentsAction::Remove { school_id } => {
                    students::remove(&mut writer, &mut db, school_id)?;
                }
            }
        }
        Some(Commands::Dashboard { days }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            dashboard::run(&mut writer, &db, *days, Local::now().date_naive(), &Local)?;
        }
        Some(Commands::Report {
            date,
            stage,
            search,
            json,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let args = report::ReportArgs {
                date: date.as_deref(),
                stage: stage.as_deref(),
                search: search.as_deref(),
                json: *json,
            };
            report::run(&mut writer, &db, &args, Local::now().date_naive(), &Local)?;
        }
        Some(Commands::Export { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            export::run(&mut writer, &db, *json)?;
        }
        Some(Commands::Status) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            status::run(&mut writer, &db, Utc::now(), &Local)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(writer)?;
        }
    }

    Ok(())
}
