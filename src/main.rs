//! Mendeley CLI - read references and files out of the Mendeley Desktop database

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use mendeley::config::{self, MendeleyConfig};
use mendeley::export::{self, CopyEvent};
use mendeley::locator::{self, DatabaseLocator};
use mendeley::output::{self, OutputFormat};
use mendeley::ui::{self, CopyProgress, Icons, Spinner};
use mendeley::{file_url, Reference, ReferenceRepository};
use owo_colors::OwoColorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mendeley")]
#[command(version)]
#[command(about = "Read references and attached files from the Mendeley Desktop database")]
#[command(long_about = r#"
Reads the local Mendeley Desktop SQLite database (never writes to it):
  • List references, optionally restricted to a virtual folder
  • Look up a reference by citation key
  • Find and copy the files attached to documents

Example usage:
  mendeley path
  mendeley list --format table
  mendeley folder Confirmation/Debt
  mendeley copy Confirmation/Debt /var/tmp/debtdocs
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the Mendeley database (defaults to config, then the desktop install)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the path of the Mendeley database
    Path,

    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,

        /// Milliseconds to wait when Mendeley Desktop holds a lock
        #[arg(long)]
        busy_timeout_ms: Option<u64>,
    },

    /// List every reference in the library
    List {
        /// Output format (text, json, table)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the references in a virtual folder
    Folder {
        /// Folder path from the library root, e.g. Confirmation/Debt
        path: String,

        /// Output format (text, json, table)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Look up a reference by citation key
    Cite {
        /// Citation key
        key: String,

        /// Output format (text, json, table)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the file attached to a document
    File {
        /// Document UUID
        uuid: String,

        /// Print a filesystem path instead of the stored file:// URL
        #[arg(long)]
        decode: bool,
    },

    /// Copy the files of every document in a folder into a directory
    Copy {
        /// Folder path from the library root
        folder: String,

        /// Existing destination directory
        destination: PathBuf,
    },

    /// Show information about the database
    Info,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Path => {
            let locator = config::default_locator()?;
            match locator.locate() {
                Ok(path) => println!("{}", path.display()),
                Err(e) => {
                    tracing::debug!("{}", e);
                    ui::error("Cannot find the Mendeley sqlite3 database.");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Init { force, busy_timeout_ms } => {
            let db = open_database(cli.database.as_deref(), config.as_ref())?;
            let path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let new_config = MendeleyConfig {
                database: Some(db.path().to_string_lossy().to_string()),
                busy_timeout_ms,
            };

            config::write_config(&path, &new_config, force)?;
            ui::success(&format!("Wrote {}", path.display()));
            ui::info("Database", &db.path().display().to_string());
        }

        Commands::List { format } => {
            let format: OutputFormat = format.parse()?;
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;

            let spinner = Spinner::new("Reading references");
            let references = repo.list_references();
            spinner.finish_and_clear();

            print_references(&references?, format)?;
        }

        Commands::Folder { path, format } => {
            let format: OutputFormat = format.parse()?;
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;

            let references = repo.list_references_in_folder(&path)?;
            tracing::info!("{} {} references in {}", Icons::FOLDER, references.len(), path);
            print_references(&references, format)?;
        }

        Commands::Cite { key, format } => {
            let format: OutputFormat = format.parse()?;
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;

            match repo.find_reference_by_citation_key(&key)? {
                Some(reference) => print_references(&[reference], format)?,
                None => {
                    ui::warn(&format!("No reference with citation key {}", key));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::File { uuid, decode } => {
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;

            match repo.find_primary_file_url(&uuid)? {
                Some(url) if decode => println!("{}", file_url::to_local_path(&url)?.display()),
                Some(url) => println!("{}", url),
                None => {
                    ui::warn(&format!("{} No file attached to {}", Icons::EMPTY, uuid));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Copy { folder, destination } => {
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;
            let total = repo.list_references_in_folder(&folder)?.len();

            ui::header(&format!("Copying {} into {}", folder, destination.display()));
            let started = Instant::now();
            let progress = CopyProgress::new(total);

            let report = export::copy_folder_files(&repo, &folder, &destination, |reference, event| {
                match event {
                    CopyEvent::Copied { from, overwrote, .. } => {
                        progress.set_message(&reference.title);
                        let icon = if *overwrote { Icons::WARN } else { Icons::FILE };
                        let from = from.display().to_string();
                        progress.println(&format!("{} {}", icon, from.style(ui::theme().path.clone())));
                    }
                    CopyEvent::NoFile => {
                        progress.println(&ui::muted(&format!("{} {}", Icons::EMPTY, reference)));
                    }
                }
                progress.inc();
            })?;

            progress.finish_with_summary(
                started.elapsed(),
                report.copied.len(),
                report.overwritten.len(),
                report.skipped.len(),
            );
            for target in &report.overwritten {
                ui::warn(&format!("{} written more than once, last copy kept", target.display()));
            }
        }

        Commands::Info => {
            let repo = open_repository(cli.database.as_deref(), config.as_ref())?;
            let db = repo.database();

            ui::header("Mendeley Database");
            ui::status(Icons::DATABASE, "Path", &db.path().display().to_string());
            if !locator::is_account_database(db.path()) {
                ui::warn("File name does not look like <email>@www.mendeley.com.sqlite");
            }

            let missing = db.missing_tables()?;
            if !missing.is_empty() {
                ui::error(&format!("Missing tables: {}", missing.join(", ")));
                return Ok(ExitCode::FAILURE);
            }

            let references = repo.list_references()?;
            let with_year = references.iter().filter(|r| r.year.is_some()).count();

            ui::section("Library");
            let count = references.len().to_string();
            let with_year = with_year.to_string();
            println!(
                "{}",
                ui::table::stats_table(&[("References", count.as_str()), ("With year", with_year.as_str())])
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_database(explicit: Option<&Path>, config: Option<&MendeleyConfig>) -> anyhow::Result<mendeley::Database> {
    let locator = config::default_locator()?;
    config::resolve_database(explicit, config, &locator)
}

fn open_repository(explicit: Option<&Path>, config: Option<&MendeleyConfig>) -> anyhow::Result<ReferenceRepository> {
    Ok(ReferenceRepository::new(open_database(explicit, config)?))
}

fn print_references(references: &[Reference], format: OutputFormat) -> anyhow::Result<()> {
    if references.is_empty() && format != OutputFormat::Json {
        ui::warn("No references found.");
        return Ok(());
    }

    if format == OutputFormat::Text {
        for reference in references {
            println!("{}", ui::theme().reference_line(reference));
        }
    } else {
        println!("{}", output::render(references, format)?);
    }
    Ok(())
}
