//! nullog - automated logbook submission
//!
//! CLI binary for filling the enrichment portal's logbook.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "nullog")]
#[command(about = "Automated logbook submission for the enrichment portal")]
#[command(version)]
struct Cli {
    /// Path to the session file (defaults to the platform data directory)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a range of days with the same activity and hours
    Fill {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,

        /// Activity text
        #[arg(long)]
        activity: String,

        /// Clock-in time (24-hour HH:MM, or OFF)
        #[arg(long)]
        clock_in: String,

        /// Clock-out time (24-hour HH:MM, or OFF)
        #[arg(long)]
        clock_out: String,

        /// Description text
        #[arg(long)]
        description: String,

        /// Overwrite existing filled entries
        #[arg(long)]
        force: bool,

        /// Submit Saturdays with normal hours instead of OFF
        #[arg(long)]
        work_saturdays: bool,

        /// Show what would be submitted without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Submit entries from a CSV file
    Import {
        /// CSV file with date,activity,clock_in,clock_out,description columns
        file: PathBuf,

        /// Overwrite existing filled entries
        #[arg(long)]
        force: bool,

        /// Submit Saturdays with normal hours instead of OFF
        #[arg(long)]
        work_saturdays: bool,

        /// Show what would be submitted without saving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List the months visible in the portal logbook
    Months,

    /// Manage the portal session
    Session {
        #[command(subcommand)]
        action: Option<SessionAction>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Show session file status
    Status,

    /// Import cookies exported from the browser
    Import {
        /// JSON file with the exported cookies
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session_file = cli.session_file;

    match cli.command {
        Commands::Fill {
            from,
            to,
            activity,
            clock_in,
            clock_out,
            description,
            force,
            work_saturdays,
            dry_run,
        } => {
            cli::run_fill(
                session_file,
                cli::FillArgs {
                    from,
                    to,
                    activity,
                    clock_in,
                    clock_out,
                    description,
                    force,
                    work_saturdays,
                    dry_run,
                },
            )
            .await?;
        }
        Commands::Import {
            file,
            force,
            work_saturdays,
            dry_run,
        } => {
            cli::run_import(session_file, file, force, work_saturdays, dry_run).await?;
        }
        Commands::Months => {
            cli::run_months(session_file).await?;
        }
        Commands::Session { action } => match action {
            None | Some(SessionAction::Status) => {
                cli::run_session_status(session_file).await?;
            }
            Some(SessionAction::Import { file }) => {
                cli::run_session_import(session_file, file)?;
            }
        },
    }

    Ok(())
}
