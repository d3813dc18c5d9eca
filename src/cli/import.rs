//! Import command - submit entries from a CSV file

use crate::cli::fill::confirm_overwrite;
use crate::cli::open_gateway;
use crate::cli::progress::{CliProgress, print_summary};
use crate::cli::style::Stylize;
use anstream::println;
use nullog::error::Result;
use nullog::input::read_csv;
use nullog::submit::{Orchestrator, SubmitOptions};
use std::path::PathBuf;

/// Run the import command
pub async fn run_import(
    session_file: Option<PathBuf>,
    file: PathBuf,
    force: bool,
    work_saturdays: bool,
    dry_run: bool,
) -> Result<()> {
    let requests = read_csv(&file, force)?;

    println!(
        "Loaded {} entr{} from {}",
        requests.len().to_string().accent(),
        if requests.len() == 1 { "y" } else { "ies" },
        file.display().to_string().accent()
    );
    for request in &requests {
        println!(
            "  {} {} {}-{}",
            request.date, request.activity, request.clock_in, request.clock_out
        );
    }

    if dry_run {
        println!("{}", "Dry run - nothing submitted".muted());
        return Ok(());
    }

    if force && !confirm_overwrite()? {
        println!("Aborted.");
        return Ok(());
    }

    let gateway = open_gateway(session_file)?;
    let orchestrator = Orchestrator::new(
        &gateway,
        SubmitOptions {
            saturdays_off: !work_saturdays,
            ..SubmitOptions::default()
        },
    );

    let report = orchestrator.submit_batch(&requests, &CliProgress).await?;
    print_summary(&report);
    Ok(())
}
