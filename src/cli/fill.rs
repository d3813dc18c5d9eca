//! Fill command - submit a range of days with shared details

use crate::cli::open_gateway;
use crate::cli::progress::{CliProgress, print_summary};
use crate::cli::style::Stylize;
use anstream::println;
use chrono::NaiveDate;
use nullog::error::{Error, Result};
use nullog::input::validate_clocks;
use nullog::submit::{Orchestrator, SubmitOptions};
use nullog::types::SubmissionRequest;
use std::path::PathBuf;

/// Arguments to the fill command
pub struct FillArgs {
    /// First day of the range
    pub from: NaiveDate,
    /// Last day of the range, inclusive
    pub to: NaiveDate,
    /// Activity text shared by every day
    pub activity: String,
    /// Clock-in time (24-hour `HH:MM`, or `OFF`)
    pub clock_in: String,
    /// Clock-out time (24-hour `HH:MM`, or `OFF`)
    pub clock_out: String,
    /// Description shared by every day
    pub description: String,
    /// Overwrite existing filled entries
    pub force: bool,
    /// Submit Saturdays with normal hours instead of OFF
    pub work_saturdays: bool,
    /// Print the plan without submitting
    pub dry_run: bool,
}

/// Run the fill command
pub async fn run_fill(session_file: Option<PathBuf>, args: FillArgs) -> Result<()> {
    if args.to < args.from {
        return Err(Error::Input(format!(
            "end date {} is before start date {}",
            args.to, args.from
        )));
    }
    validate_clocks(&args.clock_in, &args.clock_out)?;

    let requests: Vec<SubmissionRequest> = args
        .from
        .iter_days()
        .take_while(|date| *date <= args.to)
        .map(|date| SubmissionRequest {
            date,
            activity: args.activity.clone(),
            clock_in: args.clock_in.clone(),
            clock_out: args.clock_out.clone(),
            description: args.description.clone(),
            force: args.force,
        })
        .collect();

    println!(
        "Filling {} day{} from {} to {}",
        requests.len().to_string().accent(),
        if requests.len() == 1 { "" } else { "s" },
        args.from.to_string().accent(),
        args.to.to_string().accent()
    );

    if args.dry_run {
        for request in &requests {
            println!(
                "  {} {} {}-{}",
                request.date,
                request.activity,
                request.clock_in,
                request.clock_out
            );
        }
        println!("{}", "Dry run - nothing submitted".muted());
        return Ok(());
    }

    if args.force && !confirm_overwrite()? {
        println!("Aborted.");
        return Ok(());
    }

    let gateway = open_gateway(session_file)?;
    let orchestrator = Orchestrator::new(
        &gateway,
        SubmitOptions {
            saturdays_off: !args.work_saturdays,
            ..SubmitOptions::default()
        },
    );

    let report = orchestrator.submit_batch(&requests, &CliProgress).await?;
    print_summary(&report);
    Ok(())
}

pub(crate) fn confirm_overwrite() -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Existing entries will be overwritten without recovery. Continue?")
        .default(false)
        .interact()
        .map_err(|e| Error::Input(format!("prompt failed: {e}")))
}
