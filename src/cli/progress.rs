//! Shared CLI progress callback with styled output

use crate::cli::style::{Stylize, check, cross, dash};
use anstream::{eprintln, println};
use async_trait::async_trait;
use chrono::NaiveDate;
use nullog::submit::{Phase, ProgressCallback};
use nullog::types::{BatchReport, SubmissionOutcome};

/// CLI progress callback that prints each date's outcome as it is decided
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Complete => {}
            _ => println!("{}...", phase.to_string().emphasis()),
        }
    }

    async fn on_outcome(&self, date: NaiveDate, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Created => {
                println!("  {} {} created", check(), date.to_string().accent());
            }
            SubmissionOutcome::Updated => {
                println!("  {} {} overwritten", check(), date.to_string().accent());
            }
            SubmissionOutcome::SkippedWeekend => {
                println!(
                    "  {} {} {}",
                    dash(),
                    date.to_string().accent(),
                    "skipped (Sunday)".muted()
                );
            }
            SubmissionOutcome::SkippedExisting => {
                println!(
                    "  {} {} {}",
                    dash(),
                    date.to_string().accent(),
                    "already filled, use --force to overwrite".muted()
                );
            }
            SubmissionOutcome::SkippedUnavailableMonth { reason } => {
                println!(
                    "  {} {} {}",
                    dash(),
                    date.to_string().accent(),
                    format!("month unavailable: {reason}").muted()
                );
            }
            SubmissionOutcome::Failed { reason } => {
                eprintln!(
                    "  {} {} {}",
                    cross(),
                    date.to_string().accent().for_stderr(),
                    reason.error()
                );
            }
        }
    }

    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}

/// Print the run-level summary for a finished batch
pub fn print_summary(report: &BatchReport) {
    println!();
    println!(
        "{} created, {} overwritten, {} skipped, {} failed",
        report.created().to_string().success(),
        report.updated().to_string().success(),
        report.skipped().to_string().warn().for_stdout(),
        report.failed().to_string().error().for_stdout(),
    );

    if report.failed() > 0 {
        eprintln!("{}", "some dates were not submitted:".error());
        for (date, outcome) in &report.outcomes {
            if let SubmissionOutcome::Failed { reason } = outcome {
                eprintln!("  {date}: {reason}");
            }
        }
    }
}
