//! Months command - list the portal's month headers and their gates

use crate::cli::open_gateway;
use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use indicatif::ProgressBar;
use nullog::error::Result;
use nullog::submit::{Availability, MonthMap, month_availability};
use nullog::types::DuplicateMonthPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Run the months command
pub async fn run_months(session_file: Option<PathBuf>) -> Result<()> {
    let gateway = open_gateway(session_file)?;

    let spinner = ProgressBar::new_spinner().with_style(spinner_style());
    spinner.set_message("Fetching months...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let months = MonthMap::fetch(&gateway, "", DuplicateMonthPolicy::default()).await;
    spinner.finish_and_clear();
    let months = months?;

    for header in months.iter() {
        let gate = month_availability(header.month, header.year, &months);
        let status = match gate {
            Availability::Open => "open".success().to_string(),
            Availability::Closed { reason } => reason.warn().for_stdout().to_string(),
        };
        let current = if header.is_current { " *" } else { "" };

        println!(
            "{:>12}{}  filled {:>2}  unfilled {:>2}  submitted {:>2}  {}",
            header.label().emphasis(),
            current.accent(),
            header.filled_count,
            header.unfilled_count,
            header.submitted_count,
            status
        );
    }

    Ok(())
}
