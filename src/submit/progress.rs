//! Progress callback trait for interface-agnostic updates
//!
//! Lets the CLI (or any other frontend) observe a submission run without
//! the engine depending on how outcomes are rendered.

use crate::types::SubmissionOutcome;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving month headers from the portal
    Resolving,
    /// Checking month availability for every batch group
    Validating,
    /// Submitting entries
    Submitting,
    /// Run complete
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Resolving => "Resolving months",
            Self::Validating => "Validating months",
            Self::Submitting => "Submitting entries",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this to receive updates during a submission run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called with each date's outcome as it is decided
    async fn on_outcome(&self, date: NaiveDate, outcome: &SubmissionOutcome);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_outcome(&self, _date: NaiveDate, _outcome: &SubmissionOutcome) {}
    async fn on_message(&self, _message: &str) {}
}
