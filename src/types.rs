//! Core types for nullog

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel value for non-working days.
///
/// The portal accepts the literal string `OFF` in place of an activity,
/// clock time, or description.
pub const OFF: &str = "OFF";

/// Identifier assigned to a logbook entry by the portal.
///
/// The portal models "no entry yet" as an all-zero GUID rather than an
/// absent field, so the sentinel is part of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// The all-zero sentinel meaning "entry does not exist yet"
    pub const NIL: Self = Self(Uuid::nil());

    /// Whether this id is the "does not exist yet" sentinel
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One calendar month as known by the portal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthHeader {
    /// Calendar month number (1-12)
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Opaque header identifier, stable for the month's lifetime
    pub header_id: String,
    /// Human-readable month label (e.g. "February")
    pub display_name: String,
    /// Whether the portal considers this the current month
    pub is_current: bool,
    /// Informational count reported alongside the header
    pub count_hint: u32,
    /// Days of the month that have an entry
    pub filled_count: u32,
    /// Days of the month that are still empty
    pub unfilled_count: u32,
    /// Filled entries formally submitted to the portal
    pub submitted_count: u32,
}

impl MonthHeader {
    /// Human label for error messages ("February 2025")
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.display_name, self.year)
    }
}

/// One date's logbook record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// Entry identifier ([`EntryId::NIL`] when the portal has only a placeholder row)
    pub id: EntryId,
    /// Calendar date of the entry
    pub date: NaiveDate,
    /// Activity text, or `OFF`
    pub activity: String,
    /// Clock-in time in 24-hour `HH:MM`, or `OFF`
    pub clock_in: String,
    /// Clock-out time in 24-hour `HH:MM`, or `OFF`
    pub clock_out: String,
    /// Free-text description, or `OFF`
    pub description: String,
}

impl LogEntry {
    /// Whether the portal considers this entry filled.
    ///
    /// A row with a sentinel id or an empty clock-in is a placeholder and
    /// must be treated as absent during reconciliation.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        !self.id.is_nil() && !self.clock_in.is_empty()
    }
}

/// Entry list for one month together with its fill counters
#[derive(Debug, Clone, Default)]
pub struct MonthEntries {
    /// All entry rows the portal returned for the month
    pub entries: Vec<LogEntry>,
    /// Days with an entry
    pub filled_count: u32,
    /// Days still empty
    pub unfilled_count: u32,
    /// Filled entries formally submitted
    pub submitted_count: u32,
}

/// One date's unit of work for the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Target calendar date
    pub date: NaiveDate,
    /// Activity text
    pub activity: String,
    /// Clock-in time in 24-hour `HH:MM`, or `OFF`
    pub clock_in: String,
    /// Clock-out time in 24-hour `HH:MM`, or `OFF`
    pub clock_out: String,
    /// Free-text description
    pub description: String,
    /// Overwrite an existing filled entry instead of skipping it
    pub force: bool,
}

/// Per-date result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A new entry was created
    Created,
    /// An existing filled entry was overwritten (its id was reused)
    Updated,
    /// The date falls on the portal's non-working day (Sunday)
    SkippedWeekend,
    /// A filled entry already exists and overwrite was not requested
    SkippedExisting,
    /// The month is gated by the predecessor-completeness rule
    SkippedUnavailableMonth {
        /// Why the month is closed for submission
        reason: String,
    },
    /// The submission failed for this date
    Failed {
        /// What went wrong
        reason: String,
    },
}

/// Aggregate result of a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-date outcomes in submission order
    pub outcomes: Vec<(NaiveDate, SubmissionOutcome)>,
}

impl BatchReport {
    /// Record one date's outcome
    pub fn record(&mut self, date: NaiveDate, outcome: SubmissionOutcome) {
        self.outcomes.push((date, outcome));
    }

    /// Number of entries created
    #[must_use]
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, SubmissionOutcome::Created))
    }

    /// Number of entries overwritten
    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, SubmissionOutcome::Updated))
    }

    /// Number of dates skipped for any reason
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                SubmissionOutcome::SkippedWeekend
                    | SubmissionOutcome::SkippedExisting
                    | SubmissionOutcome::SkippedUnavailableMonth { .. }
            )
        })
    }

    /// Number of dates that failed
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, SubmissionOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&SubmissionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// How to resolve duplicate month numbers in the portal's month listing.
///
/// The portal should return at most one header per (month, year) in the
/// visible window, but when it does not, the winning header must be an
/// explicit choice rather than incidental ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMonthPolicy {
    /// Keep the first header seen for a month number
    FirstWins,
    /// Keep the last header seen for a month number (matches the portal UI)
    #[default]
    LastWins,
}
