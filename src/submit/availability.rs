//! Month availability
//!
//! The portal requires months to be completed in order: a month is closed
//! for submission while its immediate predecessor still has unfilled days.
//! Only `unfilled_count` gates; whether filled entries have been formally
//! submitted does not matter here.

use crate::submit::MonthMap;

/// The predecessor of a calendar month, with year wraparound
#[must_use]
pub const fn previous_month(month: u32, year: i32) -> (u32, i32) {
    if month == 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

/// Whether a month is open for submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The month accepts submissions
    Open,
    /// The month is closed
    Closed {
        /// Why the month cannot accept submissions
        reason: String,
    },
}

impl Availability {
    /// Whether submissions are allowed
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Evaluate whether `month`/`year` is open for submission given the
/// resolved months of this run.
///
/// This is a hard gate: no number of existing entries in the target month
/// opens it while its predecessor has any unfilled day.
#[must_use]
pub fn month_availability(month: u32, year: i32, months: &MonthMap) -> Availability {
    let (prev_month, prev_year) = previous_month(month, year);

    if let Some(prev) = months.get(prev_month) {
        if prev.unfilled_count > 0 {
            return Availability::Closed {
                reason: format!(
                    "previous month {} {} has {} unfilled entries",
                    prev.display_name, prev_year, prev.unfilled_count
                ),
            };
        }
    }

    if months.get(month).is_none() {
        return Availability::Closed {
            reason: format!("month {month}/{year} is not present in the logbook system"),
        };
    }

    Availability::Open
}
