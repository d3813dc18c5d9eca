//! Entry reconciliation
//!
//! Classifies what the portal already holds for a target date. The portal
//! pre-creates placeholder rows for every calendar day, so presence in the
//! list means nothing by itself; only a filled entry counts as existing.

use crate::types::LogEntry;
use chrono::NaiveDate;

/// Find the filled entry for `date`, if any.
///
/// Rows whose id is the nil sentinel or whose clock-in is empty are
/// placeholders and are treated as absent.
#[must_use]
pub fn find_for_date(entries: &[LogEntry], date: NaiveDate) -> Option<&LogEntry> {
    entries
        .iter()
        .find(|entry| entry.date == date && entry.is_filled())
}
