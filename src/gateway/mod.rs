//! Portal gateway
//!
//! Provides a unified interface for the three logbook operations the portal
//! exposes: list month headers, list one month's entries, save one entry.

mod http;
pub mod wire;

pub use http::HttpGateway;

use crate::error::Result;
use crate::types::{EntryId, LogEntry, MonthEntries, MonthHeader};
use async_trait::async_trait;
use chrono::NaiveDate;

/// One entry as handed to [`LogbookGateway::save_entry`].
///
/// Clock times are 24-hour `HH:MM` (or `OFF`); the gateway owns the 12-hour
/// conversion the portal expects on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPayload {
    /// Existing entry id when overwriting, [`EntryId::NIL`] when creating
    pub id: EntryId,
    /// Target calendar date
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

/// Gateway trait for portal logbook operations.
///
/// This trait abstracts the HTTP portal, allowing the submission engine to
/// run against a mock in tests.
#[async_trait]
pub trait LogbookGateway: Send + Sync {
    /// List the month headers visible to the current user.
    ///
    /// Returns raw rows in portal order; keying and duplicate resolution
    /// belong to the month resolver.
    async fn list_months(&self, logbook_id: &str) -> Result<Vec<MonthHeader>>;

    /// List one month's entries together with its fill counters.
    ///
    /// Fails with [`crate::error::Error::InvalidHeader`] when `header_id`
    /// is empty.
    async fn list_entries(&self, header_id: &str) -> Result<MonthEntries>;

    /// Persist one entry.
    ///
    /// A non-nil payload id overwrites the existing entry and requires
    /// `force`; without `force` such a payload is rejected before any
    /// network call.
    async fn save_entry(
        &self,
        header_id: &str,
        payload: &EntryPayload,
        force: bool,
    ) -> Result<LogEntry>;
}
