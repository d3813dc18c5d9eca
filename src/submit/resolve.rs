//! Month resolution
//!
//! Maps calendar months to the portal's month headers. The map is built
//! once per logical operation and passed around as a value; nothing here
//! caches across runs.

use crate::error::{Error, Result};
use crate::gateway::LogbookGateway;
use crate::types::{DuplicateMonthPolicy, MonthHeader};
use std::collections::BTreeMap;

/// Month headers for one run, keyed by month number.
///
/// The portal's visible window covers a single enrichment period, so month
/// numbers are expected to be unique; when they are not, the winner is
/// chosen by [`DuplicateMonthPolicy`].
#[derive(Debug, Clone)]
pub struct MonthMap {
    months: BTreeMap<u32, MonthHeader>,
}

impl MonthMap {
    /// Fetch the month listing and build the map.
    ///
    /// Fails with [`Error::NoMonthData`] when the portal returns nothing
    /// usable.
    pub async fn fetch(
        gateway: &dyn LogbookGateway,
        logbook_id: &str,
        policy: DuplicateMonthPolicy,
    ) -> Result<Self> {
        let headers = gateway.list_months(logbook_id).await?;
        Self::from_headers(headers, policy)
    }

    /// Build the map from already-fetched headers
    pub fn from_headers(
        headers: Vec<MonthHeader>,
        policy: DuplicateMonthPolicy,
    ) -> Result<Self> {
        let mut months: BTreeMap<u32, MonthHeader> = BTreeMap::new();
        for header in headers {
            if let Some(kept) = months.get(&header.month) {
                tracing::warn!(
                    month = header.month,
                    kept_year = kept.year,
                    duplicate_year = header.year,
                    ?policy,
                    "portal returned duplicate headers for one month number"
                );
                if policy == DuplicateMonthPolicy::FirstWins {
                    continue;
                }
            }
            months.insert(header.month, header);
        }

        if months.is_empty() {
            return Err(Error::NoMonthData);
        }
        Ok(Self { months })
    }

    /// Header for a month number, if present
    #[must_use]
    pub fn get(&self, month: u32) -> Option<&MonthHeader> {
        self.months.get(&month)
    }

    /// Resolve a calendar month to its header.
    ///
    /// Lookup is by month number; `year` only qualifies the error, matching
    /// the portal's one-period window.
    pub fn resolve(&self, month: u32, year: i32) -> Result<&MonthHeader> {
        self.months
            .get(&month)
            .ok_or(Error::NoLogbookForMonth { month, year })
    }

    /// All resolved headers in month order
    pub fn iter(&self) -> impl Iterator<Item = &MonthHeader> {
        self.months.values()
    }

    /// Number of resolved months
    #[must_use]
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Whether the map is empty (never true for a constructed map)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
