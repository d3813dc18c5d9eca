//! Mock gateway for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use nullog::error::{Error, Result};
use nullog::gateway::{EntryPayload, LogbookGateway};
use nullog::types::{EntryId, LogEntry, MonthEntries, MonthHeader};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Call record for `save_entry`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCall {
    pub header_id: String,
    pub payload: EntryPayload,
    pub force: bool,
}

/// In-memory gateway that behaves like the portal.
///
/// This manually implements `LogbookGateway` rather than using a mocking
/// framework so saves can mutate the stored month state, which the
/// idempotence tests depend on.
///
/// Features:
/// - Auto-assigned entry ids on create
/// - Call tracking for verification
/// - Configurable month and entry fixtures
/// - Error injection for failure path testing
pub struct MockGateway {
    months: Mutex<Vec<MonthHeader>>,
    entries: Mutex<HashMap<String, MonthEntries>>,
    next_id: AtomicU64,
    // Call tracking
    list_months_calls: AtomicU64,
    list_entries_calls: Mutex<Vec<String>>,
    save_calls: Mutex<Vec<SaveCall>>,
    // Error injection
    error_on_save_date: Mutex<Option<(NaiveDate, String)>>,
    error_on_list_entries: Mutex<Option<String>>,
}

impl MockGateway {
    /// Create a mock with the given month headers and no entries
    pub fn with_months(months: Vec<MonthHeader>) -> Self {
        Self {
            months: Mutex::new(months),
            entries: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            list_months_calls: AtomicU64::new(0),
            list_entries_calls: Mutex::new(Vec::new()),
            save_calls: Mutex::new(Vec::new()),
            error_on_save_date: Mutex::new(None),
            error_on_list_entries: Mutex::new(None),
        }
    }

    /// Seed the entry list for a month header
    pub fn set_entries(&self, header_id: &str, entries: MonthEntries) {
        self.entries
            .lock()
            .unwrap()
            .insert(header_id.to_string(), entries);
    }

    // === Error injection methods ===

    /// Make `save_entry` fail for one specific date
    pub fn fail_save_for(&self, date: NaiveDate, msg: &str) {
        *self.error_on_save_date.lock().unwrap() = Some((date, msg.to_string()));
    }

    /// Make `list_entries` return an error
    pub fn fail_list_entries(&self, msg: &str) {
        *self.error_on_list_entries.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Number of `list_months` calls
    pub fn list_months_calls(&self) -> u64 {
        self.list_months_calls.load(Ordering::SeqCst)
    }

    /// Header ids `list_entries` was called with
    pub fn list_entries_calls(&self) -> Vec<String> {
        self.list_entries_calls.lock().unwrap().clone()
    }

    /// All `save_entry` calls
    pub fn save_calls(&self) -> Vec<SaveCall> {
        self.save_calls.lock().unwrap().clone()
    }

    /// The stored entry for a date, if any
    pub fn entry_for(&self, header_id: &str, date: NaiveDate) -> Option<LogEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(header_id)
            .and_then(|m| m.entries.iter().find(|e| e.date == date).cloned())
    }

    /// Assert that no save ever reached the gateway
    pub fn assert_no_saves(&self) {
        let calls = self.save_calls();
        assert!(calls.is_empty(), "expected no save calls but got: {calls:?}");
    }
}

#[async_trait]
impl LogbookGateway for MockGateway {
    async fn list_months(&self, _logbook_id: &str) -> Result<Vec<MonthHeader>> {
        self.list_months_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.months.lock().unwrap().clone())
    }

    async fn list_entries(&self, header_id: &str) -> Result<MonthEntries> {
        self.list_entries_calls
            .lock()
            .unwrap()
            .push(header_id.to_string());

        if let Some(msg) = self.error_on_list_entries.lock().unwrap().as_ref() {
            return Err(Error::Gateway(msg.clone()));
        }
        if header_id.is_empty() {
            return Err(Error::InvalidHeader);
        }

        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(header_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_entry(
        &self,
        header_id: &str,
        payload: &EntryPayload,
        force: bool,
    ) -> Result<LogEntry> {
        self.save_calls.lock().unwrap().push(SaveCall {
            header_id: header_id.to_string(),
            payload: payload.clone(),
            force,
        });

        if let Some((date, msg)) = self.error_on_save_date.lock().unwrap().as_ref() {
            if *date == payload.date {
                return Err(Error::Gateway(msg.clone()));
            }
        }
        if header_id.is_empty() {
            return Err(Error::InvalidHeader);
        }
        if !payload.id.is_nil() && !force {
            return Err(Error::AlreadyFilled(payload.date));
        }

        let id = if payload.id.is_nil() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            EntryId(Uuid::from_u128(u128::from(n)))
        } else {
            payload.id
        };

        let entry = LogEntry {
            id,
            date: payload.date,
            activity: payload.activity.clone(),
            clock_in: payload.clock_in.clone(),
            clock_out: payload.clock_out.clone(),
            description: payload.description.clone(),
        };

        let mut all = self.entries.lock().unwrap();
        let month = all.entry(header_id.to_string()).or_default();
        match month.entries.iter_mut().find(|e| e.date == payload.date) {
            Some(existing) => {
                let was_filled = existing.is_filled();
                *existing = entry.clone();
                if !was_filled {
                    month.filled_count += 1;
                    month.unfilled_count = month.unfilled_count.saturating_sub(1);
                }
            }
            None => {
                month.entries.push(entry.clone());
                month.filled_count += 1;
                month.unfilled_count = month.unfilled_count.saturating_sub(1);
            }
        }

        Ok(entry)
    }
}
