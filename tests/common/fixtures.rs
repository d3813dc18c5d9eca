//! Test data factories for nullog types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use chrono::NaiveDate;
use nullog::types::{EntryId, LogEntry, MonthEntries, MonthHeader, SubmissionRequest};
use uuid::Uuid;

/// Month names indexed by month number
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month header with the given unfilled count and zeroed other counters
pub fn month(month: u32, year: i32, unfilled: u32) -> MonthHeader {
    MonthHeader {
        month,
        year,
        header_id: format!("hdr-{month}-{year}"),
        display_name: MONTH_NAMES[(month - 1) as usize].to_string(),
        is_current: false,
        count_hint: 0,
        filled_count: 0,
        unfilled_count: unfilled,
        submitted_count: 0,
    }
}

/// A real (non-sentinel) entry id derived from a seed
pub fn real_id(seed: u128) -> EntryId {
    EntryId(Uuid::from_u128(seed))
}

/// A filled entry for a date
pub fn filled_entry(date: NaiveDate, seed: u128) -> LogEntry {
    LogEntry {
        id: real_id(seed),
        date,
        activity: "Coding".to_string(),
        clock_in: "09:00".to_string(),
        clock_out: "17:00".to_string(),
        description: "Existing work".to_string(),
    }
}

/// An entry with a real id but an empty clock-in: unfilled on read
pub fn clockless_entry(date: NaiveDate, seed: u128) -> LogEntry {
    LogEntry {
        clock_in: String::new(),
        ..filled_entry(date, seed)
    }
}

/// Wrap entries in a [`MonthEntries`] with derived counters
pub fn month_entries(entries: Vec<LogEntry>) -> MonthEntries {
    let filled = u32::try_from(entries.iter().filter(|e| e.is_filled()).count()).unwrap();
    MonthEntries {
        filled_count: filled,
        unfilled_count: 30 - filled,
        submitted_count: 0,
        entries,
    }
}

/// A normal-hours submission request
pub fn request(year: i32, month: u32, day: u32) -> SubmissionRequest {
    SubmissionRequest {
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        activity: "Coding".to_string(),
        clock_in: "09:00".to_string(),
        clock_out: "17:00".to_string(),
        description: "Backend work".to_string(),
        force: false,
    }
}

/// Same as [`request`] with the force flag set
pub fn forced_request(year: i32, month: u32, day: u32) -> SubmissionRequest {
    SubmissionRequest {
        force: true,
        ..request(year, month, day)
    }
}
