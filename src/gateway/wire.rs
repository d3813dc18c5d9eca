//! Wire representation of the portal's logbook API
//!
//! The portal serializes calendar dates with a literal midnight suffix and
//! expects clock times in 12-hour `hh:mm am/pm` form, while the rest of the
//! system reasons in `NaiveDate` and 24-hour `HH:MM`. All conversions live
//! here.

use crate::error::{Error, Result};
use crate::types::{EntryId, LogEntry, MonthEntries, MonthHeader, OFF};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

/// Serialize a date the way the portal expects: `YYYY-MM-DDT00:00:00`
#[must_use]
pub fn to_wire_date(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

/// Parse a portal date, tolerating a missing time-of-day component
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("bad wire date {raw:?}: {e}")))
}

/// Convert a 24-hour `HH:MM` clock to the portal's 12-hour `hh:mm am/pm`.
///
/// `OFF` passes through unconverted. Anything unparseable is sent as-is;
/// clock fields are validated upstream.
#[must_use]
pub fn to_wire_clock(clock: &str) -> String {
    if clock == OFF {
        return clock.to_string();
    }
    let Some((hh, mm)) = clock.split_once(':') else {
        return clock.to_string();
    };
    let (Ok(hour), Ok(minute)) = (hh.parse::<u32>(), mm.parse::<u32>()) else {
        return clock.to_string();
    };

    let period = if hour < 12 { "am" } else { "pm" };
    let hour12 = match hour {
        0 => 12,
        1..=12 => hour,
        _ => hour - 12,
    };
    format!("{hour12:02}:{minute:02} {period}")
}

/// Response to the months listing call
#[derive(Debug, Deserialize)]
pub struct MonthsResponse {
    /// Month rows in portal order
    #[serde(default)]
    pub data: Vec<MonthRow>,
}

/// One month row as the portal sends it
#[derive(Debug, Clone, Deserialize)]
pub struct MonthRow {
    /// Header identifier
    #[serde(rename = "logBookHeaderID")]
    pub log_book_header_id: Option<String>,
    /// Month number (1-12)
    #[serde(rename = "monthInt")]
    pub month_int: Option<u32>,
    /// Calendar year
    pub year: Option<i32>,
    /// Month display name
    #[serde(rename = "month")]
    pub month_name: Option<String>,
    /// Whether the portal flags this as the current month
    #[serde(rename = "isCurrentMonth", default)]
    pub is_current_month: bool,
    /// Informational count
    #[serde(rename = "countData", default)]
    pub count_data: u32,
    /// Days with an entry
    #[serde(default)]
    pub filled: u32,
    /// Days still empty
    #[serde(rename = "notFilled", default)]
    pub not_filled: u32,
    /// Filled entries formally submitted
    #[serde(default)]
    pub submitted: u32,
}

impl MonthRow {
    /// Convert to a [`MonthHeader`], or `None` when the identifying fields
    /// (header id, month number, year) are missing or empty.
    #[must_use]
    pub fn into_header(self) -> Option<MonthHeader> {
        let header_id = self.log_book_header_id.filter(|id| !id.is_empty())?;
        let month = self.month_int.filter(|m| (1..=12).contains(m))?;
        let year = self.year?;

        Some(MonthHeader {
            month,
            year,
            header_id,
            display_name: self.month_name.unwrap_or_default(),
            is_current: self.is_current_month,
            count_hint: self.count_data,
            filled_count: self.filled,
            unfilled_count: self.not_filled,
            submitted_count: self.submitted,
        })
    }
}

/// Response to the entries listing call
#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    /// Entry rows, one per calendar day the portal tracks
    #[serde(default)]
    pub data: Vec<EntryRow>,
    /// Days with an entry
    #[serde(default)]
    pub filled: u32,
    /// Days still empty
    #[serde(rename = "notFilled", default)]
    pub not_filled: u32,
    /// Filled entries formally submitted
    #[serde(default)]
    pub submitted: u32,
}

impl EntriesResponse {
    /// Convert to [`MonthEntries`], failing on rows with unparseable dates
    pub fn into_month_entries(self) -> Result<MonthEntries> {
        let mut entries = Vec::with_capacity(self.data.len());
        for row in self.data {
            entries.push(row.into_entry()?);
        }
        Ok(MonthEntries {
            entries,
            filled_count: self.filled,
            unfilled_count: self.not_filled,
            submitted_count: self.submitted,
        })
    }
}

/// One entry row as the portal sends it
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRow {
    /// Entry id; the nil GUID marks a placeholder row
    #[serde(default)]
    pub id: String,
    /// Date with midnight suffix
    pub date: String,
    /// Activity text
    #[serde(default)]
    pub activity: String,
    /// Clock-in; empty on placeholder rows
    #[serde(rename = "clockIn", default)]
    pub clock_in: String,
    /// Clock-out
    #[serde(rename = "clockOut", default)]
    pub clock_out: String,
    /// Description
    #[serde(default)]
    pub description: String,
}

impl EntryRow {
    /// Convert to a [`LogEntry`]. An unparseable id becomes the nil
    /// sentinel, which reconciliation treats as "absent".
    pub fn into_entry(self) -> Result<LogEntry> {
        let id = Uuid::parse_str(&self.id).map_or(EntryId::NIL, EntryId);
        Ok(LogEntry {
            id,
            date: parse_wire_date(&self.date)?,
            activity: self.activity,
            clock_in: self.clock_in,
            clock_out: self.clock_out,
            description: self.description,
        })
    }
}

/// Response to the save call
#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    /// Error message when the portal rejected the save
    #[serde(default)]
    pub error: Option<String>,
    /// Saved entry as echoed back, when the portal returns it
    #[serde(default)]
    pub data: Option<EntryRow>,
}
