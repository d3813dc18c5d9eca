//! Batch input
//!
//! Reads submission requests from a CSV file with the columns
//! `date,activity,clock_in,clock_out,description`. Shape and field presence
//! are handled by deserialization; the only checks here are the semantic
//! ones whose violation poisons a whole batch (duplicate dates, clock-out
//! not after clock-in).

use crate::error::{Error, Result};
use crate::types::{OFF, SubmissionRequest};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: NaiveDate,
    activity: String,
    clock_in: String,
    clock_out: String,
    description: String,
}

/// Read a batch of submission requests from `path`.
///
/// `force` applies batch-wide; the CSV carries no per-row overwrite flag.
pub fn read_csv(path: &Path, force: bool) -> Result<Vec<SubmissionRequest>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Input(format!("cannot read {}: {e}", path.display())))?;

    let mut requests = Vec::new();
    let mut seen = HashSet::new();

    for (idx, record) in reader.deserialize::<CsvRecord>().enumerate() {
        let row = idx + 2; // row 1 is the header
        let record = record.map_err(|e| Error::Input(format!("row {row}: {e}")))?;

        if !seen.insert(record.date) {
            return Err(Error::Input(format!(
                "row {row}: duplicate date {}",
                record.date
            )));
        }
        if let Some(problem) = clocks_problem(&record.clock_in, &record.clock_out) {
            return Err(Error::Input(format!("row {row}: {problem}")));
        }

        requests.push(SubmissionRequest {
            date: record.date,
            activity: record.activity,
            clock_in: record.clock_in,
            clock_out: record.clock_out,
            description: record.description,
            force,
        });
    }

    if requests.is_empty() {
        return Err(Error::Input("CSV contains no entries".to_string()));
    }
    Ok(requests)
}

/// Check a pair of clock fields: each must be 24-hour `HH:MM` or `OFF`,
/// and when both are times, clock-out must be later than clock-in.
pub fn validate_clocks(clock_in: &str, clock_out: &str) -> Result<()> {
    clocks_problem(clock_in, clock_out).map_or(Ok(()), |problem| Err(Error::Input(problem)))
}

fn clocks_problem(clock_in: &str, clock_out: &str) -> Option<String> {
    let parse = |label: &str, value: &str| {
        if value == OFF {
            return Ok(None);
        }
        NaiveTime::parse_from_str(value, "%H:%M")
            .map(Some)
            .map_err(|_| format!("{label} {value:?} must be HH:MM (24-hour) or OFF"))
    };

    let parsed_in = match parse("clock_in", clock_in) {
        Ok(t) => t,
        Err(problem) => return Some(problem),
    };
    let parsed_out = match parse("clock_out", clock_out) {
        Ok(t) => t,
        Err(problem) => return Some(problem),
    };

    if let (Some(start), Some(end)) = (parsed_in, parsed_out) {
        if end <= start {
            return Some(format!(
                "clock_out {clock_out} must be later than clock_in {clock_in}"
            ));
        }
    }
    None
}
