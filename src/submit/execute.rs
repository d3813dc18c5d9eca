//! Submission orchestration
//!
//! Per-date decision flow: weekend handling, month resolution, availability,
//! reconciliation against existing entries, then the save call. Batch mode
//! groups requests by calendar month, validates every group before the first
//! write, and accumulates per-date outcomes.

use crate::error::{Error, Result};
use crate::gateway::{EntryPayload, LogbookGateway};
use crate::submit::progress::{Phase, ProgressCallback};
use crate::submit::{Availability, MonthMap, find_for_date, month_availability};
use crate::types::{
    BatchReport, DuplicateMonthPolicy, EntryId, MonthHeader, OFF, SubmissionOutcome,
    SubmissionRequest,
};
use chrono::{Datelike, Weekday};

/// Run-level options for the orchestrator
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Logbook filter passed to the months listing (usually empty)
    pub logbook_id: String,
    /// Submit Saturdays as OFF days instead of normal hours
    pub saturdays_off: bool,
    /// How to resolve duplicate month numbers in the months listing
    pub duplicate_policy: DuplicateMonthPolicy,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            logbook_id: String::new(),
            saturdays_off: true,
            duplicate_policy: DuplicateMonthPolicy::default(),
        }
    }
}

/// Top-level submission driver.
///
/// Holds no remote state: resolved months are fetched per run and passed
/// around explicitly.
pub struct Orchestrator<'a> {
    gateway: &'a dyn LogbookGateway,
    options: SubmitOptions,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator over `gateway`
    pub fn new(gateway: &'a dyn LogbookGateway, options: SubmitOptions) -> Self {
        Self { gateway, options }
    }

    /// Fetch this run's month map
    pub async fn resolve_months(&self) -> Result<MonthMap> {
        MonthMap::fetch(
            self.gateway,
            &self.options.logbook_id,
            self.options.duplicate_policy,
        )
        .await
    }

    /// Submit a single date against an already-resolved month map.
    ///
    /// Never returns an error: every failure mode is folded into the
    /// outcome so callers can keep processing sibling dates.
    pub async fn submit_one(
        &self,
        months: &MonthMap,
        request: &SubmissionRequest,
    ) -> SubmissionOutcome {
        if request.date.weekday() == Weekday::Sun {
            return SubmissionOutcome::SkippedWeekend;
        }

        let (month, year) = (request.date.month(), request.date.year());
        let header = match months.resolve(month, year) {
            Ok(header) => header,
            Err(e) => {
                return SubmissionOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if let Availability::Closed { reason } = month_availability(month, year, months) {
            return SubmissionOutcome::SkippedUnavailableMonth { reason };
        }

        self.submit_to_header(header, request).await
    }

    /// Submit a batch of requests.
    ///
    /// Groups by (year, month) in first-seen order. If any requested month
    /// is absent from the portal the whole batch aborts before a single
    /// write; months that are merely gated by the predecessor rule are
    /// skipped per date while other groups proceed.
    pub async fn submit_batch(
        &self,
        requests: &[SubmissionRequest],
        progress: &dyn ProgressCallback,
    ) -> Result<BatchReport> {
        progress.on_phase(Phase::Resolving).await;
        let months = self.resolve_months().await?;

        progress.on_phase(Phase::Validating).await;
        let groups = group_by_month(requests);

        let missing: Vec<String> = groups
            .iter()
            .filter(|group| months.get(group.month).is_none())
            .map(|group| format!("{}/{}", group.month, group.year))
            .collect();
        if !missing.is_empty() {
            return Err(Error::BatchAborted(missing));
        }

        // Availability is evaluated once per group, before any submission,
        // against the same snapshot every group sees.
        let gates: Vec<Availability> = groups
            .iter()
            .map(|group| month_availability(group.month, group.year, &months))
            .collect();

        progress.on_phase(Phase::Submitting).await;
        let mut report = BatchReport::default();

        for (group, gate) in groups.iter().zip(gates) {
            let header = months.resolve(group.month, group.year)?;

            if let Availability::Closed { reason } = gate {
                progress
                    .on_message(&format!(
                        "skipping {} entries for {}: {reason}",
                        group.requests.len(),
                        header.label()
                    ))
                    .await;
                for &request in &group.requests {
                    let outcome = SubmissionOutcome::SkippedUnavailableMonth {
                        reason: reason.clone(),
                    };
                    progress.on_outcome(request.date, &outcome).await;
                    report.record(request.date, outcome);
                }
                continue;
            }

            for &request in &group.requests {
                let outcome = if request.date.weekday() == Weekday::Sun {
                    SubmissionOutcome::SkippedWeekend
                } else {
                    self.submit_to_header(header, request).await
                };
                progress.on_outcome(request.date, &outcome).await;
                report.record(request.date, outcome);
            }
        }

        progress.on_phase(Phase::Complete).await;
        Ok(report)
    }

    /// Per-date flow once the month header is known and its gate has passed
    async fn submit_to_header(
        &self,
        header: &MonthHeader,
        request: &SubmissionRequest,
    ) -> SubmissionOutcome {
        let auto_off =
            request.date.weekday() == Weekday::Sat && self.options.saturdays_off;

        match self.save_to_header(header, request, auto_off).await {
            Ok(outcome) => outcome,
            Err(Error::AlreadyFilled(_)) => SubmissionOutcome::SkippedExisting,
            Err(e) => SubmissionOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn save_to_header(
        &self,
        header: &MonthHeader,
        request: &SubmissionRequest,
        auto_off: bool,
    ) -> Result<SubmissionOutcome> {
        let month = self.gateway.list_entries(&header.header_id).await?;
        let existing = find_for_date(&month.entries, request.date);

        // An OFF day replaces whatever is there; otherwise overwriting
        // needs the caller's force flag.
        let force = request.force || (auto_off && existing.is_some());
        if existing.is_some() && !force {
            return Err(Error::AlreadyFilled(request.date));
        }

        let id = existing.map_or(EntryId::NIL, |entry| entry.id);
        let payload = if auto_off {
            tracing::debug!(date = %request.date, "Saturday, submitting as OFF day");
            EntryPayload {
                id,
                date: request.date,
                activity: OFF.to_string(),
                clock_in: OFF.to_string(),
                clock_out: OFF.to_string(),
                description: OFF.to_string(),
            }
        } else {
            EntryPayload {
                id,
                date: request.date,
                activity: request.activity.clone(),
                clock_in: request.clock_in.clone(),
                clock_out: request.clock_out.clone(),
                description: request.description.clone(),
            }
        };

        let overwrote = existing.is_some();
        self.gateway
            .save_entry(&header.header_id, &payload, force)
            .await?;

        Ok(if overwrote {
            SubmissionOutcome::Updated
        } else {
            SubmissionOutcome::Created
        })
    }
}

/// One batch group: all requests targeting the same calendar month
struct MonthGroup<'a> {
    month: u32,
    year: i32,
    requests: Vec<&'a SubmissionRequest>,
}

/// Group requests by (year, month), preserving first-seen group order and
/// caller order within each group.
fn group_by_month(requests: &[SubmissionRequest]) -> Vec<MonthGroup<'_>> {
    let mut groups: Vec<MonthGroup<'_>> = Vec::new();
    for request in requests {
        let (month, year) = (request.date.month(), request.date.year());
        match groups
            .iter_mut()
            .find(|g| g.month == month && g.year == year)
        {
            Some(group) => group.requests.push(request),
            None => groups.push(MonthGroup {
                month,
                year,
                requests: vec![request],
            }),
        }
    }
    groups
}
