//! Orchestrator behavior against the mock gateway
//!
//! Covers the per-date decision flow (weekends, Saturday OFF days,
//! reconciliation, force) and batch semantics (fail-fast on absent months,
//! per-group gating, partial-failure resilience).

mod common;

use chrono::NaiveDate;
use common::fixtures::{
    clockless_entry, filled_entry, forced_request, month, month_entries, request,
};
use common::mock_gateway::MockGateway;
use nullog::error::Error;
use nullog::submit::{MonthMap, NoopProgress, Orchestrator, SubmitOptions};
use nullog::types::{DuplicateMonthPolicy, OFF, SubmissionOutcome};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

async fn resolved(orchestrator: &Orchestrator<'_>) -> MonthMap {
    orchestrator.resolve_months().await.unwrap()
}

fn default_orchestrator(gateway: &MockGateway) -> Orchestrator<'_> {
    Orchestrator::new(gateway, SubmitOptions::default())
}

// =============================================================================
// Per-date flow
// =============================================================================

#[tokio::test]
async fn test_sunday_never_reaches_the_gateway() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 26)]);
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    // 2025-02-02 is a Sunday
    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 2)).await;

    assert_eq!(outcome, SubmissionOutcome::SkippedWeekend);
    gateway.assert_no_saves();
    assert!(gateway.list_entries_calls().is_empty());
}

#[tokio::test]
async fn test_saturday_submits_off_day() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    // 2025-02-01 is a Saturday with no prior entry
    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 1)).await;

    assert_eq!(outcome, SubmissionOutcome::Created);
    let calls = gateway.save_calls();
    assert_eq!(calls.len(), 1);
    let payload = &calls[0].payload;
    assert_eq!(payload.activity, OFF);
    assert_eq!(payload.clock_in, OFF);
    assert_eq!(payload.clock_out, OFF);
    assert_eq!(payload.description, OFF);
    assert!(payload.id.is_nil());
    assert!(!calls[0].force);
}

#[tokio::test]
async fn test_saturday_off_forces_over_existing_entry() {
    let header = month(2, 2025, 27);
    let saturday = date(2025, 2, 1);
    let gateway = MockGateway::with_months(vec![header.clone()]);
    gateway.set_entries(
        &header.header_id,
        month_entries(vec![filled_entry(saturday, 7)]),
    );
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 1)).await;

    assert_eq!(outcome, SubmissionOutcome::Updated);
    let calls = gateway.save_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].force, "an OFF day must overwrite whatever exists");
    assert_eq!(calls[0].payload.id, filled_entry(saturday, 7).id);
    assert_eq!(calls[0].payload.activity, OFF);
}

#[tokio::test]
async fn test_work_saturdays_submits_normal_hours() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    let orchestrator = Orchestrator::new(
        &gateway,
        SubmitOptions {
            saturdays_off: false,
            ..SubmitOptions::default()
        },
    );
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 1)).await;

    assert_eq!(outcome, SubmissionOutcome::Created);
    assert_eq!(gateway.save_calls()[0].payload.activity, "Coding");
}

#[tokio::test]
async fn test_existing_filled_entry_is_skipped_without_force() {
    let header = month(2, 2025, 27);
    let monday = date(2025, 2, 3);
    let gateway = MockGateway::with_months(vec![header.clone()]);
    gateway.set_entries(
        &header.header_id,
        month_entries(vec![filled_entry(monday, 9)]),
    );
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 3)).await;

    assert_eq!(outcome, SubmissionOutcome::SkippedExisting);
    gateway.assert_no_saves();
}

#[tokio::test]
async fn test_force_overwrites_existing_entry_reusing_its_id() {
    let header = month(2, 2025, 27);
    let monday = date(2025, 2, 3);
    let gateway = MockGateway::with_months(vec![header.clone()]);
    gateway.set_entries(
        &header.header_id,
        month_entries(vec![filled_entry(monday, 9)]),
    );
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator
        .submit_one(&months, &forced_request(2025, 2, 3))
        .await;

    assert_eq!(outcome, SubmissionOutcome::Updated);
    let calls = gateway.save_calls();
    assert_eq!(calls[0].payload.id, filled_entry(monday, 9).id);
    assert!(calls[0].force);
}

#[tokio::test]
async fn test_submitting_twice_creates_then_skips() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;
    let req = request(2025, 2, 3);

    let first = orchestrator.submit_one(&months, &req).await;
    let second = orchestrator.submit_one(&months, &req).await;

    assert_eq!(first, SubmissionOutcome::Created);
    assert_eq!(second, SubmissionOutcome::SkippedExisting);
    assert_eq!(gateway.save_calls().len(), 1, "never two creates");
}

#[tokio::test]
async fn test_clockless_entry_reads_back_as_absent() {
    // An entry written with an empty clock-in must be treated as unfilled
    // on the next read, even though its id is real.
    let header = month(2, 2025, 27);
    let monday = date(2025, 2, 3);
    let gateway = MockGateway::with_months(vec![header.clone()]);
    gateway.set_entries(
        &header.header_id,
        month_entries(vec![clockless_entry(monday, 11)]),
    );
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 3)).await;

    assert_eq!(outcome, SubmissionOutcome::Created);
    assert!(gateway.save_calls()[0].payload.id.is_nil());
}

#[tokio::test]
async fn test_month_gated_by_incomplete_predecessor() {
    // January complete, February has 3 unfilled days: March is closed even
    // though March itself is empty.
    let gateway = MockGateway::with_months(vec![
        month(1, 2025, 0),
        month(2, 2025, 3),
        month(3, 2025, 31),
    ]);
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 3, 3)).await;

    let SubmissionOutcome::SkippedUnavailableMonth { reason } = outcome else {
        panic!("March must be unavailable, got {outcome:?}");
    };
    assert!(reason.contains("February"));
    gateway.assert_no_saves();
}

#[tokio::test]
async fn test_missing_month_fails_that_date() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 0)]);
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 4, 7)).await;

    let SubmissionOutcome::Failed { reason } = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert!(reason.contains("no logbook header"));
}

#[tokio::test]
async fn test_gateway_failure_surfaces_per_date() {
    let header = month(2, 2025, 28);
    let gateway = MockGateway::with_months(vec![header]);
    gateway.fail_save_for(date(2025, 2, 3), "portal returned 500");
    let orchestrator = default_orchestrator(&gateway);
    let months = resolved(&orchestrator).await;

    let outcome = orchestrator.submit_one(&months, &request(2025, 2, 3)).await;

    let SubmissionOutcome::Failed { reason } = outcome else {
        panic!("expected a failure, got {outcome:?}");
    };
    assert!(reason.contains("portal returned 500"));
}

// =============================================================================
// Batch mode
// =============================================================================

#[tokio::test]
async fn test_batch_aborts_when_a_month_is_absent() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 0)]);
    let orchestrator = default_orchestrator(&gateway);

    let requests = vec![request(2025, 2, 3), request(2025, 5, 5)];
    let err = orchestrator
        .submit_batch(&requests, &NoopProgress)
        .await
        .unwrap_err();

    let Error::BatchAborted(missing) = err else {
        panic!("expected a batch abort, got {err}");
    };
    assert_eq!(missing, vec!["5/2025".to_string()]);
    gateway.assert_no_saves();
}

#[tokio::test]
async fn test_batch_skips_gated_month_and_continues() {
    // January itself is open (its predecessor is not in the window) but
    // still has unfilled days, so February is gated.
    let gateway =
        MockGateway::with_months(vec![month(1, 2025, 2), month(2, 2025, 28)]);
    let orchestrator = default_orchestrator(&gateway);

    let requests = vec![
        request(2025, 2, 3),
        request(2025, 1, 6),
        request(2025, 2, 4),
    ];
    let report = orchestrator
        .submit_batch(&requests, &NoopProgress)
        .await
        .unwrap();

    assert_eq!(report.created(), 1);
    assert_eq!(report.skipped(), 2);
    assert_eq!(report.failed(), 0);

    // Only the January date was written
    let calls = gateway.save_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload.date, date(2025, 1, 6));
}

#[tokio::test]
async fn test_batch_keeps_going_after_one_date_fails() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    gateway.fail_save_for(date(2025, 2, 3), "save rejected");
    let orchestrator = default_orchestrator(&gateway);

    let requests = vec![request(2025, 2, 3), request(2025, 2, 4)];
    let report = orchestrator
        .submit_batch(&requests, &NoopProgress)
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.created(), 1);
    assert_eq!(report.outcomes.len(), 2);
}

#[tokio::test]
async fn test_batch_handles_sundays_inline() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    let orchestrator = default_orchestrator(&gateway);

    let requests = vec![request(2025, 2, 2), request(2025, 2, 3)];
    let report = orchestrator
        .submit_batch(&requests, &NoopProgress)
        .await
        .unwrap();

    assert_eq!(
        report.outcomes[0].1,
        SubmissionOutcome::SkippedWeekend,
        "2025-02-02 is a Sunday"
    );
    assert_eq!(report.outcomes[1].1, SubmissionOutcome::Created);
}

#[tokio::test]
async fn test_batch_resolves_months_once() {
    let gateway = MockGateway::with_months(vec![month(2, 2025, 28)]);
    let orchestrator = default_orchestrator(&gateway);

    let requests = vec![
        request(2025, 2, 3),
        request(2025, 2, 4),
        request(2025, 2, 5),
    ];
    orchestrator
        .submit_batch(&requests, &NoopProgress)
        .await
        .unwrap();

    assert_eq!(gateway.list_months_calls(), 1);
}

#[tokio::test]
async fn test_batch_with_empty_month_listing_is_no_month_data() {
    let gateway = MockGateway::with_months(vec![]);
    let orchestrator = default_orchestrator(&gateway);

    let err = orchestrator
        .submit_batch(&[request(2025, 2, 3)], &NoopProgress)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoMonthData));
}

// =============================================================================
// Duplicate month policy
// =============================================================================

#[tokio::test]
async fn test_duplicate_months_resolve_by_policy() {
    let mut early = month(2, 2024, 0);
    early.header_id = "hdr-early".to_string();
    let mut late = month(2, 2025, 0);
    late.header_id = "hdr-late".to_string();
    let gateway = MockGateway::with_months(vec![early, late]);

    let last_wins = MonthMap::fetch(&gateway, "", DuplicateMonthPolicy::LastWins)
        .await
        .unwrap();
    assert_eq!(last_wins.resolve(2, 2025).unwrap().header_id, "hdr-late");

    let first_wins = MonthMap::fetch(&gateway, "", DuplicateMonthPolicy::FirstWins)
        .await
        .unwrap();
    assert_eq!(first_wins.resolve(2, 2024).unwrap().header_id, "hdr-early");
}
