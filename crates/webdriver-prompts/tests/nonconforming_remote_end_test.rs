// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Integration tests proving the suite detects non-conforming remote ends
//
// Each test starts the mock with one deliberate flaw and checks exactly the
// affected scenarios fail, with a failure message naming the deviation.


use mock_remote_end::{Flaw, MockRemoteEnd, init_tracing};
use std::time::Duration;
use webdriver_prompts::{SuiteOptions, SuiteReport, run_suite};

async fn run_against(flaw: Flaw) -> SuiteReport {
    init_tracing();
    let server = MockRemoteEnd::start_with_flaw(flaw).await;
    let options = SuiteOptions::new()
        .webdriver_url(server.url())
        .dialog_timeout(Duration::from_secs(2))
        .poll_interval(Duration::from_millis(5));

    let report = run_suite(&options).await.expect("Suite should start");
    server.shutdown();
    report
}

fn failed_ids(report: &SuiteReport) -> Vec<String> {
    let mut ids: Vec<String> = report
        .results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.id.clone())
        .collect();
    ids.sort();
    ids
}

fn failure_of<'a>(report: &'a SuiteReport, id: &str) -> &'a str {
    report
        .get(id)
        .and_then(|r| r.failure.as_deref())
        .unwrap_or_else(|| panic!("{} should have failed", id))
}

#[tokio::test]
async fn test_missing_notification_is_detected() {
    let report = run_against(Flaw::SkipsNotify).await;

    // Every notifying behavior, including the default, must fail; the
    // silent behaviors still pass.
    assert_eq!(report.failed(), 12);
    for id in failed_ids(&report) {
        assert!(
            !id.starts_with("accept[") && !id.starts_with("dismiss["),
            "{} should not fail",
            id
        );
    }

    let msg = failure_of(&report, "accept_and_notify[confirm]");
    assert!(msg.contains("expected HTTP 500"), "{}", msg);
}

#[tokio::test]
async fn test_missing_error_data_is_detected() {
    let report = run_against(Flaw::OmitsErrorData).await;

    assert_eq!(report.failed(), 12);
    let msg = failure_of(&report, "ignore[prompt]");
    assert!(msg.contains("has none"), "{}", msg);
}

#[tokio::test]
async fn test_keys_typed_after_error_are_detected() {
    let report = run_against(Flaw::TypesDespiteError).await;

    assert_eq!(report.failed(), 12);
    let msg = failure_of(&report, "default[alert]");
    assert!(msg.contains("expected input value \"\""), "{}", msg);
}

#[tokio::test]
async fn test_wrong_default_behavior_is_detected() {
    let report = run_against(Flaw::AcceptsByDefault).await;

    assert_eq!(
        failed_ids(&report),
        vec![
            "default[alert]".to_string(),
            "default[confirm]".to_string(),
            "default[prompt]".to_string(),
        ]
    );
}
