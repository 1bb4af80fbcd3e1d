// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Scenario table and suite runner
//
// Maps each prompt behavior (plus the unset default) and each dialog kind to
// the check that characterizes the required remote end behavior.

use crate::api::SuiteOptions;
use crate::checks::Check;
use crate::error::{Error, Result};
use crate::fixtures::{Poll, cleanup_prompts};
use crate::protocol::{Capabilities, DialogKind, UnhandledPromptBehavior};
use crate::session::Session;
use crate::transport::HttpTransport;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// One (behavior, dialog kind) pair and its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    /// `None` runs with the capability unset.
    pub behavior: Option<UnhandledPromptBehavior>,
    pub dialog: DialogKind,
    pub check: Check,
}

impl Scenario {
    /// Stable id, e.g. `accept_and_notify[confirm]` or `default[prompt]`.
    pub fn id(&self) -> String {
        format!("{}[{}]", behavior_slug(self.behavior), self.dialog)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id(), self.check)
    }
}

fn behavior_slug(behavior: Option<UnhandledPromptBehavior>) -> &'static str {
    behavior.map_or("default", |b| b.slug())
}

/// The expected outcome for a behavior and dialog kind.
///
/// An unset capability behaves as `dismiss and notify`.
pub fn expected_check(behavior: Option<UnhandledPromptBehavior>, dialog: DialogKind) -> Check {
    match behavior.unwrap_or(UnhandledPromptBehavior::DismissAndNotify) {
        UnhandledPromptBehavior::Accept => Check::ClosedWithoutException {
            retval: dialog.accepted_retval(),
        },
        UnhandledPromptBehavior::AcceptAndNotify => Check::ClosedWithException {
            retval: dialog.accepted_retval(),
        },
        UnhandledPromptBehavior::Dismiss => Check::ClosedWithoutException {
            retval: dialog.dismissed_retval(),
        },
        UnhandledPromptBehavior::DismissAndNotify => Check::ClosedWithException {
            retval: dialog.dismissed_retval(),
        },
        UnhandledPromptBehavior::Ignore => Check::NotClosedButException,
    }
}

/// Every behavior, then the unset default.
pub fn behaviors() -> Vec<Option<UnhandledPromptBehavior>> {
    UnhandledPromptBehavior::ALL
        .into_iter()
        .map(Some)
        .chain(std::iter::once(None))
        .collect()
}

/// The full table: six behaviors times three dialog kinds.
pub fn table() -> Vec<Scenario> {
    behaviors()
        .into_iter()
        .flat_map(|behavior| {
            DialogKind::ALL.into_iter().map(move |dialog| Scenario {
                behavior,
                dialog,
                check: expected_check(behavior, dialog),
            })
        })
        .collect()
}

/// Scenarios whose id matches `pattern` (glob syntax).
pub fn filter_table(pattern: &str) -> Result<Vec<Scenario>> {
    let pattern = glob::Pattern::new(pattern)
        .map_err(|e| Error::InvalidArgument(format!("invalid filter '{}': {}", pattern, e)))?;
    Ok(table()
        .into_iter()
        .filter(|s| pattern.matches(&s.id()))
        .collect())
}

/// Result of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub id: String,
    pub scenario: Scenario,
    pub passed: bool,
    /// Failure description when `passed` is false.
    pub failure: Option<String>,
    pub duration_ms: u128,
}

/// Results of a suite run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub webdriver_url: String,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// True when at least one scenario ran and none failed.
    pub fn is_success(&self) -> bool {
        !self.results.is_empty() && self.failed() == 0
    }

    pub fn get(&self, id: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.id == id)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            let status = if result.passed { "PASS" } else { "FAIL" };
            write!(f, "{} {} ({}ms)", status, result.id, result.duration_ms)?;
            if let Some(failure) = &result.failure {
                write!(f, "\n     {}", failure)?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} passed, {} failed against {}",
            self.passed(),
            self.failed(),
            self.webdriver_url
        )
    }
}

fn record(scenario: &Scenario, outcome: Result<()>, duration: Duration) -> ScenarioResult {
    let id = scenario.id();
    let failure = outcome.err().map(|e| e.to_string());
    match &failure {
        None => tracing::info!("PASS {}", id),
        Some(msg) => tracing::info!("FAIL {}: {}", id, msg),
    }
    ScenarioResult {
        id,
        scenario: scenario.clone(),
        passed: failure.is_none(),
        failure,
        duration_ms: duration.as_millis(),
    }
}

/// Runs one scenario in an existing session whose capabilities match it.
pub async fn run_scenario(session: &Session, scenario: &Scenario, poll: &Poll) -> Result<()> {
    cleanup_prompts(session).await?;
    scenario.check.run(session, scenario.dialog, poll).await
}

async fn run_group(
    transport: &HttpTransport,
    options: &SuiteOptions,
    behavior: Option<UnhandledPromptBehavior>,
    scenarios: &[Scenario],
    poll: &Poll,
    results: &mut Vec<ScenarioResult>,
) {
    tracing::info!(
        "Running {} scenario(s) with unhandledPromptBehavior={}",
        scenarios.len(),
        behavior.map_or("<unset>", |b| b.as_str())
    );

    let capabilities = Capabilities::new()
        .extra(options.capabilities.clone())
        .unhandled_prompt_behavior(behavior);

    let started = Instant::now();
    let session = match Session::new(transport.clone(), &capabilities).await {
        Ok(session) => session,
        Err(e) => {
            let msg = match e {
                Error::SessionNotCreated(msg) => msg,
                other => other.to_string(),
            };
            for scenario in scenarios {
                let err = Error::SessionNotCreated(msg.clone());
                results.push(record(scenario, Err(err), started.elapsed()));
            }
            return;
        }
    };

    for scenario in scenarios {
        let started = Instant::now();
        let outcome = run_scenario(&session, scenario, poll).await;
        results.push(record(scenario, outcome, started.elapsed()));
    }

    let id = session.id().to_string();
    if let Err(e) = session.delete().await {
        tracing::warn!("Failed to delete session {}: {}", id, e);
    }
}

/// Runs the (filtered) table against the configured remote end.
///
/// One session is opened per behavior and reused for that behavior's
/// scenarios; every scenario navigates to a fresh page first. Failures are
/// recorded per scenario and never abort the run. Only configuration errors
/// (bad URL, bad filter) return `Err`.
pub async fn run_suite(options: &SuiteOptions) -> Result<SuiteReport> {
    let scenarios = match &options.filter {
        Some(pattern) => filter_table(pattern)?,
        None => table(),
    };
    let transport = HttpTransport::with_timeout(&options.webdriver_url, options.request_timeout)?;
    let poll = Poll::new(options.dialog_timeout, options.poll_interval);

    let mut report = SuiteReport {
        webdriver_url: options.webdriver_url.clone(),
        results: Vec::with_capacity(scenarios.len()),
    };

    for behavior in behaviors() {
        let group: Vec<Scenario> = scenarios
            .iter()
            .filter(|s| s.behavior == behavior)
            .cloned()
            .collect();
        if group.is_empty() {
            continue;
        }
        run_group(&transport, options, behavior, &group, &poll, &mut report.results).await;
    }

    tracing::info!(
        "Suite finished: {} passed, {} failed",
        report.passed(),
        report.failed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Retval;
    use std::collections::HashSet;

    #[test]
    fn test_table_covers_every_pair_once() {
        let table = table();
        assert_eq!(table.len(), 18);

        let ids: HashSet<String> = table.iter().map(Scenario::id).collect();
        assert_eq!(ids.len(), 18);
        assert!(ids.contains("accept[alert]"));
        assert!(ids.contains("dismiss_and_notify[prompt]"));
        assert!(ids.contains("default[confirm]"));
    }

    #[test]
    fn test_table_rows() {
        use DialogKind::*;
        use UnhandledPromptBehavior::*;

        let closed = |retval| Check::ClosedWithoutException { retval };
        let notify = |retval| Check::ClosedWithException { retval };
        let empty = || Retval::Text(String::new());

        let expected = [
            (Some(Accept), Alert, closed(Retval::Undefined)),
            (Some(Accept), Confirm, closed(Retval::Bool(true))),
            (Some(Accept), Prompt, closed(empty())),
            (Some(AcceptAndNotify), Alert, notify(Retval::Undefined)),
            (Some(AcceptAndNotify), Confirm, notify(Retval::Bool(true))),
            (Some(AcceptAndNotify), Prompt, notify(empty())),
            (Some(Dismiss), Alert, closed(Retval::Undefined)),
            (Some(Dismiss), Confirm, closed(Retval::Bool(false))),
            (Some(Dismiss), Prompt, closed(Retval::Undefined)),
            (Some(DismissAndNotify), Alert, notify(Retval::Undefined)),
            (Some(DismissAndNotify), Confirm, notify(Retval::Bool(false))),
            (Some(DismissAndNotify), Prompt, notify(Retval::Undefined)),
            (Some(Ignore), Alert, Check::NotClosedButException),
            (Some(Ignore), Confirm, Check::NotClosedButException),
            (Some(Ignore), Prompt, Check::NotClosedButException),
            (None, Alert, notify(Retval::Undefined)),
            (None, Confirm, notify(Retval::Bool(false))),
            (None, Prompt, notify(Retval::Undefined)),
        ];

        for (behavior, dialog, check) in expected {
            assert_eq!(
                expected_check(behavior, dialog),
                check,
                "{}[{}]",
                behavior_slug(behavior),
                dialog
            );
        }
    }

    #[test]
    fn test_only_ignore_leaves_prompt_open() {
        for scenario in table() {
            let is_ignore = scenario.behavior == Some(UnhandledPromptBehavior::Ignore);
            assert_eq!(!scenario.check.closes_prompt(), is_ignore, "{}", scenario);
        }
    }

    #[test]
    fn test_default_matches_dismiss_and_notify() {
        for dialog in DialogKind::ALL {
            assert_eq!(
                expected_check(None, dialog),
                expected_check(Some(UnhandledPromptBehavior::DismissAndNotify), dialog)
            );
        }
    }

    #[test]
    fn test_filter_table() {
        let accept = filter_table("accept*").unwrap();
        assert_eq!(accept.len(), 6);

        let prompts = filter_table("*[[]prompt[]]").unwrap();
        assert_eq!(prompts.len(), 6);
        assert!(prompts.iter().all(|s| s.dialog == DialogKind::Prompt));

        let one = filter_table("ignore[[]alert[]]").unwrap();
        assert_eq!(one.len(), 1);

        assert!(matches!(
            filter_table("accept[").unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_report_counts_and_display() {
        let scenario = table().remove(0);
        let report = SuiteReport {
            webdriver_url: "http://127.0.0.1:4444".to_string(),
            results: vec![
                record(&scenario, Ok(()), Duration::from_millis(3)),
                record(
                    &scenario,
                    Err(Error::AssertionFailed("boom".to_string())),
                    Duration::from_millis(4),
                ),
            ],
        };

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());

        let text = report.to_string();
        assert!(text.contains("PASS accept[alert] (3ms)"));
        assert!(text.contains("Assertion failed: boom"));
        assert!(text.ends_with("1 passed, 1 failed against http://127.0.0.1:4444"));
    }

    #[test]
    fn test_empty_report_is_not_success() {
        assert!(!SuiteReport::default().is_success());
    }
}
