// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Element Send Keys checks
//
// Three outcome patterns cover every prompt behavior: the prompt is closed
// and the keys arrive, the prompt is closed but the command fails, or the
// prompt stays open and the command fails.

use crate::asserts::{assert_dialog_handled, assert_error, assert_success};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::fixtures::{Poll, create_dialog, inline};
use crate::protocol::{DialogKind, ErrorStatus, Retval};
use crate::session::Session;
use crate::transport::{Response, SESSION_ID};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// Message of every prompt the checks open.
pub const DIALOG_TEXT: &str = "cheese";

/// Keys sent while the prompt is open.
pub const KEYS: &str = "foo";

/// Page the checks type into.
pub const INPUT_DOCUMENT: &str = "<input type=text>";

/// Element Send Keys, sent as-is over the session's raw transport. The
/// response is returned untouched for the caller to assert on.
pub async fn element_send_keys(
    session: &Session,
    element: &Element,
    text: &str,
) -> Result<Response> {
    let path = format!("/session/{}/element/{}/value", SESSION_ID, element.id());
    session.transport().post(&path, &json!({ "text": text })).await
}

/// Expected outcome of sending keys with a prompt open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Check {
    /// Command succeeds, prompt closed with `retval`, keys delivered.
    ClosedWithoutException { retval: Retval },
    /// Command fails with `unexpected alert open`, prompt closed with
    /// `retval`, keys not delivered.
    ClosedWithException { retval: Retval },
    /// Command fails with `unexpected alert open`, prompt still open, keys
    /// not delivered.
    NotClosedButException,
}

impl Check {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Check::ClosedWithoutException { .. } => "closed without exception",
            Check::ClosedWithException { .. } => "closed with exception",
            Check::NotClosedButException => "not closed but exception",
        }
    }

    /// Whether the prompt is expected to be gone after the command.
    pub fn closes_prompt(&self) -> bool {
        !matches!(self, Check::NotClosedButException)
    }

    /// Runs the check on a fresh page in `session`.
    pub async fn run(&self, session: &Session, dialog: DialogKind, poll: &Poll) -> Result<()> {
        match self {
            Check::ClosedWithoutException { retval } => {
                closed_without_exception(session, dialog, retval, poll).await
            }
            Check::ClosedWithException { retval } => {
                closed_with_exception(session, dialog, retval, poll).await
            }
            Check::NotClosedButException => not_closed_but_exception(session, dialog, poll).await,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::ClosedWithoutException { retval } | Check::ClosedWithException { retval } => {
                write!(f, "{} (retval {})", self.label(), retval)
            }
            Check::NotClosedButException => f.write_str(self.label()),
        }
    }
}

/// Loads the input page, finds the input and opens the prompt.
async fn open_prompt_over_input(
    session: &Session,
    dialog: DialogKind,
    poll: &Poll,
) -> Result<Element> {
    session.navigate(&inline(INPUT_DOCUMENT)).await?;
    let element = session.find_css("input").await?;
    create_dialog(session, dialog, DIALOG_TEXT, poll).await?;
    Ok(element)
}

fn unexpected_alert_data() -> Value {
    json!({ "text": DIALOG_TEXT })
}

async fn assert_input_value(element: &Element, expected: &str) -> Result<()> {
    let value = element.property("value").await?;
    if value.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(Error::AssertionFailed(format!(
            "expected input value {:?}, got {:?}",
            expected, value
        )))
    }
}

async fn closed_without_exception(
    session: &Session,
    dialog: DialogKind,
    retval: &Retval,
    poll: &Poll,
) -> Result<()> {
    let element = open_prompt_over_input(session, dialog, poll).await?;

    let response = element_send_keys(session, &element, KEYS).await?;
    assert_success(&response)?;

    assert_dialog_handled(session, DIALOG_TEXT, retval).await?;
    assert_input_value(&element, KEYS).await
}

async fn closed_with_exception(
    session: &Session,
    dialog: DialogKind,
    retval: &Retval,
    poll: &Poll,
) -> Result<()> {
    let element = open_prompt_over_input(session, dialog, poll).await?;

    let response = element_send_keys(session, &element, KEYS).await?;
    assert_error(
        &response,
        ErrorStatus::UnexpectedAlertOpen,
        Some(&unexpected_alert_data()),
    )?;

    assert_dialog_handled(session, DIALOG_TEXT, retval).await?;
    assert_input_value(&element, "").await
}

async fn not_closed_but_exception(
    session: &Session,
    dialog: DialogKind,
    poll: &Poll,
) -> Result<()> {
    let element = open_prompt_over_input(session, dialog, poll).await?;

    let response = element_send_keys(session, &element, KEYS).await?;
    assert_error(
        &response,
        ErrorStatus::UnexpectedAlertOpen,
        Some(&unexpected_alert_data()),
    )?;

    let text = session
        .alert()
        .text()
        .await
        .map_err(|e| e.context("prompt should still be open"))?;
    if text != DIALOG_TEXT {
        return Err(Error::AssertionFailed(format!(
            "expected open prompt with text '{}', got '{}'",
            DIALOG_TEXT, text
        )));
    }
    session.alert().dismiss().await?;

    assert_input_value(&element, "").await
}
