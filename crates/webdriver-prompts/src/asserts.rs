// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Response and prompt-state assertions
//
// Each helper returns `Error::AssertionFailed` describing the mismatch so a
// suite run can report it next to the scenario id.

use crate::error::{Error, Result};
use crate::fixtures::DIALOG_RETURN_VALUE_SCRIPT;
use crate::protocol::{ErrorStatus, Retval};
use crate::session::Session;
use crate::transport::Response;
use serde_json::Value;

fn fail(msg: String) -> Error {
    Error::AssertionFailed(msg)
}

/// Asserts a success envelope: HTTP 200 with a `value` member. Returns the
/// value.
pub fn assert_success(response: &Response) -> Result<Value> {
    if response.status != 200 {
        return Err(fail(format!(
            "expected HTTP 200, got {} with body {}",
            response.status, response.body
        )));
    }
    response
        .value()
        .cloned()
        .ok_or_else(|| fail(format!("success body has no 'value': {}", response.body)))
}

/// Asserts an error envelope for `status`.
///
/// The HTTP status must be the one assigned to the error, `message` and
/// `stacktrace` must be strings, and when `data` is given `value.data` must
/// equal it exactly.
pub fn assert_error(response: &Response, status: ErrorStatus, data: Option<&Value>) -> Result<()> {
    let code = status.error_code();
    let http_status = status.http_status().as_u16();
    if response.status != http_status {
        return Err(fail(format!(
            "expected HTTP {} for '{}', got {} with body {}",
            http_status, code, response.status, response.body
        )));
    }

    let value = response
        .value()
        .filter(|v| v.is_object())
        .ok_or_else(|| fail(format!("error body has no 'value' object: {}", response.body)))?;

    match value.get("error").and_then(Value::as_str) {
        Some(error) if error == code => {}
        Some(error) => {
            return Err(fail(format!(
                "expected error '{}', got '{}'",
                code, error
            )));
        }
        None => return Err(fail(format!("error body has no 'error' string: {}", value))),
    }

    for key in ["message", "stacktrace"] {
        if !value.get(key).is_some_and(Value::is_string) {
            return Err(fail(format!("error body has no '{}' string: {}", key, value)));
        }
    }

    if let Some(expected) = data {
        match value.get("data") {
            Some(actual) if actual == expected => {}
            Some(actual) => {
                return Err(fail(format!(
                    "expected error data {}, got {}",
                    expected, actual
                )));
            }
            None => {
                return Err(fail(format!(
                    "expected error data {}, but the body has none",
                    expected
                )));
            }
        }
    }

    Ok(())
}

/// Asserts the prompt opened with `expected_text` has been closed and
/// returned `expected_retval` to the page.
///
/// A prompt may still be open if it is a different one; only a prompt with
/// the same text counts as unhandled.
pub async fn assert_dialog_handled(
    session: &Session,
    expected_text: &str,
    expected_retval: &Retval,
) -> Result<()> {
    match session.alert().text().await {
        Ok(text) => {
            if text == expected_text {
                return Err(fail(format!(
                    "user prompt with text '{}' was not handled",
                    expected_text
                )));
            }
            Ok(())
        }
        Err(e) if e.is_no_such_alert() => {
            let value = session
                .execute_script(DIALOG_RETURN_VALUE_SCRIPT, Vec::new())
                .await
                .map_err(|e| e.context("reading dialog return value"))?;
            match Retval::from_json(&value) {
                Some(actual) if &actual == expected_retval => Ok(()),
                _ => Err(fail(format!(
                    "expected dialog return value {}, got {}",
                    expected_retval, value
                ))),
            }
        }
        Err(e) => Err(e),
    }
}
