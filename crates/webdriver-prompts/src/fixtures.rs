// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Test fixtures
//
// Page and prompt setup shared by the check routines: inline documents,
// opening a user prompt from script, waiting for it to show up, and clearing
// prompts a previous case left behind.

use crate::error::{Error, Result};
use crate::protocol::DialogKind;
use crate::session::Session;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Opens a prompt from a zero-delay timer and stores what it returns in
/// `window.dialog_return_value`.
///
/// The timer lets Execute Script return before the prompt blocks the page.
/// `prompt()` gets an explicit empty default so accepting it yields `""` on
/// every browser.
pub const CREATE_DIALOG_SCRIPT: &str = r#"
let dialogType = arguments[0];
let text = arguments[1];
window.dialog_return_value = undefined;
setTimeout(function() {
  if (dialogType == 'prompt') {
    window.dialog_return_value = window[dialogType](text, '');
  } else {
    window.dialog_return_value = window[dialogType](text);
  }
}, 0);
"#;

/// Reads back what the last prompt returned.
pub const DIALOG_RETURN_VALUE_SCRIPT: &str = "return window.dialog_return_value;";

/// Upper bound on prompts `cleanup_prompts` closes before giving up.
const MAX_LEFTOVER_PROMPTS: usize = 5;

/// Builds a `data:` URL for an HTML fragment in a standards-mode UTF-8 page.
pub fn inline(html: &str) -> String {
    let doc = format!("<!doctype html>\n<meta charset=UTF-8>\n{}", html);
    format!("data:text/html;charset=utf-8,{}", urlencoding::encode(&doc))
}

/// Polls a condition until it yields a value or the timeout expires.
#[derive(Debug, Clone, Copy)]
pub struct Poll {
    timeout: Duration,
    interval: Duration,
}

impl Poll {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Calls `attempt` until it returns `Ok(Some(_))`.
    ///
    /// `Ok(None)` means "not yet"; an `Err` ends the wait immediately. The
    /// attempt always runs at least once, even with a zero timeout.
    pub async fn until<T, F, Fut>(&self, what: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let start = Instant::now();
        loop {
            if let Some(value) = attempt().await? {
                return Ok(value);
            }
            if start.elapsed() >= self.timeout {
                return Err(Error::Timeout(format!(
                    "{} (waited {}ms)",
                    what,
                    self.timeout.as_millis()
                )));
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

impl Default for Poll {
    fn default() -> Self {
        Self::new(Duration::from_secs(15), Duration::from_millis(100))
    }
}

/// Opens a user prompt of `kind` with message `text` and waits until the
/// remote end reports it.
pub async fn create_dialog(
    session: &Session,
    kind: DialogKind,
    text: &str,
    poll: &Poll,
) -> Result<()> {
    session
        .execute_script(
            CREATE_DIALOG_SCRIPT,
            vec![
                Value::String(kind.as_str().to_string()),
                Value::String(text.to_string()),
            ],
        )
        .await
        .map_err(|e| e.context(format!("opening {} prompt", kind)))?;

    let what = format!("No user prompt with text '{}' detected", text);
    poll.until(&what, move || async move {
        match session.alert().text().await {
            Ok(current) if current == text => Ok(Some(())),
            Ok(_) => Ok(None),
            Err(e) if e.is_no_such_alert() => Ok(None),
            Err(e) => Err(e),
        }
    })
    .await?;

    tracing::debug!("{} prompt '{}' is open", kind, text);
    Ok(())
}

/// Dismisses prompts left open so the next case starts clean.
///
/// Returns how many prompts were closed.
pub async fn cleanup_prompts(session: &Session) -> Result<usize> {
    let mut closed = 0;
    while closed < MAX_LEFTOVER_PROMPTS {
        match session.alert().text().await {
            Ok(text) => {
                tracing::warn!("Dismissing leftover user prompt '{}'", text);
                session.alert().dismiss().await?;
                closed += 1;
            }
            Err(e) if e.is_no_such_alert() => return Ok(closed),
            Err(e) => return Err(e.context("checking for leftover user prompts")),
        }
    }
    Err(Error::AssertionFailed(format!(
        "user prompts keep reopening after {} dismissals",
        MAX_LEFTOVER_PROMPTS
    )))
}
