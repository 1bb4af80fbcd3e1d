// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Session capabilities
//
// Only `unhandledPromptBehavior` is modeled as a typed value; any other
// capability a remote end needs (browserName, vendor options) travels as raw
// JSON in `Capabilities::extra`.
//
// See: https://w3c.github.io/webdriver/#dfn-unhandled-prompt-behavior

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Capability key controlling automatic handling of user prompts.
pub const UNHANDLED_PROMPT_BEHAVIOR: &str = "unhandledPromptBehavior";

/// How the remote end handles a user prompt that is open when a command
/// arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnhandledPromptBehavior {
    /// Accept the prompt and run the command.
    #[serde(rename = "accept")]
    Accept,
    /// Accept the prompt and fail the command with `unexpected alert open`.
    #[serde(rename = "accept and notify")]
    AcceptAndNotify,
    /// Dismiss the prompt and run the command.
    #[serde(rename = "dismiss")]
    Dismiss,
    /// Dismiss the prompt and fail the command with `unexpected alert open`.
    #[serde(rename = "dismiss and notify")]
    DismissAndNotify,
    /// Leave the prompt open and fail the command with `unexpected alert open`.
    #[serde(rename = "ignore")]
    Ignore,
}

impl UnhandledPromptBehavior {
    /// All behaviors, in the order the suite exercises them.
    pub const ALL: [UnhandledPromptBehavior; 5] = [
        UnhandledPromptBehavior::Accept,
        UnhandledPromptBehavior::AcceptAndNotify,
        UnhandledPromptBehavior::Dismiss,
        UnhandledPromptBehavior::DismissAndNotify,
        UnhandledPromptBehavior::Ignore,
    ];

    /// Wire string, e.g. `"dismiss and notify"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnhandledPromptBehavior::Accept => "accept",
            UnhandledPromptBehavior::AcceptAndNotify => "accept and notify",
            UnhandledPromptBehavior::Dismiss => "dismiss",
            UnhandledPromptBehavior::DismissAndNotify => "dismiss and notify",
            UnhandledPromptBehavior::Ignore => "ignore",
        }
    }

    /// Identifier-friendly name, e.g. `dismiss_and_notify`.
    pub fn slug(&self) -> &'static str {
        match self {
            UnhandledPromptBehavior::Accept => "accept",
            UnhandledPromptBehavior::AcceptAndNotify => "accept_and_notify",
            UnhandledPromptBehavior::Dismiss => "dismiss",
            UnhandledPromptBehavior::DismissAndNotify => "dismiss_and_notify",
            UnhandledPromptBehavior::Ignore => "ignore",
        }
    }

    /// Whether the command fails with `unexpected alert open`.
    pub fn notifies(&self) -> bool {
        !matches!(
            self,
            UnhandledPromptBehavior::Accept | UnhandledPromptBehavior::Dismiss
        )
    }
}

impl fmt::Display for UnhandledPromptBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnhandledPromptBehavior {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        UnhandledPromptBehavior::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| {
                crate::Error::InvalidArgument(format!("unknown unhandledPromptBehavior '{}'", s))
            })
    }
}

/// Capabilities requested through `alwaysMatch` on New Session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Capabilities {
    /// `None` leaves the capability unset so the remote end's default applies.
    pub unhandled_prompt_behavior: Option<UnhandledPromptBehavior>,
    /// Additional capabilities merged in verbatim.
    pub extra: Map<String, Value>,
}

impl Capabilities {
    /// Creates empty capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt behavior. `None` leaves it unset.
    pub fn unhandled_prompt_behavior(mut self, behavior: Option<UnhandledPromptBehavior>) -> Self {
        self.unhandled_prompt_behavior = behavior;
        self
    }

    /// Merge additional capabilities.
    pub fn extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra.extend(extra);
        self
    }

    /// The `alwaysMatch` object.
    ///
    /// A typed prompt behavior wins over an `unhandledPromptBehavior` entry in
    /// `extra`; with no typed behavior any such entry is dropped so the
    /// default row really runs with the capability unset.
    pub fn always_match(&self) -> Map<String, Value> {
        let mut caps = self.extra.clone();
        caps.remove(UNHANDLED_PROMPT_BEHAVIOR);
        if let Some(behavior) = self.unhandled_prompt_behavior {
            caps.insert(
                UNHANDLED_PROMPT_BEHAVIOR.to_string(),
                Value::String(behavior.as_str().to_string()),
            );
        }
        caps
    }
}
