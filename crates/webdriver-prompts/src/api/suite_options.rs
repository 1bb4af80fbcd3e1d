// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0

use crate::transport::DEFAULT_REQUEST_TIMEOUT;
use serde_json::{Map, Value};
use std::time::Duration;

/// Remote end used when nothing else is configured.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://127.0.0.1:4444";

/// Options for `run_suite`.
#[derive(Debug, Clone)]
pub struct SuiteOptions {
    /// Base URL of the WebDriver remote end.
    pub webdriver_url: String,
    /// Extra `alwaysMatch` capabilities sent with every New Session, e.g.
    /// `browserName` or vendor options. An `unhandledPromptBehavior` entry
    /// here is overridden by each scenario group.
    pub capabilities: Map<String, Value>,
    /// Glob matched against scenario ids (`accept*`, `*[prompt]`).
    /// `None` runs the whole table.
    pub filter: Option<String>,
    /// How long `create_dialog` waits for the prompt to appear.
    /// Defaults to 15 seconds.
    pub dialog_timeout: Duration,
    /// Interval between polls while waiting for a prompt.
    /// Defaults to 100 milliseconds.
    pub poll_interval: Duration,
    /// Timeout for each raw request (Element Send Keys, `/status`).
    /// Defaults to 60 seconds.
    pub request_timeout: Duration,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            capabilities: Map::new(),
            filter: None,
            dialog_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(100),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SuiteOptions {
    /// Creates a new `SuiteOptions` with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remote end URL.
    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Set extra capabilities.
    pub fn capabilities(mut self, capabilities: Map<String, Value>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Only run scenarios whose id matches the glob.
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Set the prompt appearance timeout.
    pub fn dialog_timeout(mut self, timeout: Duration) -> Self {
        self.dialog_timeout = timeout;
        self
    }

    /// Set the prompt poll interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the per-request HTTP timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
