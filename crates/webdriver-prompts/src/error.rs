// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Error types for webdriver-prompts

use fantoccini::error::CmdError;
use thiserror::Error;
use webdriver::error::ErrorStatus;

/// Result type alias for webdriver-prompts operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a WebDriver remote end
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request to the remote end failed
    ///
    /// Covers connection refused, DNS failures, request timeouts and
    /// unreadable response bodies. No retry is attempted.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote end URL or a navigation target could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A setup or observation command issued through the WebDriver client
    /// failed
    ///
    /// Raised by `Session`, `Element` and `Alert`. The transport shim never
    /// produces this variant; its callers inspect the raw response instead.
    #[error("WebDriver command failed: {0}")]
    Command(#[from] CmdError),

    /// A raw response carried a WebDriver error envelope
    #[error("WebDriver error '{code}': {message}", code = .status.error_code())]
    WebDriver { status: ErrorStatus, message: String },

    /// The remote end answered with a body that is not a WebDriver envelope
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// New Session was refused
    #[error("Session not created: {0}")]
    SessionNotCreated(String),

    /// An expected outcome did not hold
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Timeout waiting for a condition
    ///
    /// Contains what was being waited for and how long.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns the status of a raw error envelope, looking through any
    /// context wrappers.
    pub fn webdriver_status(&self) -> Option<&ErrorStatus> {
        match self {
            Error::WebDriver { status, .. } => Some(status),
            Error::Context(_, inner) => inner.webdriver_status(),
            _ => None,
        }
    }

    /// True when the remote end reported `no such alert`
    pub fn is_no_such_alert(&self) -> bool {
        match self {
            Error::Command(e) => e.is_no_such_alert(),
            Error::WebDriver { status, .. } => matches!(status, ErrorStatus::NoSuchAlert),
            Error::Context(_, inner) => inner.is_no_such_alert(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webdriver_status_through_context() {
        let err = Error::WebDriver {
            status: ErrorStatus::NoSuchAlert,
            message: "no prompt".to_string(),
        }
        .context("reading alert text");

        assert!(matches!(
            err.webdriver_status(),
            Some(ErrorStatus::NoSuchAlert)
        ));
        assert!(err.is_no_such_alert());
        assert_eq!(
            err.to_string(),
            "reading alert text: WebDriver error 'no such alert': no prompt"
        );
    }

    #[test]
    fn test_non_webdriver_error_has_no_status() {
        let err = Error::AssertionFailed("value mismatch".to_string());
        assert!(err.webdriver_status().is_none());
        assert!(!err.is_no_such_alert());
    }
}
