// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// WebDriver HTTP transport
//
// One request, one response. The transport does not interpret WebDriver
// errors: a 500 with an `unexpected alert open` body is a perfectly good
// `Response`. Only failures to talk HTTP at all become `Err`.
//
// Client commands go through fantoccini; this is the raw path for the
// command under test and for `/status`.

use crate::error::{Error, Result};
use reqwest::Method;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Placeholder in command paths replaced by the bound session id.
pub const SESSION_ID: &str = "{session_id}";

/// Raw answer from the remote end.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body; `null` when the body was empty
    pub body: Value,
}

impl Response {
    /// The `value` member of the envelope, if the body has one.
    pub fn value(&self) -> Option<&Value> {
        self.body.get("value")
    }

    /// `value.error` when the body is an error envelope.
    pub fn error_code(&self) -> Option<&str> {
        self.value()?.get("error")?.as_str()
    }
}

/// HTTP client bound to one remote end.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
    session_id: Option<String>,
}

impl HttpTransport {
    /// Creates a transport for the remote end at `base_url` with the default
    /// request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a transport with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidArgument(format!(
                "remote end URL must be http or https, got '{}'",
                base_url
            )));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            session_id: None,
        })
    }

    /// A copy of this transport that expands `{session_id}` to `id`.
    pub fn bind_session(&self, id: impl Into<String>) -> Self {
        Self {
            session_id: Some(id.into()),
            ..self.clone()
        }
    }

    /// The bound session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Base URL of the remote end.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves a command path such as `/session/{session_id}/url` against
    /// the base URL, keeping any path prefix the base carries (e.g.
    /// `/wd/hub`).
    ///
    /// A path naming `{session_id}` needs a transport from `bind_session`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let path = if path.contains(SESSION_ID) {
            let id = self.session_id.as_deref().ok_or_else(|| {
                Error::InvalidArgument(format!("'{}' needs a session-bound transport", path))
            })?;
            path.replace(SESSION_ID, id)
        } else {
            path.to_string()
        };
        let base = self.base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path.trim_start_matches('/')))?)
    }

    /// Sends one request.
    ///
    /// POST requests without a body send `{}`, which every WebDriver command
    /// without parameters expects.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {} body={:?}", method, url, body);

        let mut request = self.client.request(method.clone(), url.clone());
        if method == Method::POST {
            let empty = Value::Object(Map::new());
            request = request.json(body.unwrap_or(&empty));
        } else if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                Error::ProtocolError(format!(
                    "{} {} answered {} with a non-JSON body: {}",
                    method, url, status, e
                ))
            })?
        };

        tracing::debug!("{} {} -> {} {}", method, url, status, body);
        Ok(Response { status, body })
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Response> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.send(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let transport = HttpTransport::new("http://127.0.0.1:4444/wd/hub/").unwrap();
        assert_eq!(
            transport.endpoint("/session/abc/url").unwrap().as_str(),
            "http://127.0.0.1:4444/wd/hub/session/abc/url"
        );

        let transport = HttpTransport::new("http://localhost:9515").unwrap();
        assert_eq!(
            transport.endpoint("/status").unwrap().as_str(),
            "http://localhost:9515/status"
        );
    }

    #[test]
    fn test_endpoint_expands_bound_session_id() {
        let transport = HttpTransport::new("http://127.0.0.1:4444").unwrap();
        assert!(transport.session_id().is_none());
        assert!(matches!(
            transport.endpoint("/session/{session_id}/url"),
            Err(Error::InvalidArgument(_))
        ));

        let bound = transport.bind_session("abc-123");
        assert_eq!(bound.session_id(), Some("abc-123"));
        assert_eq!(
            bound.endpoint("/session/{session_id}/element/e1/value").unwrap().as_str(),
            "http://127.0.0.1:4444/session/abc-123/element/e1/value"
        );
        // Paths without the placeholder are untouched
        assert_eq!(
            bound.endpoint("/status").unwrap().as_str(),
            "http://127.0.0.1:4444/status"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            HttpTransport::new("ws://127.0.0.1:4444"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            HttpTransport::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_response_accessors() {
        let response = Response {
            status: 500,
            body: json!({
                "value": {
                    "error": "unexpected alert open",
                    "message": "",
                    "stacktrace": "",
                    "data": { "text": "cheese" }
                }
            }),
        };
        assert_eq!(response.error_code(), Some("unexpected alert open"));

        let success = Response {
            status: 200,
            body: json!({ "value": null }),
        };
        assert_eq!(success.value(), Some(&Value::Null));
        assert_eq!(success.error_code(), None);
    }
}
