// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// WebDriver session
//
// Setup and observation commands run through a fantoccini `Client`, whose
// errors surface as `Error::Command`. The session also carries a raw
// transport bound to the same session id for the command under test.

use crate::alert::Alert;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::protocol::{Capabilities, ErrorStatus};
use crate::transport::{HttpTransport, Response};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::Value;
use std::fmt;

/// Unwraps a raw response into its `value`, turning error envelopes into
/// `Error::WebDriver`.
pub(crate) fn command_value(response: Response) -> Result<Value> {
    if response.status == 200 {
        return match response.body {
            Value::Object(mut map) => map.remove("value").ok_or_else(|| {
                Error::ProtocolError("success response without a 'value' member".to_string())
            }),
            other => Err(Error::ProtocolError(format!(
                "success response is not an object: {}",
                other
            ))),
        };
    }

    let error = response.error_code().map(str::to_string).ok_or_else(|| {
        Error::ProtocolError(format!(
            "HTTP {} without an error envelope: {}",
            response.status, response.body
        ))
    })?;
    let message = response
        .value()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(Error::WebDriver {
        status: ErrorStatus::from(error),
        message,
    })
}

/// Readiness reported by `GET /status`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStatus {
    pub ready: bool,
    pub message: String,
}

/// An open WebDriver session.
pub struct Session {
    client: Client,
    transport: HttpTransport,
    id: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("remote_end", &self.transport.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Queries `GET /status` on the remote end.
    pub async fn status(transport: &HttpTransport) -> Result<RemoteStatus> {
        let value = command_value(transport.get("/status").await?)?;
        Ok(RemoteStatus {
            ready: value.get("ready").and_then(Value::as_bool).unwrap_or(false),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// Creates a session at the transport's remote end with `capabilities`
    /// under `alwaysMatch`.
    ///
    /// An unset prompt behavior is left out of the request entirely.
    pub async fn new(transport: HttpTransport, capabilities: &Capabilities) -> Result<Self> {
        let always_match = capabilities.always_match();
        tracing::debug!(
            "Creating session with alwaysMatch {}",
            serde_json::Value::Object(always_match.clone())
        );

        let client = ClientBuilder::rustls()
            .map_err(|e| Error::SessionNotCreated(format!("TLS setup failed: {}", e)))?
            .capabilities(always_match)
            .connect(transport.base_url().as_str())
            .await
            .map_err(|e| Error::SessionNotCreated(e.to_string()))?;

        let id = match client.session_id().await? {
            Some(id) => id,
            None => {
                return Err(Error::SessionNotCreated(
                    "remote end assigned no session id".to_string(),
                ));
            }
        };

        tracing::debug!("Session {} created", id);
        Ok(Self {
            client,
            transport: transport.bind_session(id.clone()),
            id,
        })
    }

    /// Session id assigned by the remote end.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw transport bound to this session; `{session_id}` in a command path
    /// expands to `id()`.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// Navigates the current top-level browsing context.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| Error::from(e).context(format!("navigating to {}", url)))
    }

    /// URL of the current top-level browsing context.
    pub async fn current_url(&self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    /// Finds the first element matching a CSS selector.
    pub async fn find_css(&self, selector: &str) -> Result<Element> {
        let found = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| Error::from(e).context(format!("finding element '{}'", selector)))?;
        Element::new(found)
    }

    /// Runs a synchronous script and returns its result.
    pub async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Access to the current user prompt.
    pub fn alert(&self) -> Alert<'_> {
        Alert::new(&self.client)
    }

    /// Ends the session.
    pub async fn delete(self) -> Result<()> {
        let id = self.id;
        self.client
            .close()
            .await
            .map_err(|e| Error::from(e).context(format!("deleting session {}", id)))?;
        tracing::debug!("Session {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_value_success() {
        let value = command_value(Response {
            status: 200,
            body: json!({ "value": { "ready": true } }),
        })
        .unwrap();
        assert_eq!(value, json!({ "ready": true }));
    }

    #[test]
    fn test_command_value_webdriver_error() {
        let err = command_value(Response {
            status: 404,
            body: json!({
                "value": { "error": "no such alert", "message": "none open", "stacktrace": "" }
            }),
        })
        .unwrap_err();
        assert!(err.is_no_such_alert());
        assert!(err.to_string().contains("none open"));
    }

    #[test]
    fn test_command_value_malformed() {
        let err = command_value(Response {
            status: 500,
            body: Value::Null,
        })
        .unwrap_err();
        assert!(matches!(err, Error::ProtocolError(_)));

        let err = command_value(Response {
            status: 200,
            body: json!({ "ready": true }),
        })
        .unwrap_err();
        assert!(matches!(err, Error::ProtocolError(_)));
    }
}
