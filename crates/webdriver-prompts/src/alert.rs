// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// User prompt commands
//
// See: https://w3c.github.io/webdriver/#user-prompts

use crate::error::Result;
use fantoccini::Client;

/// Commands acting on the session's current user prompt.
///
/// Every command fails with `no such alert` when no prompt is open.
#[derive(Clone, Copy)]
pub struct Alert<'s> {
    client: &'s Client,
}

impl<'s> Alert<'s> {
    pub(crate) fn new(client: &'s Client) -> Self {
        Self { client }
    }

    /// Message of the open prompt.
    pub async fn text(&self) -> Result<String> {
        Ok(self.client.get_alert_text().await?)
    }

    /// Clicks OK.
    pub async fn accept(&self) -> Result<()> {
        Ok(self.client.accept_alert().await?)
    }

    /// Clicks Cancel (or closes an alert).
    pub async fn dismiss(&self) -> Result<()> {
        Ok(self.client.dismiss_alert().await?)
    }

    /// Types into a `prompt()` dialog. Alerts and confirms reject this with
    /// `element not interactable`.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        Ok(self.client.send_alert_text(text).await?)
    }
}
