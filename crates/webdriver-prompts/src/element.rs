// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Web element handle

use crate::error::{Error, Result};
use crate::protocol::ELEMENT_KEY;
use serde_json::Value;
use std::fmt;

/// Reference to an element in the session's current document.
#[derive(Clone)]
pub struct Element {
    inner: fantoccini::elements::Element,
    id: String,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.id).finish()
    }
}

impl Element {
    /// Wraps a found element, reading its id from the web element reference.
    pub(crate) fn new(inner: fantoccini::elements::Element) -> Result<Self> {
        let reference = serde_json::to_value(&inner)?;
        let id = reference
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::ProtocolError(format!("element reference without id: {}", reference))
            })?
            .to_string();
        Ok(Self { inner, id })
    }

    /// Element id assigned by the remote end.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Reads a DOM property, e.g. `value`. `None` when the property is null.
    pub async fn property(&self, name: &str) -> Result<Option<String>> {
        self.inner
            .prop(name)
            .await
            .map_err(|e| Error::from(e).context(format!("reading property '{}'", name)))
    }
}
