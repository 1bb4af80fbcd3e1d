// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog kinds and return values
//
// A user prompt is opened from page script with `window.alert`,
// `window.confirm` or `window.prompt`. What the call yields back to the page
// once the prompt is closed is its return value.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
}

impl DialogKind {
    pub const ALL: [DialogKind; 3] = [DialogKind::Alert, DialogKind::Confirm, DialogKind::Prompt];

    /// Name of the `window` function that opens this kind of prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
        }
    }

    /// What the page sees when the prompt is accepted with no text entered.
    pub fn accepted_retval(&self) -> Retval {
        match self {
            DialogKind::Alert => Retval::Undefined,
            DialogKind::Confirm => Retval::Bool(true),
            DialogKind::Prompt => Retval::Text(String::new()),
        }
    }

    /// What the page sees when the prompt is dismissed.
    pub fn dismissed_retval(&self) -> Retval {
        match self {
            DialogKind::Alert => Retval::Undefined,
            DialogKind::Confirm => Retval::Bool(false),
            DialogKind::Prompt => Retval::Undefined,
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "alert" => Ok(DialogKind::Alert),
            "confirm" => Ok(DialogKind::Confirm),
            "prompt" => Ok(DialogKind::Prompt),
            other => Err(crate::Error::InvalidArgument(format!(
                "unsupported dialog kind '{}'",
                other
            ))),
        }
    }
}

/// Value a closed prompt returned to page script.
///
/// `Undefined` covers both `undefined` and `null`: neither survives the trip
/// through Execute Script as anything but JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Retval {
    Undefined,
    Bool(bool),
    Text(String),
}

impl Retval {
    /// Interprets a script result. Anything other than null, a boolean or a
    /// string is not a prompt return value.
    pub fn from_json(value: &Value) -> Option<Retval> {
        match value {
            Value::Null => Some(Retval::Undefined),
            Value::Bool(b) => Some(Retval::Bool(*b)),
            Value::String(s) => Some(Retval::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Retval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retval::Undefined => f.write_str("undefined"),
            Retval::Bool(b) => write!(f, "{}", b),
            Retval::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dialog_kind_parse() {
        for kind in DialogKind::ALL {
            assert_eq!(kind.as_str().parse::<DialogKind>().unwrap(), kind);
        }
        assert!("beforeunload".parse::<DialogKind>().is_err());
    }

    #[test]
    fn test_accept_and_dismiss_retvals() {
        assert_eq!(DialogKind::Alert.accepted_retval(), Retval::Undefined);
        assert_eq!(DialogKind::Confirm.accepted_retval(), Retval::Bool(true));
        assert_eq!(
            DialogKind::Prompt.accepted_retval(),
            Retval::Text(String::new())
        );
        assert_eq!(DialogKind::Alert.dismissed_retval(), Retval::Undefined);
        assert_eq!(DialogKind::Confirm.dismissed_retval(), Retval::Bool(false));
        assert_eq!(DialogKind::Prompt.dismissed_retval(), Retval::Undefined);
    }

    #[test]
    fn test_retval_json() {
        assert_eq!(Retval::from_json(&json!(null)), Some(Retval::Undefined));
        assert_eq!(Retval::from_json(&json!(false)), Some(Retval::Bool(false)));
        assert_eq!(
            Retval::from_json(&json!("")),
            Some(Retval::Text(String::new()))
        );
        assert_eq!(Retval::from_json(&json!(1)), None);
        assert_eq!(Retval::Text(String::new()).to_string(), "\"\"");
    }
}
