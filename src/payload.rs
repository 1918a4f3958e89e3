//! Decoded response bodies and the generic pretty-printer

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Which request path produced a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Via {
    Direct,
    Proxy,
}

impl Via {
    pub fn as_str(&self) -> &'static str {
        match self {
            Via::Direct => "direct",
            Via::Proxy => "proxy",
        }
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful response: parsed JSON, or the text as received.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Parsed(Value),
    Raw(String),
}

impl Payload {
    /// Try JSON first; anything that does not parse stays raw text.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Payload::Parsed(value),
            Err(_) => Payload::Raw(text),
        }
    }

    /// View the payload as a JSON value; raw text becomes a JSON string.
    pub fn value(&self) -> Cow<'_, Value> {
        match self {
            Payload::Parsed(value) => Cow::Borrowed(value),
            Payload::Raw(text) => Cow::Owned(Value::String(text.clone())),
        }
    }
}

/// Strings render verbatim, everything else as 2-space indented JSON.
pub fn pretty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Single-line string form: strings verbatim, other values as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Falsy in the loose sense the remote APIs rely on: null, false, 0 and "".
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
