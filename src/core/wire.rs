//! Response-shape matching for provider payloads.
//!
//! The provider encodes the requested granularity into the name of the data key
//! (`"Time Series (5min)"`, `"Time Series (15min)"`, ...), and signals failures with
//! sentinel keys instead of HTTP statuses. [`classify`] looks for those keys and
//! returns a discriminated [`ResponseShape`].

use serde_json::{Map, Value};

/// Substring identifying the data key of a successful response.
pub(crate) const TIME_SERIES_MARKER: &str = "Time Series";
/// Top-level key of an explicit provider error.
pub(crate) const ERROR_KEY: &str = "Error Message";
/// Top-level keys of advisory payloads (rate limits, premium-endpoint notices).
pub(crate) const ADVISORY_KEYS: [&str; 2] = ["Note", "Information"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResponseShape {
    /// Entries under the data key.
    TimeSeries(Map<String, Value>),
    ProviderError(String),
    RateLimit(String),
    /// Anything else; carries the raw payload for diagnostics.
    Unknown(Value),
}

pub(crate) fn classify(payload: Value) -> ResponseShape {
    let mut obj = match payload {
        Value::Object(obj) => obj,
        other => return ResponseShape::Unknown(other),
    };

    let ts_key = obj
        .keys()
        .find(|k| k.contains(TIME_SERIES_MARKER))
        .cloned();
    if let Some(key) = ts_key {
        match obj.remove(&key) {
            Some(Value::Object(entries)) => return ResponseShape::TimeSeries(entries),
            // A data key that is not an object is not a shape we understand.
            Some(other) => {
                obj.insert(key, other);
                return ResponseShape::Unknown(Value::Object(obj));
            }
            None => {}
        }
    }

    if let Some(msg) = obj.get(ERROR_KEY) {
        return ResponseShape::ProviderError(message_text(msg));
    }
    for k in ADVISORY_KEYS {
        if let Some(msg) = obj.get(k) {
            return ResponseShape::RateLimit(message_text(msg));
        }
    }

    ResponseShape::Unknown(Value::Object(obj))
}

fn message_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
