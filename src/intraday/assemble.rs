use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::core::{FetchError, QuoteRow};

const TS_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Converts wire entries into rows, in payload order.
///
/// Any bad entry fails the whole batch; no partial series is produced.
pub(crate) fn assemble_rows(entries: &Map<String, Value>) -> Result<Vec<QuoteRow>, FetchError> {
    entries
        .iter()
        .map(|(raw_ts, fields)| assemble_row(raw_ts, fields))
        .collect()
}

fn assemble_row(raw_ts: &str, fields: &Value) -> Result<QuoteRow, FetchError> {
    let malformed = |reason: String| FetchError::MalformedData {
        timestamp: raw_ts.to_string(),
        reason,
    };

    let ts = parse_timestamp(raw_ts).ok_or_else(|| malformed("unparsable timestamp".into()))?;
    let Value::Object(fields) = fields else {
        return Err(malformed("entry is not an object".into()));
    };

    let mut open = None;
    let mut high = None;
    let mut low = None;
    let mut close = None;
    let mut volume = None;

    for (name, value) in fields {
        let slot = match strip_prefix(name) {
            "open" => &mut open,
            "high" => &mut high,
            "low" => &mut low,
            "close" => &mut close,
            "volume" => &mut volume,
            _ => continue,
        };
        let v = coerce_f64(value).ok_or_else(|| malformed(format!("{name} is not a number")))?;
        *slot = Some(v);
    }

    let require = |v: Option<f64>, field: &str| {
        v.ok_or_else(|| malformed(format!("missing {field}")))
    };
    let price = |v: Option<f64>, field: &str| -> Result<f64, FetchError> {
        let v = require(v, field)?;
        if v > 0.0 {
            Ok(v)
        } else {
            Err(malformed(format!("{field} must be positive")))
        }
    };

    let row = QuoteRow {
        ts,
        open: price(open, "open")?,
        high: price(high, "high")?,
        low: price(low, "low")?,
        close: price(close, "close")?,
        volume: require(volume, "volume")?,
    };
    if row.volume < 0.0 {
        return Err(malformed("volume must be non-negative".into()));
    }
    Ok(row)
}

/// `"1. open"` -> `"open"`. Names without a numeric prefix pass through.
fn strip_prefix(name: &str) -> &str {
    match name.split_once(". ") {
        Some((prefix, rest))
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            rest.trim()
        }
        _ => name.trim(),
    }
}

fn coerce_f64(v: &Value) -> Option<f64> {
    let n = match v {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    TS_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
