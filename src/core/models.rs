use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::error::ConfigError;

/* ----- INTERVAL ----- */

/// Intraday sampling granularity supported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Interval {
    #[serde(rename = "1min")]
    I1m,
    #[default]
    #[serde(rename = "5min")]
    I5m,
    #[serde(rename = "15min")]
    I15m,
    #[serde(rename = "30min")]
    I30m,
    #[serde(rename = "60min")]
    I60m,
}

impl Interval {
    /// All supported intervals, finest first.
    pub const ALL: [Interval; 5] = [
        Interval::I1m,
        Interval::I5m,
        Interval::I15m,
        Interval::I30m,
        Interval::I60m,
    ];

    /// The provider's query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::I1m => "1min",
            Interval::I5m => "5min",
            Interval::I15m => "15min",
            Interval::I30m => "30min",
            Interval::I60m => "60min",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == needle)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "interval".into(),
                value: s.to_string(),
            })
    }
}

/* ----- ROWS ----- */

/// One sampled interval of trading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteRow {
    /// Bar timestamp as reported by the provider (exchange-local, no zone).
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Kept as a float through the pipeline; see [`QuoteRow::volume_shares`].
    pub volume: f64,
}

impl QuoteRow {
    /// Volume truncated to whole shares for display.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn volume_shares(&self) -> u64 {
        if self.volume.is_finite() && self.volume > 0.0 {
            self.volume.trunc() as u64
        } else {
            0
        }
    }
}

/* ----- SERIES ----- */

/// Time-ordered quotes for one symbol at one granularity.
///
/// Rows are sorted strictly ascending by timestamp. The series cannot be mutated
/// after construction; a new fetch produces a new series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSeries {
    symbol: String,
    interval: Interval,
    rows: Vec<QuoteRow>,
}

impl QuoteSeries {
    /// Builds a series, sorting rows and collapsing duplicate timestamps.
    ///
    /// When two rows share a timestamp, the one appearing later in `rows` wins.
    pub fn new(symbol: impl Into<String>, interval: Interval, mut rows: Vec<QuoteRow>) -> Self {
        // Stable sort keeps input order among equal timestamps, so the last of
        // each run is the latest-inserted.
        rows.sort_by_key(|r| r.ts);
        let mut deduped: Vec<QuoteRow> = Vec::with_capacity(rows.len());
        for row in rows {
            match deduped.last_mut() {
                Some(prev) if prev.ts == row.ts => *prev = row,
                _ => deduped.push(row),
            }
        }
        Self {
            symbol: symbol.into(),
            interval,
            rows: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn rows(&self) -> &[QuoteRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&QuoteRow> {
        self.rows.first()
    }

    /// The most recent row.
    pub fn latest(&self) -> Option<&QuoteRow> {
        self.rows.last()
    }

    /// The last `n` rows (fewer if the series is shorter), oldest first.
    pub fn tail(&self, n: usize) -> &[QuoteRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteRow> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a QuoteSeries {
    type Item = &'a QuoteRow;
    type IntoIter = std::slice::Iter<'a, QuoteRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
