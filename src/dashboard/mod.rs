//! View model for the quote dashboard.
//!
//! Turns a [`QuoteSeries`] into what a front end shows: headline metrics from the
//! latest bar, a price trace (candlesticks or a close-price line), an optional
//! volume trace meant for a secondary axis, and a short preview of recent rows.

mod render;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::{ConfigError, QuoteRow, QuoteSeries};

pub use render::{format_price, format_volume, render_text};

/// Rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Candlestick,
    /// Close price only.
    Line,
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartMode::Candlestick => "candlestick",
            ChartMode::Line => "line",
        })
    }
}

impl FromStr for ChartMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candlestick" | "candles" | "candle" => Ok(ChartMode::Candlestick),
            "line" | "close" => Ok(ChartMode::Line),
            _ => Err(ConfigError::InvalidValue {
                name: "chart".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// Headline metrics of the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Summary {
    /// `None` for an empty series.
    pub fn from_series(series: &QuoteSeries) -> Option<Self> {
        series.latest().map(|r| Self {
            ts: r.ts,
            open: r.open,
            high: r.high,
            low: r.low,
            close: r.close,
            volume: r.volume_shares(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub ts: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub ts: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VolumeBar {
    pub ts: NaiveDateTime,
    pub shares: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum PriceTrace {
    Candles(Vec<Candle>),
    Line(Vec<Point>),
}

impl PriceTrace {
    pub fn len(&self) -> usize {
        match self {
            PriceTrace::Candles(c) => c.len(),
            PriceTrace::Line(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chart data over the full series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub mode: ChartMode,
    pub price: PriceTrace,
    /// Present only when the volume overlay is enabled. Drawn on a secondary scale from zero.
    pub volume: Option<Vec<VolumeBar>>,
}

impl ChartData {
    pub fn build(series: &QuoteSeries, mode: ChartMode, show_volume: bool) -> Self {
        let price = match mode {
            ChartMode::Candlestick => PriceTrace::Candles(
                series
                    .iter()
                    .map(|r| Candle {
                        ts: r.ts,
                        open: r.open,
                        high: r.high,
                        low: r.low,
                        close: r.close,
                    })
                    .collect(),
            ),
            ChartMode::Line => PriceTrace::Line(
                series
                    .iter()
                    .map(|r| Point {
                        ts: r.ts,
                        value: r.close,
                    })
                    .collect(),
            ),
        };
        let volume = show_volume.then(|| {
            series
                .iter()
                .map(|r| VolumeBar {
                    ts: r.ts,
                    shares: r.volume_shares(),
                })
                .collect()
        });
        Self {
            mode,
            price,
            volume,
        }
    }
}

/// Everything the dashboard page renders for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub symbol: String,
    pub interval: String,
    pub summary: Option<Summary>,
    pub chart: ChartData,
    pub preview: Vec<QuoteRow>,
}

impl DashboardView {
    pub fn build(series: &QuoteSeries, mode: ChartMode, show_volume: bool) -> Self {
        Self {
            symbol: series.symbol().to_string(),
            interval: series.interval().to_string(),
            summary: Summary::from_series(series),
            chart: ChartData::build(series, mode, show_volume),
            preview: series.tail(PREVIEW_ROWS).to_vec(),
        }
    }
}
