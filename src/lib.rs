//! intraday-dash: intraday quote fetcher and terminal dashboard.
//!
//! [`QuoteClient`] fetches the latest ~100 intraday bars for a ticker from an
//! Alpha Vantage compatible `query` endpoint, normalizes them into a
//! [`QuoteSeries`] sorted by time, and caches the result per symbol and interval
//! for one hour. [`dashboard`] turns a series into summary metrics, chart traces
//! and a preview table.
//!
//! ```no_run
//! # use intraday_dash::{Config, Interval, QuoteClient};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = Config::from_env()?;
//! let client = QuoteClient::from_config(&cfg)?;
//! let series = client.intraday("AAPL", Interval::I5m).await?;
//! if let Some(last) = series.latest() {
//!     println!("{} close {:.2}", last.ts, last.close);
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dashboard;
pub mod intraday;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::{
    CacheMode, Clock, Config, ConfigError, FetchError, Interval, ManualClock, NetworkError,
    QuoteClient, QuoteClientBuilder, QuoteRow, QuoteSeries, SystemClock,
};
pub use dashboard::{ChartMode, DashboardView};
pub use intraday::IntradayBuilder;
