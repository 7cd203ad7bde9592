//! Centralized constants for default endpoints, UA and limits.

use std::time::Duration;

/// Identifies the client to the provider.
pub(crate) const USER_AGENT: &str = concat!("intraday-dash/", env!("CARGO_PKG_VERSION"));

/// Provider query endpoint; every request is a GET with query parameters.
pub(crate) const DEFAULT_BASE_QUERY: &str = "https://www.alphavantage.co/query";

/// Intraday time-series function name.
pub(crate) const FUNCTION_INTRADAY: &str = "TIME_SERIES_INTRADAY";

/// `compact` yields the most recent ~100 samples.
pub(crate) const OUTPUT_SIZE_COMPACT: &str = "compact";

/// Bounded request timeout so a stuck call cannot block forever.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Freshness window for cached series.
pub(crate) const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Symbols offered when the user has not typed one.
pub(crate) const DEFAULT_SYMBOLS: [&str; 10] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "NFLX", "SBUX", "VZ", "JPM",
];
