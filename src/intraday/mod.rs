mod assemble;
mod fetch;

use crate::core::cache::{CacheKey, CacheMode};
use crate::core::{FetchError, Interval, QuoteClient, QuoteSeries};

use assemble::assemble_rows;
use fetch::fetch_intraday;

/// A builder for fetching the intraday series of a single symbol.
///
/// The symbol is trimmed and upper-cased; no other validation happens locally.
/// An unknown ticker is reported by the provider as [`FetchError::Provider`].
///
/// # Example
///
/// ```no_run
/// # use intraday_dash::{IntradayBuilder, Interval, QuoteClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QuoteClient::builder().api_key("demo").build()?;
/// let series = IntradayBuilder::new(&client, "ibm")
///     .interval(Interval::I15m)
///     .fetch()
///     .await?;
/// println!("{} bars, last close {:?}", series.len(), series.latest().map(|r| r.close));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IntradayBuilder {
    #[doc(hidden)]
    pub(crate) client: QuoteClient,
    #[doc(hidden)]
    pub(crate) symbol: String,
    #[doc(hidden)]
    pub(crate) interval: Interval,
    #[doc(hidden)]
    pub(crate) cache_mode: CacheMode,
}

impl IntradayBuilder {
    /// Creates a new `IntradayBuilder` for a given symbol at the default `5min` interval.
    pub fn new(client: &QuoteClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into().trim().to_ascii_uppercase(),
            interval: Interval::default(),
            cache_mode: CacheMode::Use,
        }
    }

    /// Sets the sampling granularity.
    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the cache mode for this specific API call.
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Executes the request.
    ///
    /// A fresh cached series is returned without touching the network. Otherwise a
    /// single GET is issued; failures are returned as-is and leave the cache untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self),
            err,
            fields(symbol = %self.symbol, interval = %self.interval)
        )
    )]
    pub async fn fetch(self) -> Result<QuoteSeries, FetchError> {
        if self.symbol.is_empty() {
            return Err(FetchError::EmptySymbol);
        }
        let key = CacheKey::new(&self.symbol, self.interval);

        if self.cache_mode == CacheMode::Use
            && let Some(series) = self.client.cache_get(&key).await
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = series.len(), "serving intraday series from cache");
            return Ok(series);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("fetching intraday series from provider");

        // 1) One GET, shape classification
        let fetched = fetch_intraday(&self.client, &self.symbol, self.interval).await?;

        // 2) Coerce every entry, all or nothing
        let rows = assemble_rows(&fetched.entries)?;

        // 3) Sort + collapse duplicate timestamps
        let series = QuoteSeries::new(self.symbol, self.interval, rows);

        if self.cache_mode != CacheMode::Bypass {
            self.client.cache_put(key, series.clone()).await;
            #[cfg(feature = "tracing")]
            tracing::debug!(rows = series.len(), "stored intraday series in cache");
        }

        Ok(series)
    }
}
