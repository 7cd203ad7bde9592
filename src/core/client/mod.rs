//! Public client surface + builder.
//! Defaults live in `constants`; the cache lives in [`crate::core::cache`].

pub(crate) mod constants;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::cache::{CacheKey, Clock, QuoteCache, SystemClock};
use crate::core::config::Config;
use crate::core::error::ConfigError;
use crate::core::models::{Interval, QuoteSeries};
use crate::core::FetchError;
use crate::intraday::IntradayBuilder;
use constants::{DEFAULT_BASE_QUERY, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT, USER_AGENT};

pub use crate::core::cache::CacheMode;

/// Client for the provider's query endpoint.
///
/// Cloning is cheap; clones share the HTTP connection pool and the quote cache.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_query: Url,
    api_key: String,
    cache: Arc<QuoteCache>,
}

impl QuoteClient {
    /// Create a new builder.
    pub fn builder() -> QuoteClientBuilder {
        QuoteClientBuilder::default()
    }

    /// Build a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn from_config(cfg: &Config) -> Result<Self, FetchError> {
        Self::builder()
            .api_key(cfg.api_key.clone())
            .base_query(cfg.base_url.clone())
            .timeout(cfg.timeout)
            .cache_ttl(cfg.cache_ttl)
            .build()
    }

    /// Fetch the intraday series for `symbol` at `interval`, serving from cache when fresh.
    ///
    /// Shorthand for `IntradayBuilder::new(self, symbol).interval(interval).fetch()`.
    ///
    /// # Errors
    ///
    /// See [`FetchError`] for the failure taxonomy.
    pub async fn intraday(
        &self,
        symbol: impl Into<String>,
        interval: Interval,
    ) -> Result<QuoteSeries, FetchError> {
        IntradayBuilder::new(self, symbol)
            .interval(interval)
            .fetch()
            .await
    }

    /// The shared quote cache.
    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_query(&self) -> &Url {
        &self.base_query
    }
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) async fn cache_get(&self, key: &CacheKey) -> Option<QuoteSeries> {
        self.cache.get(key).await
    }

    pub(crate) async fn cache_put(&self, key: CacheKey, series: QuoteSeries) {
        self.cache.put(key, series).await;
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct QuoteClientBuilder {
    api_key: Option<String>,
    user_agent: Option<String>,
    base_query: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    clock: Option<Arc<dyn Clock>>,
}

impl QuoteClientBuilder {
    /// Set the access credential sent as the `apikey` query parameter.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the query endpoint (e.g., `https://www.alphavantage.co/query`).
    pub fn base_query(mut self, url: Url) -> Self {
        self.base_query = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: 10 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Freshness window for cached series. Default: one hour.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Replace the clock used for cache freshness.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] (wrapped) if no key was set, or an HTTP
    /// error if the underlying client cannot be built.
    pub fn build(self) -> Result<QuoteClient, FetchError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let base_query = match self.base_query {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUERY)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = Arc::new(QuoteCache::new(
            self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
            clock,
        ));

        Ok(QuoteClient {
            http,
            base_query,
            api_key,
            cache,
        })
    }
}
