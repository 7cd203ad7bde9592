//! Runtime configuration resolved once from the environment.

use std::time::Duration;

use url::Url;

use crate::core::client::constants::{
    DEFAULT_BASE_QUERY, DEFAULT_CACHE_TTL, DEFAULT_SYMBOLS, DEFAULT_TIMEOUT,
};
use crate::core::error::ConfigError;
use crate::core::models::Interval;

pub const ENV_API_KEY: &str = "ALPHAVANTAGE_API_KEY";
pub const ENV_BASE_URL: &str = "ALPHAVANTAGE_BASE_URL";
pub const ENV_SYMBOLS: &str = "INTRADAY_DASH_SYMBOLS";
pub const ENV_INTERVAL: &str = "INTRADAY_DASH_INTERVAL";
pub const ENV_TIMEOUT_SECS: &str = "INTRADAY_DASH_TIMEOUT_SECS";
pub const ENV_CACHE_TTL_SECS: &str = "INTRADAY_DASH_CACHE_TTL_SECS";

/// Everything a [`QuoteClient`](crate::QuoteClient) and the dashboard need to run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub base_url: Url,
    /// Symbols offered to the user when none is given.
    pub default_symbols: Vec<String>,
    pub default_interval: Interval,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Config {
    /// Resolves configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] when no key is set, or
    /// [`ConfigError::InvalidValue`] for an unparsable optional variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;

        let base_url = match get(ENV_BASE_URL) {
            Some(raw) => Url::parse(&raw).map_err(|_| invalid(ENV_BASE_URL, &raw))?,
            None => Url::parse(DEFAULT_BASE_QUERY)
                .map_err(|_| invalid(ENV_BASE_URL, DEFAULT_BASE_QUERY))?,
        };

        let default_symbols = match get(ENV_SYMBOLS) {
            Some(raw) => {
                let syms = parse_symbols(&raw);
                if syms.is_empty() {
                    return Err(invalid(ENV_SYMBOLS, &raw));
                }
                syms
            }
            None => DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
        };

        let default_interval = match get(ENV_INTERVAL) {
            Some(raw) => raw.parse().map_err(|_| invalid(ENV_INTERVAL, &raw))?,
            None => Interval::default(),
        };

        let timeout = secs_or(get(ENV_TIMEOUT_SECS), ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT)?;
        let cache_ttl =
            secs_or(get(ENV_CACHE_TTL_SECS), ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL)?;

        Ok(Self {
            api_key,
            base_url,
            default_symbols,
            default_interval,
            timeout,
            cache_ttl,
        })
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn secs_or(raw: Option<String>, name: &str, default: Duration) -> Result<Duration, ConfigError> {
    match raw {
        Some(v) => v
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| invalid(name, &v)),
        None => Ok(default),
    }
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
