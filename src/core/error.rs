use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Every variant is terminal for the fetch that produced it; nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a successful HTTP response.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The provider answered with an explicit `"Error Message"` payload (e.g. unknown symbol).
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered with an advisory payload, usually a rate limit notice.
    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    /// The body did not match any known response shape. Carries the raw payload.
    #[error("unexpected response from provider: {0}")]
    UnexpectedResponse(String),

    /// A time-series entry could not be coerced into a quote row.
    #[error("malformed data at {timestamp:?}: {reason}")]
    MalformedData {
        /// The raw timestamp key of the offending entry.
        timestamp: String,
        /// What failed to parse.
        reason: String,
    },

    /// The symbol was empty after trimming.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// A provided URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Client configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FetchError {
    /// True for transport failures and non-success HTTP statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    /// True when the provider asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited(_))
    }
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection, TLS, timeout or body read failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The requested URL with the credential redacted.
        url: String,
    },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Network(NetworkError::Transport(e))
    }
}

/// Errors raised while resolving [`Config`](crate::core::config::Config).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No access credential was supplied.
    #[error("missing API key (set ALPHAVANTAGE_API_KEY)")]
    MissingApiKey,

    /// A variable was present but could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Variable name.
        name: String,
        /// Raw value.
        value: String,
    },
}
