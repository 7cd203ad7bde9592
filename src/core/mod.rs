//! Core components of the `intraday-dash` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`QuoteClient`] and its builder.
//! - The primary [`FetchError`] type.
//! - The quote data model ([`QuoteRow`], [`QuoteSeries`], [`Interval`]).
//! - The TTL cache and runtime configuration.

/// The main client (`QuoteClient`), builder, and defaults.
pub mod client;
/// Runtime configuration resolved from the environment.
pub mod config;
/// The error types (`FetchError`, `NetworkError`, `ConfigError`).
pub mod error;
/// In-memory TTL cache keyed by symbol and interval.
pub mod cache;
/// Quote rows, series and intervals.
pub mod models;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::QuoteClient`
pub use cache::{CacheMode, Clock, ManualClock, SystemClock};
pub use client::{QuoteClient, QuoteClientBuilder};
pub use config::Config;
pub use error::{ConfigError, FetchError, NetworkError};
pub use models::{Interval, QuoteRow, QuoteSeries};
