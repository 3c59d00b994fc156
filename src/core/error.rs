//! Error types for rate acquisition and conversion

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    /// The feed could not be reached or answered with a non-success status.
    #[error("Rate source unavailable: {0}")]
    SourceUnavailable(String),

    /// The feed answered but its body could not be turned into a rate table.
    #[error("Failed to parse rate feed: {0}")]
    ParseError(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Rate for {0} is zero")]
    ZeroRate(String),

    #[error("Invalid rate {rate} for currency {code}")]
    InvalidRate { code: String, rate: f64 },
}

pub type Result<T> = std::result::Result<T, FxError>;
