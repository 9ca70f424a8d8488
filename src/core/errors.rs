//! Custom error types for the provider and store gateways

use thiserror::Error;

/// Translation provider errors
///
/// Callers treat every variant the same way (the attempt failed); the
/// variants only exist to make the logged diagnostics useful.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Network, DNS or timeout failure
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Provider answered with a non-2xx status
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Body was not the expected envelope
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError::NetworkError {
            message: err.to_string(),
        }
    }
}

/// History store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable or transport failure
    #[error("Store unavailable: {message}")]
    Unavailable {
        message: String,
    },

    /// Store answered with a non-2xx status
    #[error("Store error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Store response could not be interpreted
    #[error("Malformed store response: {message}")]
    MalformedResponse {
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Unavailable {
            message: err.to_string(),
        }
    }
}

/// Result type for provider calls
pub type Result<T> = std::result::Result<T, TranslationError>;

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;
