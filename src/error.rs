// src/error.rs

//! Unified error handling for the board client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for board client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// No access token is available for an authenticated call
    #[error("authentication required")]
    Unauthenticated,

    /// Filter value that the board endpoint does not accept
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Response body is not a valid envelope
    #[error("server response is not in the expected format")]
    MalformedResponse,

    /// HTTP failure status or an envelope with `success = false`
    #[error("{message}")]
    RequestRejected { status: u16, message: String },

    /// Request did not finish within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an invalid filter error.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter(message.into())
    }

    /// Create a rejected request error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::RequestRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
