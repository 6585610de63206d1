//! Error types for medassist-api

use thiserror::Error;

/// Result type alias using medassist-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the dialogue backend
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection refused, reset, client-side timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend answered with a non-success status and no usable body
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response parsed but lacks the fields the dialogue needs
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Check if this error came from a client-side timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the backend was reachable but spoke an unexpected shape
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_) | Error::Json(_))
    }
}
