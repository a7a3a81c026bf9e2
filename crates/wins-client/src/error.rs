//! Error types for the wins API client.

use spiral::MilestoneInputError;
use thiserror::Error;

/// Errors returned by the wins client.
#[derive(Error, Debug)]
pub enum WinsError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error ({status}): {msg}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `msg` from the error body, or the raw body.
        msg: String,
    },

    /// No access token; log in first.
    #[error("not logged in")]
    Unauthenticated,

    /// Login or registration without an email or password.
    #[error("email and password are required")]
    MissingCredentials,

    /// Rejected user input.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] MilestoneInputError),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session or config file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),
}

impl WinsError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for wins client operations.
pub type Result<T> = std::result::Result<T, WinsError>;
