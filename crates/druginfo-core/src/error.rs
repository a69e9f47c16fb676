//! Error types for DrugInfo operations

use thiserror::Error;

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, DrugInfoError>;

/// Everything that can go wrong between a tool call and the upstream API.
///
/// Only [`DrugInfoError::Unauthorized`] is recoverable: the reauth wrapper
/// refreshes the session once and repeats the call. Every other variant is
/// surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum DrugInfoError {
    /// Local precondition failed before any request was made
    #[error("validation error: {0}")]
    Validation(String),

    /// Login endpoint rejected the credentials or could not be reached
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Upstream answered 401 to a data request
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream answered with some other non-success status
    #[error("DrugInfo API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport failure on a data request
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream body was not the JSON we expected
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl DrugInfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// True for the one error kind that triggers a re-login
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
