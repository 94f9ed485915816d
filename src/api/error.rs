//! Error types for the flashcard service client

use thiserror::Error;

use crate::deck::DeckError;

/// Errors that can occur when talking to the flashcard service
#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token stored
    #[error("Not logged in. Run `flashdeck login` first")]
    NotAuthenticated,

    /// Service rejected the access token or credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// Email address failed the format check
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Service error ({status}): {detail}")]
    ServiceError {
        /// HTTP status code
        status: u16,
        /// `detail` from the response body, or the raw body
        detail: String,
    },

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Card payload inside a response was malformed, or input failed validation
    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl ApiError {
    /// Check if this error is recoverable (user can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ApiError::RequestError(_) | ApiError::ServiceError { status: 500.., .. })
    }

    /// Check if this error requires logging in again
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::Unauthorized(_))
    }
}
