//! Flashcard service integration
//!
//! Provides token management, the HTTP client and the wire models for the
//! external service that generates and stores flashcard sets.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth::{TokenStore, validate_email};
pub use client::ApiClient;
pub use error::ApiError;
pub use models::{SaveSetResponse, Token, UserResponse};
