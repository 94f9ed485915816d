//! Request and response bodies for the flashcard service

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /signup`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Account returned by a successful signup
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

/// Access token returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `POST /generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub text: &'a str,
}

/// Body of `POST /save-flashcards/`
#[derive(Debug, Clone, Serialize)]
pub struct SaveSetRequest<'a> {
    pub topic: &'a str,
    /// Cards serialized as a JSON array string
    pub flashcards_json: String,
}

/// Reply to a successful save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSetResponse {
    pub message: String,
    pub id: i64,
}

/// Reply from the service health check
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// FastAPI-style error body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

/// Pull a human-readable message out of an error response body
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: serde_json::Value::String(s) }) => s,
        // Validation errors come back as a list of objects with a `msg` field
        Ok(ErrorBody { detail: serde_json::Value::Array(items) }) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
