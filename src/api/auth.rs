//! Access token management using system keyring

use keyring::Entry;
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ApiError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "flashdeck";
/// Entry name for the bearer token
const TOKEN_ENTRY: &str = "access-token";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Manages the bearer token in the system keyring
pub struct TokenStore;

impl TokenStore {
    fn entry() -> Result<Entry, ApiError> {
        Entry::new(SERVICE_NAME, TOKEN_ENTRY).map_err(|e| ApiError::KeyringError(e.to_string()))
    }

    /// Get the stored token
    pub fn get() -> Result<String, ApiError> {
        Self::entry()?.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => ApiError::NotAuthenticated,
            _ => ApiError::KeyringError(e.to_string()),
        })
    }

    /// Store a token after login
    pub fn set(token: &str) -> Result<(), ApiError> {
        Self::entry()?.set_password(token).map_err(|e| ApiError::KeyringError(e.to_string()))
    }

    /// Check if a token is stored
    pub fn is_authenticated() -> bool {
        Self::get().is_ok()
    }

    /// Delete the stored token; succeeds if none was stored
    pub fn clear() -> Result<(), ApiError> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ApiError::KeyringError(e.to_string())),
        }
    }

    /// Mask a token for display (show first and last 4 chars)
    pub fn mask(token: &str) -> String {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() <= 12 {
            return "*".repeat(chars.len());
        }
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    }
}

/// Check an email address before sending credentials
pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = email.trim();
    if EMAIL_RE.is_match(email) { Ok(email) } else { Err(ApiError::InvalidEmail(email.to_string())) }
}
