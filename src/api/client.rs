//! HTTP client for the flashcard service

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::models::{
    GenerateRequest, HealthResponse, LoginRequest, SaveSetRequest, SaveSetResponse, SignupRequest,
    Token, UserResponse, error_detail,
};
use crate::config::Config;
use crate::deck::{Card, FlashcardSet, GenerationResponse, SavedSetRecord, encode_cards};

/// Flashcard service client
pub struct ApiClient {
    /// HTTP client
    client: Client,
    /// Service base URL, without trailing slash
    base_url: String,
    /// Bearer token for authenticated endpoints
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given service URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, token: None })
    }

    /// Create a client from the application config
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, Duration::from_secs(config.request_timeout_secs))
    }

    /// Attach a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Map non-success statuses to errors
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Unauthorized(error_detail(&body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ServiceError { status: status.as_u16(), detail: error_detail(&body) });
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Register a new account
    pub async fn signup(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        tracing::info!("Creating account for {}", email);
        let response = self
            .client
            .post(self.url("/signup"))
            .json(&SignupRequest { email, username, password })
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        tracing::info!("Logging in as {}", email);
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Ask the service to generate cards from free-form text
    pub async fn generate(&self, text: &str) -> Result<Vec<Card>, ApiError> {
        tracing::info!(chars = text.chars().count(), "Requesting flashcard generation");
        let request = self.client.post(self.url("/generate")).json(&GenerateRequest { text });
        let response = self.authorized(request)?.send().await?;
        let generated: GenerationResponse = Self::parse(response).await?;
        tracing::info!(cards = generated.flashcards.len(), "Generation finished");
        Ok(generated.flashcards)
    }

    /// Save a named set of cards; returns the new set's id
    pub async fn save_set(&self, topic: &str, cards: &[Card]) -> Result<SaveSetResponse, ApiError> {
        tracing::info!(cards = cards.len(), topic, "Saving flashcard set");
        let body = SaveSetRequest { topic, flashcards_json: encode_cards(cards)? };
        let request = self.client.post(self.url("/save-flashcards/")).json(&body);
        let response = self.authorized(request)?.send().await?;
        Self::parse(response).await
    }

    /// List the current user's saved sets
    pub async fn list_sets(&self) -> Result<Vec<FlashcardSet>, ApiError> {
        let request = self.client.get(self.url("/my-flashcards/"));
        let response = self.authorized(request)?.send().await?;
        let records: Vec<SavedSetRecord> = Self::parse(response).await?;
        tracing::info!(sets = records.len(), "Loaded saved sets");

        records
            .into_iter()
            .map(|record| FlashcardSet::try_from(record).map_err(ApiError::from))
            .collect()
    }

    /// Fetch one saved set by id
    pub async fn get_set(&self, id: i64) -> Result<Option<FlashcardSet>, ApiError> {
        Ok(self.list_sets().await?.into_iter().find(|set| set.id == id))
    }

    /// Check the service is reachable
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.client.get(self.url("/")).send().await?;
        Self::parse(response).await
    }
}
