//! HTTP client for the scheduling service.
//!
//! Every response (except `/api/health`) is wrapped in the uniform
//! envelope `{ success, data?, error? }`. Anything other than
//! `success: true` is a failure regardless of HTTP status code. Each call
//! is a single attempt with a bounded timeout — no retry, no backoff.

pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub use types::{
    Account, AccountDraft, AnalyticsSummary, AuthPayload, BestTime, Health, PlatformStats, Post,
    PostDraft, PostStatus, RegisterDraft, User,
};

/// Error taxonomy for API calls.
///
/// The UI shows `Rejected` messages verbatim (the server speaks for
/// itself) and maps everything else to an action-specific fallback.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The response body was not a valid envelope.
    #[error("invalid response body: {0}")]
    Body(#[source] reqwest::Error),
    /// The server answered with `success: false`.
    #[error("server rejected the request")]
    Rejected { message: Option<String> },
    /// `success: true` but the expected `data` field was absent.
    #[error("response envelope had no data")]
    MissingData,
}

impl ApiError {
    /// Returns the server-provided error message, if there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
            } => Some(message),
            _ => None,
        }
    }

    /// Returns the text to show the user: the server's message verbatim
    /// when present, otherwise the action-specific fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map_or_else(|| fallback.to_string(), ToString::to_string)
    }
}

/// The uniform response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    /// Informational text some success responses carry; not rendered.
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the envelope into its payload.
    ///
    /// # Errors
    /// Returns `Rejected` unless `success` is true, `MissingData` if the
    /// payload is absent.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.error,
            });
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Checks the envelope for success, discarding any payload.
    ///
    /// # Errors
    /// Returns `Rejected` unless `success` is true.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if !self.success {
            return Err(ApiError::Rejected {
                message: self.error,
            });
        }
        Ok(())
    }
}

/// Client for the scheduling-service REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given server origin.
    ///
    /// The timeout bounds the whole request (connect through body).
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the server origin this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// POST /api/auth/login
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let request = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }));
        self.execute("login", request).await
    }

    /// POST /api/auth/register
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn register(&self, draft: &RegisterDraft) -> Result<AuthPayload, ApiError> {
        let request = self.http.post(self.url("/api/auth/register")).json(draft);
        self.execute("register", request).await
    }

    /// GET /api/user/profile
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn profile(&self, token: &str) -> Result<User, ApiError> {
        let request = self.http.get(self.url("/api/user/profile")).bearer_auth(token);
        self.execute("profile", request).await
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// GET /api/posts
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn posts(&self, token: &str) -> Result<Vec<Post>, ApiError> {
        let request = self.http.get(self.url("/api/posts")).bearer_auth(token);
        self.execute("posts", request).await
    }

    /// POST /api/posts
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn schedule_post(&self, token: &str, draft: &PostDraft) -> Result<Post, ApiError> {
        let request = self
            .http
            .post(self.url("/api/posts"))
            .bearer_auth(token)
            .json(draft);
        self.execute("schedule_post", request).await
    }

    /// DELETE /api/posts/{id}
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete_post(&self, token: &str, post_id: i64) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.url(&format!("/api/posts/{post_id}")))
            .bearer_auth(token);
        self.execute_unit("delete_post", request).await
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    /// GET /api/analytics/summary?days=N
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn analytics_summary(
        &self,
        token: &str,
        days: u32,
    ) -> Result<AnalyticsSummary, ApiError> {
        let request = self
            .http
            .get(self.url("/api/analytics/summary"))
            .query(&[("days", days)])
            .bearer_auth(token);
        self.execute("analytics_summary", request).await
    }

    /// GET /api/analytics/best-times
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn best_times(&self, token: &str) -> Result<Vec<BestTime>, ApiError> {
        let request = self
            .http
            .get(self.url("/api/analytics/best-times"))
            .bearer_auth(token);
        self.execute("best_times", request).await
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// GET /api/accounts
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn accounts(&self, token: &str) -> Result<Vec<Account>, ApiError> {
        let request = self.http.get(self.url("/api/accounts")).bearer_auth(token);
        self.execute("accounts", request).await
    }

    /// POST /api/accounts
    ///
    /// # Errors
    /// Returns an error if the request fails or the server rejects it.
    pub async fn add_account(
        &self,
        token: &str,
        draft: &AccountDraft,
    ) -> Result<Account, ApiError> {
        let request = self
            .http
            .post(self.url("/api/accounts"))
            .bearer_auth(token)
            .json(draft);
        self.execute("add_account", request).await
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// GET /api/health — the one endpoint without the envelope.
    ///
    /// # Errors
    /// Returns an error if the request fails or the body is malformed.
    pub async fn health(&self) -> Result<Health, ApiError> {
        let response = self
            .http
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|source| {
                tracing::warn!(action = "health", error = %source, "request failed");
                ApiError::Transport(source)
            })?;
        response.json().await.map_err(|source| {
            tracing::warn!(action = "health", error = %source, "invalid response body");
            ApiError::Body(source)
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        action: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.fetch_envelope(action, request).await?.into_data()
    }

    async fn execute_unit(
        &self,
        action: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        self.fetch_envelope::<serde_json::Value>(action, request)
            .await?
            .into_unit()
    }

    async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        action: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let response = request.send().await.map_err(|source| {
            tracing::warn!(action, error = %source, "request failed");
            ApiError::Transport(source)
        })?;

        let status = response.status();
        let envelope: Envelope<T> = response.json().await.map_err(|source| {
            tracing::warn!(action, %status, error = %source, "invalid response body");
            ApiError::Body(source)
        })?;

        if !envelope.success {
            tracing::debug!(action, %status, error = ?envelope.error, "server rejected request");
        }
        Ok(envelope)
    }
}
