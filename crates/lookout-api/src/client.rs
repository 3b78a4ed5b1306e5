//! The feed API client.
//!
//! [`ApiClient`] wraps a configured reqwest client and exposes one async
//! fetch per remote endpoint. The sync layer treats these as black boxes: a
//! future that yields a full snapshot or fails with an [`ApiError`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lookout_core::config::ApiConfig;
use lookout_core::types::{AgentStatus, BlogPost, ThreadedItem};

use crate::board::BoardHealth;
use crate::error::{ApiError, Result};

/// Response payload of `GET /api/agents/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatusResponse {
    /// Full agent roster; replaces the previous snapshot wholesale
    pub agents: Vec<AgentStatus>,
}

/// Response payload of `GET /api/activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// Full item snapshot for this origin
    pub items: Vec<ThreadedItem>,
}

/// Response payload of `GET /api/blog/posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPostsResponse {
    /// All posts, newest first as served
    pub posts: Vec<BlogPost>,
}

/// HTTP client for the feed API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the agent status snapshot.
    pub async fn fetch_agent_status(&self) -> Result<AgentStatusResponse> {
        self.get_json("/api/agents/status").await
    }

    /// Fetch the activity feed snapshot.
    pub async fn fetch_activity(&self) -> Result<ActivityResponse> {
        self.get_json("/api/activity").await
    }

    /// Fetch board health counters.
    pub async fn fetch_board_health(&self) -> Result<BoardHealth> {
        self.get_json("/api/board/health").await
    }

    /// Fetch the blog post list.
    pub async fn fetch_blog_posts(&self) -> Result<BlogPostsResponse> {
        self.get_json("/api/blog/posts").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_http_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Fold reqwest transport failures into the client's taxonomy.
fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(e.to_string())
    } else if e.is_connect() {
        ApiError::ConnectionFailed(e.to_string())
    } else {
        ApiError::Http(e)
    }
}
