//! Error types for the feed API client.

use thiserror::Error;

/// Feed API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API request failed (transient, retryable)
    #[error("API request failed (transient): {0}")]
    ApiTransient(String),

    /// API request failed (permanent)
    #[error("API request failed: {0}")]
    Api(String),

    /// Network timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration error (bad base URL, bad timeout)
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Underlying HTTP error not covered by the cases above
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this error is retryable (transient network/API issues).
    ///
    /// Every retryable error recovers through the normal poll cycle; nothing
    /// at this layer is fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::ApiTransient(_) | ApiError::Timeout(_) | ApiError::ConnectionFailed(_) => {
                true
            }
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Check if this error is network-related.
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout(_) | ApiError::ConnectionFailed(_) | ApiError::Http(_)
        )
    }

    /// One-sentence message suitable for the error banner.
    pub fn friendly_message(&self) -> String {
        match self {
            ApiError::ApiTransient(msg) => format!("Temporary API issue: {msg}"),
            ApiError::Timeout(_) => "Request timed out. Check your connection.".to_string(),
            ApiError::ConnectionFailed(_) => "Connection failed. Check your network.".to_string(),
            ApiError::InvalidResponse(_) => "The server returned unexpected data.".to_string(),
            ApiError::Api(msg) => msg.clone(),
            ApiError::Config(msg) => format!("Configuration error: {msg}"),
            ApiError::Http(e) if e.is_timeout() => {
                "Request timed out. Check your connection.".to_string()
            }
            ApiError::Http(e) if e.is_connect() => {
                "Could not connect. Check your network.".to_string()
            }
            ApiError::Http(_) => format!("Error: {self}"),
        }
    }

    /// Classify an HTTP status code into the appropriate error type.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            408 | 429 => ApiError::ApiTransient(format!("HTTP {status}: {body}")),
            500 | 502 | 503 | 504 => {
                ApiError::ApiTransient(format!("Server error ({status}): {body}"))
            }
            _ => ApiError::Api(format!("HTTP {status}: {body}")),
        }
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
