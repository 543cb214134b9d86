use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur while talking to the archive API.
/// `Clone` so a single in-flight result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON shape we expected.
    Parse(String),
}

impl ApiError {
    /// Generic text for the user. The detail belongs in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Api { status: 404, .. } => "That item could not be found.",
            _ => "Could not load content. Check your connection and try again.",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Raw JSON transport. Paths are relative to the API base, e.g. `/categories`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the base URL requests are made against.
    fn base_url(&self) -> &str;

    /// GETs `path` and returns the decoded JSON body.
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;
}
