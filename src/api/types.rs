//! Wire types and error definitions for the config API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flow descriptor as returned by `GET /flows/descriptors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFlowDescriptor {
    pub name: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub args_type: Option<String>,
    #[serde(default)]
    pub default_args: Option<serde_json::Value>,
    #[serde(default)]
    pub block_hunt_creation: Option<bool>,
}

/// Envelope of the flow descriptor listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiListFlowDescriptorsResult {
    #[serde(default)]
    pub items: Vec<ApiFlowDescriptor>,
}

/// A single server config option (`GET /config/<name>`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfigOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Errors raised while talking to the config API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Server returned status {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// Body could not be decoded.
    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    /// Base URL and path could not be joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Convenience result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
