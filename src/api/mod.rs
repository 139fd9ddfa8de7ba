//! Backend API collaborator.
//!
//! # Data Flow
//! ```text
//! ConfigStore (first subscription)
//!     → ConfigApi::list_flow_descriptors / fetch_approval_config / fetch_ui_config
//!     → client.rs (reqwest GET + JSON decode)
//!     → models (wire → domain translation)
//! ```
//!
//! The store only depends on the `ConfigApi` trait so tests can swap in an
//! in-memory implementation.

use async_trait::async_trait;

pub mod client;
pub mod types;

pub use client::HttpApiClient;
pub use types::{ApiError, ApiFlowDescriptor, ApiResult};

use crate::models::{ApprovalConfig, UiConfig};

/// Server calls the config store relies on.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// List every flow descriptor known to the server.
    async fn list_flow_descriptors(&self) -> ApiResult<Vec<ApiFlowDescriptor>>;

    /// Fetch the approval workflow configuration.
    async fn fetch_approval_config(&self) -> ApiResult<ApprovalConfig>;

    /// Fetch the UI configuration.
    async fn fetch_ui_config(&self) -> ApiResult<UiConfig>;
}
