//! HTTP implementation of [`ConfigApi`].
//!
//! # Responsibilities
//! - Build request URLs from the configured base URL and prefix
//! - Apply connect/request timeouts
//! - Map non-success statuses and undecodable bodies to `ApiError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::types::{
    ApiConfigOption, ApiError, ApiFlowDescriptor, ApiListFlowDescriptorsResult, ApiResult,
};
use crate::api::ConfigApi;
use crate::config::ApiConfig;
use crate::models::approval::translate_approval_config;
use crate::models::{ApprovalConfig, UiConfig};

const FLOW_DESCRIPTORS_PATH: &str = "/flows/descriptors";
const APPROVAL_CONFIG_PATH: &str = "/config/Email.approval_optional_cc_address";
const UI_CONFIG_PATH: &str = "/config/ui";

/// reqwest-backed client for the config endpoints.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    url_prefix: String,
}

impl HttpApiClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let api = Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        };

        // Fail early on a base URL that can never work.
        api.url_for(FLOW_DESCRIPTORS_PATH)?;

        tracing::info!(base_url = %api.base_url, prefix = %api.url_prefix, "API client initialized");
        Ok(api)
    }

    /// Full URL for an API path.
    pub fn url_for(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}{}", self.base_url, self.url_prefix, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", raw, e)))
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let url = self.url_for(path)?;
        tracing::debug!(url = %url, "GET");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ConfigApi for HttpApiClient {
    async fn list_flow_descriptors(&self) -> ApiResult<Vec<ApiFlowDescriptor>> {
        let result: ApiListFlowDescriptorsResult = self.get_json(FLOW_DESCRIPTORS_PATH).await?;
        Ok(result.items)
    }

    async fn fetch_approval_config(&self) -> ApiResult<ApprovalConfig> {
        let option: ApiConfigOption = self.get_json(APPROVAL_CONFIG_PATH).await?;
        Ok(translate_approval_config(option))
    }

    async fn fetch_ui_config(&self) -> ApiResult<UiConfig> {
        self.get_json(UI_CONFIG_PATH).await
    }
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field("url_prefix", &self.url_prefix)
            .finish()
    }
}
