//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. All errors are collected
//! rather than stopping at the first one.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("api.url_prefix '{0}' must start with '/'")]
    InvalidUrlPrefix(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let api = &config.api;

    match Url::parse(&api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(api.base_url.clone())),
    }

    if !api.url_prefix.is_empty() && !api.url_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidUrlPrefix(api.url_prefix.clone()));
    }

    if api.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("api.connect_timeout_secs"));
    }
    if api.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("api.request_timeout_secs"));
    }

    let obs = &config.observability;
    if !LOG_LEVELS.contains(&obs.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(obs.log_level.clone()));
    }

    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://files.local".to_string();
        config.api.url_prefix = "api".to_string();
        config.api.request_timeout_secs = 0;
        config.observability.log_level = "verbose".to_string();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroTimeout("api.request_timeout_secs")));
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = ClientConfig::default();
        config.observability.metrics_address = "nonsense".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
