//! UI-level configuration.

use serde::{Deserialize, Serialize};

/// UI feature configuration served by the backend.
///
/// Every field is optional; fields this crate does not know about are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiConfig {
    pub heading: Option<String>,
    pub report_url: Option<String>,
    pub help_url: Option<String>,
    pub grr_version: Option<String>,
    pub profile_image_url: Option<String>,
    /// Default runner arguments for new hunts.
    pub default_hunt_runner_args: Option<serde_json::Value>,
    pub hunt_config: Option<serde_json::Value>,
    pub client_warnings: Option<serde_json::Value>,
    /// Access durations are sent as stringified integers.
    pub default_access_duration_seconds: Option<String>,
    pub max_access_duration_seconds: Option<String>,
}
