//! Approval workflow configuration.

use serde::{Deserialize, Serialize};

use crate::api::types::ApiConfigOption;

/// Approval policy advertised by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalConfig {
    /// Address always offered as an optional CC on approval requests.
    pub optional_cc_email: Option<String>,
}

/// Translate the `Email.approval_optional_cc_address` option.
///
/// The server wraps scalar options as `{"@type": ..., "value": "..."}`; a bare
/// string is accepted too. Empty strings count as unset.
pub fn translate_approval_config(option: ApiConfigOption) -> ApprovalConfig {
    let optional_cc_email = option
        .value
        .as_ref()
        .and_then(|value| match value {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(obj) => obj.get("value").and_then(|v| v.as_str()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ApprovalConfig { optional_cc_email }
}
