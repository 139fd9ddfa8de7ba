//! Flow descriptor domain types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::types::ApiFlowDescriptor;

/// Describes a kind of flow that can be started on a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDescriptor {
    /// Unique flow name (e.g. "CollectFiles").
    pub name: String,
    /// Human-readable name, falls back to `name`.
    pub friendly_name: String,
    /// Category used to group flows in the UI.
    pub category: String,
    /// Flow documentation string.
    pub doc: String,
    /// Name of the flow's argument type.
    pub args_type: String,
    /// Whether the flow may not be scheduled as a hunt.
    pub block_hunt_creation: bool,
    /// Default arguments, opaque to this crate.
    pub default_args: Option<serde_json::Value>,
}

/// Flow descriptors indexed by flow name.
pub type FlowDescriptorMap = HashMap<String, FlowDescriptor>;

/// Translate a wire descriptor into the domain type.
pub fn translate_flow_descriptor(api: ApiFlowDescriptor) -> FlowDescriptor {
    let friendly_name = match api.friendly_name {
        Some(friendly) if !friendly.is_empty() => friendly,
        _ => api.name.clone(),
    };

    FlowDescriptor {
        name: api.name,
        friendly_name,
        category: api.category.unwrap_or_default(),
        doc: api.doc.unwrap_or_default(),
        args_type: api.args_type.unwrap_or_default(),
        block_hunt_creation: api.block_hunt_creation.unwrap_or(false),
        default_args: api.default_args,
    }
}

/// Index descriptors by name. A later duplicate replaces an earlier one.
pub fn index_by_name<I>(descriptors: I) -> FlowDescriptorMap
where
    I: IntoIterator<Item = FlowDescriptor>,
{
    descriptors
        .into_iter()
        .map(|fd| (fd.name.clone(), fd))
        .collect()
}
