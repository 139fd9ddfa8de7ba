//! Point-in-time view of the config store.

use std::sync::Arc;

use serde::Serialize;

use crate::models::{ApprovalConfig, FlowDescriptorMap, UiConfig};
use crate::store::resource::ResourceState;

/// Snapshot of every cached resource. Unloaded resources are `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigState {
    pub flow_descriptors: Option<Arc<FlowDescriptorMap>>,
    pub approval_config: Option<Arc<ApprovalConfig>>,
    pub ui_config: Option<Arc<UiConfig>>,
}

impl ConfigState {
    /// True once all three resources hold a value.
    pub fn is_complete(&self) -> bool {
        self.flow_descriptors.is_some() && self.approval_config.is_some() && self.ui_config.is_some()
    }
}

/// Load state of each resource, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStates {
    pub flow_descriptors: ResourceState,
    pub approval_config: ResourceState,
    pub ui_config: ResourceState,
}
