//! Config store and its public facade.
//!
//! The store owns one [`ResourceCache`] per server resource. The three caches
//! are independent: subscribing to one never loads another.

use std::sync::Arc;

use crate::api::ConfigApi;
use crate::models::flow::{index_by_name, translate_flow_descriptor};
use crate::models::{ApprovalConfig, FlowDescriptorMap, UiConfig};
use crate::store::resource::{ResourceCache, Subscription};
use crate::store::state::{ConfigState, LoadStates};

/// Owns the cached server configuration.
#[derive(Debug)]
pub struct ConfigStore {
    flow_descriptors: ResourceCache<FlowDescriptorMap>,
    approval_config: ResourceCache<ApprovalConfig>,
    ui_config: ResourceCache<UiConfig>,
}

impl ConfigStore {
    /// Build a store on top of an API collaborator. Nothing is fetched yet.
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        let flow_api = Arc::clone(&api);
        let flow_descriptors = ResourceCache::new("flow_descriptors", move || {
            let api = Arc::clone(&flow_api);
            async move {
                let descriptors = api.list_flow_descriptors().await?;
                Ok(index_by_name(
                    descriptors.into_iter().map(translate_flow_descriptor),
                ))
            }
        });

        let approval_api = Arc::clone(&api);
        let approval_config = ResourceCache::new("approval_config", move || {
            let api = Arc::clone(&approval_api);
            async move { api.fetch_approval_config().await }
        });

        let ui_config = ResourceCache::new("ui_config", move || {
            let api = Arc::clone(&api);
            async move { api.fetch_ui_config().await }
        });

        Self {
            flow_descriptors,
            approval_config,
            ui_config,
        }
    }

    /// Cache of flow descriptors keyed by name.
    pub fn flow_descriptors(&self) -> &ResourceCache<FlowDescriptorMap> {
        &self.flow_descriptors
    }

    /// Cache of the approval configuration.
    pub fn approval_config(&self) -> &ResourceCache<ApprovalConfig> {
        &self.approval_config
    }

    /// Cache of the UI configuration.
    pub fn ui_config(&self) -> &ResourceCache<UiConfig> {
        &self.ui_config
    }

    /// Snapshot of the cached values. Does not trigger any load.
    pub fn state(&self) -> ConfigState {
        ConfigState {
            flow_descriptors: self.flow_descriptors.current(),
            approval_config: self.approval_config.current(),
            ui_config: self.ui_config.current(),
        }
    }

    /// Load state of each resource.
    pub fn load_states(&self) -> LoadStates {
        LoadStates {
            flow_descriptors: self.flow_descriptors.state(),
            approval_config: self.approval_config.state(),
            ui_config: self.ui_config.state(),
        }
    }
}

/// Handle for retrieving general purpose configuration from the backend.
///
/// Construct one per application session and clone it into consumers; every
/// clone shares the same store.
#[derive(Debug, Clone)]
pub struct ConfigFacade {
    store: Arc<ConfigStore>,
}

impl ConfigFacade {
    /// Build a facade over a fresh store.
    pub fn new(api: Arc<dyn ConfigApi>) -> Self {
        Self::from_store(Arc::new(ConfigStore::new(api)))
    }

    /// Wrap an existing shared store.
    pub fn from_store(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    /// Available flow descriptors, keyed by flow name.
    pub fn flow_descriptors(&self) -> Subscription<FlowDescriptorMap> {
        self.store.flow_descriptors().subscribe()
    }

    /// Approval workflow configuration.
    pub fn approval_config(&self) -> Subscription<ApprovalConfig> {
        self.store.approval_config().subscribe()
    }

    /// UI configuration.
    pub fn ui_config(&self) -> Subscription<UiConfig> {
        self.store.ui_config().subscribe()
    }

    /// The underlying store, for snapshots and load states.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiFlowDescriptor, ApiResult};
    use crate::store::resource::ResourceState;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    const WINDOW: Duration = Duration::from_millis(100);

    /// In-memory API whose flow listing waits on a gate and whose UI config
    /// can be made to hang forever.
    #[derive(Default)]
    struct MockApi {
        flow_calls: AtomicUsize,
        approval_calls: AtomicUsize,
        ui_calls: AtomicUsize,
        flow_gate: Notify,
        ui_hangs: bool,
    }

    #[async_trait]
    impl ConfigApi for MockApi {
        async fn list_flow_descriptors(&self) -> ApiResult<Vec<ApiFlowDescriptor>> {
            self.flow_calls.fetch_add(1, Ordering::SeqCst);
            self.flow_gate.notified().await;
            Ok(["CollectFiles", "ListProcesses"]
                .iter()
                .map(|name| ApiFlowDescriptor {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect())
        }

        async fn fetch_approval_config(&self) -> ApiResult<ApprovalConfig> {
            self.approval_calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Status {
                status: 500,
                path: "/config/Email.approval_optional_cc_address".to_string(),
                body: String::new(),
            })
        }

        async fn fetch_ui_config(&self) -> ApiResult<UiConfig> {
            self.ui_calls.fetch_add(1, Ordering::SeqCst);
            if self.ui_hangs {
                std::future::pending::<()>().await;
            }
            Ok(UiConfig {
                heading: Some("Test".to_string()),
                ..Default::default()
            })
        }
    }

    fn facade(api: MockApi) -> (ConfigFacade, Arc<MockApi>) {
        let api = Arc::new(api);
        (ConfigFacade::new(api.clone()), api)
    }

    #[tokio::test]
    async fn concurrent_flow_subscribers_share_one_fetch() {
        let (facade, api) = facade(MockApi::default());

        let mut first = facade.flow_descriptors();
        let mut second = facade.clone().flow_descriptors();
        let a = tokio::spawn(async move { first.next().await });
        let b = tokio::spawn(async move { second.next().await });

        api.flow_gate.notify_one();
        let expected: HashSet<&str> = ["CollectFiles", "ListProcesses"].into_iter().collect();
        for handle in [a, b] {
            let map = handle.await.unwrap().unwrap();
            let keys: HashSet<&str> = map.keys().map(String::as_str).collect();
            assert_eq!(keys, expected);
        }
        assert_eq!(api.flow_calls.load(Ordering::SeqCst), 1);
        assert_eq!(map_friendly_name(&facade, "CollectFiles"), "CollectFiles");
    }

    fn map_friendly_name(facade: &ConfigFacade, name: &str) -> String {
        let state = facade.store().state();
        state.flow_descriptors.unwrap()[name].friendly_name.clone()
    }

    #[tokio::test]
    async fn resources_load_independently() {
        let (facade, api) = facade(MockApi::default());

        let ui = facade.ui_config().next().await.unwrap();
        assert_eq!(ui.heading.as_deref(), Some("Test"));

        assert_eq!(api.ui_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.flow_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.approval_calls.load(Ordering::SeqCst), 0);

        let states = facade.store().load_states();
        assert_eq!(states.ui_config, ResourceState::Loaded);
        assert_eq!(states.flow_descriptors, ResourceState::Unloaded);
        assert_eq!(states.approval_config, ResourceState::Unloaded);

        let snapshot = facade.store().state();
        assert!(snapshot.ui_config.is_some());
        assert!(snapshot.flow_descriptors.is_none());
        assert!(!snapshot.is_complete());
    }

    #[tokio::test]
    async fn hanging_ui_config_never_emits() {
        let (facade, api) = facade(MockApi {
            ui_hangs: true,
            ..Default::default()
        });

        let mut sub = facade.ui_config();
        assert!(timeout(WINDOW, sub.next()).await.is_err());
        assert_eq!(api.ui_calls.load(Ordering::SeqCst), 1);
        assert_eq!(facade.store().ui_config().state(), ResourceState::Loading);
    }

    #[tokio::test]
    async fn failed_approval_config_stays_silent() {
        let (facade, api) = facade(MockApi::default());

        let mut sub = facade.approval_config();
        assert!(timeout(WINDOW, sub.next()).await.is_err());
        assert_eq!(facade.store().approval_config().state(), ResourceState::Failed);

        let mut again = facade.approval_config();
        assert!(timeout(WINDOW, again.next()).await.is_err());
        assert_eq!(api.approval_calls.load(Ordering::SeqCst), 1);
    }
}
