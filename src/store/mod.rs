//! Cached server configuration.
//!
//! # Data Flow
//! ```text
//! consumer → ConfigFacade::flow_descriptors() / approval_config() / ui_config()
//!     → ResourceCache::subscribe (first call spawns the fetch)
//!     → ConfigApi call → translation → watch channel
//!     → every Subscription sees the cached value
//! ```

pub mod facade;
pub mod resource;
pub mod state;

pub use facade::{ConfigFacade, ConfigStore};
pub use resource::{ResourceCache, ResourceState, Subscription};
pub use state::{ConfigState, LoadStates};
