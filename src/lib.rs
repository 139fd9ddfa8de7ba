//! Cached, observable access to server-side configuration.

pub mod api;
pub mod config;
pub mod models;
pub mod observability;
pub mod store;

pub use api::{ConfigApi, HttpApiClient};
pub use config::ClientConfig;
pub use store::{ConfigFacade, ConfigStore, ResourceCache, ResourceState, Subscription};
