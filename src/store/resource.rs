//! Lazily loaded, shared, replayed resource.
//!
//! # States
//! ```text
//! Unloaded ──(first subscribe)──▶ Loading ──(fetch ok)──▶ Loaded
//!                                    │
//!                                    └──(fetch err)──▶ Failed
//! ```
//!
//! `Loaded` and `Failed` are terminal. There is no refresh: the fetch runs at
//! most once per cache instance, however many subscribers come and go.
//!
//! A failed fetch is logged and counted but not surfaced to subscribers and
//! not retried. They keep waiting, exactly as if the fetch never resolved.

use std::future::Future;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::{stream, FutureExt, Stream};
use tokio::sync::watch;

use crate::api::ApiResult;
use crate::observability::metrics;

/// Load state of a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResourceState {
    /// Nobody has subscribed yet.
    Unloaded = 0,
    /// Fetch is in flight.
    Loading = 1,
    /// A value is cached and replayed to every subscriber.
    Loaded = 2,
    /// The fetch failed; nothing will be emitted.
    Failed = 3,
}

impl ResourceState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Unloaded,
            1 => Self::Loading,
            2 => Self::Loaded,
            _ => Self::Failed,
        }
    }
}

type FetchFn<T> = Box<dyn Fn() -> BoxFuture<'static, ApiResult<T>> + Send + Sync>;

struct Inner<T> {
    name: &'static str,
    state: AtomicU8,
    fetch_count: AtomicUsize,
    fetch: FetchFn<T>,
    value: watch::Sender<Option<Arc<T>>>,
}

/// A resource fetched once on first subscription and cached forever.
///
/// Cloning is cheap and clones share the same cached value and load state.
pub struct ResourceCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ResourceCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> ResourceCache<T> {
    /// Create an unloaded cache. `fetch` is not called here.
    pub fn new<F, Fut>(name: &'static str, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let (value, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                name,
                state: AtomicU8::new(ResourceState::Unloaded as u8),
                fetch_count: AtomicUsize::new(0),
                fetch: Box::new(move || fetch().boxed()),
                value,
            }),
        }
    }

    /// Resource name used in logs and metrics.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Current load state.
    pub fn state(&self) -> ResourceState {
        ResourceState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// How many times the fetch has been started (0 or 1).
    pub fn fetch_count(&self) -> usize {
        self.inner.fetch_count.load(Ordering::SeqCst)
    }

    /// Cached value, if loaded. Never triggers a load.
    pub fn current(&self) -> Option<Arc<T>> {
        self.inner.value.borrow().clone()
    }

    /// Subscribe to the resource, starting the load if this is the first
    /// subscription.
    ///
    /// The load is spawned on the current tokio runtime. Outside a runtime the
    /// resource stays `Unloaded` and the next subscription made inside one
    /// starts it.
    pub fn subscribe(&self) -> Subscription<T> {
        metrics::record_subscription(self.inner.name);

        let mut rx = self.inner.value.subscribe();
        // Make the first `next()` look at whatever is already cached.
        rx.mark_changed();

        self.ensure_loading();
        Subscription { rx }
    }

    /// Wait for the first available value.
    pub async fn get(&self) -> Option<Arc<T>> {
        self.subscribe().next().await
    }

    /// Store a value and multicast it to every subscriber.
    pub(crate) fn update(&self, value: T) {
        self.inner
            .state
            .store(ResourceState::Loaded as u8, Ordering::Release);
        self.inner.value.send_replace(Some(Arc::new(value)));
        metrics::record_loaded(self.inner.name, true);
    }

    fn ensure_loading(&self) {
        if self.state() != ResourceState::Unloaded {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                resource = self.inner.name,
                "Subscribed outside a tokio runtime; load deferred"
            );
            return;
        };

        let won = self
            .inner
            .state
            .compare_exchange(
                ResourceState::Unloaded as u8,
                ResourceState::Loading as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if !won {
            return;
        }

        self.inner.fetch_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(resource = self.inner.name, "Loading resource");

        let fetch = (self.inner.fetch)();
        let cache = self.clone();
        runtime.spawn(async move {
            let name = cache.inner.name;
            match fetch.await {
                Ok(value) => {
                    cache.update(value);
                    metrics::record_fetch(name, true);
                    tracing::info!(resource = name, "Resource loaded");
                }
                Err(e) => {
                    cache
                        .inner
                        .state
                        .store(ResourceState::Failed as u8, Ordering::Release);
                    metrics::record_fetch(name, false);
                    metrics::record_loaded(name, false);
                    tracing::error!(resource = name, error = %e, "Resource fetch failed");
                }
            }
        });
    }
}

impl<T> std::fmt::Debug for ResourceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("name", &self.inner.name)
            .field(
                "state",
                &ResourceState::from_u8(self.inner.state.load(Ordering::Acquire)),
            )
            .field("fetch_count", &self.inner.fetch_count.load(Ordering::SeqCst))
            .finish()
    }
}

/// One subscriber's view of a [`ResourceCache`].
pub struct Subscription<T> {
    rx: watch::Receiver<Option<Arc<T>>>,
}

impl<T: Send + Sync + 'static> Subscription<T> {
    /// Wait for a value this subscriber has not seen yet.
    ///
    /// The first call returns immediately when the resource is already
    /// loaded. Returns `None` only when the cache has been dropped.
    pub async fn next(&mut self) -> Option<Arc<T>> {
        loop {
            self.rx.changed().await.ok()?;
            let value = self.rx.borrow_and_update().clone();
            if let Some(value) = value {
                return Some(value);
            }
        }
    }

    /// Adapt into a stream of values.
    pub fn into_stream(self) -> impl Stream<Item = Arc<T>> + Send {
        stream::unfold(self, |mut sub| async move {
            let value = sub.next().await?;
            Some((value, sub))
        })
    }
}
