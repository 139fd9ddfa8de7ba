//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! store / api produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (fetch and subscription counters)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
