//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the upstream gateway produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (only when enabled)
//! ```

pub mod logging;
pub mod metrics;
