//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Fixup middleware, reload loop, server:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
