//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and translator produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every access log line
//! - Metrics are off by default and cost nothing until enabled

pub mod logging;
pub mod metrics;
