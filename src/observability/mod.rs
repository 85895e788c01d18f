//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request traffic
//!     → metrics filter (counters, histograms via the metrics facade)
//!     → Prometheus recorder (installed at startup)
//!     → snapshot endpoint (/metrics/metrics)
//!
//! all subsystems
//!     → logging.rs (structured tracing events)
//! ```
//!
//! # Design Decisions
//! - Metric updates go through the global `metrics` facade and are cheap
//! - The Prometheus handle is optional; recording works without it

pub mod logging;
pub mod metrics;
