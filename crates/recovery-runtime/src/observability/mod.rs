//! Observability
//!
//! In-process metrics for the scoring path. Logging goes through `tracing`
//! directly at each call site.

pub mod metrics;

pub use metrics::{Counter, Histogram, HistogramSummary, MetricsCollector, MetricsSnapshot};
