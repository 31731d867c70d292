//! Observability subsystem.
//!
//! Structured logging is initialized in `main` via `tracing-subscriber`;
//! this module owns the metric catalog and the Prometheus exporter.

pub mod metrics;
