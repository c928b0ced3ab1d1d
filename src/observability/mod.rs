//! Observability subsystem.
//!
//! Structured logging goes through `tracing` (initialized in `main`, with
//! `tower_http`'s `TraceLayer` on the router); request metrics are exposed
//! through a Prometheus endpoint. Metric updates are cheap atomic
//! operations and never block the request path.

pub mod metrics;
