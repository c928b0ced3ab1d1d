//! Configuration schema definitions.
//!
//! All types derive Serde traits so a config can be serialized for
//! inspection or built literally in tests.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The two upstream origins and the optional public-origin override.
    pub upstreams: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origin configuration.
///
/// Both origins are required and have no defaults. An origin is a base URL
/// carrying scheme and host (and optionally port) but no path, query, or
/// fragment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin serving requests whose path is exactly `/`.
    pub primary_origin: String,

    /// Origin serving every other request.
    pub secondary_origin: String,

    /// Public-facing origin used when rewriting redirect targets.
    ///
    /// When unset, the public origin is derived per request from the
    /// inbound `host` header. Set this when the proxy sits behind a TLS
    /// terminator and clients reach it over a scheme it cannot observe.
    pub public_origin: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
