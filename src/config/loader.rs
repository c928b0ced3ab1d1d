//! Configuration loading from the environment.

use std::env;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Origin serving requests whose path is exactly `/`. Required.
pub const PRIMARY_ORIGIN_VAR: &str = "PRIMARY_ORIGIN";
/// Origin serving every other request. Required.
pub const SECONDARY_ORIGIN_VAR: &str = "SECONDARY_ORIGIN";
/// Public-facing origin override for redirect rewriting. Optional.
pub const PUBLIC_ORIGIN_VAR: &str = "PUBLIC_ORIGIN";
/// Listener bind address. Optional.
pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";
/// Metrics exporter bind address. Optional.
pub const METRICS_ADDR_VAR: &str = "METRICS_ADDR";
/// Enables the metrics exporter. Optional, defaults to on.
pub const METRICS_ENABLED_VAR: &str = "METRICS_ENABLED";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration from the environment.
///
/// Missing or unset variables leave the corresponding field at its default;
/// validation then reports every missing required binding by name.
pub fn load_from_env() -> Result<ProxyConfig, ConfigError> {
    let mut config = ProxyConfig::default();

    if let Ok(value) = env::var(PRIMARY_ORIGIN_VAR) {
        config.upstreams.primary_origin = value;
    }
    if let Ok(value) = env::var(SECONDARY_ORIGIN_VAR) {
        config.upstreams.secondary_origin = value;
    }
    if let Ok(value) = env::var(PUBLIC_ORIGIN_VAR) {
        if !value.trim().is_empty() {
            config.upstreams.public_origin = Some(value);
        }
    }
    if let Ok(value) = env::var(LISTEN_ADDR_VAR) {
        config.listener.bind_address = value;
    }
    if let Ok(value) = env::var(METRICS_ADDR_VAR) {
        config.observability.metrics_address = value;
    }
    if let Ok(value) = env::var(METRICS_ENABLED_VAR) {
        config.observability.metrics_enabled = matches!(value.as_str(), "1" | "true" | "yes");
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
