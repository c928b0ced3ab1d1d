//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles reading the environment)
//! - Check both origin bindings are present and are well-formed origins
//! - Validate bind addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs once, before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::loader::{PRIMARY_ORIGIN_VAR, PUBLIC_ORIGIN_VAR, SECONDARY_ORIGIN_VAR};
use crate::config::schema::ProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required origin binding: {0}")]
    MissingOrigin(&'static str),

    #[error("{binding}: invalid origin: {reason}")]
    InvalidOrigin {
        binding: &'static str,
        reason: String,
    },

    #[error("invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
}

/// Parse an origin binding into a URL, enforcing the origin shape:
/// an `http`/`https` scheme, a host, and nothing past the authority.
pub fn parse_origin(binding: &'static str, raw: &str) -> Result<Url, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingOrigin(binding));
    }

    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidOrigin {
        binding,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidOrigin {
                binding,
                reason: format!("unsupported scheme `{other}`"),
            })
        }
    }

    if url.host_str().is_none() {
        return Err(ValidationError::InvalidOrigin {
            binding,
            reason: "missing host".to_string(),
        });
    }

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ValidationError::InvalidOrigin {
            binding,
            reason: "origin must not carry a path, query, or fragment".to_string(),
        });
    }

    Ok(url)
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = parse_origin(PRIMARY_ORIGIN_VAR, &config.upstreams.primary_origin) {
        errors.push(e);
    }
    if let Err(e) = parse_origin(SECONDARY_ORIGIN_VAR, &config.upstreams.secondary_origin) {
        errors.push(e);
    }
    if let Some(public) = &config.upstreams.public_origin {
        if let Err(e) = parse_origin(PUBLIC_ORIGIN_VAR, public) {
            errors.push(e);
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProxyConfig;

    fn valid_config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.upstreams.primary_origin = "https://pages.example.com".to_string();
        config.upstreams.secondary_origin = "https://site.example.com".to_string();
        config
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn reports_both_missing_origins() {
        let config = ProxyConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingOrigin(PRIMARY_ORIGIN_VAR)));
        assert!(errors.contains(&ValidationError::MissingOrigin(SECONDARY_ORIGIN_VAR)));
    }

    #[test]
    fn blank_origin_counts_as_missing() {
        let mut config = valid_config();
        config.upstreams.secondary_origin = "   ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingOrigin(SECONDARY_ORIGIN_VAR)]
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = parse_origin(PRIMARY_ORIGIN_VAR, "ftp://files.example.com").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrigin { .. }));
    }

    #[test]
    fn rejects_origin_with_path() {
        let err = parse_origin(PRIMARY_ORIGIN_VAR, "https://a.example.com/app").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOrigin { .. }));
    }

    #[test]
    fn accepts_origin_with_port() {
        let url = parse_origin(PRIMARY_ORIGIN_VAR, "http://127.0.0.1:3000").unwrap();
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn rejects_bad_bind_address() {
        let mut config = valid_config();
        config.listener.bind_address = "not-an-address".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidBindAddress(
                "not-an-address".to_string()
            )]
        );
    }
}
