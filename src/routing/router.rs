//! Target selection between the two configured origins.

use std::str::FromStr;

use axum::http::uri::{Authority, Scheme};
use axum::http::HeaderValue;
use url::Url;

use crate::config::loader::{PRIMARY_ORIGIN_VAR, SECONDARY_ORIGIN_VAR};
use crate::config::schema::UpstreamConfig;
use crate::config::validation::{parse_origin, ValidationError};
use crate::config::ConfigError;

/// A compiled upstream target.
///
/// Everything derivable from the origin URL is precomputed here so the
/// per-request path does no parsing.
#[derive(Debug, Clone)]
pub struct Upstream {
    /// Marker value reported in the `x-proxy-origin` response header.
    pub label: &'static str,
    /// The origin as a URL, used to resolve and compare redirect targets.
    pub origin: Url,
    /// Scheme for the forwarded request URI.
    pub scheme: Scheme,
    /// Authority (host, optionally port) for the forwarded request URI.
    pub authority: Authority,
    /// Value for the outbound `host` header: the origin's hostname only.
    pub host_header: HeaderValue,
}

impl Upstream {
    fn from_origin(
        label: &'static str,
        binding: &'static str,
        raw: &str,
    ) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidOrigin { binding, reason };

        let origin = parse_origin(binding, raw)?;
        let host = origin
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?
            .to_string();

        let scheme =
            Scheme::from_str(origin.scheme()).map_err(|e| invalid(e.to_string()))?;
        let authority_str = match origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        let authority =
            Authority::from_str(&authority_str).map_err(|e| invalid(e.to_string()))?;
        let host_header =
            HeaderValue::from_str(&host).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            label,
            origin,
            scheme,
            authority,
            host_header,
        })
    }
}

/// Two-way router: the root path goes to the primary origin, everything
/// else to the secondary.
#[derive(Debug, Clone)]
pub struct SplitRouter {
    primary: Upstream,
    secondary: Upstream,
}

impl SplitRouter {
    /// Compile the router from validated upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ConfigError> {
        let primary =
            Upstream::from_origin("primary", PRIMARY_ORIGIN_VAR, &config.primary_origin);
        let secondary =
            Upstream::from_origin("secondary", SECONDARY_ORIGIN_VAR, &config.secondary_origin);

        match (primary, secondary) {
            (Ok(primary), Ok(secondary)) => Ok(Self { primary, secondary }),
            (primary, secondary) => {
                let errors = [primary.err(), secondary.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                Err(ConfigError::Validation(errors))
            }
        }
    }

    /// Select the upstream for an inbound path. The query string plays no
    /// part in selection.
    pub fn select(&self, path: &str) -> &Upstream {
        if path == "/" {
            &self.primary
        } else {
            &self.secondary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> SplitRouter {
        SplitRouter::from_config(&UpstreamConfig {
            primary_origin: "https://pages.example.com".to_string(),
            secondary_origin: "http://site.example.com:3000".to_string(),
            public_origin: None,
        })
        .unwrap()
    }

    #[test]
    fn root_selects_primary() {
        assert_eq!(router().select("/").label, "primary");
    }

    #[test]
    fn any_other_path_selects_secondary() {
        let router = router();
        assert_eq!(router.select("/about").label, "secondary");
        assert_eq!(router.select("/index.html").label, "secondary");
        assert_eq!(router.select("//").label, "secondary");
        assert_eq!(router.select("/a/b/c").label, "secondary");
    }

    #[test]
    fn authority_includes_explicit_port() {
        let router = router();
        assert_eq!(router.select("/x").authority.as_str(), "site.example.com:3000");
        assert_eq!(router.select("/").authority.as_str(), "pages.example.com");
    }

    #[test]
    fn host_header_is_hostname_only() {
        let router = router();
        assert_eq!(router.select("/x").host_header, "site.example.com");
    }

    #[test]
    fn missing_origin_is_reported_by_binding_name() {
        let err = SplitRouter::from_config(&UpstreamConfig {
            primary_origin: "https://pages.example.com".to_string(),
            secondary_origin: String::new(),
            public_origin: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("SECONDARY_ORIGIN"));
    }
}
