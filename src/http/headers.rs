//! Header sanitization for both proxy legs.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from forwarded requests and responses
//! - Override `host` with the target origin's hostname
//! - Define the `x-proxy-origin` marker header
//!
//! # Design Decisions
//! - The outbound map is built fresh, never aliased to the inbound map
//! - The hop-by-hop set is fixed; headers named by a `Connection` header
//!   are not chased
//! - Comparison is case-insensitive as a documented invariant

use axum::http::{header, HeaderMap, HeaderValue};

/// Marker header naming the backend that served the request.
pub const X_PROXY_ORIGIN: &str = "x-proxy-origin";

/// Headers meaningful only for a single transport connection. An
/// intermediary must not forward these blindly.
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Case-insensitive membership test against the hop-by-hop set.
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Build the outbound request header map: every inbound header except the
/// hop-by-hop set, with `host` forced to the target origin's hostname.
pub fn sanitize_request_headers(inbound: &HeaderMap, upstream_host: &HeaderValue) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound.insert(header::HOST, upstream_host.clone());
    outbound
}

/// Remove hop-by-hop headers from an upstream response in place. The
/// serving side re-establishes its own connection-level framing.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}
