//! Two-origin path-split reverse proxy library.
//!
//! Requests for `/` are forwarded to the primary origin, every other path to
//! the secondary origin. Hop-by-hop headers are stripped on both legs, each
//! response is stamped with `x-proxy-origin`, and same-origin redirects from
//! the upstream are rewritten to the public-facing origin.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
