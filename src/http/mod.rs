//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all routes)
//!     → [routing picks the upstream by path]
//!     → headers.rs (sanitize, force host)
//!     → upstream call (hyper client, redirects not followed)
//!     → headers.rs + redirect.rs (strip, stamp marker, rewrite Location)
//!     → Send to client
//! ```

pub mod headers;
pub mod redirect;
pub mod server;

pub use headers::X_PROXY_ORIGIN;
pub use server::HttpServer;
