//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (path == "/" ? primary : secondary)
//!     → Return: compiled Upstream (origin, authority, marker label)
//!
//! Upstream compilation (at startup):
//!     UpstreamConfig
//!     → parse + validate origin URLs
//!     → precompute scheme, authority, host header value
//!     → Freeze as immutable SplitRouter
//! ```
//!
//! # Design Decisions
//! - Upstreams compiled at startup, immutable at runtime
//! - Selection is a pure function of the path; every path matches
//! - Deterministic: same path always selects the same upstream

pub mod router;

pub use router::{SplitRouter, Upstream};
