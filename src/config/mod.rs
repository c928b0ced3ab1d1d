//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (read bindings)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ProxyConfig (validated, immutable)
//!     → compiled into SplitRouter at server construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - Origin bindings are required and have no defaults; listener and
//!   observability settings default sensibly
//! - Validation runs once at startup (fail-fast) and reports every
//!   problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::ProxyConfig;
pub use schema::ListenerConfig;
pub use schema::UpstreamConfig;
pub use schema::ObservabilityConfig;
