//! Lifecycle management subsystem.
//!
//! Startup is ordered: config first, then the compiled router and client,
//! then the listener. Shutdown drains in-flight requests via axum's
//! graceful shutdown, triggered by the broadcast coordinator or Ctrl+C.

pub mod shutdown;

pub use shutdown::Shutdown;
