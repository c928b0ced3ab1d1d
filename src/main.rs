//! Path-split reverse proxy binary.
//!
//! ```text
//!                      ┌──────────────────────────────────────────┐
//!                      │               SPLIT PROXY                 │
//!                      │                                           │
//!     GET /            │   ┌─────────┐     ┌───────────────┐      │
//!     ─────────────────┼──▶│  http   │────▶│ routing:      │──────┼──▶ primary origin
//!                      │   │ server  │     │ path == "/" ? │      │
//!     GET /anything    │   └─────────┘     └───────────────┘      │
//!     ─────────────────┼────────────────────────────▲─────────────┼──▶ secondary origin
//!                      │                            │              │
//!                      │   sanitize headers ── forward ── rewrite  │
//!                      │                            Location       │
//!                      └──────────────────────────────────────────┘
//! ```
//!
//! Configuration is environment-provided and validated once at startup;
//! a missing origin binding aborts with a diagnostic naming it.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use split_proxy::config::loader;
use split_proxy::http::HttpServer;
use split_proxy::lifecycle::Shutdown;
use split_proxy::observability::metrics;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "split_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("split-proxy v0.1.0 starting");

    let config = loader::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        primary_origin = %config.upstreams.primary_origin,
        secondary_origin = %config.upstreams.secondary_origin,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
