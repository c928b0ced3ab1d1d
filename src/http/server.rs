//! HTTP server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Create the Axum router with catch-all proxy routes
//! - Wire up middleware (tracing)
//! - Dispatch each request to the selected upstream
//! - Sanitize headers on both legs, stamp `x-proxy-origin`, rewrite
//!   same-origin redirects
//! - Serve with graceful shutdown
//!
//! Each request is one independent handler invocation with no shared
//! mutable state; the upstream call is the only suspension point. A client
//! disconnect drops the handler future, cancelling the in-flight upstream
//! call.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, request::Parts, HeaderValue, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::loader::PUBLIC_ORIGIN_VAR;
use crate::config::validation::parse_origin;
use crate::config::{ConfigError, ProxyConfig};
use crate::http::headers::{sanitize_request_headers, strip_hop_by_hop, X_PROXY_ORIGIN};
use crate::http::redirect::rewrite_location;
use crate::observability::metrics;
use crate::routing::SplitRouter;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<SplitRouter>,
    pub client: Client<HttpConnector, Body>,
    pub public_origin: Option<Url>,
}

/// HTTP server for the path-split proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Upstream origins are compiled here; invalid or missing bindings fail
    /// construction before any network activity.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        let split_router = Arc::new(SplitRouter::from_config(&config.upstreams)?);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let public_origin = match &config.upstreams.public_origin {
            Some(raw) => Some(
                parse_origin(PUBLIC_ORIGIN_VAR, raw)
                    .map_err(|e| ConfigError::Validation(vec![e]))?,
            ),
            None => None,
        };

        let state = AppState {
            router: split_router,
            client,
            public_origin,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router. The wildcard route does not match `/`, so the
    /// root gets its own entry.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires or Ctrl+C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
/// Selects the upstream by path, forwards the sanitized request, and
/// rewrites the response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method_str = parts.method.to_string();

    let upstream = state.router.select(parts.uri.path());

    tracing::debug!(
        method = %parts.method,
        path = %parts.uri.path(),
        upstream = upstream.label,
        "Proxying request"
    );

    let public_origin = state
        .public_origin
        .clone()
        .or_else(|| derive_public_origin(&parts));

    // Forwarding URI: target scheme + authority, inbound path and query
    // verbatim.
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(upstream.scheme.clone());
    uri_parts.authority = Some(upstream.authority.clone());
    let target_uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, "Failed to compose upstream URI");
            metrics::record_request(&method_str, 500, upstream.label, start_time);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to compose upstream URI")
                .into_response();
        }
    };

    let mut outbound_headers = sanitize_request_headers(&parts.headers, &upstream.host_header);

    // GET and HEAD forward no body, even if the inbound side carried one.
    let outbound_body = if parts.method == Method::GET || parts.method == Method::HEAD {
        outbound_headers.remove(header::CONTENT_LENGTH);
        Body::empty()
    } else {
        body
    };

    let mut outbound = match Request::builder()
        .method(parts.method.clone())
        .uri(target_uri)
        .body(outbound_body)
    {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build upstream request");
            metrics::record_request(&method_str, 500, upstream.label, start_time);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build upstream request")
                .into_response();
        }
    };
    *outbound.headers_mut() = outbound_headers;

    // The sole suspension point. The legacy client never follows
    // redirects, so 3xx responses come back raw for rewriting below.
    match state.client.request(outbound).await {
        Ok(response) => {
            let status = response.status();
            let (mut res_parts, res_body) = response.into_parts();

            strip_hop_by_hop(&mut res_parts.headers);
            res_parts
                .headers
                .insert(X_PROXY_ORIGIN, HeaderValue::from_static(upstream.label));

            let location = res_parts
                .headers
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            if let (Some(raw), Some(public)) = (location, public_origin.as_ref()) {
                if let Some(rewritten) = rewrite_location(&raw, &upstream.origin, public) {
                    if let Ok(value) = HeaderValue::from_str(&rewritten) {
                        res_parts.headers.insert(header::LOCATION, value);
                    }
                }
            }

            metrics::record_request(&method_str, status.as_u16(), upstream.label, start_time);

            Response::from_parts(res_parts, Body::new(res_body)).into_response()
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                upstream = upstream.label,
                "Upstream request failed"
            );
            metrics::record_request(&method_str, 502, upstream.label, start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Scheme+host the original client used to reach the proxy, reconstructed
/// from the `host` header (HTTP/2 carries it in the URI authority). The
/// listener speaks plain HTTP, hence the fixed scheme; deployments behind a
/// TLS terminator set `PUBLIC_ORIGIN` instead.
fn derive_public_origin(parts: &Parts) -> Option<Url> {
    let authority = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| parts.uri.authority().map(|a| a.as_str()))?;
    Url::parse(&format!("http://{authority}")).ok()
}

/// Wait for the shutdown broadcast or Ctrl+C, whichever comes first.
async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = shutdown.recv() => {
            tracing::info!("Shutdown signal received");
        }
        result = tokio::signal::ctrl_c() => {
            if result.is_ok() {
                tracing::info!("Ctrl+C received");
            }
        }
    }
}
