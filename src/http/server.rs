//! HTTP host for the route registry.
//!
//! # Responsibilities
//! - Build the registry from config and freeze it behind an Arc
//! - Dispatch every incoming path into the registry
//! - Answer matches as a JSON envelope, guard redirects as HTTP 307,
//!   unmatched paths as 404
//! - Wire up middleware (tracing, timeout, request ID)
//!
//! # Design Decisions
//! - The host is the navigation layer: redirects are surfaced to the
//!   client as real 307s so the address bar follows, mirroring how the
//!   registry's `resolve_once` treats them as first-class results
//! - In-process callers that want redirects followed use
//!   `RouteRegistry::resolve`, which enforces the hop bound

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::http::page::{build_registry, PageTarget};
use crate::http::request::{RequestId, RequestIdLayer, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{Params, RegistryError, Resolution, RouteRegistry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RouteRegistry<PageTarget>>,
}

/// Envelope returned for a resolved page.
#[derive(Debug, Serialize)]
struct ResolvedPage {
    page: String,
    path: String,
    params: Params,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
}

/// HTTP server for the page router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails when the route table cannot be registered; callers treat
    /// this as fatal to startup.
    pub fn new(config: RouterConfig) -> Result<Self, RegistryError> {
        let registry = Arc::new(build_registry(&config)?);
        tracing::info!(routes = registry.len(), "Route registry built");

        let state = AppState { registry };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", get(resolve_handler))
            .route("/", get(resolve_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Main resolution handler: every path lands here.
async fn resolve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    tracing::debug!(request_id = %request_id, path = %target, "Resolving navigation");

    let mut response = match state.registry.resolve_once(&target) {
        Resolution::Matched {
            target: page,
            path,
            params,
            query,
        } => {
            metrics::record_resolution("matched", start);
            Json(ResolvedPage {
                page: page.name.clone(),
                path,
                params,
                query,
            })
            .into_response()
        }
        Resolution::Redirect { to, query } => {
            metrics::record_resolution("redirect", start);
            let location = match &query {
                Some(q) => format!("{to}?{q}"),
                None => to.clone(),
            };
            tracing::debug!(request_id = %request_id, location = %location, "Guard redirect");
            redirect_response(&location)
        }
        Resolution::NotFound => {
            metrics::record_resolution("not_found", start);
            tracing::warn!(request_id = %request_id, path = %target, "No route matched");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "not_found",
                    "path": request.uri().path(),
                })),
            )
                .into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    response
}

/// Build a 307 pointing at `location`.
///
/// A location that is not a valid header value means a misconfigured
/// guard slipped through validation; answer 500 rather than panic.
fn redirect_response(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Invalid redirect location");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "invalid_redirect" })),
            )
                .into_response()
        }
    }
}
