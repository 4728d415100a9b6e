//! # Regdesk HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET  /health` - Health check
//! - `GET  /registrations` - Filtered+searched list (`?filter=`, `?q=`)
//! - `PUT  /registrations` - Replace the entire dataset
//! - `GET  /registrations/{id}` - Single record with filter match map
//! - `POST /registrations/{id}/note` - Acknowledge secretary documents
//! - `GET  /summary` - Per-filter tab counts
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `REGDESK_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `REGDESK_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `REGDESK_API_KEY`: If set, requires Bearer token authentication
//!
//! The server config file can supply CORS and rate-limit values too;
//! environment variables win (see [`ApiOptions::resolve`]).

mod auth;
mod handlers;
mod middleware;
mod types;

// Re-exports for external use
pub use auth::{api_key_from_env, keys_match};
pub use middleware::{DEFAULT_RPS, create_rate_limiter, rate_limit_from_env};
// Re-export handlers and types for integration tests (via `regdesk::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    ListParams, detail_handler, health_handler, list_handler, note_handler, replace_handler,
    summary_handler,
};
#[allow(unused_imports)]
pub use types::{
    DetailResponse, ErrorResponse, HealthResponse, ListResponse, NoteRequest, NoteResponse,
    RegistrationView, ReplaceResponse, SummaryResponse,
};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use regdesk_core::{Dashboard, DashboardEvent, RegdeskError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the dashboard session.
#[derive(Clone)]
pub struct AppState {
    /// The dashboard holding the loaded registration dataset.
    pub dashboard: Arc<RwLock<Dashboard>>,
}

impl AppState {
    /// Create new app state around a dashboard.
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(dashboard)),
        }
    }
}

// =============================================================================
// API OPTIONS
// =============================================================================

/// Resolved runtime options for the HTTP API.
///
/// Built once at startup and threaded into the router, so middleware
/// never re-reads the environment per request.
#[derive(Debug, Clone, Default)]
pub struct ApiOptions {
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Raw CORS origin configuration ("*", comma-separated list, or none).
    pub cors_origins: Option<String>,
    /// Expected API key; `None` disables authentication.
    pub api_key: Option<String>,
}

impl ApiOptions {
    /// Resolve options from environment variables and a config file.
    ///
    /// Environment wins over the config file, which wins over built-in
    /// defaults. The API key only ever comes from the environment.
    #[must_use]
    pub fn resolve(config: &ServerConfig) -> Self {
        Self {
            rate_limit: rate_limit_from_env()
                .or(config.rate_limit)
                .unwrap_or(DEFAULT_RPS),
            cors_origins: std::env::var("REGDESK_CORS_ORIGINS")
                .ok()
                .or_else(|| config.cors_origins.clone()),
            api_key: api_key_from_env(),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build a CORS layer from the resolved origin configuration.
///
/// - `"*"`: allows all origins (development mode - use with caution!)
/// - unset: defaults to localhost only (restrictive default)
/// - otherwise: parses a comma-separated list of allowed origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (REGDESK_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - caps dataset payloads
/// 4. Rate Limiting - protects against request floods (if enabled)
/// 5. Authentication - validates API key (if configured)
pub fn create_router(state: AppState, options: &ApiOptions) -> Router {
    let cors = build_cors_layer(options.cors_origins.as_deref());

    if options.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", options.rate_limit);
    } else {
        tracing::info!("Rate limiting disabled");
    }

    if options.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "⚠️  API key authentication DISABLED - all endpoints are publicly accessible! \
             Set REGDESK_API_KEY environment variable to enable authentication."
        );
    }

    // Build base router with routes
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/registrations",
            get(handlers::list_handler).put(handlers::replace_handler),
        )
        .route("/registrations/{id}", get(handlers::detail_handler))
        .route("/registrations/{id}/note", post(handlers::note_handler))
        .route("/summary", get(handlers::summary_handler));

    // Apply authentication middleware (innermost - runs last on request)
    if let Some(key) = &options.api_key {
        router = router.layer(axum_middleware::from_fn_with_state(
            Arc::new(key.clone()),
            auth::api_key_auth_middleware,
        ));
    }

    // Apply rate limiting middleware
    if options.rate_limit > 0 {
        router = router.layer(axum_middleware::from_fn_with_state(
            middleware::create_rate_limiter(options.rate_limit),
            middleware::rate_limit_middleware,
        ));
    }

    // Apply CORS, body limit, and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
///
/// Subscribes a logging observer on the dashboard before it goes behind
/// the state lock, so dataset reloads and acknowledgments show up in
/// the server log regardless of which endpoint triggered them.
pub async fn run_server(
    addr: &str,
    mut dashboard: Dashboard,
    options: ApiOptions,
) -> Result<(), RegdeskError> {
    dashboard.subscribe(Box::new(|event| match event {
        DashboardEvent::DatasetReplaced { count } => {
            tracing::info!(count = *count, "Dashboard dataset replaced");
        }
        DashboardEvent::SecretaryRecordsNoted { id } => {
            tracing::info!(id = %id, "Secretary records acknowledged");
        }
    }));

    let state = AppState::new(dashboard);
    let router = create_router(state, &options);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RegdeskError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Regdesk HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| RegdeskError::Io(format!("Server error: {}", e)))
}

// =============================================================================
// TESTS
// =============================================================================
