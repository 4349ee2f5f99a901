//! API Routes
//!
//! Configures the Axum router with all sentiment server endpoints.

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{analyze_handler, health_handler, sentiment_handler, stats_handler, AppState};
use super::rate_limit::{enforce, RateLimiter};
use super::security::{require_origin, with_security_headers};
use crate::config::Config;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/sentiment` - Current sentiment snapshot
/// - `POST /api/analyze` - Score free text
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check with cache diagnostics
///
/// # Middleware
/// - CORS on `/api`: origin allowlist in production, any origin otherwise
/// - Production only: `/api` requests without an `Origin` header get 403
/// - Per-client rate limits on `/api`, with a stricter budget on `/api/analyze`
/// - Security headers on every response
/// - Tracing: Logs all requests
pub fn create_router(state: AppState, config: &Config) -> Router {
    let api_limiter = RateLimiter::api(config.api_rate_limit);
    let analyze_limiter = RateLimiter::analyze(config.analyze_rate_limit);

    let mut api = Router::new()
        .route("/sentiment", get(sentiment_handler))
        .route(
            "/analyze",
            post(analyze_handler)
                .route_layer(middleware::from_fn_with_state(analyze_limiter, enforce)),
        )
        .layer(middleware::from_fn_with_state(api_limiter, enforce));
    if config.production {
        api = api.layer(middleware::from_fn(require_origin));
    }
    let api = api.layer(cors_layer(config));

    let router = Router::new()
        .nest("/api", api)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler));

    with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if !config.production {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
