/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Applied to every route, outermost first:
 * 1. `TraceLayer` - request/response spans
 * 2. `CorsLayer` - the configured origin, with credentials
 * 3. `DefaultBodyLimit` - 16 KiB, raised on the upload route
 */

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::project_routes::configure_project_routes;
use crate::backend::routes::user_routes::configure_user_routes;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

/// Body limit for every route except file uploads
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// - `GET /health` - Liveness and storage backend
/// - `/api/v1/users/*` - See `user_routes`
/// - `/api/v1/projects/*` - See `project_routes`
/// - `GET /uploads/*` - Files written by the local media store
///
/// ## Fallback
///
/// Unknown routes return the 404 error envelope.
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.cors_origin);
    let upload_dir = app_state.config.uploads.dir.clone();

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/users", configure_user_routes(app_state.clone()))
        .nest("/api/v1/projects", configure_project_routes(app_state.clone()))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            tracing::warn!("Invalid CORS origin {:?}; cross-origin requests will be refused", origin);
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION])
}

async fn health(State(db_pool): State<Option<PgPool>>) -> ApiResponse<Value> {
    let storage = if db_pool.is_some() { "postgres" } else { "memory" };
    ApiResponse::ok(json!({ "status": "ok", "storage": storage }), "Service is healthy")
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}
