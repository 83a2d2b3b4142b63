//! Route definitions for the Assist AI API
//!
//! This module organizes all API routes and applies middleware.

use crate::config::ServerConfig;
use crate::state::AppState;
use assist_ai_shared::MessageResponse;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

mod admin;
mod ai;
mod calendar;
mod dashboard;
mod extract;
mod feedback;
mod health;
mod multipart;
mod teacher;


pub use extract::{AppJson, AppMultipart};

/// Uploaded images travel inside multipart bodies
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let server = &state.config().server;
    let timeout = Duration::from_secs(server.request_timeout_secs);
    let cors = cors_layer(server);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(health::metrics))
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/teacher", teacher::teacher_routes())
        .nest("/admin", admin::admin_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .nest("/calendar", calendar::calendar_routes())
        .nest("/feedback", feedback::feedback_routes())
        .nest("/ai", ai::ai_routes())
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Assist AI Backend Running"))
}

/// Allow the configured origins, or any origin when none are listed
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
