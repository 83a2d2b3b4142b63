//! Admin routes

use super::AppJson;
use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::services::AdminService;
use crate::state::AppState;
use assist_ai_shared::{AdminLoginRequest, AdminSession, TokenResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/sessions", get(sessions))
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<AdminLoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token =
        AdminService::login(state.store(), state.jwt(), state.admin.as_deref(), req).await?;
    Ok(Json(token))
}

/// GET /api/admin/sessions
///
/// Requires an admin token; teachers get 403.
async fn sessions(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<Vec<AdminSession>>> {
    let sessions = AdminService::sessions(state.store(), &admin.email).await?;
    Ok(Json(sessions))
}
