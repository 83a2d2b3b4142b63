//! Teacher account routes
//!
//! Registration and login are public; profile routes need a teacher token.

use super::AppJson;
use crate::auth::TeacherUser;
use crate::error::ApiResult;
use crate::services::TeacherService;
use crate::state::AppState;
use assist_ai_shared::{
    RegisterTeacherRequest, TeacherLoginRequest, TeacherProfile, TokenResponse,
    UpdateProfileRequest,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile).put(update_profile))
}

/// POST /api/teacher/register
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterTeacherRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let token = TeacherService::register(state.store(), state.jwt(), req).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// POST /api/teacher/login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<TeacherLoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = TeacherService::login(state.store(), state.jwt(), req).await?;
    Ok(Json(token))
}

/// GET /api/teacher/profile
async fn get_profile(
    State(state): State<AppState>,
    TeacherUser(user): TeacherUser,
) -> ApiResult<Json<TeacherProfile>> {
    let profile = TeacherService::get_profile(state.store(), &user.email).await?;
    Ok(Json(profile))
}

/// PUT /api/teacher/profile
async fn update_profile(
    State(state): State<AppState>,
    TeacherUser(user): TeacherUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ApiResult<Json<TeacherProfile>> {
    let profile = TeacherService::update_profile(state.store(), &user.email, req).await?;
    Ok(Json(profile))
}
