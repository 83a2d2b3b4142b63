//! Dashboard routes: notes, tasks and subjects

use super::AppJson;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::DashboardService;
use crate::state::AppState;
use assist_ai_shared::{CreateSubjectRequest, MessageResponse, Note, Subject, Task};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(add_note))
        .route("/tasks", get(list_tasks).post(add_task))
        .route("/subjects", get(list_subjects).post(create_subject))
        .route("/subjects/:id", delete(delete_subject))
        .route("/subjects/:id/progress", post(update_progress))
}

async fn list_notes(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(DashboardService::list_notes(state.store(), &user.email).await?))
}

async fn add_note(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(note): AppJson<Note>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(DashboardService::add_note(state.store(), &user.email, note).await?))
}

async fn list_tasks(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(DashboardService::list_tasks(state.store(), &user.email).await?))
}

async fn add_task(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(task): AppJson<Task>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(DashboardService::add_task(state.store(), &user.email, task).await?))
}

async fn list_subjects(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Subject>>> {
    Ok(Json(DashboardService::list_subjects(state.store(), &user.email).await?))
}

async fn create_subject(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateSubjectRequest>,
) -> ApiResult<Json<Subject>> {
    Ok(Json(DashboardService::create_subject(state.store(), &user.email, req).await?))
}

async fn delete_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(DashboardService::delete_subject(state.store(), &user.email, &id).await?))
}

/// POST /api/dashboard/subjects/:id/progress with a JSON array of chapter numbers
async fn update_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(chapters): AppJson<Vec<i32>>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(
        DashboardService::update_progress(state.store(), &user.email, &id, chapters).await?,
    ))
}
