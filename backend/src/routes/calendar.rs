//! Calendar reminder routes

use super::AppJson;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::CalendarService;
use crate::state::AppState;
use assist_ai_shared::{CreateReminderRequest, MessageResponse, Reminder};
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};

pub fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(list_reminders).post(add_reminder))
        .route("/reminders/:id", delete(delete_reminder))
}

async fn list_reminders(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(CalendarService::list_reminders(state.store(), &user.email).await?))
}

async fn add_reminder(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateReminderRequest>,
) -> ApiResult<Json<Reminder>> {
    Ok(Json(CalendarService::add_reminder(state.store(), &user.email, req).await?))
}

async fn delete_reminder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(CalendarService::delete_reminder(state.store(), &user.email, &id).await?))
}
