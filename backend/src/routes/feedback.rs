//! Feedback routes

use super::multipart::read_form;
use super::{AppJson, AppMultipart};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{AnalyzeInput, FeedbackService};
use crate::state::AppState;
use assist_ai_shared::validation::ValidationError;
use assist_ai_shared::{FeedbackItem, MessageResponse, RateFeedbackRequest};
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/analyze", post(analyze))
        .route("/:id/rate", patch(rate))
}

async fn list(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Vec<FeedbackItem>>> {
    Ok(Json(FeedbackService::list(state.store(), &user.email).await?))
}

/// POST /api/feedback/analyze
///
/// Form fields: `message` (required), `language` (default `en`) and
/// `feedback_id` to re-analyse an existing item.
async fn analyze(
    State(state): State<AppState>,
    user: AuthUser,
    AppMultipart(multipart): AppMultipart,
) -> ApiResult<Json<FeedbackItem>> {
    let mut form = read_form(multipart).await?;
    let message = form
        .take_text("message")
        .ok_or_else(|| ValidationError::new("message", "Message cannot be empty"))?;

    let input = AnalyzeInput {
        message,
        language: form.take_text("language").unwrap_or_else(|| "en".to_string()),
        feedback_id: form.take_text("feedback_id"),
    };

    let item = FeedbackService::analyze(state.store(), state.ai(), &user.email, input).await?;
    Ok(Json(item))
}

/// PATCH /api/feedback/:id/rate
async fn rate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<RateFeedbackRequest>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(
        FeedbackService::rate(state.store(), &user.email, &id, req.successful).await?,
    ))
}
