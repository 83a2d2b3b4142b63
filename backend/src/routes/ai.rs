//! Public AI assistant routes

use super::multipart::read_form;
use super::{AppJson, AppMultipart};
use crate::error::ApiResult;
use crate::services::{AssistantService, ChatInput};
use crate::state::AppState;
use assist_ai_shared::{ChatMode, ChatResponse, TranslateRequest, TranslateResponse};
use axum::{extract::State, routing::post, Json, Router};

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/translate", post(translate))
}

/// POST /api/ai/chat
///
/// Form fields: `message`, `image`, `language` and `mode` (`chat` or
/// `reflection`). Always answers 200 with a reply payload.
async fn chat(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> ApiResult<Json<ChatResponse>> {
    let mut form = read_form(multipart).await?;
    let mode = form.take_text("mode");

    let input = ChatInput {
        message: form.take_text("message"),
        image: form.take_image(),
        language: form.take_text("language"),
        mode: ChatMode::parse(mode.as_deref()),
    };

    Ok(Json(AssistantService::chat(state.ai(), input).await))
}

/// POST /api/ai/translate
async fn translate(
    State(state): State<AppState>,
    AppJson(req): AppJson<TranslateRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    Ok(Json(AssistantService::translate(state.translator(), req).await?))
}
