//! Chat assistant and translation
//!
//! These endpoints always answer with a usable payload. Provider trouble is
//! logged and counted, and the caller gets a canned reply or its own text
//! back.

use crate::ai::{parse, prompts, AiGateway, GenerateRequest, ImagePart, Translator};
use crate::error::ApiError;
use assist_ai_shared::languages::{nllb_tag, resolve_language};
use assist_ai_shared::validation::{ValidationError, MAX_TEXT_LEN};
use assist_ai_shared::{ChatMode, ChatResponse, TranslateRequest, TranslateResponse};
use tracing::warn;

pub const EMPTY_CHAT_REPLY: &str = "Please provide a message or an image.";
pub const NOT_CONFIGURED_REPLY: &str = "Server misconfiguration: AI service is not configured.";
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// A chat turn as received from the client
#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    pub message: Option<String>,
    pub image: Option<ImagePart>,
    pub language: Option<String>,
    pub mode: ChatMode,
}

pub struct AssistantService;

impl AssistantService {
    pub async fn chat(ai: Option<&dyn AiGateway>, input: ChatInput) -> ChatResponse {
        let Some(ai) = ai else {
            warn!("Chat requested but AI gateway is not configured");
            return ChatResponse::notice(NOT_CONFIGURED_REPLY);
        };

        let message = input
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        if message.is_none() && input.image.is_none() {
            return ChatResponse::notice(EMPTY_CHAT_REPLY);
        }
        let message = message.unwrap_or_default();
        let language = resolve_language(input.language.as_deref());

        let request = match input.mode {
            ChatMode::Chat => GenerateRequest::new(vec![
                prompts::CHAT_SYSTEM_PROMPT.to_string(),
                prompts::language_preference(language.name),
                prompts::chat_question(message),
            ]),
            ChatMode::Reflection => {
                let mut texts = vec![
                    prompts::REFLECTION_SYSTEM_PROMPT.to_string(),
                    prompts::language_preference(language.name),
                    prompts::reflection_input(message),
                ];
                if input.image.is_some() {
                    texts.push(prompts::IMAGE_CONTEXT_NOTE.to_string());
                }
                GenerateRequest::new(texts).expect_json()
            }
        }
        .with_image(input.image);

        match ai.generate(request).await {
            Ok(reply) => match input.mode {
                ChatMode::Chat => ChatResponse::text(reply),
                ChatMode::Reflection => ChatResponse::reflection(parse::parse_reflection(&reply)),
            },
            Err(e) => {
                warn!(error = %e, mode = ?input.mode, "Chat generation failed");
                metrics::counter!("ai_fallbacks_total", "endpoint" => "chat").increment(1);
                ChatResponse::notice(ERROR_REPLY)
            }
        }
    }

    /// Translate text between two interface languages
    ///
    /// Identical languages, a missing translator and provider failures all
    /// return the input unchanged.
    pub async fn translate(
        translator: Option<&dyn Translator>,
        req: TranslateRequest,
    ) -> Result<TranslateResponse, ApiError> {
        if req.text.len() > MAX_TEXT_LEN {
            return Err(ApiError::Validation(ValidationError::new(
                "text",
                "Text is too long",
            )));
        }

        let source = req.source.trim().to_lowercase();
        let target = req.target.trim().to_lowercase();
        let Some(translator) = translator else {
            return Ok(TranslateResponse { text: req.text });
        };
        if source == target || req.text.trim().is_empty() {
            return Ok(TranslateResponse { text: req.text });
        }

        match translator
            .translate(&req.text, nllb_tag(&source), nllb_tag(&target))
            .await
        {
            Ok(text) => Ok(TranslateResponse { text }),
            Err(e) => {
                warn!(error = %e, source = %source, target = %target, "Translation fell back to input");
                metrics::counter!("ai_fallbacks_total", "endpoint" => "translate").increment(1);
                Ok(TranslateResponse { text: req.text })
            }
        }
    }
}
