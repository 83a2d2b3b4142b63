//! Reflection feedback: AI analysis, history and effectiveness ratings
//!
//! Analysis never fails the request. Provider errors, a missing provider
//! and unparseable replies all store [`FeedbackAnalysis::unavailable`].

use crate::ai::{parse, prompts, AiGateway, GenerateRequest};
use crate::error::ApiError;
use crate::repositories::Repository;
use crate::store::DocumentStore;
use assist_ai_shared::languages::resolve_language;
use assist_ai_shared::validation::validate_required;
use assist_ai_shared::{Effectiveness, FeedbackAnalysis, FeedbackItem, MessageResponse};
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

pub const FEEDBACK_LIMIT: usize = 50;
const PREVIEW_CHARS: usize = 40;

/// A reflection submitted for analysis
#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub message: String,
    pub language: String,
    /// Re-analyse this existing item instead of creating a new one
    pub feedback_id: Option<String>,
}

pub struct FeedbackService;

impl FeedbackService {
    /// Newest items first, by their `date`
    pub async fn list(store: &dyn DocumentStore, owner: &str) -> Result<Vec<FeedbackItem>, ApiError> {
        let mut items = Repository::<FeedbackItem>::new(store, owner).list().await?;
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items.truncate(FEEDBACK_LIMIT);
        Ok(items)
    }

    pub async fn analyze(
        store: &dyn DocumentStore,
        ai: Option<&dyn AiGateway>,
        owner: &str,
        input: AnalyzeInput,
    ) -> Result<FeedbackItem, ApiError> {
        validate_required("message", &input.message).map_err(ApiError::Validation)?;
        let repo = Repository::<FeedbackItem>::new(store, owner);

        if let Some(id) = input.feedback_id.as_deref().filter(|id| !id.is_empty()) {
            let mut item = repo.get(id).await?.ok_or_else(feedback_not_found)?;

            item.analysis = analyze_text(ai, &input.message, &input.language, true).await;
            item.date = today();
            if !repo.replace(item.clone()).await? {
                return Err(feedback_not_found());
            }
            return Ok(item);
        }

        let analysis = analyze_text(ai, &input.message, &input.language, false).await;
        let item = FeedbackItem {
            id: Uuid::new_v4().simple().to_string(),
            date: today(),
            preview: preview(&input.message),
            kind: "Observation".to_string(),
            full_text: input.message,
            language: input.language,
            analysis,
            effectiveness: None,
            teacher_email: owner.to_string(),
        };

        repo.insert(item.clone()).await?;
        Ok(item)
    }

    /// Record whether the suggested improvement worked
    pub async fn rate(
        store: &dyn DocumentStore,
        owner: &str,
        id: &str,
        successful: bool,
    ) -> Result<MessageResponse, ApiError> {
        let repo = Repository::<FeedbackItem>::new(store, owner);
        let mut item = repo.get(id).await?.ok_or_else(feedback_not_found)?;
        item.effectiveness = Some(Effectiveness::from(successful));

        if !repo.replace(item).await? {
            return Err(feedback_not_found());
        }
        Ok(MessageResponse::new("Rating saved"))
    }
}

/// Ask the provider for a structured analysis, or fall back
async fn analyze_text(
    ai: Option<&dyn AiGateway>,
    message: &str,
    language: &str,
    retry: bool,
) -> FeedbackAnalysis {
    let Some(ai) = ai else {
        warn!("Feedback analysis requested but AI gateway is not configured");
        metrics::counter!("ai_fallbacks_total", "endpoint" => "feedback").increment(1);
        return FeedbackAnalysis::unavailable();
    };

    let language_name = resolve_language(Some(language)).name;
    let request =
        GenerateRequest::new(vec![prompts::feedback_analysis(message, language_name, retry)])
            .expect_json();

    let result = match ai.generate(request).await {
        Ok(raw) => parse::parse_feedback_analysis(&raw).map_err(|e| {
            debug!(reply = %raw, "Unparseable analysis reply");
            e.to_string()
        }),
        Err(e) => Err(e.to_string()),
    };

    result.unwrap_or_else(|reason| {
        warn!(reason = %reason, retry, "Feedback analysis fell back");
        metrics::counter!("ai_fallbacks_total", "endpoint" => "feedback").increment(1);
        FeedbackAnalysis::unavailable()
    })
}

fn preview(message: &str) -> String {
    if message.chars().count() > PREVIEW_CHARS {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn feedback_not_found() -> ApiError {
    ApiError::NotFound("Feedback not found".to_string())
}
