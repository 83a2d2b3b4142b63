//! Gemini `generateContent` client

use super::{AiGateway, GenerateRequest};
use assist_ai_shared::UpstreamError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Google Gemini REST client
pub struct GeminiClient {
    http: Client,
    api_key: Secret<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Secret<String>,
        base_url: &str,
        model: &str,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            // Accept both "gemini-2.5-flash" and "models/gemini-2.5-flash"
            model: model.trim_start_matches("models/").to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GenerateContentBody<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn build_body(request: &GenerateRequest) -> GenerateContentBody<'_> {
    let mut parts: Vec<Part<'_>> = request
        .texts
        .iter()
        .map(|text| Part::Text { text: text.as_str() })
        .collect();

    if let Some(image) = &request.image {
        parts.push(Part::Inline {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: STANDARD.encode(&image.data),
            },
        });
    }

    GenerateContentBody {
        contents: [Content { role: "user", parts }],
        generation_config: request.json.then_some(GenerationConfig {
            response_mime_type: "application/json",
        }),
    }
}

fn reply_text(response: GenerateContentResponse) -> Result<String, UpstreamError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(UpstreamError::InvalidResponse(
            "response contained no text".to_string(),
        ));
    }
    Ok(text.to_string())
}

#[async_trait]
impl AiGateway for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, UpstreamError> {
        debug!(
            model = %self.model,
            parts = request.texts.len(),
            image = request.image.is_some(),
            json = request.json,
            "Calling Gemini"
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&build_body(&request))
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
        reply_text(parsed)
    }
}
