//! Generative AI and translation clients
//!
//! Both providers sit behind traits so handlers receive them as
//! `Arc<dyn ...>` from application state and tests can script replies.
//! Clients only move text over the wire; prompt wording and fallback
//! payloads belong to the services that call them.

mod gemini;
pub mod parse;
pub mod prompts;
mod translation;

pub use gemini::GeminiClient;
pub use translation::HuggingFaceTranslator;

use crate::config::{AiConfig, TranslationConfig};
use anyhow::Result;
use assist_ai_shared::UpstreamError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Image attached to a generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A single-turn generation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Prompt segments, sent in order as separate text parts
    pub texts: Vec<String>,
    pub image: Option<ImagePart>,
    /// Ask the provider for an `application/json` reply
    pub json: bool,
}

impl GenerateRequest {
    pub fn new(texts: Vec<String>) -> Self {
        Self {
            texts,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: Option<ImagePart>) -> Self {
        self.image = image;
        self
    }

    pub fn expect_json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Text generation provider
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generate a reply and return its text, trimmed
    async fn generate(&self, request: GenerateRequest) -> Result<String, UpstreamError>;
}

/// Machine translation provider
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate between NLLB language tags (e.g. `eng_Latn`)
    async fn translate(
        &self,
        text: &str,
        source_tag: &str,
        target_tag: &str,
    ) -> Result<String, UpstreamError>;
}

/// Build the AI gateway, or `None` when disabled or missing a key
pub fn build_gateway(config: &AiConfig) -> Result<Option<Arc<dyn AiGateway>>> {
    if !config.enabled {
        info!("AI gateway disabled");
        return Ok(None);
    }
    let Some(api_key) = config.api_key.clone() else {
        warn!("AI gateway enabled but no API key configured; AI endpoints will return fallbacks");
        return Ok(None);
    };

    let client = GeminiClient::new(api_key, &config.base_url, &config.model, config.timeout_secs)?;
    info!(model = %config.model, "AI gateway configured");
    Ok(Some(Arc::new(client)))
}

/// Build the translator, or `None` when disabled
pub fn build_translator(config: &TranslationConfig) -> Result<Option<Arc<dyn Translator>>> {
    if !config.enabled {
        return Ok(None);
    }

    let client = HuggingFaceTranslator::new(
        config.api_key.clone(),
        &config.base_url,
        &config.model,
        config.timeout_secs,
    )?;
    info!(model = %config.model, "Translation provider configured");
    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_gateway_requires_enabled_and_key() {
        let mut config = AiConfig::default();
        assert!(build_gateway(&config).unwrap().is_none());

        config.enabled = true;
        assert!(build_gateway(&config).unwrap().is_none());

        config.api_key = Some(Secret::new("key".to_string()));
        assert!(build_gateway(&config).unwrap().is_some());
    }

    #[test]
    fn test_translator_disabled_by_default() {
        assert!(build_translator(&TranslationConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_request_builder() {
        let request = GenerateRequest::new(vec!["a".to_string()])
            .with_image(Some(ImagePart {
                mime_type: "image/png".to_string(),
                data: vec![1, 2, 3],
            }))
            .expect_json();
        assert!(request.json);
        assert_eq!(request.texts, vec!["a"]);
        assert!(request.image.is_some());
    }
}
