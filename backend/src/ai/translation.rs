//! NLLB translation over the Hugging Face inference router

use super::Translator;
use assist_ai_shared::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct HuggingFaceTranslator {
    http: Client,
    api_key: Option<Secret<String>>,
    base_url: String,
    model: String,
}

impl HuggingFaceTranslator {
    pub fn new(
        api_key: Option<Secret<String>>,
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
            model: model.to_string(),
        })
    }
}

#[derive(Serialize)]
struct TranslationBody<'a> {
    inputs: &'a str,
    parameters: TranslationParameters<'a>,
}

#[derive(Serialize)]
struct TranslationParameters<'a> {
    src_lang: &'a str,
    tgt_lang: &'a str,
}

/// The router answers with a list on success and an object on error
#[derive(Deserialize)]
#[serde(untagged)]
enum TranslationReply {
    Translations(Vec<Translation>),
    Error { error: String },
}

#[derive(Deserialize)]
struct Translation {
    translation_text: String,
}

#[async_trait]
impl Translator for HuggingFaceTranslator {
    async fn translate(
        &self,
        text: &str,
        source_tag: &str,
        target_tag: &str,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let body = TranslationBody {
            inputs: text,
            parameters: TranslationParameters {
                src_lang: source_tag,
                tgt_lang: target_tag,
            },
        };

        let mut request = self.http.post(url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        // Error bodies are JSON too, so decode before looking at the status
        let status = response.status();
        let reply: TranslationReply = response.json().await.map_err(|e| {
            if status.is_success() {
                UpstreamError::InvalidResponse(e.to_string())
            } else {
                UpstreamError::Status {
                    status: status.as_u16(),
                    body: e.to_string(),
                }
            }
        })?;

        match reply {
            TranslationReply::Translations(list) => list
                .into_iter()
                .next()
                .map(|t| t.translation_text)
                .ok_or_else(|| UpstreamError::InvalidResponse("empty translation list".to_string())),
            TranslationReply::Error { error } => Err(UpstreamError::InvalidResponse(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator_for(server: &MockServer) -> HuggingFaceTranslator {
        HuggingFaceTranslator::new(
            Some(Secret::new("hf-key".to_string())),
            &server.uri(),
            "facebook/nllb-200-distilled-600M",
            5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_translate_sends_nllb_tags() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/facebook/nllb-200-distilled-600M"))
            .and(header("authorization", "Bearer hf-key"))
            .and(body_json(json!({
                "inputs": "Good morning",
                "parameters": { "src_lang": "eng_Latn", "tgt_lang": "hin_Deva" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "सुप्रभात" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = translator_for(&server)
            .translate("Good morning", "eng_Latn", "hin_Deva")
            .await
            .unwrap();
        assert_eq!(text, "सुप्रभात");
    }

    #[tokio::test]
    async fn test_error_object_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({ "error": "Model is loading" })),
            )
            .mount(&server)
            .await;

        let err = translator_for(&server)
            .translate("hi", "eng_Latn", "kan_Knda")
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::InvalidResponse("Model is loading".to_string()));
    }

    #[tokio::test]
    async fn test_unexpected_shape_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foo": 1 })))
            .mount(&server)
            .await;

        let err = translator_for(&server)
            .translate("hi", "eng_Latn", "kan_Knda")
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidResponse(_)));
    }
}
