//! Common test utilities for integration tests
//!
//! `TestApp` runs the full router over an in-memory document store, with an
//! optional scripted AI provider standing in for Gemini.

#![allow(dead_code)]

use assist_ai_backend::{
    ai::{AiGateway, GenerateRequest, Translator},
    config::AppConfig,
    routes,
    state::AppState,
    store::MemoryStore,
};
use assist_ai_shared::UpstreamError;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fake::{faker::name::en::Name, Fake};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@assist.ai";
pub const ADMIN_PASSWORD: &str = "admin-password-123";
const BOUNDARY: &str = "assist-test-boundary";

/// AI provider that always answers with the same scripted result
pub struct ScriptedAi {
    reply: Result<String, UpstreamError>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedAi {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(UpstreamError::Status {
                status: 503,
                body: "overloaded".to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AiGateway for ScriptedAi {
    async fn generate(&self, request: GenerateRequest) -> Result<String, UpstreamError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// App without an AI provider
    pub fn new() -> Self {
        Self::with_providers(test_config(), None, None)
    }

    pub fn with_ai(ai: Arc<ScriptedAi>) -> Self {
        Self::with_providers(test_config(), Some(ai), None)
    }

    /// App with real provider clients and a custom configuration
    pub fn with_providers(
        config: AppConfig,
        ai: Option<Arc<dyn AiGateway>>,
        translator: Option<Arc<dyn Translator>>,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), config)
            .unwrap()
            .with_ai(ai)
            .with_translator(translator);

        Self {
            app: routes::create_router(state),
            store,
        }
    }

    /// Store operations performed so far
    pub fn store_calls(&self) -> usize {
        self.store.call_count()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
        };
        (status, value)
    }

    fn builder(method: &str, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let request = Self::builder("GET", path, token)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let request = Self::builder("DELETE", path, token)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    /// Send a JSON body with any method
    pub async fn json(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let request = Self::builder(method, path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.json("POST", path, token, body).await
    }

    /// Post a multipart form of text fields
    pub async fn multipart(
        &self,
        path: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let request = Self::builder("POST", path, token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Register a fresh teacher and return (email, token)
    pub async fn register_teacher(&self, school: &str) -> (String, String) {
        let email = format!("teacher_{}@school.edu", uuid::Uuid::new_v4().simple());
        let name: String = Name().fake();
        let (status, body) = self
            .post(
                "/api/teacher/register",
                None,
                json!({
                    "name": name,
                    "email": email,
                    "password": "SecurePassword123!",
                    "school": school,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

        let token = body["access_token"].as_str().unwrap().to_string();
        (email, token)
    }

    /// Log in as the configured admin and return the token
    pub async fn admin_token(&self, school: &str) -> String {
        let (status, body) = self
            .post(
                "/api/admin/login",
                None,
                json!({
                    "email": ADMIN_EMAIL,
                    "password": ADMIN_PASSWORD,
                    "school": school,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.jwt.secret = Secret::new("test-secret-key-for-testing-only-32chars".to_string());
    config.admin.email = Some(ADMIN_EMAIL.to_string());
    config.admin.password = Some(Secret::new(ADMIN_PASSWORD.to_string()));
    config
}
