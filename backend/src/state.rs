//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! External clients (document store, AI gateway, translator) are built once
//! at startup and held as trait objects, so tests can swap in the in-memory
//! store and scripted providers.

use crate::ai::{AiGateway, Translator};
use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::store::DocumentStore;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Admin account taken from configuration, with the password pre-hashed
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

/// Shared application state
///
/// Every field is an `Arc` or already cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub ai: Option<Arc<dyn AiGateway>>,
    pub translator: Option<Arc<dyn Translator>>,
    pub admin: Option<Arc<AdminCredentials>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys and hashes the configured admin password, so
    /// this should only be called once at startup.
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(
            config.jwt.secret.expose_secret(),
            config.jwt.teacher_token_ttl_secs,
            config.jwt.admin_token_ttl_secs,
        );

        let admin = match config.admin.credentials() {
            Some((email, password)) => Some(Arc::new(AdminCredentials {
                email: email.to_string(),
                password_hash: PasswordService::hash(password)?,
            })),
            None => None,
        };

        Ok(Self {
            store,
            config: Arc::new(config),
            jwt,
            ai: None,
            translator: None,
            admin,
            metrics: None,
        })
    }

    pub fn with_ai(mut self, ai: Option<Arc<dyn AiGateway>>) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_translator(mut self, translator: Option<Arc<dyn Translator>>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn ai(&self) -> Option<&dyn AiGateway> {
        self.ai.as_deref()
    }

    #[inline]
    pub fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }
}
