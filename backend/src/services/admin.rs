//! Admin login and session audit

use crate::auth::{JwtService, PasswordService, TokenSubject};
use crate::error::ApiError;
use crate::repositories::Repository;
use crate::state::AdminCredentials;
use crate::store::DocumentStore;
use assist_ai_shared::validation::{normalize_email, validate_required};
use assist_ai_shared::{AdminLoginRequest, AdminSession, AuthError, Role, TokenResponse};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct AdminService;

impl AdminService {
    /// Check the configured admin credentials, record the session and issue
    /// a token scoped to the chosen school
    pub async fn login(
        store: &dyn DocumentStore,
        jwt: &JwtService,
        admin: Option<&AdminCredentials>,
        req: AdminLoginRequest,
    ) -> Result<TokenResponse, ApiError> {
        validate_required("school", &req.school).map_err(ApiError::Validation)?;

        let Some(admin) = admin else {
            warn!("Admin login attempted but no admin account is configured");
            return Err(reject(&req.email));
        };

        let email = normalize_email(&req.email);
        let password_ok =
            PasswordService::verify_async(req.password, admin.password_hash.clone()).await?;
        if email != normalize_email(&admin.email) || !password_ok {
            return Err(reject(&email));
        }

        let session = AdminSession {
            id: Uuid::new_v4().simple().to_string(),
            email: email.clone(),
            school: req.school.trim().to_string(),
            preferred_language: req.preferred_language.clone(),
            login_time: Utc::now(),
        };
        let school = session.school.clone();
        Repository::new(store, &email).insert(session).await?;

        metrics::counter!("logins_total", "role" => "admin").increment(1);
        info!(email = %email, role = "admin", school = %school, "Admin logged in");

        let token = jwt.issue_for_role(&TokenSubject::admin(&email, school))?;
        Ok(TokenResponse::bearer(token, req.preferred_language, Role::Admin))
    }

    /// The admin's recorded sessions, newest first
    pub async fn sessions(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Vec<AdminSession>, ApiError> {
        let mut sessions = Repository::<AdminSession>::new(store, email).list().await?;
        sessions.sort_by(|a, b| b.login_time.cmp(&a.login_time));
        Ok(sessions)
    }
}

fn reject(email: &str) -> ApiError {
    warn!(email = %email, "Admin login rejected");
    metrics::counter!("auth_rejections_total", "reason" => "credentials").increment(1);
    AuthError::InvalidCredentials.into()
}
