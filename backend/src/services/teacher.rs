//! Teacher accounts: registration, login and profile
//!
//! Password hashing and verification run on the blocking thread pool.
//! Registration relies on the store's key uniqueness, so two concurrent
//! sign-ups with one email cannot both succeed.

use crate::auth::{JwtService, PasswordService, TokenSubject};
use crate::error::ApiError;
use crate::repositories::Repository;
use crate::store::{DocumentStore, StoreError, TeacherRecord};
use assist_ai_shared::validation::{
    normalize_email, validate_email, validate_password, validate_required,
};
use assist_ai_shared::{
    AuthError, RegisterTeacherRequest, Role, TeacherLoginRequest, TeacherProfile, TokenResponse,
    UpdateProfileRequest,
};
use chrono::Utc;
use tracing::{info, warn};

pub struct TeacherService;

impl TeacherService {
    /// Register a teacher and sign them in
    pub async fn register(
        store: &dyn DocumentStore,
        jwt: &JwtService,
        req: RegisterTeacherRequest,
    ) -> Result<TokenResponse, ApiError> {
        let email = normalize_email(&req.email);
        validate_required("name", &req.name).map_err(ApiError::Validation)?;
        validate_email(&email).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;
        validate_required("school", &req.school).map_err(ApiError::Validation)?;

        let preferred_language = match req.preferred_language.trim() {
            "" => "en".to_string(),
            lang => lang.to_string(),
        };

        let password_hash = PasswordService::hash_async(req.password).await?;
        let record = TeacherRecord {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password_hash,
            school: req.school.trim().to_string(),
            preferred_language: preferred_language.clone(),
            profile_picture: None,
            created_at: Utc::now(),
        };

        Repository::new(store, &email)
            .insert(record)
            .await
            .map_err(|e| match e {
                StoreError::Duplicate { .. } => {
                    ApiError::Conflict("Email already registered".to_string())
                }
                other => ApiError::from(other),
            })?;

        info!(email = %email, role = "teacher", "Teacher registered");
        let token = jwt.issue_for_role(&TokenSubject::teacher(&email))?;
        Ok(TokenResponse::bearer(token, preferred_language, Role::Teacher))
    }

    /// Verify credentials and issue a teacher token
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(
        store: &dyn DocumentStore,
        jwt: &JwtService,
        req: TeacherLoginRequest,
    ) -> Result<TokenResponse, ApiError> {
        let email = normalize_email(&req.email);
        let email = email.as_str();
        let Some(teacher) = Repository::<TeacherRecord>::new(store, email)
            .get(email)
            .await?
        else {
            PasswordService::verify_dummy_async(req.password).await?;
            return Err(reject_login(email, AuthError::InvalidCredentials));
        };

        let valid = PasswordService::verify_async(req.password, teacher.password_hash.clone()).await?;
        if !valid {
            return Err(reject_login(email, AuthError::InvalidCredentials));
        }

        if let Some(school) = req.school.as_deref().filter(|s| !s.is_empty()) {
            if school != teacher.school {
                return Err(reject_login(email, AuthError::SchoolMismatch));
            }
        }

        metrics::counter!("logins_total", "role" => "teacher").increment(1);
        info!(email = %email, role = "teacher", "Teacher logged in");

        let token = jwt.issue_for_role(&TokenSubject::teacher(email))?;
        Ok(TokenResponse::bearer(
            token,
            teacher.preferred_language,
            Role::Teacher,
        ))
    }

    pub async fn get_profile(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<TeacherProfile, ApiError> {
        Repository::<TeacherRecord>::new(store, email)
            .get(email)
            .await?
            .map(|t| t.to_profile())
            .ok_or_else(|| ApiError::NotFound("Teacher not found".to_string()))
    }

    /// Update the display name, and the picture when one is given
    pub async fn update_profile(
        store: &dyn DocumentStore,
        email: &str,
        req: UpdateProfileRequest,
    ) -> Result<TeacherProfile, ApiError> {
        validate_required("name", &req.name).map_err(ApiError::Validation)?;

        let repo = Repository::<TeacherRecord>::new(store, email);
        let mut teacher = repo
            .get(email)
            .await?
            .ok_or_else(|| ApiError::NotFound("Teacher not found".to_string()))?;

        teacher.name = req.name.trim().to_string();
        if let Some(picture) = req.profile_picture {
            teacher.profile_picture = Some(picture);
        }

        if !repo.replace(teacher.clone()).await? {
            return Err(ApiError::NotFound("Teacher not found".to_string()));
        }
        Ok(teacher.to_profile())
    }
}

fn reject_login(email: &str, reason: AuthError) -> ApiError {
    warn!(email = %email, reason = %reason, "Teacher login rejected");
    metrics::counter!("auth_rejections_total", "reason" => "credentials").increment(1);
    reason.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn jwt() -> JwtService {
        JwtService::new("test-secret", 1800, 3600)
    }

    fn register_request(email: &str) -> RegisterTeacherRequest {
        RegisterTeacherRequest {
            name: "A".to_string(),
            email: email.to_string(),
            password: "pw123456".to_string(),
            school: "S".to_string(),
            preferred_language: "en".to_string(),
        }
    }

    fn login_request(email: &str, password: &str, school: Option<&str>) -> TeacherLoginRequest {
        TeacherLoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            school: school.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_yields_teacher_claims() {
        let store = MemoryStore::new();
        let jwt = jwt();

        let registered = TeacherService::register(&store, &jwt, register_request("a@x.com"))
            .await
            .unwrap();
        assert_eq!(registered.token_type, "bearer");

        let login = TeacherService::login(&store, &jwt, login_request("a@x.com", "pw123456", None))
            .await
            .unwrap();
        let claims = jwt.validate(&login.access_token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(login.preferred_language, "en");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let store = MemoryStore::new();
        let jwt = jwt();
        TeacherService::register(&store, &jwt, register_request("a@x.com"))
            .await
            .unwrap();

        let err = TeacherService::register(&store, &jwt, register_request("a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref msg) if msg == "Email already registered"));
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let store = Arc::new(MemoryStore::new());
        let jwt = jwt();

        let (first, second) = tokio::join!(
            TeacherService::register(store.as_ref(), &jwt, register_request("race@x.com")),
            TeacherService::register(store.as_ref(), &jwt, register_request("race@x.com")),
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let err = first.err().or(second.err()).unwrap();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let store = MemoryStore::new();
        let jwt = jwt();
        TeacherService::register(&store, &jwt, register_request("a@x.com"))
            .await
            .unwrap();

        for req in [
            login_request("a@x.com", "wrong-pass", None),
            login_request("nobody@x.com", "pw123456", None),
            login_request("a@x.com", "pw123456", Some("Other School")),
        ] {
            let err = TeacherService::login(&store, &jwt, req).await.unwrap_err();
            assert!(matches!(err, ApiError::Unauthorized(_)));
        }

        // Matching school is accepted
        TeacherService::login(&store, &jwt, login_request("a@x.com", "pw123456", Some("S")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_email_case_names_one_account() {
        let store = MemoryStore::new();
        let jwt = jwt();
        TeacherService::register(&store, &jwt, register_request("Ada@School.edu"))
            .await
            .unwrap();

        let err = TeacherService::register(&store, &jwt, register_request(" ada@school.edu "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        let login = TeacherService::login(
            &store,
            &jwt,
            login_request("ADA@school.EDU", "pw123456", None),
        )
        .await
        .unwrap();
        assert_eq!(jwt.validate(&login.access_token).unwrap().sub, "ada@school.edu");
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let store = MemoryStore::new();
        let mut req = register_request("not-an-email");
        let err = TeacherService::register(&store, &jwt(), req.clone()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        req.email = "a@x.com".to_string();
        req.password = "short".to_string();
        let err = TeacherService::register(&store, &jwt(), req).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_profile_update_keeps_picture_when_absent() {
        let store = MemoryStore::new();
        TeacherService::register(&store, &jwt(), register_request("a@x.com"))
            .await
            .unwrap();

        let updated = TeacherService::update_profile(
            &store,
            "a@x.com",
            UpdateProfileRequest {
                name: "Asha".to_string(),
                profile_picture: Some("data:image/png;base64,AAA".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Asha");

        let updated = TeacherService::update_profile(
            &store,
            "a@x.com",
            UpdateProfileRequest {
                name: "Asha R".to_string(),
                profile_picture: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.profile_picture.as_deref(), Some("data:image/png;base64,AAA"));

        let profile = TeacherService::get_profile(&store, "a@x.com").await.unwrap();
        assert_eq!(profile.name, "Asha R");
    }

    #[tokio::test]
    async fn test_profile_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = TeacherService::get_profile(&store, "ghost@x.com").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
