//! Identity extraction
//!
//! Provides Axum extractors that turn a bearer token into a caller identity.
//! This is the only place that decides who a request acts as; handlers use
//! the resolved email as the ownership key for every store operation.

use crate::error::ApiError;
use crate::state::AppState;
use assist_ai_shared::{AuthError, Role};
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

/// Authenticated caller resolved from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
    pub school: Option<String>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extract the bearer token from request headers
///
/// Returns `Ok(None)` when no Authorization header is present at all. The
/// scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidScheme)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidScheme)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidScheme);
    }
    Ok(Some(token))
}

/// Resolve the caller identity for a request
pub fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let token = match bearer_token(headers)? {
        Some(token) => token,
        None if state.config().auth.demo_mode => {
            debug!("No Authorization header, using demo identity");
            return Ok(AuthUser {
                email: state.config().auth.demo_email.clone(),
                role: Role::Teacher,
                school: None,
            });
        }
        None => return Err(AuthError::MissingToken),
    };

    let claims = state.jwt().validate(token)?;

    Ok(AuthUser {
        email: claims.sub,
        role: claims.role,
        school: claims.school,
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        resolve_identity(&app_state, &parts.headers).map_err(|e| {
            metrics::counter!("auth_rejections_total", "reason" => reason_label(&e)).increment(1);
            ApiError::from(e)
        })
    }
}

/// Authenticated caller holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            metrics::counter!("auth_rejections_total", "reason" => "forbidden").increment(1);
            return Err(AuthError::Forbidden.into());
        }
        Ok(AdminUser(user))
    }
}

/// Authenticated caller acting as a teacher
///
/// Admin tokens carry no teacher record, so they are refused with 403.
#[derive(Debug, Clone)]
pub struct TeacherUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for TeacherUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            metrics::counter!("auth_rejections_total", "reason" => "forbidden").increment(1);
            return Err(AuthError::Forbidden.into());
        }
        Ok(TeacherUser(user))
    }
}

fn reason_label(error: &AuthError) -> &'static str {
    match error {
        AuthError::MissingToken => "missing",
        AuthError::InvalidScheme => "scheme",
        AuthError::InvalidToken => "invalid",
        AuthError::InvalidCredentials | AuthError::SchoolMismatch => "credentials",
        AuthError::Forbidden => "forbidden",
    }
}
