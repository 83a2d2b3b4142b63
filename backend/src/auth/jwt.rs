//! JWT token issuance and validation
//!
//! Tokens are HS256-signed, self-contained session claims. The signing
//! secret is read once at startup; there is no server-side revocation.

use anyhow::Result;
use assist_ai_shared::{AuthError, Role};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Identity fields embedded in a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// Subject (account email)
    pub sub: String,
    pub role: Role,
    /// School scope, set for admin sessions
    pub school: Option<String>,
}

impl TokenSubject {
    pub fn teacher(email: impl Into<String>) -> Self {
        Self {
            sub: email.into(),
            role: Role::Teacher,
            school: None,
        }
    }

    pub fn admin(email: impl Into<String>, school: impl Into<String>) -> Self {
        Self {
            sub: email.into(),
            role: Role::Admin,
            school: Some(school.into()),
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Identity portion of the claims
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            sub: self.sub.clone(),
            role: self.role,
            school: self.school.clone(),
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token lifetimes per role
#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub teacher: Duration,
    pub admin: Duration,
}

/// JWT service for token operations
///
/// Keys are derived once and shared behind `Arc`, so cloning is cheap and
/// the service is safe to use from any number of concurrent requests.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    lifetimes: TokenLifetimes,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    pub fn new(secret: &str, teacher_ttl_secs: i64, admin_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            lifetimes: TokenLifetimes {
                teacher: Duration::seconds(teacher_ttl_secs),
                admin: Duration::seconds(admin_ttl_secs),
            },
        }
    }

    /// Issue a token for `subject` that expires `ttl` from now
    pub fn issue(&self, subject: &TokenSubject, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.sub.clone(),
            role: subject.role,
            school: subject.school.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue {} token: {}", subject.role, e))
    }

    /// Issue a token using the configured lifetime for the subject's role
    pub fn issue_for_role(&self, subject: &TokenSubject) -> Result<String> {
        self.issue(subject, self.lifetime(subject.role))
    }

    /// Configured token lifetime for a role
    pub fn lifetime(&self, role: Role) -> Duration {
        match role {
            Role::Teacher => self.lifetimes.teacher,
            Role::Admin => self.lifetimes.admin,
        }
    }

    /// Validate a token and return its claims
    ///
    /// Every failure is reported as `AuthError::InvalidToken`.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        // jsonwebtoken accepts exp == now; a token is only live strictly before exp
        if claims.exp <= Utc::now().timestamp() {
            debug!("Token rejected: expired");
            return Err(AuthError::InvalidToken);
        }
        if claims.sub.trim().is_empty() {
            debug!("Token rejected: empty subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 1800, 3600)
    }

    #[test]
    fn test_issue_and_validate_teacher_token() {
        let service = create_test_service();
        let subject = TokenSubject::teacher("a@x.com");

        let token = service.issue_for_role(&subject).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.subject(), subject);
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_admin_token_carries_school() {
        let service = create_test_service();
        let subject = TokenSubject::admin("admin@school.com", "Green Valley");

        let token = service.issue_for_role(&subject).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.school.as_deref(), Some("Green Valley"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_zero_ttl_token_rejected() {
        let service = create_test_service();
        let token = service
            .issue(&TokenSubject::teacher("a@x.com"), Duration::zero())
            .unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_negative_ttl_token_rejected() {
        let service = create_test_service();
        let token = service
            .issue(&TokenSubject::teacher("a@x.com"), Duration::seconds(-120))
            .unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = JwtService::new("secret-one", 1800, 3600);
        let verifier = JwtService::new("secret-two", 1800, 3600);
        let token = issuer.issue_for_role(&TokenSubject::teacher("a@x.com")).unwrap();

        assert_eq!(verifier.validate(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert_eq!(
            service.validate("invalid.token.here").unwrap_err(),
            AuthError::InvalidToken
        );
        assert_eq!(service.validate("").unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_empty_subject_rejected() {
        let service = create_test_service();
        let token = service
            .issue(&TokenSubject::teacher(""), Duration::minutes(5))
            .unwrap();

        assert_eq!(service.validate(&token).unwrap_err(), AuthError::InvalidToken);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = create_test_service();
        let token = service.issue_for_role(&TokenSubject::teacher("a@x.com")).unwrap();
        let other = service.issue_for_role(&TokenSubject::teacher("b@x.com")).unwrap();

        // Splice b's payload onto a's signature
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(service.validate(&forged).is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let cloned = service.clone();
        let token = service.issue_for_role(&TokenSubject::teacher("a@x.com")).unwrap();
        assert!(cloned.validate(&token).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_issue_then_validate_round_trips(
            sub in "[a-z0-9]{1,16}@[a-z]{1,10}\\.com",
            admin in any::<bool>(),
            school in "[A-Za-z ]{1,20}",
            ttl in 60i64..100_000,
        ) {
            let service = create_test_service();
            let subject = if admin {
                TokenSubject::admin(sub, school)
            } else {
                TokenSubject::teacher(sub)
            };

            let token = service.issue(&subject, Duration::seconds(ttl)).unwrap();
            let claims = service.validate(&token).unwrap();
            prop_assert_eq!(claims.subject(), subject);
        }
    }
}
