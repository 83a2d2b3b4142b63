//! Error types for the Assist AI application

use thiserror::Error;

/// Authentication error types
///
/// Token validation deliberately collapses every failure (bad signature,
/// malformed structure, expiry, missing subject) into `InvalidToken`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingToken,

    #[error("Invalid authorization format")]
    InvalidScheme,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("School does not match records")]
    SchoolMismatch,

    #[error("Insufficient role for this resource")]
    Forbidden,
}

/// Failures talking to the AI or translation provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}
