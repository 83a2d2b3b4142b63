//! API request and response types

use crate::models::{ReflectionReply, Role};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Token issued on login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub preferred_language: String,
    pub role: Role,
}

impl TokenResponse {
    pub fn bearer(access_token: String, preferred_language: String, role: Role) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            preferred_language,
            role,
        }
    }
}

/// Teacher registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTeacherRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    #[serde(default = "default_language")]
    pub preferred_language: String,
}

/// Teacher login request
///
/// `school` is optional; when present it must match the registered school.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherLoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub school: Option<String>,
}

/// Admin login request; the admin picks the school at login time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
    pub school: String,
    #[serde(default = "default_language")]
    pub preferred_language: String,
}

/// Teacher profile update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

// ============================================================================
// Dashboard and Calendar Types
// ============================================================================

/// New subject (class) request; the id is generated server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub grade: String,
    pub section: String,
    pub subject: String,
}

/// New reminder request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    pub text: String,
}

/// Feedback effectiveness rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateFeedbackRequest {
    pub successful: bool,
}

// ============================================================================
// AI Assistant Types
// ============================================================================

/// Assistant conversation mode
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Chat,
    Reflection,
}

impl ChatMode {
    /// Parse a client-supplied mode, treating anything unknown as plain chat
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "reflection" => ChatMode::Reflection,
            _ => ChatMode::Chat,
        }
    }
}

/// Reply body of the assistant endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatReplyBody {
    Text(String),
    Reflection(ReflectionReply),
}

/// Assistant endpoint response
///
/// `type` is omitted on canned replies (missing input, provider failure).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub reply: ChatReplyBody,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ChatResponse {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: ChatReplyBody::Text(reply.into()),
            kind: Some("text".to_string()),
        }
    }

    pub fn reflection(reply: ReflectionReply) -> Self {
        Self {
            reply: ChatReplyBody::Reflection(reply),
            kind: Some("json".to_string()),
        }
    }

    pub fn notice(reply: impl Into<String>) -> Self {
        Self {
            reply: ChatReplyBody::Text(reply.into()),
            kind: None,
        }
    }
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_language")]
    pub source: String,
    pub target: String,
}

/// Translation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateResponse {
    pub text: String,
}

fn default_language() -> String {
    "en".to_string()
}
