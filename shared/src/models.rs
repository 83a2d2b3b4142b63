//! Data models for the Assist AI application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role carried in session tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Teacher profile as returned to clients (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherProfile {
    pub name: String,
    pub email: String,
    pub school: String,
    pub preferred_language: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Admin login audit entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminSession {
    pub id: String,
    pub email: String,
    pub school: String,
    pub preferred_language: String,
    pub login_time: DateTime<Utc>,
}

/// Classroom note
///
/// `kind` is one of Critical, Observation, Success or AI Insight; `data`
/// carries the structured reflection payload for AI insights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub text: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Calendar task (holiday or work day)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A class taught by a teacher, with syllabus progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub grade: String,
    pub section: String,
    pub subject: String,
    #[serde(default)]
    pub completed_chapters: Vec<i32>,
    #[serde(default)]
    pub teacher_email: Option<String>,
}

/// Dated reminder on the teacher's calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM
    #[serde(default)]
    pub time: Option<String>,
    pub text: String,
    #[serde(default)]
    pub teacher_email: Option<String>,
}

/// Structured AI analysis of a teacher reflection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackAnalysis {
    pub good_things: String,
    pub bad_things: String,
    pub improvement: String,
}

impl FeedbackAnalysis {
    /// Payload substituted when the AI provider cannot produce an analysis
    pub fn unavailable() -> Self {
        Self {
            good_things: "Unable to analyze at this moment.".to_string(),
            bad_things: "Please try again.".to_string(),
            improvement: "Server error.".to_string(),
        }
    }
}

/// Whether a teacher found the suggested improvement useful
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effectiveness {
    Yes,
    No,
}

impl From<bool> for Effectiveness {
    fn from(successful: bool) -> Self {
        if successful {
            Effectiveness::Yes
        } else {
            Effectiveness::No
        }
    }
}

/// Reflection submitted for feedback, together with its AI analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackItem {
    pub id: String,
    pub date: String,
    pub preview: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub full_text: String,
    pub language: String,
    pub analysis: FeedbackAnalysis,
    #[serde(default)]
    pub effectiveness: Option<Effectiveness>,
    pub teacher_email: String,
}

/// Mentor-style reply to a reflection submitted through the chat assistant
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReflectionReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_dive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_fix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow_prep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_tip: Option<String>,
}
