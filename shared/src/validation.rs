//! Input validation functions
//!
//! Request payloads are checked here before any business logic runs.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum length of free-text fields (notes, reminders, reflections)
pub const MAX_TEXT_LEN: usize = 10_000;

/// A rejected input, tagged with the request field it came from
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Canonical form of an email address used as an account key.
///
/// Surrounding whitespace is dropped and the address is lowercased, so
/// `Ada@School.edu` and `ada@school.edu` name the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }
    if email.len() > 255 {
        return Err(ValidationError::new("email", "Email too long"));
    }
    let dotted_domain = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !email.validate_email() || !dotted_domain {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if password.len() > 128 {
        return Err(ValidationError::new("password", "Password too long"));
    }
    Ok(())
}

/// Validate that a required text field is present and of sane length
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} cannot be empty", get_field_display_label(field)),
        ));
    }
    if value.len() > MAX_TEXT_LEN {
        return Err(ValidationError::new(
            field,
            format!("{} is too long", get_field_display_label(field)),
        ));
    }
    Ok(())
}

/// Validate a calendar date in YYYY-MM-DD form
pub fn validate_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("date", format!("Invalid date '{}', expected YYYY-MM-DD", date))
        })
}

/// Validate a time of day in HH:MM form
pub fn validate_time(time: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time", format!("Invalid time '{}', expected HH:MM", time)))
}

/// Validate syllabus chapter numbers
pub fn validate_chapters(chapters: &[i32]) -> Result<(), ValidationError> {
    if let Some(bad) = chapters.iter().find(|c| **c < 0) {
        return Err(ValidationError::new(
            "completed_chapters",
            format!("Chapter numbers cannot be negative: {}", bad),
        ));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "email" => "Email",
        "password" => "Password",
        "school" => "School",
        "preferred_language" => "Preferred Language",
        "grade" => "Grade",
        "section" => "Section",
        "subject" => "Subject",
        "text" => "Text",
        "title" => "Title",
        "message" => "Message",
        "date" => "Date",
        "time" => "Time",
        "completed_chapters" => "Completed Chapters",
        _ => field_name,
    }
}
