//! Parsing of JSON replies from the AI provider
//!
//! Providers sometimes wrap JSON in markdown fences even when asked for
//! `application/json`; both parsers strip those first.

use assist_ai_shared::{FeedbackAnalysis, ReflectionReply};
use serde_json::{Map, Value};

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_feedback_analysis(raw: &str) -> Result<FeedbackAnalysis, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

/// Parse a reflection reply, keeping raw text as the acknowledgement when
/// the reply is not a JSON object
///
/// Fields that come back as numbers, lists or objects are rendered as text
/// rather than rejecting the whole reply.
pub fn parse_reflection(raw: &str) -> ReflectionReply {
    let Ok(mut fields) = serde_json::from_str::<Map<String, Value>>(strip_code_fences(raw)) else {
        return ReflectionReply {
            acknowledgement: Some(raw.trim().to_string()),
            ..Default::default()
        };
    };

    let mut take = |key: &str| fields.remove(key).and_then(value_text);
    ReflectionReply {
        acknowledgement: take("acknowledgement"),
        deep_dive: take("deep_dive"),
        quick_fix: take("quick_fix"),
        tomorrow_prep: take("tomorrow_prep"),
        pro_tip: take("pro_tip"),
    }
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Array(items) => {
            let lines: Vec<String> = items.into_iter().filter_map(value_text).collect();
            Some(lines.join("\n"))
        }
        other => Some(other.to_string()),
    }
}
