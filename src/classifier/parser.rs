//! Interpretation of raw oracle answers.
//!
//! Parsing is pure and total: any answer that cannot be read as the expected
//! structure falls back to a deterministic heuristic derived from the event
//! alone, so triage always ends with some classification. An answer whose
//! `status` is unrecognized is deliberately conflated with "not emergency".

use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::models::{Classification, IncomingEvent, TriageStatus};

/// Parse a raw oracle answer into a classification, falling back to
/// [`heuristic`] on any failure. Pure function: identical input yields
/// identical output.
pub fn parse(raw: &str, event: &IncomingEvent) -> Classification {
    match parse_answer(raw) {
        Ok(classification) => classification,
        Err(e) => {
            tracing::debug!(error = %e, "Oracle answer not usable, deriving heuristic classification");
            heuristic(event)
        }
    }
}

/// Strict interpretation of the oracle answer.
///
/// The answer must contain a JSON object; the four expected keys are read
/// leniently, substituting the empty string for anything missing. Only the
/// literal status `emergency` (case-insensitive) classifies as an emergency.
pub fn parse_answer(raw: &str) -> Result<Classification> {
    let text = extract_json_object(raw).ok_or_else(|| {
        AppError::MalformedAnswer("answer contains no JSON object".to_string())
    })?;

    let value: Value = serde_json::from_str(&text)
        .map_err(|e| AppError::MalformedAnswer(format!("answer is not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| AppError::MalformedAnswer("answer is not a JSON object".to_string()))?;

    Ok(Classification {
        status: TriageStatus::from_oracle(&field(object, "status")),
        location: field(object, "location"),
        issue: field(object, "issue"),
        recipient_phone_number: field(object, "recipient_phone_number"),
    })
}

/// Deterministic fallback classification, derived only from the event's
/// optional fields with empty-string defaults. Never fails.
pub fn heuristic(event: &IncomingEvent) -> Classification {
    Classification {
        status: TriageStatus::NotEmergency,
        location: event.extracted_field("location"),
        issue: event.extracted_field("issues"),
        recipient_phone_number: event.context_field("recipient_phone_number"),
    }
}

fn field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Extract the first top-level JSON object from raw text, tolerating
/// wrappers like markdown fences or prose around the object.
fn extract_json_object(raw: &str) -> Option<String> {
    let mut start = None;
    let mut depth: i32 = 0;
    for (idx, ch) in raw.char_indices() {
        if ch == '{' {
            if start.is_none() {
                start = Some(idx);
            }
            depth += 1;
        } else if ch == '}' && depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some(s) = start {
                    return Some(raw[s..=idx].to_string());
                }
            }
        }
    }
    None
}
