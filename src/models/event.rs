use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

use super::classification::{Classification, RoutingOutcome};

/// One inbound call-transcript payload.
///
/// Only `transcript`, `extracted_data` and `context_details` carry meaning for
/// triage; every other field is preserved verbatim in `extra` and travels with
/// the event through the audit log and the response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingEvent {
    /// Conversation transcript
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transcript: String,

    /// Structured data extracted from the call, absent when the upstream
    /// pipeline produced none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<Map<String, Value>>,

    /// Call context (caller identifiers etc.), absent when not provided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_details: Option<Map<String, Value>>,

    /// Additional fields preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IncomingEvent {
    /// Interpret an arbitrary JSON value as an event.
    ///
    /// Anything that is not a JSON object is rejected as invalid input; this
    /// is the only fatal condition on the ingestion path.
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(AppError::InvalidInput(
                "event payload must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::InvalidInput(format!("malformed event payload: {}", e)))
    }

    /// Whether the event carries extracted data and is therefore triaged
    pub fn has_extracted_data(&self) -> bool {
        self.extracted_data.is_some()
    }

    /// Read a field from `extracted_data` as text, empty when missing
    pub fn extracted_field(&self, key: &str) -> String {
        text_field(self.extracted_data.as_ref(), key)
    }

    /// Read a field from `context_details` as text, empty when missing
    pub fn context_field(&self, key: &str) -> String {
        text_field(self.context_details.as_ref(), key)
    }
}

/// Coerce an optional map field to text. Strings come through unquoted;
/// other JSON values keep their serialized form; null counts as missing.
fn text_field(map: Option<&Map<String, Value>>, key: &str) -> String {
    match map.and_then(|m| m.get(key)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// An event after triage: the original payload plus the classification and
/// routing decision derived for it.
///
/// Both attachments are `None` exactly when the event arrived without
/// `extracted_data` — such events are stored but never classified or routed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: IncomingEvent,

    /// Derived classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,

    /// Routing decision and destination acknowledgement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingOutcome>,
}

impl EnrichedEvent {
    /// Terminal form for events without extracted data
    pub fn unprocessed(event: IncomingEvent) -> Self {
        Self {
            event,
            classification: None,
            routing: None,
        }
    }

    /// Fully triaged form
    pub fn routed(
        event: IncomingEvent,
        classification: Classification,
        routing: RoutingOutcome,
    ) -> Self {
        Self {
            event,
            classification: Some(classification),
            routing: Some(routing),
        }
    }

    /// Whether triage produced a classification for this event
    pub fn was_classified(&self) -> bool {
        self.classification.is_some()
    }
}
