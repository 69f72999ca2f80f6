use serde_json::{Map, Value};

use crate::models::IncomingEvent;

/// System instruction sent with every classification request
pub const SYSTEM_PROMPT: &str = "You are an emergency evaluation assistant.";

/// Build the fixed-structure user prompt for one event.
///
/// The oracle is instructed to answer with a JSON object carrying exactly
/// the keys `status`, `location`, `issue` and `recipient_phone_number`; the
/// transcript and the serialized extracted/context data are embedded
/// verbatim.
pub fn build_user_prompt(event: &IncomingEvent) -> String {
    format!(
        "You are an emergency evaluation assistant. Analyze the following emergency call data \
         and determine if it is an emergency. Return a JSON object with the following keys:\n\
         - status (with values 'emergency' or 'not emergency')\n\
         - location\n\
         - issue\n\
         - recipient_phone_number\n\n\
         Transcript: {}\n\
         Extracted Data: {}\n\
         Context Details: {}\n",
        event.transcript,
        serialize_map(event.extracted_data.as_ref()),
        serialize_map(event.context_details.as_ref()),
    )
}

fn serialize_map(map: Option<&Map<String, Value>>) -> String {
    let value = map
        .map(|m| Value::Object(m.clone()))
        .unwrap_or_else(|| Value::Object(Map::new()));
    value.to_string()
}
