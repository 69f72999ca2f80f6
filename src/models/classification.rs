use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Emergency judgment for one event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TriageStatus {
    Emergency,
    #[default]
    NotEmergency,
}

impl TriageStatus {
    /// Map the oracle's textual status onto the two recognized forms.
    ///
    /// Only the literal value `emergency` (case-insensitive) counts; every
    /// other string, recognized or not, is treated as not an emergency.
    pub fn from_oracle(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("emergency") {
            TriageStatus::Emergency
        } else {
            TriageStatus::NotEmergency
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, TriageStatus::Emergency)
    }
}

/// Structured classification derived from the oracle answer or from the
/// heuristic fallback. Field names follow the oracle contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Emergency / not-emergency judgment
    pub status: TriageStatus,

    /// Caller location, may be empty
    #[serde(default)]
    pub location: String,

    /// Reported issue, may be empty
    #[serde(default)]
    pub issue: String,

    /// Contact phone number or identifier, may be empty
    #[serde(default)]
    pub recipient_phone_number: String,
}

/// Downstream handler selected by routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Destination {
    Hospital,
    Consultation,
}

/// Result of routing one classification to its destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingOutcome {
    /// Selected destination
    pub destination: Destination,

    /// Acknowledgement message returned by the destination's intake
    pub acknowledgement: String,
}
