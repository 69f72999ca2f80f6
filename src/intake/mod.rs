//! Destination intake collaborators.
//!
//! Hospital and consultation intake are stand-ins for real downstream
//! integrations: reliable, side-effecting appends that acknowledge every
//! payload. The trait is the seam; [`IntakeQueue`] is the in-memory
//! implementation backing both the router and the simulated intake
//! endpoints.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{Classification, Destination};

/// Capability interface for a destination's intake operation.
///
/// Intake is modeled as always succeeding: it returns an acknowledgement
/// message, never an error. No failure path is defined for the downstream
/// destinations.
#[async_trait]
pub trait IntakeTarget: Send + Sync {
    /// The destination this target represents
    fn destination(&self) -> Destination;

    /// Append a classification-shaped payload and acknowledge it
    async fn accept(&self, classification: &Classification) -> String;
}

/// In-memory intake store for one destination.
///
/// Holds everything forwarded by the router plus anything submitted directly
/// through the destination's simulated endpoint, in arrival order.
pub struct IntakeQueue {
    destination: Destination,
    entries: RwLock<Vec<Value>>,
}

impl IntakeQueue {
    pub fn new(destination: Destination) -> Self {
        Self {
            destination,
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn hospital() -> Arc<Self> {
        Arc::new(Self::new(Destination::Hospital))
    }

    pub fn consultation() -> Arc<Self> {
        Arc::new(Self::new(Destination::Consultation))
    }

    /// Append a raw payload, as the simulated intake endpoints do
    pub fn submit(&self, payload: Value) {
        self.entries.write().push(payload);
    }

    /// Everything received so far, in arrival order
    pub fn snapshot(&self) -> Vec<Value> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl IntakeTarget for IntakeQueue {
    fn destination(&self) -> Destination {
        self.destination
    }

    async fn accept(&self, classification: &Classification) -> String {
        let payload = serde_json::to_value(classification)
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        self.submit(payload);

        tracing::debug!(destination = %self.destination, "Classification accepted by intake");
        format!("Data forwarded to {}.", self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriageStatus;

    #[tokio::test]
    async fn test_accept_stores_and_acknowledges() {
        let queue = IntakeQueue::new(Destination::Hospital);
        let classification = Classification {
            status: TriageStatus::Emergency,
            location: "Main St".to_string(),
            issue: "chest pain".to_string(),
            recipient_phone_number: "555-1111".to_string(),
        };

        let ack = queue.accept(&classification).await;

        assert_eq!(ack, "Data forwarded to hospital.");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.snapshot()[0]["location"], "Main St");
    }

    #[test]
    fn test_submit_keeps_arrival_order() {
        let queue = IntakeQueue::new(Destination::Consultation);
        queue.submit(serde_json::json!({"n": 1}));
        queue.submit(serde_json::json!({"n": 2}));

        let entries = queue.snapshot();
        assert_eq!(entries[0]["n"], 1);
        assert_eq!(entries[1]["n"], 2);
    }
}
