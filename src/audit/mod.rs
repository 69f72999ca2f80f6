use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EnrichedEvent, IncomingEvent};

/// One audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier
    pub id: Uuid,

    /// Position in insertion order, starting at 0
    pub seq: u64,

    /// Timestamp when the entry was recorded
    pub recorded_at: DateTime<Utc>,

    /// What was recorded
    #[serde(flatten)]
    pub record: AuditRecord,
}

/// The two record kinds the log holds: the raw event as it arrived, and the
/// enriched event after triage completed for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecord {
    Received { event: IncomingEvent },
    Routed { event: EnrichedEvent },
}

impl AuditRecord {
    pub fn is_received(&self) -> bool {
        matches!(self, AuditRecord::Received { .. })
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, AuditRecord::Routed { .. })
    }
}

/// Append-only in-memory audit log.
///
/// Created once at service start and shared across all request handlers;
/// entries live until process exit. Appends take the write lock, so each
/// entry is indivisible under concurrent writers and enumeration always
/// observes a consistent prefix in insertion order.
#[derive(Default)]
pub struct AuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw event as it arrived, before any processing
    pub fn record_received(&self, event: &IncomingEvent) {
        self.append(AuditRecord::Received {
            event: event.clone(),
        });
    }

    /// Record the final enriched event for a triaged request
    pub fn record_routed(&self, event: &EnrichedEvent) {
        self.append(AuditRecord::Routed {
            event: event.clone(),
        });
    }

    fn append(&self, record: AuditRecord) {
        let mut entries = self.entries.write();
        let seq = entries.len() as u64;
        entries.push(AuditEntry {
            id: Uuid::new_v4(),
            seq,
            recorded_at: Utc::now(),
            record,
        });
        tracing::debug!(seq, "Audit entry recorded");
    }

    /// Full ordered enumeration of the log
    pub fn snapshot(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
