pub mod display;
pub mod handlers;
pub mod routes;

pub use routes::*;

use std::sync::Arc;

use crate::{
    audit::AuditLog, intake::IntakeQueue, telephony::CallInitiator, triage::TriageEngine,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TriageEngine>,
    pub audit: Arc<AuditLog>,
    pub hospital: Arc<IntakeQueue>,
    pub consultation: Arc<IntakeQueue>,
    pub telephony: Arc<CallInitiator>,
}

impl AppState {
    pub fn new(
        engine: Arc<TriageEngine>,
        audit: Arc<AuditLog>,
        hospital: Arc<IntakeQueue>,
        consultation: Arc<IntakeQueue>,
        telephony: Arc<CallInitiator>,
    ) -> Self {
        Self {
            engine,
            audit,
            hospital,
            consultation,
            telephony,
        }
    }
}
