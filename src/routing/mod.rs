//! Deterministic routing of classifications to destinations.

use std::sync::Arc;

use crate::intake::IntakeTarget;
use crate::models::{Classification, RoutingOutcome};

/// Routes each classification to exactly one destination intake.
///
/// Dispatch is binary and exhaustive: emergencies go to hospital intake,
/// everything else to consultation intake. The status field is already
/// constrained to the two values upstream, so there is no error branch and
/// no retry here.
pub struct Router {
    hospital: Arc<dyn IntakeTarget>,
    consultation: Arc<dyn IntakeTarget>,
}

impl Router {
    pub fn new(hospital: Arc<dyn IntakeTarget>, consultation: Arc<dyn IntakeTarget>) -> Self {
        Self {
            hospital,
            consultation,
        }
    }

    /// Select the destination for a classification and invoke its intake
    pub async fn route(&self, classification: &Classification) -> RoutingOutcome {
        let target = if classification.status.is_emergency() {
            &self.hospital
        } else {
            &self.consultation
        };

        let acknowledgement = target.accept(classification).await;

        RoutingOutcome {
            destination: target.destination(),
            acknowledgement,
        }
    }
}
