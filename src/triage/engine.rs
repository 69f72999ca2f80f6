use std::sync::Arc;
use std::time::Duration;

use crate::audit::AuditLog;
use crate::classifier::{parser, Classifier};
use crate::metrics;
use crate::models::{EnrichedEvent, IncomingEvent};
use crate::routing::Router;

/// Orchestrates triage for one incoming event.
///
/// Each `process` call is independent and request-scoped: the raw event is
/// audited unconditionally, events without extracted data terminate early,
/// and classifier failures of any kind degrade to the heuristic instead of
/// failing the request. Once an event is valid input, triage always
/// completes with some classification and some routing decision.
pub struct TriageEngine {
    classifier: Arc<dyn Classifier>,
    router: Router,
    audit: Arc<AuditLog>,
    classify_timeout: Duration,
}

impl TriageEngine {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        router: Router,
        audit: Arc<AuditLog>,
        classify_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            router,
            audit,
            classify_timeout,
        }
    }

    /// Triage one event end to end
    pub async fn process(&self, event: IncomingEvent) -> EnrichedEvent {
        self.audit.record_received(&event);
        metrics::EVENTS_RECEIVED_TOTAL.inc();

        if !event.has_extracted_data() {
            tracing::info!("Event has no extracted data; stored without triage");
            return EnrichedEvent::unprocessed(event);
        }

        let raw_answer = self.classify_with_timeout(&event).await;
        let classification = parser::parse(&raw_answer, &event);

        let outcome = self.router.route(&classification).await;

        let destination = outcome.destination.to_string();
        metrics::EVENTS_ROUTED_TOTAL
            .with_label_values(&[destination.as_str()])
            .inc();
        tracing::info!(
            status = %classification.status,
            destination = %outcome.destination,
            "Event triaged"
        );

        let enriched = EnrichedEvent::routed(event, classification, outcome);
        self.audit.record_routed(&enriched);
        enriched
    }

    /// Call the oracle with a bounded timeout.
    ///
    /// Unavailability and timeout collapse to the same outcome: an empty
    /// answer, which the parser turns into the heuristic classification.
    async fn classify_with_timeout(&self, event: &IncomingEvent) -> String {
        let timer = metrics::CLASSIFY_DURATION_SECONDS.start_timer();

        let result =
            tokio::time::timeout(self.classify_timeout, self.classifier.classify(event)).await;
        timer.observe_duration();

        match result {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Classifier unavailable; degrading to heuristic");
                metrics::CLASSIFIER_FALLBACKS_TOTAL
                    .with_label_values(&["unavailable"])
                    .inc();
                String::new()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.classify_timeout.as_secs(),
                    "Classifier call exceeded timeout; degrading to heuristic"
                );
                metrics::CLASSIFIER_FALLBACKS_TOTAL
                    .with_label_values(&["timeout"])
                    .inc();
                String::new()
            }
        }
    }
}
