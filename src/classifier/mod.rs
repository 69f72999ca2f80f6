//! Classification oracle seam.
//!
//! The oracle is an untrusted, possibly unavailable remote dependency: the
//! trait returns its raw textual answer and nothing else, interpretation
//! lives in [`parser`]. Two implementations exist — the remote
//! chat-completions client and a deterministic scripted double — so triage
//! logic is testable without network access.

pub mod parser;
pub mod prompt;
pub mod remote;
pub mod scripted;

pub use remote::RemoteClassifier;
pub use scripted::ScriptedClassifier;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::error::Result;
use crate::models::IncomingEvent;

/// Capability interface for the classification oracle.
///
/// `classify` builds the oracle request from the event's transcript,
/// extracted data and context details, and returns the oracle's raw textual
/// answer. Transport failures surface as
/// [`AppError::ClassifierUnavailable`](crate::error::AppError) and must be
/// caught by the caller; this layer never retries.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, event: &IncomingEvent) -> Result<String>;
}

/// Build the configured classifier backend
pub fn build_classifier(config: &ClassifierConfig) -> Result<Arc<dyn Classifier>> {
    match config.backend {
        ClassifierBackend::Remote => Ok(Arc::new(RemoteClassifier::from_config(config)?)),
        ClassifierBackend::Scripted => {
            let answer = config
                .scripted_answer
                .clone()
                .unwrap_or_else(|| r#"{"status": "not emergency"}"#.to_string());
            Ok(Arc::new(ScriptedClassifier::with_answer(answer)))
        }
    }
}
