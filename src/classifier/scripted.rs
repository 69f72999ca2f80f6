use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::classifier::Classifier;
use crate::error::{AppError, Result};
use crate::models::IncomingEvent;

#[derive(Debug, Clone)]
enum Reply {
    Answer(String),
    Unavailable(String),
}

/// Deterministic oracle double.
///
/// Replays queued replies in order and then repeats the default reply
/// forever. Used as the `scripted` backend for offline runs and as the test
/// double for triage logic.
pub struct ScriptedClassifier {
    queued: Mutex<VecDeque<Reply>>,
    default: Reply,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    /// Always answer with the given text
    pub fn with_answer(answer: impl Into<String>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default: Reply::Answer(answer.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail as if the oracle were unreachable
    pub fn unavailable() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            default: Reply::Unavailable("scripted oracle is unavailable".to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue one answer ahead of the default reply
    pub fn then_answer(self, answer: impl Into<String>) -> Self {
        self.queued.lock().push_back(Reply::Answer(answer.into()));
        self
    }

    /// Queue one unavailability failure ahead of the default reply
    pub fn then_unavailable(self) -> Self {
        self.queued
            .lock()
            .push_back(Reply::Unavailable("scripted oracle is unavailable".to_string()));
        self
    }

    /// Delay every reply, for exercising caller-side timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of classify calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, _event: &IncomingEvent) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .queued
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.default.clone());

        match reply {
            Reply::Answer(answer) => Ok(answer),
            Reply::Unavailable(reason) => Err(AppError::ClassifierUnavailable(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> IncomingEvent {
        IncomingEvent::default()
    }

    #[tokio::test]
    async fn test_repeats_default_answer() {
        let oracle = ScriptedClassifier::with_answer("answer");

        assert_eq!(oracle.classify(&event()).await.unwrap(), "answer");
        assert_eq!(oracle.classify(&event()).await.unwrap(), "answer");
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_queued_replies_run_first() {
        let oracle = ScriptedClassifier::with_answer("later")
            .then_answer("first")
            .then_unavailable();

        assert_eq!(oracle.classify(&event()).await.unwrap(), "first");
        assert!(oracle.classify(&event()).await.is_err());
        assert_eq!(oracle.classify(&event()).await.unwrap(), "later");
    }

    #[tokio::test]
    async fn test_unavailable_maps_to_classifier_error() {
        let oracle = ScriptedClassifier::unavailable();

        let err = oracle.classify(&event()).await.unwrap_err();
        assert_eq!(err.error_code(), "CLASSIFIER_UNAVAILABLE");
    }
}
