//! One-shot sentiment gate.
//!
//! A pre-screen question asked once before the native review prompt,
//! used to route dissatisfied users to a feedback link instead of a
//! public review. State lives in the shared [`RatingStore`]:
//!
//! ```text
//! NotShown -> Shown(Positive | Negative)
//! ```
//!
//! A negative answer is terminal: the gate is never re-presented and the
//! engine never requests a store review again for this installation.

use serde::Serialize;
use url::Url;

use crate::config::RatingConfig;
use crate::storage::{CounterStore, RatingStore};

/// Texts the host needs to render the gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatePrompt {
    pub question: String,
    pub positive_label: String,
    pub negative_label: String,
}

/// Sentiment gate policy over the shared store.
pub struct SentimentGate<'a, S: CounterStore> {
    config: &'a RatingConfig,
    store: &'a RatingStore<S>,
}

impl<'a, S: CounterStore> SentimentGate<'a, S> {
    pub fn new(config: &'a RatingConfig, store: &'a RatingStore<S>) -> Self {
        Self { config, store }
    }

    /// Whether the gate should be presented: true until it has been
    /// answered. A dismissed gate was never answered, so it stays due.
    pub fn should_present(&self) -> bool {
        !self.store.sentiment_gate_shown()
    }

    /// Record a positive answer. Re-recording is allowed and keeps the
    /// gate closed.
    pub fn record_positive(&self) {
        self.store.record_sentiment_response(true);
    }

    /// Record a negative answer and mark the user as declined.
    ///
    /// Returns the configured feedback URL so the caller can hand it to
    /// the link-opening collaborator.
    pub fn record_negative(&self) -> Option<&'a Url> {
        self.store.record_sentiment_response(false);
        self.config.feedback_url.as_ref()
    }

    /// Whether the user answered the gate positively.
    pub fn likes_app(&self) -> bool {
        self.store.sentiment_positive() == Some(true)
    }

    pub fn prompt(&self) -> GatePrompt {
        GatePrompt {
            question: self.config.sentiment_question.clone(),
            positive_label: self.config.positive_label.clone(),
            negative_label: self.config.negative_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn fixture(feedback: Option<&str>) -> (RatingConfig, RatingStore<MemoryStore>) {
        let config = RatingConfig {
            feedback_url: feedback.map(|u| Url::parse(u).unwrap()),
            ..RatingConfig::default()
        };
        (config, RatingStore::new(MemoryStore::new()))
    }

    #[test]
    fn presents_until_answered() {
        let (config, store) = fixture(None);
        let gate = SentimentGate::new(&config, &store);
        assert!(gate.should_present());

        gate.record_positive();
        assert!(!gate.should_present());
        assert!(gate.likes_app());
    }

    #[test]
    fn positive_rerecord_is_idempotent_for_presentation() {
        let (config, store) = fixture(None);
        let gate = SentimentGate::new(&config, &store);
        gate.record_positive();
        gate.record_positive();
        assert!(!gate.should_present());
        assert!(gate.likes_app());
    }

    #[test]
    fn negative_returns_feedback_url_when_configured() {
        let (config, store) = fixture(Some("https://example.com/feedback"));
        let gate = SentimentGate::new(&config, &store);
        let url = gate.record_negative();
        assert_eq!(url.map(|u| u.as_str()), Some("https://example.com/feedback"));
        assert!(!gate.should_present());
        assert!(!gate.likes_app());
        assert!(store.user_declined());
    }

    #[test]
    fn negative_without_feedback_url_returns_none() {
        let (config, store) = fixture(None);
        let gate = SentimentGate::new(&config, &store);
        assert!(gate.record_negative().is_none());
        assert!(store.user_declined());
    }

    #[test]
    fn prompt_carries_configured_texts() {
        let (mut config, store) = fixture(None);
        config.sentiment_question = "Happy with the app?".into();
        config.positive_label = "Love it".into();
        config.negative_label = "Meh".into();
        let gate = SentimentGate::new(&config, &store);
        let prompt = gate.prompt();
        assert_eq!(prompt.question, "Happy with the app?");
        assert_eq!(prompt.positive_label, "Love it");
        assert_eq!(prompt.negative_label, "Meh");
    }
}
