//! Rating eligibility engine.
//!
//! The engine combines usage counters, the review cooldown, and the
//! sentiment gate into a single decision. `evaluate_at()` is a pure
//! function of persisted state plus the supplied instant -- no internal
//! clock, no side effects. Only the explicit record operations mutate
//! state, so two sequential calls cannot interleave a counter update.
//!
//! Native review requests and link opening are host concerns behind the
//! [`ReviewPrompter`] and [`LinkOpener`] traits. The engine commits the
//! cooldown timestamp *before* dispatching the prompter: the platform
//! may silently suppress the prompt, and measuring from intent-to-show
//! avoids retry storms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::RatingConfig;
use crate::gate::{GatePrompt, SentimentGate};
use crate::storage::{CounterStore, RatingStats, RatingStore};

/// What the host should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Conditions not met; show nothing.
    DoNothing,
    /// Present the sentiment gate question.
    ShowSentimentGate,
    /// Request the native store review.
    ShowStoreReview,
}

/// Outcome of a presented sentiment gate, as reported by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentResponse {
    Positive,
    Negative,
    /// Gate closed without an answer; state is left unchanged and the
    /// gate remains due.
    Dismissed,
}

/// Fire-and-forget request to the platform's store-review subsystem.
/// There is no return value and no guarantee anything is displayed.
pub trait ReviewPrompter {
    fn request_review(&self);
}

/// Best-effort attempt to open an external link; failure is ignored.
pub trait LinkOpener {
    fn open(&self, url: &Url);
}

/// Stand-in prompter for hosts without a native review surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrompter;

impl ReviewPrompter for NoopPrompter {
    fn request_review(&self) {}
}

/// Opener that drops the link, for hosts that render feedback inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOpener;

impl LinkOpener for NoopOpener {
    fn open(&self, _url: &Url) {}
}

/// Opens links with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &Url) {
        let _ = open::that(url.as_str());
    }
}

/// The decision engine over a policy configuration and a persistent store.
pub struct RatingEngine<S: CounterStore> {
    config: RatingConfig,
    store: RatingStore<S>,
}

impl<S: CounterStore> RatingEngine<S> {
    pub fn new(config: RatingConfig, store: S) -> Self {
        Self {
            config,
            store: RatingStore::new(store),
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// The gate policy bound to this engine's config and store.
    pub fn gate(&self) -> SentimentGate<'_, S> {
        SentimentGate::new(&self.config, &self.store)
    }

    /// Texts for rendering the sentiment gate.
    pub fn gate_prompt(&self) -> GatePrompt {
        self.gate().prompt()
    }

    // ── Host events ──────────────────────────────────────────────────

    /// Record the start of an app session.
    pub fn record_session_event(&self) {
        self.store.increment_app_sessions();
    }

    /// Record a completed success flow.
    pub fn record_success_event(&self) {
        self.store.increment_success_flows();
    }

    // ── Decision ─────────────────────────────────────────────────────

    /// Decide what to show, measured at `now`. Pure: no side effects.
    pub fn evaluate_at(&self, now: DateTime<Utc>) -> Decision {
        if self.store.user_declined() {
            return Decision::DoNothing;
        }
        if self.store.app_session_count() < u64::from(self.config.minimum_app_sessions) {
            return Decision::DoNothing;
        }
        if self.store.success_flow_count() < u64::from(self.config.minimum_success_flows) {
            return Decision::DoNothing;
        }
        if let Some(last) = self.store.last_rating_request() {
            // Negative elapsed days (clock rollback) also suppress.
            if (now - last).num_days() < i64::from(self.config.cooldown_days) {
                return Decision::DoNothing;
            }
        }
        if self.config.sentiment_gate_enabled {
            let gate = self.gate();
            if self.store.sentiment_gate_shown() && !gate.likes_app() {
                return Decision::DoNothing;
            }
            // Thresholds and cooldown are checked first, so a user below
            // the usage thresholds never sees the gate.
            if gate.should_present() {
                return Decision::ShowSentimentGate;
            }
        }
        Decision::ShowStoreReview
    }

    /// [`RatingEngine::evaluate_at`] against the current wall clock.
    pub fn evaluate(&self) -> Decision {
        self.evaluate_at(Utc::now())
    }

    // ── Orchestration ────────────────────────────────────────────────

    /// Start the cooldown window at `now`. Must be called exactly once
    /// per native-prompt dispatch, before the prompter is invoked.
    pub fn record_rating_request_issued_at(&self, now: DateTime<Utc>) {
        self.store.record_rating_request(now);
    }

    pub fn record_rating_request_issued(&self) {
        self.record_rating_request_issued_at(Utc::now());
    }

    /// Evaluate and, when a store review is due, commit the cooldown
    /// timestamp and dispatch the prompter. Returns the decision so the
    /// host knows whether to present the sentiment gate instead.
    pub fn request_review_at(&self, now: DateTime<Utc>, prompter: &dyn ReviewPrompter) -> Decision {
        let decision = self.evaluate_at(now);
        if decision == Decision::ShowStoreReview {
            self.record_rating_request_issued_at(now);
            prompter.request_review();
        }
        decision
    }

    pub fn request_review(&self, prompter: &dyn ReviewPrompter) -> Decision {
        self.request_review_at(Utc::now(), prompter)
    }

    /// Record the host-reported outcome of a presented sentiment gate.
    /// A negative answer opens the configured feedback URL through the
    /// collaborator; a dismissal changes nothing.
    pub fn on_sentiment_response(&self, response: SentimentResponse, opener: &dyn LinkOpener) {
        match response {
            SentimentResponse::Positive => self.gate().record_positive(),
            SentimentResponse::Negative => {
                if let Some(url) = self.gate().record_negative() {
                    opener.open(url);
                }
            }
            SentimentResponse::Dismissed => {}
        }
    }

    // ── Statistics & reset ───────────────────────────────────────────

    pub fn statistics(&self) -> RatingStats {
        self.store.statistics()
    }

    /// Clear all persisted rating state (testing / user privacy).
    pub fn reset(&self) {
        self.store.reset();
    }
}
