//! Typed facade over the flat rating-state key namespace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::{CounterStore, StoreValue};

mod keys {
    pub const APP_SESSION_COUNT: &str = "ratekit.app_session_count";
    pub const SUCCESS_FLOW_COUNT: &str = "ratekit.success_flow_count";
    pub const LAST_RATING_REQUEST: &str = "ratekit.last_rating_request";
    pub const SENTIMENT_GATE_SHOWN: &str = "ratekit.sentiment_gate_shown";
    pub const SENTIMENT_POSITIVE: &str = "ratekit.sentiment_positive";
    pub const USER_DECLINED: &str = "ratekit.user_declined";
}

const ALL_KEYS: [&str; 6] = [
    keys::APP_SESSION_COUNT,
    keys::SUCCESS_FLOW_COUNT,
    keys::LAST_RATING_REQUEST,
    keys::SENTIMENT_GATE_SHOWN,
    keys::SENTIMENT_POSITIVE,
    keys::USER_DECLINED,
];

/// Snapshot of the persisted usage statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub app_sessions: u64,
    pub success_flows: u64,
    pub last_request: Option<DateTime<Utc>>,
}

/// Domain view of a [`CounterStore`]: the counters, flags, and the
/// cooldown timestamp the rating engine works with.
///
/// Counters only grow until [`RatingStore::reset`], which clears every
/// key in one pass.
#[derive(Debug)]
pub struct RatingStore<S: CounterStore> {
    store: S,
}

impl<S: CounterStore> RatingStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ── Counters ─────────────────────────────────────────────────────

    pub fn app_session_count(&self) -> u64 {
        self.store.get_count(keys::APP_SESSION_COUNT)
    }

    pub fn increment_app_sessions(&self) -> u64 {
        self.store.add_count(keys::APP_SESSION_COUNT, 1)
    }

    pub fn success_flow_count(&self) -> u64 {
        self.store.get_count(keys::SUCCESS_FLOW_COUNT)
    }

    pub fn increment_success_flows(&self) -> u64 {
        self.store.add_count(keys::SUCCESS_FLOW_COUNT, 1)
    }

    // ── Cooldown timestamp ───────────────────────────────────────────

    pub fn last_rating_request(&self) -> Option<DateTime<Utc>> {
        self.store.get_instant(keys::LAST_RATING_REQUEST)
    }

    /// Record that a native review request was issued at `now`.
    pub fn record_rating_request(&self, now: DateTime<Utc>) {
        self.store.set_instant(keys::LAST_RATING_REQUEST, now);
    }

    // ── Sentiment state ──────────────────────────────────────────────

    pub fn sentiment_gate_shown(&self) -> bool {
        self.store.get_flag(keys::SENTIMENT_GATE_SHOWN)
    }

    /// Last recorded sentiment answer, if the gate was ever answered.
    pub fn sentiment_positive(&self) -> Option<bool> {
        match self.store.get_value(keys::SENTIMENT_POSITIVE) {
            Some(StoreValue::Flag(b)) => Some(b),
            _ => None,
        }
    }

    pub fn user_declined(&self) -> bool {
        self.store.get_flag(keys::USER_DECLINED)
    }

    /// Record an answered sentiment gate. A negative answer also marks
    /// the user as permanently declined.
    pub fn record_sentiment_response(&self, positive: bool) {
        self.store.set_flag(keys::SENTIMENT_GATE_SHOWN, true);
        self.store.set_flag(keys::SENTIMENT_POSITIVE, positive);
        if !positive {
            self.store.set_flag(keys::USER_DECLINED, true);
        }
    }

    // ── Statistics & reset ───────────────────────────────────────────

    pub fn statistics(&self) -> RatingStats {
        RatingStats {
            app_sessions: self.app_session_count(),
            success_flows: self.success_flow_count(),
            last_request: self.last_rating_request(),
        }
    }

    /// Clear all persisted rating state (testing / user privacy).
    pub fn reset(&self) {
        for key in ALL_KEYS {
            self.store.remove(key);
        }
    }
}
