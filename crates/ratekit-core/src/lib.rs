//! # Ratekit Core Library
//!
//! This library decides *when* to ask an end user to rate an application,
//! optionally interposing a one-shot sentiment question so only satisfied
//! users are funneled to the native review prompt. All operations are
//! available via a standalone CLI binary; host applications embed the same
//! core library.
//!
//! ## Architecture
//!
//! - **Engine**: a pure decision function over persisted usage counters,
//!   a review cooldown, and the sentiment gate state; the caller supplies
//!   the instant for every evaluation
//! - **Storage**: flat JSON key/value state file plus TOML-based
//!   configuration under `~/.config/ratekit`
//! - **Collaborators**: the native review request and link opening are
//!   host concerns behind small traits
//!
//! ## Key Components
//!
//! - [`RatingEngine`]: eligibility decision and request orchestration
//! - [`SentimentGate`]: one-shot pre-screen survey policy
//! - [`FileStore`] / [`MemoryStore`]: durable and in-memory counter stores
//! - [`RatingConfig`]: immutable policy parameters

pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod storage;

pub use config::RatingConfig;
pub use engine::{
    Decision, LinkOpener, NoopOpener, NoopPrompter, RatingEngine, ReviewPrompter,
    SentimentResponse, SystemOpener,
};
pub use error::{ConfigError, CoreError, StoreError};
pub use gate::{GatePrompt, SentimentGate};
pub use storage::{CounterStore, FileStore, MemoryStore, RatingStats, RatingStore, StoreValue};
