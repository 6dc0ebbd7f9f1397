//! Key/value stores backing the rating state.
//!
//! The contract mirrors client-local settings storage: a flat mapping
//! from string keys to primitive values. Reads never fail -- a missing
//! or mistyped key yields the type's default. Writes persist beyond
//! process exit on a best-effort basis; if the backing medium is
//! unavailable the store keeps working in memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::data_dir;
use crate::error::StoreError;

/// A primitive value held by a [`CounterStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreValue {
    Count(u64),
    Flag(bool),
    Instant(DateTime<Utc>),
}

/// Durable mapping from string keys to primitive values.
///
/// Key-level operations are atomic; there are no cross-key transactions.
/// Implementations must serialize read-modify-write sequences so that
/// [`CounterStore::add_count`] is a single logical step.
pub trait CounterStore: Send {
    fn get_value(&self, key: &str) -> Option<StoreValue>;
    fn set_value(&self, key: &str, value: StoreValue);
    fn remove(&self, key: &str);

    /// Increment a counter by `delta` and return the new value.
    fn add_count(&self, key: &str, delta: u64) -> u64;

    fn get_count(&self, key: &str) -> u64 {
        match self.get_value(key) {
            Some(StoreValue::Count(n)) => n,
            _ => 0,
        }
    }

    fn set_count(&self, key: &str, value: u64) {
        self.set_value(key, StoreValue::Count(value));
    }

    fn get_flag(&self, key: &str) -> bool {
        matches!(self.get_value(key), Some(StoreValue::Flag(true)))
    }

    fn set_flag(&self, key: &str, value: bool) {
        self.set_value(key, StoreValue::Flag(value));
    }

    fn get_instant(&self, key: &str) -> Option<DateTime<Utc>> {
        match self.get_value(key) {
            Some(StoreValue::Instant(t)) => Some(t),
            _ => None,
        }
    }

    fn set_instant(&self, key: &str, value: DateTime<Utc>) {
        self.set_value(key, StoreValue::Instant(value));
    }
}

/// File-backed store: a flat JSON map persisted after every mutation.
///
/// A corrupt or missing file loads as empty state; persistence failures
/// are swallowed so callers never observe a broken backing medium.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: Mutex<BTreeMap<String, StoreValue>>,
}

impl FileStore {
    /// Open the store backing file at `path`, loading existing state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let map = Self::load(&path);
        Self {
            path,
            map: Mutex::new(map),
        }
    }

    /// Open `rating_state.json` in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::open(data_dir()?.join("rating_state.json")))
    }

    fn load(path: &Path) -> BTreeMap<String, StoreValue> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    fn persist(&self, map: &BTreeMap<String, StoreValue>) {
        if let Ok(content) = serde_json::to_string_pretty(map) {
            let _ = std::fs::write(&self.path, content);
        }
    }
}

impl CounterStore for FileStore {
    fn get_value(&self, key: &str) -> Option<StoreValue> {
        self.map.lock().expect("store lock poisoned").get(key).cloned()
    }

    fn set_value(&self, key: &str, value: StoreValue) {
        let mut map = self.map.lock().expect("store lock poisoned");
        map.insert(key.to_string(), value);
        self.persist(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.map.lock().expect("store lock poisoned");
        map.remove(key);
        self.persist(&map);
    }

    fn add_count(&self, key: &str, delta: u64) -> u64 {
        let mut map = self.map.lock().expect("store lock poisoned");
        let next = match map.get(key) {
            Some(StoreValue::Count(n)) => n.saturating_add(delta),
            _ => delta,
        };
        map.insert(key.to_string(), StoreValue::Count(next));
        self.persist(&map);
        next
    }
}

/// In-memory store with identical semantics, for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<String, StoreValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<StoreValue> {
        self.map.lock().expect("store lock poisoned").get(key).cloned()
    }

    fn set_value(&self, key: &str, value: StoreValue) {
        self.map
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.map.lock().expect("store lock poisoned").remove(key);
    }

    fn add_count(&self, key: &str, delta: u64) -> u64 {
        let mut map = self.map.lock().expect("store lock poisoned");
        let next = match map.get(key) {
            Some(StoreValue::Count(n)) => n.saturating_add(delta),
            _ => delta,
        };
        map.insert(key.to_string(), StoreValue::Count(next));
        next
    }
}
