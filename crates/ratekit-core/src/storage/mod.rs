//! Durable client-local storage for counters, flags, and timestamps.

pub mod rating_store;
pub mod store;

pub use rating_store::{RatingStats, RatingStore};
pub use store::{CounterStore, FileStore, MemoryStore, StoreValue};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/ratekit/`, creating it if needed.
///
/// Set RATEKIT_DIR to override (used by tests and development builds).
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("RATEKIT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ratekit"),
    };

    std::fs::create_dir_all(&dir).map_err(|source| StoreError::OpenFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
