pub mod config;
pub mod engine;
pub mod event;
pub mod respond;

use ratekit_core::{FileStore, RatingConfig, RatingEngine};

/// Open the engine over the on-disk config and state.
pub fn open_engine() -> Result<RatingEngine<FileStore>, Box<dyn std::error::Error>> {
    let config = RatingConfig::load()?;
    let store = FileStore::open_default()?;
    Ok(RatingEngine::new(config, store))
}
