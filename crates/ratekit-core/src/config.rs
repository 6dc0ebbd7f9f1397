//! TOML-based rating policy configuration.
//!
//! Immutable policy parameters supplied once at engine construction:
//! - Usage thresholds (sessions, success flows) that must be met before
//!   any prompt is considered
//! - Cooldown between two store-review requests
//! - Sentiment gate texts and the optional feedback link for unhappy users
//!
//! Configuration is stored at `~/.config/ratekit/config.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};
use crate::storage::data_dir;
use std::path::PathBuf;

/// Rating policy configuration.
///
/// Serialized to/from TOML at `~/.config/ratekit/config.toml`.
///
/// Thresholds are unsigned, so negative values are unrepresentable;
/// a TOML file carrying one fails at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Minimum recorded app sessions before any prompt is considered.
    #[serde(default = "default_minimum_app_sessions")]
    pub minimum_app_sessions: u32,
    /// Minimum recorded success flows before any prompt is considered.
    #[serde(default = "default_minimum_success_flows")]
    pub minimum_success_flows: u32,
    /// Minimum days between two store-review requests.
    #[serde(default = "default_cooldown_days")]
    pub cooldown_days: u32,
    /// Whether to interpose the sentiment gate before the store review.
    #[serde(default = "default_true")]
    pub sentiment_gate_enabled: bool,
    #[serde(default = "default_sentiment_question")]
    pub sentiment_question: String,
    #[serde(default = "default_positive_label")]
    pub positive_label: String,
    #[serde(default = "default_negative_label")]
    pub negative_label: String,
    /// Where to send users who answer the gate negatively (optional).
    #[serde(default)]
    pub feedback_url: Option<Url>,
}

// Default functions
fn default_minimum_app_sessions() -> u32 {
    3
}
fn default_minimum_success_flows() -> u32 {
    1
}
fn default_cooldown_days() -> u32 {
    120
}
fn default_true() -> bool {
    true
}
fn default_sentiment_question() -> String {
    "Are you enjoying this app?".into()
}
fn default_positive_label() -> String {
    "Yes!".into()
}
fn default_negative_label() -> String {
    "Not really".into()
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            minimum_app_sessions: default_minimum_app_sessions(),
            minimum_success_flows: default_minimum_success_flows(),
            cooldown_days: default_cooldown_days(),
            sentiment_gate_enabled: true,
            sentiment_question: default_sentiment_question(),
            positive_label: default_positive_label(),
            negative_label: default_negative_label(),
            feedback_url: None,
        }
    }
}

impl RatingConfig {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: RatingConfig = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by field name.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by field name and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the field's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::ParseFailed("config is not an object".into()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>().map_err(
                |_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("cannot parse '{value}' as bool"),
                },
            )?),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as number"),
                    })?;
                serde_json::Value::Number(n.into())
            }
            // Null is an unset optional field (feedback_url); strings cover the rest.
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(key.to_string(), new_value);
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}
