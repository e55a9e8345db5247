//! Manager Configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `RAGE_INIT_TOPIC`, `RAGE_SUBSCRIBE_ON_ATTACH`
//! 2. JSON file named by `RAGE_ASSETS_CONFIG`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```json
//! {
//!     "init_topic": "EventSystem.Init",
//!     "init_message": "hello event!",
//!     "subscribe_on_attach": true,
//!     "report": { "asset_width": 40, "dependency_width": 32 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManagerError, ManagerResult};
use crate::report::ReportLayout;

/// Names the configuration file
pub const CONFIG_ENV: &str = "RAGE_ASSETS_CONFIG";
/// Overrides [`ManagerConfig::init_topic`]
pub const INIT_TOPIC_ENV: &str = "RAGE_INIT_TOPIC";
/// Overrides [`ManagerConfig::subscribe_on_attach`]
pub const SUBSCRIBE_ON_ATTACH_ENV: &str = "RAGE_SUBSCRIBE_ON_ATTACH";

/// Asset manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Topic defined and published when the event system starts
    pub init_topic: String,
    /// Argument published on the init topic
    pub init_message: String,
    /// Whether `attach` subscribes assets to the init topic
    pub subscribe_on_attach: bool,
    /// Column widths of the dependency report
    pub report: ReportLayout,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            init_topic: "EventSystem.Init".to_string(),
            init_message: "hello event!".to_string(),
            subscribe_on_attach: true,
            report: ReportLayout::default(),
        }
    }
}

impl ManagerConfig {
    /// Load configuration from all sources
    ///
    /// A config file that cannot be read or parsed is logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            match Self::load_from_file(&path) {
                Ok(loaded) => {
                    config = loaded;
                    log::info!("Loaded asset manager config from {}", path);
                }
                Err(err) => log::warn!("Ignoring asset manager config: {}", err),
            }
        }

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> ManagerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|err| ManagerError::config(path, err.to_string()))
    }

    /// Apply overrides looked up by variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(topic) = lookup(INIT_TOPIC_ENV) {
            if !topic.is_empty() {
                self.init_topic = topic;
                log::info!("Init topic from env: {}", self.init_topic);
            }
        }

        if let Some(flag) = lookup(SUBSCRIBE_ON_ATTACH_ENV) {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.subscribe_on_attach = true,
                "0" | "false" | "no" => self.subscribe_on_attach = false,
                other => log::warn!("Unrecognized {}: {}", SUBSCRIBE_ON_ATTACH_ENV, other),
            }
        }

        self
    }
}
