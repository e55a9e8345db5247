//! Opaque settings documents
//!
//! The kernel stores and forwards an asset's settings but never looks inside
//! them. Hosts exchange them as JSON text through the default-settings and
//! storage capabilities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings blob owned by one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Value);

impl Settings {
    /// Wrap a document
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Empty settings object
    pub fn empty() -> Self {
        Self(Value::Object(Default::default()))
    }

    /// Read settings from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Write settings as JSON text
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.0)
    }

    /// Borrow the document
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Take the document
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Settings {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
