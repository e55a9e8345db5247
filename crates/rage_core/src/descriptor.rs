//! Version/dependency descriptors
//!
//! Every asset class ships a descriptor looked up by class name. The host
//! supplies it as JSON:
//!
//! ```json
//! {
//!   "id": "asset",
//!   "major": 1,
//!   "minor": 2,
//!   "build": 3,
//!   "maturity": "alpha",
//!   "dependencies": [
//!     { "minVersion": "1.2.3", "name": "Logger" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::dependency::{DependencyRange, DependencySet};
use crate::error::Result;
use crate::version::VersionSpec;

/// One `depends` entry of a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDescriptor {
    /// Lowest accepted version (required)
    pub min_version: String,
    /// Highest accepted version, open-ended when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<String>,
    /// Required class name
    pub name: String,
}

impl DependencyDescriptor {
    /// Range string in `"{min}-{max-or-*}"` form
    pub fn range(&self) -> String {
        DependencyRange::format_bounds(self.min_version.trim(), self.max_version.as_deref().map(str::trim))
    }
}

/// Version information of an asset class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub id: String,
    pub major: u32,
    pub minor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
    #[serde(default)]
    pub maturity: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyDescriptor>,
}

impl VersionInfo {
    /// Read a descriptor from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the descriptor as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Declared version
    pub fn version(&self) -> VersionSpec {
        VersionSpec {
            major: self.major,
            minor: self.minor,
            build: self.build,
            revision: self.build.and(self.revision),
        }
    }

    /// Declared dependencies keyed by trimmed class name
    pub fn dependency_set(&self) -> DependencySet {
        self.dependencies
            .iter()
            .map(|dep| (dep.name.trim().to_string(), dep.range()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"{
        "id": "asset",
        "major": 1,
        "minor": 2,
        "build": 3,
        "maturity": "alpha",
        "dependencies": [
            { "minVersion": "1.2.3", "name": " Logger " },
            { "minVersion": "0.1", "maxVersion": "0.9", "name": "Storage" }
        ]
    }"#;

    #[test]
    fn test_load_descriptor() {
        let info = VersionInfo::from_json(DEMO).unwrap();
        assert_eq!(info.id, "asset");
        assert_eq!(info.maturity, "alpha");
        assert_eq!(info.version(), VersionSpec::with_build(1, 2, 3));

        let deps = info.dependency_set();
        assert_eq!(deps.get("Logger"), Some("1.2.3-*"));
        assert_eq!(deps.get("Storage"), Some("0.1-0.9"));
    }

    #[test]
    fn test_optional_fields() {
        let info = VersionInfo::from_json(r#"{ "id": "logger", "major": 1, "minor": 0 }"#).unwrap();
        assert_eq!(info.version().to_string(), "1.0");
        assert!(info.dependency_set().is_empty());
        assert!(info.maturity.is_empty());
    }

    #[test]
    fn test_min_version_is_required() {
        let json = r#"{ "id": "x", "major": 1, "minor": 0, "dependencies": [ { "name": "Logger" } ] }"#;
        assert!(VersionInfo::from_json(json).is_err());
    }

    #[test]
    fn test_descriptor_json_roundtrip() {
        let info = VersionInfo::from_json(DEMO).unwrap();
        let json = info.to_json().unwrap();
        assert!(json.contains("\"minVersion\""));
        assert!(!json.contains("\"revision\""));
        assert_eq!(VersionInfo::from_json(&json).unwrap(), info);
    }
}
