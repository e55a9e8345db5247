//! Version and dependency report
//!
//! For every registered asset, lists each declared dependency and whether a
//! registered asset of the required class has a version inside the declared
//! range.

use std::fmt;

use rage_core::{AssetId, DependencyRange, VersionSpec};
use serde::{Deserialize, Serialize};

use crate::registry::AssetRegistry;

/// Column widths of the rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Width of the asset column
    pub asset_width: usize,
    /// Width of the separator line's dependency side, `+` included.
    /// Dependency text is never padded or cut to it.
    pub dependency_width: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            asset_width: 40,
            dependency_width: 32,
        }
    }
}

/// Outcome of checking one dependency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyStatus {
    /// A registered asset of the class is inside the range
    Resolved,
    /// No registered asset of the class is inside the range
    Missing,
    /// The range string has the wrong number of bounds
    Malformed,
}

impl DependencyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::Missing => "missing",
            Self::Malformed => "error",
        }
    }
}

impl fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared dependency of a reported asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyLine {
    pub class_name: String,
    /// The range as declared
    pub range: String,
    pub status: DependencyStatus,
}

/// One reported asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: AssetId,
    pub class_name: String,
    pub version: VersionSpec,
    pub dependencies: Vec<DependencyLine>,
}

impl ReportEntry {
    /// Status of the dependency on `class_name`
    pub fn status_of(&self, class_name: &str) -> Option<DependencyStatus> {
        self.dependencies
            .iter()
            .find(|line| line.class_name == class_name)
            .map(|line| line.status)
    }
}

/// Snapshot of dependency satisfaction across the registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyReport {
    entries: Vec<ReportEntry>,
    layout: ReportLayout,
}

impl DependencyReport {
    /// Check every registered asset's dependencies against the registry
    pub fn generate(registry: &AssetRegistry, layout: ReportLayout) -> Self {
        let entries = registry
            .iter()
            .map(|record| {
                let asset = &record.asset;
                let dependencies = asset
                    .dependencies()
                    .iter()
                    .map(|(class_name, range)| DependencyLine {
                        class_name: class_name.to_string(),
                        range: range.to_string(),
                        status: check(registry, class_name, range),
                    })
                    .collect();

                ReportEntry {
                    id: record.id.clone(),
                    class_name: asset.class_name().to_string(),
                    version: asset.version(),
                    dependencies,
                }
            })
            .collect();

        Self { entries, layout }
    }

    /// Reported assets in registration order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Entry of the asset registered as `id`
    pub fn entry(&self, id: &AssetId) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Check if every dependency of every asset is resolved
    pub fn all_resolved(&self) -> bool {
        self.entries
            .iter()
            .flat_map(|entry| &entry.dependencies)
            .all(|line| line.status == DependencyStatus::Resolved)
    }

    fn separator(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}+{}",
            "-".repeat(self.layout.asset_width),
            "-".repeat(self.layout.dependency_width.saturating_sub(1))
        )
    }
}

/// Resolution status of one dependency
fn check(registry: &AssetRegistry, class_name: &str, range: &str) -> DependencyStatus {
    let range = match DependencyRange::parse(range) {
        Ok(range) => range,
        Err(err) => {
            log::warn!("Dependency on {}: {}", class_name, err);
            return DependencyStatus::Malformed;
        }
    };

    if registry
        .find_all_by_class(class_name)
        .any(|candidate| range.contains(&candidate.version()))
    {
        DependencyStatus::Resolved
    } else {
        DependencyStatus::Missing
    }
}

impl fmt::Display for DependencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.layout.asset_width;

        writeln!(f, "{:<width$}| Depends on", "Asset", width = width)?;
        self.separator(f)?;

        for entry in &self.entries {
            let artifact = format!("{} v{}", entry.class_name, entry.version);
            write!(f, "{:<width$}", artifact, width = width)?;

            if entry.dependencies.is_empty() {
                writeln!(f, "| No dependencies")?;
                continue;
            }

            for (i, line) in entry.dependencies.iter().enumerate() {
                if i > 0 {
                    write!(f, "{:<width$}", "", width = width)?;
                }
                writeln!(f, "| {} v{} [{}]", line.class_name, line.range, line.status)?;
            }
        }

        self.separator(f)
    }
}
