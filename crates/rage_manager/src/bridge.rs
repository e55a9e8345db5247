//! Capability bridges
//!
//! A bridge is how the host platform lends behavior to assets: file storage,
//! logging, default settings, archiving. Each capability is a trait; a
//! [`Bridge`] is a table with one optional provider per capability. The set of
//! capabilities is closed and checked at compile time through [`Capability`].
//!
//! One provider type may implement several capability traits and be put in
//! several slots:
//!
//! ```ignore
//! let host = Arc::new(HostBridge::new());
//! let bridge = Bridge::new()
//!     .with_storage(host.clone())
//!     .with_logger(host);
//! ```

use std::fmt;
use std::sync::Arc;

/// Key/value file storage
pub trait DataStorage: Send + Sync {
    /// Check if a file exists
    fn exists(&self, file_id: &str) -> bool;

    /// Load a file, `None` if it does not exist
    fn load(&self, file_id: &str) -> Option<String>;

    /// Save a file, replacing any previous content
    fn save(&self, file_id: &str, content: &str);

    /// Delete a file. Returns `false` if it did not exist.
    fn delete(&self, file_id: &str) -> bool;

    /// Stored file ids
    fn files(&self) -> Vec<String>;
}

/// Application-supplied default settings
///
/// Default settings override the asset's built-in defaults and are read-only
/// at run-time. Some hosts (an editor, for instance) can also write them.
pub trait DefaultSettings: Send + Sync {
    /// Check if `class_name`/`id` has default settings
    fn has_default_settings(&self, class_name: &str, id: &str) -> bool;

    /// Load the default settings of `class_name`/`id`
    fn load_default_settings(&self, class_name: &str, id: &str) -> String;

    /// Save default settings for `class_name`/`id`
    fn save_default_settings(&self, class_name: &str, id: &str, content: &str);
}

/// Host-side log output
pub trait LogSink: Send + Sync {
    /// Log a message
    fn log(&self, message: &str);
}

/// Moves stored files out of the active storage
pub trait DataArchive: Send + Sync {
    /// Archive a file. Returns `false` if it did not exist.
    fn archive(&self, file_id: &str) -> bool;
}

/// Tag naming each capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityKind {
    Storage,
    DefaultSettings,
    Logging,
    Archive,
}

impl CapabilityKind {
    /// All capabilities a bridge can carry
    pub const ALL: [CapabilityKind; 4] = [
        CapabilityKind::Storage,
        CapabilityKind::DefaultSettings,
        CapabilityKind::Logging,
        CapabilityKind::Archive,
    ];

    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::DefaultSettings => "default_settings",
            Self::Logging => "logging",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Table of capability providers
#[derive(Clone, Default)]
pub struct Bridge {
    storage: Option<Arc<dyn DataStorage>>,
    default_settings: Option<Arc<dyn DefaultSettings>>,
    logger: Option<Arc<dyn LogSink>>,
    archive: Option<Arc<dyn DataArchive>>,
}

impl Bridge {
    /// Create a bridge without capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide storage
    pub fn with_storage(mut self, storage: Arc<dyn DataStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Provide default settings
    pub fn with_default_settings(mut self, settings: Arc<dyn DefaultSettings>) -> Self {
        self.default_settings = Some(settings);
        self
    }

    /// Provide log output
    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Provide archiving
    pub fn with_archive(mut self, archive: Arc<dyn DataArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Provider of capability `C`, if this bridge has one
    pub fn get<C: Capability + ?Sized>(&self) -> Option<Arc<C>> {
        C::slot(self).cloned()
    }

    /// Check if this bridge provides capability `C`
    pub fn provides<C: Capability + ?Sized>(&self) -> bool {
        C::slot(self).is_some()
    }

    /// Capabilities present in this bridge
    pub fn capabilities(&self) -> Vec<CapabilityKind> {
        CapabilityKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }

    fn has(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::Storage => self.storage.is_some(),
            CapabilityKind::DefaultSettings => self.default_settings.is_some(),
            CapabilityKind::Logging => self.logger.is_some(),
            CapabilityKind::Archive => self.archive.is_some(),
        }
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// A capability trait object type that has a slot in [`Bridge`]
pub trait Capability: Send + Sync + 'static {
    /// Tag of this capability
    const KIND: CapabilityKind;

    /// The bridge slot holding this capability
    fn slot(bridge: &Bridge) -> Option<&Arc<Self>>;
}

impl Capability for dyn DataStorage {
    const KIND: CapabilityKind = CapabilityKind::Storage;

    fn slot(bridge: &Bridge) -> Option<&Arc<Self>> {
        bridge.storage.as_ref()
    }
}

impl Capability for dyn DefaultSettings {
    const KIND: CapabilityKind = CapabilityKind::DefaultSettings;

    fn slot(bridge: &Bridge) -> Option<&Arc<Self>> {
        bridge.default_settings.as_ref()
    }
}

impl Capability for dyn LogSink {
    const KIND: CapabilityKind = CapabilityKind::Logging;

    fn slot(bridge: &Bridge) -> Option<&Arc<Self>> {
        bridge.logger.as_ref()
    }
}

impl Capability for dyn DataArchive {
    const KIND: CapabilityKind = CapabilityKind::Archive;

    fn slot(bridge: &Bridge) -> Option<&Arc<Self>> {
        bridge.archive.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStorage, RecordingSink};

    #[test]
    fn test_empty_bridge() {
        let bridge = Bridge::new();
        assert!(bridge.capabilities().is_empty());
        assert!(!bridge.provides::<dyn DataStorage>());
        assert!(bridge.get::<dyn LogSink>().is_none());
    }

    #[test]
    fn test_one_provider_in_several_slots() {
        let storage = Arc::new(MemoryStorage::default());
        let bridge = Bridge::new()
            .with_storage(storage.clone())
            .with_archive(storage.clone());

        assert_eq!(
            bridge.capabilities(),
            [CapabilityKind::Storage, CapabilityKind::Archive]
        );

        bridge.get::<dyn DataStorage>().unwrap().save("save.json", "{}");
        assert!(storage.exists("save.json"));
        assert!(bridge.get::<dyn DataArchive>().unwrap().archive("save.json"));
        assert!(!storage.exists("save.json"));
    }

    #[test]
    fn test_capability_kind_tags() {
        assert_eq!(<dyn LogSink as Capability>::KIND, CapabilityKind::Logging);
        assert_eq!(CapabilityKind::DefaultSettings.to_string(), "default_settings");

        let sink = Arc::new(RecordingSink::default());
        let bridge = Bridge::new().with_logger(sink.clone());
        bridge.get::<dyn LogSink>().unwrap().log("hello");
        assert_eq!(sink.messages(), ["hello"]);
    }
}
