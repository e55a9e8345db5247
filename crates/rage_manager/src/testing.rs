//! In-memory capability providers for unit tests

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rage_core::VersionSpec;

use crate::asset::AssetBase;
use crate::bridge::{DataArchive, DataStorage, DefaultSettings, LogSink};

/// Shared asset of `class_name` at `version`
pub fn asset(class_name: &str, version: &str) -> Arc<AssetBase> {
    Arc::new(AssetBase::new(class_name, VersionSpec::parse(version)))
}

#[derive(Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, String>>,
    archived: Mutex<Vec<String>>,
}

impl DataStorage for MemoryStorage {
    fn exists(&self, file_id: &str) -> bool {
        self.files.lock().contains_key(file_id)
    }

    fn load(&self, file_id: &str) -> Option<String> {
        self.files.lock().get(file_id).cloned()
    }

    fn save(&self, file_id: &str, content: &str) {
        self.files.lock().insert(file_id.to_string(), content.to_string());
    }

    fn delete(&self, file_id: &str) -> bool {
        self.files.lock().remove(file_id).is_some()
    }

    fn files(&self) -> Vec<String> {
        self.files.lock().keys().cloned().collect()
    }
}

impl DataArchive for MemoryStorage {
    fn archive(&self, file_id: &str) -> bool {
        if self.files.lock().remove(file_id).is_none() {
            return false;
        }
        self.archived.lock().push(file_id.to_string());
        true
    }
}

#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Default settings keyed by `{class}/{id}`
#[derive(Default)]
pub struct MemoryDefaults {
    documents: Mutex<BTreeMap<String, String>>,
}

impl MemoryDefaults {
    fn key(class_name: &str, id: &str) -> String {
        format!("{}/{}", class_name, id)
    }
}

impl DefaultSettings for MemoryDefaults {
    fn has_default_settings(&self, class_name: &str, id: &str) -> bool {
        self.documents.lock().contains_key(&Self::key(class_name, id))
    }

    fn load_default_settings(&self, class_name: &str, id: &str) -> String {
        self.documents
            .lock()
            .get(&Self::key(class_name, id))
            .cloned()
            .unwrap_or_default()
    }

    fn save_default_settings(&self, class_name: &str, id: &str, content: &str) {
        self.documents
            .lock()
            .insert(Self::key(class_name, id), content.to_string());
    }
}
