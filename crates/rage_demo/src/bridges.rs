//! Host-side bridges

use std::collections::BTreeMap;

use parking_lot::{Mutex, RwLock};
use rage_manager::{DataArchive, DataStorage, DefaultSettings, LogSink};

/// In-memory file store
///
/// Also keeps default settings, under `defaults/{class}/{id}.json`, and an
/// archive that files move into.
#[derive(Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<String, String>>,
    archive: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn defaults_key(class_name: &str, id: &str) -> String {
        format!("defaults/{}/{}.json", class_name, id)
    }

    /// Archived files
    pub fn archived(&self) -> Vec<String> {
        self.archive.read().keys().cloned().collect()
    }

    /// Content of an archived file
    pub fn load_archived(&self, file_id: &str) -> Option<String> {
        self.archive.read().get(file_id).cloned()
    }
}

impl DataStorage for MemoryStorage {
    fn exists(&self, file_id: &str) -> bool {
        self.files.read().contains_key(file_id)
    }

    fn load(&self, file_id: &str) -> Option<String> {
        self.files.read().get(file_id).cloned()
    }

    fn save(&self, file_id: &str, content: &str) {
        self.files.write().insert(file_id.to_string(), content.to_string());
    }

    fn delete(&self, file_id: &str) -> bool {
        self.files.write().remove(file_id).is_some()
    }

    fn files(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }
}

impl DataArchive for MemoryStorage {
    fn archive(&self, file_id: &str) -> bool {
        let Some(content) = self.files.write().remove(file_id) else {
            return false;
        };
        self.archive.write().insert(file_id.to_string(), content);
        true
    }
}

impl DefaultSettings for MemoryStorage {
    fn has_default_settings(&self, class_name: &str, id: &str) -> bool {
        self.exists(&Self::defaults_key(class_name, id))
    }

    fn load_default_settings(&self, class_name: &str, id: &str) -> String {
        self.load(&Self::defaults_key(class_name, id)).unwrap_or_default()
    }

    fn save_default_settings(&self, class_name: &str, id: &str, content: &str) {
        self.save(&Self::defaults_key(class_name, id), content);
    }
}

/// Prints log messages to stdout with a prefix
pub struct ConsoleBridge {
    prefix: String,
    lines: Mutex<Vec<String>>,
}

impl ConsoleBridge {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Lines printed so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for ConsoleBridge {
    fn log(&self, message: &str) {
        let line = format!("{}{}", self.prefix, message);
        println!("{}", line);
        self.lines.lock().push(line);
    }
}
