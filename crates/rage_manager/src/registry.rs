//! Asset identity registry
//!
//! Single source of truth for which assets exist and under which id. Ids are
//! `{class}_{n}` with `n` taken from one counter shared by every class, so
//! registering a `Logger` after two `DemoAsset`s yields `Logger_2`.
//!
//! Assets are never removed; only [`AssetRegistry::reset`] empties the
//! registry.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use rage_core::{AssetHandle, AssetId};

use crate::asset::Asset;
use crate::bridge::Bridge;

/// A registered asset and the id it was registered under
#[derive(Clone)]
pub struct AssetRecord {
    pub id: AssetId,
    pub asset: Arc<dyn Asset>,
}

impl fmt::Debug for AssetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRecord")
            .field("id", &self.id)
            .field("handle", &self.asset.handle())
            .finish()
    }
}

/// Central registry for all assets
pub struct AssetRegistry {
    /// Records by id sequence, i.e. in registration order
    records: BTreeMap<u64, AssetRecord>,
    /// Sequence each asset handle was registered under
    by_handle: HashMap<AssetHandle, u64>,
    /// Next sequence number, shared by all classes
    next_sequence: u64,
    /// Fallback bridge for every asset
    bridge: Option<Bridge>,
}

impl AssetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            by_handle: HashMap::new(),
            next_sequence: 0,
            bridge: None,
        }
    }

    /// Register an asset under `class_name`.
    ///
    /// An asset that is already registered keeps its id, whatever class name
    /// is passed this time, and no sequence number is consumed. The returned
    /// id is also recorded on the asset.
    pub fn register(&mut self, asset: Arc<dyn Asset>, class_name: &str) -> AssetId {
        if let Some(record) = self
            .by_handle
            .get(&asset.handle())
            .and_then(|sequence| self.records.get(sequence))
        {
            asset.base().assign_id(record.id.clone());
            return record.id.clone();
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let id = AssetId::new(class_name, sequence);

        log::info!("Registering asset {}/{} as {}", asset.class_name(), class_name, id);
        asset.base().assign_id(id.clone());

        self.by_handle.insert(asset.handle(), sequence);
        self.records.insert(
            sequence,
            AssetRecord {
                id: id.clone(),
                asset,
            },
        );

        log::trace!("Registered {} asset(s)", self.records.len());

        id
    }

    /// Find an asset by its rendered id (`"Logger_2"`)
    pub fn find_by_id(&self, id: &str) -> Option<&Arc<dyn Asset>> {
        let parsed = AssetId::parse(id)?;
        self.records
            .get(&parsed.sequence())
            .filter(|record| record.id == *id)
            .map(|record| &record.asset)
    }

    /// Find an asset by id
    pub fn find(&self, id: &AssetId) -> Option<&Arc<dyn Asset>> {
        self.records
            .get(&id.sequence())
            .filter(|record| record.id == *id)
            .map(|record| &record.asset)
    }

    /// First asset registered under `class_name`
    pub fn find_by_class(&self, class_name: &str) -> Option<&Arc<dyn Asset>> {
        self.records
            .values()
            .find(|record| record.id.class_name() == class_name)
            .map(|record| &record.asset)
    }

    /// All assets registered under exactly `class_name`, in registration order
    pub fn find_all_by_class<'a>(
        &'a self,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a Arc<dyn Asset>> + 'a {
        self.records
            .values()
            .filter(move |record| record.id.class_name() == class_name)
            .map(|record| &record.asset)
    }

    /// Id an asset handle was registered under
    pub fn id_of(&self, handle: AssetHandle) -> Option<&AssetId> {
        self.by_handle
            .get(&handle)
            .and_then(|sequence| self.records.get(sequence))
            .map(|record| &record.id)
    }

    /// Check if an asset is registered
    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    /// Iterate over all records in registration order
    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord> {
        self.records.values()
    }

    /// Install the fallback bridge, replacing any previous one
    pub fn set_bridge(&mut self, bridge: Bridge) {
        log::debug!("Registry bridge set: {:?}", bridge);
        self.bridge = Some(bridge);
    }

    /// Remove the fallback bridge
    pub fn clear_bridge(&mut self) -> Option<Bridge> {
        self.bridge.take()
    }

    /// The fallback bridge
    pub fn bridge(&self) -> Option<&Bridge> {
        self.bridge.as_ref()
    }

    /// Get the number of registered assets
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every asset and the bridge, and restart numbering at 0
    ///
    /// Released assets lose their recorded id and subscription.
    pub fn reset(&mut self) {
        for record in self.records.values() {
            record.asset.base().clear_registration();
        }
        self.records.clear();
        self.by_handle.clear();
        self.next_sequence = 0;
        self.bridge = None;
    }
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("assets", &self.records.len())
            .field("next_sequence", &self.next_sequence)
            .field("bridge", &self.bridge)
            .finish()
    }
}
