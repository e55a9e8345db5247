//! Assets - the pluggable units tracked by the registry
//!
//! Concrete assets embed an [`AssetBase`] and implement [`Asset`] by pointing
//! at it. The base carries everything the kernel needs: a process-unique
//! handle, class name, version, maturity, declared dependencies, and the
//! mutable settings/bridge slots.

use std::any::Any;
use std::fmt;

use parking_lot::RwLock;
use rage_core::{AssetHandle, AssetId, DependencySet, VersionInfo, VersionSpec};
use rage_event::SubscriptionToken;

use crate::bridge::Bridge;
use crate::settings::Settings;

/// State shared by every asset
pub struct AssetBase {
    handle: AssetHandle,
    class_name: String,
    version: VersionSpec,
    maturity: String,
    dependencies: DependencySet,
    id: RwLock<Option<AssetId>>,
    subscription: RwLock<Option<SubscriptionToken>>,
    settings: RwLock<Option<Settings>>,
    bridge: RwLock<Option<Bridge>>,
}

impl AssetBase {
    /// Create the base of an asset of `class_name`
    pub fn new(class_name: impl Into<String>, version: VersionSpec) -> Self {
        Self {
            handle: AssetHandle::next(),
            class_name: class_name.into(),
            version,
            maturity: String::new(),
            dependencies: DependencySet::new(),
            id: RwLock::new(None),
            subscription: RwLock::new(None),
            settings: RwLock::new(None),
            bridge: RwLock::new(None),
        }
    }

    /// Create the base from a class descriptor
    pub fn from_version_info(class_name: impl Into<String>, info: &VersionInfo) -> Self {
        Self::new(class_name, info.version())
            .with_maturity(info.maturity.clone())
            .with_dependencies(info.dependency_set())
    }

    /// Set the maturity tag
    pub fn with_maturity(mut self, maturity: impl Into<String>) -> Self {
        self.maturity = maturity.into();
        self
    }

    /// Declare a dependency on `class_name` within `range`
    pub fn with_dependency(mut self, class_name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(class_name, range);
        self
    }

    /// Replace all declared dependencies
    pub fn with_dependencies(mut self, dependencies: DependencySet) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Start with settings
    pub fn with_settings(self, settings: Settings) -> Self {
        *self.settings.write() = Some(settings);
        self
    }

    #[inline]
    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline]
    pub fn version(&self) -> VersionSpec {
        self.version
    }

    #[inline]
    pub fn maturity(&self) -> &str {
        &self.maturity
    }

    #[inline]
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Id the registry holding this asset issued
    pub fn id(&self) -> Option<AssetId> {
        self.id.read().clone()
    }

    /// Subscription installed when the asset was attached to a manager
    pub fn subscription(&self) -> Option<SubscriptionToken> {
        *self.subscription.read()
    }

    pub fn settings(&self) -> Option<Settings> {
        self.settings.read().clone()
    }

    pub fn set_settings(&self, settings: Option<Settings>) {
        *self.settings.write() = settings;
    }

    pub fn bridge(&self) -> Option<Bridge> {
        self.bridge.read().clone()
    }

    pub fn set_bridge(&self, bridge: Option<Bridge>) {
        *self.bridge.write() = bridge;
    }

    /// Record the id the registry returned
    pub(crate) fn assign_id(&self, id: AssetId) {
        *self.id.write() = Some(id);
    }

    /// Record the lifecycle subscription. Returns `false` if one exists.
    pub(crate) fn assign_subscription(&self, token: SubscriptionToken) -> bool {
        let mut slot = self.subscription.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(token);
        true
    }

    /// Forget the id and subscription once the registry lets go of the asset
    pub(crate) fn clear_registration(&self) {
        *self.id.write() = None;
        *self.subscription.write() = None;
    }
}

impl fmt::Debug for AssetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetBase")
            .field("handle", &self.handle)
            .field("class_name", &self.class_name)
            .field("id", &*self.id.read())
            .field("version", &self.version)
            .field("maturity", &self.maturity)
            .field("dependencies", &self.dependencies.len())
            .finish()
    }
}

/// An asset the registry can track
///
/// Only [`Asset::base`] and [`Asset::as_any`] are required.
pub trait Asset: Send + Sync + 'static {
    /// Embedded kernel state
    fn base(&self) -> &AssetBase;

    /// Get as Any reference (for downcasting)
    fn as_any(&self) -> &dyn Any;

    fn handle(&self) -> AssetHandle {
        self.base().handle()
    }

    fn class_name(&self) -> &str {
        self.base().class_name()
    }

    fn id(&self) -> Option<AssetId> {
        self.base().id()
    }

    fn version(&self) -> VersionSpec {
        self.base().version()
    }

    fn maturity(&self) -> &str {
        self.base().maturity()
    }

    fn dependencies(&self) -> &DependencySet {
        self.base().dependencies()
    }

    fn settings(&self) -> Option<Settings> {
        self.base().settings()
    }

    fn set_settings(&self, settings: Option<Settings>) {
        self.base().set_settings(settings)
    }

    /// The asset's private bridge
    fn bridge(&self) -> Option<Bridge> {
        self.base().bridge()
    }

    fn set_bridge(&self, bridge: Option<Bridge>) {
        self.base().set_bridge(bridge)
    }
}

impl dyn Asset {
    /// Downcast to a concrete asset type
    pub fn downcast_ref<T: Asset>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}

/// A bare base is a usable asset for hosts that need no behavior of their own
impl Asset for AssetBase {
    fn base(&self) -> &AssetBase {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
