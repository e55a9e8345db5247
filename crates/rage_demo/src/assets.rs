//! Reference assets

use std::any::Any;
use std::sync::Arc;

use rage_core::{VersionInfo, VersionSpec};
use rage_manager::{Asset, AssetBase, AssetManager, LogSink};

/// Log target used when no `LogSink` resolves
const LOG_TARGET: &str = "rage::logger";

/// Bundled descriptor of `class_name`
pub fn descriptor(class_name: &str) -> Option<&'static str> {
    match class_name {
        LoggerAsset::CLASS => Some(include_str!("../descriptors/logger.json")),
        DemoAsset::CLASS => Some(include_str!("../descriptors/demo_asset.json")),
        DialogueAsset::CLASS => Some(include_str!("../descriptors/dialogue_asset.json")),
        _ => None,
    }
}

/// Base of `class_name` built from its descriptor, unversioned if there is none
fn described_base(class_name: &str) -> AssetBase {
    let info = descriptor(class_name).map(VersionInfo::from_json);
    match info {
        Some(Ok(info)) => AssetBase::from_version_info(class_name, &info),
        Some(Err(err)) => {
            log::warn!("Bad descriptor for {}: {}", class_name, err);
            AssetBase::new(class_name, VersionSpec::UNKNOWN)
        }
        None => AssetBase::new(class_name, VersionSpec::UNKNOWN),
    }
}

macro_rules! impl_asset {
    ($ty:ty) => {
        impl Asset for $ty {
            fn base(&self) -> &AssetBase {
                &self.base
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

/// Logs through the resolved `LogSink`, or the `log` facade
pub struct LoggerAsset {
    base: AssetBase,
}

impl LoggerAsset {
    pub const CLASS: &'static str = "Logger";

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            base: described_base(Self::CLASS),
        })
    }

    /// Log a message, preferring the asset's bridge over the manager's
    pub fn log(&self, manager: &AssetManager, message: &str) {
        match manager.resolve::<dyn LogSink>(self) {
            Some(sink) => sink.log(message),
            None => log::debug!(target: LOG_TARGET, "{}", message),
        }
    }
}

impl_asset!(LoggerAsset);

/// Talks to loggers it finds through the registry
pub struct DemoAsset {
    base: AssetBase,
}

impl DemoAsset {
    pub const CLASS: &'static str = "DemoAsset";

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            base: described_base(Self::CLASS),
        })
    }

    /// Send `message` to every registered logger as `"{logger id} - {message}"`
    ///
    /// Returns the number of loggers reached.
    pub fn public_method(&self, manager: &AssetManager, message: &str) -> usize {
        let mut reached = 0;
        for asset in manager.registry().find_all_by_class(LoggerAsset::CLASS) {
            let Some(logger) = asset.downcast_ref::<LoggerAsset>() else {
                continue;
            };
            let id = logger.id().map(|id| id.to_string()).unwrap_or_default();
            logger.log(manager, &format!("{} - {}", id, message));
            reached += 1;
        }
        reached
    }
}

impl_asset!(DemoAsset);

/// Needs some logger, whatever its version
pub struct DialogueAsset {
    base: AssetBase,
}

impl DialogueAsset {
    pub const CLASS: &'static str = "DialogueAsset";

    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            base: described_base(Self::CLASS),
        })
    }
}

impl_asset!(DialogueAsset);
