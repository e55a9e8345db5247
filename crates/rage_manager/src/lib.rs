//! # rage_manager - Asset Manager
//!
//! Composes independent assets without wiring them to each other:
//! - **Registry**: hands out `{class}_{n}` ids and answers id/class lookups
//! - **Bridges**: capability tables (storage, logging, settings, archive)
//!   attached to an asset or to the whole registry
//! - **Resolver**: picks the asset's own bridge first, the registry bridge next
//! - **Report**: checks declared dependency ranges against registered assets
//!
//! [`AssetManager`] is the explicit service context that owns the registry
//! and the topic bus. It is constructed and reset by the host; there is no
//! hidden global instance.
//!
//! All state is mutated through `&mut self`; callers that share a manager
//! across threads wrap it in a single lock.

pub mod asset;
pub mod bridge;
pub mod config;
pub mod error;
pub mod manager;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

pub use asset::*;
pub use bridge::*;
pub use config::*;
pub use error::*;
pub use manager::*;
pub use registry::*;
pub use report::*;
pub use resolver::*;
pub use settings::*;

pub use rage_core;
pub use rage_event;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::asset::{Asset, AssetBase};
    pub use crate::bridge::{
        Bridge, Capability, CapabilityKind, DataArchive, DataStorage, DefaultSettings, LogSink,
    };
    pub use crate::config::ManagerConfig;
    pub use crate::error::{ManagerError, ManagerResult};
    pub use crate::manager::AssetManager;
    pub use crate::registry::AssetRegistry;
    pub use crate::report::{DependencyReport, DependencyStatus, ReportLayout};
    pub use crate::resolver::{BridgeResolver, BridgeSource};
    pub use crate::settings::Settings;
    pub use rage_core::prelude::*;
    pub use rage_event::prelude::*;
}
