//! Capability resolution
//!
//! An asset asks for a capability; the resolver answers with the asset's own
//! bridge when it provides the capability, else the registry bridge, else
//! nothing. Nothing is cached, so bridges installed after construction are
//! picked up on the next call.

use std::sync::Arc;

use crate::asset::Asset;
use crate::bridge::Capability;
use crate::registry::AssetRegistry;

/// Where a resolved provider came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeSource {
    /// The asset's private bridge
    Asset,
    /// The registry-wide bridge
    Registry,
}

/// A provider together with its origin
pub struct Resolved<C: ?Sized> {
    pub provider: Arc<C>,
    pub source: BridgeSource,
}

/// Looks up capabilities for assets against one registry
#[derive(Clone, Copy)]
pub struct BridgeResolver<'a> {
    registry: &'a AssetRegistry,
}

impl<'a> BridgeResolver<'a> {
    /// Create a resolver reading `registry`'s bridge
    pub fn new(registry: &'a AssetRegistry) -> Self {
        Self { registry }
    }

    /// Provider of capability `C` for `asset`
    pub fn resolve<C: Capability + ?Sized>(&self, asset: &dyn Asset) -> Option<Arc<C>> {
        self.resolve_with_source::<C>(asset).map(|resolved| resolved.provider)
    }

    /// Provider of capability `C` for `asset`, with its origin
    pub fn resolve_with_source<C: Capability + ?Sized>(&self, asset: &dyn Asset) -> Option<Resolved<C>> {
        if let Some(provider) = asset.bridge().and_then(|bridge| bridge.get::<C>()) {
            return Some(Resolved {
                provider,
                source: BridgeSource::Asset,
            });
        }

        let resolved = self
            .registry
            .bridge()
            .and_then(|bridge| bridge.get::<C>())
            .map(|provider| Resolved {
                provider,
                source: BridgeSource::Registry,
            });

        if resolved.is_none() {
            log::trace!("No {} capability for {}", C::KIND, asset.class_name());
        }
        resolved
    }

    /// Check if capability `C` is available to `asset`
    pub fn provides<C: Capability + ?Sized>(&self, asset: &dyn Asset) -> bool {
        self.resolve_with_source::<C>(asset).is_some()
    }
}
