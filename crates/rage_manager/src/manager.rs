//! Asset manager - the service context hosts pass around
//!
//! Owns the identity registry and the topic bus. Construction starts the
//! event system: the init topic is defined and the init message published.
//! [`AssetManager::reset`] brings a used manager back to that state.

use std::sync::Arc;

use rage_event::{TopicBus, Value};

use crate::asset::Asset;
use crate::bridge::{Bridge, Capability, DefaultSettings};
use crate::config::ManagerConfig;
use crate::error::{ManagerError, ManagerResult};
use crate::registry::AssetRegistry;
use crate::report::DependencyReport;
use crate::resolver::BridgeResolver;
use crate::settings::Settings;
use rage_core::AssetId;

/// Registry, topic bus and configuration of one asset host
pub struct AssetManager {
    config: ManagerConfig,
    registry: AssetRegistry,
    bus: TopicBus,
}

impl AssetManager {
    /// Create a manager and start its event system
    pub fn new(config: ManagerConfig) -> Self {
        let mut manager = Self {
            config,
            registry: AssetRegistry::new(),
            bus: TopicBus::new(),
        };
        manager.init_event_system();
        manager
    }

    fn init_event_system(&mut self) {
        let topic = self.config.init_topic.as_str();
        self.bus.define(topic);
        self.bus
            .publish(topic, &[Value::String(self.config.init_message.clone())]);
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AssetRegistry {
        &mut self.registry
    }

    pub fn bus(&self) -> &TopicBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut TopicBus {
        &mut self.bus
    }

    /// Register `asset` under `class_name`
    pub fn register(&mut self, asset: Arc<dyn Asset>, class_name: &str) -> AssetId {
        self.registry.register(asset, class_name)
    }

    /// Register `asset` under its own class name and hook it to the init topic
    pub fn attach(&mut self, asset: Arc<dyn Asset>) -> AssetId {
        let class_name = asset.class_name().to_string();
        let id = self.register(asset.clone(), &class_name);

        if self.config.subscribe_on_attach && asset.base().subscription().is_none() {
            let listener_id = id.clone();
            let token = self.bus.subscribe(&self.config.init_topic, move |topic, args| {
                log::debug!("[{}].{}: {}", listener_id, topic, render_args(args));
            });
            asset.base().assign_subscription(token);
        }

        id
    }

    /// Install the registry-wide bridge
    pub fn set_bridge(&mut self, bridge: Bridge) {
        self.registry.set_bridge(bridge);
    }

    pub fn bridge(&self) -> Option<&Bridge> {
        self.registry.bridge()
    }

    /// Resolver bound to this manager's registry
    pub fn resolver(&self) -> BridgeResolver<'_> {
        BridgeResolver::new(&self.registry)
    }

    /// Provider of capability `C` for `asset`
    pub fn resolve<C: Capability + ?Sized>(&self, asset: &dyn Asset) -> Option<Arc<C>> {
        self.resolver().resolve::<C>(asset)
    }

    /// Publish on the topic bus
    pub fn publish(&self, topic: &str, args: &[Value]) -> bool {
        self.bus.publish(topic, args)
    }

    /// Dependency report over every registered asset
    pub fn report(&self) -> DependencyReport {
        DependencyReport::generate(&self.registry, self.config.report)
    }

    /// Load the host's default settings for `asset` into it
    ///
    /// Returns `None` when the asset is unregistered, no `DefaultSettings`
    /// capability resolves, or the host has none for this asset.
    pub fn load_default_settings(&self, asset: &dyn Asset) -> ManagerResult<Option<Settings>> {
        let Some(id) = asset.id() else {
            return Ok(None);
        };
        let Some(defaults) = self.resolve::<dyn DefaultSettings>(asset) else {
            return Ok(None);
        };

        let id = id.to_string();
        if !defaults.has_default_settings(asset.class_name(), &id) {
            return Ok(None);
        }

        let content = defaults.load_default_settings(asset.class_name(), &id);
        let settings = Settings::from_json(&content).map_err(|err| ManagerError::settings(&id, err))?;
        asset.set_settings(Some(settings.clone()));

        Ok(Some(settings))
    }

    /// Save `asset`'s settings as the host's defaults
    ///
    /// Returns `false` when there is nothing to save or nowhere to save it.
    pub fn save_default_settings(&self, asset: &dyn Asset) -> ManagerResult<bool> {
        let (Some(id), Some(settings)) = (asset.id(), asset.settings()) else {
            return Ok(false);
        };
        let Some(defaults) = self.resolve::<dyn DefaultSettings>(asset) else {
            return Ok(false);
        };

        let id = id.to_string();
        let content = settings.to_json().map_err(|err| ManagerError::settings(&id, err))?;
        defaults.save_default_settings(asset.class_name(), &id, &content);

        Ok(true)
    }

    /// Empty the registry and bus, then restart the event system
    ///
    /// Assets attached before the reset lose their id and subscription and
    /// can be attached again.
    pub fn reset(&mut self) {
        log::debug!(
            "Resetting asset manager ({} asset(s), {} topic(s))",
            self.registry.len(),
            self.bus.topics().count()
        );
        self.registry.reset();
        self.bus.reset();
        self.init_event_system();
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("registry", &self.registry)
            .field("bus", &self.bus)
            .finish()
    }
}

fn render_args(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::LogSink;
    use crate::testing::{asset, MemoryDefaults, RecordingSink};
    use serde_json::json;

    #[test]
    fn test_event_system_initialized() {
        let manager = AssetManager::default();
        assert!(manager.bus().is_defined("EventSystem.Init"));
        assert_eq!(manager.bus().subscriber_count("EventSystem.Init"), 0);
        assert!(manager.registry().is_empty());
    }

    #[test]
    fn test_register_records_id_on_asset() {
        let mut manager = AssetManager::default();
        let logger = asset("Logger", "1.0");

        let id = manager.register(logger.clone(), "Logger");
        assert_eq!(id, "Logger_0");
        assert_eq!(logger.id(), Some(id));
    }

    #[test]
    fn test_attach_subscribes_once() {
        let mut manager = AssetManager::default();
        let logger = asset("Logger", "1.0");

        let first = manager.attach(logger.clone());
        let second = manager.attach(logger.clone());
        assert_eq!(first, second);
        assert_eq!(manager.bus().subscriber_count("EventSystem.Init"), 1);
        assert!(logger.subscription().is_some());

        assert!(manager.publish("EventSystem.Init", &[json!("again")]));
    }

    #[test]
    fn test_attach_without_subscription() {
        let config = ManagerConfig {
            subscribe_on_attach: false,
            ..ManagerConfig::default()
        };
        let mut manager = AssetManager::new(config);
        let logger = asset("Logger", "1.0");

        assert_eq!(manager.attach(logger.clone()), "Logger_0");
        assert_eq!(manager.bus().subscriber_count("EventSystem.Init"), 0);
        assert!(logger.subscription().is_none());
    }

    #[test]
    fn test_resolve_through_manager() {
        let mut manager = AssetManager::default();
        let logger = asset("Logger", "1.0");
        manager.attach(logger.clone());
        assert!(manager.resolve::<dyn LogSink>(&*logger).is_none());

        let sink = Arc::new(RecordingSink::default());
        manager.set_bridge(Bridge::new().with_logger(sink.clone()));
        manager
            .resolve::<dyn LogSink>(&*logger)
            .unwrap()
            .log("routed");
        assert_eq!(sink.messages(), ["routed"]);
    }

    #[test]
    fn test_default_settings_round_trip() {
        let mut manager = AssetManager::default();
        let defaults = Arc::new(MemoryDefaults::default());
        manager.set_bridge(Bridge::new().with_default_settings(defaults.clone()));

        let logger = asset("Logger", "1.0");
        assert!(!manager.save_default_settings(&*logger).unwrap());

        manager.attach(logger.clone());
        assert!(manager.load_default_settings(&*logger).unwrap().is_none());

        logger.set_settings(Some(Settings::new(json!({ "level": "warn" }))));
        assert!(manager.save_default_settings(&*logger).unwrap());
        assert!(defaults.has_default_settings("Logger", "Logger_0"));

        logger.set_settings(None);
        let loaded = manager.load_default_settings(&*logger).unwrap().unwrap();
        assert_eq!(loaded.value()["level"], "warn");
        assert_eq!(logger.settings(), Some(loaded));
    }

    #[test]
    fn test_malformed_default_settings() {
        let mut manager = AssetManager::default();
        let defaults = Arc::new(MemoryDefaults::default());
        defaults.save_default_settings("Logger", "Logger_0", "{ broken");
        manager.set_bridge(Bridge::new().with_default_settings(defaults));

        let logger = asset("Logger", "1.0");
        manager.attach(logger.clone());

        let err = manager.load_default_settings(&*logger).unwrap_err();
        assert!(matches!(err, ManagerError::Settings { ref asset, .. } if asset == "Logger_0"));
        assert!(logger.settings().is_none());
    }

    #[test]
    fn test_reset() {
        let mut manager = AssetManager::default();
        manager.attach(asset("Logger", "1.0"));
        manager.bus_mut().define("Custom");
        manager.set_bridge(Bridge::new());

        manager.reset();
        assert!(manager.registry().is_empty());
        assert!(manager.bridge().is_none());
        assert!(!manager.bus().is_defined("Custom"));
        assert!(manager.bus().is_defined("EventSystem.Init"));

        assert_eq!(manager.attach(asset("Logger", "1.0")), "Logger_0");
        let token = manager.bus_mut().subscribe("Other", |_, _| {});
        assert_eq!(token.0, 2);
    }

    #[test]
    fn test_reattach_after_reset() {
        let mut manager = AssetManager::default();
        let defaults = Arc::new(MemoryDefaults::default());
        manager.attach(asset("DemoAsset", "1.0"));
        let logger = asset("Logger", "1.0");
        assert_eq!(manager.attach(logger.clone()), "Logger_1");

        manager.reset();
        assert!(logger.id().is_none());
        assert!(logger.subscription().is_none());

        let id = manager.attach(logger.clone());
        assert_eq!(id, "Logger_0");
        assert_eq!(logger.id(), Some(id.clone()));
        assert!(manager.registry().find_by_id(&id.to_string()).is_some());
        assert_eq!(manager.bus().subscriber_count("EventSystem.Init"), 1);

        manager.set_bridge(Bridge::new().with_default_settings(defaults.clone()));
        logger.set_settings(Some(Settings::empty()));
        assert!(manager.save_default_settings(&*logger).unwrap());
        assert!(defaults.has_default_settings("Logger", "Logger_0"));
    }

    #[test]
    fn test_registry_path_records_id() {
        let mut manager = AssetManager::default();
        let logger = asset("Logger", "1.0");
        let id = manager.registry_mut().register(logger.clone(), "Logger");
        assert_eq!(logger.id(), Some(id));
    }

    #[test]
    fn test_render_args() {
        assert_eq!(render_args(&[json!("hello event!"), json!(3)]), "hello event!, 3");
        assert_eq!(render_args(&[]), "");
    }
}
