//! RAGE asset demo
//!
//! Builds a handful of assets, routes their logging through host bridges,
//! exercises the topic bus and prints the version/dependency report.
//!
//! Run with: cargo run --bin rage-demo

use std::sync::Arc;

use rage_demo::{ConsoleBridge, DemoAsset, DialogueAsset, LoggerAsset, MemoryStorage};
use rage_manager::prelude::*;
use serde_json::json;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ManagerConfig::load();
    let mut manager = AssetManager::new(config);

    if let Err(err) = run(&mut manager) {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run(manager: &mut AssetManager) -> ManagerResult<()> {
    let demo1 = DemoAsset::new();
    let demo2 = DemoAsset::new();
    let logger1 = LoggerAsset::new();
    let logger2 = LoggerAsset::new();
    let dialogue = DialogueAsset::new();

    let assets: [Arc<dyn Asset>; 5] = [
        demo1.clone(),
        demo2.clone(),
        logger1.clone(),
        logger2.clone(),
        dialogue.clone(),
    ];
    for asset in &assets {
        manager.attach(asset.clone());
    }

    // Everything goes to the console unless an asset says otherwise
    let console = Arc::new(ConsoleBridge::new(""));
    let storage = Arc::new(MemoryStorage::new());
    manager.set_bridge(
        Bridge::new()
            .with_logger(console)
            .with_storage(storage.clone())
            .with_default_settings(storage.clone())
            .with_archive(storage.clone()),
    );

    for (i, asset) in assets.iter().enumerate() {
        let id = asset.id().map(|id| id.to_string()).unwrap_or_default();
        logger1.log(manager, &format!("Asset{}: {}, {}", i + 1, asset.class_name(), id));
    }

    demo1.public_method(manager, "Hello World (console.log)");

    // Second logger gets its own output
    logger2.set_bridge(Some(
        Bridge::new().with_logger(Arc::new(ConsoleBridge::new("Custom Logging: "))),
    ));
    demo1.public_method(manager, "Hello Different World (Mixed Logging)");

    // Topic bus
    let bus = manager.bus_mut();
    bus.define("EventSystem.Msg");
    let token = bus.subscribe("EventSystem.Msg", |topic, args| {
        let args: Vec<String> = args.iter().map(Value::to_string).collect();
        println!("[demo].{}: [{}]", topic, args.join(";"));
    });
    manager.publish("EventSystem.Msg", &[json!("hello"), json!("from"), json!("demo!")]);
    manager.bus_mut().unsubscribe(token);

    let again = manager.register(logger2.clone(), LoggerAsset::CLASS);
    println!("Trying to re-register: {}", again);

    // Default settings go through the storage bridge
    demo2.set_settings(Some(Settings::new(json!({
        "testProperty": "Hello Default World",
        "testReadOnly": true,
        "testList": ["Hello", "List", "World"],
    }))));
    manager.save_default_settings(&*demo2)?;
    demo2.set_settings(None);
    if let Some(settings) = manager.load_default_settings(&*demo2)? {
        println!("Default settings of {}: {}", demo2.class_name(), settings.to_json().unwrap_or_default());
    }
    for file in storage.files() {
        storage.archive(&file);
    }
    println!("Archived: {:?}", storage.archived());

    println!();
    print!("{}", manager.report());

    Ok(())
}
