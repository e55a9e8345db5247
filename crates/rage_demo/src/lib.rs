//! # rage_demo - Reference assets
//!
//! A small host built on the asset manager:
//! - [`LoggerAsset`] routes messages through whichever `LogSink` resolves
//! - [`DemoAsset`] reaches every registered logger without knowing them
//! - [`DialogueAsset`] only declares a dependency on any logger
//! - [`MemoryStorage`] and [`ConsoleBridge`] are host-side bridges
//!
//! Descriptors ship with the crate and are looked up by class name.

pub mod assets;
pub mod bridges;

pub use assets::{descriptor, DemoAsset, DialogueAsset, LoggerAsset};
pub use bridges::{ConsoleBridge, MemoryStorage};
