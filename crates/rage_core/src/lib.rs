//! # rage_core - RAGE Asset Kernel Core
//!
//! Leaf primitives shared by every other crate of the asset kernel:
//! - **Versions**: dotted `major.minor[.build[.revision]]` versions where a
//!   missing component sorts before any present one
//! - **Dependency ranges**: inclusive `low-high` intervals, `*` for unbounded
//! - **Identities**: process-unique asset handles and `{class}_{n}` asset ids
//! - **Descriptors**: version/dependency documents attached to asset classes
//!
//! Nothing here owns shared state; the registry and the topic bus live in
//! `rage_manager` and `rage_event`.

pub mod dependency;
pub mod descriptor;
pub mod error;
pub mod id;
pub mod version;

pub use dependency::*;
pub use descriptor::*;
pub use error::*;
pub use id::*;
pub use version::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::dependency::{DependencyRange, DependencySet};
    pub use crate::descriptor::{DependencyDescriptor, VersionInfo};
    pub use crate::error::{Error, Result};
    pub use crate::id::{AssetHandle, AssetId};
    pub use crate::version::VersionSpec;
}
