//! Asset identities
//!
//! Two kinds of identity exist side by side:
//! - [`AssetHandle`]: allocated when an asset value is constructed, unique for
//!   the whole process. The registry deduplicates registrations by handle.
//! - [`AssetId`]: the `{class}_{n}` name handed out by the registry, where `n`
//!   comes from a counter shared by all classes.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-unique identity of one asset instance
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetHandle(u64);

impl AssetHandle {
    /// Allocate the next handle
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value
    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetHandle({})", self.0)
    }
}

/// Registry-issued asset id, rendered as `{class}_{sequence}`
///
/// The class name is stored as its own field; it is never recovered from the
/// rendered string except by [`AssetId::parse`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId {
    class_name: Arc<str>,
    sequence: u64,
}

impl AssetId {
    /// Create an id
    pub fn new(class_name: impl Into<Arc<str>>, sequence: u64) -> Self {
        Self {
            class_name: class_name.into(),
            sequence,
        }
    }

    /// Split `{class}_{digits}` at its last underscore. Class names may
    /// contain underscores themselves.
    pub fn parse(id: &str) -> Option<Self> {
        let (class_name, digits) = id.rsplit_once('_')?;
        if class_name.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let sequence = digits.parse().ok()?;
        Some(Self::new(class_name, sequence))
    }

    /// Class the asset was registered under
    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Value of the shared registration counter when the id was issued
    #[inline]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.class_name, self.sequence)
    }
}

impl PartialEq<str> for AssetId {
    fn eq(&self, other: &str) -> bool {
        other.rsplit_once('_').is_some_and(|(class_name, digits)| {
            class_name == &*self.class_name && digits == self.sequence.to_string()
        })
    }
}

impl PartialEq<&str> for AssetId {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let a = AssetHandle::next();
        let b = AssetHandle::next();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn test_id_display() {
        let id = AssetId::new("Logger", 3);
        assert_eq!(id.to_string(), "Logger_3");
        assert_eq!(id.class_name(), "Logger");
        assert_eq!(id.sequence(), 3);
        assert_eq!(id, "Logger_3");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!(AssetId::parse("DemoAsset_0"), Some(AssetId::new("DemoAsset", 0)));
        assert_eq!(AssetId::parse("My_Asset_12"), Some(AssetId::new("My_Asset", 12)));
        assert_eq!(AssetId::parse("Logger"), None);
        assert_eq!(AssetId::parse("Logger_"), None);
        assert_eq!(AssetId::parse("_4"), None);
        assert_eq!(AssetId::parse("Logger_x1"), None);
    }

    #[test]
    fn test_id_equality_is_exact() {
        let id = AssetId::new("XY", 0);
        assert!(id != "X_0");
        assert!(id != "XY_00");
        assert!(id == "XY_0");
    }
}
