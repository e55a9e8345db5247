//! Dependency ranges and the ordered set of dependencies an asset declares
//!
//! Range strings have min-max format, both ends inclusive:
//! - `1.2.3-*`    1.2.3 or higher
//! - `0.0-*`      any version
//! - `1.2.3-2.1`  from 1.2.3 up to and including 2.1
//! - `1.4`        exactly 1.4

use core::fmt;

use crate::error::RangeError;
use crate::version::VersionSpec;

/// Marker for an open upper bound
pub const UNBOUNDED: &str = "*";

/// Inclusive version interval required from another asset class
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DependencyRange {
    low: VersionSpec,
    high: VersionSpec,
    source: Box<str>,
}

impl DependencyRange {
    /// Parse a range string.
    ///
    /// Bounds that are not versions fall back to [`VersionSpec::UNKNOWN`]
    /// like [`VersionSpec::parse`] does; only a wrong number of bounds is
    /// an error. Empty bounds after the last non-empty one are ignored, so
    /// `"1.2-"` is the single version `1.2`.
    pub fn parse(range: &str) -> Result<Self, RangeError> {
        let mut tokens: Vec<&str> = range.split('-').collect();
        if tokens.len() > 1 {
            while tokens.last() == Some(&"") {
                tokens.pop();
            }
        }
        let (low, high) = match tokens.as_slice() {
            [single] => {
                let version = VersionSpec::parse(single);
                (version, version)
            }
            [low, high] => {
                let high = if *high == UNBOUNDED {
                    VersionSpec::MAX
                } else {
                    VersionSpec::parse(high)
                };
                (VersionSpec::parse(low), high)
            }
            _ => {
                return Err(RangeError::TokenCount {
                    range: range.to_string(),
                    tokens: tokens.len(),
                })
            }
        };

        Ok(Self {
            low,
            high,
            source: range.into(),
        })
    }

    /// Build the `"{min}-{max}"` form used by version descriptors, with
    /// `*` standing in for a missing maximum.
    pub fn format_bounds(min: &str, max: Option<&str>) -> String {
        format!("{}-{}", min, max.unwrap_or(UNBOUNDED))
    }

    /// Lowest accepted version
    #[inline]
    pub fn low(&self) -> VersionSpec {
        self.low
    }

    /// Highest accepted version ([`VersionSpec::MAX`] when open-ended)
    #[inline]
    pub fn high(&self) -> VersionSpec {
        self.high
    }

    /// Whether the upper bound is `*`
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.high == VersionSpec::MAX
    }

    /// The string this range was parsed from
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check `low <= version <= high`
    pub fn contains(&self, version: &VersionSpec) -> bool {
        self.low <= *version && *version <= self.high
    }
}

impl fmt::Display for DependencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for DependencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyRange({}: {}..={})", self.source, self.low, self.high)
    }
}

/// Insertion-ordered mapping from required class name to range string
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<(String, String)>,
}

impl DependencySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency. Re-declaring a class replaces its range but
    /// keeps its original position.
    pub fn insert(&mut self, class_name: impl Into<String>, range: impl Into<String>) {
        let class_name = class_name.into();
        let range = range.into();
        match self.entries.iter_mut().find(|(name, _)| *name == class_name) {
            Some(entry) => entry.1 = range,
            None => self.entries.push((class_name, range)),
        }
    }

    /// Builder form of [`DependencySet::insert`]
    pub fn with(mut self, class_name: impl Into<String>, range: impl Into<String>) -> Self {
        self.insert(class_name, range);
        self
    }

    /// Range string declared for a class
    pub fn get(&self, class_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, range)| range.as_str())
    }

    /// Iterate `(class, range)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, range)| (name.as_str(), range.as_str()))
    }

    /// Number of declared dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Into<String>, R: Into<String>> FromIterator<(C, R)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (C, R)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (class_name, range) in iter {
            set.insert(class_name, range);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionSpec {
        VersionSpec::parse(s)
    }

    #[test]
    fn test_single_version_range() {
        let range = DependencyRange::parse("1.4").unwrap();
        assert_eq!(range.low(), v("1.4"));
        assert_eq!(range.high(), v("1.4"));
        assert!(range.contains(&v("1.4")));
        assert!(!range.contains(&v("1.4.0")));
        assert!(!range.contains(&v("1.3")));
    }

    #[test]
    fn test_open_range() {
        let range = DependencyRange::parse("1.2.3-*").unwrap();
        assert!(range.is_unbounded());
        assert!(range.contains(&v("1.2.3")));
        assert!(range.contains(&v("2.0")));
        assert!(range.contains(&v("150.0")));
        assert!(!range.contains(&v("1.0")));
        assert!(!range.contains(&v("1.2")));
        assert_eq!(range.to_string(), "1.2.3-*");
    }

    #[test]
    fn test_any_version_range() {
        let range = DependencyRange::parse("0.0-*").unwrap();
        assert!(range.contains(&v("0.0")));
        assert!(range.contains(&VersionSpec::UNKNOWN));
        assert!(range.contains(&v("7.3.1.9")));
    }

    #[test]
    fn test_inclusive_bounds() {
        let range = DependencyRange::parse("1.2.3-2.1").unwrap();
        assert!(range.contains(&v("1.2.3")));
        assert!(range.contains(&v("2.1")));
        assert!(!range.contains(&v("2.1.0")));
        assert!(!range.contains(&v("1.2.2.9")));
    }

    #[test]
    fn test_token_count_error() {
        let err = DependencyRange::parse("1.0-2.0-3.0").unwrap_err();
        assert_eq!(
            err,
            RangeError::TokenCount {
                range: "1.0-2.0-3.0".into(),
                tokens: 3
            }
        );
    }

    #[test]
    fn test_trailing_dash_is_single_version() {
        let range = DependencyRange::parse("1.2-").unwrap();
        assert_eq!(range.low(), v("1.2"));
        assert_eq!(range.high(), v("1.2"));
        assert!(range.contains(&v("1.2")));
        assert!(!range.contains(&v("1.3")));
        assert_eq!(range.to_string(), "1.2-");

        assert_eq!(DependencyRange::parse("1.0-2.0--").unwrap().high(), v("2.0"));
        assert!(matches!(
            DependencyRange::parse("-"),
            Err(RangeError::TokenCount { tokens: 0, .. })
        ));
    }

    #[test]
    fn test_format_bounds() {
        assert_eq!(DependencyRange::format_bounds("1.2.3", None), "1.2.3-*");
        assert_eq!(DependencyRange::format_bounds("1.0", Some("2.0")), "1.0-2.0");
    }

    #[test]
    fn test_dependency_set_keeps_declaration_order() {
        let mut set = DependencySet::new()
            .with("Logger", "1.2.3-*")
            .with("Storage", "0.0-*")
            .with("Dialogue", "2.0");
        set.insert("Logger", "2.0-*");

        let classes: Vec<&str> = set.iter().map(|(class, _)| class).collect();
        assert_eq!(classes, ["Logger", "Storage", "Dialogue"]);
        assert_eq!(set.get("Logger"), Some("2.0-*"));
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("Missing"), None);
    }
}
