//! Dotted versions for dependency checking
//!
//! A version is `major.minor[.build[.revision]]`. Build and revision may be
//! absent, which is not the same as zero: an absent component is older than
//! any present value at the same position, so `1.1 < 1.1.0 < 1.1.1`.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VersionError;

/// Four-part version with optional build and revision
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

impl VersionSpec {
    /// Create a `major.minor` version
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// Create a `major.minor.build` version
    #[inline]
    pub const fn with_build(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: None,
        }
    }

    /// Create a full `major.minor.build.revision` version
    #[inline]
    pub const fn full(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build: Some(build),
            revision: Some(revision),
        }
    }

    /// Result of parsing a string that is not a version: `0.0`
    pub const UNKNOWN: VersionSpec = VersionSpec::new(0, 0);

    /// Upper bound used for open-ended ranges (`1.2-*`)
    pub const MAX: VersionSpec = VersionSpec::full(u32::MAX, u32::MAX, u32::MAX, u32::MAX);

    /// Parse a version, falling back to [`VersionSpec::UNKNOWN`] when the
    /// string is not of the form `major.minor[.build[.revision]]`.
    pub fn parse(s: &str) -> Self {
        match Self::try_parse(s) {
            Ok(version) => version,
            Err(err) => {
                log::trace!("{}; using {}", err, Self::UNKNOWN);
                Self::UNKNOWN
            }
        }
    }

    /// Parse a version, reporting malformed input
    pub fn try_parse(s: &str) -> Result<Self, VersionError> {
        let malformed = || VersionError::Malformed(s.to_string());

        let mut parts = [None; 4];
        let mut count = 0;
        for part in s.split('.') {
            if count == parts.len() {
                return Err(malformed());
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let value: u32 = part.parse().map_err(|_| malformed())?;
            parts[count] = Some(value);
            count += 1;
        }

        match parts {
            [Some(major), Some(minor), build, revision] => Ok(Self {
                major,
                minor,
                build,
                revision,
            }),
            _ => Err(malformed()),
        }
    }

    /// Whether this version is the parse fallback
    #[inline]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl PartialOrd for VersionSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)` gives "absent is older than any present value".
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.build.cmp(&other.build))
            .then_with(|| self.revision.cmp(&other.revision))
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{}", build)?;
            if let Some(revision) = self.revision {
                write!(f, ".{}", revision)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionSpec({})", self)
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl FromStr for VersionSpec {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl Serialize for VersionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::try_parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionSpec {
        VersionSpec::parse(s)
    }

    #[test]
    fn test_version_parsing() {
        let version = v("1.2.3");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.build, Some(3));
        assert_eq!(version.revision, None);

        assert_eq!(v("4.5.6.7"), VersionSpec::full(4, 5, 6, 7));
        assert_eq!(v("0.0"), VersionSpec::new(0, 0));
    }

    #[test]
    fn test_malformed_falls_back_to_unknown() {
        for input in ["", "1", "1.", ".1", "1.2.3.4.5", "a.b", "1.-2", " 1.2", "1.2 ", "v1.2", "99999999999.1"] {
            assert_eq!(v(input), VersionSpec::UNKNOWN, "input {:?}", input);
            assert!(VersionSpec::try_parse(input).is_err(), "input {:?}", input);
        }
    }

    #[test]
    fn test_absent_component_is_older() {
        assert!(v("1.1") < v("1.1.0"));
        assert!(v("1.1.0") < v("1.1.1"));
        assert!(v("1.1.1") < v("1.1.2.3"));
        assert!(v("1.1") < v("1.1.2.3"));
        assert!(v("1.1.2") < v("1.1.2.4"));
        assert!(v("1.2.5") > v("1.2.3.4"));
        assert!(v("1.1.2.0") > v("1.1.2"));
    }

    #[test]
    fn test_version_ordering() {
        assert!(v("1.0") < v("1.1"));
        assert!(v("1.9") < v("2.0"));
        assert!(v("2.0") < v("10.0"));
        assert_eq!(v("1.2.3").cmp(&v("1.2.3")), Ordering::Equal);
        assert!(VersionSpec::MAX > v("99.99.99.99"));
    }

    #[test]
    fn test_display_keeps_absent_components_absent() {
        assert_eq!(v("1.1").to_string(), "1.1");
        assert_eq!(v("1.1.0").to_string(), "1.1.0");
        assert_eq!(v("1.2.3.4").to_string(), "1.2.3.4");
        assert_eq!(VersionSpec::with_build(3, 1, 4).to_string(), "3.1.4");
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&v("1.2.3")).unwrap();
        assert_eq!(json, "\"1.2.3\"");
        let back: VersionSpec = serde_json::from_str("\"2.0.1.5\"").unwrap();
        assert_eq!(back, VersionSpec::full(2, 0, 1, 5));
        assert!(serde_json::from_str::<VersionSpec>("\"two\"").is_err());
    }
}
