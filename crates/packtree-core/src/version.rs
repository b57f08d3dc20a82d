//! Numeric, suffix-aware comparison of package version numbers
//!
//! A manifest version is `MAJOR.MINOR.PATCH.<suffix>` where the suffix is a
//! marker (`NEXT`, `LATEST`) or a concrete build number. Only the numeric
//! triple participates in ordering; the suffix tells validators how the
//! version is being used.

use std::cmp::Ordering;
use std::fmt;

/// Trailing marker of a version number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSuffix {
    /// The package's own authoritative, yet-unreleased version
    Next,
    /// A dependency requirement tracking the latest released build
    Latest,
    /// A concrete build number
    Build(u64),
}

/// A parsed `MAJOR.MINOR.PATCH[.<suffix>]` version number
///
/// `Ord` is deliberately not implemented: two versions with different markers
/// compare numerically equal without being equal, so a derived ordering would
/// be inconsistent with `Eq`. Use [`Version::numeric_cmp`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: Option<VersionSuffix>,
}

impl Version {
    /// Create a version from its numeric triple, without a marker
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: None,
        }
    }

    /// Parse a raw manifest version string
    ///
    /// Returns `None` when the string is structurally malformed; callers
    /// attach the owning package to the error they raise.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        let suffix = match parts.next() {
            None => None,
            Some("NEXT") => Some(VersionSuffix::Next),
            Some("LATEST") => Some(VersionSuffix::Latest),
            Some(build) => Some(VersionSuffix::Build(build.parse().ok()?)),
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            major,
            minor,
            patch,
            suffix,
        })
    }

    /// Compare the numeric triples, ignoring markers
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    /// The numeric triple without its marker, e.g. `1.2.0`
    pub fn base(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Suggested successor of this version: minor bump, `.NEXT` marker
    pub fn bump_minor(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor + 1,
            patch: self.patch,
            suffix: Some(VersionSuffix::Next),
        }
    }

    /// Rewrite a `.NEXT` marker to `.LATEST`; other suffixes stay untouched
    pub fn to_latest(&self) -> Self {
        match self.suffix {
            Some(VersionSuffix::Next) => Self {
                suffix: Some(VersionSuffix::Latest),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// Whether the version carries the given marker
    pub fn has_marker(&self, marker: VersionSuffix) -> bool {
        self.suffix == Some(marker)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        match &self.suffix {
            None => Ok(()),
            Some(VersionSuffix::Next) => write!(f, ".NEXT"),
            Some(VersionSuffix::Latest) => write!(f, ".LATEST"),
            Some(VersionSuffix::Build(n)) => write!(f, ".{n}"),
        }
    }
}
