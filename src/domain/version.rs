//! NuGet package versions
//!
//! NuGet versions extend SemVer 2.0 with an optional fourth `revision`
//! component and accept short forms such as `1` or `1.2`. Build metadata
//! (`+abc`) is validated and then discarded.

use crate::error::VersionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed NuGet version
#[derive(Debug, Clone)]
pub struct NuGetVersion {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
    /// Fourth component (legacy four-part versions)
    pub revision: u64,
    release_labels: Vec<String>,
}

impl NuGetVersion {
    /// Create a stable three-part version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: 0,
            release_labels: Vec::new(),
        }
    }

    /// Parse a version string such as `1.2.3`, `1.0.0.4` or `2.0.0-beta.1+sha`
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::invalid_version(input, "empty version"));
        }

        let rest = match trimmed.split_once('+') {
            Some((rest, meta)) => {
                if !meta.split('.').all(is_identifier) {
                    return Err(VersionError::invalid_version(
                        input,
                        "invalid build metadata",
                    ));
                }
                rest
            }
            None => trimmed,
        };

        let (numbers, labels) = match rest.split_once('-') {
            Some((numbers, labels)) => (numbers, Some(labels)),
            None => (rest, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() > 4 {
            return Err(VersionError::invalid_version(
                input,
                "more than four numeric components",
            ));
        }

        let mut components = [0u64; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::invalid_version(
                    input,
                    format!("invalid numeric component '{}'", part),
                ));
            }
            *slot = part
                .parse()
                .map_err(|_| VersionError::invalid_version(input, "numeric component overflow"))?;
        }

        let release_labels = match labels {
            Some(labels) => {
                let labels: Vec<String> = labels.split('.').map(str::to_string).collect();
                if !labels.iter().all(|l| is_identifier(l)) {
                    return Err(VersionError::invalid_version(
                        input,
                        "invalid prerelease label",
                    ));
                }
                labels
            }
            None => Vec::new(),
        };

        let [major, minor, patch, revision] = components;
        Ok(Self {
            major,
            minor,
            patch,
            revision,
            release_labels,
        })
    }

    /// Prerelease labels (`beta`, `1` for `-beta.1`)
    pub fn release_labels(&self) -> &[String] {
        &self.release_labels
    }

    /// Returns true if this version carries prerelease labels
    pub fn is_prerelease(&self) -> bool {
        !self.release_labels.is_empty()
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn compare_label(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}

fn compare_release_labels(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        // A release sorts above any of its prereleases
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a
            .iter()
            .zip(b)
            .map(|(x, y)| compare_label(x, y))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| a.len().cmp(&b.len())),
    }
}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then(self.revision.cmp(&other.revision))
            .then_with(|| compare_release_labels(&self.release_labels, &other.release_labels))
    }
}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NuGetVersion {}

impl Hash for NuGetVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.revision.hash(state);
        for label in &self.release_labels {
            label.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision > 0 {
            write!(f, ".{}", self.revision)?;
        }
        if self.is_prerelease() {
            write!(f, "-{}", self.release_labels.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for NuGetVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NuGetVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NuGetVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
