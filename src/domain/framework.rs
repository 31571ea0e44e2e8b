//! Target framework identifiers
//!
//! Handles framework formats:
//! - Long names: `.NETStandard2.0`, `.NETFramework4.6.1`, `.NETStandard,Version=v2.0`
//! - Short folder names: `netstandard2.0`, `net461`, `netcoreapp3.1`, `net8.0-windows`
//! - Missing or empty: the `Any` family

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Family name used for dependency groups without a target framework
pub const ANY_FAMILY: &str = "Any";

// Family name followed by an optional `,Version=v` and a dotted version
// e.g. .NETStandard2.0, .NETFramework,Version=v4.5, netcoreapp3.1, net461
static FRAMEWORK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z.]+?)\s*(?:,\s*Version=v?)?(\d+(?:\.\d+)*)?$").unwrap()
});

// Short folder identifiers and the family they stand for.
// `net` is handled separately since it maps to two families.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("netstandard", ".NETStandard"),
    ("netcoreapp", ".NETCoreApp"),
    ("netmf", ".NETMicroFramework"),
    ("uap", "UAP"),
    ("monoandroid", "MonoAndroid"),
    ("monotouch", "MonoTouch"),
    ("xamarinios", "Xamarin.iOS"),
    ("xamarinmac", "Xamarin.Mac"),
    ("tizen", "Tizen"),
    ("sl", "Silverlight"),
    ("win", "Windows"),
    ("wp", "WindowsPhone"),
];

/// Numeric framework version; trailing zeros are not significant
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkVersion(Vec<u32>);

impl FrameworkVersion {
    /// Build from numeric components
    pub fn new(mut parts: Vec<u32>) -> Self {
        while parts.last() == Some(&0) {
            parts.pop();
        }
        Self(parts)
    }

    fn parse_dotted(s: &str) -> Self {
        Self::new(s.split('.').filter_map(|p| p.parse().ok()).collect())
    }

    fn parse_compact(s: &str) -> Self {
        Self::new(s.chars().filter_map(|c| c.to_digit(10)).collect())
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        while parts.len() < 2 {
            parts.push("0".to_string());
        }
        write!(f, "{}", parts.join("."))
    }
}

/// A framework family plus version, e.g. `.NETStandard 2.0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TargetFramework {
    family: String,
    version: FrameworkVersion,
}

impl TargetFramework {
    /// Create a framework from an already-resolved family name
    pub fn new(family: impl Into<String>, version: FrameworkVersion) -> Self {
        Self {
            family: family.into(),
            version,
        }
    }

    /// The framework used by groups that declare no target framework
    pub fn any() -> Self {
        Self::new(ANY_FAMILY, FrameworkVersion::default())
    }

    /// Parse a long or short framework name. Unrecognised names keep their
    /// identifier as the family.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            return Self::any();
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("portable") {
            return Self::new(".NETPortable", FrameworkVersion::default());
        }

        // Platform suffixes (net6.0-windows) do not affect the family
        let base = match trimmed.split_once('-') {
            Some((base, _)) => base,
            None => trimmed,
        };

        let Some(caps) = FRAMEWORK_RE.captures(base) else {
            return Self::new(trimmed, FrameworkVersion::default());
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let raw_version = caps.get(2).map_or("", |m| m.as_str());
        let short = name.to_ascii_lowercase();

        if short == "net" {
            let version = if raw_version.contains('.') {
                FrameworkVersion::parse_dotted(raw_version)
            } else {
                FrameworkVersion::parse_compact(raw_version)
            };
            // net5.0 (or net50) and later are .NET Core under a new name
            let family = if version.0.first().copied().unwrap_or(0) >= 5 {
                ".NETCoreApp"
            } else {
                ".NETFramework"
            };
            return Self::new(family, version);
        }

        if let Some((_, family)) = SHORT_NAMES.iter().find(|(s, _)| *s == short) {
            let version = if raw_version.contains('.') {
                FrameworkVersion::parse_dotted(raw_version)
            } else {
                FrameworkVersion::parse_compact(raw_version)
            };
            return Self::new(*family, version);
        }

        Self::new(name, FrameworkVersion::parse_dotted(raw_version))
    }

    /// Framework family, e.g. `.NETStandard`
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Framework version
    pub fn version(&self) -> &FrameworkVersion {
        &self.version
    }
}

impl Default for TargetFramework {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.family == ANY_FAMILY {
            write!(f, "{}", ANY_FAMILY)
        } else {
            write!(f, "{},Version=v{}", self.family, self.version)
        }
    }
}

impl From<String> for TargetFramework {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TargetFramework> for String {
    fn from(tf: TargetFramework) -> Self {
        tf.to_string()
    }
}
