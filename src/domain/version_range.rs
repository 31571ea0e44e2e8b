//! NuGet version ranges
//!
//! Handles range formats:
//! - Minimum version: `1.0` (means `>= 1.0`)
//! - Exact version: `[1.0]`
//! - Interval notation: `[1.0, 2.0)`, `(1.0, )`, `(, 2.0]`
//! - Empty string: any version

use super::NuGetVersion;
use crate::error::VersionError;
use std::fmt;
use std::str::FromStr;

/// A range of acceptable versions for a dependency
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRange {
    min: Option<NuGetVersion>,
    min_inclusive: bool,
    max: Option<NuGetVersion>,
    max_inclusive: bool,
}

impl VersionRange {
    /// A range accepting any version
    pub fn any() -> Self {
        Self::default()
    }

    /// `[version, )`
    pub fn at_least(version: NuGetVersion) -> Self {
        Self {
            min: Some(version),
            min_inclusive: true,
            max: None,
            max_inclusive: false,
        }
    }

    /// Parse a NuGet range string
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::any());
        }

        let open = trimmed.chars().next().unwrap_or_default();
        if open != '[' && open != '(' {
            let version = NuGetVersion::parse(trimmed)
                .map_err(|e| VersionError::invalid_range(input, e.to_string()))?;
            return Ok(Self::at_least(version));
        }

        let close = trimmed.chars().last().unwrap_or_default();
        if trimmed.len() < 2 || (close != ']' && close != ')') {
            return Err(VersionError::invalid_range(
                input,
                "missing closing bracket",
            ));
        }
        let inner = &trimmed[1..trimmed.len() - 1];
        let min_inclusive = open == '[';
        let max_inclusive = close == ']';

        let parse_bound = |s: &str| -> Result<Option<NuGetVersion>, VersionError> {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                NuGetVersion::parse(s)
                    .map(Some)
                    .map_err(|e| VersionError::invalid_range(input, e.to_string()))
            }
        };

        let Some((lower, upper)) = inner.split_once(',') else {
            // `[1.0]` is the only bracketed form without a comma
            if !(min_inclusive && max_inclusive) {
                return Err(VersionError::invalid_range(
                    input,
                    "exact versions must use square brackets",
                ));
            }
            let version = parse_bound(inner)?
                .ok_or_else(|| VersionError::invalid_range(input, "empty exact version"))?;
            return Ok(Self {
                min: Some(version.clone()),
                min_inclusive: true,
                max: Some(version),
                max_inclusive: true,
            });
        };

        let min = parse_bound(lower)?;
        let max = parse_bound(upper)?;

        if let (Some(lo), Some(hi)) = (&min, &max) {
            if lo > hi || (lo == hi && !(min_inclusive && max_inclusive)) {
                return Err(VersionError::invalid_range(input, "empty range"));
            }
        }

        Ok(Self {
            min,
            min_inclusive: min_inclusive && !lower.trim().is_empty(),
            max,
            max_inclusive: max_inclusive && !upper.trim().is_empty(),
        })
    }

    /// Lower bound of the range, if any
    pub fn min_version(&self) -> Option<&NuGetVersion> {
        self.min.as_ref()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(lo), Some(hi)) = (&self.min, &self.max) {
            if lo == hi && self.min_inclusive && self.max_inclusive {
                return write!(f, "[{}]", lo);
            }
        }
        write!(f, "{}", if self.min_inclusive { '[' } else { '(' })?;
        if let Some(lo) = &self.min {
            write!(f, "{}", lo)?;
        }
        write!(f, ", ")?;
        if let Some(hi) = &self.max {
            write!(f, "{}", hi)?;
        }
        write!(f, "{}", if self.max_inclusive { ']' } else { ')' })
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
