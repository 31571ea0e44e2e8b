//! Resolved version map

use super::{package_key, NuGetVersion, PackageReference};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A package and the version chosen for it during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Identifier, with the casing the registry reported last
    pub id: String,
    /// Effective version
    pub version: NuGetVersion,
}

/// Case-insensitive package id -> effective version
///
/// Holds at most one entry per identifier. Only the resolver mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVersionMap {
    entries: BTreeMap<String, ResolvedPackage>,
}

impl ResolvedVersionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Version recorded for a package id
    pub fn get(&self, id: &str) -> Option<&NuGetVersion> {
        self.entries.get(&package_key(id)).map(|p| &p.version)
    }

    /// Full entry recorded for a package id
    pub fn get_package(&self, id: &str) -> Option<&ResolvedPackage> {
        self.entries.get(&package_key(id))
    }

    /// Insert or overwrite the entry for `id`
    pub fn record(&mut self, id: &str, version: NuGetVersion) {
        self.entries.insert(
            package_key(id),
            ResolvedPackage {
                id: id.to_string(),
                version,
            },
        );
    }

    /// Remove the entry for `id`
    pub fn remove(&mut self, id: &str) -> Option<ResolvedPackage> {
        self.entries.remove(&package_key(id))
    }

    /// Returns true if `id` has an entry
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(&package_key(id))
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no package was resolved
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by lower-cased id
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPackage> {
        self.entries.values()
    }
}

impl FromIterator<PackageReference> for ResolvedVersionMap {
    fn from_iter<I: IntoIterator<Item = PackageReference>>(iter: I) -> Self {
        let mut map = Self::new();
        for reference in iter {
            map.record(&reference.id, reference.version);
        }
        map
    }
}

impl Serialize for ResolvedVersionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|p| (&p.id, &p.version)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut map = ResolvedVersionMap::new();
        map.record("Newtonsoft.Json", NuGetVersion::new(13, 0, 1));
        assert_eq!(map.get("NEWTONSOFT.JSON"), Some(&NuGetVersion::new(13, 0, 1)));
        assert!(map.contains("newtonsoft.json"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_record_overwrites_single_entry() {
        let mut map = ResolvedVersionMap::new();
        map.record("foo", NuGetVersion::new(1, 0, 0));
        map.record("Foo", NuGetVersion::new(2, 0, 0));
        assert_eq!(map.len(), 1);
        let package = map.get_package("FOO").unwrap();
        assert_eq!(package.id, "Foo");
        assert_eq!(package.version, NuGetVersion::new(2, 0, 0));
    }

    #[test]
    fn test_remove() {
        let mut map = ResolvedVersionMap::new();
        map.record("Foo", NuGetVersion::new(1, 0, 0));
        assert!(map.remove("foo").is_some());
        assert!(map.is_empty());
        assert!(map.remove("foo").is_none());
    }

    #[test]
    fn test_serialize_as_object() {
        let map: ResolvedVersionMap = [
            PackageReference::new("Bar", NuGetVersion::new(2, 0, 0)),
            PackageReference::new("Foo", NuGetVersion::new(1, 0, 0)),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Bar":"2.0.0","Foo":"1.0.0"}"#);
    }
}
