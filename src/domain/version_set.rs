//! Ordered, de-duplicated collections of versions

use crate::domain::Version;
use crate::error::VersionError;
use std::collections::BTreeSet;
use std::fmt;

/// A set of versions, always iterated in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: BTreeSet<Version>,
}

impl VersionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every entry strictly as `X.Y`
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, VersionError> {
        values.iter().map(|v| v.as_ref().parse::<Version>()).collect()
    }

    pub fn insert(&mut self, version: Version) -> bool {
        self.versions.insert(version)
    }

    pub fn remove(&mut self, version: &Version) -> bool {
        self.versions.remove(version)
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.versions.contains(version)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Version> + '_ {
        self.versions.iter()
    }

    /// Highest version, used as the build version
    pub fn max(&self) -> Result<Version, VersionError> {
        self.versions.last().copied().ok_or(VersionError::EmptySet)
    }

    /// Keep only the versions accepted by `predicate`
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Version) -> bool,
    {
        self.versions.iter().copied().filter(|v| predicate(v)).collect()
    }

    /// Ascending list of `X.Y` strings
    pub fn to_strings(&self) -> Vec<String> {
        self.versions.iter().map(Version::to_string).collect()
    }
}

impl FromIterator<Version> for VersionSet {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for VersionSet {
    type Item = Version;
    type IntoIter = std::collections::btree_set::IntoIter<Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.into_iter()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Version;
    type IntoIter = std::collections::btree_set::Iter<'a, Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}

/// Space-joined ascending list, e.g. `3.10 3.11 3.12`
impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, version) in self.versions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", version)?;
        }
        Ok(())
    }
}
