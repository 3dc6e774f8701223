//! Package identifiers, allow-lists and per-package outcomes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A bare package name as reported by the package manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        PackageName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(s: &str) -> Self {
        PackageName(s.to_string())
    }
}

impl From<String> for PackageName {
    fn from(s: String) -> Self {
        PackageName(s)
    }
}

/// Upgradable packages in the manager's native listing order.
///
/// Not sorted and not deduplicated.
pub type UpgradableSet = Vec<PackageName>;

/// Packages permitted to be upgraded without manual review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<PackageName>);

impl AllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PackageName>,
    {
        AllowList(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &PackageName) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Members of `upgradable` that are allowed, in `upgradable` order.
    pub fn select(&self, upgradable: &[PackageName]) -> Vec<PackageName> {
        upgradable
            .iter()
            .filter(|name| self.contains(name))
            .cloned()
            .collect()
    }
}

/// Outcome of a single package upgrade attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateResult {
    Updated,
    Failed,
}
