//! Core identifier types shared by every crate in the workspace.
//!
//! NationStates treats names case-insensitively and uses underscores
//! where the display name has spaces, so everything that enters the
//! scanner is normalized the same way.

use crate::error::{Result, StoreError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Normalize a nation or region name: trim, lowercase, spaces to underscores.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// A normalized nation name.
///
/// Two names that differ only in case or in spaces vs underscores
/// compare equal once wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NationName(String);

impl NationName {
    /// Normalize `raw` and wrap it. Fails if nothing is left.
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = normalize_name(raw);
        if normalized.is_empty() {
            return Err(StoreError::InvalidName(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NationName {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for NationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The set of nations known not to accept recruitment telegrams.
///
/// Loaded once per scan and never mutated while the scan runs.
/// `entries` counts lines as read (duplicates included), while
/// `names` holds the distinct identifiers used for lookups.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    names: HashSet<NationName>,
    entries: usize,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &NationName) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct excluded nations
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of lines the set was built from, duplicates included
    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl FromIterator<NationName> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = NationName>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for name in iter {
            set.entries += 1;
            set.names.insert(name);
        }
        set
    }
}
