//! In-memory staging of generated artifacts
//!
//! Packaging of generated artifacts happens outside this crate. Producers
//! write into an [`ArchiveSink`]; [`Archive`] keeps the entries in memory in
//! insertion order until a packager picks them up.

use crate::{Error, Result};
use indexmap::IndexMap;
use tracing::trace;

/// Destination for generated artifacts
pub trait ArchiveSink {
    /// Add an entry, replacing any entry already stored under the same path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntryPath`] if the path is empty once
    /// normalized.
    fn add_entry(&mut self, path: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Ordered in-memory archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: IndexMap<String, Vec<u8>>,
}

impl Archive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an entry and return its content
    pub fn remove_entry(&mut self, path: &str) -> Option<Vec<u8>> {
        self.entries.shift_remove(normalize_path(path))
    }

    /// Content of an entry
    #[must_use]
    pub fn entry_bytes(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(normalize_path(path)).map(Vec::as_slice)
    }

    /// Path of the entry at `index` in insertion order
    #[must_use]
    pub fn entry_name(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(path, _)| path.as_str())
    }

    /// Entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(path, bytes)| (path.as_str(), bytes.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move every entry of `other` into this archive. Entries of `other`
    /// replace entries stored under the same path.
    pub fn merge(&mut self, other: Archive) {
        for (path, bytes) in other.entries {
            self.entries.insert(path, bytes);
        }
    }
}

impl ArchiveSink for Archive {
    fn add_entry(&mut self, path: &str, bytes: Vec<u8>) -> Result<()> {
        let normalized = normalize_path(path);
        if normalized.is_empty() {
            return Err(Error::invalid_entry_path(path));
        }
        trace!(path = normalized, size = bytes.len(), "Adding archive entry");
        self.entries.insert(normalized.to_string(), bytes);
        Ok(())
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    path.strip_prefix('/').unwrap_or(path)
}
