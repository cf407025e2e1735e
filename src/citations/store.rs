use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::SourceTag;
use crate::common::{backup_path, ensure_dir};

/// Citation count reported by one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationValue {
    pub source: SourceTag,
    pub value: Option<u64>,
}

impl CitationValue {
    pub fn new(source: SourceTag, value: u64) -> Self {
        Self { source, value: Some(value) }
    }
}

/// Citation values of one title, by source
pub type CitationEntry = BTreeMap<SourceTag, CitationValue>;

/// Citation counts keyed by exact publication title.
///
/// Serialized as one JSON object sorted by title; entries are created on first
/// sight of a title and only ever gain sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationStore {
    entries: BTreeMap<String, CitationEntry>,
}

impl CitationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No citation store at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read citation store from {}", path.display()))?;
        let store: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse citation store {}", path.display()))?;
        info!("Loaded {} titles from {}", store.len(), path.display());
        Ok(store)
    }

    /// Write the whole store to `path`. An existing file is first renamed to a
    /// `<name>-<8 hex>` sibling, whose path is returned.
    pub fn save(&self, path: &Path) -> Result<Option<PathBuf>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let backup = if path.is_file() {
            let backup = backup_path(path);
            fs::rename(path, &backup).with_context(|| {
                format!("Failed to back up {} to {}", path.display(), backup.display())
            })?;
            Some(backup)
        } else {
            None
        };

        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write citation store to {}", path.display()))?;
        Ok(backup)
    }

    /// Pretty JSON with two-space indentation and sorted keys
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize citation store")
    }

    pub fn get(&self, title: &str) -> Option<&CitationEntry> {
        self.entries.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Entry of `title`, created empty on first use
    pub fn entry_mut(&mut self, title: &str) -> &mut CitationEntry {
        self.entries.entry(title.to_string()).or_default()
    }

    /// Record a count from one source
    pub fn insert(&mut self, title: &str, value: CitationValue) {
        let source = value.source;
        if let Some(previous) = self.entry_mut(title).insert(source, value) {
            warn!("Replaced {} value {:?} for '{}'", source, previous.value, title);
        }
    }

    /// Count of `title` from `source`, if present and not null
    pub fn value(&self, title: &str, source: SourceTag) -> Option<u64> {
        self.get(title)?.get(&source)?.value
    }

    /// Sources of `sources` with no value stored for `title`
    pub fn missing_sources(&self, title: &str, sources: &[SourceTag]) -> Vec<SourceTag> {
        match self.get(title) {
            None => sources.to_vec(),
            Some(entry) => sources
                .iter()
                .copied()
                .filter(|source| !entry.contains_key(source))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
