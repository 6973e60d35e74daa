//! The static question/answer catalog used for canned replies and as
//! context for generated fallback answers.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaEntry {
    pub id: u32,
    pub pattern: String,
    pub response: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog has no entries")]
    Empty,

    #[error("catalog entry {0} has a blank pattern")]
    BlankPattern(u32),

    #[error("catalog id {0} appears more than once")]
    DuplicateId(u32),
}

/// Ordered, immutable list of entries. Cloning shares the same allocation.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[QaEntry]>,
}

impl Catalog {
    pub fn new(entries: Vec<QaEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.pattern.trim().is_empty() {
                return Err(CatalogError::BlankPattern(entry.id));
            }
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<QaEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[QaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: u32) -> Option<&QaEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}
