//! Immutable catalog table with atomic hot-swap.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use inua_core::Technique;

/// Catalog document metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Schema/content version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Content language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A validated, ordered, read-only set of technique records.
///
/// Built once by the loader and never mutated afterwards. An empty
/// catalog is a valid state that callers must handle, not an error.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    meta: MetaInfo,
    techniques: Vec<Technique>,
}

impl Catalog {
    /// Build a catalog from validated records.
    #[must_use]
    pub fn new(meta: MetaInfo, techniques: Vec<Technique>) -> Self {
        Self { meta, techniques }
    }

    /// Document metadata.
    #[must_use]
    pub fn meta(&self) -> &MetaInfo {
        &self.meta
    }

    /// All records, in catalog order.
    #[must_use]
    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Technique> {
        self.techniques.iter().find(|t| t.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }
}

/// Process-wide handle to the current catalog.
///
/// Readers take a cheap `Arc` snapshot and keep using it for the rest of
/// their request; a reload installs an entirely new catalog in one swap,
/// so no reader ever observes partially-updated rules.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    /// Create a handle around an initial catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Snapshot of the current catalog.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    /// Atomically replace the catalog with a freshly-loaded one.
    pub fn swap(&self, catalog: Catalog) {
        *self.current.write() = Arc::new(catalog);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
