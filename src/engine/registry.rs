//! Section Registry - ordered list of the page's sections.
//!
//! Registry order is document order. The resolver scans it back to front,
//! so when two anchors share an offset the later entry wins.

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::types::SectionId;

// =============================================================================
// Entries
// =============================================================================

/// A registered section and the label its nav link shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: SectionId,
    pub label: String,
}

impl SectionEntry {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Sections of the default single-page layout.
pub const DEFAULT_SECTIONS: [(&str, &str); 4] = [
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];

// =============================================================================
// Registry
// =============================================================================

/// Non-empty, duplicate-free ordered set of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
}

impl SectionRegistry {
    /// Build a registry, rejecting empty lists and repeated ids.
    pub fn new(entries: Vec<SectionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(NavError::EmptyRegistry);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(NavError::DuplicateSection(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// First registered section; active until the resolver finds another.
    pub fn first(&self) -> &SectionId {
        // Non-empty by construction
        &self.entries[0].id
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }

    pub fn get(&self, id: &SectionId) -> Option<&SectionEntry> {
        self.entries.iter().find(|e| e.id == *id)
    }

    /// Position of `id` in registry order.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = &SectionId> {
        self.entries.iter().map(|e| &e.id)
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SECTIONS
                .iter()
                .map(|&(id, label)| SectionEntry::new(id, label))
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
