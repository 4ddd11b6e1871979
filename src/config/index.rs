// src/config/index.rs

//! Cross-file package index
//!
//! Maps a case-insensitive package id to every declaration of that id across
//! the loaded documents. The index only holds positions; the documents stay
//! the sole owners of the entries. It is rebuilt from scratch on every load.

use super::document::ConfigDocument;
use std::collections::HashMap;

/// Position of one package entry among the loaded documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    /// Index of the owning document in load order
    pub document: usize,
    /// Index of the entry within that document
    pub entry: usize,
}

/// Derived map from package id to the entries declaring it
#[derive(Debug, Clone, Default)]
pub struct ConfigIndex {
    buckets: HashMap<String, Vec<EntryRef>>,
}

impl ConfigIndex {
    /// Build an index over `documents`.
    ///
    /// Each bucket lists entries in document-then-entry order.
    pub fn build(documents: &[ConfigDocument]) -> Self {
        let mut buckets: HashMap<String, Vec<EntryRef>> = HashMap::new();

        for (document, doc) in documents.iter().enumerate() {
            for (entry, package) in doc.entries().iter().enumerate() {
                buckets
                    .entry(normalize_id(package.id()))
                    .or_default()
                    .push(EntryRef { document, entry });
            }
        }

        Self { buckets }
    }

    /// Entries declaring `id`, empty if none do
    pub fn lookup(&self, id: &str) -> &[EntryRef] {
        self.buckets
            .get(&normalize_id(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct package ids
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

/// Key used for case-insensitive id comparison
pub fn normalize_id(id: &str) -> String {
    id.to_lowercase()
}
