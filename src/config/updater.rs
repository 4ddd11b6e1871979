// src/config/updater.rs

//! Default config updater
//!
//! Loads a root package config together with the package configs it
//! references, updates package versions across all of them, and writes back
//! only the files that changed.

use super::document::{ConfigDocument, PackageEntry};
use super::index::ConfigIndex;
use super::locator::find_secondary_paths;
use super::parser::parse_config_file;
use super::save::FileSaveResult;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load, update and save a hierarchy of package configs.
///
/// Documents are kept in load order: the root first, then its secondary
/// configs in declaration order. A successful save clears the dirty flag of
/// the written document; a failed save leaves it dirty.
#[derive(Debug, Default)]
pub struct DefaultConfigUpdater {
    documents: Vec<ConfigDocument>,
    index: ConfigIndex,
}

impl DefaultConfigUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the root config at `path` and every config it references.
    ///
    /// An empty or missing root path leaves the current state untouched. Any
    /// other failure leaves the updater empty.
    ///
    /// A referenced path is loaded once per spelling: `s.config` and
    /// `./s.config` become two documents.
    pub fn try_load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "config path must not be empty".to_string(),
            ));
        }
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        self.reset();
        let documents = load_documents(path)?;
        self.index = ConfigIndex::build(&documents);
        self.documents = documents;

        info!(
            "Loaded {} config files with {} packages from {}",
            self.documents.len(),
            self.index.len(),
            path.display()
        );
        Ok(())
    }

    /// Set every declaration of `id` to `new_version`.
    ///
    /// Returns the previous versions in document-then-entry order, or `None`
    /// if no loaded document declares the package.
    pub fn try_update_package(&mut self, id: &str, new_version: &str) -> Option<Vec<String>> {
        let refs = self.index.lookup(id);
        if refs.is_empty() {
            debug!("Package {} not found in loaded configs", id);
            return None;
        }

        let mut previous = Vec::with_capacity(refs.len());
        for entry_ref in refs {
            let doc = &mut self.documents[entry_ref.document];
            if let Some(old) = doc.set_version(entry_ref.entry, new_version) {
                debug!(
                    "Updated {} in {}: {} -> {}",
                    id,
                    doc.path().display(),
                    old,
                    new_version
                );
                previous.push(old);
            }
        }

        Some(previous)
    }

    /// Write every dirty document, one result per write attempt
    pub fn save(&mut self) -> Vec<FileSaveResult> {
        let mut results = Vec::new();

        for doc in self.documents.iter_mut().filter(|doc| doc.is_dirty()) {
            match doc.write() {
                Ok(()) => {
                    doc.mark_clean();
                    info!("Saved {}", doc.path().display());
                    results.push(FileSaveResult::success(doc.path()));
                }
                Err(e) => {
                    warn!("Failed to save {}: {}", doc.path().display(), e);
                    results.push(FileSaveResult::failure(doc.path(), e));
                }
            }
        }

        results
    }

    /// Whether a load has completed successfully
    pub fn is_loaded(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Loaded documents, root first
    pub fn documents(&self) -> &[ConfigDocument] {
        &self.documents
    }

    /// Every declaration of `id` with the document that owns it
    pub fn package_entries(&self, id: &str) -> Vec<(&ConfigDocument, &PackageEntry)> {
        self.index
            .lookup(id)
            .iter()
            .filter_map(|entry_ref| {
                let doc = self.documents.get(entry_ref.document)?;
                Some((doc, doc.entries().get(entry_ref.entry)?))
            })
            .collect()
    }

    /// Current versions of every declaration of `id`
    pub fn package_versions(&self, id: &str) -> Vec<&str> {
        self.package_entries(id)
            .into_iter()
            .map(|(_, entry)| entry.version())
            .collect()
    }

    /// Paths of the documents the next `save` would write
    pub fn dirty_paths(&self) -> Vec<&Path> {
        self.documents
            .iter()
            .filter(|doc| doc.is_dirty())
            .map(ConfigDocument::path)
            .collect()
    }

    fn reset(&mut self) {
        self.documents.clear();
        self.index.clear();
    }
}

/// Parse the root config and every distinct secondary config it declares
fn load_documents(root_path: &Path) -> Result<Vec<ConfigDocument>> {
    let root = parse_config_file(root_path)?;
    let secondary_paths = find_secondary_paths(&root);

    // Compare spellings, not `Path` equality, which ignores `.` components
    let mut seen: HashSet<OsString> = HashSet::new();
    seen.insert(root_path.as_os_str().to_os_string());
    let mut documents = vec![root];

    for secondary_path in secondary_paths {
        if !seen.insert(secondary_path.as_os_str().to_os_string()) {
            debug!("Skipping duplicate package config {}", secondary_path.display());
            continue;
        }

        let doc = parse_config_file(&secondary_path).map_err(|e| match e {
            Error::NotFound(path) => Error::parse(
                root_path,
                format!("referenced package config {} does not exist", path.display()),
            ),
            other => other,
        })?;

        if !doc.secondary_refs().is_empty() {
            warn!(
                "Ignoring {} package config references in {}",
                doc.secondary_refs().len(),
                doc.path().display()
            );
        }
        documents.push(doc);
    }

    Ok(documents)
}
