// src/config/document.rs

//! In-memory model of one package config file
//!
//! A document keeps its file text as an ordered list of segments. Most
//! segments are verbatim text; one segment per package declaration holds the
//! raw value of its `version` attribute. Concatenating the segments yields the
//! original file, so rewriting a version only touches that one segment.

use crate::error::{Error, Result};
use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A single `<package>` declaration inside a config document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    id: String,
    version: String,
    /// Handle to the segment holding the raw version attribute value
    segment: usize,
}

impl PackageEntry {
    /// Package identifier as declared
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current version (XML-unescaped)
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// A package declaration located by the parser
#[derive(Debug, Clone)]
pub(crate) struct ParsedPackage {
    pub id: String,
    pub version: String,
    /// Byte range of the raw version attribute value within the file text
    pub span: Range<usize>,
}

/// One loaded package config file
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    path: PathBuf,
    segments: Vec<String>,
    entries: Vec<PackageEntry>,
    secondary_refs: Vec<String>,
    dirty: bool,
}

impl ConfigDocument {
    /// Split `content` around the version spans of `packages`.
    ///
    /// Spans must be in ascending order and must not overlap.
    pub(crate) fn from_parts(
        path: &Path,
        content: &str,
        packages: Vec<ParsedPackage>,
        secondary_refs: Vec<String>,
    ) -> Self {
        let mut segments = Vec::with_capacity(packages.len() * 2 + 1);
        let mut entries = Vec::with_capacity(packages.len());
        let mut cursor = 0;

        for package in packages {
            segments.push(content[cursor..package.span.start].to_string());
            segments.push(content[package.span.clone()].to_string());
            entries.push(PackageEntry {
                id: package.id,
                version: package.version,
                segment: segments.len() - 1,
            });
            cursor = package.span.end;
        }
        segments.push(content[cursor..].to_string());

        Self {
            path: path.to_path_buf(),
            segments,
            entries,
            secondary_refs,
            dirty: false,
        }
    }

    /// Path this document was loaded from and will be saved to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package declarations in file order
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// `<packageconfig>` paths exactly as declared in this file
    pub fn secondary_refs(&self) -> &[String] {
        &self.secondary_refs
    }

    /// Whether any entry changed since load or the last successful save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the version of the entry at `entry`, returning the old version.
    ///
    /// Marks the document dirty even when the value does not change.
    pub(crate) fn set_version(&mut self, entry: usize, version: &str) -> Option<String> {
        let entry = self.entries.get_mut(entry)?;
        self.segments[entry.segment] = quick_xml::escape::escape(version).into_owned();
        self.dirty = true;
        Some(std::mem::replace(&mut entry.version, version.to_string()))
    }

    /// Serialize and write the document over its own path
    pub(crate) fn write(&self) -> Result<()> {
        std::fs::write(&self.path, self.to_string()).map_err(|source| Error::WriteFailure {
            path: self.path.clone(),
            source,
        })
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment)?;
        }
        Ok(())
    }
}
