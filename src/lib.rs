// src/lib.rs

//! Insertions package config updater
//!
//! Updates package versions declared in a root package config and in the
//! package configs it references, preserving every other byte of each file.
//!
//! # Architecture
//!
//! - Documents: each file is kept as text segments so untouched content is
//!   written back verbatim
//! - Index: package ids map to their declarations across all loaded files
//! - Saves: only modified files are written, each with its own result

pub mod config;
mod error;
pub mod manifest;

pub use config::{
    ConfigDocument, ConfigIndex, DefaultConfigUpdater, EntryRef, FileSaveResult, PackageEntry,
    find_secondary_paths, parse_config_file, parse_config_str,
};
pub use error::{Error, Result};
pub use manifest::{PackageUpdate, UpdateManifest, UpdateOutcome, apply_manifest};
