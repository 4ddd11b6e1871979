// src/config/mod.rs

//! Package configs - root config, referenced configs, and version updates
//!
//! A root config declares packages and may reference secondary configs that
//! declare more packages. The updater loads the whole hierarchy, indexes the
//! declarations by package id, rewrites versions in place and saves only the
//! files that changed.
//!
//! # Example default.config
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <corext>
//!   <packages>
//!     <package id="VS.Tools.Roslyn" version="3.6.0" link="tools/roslyn" />
//!   </packages>
//!   <packageconfigs>
//!     <packageconfig path="Packages/components.config" />
//!   </packageconfigs>
//! </corext>
//! ```
//!
//! Secondary configs use the same `<package>` elements. `<packageconfig>`
//! references are only followed from the root.

mod document;
mod index;
mod locator;
mod parser;
mod save;
mod updater;

pub use document::{ConfigDocument, PackageEntry};
pub use index::{ConfigIndex, EntryRef, normalize_id};
pub use locator::find_secondary_paths;
pub use parser::{PACKAGE_CONFIG_ELEMENT, PACKAGE_ELEMENT, parse_config_file, parse_config_str};
pub use save::FileSaveResult;
pub use updater::DefaultConfigUpdater;
