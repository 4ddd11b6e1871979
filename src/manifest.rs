// src/manifest.rs

//! Update manifests
//!
//! A manifest lists the package versions to apply in one run, plus package
//! ids that must never be touched.
//!
//! ```toml
//! ignore = ["VS.Tools.Legacy"]
//!
//! [packages]
//! "VS.Tools.Roslyn" = "4.0.1"
//! "Microsoft.Build" = "17.3.0"
//! ```

use crate::config::{DefaultConfigUpdater, normalize_id};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Package versions to apply in one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateManifest {
    /// Package id -> new version; ids are unique ignoring case
    #[serde(default)]
    pub packages: BTreeMap<String, String>,

    /// Package ids to leave alone (case-insensitive)
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// What happened to one requested update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Package was found; holds the versions it replaced
    Updated(Vec<String>),
    /// No loaded config declares the package
    NotFound,
    /// Package is on the ignore list
    Ignored,
}

/// A requested update and its outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    pub id: String,
    pub version: String,
    pub outcome: UpdateOutcome,
}

impl UpdateManifest {
    /// Read a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a manifest from TOML text.
    ///
    /// Package ids that differ only in case are rejected.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;

        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for id in manifest.packages.keys() {
            if let Some(first) = seen.insert(normalize_id(id), id) {
                return Err(Error::InvalidArgument(format!(
                    "package '{}' is listed twice (as '{}' and '{}')",
                    id, first, id
                )));
            }
        }

        Ok(manifest)
    }

    /// Add an update given as `ID=VERSION`.
    ///
    /// Replaces any earlier update of the same package, whatever its case.
    pub fn add_update(&mut self, spec: &str) -> Result<()> {
        let (id, version) = spec.split_once('=').ok_or_else(|| {
            Error::InvalidArgument(format!("expected ID=VERSION, got '{}'", spec))
        })?;
        let (id, version) = (id.trim(), version.trim());

        if id.is_empty() {
            return Err(Error::InvalidArgument(format!("missing package id in '{}'", spec)));
        }
        if version.is_empty() {
            return Err(Error::InvalidArgument(format!("missing version in '{}'", spec)));
        }

        let normalized = normalize_id(id);
        self.packages.retain(|existing, _| normalize_id(existing) != normalized);
        self.packages.insert(id.to_string(), version.to_string());
        Ok(())
    }

    /// Whether `id` is on the ignore list
    pub fn is_ignored(&self, id: &str) -> bool {
        let id = normalize_id(id);
        self.ignore.iter().any(|ignored| normalize_id(ignored) == id)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Apply every update in `manifest` to `updater`, in package id order
pub fn apply_manifest(
    updater: &mut DefaultConfigUpdater,
    manifest: &UpdateManifest,
) -> Vec<PackageUpdate> {
    let updates: Vec<PackageUpdate> = manifest
        .packages
        .iter()
        .map(|(id, version)| {
            let outcome = if manifest.is_ignored(id) {
                debug!("Skipping ignored package {}", id);
                UpdateOutcome::Ignored
            } else {
                match updater.try_update_package(id, version) {
                    Some(previous) => UpdateOutcome::Updated(previous),
                    None => UpdateOutcome::NotFound,
                }
            };
            PackageUpdate {
                id: id.clone(),
                version: version.clone(),
                outcome,
            }
        })
        .collect();

    let updated = updates
        .iter()
        .filter(|u| matches!(u.outcome, UpdateOutcome::Updated(_)))
        .count();
    info!("Applied {} of {} package updates", updated, updates.len());

    updates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = UpdateManifest::parse(
            r#"
ignore = ["VS.Tools.Legacy"]

[packages]
"VS.Tools.Roslyn" = "4.0.1"
"Microsoft.Build" = "17.3.0"
"#,
        )
        .unwrap();
        assert_eq!(manifest.packages.len(), 2);
        assert_eq!(manifest.packages["VS.Tools.Roslyn"], "4.0.1");
        assert!(manifest.is_ignored("vs.tools.legacy"));
        assert!(!manifest.is_ignored("VS.Tools.Roslyn"));
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = UpdateManifest::parse("").unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.ignore.is_empty());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let result = UpdateManifest::parse("packages = 3");
        assert!(matches!(result, Err(Error::Manifest(_))));
    }

    #[test]
    fn test_add_update() {
        let mut manifest = UpdateManifest::default();
        manifest.add_update("VS.Tools.Roslyn=4.0.1").unwrap();
        manifest.add_update(" Microsoft.Build = 17.3.0 ").unwrap();
        assert_eq!(manifest.packages["VS.Tools.Roslyn"], "4.0.1");
        assert_eq!(manifest.packages["Microsoft.Build"], "17.3.0");
    }

    #[test]
    fn test_add_update_replaces_same_package_any_case() {
        let mut manifest = UpdateManifest::default();
        manifest.add_update("VS.Tools.Roslyn=4.0.1").unwrap();
        manifest.add_update("vs.tools.roslyn=4.0.2").unwrap();

        assert_eq!(manifest.packages.len(), 1);
        assert_eq!(manifest.packages["vs.tools.roslyn"], "4.0.2");
    }

    #[test]
    fn test_parse_rejects_ids_differing_in_case() {
        let result = UpdateManifest::parse(
            r#"
[packages]
"A" = "1"
"a" = "2"
"#,
        );
        let err = result.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_case_variants_apply_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("default.config");
        std::fs::write(&root, r#"<c><package id="A" version="1"/></c>"#).unwrap();

        let mut updater = DefaultConfigUpdater::new();
        updater.try_load(&root).unwrap();
        let mut manifest = UpdateManifest::default();
        manifest.add_update("A=2").unwrap();
        manifest.add_update("a=3").unwrap();

        let updates = apply_manifest(&mut updater, &manifest);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].outcome, UpdateOutcome::Updated(vec!["1".to_string()]));
        assert_eq!(updater.package_versions("A"), ["3"]);
    }

    #[test]
    fn test_add_update_rejects_bad_specs() {
        let mut manifest = UpdateManifest::default();
        for spec in ["VS.Tools.Roslyn", "=1.0", "VS.Tools.Roslyn="] {
            assert!(
                matches!(manifest.add_update(spec), Err(Error::InvalidArgument(_))),
                "{} should be rejected",
                spec
            );
        }
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_apply_without_load() {
        let mut updater = DefaultConfigUpdater::new();
        let mut manifest = UpdateManifest::default();
        manifest.add_update("A=1.0").unwrap();
        manifest.add_update("B=2.0").unwrap();
        manifest.ignore.push("b".to_string());

        let updates = apply_manifest(&mut updater, &manifest);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].outcome, UpdateOutcome::NotFound);
        assert_eq!(updates[1].outcome, UpdateOutcome::Ignored);
    }
}
