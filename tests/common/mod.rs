// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Package declared only in the root config
pub const ROOT_PACKAGE: &str = "VS.Tools.Roslyn";

/// Package declared only in `Packages/components.config`
pub const COMPONENTS_PACKAGE: &str = "Microsoft.IdentityModel.Clients.ActiveDirectory";

/// Package declared only in `Packages/editor.config`
pub const EDITOR_PACKAGE: &str = "Microsoft.VisualStudio.Language.NavigateTo.Implementation";

/// Package declared in both the root and `Packages/components.config`
pub const SHARED_PACKAGE: &str = "Microsoft.VisualStudio.Shared.Common";

const FIXTURES: [&str; 3] = [
    "default.config",
    "Packages/components.config",
    "Packages/editor.config",
];

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Copy the config fixtures into a scratch directory.
///
/// Returns (TempDir, root config path) - keep the TempDir alive to prevent cleanup.
pub fn setup_config_tree() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();

    for fixture in FIXTURES {
        let target = temp_dir.path().join(fixture);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::copy(fixtures_dir().join(fixture), &target).unwrap();
    }

    let root = temp_dir.path().join("default.config");
    (temp_dir, root)
}

/// Original text of a fixture
pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// Current text of a file in the scratch tree
pub fn read(temp_dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(temp_dir.path().join(name)).unwrap()
}
