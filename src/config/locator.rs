// src/config/locator.rs

//! Discovery of the secondary package configs referenced by a root config

use super::document::ConfigDocument;
use std::path::{Path, PathBuf};

/// Paths of the secondary configs declared by `root`, in declaration order.
///
/// Relative paths are resolved against the root file's directory; absolute
/// paths are returned unchanged. No file system access happens here.
pub fn find_secondary_paths(root: &ConfigDocument) -> Vec<PathBuf> {
    let base = root.path().parent().unwrap_or_else(|| Path::new(""));

    root.secondary_refs()
        .iter()
        .map(|declared| base.join(declared))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_config_str;

    #[test]
    fn test_no_references() {
        let root = parse_config_str(
            Path::new("/configs/default.config"),
            r#"<corext><package id="A" version="1" /></corext>"#,
        )
        .unwrap();
        assert!(find_secondary_paths(&root).is_empty());
    }

    #[test]
    fn test_references_resolve_against_root_directory() {
        let root = parse_config_str(
            Path::new("/configs/default.config"),
            r#"<corext>
  <packageconfig path="Packages/b.config" />
  <packageconfig path="a.config" />
  <packageconfig path="/abs/c.config" />
</corext>"#,
        )
        .unwrap();
        assert_eq!(
            find_secondary_paths(&root),
            vec![
                PathBuf::from("/configs/Packages/b.config"),
                PathBuf::from("/configs/a.config"),
                PathBuf::from("/abs/c.config"),
            ]
        );
    }

    #[test]
    fn test_root_without_directory() {
        let root = parse_config_str(
            Path::new("default.config"),
            r#"<corext><packageconfig path="sub.config" /></corext>"#,
        )
        .unwrap();
        assert_eq!(find_secondary_paths(&root), vec![PathBuf::from("sub.config")]);
    }
}
