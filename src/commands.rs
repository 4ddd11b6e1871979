// src/commands.rs
//! Command handlers for the insertions config CLI

use crate::cli::Cli;
use anyhow::{Result, anyhow};
use clap::CommandFactory;
use clap_complete::Shell;
use insertions_config::{DefaultConfigUpdater, UpdateManifest, UpdateOutcome, apply_manifest};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Load the config hierarchy rooted at `config`
fn load(config: &str) -> Result<DefaultConfigUpdater> {
    let mut updater = DefaultConfigUpdater::new();
    updater.try_load(config)?;
    Ok(updater)
}

/// Apply package updates and save the configs that changed
pub fn cmd_update(
    config: &str,
    packages: &[String],
    manifest: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let mut update_manifest = match manifest {
        Some(path) => UpdateManifest::from_file(Path::new(path))?,
        None => UpdateManifest::default(),
    };
    for spec in packages {
        update_manifest.add_update(spec)?;
    }
    if update_manifest.is_empty() {
        return Err(anyhow!(
            "No package updates requested; pass --package ID=VERSION or --manifest FILE"
        ));
    }

    info!("Updating packages in {}", config);
    let mut updater = load(config)?;
    let updates = apply_manifest(&mut updater, &update_manifest);

    for update in &updates {
        match &update.outcome {
            UpdateOutcome::Updated(previous) => {
                println!("  {}: {} -> {}", update.id, previous.join(", "), update.version);
            }
            UpdateOutcome::NotFound => {
                warn!("Package {} is not declared in any loaded config", update.id);
                println!("  {}: not found", update.id);
            }
            UpdateOutcome::Ignored => println!("  {}: ignored", update.id),
        }
    }

    if dry_run {
        let dirty = updater.dirty_paths();
        println!("Dry run: {} config files would be saved", dirty.len());
        for path in dirty {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    let results = updater.save();
    if results.is_empty() {
        println!("No config files changed");
        return Ok(());
    }

    for result in &results {
        println!("{}", result);
    }

    let failed = results.iter().filter(|r| !r.succeeded()).count();
    if failed > 0 {
        return Err(anyhow!(
            "{} of {} config files failed to save",
            failed,
            results.len()
        ));
    }

    println!("Saved {} config files", results.len());
    Ok(())
}

/// Show every declaration of a package
pub fn cmd_show(package: &str, config: &str) -> Result<()> {
    let updater = load(config)?;
    let entries = updater.package_entries(package);

    if entries.is_empty() {
        return Err(anyhow!("Package {} not found in {}", package, config));
    }

    for (doc, entry) in entries {
        println!("{} {} ({})", entry.id(), entry.version(), doc.path().display());
    }
    Ok(())
}

/// List all package declarations, grouped by config file
pub fn cmd_list(config: &str) -> Result<()> {
    let updater = load(config)?;

    for doc in updater.documents() {
        println!("{} ({} packages)", doc.path().display(), doc.entries().len());
        for entry in doc.entries() {
            println!("  {} {}", entry.id(), entry.version());
        }
    }
    Ok(())
}

/// Write a shell completion script to `out`
pub fn cmd_completions<W: Write>(shell: Shell, out: &mut W) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "insertions-config", out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path) -> String {
        let root = dir.join("default.config");
        std::fs::write(
            &root,
            r#"<corext><package id="PackageA" version="1.0" /></corext>"#,
        )
        .unwrap();
        root.to_str().unwrap().to_string()
    }

    #[test]
    fn test_update_requires_packages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path());
        assert!(cmd_update(&config, &[], None, false).is_err());
    }

    #[test]
    fn test_update_writes_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path());

        cmd_update(&config, &["PackageA=2.0".to_string()], None, false).unwrap();
        let content = std::fs::read_to_string(&config).unwrap();
        assert_eq!(content, r#"<corext><package id="PackageA" version="2.0" /></corext>"#);
    }

    #[test]
    fn test_dry_run_leaves_config_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path());

        cmd_update(&config, &["PackageA=2.0".to_string()], None, true).unwrap();
        let content = std::fs::read_to_string(&config).unwrap();
        assert!(content.contains(r#"version="1.0""#));
    }

    #[test]
    fn test_completions_contain_only_the_script() {
        let mut out = Vec::new();
        cmd_completions(Shell::Bash, &mut out).unwrap();

        let script = String::from_utf8(out).unwrap();
        let first_line = script.lines().next().unwrap();
        assert!(first_line.starts_with("_insertions"), "unexpected first line: {}", first_line);
        assert!(first_line.ends_with("() {"), "unexpected first line: {}", first_line);
        assert!(!script.contains("INFO"));
    }

    #[test]
    fn test_show_unknown_package() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path());
        assert!(cmd_show("PackageA", &config).is_ok());
        assert!(cmd_show("Missing", &config).is_err());
    }
}
