// src/cli.rs
//! CLI definitions for the insertions config updater
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Default root config, relative to the repository being updated
pub const DEFAULT_CONFIG_PATH: &str = ".corext/Configs/default.config";

#[derive(Parser)]
#[command(name = "insertions-config")]
#[command(author = "Insertions Contributors")]
#[command(version)]
#[command(about = "Update package versions in a root package config and the configs it references", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update package versions and save the changed configs
    Update {
        /// Path to the root package config
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,

        /// Package update as ID=VERSION (repeatable)
        #[arg(short, long = "package", value_name = "ID=VERSION")]
        packages: Vec<String>,

        /// TOML manifest listing package updates and ignored packages
        #[arg(short, long)]
        manifest: Option<String>,

        /// Show what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Show every declaration of a package
    Show {
        /// Package id (case-insensitive)
        package: String,

        /// Path to the root package config
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },

    /// List all package declarations, grouped by config file
    List {
        /// Path to the root package config
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}
