// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Update {
            config,
            packages,
            manifest,
            dry_run,
        }) => commands::cmd_update(&config, &packages, manifest.as_deref(), dry_run),
        Some(Commands::Show { package, config }) => commands::cmd_show(&package, &config),
        Some(Commands::List { config }) => commands::cmd_list(&config),
        Some(Commands::Completions { shell }) => {
            commands::cmd_completions(shell, &mut std::io::stdout())
        }
        None => {
            // No command provided, show help
            println!("insertions-config v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'insertions-config --help' for usage information");
            Ok(())
        }
    }
}
