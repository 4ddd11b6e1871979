// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: root package config
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .default_value(".corext/Configs/default.config")
        .help("Path to the root package config")
}

fn build_cli() -> Command {
    Command::new("insertions-config")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Insertions Contributors")
        .about("Update package versions in a root package config and the configs it references")
        .subcommand_required(false)
        .subcommand(
            Command::new("update")
                .about("Update package versions and save the changed configs")
                .arg(config_arg())
                .arg(
                    Arg::new("package")
                        .short('p')
                        .long("package")
                        .value_name("ID=VERSION")
                        .action(clap::ArgAction::Append)
                        .help("Package update (repeatable)"),
                )
                .arg(
                    Arg::new("manifest")
                        .short('m')
                        .long("manifest")
                        .help("TOML manifest listing package updates and ignored packages"),
                )
                .arg(
                    Arg::new("dry_run")
                        .long("dry-run")
                        .action(clap::ArgAction::SetTrue)
                        .help("Show what would change without writing any file"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show every declaration of a package")
                .arg(Arg::new("package").required(true).help("Package id (case-insensitive)"))
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List all package declarations, grouped by config file")
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("insertions-config.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
