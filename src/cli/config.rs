//! Config command handlers: show, path and init.

use crate::config::{discover_config_file, generate_full_example_config, load_or_default};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File name written by `config init`
pub const CONFIG_FILE_NAME: &str = ".mlbomdoc.yaml";

const RECOGNIZED_NAMES: [&str; 4] = [
    ".mlbomdoc.yaml",
    ".mlbomdoc.yml",
    "mlbomdoc.yaml",
    "mlbomdoc.yml",
];

/// Effective configuration (defaults merged with any discovered file) as YAML
pub fn show_config(explicit_path: Option<&Path>) -> Result<String> {
    let (config, loaded_from) = load_or_default(explicit_path);
    match &loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    serde_yaml::to_string(&config).context("failed to serialize config")
}

/// Print the config file search paths and the active file to stderr
pub fn print_config_paths(explicit_path: Option<&Path>) {
    let search_paths: [Option<String>; 3] = [
        std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        dirs::config_dir().map(|p| p.join("mlbomdoc").display().to_string()),
        dirs::home_dir().map(|p| p.display().to_string()),
    ];
    eprintln!("Config file search paths (in order):");
    for path in search_paths.into_iter().flatten() {
        eprintln!("  {path}");
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in RECOGNIZED_NAMES {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(explicit_path) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
}

/// Write a commented example config into `dir`, refusing to overwrite
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(CONFIG_FILE_NAME);
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(&target, generate_full_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}
