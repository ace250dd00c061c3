//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".mlbomdoc.yaml",
    ".mlbomdoc.yml",
    "mlbomdoc.yaml",
    "mlbomdoc.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/mlbomdoc/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let candidates = [
        std::env::current_dir().ok(),
        find_git_root(),
        dirs::config_dir().map(|dir| dir.join("mlbomdoc")),
        dirs::home_dir(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(&dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override; this layers CLI
    /// args over file config.
    pub fn merge(&mut self, other: &Self) {
        // Output config
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        // Report settings
        if other.report.title.is_some() {
            self.report.title.clone_from(&other.report.title);
        }
        if other.report.strict {
            self.report.strict = true;
        }

        // PDF config
        let default_pdf = super::types::PdfConfig::default();
        if other.pdf.font_dir.is_some() {
            self.pdf.font_dir.clone_from(&other.pdf.font_dir);
        }
        if other.pdf.font_family.is_some() {
            self.pdf.font_family.clone_from(&other.pdf.font_family);
        }
        if other.pdf.margins != default_pdf.margins {
            self.pdf.margins = other.pdf.margins;
        }
        if other.pdf.font_size != default_pdf.font_size {
            self.pdf.font_size = other.pdf.font_size;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# mlbom-doc Configuration
# Place this file at .mlbomdoc.yaml in your project root or ~/.config/mlbomdoc/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# mlbom-doc Configuration File
# =============================
#
# This file configures mlbomdoc behavior. Place it at:
#   - .mlbomdoc.yaml in your project root
#   - ~/.config/mlbomdoc/mlbomdoc.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Format: console, json, markdown, pdf
  format: console
  # Output file path (required for json, markdown and pdf)
  # file: model-report.md
  # Disable colored console output
  no_color: false

# Report content
report:
  # Summary heading and document title (default: MLBOM Summary)
  # title: Model Inventory
  # Fail on datasets missing their type or classification
  strict: false

# PDF layout
pdf:
  # Directory with TrueType fonts named <family>-Regular.ttf, -Bold.ttf, ...
  # font_dir: /usr/share/fonts/truetype/liberation
  # font_family: LiberationSans
  # Page margins in millimetres (0-60)
  margins: 20
  # Body font size in points (6-24)
  font_size: 10
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
