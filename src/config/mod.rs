//! Configuration module for mlbom-doc.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.mlbomdoc.yaml` file in your project root or `~/.config/mlbomdoc/`:
//!
//! ```yaml
//! output:
//!   format: markdown
//!   file: model-report.md
//! report:
//!   strict: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_PDF_FONT_SIZE, DEFAULT_PDF_MARGIN_MM, PDF_FONT_SIZE_RANGE, PDF_MARGIN_RANGE,
};
pub use types::{AppConfig, OutputConfig, PdfConfig, ReportSettings};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.mlbomdoc.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        let value: serde_json::Value = serde_json::from_str(&schema).expect("json");
        let properties = &value["properties"];
        assert!(properties.get("output").is_some());
        assert!(properties.get("report").is_some());
        assert!(properties.get("pdf").is_some());
    }
}
