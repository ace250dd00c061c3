//! Generate command handler.
//!
//! Implements the default action: read one MLBOM and publish a document.

use crate::config::{AppConfig, Validatable};
use crate::pipeline::{exit_codes, output_report, parse_mlbom_with_context};
use crate::reports::ReportFormat;
use anyhow::Result;
use std::path::PathBuf;

/// Settings for one document generation, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// MLBOM file to read
    pub input: Option<PathBuf>,
    /// Output format; overrides the config file when given
    pub format: Option<ReportFormat>,
    /// Output file (stdout if not specified)
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub strict: bool,
    pub title: Option<String>,
    /// Explicit configuration file
    pub config_file: Option<PathBuf>,
    pub quiet: bool,
}

impl GenerateConfig {
    /// Command-line values as a config layer
    fn overrides(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.output.file.clone_from(&self.output_file);
        config.output.no_color = self.no_color;
        config.report.strict = self.strict;
        config.report.title.clone_from(&self.title);
        config
    }

    /// Resolve the effective configuration: defaults, then file, then CLI
    #[must_use]
    pub fn resolve(&self) -> AppConfig {
        let (mut config, loaded_from) =
            AppConfig::from_file_with_overrides(self.config_file.as_deref(), &self.overrides());
        if let Some(path) = loaded_from {
            tracing::debug!("Loaded configuration from {}", path.display());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config
    }
}

/// Run the generate command, returning the process exit code
#[allow(clippy::needless_pass_by_value)]
pub fn run_generate(args: GenerateConfig) -> Result<i32> {
    let Some(input) = args.input.clone().filter(|p| !p.as_os_str().is_empty()) else {
        eprintln!("MLBOM name must be specified");
        return Ok(exit_codes::USAGE);
    };

    let config = args.resolve();
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            tracing::debug!("Invalid configuration: {}", error);
            eprintln!("{}", error.message);
        }
        return Ok(exit_codes::USAGE);
    }

    if !input.is_file() {
        eprintln!("{} not found", input.display());
        return Ok(exit_codes::ERROR);
    }

    tracing::debug!("Input file {}", input.display());
    match &config.output.file {
        Some(path) => tracing::debug!("Output file {}", path.display()),
        None => tracing::debug!("Output to stdout"),
    }

    let parsed = parse_mlbom_with_context(&input, args.quiet)?;
    output_report(&config, &parsed, args.quiet)?;

    Ok(exit_codes::SUCCESS)
}
