//! Configuration types for mlbom-doc.

use super::defaults::{DEFAULT_PDF_FONT_SIZE, DEFAULT_PDF_MARGIN_MM};
use crate::reports::{BuilderOptions, PdfOptions, ReportConfig, ReportFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are merged over file settings (see [`AppConfig::merge`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Report content settings
    pub report: ReportSettings,
    /// PDF layout settings
    pub pdf: PdfConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the document builder, given the resolved color choice
    #[must_use]
    pub fn builder_options(&self, use_color: bool) -> BuilderOptions {
        BuilderOptions {
            use_color,
            title: self.report.title.clone(),
            pdf: self.pdf.to_options(),
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

// ============================================================================
// Report Settings
// ============================================================================

/// Report content settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportSettings {
    /// Title shown under the summary heading and in the document metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Reject datasets missing their type or classification instead of
    /// rendering a placeholder
    pub strict: bool,
}

impl ReportSettings {
    /// Report configuration for the given input file name
    #[must_use]
    pub fn report_config(&self, file_name: impl Into<String>) -> ReportConfig {
        let config = ReportConfig::new(file_name).strict(self.strict);
        match &self.title {
            Some(title) => config.with_title(title.clone()),
            None => config,
        }
    }
}

// ============================================================================
// PDF Configuration
// ============================================================================

/// PDF layout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PdfConfig {
    /// Directory containing the font files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_dir: Option<PathBuf>,
    /// Font family name, e.g. `LiberationSans`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Page margins in millimetres
    #[schemars(range(min = 0, max = 60))]
    pub margins: i32,
    /// Body font size in points
    #[schemars(range(min = 6, max = 24))]
    pub font_size: u8,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            font_family: None,
            margins: DEFAULT_PDF_MARGIN_MM,
            font_size: DEFAULT_PDF_FONT_SIZE,
        }
    }
}

impl PdfConfig {
    /// Convert to the PDF builder options
    #[must_use]
    pub fn to_options(&self) -> PdfOptions {
        PdfOptions {
            font_dir: self.font_dir.clone(),
            font_family: self.font_family.clone(),
            margin_mm: self.margins,
            font_size: self.font_size,
        }
    }
}
