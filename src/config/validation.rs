//! Configuration validation for mlbom-doc.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::{PDF_FONT_SIZE_RANGE, PDF_MARGIN_RANGE};
use super::types::{AppConfig, OutputConfig, PdfConfig, ReportSettings};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.report.validate());
        errors.extend(self.pdf.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let file = self.file.as_ref().filter(|p| !p.as_os_str().is_empty());
        match file {
            None if !self.format.supports_stdout() => {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: "Output filename must be specified".to_string(),
                });
            }
            Some(file_path) => {
                if let Some(parent) = file_path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(ConfigError {
                            field: "output.file".to_string(),
                            message: format!(
                                "Parent directory does not exist: {}",
                                parent.display()
                            ),
                        });
                    }
                }
            }
            None => {}
        }

        errors
    }
}

impl Validatable for ReportSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                errors.push(ConfigError {
                    field: "report.title".to_string(),
                    message: "Title must not be blank".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for PdfConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !PDF_MARGIN_RANGE.contains(&self.margins) {
            errors.push(ConfigError {
                field: "pdf.margins".to_string(),
                message: format!(
                    "Margins must be between {} and {} mm, got {}",
                    PDF_MARGIN_RANGE.start(),
                    PDF_MARGIN_RANGE.end(),
                    self.margins
                ),
            });
        }

        if !PDF_FONT_SIZE_RANGE.contains(&self.font_size) {
            errors.push(ConfigError {
                field: "pdf.font_size".to_string(),
                message: format!(
                    "Font size must be between {} and {} pt, got {}",
                    PDF_FONT_SIZE_RANGE.start(),
                    PDF_FONT_SIZE_RANGE.end(),
                    self.font_size
                ),
            });
        }

        if let Some(ref dir) = self.font_dir {
            if !dir.is_dir() {
                errors.push(ConfigError {
                    field: "pdf.font_dir".to_string(),
                    message: format!("Font directory does not exist: {}", dir.display()),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_non_console_format_requires_file() {
        for format in [ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Pdf] {
            let config = OutputConfig {
                format,
                ..OutputConfig::default()
            };
            let errors = config.validate();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "Output filename must be specified");
        }
    }

    #[test]
    fn test_empty_file_path_counts_as_missing() {
        let config = OutputConfig {
            format: ReportFormat::Json,
            file: Some(PathBuf::new()),
            no_color: false,
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_missing_parent_directory() {
        let config = OutputConfig {
            format: ReportFormat::Markdown,
            file: Some(PathBuf::from("/nonexistent/dir/report.md")),
            no_color: false,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Parent directory does not exist"));
    }

    #[test]
    fn test_pdf_ranges() {
        let invalid = PdfConfig {
            margins: 100,
            font_size: 2,
            ..PdfConfig::default()
        };
        let fields: Vec<_> = invalid.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["pdf.margins", "pdf.font_size"]);
    }

    #[test]
    fn test_blank_title_rejected() {
        let settings = ReportSettings {
            title: Some("  ".to_string()),
            strict: false,
        };
        assert!(!settings.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError {
            field: "pdf.margins".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(err.to_string(), "pdf.margins: out of range");
    }
}
