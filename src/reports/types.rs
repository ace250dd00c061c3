//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for the generated document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain text tables for the terminal
    #[default]
    Console,
    /// Structured JSON document
    Json,
    /// Markdown document
    Markdown,
    /// Paginated PDF document
    Pdf,
}

impl ReportFormat {
    /// Whether this format can be written to standard output
    #[must_use]
    pub const fn supports_stdout(&self) -> bool {
        matches!(self, Self::Console)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Console => write!(f, "console"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

/// Configuration for one report assembly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Name of the MLBOM file, shown in the summary table
    pub file_name: String,
    /// Title paragraph shown under the summary heading
    pub title: Option<String>,
    /// Reject datasets missing a required field instead of rendering a placeholder
    pub strict: bool,
}

impl ReportConfig {
    /// Create a config for the given input file name
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Set the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable strict required-field checking
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_matches_value_names() {
        for format in ReportFormat::value_variants() {
            let value = format.to_possible_value().expect("no skipped variants");
            assert_eq!(value.get_name(), format.to_string());
        }
    }

    #[test]
    fn test_only_console_supports_stdout() {
        assert!(ReportFormat::Console.supports_stdout());
        assert!(!ReportFormat::Json.supports_stdout());
        assert!(!ReportFormat::Pdf.supports_stdout());
    }
}
