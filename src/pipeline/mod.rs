//! Pipeline orchestration for MLBOM documents.
//!
//! This module provides the parse → assemble → publish workflow shared by
//! the CLI command handlers and library callers.

mod generate;
mod output;
mod parse;
mod report_stage;

pub use generate::generate_document;
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{parse_mlbom_with_context, ParsedMlbom};
pub use report_stage::output_report;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an MLBOM file
    #[error("Parse failed for {path}: {source}")]
    ParseFailed {
        path: String,
        source: anyhow::Error,
    },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Process exit codes
pub mod exit_codes {
    /// Document generated
    pub const SUCCESS: i32 = 0;
    /// Input could not be read, parsed or rendered
    pub const ERROR: i32 = 1;
    /// Invalid command-line usage
    pub const USAGE: i32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::USAGE, 2);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::ParseFailed {
            path: "model.cdx.json".to_string(),
            source: anyhow::anyhow!("bad json"),
        };
        assert_eq!(err.to_string(), "Parse failed for model.cdx.json: bad json");
    }
}
