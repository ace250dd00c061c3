//! MLBOM parsing stage.

use super::PipelineError;
use crate::model::NormalizedMlbom;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A parsed MLBOM together with the path it was read from
#[derive(Debug)]
pub struct ParsedMlbom {
    /// The normalized MLBOM
    pub mlbom: NormalizedMlbom,
    /// Path of the source file, as given
    pub path: PathBuf,
}

impl ParsedMlbom {
    #[must_use]
    pub const fn new(mlbom: NormalizedMlbom, path: PathBuf) -> Self {
        Self { mlbom, path }
    }

    /// Get a reference to the MLBOM
    #[must_use]
    pub const fn mlbom(&self) -> &NormalizedMlbom {
        &self.mlbom
    }

    /// File name shown in the document summary
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path.display().to_string()
    }

    /// Consume and return the inner MLBOM
    #[must_use]
    pub fn into_mlbom(self) -> NormalizedMlbom {
        self.mlbom
    }
}

/// Parse an MLBOM with context for error messages
pub fn parse_mlbom_with_context(path: &Path, quiet: bool) -> Result<ParsedMlbom> {
    if !quiet {
        tracing::info!("Parsing MLBOM: {:?}", path);
    }

    let mlbom = crate::parsers::parse_mlbom(path).map_err(|e| PipelineError::ParseFailed {
        path: path.display().to_string(),
        source: e.into(),
    })?;

    if !quiet {
        tracing::info!(
            "Parsed {} packages ({} machine-learning models)",
            mlbom.package_count(),
            mlbom.ml_model_count()
        );
    }

    Ok(ParsedMlbom::new(mlbom, path.to_path_buf()))
}
