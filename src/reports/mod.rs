//! Document generation for MLBOMs.
//!
//! The [`ReportAssembler`] walks a [`NormalizedMlbom`](crate::model::NormalizedMlbom)
//! and issues drawing operations (headings, tables, rows, paragraphs) against a
//! [`DocumentBuilder`]. Each output format is one builder:
//! - Console: aligned text tables for the terminal
//! - JSON: structured blocks for programmatic use
//! - Markdown: human-readable documentation
//! - PDF: paginated document
//!
//! Every builder owns a [`TableCursor`], so a table is always opened, filled
//! and shown in that order.
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! MLBOM content (model names, descriptions, etc.) is escaped before being
//! embedded in Markdown.

mod assembler;
mod console;
pub mod escape;
mod json;
mod markdown;
mod pdf;
mod recording;
mod section;
mod table;
mod types;

pub use assembler::{ReportAssembler, NOT_KNOWN};
pub use console::ConsoleBuilder;
pub use json::JsonBuilder;
pub use markdown::MarkdownBuilder;
pub use pdf::{PdfBuilder, PdfOptions};
pub use recording::{DrawOp, RecordingBuilder};
pub use section::LazySection;
pub use table::{Table, TableCursor, TableRow};
pub use types::{ReportConfig, ReportFormat};

use crate::pipeline::OutputTarget;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),

    /// A table operation was issued out of order
    #[error("Table state error: {0}")]
    TableStateError(String),

    #[error("Missing required field '{field}' in {context}")]
    MissingRequiredField { field: String, context: String },

    #[error("PDF error: {0}")]
    PdfError(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Drawing operations every output format implements.
///
/// Table calls must nest as `create_table`, any number of `add_row`, then
/// `show_table`. A single-cell row in a multi-column table is a section label.
pub trait DocumentBuilder {
    /// Emit a section heading; level 1 is the outermost
    fn heading(&mut self, level: u8, text: &str) -> Result<(), ReportError>;

    /// Emit a free-text block
    fn paragraph(&mut self, text: &str) -> Result<(), ReportError>;

    /// Begin a new table; hints are advisory layout weights
    fn create_table(&mut self, headers: &[&str], width_hints: &[u16]) -> Result<(), ReportError>;

    /// Append a row to the open table
    fn add_row(&mut self, cells: &[&str]) -> Result<(), ReportError>;

    /// Close and flush the open table with the given relative column widths
    fn show_table(&mut self, widths: &[u16]) -> Result<(), ReportError>;

    /// Render the finished document
    fn render(&self) -> Result<Vec<u8>, ReportError>;

    /// Render the document and write it to the destination
    fn publish(&mut self, target: &OutputTarget) -> Result<(), ReportError> {
        let document = self.render()?;
        write_document(&document, target)
    }

    /// Get the format this builder produces
    fn format(&self) -> ReportFormat;
}

/// Write rendered bytes to a file or standard output.
pub fn write_document(document: &[u8], target: &OutputTarget) -> Result<(), ReportError> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document)?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            std::fs::write(path, document)?;
            tracing::debug!("Wrote {} bytes to {}", document.len(), path.display());
        }
    }
    Ok(())
}

/// Options shared by every builder
#[derive(Debug, Clone, Default)]
pub struct BuilderOptions {
    /// Use ANSI styling where the format supports it
    pub use_color: bool,
    /// Document title for formats that carry one
    pub title: Option<String>,
    /// PDF layout and font settings
    pub pdf: PdfOptions,
}

impl BuilderOptions {
    /// Title used when none is configured
    pub const DEFAULT_TITLE: &'static str = "MLBOM Summary";

    /// Configured title, or the default
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(Self::DEFAULT_TITLE)
    }
}

/// Create a document builder for the given format
#[must_use]
pub fn create_builder(format: ReportFormat, options: &BuilderOptions) -> Box<dyn DocumentBuilder> {
    match format {
        ReportFormat::Console => {
            let builder = ConsoleBuilder::new();
            if options.use_color {
                Box::new(builder)
            } else {
                Box::new(builder.no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonBuilder::new(options.title())),
        ReportFormat::Markdown => Box::new(MarkdownBuilder::new()),
        ReportFormat::Pdf => Box::new(PdfBuilder::new(options.title(), options.pdf.clone())),
    }
}
