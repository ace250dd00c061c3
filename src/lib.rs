//! **Human-readable documentation for Machine-Learning Bills of Materials (MLBOMs).**
//!
//! `mlbom-doc` reads a `CycloneDX` or SPDX MLBOM, normalizes its machine-learning model
//! components and their model cards, and renders them as a structured document:
//! aligned console tables, JSON, Markdown or PDF.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The read-only [`NormalizedMlbom`] view. Every optional model-card
//!   field is an explicit `Option`, so an absent field is never confused with an
//!   empty one.
//! - **[`parsers`]**: Format detection, the `CycloneDX` (JSON and XML) parser and the SPDX
//!   (JSON and tag-value) parser.
//! - **[`reports`]**: The [`ReportAssembler`], which walks the MLBOM once and issues
//!   headings, tables and rows against a [`DocumentBuilder`], plus one builder per
//!   output format. Sections without content are never emitted.
//! - **[`pipeline`]**: Parse → assemble → publish orchestration.
//! - **[`config`]**: YAML configuration files, validation and schema.
//!
//! ## Getting Started
//!
//! ```no_run
//! use mlbom_doc::pipeline::OutputTarget;
//! use mlbom_doc::reports::{create_builder, BuilderOptions};
//! use mlbom_doc::{parse_mlbom, ReportAssembler, ReportConfig, ReportFormat};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mlbom = parse_mlbom(Path::new("model.cdx.json"))?;
//!
//!     let config = ReportConfig::new("model.cdx.json");
//!     let mut builder = create_builder(ReportFormat::Console, &BuilderOptions::default());
//!     ReportAssembler::new(&config).generate(&mlbom, builder.as_mut(), &OutputTarget::Stdout)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! This documentation is for the `mlbom-doc` library crate. The command-line
//! tool is `mlbomdoc`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // Table widths are small user-supplied numbers
    clippy::cast_possible_truncation
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, MlbomDocError, Result};
pub use model::{DocumentMetadata, ModelCard, NormalizedMlbom, Package};
pub use parsers::{parse_mlbom, parse_mlbom_str, MlbomParser, ParseError};
pub use reports::{
    DocumentBuilder, ReportAssembler, ReportConfig, ReportError, ReportFormat, NOT_KNOWN,
};
