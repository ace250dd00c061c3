//! One-call document generation for library users.

use crate::error::{ErrorContext, Result};
use crate::parsers::parse_mlbom;
use crate::reports::{create_builder, BuilderOptions, ReportAssembler, ReportConfig, ReportFormat};
use std::path::Path;

use super::OutputTarget;

/// Parse the MLBOM at `input` and publish a `format` document to `target`.
///
/// The summary's file row shows `input` as given. With `strict` set, a
/// dataset missing its type or classification fails the whole run before
/// anything is written.
///
/// # Example
///
/// ```no_run
/// use mlbom_doc::pipeline::{generate_document, OutputTarget};
/// use mlbom_doc::reports::{BuilderOptions, ReportFormat};
/// use std::path::{Path, PathBuf};
///
/// generate_document(
///     Path::new("model.cdx.json"),
///     ReportFormat::Markdown,
///     &OutputTarget::File(PathBuf::from("model.md")),
///     &BuilderOptions::default(),
///     false,
/// )?;
/// # Ok::<(), mlbom_doc::MlbomDocError>(())
/// ```
pub fn generate_document(
    input: &Path,
    format: ReportFormat,
    target: &OutputTarget,
    options: &BuilderOptions,
    strict: bool,
) -> Result<()> {
    let mlbom = parse_mlbom(input).with_context(|| format!("reading {}", input.display()))?;

    let mut report = ReportConfig::new(input.display().to_string()).strict(strict);
    if let Some(title) = &options.title {
        report = report.with_title(title.clone());
    }

    let mut builder = create_builder(format, options);
    ReportAssembler::new(&report)
        .generate(&mlbom, builder.as_mut(), target)
        .with_context(|| format!("generating {format} document"))
}
