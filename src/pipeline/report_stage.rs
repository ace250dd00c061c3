//! Document output stage.

use super::{should_use_color, OutputTarget, ParsedMlbom, PipelineError};
use crate::config::AppConfig;
use crate::reports::{create_builder, ReportAssembler};
use anyhow::Result;

/// Assemble the document for a parsed MLBOM and publish it to the
/// configured destination.
pub fn output_report(config: &AppConfig, parsed: &ParsedMlbom, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color) && target.is_terminal();

    let report_config = config.report.report_config(parsed.file_name());
    let mut builder = create_builder(config.output.format, &config.builder_options(use_color));

    tracing::debug!(
        "Generating {} document for {}",
        config.output.format,
        parsed.path.display()
    );
    ReportAssembler::new(&report_config)
        .generate(parsed.mlbom(), builder.as_mut(), &target)
        .map_err(|e| PipelineError::ReportFailed { source: e.into() })?;

    if !quiet {
        if let OutputTarget::File(path) = &target {
            tracing::info!("Document written to {:?}", path);
        }
    }
    Ok(())
}
