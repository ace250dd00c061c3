//! Report assembly: one pass over the MLBOM, emitting drawing operations.
//!
//! Sections appear in a fixed order. The summary and the per-model details
//! tables are always emitted; every model card section is only emitted when
//! at least one of its fields is present (see [`LazySection`]).

use super::section::{heading_section, table_section};
use super::{DocumentBuilder, LazySection, ReportConfig, ReportError};
use crate::model::{Dataset, DocumentMetadata, Graphics, ModelCard, NormalizedMlbom, Package};
use crate::pipeline::OutputTarget;

/// Placeholder rendered for values that are absent but always printed
pub const NOT_KNOWN: &str = "NOT KNOWN";

const SUMMARY_HEADING: &str = "MLBOM Summary";

const TWO_COLUMN_HINTS: [u16; 2] = [20, 35];
const TWO_COLUMN_WIDTHS: [u16; 2] = [5, 9];

const PARAMETER_HEADERS: [&str; 2] = ["Parameter", "Value"];

const GOVERNANCE_HEADERS: [&str; 3] = ["Category", "Organization", "Contact"];
const GOVERNANCE_HINTS: [u16; 3] = [10, 15, 30];
const GOVERNANCE_WIDTHS: [u16; 3] = [4, 5, 5];

const PERFORMANCE_HEADERS: [&str; 5] = ["Type", "Value", "Slice", "Lower Bound", "Upper Bound"];
const PERFORMANCE_HINTS: [u16; 5] = [10, 10, 10, 15, 15];
const PERFORMANCE_WIDTHS: [u16; 5] = [3, 3, 2, 3, 3];

const CONSIDERATION_HEADERS: [&str; 2] = ["Category", "Value"];

/// Walks a normalized MLBOM and drives a [`DocumentBuilder`].
///
/// Holds no state between runs; one assembler may drive any number of
/// builders, one after another.
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler<'a> {
    config: &'a ReportConfig,
}

impl<'a> ReportAssembler<'a> {
    #[must_use]
    pub const fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Assemble the report and publish it to `target` exactly once.
    pub fn generate(
        &self,
        mlbom: &NormalizedMlbom,
        builder: &mut dyn DocumentBuilder,
        target: &OutputTarget,
    ) -> Result<(), ReportError> {
        self.assemble(mlbom, builder)?;
        builder.publish(target)
    }

    /// Issue every drawing operation for the report, without publishing.
    ///
    /// In strict mode, missing required dataset fields are reported before
    /// the first builder call, so a rejected input never yields a partial
    /// document.
    pub fn assemble(
        &self,
        mlbom: &NormalizedMlbom,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), ReportError> {
        if self.config.strict {
            check_required_fields(mlbom)?;
        }

        self.summary(&mlbom.document, builder)?;

        if mlbom.package_count() > 0 {
            builder.paragraph("")?;
            for package in mlbom.ml_models() {
                self.model(package, &mlbom.document, builder)?;
            }
        }
        Ok(())
    }

    fn summary(
        &self,
        document: &DocumentMetadata,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), ReportError> {
        builder.heading(1, SUMMARY_HEADING)?;
        if let Some(title) = &self.config.title {
            builder.paragraph(title)?;
        }
        builder.create_table(&["Item", "Details"], &TWO_COLUMN_HINTS)?;
        builder.add_row(&["MLBOM File", &self.config.file_name])?;
        builder.add_row(&["MLBOM Type", &document.document_type()])?;
        builder.add_row(&["Version", or_not_known(document.spec_version.as_deref())])?;
        builder.add_row(&["Name", or_not_known(document.name.as_deref())])?;
        for creator in &document.creators {
            builder.add_row(&["Creator", &creator.to_string()])?;
        }
        builder.add_row(&["Created", or_not_known(document.created.as_deref())])?;
        builder.show_table(&TWO_COLUMN_WIDTHS)
    }

    fn model(
        &self,
        package: &Package,
        document: &DocumentMetadata,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), ReportError> {
        tracing::debug!("Rendering model {}", package.name);

        builder.heading(1, &format!("Model Details - {}", package.name))?;
        builder.create_table(&["Item", "Value"], &TWO_COLUMN_HINTS)?;
        builder.add_row(&["Version", or_not_known(document.spec_version.as_deref())])?;
        builder.add_row(&["Supplier", or_not_known(package.supplier.as_deref())])?;
        builder.add_row(&["License", or_not_known(package.license_concluded.as_deref())])?;
        builder.show_table(&TWO_COLUMN_WIDTHS)?;

        let Some(card) = &package.model_card else {
            return Ok(());
        };

        model_parameters(card, builder)?;
        for (index, dataset) in card.datasets.iter().flatten().enumerate() {
            self.dataset(dataset, &package.name, index, builder)?;
        }
        quantitative_analysis(card, builder)?;
        considerations(card, builder)?;
        properties(card, builder)
    }

    fn dataset(
        &self,
        dataset: &Dataset,
        model_name: &str,
        index: usize,
        builder: &mut dyn DocumentBuilder,
    ) -> Result<(), ReportError> {
        let context = || dataset_context(model_name, index);

        builder.heading(1, "Model Dataset")?;
        builder.create_table(&PARAMETER_HEADERS, &TWO_COLUMN_HINTS)?;
        builder.add_row(&["Type", required(dataset.dataset_type.as_deref(), "type", context)])?;
        optional_row(builder, "Name", dataset.name.as_deref())?;
        optional_row(builder, "Id", dataset.id.as_deref())?;
        optional_row(builder, "Contents", dataset.content.as_deref())?;
        optional_row(builder, "Contents URL", dataset.content_url.as_deref())?;
        if let Some(properties) = &dataset.properties {
            builder.add_row(&["Properties"])?;
            for property in properties {
                builder.add_row(&[&property.name, &property.value])?;
            }
        }
        builder.add_row(&[
            "Classification",
            required(dataset.classification.as_deref(), "classification", context),
        ])?;
        optional_row(builder, "Sensitive Data", dataset.sensitive_data.as_deref())?;
        optional_row(builder, "Description", dataset.description.as_deref())?;
        builder.show_table(&TWO_COLUMN_WIDTHS)?;

        if let Some(graphics) = &dataset.graphics {
            graphics_table(graphics, builder)?;
        }

        let mut governance = table_section(
            1,
            "Dataset Governance",
            &GOVERNANCE_HEADERS,
            &GOVERNANCE_HINTS,
        );
        for (role, contact) in dataset.governance() {
            let role = role.to_string();
            governance.row(builder, &[&role, &contact.organization, &contact.contact])?;
        }
        if governance.show_if_open(builder, &GOVERNANCE_WIDTHS)? {
            tracing::debug!("Dataset governance shown for {}", context());
        }
        Ok(())
    }
}

// ============================================================================
// Model card sections
// ============================================================================

fn model_parameters(card: &ModelCard, builder: &mut dyn DocumentBuilder) -> Result<(), ReportError> {
    let mut section = table_section(1, "Model Parameters", &PARAMETER_HEADERS, &TWO_COLUMN_HINTS);

    let scalars = [
        ("Approach", &card.learning_approach),
        ("Task", &card.task),
        ("Architecture Family", &card.architecture_family),
        ("Model Architecture", &card.model_architecture),
    ];
    for (label, value) in scalars {
        if let Some(value) = value {
            section.row(builder, &[label, value])?;
        }
    }
    list_rows(&mut section, builder, "Input", card.inputs.as_deref())?;
    list_rows(&mut section, builder, "Output", card.outputs.as_deref())?;

    if section.show_if_open(builder, &TWO_COLUMN_WIDTHS)? {
        tracing::debug!("Model parameters section shown");
    }
    Ok(())
}

fn quantitative_analysis(
    card: &ModelCard,
    builder: &mut dyn DocumentBuilder,
) -> Result<(), ReportError> {
    let mut section = heading_section(1, "Quantitative Analysis");

    if let Some(metrics) = &card.performance {
        section.ensure_open(builder)?;
        builder.heading(2, "Performance Metrics")?;
        builder.create_table(&PERFORMANCE_HEADERS, &PERFORMANCE_HINTS)?;
        for metric in metrics {
            builder.add_row(&metric.cells())?;
        }
        builder.show_table(&PERFORMANCE_WIDTHS)?;
    }
    if let Some(graphics) = &card.graphics {
        section.ensure_open(builder)?;
        graphics_table(graphics, builder)?;
    }

    if section.is_open() {
        tracing::debug!("Quantitative analysis section shown");
    }
    Ok(())
}

fn considerations(card: &ModelCard, builder: &mut dyn DocumentBuilder) -> Result<(), ReportError> {
    let mut section = table_section(
        1,
        "Considerations",
        &CONSIDERATION_HEADERS,
        &TWO_COLUMN_HINTS,
    );

    list_rows(&mut section, builder, "Users", card.users.as_deref())?;
    list_rows(&mut section, builder, "Use Cases", card.use_cases.as_deref())?;
    list_rows(&mut section, builder, "Technical Limitations", card.limitations.as_deref())?;
    list_rows(&mut section, builder, "Performance TradeOffs", card.tradeoffs.as_deref())?;

    if let Some(risks) = &card.ethical_considerations {
        section.ensure_open(builder)?;
        for risk in risks {
            section.row(builder, &["Ethical Considerations", &risk.name])?;
            section.row(
                builder,
                &["Ethical Considerations - Mitigation Strategy", &risk.mitigation],
            )?;
        }
    }

    if let Some(assessments) = &card.fairness_assessments {
        section.ensure_open(builder)?;
        for assessment in assessments {
            section.row(
                builder,
                &["Fairness Assessment - Group at Risk", &assessment.group_at_risk],
            )?;
            section.row(builder, &["Fairness Assessment - Benefits", &assessment.benefits])?;
            section.row(builder, &["Fairness Assessment - Harms", &assessment.harms])?;
            section.row(
                builder,
                &["Fairness Assessment - Mitigation Strategy", &assessment.mitigation],
            )?;
        }
    }

    if section.show_if_open(builder, &TWO_COLUMN_WIDTHS)? {
        tracing::debug!("Considerations section shown");
    }
    Ok(())
}

fn properties(card: &ModelCard, builder: &mut dyn DocumentBuilder) -> Result<(), ReportError> {
    let Some(properties) = &card.properties else {
        return Ok(());
    };
    builder.heading(1, "Properties")?;
    builder.create_table(&["Name", "Value"], &TWO_COLUMN_HINTS)?;
    for property in properties {
        builder.add_row(&[&property.name, &property.value])?;
    }
    builder.show_table(&TWO_COLUMN_WIDTHS)
}

/// Heading plus a name/content table for a graphics collection.
fn graphics_table(graphics: &Graphics, builder: &mut dyn DocumentBuilder) -> Result<(), ReportError> {
    let heading = match &graphics.description {
        Some(description) => format!("Graphics - {description}"),
        None => "Graphics".to_string(),
    };
    builder.heading(2, &heading)?;
    builder.create_table(&["Name", "Content"], &TWO_COLUMN_HINTS)?;
    for image in &graphics.collection {
        builder.add_row(&[&image.name, &image.content])?;
    }
    builder.show_table(&TWO_COLUMN_WIDTHS)
}

// ============================================================================
// Helpers
// ============================================================================

/// A present list opens the section even when it is empty.
fn list_rows<F>(
    section: &mut LazySection<F>,
    builder: &mut dyn DocumentBuilder,
    label: &str,
    values: Option<&[String]>,
) -> Result<(), ReportError>
where
    F: FnMut(&mut dyn DocumentBuilder) -> Result<(), ReportError>,
{
    let Some(values) = values else {
        return Ok(());
    };
    section.ensure_open(builder)?;
    for value in values {
        section.row(builder, &[label, value])?;
    }
    Ok(())
}

fn optional_row(
    builder: &mut dyn DocumentBuilder,
    label: &str,
    value: Option<&str>,
) -> Result<(), ReportError> {
    match value {
        Some(value) => builder.add_row(&[label, value]),
        None => Ok(()),
    }
}

fn or_not_known(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_KNOWN)
}

/// Value of a required dataset field, or the placeholder with a warning.
fn required<'v>(value: Option<&'v str>, field: &str, context: impl FnOnce() -> String) -> &'v str {
    value.unwrap_or_else(|| {
        tracing::warn!("Missing required field '{}' in {}", field, context());
        NOT_KNOWN
    })
}

fn dataset_context(model_name: &str, index: usize) -> String {
    format!("dataset {} of model '{model_name}'", index + 1)
}

/// Reject the first ML model dataset lacking its type or classification.
fn check_required_fields(mlbom: &NormalizedMlbom) -> Result<(), ReportError> {
    for package in mlbom.ml_models() {
        let datasets = package
            .model_card
            .as_ref()
            .and_then(|card| card.datasets.as_ref());
        for (index, dataset) in datasets.into_iter().flatten().enumerate() {
            let missing = if dataset.dataset_type.is_none() {
                Some("type")
            } else if dataset.classification.is_none() {
                Some("classification")
            } else {
                None
            };
            if let Some(field) = missing {
                return Err(ReportError::MissingRequiredField {
                    field: field.to_string(),
                    context: dataset_context(&package.name, index),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PackageType, PerformanceMetric};
    use crate::reports::{DrawOp, RecordingBuilder};

    fn model_with_card(card: ModelCard) -> NormalizedMlbom {
        let mut mlbom = NormalizedMlbom::default();
        mlbom.add_package(
            Package::new("resnet", PackageType::MachineLearningModel).with_model_card(card),
        );
        mlbom
    }

    fn run(mlbom: &NormalizedMlbom, config: &ReportConfig) -> RecordingBuilder {
        let mut builder = RecordingBuilder::new();
        ReportAssembler::new(config)
            .assemble(mlbom, &mut builder)
            .expect("assemble");
        builder
    }

    #[test]
    fn test_empty_model_card_only_summary_and_details() {
        let builder = run(&model_with_card(ModelCard::default()), &ReportConfig::new("m.json"));
        assert_eq!(builder.headings(), vec!["MLBOM Summary", "Model Details - resnet"]);
    }

    #[test]
    fn test_details_fall_back_to_placeholders() {
        let builder = run(&model_with_card(ModelCard::default()), &ReportConfig::new("m.json"));
        let details = &builder.tables()[1];
        assert_eq!(
            details.rows[2],
            crate::reports::TableRow::Cells(vec!["License".into(), NOT_KNOWN.into()])
        );
    }

    #[test]
    fn test_quantitative_heading_precedes_performance() {
        let card = ModelCard {
            performance: Some(vec![PerformanceMetric {
                metric_type: "accuracy".into(),
                value: "0.9".into(),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let builder = run(&model_with_card(card), &ReportConfig::new("m.json"));
        assert_eq!(
            &builder.headings()[2..],
            &["Quantitative Analysis", "Performance Metrics"]
        );
    }

    #[test]
    fn test_strict_mode_fails_before_any_builder_call() {
        let card = ModelCard {
            datasets: Some(vec![Dataset {
                dataset_type: Some("dataset".into()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let mlbom = model_with_card(card);
        let config = ReportConfig::new("m.json").strict(true);
        let mut builder = RecordingBuilder::new();

        let err = ReportAssembler::new(&config)
            .assemble(&mlbom, &mut builder)
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingRequiredField { ref field, .. } if field == "classification"
        ));
        assert!(builder.ops().is_empty());
    }

    #[test]
    fn test_lenient_mode_renders_placeholder() {
        let card = ModelCard {
            datasets: Some(vec![Dataset::default()]),
            ..Default::default()
        };
        let builder = run(&model_with_card(card), &ReportConfig::new("m.json"));
        let rows: Vec<_> = builder
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::AddRow { cells } if cells[1] == NOT_KNOWN => Some(cells[0].as_str()),
                _ => None,
            })
            .collect();
        assert!(rows.contains(&"Type"));
        assert!(rows.contains(&"Classification"));
    }

    #[test]
    fn test_details_version_is_document_version() {
        let mut mlbom = NormalizedMlbom::new(DocumentMetadata {
            spec_version: Some("1.6".into()),
            ..Default::default()
        });
        mlbom.add_package(
            Package::new("resnet", PackageType::MachineLearningModel).with_version("2.1.0"),
        );
        let builder = run(&mlbom, &ReportConfig::new("m.json"));

        let version = crate::reports::TableRow::Cells(vec!["Version".into(), "1.6".into()]);
        assert_eq!(builder.tables()[0].rows[2], version);
        assert_eq!(builder.tables()[1].rows[0], version);
    }

    #[test]
    fn test_title_is_paragraph_under_fixed_heading() {
        let mlbom = model_with_card(ModelCard::default());
        let builder = run(&mlbom, &ReportConfig::new("m.json").with_title("Inventory"));
        assert_eq!(builder.headings()[0], SUMMARY_HEADING);
        assert_eq!(
            builder.ops()[1],
            DrawOp::Paragraph {
                text: "Inventory".into()
            }
        );
    }

    #[test]
    fn test_graphics_table_uses_two_column_hints() {
        let card = ModelCard {
            graphics: Some(Graphics::default()),
            ..Default::default()
        };
        let builder = run(&model_with_card(card), &ReportConfig::new("m.json"));
        let graphics = builder.tables().last().expect("graphics table");
        assert_eq!(graphics.headers, ["Name", "Content"]);
        assert_eq!(graphics.width_hints, TWO_COLUMN_HINTS);
    }

    #[test]
    fn test_generate_publishes_once() {
        let mlbom = model_with_card(ModelCard::default());
        let config = ReportConfig::new("m.json");
        let mut builder = RecordingBuilder::new();
        ReportAssembler::new(&config)
            .generate(&mlbom, &mut builder, &OutputTarget::Stdout)
            .expect("generate");
        assert_eq!(builder.published(), &[None]);
    }
}
