//! CycloneDX MLBOM parser.
//!
//! Supports CycloneDX 1.4, 1.5 and 1.6 in JSON and XML. Model cards were
//! introduced in 1.5; older documents parse but never carry one.

use super::detection::quoted_value_after;
use crate::model::{
    Creator, CreatorRole, Dataset, DocumentMetadata, EthicalConsideration, FairnessAssessment,
    GovernanceContact, GraphicImage, Graphics, MlbomFormat, ModelCard, NormalizedMlbom, Package,
    PackageType, PerformanceMetric, Property,
};
use crate::parsers::traits::{FormatConfidence, FormatDetection, MlbomParser, ParseError};
use serde::Deserialize;
use std::collections::HashMap;

/// Parser for CycloneDX MLBOM format
#[derive(Debug, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    /// Create a new CycloneDX parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_json(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let cdx: CycloneDxBom = serde_json::from_str(content)?;
        Ok(self.convert_to_normalized(&cdx))
    }

    /// XML documents are reshaped into the JSON structures first.
    fn parse_xml(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let xml: CycloneDxBomXml = quick_xml::de::from_str(content)?;
        Ok(self.convert_to_normalized(&xml.into_bom()?))
    }

    /// Convert CycloneDX BOM to normalized representation
    fn convert_to_normalized(&self, cdx: &CycloneDxBom) -> NormalizedMlbom {
        if !self.supported_versions().contains(&cdx.spec_version.as_str()) {
            tracing::warn!(
                "CycloneDX specVersion {} is not supported, output may be incomplete",
                cdx.spec_version
            );
        }

        let datasets = DatasetIndex::build(cdx);
        let mut mlbom = NormalizedMlbom::new(Self::convert_metadata(cdx));

        let components = cdx.components.as_deref().unwrap_or_default();

        // The described component leads, unless the components list repeats it
        if let Some(meta_comp) = cdx.metadata.as_ref().and_then(|m| m.component.as_ref()) {
            let repeated = components.iter().any(|c| c.same_component(meta_comp));
            if !repeated {
                push_component_tree(&mut mlbom, meta_comp, &datasets);
            }
        }

        for comp in components {
            push_component_tree(&mut mlbom, comp, &datasets);
        }

        tracing::debug!(
            "Parsed CycloneDX {} document with {} packages ({} ML models)",
            cdx.spec_version,
            mlbom.package_count(),
            mlbom.ml_model_count()
        );
        mlbom
    }

    /// Convert CycloneDX metadata to `DocumentMetadata`
    fn convert_metadata(cdx: &CycloneDxBom) -> DocumentMetadata {
        let meta = cdx.metadata.as_ref();
        let mut creators = Vec::new();

        if let Some(meta) = meta {
            for tool in meta.tools.iter().flatten() {
                let name = tool.name.as_deref().unwrap_or("unknown");
                let label = match &tool.version {
                    Some(version) => format!("{name}#{version}"),
                    None => name.to_string(),
                };
                creators.push(Creator::new(CreatorRole::Tool, label));
            }
            for author in meta.authors.iter().flatten() {
                if let Some(name) = author.name.as_ref().or(author.email.as_ref()) {
                    creators.push(Creator::new(CreatorRole::Person, name.clone()));
                }
            }
            let organization = meta
                .manufacture
                .as_ref()
                .or(meta.supplier.as_ref())
                .and_then(|org| org.name.clone());
            if let Some(name) = organization {
                creators.push(Creator::new(CreatorRole::Organization, name));
            }
        }

        DocumentMetadata {
            format: MlbomFormat::CycloneDx,
            spec_version: Some(cdx.spec_version.clone()),
            name: meta
                .and_then(|m| m.component.as_ref())
                .map(|c| c.name.clone())
                .or_else(|| cdx.serial_number.clone()),
            creators,
            created: meta.and_then(|m| m.timestamp.clone()),
            serial_number: cdx.serial_number.clone(),
        }
    }
}

impl MlbomParser for CycloneDxParser {
    fn parse_str(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            self.parse_json(content)
        } else if trimmed.starts_with('<') {
            self.parse_xml(content)
        } else {
            Err(ParseError::UnknownFormat(
                "Expected JSON or XML CycloneDX format".to_string(),
            ))
        }
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec!["1.4", "1.5", "1.6"]
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') {
            let has_bom_format = content.contains("\"bomFormat\"");
            let has_cyclonedx = content.contains("CycloneDX") || content.contains("cyclonedx");
            let has_spec_version = content.contains("\"specVersion\"");
            let has_schema = content.contains("\"$schema\"") && content.contains("cyclonedx");

            let confidence = if has_bom_format && has_cyclonedx {
                FormatConfidence::CERTAIN
            } else if has_bom_format || has_schema {
                FormatConfidence::HIGH
            } else if has_spec_version && content.contains("\"components\"") {
                FormatConfidence::MEDIUM
            } else {
                return FormatDetection::no_match();
            };

            let mut detection = FormatDetection::with_confidence(confidence).variant("JSON");
            if !has_bom_format {
                detection = detection.warning("Missing bomFormat field - might not be CycloneDX");
            }
            if let Some(version) = quoted_value_after(content, "\"specVersion\"") {
                detection = detection.version(&version);
            }
            return detection;
        }

        if trimmed.starts_with('<') && content.contains("<bom") {
            let confidence = if content.contains("cyclonedx.org") {
                FormatConfidence::HIGH
            } else {
                FormatConfidence::LOW
            };
            let mut detection = FormatDetection::with_confidence(confidence).variant("XML");
            if let Some(version) = xml_namespace_version(content) {
                detection = detection.version(&version);
            }
            return detection;
        }

        FormatDetection::no_match()
    }
}

/// Spec version from the schema namespace, e.g. `http://cyclonedx.org/schema/bom/1.6`.
fn xml_namespace_version(namespace: &str) -> Option<String> {
    let (_, rest) = namespace.split_once("cyclonedx.org/schema/bom/")?;
    let version: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    (!version.is_empty()).then_some(version)
}

// ============================================================================
// Component conversion
// ============================================================================

/// Append a component and its nested components, depth-first in source order.
fn push_component_tree(mlbom: &mut NormalizedMlbom, comp: &CdxComponent, datasets: &DatasetIndex<'_>) {
    mlbom.add_package(convert_component(comp, datasets));
    for child in comp.components.iter().flatten() {
        push_component_tree(mlbom, child, datasets);
    }
}

fn convert_component(cdx: &CdxComponent, datasets: &DatasetIndex<'_>) -> Package {
    let mut pkg = Package::new(cdx.name.clone(), PackageType::from_cyclonedx(&cdx.component_type));
    pkg.version.clone_from(&cdx.version);
    pkg.supplier = cdx.supplier.as_ref().and_then(|s| s.name.clone());
    pkg.license_concluded = convert_licenses(cdx.licenses.as_deref());
    pkg.model_card = cdx
        .model_card
        .as_ref()
        .map(|card| convert_model_card(card, datasets));
    pkg
}

/// Join license ids, names and expressions with `AND`.
fn convert_licenses(licenses: Option<&[CdxLicenseChoice]>) -> Option<String> {
    let exprs: Vec<&str> = licenses
        .unwrap_or_default()
        .iter()
        .filter_map(|choice| {
            choice
                .license
                .as_ref()
                .and_then(|l| l.id.as_deref().or(l.name.as_deref()))
                .or(choice.expression.as_deref())
        })
        .collect();

    if exprs.is_empty() {
        None
    } else {
        Some(exprs.join(" AND "))
    }
}

fn convert_model_card(cdx: &CdxModelCard, datasets: &DatasetIndex<'_>) -> ModelCard {
    let params = cdx.model_parameters.as_ref();
    let analysis = cdx.quantitative_analysis.as_ref();
    let considerations = cdx.considerations.as_ref();

    ModelCard {
        learning_approach: params
            .and_then(|p| p.approach.as_ref())
            .and_then(|a| a.approach_type.clone()),
        task: params.and_then(|p| p.task.clone()),
        architecture_family: params.and_then(|p| p.architecture_family.clone()),
        model_architecture: params.and_then(|p| p.model_architecture.clone()),
        inputs: params.and_then(|p| p.inputs.as_deref()).map(convert_ml_formats),
        outputs: params.and_then(|p| p.outputs.as_deref()).map(convert_ml_formats),
        datasets: params
            .and_then(|p| p.datasets.as_deref())
            .map(|choices| choices.iter().filter_map(|c| datasets.resolve(c)).collect()),
        performance: analysis
            .and_then(|a| a.performance_metrics.as_deref())
            .map(|metrics| metrics.iter().map(convert_performance_metric).collect()),
        graphics: analysis.and_then(|a| a.graphics.as_ref()).map(convert_graphics),
        users: considerations.and_then(|c| c.users.clone()),
        use_cases: considerations.and_then(|c| c.use_cases.clone()),
        limitations: considerations.and_then(|c| c.technical_limitations.clone()),
        tradeoffs: considerations.and_then(|c| c.performance_tradeoffs.clone()),
        ethical_considerations: considerations
            .and_then(|c| c.ethical_considerations.as_deref())
            .map(|risks| {
                risks
                    .iter()
                    .map(|r| EthicalConsideration {
                        name: r.name.clone().unwrap_or_default(),
                        mitigation: r.mitigation_strategy.clone().unwrap_or_default(),
                    })
                    .collect()
            }),
        fairness_assessments: considerations
            .and_then(|c| c.fairness_assessments.as_deref())
            .map(|assessments| {
                assessments
                    .iter()
                    .map(|a| FairnessAssessment {
                        group_at_risk: a.group_at_risk.clone().unwrap_or_default(),
                        benefits: a.benefits.clone().unwrap_or_default(),
                        harms: a.harms.clone().unwrap_or_default(),
                        mitigation: a.mitigation_strategy.clone().unwrap_or_default(),
                    })
                    .collect()
            }),
        properties: cdx.properties.as_deref().map(convert_properties),
    }
}

fn convert_ml_formats(formats: &[CdxMlFormat]) -> Vec<String> {
    formats.iter().filter_map(|f| f.format.clone()).collect()
}

fn convert_properties(props: &[CdxProperty]) -> Vec<Property> {
    props
        .iter()
        .map(|p| Property::new(p.name.clone(), p.value.clone().unwrap_or_default()))
        .collect()
}

fn convert_performance_metric(metric: &CdxPerformanceMetric) -> PerformanceMetric {
    let interval = metric.confidence_interval.as_ref();
    PerformanceMetric {
        metric_type: metric.metric_type.clone().unwrap_or_default(),
        value: metric.value.clone().unwrap_or_default(),
        slice: metric.slice.clone().unwrap_or_default(),
        lower_bound: interval
            .and_then(|i| i.lower_bound.clone())
            .unwrap_or_default(),
        upper_bound: interval
            .and_then(|i| i.upper_bound.clone())
            .unwrap_or_default(),
    }
}

fn convert_graphics(graphics: &CdxGraphics) -> Graphics {
    Graphics {
        description: graphics.description.clone(),
        collection: graphics
            .collection
            .iter()
            .flatten()
            .map(|g| {
                GraphicImage::new(
                    g.name.clone().unwrap_or_default(),
                    g.image
                        .as_ref()
                        .map(|img| img.content.clone())
                        .unwrap_or_default(),
                )
            })
            .collect(),
    }
}

fn convert_dataset(data: &CdxComponentData, fallback_name: Option<&str>) -> Dataset {
    let contents = data.contents.as_ref();
    let governance = data.governance.as_ref();

    Dataset {
        dataset_type: data.data_type.clone(),
        name: data
            .name
            .clone()
            .or_else(|| fallback_name.map(str::to_string)),
        id: data.bom_ref.clone(),
        content: contents
            .and_then(|c| c.attachment.as_ref())
            .map(|a| a.content.clone()),
        content_url: contents.and_then(|c| c.url.clone()),
        properties: contents
            .and_then(|c| c.properties.as_deref())
            .map(convert_properties),
        classification: data.classification.clone(),
        sensitive_data: data.sensitive_data.as_ref().map(|s| s.join(", ")),
        description: data.description.clone(),
        graphics: data.graphics.as_ref().map(convert_graphics),
        custodians: convert_parties(governance.and_then(|g| g.custodians.as_deref())),
        stewards: convert_parties(governance.and_then(|g| g.stewards.as_deref())),
        owners: convert_parties(governance.and_then(|g| g.owners.as_deref())),
    }
}

/// A responsible party is either an organization or an individual contact.
fn convert_parties(parties: Option<&[CdxGovernanceParty]>) -> Vec<GovernanceContact> {
    parties
        .unwrap_or_default()
        .iter()
        .map(|party| {
            let org_contact = party
                .organization
                .as_ref()
                .and_then(|o| o.contact.as_ref())
                .and_then(|c| c.first());
            let person = party.contact.as_ref().or(org_contact);

            let organization = party
                .organization
                .as_ref()
                .and_then(|o| o.name.clone())
                .or_else(|| party.contact.as_ref().and_then(|c| c.name.clone()))
                .unwrap_or_default();
            let contact = person
                .and_then(|c| c.email.clone().or_else(|| c.phone.clone()))
                .unwrap_or_default();

            GovernanceContact::new(organization, contact)
        })
        .collect()
}

// ============================================================================
// Dataset reference resolution
// ============================================================================

/// Index of `data` component entries by `bom-ref`, for resolving dataset references.
struct DatasetIndex<'a> {
    by_ref: HashMap<&'a str, (&'a CdxComponentData, Option<&'a str>)>,
}

impl<'a> DatasetIndex<'a> {
    fn build(cdx: &'a CycloneDxBom) -> Self {
        let mut by_ref = HashMap::new();
        let mut stack: Vec<&'a CdxComponent> = cdx.components.iter().flatten().collect();
        stack.extend(cdx.metadata.as_ref().and_then(|m| m.component.as_ref()));

        while let Some(comp) = stack.pop() {
            stack.extend(comp.components.iter().flatten());
            let Some(entries) = comp.data.as_deref() else {
                continue;
            };
            let name = Some(comp.name.as_str());
            for entry in entries {
                if let Some(bom_ref) = entry.bom_ref.as_deref() {
                    by_ref.insert(bom_ref, (entry, name));
                }
            }
            if let (Some(bom_ref), Some(first)) = (comp.bom_ref.as_deref(), entries.first()) {
                by_ref.entry(bom_ref).or_insert((first, name));
            }
        }

        Self { by_ref }
    }

    fn resolve(&self, choice: &CdxDatasetChoice) -> Option<Dataset> {
        match choice {
            CdxDatasetChoice::Reference { reference } => {
                let resolved = self.by_ref.get(reference.as_str());
                if resolved.is_none() {
                    tracing::debug!("Skipping unresolved dataset reference {reference}");
                }
                resolved.map(|(data, name)| convert_dataset(data, *name))
            }
            CdxDatasetChoice::Inline(data) => Some(convert_dataset(data, None)),
        }
    }
}

// ============================================================================
// CycloneDX JSON structures for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    spec_version: String,
    serial_number: Option<String>,
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    timestamp: Option<String>,
    /// Tools field - can be either array (1.4/1.5) or object with components (1.6)
    #[serde(default, deserialize_with = "deserialize_tools")]
    tools: Option<Vec<CdxTool>>,
    authors: Option<Vec<CdxContact>>,
    component: Option<CdxComponent>,
    manufacture: Option<CdxOrganization>,
    supplier: Option<CdxOrganization>,
}

/// CycloneDX 1.6 tools object format
#[derive(Debug, Deserialize)]
struct CdxToolsObject {
    components: Option<Vec<CdxTool>>,
    services: Option<Vec<CdxTool>>,
}

#[derive(Debug, Deserialize)]
struct CdxTool {
    name: Option<String>,
    version: Option<String>,
}

/// Custom deserializer to handle both CycloneDX 1.4/1.5 (array) and 1.6 (object) tool formats
fn deserialize_tools<'de, D>(deserializer: D) -> Result<Option<Vec<CdxTool>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ToolsVisitor;

    impl<'de> Visitor<'de> for ToolsVisitor {
        type Value = Option<Vec<CdxTool>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of tools or an object with components/services")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut tools = Vec::new();
            while let Some(tool) = seq.next_element::<CdxTool>()? {
                tools.push(tool);
            }
            Ok(Some(tools))
        }

        fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<Self::Value, M::Error> {
            let tools_obj: CdxToolsObject =
                Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;

            let tools: Vec<CdxTool> = tools_obj
                .components
                .into_iter()
                .flatten()
                .chain(tools_obj.services.into_iter().flatten())
                .collect();

            Ok(if tools.is_empty() { None } else { Some(tools) })
        }
    }

    deserializer.deserialize_any(ToolsVisitor)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    name: String,
    version: Option<String>,
    licenses: Option<Vec<CdxLicenseChoice>>,
    supplier: Option<CdxOrganization>,
    model_card: Option<CdxModelCard>,
    data: Option<Vec<CdxComponentData>>,
    components: Option<Vec<CdxComponent>>,
}

impl CdxComponent {
    fn same_component(&self, other: &Self) -> bool {
        match (&self.bom_ref, &other.bom_ref) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name && self.version == other.version,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxLicenseChoice {
    license: Option<CdxLicense>,
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxOrganization {
    name: Option<String>,
    contact: Option<Vec<CdxContact>>,
}

#[derive(Debug, Deserialize)]
struct CdxContact {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxProperty {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxModelCard {
    model_parameters: Option<CdxModelParameters>,
    quantitative_analysis: Option<CdxQuantitativeAnalysis>,
    considerations: Option<CdxConsiderations>,
    properties: Option<Vec<CdxProperty>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxModelParameters {
    approach: Option<CdxApproach>,
    task: Option<String>,
    architecture_family: Option<String>,
    model_architecture: Option<String>,
    datasets: Option<Vec<CdxDatasetChoice>>,
    inputs: Option<Vec<CdxMlFormat>>,
    outputs: Option<Vec<CdxMlFormat>>,
}

#[derive(Debug, Deserialize)]
struct CdxApproach {
    #[serde(rename = "type")]
    approach_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxMlFormat {
    format: Option<String>,
}

/// A dataset is either inline component data or a reference to a `data` component.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CdxDatasetChoice {
    Reference {
        #[serde(rename = "ref")]
        reference: String,
    },
    Inline(Box<CdxComponentData>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponentData {
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    #[serde(rename = "type")]
    data_type: Option<String>,
    name: Option<String>,
    contents: Option<CdxDataContents>,
    classification: Option<String>,
    sensitive_data: Option<Vec<String>>,
    graphics: Option<CdxGraphics>,
    description: Option<String>,
    governance: Option<CdxDataGovernance>,
}

#[derive(Debug, Deserialize)]
struct CdxDataContents {
    attachment: Option<CdxAttachment>,
    url: Option<String>,
    properties: Option<Vec<CdxProperty>>,
}

#[derive(Debug, Deserialize)]
struct CdxAttachment {
    content: String,
}

#[derive(Debug, Deserialize)]
struct CdxDataGovernance {
    custodians: Option<Vec<CdxGovernanceParty>>,
    stewards: Option<Vec<CdxGovernanceParty>>,
    owners: Option<Vec<CdxGovernanceParty>>,
}

#[derive(Debug, Deserialize)]
struct CdxGovernanceParty {
    organization: Option<CdxOrganization>,
    contact: Option<CdxContact>,
}

#[derive(Debug, Deserialize)]
struct CdxGraphics {
    description: Option<String>,
    collection: Option<Vec<CdxGraphic>>,
}

#[derive(Debug, Deserialize)]
struct CdxGraphic {
    name: Option<String>,
    image: Option<CdxAttachment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxQuantitativeAnalysis {
    performance_metrics: Option<Vec<CdxPerformanceMetric>>,
    graphics: Option<CdxGraphics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxPerformanceMetric {
    #[serde(rename = "type")]
    metric_type: Option<String>,
    value: Option<String>,
    slice: Option<String>,
    confidence_interval: Option<CdxConfidenceInterval>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxConfidenceInterval {
    lower_bound: Option<String>,
    upper_bound: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxConsiderations {
    users: Option<Vec<String>>,
    use_cases: Option<Vec<String>>,
    technical_limitations: Option<Vec<String>>,
    performance_tradeoffs: Option<Vec<String>>,
    ethical_considerations: Option<Vec<CdxRisk>>,
    fairness_assessments: Option<Vec<CdxFairnessAssessment>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxRisk {
    name: Option<String>,
    mitigation_strategy: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxFairnessAssessment {
    group_at_risk: Option<String>,
    benefits: Option<String>,
    harms: Option<String>,
    mitigation_strategy: Option<String>,
}

// ============================================================================
// CycloneDX XML structures for deserialization
// XML wraps each list in a container element (`<components><component>`) and
// moves some fields into attributes. Every type converts into its JSON
// counterpart so both encodings share one normalizer.
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename = "bom")]
struct CycloneDxBomXml {
    #[serde(rename = "@xmlns")]
    xmlns: Option<String>,
    #[serde(rename = "@serialNumber")]
    serial_number: Option<String>,
    metadata: Option<CdxMetadataXml>,
    components: Option<CdxComponentsXml>,
}

impl CycloneDxBomXml {
    fn into_bom(self) -> Result<CycloneDxBom, ParseError> {
        let spec_version = self
            .xmlns
            .as_deref()
            .and_then(xml_namespace_version)
            .ok_or_else(|| ParseError::MissingField("xmlns".to_string()))?;

        Ok(CycloneDxBom {
            spec_version,
            serial_number: self.serial_number,
            metadata: self.metadata.map(Into::into),
            components: self.components.map(CdxComponentsXml::into_components),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CdxMetadataXml {
    timestamp: Option<String>,
    tools: Option<CdxToolsXml>,
    authors: Option<CdxAuthorsXml>,
    component: Option<CdxComponentXml>,
    manufacture: Option<CdxOrganizationXml>,
    supplier: Option<CdxOrganizationXml>,
}

impl From<CdxMetadataXml> for CdxMetadata {
    fn from(xml: CdxMetadataXml) -> Self {
        Self {
            timestamp: xml.timestamp,
            tools: xml.tools.map(CdxToolsXml::into_tools),
            authors: xml.authors.map(|a| a.author),
            component: xml.component.map(Into::into),
            manufacture: xml.manufacture.map(Into::into),
            supplier: xml.supplier.map(Into::into),
        }
    }
}

/// Legacy `<tool>` entries, or `<components>` and `<services>` from 1.5 on
#[derive(Debug, Deserialize)]
struct CdxToolsXml {
    #[serde(default)]
    tool: Vec<CdxTool>,
    components: Option<CdxToolComponentsXml>,
    services: Option<CdxToolServicesXml>,
}

impl CdxToolsXml {
    fn into_tools(self) -> Vec<CdxTool> {
        let mut tools = self.tool;
        tools.extend(self.components.into_iter().flat_map(|c| c.component));
        tools.extend(self.services.into_iter().flat_map(|s| s.service));
        tools
    }
}

#[derive(Debug, Deserialize)]
struct CdxToolComponentsXml {
    #[serde(default)]
    component: Vec<CdxTool>,
}

#[derive(Debug, Deserialize)]
struct CdxToolServicesXml {
    #[serde(default)]
    service: Vec<CdxTool>,
}

#[derive(Debug, Deserialize)]
struct CdxAuthorsXml {
    #[serde(default)]
    author: Vec<CdxContact>,
}

#[derive(Debug, Deserialize)]
struct CdxOrganizationXml {
    name: Option<String>,
    #[serde(default)]
    contact: Vec<CdxContact>,
}

impl From<CdxOrganizationXml> for CdxOrganization {
    fn from(xml: CdxOrganizationXml) -> Self {
        Self {
            name: xml.name,
            contact: Some(xml.contact),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxComponentsXml {
    #[serde(default)]
    component: Vec<CdxComponentXml>,
}

impl CdxComponentsXml {
    fn into_components(self) -> Vec<CdxComponent> {
        self.component.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponentXml {
    #[serde(rename = "@type")]
    component_type: String,
    #[serde(rename = "@bom-ref")]
    bom_ref: Option<String>,
    name: String,
    version: Option<String>,
    licenses: Option<CdxLicensesXml>,
    supplier: Option<CdxOrganizationXml>,
    model_card: Option<CdxModelCardXml>,
    data: Option<CdxDataXml>,
    components: Option<CdxComponentsXml>,
}

impl From<CdxComponentXml> for CdxComponent {
    fn from(xml: CdxComponentXml) -> Self {
        Self {
            component_type: xml.component_type,
            bom_ref: xml.bom_ref,
            name: xml.name,
            version: xml.version,
            licenses: xml
                .licenses
                .map(|l| l.choices.into_iter().map(Into::into).collect()),
            supplier: xml.supplier.map(Into::into),
            model_card: xml.model_card.map(Into::into),
            data: xml
                .data
                .map(|d| d.dataset.into_iter().map(Into::into).collect()),
            components: xml.components.map(CdxComponentsXml::into_components),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxLicensesXml {
    #[serde(rename = "$value", default)]
    choices: Vec<CdxLicenseChoiceXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CdxLicenseChoiceXml {
    License(CdxLicense),
    Expression(String),
}

impl From<CdxLicenseChoiceXml> for CdxLicenseChoice {
    fn from(xml: CdxLicenseChoiceXml) -> Self {
        match xml {
            CdxLicenseChoiceXml::License(license) => Self {
                license: Some(license),
                expression: None,
            },
            CdxLicenseChoiceXml::Expression(expression) => Self {
                license: None,
                expression: Some(expression),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxPropertiesXml {
    #[serde(default)]
    property: Vec<CdxPropertyXml>,
}

impl CdxPropertiesXml {
    fn into_properties(self) -> Vec<CdxProperty> {
        self.property
            .into_iter()
            .map(|p| CdxProperty {
                name: p.name,
                value: p.value,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CdxPropertyXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxModelCardXml {
    model_parameters: Option<CdxModelParametersXml>,
    quantitative_analysis: Option<CdxQuantitativeAnalysisXml>,
    considerations: Option<CdxConsiderationsXml>,
    properties: Option<CdxPropertiesXml>,
}

impl From<CdxModelCardXml> for CdxModelCard {
    fn from(xml: CdxModelCardXml) -> Self {
        Self {
            model_parameters: xml.model_parameters.map(Into::into),
            quantitative_analysis: xml.quantitative_analysis.map(Into::into),
            considerations: xml.considerations.map(Into::into),
            properties: xml.properties.map(CdxPropertiesXml::into_properties),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxModelParametersXml {
    approach: Option<CdxApproach>,
    task: Option<String>,
    architecture_family: Option<String>,
    model_architecture: Option<String>,
    datasets: Option<CdxDatasetsXml>,
    inputs: Option<CdxInputsXml>,
    outputs: Option<CdxOutputsXml>,
}

impl From<CdxModelParametersXml> for CdxModelParameters {
    fn from(xml: CdxModelParametersXml) -> Self {
        Self {
            approach: xml.approach,
            task: xml.task,
            architecture_family: xml.architecture_family,
            model_architecture: xml.model_architecture,
            datasets: xml
                .datasets
                .map(|d| d.choices.into_iter().map(Into::into).collect()),
            inputs: xml.inputs.map(|i| i.input),
            outputs: xml.outputs.map(|o| o.output),
        }
    }
}

/// Inline `<dataset>` entries and `<ref>` entries, in document order
#[derive(Debug, Deserialize)]
struct CdxDatasetsXml {
    #[serde(rename = "$value", default)]
    choices: Vec<CdxDatasetChoiceXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CdxDatasetChoiceXml {
    Dataset(Box<CdxComponentDataXml>),
    Ref(String),
}

impl From<CdxDatasetChoiceXml> for CdxDatasetChoice {
    fn from(xml: CdxDatasetChoiceXml) -> Self {
        match xml {
            CdxDatasetChoiceXml::Dataset(data) => Self::Inline(Box::new((*data).into())),
            CdxDatasetChoiceXml::Ref(reference) => Self::Reference { reference },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxInputsXml {
    #[serde(default)]
    input: Vec<CdxMlFormat>,
}

#[derive(Debug, Deserialize)]
struct CdxOutputsXml {
    #[serde(default)]
    output: Vec<CdxMlFormat>,
}

#[derive(Debug, Deserialize)]
struct CdxDataXml {
    #[serde(default)]
    dataset: Vec<CdxComponentDataXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponentDataXml {
    #[serde(rename = "@bom-ref")]
    bom_ref: Option<String>,
    #[serde(rename = "type")]
    data_type: Option<String>,
    name: Option<String>,
    contents: Option<CdxDataContentsXml>,
    classification: Option<String>,
    #[serde(default)]
    sensitive_data: Vec<String>,
    graphics: Option<CdxGraphicsXml>,
    description: Option<String>,
    governance: Option<CdxDataGovernanceXml>,
}

impl From<CdxComponentDataXml> for CdxComponentData {
    fn from(xml: CdxComponentDataXml) -> Self {
        Self {
            bom_ref: xml.bom_ref,
            data_type: xml.data_type,
            name: xml.name,
            contents: xml.contents.map(|c| CdxDataContents {
                attachment: c.attachment.map(Into::into),
                url: c.url,
                properties: c.properties.map(CdxPropertiesXml::into_properties),
            }),
            classification: xml.classification,
            sensitive_data: (!xml.sensitive_data.is_empty()).then_some(xml.sensitive_data),
            graphics: xml.graphics.map(Into::into),
            description: xml.description,
            governance: xml.governance.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxDataContentsXml {
    attachment: Option<CdxAttachmentXml>,
    url: Option<String>,
    properties: Option<CdxPropertiesXml>,
}

/// Element text; the `content-type` and `encoding` attributes are not kept
#[derive(Debug, Deserialize)]
struct CdxAttachmentXml {
    #[serde(rename = "$text", default)]
    content: String,
}

impl From<CdxAttachmentXml> for CdxAttachment {
    fn from(xml: CdxAttachmentXml) -> Self {
        Self {
            content: xml.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxDataGovernanceXml {
    custodians: Option<CdxCustodiansXml>,
    stewards: Option<CdxStewardsXml>,
    owners: Option<CdxOwnersXml>,
}

impl From<CdxDataGovernanceXml> for CdxDataGovernance {
    fn from(xml: CdxDataGovernanceXml) -> Self {
        let parties = |list: Vec<CdxGovernancePartyXml>| -> Vec<CdxGovernanceParty> {
            list.into_iter().map(Into::into).collect()
        };
        Self {
            custodians: xml.custodians.map(|c| parties(c.custodian)),
            stewards: xml.stewards.map(|s| parties(s.steward)),
            owners: xml.owners.map(|o| parties(o.owner)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxCustodiansXml {
    #[serde(default)]
    custodian: Vec<CdxGovernancePartyXml>,
}

#[derive(Debug, Deserialize)]
struct CdxStewardsXml {
    #[serde(default)]
    steward: Vec<CdxGovernancePartyXml>,
}

#[derive(Debug, Deserialize)]
struct CdxOwnersXml {
    #[serde(default)]
    owner: Vec<CdxGovernancePartyXml>,
}

#[derive(Debug, Deserialize)]
struct CdxGovernancePartyXml {
    organization: Option<CdxOrganizationXml>,
    contact: Option<CdxContact>,
}

impl From<CdxGovernancePartyXml> for CdxGovernanceParty {
    fn from(xml: CdxGovernancePartyXml) -> Self {
        Self {
            organization: xml.organization.map(Into::into),
            contact: xml.contact,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxGraphicsXml {
    description: Option<String>,
    collection: Option<CdxGraphicCollectionXml>,
}

impl From<CdxGraphicsXml> for CdxGraphics {
    fn from(xml: CdxGraphicsXml) -> Self {
        Self {
            description: xml.description,
            collection: xml.collection.map(|c| {
                c.graphic
                    .into_iter()
                    .map(|g| CdxGraphic {
                        name: g.name,
                        image: g.image.map(Into::into),
                    })
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxGraphicCollectionXml {
    #[serde(default)]
    graphic: Vec<CdxGraphicXml>,
}

#[derive(Debug, Deserialize)]
struct CdxGraphicXml {
    name: Option<String>,
    image: Option<CdxAttachmentXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxQuantitativeAnalysisXml {
    performance_metrics: Option<CdxPerformanceMetricsXml>,
    graphics: Option<CdxGraphicsXml>,
}

impl From<CdxQuantitativeAnalysisXml> for CdxQuantitativeAnalysis {
    fn from(xml: CdxQuantitativeAnalysisXml) -> Self {
        Self {
            performance_metrics: xml.performance_metrics.map(|m| m.performance_metric),
            graphics: xml.graphics.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxPerformanceMetricsXml {
    #[serde(default)]
    performance_metric: Vec<CdxPerformanceMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxConsiderationsXml {
    users: Option<CdxUsersXml>,
    use_cases: Option<CdxUseCasesXml>,
    technical_limitations: Option<CdxTechnicalLimitationsXml>,
    performance_tradeoffs: Option<CdxPerformanceTradeoffsXml>,
    ethical_considerations: Option<CdxEthicalConsiderationsXml>,
    fairness_assessments: Option<CdxFairnessAssessmentsXml>,
}

impl From<CdxConsiderationsXml> for CdxConsiderations {
    fn from(xml: CdxConsiderationsXml) -> Self {
        Self {
            users: xml.users.map(|u| u.user),
            use_cases: xml.use_cases.map(|u| u.use_case),
            technical_limitations: xml.technical_limitations.map(|t| t.technical_limitation),
            performance_tradeoffs: xml.performance_tradeoffs.map(|p| p.performance_tradeoff),
            ethical_considerations: xml.ethical_considerations.map(|e| e.ethical_consideration),
            fairness_assessments: xml.fairness_assessments.map(|f| f.fairness_assessment),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CdxUsersXml {
    #[serde(default)]
    user: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxUseCasesXml {
    #[serde(default)]
    use_case: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxTechnicalLimitationsXml {
    #[serde(default)]
    technical_limitation: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxPerformanceTradeoffsXml {
    #[serde(default)]
    performance_tradeoff: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxEthicalConsiderationsXml {
    #[serde(default)]
    ethical_consideration: Vec<CdxRisk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxFairnessAssessmentsXml {
    #[serde(default)]
    fairness_assessment: Vec<CdxFairnessAssessment>,
}
