//! SPDX parser.
//!
//! Supports SPDX 2.2 and 2.3 in JSON and tag-value form. SPDX carries no model
//! cards, so packages only contribute their name, version, supplier, license
//! and type. `primaryPackagePurpose` selects the package type, which is how a
//! `MACHINE-LEARNING-MODEL` package is recognised.

use super::detection::quoted_value_after;
use crate::model::{
    Creator, CreatorRole, DocumentMetadata, MlbomFormat, NormalizedMlbom, Package, PackageType,
};
use crate::parsers::traits::{FormatConfidence, FormatDetection, MlbomParser, ParseError};
use serde::Deserialize;

/// Parser for SPDX 2.x documents
#[derive(Debug, Default)]
pub struct SpdxParser;

impl SpdxParser {
    /// Create a new SPDX parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_json(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let spdx: SpdxDocument = serde_json::from_str(content)?;
        if spdx.spdx_version.is_none() && spdx.context.is_some() {
            return Err(ParseError::UnsupportedVersion(
                "SPDX 3 JSON-LD documents are not supported, provide SPDX 2.x".to_string(),
            ));
        }
        self.convert_to_normalized(spdx)
    }

    /// Collect tag-value lines into the same structure the JSON form uses.
    ///
    /// Package tags apply to the package opened by the latest `PackageName`.
    fn parse_tag_value(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let mut doc = SpdxDocument::default();
        let mut creation_info = SpdxCreationInfo::default();
        let mut packages: Vec<SpdxPackage> = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim().to_string());
            if key == "PackageName" {
                packages.push(SpdxPackage {
                    name: value,
                    ..SpdxPackage::default()
                });
                continue;
            }

            match (key, packages.last_mut()) {
                ("SPDXVersion", _) => doc.spdx_version = Some(value),
                ("DocumentName", _) => doc.name = Some(value),
                ("DocumentNamespace", _) => doc.document_namespace = Some(value),
                ("Creator", _) => creation_info.creators.push(value),
                ("Created", _) => creation_info.created = Some(value),
                ("PackageVersion", Some(pkg)) => pkg.version_info = Some(value),
                ("PackageSupplier", Some(pkg)) => pkg.supplier = Some(value),
                ("PackageLicenseConcluded", Some(pkg)) => pkg.license_concluded = Some(value),
                ("PrimaryPackagePurpose", Some(pkg)) => pkg.primary_package_purpose = Some(value),
                _ => {}
            }
        }

        doc.creation_info = Some(creation_info);
        doc.packages = Some(packages);
        self.convert_to_normalized(doc)
    }

    fn convert_to_normalized(&self, spdx: SpdxDocument) -> Result<NormalizedMlbom, ParseError> {
        let version = spdx
            .spdx_version
            .as_deref()
            .map(strip_spdx_prefix)
            .ok_or_else(|| ParseError::MissingField("spdxVersion".to_string()))?;

        if !version.starts_with("2.") {
            return Err(ParseError::UnsupportedVersion(format!(
                "SPDX {version} (supported: {})",
                self.supported_versions().join(", ")
            )));
        }
        if !self.supported_versions().contains(&version.as_str()) {
            tracing::warn!("SPDX version {version} is not supported, output may be incomplete");
        }

        let creation_info = spdx.creation_info.unwrap_or_default();
        let document = DocumentMetadata {
            format: MlbomFormat::Spdx,
            spec_version: Some(version),
            name: spdx.name,
            creators: creation_info
                .creators
                .iter()
                .map(String::as_str)
                .map(convert_creator)
                .collect(),
            created: creation_info.created,
            serial_number: spdx.document_namespace,
        };

        let mut mlbom = NormalizedMlbom::new(document);
        for pkg in spdx.packages.into_iter().flatten() {
            mlbom.add_package(convert_package(pkg));
        }

        tracing::debug!(
            "Parsed SPDX document with {} packages ({} ML models)",
            mlbom.package_count(),
            mlbom.ml_model_count()
        );
        Ok(mlbom)
    }

    /// Extract SPDX version from tag-value content
    fn extract_tag_value_version(content: &str) -> Option<String> {
        content
            .lines()
            .find_map(|line| line.strip_prefix("SPDXVersion:"))
            .map(|rest| strip_spdx_prefix(rest.trim()))
    }
}

fn strip_spdx_prefix(version: &str) -> String {
    version.strip_prefix("SPDX-").unwrap_or(version).to_string()
}

/// `NOASSERTION` and `NONE` mean the value is not known.
fn asserted(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "NOASSERTION" && v != "NONE")
}

/// SPDX creators read `Type: name`; anything else is taken as a tool.
fn convert_creator(creator: &str) -> Creator {
    let (role, name) = if let Some(name) = creator.strip_prefix("Person:") {
        (CreatorRole::Person, name)
    } else if let Some(name) = creator.strip_prefix("Organization:") {
        (CreatorRole::Organization, name)
    } else {
        (
            CreatorRole::Tool,
            creator.strip_prefix("Tool:").unwrap_or(creator),
        )
    };
    Creator::new(role, name.trim())
}

fn convert_package(pkg: SpdxPackage) -> Package {
    let package_type = pkg
        .primary_package_purpose
        .as_deref()
        .map_or(PackageType::Library, PackageType::from_spdx_purpose);

    let mut package = Package::new(pkg.name, package_type);
    package.version = pkg.version_info;
    package.supplier = asserted(pkg.supplier).map(|supplier| {
        supplier
            .strip_prefix("Organization:")
            .or_else(|| supplier.strip_prefix("Person:"))
            .unwrap_or(&supplier)
            .trim()
            .to_string()
    });
    package.license_concluded = asserted(pkg.license_concluded);
    package
}

impl MlbomParser for SpdxParser {
    fn parse_str(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('{') {
            self.parse_json(content)
        } else if trimmed.starts_with("SPDXVersion:") || trimmed.contains("\nSPDXVersion:") {
            self.parse_tag_value(content)
        } else {
            Err(ParseError::UnknownFormat(
                "Expected JSON or tag-value SPDX format".to_string(),
            ))
        }
    }

    fn supported_versions(&self) -> Vec<&str> {
        vec!["2.2", "2.3"]
    }

    fn detect(&self, content: &str) -> FormatDetection {
        let trimmed = content.trim_start();

        if trimmed.starts_with('{') {
            let has_spdx_version = content.contains("\"spdxVersion\"");
            let has_spdx_id = content.contains("\"SPDXID\"");
            let has_data_license = content.contains("\"dataLicense\"");
            // SPDX 3 uses JSON-LD with an spdx.org context
            let has_spdx3_context = content.contains("\"@context\"") && content.contains("spdx.org");

            let confidence = if has_spdx_version && has_spdx_id {
                FormatConfidence::CERTAIN
            } else if has_spdx_version || has_spdx3_context || (has_spdx_id && has_data_license) {
                FormatConfidence::HIGH
            } else {
                return FormatDetection::no_match();
            };

            let mut detection = FormatDetection::with_confidence(confidence).variant("JSON");
            if let Some(version) = quoted_value_after(content, "\"spdxVersion\"") {
                detection = detection.version(&strip_spdx_prefix(&version));
            } else if has_spdx3_context {
                detection = detection.version("3").warning("SPDX 3 documents cannot be rendered");
            }
            return detection;
        }

        if trimmed.starts_with("SPDXVersion:") || trimmed.contains("\nSPDXVersion:") {
            let confidence = if content.contains("SPDXID:") && content.contains("DataLicense:") {
                FormatConfidence::CERTAIN
            } else {
                FormatConfidence::HIGH
            };
            let mut detection = FormatDetection::with_confidence(confidence).variant("tag-value");
            if let Some(version) = Self::extract_tag_value_version(content) {
                detection = detection.version(&version);
            }
            return detection;
        }

        FormatDetection::no_match()
    }
}

// ============================================================================
// SPDX JSON structures for deserialization
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: Option<String>,
    #[serde(rename = "@context")]
    context: Option<serde_json::Value>,
    name: Option<String>,
    document_namespace: Option<String>,
    creation_info: Option<SpdxCreationInfo>,
    packages: Option<Vec<SpdxPackage>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo {
    created: Option<String>,
    #[serde(default)]
    creators: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    name: String,
    version_info: Option<String>,
    supplier: Option<String>,
    license_concluded: Option<String>,
    primary_package_purpose: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG_VALUE: &str = "\
SPDXVersion: SPDX-2.3
DataLicense: CC0-1.0
SPDXID: SPDXRef-DOCUMENT
DocumentName: sentiment-models
DocumentNamespace: https://example.com/spdx/sentiment
Creator: Tool: model-exporter-1.2
Creator: Organization: Acme AI
Created: 2024-03-01T10:00:00Z

# Packages
PackageName: bert-sentiment
SPDXID: SPDXRef-bert
PackageVersion: 2.1.0
PackageSupplier: Organization: Acme AI
PackageLicenseConcluded: Apache-2.0
PrimaryPackagePurpose: MACHINE-LEARNING-MODEL

PackageName: tokenizers
SPDXID: SPDXRef-tokenizers
PackageVersion: 0.15.0
PackageSupplier: NOASSERTION
PackageLicenseConcluded: NOASSERTION
";

    #[test]
    fn test_detects_tag_value_version() {
        let detection = SpdxParser::new().detect(TAG_VALUE);
        assert_eq!(detection.confidence, FormatConfidence::CERTAIN);
        assert_eq!(detection.variant.as_deref(), Some("tag-value"));
        assert_eq!(detection.version.as_deref(), Some("2.3"));
    }

    #[test]
    fn test_tag_value_document() {
        let mlbom = SpdxParser::new().parse_str(TAG_VALUE).expect("valid tag-value");

        assert_eq!(mlbom.document.format, MlbomFormat::Spdx);
        assert_eq!(mlbom.document.spec_version.as_deref(), Some("2.3"));
        assert_eq!(mlbom.document.name.as_deref(), Some("sentiment-models"));
        assert_eq!(mlbom.document.created.as_deref(), Some("2024-03-01T10:00:00Z"));
        let creators: Vec<String> = mlbom.document.creators.iter().map(ToString::to_string).collect();
        assert_eq!(creators, ["tool:model-exporter-1.2", "organization:Acme AI"]);

        assert_eq!(mlbom.package_count(), 2);
        let model = &mlbom.packages[0];
        assert!(model.is_ml_model());
        assert_eq!(model.version.as_deref(), Some("2.1.0"));
        assert_eq!(model.supplier.as_deref(), Some("Acme AI"));
        assert_eq!(model.license_concluded.as_deref(), Some("Apache-2.0"));
        assert!(model.model_card.is_none());

        let library = &mlbom.packages[1];
        assert_eq!(library.package_type, PackageType::Library);
        assert_eq!(library.supplier, None);
        assert_eq!(library.license_concluded, None);
    }

    #[test]
    fn test_json_creators_and_purpose() {
        let content = r#"{"spdxVersion": "SPDX-2.3", "SPDXID": "SPDXRef-DOCUMENT",
            "creationInfo": {"creators": ["Person: Jane Doe", "mlbom-gen"]},
            "packages": [{"name": "m", "primaryPackagePurpose": "MACHINE-LEARNING-MODEL"}]}"#;
        let mlbom = SpdxParser::new().parse_str(content).expect("valid SPDX JSON");

        let creators: Vec<String> = mlbom.document.creators.iter().map(ToString::to_string).collect();
        assert_eq!(creators, ["person:Jane Doe", "tool:mlbom-gen"]);
        assert_eq!(mlbom.ml_model_count(), 1);
        assert_eq!(mlbom.document.created, None);
    }

    #[test]
    fn test_spdx3_is_unsupported_version() {
        let content = r#"{"@context": "https://spdx.org/rdf/3.0.0/spdx-context.jsonld", "@graph": []}"#;
        let detection = SpdxParser::new().detect(content);
        assert_eq!(detection.version.as_deref(), Some("3"));

        let err = SpdxParser::new().parse_str(content).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(_)));

        let err = SpdxParser::new()
            .parse_str(r#"{"spdxVersion": "SPDX-3.0", "SPDXID": "SPDXRef-DOCUMENT"}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(ref m) if m.contains("3.0")));
    }

    #[test]
    fn test_missing_version_is_missing_field() {
        let content = r#"{"SPDXID": "SPDXRef-DOCUMENT", "dataLicense": "CC0-1.0"}"#;
        let err = SpdxParser::new().parse_str(content).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "spdxVersion"));
    }
}
