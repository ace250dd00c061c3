//! MLBOM format parsers.
//!
//! This module reads CycloneDX (JSON or XML) bills of materials, including
//! their model cards, and SPDX 2.x documents (JSON or tag-value) into the
//! normalized intermediate representation.
//!
//! ## Format Detection
//!
//! Each parser reports a confidence score (0.0-1.0) for handling content and
//! the most confident one is used. SPDX 3 documents are recognised but rejected
//! with [`ParseError::UnsupportedVersion`].
//!
//! ## Usage
//!
//! ```no_run
//! use mlbom_doc::parsers::{parse_mlbom, detect_format};
//! use std::path::Path;
//!
//! let mlbom = parse_mlbom(Path::new("model.cdx.json")).unwrap();
//!
//! let content = std::fs::read_to_string("model.cdx.json").unwrap();
//! if let Some(detection) = detect_format(&content) {
//!     println!("Detected: {} ({})", detection.format_name, detection.confidence);
//! }
//! ```

mod cyclonedx;
mod detection;
mod spdx;
mod traits;

pub use cyclonedx::CycloneDxParser;
pub use detection::{DetectionResult, FormatDetector, ParserKind, MIN_CONFIDENCE_THRESHOLD};
pub use spdx::SpdxParser;
pub use traits::{FormatConfidence, FormatDetection, MlbomParser, ParseError};

use crate::model::NormalizedMlbom;
use std::path::Path;

/// Result of format detection
#[derive(Debug, Clone)]
pub struct DetectedFormat {
    /// Name of the detected format
    pub format_name: String,
    /// Confidence score (0.0-1.0)
    pub confidence: f32,
    /// Detected variant (e.g., "JSON", "tag-value")
    pub variant: Option<String>,
    /// Detected version if available
    pub version: Option<String>,
    /// Any warnings about the detection
    pub warnings: Vec<String>,
}

/// Detect MLBOM format from content without parsing
///
/// Returns None if no format could be detected with sufficient confidence.
#[must_use]
pub fn detect_format(content: &str) -> Option<DetectedFormat> {
    let result = FormatDetector::new().detect_from_content(content);

    if !result.can_parse() {
        return None;
    }
    Some(DetectedFormat {
        format_name: result
            .parser
            .map(|p| p.name().to_string())
            .unwrap_or_default(),
        confidence: result.confidence.value(),
        variant: result.variant,
        version: result.version,
        warnings: result.warnings,
    })
}

/// Maximum MLBOM file size (512 MB).
const MAX_MLBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Detect the MLBOM format of a file and parse it.
///
/// Returns an error if the file exceeds 512 MB.
pub fn parse_mlbom(path: &Path) -> Result<NormalizedMlbom, ParseError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_MLBOM_FILE_SIZE {
        return Err(ParseError::IoError(format!(
            "MLBOM file is {} MB, exceeding the {} MB limit",
            metadata.len() / (1024 * 1024),
            MAX_MLBOM_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_mlbom_str(&content)
}

/// Parse an MLBOM from string content
pub fn parse_mlbom_str(content: &str) -> Result<NormalizedMlbom, ParseError> {
    FormatDetector::new().parse_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_cyclonedx_json() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.6"}"#;
        let detected = detect_format(content).expect("Should detect format");
        assert_eq!(detected.format_name, "CycloneDX");
        assert!(detected.confidence >= 0.75);
        assert_eq!(detected.variant.as_deref(), Some("JSON"));
        assert_eq!(detected.version.as_deref(), Some("1.6"));
    }

    #[test]
    fn test_spdx_routed_to_spdx_parser() {
        let content = r#"{"spdxVersion": "SPDX-2.3", "SPDXID": "SPDXRef-DOCUMENT", "name": "doc"}"#;
        let detected = detect_format(content).expect("Should detect format");
        assert_eq!(detected.format_name, "SPDX");

        let mlbom = parse_mlbom_str(content).expect("SPDX 2.3 parses");
        assert_eq!(mlbom.document.document_type(), "SPDX");
        assert_eq!(mlbom.document.name.as_deref(), Some("doc"));
    }

    #[test]
    fn test_cyclonedx_xml_routed_to_cyclonedx_parser() {
        let content = r#"<?xml version="1.0"?>
            <bom xmlns="http://cyclonedx.org/schema/bom/1.6" version="1">
              <components><component type="machine-learning-model"><name>m</name></component></components>
            </bom>"#;
        let detected = detect_format(content).expect("Should detect format");
        assert_eq!(detected.variant.as_deref(), Some("XML"));
        assert_eq!(detected.version.as_deref(), Some("1.6"));

        let mlbom = parse_mlbom_str(content).expect("CycloneDX XML parses");
        assert_eq!(mlbom.ml_model_count(), 1);
    }

    #[test]
    fn test_unknown_format() {
        let content = r#"{"some": "random", "json": "content"}"#;
        assert!(detect_format(content).is_none());
        assert!(matches!(
            parse_mlbom_str(content),
            Err(ParseError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_mlbom(Path::new("/nonexistent/model.cdx.json")).unwrap_err();
        assert!(matches!(err, ParseError::IoError(_)));
    }

    #[test]
    fn test_confidence_based_selection() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.6", "components": []}"#;
        let cdx = CycloneDxParser::new().detect(content).confidence;
        let spdx = SpdxParser::new().detect(content).confidence;
        assert!(cdx > spdx);
    }
}
