//! The parser interface shared by the CycloneDX and SPDX readers.
//!
//! Each parser scores how likely it is to understand a document
//! ([`MlbomParser::detect`]) before anything is deserialized, so the
//! detector can pick one parser instead of trying each in turn.

use crate::model::NormalizedMlbom;
use thiserror::Error;

/// Why a document could not be read
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    /// Recognised format, but a version this crate cannot read
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),

    #[error("Unknown MLBOM format: {0}")]
    UnknownFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<quick_xml::de::DeError> for ParseError {
    fn from(err: quick_xml::de::DeError) -> Self {
        Self::XmlError(err.to_string())
    }
}

/// How sure a parser is that it can read some content, between 0 and 1
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    pub const NONE: Self = Self(0.0);
    /// Format markers present but not conclusive
    pub const LOW: Self = Self(0.25);
    pub const MEDIUM: Self = Self(0.5);
    pub const HIGH: Self = Self(0.75);
    /// Every identifying field is present
    pub const CERTAIN: Self = Self(1.0);

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// What a parser found when inspecting content
#[derive(Debug, Clone)]
pub struct FormatDetection {
    pub confidence: FormatConfidence,
    /// Encoding, e.g. "JSON", "XML" or "tag-value"
    pub variant: Option<String>,
    pub version: Option<String>,
    /// Logged by the detector before parsing
    pub warnings: Vec<String>,
}

impl FormatDetection {
    #[must_use]
    pub const fn no_match() -> Self {
        Self::with_confidence(FormatConfidence::NONE)
    }

    #[must_use]
    pub const fn with_confidence(confidence: FormatConfidence) -> Self {
        Self {
            confidence,
            variant: None,
            version: None,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    #[must_use]
    pub fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

/// A reader for one MLBOM format.
///
/// `detect` must stay a cheap textual check; `parse_str` does the real work.
pub trait MlbomParser {
    fn parse_str(&self, content: &str) -> Result<NormalizedMlbom, ParseError>;

    /// Versions read without a warning
    fn supported_versions(&self) -> Vec<&str>;

    fn detect(&self, content: &str) -> FormatDetection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_levels_are_ordered() {
        assert!(FormatConfidence::NONE < FormatConfidence::LOW);
        assert!(FormatConfidence::LOW < FormatConfidence::MEDIUM);
        assert!(FormatConfidence::HIGH < FormatConfidence::CERTAIN);
        assert_eq!(FormatConfidence::default(), FormatConfidence::NONE);
    }

    #[test]
    fn test_detection_builder() {
        let detection = FormatDetection::with_confidence(FormatConfidence::HIGH)
            .variant("JSON")
            .version("1.6")
            .warning("missing bomFormat");
        assert_eq!(detection.variant.as_deref(), Some("JSON"));
        assert_eq!(detection.version.as_deref(), Some("1.6"));
        assert_eq!(detection.warnings.len(), 1);
    }

    #[test]
    fn test_xml_error_converts() {
        #[derive(Debug, serde::Deserialize)]
        struct Named {
            #[allow(dead_code)]
            name: String,
        }
        let err = quick_xml::de::from_str::<Named>("<item/>").unwrap_err();
        assert!(matches!(ParseError::from(err), ParseError::XmlError(_)));
    }
}
