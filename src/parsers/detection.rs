//! Centralized format detection for MLBOM parsers.

use super::traits::{FormatConfidence, FormatDetection, MlbomParser, ParseError};
use super::{CycloneDxParser, SpdxParser};
use crate::model::NormalizedMlbom;

/// Minimum confidence threshold for accepting a format detection.
pub const MIN_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Parser type identified during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    CycloneDx,
    Spdx,
}

impl ParserKind {
    /// Get the human-readable name for this parser.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CycloneDx => "CycloneDX",
            Self::Spdx => "SPDX",
        }
    }
}

/// Result of format detection.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// The parser that should handle this content, if detected.
    pub parser: Option<ParserKind>,
    pub confidence: FormatConfidence,
    pub variant: Option<String>,
    pub version: Option<String>,
    pub warnings: Vec<String>,
}

impl DetectionResult {
    fn unknown(reason: &str) -> Self {
        Self {
            parser: None,
            confidence: FormatConfidence::NONE,
            variant: None,
            version: None,
            warnings: vec![reason.to_string()],
        }
    }

    fn detected(parser: ParserKind, detection: FormatDetection) -> Self {
        Self {
            parser: Some(parser),
            confidence: detection.confidence,
            variant: detection.variant,
            version: detection.version,
            warnings: detection.warnings,
        }
    }

    /// Check if the detection is confident enough to parse.
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.parser.is_some() && self.confidence.value() >= MIN_CONFIDENCE_THRESHOLD
    }
}

/// Picks the parser with the highest confidence for a piece of content.
#[derive(Debug, Default)]
pub struct FormatDetector {
    cyclonedx: CycloneDxParser,
    spdx: SpdxParser,
}

impl FormatDetector {
    /// Create a new format detector.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cyclonedx: CycloneDxParser::new(),
            spdx: SpdxParser::new(),
        }
    }

    /// Detect format from full content string.
    #[must_use]
    pub fn detect_from_content(&self, content: &str) -> DetectionResult {
        let cdx = self.cyclonedx.detect(content);
        let spdx = self.spdx.detect(content);

        let cdx_conf = cdx.confidence.value();
        let spdx_conf = spdx.confidence.value();
        tracing::debug!(
            "Format detection: CycloneDX={:.2}, SPDX={:.2}, threshold={:.2}",
            cdx_conf,
            spdx_conf,
            MIN_CONFIDENCE_THRESHOLD
        );

        if cdx_conf >= MIN_CONFIDENCE_THRESHOLD && cdx_conf > spdx_conf {
            DetectionResult::detected(ParserKind::CycloneDx, cdx)
        } else if spdx_conf >= MIN_CONFIDENCE_THRESHOLD {
            DetectionResult::detected(ParserKind::Spdx, spdx)
        } else {
            DetectionResult::unknown("Could not detect MLBOM format with sufficient confidence")
        }
    }

    /// Detect the format and parse with the matching parser.
    pub fn parse_str(&self, content: &str) -> Result<NormalizedMlbom, ParseError> {
        let detection = self.detect_from_content(content);

        for warning in &detection.warnings {
            tracing::warn!("{}", warning);
        }

        match detection.parser {
            Some(ParserKind::CycloneDx) if detection.can_parse() => {
                self.cyclonedx.parse_str(content)
            }
            Some(ParserKind::Spdx) if detection.can_parse() => self.spdx.parse_str(content),
            _ => Err(ParseError::UnknownFormat(
                "Could not detect MLBOM format. Expected CycloneDX or SPDX.".to_string(),
            )),
        }
    }
}

/// Quick heuristic: the first quoted string after `key` (e.g. `"specVersion": "1.6"`).
pub(crate) fn quoted_value_after(content: &str, key: &str) -> Option<String> {
    let after_key = &content[content.find(key)? + key.len()..];
    let value = after_key.trim_start().strip_prefix(':')?.trim_start();
    let value = value.strip_prefix('"')?;
    let end = value.find('"')?;
    Some(value[..end].to_string())
}
