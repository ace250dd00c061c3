//! Metadata structures for MLBOM documents and packages.

use serde::{Deserialize, Serialize};

/// MLBOM format type
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MlbomFormat {
    #[default]
    CycloneDx,
    Spdx,
}

impl std::fmt::Display for MlbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycloneDx => write!(f, "CycloneDX"),
            Self::Spdx => write!(f, "SPDX"),
        }
    }
}

/// Document-level metadata
///
/// Every field other than the format may be missing from the source document,
/// so each is an explicit `Option`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// MLBOM format type
    pub format: MlbomFormat,
    /// Specification version (e.g., "1.5" for `CycloneDX`)
    pub spec_version: Option<String>,
    /// Document name
    pub name: Option<String>,
    /// Creators/authors, in source order
    pub creators: Vec<Creator>,
    /// Creation timestamp, as written in the source document
    pub created: Option<String>,
    /// Serial number or document namespace
    pub serial_number: Option<String>,
}

impl DocumentMetadata {
    /// Human-readable document type (the format name)
    #[must_use]
    pub fn document_type(&self) -> String {
        self.format.to_string()
    }
}

/// Creator information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Creator role
    pub role: CreatorRole,
    /// Creator name or identifier
    pub name: String,
}

impl Creator {
    #[must_use]
    pub fn new(role: CreatorRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.role, self.name)
    }
}

/// Type of creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatorRole {
    Person,
    Organization,
    Tool,
}

impl std::fmt::Display for CreatorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Organization => write!(f, "organization"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// Package type classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PackageType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
    Data,
    MachineLearningModel,
    Platform,
    DeviceDriver,
    Cryptographic,
    Other(String),
}

impl PackageType {
    /// Map a `CycloneDX` component type token to a package type
    #[must_use]
    pub fn from_cyclonedx(token: &str) -> Self {
        match token {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "firmware" => Self::Firmware,
            "file" => Self::File,
            "data" => Self::Data,
            "machine-learning-model" => Self::MachineLearningModel,
            "platform" => Self::Platform,
            "device-driver" => Self::DeviceDriver,
            "cryptographic-asset" => Self::Cryptographic,
            other => Self::Other(other.to_string()),
        }
    }

    /// Map an SPDX `primaryPackagePurpose` (e.g. `OPERATING-SYSTEM`) to a package type
    #[must_use]
    pub fn from_spdx_purpose(purpose: &str) -> Self {
        Self::from_cyclonedx(&purpose.to_ascii_lowercase())
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Application => write!(f, "application"),
            Self::Framework => write!(f, "framework"),
            Self::Library => write!(f, "library"),
            Self::Container => write!(f, "container"),
            Self::OperatingSystem => write!(f, "operating-system"),
            Self::Device => write!(f, "device"),
            Self::Firmware => write!(f, "firmware"),
            Self::File => write!(f, "file"),
            Self::Data => write!(f, "data"),
            Self::MachineLearningModel => write!(f, "machine-learning-model"),
            Self::Platform => write!(f, "platform"),
            Self::DeviceDriver => write!(f, "device-driver"),
            Self::Cryptographic => write!(f, "cryptographic-asset"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_display_is_role_colon_name() {
        let creator = Creator::new(CreatorRole::Tool, "mlbomgen#1.2");
        assert_eq!(creator.to_string(), "tool:mlbomgen#1.2");
    }

    #[test]
    fn test_package_type_display_matches_cyclonedx_token() {
        for token in ["machine-learning-model", "data", "library", "cryptographic-asset"] {
            assert_eq!(PackageType::from_cyclonedx(token).to_string(), token);
        }
        assert_eq!(
            PackageType::from_cyclonedx("widget"),
            PackageType::Other("widget".to_string())
        );
    }

    #[test]
    fn test_spdx_purpose_maps_like_cyclonedx_token() {
        assert_eq!(
            PackageType::from_spdx_purpose("MACHINE-LEARNING-MODEL"),
            PackageType::MachineLearningModel
        );
        assert_eq!(
            PackageType::from_spdx_purpose("OPERATING-SYSTEM"),
            PackageType::OperatingSystem
        );
        assert_eq!(
            PackageType::from_spdx_purpose("SOURCE"),
            PackageType::Other("source".to_string())
        );
    }

    #[test]
    fn test_document_type_uses_format_name() {
        let doc = DocumentMetadata::default();
        assert_eq!(doc.document_type(), "CycloneDX");
    }
}
