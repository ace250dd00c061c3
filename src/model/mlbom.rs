//! Core MLBOM and Package data structures.

use super::{DocumentMetadata, ModelCard, PackageType};
use serde::{Deserialize, Serialize};

/// Normalized MLBOM document - the canonical intermediate representation.
///
/// Packages are kept in source order; nothing is merged, sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMlbom {
    /// Document-level metadata
    pub document: DocumentMetadata,
    /// Packages, in source order
    pub packages: Vec<Package>,
}

impl NormalizedMlbom {
    /// Create a new MLBOM with no packages
    #[must_use]
    pub const fn new(document: DocumentMetadata) -> Self {
        Self {
            document,
            packages: Vec::new(),
        }
    }

    /// Append a package, preserving insertion order
    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Number of packages of any type
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Machine-learning model packages, in source order
    pub fn ml_models(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter().filter(|p| p.is_ml_model())
    }

    /// Number of machine-learning model packages
    #[must_use]
    pub fn ml_model_count(&self) -> usize {
        self.ml_models().count()
    }
}

/// A package (component) listed in the MLBOM
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub package_type: PackageType,
    pub version: Option<String>,
    /// Supplier organization name
    pub supplier: Option<String>,
    /// Concluded license expression
    pub license_concluded: Option<String>,
    pub model_card: Option<ModelCard>,
}

impl Package {
    /// Create a new package with just a name and type
    #[must_use]
    pub fn new(name: impl Into<String>, package_type: PackageType) -> Self {
        Self {
            name: name.into(),
            package_type,
            ..Default::default()
        }
    }

    /// Set version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set supplier
    #[must_use]
    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Set concluded license
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license_concluded = Some(license.into());
        self
    }

    /// Attach a model card
    #[must_use]
    pub fn with_model_card(mut self, card: ModelCard) -> Self {
        self.model_card = Some(card);
        self
    }

    /// True for machine-learning model packages
    #[must_use]
    pub fn is_ml_model(&self) -> bool {
        self.package_type == PackageType::MachineLearningModel
    }
}
