//! Model card structures.
//!
//! A model card is heterogeneous and almost entirely optional. Every field is an
//! explicit `Option` so that "absent" can be told apart from "present but empty":
//! an empty list still produces its report section, an absent one suppresses it.

use serde::{Deserialize, Serialize};

/// Structured metadata describing a machine-learning model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCard {
    /// Learning approach (supervised, unsupervised, ...)
    pub learning_approach: Option<String>,
    /// Task the model performs (e.g., "classification")
    pub task: Option<String>,
    /// Architecture family (e.g., "transformer")
    pub architecture_family: Option<String>,
    /// Specific model architecture (e.g., "BERT")
    pub model_architecture: Option<String>,
    /// Input format descriptors, in source order
    pub inputs: Option<Vec<String>>,
    /// Output format descriptors, in source order
    pub outputs: Option<Vec<String>>,
    /// Datasets used to train or evaluate the model
    pub datasets: Option<Vec<Dataset>>,
    /// Performance metrics
    pub performance: Option<Vec<PerformanceMetric>>,
    /// Quantitative analysis graphics
    pub graphics: Option<Graphics>,
    /// Intended users
    pub users: Option<Vec<String>>,
    /// Intended use cases
    pub use_cases: Option<Vec<String>>,
    /// Technical limitations
    pub limitations: Option<Vec<String>>,
    /// Performance trade-offs
    pub tradeoffs: Option<Vec<String>>,
    /// Ethical considerations with their mitigation strategies
    pub ethical_considerations: Option<Vec<EthicalConsideration>>,
    /// Fairness assessments
    pub fairness_assessments: Option<Vec<FairnessAssessment>>,
    /// Free-form model card properties
    pub properties: Option<Vec<Property>>,
}

impl ModelCard {
    /// True when no field of the model card is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True when any field contributing to the model parameters section is present
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        self.learning_approach.is_some()
            || self.task.is_some()
            || self.architecture_family.is_some()
            || self.model_architecture.is_some()
            || self.inputs.is_some()
            || self.outputs.is_some()
    }

    /// True when any field contributing to the quantitative analysis section is present
    #[must_use]
    pub fn has_quantitative_analysis(&self) -> bool {
        self.performance.is_some() || self.graphics.is_some()
    }

    /// True when any field contributing to the considerations section is present
    #[must_use]
    pub fn has_considerations(&self) -> bool {
        self.users.is_some()
            || self.use_cases.is_some()
            || self.limitations.is_some()
            || self.tradeoffs.is_some()
            || self.ethical_considerations.is_some()
            || self.fairness_assessments.is_some()
    }
}

/// A dataset referenced by a model card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset type (required by the format, but may be missing in practice)
    pub dataset_type: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    /// Inline content description
    pub content: Option<String>,
    /// Location of the dataset contents
    pub content_url: Option<String>,
    pub properties: Option<Vec<Property>>,
    /// Data classification (required by the format, but may be missing in practice)
    pub classification: Option<String>,
    pub sensitive_data: Option<String>,
    pub description: Option<String>,
    pub graphics: Option<Graphics>,
    pub custodians: Vec<GovernanceContact>,
    pub stewards: Vec<GovernanceContact>,
    pub owners: Vec<GovernanceContact>,
}

impl Dataset {
    /// True when at least one governance contact is recorded
    #[must_use]
    pub fn has_governance(&self) -> bool {
        !(self.custodians.is_empty() && self.stewards.is_empty() && self.owners.is_empty())
    }

    /// Governance contacts tagged with their category, custodians first, then
    /// stewards, then owners.
    pub fn governance(&self) -> impl Iterator<Item = (GovernanceRole, &GovernanceContact)> {
        self.custodians
            .iter()
            .map(|c| (GovernanceRole::Custodian, c))
            .chain(self.stewards.iter().map(|c| (GovernanceRole::Steward, c)))
            .chain(self.owners.iter().map(|c| (GovernanceRole::Owner, c)))
    }
}

/// Governance category of a dataset contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceRole {
    Custodian,
    Steward,
    Owner,
}

impl std::fmt::Display for GovernanceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custodian => write!(f, "Custodian"),
            Self::Steward => write!(f, "Steward"),
            Self::Owner => write!(f, "Owner"),
        }
    }
}

/// A dataset governance contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceContact {
    pub organization: String,
    pub contact: String,
}

impl GovernanceContact {
    #[must_use]
    pub fn new(organization: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            contact: contact.into(),
        }
    }
}

/// A described collection of images
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphics {
    pub description: Option<String>,
    pub collection: Vec<GraphicImage>,
}

/// A single named image within a graphics collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphicImage {
    pub name: String,
    /// Image content or a reference to it
    pub content: String,
}

impl GraphicImage {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Fixed-shape performance metric record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub metric_type: String,
    pub value: String,
    pub slice: String,
    pub lower_bound: String,
    pub upper_bound: String,
}

impl PerformanceMetric {
    /// The five cells of the metric, in report column order
    #[must_use]
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.metric_type,
            &self.value,
            &self.slice,
            &self.lower_bound,
            &self.upper_bound,
        ]
    }
}

/// An ethical consideration paired with its mitigation strategy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthicalConsideration {
    pub name: String,
    pub mitigation: String,
}

/// A fairness assessment for a group at risk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessAssessment {
    pub group_at_risk: String,
    pub benefits: String,
    pub harms: String,
    pub mitigation: String,
}

/// A name/value property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_card_is_empty() {
        let card = ModelCard::default();
        assert!(card.is_empty());
        assert!(!card.has_parameters());
        assert!(!card.has_quantitative_analysis());
        assert!(!card.has_considerations());
    }

    #[test]
    fn test_empty_list_counts_as_present() {
        let card = ModelCard {
            inputs: Some(Vec::new()),
            ..Default::default()
        };
        assert!(!card.is_empty());
        assert!(card.has_parameters());
    }

    #[test]
    fn test_governance_order_is_custodian_steward_owner() {
        let dataset = Dataset {
            owners: vec![GovernanceContact::new("Org C", "c@example.com")],
            custodians: vec![GovernanceContact::new("Org A", "a@example.com")],
            stewards: vec![GovernanceContact::new("Org B", "b@example.com")],
            ..Default::default()
        };

        let roles: Vec<_> = dataset.governance().map(|(role, _)| role).collect();
        assert_eq!(
            roles,
            vec![
                GovernanceRole::Custodian,
                GovernanceRole::Steward,
                GovernanceRole::Owner
            ]
        );
        assert!(dataset.has_governance());
        assert!(!Dataset::default().has_governance());
    }
}
