//! Gene and disease nodes
//!
//! Attributes are typed per side of the graph. A gene cannot carry disease
//! attributes: the constructors tie the attribute bag to the id kind, and
//! `GraphStore::build` rejects hand-assembled nodes where the two disagree.

use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// Auxiliary attributes of a gene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneAttributes {
    /// Disease specificity index
    pub dsi: Option<f64>,
    /// Disease pleiotropy index
    pub dpi: Option<f64>,
    /// Probability of loss-of-function intolerance
    pub pli: Option<f64>,
    pub protein_class_name: Option<String>,
    pub protein_class: Option<String>,
    pub n_diseases: Option<u32>,
    pub n_pmids: Option<u32>,
}

/// Auxiliary attributes of a disease
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiseaseAttributes {
    pub disease_type: Option<String>,
    pub disease_class: Option<String>,
    pub semantic_type: Option<String>,
    pub n_genes: Option<u32>,
    pub n_pmids: Option<u32>,
}

/// Typed attribute bag, discriminated by node kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeAttributes {
    Gene(GeneAttributes),
    Disease(DiseaseAttributes),
}

impl NodeAttributes {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeAttributes::Gene(_) => NodeKind::Gene,
            NodeAttributes::Disease(_) => NodeKind::Disease,
        }
    }
}

/// A node of the association graph
///
/// `label` is the gene symbol for genes and the disease name for diseases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub attributes: NodeAttributes,
}

impl Node {
    /// Create a gene node
    pub fn gene(key: impl Into<String>, symbol: impl Into<String>, attributes: GeneAttributes) -> Self {
        Node {
            id: NodeId::gene(key),
            label: symbol.into(),
            attributes: NodeAttributes::Gene(attributes),
        }
    }

    /// Create a disease node
    pub fn disease(
        key: impl Into<String>,
        name: impl Into<String>,
        attributes: DiseaseAttributes,
    ) -> Self {
        Node {
            id: NodeId::disease(key),
            label: name.into(),
            attributes: NodeAttributes::Disease(attributes),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }

    pub fn is_gene(&self) -> bool {
        self.id.kind == NodeKind::Gene
    }

    pub fn is_disease(&self) -> bool {
        self.id.kind == NodeKind::Disease
    }

    pub fn gene_attributes(&self) -> Option<&GeneAttributes> {
        match &self.attributes {
            NodeAttributes::Gene(attrs) => Some(attrs),
            NodeAttributes::Disease(_) => None,
        }
    }

    pub fn disease_attributes(&self) -> Option<&DiseaseAttributes> {
        match &self.attributes {
            NodeAttributes::Disease(attrs) => Some(attrs),
            NodeAttributes::Gene(_) => None,
        }
    }

    /// True when the attribute bag belongs to the same kind as the id
    pub fn is_consistent(&self) -> bool {
        self.attributes.kind() == self.id.kind
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
