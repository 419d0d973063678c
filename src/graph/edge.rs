//! Gene-disease associations
//!
//! An association is undirected for traversal: it is stored once and listed
//! in the adjacency of both endpoints.

use super::types::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// Association record as supplied by a loader, before endpoints are resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// Raw gene key
    pub gene: String,
    /// Raw disease key
    pub disease: String,
    pub score: f64,
    pub evidence_index: Option<f64>,
    pub evidence_level: Option<String>,
    pub year_initial: Option<i32>,
    pub year_final: Option<i32>,
    pub source: Option<String>,
}

impl AssociationRecord {
    /// Create a record with only the mandatory fields set
    pub fn new(gene: impl Into<String>, disease: impl Into<String>, score: f64) -> Self {
        AssociationRecord {
            gene: gene.into(),
            disease: disease.into(),
            score,
            evidence_index: None,
            evidence_level: None,
            year_initial: None,
            year_final: None,
            source: None,
        }
    }

    pub fn with_evidence(mut self, index: f64, level: impl Into<String>) -> Self {
        self.evidence_index = Some(index);
        self.evidence_level = Some(level.into());
        self
    }
}

/// A stored association between one gene and one disease
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub gene: NodeId,
    pub disease: NodeId,

    /// Association strength, conventionally in [0.0, 1.0]
    pub score: f64,

    pub evidence_index: Option<f64>,
    pub evidence_level: Option<String>,
    pub year_initial: Option<i32>,
    pub year_final: Option<i32>,
    pub source: Option<String>,
}

impl Edge {
    pub(crate) fn from_record(id: EdgeId, record: AssociationRecord, score: f64) -> Self {
        Edge {
            id,
            gene: NodeId::gene(record.gene),
            disease: NodeId::disease(record.disease),
            score,
            evidence_index: record.evidence_index,
            evidence_level: record.evidence_level,
            year_initial: record.year_initial,
            year_final: record.year_final,
            source: record.source,
        }
    }

    /// Overwrite payload from a later record for the same pair, keeping the id
    pub(crate) fn overwrite(&mut self, record: AssociationRecord, score: f64) {
        self.score = score;
        self.evidence_index = record.evidence_index;
        self.evidence_level = record.evidence_level;
        self.year_initial = record.year_initial;
        self.year_final = record.year_final;
        self.source = record.source;
    }

    /// Check if this edge connects two specific nodes (in either order)
    pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.gene == a && &self.disease == b) || (&self.gene == b && &self.disease == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint at all
    pub fn other(&self, node: &NodeId) -> Option<&NodeId> {
        if &self.gene == node {
            Some(&self.disease)
        } else if &self.disease == node {
            Some(&self.gene)
        } else {
            None
        }
    }

    /// True when the score meets `threshold`
    pub fn passes(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
