//! In-memory association graph storage
//!
//! A `GraphStore` is built once from node and association batches and is
//! read-only afterwards. Nodes live in an insertion-ordered map so that the
//! order the loader supplied them in is observable (similarity ranking uses
//! it as a tie-break). Adjacency is kept per dense node index, in the order
//! associations were inserted.

use super::edge::{AssociationRecord, Edge};
use super::node::Node;
use super::types::{EdgeId, NodeId, NodeKind};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by lookups against a built graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that abort a `GraphStore::build` call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Invalid association: gene endpoint {0} does not exist")]
    UnknownGene(NodeId),

    #[error("Invalid association: disease endpoint {0} does not exist")]
    UnknownDisease(NodeId),

    #[error("Association {gene} - {disease} has non-finite score {score}")]
    NonFiniteScore {
        gene: NodeId,
        disease: NodeId,
        score: f64,
    },

    #[error("Association {gene} - {disease} has score {score} outside [0, 1]")]
    ScoreOutOfRange {
        gene: NodeId,
        disease: NodeId,
        score: f64,
    },

    #[error("Node {0} carries attributes of the other node kind")]
    AttributeKindMismatch(NodeId),
}

pub type BuildResult<T> = Result<T, BuildError>;

/// What `build` does with a finite score outside [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Keep the score as supplied and log a warning
    #[default]
    PassThrough,
    /// Clamp into [0.0, 1.0]
    Clamp,
    /// Fail the build with `BuildError::ScoreOutOfRange`
    Reject,
}

/// Options for `GraphStore::build_with`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildOptions {
    pub score_policy: ScorePolicy,
}

/// Node and association counts of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub genes: usize,
    pub diseases: usize,
    pub associations: usize,
}

/// Immutable in-memory gene-disease graph
///
/// - nodes: NodeId -> Node, in insertion order (dense index = position)
/// - edges: dense association storage, EdgeId = position
/// - adjacency: node index -> [(neighbor index, edge index)] in insertion order
/// - pair_index: (gene index, disease index) -> edge index
/// - label_index: (kind, label) -> first node index carrying that label
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    endpoints: Vec<(usize, usize)>,
    adjacency: Vec<Vec<(usize, usize)>>,
    pair_index: FxHashMap<(usize, usize), usize>,
    label_index: FxHashMap<(NodeKind, String), usize>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from node and association batches with default options
    pub fn build<N, E>(nodes: N, edges: E) -> BuildResult<Self>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = AssociationRecord>,
    {
        Self::build_with(nodes, edges, &BuildOptions::default())
    }

    /// Build a graph: all nodes first, then all associations
    ///
    /// Fails without producing a graph if an association names a node that
    /// is not in `nodes`. A repeated node id replaces the earlier node but
    /// keeps its position; a repeated gene-disease pair overwrites the
    /// earlier association's payload in place.
    pub fn build_with<N, E>(nodes: N, edges: E, options: &BuildOptions) -> BuildResult<Self>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = AssociationRecord>,
    {
        let mut node_map: IndexMap<NodeId, Node> = IndexMap::new();
        for node in nodes {
            if !node.is_consistent() {
                return Err(BuildError::AttributeKindMismatch(node.id));
            }
            let id = node.id.clone();
            if node_map.insert(id, node).is_some() {
                debug!("Duplicate node replaced in build batch");
            }
        }

        let mut store = GraphStore {
            adjacency: vec![Vec::new(); node_map.len()],
            nodes: node_map,
            ..Default::default()
        };

        let mut out_of_range = 0usize;
        let mut overwritten = 0usize;

        for record in edges {
            let gene_id = NodeId::gene(record.gene.as_str());
            let disease_id = NodeId::disease(record.disease.as_str());

            let g = store
                .nodes
                .get_index_of(&gene_id)
                .ok_or_else(|| BuildError::UnknownGene(gene_id.clone()))?;
            let d = store
                .nodes
                .get_index_of(&disease_id)
                .ok_or_else(|| BuildError::UnknownDisease(disease_id.clone()))?;

            let score = record.score;
            if !score.is_finite() {
                return Err(BuildError::NonFiniteScore {
                    gene: gene_id,
                    disease: disease_id,
                    score,
                });
            }
            let score = if (0.0..=1.0).contains(&score) {
                score
            } else {
                match options.score_policy {
                    ScorePolicy::PassThrough => {
                        out_of_range += 1;
                        score
                    }
                    ScorePolicy::Clamp => score.clamp(0.0, 1.0),
                    ScorePolicy::Reject => {
                        return Err(BuildError::ScoreOutOfRange {
                            gene: gene_id,
                            disease: disease_id,
                            score,
                        });
                    }
                }
            };

            if let Some(&e) = store.pair_index.get(&(g, d)) {
                debug!("Association {} - {} re-inserted, keeping the later record", gene_id, disease_id);
                store.edges[e].overwrite(record, score);
                overwritten += 1;
                continue;
            }

            let e = store.edges.len();
            store
                .edges
                .push(Edge::from_record(EdgeId::new(e as u64), record, score));
            store.endpoints.push((g, d));
            store.adjacency[g].push((d, e));
            store.adjacency[d].push((g, e));
            store.pair_index.insert((g, d), e);
        }

        for (idx, node) in store.nodes.values().enumerate() {
            store
                .label_index
                .entry((node.kind(), node.label.clone()))
                .or_insert(idx);
        }

        if out_of_range > 0 {
            warn!("{} association scores fall outside [0, 1] and were kept as supplied", out_of_range);
        }

        let stats = store.statistics();
        info!(
            "Built association graph: {} genes, {} diseases, {} associations ({} overwritten)",
            stats.genes, stats.diseases, stats.associations, overwritten
        );

        Ok(store)
    }

    /// Get a node by id
    pub fn node(&self, id: &NodeId) -> GraphResult<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    /// Get a node by id, if present
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if a node exists
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Full unfiltered adjacency of a node, in association insertion order
    pub fn neighbors(&self, id: &NodeId) -> GraphResult<Vec<(&NodeId, &Edge)>> {
        let idx = self.require_index(id)?;
        Ok(self.adjacency[idx]
            .iter()
            .map(|&(n, e)| (self.id_at(n), &self.edges[e]))
            .collect())
    }

    /// Number of unfiltered neighbors
    pub fn degree(&self, id: &NodeId) -> GraphResult<usize> {
        let idx = self.require_index(id)?;
        Ok(self.adjacency[idx].len())
    }

    /// The association between a gene and a disease (either argument order)
    pub fn edge(&self, a: &NodeId, b: &NodeId) -> Option<&Edge> {
        let (gene, disease) = match a.kind {
            NodeKind::Gene => (a, b),
            NodeKind::Disease => (b, a),
        };
        let g = self.index_of(gene)?;
        let d = self.index_of(disease)?;
        self.pair_index.get(&(g, d)).map(|&e| &self.edges[e])
    }

    /// Look a node up by raw id first, then by display label
    pub fn resolve(&self, kind: NodeKind, query: &str) -> GraphResult<&Node> {
        let id = NodeId::new(kind, query);
        if let Some(node) = self.nodes.get(&id) {
            return Ok(node);
        }
        self.find_by_label(kind, query)
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// First node of `kind` whose label equals `label`
    pub fn find_by_label(&self, kind: NodeKind, label: &str) -> Option<&Node> {
        self.label_index
            .get(&(kind, label.to_string()))
            .map(|&idx| self.node_at(idx))
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes of one kind in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// All associations in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Associations with both endpoints inside `ids`, in insertion order
    pub fn induced_edges<'a, I>(&self, ids: I) -> Vec<&Edge>
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let members: FxHashSet<usize> = ids
            .into_iter()
            .filter_map(|id| self.index_of(id))
            .collect();
        self.endpoints
            .iter()
            .enumerate()
            .filter(|(_, (g, d))| members.contains(g) && members.contains(d))
            .map(|(e, _)| &self.edges[e])
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn statistics(&self) -> GraphStatistics {
        let genes = self.nodes_of_kind(NodeKind::Gene).count();
        GraphStatistics {
            genes,
            diseases: self.nodes.len() - genes,
            associations: self.edges.len(),
        }
    }

    // Dense-index access for the algorithm modules. Indices handed out by
    // `index_of` stay valid for the lifetime of the store.

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub(crate) fn require_index(&self, id: &NodeId) -> GraphResult<usize> {
        self.index_of(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn id_at(&self, idx: usize) -> &NodeId {
        &self.nodes[idx].id
    }

    pub(crate) fn adjacency_at(&self, idx: usize) -> &[(usize, usize)] {
        &self.adjacency[idx]
    }

    pub(crate) fn edge_at(&self, e: usize) -> &Edge {
        &self.edges[e]
    }
}
