//! GADGraph: gene-disease association graph analysis
//!
//! An in-memory bipartite graph of genes and diseases joined by scored
//! associations, with read-only analysis queries over an immutable snapshot.
//!
//! # Components
//!
//! - `graph`: node and association model, the immutable `GraphStore`
//! - `algo`: threshold-filtered neighbors, common neighbors, subgraph
//!   expansion, similarity and connectivity ranking
//! - `loader`: DisGeNET-style CSV/TSV ingestion
//! - `config`: analysis defaults loaded from YAML
//! - `session`: snapshot handout and atomic reload
//!
//! ## Example Usage
//!
//! ```rust
//! use gadgraph::algo::{filtered_neighbors, rank_similar};
//! use gadgraph::graph::{AssociationRecord, DiseaseAttributes, GeneAttributes, GraphStore, Node, NodeId};
//!
//! let store = GraphStore::build(
//!     vec![
//!         Node::gene("1", "BRCA1", GeneAttributes::default()),
//!         Node::gene("2", "TP53", GeneAttributes::default()),
//!         Node::disease("D1", "Breast Carcinoma", DiseaseAttributes::default()),
//!     ],
//!     vec![
//!         AssociationRecord::new("1", "D1", 0.9),
//!         AssociationRecord::new("2", "D1", 0.7),
//!     ],
//! )
//! .unwrap();
//!
//! let diseases = filtered_neighbors(&store, &NodeId::gene("1"), 0.5).unwrap();
//! assert_eq!(diseases.len(), 1);
//!
//! let similar = rank_similar(&store, &NodeId::gene("1"), 0.5, 5).unwrap();
//! assert_eq!(similar[0].label, "TP53");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod loader;
pub mod session;

// Re-export main types for convenience
pub use graph::{
    AssociationRecord, BuildError, BuildOptions, BuildResult, DiseaseAttributes, Edge, EdgeId,
    GeneAttributes, GraphError, GraphResult, GraphStatistics, GraphStore, Node, NodeAttributes,
    NodeId, NodeKind, ScorePolicy,
};

pub use algo::{
    associations, common_diseases, common_genes, common_neighbors, expand_subgraph,
    filtered_neighbors, rank_similar, rank_similar_batch, rank_similar_with, top_by_degree,
    top_connected, FilteredView, RankedNode, ScoredNeighbor, SimilarNode, SimilarityOptions,
    TieBreak, DEFAULT_THRESHOLD,
};

pub use config::{AnalysisConfig, ConfigError, ConfigResult};

pub use loader::{
    load_graph, load_graph_with, read_associations, read_diseases, read_genes, LoadError,
    LoadResult,
};

pub use session::AnalysisSession;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, env!("CARGO_PKG_VERSION"));
    }
}
