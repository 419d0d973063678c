//! Gene-disease association graph
//!
//! This module implements the bipartite data model:
//! - Gene and disease nodes with typed attribute bags
//! - Undirected, scored associations between one gene and one disease
//! - An immutable in-memory store built once per analysis session

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{AssociationRecord, Edge};
pub use node::{DiseaseAttributes, GeneAttributes, Node, NodeAttributes};
pub use store::{
    BuildError, BuildOptions, BuildResult, GraphError, GraphResult, GraphStatistics, GraphStore,
    ScorePolicy,
};
pub use types::{EdgeId, NodeId, NodeKind};
