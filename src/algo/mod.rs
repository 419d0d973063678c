//! Analysis algorithms over an association graph snapshot
//!
//! Every function takes the `GraphStore` explicitly and only reads it, so
//! independent queries on one snapshot can run on separate threads.

pub mod common;
pub mod expand;
pub mod intersection;
pub mod neighbors;
pub mod ranking;
pub mod similarity;

pub use common::FilteredView;
pub use expand::expand_subgraph;
pub use intersection::{common_diseases, common_genes, common_neighbors};
pub use neighbors::{associations, filtered_neighbors, ScoredNeighbor, DEFAULT_THRESHOLD};
pub use ranking::{top_by_degree, top_connected, RankedNode};
pub use similarity::{
    rank_similar, rank_similar_batch, rank_similar_with, SimilarNode, SimilarityOptions, TieBreak,
};
