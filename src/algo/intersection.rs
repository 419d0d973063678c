//! Common neighbors of two nodes
//!
//! The same computation answers "which diseases do these two genes share"
//! and "which genes do these two diseases share".

use super::neighbors::filtered_indices;
use crate::graph::{GraphResult, GraphStore, NodeId};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// `filtered_neighbors(a, threshold_a) ∩ filtered_neighbors(b, threshold_b)`
///
/// Iterates in `a`'s adjacency order. The kinds of `a` and `b` are not
/// checked against each other; two nodes of different kinds simply share no
/// neighbors. No overlap yields an empty set.
pub fn common_neighbors(
    store: &GraphStore,
    a: &NodeId,
    b: &NodeId,
    threshold_a: f64,
    threshold_b: f64,
) -> GraphResult<IndexSet<NodeId>> {
    let a_idx = store.require_index(a)?;
    let b_idx = store.require_index(b)?;

    let b_neighbors: FxHashSet<usize> = filtered_indices(store, b_idx, threshold_b).collect();

    Ok(filtered_indices(store, a_idx, threshold_a)
        .filter(|n| b_neighbors.contains(n))
        .map(|n| store.id_at(n).clone())
        .collect())
}

/// Diseases associated with both genes at `threshold`
pub fn common_diseases(
    store: &GraphStore,
    gene_a: &str,
    gene_b: &str,
    threshold: f64,
) -> GraphResult<IndexSet<NodeId>> {
    common_neighbors(
        store,
        &NodeId::gene(gene_a),
        &NodeId::gene(gene_b),
        threshold,
        threshold,
    )
}

/// Genes associated with both diseases at `threshold`
pub fn common_genes(
    store: &GraphStore,
    disease_a: &str,
    disease_b: &str,
    threshold: f64,
) -> GraphResult<IndexSet<NodeId>> {
    common_neighbors(
        store,
        &NodeId::disease(disease_a),
        &NodeId::disease(disease_b),
        threshold,
        threshold,
    )
}
