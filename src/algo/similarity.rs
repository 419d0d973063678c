//! Similarity ranking by shared associations
//!
//! Two genes are similar when they are associated with the same diseases
//! (and two diseases when they share genes). Similarity is the size of the
//! overlap of the two threshold-filtered neighbor sets.

use super::common::FilteredView;
use crate::graph::{GraphResult, GraphStore, NodeId};
use indexmap::IndexSet;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Order among candidates with the same shared count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Order in which the loader supplied the nodes
    #[default]
    InsertionOrder,
    /// Ascending raw id, numeric when both ids are integers
    IdOrder,
}

/// Options for `rank_similar_with`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityOptions {
    pub tie_break: TieBreak,
    /// Keep candidates that share nothing with the reference
    pub include_unrelated: bool,
}

/// One entry of a similarity ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarNode {
    pub id: NodeId,
    pub label: String,
    pub shared_count: usize,
    /// Shared neighbors, in the reference's adjacency order
    pub shared: IndexSet<NodeId>,
}

/// Rank every other node of the reference's kind by overlap with it
///
/// Returns at most `top_n` entries ordered by descending shared count, ties
/// in node insertion order, candidates with no overlap left out.
pub fn rank_similar(
    store: &GraphStore,
    reference: &NodeId,
    threshold: f64,
    top_n: usize,
) -> GraphResult<Vec<SimilarNode>> {
    rank_similar_with(store, reference, threshold, top_n, &SimilarityOptions::default())
}

/// `rank_similar` with an explicit tie-break and zero-overlap policy
pub fn rank_similar_with(
    store: &GraphStore,
    reference: &NodeId,
    threshold: f64,
    top_n: usize,
    options: &SimilarityOptions,
) -> GraphResult<Vec<SimilarNode>> {
    let reference_idx = store.require_index(reference)?;
    let view = FilteredView::new(store, threshold);
    Ok(rank_in_view(&view, reference_idx, top_n, options))
}

/// Run `rank_similar_with` for many references over one shared projection
///
/// References are ranked in parallel. Output order matches input order and
/// every entry equals the sequential call for that reference. Any unknown
/// reference fails the whole batch before work starts.
pub fn rank_similar_batch(
    store: &GraphStore,
    references: &[NodeId],
    threshold: f64,
    top_n: usize,
    options: &SimilarityOptions,
) -> GraphResult<Vec<Vec<SimilarNode>>> {
    let indices = references
        .iter()
        .map(|id| store.require_index(id))
        .collect::<GraphResult<Vec<usize>>>()?;

    let view = FilteredView::new(store, threshold);
    Ok(indices
        .par_iter()
        .map(|&idx| rank_in_view(&view, idx, top_n, options))
        .collect())
}

fn rank_in_view(
    view: &FilteredView<'_>,
    reference: usize,
    top_n: usize,
    options: &SimilarityOptions,
) -> Vec<SimilarNode> {
    let store = view.store();
    let kind = store.node_at(reference).kind();

    // Two hops through the filtered view: every candidate reached from a
    // reference neighbor shares that neighbor. The graph is bipartite, so
    // candidates are always of the reference's kind.
    let mut shared: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for &via in view.neighbors_at(reference) {
        for &candidate in view.neighbors_at(via) {
            if candidate != reference {
                shared.entry(candidate).or_default().push(via);
            }
        }
    }

    let mut candidates: Vec<usize> = if options.include_unrelated {
        (0..view.node_count())
            .filter(|&idx| idx != reference && store.node_at(idx).kind() == kind)
            .collect()
    } else {
        let mut related: Vec<usize> = shared.keys().copied().collect();
        related.sort_unstable();
        related
    };

    if options.tie_break == TieBreak::IdOrder {
        candidates.sort_by(|&a, &b| store.id_at(a).cmp_key(store.id_at(b)));
    }

    let count = |idx: &usize| shared.get(idx).map_or(0, Vec::len);
    // stable: equal counts keep the tie-break order established above
    candidates.sort_by(|a, b| count(b).cmp(&count(a)));
    candidates.truncate(top_n);

    debug!(
        "Ranked {} similar nodes for {} at threshold {}",
        candidates.len(),
        store.id_at(reference),
        view.threshold
    );

    candidates
        .into_iter()
        .map(|idx| {
            let node = store.node_at(idx);
            let shared_ids: IndexSet<NodeId> = shared
                .get(&idx)
                .map(|via| via.iter().map(|&n| store.id_at(n).clone()).collect())
                .unwrap_or_default();
            SimilarNode {
                id: node.id.clone(),
                label: node.label.clone(),
                shared_count: shared_ids.len(),
                shared: shared_ids,
            }
        })
        .collect()
}
