//! Connectivity ranking
//!
//! Ranks genes by how many diseases they are associated with (or diseases by
//! how many genes), counting only associations that meet a threshold.

use super::neighbors::filtered_indices;
use crate::graph::{GraphStore, NodeId, NodeKind};
use serde::Serialize;
use std::cmp::Ordering;

/// One entry of a connectivity ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedNode {
    pub id: NodeId,
    pub label: String,
    pub count: usize,
}

/// Top `limit` nodes of `kind` by threshold-filtered degree
///
/// Ordered by count descending, then label descending. A `limit` of zero
/// yields an empty ranking.
pub fn top_connected(
    store: &GraphStore,
    kind: NodeKind,
    threshold: f64,
    limit: usize,
) -> Vec<RankedNode> {
    if limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedNode> = store
        .nodes()
        .enumerate()
        .filter(|(_, node)| node.kind() == kind)
        .map(|(idx, node)| RankedNode {
            id: node.id.clone(),
            label: node.label.clone(),
            count: filtered_indices(store, idx, threshold).count(),
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked.truncate(limit);
    ranked
}

/// Degree centrality: `top_connected` counting every association
pub fn top_by_degree(store: &GraphStore, kind: NodeKind, limit: usize) -> Vec<RankedNode> {
    top_connected(store, kind, f64::NEG_INFINITY, limit)
}

fn compare_ranked(a: &RankedNode, b: &RankedNode) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.label.cmp(&a.label))
}
