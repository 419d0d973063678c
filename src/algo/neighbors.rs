//! Threshold-filtered neighbor queries
//!
//! `filtered_neighbors` is the primitive every weight-aware query builds on:
//! pair intersection, similarity ranking and connectivity ranking all ask
//! for "the neighbors reachable through an association scoring at least t".

use crate::graph::{GraphResult, GraphStore, NodeId};
use indexmap::IndexSet;
use serde::Serialize;

/// Threshold that admits every association with a non-negative score
pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// A neighbor together with the association that reaches it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredNeighbor {
    pub id: NodeId,
    pub label: String,
    pub score: f64,
    pub evidence_index: Option<f64>,
    pub evidence_level: Option<String>,
}

/// Dense indices of the neighbors of `idx` whose association meets `threshold`
pub(crate) fn filtered_indices(
    store: &GraphStore,
    idx: usize,
    threshold: f64,
) -> impl Iterator<Item = usize> + '_ {
    store
        .adjacency_at(idx)
        .iter()
        .filter(move |&&(_, e)| store.edge_at(e).passes(threshold))
        .map(|&(n, _)| n)
}

/// Neighbors of `id` whose association score is `>= threshold`
///
/// The set iterates in adjacency order. For `t1 <= t2` the result at `t2`
/// is a subset of the result at `t1`.
pub fn filtered_neighbors(
    store: &GraphStore,
    id: &NodeId,
    threshold: f64,
) -> GraphResult<IndexSet<NodeId>> {
    let idx = store.require_index(id)?;
    Ok(filtered_indices(store, idx, threshold)
        .map(|n| store.id_at(n).clone())
        .collect())
}

/// Filtered neighbors with their association scores, highest score first
///
/// Equal scores keep adjacency order.
pub fn associations(
    store: &GraphStore,
    id: &NodeId,
    threshold: f64,
) -> GraphResult<Vec<ScoredNeighbor>> {
    let idx = store.require_index(id)?;
    let mut result: Vec<ScoredNeighbor> = store
        .adjacency_at(idx)
        .iter()
        .map(|&(n, e)| (store.node_at(n), store.edge_at(e)))
        .filter(|(_, edge)| edge.passes(threshold))
        .map(|(node, edge)| ScoredNeighbor {
            id: node.id.clone(),
            label: node.label.clone(),
            score: edge.score,
            evidence_index: edge.evidence_index,
            evidence_level: edge.evidence_level.clone(),
        })
        .collect();

    result.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AssociationRecord, DiseaseAttributes, GeneAttributes, Node};

    fn store() -> GraphStore {
        GraphStore::build(
            vec![
                Node::gene("1", "G1", GeneAttributes::default()),
                Node::disease("D1", "Asthma", DiseaseAttributes::default()),
                Node::disease("D2", "Gout", DiseaseAttributes::default()),
                Node::disease("D3", "Lupus", DiseaseAttributes::default()),
            ],
            vec![
                AssociationRecord::new("1", "D1", 0.3),
                AssociationRecord::new("1", "D2", 0.8),
                AssociationRecord::new("1", "D3", 0.5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_filtered_neighbors() {
        let store = store();
        let g1 = NodeId::gene("1");

        let all = filtered_neighbors(&store, &g1, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(all.len(), 3);

        let strong: Vec<NodeId> = filtered_neighbors(&store, &g1, 0.5).unwrap().into_iter().collect();
        assert_eq!(strong, vec![NodeId::disease("D2"), NodeId::disease("D3")]);

        assert!(filtered_neighbors(&store, &g1, 0.9).unwrap().is_empty());
    }

    #[test]
    fn test_filtered_neighbors_unknown_node() {
        let store = store();
        assert!(filtered_neighbors(&store, &NodeId::gene("2"), 0.0).is_err());
    }

    #[test]
    fn test_associations_sorted_by_score() {
        let store = store();
        let rows = associations(&store, &NodeId::gene("1"), 0.4).unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Gout", "Lupus"]);
        assert_eq!(rows[0].score, 0.8);
    }
}
