//! Hub subgraph expansion
//!
//! Grows a node set outward from a seed, admitting a neighbor only when its
//! own unfiltered degree exceeds `min_degree`. Only admitted nodes are
//! expanded further, so the result is the seed plus every hub reachable from
//! it through other hubs. Edge scores play no part here.

use crate::graph::{GraphResult, GraphStore, NodeId};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Expand from `seed` through nodes whose degree is `> min_degree`
///
/// The seed is always part of the result regardless of its own degree. The
/// set iterates in admission order, which is depth-first over adjacency
/// order. Traversal uses an explicit stack of adjacency cursors, so large
/// hub clusters cannot exhaust the call stack.
pub fn expand_subgraph(
    store: &GraphStore,
    seed: &NodeId,
    min_degree: usize,
) -> GraphResult<IndexSet<NodeId>> {
    let seed_idx = store.require_index(seed)?;

    let mut visited = FxHashSet::default();
    let mut admitted = vec![seed_idx];
    visited.insert(seed_idx);

    // (node, position of the next adjacency entry to examine)
    let mut stack = vec![(seed_idx, 0usize)];

    while let Some((node, cursor)) = stack.pop() {
        let adjacency = store.adjacency_at(node);
        if cursor == adjacency.len() {
            continue;
        }
        stack.push((node, cursor + 1));

        let (candidate, _) = adjacency[cursor];
        if visited.contains(&candidate) {
            continue;
        }
        if store.adjacency_at(candidate).len() > min_degree {
            visited.insert(candidate);
            admitted.push(candidate);
            stack.push((candidate, 0));
        }
    }

    debug!(
        "Expanded {} with min degree {}: {} nodes",
        seed,
        min_degree,
        admitted.len()
    );

    Ok(admitted
        .into_iter()
        .map(|idx| store.id_at(idx).clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AssociationRecord, DiseaseAttributes, GeneAttributes, Node};

    fn gene(key: &str) -> Node {
        Node::gene(key, key, GeneAttributes::default())
    }

    fn disease(key: &str) -> Node {
        Node::disease(key, key, DiseaseAttributes::default())
    }

    // Chain G1 - D1 - G2 - D2 - G3 - D3, plus leaves hanging off G2
    fn chain() -> GraphStore {
        GraphStore::build(
            vec![
                gene("1"),
                gene("2"),
                gene("3"),
                disease("D1"),
                disease("D2"),
                disease("D3"),
                disease("L1"),
            ],
            vec![
                AssociationRecord::new("1", "D1", 0.1),
                AssociationRecord::new("2", "D1", 0.1),
                AssociationRecord::new("2", "D2", 0.1),
                AssociationRecord::new("3", "D2", 0.1),
                AssociationRecord::new("3", "D3", 0.1),
                AssociationRecord::new("2", "L1", 0.1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_seed_always_included() {
        let store = chain();
        let result = expand_subgraph(&store, &NodeId::disease("D3"), 10).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.contains(&NodeId::disease("D3")));
    }

    #[test]
    fn test_zero_min_degree_reaches_component() {
        let store = chain();
        let result = expand_subgraph(&store, &NodeId::gene("1"), 0).unwrap();
        assert_eq!(result.len(), store.node_count());
    }

    #[test]
    fn test_admission_by_degree() {
        let store = chain();
        // degrees: G1=1, D1=2, G2=3, D2=2, G3=2, D3=1, L1=1
        let result = expand_subgraph(&store, &NodeId::gene("1"), 1).unwrap();
        let ids: Vec<NodeId> = result.into_iter().collect();
        assert_eq!(
            ids,
            vec![
                NodeId::gene("1"),
                NodeId::disease("D1"),
                NodeId::gene("2"),
                NodeId::disease("D2"),
                NodeId::gene("3"),
            ]
        );
    }

    #[test]
    fn test_hub_gate_blocks_expansion() {
        let store = chain();
        // D1 (degree 2) fails "> 2", so nothing beyond the seed is reachable
        let result = expand_subgraph(&store, &NodeId::gene("1"), 2).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_unknown_seed() {
        let store = chain();
        assert!(expand_subgraph(&store, &NodeId::gene("42"), 0).is_err());
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let n = 50_000;
        let mut nodes = Vec::with_capacity(2 * n);
        let mut edges = Vec::with_capacity(2 * n);
        for i in 0..n {
            nodes.push(gene(&i.to_string()));
            nodes.push(disease(&format!("D{}", i)));
        }
        for i in 0..n {
            edges.push(AssociationRecord::new(i.to_string(), format!("D{}", i), 0.5));
            if i + 1 < n {
                edges.push(AssociationRecord::new((i + 1).to_string(), format!("D{}", i), 0.5));
            }
        }
        let store = GraphStore::build(nodes, edges).unwrap();
        let result = expand_subgraph(&store, &NodeId::gene("0"), 0).unwrap();
        assert_eq!(result.len(), 2 * n);
    }
}
