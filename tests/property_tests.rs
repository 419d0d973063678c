//! Property tests for filtering, expansion and ranking invariants

use gadgraph::algo::{
    common_neighbors, expand_subgraph, filtered_neighbors, rank_similar, rank_similar_batch,
    top_connected, FilteredView, SimilarityOptions,
};
use gadgraph::graph::{
    AssociationRecord, DiseaseAttributes, GeneAttributes, GraphStore, Node, NodeId, NodeKind,
};
use proptest::prelude::*;
use std::collections::HashSet;

const MAX_GENES: usize = 8;
const MAX_DISEASES: usize = 6;

/// Gene and disease indices with a score in [0, 1]
fn associations() -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..MAX_GENES, 0..MAX_DISEASES, 0f64..=1.0), 0..40)
}

fn build(edges: &[(usize, usize, f64)]) -> GraphStore {
    let genes = (0..MAX_GENES).map(|g| {
        // Shared labels exercise the label tie-break
        Node::gene(g.to_string(), format!("GENE{}", g % 3), GeneAttributes::default())
    });
    let diseases = (0..MAX_DISEASES)
        .map(|d| Node::disease(format!("C{}", d), format!("D{}", d), DiseaseAttributes::default()));
    let records = edges
        .iter()
        .map(|&(g, d, score)| AssociationRecord::new(g.to_string(), format!("C{}", d), score));
    GraphStore::build(genes.chain(diseases), records).unwrap()
}

fn all_ids(store: &GraphStore) -> Vec<NodeId> {
    store.nodes().map(|n| n.id.clone()).collect()
}

proptest! {
    #[test]
    fn filtering_is_monotone(edges in associations(), t1 in 0f64..=1.0, t2 in 0f64..=1.0) {
        let store = build(&edges);
        let (low, high) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        for id in all_ids(&store) {
            let wide = filtered_neighbors(&store, &id, low).unwrap();
            let narrow = filtered_neighbors(&store, &id, high).unwrap();
            prop_assert!(narrow.is_subset(&wide));
        }
    }

    #[test]
    fn zero_threshold_matches_degree(edges in associations()) {
        let store = build(&edges);
        let view = FilteredView::new(&store, 0.0);
        for id in all_ids(&store) {
            let degree = store.degree(&id).unwrap();
            prop_assert_eq!(filtered_neighbors(&store, &id, 0.0).unwrap().len(), degree);
            prop_assert_eq!(view.degree(&id).unwrap(), degree);
        }
    }

    #[test]
    fn expansion_contains_seed(edges in associations(), min_degree in 0usize..6) {
        let store = build(&edges);
        for id in all_ids(&store) {
            let hubs = expand_subgraph(&store, &id, min_degree).unwrap();
            prop_assert_eq!(hubs.get_index(0), Some(&id));
            for member in hubs.iter().skip(1) {
                prop_assert!(store.degree(member).unwrap() > min_degree);
            }
        }
    }

    #[test]
    fn common_neighbors_symmetric(edges in associations(), t in 0f64..=1.0) {
        let store = build(&edges);
        let genes: Vec<NodeId> = store.nodes_of_kind(NodeKind::Gene).map(|n| n.id.clone()).collect();
        for a in &genes {
            for b in &genes {
                let ab: HashSet<NodeId> = common_neighbors(&store, a, b, t, t).unwrap().into_iter().collect();
                let ba: HashSet<NodeId> = common_neighbors(&store, b, a, t, t).unwrap().into_iter().collect();
                prop_assert_eq!(ab, ba);
            }
        }
    }

    #[test]
    fn rankings_are_repeatable(edges in associations(), t in 0f64..=1.0, n in 0usize..10) {
        let store = build(&edges);
        prop_assert_eq!(
            top_connected(&store, NodeKind::Gene, t, n),
            top_connected(&store, NodeKind::Gene, t, n)
        );
        let reference = NodeId::gene("0");
        prop_assert_eq!(
            rank_similar(&store, &reference, t, n).unwrap(),
            rank_similar(&store, &reference, t, n).unwrap()
        );
    }

    #[test]
    fn similarity_counts_match_intersection(edges in associations(), t in 0f64..=1.0) {
        let store = build(&edges);
        let reference = NodeId::gene("0");
        for similar in rank_similar(&store, &reference, t, MAX_GENES).unwrap() {
            let shared = common_neighbors(&store, &reference, &similar.id, t, t).unwrap();
            prop_assert_eq!(similar.shared_count, shared.len());
            prop_assert!(similar.shared_count > 0);
            prop_assert_ne!(&similar.id, &reference);
        }
    }

    #[test]
    fn batch_matches_sequential(edges in associations(), t in 0f64..=1.0) {
        let store = build(&edges);
        let references = all_ids(&store);
        let options = SimilarityOptions::default();
        let batch = rank_similar_batch(&store, &references, t, 4, &options).unwrap();
        for (reference, ranked) in references.iter().zip(batch) {
            prop_assert_eq!(ranked, rank_similar(&store, reference, t, 4).unwrap());
        }
    }
}
