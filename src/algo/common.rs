//! Shared utilities for the analysis algorithms
//!
//! Provides a read-only, threshold-filtered view of the graph topology.

use crate::graph::{GraphResult, GraphStore, NodeId};
use indexmap::IndexSet;

/// A dense, integer-indexed projection of the graph keeping only associations
/// whose score meets a threshold, in Compressed Sparse Row (CSR) format.
///
/// Dense indices are the store's node indices, so the neighbor order of each
/// row is the store's adjacency order. Building the view once and reusing it
/// memoizes `filtered_neighbors` for every node at that threshold, which is
/// what the similarity scan needs: it looks at the filtered neighborhood of
/// every candidate.
pub struct FilteredView<'a> {
    store: &'a GraphStore,
    /// Minimum score an association needs to appear in the view
    pub threshold: f64,
    /// Offsets into `targets`. Size = node_count + 1
    offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    targets: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Project `store` at `threshold`
    pub fn new(store: &'a GraphStore, threshold: f64) -> Self {
        let node_count = store.node_count();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();

        offsets.push(0);
        for idx in 0..node_count {
            targets.extend(
                store
                    .adjacency_at(idx)
                    .iter()
                    .filter(|&&(_, e)| store.edge_at(e).passes(threshold))
                    .map(|&(n, _)| n),
            );
            offsets.push(targets.len());
        }

        FilteredView {
            store,
            threshold,
            offsets,
            targets,
        }
    }

    /// The store this view projects
    pub fn store(&self) -> &'a GraphStore {
        self.store
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of associations kept in the view
    pub fn edge_count(&self) -> usize {
        // every association appears in two rows
        self.targets.len() / 2
    }

    /// Filtered neighbors of a node by dense index
    pub(crate) fn neighbors_at(&self, idx: usize) -> &[usize] {
        &self.targets[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Filtered degree of a node
    pub fn degree(&self, id: &NodeId) -> GraphResult<usize> {
        let idx = self.store.require_index(id)?;
        Ok(self.neighbors_at(idx).len())
    }

    /// Filtered neighbors of a node, in adjacency order
    pub fn neighbors(&self, id: &NodeId) -> GraphResult<IndexSet<NodeId>> {
        let idx = self.store.require_index(id)?;
        Ok(self
            .neighbors_at(idx)
            .iter()
            .map(|&n| self.store.id_at(n).clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AssociationRecord, DiseaseAttributes, GeneAttributes, Node};

    #[test]
    fn test_filtered_view_projection() {
        let store = GraphStore::build(
            vec![
                Node::gene("1", "G1", GeneAttributes::default()),
                Node::gene("2", "G2", GeneAttributes::default()),
                Node::disease("D1", "D1", DiseaseAttributes::default()),
                Node::disease("D2", "D2", DiseaseAttributes::default()),
            ],
            vec![
                AssociationRecord::new("1", "D1", 0.8),
                AssociationRecord::new("1", "D2", 0.3),
                AssociationRecord::new("2", "D1", 0.9),
            ],
        )
        .unwrap();

        let view = FilteredView::new(&store, 0.5);
        assert_eq!(view.node_count(), 4);
        assert_eq!(view.edge_count(), 2);

        assert_eq!(view.degree(&NodeId::gene("1")).unwrap(), 1);
        assert_eq!(view.degree(&NodeId::disease("D2")).unwrap(), 0);

        let d1: Vec<NodeId> = view.neighbors(&NodeId::disease("D1")).unwrap().into_iter().collect();
        assert_eq!(d1, vec![NodeId::gene("1"), NodeId::gene("2")]);

        let full = FilteredView::new(&store, 0.0);
        assert_eq!(full.edge_count(), store.edge_count());
    }
}
