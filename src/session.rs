//! Analysis session: the current graph snapshot and its replacement
//!
//! Queries hold an `Arc<GraphStore>` handed out by `snapshot()`. A reload
//! builds the new store without holding the lock and swaps the `Arc` only
//! when the build succeeded, so a failed reload leaves the previous snapshot
//! in place and in-flight queries never observe a partially built graph.

use crate::graph::{AssociationRecord, BuildOptions, BuildResult, GraphStore, Node};
use std::sync::{Arc, RwLock};
use tracing::info;

pub struct AnalysisSession {
    /// (generation, snapshot)
    current: RwLock<(u64, Arc<GraphStore>)>,
    options: BuildOptions,
}

impl AnalysisSession {
    /// Start a session with an empty graph
    pub fn new(options: BuildOptions) -> Self {
        Self::with_store(GraphStore::new(), options)
    }

    /// Start a session from an already built store
    pub fn with_store(store: GraphStore, options: BuildOptions) -> Self {
        AnalysisSession {
            current: RwLock::new((0, Arc::new(store))),
            options,
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<GraphStore> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard.1)
    }

    /// Number of successful reloads so far
    pub fn generation(&self) -> u64 {
        self.current.read().unwrap_or_else(|e| e.into_inner()).0
    }

    /// Build a new snapshot and make it current
    ///
    /// On error the current snapshot is left untouched.
    pub fn reload<N, E>(&self, nodes: N, edges: E) -> BuildResult<Arc<GraphStore>>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = AssociationRecord>,
    {
        let store = Arc::new(GraphStore::build_with(nodes, edges, &self.options)?);

        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        current.0 += 1;
        current.1 = Arc::clone(&store);
        info!("Swapped in graph snapshot generation {}", current.0);

        Ok(store)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BuildError, DiseaseAttributes, GeneAttributes, NodeId};

    fn nodes() -> Vec<Node> {
        vec![
            Node::gene("1", "G1", GeneAttributes::default()),
            Node::disease("D1", "D1", DiseaseAttributes::default()),
        ]
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let session = AnalysisSession::default();
        assert!(session.snapshot().is_empty());

        let before = session.snapshot();
        session
            .reload(nodes(), vec![AssociationRecord::new("1", "D1", 0.5)])
            .unwrap();

        assert_eq!(session.snapshot().edge_count(), 1);
        assert_eq!(session.generation(), 1);
        // Earlier handles still see their own snapshot
        assert!(before.is_empty());
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let session = AnalysisSession::default();
        session
            .reload(nodes(), vec![AssociationRecord::new("1", "D1", 0.5)])
            .unwrap();

        let err = session
            .reload(nodes(), vec![AssociationRecord::new("2", "D1", 0.5)])
            .unwrap_err();
        assert_eq!(err, BuildError::UnknownGene(NodeId::gene("2")));

        let current = session.snapshot();
        assert_eq!(current.edge_count(), 1);
        assert!(current.contains(&NodeId::gene("1")));
        assert_eq!(session.generation(), 1);
    }

    #[test]
    fn test_snapshots_shared_across_threads() {
        let session = Arc::new(AnalysisSession::default());
        session
            .reload(nodes(), vec![AssociationRecord::new("1", "D1", 0.5)])
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || session.snapshot().degree(&NodeId::gene("1")).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
