//! Core type definitions for the association graph

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The two sides of the bipartite graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum NodeKind {
    Gene,
    Disease,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Gene => "Gene",
            NodeKind::Disease => "Disease",
        }
    }

    /// The kind on the other side of every association
    pub fn opposite(&self) -> NodeKind {
        match self {
            NodeKind::Gene => NodeKind::Disease,
            NodeKind::Disease => NodeKind::Gene,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gene" | "genes" => Ok(NodeKind::Gene),
            "disease" | "diseases" => Ok(NodeKind::Disease),
            other => Err(format!("unknown node kind '{}'", other)),
        }
    }
}

/// Identifier of a node
///
/// Raw keys are only unique within one kind: gene `1` and disease `1` are
/// different nodes, so the kind is part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    pub kind: NodeKind,
    pub key: String,
}

impl NodeId {
    pub fn new(kind: NodeKind, key: impl Into<String>) -> Self {
        NodeId {
            kind,
            key: key.into(),
        }
    }

    pub fn gene(key: impl Into<String>) -> Self {
        NodeId::new(NodeKind::Gene, key)
    }

    pub fn disease(key: impl Into<String>) -> Self {
        NodeId::new(NodeKind::Disease, key)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Order two keys numerically when both parse as integers, lexically otherwise.
    ///
    /// DisGeNET gene ids are integers and disease ids are CUIs (`C0002395`),
    /// so plain string order would put gene `10` before gene `9`.
    pub fn cmp_key(&self, other: &NodeId) -> Ordering {
        match (self.key.parse::<u64>(), other.key.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => self.key.cmp(&other.key),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.key)
    }
}

/// Identifier of an association, assigned densely at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::gene("6142");
        assert_eq!(id.kind, NodeKind::Gene);
        assert_eq!(id.as_str(), "6142");
        assert_eq!(format!("{}", id), "Gene(6142)");
    }

    #[test]
    fn test_kind_disambiguates_colliding_keys() {
        let gene = NodeId::gene("1");
        let disease = NodeId::disease("1");
        assert_ne!(gene, disease);
    }

    #[test]
    fn test_edge_id() {
        let id = EdgeId::new(99);
        assert_eq!(id.as_u64(), 99);
        assert_eq!(format!("{}", id), "EdgeId(99)");
    }

    #[test]
    fn test_node_kind_parse() {
        assert_eq!("gene".parse::<NodeKind>(), Ok(NodeKind::Gene));
        assert_eq!("Disease".parse::<NodeKind>(), Ok(NodeKind::Disease));
        assert!("protein".parse::<NodeKind>().is_err());
        assert_eq!(NodeKind::Gene.opposite(), NodeKind::Disease);
    }

    #[test]
    fn test_key_ordering() {
        assert_eq!(NodeId::gene("9").cmp_key(&NodeId::gene("10")), Ordering::Less);
        assert_eq!(
            NodeId::disease("C0002395").cmp_key(&NodeId::disease("C0001973")),
            Ordering::Greater
        );
    }
}
