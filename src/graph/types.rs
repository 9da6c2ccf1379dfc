use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::nodes::Invocation;

/// One node of a generation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id, unique within one graph.
    pub id: String,
    /// The typed operation this node performs.
    #[serde(flatten)]
    pub invocation: Invocation,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, invocation: Invocation) -> Self {
        GraphNode {
            id: id.into(),
            invocation,
        }
    }
}

/// Directed edge between two named ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub source_port: String,
    pub target: String,
    pub target_port: String,
}

/// Stable location of a patchable field: node id plus field name.
///
/// Returned for the seed and positive-prompt fields so callers can
/// patch them without re-walking the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLocator {
    pub node_id: String,
    pub field: String,
}

impl FieldLocator {
    pub fn new(node_id: impl Into<String>, field: impl Into<String>) -> Self {
        FieldLocator {
            node_id: node_id.into(),
            field: field.into(),
        }
    }
}

/// Node id to petgraph NodeIndex mapping.
pub type NodeIndexMap = std::collections::HashMap<String, NodeIndex>;
