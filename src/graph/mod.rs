//! Mutable generation-graph container and validation.

#[allow(clippy::module_inception)]
mod graph;
mod types;
mod validator;

pub use graph::Graph;
pub use types::{FieldLocator, GraphEdge, GraphNode, NodeIndexMap};
pub use validator::validate_graph;
