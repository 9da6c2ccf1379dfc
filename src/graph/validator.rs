use crate::error::GraphBuildError;

use super::Graph;

/// Validate a finished graph before handing it off.
///
/// `add_edge` already refuses cycles, so the cycle check here guards
/// against container bugs rather than builder mistakes. The dangling
/// check catches nodes nothing was ever wired to, e.g. a collector a
/// sub-builder forgot to remove.
pub fn validate_graph(graph: &Graph) -> Result<(), GraphBuildError> {
    if petgraph::algo::is_cyclic_directed(graph.petgraph()) {
        return Err(GraphBuildError::GraphValidationError(
            "cycle detected".to_string(),
        ));
    }

    for idx in graph.petgraph().node_indices() {
        if let Some(node) = graph.petgraph().node_weight(idx) {
            let in_degree = graph
                .petgraph()
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .count();
            let out_degree = graph
                .petgraph()
                .neighbors_directed(idx, petgraph::Direction::Outgoing)
                .count();

            if in_degree == 0 && out_degree == 0 {
                return Err(GraphBuildError::GraphValidationError(format!(
                    "dangling node: {}",
                    node.id
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphNode;
    use crate::nodes::{Collect, Invocation};

    #[test]
    fn test_validate_connected_graph() {
        let mut g = Graph::new("t");
        g.add_node(GraphNode::new("a", Invocation::Collect(Collect::default())))
            .unwrap();
        g.add_node(GraphNode::new("b", Invocation::Collect(Collect::default())))
            .unwrap();
        g.add_edge("a", "collection", "b", "item").unwrap();
        assert!(validate_graph(&g).is_ok());
    }

    #[test]
    fn test_detect_dangling_node() {
        let mut g = Graph::new("t");
        g.add_node(GraphNode::new("a", Invocation::Collect(Collect::default())))
            .unwrap();
        g.add_node(GraphNode::new("b", Invocation::Collect(Collect::default())))
            .unwrap();
        g.add_node(GraphNode::new(
            "stray",
            Invocation::Collect(Collect::default()),
        ))
        .unwrap();
        g.add_edge("a", "collection", "b", "item").unwrap();

        match validate_graph(&g) {
            Err(GraphBuildError::GraphValidationError(msg)) => {
                assert!(msg.contains("stray"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
