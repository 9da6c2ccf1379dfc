use petgraph::algo::has_path_connecting;
use petgraph::stable_graph::StableDiGraph;
use serde_json::{Map, Value};

use crate::error::GraphBuildError;
use crate::nodes::{Invocation, OutputFields};

use super::types::*;

/// Mutable container for one generation graph under construction.
///
/// Node ids are unique; edges connect only existing nodes; an edge that
/// would close a cycle is rejected at insertion, so the graph stays a
/// DAG by construction. Exactly one builder owns the graph while it is
/// being wired; ownership transfers to the caller on completion.
#[derive(Debug)]
pub struct Graph {
    id: String,
    graph: StableDiGraph<GraphNode, GraphEdge>,
    node_index_map: NodeIndexMap,
    metadata: Map<String, Value>,
    metadata_receiver: Option<String>,
}

impl Graph {
    /// Create an empty graph with a prefixed unique instance id.
    pub fn new(id_prefix: &str) -> Self {
        Graph {
            id: format!("{id_prefix}:{}", uuid::Uuid::new_v4()),
            graph: StableDiGraph::new(),
            node_index_map: NodeIndexMap::new(),
            metadata: Map::new(),
            metadata_receiver: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a node. The id must not already be present.
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphBuildError> {
        if self.node_index_map.contains_key(&node.id) {
            return Err(GraphBuildError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.node_index_map.insert(id, idx);
        Ok(())
    }

    /// Add an edge between two named ports. Both endpoints must exist,
    /// the exact edge must not already be present, and the edge must not
    /// close a cycle.
    pub fn add_edge(
        &mut self,
        source: &str,
        source_port: &str,
        target: &str,
        target_port: &str,
    ) -> Result<(), GraphBuildError> {
        let source_idx = *self
            .node_index_map
            .get(source)
            .ok_or_else(|| GraphBuildError::NodeNotFound(source.to_string()))?;
        let target_idx = *self
            .node_index_map
            .get(target)
            .ok_or_else(|| GraphBuildError::NodeNotFound(target.to_string()))?;

        let duplicate = self
            .graph
            .edges_connecting(source_idx, target_idx)
            .any(|e| e.weight().source_port == source_port && e.weight().target_port == target_port);
        if duplicate {
            return Err(GraphBuildError::DuplicateEdge {
                source: source.to_string(),
                source_port: source_port.to_string(),
                target: target.to_string(),
                target_port: target_port.to_string(),
            });
        }

        if source_idx == target_idx || has_path_connecting(&self.graph, target_idx, source_idx, None)
        {
            return Err(GraphBuildError::CycleDetected {
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        self.graph.add_edge(
            source_idx,
            target_idx,
            GraphEdge {
                source: source.to_string(),
                source_port: source_port.to_string(),
                target: target.to_string(),
                target_port: target_port.to_string(),
            },
        );
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), GraphBuildError> {
        let idx = self
            .node_index_map
            .remove(node_id)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))?;
        self.graph.remove_node(idx);
        if self.metadata_receiver.as_deref() == Some(node_id) {
            self.metadata_receiver = None;
        }
        Ok(())
    }

    pub fn has_node(&self, node_id: &str) -> bool {
        self.node_index_map.contains_key(node_id)
    }

    pub fn node(&self, node_id: &str) -> Result<&GraphNode, GraphBuildError> {
        let idx = self
            .node_index_map
            .get(node_id)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))?;
        self.graph
            .node_weight(*idx)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))
    }

    /// Convenience accessor for a node's invocation.
    pub fn invocation(&self, node_id: &str) -> Result<&Invocation, GraphBuildError> {
        self.node(node_id).map(|n| &n.invocation)
    }

    pub(crate) fn invocation_mut(
        &mut self,
        node_id: &str,
    ) -> Result<&mut Invocation, GraphBuildError> {
        let idx = self
            .node_index_map
            .get(node_id)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))?;
        self.graph
            .node_weight_mut(*idx)
            .map(|n| &mut n.invocation)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))
    }

    /// Whitelisted update: apply output-field overrides to an
    /// image-output node.
    pub fn apply_output_fields(
        &mut self,
        node_id: &str,
        fields: &OutputFields,
    ) -> Result<(), GraphBuildError> {
        self.invocation_mut(node_id)?.apply_output_fields(fields)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_index_map.keys().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.graph.edge_weights()
    }

    /// Edges arriving at one node.
    pub fn incoming_edges(&self, node_id: &str) -> Result<Vec<&GraphEdge>, GraphBuildError> {
        let idx = self
            .node_index_map
            .get(node_id)
            .ok_or_else(|| GraphBuildError::NodeNotFound(node_id.to_string()))?;
        Ok(self
            .graph
            .edges_directed(*idx, petgraph::Direction::Incoming)
            .map(|e| e.weight())
            .collect())
    }

    /// Merge entries into the metadata side-channel. Later merges win on
    /// key collisions; keys are never deleted.
    pub fn upsert_metadata(&mut self, entries: Map<String, Value>) {
        for (k, v) in entries {
            self.metadata.insert(k, v);
        }
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Designate the node that receives the accumulated metadata.
    pub fn set_metadata_receiving_node(&mut self, node_id: &str) -> Result<(), GraphBuildError> {
        if !self.has_node(node_id) {
            return Err(GraphBuildError::NodeNotFound(node_id.to_string()));
        }
        self.metadata_receiver = Some(node_id.to_string());
        Ok(())
    }

    pub fn metadata_receiving_node(&self) -> Option<&str> {
        self.metadata_receiver.as_deref()
    }

    pub(crate) fn petgraph(&self) -> &StableDiGraph<GraphNode, GraphEdge> {
        &self.graph
    }
}
