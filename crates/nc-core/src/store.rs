//! Graph store: the owner of every node and edge.
//!
//! The interaction and render layers only see the [`GraphStore`] trait. They
//! read nodes in store order, relocate them through `update_node`, and never
//! keep copies of their own.

use crate::error::GraphError;
use crate::id::NodeId;
use crate::model::{CanvasNode, NodeEdge};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contract between the canvas core and whatever owns the graph.
///
/// Iteration order of `nodes()` is the paint order and the hit order; a
/// store must keep it stable between mutations.
pub trait GraphStore {
    fn retrieve_node(&self, id: NodeId) -> Option<&CanvasNode>;

    /// Persist a node's new position/attributes. Unknown ids are ignored.
    fn update_node(&mut self, node: CanvasNode);

    /// Remove a node together with every edge that references it.
    fn delete_node(&mut self, id: NodeId);

    fn nodes(&self) -> impl Iterator<Item = &CanvasNode>;

    fn edges(&self) -> impl Iterator<Item = &NodeEdge>;

    fn contains_node(&self, id: NodeId) -> bool {
        self.retrieve_node(id).is_some()
    }
}

/// Serialized form used by [`Graph::import_json`] / [`Graph::export_json`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct GraphDocument {
    nodes: Vec<CanvasNode>,
    #[serde(default)]
    edges: Vec<NodeEdge>,
}

/// In-memory store backed by a stable directed graph.
///
/// `StableDiGraph` keeps indices valid across removals but reuses vacant
/// slots, so insertion order is tracked separately in `node_order` and
/// `edge_order`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    graph: StableDiGraph<CanvasNode, NodeEdge>,
    id_index: HashMap<NodeId, NodeIndex>,
    node_order: Vec<NodeIndex>,
    edge_order: Vec<EdgeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loose parts. Edges whose endpoints are missing are
    /// dropped rather than rejected.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = CanvasNode>,
        edges: impl IntoIterator<Item = NodeEdge>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            if let Err(err) = graph.add_edge(edge.start, edge.end) {
                log::warn!("dropping edge {} -> {}: {err}", edge.start, edge.end);
            }
        }
        Ok(graph)
    }

    pub fn import_json(text: &str) -> Result<Self, GraphError> {
        let doc: GraphDocument = serde_json::from_str(text)?;
        let graph = Self::from_parts(doc.nodes, doc.edges)?;
        log::debug!(
            "imported {} nodes, {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    pub fn export_json(&self) -> Result<String, GraphError> {
        let doc = GraphDocument {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().copied().collect(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Append a node; it paints on top of every existing node.
    pub fn add_node(&mut self, node: CanvasNode) -> Result<(), GraphError> {
        if self.id_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        self.node_order.push(idx);
        Ok(())
    }

    pub fn add_edge(&mut self, start: NodeId, end: NodeId) -> Result<(), GraphError> {
        let from = *self
            .id_index
            .get(&start)
            .ok_or(GraphError::UnknownNode(start))?;
        let to = *self.id_index.get(&end).ok_or(GraphError::UnknownNode(end))?;
        let edge = self.graph.add_edge(from, to, NodeEdge::new(start, end));
        self.edge_order.push(edge);
        Ok(())
    }

    /// Remove the first edge from `start` to `end`. Returns whether one existed.
    pub fn remove_edge(&mut self, start: NodeId, end: NodeId) -> bool {
        let (Some(&from), Some(&to)) = (self.id_index.get(&start), self.id_index.get(&end)) else {
            return false;
        };
        let Some(edge) = self.graph.find_edge(from, to) else {
            return false;
        };
        self.graph.remove_edge(edge);
        self.edge_order.retain(|&e| e != edge);
        true
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.id_index.clear();
        self.node_order.clear();
        self.edge_order.clear();
    }

    pub fn len(&self) -> usize {
        self.node_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_order.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }
}

impl GraphStore for Graph {
    fn retrieve_node(&self, id: NodeId) -> Option<&CanvasNode> {
        self.id_index
            .get(&id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    fn update_node(&mut self, node: CanvasNode) {
        match self
            .id_index
            .get(&node.id)
            .and_then(|&idx| self.graph.node_weight_mut(idx))
        {
            Some(slot) => *slot = node,
            None => log::debug!("update ignored for unknown node {}", node.id),
        }
    }

    fn delete_node(&mut self, id: NodeId) {
        let Some(idx) = self.id_index.remove(&id) else {
            return;
        };
        // Removing the node drops its incident edges from the graph too.
        self.graph.remove_node(idx);
        self.node_order.retain(|&i| i != idx);
        let graph = &self.graph;
        self.edge_order.retain(|&e| graph.edge_weight(e).is_some());
    }

    fn nodes(&self) -> impl Iterator<Item = &CanvasNode> {
        self.node_order
            .iter()
            .filter_map(|&idx| self.graph.node_weight(idx))
    }

    fn edges(&self) -> impl Iterator<Item = &NodeEdge> {
        self.edge_order
            .iter()
            .filter_map(|&e| self.graph.edge_weight(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Offset, Size};
    use pretty_assertions::assert_eq;

    fn ids(g: &Graph) -> Vec<NodeId> {
        g.nodes().map(|n| n.id).collect()
    }

    fn node(id: &str, x: f32, y: f32) -> CanvasNode {
        CanvasNode::new(NodeId::intern(id), Offset::new(x, y), Size::new(20.0, 20.0), id)
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut g = Graph::new();
        for name in ["st_c", "st_a", "st_b"] {
            g.add_node(node(name, 0.0, 0.0)).unwrap();
        }
        let names: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(names, vec!["st_c", "st_a", "st_b"]);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut g = Graph::new();
        g.add_node(node("st_dup", 0.0, 0.0)).unwrap();
        let err = g.add_node(node("st_dup", 5.0, 5.0)).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode(id) if id.as_str() == "st_dup"));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn update_replaces_and_ignores_unknown() {
        let mut g = Graph::new();
        g.add_node(node("st_mv", 0.0, 0.0)).unwrap();

        let mut moved = g.retrieve_node(NodeId::intern("st_mv")).unwrap().clone();
        moved.set_position(Offset::new(40.0, 50.0));
        g.update_node(moved);
        g.update_node(node("st_ghost", 1.0, 1.0));

        let stored = g.retrieve_node(NodeId::intern("st_mv")).unwrap();
        assert_eq!(stored.position(), Offset::new(40.0, 50.0));
        assert!(!g.contains_node(NodeId::intern("st_ghost")));
    }

    #[test]
    fn delete_removes_incident_edges_and_keeps_order() {
        let mut g = Graph::new();
        for name in ["st_1", "st_2", "st_3"] {
            g.add_node(node(name, 0.0, 0.0)).unwrap();
        }
        g.add_edge(NodeId::intern("st_1"), NodeId::intern("st_2")).unwrap();
        g.add_edge(NodeId::intern("st_2"), NodeId::intern("st_3")).unwrap();
        g.add_edge(NodeId::intern("st_1"), NodeId::intern("st_3")).unwrap();

        g.delete_node(NodeId::intern("st_2"));

        assert_eq!(ids(&g), vec![NodeId::intern("st_1"), NodeId::intern("st_3")]);
        let edges: Vec<NodeEdge> = g.edges().copied().collect();
        assert_eq!(
            edges,
            vec![NodeEdge::new(NodeId::intern("st_1"), NodeId::intern("st_3"))]
        );

        // A reused slot appends at the end rather than the vacated position.
        g.add_node(node("st_4", 0.0, 0.0)).unwrap();
        assert_eq!(ids(&g).last(), Some(&NodeId::intern("st_4")));
    }

    #[test]
    fn edge_to_unknown_node_fails() {
        let mut g = Graph::new();
        g.add_node(node("st_lonely", 0.0, 0.0)).unwrap();
        let err = g
            .add_edge(NodeId::intern("st_lonely"), NodeId::intern("st_nowhere"))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(_)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn remove_edge_reports_presence() {
        let mut g = Graph::new();
        g.add_node(node("st_x", 0.0, 0.0)).unwrap();
        g.add_node(node("st_y", 0.0, 0.0)).unwrap();
        g.add_edge(NodeId::intern("st_x"), NodeId::intern("st_y")).unwrap();

        assert!(g.remove_edge(NodeId::intern("st_x"), NodeId::intern("st_y")));
        assert!(!g.remove_edge(NodeId::intern("st_x"), NodeId::intern("st_y")));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn clear_empties_everything() {
        let mut g = Graph::from_parts(
            vec![node("st_p", 0.0, 0.0), node("st_q", 0.0, 0.0)],
            vec![NodeEdge::new(NodeId::intern("st_p"), NodeId::intern("st_q"))],
        )
        .unwrap();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}
