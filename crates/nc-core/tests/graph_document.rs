//! Integration tests: JSON import/export of the in-memory graph store.

use nc_core::{Color, Graph, GraphError, GraphStore, NodeEdge, NodeId, Offset};
use pretty_assertions::assert_eq;

fn load() -> Graph {
    Graph::import_json(include_str!("fixtures/pipeline.json")).unwrap()
}

#[test]
fn import_keeps_document_order() {
    let graph = load();
    let names: Vec<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Source", "Filter", "Sink"]);
}

#[test]
fn import_reads_optional_color() {
    let graph = load();
    let source = graph.retrieve_node(NodeId::intern("source")).unwrap();
    assert_eq!(source.color, Color::from_hex("#E8F0FE"));
    let filter = graph.retrieve_node(NodeId::intern("filter")).unwrap();
    assert_eq!(filter.color, None);
}

#[test]
fn import_drops_dangling_edges() {
    let graph = load();
    let edges: Vec<NodeEdge> = graph.edges().copied().collect();
    assert_eq!(
        edges,
        vec![
            NodeEdge::new(NodeId::intern("source"), NodeId::intern("filter")),
            NodeEdge::new(NodeId::intern("filter"), NodeId::intern("sink")),
        ]
    );
}

#[test]
fn export_then_import_preserves_graph() {
    let mut graph = load();
    let mut sink = graph.retrieve_node(NodeId::intern("sink")).unwrap().clone();
    sink.set_position(Offset::new(500.0, 120.0));
    graph.update_node(sink);

    let text = graph.export_json().unwrap();
    let reloaded = Graph::import_json(&text).unwrap();

    let before: Vec<_> = graph.nodes().cloned().collect();
    let after: Vec<_> = reloaded.nodes().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(reloaded.edge_count(), 2);
}

#[test]
fn malformed_document_is_an_error() {
    let err = Graph::import_json(r#"{"nodes": [{"id": "x"}]}"#).unwrap_err();
    assert!(matches!(err, GraphError::Json(_)));
    assert!(err.to_string().starts_with("malformed graph document"));
}

#[test]
fn duplicate_ids_are_an_error() {
    let text = r#"{
        "nodes": [
            {"id": "twin", "x": 0, "y": 0, "width": 1, "height": 1, "name": "A"},
            {"id": "twin", "x": 5, "y": 5, "width": 1, "height": 1, "name": "B"}
        ]
    }"#;
    let err = Graph::import_json(text).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateNode(_)));
}

#[test]
fn missing_edges_field_defaults_to_empty() {
    let text =
        r#"{"nodes": [{"id": "solo", "x": 0, "y": 0, "width": 1, "height": 1, "name": "Solo"}]}"#;
    let graph = Graph::import_json(text).unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.edge_count(), 0);
}
