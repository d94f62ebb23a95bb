use std::fs;
use std::path::Path;

use planar_common::io::{GraphFormat, ReadError, read_graph, write_graph};
use planar_common::{Graph, GraphError, InvalidEdgeReason};
use rstest::rstest;

lazy_static::lazy_static! {
    static ref PETERSEN: Graph = Graph::from_edge_labels([
        ("0", "1"), ("1", "2"), ("2", "3"), ("3", "4"), ("4", "0"),
        ("0", "5"), ("1", "6"), ("2", "7"), ("3", "8"), ("4", "9"),
        ("5", "7"), ("7", "9"), ("9", "6"), ("6", "8"), ("8", "5"),
    ])
    .unwrap();
}

#[rstest]
#[case("graph.dot", GraphFormat::Dot)]
#[case("graph.csv", GraphFormat::Csv)]
fn test_write_then_read_file(#[case] name: &str, #[case] format: GraphFormat) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);

    write_graph(&path, &PETERSEN, format).unwrap();
    let loaded = read_graph(&path, GraphFormat::from_path(&path)).unwrap();

    assert_eq!(loaded.graph, *PETERSEN);
    assert_eq!(loaded.graph.vertex_count(), 10);
    assert_eq!(loaded.graph.edge_count(), 15);
}

#[rstest]
#[case("graph { 1 -- 2; 2 -- 3; }", GraphFormat::Dot, false, 3, 2)]
#[case("digraph { 1 -> 2; 2 -> 3; 3 -> 1 }", GraphFormat::Dot, true, 3, 3)]
#[case("graph { 1; 2; 3 -- 4 }", GraphFormat::Dot, false, 4, 1)]
#[case("1,2\n2,1\n", GraphFormat::Csv, false, 2, 1)]
#[case("1,2\n2,3\n", GraphFormat::Csv, true, 3, 2)]
fn test_read_fixture(
    #[case] text: &str,
    #[case] format: GraphFormat,
    #[case] directed: bool,
    #[case] vertices: usize,
    #[case] edges: usize,
) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input");
    fs::write(&path, text).unwrap();

    let loaded = read_graph(&path, format).unwrap();
    assert_eq!(loaded.directed, directed, "directedness of {text:?}");
    assert_eq!(
        loaded.graph.vertex_count(),
        vertices,
        "vertices of {text:?}"
    );
    assert_eq!(loaded.graph.edge_count(), edges, "edges of {text:?}");
}

#[test]
fn test_read_missing_file_reports_not_found() {
    let err = read_graph(Path::new("/no/such/dir/graph.dot"), GraphFormat::Dot).unwrap_err();
    assert!(matches!(err, ReadError::NotFound(_)));
    assert_eq!(err.to_string(), "Cannot find /no/such/dir/graph.dot");
}

#[test]
fn test_read_self_loop_surfaces_invalid_edge() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loop.dot");
    fs::write(&path, "graph { a -- b; b -- b }").unwrap();

    let err = read_graph(&path, GraphFormat::Dot).unwrap_err();
    match err {
        ReadError::Graph(GraphError::InvalidEdge { reason, .. }) => {
            assert_eq!(reason, InvalidEdgeReason::SelfLoop);
        }
        other => panic!("expected InvalidEdge, got {other:?}"),
    }
}

#[test]
fn test_write_dot_preserves_isolated_vertices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("isolated.dot");
    let mut graph = Graph::from_edge_labels([("1", "2")]).unwrap();
    graph.add_vertex("3");

    write_graph(&path, &graph, GraphFormat::Dot).unwrap();
    let loaded = read_graph(&path, GraphFormat::Dot).unwrap();

    let labels: Vec<&str> = loaded.graph.labels().collect();
    assert!(labels.contains(&"3"));
    assert_eq!(loaded.graph.vertex_count(), 3);
}
