//! File round-trips for the plain-text graph format.

use graphkit_core::*;
use std::path::PathBuf;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("graphkit-{}.txt", uuid::Uuid::new_v4()))
}

fn placed_graph() -> Graph {
    let mut g = Graph::new();
    let coords = [(10.0, 20.0), (110.0, 20.0), (60.5, 95.25), (160.0, 95.0)];
    for (i, (x, y)) in coords.into_iter().enumerate() {
        g.add_vertex_with(Vertex::new(vertex_label(i)).with_position(Point::new(x, y)))
            .unwrap();
    }
    g.add_edge_both_ways("A", "B", 3).unwrap();
    g.add_edge_both_ways("B", "C", 7).unwrap();
    g.add_edge("C", "D", 2).unwrap();
    g.add_edge("D", "A", 11).unwrap();
    g
}

// ===========================================================================
// Round-trip
// ===========================================================================

#[test]
fn save_then_load_preserves_matrix_and_positions() {
    let g = placed_graph();
    let path = temp_path();
    g.save(&path).unwrap();
    let back = Graph::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(back.adj_matrix(), g.adj_matrix());
    assert_eq!(back.vertex_names(), g.vertex_names());
    for name in g.vertex_names() {
        assert_eq!(
            back.vertex_by_name(name).unwrap().position(),
            g.vertex_by_name(name).unwrap().position()
        );
    }
}

#[test]
fn reloaded_graph_runs_the_same_algorithms() {
    let g = placed_graph();
    let back = Graph::from_text(&g.to_text()).unwrap();
    let mut ctx = RunContext::new();
    assert_eq!(
        back.dijkstra("A", &mut ctx).unwrap(),
        g.dijkstra("A", &mut ctx).unwrap()
    );
    assert_eq!(
        back.incidence_matrix().len(),
        g.incidence_matrix().len()
    );
    assert_eq!(back.edge_count(), g.edge_count());
}

#[test]
fn saved_file_is_human_readable() {
    let g = placed_graph();
    let path = temp_path();
    g.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "0 3 0 0");
    assert_eq!(lines[4], format::SEPARATOR);
    assert_eq!(lines[7], "60.5;95.25");
    assert_eq!(lines.len(), 9);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn loading_missing_file_is_io_error() {
    let err = Graph::load(temp_path()).unwrap_err();
    assert!(matches!(err, GraphError::Io(_)));
    assert!(err.user_message().is_some());
}

#[test]
fn loading_garbage_is_parse_error() {
    let path = temp_path();
    std::fs::write(&path, "0 1\n1 zero\n").unwrap();
    let err = Graph::load(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, GraphError::Parse { line: 2, .. }));
}
