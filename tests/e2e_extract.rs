//! End-to-end tests for instance-union extraction.

use motifclust::{Analyzer, gml};
use pretty_assertions::assert_eq;

const HOST_GML: &str = r#"
graph [
  directed 1
  node [ id 0 ]
  node [ id 1 ]
  node [ id 2 ]
  node [ id 3 ]
  node [ id 4 ]
  node [ id 5 ]
  node [ id 6 ]
  edge [ source 0 target 1 ]
  edge [ source 1 target 2 ]
  edge [ source 0 target 3 ]
  edge [ source 3 target 4 ]
  edge [ source 5 target 6 ]
]
"#;

#[test]
fn test_extraction_round_trips_through_gml() {
    let graph = gml::read(HOST_GML).unwrap();
    let analyzer = Analyzer::vf2();
    let pattern = analyzer.pattern_from_isoclass(3, 4, true).unwrap();

    let extraction = analyzer.extract(&graph, &pattern);
    // The stray edge 5 -> 6 belongs to no instance and is left behind.
    assert_eq!(extraction.graph.node_count(), 5);
    assert_eq!(extraction.graph.edge_count(), 4);

    let mut buf = Vec::new();
    gml::write(&extraction.graph, &mut buf).unwrap();
    let reread = gml::read(std::str::from_utf8(&buf).unwrap()).unwrap();
    assert_eq!(reread, extraction.graph);
}

#[test]
fn test_extraction_map_points_back_at_host_vertices() {
    let graph = gml::read(HOST_GML).unwrap();
    let analyzer = Analyzer::vf2();
    let pattern = analyzer.pattern_from_isoclass(3, 4, true).unwrap();

    let extraction = analyzer.extract(&graph, &pattern);
    assert_eq!(extraction.node_map.len(), extraction.graph.node_count());

    // Every extracted edge exists in the host under the map.
    for (a, b) in extraction.graph.edges() {
        let ha = extraction.node_map[a as usize];
        let hb = extraction.node_map[b as usize];
        assert!(graph.has_edge(ha, hb));
    }

    // The map covers exactly the union of instance vertex sets.
    let mut mapped = extraction.node_map.clone();
    mapped.sort();
    assert_eq!(mapped, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_extraction_of_instance_free_host_is_empty() {
    let source = r#"
        graph [
          directed 1
          node [ id 0 ]
          node [ id 1 ]
          edge [ source 0 target 1 ]
        ]
    "#;
    let graph = gml::read(source).unwrap();
    let analyzer = Analyzer::vf2();
    let pattern = analyzer.pattern_from_isoclass(3, 4, true).unwrap();

    let extraction = analyzer.extract(&graph, &pattern);
    assert_eq!(extraction.graph.node_count(), 0);
    assert_eq!(extraction.graph.edge_count(), 0);
    assert!(extraction.node_map.is_empty());
}
