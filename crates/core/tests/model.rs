use dgslice_core::model::{
    DependencyGraph, Edge, EdgeKind, WeightError, WeightTable, WeightsConfig,
};

#[test]
fn edge_kind_codes_round_trip_for_known_and_unknown_labels() {
    for code in -2..10 {
        assert_eq!(EdgeKind::from_code(code).code(), code);
    }
    assert_eq!(EdgeKind::from_code(6), EdgeKind::Data);
    assert_eq!(EdgeKind::from_code(1), EdgeKind::Control);
    assert_eq!(EdgeKind::from_code(7), EdgeKind::Other(7));
}

#[test]
fn edge_kind_serializes_as_integer_code() {
    assert_eq!(serde_json::to_string(&EdgeKind::Return).unwrap(), "4");
    let parsed: EdgeKind = serde_json::from_str("42").unwrap();
    assert_eq!(parsed, EdgeKind::Other(42));
}

#[test]
fn reference_table_matches_documented_factors() {
    let table = WeightTable::reference();
    assert_eq!(table.decay(EdgeKind::Data), 1.0);
    assert_eq!(table.decay(EdgeKind::InterAgentData), 0.9);
    assert_eq!(table.decay(EdgeKind::Return), 0.7);
    assert_eq!(table.decay(EdgeKind::ProcedureCall), 0.5);
    assert_eq!(table.decay(EdgeKind::InterAgentMessage), 0.3);
    assert_eq!(table.decay(EdgeKind::Control), 0.1);
    assert_eq!(table.decay(EdgeKind::Other(9)), 0.1);
    assert_eq!(WeightTable::default(), table);
}

#[test]
fn weights_config_default_builds_reference_table() {
    let table = WeightTable::try_from(WeightsConfig::default()).unwrap();
    assert_eq!(table, WeightTable::reference());
}

#[test]
fn weight_table_rejects_factors_outside_unit_interval() {
    let err = WeightTable::new([0.1, 0.3, 0.5, 0.7, 0.9, 1.5], 0.1).unwrap_err();
    assert_eq!(err, WeightError::FactorOutOfRange { kind: "data", factor: 1.5 });

    let err = WeightTable::new([0.1, 0.3, 0.5, 0.7, 0.9, 1.0], 0.0).unwrap_err();
    assert!(err.to_string().contains("default"));

    let config = WeightsConfig { control: -0.2, ..WeightsConfig::default() };
    assert!(WeightTable::try_from(&config).is_err());
}

#[test]
fn custom_default_factor_applies_to_unknown_kinds() {
    let table = WeightTable::new([0.1, 0.3, 0.5, 0.7, 0.9, 1.0], 0.25).unwrap();
    assert_eq!(table.decay(EdgeKind::Other(0)), 0.25);
    assert_eq!(table.default_factor(), 0.25);
}

#[test]
fn backward_adjacency_keeps_insertion_order_per_head() {
    let graph = DependencyGraph::from_parts(
        ["A", "B", "C", "D"],
        [
            Edge::new("B", "A", EdgeKind::Data),
            Edge::new("C", "A", EdgeKind::Control),
            Edge::new("D", "B", EdgeKind::Return),
            Edge::new("D", "A", EdgeKind::ProcedureCall),
        ],
    );

    let deps: Vec<(&str, EdgeKind)> =
        graph.dependencies_of("A").iter().map(|(n, k)| (n.as_str(), *k)).collect();
    assert_eq!(
        deps,
        vec![("B", EdgeKind::Data), ("C", EdgeKind::Control), ("D", EdgeKind::ProcedureCall)]
    );
    assert!(graph.dependencies_of("C").is_empty());
    assert!(graph.dependencies_of("missing").is_empty());
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn duplicate_vertices_are_declared_once() {
    let graph = DependencyGraph::new(["A", "B", "A"]);
    assert_eq!(graph.vertices(), &["A".to_string(), "B".to_string()]);
}

#[test]
fn undeclared_endpoints_are_still_usable_nodes() {
    let graph = DependencyGraph::from_parts(["A"], [Edge::new("X", "A", EdgeKind::Data)]);
    assert!(graph.contains("X"));
    assert!(graph.contains("A"));
    assert!(!graph.contains("Y"));
    assert_eq!(graph.dependencies_of("A").len(), 1);
    assert_eq!(graph.edges(), &[Edge::new("X", "A", EdgeKind::Data)]);
}

#[test]
fn dependency_matrix_indexes_tail_then_head_and_skips_undeclared() {
    let graph = DependencyGraph::from_parts(
        ["A", "B", "C"],
        [
            Edge::new("B", "A", EdgeKind::Data),
            Edge::new("C", "B", EdgeKind::Control),
            Edge::new("C", "B", EdgeKind::Return),
            Edge::new("Z", "A", EdgeKind::Data),
        ],
    );
    let matrix = graph.dependency_matrix();
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix[1][0], Some(EdgeKind::Data));
    // Later edge between the same pair wins.
    assert_eq!(matrix[2][1], Some(EdgeKind::Return));
    assert_eq!(matrix[0][1], None);
    let filled: usize = matrix.iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(filled, 2);
}
