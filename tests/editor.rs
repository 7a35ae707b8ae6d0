//! Tests for graph events and the edit session.
mod common;
use common::*;
use jouken::prelude::*;

fn sample_dag() -> Dag {
    FilterDocument::sample().to_dag().unwrap()
}

#[test]
fn test_apply_event_add_node_is_idempotent() {
    let dag = apply_event(sample_dag(), GraphEvent::add_node(condition("10")));
    let once = dag.clone();
    let twice = apply_event(
        dag,
        GraphEvent::add_node(Node::new("10", "other", Operator::Equal, "1")),
    );
    assert_eq!(once, twice);
    assert_eq!(twice.node_count(), 10);
}

#[test]
fn test_apply_event_remove_node_leaves_no_dangling_edges() {
    for id in ["2", "3", "6", "9"] {
        let dag = apply_event(sample_dag(), GraphEvent::remove_node(id));
        assert!(!dag.has_node(id));
        assert!(
            dag.edges().iter().all(|edge| !edge.touches(id)),
            "edge referencing '{}' survived",
            id
        );
        assert!(dag.validate().is_ok());
    }
}

#[test]
fn test_apply_event_add_edge_does_not_deduplicate() {
    let mut dag = sample_dag();
    assert!(dag.apply(GraphEvent::add_edge("1", "2")));
    assert_eq!(dag.edges().iter().filter(|e| e.id == "e1-2").count(), 2);
}

#[test]
fn test_apply_event_remove_edge_keeps_nodes() {
    let mut dag = sample_dag();
    assert!(dag.apply(GraphEvent::remove_edge("e3-6")));
    assert!(dag.has_node("3"));
    assert!(dag.has_node("6"));
    assert_eq!(dag.edge_count(), 7);
    assert!(!dag.apply(GraphEvent::remove_edge("e3-6")));
}

#[test]
fn test_apply_event_update_node() {
    let mut dag = sample_dag();
    let changed = dag.apply(GraphEvent::UpdateNode {
        id: "4".to_string(),
        parameter: "main.applicant.income".to_string(),
        operator: Operator::GreaterThan,
        value: "3500".to_string(),
    });
    assert!(changed);
    let node = dag.get_node("4").unwrap();
    assert_eq!(node.operator, Operator::GreaterThan);
    assert_eq!(node.value, "3500");

    let missing = dag.apply(GraphEvent::UpdateNode {
        id: "missing".to_string(),
        parameter: "p".to_string(),
        operator: Operator::Equal,
        value: "v".to_string(),
    });
    assert!(!missing);
}

#[test]
fn test_bare_graph_allows_root_removal() {
    let dag = apply_event(sample_dag(), GraphEvent::remove_node("1"));
    assert!(!dag.has_node("1"));
    assert!(matches!(dag.validate(), Err(GraphError::MissingRoot(_))));
}

#[test]
fn test_events_parse_from_tagged_json() {
    let events: Vec<GraphEvent> = serde_json::from_str(
        r#"[
            {"type": "ADD_NODE", "node": {"id": "10", "parameter": "co.applicant.income", "operator": ">", "value": "100"}},
            {"type": "ADD_EDGE", "source": "1", "target": "10"},
            {"type": "REMOVE_EDGE", "id": "e6-9"},
            {"type": "REMOVE_NODE", "id": "9"},
            {"type": "UPDATE_NODE", "id": "2", "parameter": "main.applicant.age", "operator": "=", "value": "30"}
        ]"#,
    )
    .expect("Failed to parse events");

    assert_eq!(events.len(), 5);
    assert_eq!(events[1], GraphEvent::add_edge("1", "10"));
    assert_eq!(events[3].name(), "REMOVE_NODE");

    let dag = events.into_iter().fold(sample_dag(), apply_event);
    assert!(dag.has_node("10"));
    assert!(!dag.has_node("9"));
    assert_eq!(dag.get_node("2").unwrap().operator, Operator::Equal);
    let children: Vec<_> = dag.children_of("1").collect();
    assert_eq!(children, vec!["2", "3", "10"]);
}

#[test]
fn test_session_rejects_root_removal() {
    let mut session = EditSession::new(sample_dag());
    let result = session.apply(GraphEvent::remove_node("1"));
    assert_eq!(result, Err(EditError::RootRemoval("1".to_string())));
    assert!(session.graph().has_node("1"));
    assert!(!session.can_undo());
}

#[test]
fn test_session_root_protection_can_be_disabled() {
    let mut session = EditSession::builder(sample_dag())
        .with_root_protection(false)
        .build();
    assert_eq!(session.apply(GraphEvent::remove_node("1")), Ok(true));
    assert!(!session.graph().has_node("1"));
}

#[test]
fn test_session_rejects_edges_to_unknown_nodes() {
    let mut session = EditSession::new(sample_dag());
    assert_eq!(
        session.connect("1", "ghost"),
        Err(EditError::UnknownNode("ghost".to_string()))
    );
    assert_eq!(session.graph().edge_count(), 8);
}

#[test]
fn test_session_add_and_connect_condition() {
    let mut session = EditSession::new(sample_dag());
    let id = session.add_condition("co.applicant.income", Operator::GreaterThan, "1500");
    let other = session.add_condition("co.applicant.income", Operator::LessThan, "500");
    assert_ne!(id, other);

    let node = session.graph().get_node(&id).unwrap();
    assert_eq!(node.parameter, "co.applicant.income");
    assert_eq!(node.value, "1500");

    let edge_id = session.connect("3", &id).unwrap();
    assert_eq!(edge_id, format!("e3-{}", id));

    let document = session.to_document().unwrap();
    assert_eq!(document.filter["3"].children, vec!["6".to_string(), id.clone()]);
    // Unconnected conditions are not reachable from the root and are not stored.
    assert!(!document.filter.contains_key(&other));
}

#[test]
fn test_session_update_condition() {
    let mut session = EditSession::new(sample_dag());
    session
        .update_condition("5", "co.applicant.income", Operator::Equal, "0")
        .unwrap();
    assert_eq!(session.graph().get_node("5").unwrap().value, "0");

    assert_eq!(
        session.update_condition("missing", "p", Operator::Equal, "0"),
        Err(EditError::UnknownNode("missing".to_string()))
    );
}

#[test]
fn test_session_remove_elements_rejects_batches_with_root() {
    let mut session = EditSession::new(sample_dag());
    let root = session.graph().get_node("1").cloned().unwrap();
    let leaf = session.graph().get_node("9").cloned().unwrap();

    let result = session.remove_elements(&[GraphElement::Node(leaf), GraphElement::Node(root)]);
    assert_eq!(result, Err(EditError::RootRemoval("1".to_string())));
    assert_eq!(session.graph().node_count(), 9);
}

#[test]
fn test_session_remove_elements_is_one_undo_step() {
    let mut session = EditSession::new(sample_dag());
    let elements = vec![
        GraphElement::Edge(Edge::new("1", "3")),
        GraphElement::Node(session.graph().get_node("6").cloned().unwrap()),
    ];
    assert_eq!(session.remove_elements(&elements), Ok(2));
    assert!(!session.graph().has_node("6"));
    assert_eq!(session.graph().edge_count(), 3);

    assert!(session.undo());
    assert_eq!(session.graph(), &sample_dag());
    assert!(!session.can_undo());
}

#[test]
fn test_session_undo_redo() {
    let original = sample_dag();
    let mut session = EditSession::new(original.clone());

    session.apply(GraphEvent::remove_node("6")).unwrap();
    session.connect("4", "5").unwrap();
    let edited = session.graph().clone();

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.graph(), &original);
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(session.graph(), &edited);
    assert!(!session.redo());
}

#[test]
fn test_session_new_edit_clears_redo() {
    let mut session = EditSession::new(sample_dag());
    session.apply(GraphEvent::remove_edge("e1-2")).unwrap();
    session.undo();
    assert!(session.can_redo());

    session.apply(GraphEvent::remove_edge("e1-3")).unwrap();
    assert!(!session.can_redo());
}

#[test]
fn test_session_unchanged_events_are_not_recorded() {
    let mut session = EditSession::new(sample_dag());
    assert_eq!(session.apply(GraphEvent::add_node(condition("1"))), Ok(false));
    assert_eq!(session.apply(GraphEvent::remove_edge("e9-9")), Ok(false));
    assert!(!session.can_undo());
}

#[test]
fn test_session_history_limit() {
    let mut session = EditSession::builder(sample_dag())
        .with_history_limit(2)
        .build();
    for edge in ["e6-7", "e6-8", "e6-9"] {
        session.apply(GraphEvent::remove_edge(edge)).unwrap();
    }

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.graph().edge_count(), 7);

    let mut no_history = EditSession::builder(sample_dag())
        .with_history_limit(0)
        .build();
    no_history.apply(GraphEvent::remove_edge("e6-7")).unwrap();
    assert!(!no_history.undo());
}

#[test]
fn test_session_without_history_still_edits() {
    let mut session = EditSession::builder(sample_dag())
        .with_history_limit(0)
        .build();

    let id = session.add_condition("co.applicant.income", Operator::Equal, "0");
    session.connect("9", &id).unwrap();
    let leaf = session.graph().get_node("7").cloned().unwrap();
    assert_eq!(session.remove_elements(&[GraphElement::Node(leaf)]), Ok(1));

    assert_eq!(session.graph().node_count(), 9);
    assert_eq!(session.graph().edge_count(), 8);
    assert!(!session.can_undo());
    assert!(!session.undo());
    assert!(!session.can_redo());
}

#[test]
fn test_session_apply_all_stops_at_rejected_event() {
    let mut session = EditSession::new(sample_dag());
    let result = session.apply_all(vec![
        GraphEvent::remove_edge("e6-9"),
        GraphEvent::remove_node("1"),
        GraphEvent::remove_edge("e6-8"),
    ]);
    assert_eq!(result, Err(EditError::RootRemoval("1".to_string())));
    assert_eq!(session.graph().edge_count(), 7);
}

#[test]
fn test_session_layers_reflect_edits() {
    let mut session = EditSession::new(sample_dag());
    session.connect("5", "6").unwrap();
    let layering = session.layers().unwrap();
    assert_eq!(layering.layer_of("6"), Some(3));
    assert_eq!(layering.layer_of("9"), Some(4));

    session.connect("9", "1").unwrap();
    assert!(matches!(
        session.layers(),
        Err(LayoutError::CyclicGraph { .. })
    ));
}
