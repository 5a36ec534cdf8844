//! Integration tests for the public editing API

use flowsmith::prelude::*;

fn chain(store: &mut FlowchartStore, count: usize) -> Vec<String> {
    let ids: Vec<String> = (0..count).map(|_| store.add_node(None)).collect();
    for pair in ids.windows(2) {
        store.connect(&pair[0], &pair[1]);
    }
    ids
}

#[test]
fn test_build_and_serialize() {
    let mut store = FlowchartStore::new();
    let start = store.add_node(Some(NodeShape::Stadium));
    let decide = store.add_node(Some(NodeShape::Diamond));
    let done = store.add_node(Some(NodeShape::Circle));
    store.update_node_label(&start, "Start");
    store.update_node_label(&decide, "Ready?");
    store.update_node_label(&done, "Done");
    let yes = store.connect(&decide, &done);
    store.connect(&start, &decide);
    store.update_edge_label(&yes, "yes");

    let expected = [
        "flowchart TD",
        "  node_1([\"Start\"])",
        "  node_2{\"Ready?\"}",
        "  node_3((\"Done\"))",
        "  node_2 -->|\"yes\"| node_3",
        "  node_1 --> node_2",
    ]
    .join("\n");
    assert_eq!(store.serialize(), expected);
}

#[test]
fn test_styles_and_edge_types() {
    let mut store = FlowchartStore::new();
    let ids = chain(&mut store, 2);
    let edge = store.edges()[0].id.clone();

    store.update_node_style(&ids[0], &NodeStylePatch::new().fill("#ffcc00").text("#000"));
    store.update_edge_type(
        &edge,
        &EdgePatch::new()
            .style(EdgeStyle::Thick)
            .arrow(ArrowType::Bidirectional)
            .stroke("#f00"),
    );

    let text = store.serialize();
    assert!(text.contains("  style node_1 fill:#ffcc00,color:#000"));
    assert!(text.contains("  node_1 <===> node_2"));
    assert!(text.ends_with("  linkStyle 0 stroke:#f00"));

    store.update_node_style(&ids[0], &NodeStylePatch::new().clear_fill().clear_text());
    assert!(!store.serialize().contains("style node_1"));
}

#[test]
fn test_settings_show_up_in_directive() {
    let mut store = FlowchartStore::new();
    store.add_node(None);
    store.set_theme(Theme::Neutral);
    store.set_look(Look::HandDrawn);
    store.set_direction(Direction::BottomUp);

    let text = store.serialize();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(r#"%%{ init: {"theme":"neutral","look":"handDrawn"} }%%"#)
    );
    assert_eq!(lines.next(), Some("flowchart BT"));
}

#[test]
fn test_duplicate_selection() {
    let mut store = FlowchartStore::new();
    let a = store.add_node(None);
    let b = store.add_node(None);
    let c = store.add_node(None);
    store.connect(&a, &b);
    store.connect(&b, &c);
    store.select_node(&a, true);
    store.select_node(&b, true);

    let original_a = store.node(&a).unwrap().clone();
    let new_ids = store.duplicate_selection();

    assert_eq!(new_ids.len(), 2);
    assert_eq!(store.nodes().len(), 5);
    assert_eq!(store.edges().len(), 3);

    let copy_a = store.node(&new_ids[0]).unwrap();
    assert_eq!(copy_a.position, original_a.position.offset(30.0, 30.0));
    assert_eq!(copy_a.data, original_a.data);
    assert!(copy_a.selected);

    // Only A→B lies inside the selection
    let copied_edge = &store.edges()[2];
    assert_eq!(copied_edge.source, new_ids[0]);
    assert_eq!(copied_edge.target, new_ids[1]);
    assert!(!copied_edge.selected);

    // Originals unchanged apart from losing the selection
    assert!(!store.node(&a).unwrap().selected);
    assert!(!store.node(&b).unwrap().selected);
    assert_eq!(store.node(&a).unwrap().position, original_a.position);

    let selected: Vec<_> = store.selected_nodes().map(|n| n.id.clone()).collect();
    assert_eq!(selected, new_ids);
}

#[test]
fn test_duplicate_empty_selection_is_noop() {
    let mut store = FlowchartStore::new();
    store.add_node(None);
    let depth = store.history().past_len();

    assert!(store.duplicate_selection().is_empty());
    assert_eq!(store.history().past_len(), depth);
    assert_eq!(store.nodes().len(), 1);
}

#[test]
fn test_duplicate_is_one_undo_step() {
    let mut store = FlowchartStore::new();
    let a = store.add_node(None);
    store.select_node(&a, true);
    store.duplicate_selection();

    assert!(store.undo());
    assert_eq!(store.nodes().len(), 1);
    assert!(store.node(&a).unwrap().selected);
}

#[test]
fn test_auto_layout_is_one_undo_step() {
    let mut store = FlowchartStore::new();
    let ids = chain(&mut store, 3);
    let before: Vec<Position> = store.nodes().iter().map(|n| n.position).collect();

    assert!(store.auto_layout(&LayeredLayout::new()).unwrap());
    let x = store.node(&ids[0]).unwrap().position.x;
    assert!(store.nodes().iter().all(|n| n.position.x == x));

    assert!(store.undo());
    let restored: Vec<Position> = store.nodes().iter().map(|n| n.position).collect();
    assert_eq!(restored, before);
}

#[test]
fn test_set_direction_and_layout() {
    let mut store = FlowchartStore::new();
    let ids = chain(&mut store, 2);

    assert!(store
        .set_direction_and_layout(Direction::RightLeft, &LayeredLayout::new())
        .unwrap());
    assert_eq!(store.settings().direction, Direction::RightLeft);
    let first = store.node(&ids[0]).unwrap().position;
    let second = store.node(&ids[1]).unwrap().position;
    assert!(first.x > second.x);
    assert_eq!(first.y, second.y);
}

#[test]
fn test_set_direction_on_empty_graph_skips_layout() {
    let mut store = FlowchartStore::new();
    assert!(!store
        .set_direction_and_layout(Direction::LeftRight, &LayeredLayout::new())
        .unwrap());
    assert_eq!(store.settings().direction, Direction::LeftRight);
    assert!(!store.can_undo());
}

#[test]
fn test_save_and_load_round_trip() {
    let mut store = FlowchartStore::new();
    let ids = chain(&mut store, 3);
    store.update_node_shape(&ids[1], NodeShape::Hexagon);
    store.update_edge_type(&store.edges()[0].id.clone(), &EdgePatch::new().style(EdgeStyle::Dashed));

    let json = store.save_json().unwrap();
    let mut other = FlowchartStore::new();
    other.load_json(&json).unwrap();

    assert_eq!(other.graph(), store.graph());
    assert_eq!(other.serialize(), store.serialize());
}

#[test]
fn test_move_and_remove() {
    let mut store = FlowchartStore::new();
    let ids = chain(&mut store, 2);

    assert!(store.move_node(&ids[0], Position::new(5.0, 6.0)));
    assert_eq!(store.node(&ids[0]).unwrap().position, Position::new(5.0, 6.0));

    let edge = store.edges()[0].id.clone();
    assert!(store.remove_edge(&edge));
    assert!(!store.remove_edge(&edge));
    assert!(store.edges().is_empty());

    assert!(store.undo());
    assert!(store.undo());
    assert_eq!(store.edges().len(), 1);
}
