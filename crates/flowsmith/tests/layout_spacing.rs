use flowsmith::core::{apply_layout, Direction, Edge, LayoutAlgorithm, Node, NodeShape, Position};
use flowsmith::flowchart::{LayeredLayout, LayoutConfig};

fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter()
        .map(|id| Node::new(*id, Position::default(), NodeShape::Rectangle))
        .collect()
}

fn position(placed: &[Node], id: &str) -> Position {
    placed.iter().find(|n| n.id == id).unwrap().position
}

#[test]
fn test_rank_gap_is_rank_sep() {
    let layout = LayeredLayout::new();
    let placed = apply_layout(
        &layout,
        &nodes(&["A", "B"]),
        &[Edge::new("e", "A", "B")],
        Direction::TopDown,
    )
    .unwrap();

    let a = position(&placed, "A");
    let b = position(&placed, "B");
    let config = layout.config();
    assert_eq!(b.y, a.y + config.node_height + config.rank_sep);
}

#[test]
fn test_slot_gap_is_node_sep() {
    let layout = LayeredLayout::new();
    // No edges - both in rank 0
    let placed = apply_layout(&layout, &nodes(&["A", "B"]), &[], Direction::TopDown).unwrap();

    let a = position(&placed, "A");
    let b = position(&placed, "B");
    assert_eq!(a.y, b.y);
    assert_eq!(b.x - (a.x + 150.0), 60.0);
}

#[test]
fn test_horizontal_slot_gap_uses_node_height() {
    let placed = apply_layout(
        &LayeredLayout::new(),
        &nodes(&["A", "B"]),
        &[],
        Direction::LeftRight,
    )
    .unwrap();

    let a = position(&placed, "A");
    let b = position(&placed, "B");
    assert_eq!(a.x, b.x);
    assert_eq!(b.y - (a.y + 60.0), 60.0);
}

#[test]
fn test_diamond_pattern_is_crossing_free() {
    // A → B, A → C, B → D, C → D
    let ids = ["A", "B", "C", "D"];
    let edges = vec![
        Edge::new("e1", "A", "B"),
        Edge::new("e2", "A", "C"),
        Edge::new("e3", "B", "D"),
        Edge::new("e4", "C", "D"),
    ];
    let placed = apply_layout(&LayeredLayout::new(), &nodes(&ids), &edges, Direction::TopDown).unwrap();

    let (a, b, c, d) = (
        position(&placed, "A"),
        position(&placed, "B"),
        position(&placed, "C"),
        position(&placed, "D"),
    );
    assert_eq!(b.y, c.y);
    assert!(b.y > a.y && d.y > b.y);
    assert_eq!(a.x, d.x);
    assert_eq!(a.x, (b.x + c.x) / 2.0);
}

#[test]
fn test_barycenter_untangles_crossing() {
    // Input order puts the targets crosswise: A → D, B → C
    let edges = vec![Edge::new("e1", "A", "D"), Edge::new("e2", "B", "C")];
    let placed = apply_layout(
        &LayeredLayout::new(),
        &nodes(&["A", "B", "C", "D"]),
        &edges,
        Direction::TopDown,
    )
    .unwrap();

    let a = position(&placed, "A");
    let b = position(&placed, "B");
    let c = position(&placed, "C");
    let d = position(&placed, "D");
    assert!(a.x < b.x);
    assert!(d.x < c.x, "D should sit under A");
}

#[test]
fn test_no_overlaps_in_any_direction() {
    let ids = ["a", "b", "c", "d", "e", "f", "g"];
    let edges = vec![
        Edge::new("1", "a", "b"),
        Edge::new("2", "a", "c"),
        Edge::new("3", "c", "a"),
        Edge::new("4", "d", "e"),
        Edge::new("5", "b", "missing"),
    ];
    let config = LayoutConfig::default();
    for direction in Direction::ALL {
        let placed = apply_layout(&LayeredLayout::new(), &nodes(&ids), &edges, direction).unwrap();
        assert_eq!(placed.len(), ids.len());
        for (i, first) in placed.iter().enumerate() {
            for second in &placed[i + 1..] {
                let apart = (first.position.x - second.position.x).abs() >= config.node_width
                    || (first.position.y - second.position.y).abs() >= config.node_height;
                assert!(apart, "{direction}: {} overlaps {}", first.id, second.id);
            }
        }
    }
}

#[test]
fn test_layout_metadata() {
    let layout = LayeredLayout::with_config(LayoutConfig {
        node_sep: 10.0,
        ..Default::default()
    });
    assert_eq!(layout.name(), "layered");
    assert!(!layout.version().is_empty());
    assert_eq!(layout.config().node_sep, 10.0);
}
