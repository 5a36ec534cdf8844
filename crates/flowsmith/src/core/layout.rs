//! Core layout trait for node positioning
//!
//! A layout algorithm is an injected strategy: it sees the topology and the
//! flow direction and answers with one position per node. [`apply_layout`]
//! is the adapter that turns that answer into a replacement node list, which
//! the store commits as a single undoable step.

use anyhow::Result;
use std::collections::HashMap;

use super::model::{Edge, Node};
use super::types::{Direction, Position};
use super::DiagramError;

/// Node id → new top-left position
pub type Positions = HashMap<String, Position>;

/// Core trait for layout algorithms
///
/// Implementations must be deterministic, must return a position for every
/// node id, and must tolerate cycles, self-loops and edges whose endpoints
/// are not in `nodes`.
///
/// # Example
/// ```
/// use flowsmith::core::{apply_layout, Direction, Edge, Node, NodeShape, Position};
/// use flowsmith::flowchart::LayeredLayout;
///
/// let nodes = vec![
///     Node::new("a", Position::default(), NodeShape::Rectangle),
///     Node::new("b", Position::default(), NodeShape::Rectangle),
/// ];
/// let edges = vec![Edge::new("e", "a", "b")];
/// let placed = apply_layout(&LayeredLayout::new(), &nodes, &edges, Direction::TopDown).unwrap();
/// assert!(placed[1].position.y > placed[0].position.y);
/// ```
pub trait LayoutAlgorithm: Send + Sync {
    /// Compute a position for every node
    fn layout(&self, nodes: &[Node], edges: &[Edge], direction: Direction) -> Result<Positions>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}

/// Run `algorithm` and return `nodes` with only their positions replaced
///
/// Fails if the algorithm errors or leaves any node without a position.
pub fn apply_layout(
    algorithm: &dyn LayoutAlgorithm,
    nodes: &[Node],
    edges: &[Edge],
    direction: Direction,
) -> Result<Vec<Node>> {
    let positions = algorithm.layout(nodes, edges, direction)?;

    nodes
        .iter()
        .map(|node| -> Result<Node> {
            let position = positions.get(&node.id).copied().ok_or_else(|| {
                DiagramError::layout_error(format!(
                    "{} produced no position for node {}",
                    algorithm.name(),
                    node.id
                ))
            })?;
            Ok(Node {
                position,
                ..node.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeShape;

    struct Diagonal;

    impl LayoutAlgorithm for Diagonal {
        fn layout(&self, nodes: &[Node], _edges: &[Edge], _direction: Direction) -> Result<Positions> {
            Ok(nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (n.id.clone(), Position::new(i as f64, i as f64)))
                .collect())
        }

        fn name(&self) -> &'static str {
            "diagonal"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }
    }

    struct Forgetful;

    impl LayoutAlgorithm for Forgetful {
        fn layout(&self, _nodes: &[Node], _edges: &[Edge], _direction: Direction) -> Result<Positions> {
            Ok(Positions::new())
        }

        fn name(&self) -> &'static str {
            "forgetful"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }
    }

    #[test]
    fn test_apply_layout_replaces_positions_only() {
        let mut node = Node::with_label("a", "Alpha", NodeShape::Diamond, Position::new(5.0, 5.0));
        node.selected = true;
        let nodes = vec![node, Node::new("b", Position::default(), NodeShape::Circle)];

        let placed = apply_layout(&Diagonal, &nodes, &[], Direction::TopDown).unwrap();

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].position, Position::new(0.0, 0.0));
        assert_eq!(placed[1].position, Position::new(1.0, 1.0));
        assert_eq!(placed[0].data, nodes[0].data);
        assert!(placed[0].selected);
    }

    #[test]
    fn test_missing_position_is_a_layout_error() {
        let nodes = vec![Node::new("a", Position::default(), NodeShape::Rectangle)];
        let err = apply_layout(&Forgetful, &nodes, &[], Direction::LeftRight).unwrap_err();
        assert!(err.to_string().contains("no position for node a"));
    }
}
