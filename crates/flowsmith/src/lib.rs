//! Flowsmith - the editing core of an interactive flowchart editor
//!
//! A graph store with bounded undo/redo, a deterministic Mermaid flowchart
//! serializer and a pluggable layout step.
//!
//! # Quick Start
//!
//! ```rust
//! use flowsmith::prelude::*;
//!
//! let mut store = FlowchartStore::new();
//! let start = store.add_node(Some(NodeShape::Stadium));
//! let end = store.add_node(None);
//! store.update_node_label(&start, "Start");
//! store.connect(&start, &end);
//!
//! let text = store.serialize();
//! assert!(text.contains(r#"node_1(["Start"])"#));
//! assert!(text.ends_with("node_1 --> node_2"));
//!
//! store.undo();
//! assert!(store.edges().is_empty());
//! ```
//!
//! # Layout
//!
//! ```rust
//! use flowsmith::prelude::*;
//!
//! let mut store = FlowchartStore::new();
//! let a = store.add_node(None);
//! let b = store.add_node(None);
//! store.connect(&a, &b);
//!
//! store.set_direction_and_layout(Direction::LeftRight, &LayeredLayout::new()).unwrap();
//! assert!(store.node(&b).unwrap().position.x > store.node(&a).unwrap().position.x);
//! ```

pub mod core;
pub mod flowchart;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ArrowType, CurveStyle, DiagramError, DiagramSettings, Direction, Edge, EdgePatch,
        EdgeStyle, LayoutAlgorithm, Look, Node, NodeShape, NodeStylePatch, Position, Serializer,
        Theme,
    };
    pub use crate::flowchart::{FlowchartStore, LayeredLayout, LayoutConfig, MermaidSerializer};
}

/// Convert a saved diagram document into Mermaid text
///
/// # Example
/// ```rust
/// use flowsmith::{export, DiagramSettings};
///
/// let json = r#"{"nodes": [{"id": "a", "data": {"label": "A"}}], "edges": []}"#;
/// let text = export(json, &DiagramSettings::default()).unwrap();
/// assert_eq!(text, "flowchart TD\n  a[\"A\"]");
/// ```
pub fn export(json: &str, settings: &DiagramSettings) -> anyhow::Result<String> {
    let graph = flowchart::document::from_json(json)?;
    Ok(flowchart::serialize(&graph.nodes, &graph.edges, settings))
}

/// Open a saved diagram document in a fresh store
///
/// The load itself is the first undo step.
///
/// # Example
/// ```rust
/// let store = flowsmith::load(r#"{"nodes": [], "edges": []}"#).unwrap();
/// assert!(store.nodes().is_empty());
/// ```
pub fn load(json: &str) -> anyhow::Result<flowchart::FlowchartStore> {
    let mut store = flowchart::FlowchartStore::new();
    store.load_json(json)?;
    Ok(store)
}

/// Lay out a saved diagram document and return the updated document
pub fn relayout(json: &str, direction: Direction) -> anyhow::Result<String> {
    let mut store = load(json)?;
    store.set_direction_and_layout(direction, &flowchart::LayeredLayout::new())?;
    Ok(store.save_json()?)
}
