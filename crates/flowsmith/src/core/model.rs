//! Graph model: nodes, edges, diagram settings and snapshots
//!
//! Field names follow the persisted JSON layout (`camelCase`, with the
//! per-entity payload nested under `data`). The `data` structs reject unknown
//! keys. Enum-valued fields decode leniently: an unrecognized value degrades
//! to the enum default instead of failing the whole file.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use tracing::warn;

use super::types::{ArrowType, CurveStyle, Direction, EdgeStyle, Look, NodeShape, Position, Theme};

/// Label given to freshly created nodes
pub const PLACEHOLDER_LABEL: &str = "Node";

/// Decode an optional string into `T`, falling back to `T::default()`
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(value = %value, "Unrecognized value in diagram file, using default");
            T::default()
        }),
        None => T::default(),
    })
}

/// Visual payload of a node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient")]
    pub shape: NodeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl NodeData {
    pub fn new(label: impl Into<String>, shape: NodeShape) -> Self {
        Self {
            label: label.into(),
            shape,
            fill_color: None,
            stroke_color: None,
            text_color: None,
        }
    }

    /// Returns true if any color channel is set to a non-empty value
    pub fn has_custom_colors(&self) -> bool {
        [&self.fill_color, &self.stroke_color, &self.text_color]
            .into_iter()
            .any(|c| c.as_deref().is_some_and(|c| !c.is_empty()))
    }

    /// Apply a partial color update
    pub fn apply_style(&mut self, patch: &NodeStylePatch) {
        if let Some(fill) = &patch.fill_color {
            self.fill_color = fill.clone();
        }
        if let Some(stroke) = &patch.stroke_color {
            self.stroke_color = stroke.clone();
        }
        if let Some(text) = &patch.text_color {
            self.text_color = text.clone();
        }
    }
}

/// A node on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
    /// Transient UI selection flag
    #[serde(default)]
    pub selected: bool,
}

impl Node {
    /// Create an unselected node with the placeholder label
    pub fn new(id: impl Into<String>, position: Position, shape: NodeShape) -> Self {
        Self {
            id: id.into(),
            position,
            data: NodeData::new(PLACEHOLDER_LABEL, shape),
            selected: false,
        }
    }

    /// Create an unselected node with an explicit label
    pub fn with_label(
        id: impl Into<String>,
        label: impl Into<String>,
        shape: NodeShape,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            data: NodeData::new(label, shape),
            selected: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn shape(&self) -> NodeShape {
        self.data.shape
    }
}

/// Style payload of an edge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EdgeData {
    #[serde(default, deserialize_with = "lenient")]
    pub edge_style: EdgeStyle,
    #[serde(default, deserialize_with = "lenient")]
    pub arrow_type: ArrowType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
}

impl EdgeData {
    /// Apply a partial update
    pub fn apply(&mut self, patch: &EdgePatch) {
        if let Some(style) = patch.edge_style {
            self.edge_style = style;
        }
        if let Some(arrow) = patch.arrow_type {
            self.arrow_type = arrow;
        }
        if let Some(stroke) = &patch.stroke_color {
            self.stroke_color = stroke.clone();
        }
    }
}

/// A directed connection between two node ids
///
/// Endpoints are plain ids and are never checked against the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: EdgeData,
    #[serde(default)]
    pub selected: bool,
}

impl Edge {
    /// Create a solid single-arrow edge
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
            data: EdgeData::default(),
            selected: false,
        }
    }

    /// Builder-style label setter
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder-style style/arrow setter
    pub fn styled(mut self, edge_style: EdgeStyle, arrow_type: ArrowType) -> Self {
        self.data.edge_style = edge_style;
        self.data.arrow_type = arrow_type;
        self
    }
}

/// Partial node color update
///
/// Each field is three-state: `None` keeps the current value, `Some(None)`
/// clears the channel back to the inherited default, `Some(Some(c))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStylePatch {
    pub fill_color: Option<Option<String>>,
    pub stroke_color: Option<Option<String>>,
    pub text_color: Option<Option<String>>,
}

impl NodeStylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(Some(color.into()));
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(Some(color.into()));
        self
    }

    pub fn text(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(Some(color.into()));
        self
    }

    pub fn clear_fill(mut self) -> Self {
        self.fill_color = Some(None);
        self
    }

    pub fn clear_stroke(mut self) -> Self {
        self.stroke_color = Some(None);
        self
    }

    pub fn clear_text(mut self) -> Self {
        self.text_color = Some(None);
        self
    }
}

/// Partial edge update, same three-state rule as [`NodeStylePatch`] for the color
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgePatch {
    pub edge_style: Option<EdgeStyle>,
    pub arrow_type: Option<ArrowType>,
    pub stroke_color: Option<Option<String>>,
}

impl EdgePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = Some(edge_style);
        self
    }

    pub fn arrow(mut self, arrow_type: ArrowType) -> Self {
        self.arrow_type = Some(arrow_type);
        self
    }

    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = Some(Some(color.into()));
        self
    }

    pub fn clear_stroke(mut self) -> Self {
        self.stroke_color = Some(None);
        self
    }
}

/// Diagram-wide settings; not part of the undo history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagramSettings {
    pub direction: Direction,
    pub theme: Theme,
    pub look: Look,
    pub curve_style: CurveStyle,
}

impl DiagramSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(direction: Direction) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// Returns true if no appearance setting differs from its default
    pub fn is_default_appearance(&self) -> bool {
        self.theme == Theme::default()
            && self.look == Look::default()
            && self.curve_style == CurveStyle::default()
    }
}

/// The nodes and edges of a diagram
///
/// Used both as the live graph and as an undo snapshot. A clone shares no
/// storage with its source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Edges whose source or target names a node that is not in the graph
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter(|e| !self.has_node(&e.source) || !self.has_node(&e.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_style_patch_three_states() {
        let mut data = NodeData::new("A", NodeShape::Rectangle);
        data.apply_style(&NodeStylePatch::new().fill("#f00").stroke("#000"));
        assert_eq!(data.fill_color.as_deref(), Some("#f00"));
        assert_eq!(data.stroke_color.as_deref(), Some("#000"));

        // Unspecified keeps, explicit clear resets
        data.apply_style(&NodeStylePatch::new().clear_fill());
        assert_eq!(data.fill_color, None);
        assert_eq!(data.stroke_color.as_deref(), Some("#000"));
    }

    #[test]
    fn test_edge_patch_keeps_unspecified_fields() {
        let mut data = EdgeData::default();
        data.apply(&EdgePatch::new().style(EdgeStyle::Dashed).stroke("#00f"));
        data.apply(&EdgePatch::new().arrow(ArrowType::Cross));
        assert_eq!(data.edge_style, EdgeStyle::Dashed);
        assert_eq!(data.arrow_type, ArrowType::Cross);
        assert_eq!(data.stroke_color.as_deref(), Some("#00f"));

        data.apply(&EdgePatch::new().clear_stroke());
        assert_eq!(data.stroke_color, None);
    }

    #[test]
    fn test_has_custom_colors_ignores_empty_strings() {
        let mut data = NodeData::new("A", NodeShape::Rectangle);
        assert!(!data.has_custom_colors());
        data.text_color = Some(String::new());
        assert!(!data.has_custom_colors());
        data.text_color = Some("#fff".to_string());
        assert!(data.has_custom_colors());
    }

    #[test]
    fn test_snapshot_clone_is_independent() {
        let mut live = Graph::new(
            vec![Node::new("a", Position::default(), NodeShape::Circle)],
            vec![],
        );
        let snapshot = live.clone();
        live.nodes[0].data.label = "changed".to_string();
        live.nodes[0].position.x = 99.0;
        assert_eq!(snapshot.nodes[0].data.label, PLACEHOLDER_LABEL);
        assert_eq!(snapshot.nodes[0].position.x, 0.0);
    }

    #[test]
    fn test_unknown_shape_degrades_to_rectangle() {
        let data: NodeData =
            serde_json::from_str(r#"{"label":"x","shape":"blob"}"#).unwrap();
        assert_eq!(data.shape, NodeShape::Rectangle);
    }

    #[test]
    fn test_unknown_data_field_rejected() {
        let result: Result<NodeData, _> =
            serde_json::from_str(r#"{"label":"x","shape":"circle","wobble":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_dangling_edges() {
        let graph = Graph::new(
            vec![Node::new("a", Position::default(), NodeShape::Rectangle)],
            vec![Edge::new("e1", "a", "a"), Edge::new("e2", "a", "gone")],
        );
        let dangling: Vec<_> = graph.dangling_edges().map(|e| e.id.as_str()).collect();
        assert_eq!(dangling, vec!["e2"]);
    }

    #[test]
    fn test_settings_default_appearance() {
        let mut settings = DiagramSettings::with_direction(Direction::LeftRight);
        assert!(settings.is_default_appearance());
        settings.look = Look::HandDrawn;
        assert!(!settings.is_default_appearance());
    }
}
