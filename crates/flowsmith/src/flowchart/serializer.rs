//! Mermaid flowchart serializer
//!
//! Emits, in order: an optional `%%{ init }%%` directive for non-default
//! appearance settings, the `flowchart <dir>` header, one declaration per
//! node, `style` lines for colored nodes, one line per edge, and `linkStyle`
//! lines for colored edges. `linkStyle` addresses edges by their position in
//! the edge list, so reordering edges changes which line a style applies to.

use serde::Serialize;
use tracing::{trace, warn};

use crate::core::{
    ArrowType, CurveStyle, DiagramSettings, Edge, EdgeStyle, Look, Node, Serializer, Theme,
};

/// Output for a diagram without nodes
pub const EMPTY_DIAGRAM: &str = "flowchart TD\n  %% Add nodes to get started";

/// Replace every character outside `[A-Za-z0-9_]` with `_`
///
/// One `_` per UTF-16 code unit, so characters outside the BMP become `__`.
pub fn sanitize_id(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for c in id.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat('_').take(c.len_utf16()));
        }
    }
    out
}

/// Turn double quotes into single quotes; nothing else is escaped
pub fn escape_label(label: &str) -> String {
    label.replace('"', "'")
}

/// Connector token for an edge style and arrow type
///
/// Thick lines have no circle or cross ending and fall back to `==>`.
pub fn connector(style: EdgeStyle, arrow: ArrowType) -> &'static str {
    match (style, arrow) {
        (EdgeStyle::Solid, ArrowType::Arrow) => "-->",
        (EdgeStyle::Solid, ArrowType::None) => "---",
        (EdgeStyle::Solid, ArrowType::Bidirectional) => "<-->",
        (EdgeStyle::Solid, ArrowType::Circle) => "--o",
        (EdgeStyle::Solid, ArrowType::Cross) => "--x",
        (EdgeStyle::Dashed, ArrowType::Arrow) => "-.->",
        (EdgeStyle::Dashed, ArrowType::None) => "-.-",
        (EdgeStyle::Dashed, ArrowType::Bidirectional) => "<-.->",
        (EdgeStyle::Dashed, ArrowType::Circle) => "-.-o",
        (EdgeStyle::Dashed, ArrowType::Cross) => "-.-x",
        (EdgeStyle::Thick, ArrowType::None) => "===",
        (EdgeStyle::Thick, ArrowType::Bidirectional) => "<===>",
        (EdgeStyle::Thick, ArrowType::Arrow | ArrowType::Circle | ArrowType::Cross) => "==>",
    }
}

/// Flowchart-specific part of the init directive
#[derive(Serialize)]
struct FlowchartInit {
    curve: CurveStyle,
}

/// Only the overridden settings; field order is the emission order
#[derive(Serialize)]
struct InitDirective {
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    look: Option<Look>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flowchart: Option<FlowchartInit>,
}

impl InitDirective {
    fn from_settings(settings: &DiagramSettings) -> Option<Self> {
        if settings.is_default_appearance() {
            return None;
        }
        Some(Self {
            theme: (settings.theme != Theme::default()).then_some(settings.theme),
            look: (settings.look != Look::default()).then_some(settings.look),
            flowchart: (settings.curve_style != CurveStyle::default()).then_some(FlowchartInit {
                curve: settings.curve_style,
            }),
        })
    }
}

/// Serializer producing Mermaid flowchart text
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidSerializer;

impl MermaidSerializer {
    pub fn new() -> Self {
        Self
    }

    fn directive_line(settings: &DiagramSettings) -> Option<String> {
        let directive = InitDirective::from_settings(settings)?;
        match serde_json::to_string(&directive) {
            Ok(json) => Some(format!("%%{{ init: {} }}%%", json)),
            Err(e) => {
                warn!(error = %e, "Could not encode init directive, omitting it");
                None
            }
        }
    }

    fn node_line(node: &Node) -> String {
        let (open, close) = node.data.shape.delimiters();
        let label = if node.data.label.is_empty() {
            node.id.as_str()
        } else {
            node.data.label.as_str()
        };
        format!(
            "  {}{}\"{}\"{}",
            sanitize_id(&node.id),
            open,
            escape_label(label),
            close
        )
    }

    fn node_style_line(node: &Node) -> Option<String> {
        let data = &node.data;
        let parts: Vec<String> = [
            ("fill", &data.fill_color),
            ("stroke", &data.stroke_color),
            ("color", &data.text_color),
        ]
        .into_iter()
        .filter_map(|(channel, value)| match value.as_deref() {
            Some(c) if !c.is_empty() => Some(format!("{}:{}", channel, c)),
            _ => None,
        })
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(format!("  style {} {}", sanitize_id(&node.id), parts.join(",")))
        }
    }

    fn edge_line(edge: &Edge) -> String {
        let source = sanitize_id(&edge.source);
        let target = sanitize_id(&edge.target);
        let token = connector(edge.data.edge_style, edge.data.arrow_type);
        match edge.label.as_deref() {
            Some(label) if !label.trim().is_empty() => format!(
                "  {} {}|\"{}\"| {}",
                source,
                token,
                escape_label(label),
                target
            ),
            _ => format!("  {} {} {}", source, token, target),
        }
    }
}

impl Serializer for MermaidSerializer {
    fn serialize(&self, nodes: &[Node], edges: &[Edge], settings: &DiagramSettings) -> String {
        if nodes.is_empty() {
            return EMPTY_DIAGRAM.to_string();
        }

        let mut lines = Vec::with_capacity(2 + nodes.len() * 2 + edges.len() * 2);

        if let Some(directive) = Self::directive_line(settings) {
            lines.push(directive);
        }

        lines.push(format!("flowchart {}", settings.direction));

        lines.extend(nodes.iter().map(Self::node_line));
        lines.extend(nodes.iter().filter_map(Self::node_style_line));
        lines.extend(edges.iter().map(Self::edge_line));
        lines.extend(edges.iter().enumerate().filter_map(|(index, edge)| {
            match edge.data.stroke_color.as_deref() {
                Some(c) if !c.is_empty() => Some(format!("  linkStyle {} stroke:{}", index, c)),
                _ => None,
            }
        }));

        trace!(
            node_count = nodes.len(),
            edge_count = edges.len(),
            line_count = lines.len(),
            "Serialized flowchart"
        );
        lines.join("\n")
    }

    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn format(&self) -> &'static str {
        "mmd"
    }
}

/// Serialize with the default [`MermaidSerializer`]
pub fn serialize(nodes: &[Node], edges: &[Edge], settings: &DiagramSettings) -> String {
    MermaidSerializer::new().serialize(nodes, edges, settings)
}
