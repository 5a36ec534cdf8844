//! Core serializer trait for diagram text output
//!
//! Unlike the other seams, serialization has no error channel: every
//! reachable graph state maps to some text.

use super::model::{DiagramSettings, Edge, Node};

/// Core trait for serializers
///
/// # Example
/// ```
/// use flowsmith::core::{DiagramSettings, Serializer};
/// use flowsmith::flowchart::MermaidSerializer;
///
/// let text = MermaidSerializer::new().serialize(&[], &[], &DiagramSettings::default());
/// assert!(text.starts_with("flowchart TD"));
/// ```
pub trait Serializer: Send + Sync {
    /// Serialize the graph and settings into the output format
    fn serialize(&self, nodes: &[Node], edges: &[Edge], settings: &DiagramSettings) -> String;

    /// Get the name of this serializer
    fn name(&self) -> &'static str;

    /// Get the produced format
    fn format(&self) -> &'static str;
}
