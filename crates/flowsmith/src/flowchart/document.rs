//! Persisted diagram documents
//!
//! A document is a JSON object with top-level `nodes` and `edges` arrays.
//! Only the graph is persisted; settings and history are not.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::core::{DiagramError, Graph};

/// Parse a document, checking its top-level shape before decoding entities
pub fn from_json(text: &str) -> Result<Graph, DiagramError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value
        .as_object()
        .ok_or_else(|| DiagramError::invalid_file("expected a JSON object"))?;

    for key in ["nodes", "edges"] {
        if object.get(key).map_or(true, Value::is_null) {
            return Err(DiagramError::invalid_file(format!("missing `{}` key", key)));
        }
    }

    let graph: Graph = serde_json::from_value(value)?;
    debug!(
        node_count = graph.nodes.len(),
        edge_count = graph.edges.len(),
        "Parsed diagram document"
    );
    Ok(graph)
}

/// Pretty-printed document text
pub fn to_json(graph: &Graph) -> Result<String, DiagramError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Graph, DiagramError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let graph = from_json(&text)?;
    info!(path = %path.display(), node_count = graph.nodes.len(), "Loaded diagram");
    Ok(graph)
}

pub fn save_file(path: impl AsRef<Path>, graph: &Graph) -> Result<(), DiagramError> {
    let path = path.as_ref();
    std::fs::write(path, to_json(graph)?)?;
    info!(path = %path.display(), node_count = graph.nodes.len(), "Saved diagram");
    Ok(())
}
