//! Flowchart editing store
//!
//! [`FlowchartStore`] owns the live graph, the diagram settings, the undo
//! history and the id counters. Every graph mutation pushes a snapshot of
//! the state right before it, including selection flags, so each call is
//! exactly one undo step. Settings and selection writes skip the history.

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info, trace};

use super::document;
use super::serializer;
use crate::core::{
    apply_layout, CurveStyle, DiagramError, DiagramSettings, Direction, Edge, EdgePatch, Graph,
    History, LayoutAlgorithm, Look, Node, NodeShape, NodeStylePatch, Position, StoreConfig,
    Theme,
};

const NODE_ID_PREFIX: &str = "node_";
const EDGE_ID_PREFIX: &str = "edge_";

/// Interactive flowchart editing state
#[derive(Debug, Clone)]
pub struct FlowchartStore {
    graph: Graph,
    settings: DiagramSettings,
    history: History<Graph>,
    node_counter: u64,
    edge_counter: u64,
    config: StoreConfig,
}

impl Default for FlowchartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowchartStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            graph: Graph::default(),
            settings: DiagramSettings::default(),
            history: History::new(config.history_limit),
            node_counter: 1,
            edge_counter: 1,
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.graph.edge(id)
    }

    pub fn settings(&self) -> &DiagramSettings {
        &self.settings
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn history(&self) -> &History<Graph> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.nodes.iter().filter(|n| n.selected)
    }

    pub fn selected_edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edges.iter().filter(|e| e.selected)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Snapshot the live graph ahead of a mutation
    fn record(&mut self) {
        self.history.record(self.graph.clone());
    }

    fn next_node_id(&mut self) -> String {
        let nodes = &self.graph.nodes;
        mint_id(NODE_ID_PREFIX, &mut self.node_counter, |id| {
            nodes.iter().any(|n| n.id == id)
        })
    }

    fn next_edge_id(&mut self) -> String {
        let edges = &self.graph.edges;
        mint_id(EDGE_ID_PREFIX, &mut self.edge_counter, |id| {
            edges.iter().any(|e| e.id == id)
        })
    }

    /// Move the counters past any `node_<n>` / `edge_<n>` id already present
    ///
    /// A suffix of `u64::MAX` cannot be moved past and is left to the
    /// collision check in [`mint_id`].
    fn reserve_ids(&mut self) {
        fn next_after(id: &str, prefix: &str) -> Option<u64> {
            id.strip_prefix(prefix)?.parse::<u64>().ok()?.checked_add(1)
        }

        if let Some(next) = self
            .graph
            .nodes
            .iter()
            .filter_map(|n| next_after(&n.id, NODE_ID_PREFIX))
            .max()
        {
            self.node_counter = self.node_counter.max(next);
        }
        if let Some(next) = self
            .graph
            .edges
            .iter()
            .filter_map(|e| next_after(&e.id, EDGE_ID_PREFIX))
            .max()
        {
            self.edge_counter = self.edge_counter.max(next);
        }
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.graph.nodes.iter_mut().find(|n| n.id == id)
    }

    fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.graph.edges.iter_mut().find(|e| e.id == id)
    }

    /// Record, then apply `f` to the node if it exists
    ///
    /// A missing id still leaves its history entry behind.
    fn update_node(&mut self, id: &str, f: impl FnOnce(&mut Node)) -> bool {
        self.record();
        match self.node_mut(id) {
            Some(node) => {
                f(node);
                true
            }
            None => {
                debug!(node = id, "Update targeted a missing node");
                false
            }
        }
    }

    fn update_edge(&mut self, id: &str, f: impl FnOnce(&mut Edge)) -> bool {
        self.record();
        match self.edge_mut(id) {
            Some(edge) => {
                f(edge);
                true
            }
            None => {
                debug!(edge = id, "Update targeted a missing edge");
                false
            }
        }
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Add a node at the next spawn slot and return its id
    pub fn add_node(&mut self, shape: Option<NodeShape>) -> String {
        let id = self.next_node_id();
        let offset = self.config.spawn_offset(self.node_counter);
        let position = self.config.spawn_origin.offset(offset, offset);
        self.insert_node(id, position, shape)
    }

    /// Add a node at a caller-chosen position and return its id
    pub fn add_node_at(&mut self, position: Position, shape: Option<NodeShape>) -> String {
        let id = self.next_node_id();
        self.insert_node(id, position, shape)
    }

    fn insert_node(&mut self, id: String, position: Position, shape: Option<NodeShape>) -> String {
        self.record();
        let mut node = Node::new(id.clone(), position, shape.unwrap_or_default());
        node.data.label = self.config.placeholder_label.clone();
        trace!(node = %id, shape = %node.data.shape, x = position.x, y = position.y, "Added node");
        self.graph.nodes.push(node);
        id
    }

    /// Set a node label verbatim; empty text is kept as is
    pub fn update_node_label(&mut self, id: &str, label: impl Into<String>) -> bool {
        let label = label.into();
        trace!(node = id, label = %label, "Updating node label");
        self.update_node(id, |node| node.data.label = label)
    }

    pub fn update_node_shape(&mut self, id: &str, shape: NodeShape) -> bool {
        trace!(node = id, shape = %shape, "Updating node shape");
        self.update_node(id, |node| node.data.shape = shape)
    }

    pub fn update_node_style(&mut self, id: &str, patch: &NodeStylePatch) -> bool {
        trace!(node = id, ?patch, "Updating node style");
        self.update_node(id, |node| node.data.apply_style(patch))
    }

    /// Commit a drag
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        trace!(node = id, x = position.x, y = position.y, "Moving node");
        self.update_node(id, |node| node.position = position)
    }

    /// Remove a node; edges that reference it are kept
    pub fn remove_node(&mut self, id: &str) -> bool {
        self.record();
        let before = self.graph.nodes.len();
        self.graph.nodes.retain(|n| n.id != id);
        let removed = self.graph.nodes.len() != before;
        trace!(node = id, removed, "Removed node");
        removed
    }

    /// Replace every node in one undo step
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.record();
        self.graph.nodes = nodes;
        self.reserve_ids();
        debug!(node_count = self.graph.nodes.len(), "Replaced nodes");
    }

    // =========================================================================
    // Edges
    // =========================================================================

    /// Connect two node ids with a solid arrow and return the edge id
    ///
    /// Endpoints are not checked, and self-loops and parallel edges are fine.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        self.record();
        let id = self.next_edge_id();
        trace!(edge = %id, source, target, "Connected nodes");
        self.graph.edges.push(Edge::new(id.clone(), source, target));
        id
    }

    pub fn update_edge_label(&mut self, id: &str, label: impl Into<String>) -> bool {
        let label = label.into();
        trace!(edge = id, label = %label, "Updating edge label");
        self.update_edge(id, |edge| edge.label = Some(label))
    }

    pub fn update_edge_type(&mut self, id: &str, patch: &EdgePatch) -> bool {
        trace!(edge = id, ?patch, "Updating edge type");
        self.update_edge(id, |edge| edge.data.apply(patch))
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        self.record();
        let before = self.graph.edges.len();
        self.graph.edges.retain(|e| e.id != id);
        let removed = self.graph.edges.len() != before;
        trace!(edge = id, removed, "Removed edge");
        removed
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Set a node's selection flag without touching the history
    pub fn select_node(&mut self, id: &str, selected: bool) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_edge(&mut self, id: &str, selected: bool) -> bool {
        match self.edge_mut(id) {
            Some(edge) => {
                edge.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.graph.nodes.iter_mut().for_each(|n| n.selected = false);
        self.graph.edges.iter_mut().for_each(|e| e.selected = false);
    }

    /// Clone the selected nodes and the edges running between them
    ///
    /// The copies are shifted by the duplicate offset and become the new
    /// selection. Returns the new node ids; an empty selection is a no-op
    /// that leaves no history entry.
    pub fn duplicate_selection(&mut self) -> Vec<String> {
        let originals: Vec<Node> = self.selected_nodes().cloned().collect();
        if originals.is_empty() {
            return Vec::new();
        }
        self.record();

        let offset = self.config.duplicate_offset;
        let mut id_map: HashMap<String, String> = HashMap::with_capacity(originals.len());
        let mut copies = Vec::with_capacity(originals.len());
        for original in originals {
            let id = self.next_node_id();
            id_map.insert(original.id.clone(), id.clone());
            copies.push(Node {
                id,
                position: original.position.offset(offset, offset),
                data: original.data,
                selected: true,
            });
        }

        let inner: Vec<(Edge, String, String)> = self
            .graph
            .edges
            .iter()
            .filter_map(|e| {
                let source = id_map.get(&e.source)?;
                let target = id_map.get(&e.target)?;
                Some((e.clone(), source.clone(), target.clone()))
            })
            .collect();
        let edge_copies: Vec<Edge> = inner
            .into_iter()
            .map(|(edge, source, target)| Edge {
                id: self.next_edge_id(),
                source,
                target,
                selected: false,
                ..edge
            })
            .collect();

        for node in &mut self.graph.nodes {
            node.selected = false;
        }
        let new_ids: Vec<String> = copies.iter().map(|n| n.id.clone()).collect();
        debug!(
            node_count = copies.len(),
            edge_count = edge_copies.len(),
            "Duplicated selection"
        );
        self.graph.nodes.extend(copies);
        self.graph.edges.extend(edge_copies);
        new_ids
    }

    /// Remove every selected node and edge in one undo step
    ///
    /// Returns how many elements went away.
    pub fn delete_selection(&mut self) -> usize {
        let count = self.selected_nodes().count() + self.selected_edges().count();
        if count == 0 {
            return 0;
        }
        self.record();
        self.graph.nodes.retain(|n| !n.selected);
        self.graph.edges.retain(|e| !e.selected);
        debug!(removed = count, "Deleted selection");
        count
    }

    // =========================================================================
    // Whole-graph operations
    // =========================================================================

    /// Replace the graph in one undo step
    pub fn load_diagram(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.record();
        self.graph = Graph::new(nodes, edges);
        self.reserve_ids();
        info!(
            node_count = self.graph.nodes.len(),
            edge_count = self.graph.edges.len(),
            "Loaded diagram"
        );
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.graph)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.graph)
    }

    /// Reposition every node with `algorithm` along the current direction
    ///
    /// Returns `Ok(false)` without touching history on an empty graph. A
    /// failing algorithm leaves the store unchanged.
    pub fn auto_layout(&mut self, algorithm: &dyn LayoutAlgorithm) -> Result<bool> {
        if self.graph.is_empty() {
            return Ok(false);
        }
        let placed = apply_layout(
            algorithm,
            &self.graph.nodes,
            &self.graph.edges,
            self.settings.direction,
        )?;
        self.set_nodes(placed);
        info!(
            algorithm = algorithm.name(),
            direction = %self.settings.direction,
            "Applied auto layout"
        );
        Ok(true)
    }

    /// Change direction, then re-run the layout when there is anything to place
    pub fn set_direction_and_layout(
        &mut self,
        direction: Direction,
        algorithm: &dyn LayoutAlgorithm,
    ) -> Result<bool> {
        self.set_direction(direction);
        self.auto_layout(algorithm)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn set_direction(&mut self, direction: Direction) {
        self.settings.direction = direction;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn set_look(&mut self, look: Look) {
        self.settings.look = look;
    }

    pub fn set_curve_style(&mut self, curve_style: CurveStyle) {
        self.settings.curve_style = curve_style;
    }

    pub fn set_settings(&mut self, settings: DiagramSettings) {
        self.settings = settings;
    }

    // =========================================================================
    // Output and persistence
    // =========================================================================

    /// Mermaid text for the live graph and settings
    pub fn serialize(&self) -> String {
        serializer::serialize(&self.graph.nodes, &self.graph.edges, &self.settings)
    }

    pub fn save_json(&self) -> std::result::Result<String, DiagramError> {
        document::to_json(&self.graph)
    }

    /// Load a document; on error the store is left untouched
    pub fn load_json(&mut self, text: &str) -> std::result::Result<(), DiagramError> {
        let graph = document::from_json(text)?;
        self.load_diagram(graph.nodes, graph.edges);
        Ok(())
    }
}

/// Next `<prefix><n>` id that is not `taken`, advancing `counter`
///
/// Once the counter is exhausted, ids fall back to `<prefix><u64::MAX>_<k>`
/// with the first free `k`.
fn mint_id(prefix: &str, counter: &mut u64, taken: impl Fn(&str) -> bool) -> String {
    while let Some(next) = counter.checked_add(1) {
        let id = format!("{}{}", prefix, counter);
        *counter = next;
        if !taken(&id) {
            return id;
        }
    }
    debug!(prefix, "id counter exhausted, using suffixed ids");
    let mut k: u64 = 0;
    loop {
        let id = format!("{}{}_{}", prefix, u64::MAX, k);
        if !taken(&id) {
            return id;
        }
        k += 1;
    }
}
