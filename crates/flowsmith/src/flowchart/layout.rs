//! Layered flowchart layout
//!
//! Places nodes with a Sugiyama-style pipeline: longest-path ranking over a
//! cycle-tolerant topological order, barycenter ordering within each rank,
//! then fixed-size slots with every rank centered on the widest one.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::ordering::order_layers_barycenter;
use super::topology::LayoutGraph;
use crate::core::{Direction, Edge, LayoutAlgorithm, Node, Position, Positions};

/// Layout configuration
///
/// Every node gets the same box; labels are not measured.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbouring nodes in the same rank
    pub node_sep: f64,
    /// Gap between consecutive ranks
    pub rank_sep: f64,
    /// Barycenter sweeps to run
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 60.0,
            node_sep: 60.0,
            rank_sep: 80.0,
            ordering_passes: 4,
        }
    }
}

/// Built-in layered layout algorithm
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout {
    config: LayoutConfig,
}

impl LayeredLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Group node indices by rank, each rank in input order
    fn assign_layers(graph: &LayoutGraph<'_>) -> Vec<Vec<usize>> {
        let ranks = graph.ranks();
        let max_rank = ranks.iter().copied().max().unwrap_or(0);
        let mut layers = vec![Vec::new(); max_rank + 1];
        for (node, &rank) in ranks.iter().enumerate() {
            layers[rank].push(node);
        }
        layers
    }

    /// Box size along the slot axis and along the rank axis
    fn extents(&self, direction: Direction) -> (f64, f64) {
        if direction.is_vertical() {
            (self.config.node_width, self.config.node_height)
        } else {
            (self.config.node_height, self.config.node_width)
        }
    }

    fn place(&self, graph: &LayoutGraph<'_>, layers: &[Vec<usize>], direction: Direction) -> Positions {
        let (slot_size, rank_size) = self.extents(direction);
        let slot_step = slot_size + self.config.node_sep;
        let rank_step = rank_size + self.config.rank_sep;

        let span_of = |count: usize| {
            if count == 0 {
                0.0
            } else {
                count as f64 * slot_size + (count - 1) as f64 * self.config.node_sep
            }
        };
        let widest = layers.iter().map(|l| span_of(l.len())).fold(0.0, f64::max);
        let last_rank = layers.len().saturating_sub(1);

        let mut positions = Positions::with_capacity(graph.len());
        for (rank, layer) in layers.iter().enumerate() {
            let rank_slot = if direction.is_reversed() {
                last_rank - rank
            } else {
                rank
            };
            let rank_center = rank_slot as f64 * rank_step + rank_size / 2.0;
            let start = (widest - span_of(layer.len())) / 2.0;

            for (slot, &node) in layer.iter().enumerate() {
                let slot_center = start + slot as f64 * slot_step + slot_size / 2.0;
                let (cx, cy) = if direction.is_vertical() {
                    (slot_center, rank_center)
                } else {
                    (rank_center, slot_center)
                };
                let top_left = Position::new(
                    cx - self.config.node_width / 2.0,
                    cy - self.config.node_height / 2.0,
                );
                trace!(node = graph.id(node), rank, slot, x = top_left.x, y = top_left.y, "Placed node");
                positions.insert(graph.id(node).to_string(), top_left);
            }
        }
        positions
    }
}

impl LayoutAlgorithm for LayeredLayout {
    fn layout(&self, nodes: &[Node], edges: &[Edge], direction: Direction) -> Result<Positions> {
        let layout_span = span!(
            Level::INFO,
            "layout_flowchart",
            node_count = nodes.len(),
            edge_count = edges.len(),
            direction = %direction
        );
        let _enter = layout_span.enter();

        if nodes.is_empty() {
            debug!("Empty graph, returning empty layout");
            return Ok(Positions::new());
        }

        let graph = LayoutGraph::new(nodes, edges);
        let mut layers = Self::assign_layers(&graph);
        debug!(layer_count = layers.len(), "Assigned nodes to layers");

        let crossings = order_layers_barycenter(&graph, &mut layers, self.config.ordering_passes);
        debug!(crossings, "Ordered layers");

        let positions = self.place(&graph, &layers, direction);
        info!(
            node_count = positions.len(),
            layer_count = layers.len(),
            "Layout complete"
        );
        Ok(positions)
    }

    fn name(&self) -> &'static str {
        "layered"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
