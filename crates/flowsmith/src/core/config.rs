//! Store configuration

use super::history::DEFAULT_HISTORY_LIMIT;
use super::model::PLACEHOLDER_LABEL;
use super::types::Position;

/// Tunables for [`FlowchartStore`](crate::flowchart::FlowchartStore)
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Snapshots kept per history direction
    pub history_limit: usize,
    /// Distance a duplicated node is shifted on both axes
    pub duplicate_offset: f64,
    /// Anchor for nodes added without an explicit position
    pub spawn_origin: Position,
    /// Per-node diagonal step for spawned nodes
    pub spawn_step: u64,
    /// Spawn offsets wrap modulo this value
    pub spawn_wrap: u64,
    /// Label for new nodes
    pub placeholder_label: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            duplicate_offset: 30.0,
            spawn_origin: Position::new(150.0, 100.0),
            spawn_step: 30,
            spawn_wrap: 200,
            placeholder_label: PLACEHOLDER_LABEL.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Offset applied to the spawn origin for the given counter value
    pub fn spawn_offset(&self, counter: u64) -> f64 {
        if self.spawn_wrap == 0 {
            return 0.0;
        }
        (counter.wrapping_mul(self.spawn_step) % self.spawn_wrap) as f64
    }
}
