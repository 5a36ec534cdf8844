//! Snapshot-based undo/redo history
//!
//! A strict linear history with two capped stacks. `past` is ordered
//! oldest-first, so its back is the most recent snapshot. `future` is ordered
//! most-recent-first, so its front is the next state to redo. Recording a new
//! snapshot discards the whole future branch.
//!
//! Undo and redo swap the live value with a stored one in place, so they never
//! clone; only [`History::record`] takes a copy (made by the caller).

use std::collections::VecDeque;
use tracing::{debug, trace};

/// Default number of snapshots kept in each direction
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded undo/redo stacks of snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    future: VecDeque<T>,
    capacity: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> History<T> {
    /// Create an empty history keeping at most `capacity` entries per stack
    pub fn new(capacity: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            future: VecDeque::new(),
            capacity,
        }
    }

    /// Record the state as it was immediately before a mutation
    pub fn record(&mut self, snapshot: T) {
        self.future.clear();
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        trace!(past = self.past.len(), "History snapshot recorded");
    }

    /// Restore the most recent snapshot into `live`
    ///
    /// The previous live value moves onto the redo stack. Returns false and
    /// leaves `live` untouched when there is nothing to undo.
    pub fn undo(&mut self, live: &mut T) -> bool {
        let Some(restored) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(live, restored);
        self.future.push_front(current);
        while self.future.len() > self.capacity {
            self.future.pop_back();
        }
        debug!(past = self.past.len(), future = self.future.len(), "Undo applied");
        true
    }

    /// Re-apply the next snapshot from the redo stack into `live`
    pub fn redo(&mut self, live: &mut T) -> bool {
        let Some(restored) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(live, restored);
        self.past.push_back(current);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
        debug!(past = self.past.len(), future = self.future.len(), "Redo applied");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Undo snapshots, oldest first
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Redo snapshots, next-to-redo first
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter()
    }

    /// Drop every stored snapshot
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
