//! Rank ordering for the layered layout
//!
//! Nodes inside a rank are sorted by the mean slot of their neighbours in
//! the adjacent rank, sweeping down and up alternately. The ordering with
//! the fewest crossings wins. Everything is keyed on node indices, which are
//! document order, so equal inputs always produce equal orderings.

use std::collections::HashMap;

use super::topology::LayoutGraph;

/// Total edge crossings between every pair of adjacent ranks
pub fn cross_count(layers: &[Vec<usize>], graph: &LayoutGraph<'_>) -> usize {
    layers
        .windows(2)
        .map(|pair| rank_pair_crossings(&pair[0], &pair[1], graph))
        .sum()
}

fn slots(rank: &[usize]) -> HashMap<usize, usize> {
    rank.iter().enumerate().map(|(slot, &node)| (node, slot)).collect()
}

/// Crossings between two ranks, counted as inversions
///
/// Edges sorted by (north slot, south slot) cross exactly when a later edge
/// lands on a smaller south slot than an earlier one.
fn rank_pair_crossings(north: &[usize], south: &[usize], graph: &LayoutGraph<'_>) -> usize {
    let south_slot = slots(south);
    let mut links: Vec<(usize, usize)> = Vec::new();
    for (north_slot, &node) in north.iter().enumerate() {
        for succ in graph.successors(node) {
            if let Some(&slot) = south_slot.get(succ) {
                links.push((north_slot, slot));
            }
        }
    }
    links.sort_unstable();

    let mut seen = SlotCounter::new(south.len());
    let mut crossings = 0;
    for (placed, &(_, slot)) in links.iter().enumerate() {
        crossings += placed - seen.at_most(slot);
        seen.insert(slot);
    }
    crossings
}

/// Fenwick tree over south slots
struct SlotCounter {
    tree: Vec<usize>,
}

impl SlotCounter {
    fn new(slots: usize) -> Self {
        Self {
            tree: vec![0; slots + 1],
        }
    }

    fn insert(&mut self, slot: usize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Number of inserted slots `<= slot`
    fn at_most(&self, slot: usize) -> usize {
        let mut i = slot + 1;
        let mut total = 0;
        while i > 0 {
            total += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        total
    }
}

/// Which neighbours a barycenter looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Predecessors in the previous rank
    Downward,
    /// Successors in the next rank
    Upward,
}

/// Mean slot of each node's neighbours in `ref_layer`
///
/// `None` for nodes without neighbours there.
pub fn compute_barycenters(
    layer: &[usize],
    ref_layer: &[usize],
    graph: &LayoutGraph<'_>,
    direction: SweepDirection,
) -> Vec<Option<f64>> {
    let ref_slot = slots(ref_layer);
    layer
        .iter()
        .map(|&node| {
            let neighbours = match direction {
                SweepDirection::Downward => graph.predecessors(node),
                SweepDirection::Upward => graph.successors(node),
            };
            let (sum, count) = neighbours
                .iter()
                .filter_map(|n| ref_slot.get(n))
                .fold((0usize, 0usize), |(sum, count), &slot| (sum + slot, count + 1));
            (count > 0).then(|| sum as f64 / count as f64)
        })
        .collect()
}

/// Reorder a rank by barycenter
///
/// Nodes without a barycenter stay in their slot. The others fill the
/// remaining slots by ascending barycenter, equal values in document order.
pub fn order_layer_by_barycenter(layer: &mut [usize], barycenters: &[Option<f64>]) {
    let mut movable: Vec<(f64, usize)> = layer
        .iter()
        .zip(barycenters)
        .filter_map(|(&node, bc)| bc.map(|bc| (bc, node)))
        .collect();
    movable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut sorted = movable.into_iter().map(|(_, node)| node);
    for (slot, bc) in layer.iter_mut().zip(barycenters) {
        if bc.is_some() {
            if let Some(node) = sorted.next() {
                *slot = node;
            }
        }
    }
}

/// Run up to `iterations` alternating sweeps and keep the best ordering
///
/// Returns the crossing count of the ordering left in `layers`.
pub fn order_layers_barycenter(
    graph: &LayoutGraph<'_>,
    layers: &mut [Vec<usize>],
    iterations: usize,
) -> usize {
    if layers.len() < 2 {
        return 0;
    }

    let mut best = layers.to_vec();
    let mut best_crossings = cross_count(layers, graph);

    for pass in 0..iterations {
        if best_crossings == 0 {
            break;
        }
        let direction = if pass % 2 == 0 {
            SweepDirection::Downward
        } else {
            SweepDirection::Upward
        };
        sweep(graph, layers, direction);

        let crossings = cross_count(layers, graph);
        if crossings < best_crossings {
            best.clone_from_slice(layers);
            best_crossings = crossings;
        }
    }

    layers.clone_from_slice(&best);
    best_crossings
}

fn sweep(graph: &LayoutGraph<'_>, layers: &mut [Vec<usize>], direction: SweepDirection) {
    let last = layers.len() - 1;
    let ranks: Vec<usize> = match direction {
        SweepDirection::Downward => (1..=last).collect(),
        SweepDirection::Upward => (0..last).rev().collect(),
    };
    for rank in ranks {
        let reference = match direction {
            SweepDirection::Downward => rank - 1,
            SweepDirection::Upward => rank + 1,
        };
        let barycenters = compute_barycenters(&layers[rank], &layers[reference], graph, direction);
        order_layer_by_barycenter(&mut layers[rank], &barycenters);
    }
}
