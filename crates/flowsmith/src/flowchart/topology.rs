//! Index-based adjacency view of a graph for the layout passes

use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

use crate::core::{Edge, Node};

/// Adjacency lists over node indices
///
/// Edges naming an unknown node and self-loops are left out, and duplicate
/// ids resolve to their first occurrence. Parallel edges are kept once per
/// edge so they weigh into barycenters.
#[derive(Debug, Clone)]
pub struct LayoutGraph<'a> {
    ids: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
}

impl<'a> LayoutGraph<'a> {
    pub fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut ids = Vec::with_capacity(nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if !index.contains_key(node.id.as_str()) {
                index.insert(node.id.as_str(), ids.len());
                ids.push(node.id.as_str());
            }
        }

        let mut preds = vec![Vec::new(); ids.len()];
        let mut succs = vec![Vec::new(); ids.len()];
        let mut skipped = 0usize;
        for edge in edges {
            match (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
                (Some(&from), Some(&to)) if from != to => {
                    succs[from].push(to);
                    preds[to].push(from);
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            trace!(skipped, "Ignored dangling edges and self-loops for layout");
        }

        Self {
            ids,
            index,
            preds,
            succs,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, node: usize) -> &'a str {
        self.ids[node]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.preds[node]
    }

    pub fn successors(&self, node: usize) -> &[usize] {
        &self.succs[node]
    }

    /// Kahn's algorithm, breaking ties by input order
    ///
    /// Nodes left over because they sit on or behind a cycle are appended in
    /// input order, so the result always holds every node exactly once.
    pub fn topological_sort(&self) -> Vec<usize> {
        let mut in_degree: Vec<usize> = self.preds.iter().map(Vec::len).collect();
        let mut queue: VecDeque<usize> = (0..self.len()).filter(|&n| in_degree[n] == 0).collect();
        let mut visited = vec![false; self.len()];
        let mut result = Vec::with_capacity(self.len());

        while let Some(node) = queue.pop_front() {
            visited[node] = true;
            result.push(node);
            for &next in &self.succs[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if result.len() < self.len() {
            debug!(
                sorted_count = result.len(),
                total_nodes = self.len(),
                "Cycle detected in graph"
            );
            result.extend((0..self.len()).filter(|&n| !visited[n]));
        }
        result
    }

    /// Longest-path rank for every node
    ///
    /// Only predecessors that come earlier in the topological order count,
    /// which turns cycle back-edges into no-ops.
    pub fn ranks(&self) -> Vec<usize> {
        let order = self.topological_sort();
        let mut position = vec![0usize; self.len()];
        for (i, &node) in order.iter().enumerate() {
            position[node] = i;
        }

        let mut rank = vec![0usize; self.len()];
        for &node in &order {
            rank[node] = self.preds[node]
                .iter()
                .filter(|&&p| position[p] < position[node])
                .map(|&p| rank[p] + 1)
                .max()
                .unwrap_or(0);
        }
        rank
    }
}
