//! Best-first frontier over rank vectors.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// A combination of one ranked solution per hour.
#[derive(Debug, Clone)]
pub(super) struct FrontierNode {
    pub score: f64,
    pub ranks: Vec<usize>,
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of pending combinations that never queues the same rank vector twice.
#[derive(Debug, Default)]
pub(super) struct Frontier {
    heap: BinaryHeap<Reverse<FrontierNode>>,
    seen: HashSet<Vec<usize>>,
}

impl Frontier {
    pub fn push(&mut self, node: FrontierNode) {
        if self.seen.insert(node.ranks.clone()) {
            self.heap.push(Reverse(node));
        }
    }

    /// Removes the lowest-scoring combination.
    pub fn pop(&mut self) -> Option<FrontierNode> {
        self.heap.pop().map(|Reverse(node)| node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
