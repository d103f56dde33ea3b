use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::constraint::{Constraint, MatchResult};
use super::node::{Node, NodeKind};
use super::path::Path;
use super::{Lattice, LatticeError};
use crate::vocabulary::Vocabulary;

#[derive(Clone)]
struct PartialPath {
    /// Nodes from EOS back toward BOS, in the order they were added.
    nodes: Vec<Node>,
    constraint_exhausted: bool,
}

struct HeapItem {
    cost: i32,
    sequence: u64,
    partial: PartialPath,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.sequence == other.sequence
    }
}

impl Eq for HeapItem {}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap; invert so the lowest cost (and, on a
        // tie, the earliest-pushed candidate) pops first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Enumerates BOS-to-EOS paths through a settled [`Lattice`] in increasing
/// order of cost, honoring `constraint`. An ordinary, idiomatic
/// `Iterator`: once exhausted it keeps returning `None`, the same contract
/// a caller gets from any other Rust iterator rather than a separate
/// has-next/next pair that can be called past the end.
pub struct NBestIterator<'a, Vb: Vocabulary> {
    lattice: &'a Lattice<Vb>,
    constraint: Constraint,
    heap: BinaryHeap<HeapItem>,
    next_sequence: u64,
}

impl<'a, Vb: Vocabulary> NBestIterator<'a, Vb> {
    pub(crate) fn new(lattice: &'a Lattice<Vb>, constraint: Constraint) -> Result<Self, LatticeError> {
        let eos = lattice.eos().ok_or(LatticeError::NotSettled)?.clone();
        let mut heap = BinaryHeap::new();
        heap.push(HeapItem {
            cost: eos.path_cost,
            sequence: 0,
            partial: PartialPath {
                nodes: vec![eos],
                constraint_exhausted: false,
            },
        });
        Ok(Self {
            lattice,
            constraint,
            heap,
            next_sequence: 1,
        })
    }
}

impl<Vb: Vocabulary> Iterator for NBestIterator<'_, Vb> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            let HeapItem { cost, partial, .. } = self.heap.pop()?;

            let head = partial.nodes.last().expect("partial path is never empty");
            if head.kind == NodeKind::Bos {
                let mut nodes = partial.nodes;
                nodes.reverse();
                return Some(Path::new(nodes, cost));
            }

            let preceding = &self.lattice.steps[head.preceding_step];
            let depth = partial.nodes.len() - 1;
            let best_preceding_total = head.best_preceding_total;

            for (i, pred) in preceding.iter().enumerate() {
                let match_result = self
                    .constraint
                    .matches_at(depth, partial.constraint_exhausted, pred);
                let exhausted = match match_result {
                    MatchResult::Rejected => continue,
                    MatchResult::Matched => partial.constraint_exhausted,
                    MatchResult::Done => true,
                };

                let transition_cost = head.preceding_edge_costs[i];
                let new_cost = cost - best_preceding_total + transition_cost + pred.path_cost;

                let mut nodes = partial.nodes.clone();
                nodes.push(pred.clone());
                self.heap.push(HeapItem {
                    cost: new_cost,
                    sequence: self.next_sequence,
                    partial: PartialPath {
                        nodes,
                        constraint_exhausted: exhausted,
                    },
                });
                self.next_sequence += 1;
            }
        }
    }
}
