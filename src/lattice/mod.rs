//! A step-indexed word lattice built incrementally over an [`Input`]
//! stream, settled with a Viterbi pass, and searched with an N-best
//! enumerator.
//!
//! Not covered: multi-threaded mutation of a single lattice.

pub mod constraint;
pub mod n_best;
mod node;
mod path;

use std::{error, fmt};

use crate::input::{Input, InputError};
use crate::vocabulary::Vocabulary;

pub use constraint::{Constraint, ConstraintElement, WildcardStep};
pub use n_best::NBestIterator;
pub use node::{Node, NodeKind};
pub use path::Path;

#[derive(Debug)]
pub enum LatticeError {
    Input(InputError),
    /// `push_back` was called after `settle`.
    AlreadySettled,
    /// an N-best enumeration or `eos()` was requested before `settle`.
    NotSettled,
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "{e}"),
            Self::AlreadySettled => f.write_str("lattice was already settled"),
            Self::NotSettled => f.write_str("lattice has not been settled yet"),
        }
    }
}

impl error::Error for LatticeError {}

impl From<InputError> for LatticeError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

/// A word lattice under construction. `push_back` extends it one input
/// fragment at a time; `settle` runs the Viterbi pass and fixes the EOS
/// node in place, after which [`Lattice::n_best`] enumerates paths.
pub struct Lattice<Vb: Vocabulary> {
    vocabulary: Vb,
    input: Option<Box<dyn Input>>,
    steps: Vec<Vec<Node>>,
    eos: Option<Node>,
}

impl<Vb: Vocabulary> Lattice<Vb> {
    #[must_use]
    pub fn new(vocabulary: Vb) -> Self {
        Self {
            vocabulary,
            input: None,
            steps: vec![vec![Node::bos()]],
            eos: None,
        }
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len() - 1
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.eos.is_some()
    }

    #[must_use]
    pub fn eos(&self) -> Option<&Node> {
        self.eos.as_ref()
    }

    /// Extends the input by one fragment and creates a new step holding
    /// every vocabulary entry whose span ends exactly here, linked to its
    /// best predecessor among the step where that span starts.
    pub fn push_back(&mut self, fragment: Box<dyn Input>) -> Result<(), LatticeError> {
        if self.eos.is_some() {
            return Err(LatticeError::AlreadySettled);
        }
        match &mut self.input {
            Some(input) => input.append(fragment)?,
            None => self.input = Some(fragment),
        }
        let new_step = self.build_step(self.steps.len())?;
        self.steps.push(new_step);
        Ok(())
    }

    /// Runs the Viterbi pass connecting every node at the final step to a
    /// single EOS node, fixing the lattice so [`Lattice::n_best`] can
    /// search it. Idempotent: settling twice just returns the same EOS
    /// node.
    pub fn settle(&mut self) -> Result<&Node, LatticeError> {
        if self.eos.is_none() {
            let last_step = self.steps.len() - 1;
            let eos = self.connect_node(NodeKind::Eos, crate::vocabulary::Entry::bos_eos(), last_step)
                .expect("EOS always has at least one predecessor candidate (BOS at step 0)");
            self.eos = Some(eos);
        }
        Ok(self.eos.as_ref().unwrap())
    }

    /// Builds every node whose span ends at `end_step` (the newly pushed
    /// position). For a span `(start, end_step]`, predecessor candidates
    /// live at `steps[start]`.
    fn build_step(&self, end_step: usize) -> Result<Vec<Node>, LatticeError> {
        let input = self.input.as_ref().expect("push_back always sets input first");
        let mut nodes = Vec::new();
        for start in 0..end_step {
            if self.steps[start].is_empty() {
                continue;
            }
            let length = end_step - start;
            let substring = input.create_subrange(start, length)?;
            for candidate in self.vocabulary.find_entries(substring.as_ref()) {
                if let Some(node) = self.connect_node(NodeKind::Entry, candidate, start) {
                    nodes.push(node);
                }
            }
        }
        Ok(nodes)
    }

    /// Links a new node (an `Entry` node at `preceding_step`, or the EOS
    /// node at the final step) to its best predecessor among
    /// `steps[preceding_step]`. Returns `None` if there is no predecessor
    /// candidate at all (shouldn't happen for EOS, since step 0 always
    /// holds BOS).
    fn connect_node(
        &self,
        kind: NodeKind,
        entry: crate::vocabulary::Entry,
        preceding_step: usize,
    ) -> Option<Node> {
        let preceding = &self.steps[preceding_step];
        if preceding.is_empty() {
            return None;
        }
        let mut costs = Vec::with_capacity(preceding.len());
        let mut best_index = 0;
        let mut best_total = i64::MAX;
        for (i, pred) in preceding.iter().enumerate() {
            let transition = self.vocabulary.find_connection(&pred.entry, &entry);
            costs.push(transition);
            let total = i64::from(pred.path_cost).saturating_add(i64::from(transition));
            if total < best_total {
                best_total = total;
                best_index = i;
            }
        }
        let best_total = best_total.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        let path_cost = i64::from(best_total)
            .saturating_add(i64::from(entry.cost()))
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Some(Node {
            kind,
            entry,
            preceding_step,
            best_preceding_node_index: Some(best_index),
            preceding_edge_costs: costs.into(),
            path_cost,
            best_preceding_total: best_total,
        })
    }

    /// Enumerates BOS-to-EOS paths in increasing cost order under
    /// `constraint`. `settle` must have been called first.
    pub fn n_best(&self, constraint: Constraint) -> Result<NBestIterator<'_, Vb>, LatticeError> {
        NBestIterator::new(self, constraint)
    }
}
