use std::fmt;
use std::rc::Rc;

use crate::vocabulary::Entry;

/// What a [`Node`] represents: the start-of-sequence anchor, the
/// end-of-sequence anchor, or a real vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Bos,
    Eos,
    Entry,
}

/// One node in the lattice's DAG. Predecessors aren't owning pointers:
/// `preceding_step` names the index into [`super::Lattice`]'s step list
/// where this node's candidate predecessors live, and
/// `best_preceding_node_index` names which one of them lies on the best
/// path found so far.
#[derive(Clone)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) entry: Entry,
    pub(crate) preceding_step: usize,
    pub(crate) best_preceding_node_index: Option<usize>,
    pub(crate) preceding_edge_costs: Rc<[i32]>,
    pub(crate) path_cost: i32,
    /// `path_cost` minus this node's own entry cost: the contribution of
    /// the best predecessor alone, cached so the N-best expansion can swap
    /// out just that term without re-deriving it from `steps`.
    pub(crate) best_preceding_total: i32,
}

impl Node {
    pub(crate) fn bos() -> Self {
        Self {
            kind: NodeKind::Bos,
            entry: Entry::bos_eos(),
            preceding_step: usize::MAX,
            best_preceding_node_index: None,
            preceding_edge_costs: Rc::from([]),
            path_cost: 0,
            best_preceding_total: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    #[must_use]
    pub fn preceding_step(&self) -> usize {
        self.preceding_step
    }

    #[must_use]
    pub fn best_preceding_node_index(&self) -> Option<usize> {
        self.best_preceding_node_index
    }

    #[must_use]
    pub fn preceding_edge_costs(&self) -> &[i32] {
        &self.preceding_edge_costs
    }

    #[must_use]
    pub fn path_cost(&self) -> i32 {
        self.path_cost
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("preceding_step", &self.preceding_step)
            .field("path_cost", &self.path_cost)
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.entry.matches(&other.entry)
            && self.preceding_step == other.preceding_step
            && self.path_cost == other.path_cost
            && self.best_preceding_total == other.best_preceding_total
    }
}
