//! Marker value types — selection orders, step results, run statistics.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Frontier selection strategy.
///
/// The final marked set is the same for every strategy; the order only
/// changes which intermediate states a run passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionOrder {
    /// Oldest frontier entry first (breadth-first flavor).
    Fifo,
    /// Newest frontier entry first (depth-first flavor).
    Lifo,
}

impl SelectionOrder {
    /// Name of the selection order.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
        }
    }

    /// All selection orders.
    pub fn all() -> &'static [SelectionOrder] {
        &[Self::Fifo, Self::Lifo]
    }
}

impl std::fmt::Display for SelectionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single marking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// The frontier node that was processed.
    pub node: NodeId,
    /// Whether the node was marked by this step. `false` means the node had
    /// re-entered the frontier after being marked and the step was a pure
    /// removal.
    pub newly_marked: bool,
    /// Whether the run is now complete.
    pub done: bool,
}

/// Statistics from a marking run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MarkStats {
    /// Total steps taken so far.
    pub steps: usize,
    /// Nodes marked so far.
    pub marked: usize,
    /// Steps that removed an already-marked node without marking anything.
    pub noop_steps: usize,
}
