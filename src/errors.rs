//! Marking errors.

use crate::graph::NodeId;

/// Errors surfaced by a marking run.
///
/// Every variant aborts the current operation before any state mutation, so
/// the marker's `marked`/`frontier` sets stay in their last valid state for
/// diagnostic inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MarkError {
    /// `step` was called after the run completed. Caller misuse, recoverable.
    #[error("marking run already terminated")]
    AlreadyTerminated,

    /// The successor function is undefined for a node discovered during the
    /// run. The graph contract requires totality over its universe.
    #[error("successor function undefined for node {node}")]
    UndefinedNode { node: NodeId },

    /// A successor lies outside the graph's node universe.
    #[error("node {node} has successor {successor} outside the graph")]
    ForeignSuccessor { node: NodeId, successor: NodeId },
}
