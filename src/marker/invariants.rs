//! Step-level invariant checks.
//!
//! A marker in any intermediate state must satisfy three properties:
//! 1. Every marked and every frontier node is reachable from the roots.
//! 2. Every successor of a marked node is marked or in the frontier.
//! 3. The marked and frontier sets together reach exactly what the roots
//!    reach, so no reachable node is ever lost from consideration.
//!
//! `check_invariants` verifies all three against the brute-force oracle.
//! It is meant to run after individual steps in tests; the production step
//! loop does not call it.

use rustc_hash::FxHashSet;

use crate::errors::MarkError;
use crate::graph::{Graph, NodeId};
use crate::oracle;

use super::engine::ReachabilityMarker;

/// A violated marking invariant.
#[derive(Debug, thiserror::Error)]
pub enum InvariantViolation {
    #[error("marked node {node} is not reachable from the roots")]
    MarkedNotReachable { node: NodeId },

    #[error("frontier node {node} is not reachable from the roots")]
    FrontierNotReachable { node: NodeId },

    #[error("successor {successor} of marked node {node} is neither marked nor in the frontier")]
    UnaccountedSuccessor { node: NodeId, successor: NodeId },

    #[error("reachable node {node} is no longer reachable from marked and frontier")]
    ReachableNodeLost { node: NodeId },

    #[error(transparent)]
    Graph(#[from] MarkError),
}

/// Check every marking invariant for the marker's current state.
pub fn check_invariants<G: Graph>(
    marker: &ReachabilityMarker,
    graph: &G,
) -> Result<(), InvariantViolation> {
    let reachable = oracle::reachable_from(graph, marker.roots().iter().copied())?;

    for &node in marker.marked() {
        if !reachable.contains(&node) {
            return Err(InvariantViolation::MarkedNotReachable { node });
        }
    }
    for node in marker.frontier() {
        if !reachable.contains(&node) {
            return Err(InvariantViolation::FrontierNotReachable { node });
        }
    }

    for &node in marker.marked() {
        let successors = graph
            .successors(node)
            .ok_or(MarkError::UndefinedNode { node })?;
        for &successor in &successors {
            if !marker.marked().contains(&successor) && !marker.frontier_contains(successor) {
                return Err(InvariantViolation::UnaccountedSuccessor { node, successor });
            }
        }
    }

    // Marked and frontier nodes are reachable (checked above), so the closure
    // of the active set cannot exceed `reachable`; only the reverse inclusion
    // needs checking.
    let active: FxHashSet<NodeId> = marker
        .marked()
        .iter()
        .copied()
        .chain(marker.frontier())
        .collect();
    let from_active = oracle::reachable_from(graph, active)?;
    for &node in &reachable {
        if !from_active.contains(&node) {
            return Err(InvariantViolation::ReachableNodeLost { node });
        }
    }

    Ok(())
}
