//! Brute-force reachability ground truth.
//!
//! Iterates the one-step successor expansion to a fixpoint. Deliberately
//! structured unlike the incremental marker so the two cannot share a bug;
//! the invariant checks and the test suite compare the marker against this.
//! The production step loop never calls it.

use rustc_hash::FxHashSet;

use crate::errors::MarkError;
use crate::graph::{Graph, NodeId};

/// The exact set of nodes reachable from `roots` by following zero or more
/// successor edges.
pub fn reachable_from<G: Graph>(
    graph: &G,
    roots: impl IntoIterator<Item = NodeId>,
) -> Result<FxHashSet<NodeId>, MarkError> {
    let mut reachable: FxHashSet<NodeId> = roots.into_iter().collect();

    loop {
        let mut discovered = Vec::new();
        for &node in &reachable {
            let successors = graph
                .successors(node)
                .ok_or(MarkError::UndefinedNode { node })?;
            for &successor in &successors {
                if !graph.contains(successor) {
                    return Err(MarkError::ForeignSuccessor { node, successor });
                }
                if !reachable.contains(&successor) {
                    discovered.push(successor);
                }
            }
        }
        if discovered.is_empty() {
            return Ok(reachable);
        }
        reachable.extend(discovered);
    }
}
