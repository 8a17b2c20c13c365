//! The marking state machine — frontier expansion into a monotone marked set.
//!
//! Memory layout follows the usual worklist shape:
//! - FxHashSet for O(1) marked-set membership
//! - VecDeque + FxHashSet pair for the frontier, giving both selection order
//!   and O(1) set-union insertion

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::errors::MarkError;
use crate::graph::{Graph, NodeId};

use super::types::{MarkStats, SelectionOrder, StepResult};

/// The frontier: an ordered set of nodes still to process.
///
/// Insertion of a node already present is a no-op, so the queue never holds
/// duplicates and its length is bounded by the universe size.
#[derive(Debug, Clone, Default)]
struct Frontier {
    queue: VecDeque<NodeId>,
    members: FxHashSet<NodeId>,
}

impl Frontier {
    fn insert(&mut self, node: NodeId) {
        if self.members.insert(node) {
            self.queue.push_back(node);
        }
    }

    fn peek(&self, order: SelectionOrder) -> Option<NodeId> {
        match order {
            SelectionOrder::Fifo => self.queue.front().copied(),
            SelectionOrder::Lifo => self.queue.back().copied(),
        }
    }

    fn pop(&mut self, order: SelectionOrder) -> Option<NodeId> {
        let node = match order {
            SelectionOrder::Fifo => self.queue.pop_front(),
            SelectionOrder::Lifo => self.queue.pop_back(),
        }?;
        self.members.remove(&node);
        Some(node)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.queue.iter().copied()
    }
}

/// Incremental reachability marker.
///
/// Created with `marked = ∅` and `frontier = roots`; each step removes one
/// frontier node and, if unmarked, marks it and unions its successors back
/// into the frontier. After every step, the marked and frontier sets
/// together reach exactly the node set the roots reach, so a host may stop,
/// inspect, or resume the run at any point. Upon termination the marked set
/// equals the reachable set exactly.
#[derive(Debug, Clone)]
pub struct ReachabilityMarker {
    roots: FxHashSet<NodeId>,
    marked: FxHashSet<NodeId>,
    frontier: Frontier,
    done: bool,
    order: SelectionOrder,
    stats: MarkStats,
}

impl ReachabilityMarker {
    /// Create a marker for the given root set.
    ///
    /// An empty root set yields an immediately complete run with an empty
    /// marked set.
    pub fn new(roots: impl IntoIterator<Item = NodeId>, order: SelectionOrder) -> Self {
        let roots: FxHashSet<NodeId> = roots.into_iter().collect();
        let mut frontier = Frontier::default();
        for &root in &roots {
            frontier.insert(root);
        }
        let done = frontier.is_empty();
        Self {
            roots,
            marked: FxHashSet::default(),
            frontier,
            done,
            order,
            stats: MarkStats::default(),
        }
    }

    /// Process one frontier node.
    ///
    /// Errors if the run already terminated, or if the graph violates its
    /// contract for the selected node. All graph lookups happen before any
    /// state mutation, so a failed step leaves `marked`/`frontier` exactly
    /// as they were.
    pub fn step<G: Graph>(&mut self, graph: &G) -> Result<StepResult, MarkError> {
        let Some(node) = self.frontier.peek(self.order) else {
            return Err(MarkError::AlreadyTerminated);
        };

        let successors = if self.marked.contains(&node) {
            None
        } else {
            let successors = graph
                .successors(node)
                .ok_or(MarkError::UndefinedNode { node })?;
            for &successor in &successors {
                if !graph.contains(successor) {
                    return Err(MarkError::ForeignSuccessor { node, successor });
                }
            }
            Some(successors)
        };

        // Lookups validated; nothing below can fail.
        self.frontier.pop(self.order);
        self.stats.steps += 1;

        let newly_marked = match successors {
            Some(successors) => {
                self.marked.insert(node);
                for successor in successors {
                    self.frontier.insert(successor);
                }
                trace!(node = %node, frontier = self.frontier.len(), "marked node");
                true
            }
            None => {
                self.stats.noop_steps += 1;
                trace!(node = %node, "frontier entry already marked, removed");
                false
            }
        };

        self.stats.marked = self.marked.len();
        self.done = self.frontier.is_empty();
        Ok(StepResult {
            node,
            newly_marked,
            done: self.done,
        })
    }

    /// Step until the frontier is exhausted, returning the final marked set.
    ///
    /// Idempotent: calling on a completed run returns the marked set without
    /// stepping.
    pub fn run_to_completion<G: Graph>(
        &mut self,
        graph: &G,
    ) -> Result<&FxHashSet<NodeId>, MarkError> {
        while !self.done {
            self.step(graph)?;
        }
        debug!(
            marked = self.marked.len(),
            steps = self.stats.steps,
            noop_steps = self.stats.noop_steps,
            order = self.order.name(),
            "marking run complete"
        );
        Ok(&self.marked)
    }

    /// The root set this run was created with.
    pub fn roots(&self) -> &FxHashSet<NodeId> {
        &self.roots
    }

    /// Nodes marked so far. Grows monotonically over a run.
    pub fn marked(&self) -> &FxHashSet<NodeId> {
        &self.marked
    }

    /// Consume the marker, returning the marked set.
    pub fn into_marked(self) -> FxHashSet<NodeId> {
        self.marked
    }

    /// Nodes still to process, in selection-queue order.
    pub fn frontier(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frontier.iter()
    }

    /// Whether `node` is currently in the frontier.
    pub fn frontier_contains(&self, node: NodeId) -> bool {
        self.frontier.contains(node)
    }

    /// Current frontier size.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether the run has terminated.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The frontier selection order in use.
    pub fn order(&self) -> SelectionOrder {
        self.order
    }

    /// Statistics for the run so far.
    pub fn stats(&self) -> MarkStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyGraph;

    fn node(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn marked_ids(marker: &ReachabilityMarker) -> Vec<u32> {
        let mut ids: Vec<u32> = marker.marked().iter().map(|n| n.0).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn chain_marks_reachable_nodes_only() {
        // 4 → 1 → 2 → 3, rooted at 1: the predecessor 4 stays unmarked.
        let graph = AdjacencyGraph::from_edges([1, 2, 3, 4], &[(1, 2), (2, 3), (4, 1)]);
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Fifo);

        marker.run_to_completion(&graph).unwrap();

        assert_eq!(marked_ids(&marker), vec![1, 2, 3]);
        assert!(marker.is_done());
        assert_eq!(marker.frontier_len(), 0);
    }

    #[test]
    fn cycle_terminates() {
        let graph = AdjacencyGraph::from_edges([1, 2], &[(1, 2), (2, 1)]);
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Fifo);

        marker.run_to_completion(&graph).unwrap();

        assert_eq!(marked_ids(&marker), vec![1, 2]);
        // The cycle re-enqueues node 1 after it was marked, exercising the
        // pure-removal branch.
        assert!(marker.stats().noop_steps >= 1);
    }

    #[test]
    fn self_loop_terminates() {
        let graph = AdjacencyGraph::from_edges([1], &[(1, 1)]);
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Lifo);

        marker.run_to_completion(&graph).unwrap();

        assert_eq!(marked_ids(&marker), vec![1]);
    }

    #[test]
    fn disconnected_nodes_never_enter_the_run() {
        let graph = AdjacencyGraph::from_edges([1, 2, 3], &[]);
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Fifo);

        while !marker.is_done() {
            for frontier_node in marker.frontier() {
                assert_eq!(frontier_node, node(1));
            }
            marker.step(&graph).unwrap();
        }

        assert_eq!(marked_ids(&marker), vec![1]);
        assert!(!marker.marked().contains(&node(2)));
        assert!(!marker.marked().contains(&node(3)));
    }

    #[test]
    fn empty_roots_complete_immediately() {
        let graph = AdjacencyGraph::from_edges([1, 2], &[(1, 2)]);
        let mut marker = ReachabilityMarker::new([], SelectionOrder::Fifo);

        assert!(marker.is_done());
        let marked = marker.run_to_completion(&graph).unwrap();
        assert!(marked.is_empty());
    }

    #[test]
    fn step_after_completion_errors() {
        let graph = AdjacencyGraph::from_edges([1], &[]);
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Fifo);

        let result = marker.step(&graph).unwrap();
        assert!(result.done);

        assert_eq!(marker.step(&graph), Err(MarkError::AlreadyTerminated));
        // Misuse does not disturb the final state.
        assert_eq!(marked_ids(&marker), vec![1]);
    }

    #[test]
    fn marked_set_grows_monotonically() {
        let graph = AdjacencyGraph::from_edges(
            [1, 2, 3, 4, 5],
            &[(1, 2), (1, 3), (2, 4), (3, 4), (4, 5), (5, 2)],
        );
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Lifo);

        let mut previous: FxHashSet<NodeId> = FxHashSet::default();
        while !marker.is_done() {
            marker.step(&graph).unwrap();
            assert!(previous.is_subset(marker.marked()));
            previous = marker.marked().clone();
        }
        assert_eq!(marked_ids(&marker), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn undefined_root_fails_with_state_preserved() {
        let graph = AdjacencyGraph::from_edges([1], &[]);
        let mut marker = ReachabilityMarker::new([node(9)], SelectionOrder::Fifo);

        assert_eq!(
            marker.step(&graph),
            Err(MarkError::UndefinedNode { node: node(9) })
        );
        assert!(!marker.is_done());
        assert!(marker.marked().is_empty());
        assert!(marker.frontier_contains(node(9)));
    }

    #[test]
    fn foreign_successor_fails_before_mutation() {
        // Edge 1 → 7 where 7 was never declared.
        let mut graph = AdjacencyGraph::new();
        graph.add_node(node(1));
        graph.add_edge(node(1), node(7));
        let mut marker = ReachabilityMarker::new([node(1)], SelectionOrder::Fifo);

        assert_eq!(
            marker.step(&graph),
            Err(MarkError::ForeignSuccessor {
                node: node(1),
                successor: node(7)
            })
        );
        // The failed step marked nothing and left the frontier intact.
        assert!(marker.marked().is_empty());
        assert!(marker.frontier_contains(node(1)));
        assert_eq!(marker.stats().steps, 0);
    }

    #[test]
    fn fifo_and_lifo_agree_on_the_final_set() {
        let graph = AdjacencyGraph::from_edges(
            [0, 1, 2, 3, 4, 5, 6],
            &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 0), (5, 6)],
        );

        let mut results = Vec::new();
        for &order in SelectionOrder::all() {
            let mut marker = ReachabilityMarker::new([node(0)], order);
            marker.run_to_completion(&graph).unwrap();
            results.push(marked_ids(&marker));
        }

        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], vec![0, 1, 2, 3, 4]);
    }
}
