//! Graph types — node identifiers, the successor-function contract, and the
//! concrete graph backends.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Opaque node identifier drawn from a finite universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a node identifier from a raw index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw index as a `usize`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SmallVec optimized for successor lists (out-degree usually <8).
pub type SuccessorList = SmallVec<[NodeId; 8]>;

/// The successor-function contract consumed by the marker.
///
/// Implementations must be total over their universe: `successors` returns
/// `Some` (possibly empty) for every contained node and `None` outside it.
/// The graph must not change for the duration of a run; a shared `&impl Graph`
/// may back any number of concurrent runs.
pub trait Graph {
    /// Whether `node` belongs to the node universe.
    fn contains(&self, node: NodeId) -> bool;

    /// Direct successors of `node`, or `None` if the successor function is
    /// undefined for it.
    fn successors(&self, node: NodeId) -> Option<SuccessorList>;

    /// Number of nodes in the universe.
    fn node_count(&self) -> usize;
}

/// Hash-based adjacency graph: a node universe plus per-node successor lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    nodes: FxHashSet<NodeId>,
    edges: FxHashMap<NodeId, SuccessorList>,
}

impl AdjacencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a node universe and an edge list.
    pub fn from_edges(nodes: impl IntoIterator<Item = u32>, edges: &[(u32, u32)]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(NodeId::new(node));
        }
        for &(from, to) in edges {
            graph.add_edge(NodeId::new(from), NodeId::new(to));
        }
        graph
    }

    /// Add a node to the universe. Idempotent.
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Add a directed edge. Duplicate edges are absorbed. The source joins
    /// the universe; the target is not validated, so a graph with dangling
    /// successors is constructible and the marker reports it at the point the
    /// bad successor is first consulted.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.nodes.insert(from);
        let targets = self.edges.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|targets| targets.len()).sum()
    }
}

impl Graph for AdjacencyGraph {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    fn successors(&self, node: NodeId) -> Option<SuccessorList> {
        if !self.nodes.contains(&node) {
            return None;
        }
        Some(self.edges.get(&node).cloned().unwrap_or_default())
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Read-only `Graph` view over a borrowed petgraph `DiGraph`.
///
/// Node identifiers map directly onto petgraph node indices, so this is only
/// sound for `DiGraph` (contiguous indices), not `StableGraph` after removals.
pub struct PetgraphView<'a, N, E> {
    graph: &'a DiGraph<N, E>,
}

impl<'a, N, E> PetgraphView<'a, N, E> {
    /// Wrap a borrowed petgraph graph.
    pub fn new(graph: &'a DiGraph<N, E>) -> Self {
        Self { graph }
    }
}

impl<N, E> Graph for PetgraphView<'_, N, E> {
    fn contains(&self, node: NodeId) -> bool {
        self.graph.node_weight(NodeIndex::new(node.index())).is_some()
    }

    fn successors(&self, node: NodeId) -> Option<SuccessorList> {
        let idx = NodeIndex::new(node.index());
        self.graph.node_weight(idx)?;
        Some(
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|n| NodeId::new(n.index() as u32))
                .collect(),
        )
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
}
