//! reachmark: incremental graph-reachability marking
//!
//! Computes the exact set of nodes reachable from a root set by expanding a
//! frontier of to-visit nodes into a monotonically growing marked set, one
//! step at a time. The marker's invariants hold after every individual step,
//! not just at completion, so a partially run marker can be paused, inspected,
//! and resumed by a host that interleaves marking with its own scheduling
//! (a collector, a dependency analyzer, a dead-code eliminator).
//!
//! Three subsystems:
//! - **Graph** — node identifiers, the successor-function contract, and the
//!   hash-based and petgraph-backed implementations
//! - **Marker** — the frontier/marked state machine, selection orders,
//!   invariant checks, and parallel batch runs
//! - **Oracle** — brute-force reachability ground truth used as a test oracle

pub mod errors;
pub mod graph;
pub mod marker;
pub mod oracle;

// Re-exports for convenience
pub use errors::MarkError;
pub use graph::{AdjacencyGraph, Graph, NodeId, PetgraphView, SuccessorList};
pub use marker::{
    check_invariants, run_batch, InvariantViolation, MarkStats, ReachabilityMarker,
    SelectionOrder, StepResult,
};
pub use oracle::reachable_from;
