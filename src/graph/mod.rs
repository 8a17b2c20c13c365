//! Abstract directed graph consumed by the marker.
//!
//! The marker only ever needs two things from a graph: a membership test over
//! the node universe and a successor lookup. Anything providing those can
//! drive a run; `AdjacencyGraph` is the hash-based default, `PetgraphView`
//! adapts an existing petgraph `DiGraph`.

pub mod types;

pub use types::{AdjacencyGraph, Graph, NodeId, PetgraphView, SuccessorList};
