//! Parallel independent marking runs over a shared immutable graph.
//!
//! Each run owns its own marked/frontier pair, so runs over different root
//! sets parallelize with no shared mutable state. Intra-run concurrency is a
//! different problem and not attempted here.

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::errors::MarkError;
use crate::graph::{Graph, NodeId};

use super::engine::ReachabilityMarker;
use super::types::SelectionOrder;

/// Run one marker per root set in parallel, returning the final marked set
/// of each in input order.
pub fn run_batch<G>(
    graph: &G,
    root_sets: &[FxHashSet<NodeId>],
    order: SelectionOrder,
) -> Result<Vec<FxHashSet<NodeId>>, MarkError>
where
    G: Graph + Sync,
{
    root_sets
        .par_iter()
        .map(|roots| {
            let mut marker = ReachabilityMarker::new(roots.iter().copied(), order);
            marker.run_to_completion(graph)?;
            Ok(marker.into_marked())
        })
        .collect()
}
