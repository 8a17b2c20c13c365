//! Incremental marking — the frontier/marked state machine and its
//! supporting pieces.
//!
//! Four parts:
//! - **Engine** — `ReachabilityMarker`, the single-step and run-to-completion
//!   interface
//! - **Types** — selection orders, step results, run statistics
//! - **Invariants** — step-level checks against the brute-force oracle
//! - **Batch** — parallel independent runs over a shared graph

pub mod batch;
pub mod engine;
pub mod invariants;
pub mod types;

pub use batch::run_batch;
pub use engine::ReachabilityMarker;
pub use invariants::{check_invariants, InvariantViolation};
pub use types::{MarkStats, SelectionOrder, StepResult};
