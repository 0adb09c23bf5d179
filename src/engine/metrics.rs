//! Dispatch metrics.
//!
//! Small, opt-in timing and counting data for a single dispatch. The plain
//! [`RouteTable::dispatch`](crate::RouteTable::dispatch) path collects the
//! counters only; [`RouteTable::dispatch_verbose`](crate::RouteTable::dispatch_verbose)
//! also returns them to the caller together with the attempt trace.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchMetrics {
    /// Total elapsed time for the dispatch.
    pub total: Duration,
    /// Time spent collecting and ordering candidates.
    pub collect: Duration,
    /// Time spent validating candidates.
    pub validate: Duration,
    /// Flat candidates whose prefix and argument count fit the request.
    pub flat_candidates: usize,
    /// Chain candidates whose segment consumption fits the request.
    pub chain_candidates: usize,
    /// Candidates validated before a match (or exhaustion).
    pub tried: usize,
}

impl DispatchMetrics {
    pub fn candidates(&self) -> usize {
        self.flat_candidates + self.chain_candidates
    }
}
