//! Match selection.
//!
//! This module is the operational core of the dispatcher. For one request it
//! moves through a fixed sequence of states:
//!
//! ```text
//! Collecting ──▶ Ordering ──▶ Validating ──┬──▶ Matched
//!                                 ▲        │
//!                                 └─ next ─┴──▶ Exhausted
//! ```
//!
//! - **Collecting**: flat candidates from the `PathIndex` and chain
//!   candidates from the `ChainIndex`. Only literal parts and segment counts
//!   are considered; methods and types are not.
//! - **Ordering**: longest matched path first, then bounded arities before
//!   unbounded `Args`, then the most recently registered action, compared link
//!   by link from the chain root.
//! - **Validating**: [`try_validate`] each candidate in order. Methods are
//!   checked on every action of the chain, then every link's captures (root to
//!   terminal), then the terminal's arguments. The first candidate that passes
//!   is the match; a rejection just moves on to the next one.
//!
//! Nothing here allocates shared state: every dispatch works on its own
//! candidate list over the immutable table.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, trace};

use super::args::try_match;
use super::chains::{CandidateLink, MatchCandidate};
use super::compiled_routes::{ActionId, RouteTable};
use super::metrics::DispatchMetrics;
use super::request::RequestDescriptor;
use crate::api::{BoundLink, Dispatch, LinkKind, Matched};

/// Why a candidate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The action does not accept the request method.
    Method(ActionId),
    /// A link's captured segments failed its capture constraints.
    Capture(ActionId),
    /// The terminal's arguments failed its argument constraints.
    Args(ActionId),
}

impl Rejection {
    pub fn action(&self) -> ActionId {
        match *self {
            Rejection::Method(id) | Rejection::Capture(id) | Rejection::Args(id) => id,
        }
    }
}

/// A validated (or rejected) candidate, kept for verbose traces.
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    pub candidate: MatchCandidate,
    pub rejection: Option<Rejection>,
}

pub(crate) struct Selection<'t> {
    pub outcome: Dispatch<'t>,
    pub attempts: Vec<Attempt>,
    pub metrics: DispatchMetrics,
}

/// Priority order of two candidates (`Less` = tried first).
pub(crate) fn priority(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    b.path_len
        .cmp(&a.path_len)
        .then(b.bounded.cmp(&a.bounded))
        .then_with(|| b.rank.cmp(&a.rank))
        .then_with(|| b.links.iter().map(|l| l.action).cmp(a.links.iter().map(|l| l.action)))
}

/// Every structurally eligible candidate, flat and chained, in priority order.
pub(crate) fn collect(table: &RouteTable, segments: &[&str], metrics: &mut DispatchMetrics) -> Vec<MatchCandidate> {
    let flat = table.index.feasible_candidates(&table.actions, segments);
    let chained = table.chains.resolve_chains(&table.actions, segments);
    metrics.flat_candidates = flat.len();
    metrics.chain_candidates = chained.len();

    let mut candidates: Vec<MatchCandidate> = flat
        .into_iter()
        .map(|c| {
            let link = CandidateLink { action: c.action, start: c.prefix_len, end: segments.len() };
            MatchCandidate::new(vec![link], c.prefix_len, &table.actions)
        })
        .chain(chained)
        .collect();
    candidates.sort_by(priority);
    candidates
}

/// Validate one candidate against the request.
pub(crate) fn try_validate<'t>(
    table: &'t RouteTable,
    candidate: &MatchCandidate,
    method: &str,
    segments: &[&str],
) -> Result<Matched<'t>, Rejection> {
    if let Some(link) = candidate.links.iter().find(|l| !table.actions[l.action].methods.accepts(method)) {
        return Err(Rejection::Method(link.action));
    }

    let mut bound = Vec::with_capacity(candidate.links.len());
    for link in &candidate.links {
        let action = &table.actions[link.action];
        let window = &segments[link.start..link.end];
        let link = match action.capture_arity() {
            Some(capture) => BoundLink {
                id: link.action,
                action,
                kind: LinkKind::Capture,
                args: try_match(capture, window).ok_or(Rejection::Capture(link.action))?,
            },
            None => BoundLink {
                id: link.action,
                action,
                kind: LinkKind::Args,
                args: try_match(&action.args, window).ok_or(Rejection::Args(link.action))?,
            },
        };
        bound.push(link);
    }

    let terminal = bound.pop().ok_or(Rejection::Args(candidate.terminal().unwrap_or_default()))?;
    Ok(Matched { links: bound, terminal, path_len: candidate.path_len })
}

/// Run the full selection for `request`. With `record` set, every attempt is
/// kept for the caller.
pub(crate) fn select<'t>(table: &'t RouteTable, request: &RequestDescriptor, record: bool) -> Selection<'t> {
    let total_start = Instant::now();
    let mut metrics = DispatchMetrics::default();
    let segments = request.segment_refs();

    let collect_start = Instant::now();
    let candidates = collect(table, &segments, &mut metrics);
    metrics.collect = collect_start.elapsed();

    let validate_start = Instant::now();
    let mut attempts = Vec::new();
    let mut outcome = Dispatch::NoMatch;
    for candidate in candidates {
        metrics.tried += 1;
        let result = try_validate(table, &candidate, request.method(), &segments);
        let rejection = result.as_ref().err().copied();
        if let Some(rejection) = rejection {
            trace!(
                action = %table.actions[rejection.action()].name,
                ?rejection,
                path_len = candidate.path_len,
                "candidate rejected"
            );
        }
        if record {
            attempts.push(Attempt { candidate, rejection });
        }
        if let Ok(matched) = result {
            outcome = Dispatch::Matched(matched);
            break;
        }
    }
    metrics.validate = validate_start.elapsed();
    metrics.total = total_start.elapsed();

    match &outcome {
        Dispatch::Matched(m) => debug!(
            method = request.method(),
            path = %request.path(),
            action = %m.terminal.action.name,
            tried = metrics.tried,
            "request matched"
        ),
        Dispatch::NoMatch => debug!(
            method = request.method(),
            path = %request.path(),
            candidates = metrics.candidates(),
            "no matching action"
        ),
    }

    Selection { outcome, attempts, metrics }
}
