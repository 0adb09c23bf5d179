//! Route table and dispatch engine.
//!
//! This module is the core of the dispatcher. It is split into focused
//! submodules under `src/engine/`, re-exported here so public paths stay
//! stable (for example `crate::engine::RouteTable`).
//!
//! ## How the parts work together
//!
//! ```text
//! ActionSpec[] ──┐
//!                │  RouteTableBuilder::build        (compiled_routes.rs)
//!                │    - validate, resolve parents, reject cycles
//!                ├──▶ PathIndex   (path_index.rs)   flat actions by prefix
//!                └──▶ ChainIndex  (chains.rs)       chained actions as a forest
//!
//! request ── RequestDescriptor::parse (request.rs)
//!                │
//!                v
//!          selector::select (selector.rs)
//!            - collect: PathIndex + ChainIndex::resolve_chains
//!            - order:   longest path, bounded arity, recency
//!            - validate: methods, then try_match (args.rs) per link
//!                │
//!                v
//!          Dispatch::Matched | Dispatch::NoMatch
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled_routes.rs`: the immutable `RouteTable`, its builder and the
//!   build-time validation.
//! - `path_index.rs`: flat actions grouped by literal prefix and argument
//!   width.
//! - `chains.rs`: the chain forest and the feasibility walk producing
//!   `MatchCandidate`s.
//! - `selector.rs`: ordering and lazy validation of candidates.
//! - `args.rs`: the argument matcher (`try_match`).
//! - `request.rs`: splitting a raw request into method + segments.
//! - `reverse.rs`: building a request path for a named action.
//! - `describe.rs`: debug tables of the loaded actions.
//! - `metrics.rs`: timing and counters for a single dispatch.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events: `debug` for table builds and dispatch
//! outcomes, `trace` for every rejected candidate.

#[path = "engine/args.rs"]
mod args;
#[path = "engine/chains.rs"]
mod chains;
#[path = "engine/compiled_routes.rs"]
mod compiled_routes;
#[path = "engine/describe.rs"]
mod describe;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/path_index.rs"]
mod path_index;
#[path = "engine/request.rs"]
mod request;
#[path = "engine/reverse.rs"]
mod reverse;
#[path = "engine/selector.rs"]
mod selector;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use args::{Binding, BoundArgs, try_match};
pub use chains::{CandidateLink, MatchCandidate};
pub use compiled_routes::{ActionId, RouteTable, RouteTableBuilder};
pub use describe::{DescribedRoute, Description};
pub use metrics::DispatchMetrics;
pub use request::RequestDescriptor;
pub use selector::Rejection;
pub(crate) use selector::select;
