//! Error types.
//!
//! Matching itself never fails: a request that fits no action is a normal
//! [`Dispatch::NoMatch`](crate::Dispatch::NoMatch). Errors only exist where the
//! *configuration* is wrong (building a table) or where a caller asks for
//! something the table cannot provide (reverse routing).

use thiserror::Error;

/// A registration that cannot be turned into a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("action `{0}` is registered more than once")]
    DuplicateAction(String),

    #[error("`{0}` is reserved for the chain root and cannot name an action")]
    ReservedName(String),

    #[error("action `{action}` has an invalid path segment `{segment}`")]
    InvalidPathSegment { action: String, segment: String },

    #[error("action `{action}` is chained to unknown action `{parent}`")]
    UnknownParent { action: String, parent: String },

    #[error("action `{action}` is chained to `{parent}`, which is not a chain link (no CaptureArgs)")]
    InvalidParent { action: String, parent: String },

    #[error("chained actions form a cycle: {}", .0.join(" -> "))]
    CyclicChain(Vec<String>),

    #[error("chain link `{0}` captures an unbounded number of segments")]
    UnboundedCapture(String),

    #[error("constraint `{constraint}` on action `{action}` consumes no segments")]
    ZeroWidthConstraint { action: String, constraint: String },
}

/// Failure to build a request path for an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no action named `{0}`")]
    UnknownAction(String),

    #[error("`{0}` is a chain link, not an endpoint")]
    NotAnEndpoint(String),

    #[error("`{action}` expects {expected} captured segments, got {actual}")]
    CaptureCount { action: String, expected: usize, actual: usize },

    #[error("`{action}` does not accept {actual} arguments (expects {expected})")]
    ArgCount { action: String, expected: String, actual: usize },

    #[error("`{action}` rejects {values:?}")]
    Rejected { action: String, values: Vec<String> },
}
