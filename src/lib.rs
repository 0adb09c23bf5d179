//! A deterministic URL-to-action dispatcher.
//!
//! `chainroute` takes an immutable table of registered actions and resolves an
//! incoming request (method + path) to exactly one action, or one chain of
//! actions, together with the path segments each of them consumed.
//!
//! Two kinds of actions can be registered:
//!
//! - **Flat** actions: a literal path prefix followed by an argument
//!   [`Arity`] (`Args(2)`, unbounded `Args`, typed `Args(Int)`).
//! - **Chained** actions: links that each consume a literal path part plus a
//!   fixed number of captured segments, ending in an endpoint that consumes
//!   its own arguments.
//!
//! Resolution follows three rules, in this order:
//!
//! 1. The longest matched path wins (everything the request consumed except
//!    the terminal action's own arguments).
//! 2. Among equally long matches, bounded arities beat unbounded `Args`.
//! 3. The most recently registered action wins, recursively through chain
//!    links.
//!
//! Type constraints are only evaluated once a candidate is being validated;
//! a failed check simply falls through to the next candidate.
//!
//! ```
//! use chainroute::{ActionSpec, RequestDescriptor, RouteTable, constraints};
//!
//! let table = RouteTable::new([
//!     ActionSpec::new("/user/view").path("user").args(1),
//!     ActionSpec::new("/user/view_by_id").path("user").args([constraints::int()]),
//! ])
//! .unwrap();
//!
//! let hit = table.dispatch(&RequestDescriptor::parse("GET", "/user/42"));
//! assert_eq!(hit.action_name(), Some("/user/view_by_id"));
//!
//! let hit = table.dispatch(&RequestDescriptor::parse("GET", "/user/bob"));
//! assert_eq!(hit.action_name(), Some("/user/view"));
//! ```

extern crate self as chainroute;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod config;
pub mod constraints;
mod engine;
mod error;

pub use api::{AttemptSummary, BoundLink, Dispatch, DispatchTrace, LinkKind, Matched, match_request};
pub use config::{ActionConfig, ArityConfig, ConfigError, ConstraintConfig, RouteFile, load_route_file, parse_route_file};
pub use engine::{
    ActionId, Binding, BoundArgs, CandidateLink, Description, DescribedRoute, DispatchMetrics, MatchCandidate,
    Rejection, RequestDescriptor, RouteTable, RouteTableBuilder, try_match,
};
pub use error::{ReverseError, RouteTableError};

/// Parent name marking the root of a chain (`Chained('/')`).
pub const CHAIN_ROOT: &str = "/";

// --- HTTP methods -------------------------------------------------------------

bitflags::bitflags! {
    /// HTTP methods an action accepts. The empty set accepts every method.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodSet: u16 {
        const GET     = 1 << 0;
        const HEAD    = 1 << 1;
        const POST    = 1 << 2;
        const PUT     = 1 << 3;
        const PATCH   = 1 << 4;
        const DELETE  = 1 << 5;
        const OPTIONS = 1 << 6;
    }
}

impl MethodSet {
    /// Look up a single method by name, ignoring ASCII case.
    pub fn from_method(method: &str) -> Option<Self> {
        Self::from_name(&method.to_ascii_uppercase())
    }

    /// Whether a request with `method` may reach an action restricted to `self`.
    ///
    /// Methods outside the known set only reach unrestricted actions.
    pub fn accepts(&self, method: &str) -> bool {
        self.is_empty() || Self::from_method(method).is_some_and(|m| self.contains(m))
    }

    /// Names of the contained methods, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

// --- Constraints --------------------------------------------------------------

/// Predicate contract for constraints supplied by an external type library.
///
/// `check` always receives exactly [`SegmentCheck::width`] segments.
pub trait SegmentCheck: Send + Sync {
    /// Number of consecutive segments this check covers.
    fn width(&self) -> usize {
        1
    }

    /// Returns true when the segments satisfy the constraint.
    fn check(&self, values: &[&str]) -> bool;
}

/// How a [`Constraint`] evaluates its segments.
#[derive(Clone)]
pub enum Check {
    /// A predicate over a single segment.
    Predicate(fn(&str) -> bool),
    /// An anchored regular expression matched against a single segment.
    Regex(Regex),
    /// A predicate over a fixed-width window of segments.
    Tuple(usize, fn(&[&str]) -> bool),
    /// A check provided by an external library.
    External(Arc<dyn SegmentCheck>),
}

/// A named, pure predicate over one segment or a fixed-width window of
/// segments (for example `Int`, or a `Ymd` tuple spanning three segments).
#[derive(Clone)]
pub struct Constraint {
    name: Cow<'static, str>,
    check: Check,
}

impl Constraint {
    /// A single-segment constraint backed by a plain function.
    pub fn predicate(name: impl Into<Cow<'static, str>>, check: fn(&str) -> bool) -> Self {
        Self { name: name.into(), check: Check::Predicate(check) }
    }

    /// A single-segment constraint that must match `pattern` in full.
    pub fn pattern(name: impl Into<Cow<'static, str>>, pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { name: name.into(), check: Check::Regex(anchored) })
    }

    /// A constraint spanning `width` consecutive segments.
    pub fn tuple(name: impl Into<Cow<'static, str>>, width: usize, check: fn(&[&str]) -> bool) -> Self {
        Self { name: name.into(), check: Check::Tuple(width, check) }
    }

    /// Wrap a check resolved by an external constraint library.
    pub fn external(name: impl Into<Cow<'static, str>>, check: Arc<dyn SegmentCheck>) -> Self {
        Self { name: name.into(), check: Check::External(check) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    /// Number of segments consumed by this constraint.
    pub fn width(&self) -> usize {
        match &self.check {
            Check::Predicate(_) | Check::Regex(_) => 1,
            Check::Tuple(width, _) => *width,
            Check::External(check) => check.width(),
        }
    }

    /// Evaluate the constraint. A window of the wrong size never matches.
    pub fn check(&self, values: &[&str]) -> bool {
        if values.len() != self.width() {
            return false;
        }
        match &self.check {
            Check::Predicate(f) => f(values[0]),
            Check::Regex(re) => re.is_match(values[0]),
            Check::Tuple(_, f) => f(values),
            Check::External(check) => check.check(values),
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint").field("name", &self.name).field("width", &self.width()).finish()
    }
}

// --- Arity --------------------------------------------------------------------

/// The shape of the segments an action consumes as arguments or captures.
#[derive(Debug, Clone, Default)]
pub enum Arity {
    /// Exactly `N` untyped segments (`Args(N)`).
    Exact(usize),
    /// Any number of segments, including none (`Args` without a count).
    #[default]
    Any,
    /// A sequence of typed constraints (`Args(Int, Str)`); each constraint may
    /// span several segments.
    Typed(Vec<Constraint>),
}

impl Arity {
    /// Number of segments consumed, or `None` when unbounded.
    pub fn width(&self) -> Option<usize> {
        match self {
            Arity::Exact(n) => Some(*n),
            Arity::Any => None,
            Arity::Typed(constraints) => Some(constraints.iter().map(Constraint::width).sum()),
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, Arity::Any)
    }

    /// Whether `count` segments could satisfy this arity (types not checked).
    pub fn fits(&self, count: usize) -> bool {
        self.width().is_none_or(|width| width == count)
    }

    /// Short label used by debug output, e.g. `1`, `...` or `Int,Int`.
    pub fn label(&self) -> String {
        match self {
            Arity::Exact(n) => n.to_string(),
            Arity::Any => "...".to_string(),
            Arity::Typed(constraints) => constraints.iter().map(Constraint::name).collect::<Vec<_>>().join(","),
        }
    }
}

impl From<usize> for Arity {
    fn from(n: usize) -> Self {
        Arity::Exact(n)
    }
}

impl From<Constraint> for Arity {
    fn from(constraint: Constraint) -> Self {
        Arity::Typed(vec![constraint])
    }
}

impl From<Vec<Constraint>> for Arity {
    fn from(constraints: Vec<Constraint>) -> Self {
        Arity::Typed(constraints)
    }
}

impl<const N: usize> From<[Constraint; N]> for Arity {
    fn from(constraints: [Constraint; N]) -> Self {
        Arity::Typed(constraints.into())
    }
}

// --- Actions ------------------------------------------------------------------

/// Position of a chained action inside its chain.
#[derive(Debug, Clone)]
pub enum ChainRole {
    /// A non-terminal link consuming `capture` segments (`CaptureArgs`).
    Link { capture: Arity },
    /// A terminal action consuming its own `args`.
    Endpoint,
}

/// Chain membership of an action (`Chained('parent')`).
#[derive(Debug, Clone)]
pub struct ChainSpec {
    /// Name of the parent link, or [`CHAIN_ROOT`] for a chain root.
    pub parent: String,
    pub role: ChainRole,
}

/// A registered endpoint, as handed over by the registration facility.
#[derive(Debug, Clone)]
pub struct ActionSpec {
    /// Unique private path of the action, e.g. `/user/view`.
    pub name: String,
    /// Literal path segments matched before arguments or captures.
    pub path_parts: Vec<String>,
    /// Terminal arity; ignored for chain links.
    pub args: Arity,
    /// Accepted methods; empty accepts any.
    pub methods: MethodSet,
    /// Tie-break order; greater means defined later.
    pub registration_order: u64,
    pub chain: Option<ChainSpec>,
}

impl ActionSpec {
    /// A flat action with no path parts and unbounded arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path_parts: Vec::new(),
            args: Arity::Any,
            methods: MethodSet::empty(),
            registration_order: 0,
            chain: None,
        }
    }

    /// Set the literal path parts from a `/`-separated path.
    ///
    /// Leading and trailing slashes are ignored; empty inner segments are kept
    /// so that table construction can reject them.
    pub fn path(mut self, path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        self.path_parts = if trimmed.is_empty() { Vec::new() } else { trimmed.split('/').map(str::to_string).collect() };
        self
    }

    pub fn args(mut self, args: impl Into<Arity>) -> Self {
        self.args = args.into();
        self
    }

    pub fn methods(mut self, methods: MethodSet) -> Self {
        self.methods = methods;
        self
    }

    pub fn order(mut self, order: u64) -> Self {
        self.registration_order = order;
        self
    }

    /// Attach the action to a chain under `parent` ([`CHAIN_ROOT`] for a root).
    /// Keeps the link role if [`ActionSpec::capture`] was called first.
    pub fn chained(mut self, parent: impl Into<String>) -> Self {
        let role = self.chain.take().map_or(ChainRole::Endpoint, |c| c.role);
        self.chain = Some(ChainSpec { parent: parent.into(), role });
        self
    }

    /// Make the action a chain link capturing `capture` segments.
    /// Defaults the parent to [`CHAIN_ROOT`] when none was set.
    pub fn capture(mut self, capture: impl Into<Arity>) -> Self {
        let parent = self.chain.take().map_or_else(|| CHAIN_ROOT.to_string(), |c| c.parent);
        self.chain = Some(ChainSpec { parent, role: ChainRole::Link { capture: capture.into() } });
        self
    }

    pub fn is_chained(&self) -> bool {
        self.chain.is_some()
    }

    /// Capture arity when this action is a chain link.
    pub fn capture_arity(&self) -> Option<&Arity> {
        match &self.chain {
            Some(ChainSpec { role: ChainRole::Link { capture }, .. }) => Some(capture),
            _ => None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.capture_arity().is_some()
    }
}
