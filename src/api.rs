use crate::engine::{self, ActionId, BoundArgs, DispatchMetrics, Rejection, RequestDescriptor, RouteTable};
use crate::ActionSpec;

/// Whether a bound link consumed captures (chain link) or arguments
/// (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Capture,
    Args,
}

/// One action of a match together with the segments it bound.
#[derive(Debug, Clone)]
pub struct BoundLink<'t> {
    pub id: ActionId,
    pub action: &'t ActionSpec,
    pub kind: LinkKind,
    pub args: BoundArgs,
}

/// A successful dispatch.
///
/// `links` holds the chain links from root to just before the terminal (empty
/// for flat actions); `terminal` is the action that handles the request.
#[derive(Debug, Clone)]
pub struct Matched<'t> {
    pub links: Vec<BoundLink<'t>>,
    pub terminal: BoundLink<'t>,
    /// Segments matched by literal parts and captures.
    pub path_len: usize,
}

impl<'t> Matched<'t> {
    pub fn terminal(&self) -> &'t ActionSpec {
        self.terminal.action
    }

    /// Every action of the chain, root first, terminal last.
    pub fn actions(&self) -> impl Iterator<Item = &'t ActionSpec> + '_ {
        self.links.iter().chain(std::iter::once(&self.terminal)).map(|l| l.action)
    }

    /// Names of the chain's actions, root first.
    pub fn action_names(&self) -> Vec<&'t str> {
        self.actions().map(|a| a.name.as_str()).collect()
    }

    /// Captured segments of every link, flattened root to terminal.
    pub fn captures(&self) -> Vec<&str> {
        self.links.iter().flat_map(|l| l.args.values()).collect()
    }

    /// The terminal's bound arguments, flattened.
    pub fn args(&self) -> Vec<&str> {
        self.terminal.args.values()
    }
}

/// Result of matching a request against a [`RouteTable`].
#[derive(Debug, Clone)]
pub enum Dispatch<'t> {
    Matched(Matched<'t>),
    /// No candidate validated; map it to a not-found response.
    NoMatch,
}

impl<'t> Dispatch<'t> {
    pub fn matched(&self) -> Option<&Matched<'t>> {
        match self {
            Dispatch::Matched(m) => Some(m),
            Dispatch::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Dispatch::Matched(_))
    }

    /// Name of the terminal action, if any.
    pub fn action_name(&self) -> Option<&'t str> {
        self.matched().map(|m| m.terminal().name.as_str())
    }
}

/// A compact record of one validated candidate, for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSummary {
    /// Action names of the candidate, root first.
    pub chain: Vec<String>,
    pub path_len: usize,
    pub bounded: bool,
    /// `None` when this candidate was accepted.
    pub rejection: Option<Rejection>,
}

/// Result from [`RouteTable::dispatch_verbose`].
#[derive(Debug, Clone)]
pub struct DispatchTrace<'t> {
    pub outcome: Dispatch<'t>,
    /// Candidates in the order they were tried.
    pub attempts: Vec<AttemptSummary>,
    pub metrics: DispatchMetrics,
}

impl RouteTable {
    /// Select the single best action (or action chain) for `request`.
    pub fn dispatch(&self, request: &RequestDescriptor) -> Dispatch<'_> {
        engine::select(self, request, false).outcome
    }

    /// Like [`RouteTable::dispatch`], also returning every candidate tried and
    /// timing details.
    ///
    /// This is useful for route debugging; the plain [`RouteTable::dispatch`]
    /// path does not keep the attempt list.
    pub fn dispatch_verbose(&self, request: &RequestDescriptor) -> DispatchTrace<'_> {
        let selection = engine::select(self, request, true);
        let attempts = selection
            .attempts
            .into_iter()
            .map(|attempt| AttemptSummary {
                chain: attempt.candidate.links.iter().map(|l| self.actions[l.action].name.clone()).collect(),
                path_len: attempt.candidate.path_len,
                bounded: attempt.candidate.bounded,
                rejection: attempt.rejection,
            })
            .collect();
        DispatchTrace { outcome: selection.outcome, attempts, metrics: selection.metrics }
    }
}

/// Match a request given as a method and pre-split path segments.
///
/// # Example
/// ```
/// use chainroute::{ActionSpec, RouteTable, match_request};
///
/// let table = RouteTable::new([ActionSpec::new("/about").path("about").args(0)]).unwrap();
/// assert_eq!(match_request("GET", &["about"], &table).action_name(), Some("/about"));
/// assert!(!match_request("GET", &["about", "us"], &table).is_match());
/// ```
pub fn match_request<'t, S: AsRef<str>>(method: &str, segments: &[S], table: &'t RouteTable) -> Dispatch<'t> {
    table.dispatch(&RequestDescriptor::new(method, segments.iter().map(|s| s.as_ref().to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MethodSet, constraints};

    fn table() -> RouteTable {
        RouteTable::new([
            ActionSpec::new("/default"),
            ActionSpec::new("/user/base").path("user").chained("/").capture([constraints::int()]),
            ActionSpec::new("/user/edit").path("edit").chained("/user/base").args(0).methods(MethodSet::POST),
            ActionSpec::new("/user/show").chained("/user/base").args(0),
        ])
        .unwrap()
    }

    #[test]
    fn matched_exposes_chain_captures_and_args() {
        let table = table();
        let req = RequestDescriptor::parse("POST", "/user/7/edit");
        let hit = table.dispatch(&req);
        let m = hit.matched().unwrap();
        assert_eq!(m.action_names(), vec!["/user/base", "/user/edit"]);
        assert_eq!(m.captures(), vec!["7"]);
        assert!(m.args().is_empty());
        assert_eq!(m.links[0].kind, LinkKind::Capture);
        assert_eq!(m.terminal.kind, LinkKind::Args);
        assert_eq!(m.path_len, 3);
    }

    #[test]
    fn verbose_trace_lists_rejected_candidates_in_order() {
        let table = table();
        let req = RequestDescriptor::parse("GET", "/user/7/edit");
        let trace = table.dispatch_verbose(&req);

        assert_eq!(trace.outcome.action_name(), Some("/default"));
        assert_eq!(trace.attempts.len(), 2);
        assert_eq!(trace.attempts[0].chain, vec!["/user/base", "/user/edit"]);
        assert_eq!(trace.attempts[0].rejection, Some(Rejection::Method(2)));
        assert_eq!(trace.attempts[1].rejection, None);
        assert_eq!(trace.metrics.tried, 2);
        assert_eq!(trace.metrics.candidates(), 2);
        assert!(trace.metrics.collect <= trace.metrics.total);
    }

    #[test]
    fn match_request_accepts_plain_segments() {
        let table = table();
        let hit = match_request("GET", &["user", "7"], &table);
        assert_eq!(hit.action_name(), Some("/user/show"));
        assert!(match_request("GET", &[] as &[&str], &table).is_match());
    }
}
