//! Chained action resolution.
//!
//! Chained actions form a forest: every chain starts at a root (parent `/`),
//! passes through zero or more links, and ends at an endpoint. Each link
//! consumes its literal path part and then a fixed number of captured
//! segments; the endpoint consumes its path part and its own arguments.
//!
//! ```text
//! /user/42/edit/x   roots: [/user/base]
//!
//! /user/base  part "user"  capture 1  -> [42]
//!   ├─ /user/edit  part "edit"  args 1    -> [x]     candidate (path_len 3)
//!   └─ /user/any   part ""      args ...  -> [edit, x] candidate (path_len 2)
//! ```
//!
//! Resolution here is a *feasibility* walk: literal parts must match and the
//! segment counts must add up to the request length, but capture and argument
//! types are left to the selector. A chain with a bad `Int` capture is still a
//! candidate; it is rejected only if it is actually tried.
//!
//! ## Ordering
//!
//! Children are visited in reverse registration order at every level, so the
//! depth-first walk emits the most recently defined sibling first. The result
//! is then grouped (stable) by matched path length, longest first.

use super::compiled_routes::{ActionId, by_recency};
use crate::{ActionSpec, ChainRole};

/// One action of a candidate together with the request segments it consumes
/// after its literal path part (captures for a link, arguments for a
/// terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateLink {
    pub action: ActionId,
    pub start: usize,
    pub end: usize,
}

/// A structurally eligible match, before type and method validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// Actions from chain root to terminal; a single entry for flat actions.
    pub links: Vec<CandidateLink>,
    /// Segments matched by literal parts and captures, i.e. everything except
    /// the terminal's own arguments.
    pub path_len: usize,
    /// Whether the terminal's arity is bounded (not plain `Args`).
    pub bounded: bool,
    /// Registration orders from root to terminal.
    pub rank: Vec<u64>,
}

impl MatchCandidate {
    pub(crate) fn new(links: Vec<CandidateLink>, path_len: usize, actions: &[ActionSpec]) -> Self {
        let rank = links.iter().map(|l| actions[l.action].registration_order).collect();
        let bounded = links.last().is_some_and(|l| actions[l.action].args.is_bounded());
        Self { links, path_len, bounded, rank }
    }

    /// The terminal action id.
    pub fn terminal(&self) -> Option<ActionId> {
        self.links.last().map(|l| l.action)
    }
}

/// Walk state for the depth-first traversal.
///
/// ```text
/// node: /user/edit, position: 2, links: [ /user/base 1..2 ]
/// ```
struct PartialChain {
    node: ActionId,
    position: usize,
    links: Vec<CandidateLink>,
}

#[derive(Debug, Default)]
pub(crate) struct ChainIndex {
    roots: Vec<ActionId>,
    children: Vec<Vec<ActionId>>,
}

impl ChainIndex {
    /// Build from the arena and the already resolved parent of every action.
    pub(crate) fn new(actions: &[ActionSpec], parents: &[Option<ActionId>]) -> Self {
        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); actions.len()];
        for (id, _) in actions.iter().enumerate().filter(|(_, a)| a.is_chained()) {
            match parents[id] {
                Some(parent) => children[parent].push(id),
                None => roots.push(id),
            }
        }
        let order = by_recency(actions);
        roots.sort_by(&order);
        for list in &mut children {
            list.sort_by(&order);
        }
        ChainIndex { roots, children }
    }

    pub(crate) fn children_of(&self, id: ActionId) -> &[ActionId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn roots(&self) -> &[ActionId] {
        &self.roots
    }

    /// Every root-to-endpoint chain whose segment consumption equals
    /// `segments.len()`.
    pub(crate) fn resolve_chains(&self, actions: &[ActionSpec], segments: &[&str]) -> Vec<MatchCandidate> {
        let mut out = Vec::new();
        // Push in reverse so the most recent root is explored first (LIFO).
        let mut stack: Vec<PartialChain> =
            self.roots.iter().rev().map(|&node| PartialChain { node, position: 0, links: Vec::new() }).collect();

        while let Some(partial) = stack.pop() {
            let action = &actions[partial.node];
            let Some(after_part) = match_literal(&action.path_parts, segments, partial.position) else {
                continue;
            };

            match action.chain.as_ref().map(|c| &c.role) {
                Some(ChainRole::Link { capture }) => {
                    // Unbounded captures are rejected when the table is built.
                    let end = after_part + capture.width().unwrap_or_default();
                    if end > segments.len() {
                        continue;
                    }
                    for &child in self.children_of(partial.node).iter().rev() {
                        let mut links = partial.links.clone();
                        links.push(CandidateLink { action: partial.node, start: after_part, end });
                        stack.push(PartialChain { node: child, position: end, links });
                    }
                }
                Some(ChainRole::Endpoint) => {
                    if !action.args.fits(segments.len() - after_part) {
                        continue;
                    }
                    let mut links = partial.links;
                    links.push(CandidateLink { action: partial.node, start: after_part, end: segments.len() });
                    out.push(MatchCandidate::new(links, after_part, actions));
                }
                None => {}
            }
        }

        out.sort_by(|a, b| b.path_len.cmp(&a.path_len));
        out
    }
}

/// Match `parts` literally at `position`; returns the position after them.
fn match_literal(parts: &[String], segments: &[&str], position: usize) -> Option<usize> {
    let end = position + parts.len();
    let window = segments.get(position..end)?;
    parts.iter().zip(window).all(|(part, seg)| part == seg).then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    fn resolve(actions: &[ActionSpec], parents: &[Option<ActionId>], path: &[&str]) -> Vec<Vec<ActionId>> {
        ChainIndex::new(actions, parents)
            .resolve_chains(actions, path)
            .into_iter()
            .map(|c| c.links.iter().map(|l| l.action).collect())
            .collect()
    }

    #[test]
    fn captures_are_counted_not_typed() {
        let actions = vec![
            ActionSpec::new("/base").path("user").capture([constraints::int()]).order(0),
            ActionSpec::new("/edit").path("edit").chained("/base").args(0).order(1),
        ];
        let parents = [None, Some(0)];
        assert_eq!(resolve(&actions, &parents, &["user", "bob", "edit"]), vec![vec![0, 1]]);
        assert!(resolve(&actions, &parents, &["user", "edit"]).is_empty());
    }

    #[test]
    fn siblings_are_visited_most_recent_first() {
        let actions = vec![
            ActionSpec::new("/base").path("a").capture(0).order(0),
            ActionSpec::new("/x").chained("/base").args(1).order(1),
            ActionSpec::new("/y").chained("/base").args(1).order(2),
            ActionSpec::new("/z").chained("/base").args(1).order(3),
        ];
        let parents = [None, Some(0), Some(0), Some(0)];
        assert_eq!(resolve(&actions, &parents, &["a", "1"]), vec![vec![0, 3], vec![0, 2], vec![0, 1]]);
    }

    #[test]
    fn longer_paths_come_first() {
        let actions = vec![
            ActionSpec::new("/root").path("docs").capture(0).order(0),
            ActionSpec::new("/page").path("page").chained("/root").args(1).order(1),
            ActionSpec::new("/rest").chained("/root").order(2),
        ];
        let parents = [None, Some(0), Some(0)];
        let candidates = ChainIndex::new(&actions, &parents).resolve_chains(&actions, &["docs", "page", "intro"]);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].path_len, 2);
        assert_eq!(candidates[0].terminal(), Some(1));
        assert_eq!(candidates[1].path_len, 1);
        assert!(!candidates[1].bounded);
    }

    #[test]
    fn endpoint_root_forms_a_single_link_chain() {
        let actions = vec![ActionSpec::new("/about").path("about").chained("/").args(0)];
        let candidates = ChainIndex::new(&actions, &[None]).resolve_chains(&actions, &["about"]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].rank, vec![0]);
    }
}
