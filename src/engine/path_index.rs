//! Index over flat (non-chained) actions.
//!
//! Flat actions live in a trie keyed by literal path part, one level per
//! segment. Each node holds the actions whose literal path ends there, keyed
//! by argument width so a lookup only touches actions whose arity can fit the
//! segments left after the prefix:
//!
//! ```text
//! (root) ── "user" ─┬─ width 1   -> [/user/view_by_id, /user/view]
//!                   ├─ width 2   -> [/user/pair]
//!                   ├─ unbounded -> [/user/default]
//!                   └─ "profile" ── width 0 -> [/user/profile]
//! ```
//!
//! ## Invariants
//!
//! - Every list is sorted by descending registration order (ties: later arena
//!   index first), so no sorting happens per request.
//! - Request segments are compared one by one against path parts, exactly as
//!   chain links do; an empty segment or one containing `/` only matches an
//!   identical part, and table construction rejects such parts.

use std::collections::HashMap;

use super::compiled_routes::{ActionId, by_recency};
use crate::ActionSpec;

#[derive(Debug, Default)]
struct PrefixNode {
    children: HashMap<String, PrefixNode>,
    all: Vec<ActionId>,
    by_width: HashMap<usize, Vec<ActionId>>,
    unbounded: Vec<ActionId>,
}

impl PrefixNode {
    fn sort(&mut self, order: &impl Fn(&ActionId, &ActionId) -> std::cmp::Ordering) {
        self.all.sort_by(order);
        self.unbounded.sort_by(order);
        for ids in self.by_width.values_mut() {
            ids.sort_by(order);
        }
        for child in self.children.values_mut() {
            child.sort(order);
        }
    }
}

/// A flat action whose literal prefix matched the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlatCandidate {
    pub action: ActionId,
    pub prefix_len: usize,
}

#[derive(Debug, Default)]
pub(crate) struct PathIndex {
    root: PrefixNode,
}

impl PathIndex {
    pub(crate) fn new(actions: &[ActionSpec]) -> Self {
        let mut index = PathIndex::default();
        for (id, action) in actions.iter().enumerate().filter(|(_, a)| !a.is_chained()) {
            let mut node = &mut index.root;
            for part in &action.path_parts {
                node = node.children.entry(part.clone()).or_default();
            }
            node.all.push(id);
            match action.args.width() {
                Some(width) => node.by_width.entry(width).or_default().push(id),
                None => node.unbounded.push(id),
            }
        }
        index.root.sort(&by_recency(actions));
        index
    }

    /// Nodes whose literal path is a prefix of `segments`, longest first,
    /// with the number of segments they consumed.
    fn prefix_nodes<'a>(&'a self, segments: &[&str]) -> Vec<(usize, &'a PrefixNode)> {
        let mut nodes = vec![(0, &self.root)];
        let mut node = &self.root;
        for (depth, segment) in segments.iter().enumerate() {
            let Some(child) = node.children.get(*segment) else {
                break;
            };
            nodes.push((depth + 1, child));
            node = child;
        }
        nodes.reverse();
        nodes
    }

    /// Every flat action whose literal path is a prefix of `segments`, longest
    /// prefix first, most recently registered first within a prefix.
    pub(crate) fn candidates_for_literal_prefix(&self, segments: &[&str]) -> Vec<FlatCandidate> {
        self.prefix_nodes(segments)
            .into_iter()
            .flat_map(|(prefix_len, node)| node.all.iter().map(move |&action| FlatCandidate { action, prefix_len }))
            .collect()
    }

    /// Like [`Self::candidates_for_literal_prefix`], restricted to actions whose
    /// arity can consume exactly the remaining segments.
    pub(crate) fn feasible_candidates(&self, actions: &[ActionSpec], segments: &[&str]) -> Vec<FlatCandidate> {
        let order = by_recency(actions);
        let mut out = Vec::new();
        for (prefix_len, node) in self.prefix_nodes(segments) {
            let bounded = node.by_width.get(&(segments.len() - prefix_len)).map(Vec::as_slice).unwrap_or_default();
            let mut merged: Vec<ActionId> = bounded.iter().chain(&node.unbounded).copied().collect();
            merged.sort_by(&order);
            out.extend(merged.into_iter().map(|action| FlatCandidate { action, prefix_len }));
        }
        out
    }
}
