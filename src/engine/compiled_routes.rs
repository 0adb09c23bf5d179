//! Route table construction and validation.
//!
//! This module holds the *static* side of the dispatcher: the immutable
//! [`RouteTable`] built once from every registered [`ActionSpec`], and the
//! indexes derived from it.
//!
//! Dispatch is split into two phases:
//!
//! 1. **Build** (this module): validate the registrations, resolve chain
//!    parents by name into arena indices, and build the flat-action
//!    [`PathIndex`] and the [`ChainIndex`].
//! 2. **Match** (see `selector.rs`): per request, collect candidates from both
//!    indexes, order them, and validate them lazily.
//!
//! ## Invariants
//!
//! - `ActionId` is an index into `RouteTable::actions`; `parents` is aligned
//!   with it.
//! - Chain parentage is acyclic, only links have children, and no link
//!   captures an unbounded number of segments. Violations are reported as
//!   [`RouteTableError`] here and never surface at request time.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::chains::ChainIndex;
use super::path_index::PathIndex;
use crate::{ActionSpec, Arity, CHAIN_ROOT, RouteTableError};

/// Action identifier (index into the route table arena).
pub type ActionId = usize;

/// Most recently registered first; equal orders fall back to the later arena
/// index.
pub(crate) fn by_recency(actions: &[ActionSpec]) -> impl Fn(&ActionId, &ActionId) -> Ordering + '_ {
    |a, b| actions[*b].registration_order.cmp(&actions[*a].registration_order).then(b.cmp(a))
}

/// Collects [`ActionSpec`]s before the table is frozen.
///
/// [`RouteTableBuilder::register`] stamps a monotonic registration order,
/// mirroring declaration order; [`RouteTableBuilder::insert`] keeps the order
/// the caller already assigned.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    actions: Vec<ActionSpec>,
    next_order: u64,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec` as the most recently defined action.
    pub fn register(&mut self, mut spec: ActionSpec) -> &mut Self {
        spec.registration_order = self.next_order;
        self.insert(spec)
    }

    /// Add `spec` with its own `registration_order`.
    pub fn insert(&mut self, spec: ActionSpec) -> &mut Self {
        self.next_order = self.next_order.max(spec.registration_order.saturating_add(1));
        self.actions.push(spec);
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Validate the registrations and freeze them into a [`RouteTable`].
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let actions = self.actions;
        let mut by_name: HashMap<String, ActionId> = HashMap::with_capacity(actions.len());

        for (id, action) in actions.iter().enumerate() {
            validate_action(action)?;
            if by_name.insert(action.name.clone(), id).is_some() {
                return Err(RouteTableError::DuplicateAction(action.name.clone()));
            }
        }

        let parents = resolve_parents(&actions, &by_name)?;
        check_acyclic(&actions, &parents)?;

        let index = PathIndex::new(&actions);
        let chains = ChainIndex::new(&actions, &parents);

        debug!(
            actions = actions.len(),
            flat = actions.iter().filter(|a| !a.is_chained()).count(),
            chain_roots = chains.roots().len(),
            "route table built"
        );

        Ok(RouteTable { actions, parents, by_name, index, chains })
    }
}

/// The immutable, fully indexed collection of registered actions.
///
/// Read-only after [`RouteTableBuilder::build`]; share it freely between
/// threads (for example behind an `Arc`).
#[derive(Debug)]
pub struct RouteTable {
    pub(crate) actions: Vec<ActionSpec>,
    pub(crate) parents: Vec<Option<ActionId>>,
    pub(crate) by_name: HashMap<String, ActionId>,
    pub(crate) index: PathIndex,
    pub(crate) chains: ChainIndex,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Build a table registering `specs` in iteration order.
    pub fn new(specs: impl IntoIterator<Item = ActionSpec>) -> Result<Self, RouteTableError> {
        let mut builder = RouteTableBuilder::new();
        for spec in specs {
            builder.register(spec);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionSpec> {
        self.actions.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ActionId> {
        self.by_name.get(name).copied()
    }

    pub fn action(&self, name: &str) -> Option<&ActionSpec> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionSpec> {
        self.actions.iter()
    }

    /// Parent link of a chained action (`None` for roots and flat actions).
    pub fn parent_of(&self, id: ActionId) -> Option<ActionId> {
        self.parents.get(id).copied().flatten()
    }

    /// The chain from root to `id`, inclusive.
    pub fn chain_of(&self, id: ActionId) -> Vec<ActionId> {
        let mut out = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            out.push(parent);
            current = parent;
        }
        out.reverse();
        out
    }

    /// Flat actions whose literal path is a prefix of `segments`, longest
    /// prefix first, most recently registered first within a prefix.
    pub fn prefix_candidates(&self, segments: &[&str]) -> Vec<&ActionSpec> {
        self.index.candidates_for_literal_prefix(segments).into_iter().map(|c| &self.actions[c.action]).collect()
    }
}

fn validate_action(action: &ActionSpec) -> Result<(), RouteTableError> {
    if action.name == CHAIN_ROOT {
        return Err(RouteTableError::ReservedName(action.name.clone()));
    }
    if let Some(segment) = action.path_parts.iter().find(|p| p.is_empty() || p.contains('/')) {
        return Err(RouteTableError::InvalidPathSegment { action: action.name.clone(), segment: segment.clone() });
    }

    let capture = action.capture_arity();
    if matches!(capture, Some(Arity::Any)) {
        return Err(RouteTableError::UnboundedCapture(action.name.clone()));
    }
    for arity in [Some(&action.args), capture].into_iter().flatten() {
        let Arity::Typed(constraints) = arity else {
            continue;
        };
        if let Some(c) = constraints.iter().find(|c| c.width() == 0) {
            return Err(RouteTableError::ZeroWidthConstraint {
                action: action.name.clone(),
                constraint: c.name().to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_parents(
    actions: &[ActionSpec],
    by_name: &HashMap<String, ActionId>,
) -> Result<Vec<Option<ActionId>>, RouteTableError> {
    let mut parents = Vec::with_capacity(actions.len());
    for action in actions {
        let Some(chain) = &action.chain else {
            parents.push(None);
            continue;
        };
        if chain.parent == CHAIN_ROOT {
            parents.push(None);
            continue;
        }
        let parent = *by_name.get(&chain.parent).ok_or_else(|| RouteTableError::UnknownParent {
            action: action.name.clone(),
            parent: chain.parent.clone(),
        })?;
        if !actions[parent].is_link() {
            return Err(RouteTableError::InvalidParent { action: action.name.clone(), parent: chain.parent.clone() });
        }
        parents.push(Some(parent));
    }
    Ok(parents)
}

/// Every chained action must reach a root by following parents.
fn check_acyclic(actions: &[ActionSpec], parents: &[Option<ActionId>]) -> Result<(), RouteTableError> {
    // 0 = unvisited, 1 = on the current walk, 2 = known to reach a root.
    let mut state = vec![0u8; actions.len()];
    for start in 0..actions.len() {
        let mut walk: Vec<ActionId> = Vec::new();
        let mut current = Some(start);
        while let Some(id) = current {
            match state[id] {
                2 => break,
                1 => {
                    let from = walk.iter().position(|&w| w == id).unwrap_or_default();
                    let mut cycle: Vec<String> = walk[from..].iter().map(|&w| actions[w].name.clone()).collect();
                    cycle.push(actions[id].name.clone());
                    return Err(RouteTableError::CyclicChain(cycle));
                }
                _ => {
                    state[id] = 1;
                    walk.push(id);
                    current = parents[id];
                }
            }
        }
        for id in walk {
            state[id] = 2;
        }
    }
    Ok(())
}
