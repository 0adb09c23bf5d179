//! Debug tables of the loaded actions.
//!
//! ```text
//! Path                       Private
//! GET /user/*                /user/view
//! /user/{Int}                /user/view_by_id
//!
//! Path Spec                  Private
//! /user/*/edit/*             /user/base (1)
//!                            => /user/edit (1)
//! ```
//!
//! Rows are plain data; `debug_report` in the binary does the rendering.

use super::compiled_routes::RouteTable;
use crate::{Arity, MethodSet};

/// One row of a [`Description`] table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedRoute {
    /// The request shape, e.g. `/user/*/edit/{Int}`, prefixed with the
    /// accepted methods when restricted.
    pub path_spec: String,
    /// Private names: one line for a flat action, one line per link for a
    /// chain.
    pub privates: Vec<String>,
    /// False when the chain's links accept disjoint method sets, so no
    /// request can reach the endpoint.
    pub reachable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub paths: Vec<DescribedRoute>,
    pub chains: Vec<DescribedRoute>,
}

impl RouteTable {
    /// Describe every flat action and every complete chain, sorted by path
    /// spec.
    pub fn describe(&self) -> Description {
        let mut paths: Vec<DescribedRoute> = self
            .actions
            .iter()
            .filter(|a| !a.is_chained())
            .map(|action| {
                let mut tokens: Vec<String> = action.path_parts.clone();
                push_arity(&mut tokens, &action.args);
                DescribedRoute {
                    path_spec: with_methods(action.methods, render(&tokens)),
                    privates: vec![action.name.clone()],
                    reachable: true,
                }
            })
            .collect();

        let mut chains: Vec<DescribedRoute> = (0..self.actions.len())
            .filter(|&id| self.actions[id].is_chained() && !self.actions[id].is_link())
            .map(|endpoint| {
                let chain = self.chain_of(endpoint);
                let mut tokens = Vec::new();
                let mut privates = Vec::with_capacity(chain.len());
                let mut methods = Some(MethodSet::empty());
                for (position, &id) in chain.iter().enumerate() {
                    let action = &self.actions[id];
                    tokens.extend(action.path_parts.iter().cloned());
                    let arity = action.capture_arity().unwrap_or(&action.args);
                    push_arity(&mut tokens, arity);
                    methods = methods.and_then(|acc| narrow(acc, action.methods));

                    let arrow = match position {
                        0 => "",
                        _ if id == endpoint => "=> ",
                        _ => "-> ",
                    };
                    privates.push(format!("{arrow}{} ({})", action.name, count(arity)));
                }
                let path_spec = match methods {
                    Some(methods) => with_methods(methods, render(&tokens)),
                    None => format!("(unreachable) {}", render(&tokens)),
                };
                DescribedRoute { path_spec, privates, reachable: methods.is_some() }
            })
            .collect();

        paths.sort_by(|a, b| a.path_spec.cmp(&b.path_spec));
        chains.sort_by(|a, b| a.path_spec.cmp(&b.path_spec));
        Description { paths, chains }
    }
}

fn push_arity(tokens: &mut Vec<String>, arity: &Arity) {
    match arity {
        Arity::Exact(n) => tokens.extend(std::iter::repeat_n("*".to_string(), *n)),
        Arity::Any => tokens.push("...".to_string()),
        Arity::Typed(constraints) => tokens.extend(constraints.iter().map(|c| format!("{{{}}}", c.name()))),
    }
}

fn render(tokens: &[String]) -> String {
    format!("/{}", tokens.join("/"))
}

fn with_methods(methods: MethodSet, spec: String) -> String {
    if methods.is_empty() { spec } else { format!("{} {spec}", methods.names().join("|")) }
}

/// Methods a request must use to pass every action of a chain; the empty set
/// means any method. `None` when the two restrictions share no method.
fn narrow(acc: MethodSet, next: MethodSet) -> Option<MethodSet> {
    match (acc.is_empty(), next.is_empty()) {
        (true, _) => Some(next),
        (false, true) => Some(acc),
        (false, false) => Some(acc & next).filter(|both| !both.is_empty()),
    }
}

fn count(arity: &Arity) -> String {
    arity.width().map_or_else(|| "...".to_string(), |w| w.to_string())
}
