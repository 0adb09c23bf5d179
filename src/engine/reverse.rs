//! Reverse routing: build the request path that reaches a named action.
//!
//! ```text
//! /user/base  part "user"  capture Int
//!   └─ /user/edit  part "edit"  args 1
//!
//! path_for("/user/edit", ["42"], ["name"]) -> "/user/42/edit/name"
//! ```
//!
//! Captures are handed out root to terminal, each link taking exactly its
//! capture width. Typed captures and arguments are checked with the same
//! matcher the dispatcher uses, so a built path always dispatches back to an
//! action of the same shape (a more recent or longer match may still win).

use super::args::try_match;
use super::compiled_routes::RouteTable;
use crate::{Arity, ReverseError};

impl RouteTable {
    /// Build the path for the flat action or chain endpoint called `name`.
    pub fn path_for(&self, name: &str, captures: &[&str], args: &[&str]) -> Result<String, ReverseError> {
        let id = self.id_of(name).ok_or_else(|| ReverseError::UnknownAction(name.to_string()))?;
        let action = &self.actions[id];
        if action.is_link() {
            return Err(ReverseError::NotAnEndpoint(name.to_string()));
        }

        let chain = self.chain_of(id);
        let links = &chain[..chain.len() - 1];
        let expected: usize =
            links.iter().filter_map(|&l| self.actions[l].capture_arity().and_then(Arity::width)).sum();
        if captures.len() != expected {
            return Err(ReverseError::CaptureCount { action: name.to_string(), expected, actual: captures.len() });
        }

        let mut segments: Vec<&str> = Vec::new();
        let mut remaining = captures;
        for &link_id in links {
            let link = &self.actions[link_id];
            segments.extend(link.path_parts.iter().map(String::as_str));
            let Some(capture) = link.capture_arity() else {
                continue;
            };
            let (taken, rest) = remaining.split_at(capture.width().unwrap_or_default());
            check(&link.name, capture, taken)?;
            segments.extend(taken);
            remaining = rest;
        }

        segments.extend(action.path_parts.iter().map(String::as_str));
        if !action.args.fits(args.len()) {
            return Err(ReverseError::ArgCount {
                action: name.to_string(),
                expected: action.args.label(),
                actual: args.len(),
            });
        }
        check(&action.name, &action.args, args)?;
        segments.extend(args);

        Ok(format!("/{}", segments.join("/")))
    }
}

fn check(action: &str, arity: &Arity, values: &[&str]) -> Result<(), ReverseError> {
    let malformed = values.iter().any(|v| v.is_empty() || v.contains('/'));
    if malformed || try_match(arity, values).is_none() {
        return Err(ReverseError::Rejected {
            action: action.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
    }
    Ok(())
}
