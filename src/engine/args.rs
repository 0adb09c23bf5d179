//! Argument matching.
//!
//! The argument matcher is the leaf of the dispatch pipeline: given an
//! [`Arity`] and the segments a candidate assigned to it, it either binds the
//! segments or reports a plain non-match.
//!
//! ```text
//! Exact(2)        ["a", "b"]        -> [a] [b]
//! Any             ["a", "b", "c"]   -> [a] [b] [c]
//! Typed(Int,Ymd)  ["7","2024","1","31"]
//!                 -> Int[7] Ymd[2024, 1, 31]
//! ```
//!
//! It is called speculatively by the selector and must stay side-effect free:
//! a rejected candidate leaves nothing behind.

use std::borrow::Cow;

use crate::Arity;

/// One bound argument: a single untyped segment, or the window of segments
/// accepted by a typed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Name of the constraint that accepted the segments, if typed.
    pub constraint: Option<Cow<'static, str>>,
    pub segments: Vec<String>,
}

/// Arguments (or captures) bound by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    bindings: Vec<Binding>,
}

impl BoundArgs {
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// All bound segments, flattened in request order.
    pub fn values(&self) -> Vec<&str> {
        self.bindings.iter().flat_map(|b| b.segments.iter().map(String::as_str)).collect()
    }

    /// Number of bound segments.
    pub fn len(&self) -> usize {
        self.bindings.iter().map(|b| b.segments.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Match `segments` against `arity`.
///
/// Returns `None` when the count does not fit or a typed constraint rejects
/// its window. Never panics.
pub fn try_match(arity: &Arity, segments: &[&str]) -> Option<BoundArgs> {
    match arity {
        Arity::Exact(n) if segments.len() != *n => None,
        Arity::Exact(_) | Arity::Any => Some(BoundArgs { bindings: segments.iter().map(|s| plain(s)).collect() }),
        Arity::Typed(constraints) => {
            if !arity.fits(segments.len()) {
                return None;
            }
            let mut bindings = Vec::with_capacity(constraints.len());
            let mut pos = 0;
            for constraint in constraints {
                let window = &segments[pos..pos + constraint.width()];
                if !constraint.check(window) {
                    return None;
                }
                bindings.push(Binding {
                    constraint: Some(constraint.shared_name()),
                    segments: window.iter().map(|s| s.to_string()).collect(),
                });
                pos += constraint.width();
            }
            Some(BoundArgs { bindings })
        }
    }
}

fn plain(segment: &str) -> Binding {
    Binding { constraint: None, segments: vec![segment.to_string()] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    #[test]
    fn exact_requires_the_declared_count() {
        assert!(try_match(&Arity::Exact(2), &["a"]).is_none());
        assert!(try_match(&Arity::Exact(2), &["a", "b", "c"]).is_none());

        let bound = try_match(&Arity::Exact(2), &["a", "b"]).unwrap();
        assert_eq!(bound.values(), vec!["a", "b"]);
        assert!(bound.bindings().iter().all(|b| b.constraint.is_none()));
    }

    #[test]
    fn exact_zero_matches_only_nothing() {
        assert!(try_match(&Arity::Exact(0), &[]).unwrap().is_empty());
        assert!(try_match(&Arity::Exact(0), &["x"]).is_none());
    }

    #[test]
    fn any_consumes_everything() {
        assert!(try_match(&Arity::Any, &[]).unwrap().is_empty());
        assert_eq!(try_match(&Arity::Any, &["a", "b", "c"]).unwrap().len(), 3);
    }

    #[test]
    fn typed_checks_every_position() {
        let arity = Arity::Typed(vec![constraints::int(), constraints::alpha()]);
        let bound = try_match(&arity, &["12", "abc"]).unwrap();
        assert_eq!(bound.bindings()[0].constraint.as_deref(), Some("Int"));
        assert_eq!(bound.bindings()[1].constraint.as_deref(), Some("Alpha"));

        assert!(try_match(&arity, &["abc", "12"]).is_none());
        assert!(try_match(&arity, &["12"]).is_none());
    }

    #[test]
    fn tuple_constraints_bind_a_window() {
        let arity = Arity::Typed(vec![constraints::int(), constraints::ymd()]);
        let bound = try_match(&arity, &["7", "2024", "02", "29"]).unwrap();
        assert_eq!(bound.bindings().len(), 2);
        assert_eq!(bound.bindings()[1].segments, vec!["2024", "02", "29"]);
        assert_eq!(bound.len(), 4);

        // 2023 is not a leap year.
        assert!(try_match(&arity, &["7", "2023", "02", "29"]).is_none());
    }
}
