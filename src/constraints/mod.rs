//! Builtin constraints.
//!
//! Each constructor returns a fresh [`Constraint`]; route files refer to them
//! by name through [`builtin`].
//!
//! | Name   | Width | Accepts                                   |
//! |--------|-------|-------------------------------------------|
//! | `Int`  | 1     | optionally signed decimal digits          |
//! | `UInt` | 1     | decimal digits                            |
//! | `Alpha`| 1     | alphabetic characters                     |
//! | `Slug` | 1     | lowercase words joined by single hyphens  |
//! | `Uuid` | 1     | hyphenated hex UUID, any case             |
//! | `Date` | 1     | calendar date `YYYY-MM-DD`                |
//! | `Ymd`  | 3     | calendar date as year, month, day segments |

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::Constraint;

pub mod predicates;

#[cfg(test)]
mod tests;

pub fn int() -> Constraint {
    Constraint::predicate("Int", predicates::is_int)
}

pub fn uint() -> Constraint {
    Constraint::predicate("UInt", predicates::is_uint)
}

pub fn alpha() -> Constraint {
    Constraint::predicate("Alpha", predicates::is_alpha)
}

pub fn slug() -> Constraint {
    Constraint::predicate("Slug", predicates::is_slug)
}

pub fn uuid() -> Constraint {
    Constraint::predicate("Uuid", predicates::is_uuid)
}

pub fn date() -> Constraint {
    Constraint::predicate("Date", predicates::is_date)
}

/// A date spread over three segments: `/2024/02/29`.
pub fn ymd() -> Constraint {
    Constraint::tuple("Ymd", 3, predicates::is_ymd)
}

static BUILTINS: Lazy<HashMap<&'static str, fn() -> Constraint>> = Lazy::new(|| {
    let table: [(&'static str, fn() -> Constraint); 7] = [
        ("Int", int),
        ("UInt", uint),
        ("Alpha", alpha),
        ("Slug", slug),
        ("Uuid", uuid),
        ("Date", date),
        ("Ymd", ymd),
    ];
    table.into_iter().collect()
});

/// Look up a builtin constraint by its exact name.
pub fn builtin(name: &str) -> Option<Constraint> {
    BUILTINS.get(name).map(|make| make())
}

/// Names of every builtin constraint, sorted.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTINS.keys().copied().collect();
    names.sort_unstable();
    names
}
