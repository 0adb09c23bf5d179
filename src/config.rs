//! Route files.
//!
//! A route file is TOML: one `[[action]]` table per action, in registration
//! order, plus optional named regex constraints.
//!
//! ```toml
//! [constraint.Hex]
//! pattern = "[0-9a-f]+"
//!
//! [[action]]
//! name = "/user/base"
//! path = "user"
//! chained = "/"
//! capture = ["Int"]
//!
//! [[action]]
//! name = "/user/edit"
//! path = "edit"
//! chained = "/user/base"
//! args = 1
//! methods = ["POST"]
//! ```
//!
//! `args` and `capture` take a count (`1`), an unbounded marker (`"*"`,
//! `"..."` or `"any"`), one constraint name (`"Int"`) or a list of names
//! (`["Int", "Hex"]`). Names resolve to the file's own constraints first, then
//! to the builtins in [`crate::constraints`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{ActionSpec, Arity, Constraint, MethodSet, RouteTable, RouteTableError, constraints};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read route file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse route file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("action `{action}` uses unknown constraint `{constraint}`")]
    UnknownConstraint { action: String, constraint: String },

    #[error("action `{action}` accepts unknown method `{method}`")]
    UnknownMethod { action: String, method: String },

    #[error("action `{0}` declares both `capture` and `args`")]
    Conflict(String),

    #[error("constraint `{name}` has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Table(#[from] RouteTableError),
}

/// Root of a route file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RouteFile {
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionConfig>,

    /// Regex constraints usable by name in `args` and `capture`.
    #[serde(default, rename = "constraint")]
    pub constraints: BTreeMap<String, ConstraintConfig>,
}

/// One `[[action]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionConfig {
    pub name: String,

    #[serde(default)]
    pub path: String,

    /// Terminal arguments; unbounded when omitted.
    pub args: Option<ArityConfig>,

    /// Makes the action a chain link.
    pub capture: Option<ArityConfig>,

    /// Parent link name, or `/` for a chain root.
    pub chained: Option<String>,

    /// Accepted methods; any method when empty.
    #[serde(default)]
    pub methods: Vec<String>,

    /// Explicit registration order; file order when omitted.
    pub order: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConstraintConfig {
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ArityConfig {
    Count(usize),
    Named(String),
    Typed(Vec<String>),
}

impl RouteFile {
    /// Turn every entry into an [`ActionSpec`], resolving constraint and
    /// method names.
    pub fn specs(&self) -> Result<Vec<ActionSpec>, ConfigError> {
        let mut custom = HashMap::with_capacity(self.constraints.len());
        for (name, config) in &self.constraints {
            let constraint = Constraint::pattern(name.clone(), &config.pattern)
                .map_err(|source| ConfigError::InvalidPattern { name: name.clone(), source })?;
            custom.insert(name.as_str(), constraint);
        }
        self.actions.iter().map(|action| action.to_spec(&custom)).collect()
    }

    pub fn into_table(self) -> Result<RouteTable, ConfigError> {
        let mut builder = RouteTable::builder();
        for (spec, config) in self.specs()?.into_iter().zip(&self.actions) {
            match config.order {
                Some(_) => builder.insert(spec),
                None => builder.register(spec),
            };
        }
        Ok(builder.build()?)
    }
}

impl ActionConfig {
    fn to_spec(&self, custom: &HashMap<&str, Constraint>) -> Result<ActionSpec, ConfigError> {
        let mut spec = ActionSpec::new(self.name.clone()).path(&self.path);

        for method in &self.methods {
            let parsed = MethodSet::from_method(method)
                .ok_or_else(|| ConfigError::UnknownMethod { action: self.name.clone(), method: method.clone() })?;
            spec.methods |= parsed;
        }
        if let Some(order) = self.order {
            spec = spec.order(order);
        }

        match (&self.capture, &self.args) {
            (Some(_), Some(_)) => return Err(ConfigError::Conflict(self.name.clone())),
            (Some(capture), None) => spec = spec.capture(self.arity(capture, custom)?),
            (None, Some(args)) => spec = spec.args(self.arity(args, custom)?),
            (None, None) => {}
        }
        if let Some(parent) = &self.chained {
            spec = spec.chained(parent.clone());
        }
        Ok(spec)
    }

    fn arity(&self, config: &ArityConfig, custom: &HashMap<&str, Constraint>) -> Result<Arity, ConfigError> {
        let names: Vec<&str> = match config {
            ArityConfig::Count(n) => return Ok(Arity::Exact(*n)),
            ArityConfig::Named(name) if matches!(name.as_str(), "*" | "..." | "any") => return Ok(Arity::Any),
            ArityConfig::Named(name) => vec![name.as_str()],
            ArityConfig::Typed(names) => names.iter().map(String::as_str).collect(),
        };
        names
            .into_iter()
            .map(|name| {
                custom.get(name).cloned().or_else(|| constraints::builtin(name)).ok_or_else(|| {
                    ConfigError::UnknownConstraint { action: self.name.clone(), constraint: name.to_string() }
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Arity::Typed)
    }
}

/// Parse a route file and build its table.
pub fn parse_route_file(text: &str) -> Result<RouteTable, ConfigError> {
    let file: RouteFile = toml::from_str(text)?;
    file.into_table()
}

/// Read, parse and build the route file at `path`.
pub fn load_route_file(path: impl AsRef<Path>) -> Result<RouteTable, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let table = parse_route_file(&text)?;
    debug!(path = %path.display(), actions = table.len(), "route file loaded");
    Ok(table)
}
