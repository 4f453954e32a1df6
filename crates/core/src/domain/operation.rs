// Operation Domain Model

use crate::error::{Result, RulesError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// Relative path of one rule operation, e.g. `apply/beaming/Beaming-slope_with_clearance`
///
/// Always relative (no leading `/`), never empty, and free of `.`/`..`
/// segments, percent-escapes, query strings, fragments and `:`, so joining
/// it onto an endpoint address can only extend that address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationPath(Cow<'static, str>);

impl OperationPath {
    /// Validate and normalise a path (a single leading `/` is stripped)
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let trimmed = path.strip_prefix('/').unwrap_or(&path);
        validate(trimmed)?;
        Ok(Self(Cow::Owned(trimmed.to_string())))
    }

    /// Wrap a catalog path without re-validating it
    ///
    /// Catalog paths are checked once by the catalog tests.
    pub const fn from_static(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Derive the service path for a registry rule id
    ///
    /// `RULE.<Family>.<name>` owned by `<Agent>Agent` maps to
    /// `apply/<agent>/<Family>-<name>`: the agent name loses its `Agent`
    /// suffix and is lowercased, and the dots after the `RULE.` namespace
    /// become hyphens.
    ///
    /// Stricter than the registry's own path builder: an empty namespace
    /// (`.Beaming.x`) or empty remainder is rejected rather than mapped.
    pub fn for_rule(agent: &str, rule_id: &str) -> Result<Self> {
        let (_namespace, rest) = rule_id
            .split_once('.')
            .filter(|(ns, rest)| !ns.is_empty() && !rest.is_empty())
            .ok_or_else(|| {
                RulesError::InvalidPath(format!("rule id '{}' has no namespace prefix", rule_id))
            })?;

        let agent = agent.replace("Agent", "").to_lowercase();
        if agent.is_empty() {
            return Err(RulesError::InvalidPath(format!(
                "agent name for rule '{}' is empty",
                rule_id
            )));
        }

        Self::new(format!("apply/{}/{}", agent, rest.replace('.', "-")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RulesError::InvalidPath("path is empty".to_string()));
    }
    // '%' would let an escaped dot segment (`%2e%2e`) climb out of the base path
    if path.contains(['?', '#', ':', '\\', '%']) || path.chars().any(char::is_whitespace) {
        return Err(RulesError::InvalidPath(format!(
            "'{}' contains a query, fragment, scheme separator, escape or whitespace",
            path
        )));
    }
    for segment in path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(RulesError::InvalidPath(format!(
                "'{}' has an empty or relative segment",
                path
            )));
        }
    }
    Ok(())
}

impl std::fmt::Display for OperationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named rule operation: a fixed path bound to an input and output shape
///
/// Implemented by the zero-sized markers declared in [`crate::domain::catalog`].
/// Adding an operation never touches the dispatch code; it only needs a new
/// implementor of this trait.
pub trait Operation: Send + Sync + 'static {
    /// Catalog name, e.g. `resolveBeamCollisions`
    const NAME: &'static str;
    /// Path relative to the endpoint address
    const PATH: &'static str;

    type Input: Serialize + DeserializeOwned + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    fn path() -> OperationPath {
        OperationPath::from_static(Self::PATH)
    }
}

/// Static description of one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub rule_id: &'static str,
    pub agent: &'static str,
    pub path: &'static str,
    pub input_shape: &'static str,
    pub output_shape: &'static str,
}

impl OperationDescriptor {
    pub fn operation_path(&self) -> OperationPath {
        OperationPath::from_static(self.path)
    }
}
