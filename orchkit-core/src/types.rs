//! Domain types shared by every orchkit crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// An agent role inside the orchestration kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Orchestrator,
    Engineer,
    Qa,
}

impl Role {
    /// All roles in a stable order.
    pub fn all() -> &'static [Role] {
        &[Role::Orchestrator, Role::Engineer, Role::Qa]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Orchestrator => write!(f, "orchestrator"),
            Role::Engineer => write!(f, "engineer"),
            Role::Qa => write!(f, "qa"),
        }
    }
}

impl FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orchestrator" => Ok(Role::Orchestrator),
            "engineer" => Ok(Role::Engineer),
            "qa" => Ok(Role::Qa),
            other => Err(ConfigError::UnknownRole(other.to_string())),
        }
    }
}

/// A CLI backend that can drive an agent role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Claude,
    Codex,
    Gemini,
}

impl Backend {
    /// Fixed precedence used when a role has no explicit mapping.
    pub const PRECEDENCE: [Backend; 3] = [Backend::Claude, Backend::Codex, Backend::Gemini];
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Claude => write!(f, "claude"),
            Backend::Codex => write!(f, "codex"),
            Backend::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(Backend::Claude),
            "codex" => Ok(Backend::Codex),
            "gemini" => Ok(Backend::Gemini),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// BackendMap
// ---------------------------------------------------------------------------

/// Role → backend assignment parsed from `orchestrator=claude,engineer=codex`.
///
/// Keys are optional; a role appears at most once. Backed by a `BTreeMap`
/// so equality and serialization never depend on input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendMap(BTreeMap<Role, Backend>);

impl BackendMap {
    /// Parse a comma-separated list of `role=backend` pairs.
    ///
    /// `None`, an empty string, or whitespace yields an empty map. Any bad
    /// pair fails the whole parse; no partial map is returned.
    pub fn parse(input: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let mut map = BTreeMap::new();
        for pair in raw.split(',') {
            let (role, backend) = pair
                .split_once('=')
                .filter(|(k, v)| !k.trim().is_empty() && !v.trim().is_empty())
                .ok_or_else(|| ConfigError::InvalidBackendEntry(pair.to_string()))?;
            let role: Role = role.parse()?;
            let backend: Backend = backend.parse()?;
            if map.insert(role, backend).is_some() {
                return Err(ConfigError::DuplicateRole(role));
            }
        }
        Ok(Self(map))
    }

    /// Backend explicitly assigned to `role`, if any.
    pub fn get(&self, role: Role) -> Option<Backend> {
        self.0.get(&role).copied()
    }

    /// Backend for `role`, falling back to the head of [`Backend::PRECEDENCE`].
    pub fn resolve(&self, role: Role) -> Backend {
        self.get(role).unwrap_or(Backend::PRECEDENCE[0])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, Backend)> + '_ {
        self.0.iter().map(|(r, b)| (*r, *b))
    }
}

impl FromStr for BackendMap {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for BackendMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(r, b)| format!("{r}={b}")).collect();
        f.write_str(&pairs.join(","))
    }
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A validated technology stack identifier (e.g. `golang`, `dotnet`).
///
/// Only ASCII alphanumerics, `-`, `_` and `.` are allowed, and the name may
/// not start with `_` or `.`. That keeps it safe to join onto template and
/// target paths and reserves `_skeleton` for the add-stack templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StackName(String);

impl StackName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StackName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid_chars = s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if s.is_empty() || !valid_chars || s.starts_with('_') || s.starts_with('.') {
            return Err(ConfigError::InvalidStackName(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for StackName {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StackName> for String {
    fn from(s: StackName) -> Self {
        s.0
    }
}

impl AsRef<str> for StackName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
