// Route bindings: a validated prefix, its visibility and the group service behind it

use std::{fmt, str::FromStr};

use axum::{http::Uri, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::routing::error::RouteError;

/// Documented access level of a binding. Nothing in the aggregator enforces it;
/// it is carried so an authorization layer can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::Private => f.write_str("private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(format!("unknown visibility `{other}` (expected `public` or `private`)")),
        }
    }
}

/// How prefixes are compared against request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

/// A normalized mount prefix: starts with `/`, no trailing slash (except the root).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prefix(String);

impl Prefix {
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &'static str| RouteError::InvalidPrefix {
            prefix: raw.to_string(),
            reason,
        };

        let trimmed: &str = raw.trim();

        if trimmed.is_empty() {
            return Err(invalid("prefix must not be empty"));
        }
        if !trimmed.starts_with('/') {
            return Err(invalid("prefix must start with `/`"));
        }
        if trimmed.contains(['?', '#']) {
            return Err(invalid("prefix must not contain a query or fragment"));
        }

        let normalized: &str = trimmed.trim_end_matches('/');
        if normalized.is_empty() {
            return Ok(Self("/".to_string()));
        }
        if normalized.contains("//") {
            return Err(invalid("prefix must not contain empty segments"));
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the path left after removing this prefix, if the prefix is a
    /// segment-aligned ancestor of `path`. An empty remainder becomes `/`.
    pub fn strip<'a>(&self, path: &'a str, mode: MatchMode) -> Option<&'a str> {
        if self.is_root() {
            return Some(if path.is_empty() { "/" } else { path });
        }

        let len: usize = self.0.len();
        let head: &str = path.get(..len)?;
        let matched: bool = match mode {
            MatchMode::CaseSensitive => head == self.0,
            MatchMode::CaseInsensitive => head.eq_ignore_ascii_case(&self.0),
        };
        if !matched {
            return None;
        }

        match &path[len..] {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }

    /// Whether two prefixes would be considered the same registration.
    pub fn same_as(&self, other: &Prefix, mode: MatchMode) -> bool {
        match mode {
            MatchMode::CaseSensitive => self.0 == other.0,
            MatchMode::CaseInsensitive => self.0.eq_ignore_ascii_case(&other.0),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the immutable binding table.
#[derive(Debug, Clone)]
pub struct RouteBinding {
    pub(crate) prefix: Prefix,
    pub(crate) group: String,
    pub(crate) visibility: Visibility,
    pub(crate) service: Router,
}

impl RouteBinding {
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// Request extension describing which binding is serving the request
#[derive(Debug, Clone)]
pub struct MountContext {
    pub request_id: Uuid,
    pub group: String,
    pub prefix: Prefix,
    pub visibility: Visibility,
    pub original_uri: Uri,
}
