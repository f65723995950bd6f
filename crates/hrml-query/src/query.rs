//! Dotted-path attribute queries: `tag1.tag2~attr`.

use std::fmt;
use std::str::FromStr;

use hrml_parser::{TagId, Tree};
use tracing::debug;

use crate::QueryError;

/// Answer given when a query's path or attribute does not exist.
pub const NOT_FOUND: &str = "Not Found!";

/// A parsed query: a path of tag names from the root, then an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub path: Vec<String>,
    pub attribute: String,
}

impl Query {
    /// Parse `name ('.' name)* '~' attribute`.
    ///
    /// The path is split on `.` first and only the last segment is split on
    /// `~`. `a~b.c` is rejected: its last segment has no `~`.
    pub fn parse(source: &str) -> Result<Self, QueryError> {
        let mut segments: Vec<&str> = source.split('.').collect();
        let last = segments.pop().unwrap_or_default();

        let Some((tag, attribute)) = last.split_once('~') else {
            return Err(QueryError::new(source, "missing '~attribute'"));
        };
        segments.push(tag);

        if segments.iter().any(|s| s.is_empty()) {
            return Err(QueryError::new(source, "empty tag name in path"));
        }

        Ok(Self {
            path: segments.into_iter().map(String::from).collect(),
            attribute: attribute.to_string(),
        })
    }

    /// The tag the path leads to.
    ///
    /// Each step searches only the direct children of the previous tag and
    /// takes the first one with a matching name. Once a step misses, the walk
    /// stays missed.
    pub fn target(&self, tree: &Tree) -> Option<TagId> {
        self.path
            .iter()
            .try_fold(TagId::ROOT, |id, name| tree.child(id, name))
    }

    /// The attribute value, if both the path and the attribute exist.
    pub fn lookup<'t>(&self, tree: &'t Tree) -> Option<&'t str> {
        tree.get(self.target(tree)?)?.attribute(&self.attribute)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.path.join("."), self.attribute)
    }
}

/// Answer one query against a finished tree.
///
/// Never fails: a malformed query, a missing tag, or a missing attribute all
/// answer [`NOT_FOUND`].
pub fn resolve(tree: &Tree, query: &str) -> String {
    let parsed = match Query::parse(query) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("{e}");
            return NOT_FOUND.to_string();
        }
    };

    match parsed.lookup(tree) {
        Some(value) => value.to_string(),
        None => {
            debug!(query = %parsed, "no match");
            NOT_FOUND.to_string()
        }
    }
}
