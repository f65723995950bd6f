//! HRML Query
//!
//! Answers attribute queries against a tag tree built by `hrml-parser`,
//! and runs whole batches in the line-count/query-count input format.
//!
//! ```text
//! markup → TreeBuilder → Tree ─┐
//! query  → Query::parse ───────┴→ resolve() → value | "Not Found!"
//! ```
//!
//! # Example
//!
//! ```
//! let tree = hrml_parser::parse("<a> <b k = \"v\"> </b> </a>");
//! assert_eq!(hrml_query::resolve(&tree, "a.b~k"), "v");
//! assert_eq!(hrml_query::resolve(&tree, "a~k"), hrml_query::NOT_FOUND);
//! ```

pub mod batch;
pub mod query;

pub use batch::{Batch, Report};
pub use query::{resolve, Query, NOT_FOUND};

/// A query that does not fit `name ('.' name)* '~' attribute`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Query error in '{query}': {message}")]
pub struct QueryError {
    pub message: String,
    pub query: String,
}

impl QueryError {
    pub fn new(query: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            query: query.to_string(),
        }
    }
}

/// Batch input that cannot be split into sections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Input error at line {line}: {message}")]
pub struct InputError {
    pub message: String,
    pub line: usize,
}

impl InputError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}
