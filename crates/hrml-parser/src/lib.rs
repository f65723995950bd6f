//! HRML Parser
//!
//! Builds a tag tree from the token stream produced by `hrml-lexer`.
//! The tree is an arena of tags linked by id ([`tree`]); the builder walks
//! the tokens once with a cursor on the innermost open tag ([`builder`]).
//!
//! Malformed markup never aborts a build. Problems are collected as
//! [`Diagnostic`]s next to the best-effort tree.

pub mod builder;
pub mod tree;

pub use builder::{BuildOutput, TreeBuilder};
pub use tree::{Tag, TagId, Tree};

/// What went wrong in a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An attribute name followed by something other than `=`.
    UnexpectedOperator,
    /// An attribute name with no operator or value before the end of the line.
    MissingValue,
    /// A closing tag whose name differs from the tag it closes.
    MismatchedClose,
    /// A closing tag with no open tag left to close.
    UnbalancedClose,
    /// Tags still open when the markup ended.
    UnclosedTag,
    /// An attribute after its tag's `>`, or outside any tag.
    AttributeOutsideTag,
}

/// Non-fatal markup problem with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Markup warning at line {line}, column {column}: {message}")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Build a tree from markup, discarding diagnostics.
pub fn parse(source: &str) -> Tree {
    TreeBuilder::build(source).tree
}
