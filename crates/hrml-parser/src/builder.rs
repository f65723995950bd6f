//! Tree builder for HRML markup.
//!
//! Single pass over the token stream. Each token kind has a fixed action:
//! - `OpenTag` creates a child of the cursor and moves the cursor into it
//! - `AttrName`, `Operator`, `Value` add one attribute to the cursor
//! - `CloseTag` moves the cursor back to its parent

use hrml_lexer::normalize;
use hrml_lexer::{Scanner, Span, Token, TokenKind};
use tracing::{debug, warn};

use crate::tree::{TagId, Tree};
use crate::{Diagnostic, DiagnosticKind};

/// Result of a build: the tree plus any problems found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
}

/// An attribute whose name has been seen but whose value has not.
#[derive(Debug)]
struct PendingAttribute {
    name: String,
    span: Span,
    has_operator: bool,
}

/// Cursor-driven tree builder.
///
/// Feed tokens with [`TreeBuilder::push`] and collect the result with
/// [`TreeBuilder::finish`], or use [`TreeBuilder::build`] for a whole document.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: Tree,
    cursor: TagId,
    pending: Option<PendingAttribute>,
    /// The cursor's opening tag has not seen its `>` yet.
    in_opening_tag: bool,
    last_span: Option<Span>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder holding an empty tree, cursor at the root.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            cursor: TagId::ROOT,
            pending: None,
            in_opening_tag: false,
            last_span: None,
            diagnostics: Vec::new(),
        }
    }

    /// Build a tree from a block of markup.
    pub fn build(source: &str) -> BuildOutput {
        Self::build_lines(source.lines())
    }

    /// Build a tree from markup that has already been split into lines.
    pub fn build_lines<'a, I>(lines: I) -> BuildOutput
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = TreeBuilder::new();
        for token in Scanner::tokenize_lines(lines) {
            builder.push(token);
        }
        builder.finish()
    }

    /// The tag new tokens currently apply to.
    pub fn cursor(&self) -> TagId {
        self.cursor
    }

    /// Apply one token.
    pub fn push(&mut self, token: Token) {
        let span = token.span;

        match token.kind {
            TokenKind::OpenTag(raw) => {
                self.flush_pending();
                self.enter(normalize::tag_name(&raw));
                self.in_opening_tag = !raw.ends_with('>');
            }
            TokenKind::CloseTag(raw) => {
                self.flush_pending();
                self.exit(normalize::close_tag_name(&raw), span);
                self.in_opening_tag = false;
            }
            TokenKind::AttrName(name) => {
                self.flush_pending();
                if !self.in_opening_tag {
                    self.report_stray_attribute(&name, span);
                }
                self.pending = Some(PendingAttribute {
                    name,
                    span,
                    has_operator: false,
                });
            }
            TokenKind::Operator(op) => {
                if op != "=" {
                    self.report(
                        DiagnosticKind::UnexpectedOperator,
                        format!("Expected '=' after attribute name, found '{op}'"),
                        span,
                    );
                }
                if let Some(pending) = self.pending.as_mut() {
                    pending.has_operator = true;
                }
            }
            TokenKind::Value(raw) => {
                let value = normalize::attribute_value(&raw);
                if value.closes_tag {
                    self.in_opening_tag = false;
                }
                if let Some(pending) = self.pending.take() {
                    self.add_attribute(pending.name, value.value);
                }
            }
        }

        self.last_span = Some(span);
    }

    /// Finish the build, reporting anything left open.
    pub fn finish(mut self) -> BuildOutput {
        self.flush_pending();

        if self.cursor != TagId::ROOT {
            let open: Vec<&str> = std::iter::once(self.cursor)
                .filter_map(|id| self.tree.get(id))
                .chain(self.tree.ancestors(self.cursor))
                .filter(|tag| !tag.is_root())
                .map(|tag| tag.name.as_str())
                .collect();
            let message = format!("Unclosed tags at end of markup: {}", open.join(", "));
            let span = self.last_span.unwrap_or(Span::new(0, 0, 0, 0));
            self.report(DiagnosticKind::UnclosedTag, message, span);
        }

        BuildOutput {
            tree: self.tree,
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn enter(&mut self, name: &str) {
        if let Some(id) = self.tree.push_child(self.cursor, name) {
            self.cursor = id;
        }
    }

    fn exit(&mut self, name: &str, span: Span) {
        let Some(current) = self.tree.get(self.cursor) else {
            return;
        };
        let parent = current.parent;
        let open_name = current.name.clone();

        match parent {
            None => self.report(
                DiagnosticKind::UnbalancedClose,
                format!("Closing tag '{name}' has no open tag to close"),
                span,
            ),
            Some(parent) => {
                if open_name != name {
                    let message =
                        format!("Closing tag '{name}' does not match open tag '{open_name}'");
                    self.report(DiagnosticKind::MismatchedClose, message, span);
                }
                self.cursor = parent;
            }
        }
    }

    fn add_attribute(&mut self, name: String, value: &str) {
        if !self.tree.set_attribute(self.cursor, name.as_str(), value) {
            debug!(tag = %self.cursor, attribute = %name, "duplicate attribute ignored");
        }
    }

    /// An attribute after the `>` of its tag. It is still added to the cursor.
    fn report_stray_attribute(&mut self, name: &str, span: Span) {
        let message = match self.tree.get(self.cursor).filter(|tag| !tag.is_root()) {
            Some(tag) => format!("Attribute '{name}' follows the closed opening tag '{}'", tag.name),
            None => format!("Attribute '{name}' appears outside any tag"),
        };
        self.report(DiagnosticKind::AttributeOutsideTag, message, span);
    }

    /// Drop an attribute that never got its value.
    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let missing = if pending.has_operator {
                "value"
            } else {
                "'=' and value"
            };
            self.report(
                DiagnosticKind::MissingValue,
                format!("Attribute '{}' is missing its {missing}", pending.name),
                pending.span,
            );
        }
    }

    fn report(&mut self, kind: DiagnosticKind, message: String, span: Span) {
        warn!(line = span.line, column = span.column, "{message}");
        self.diagnostics.push(Diagnostic {
            kind,
            message,
            line: span.line,
            column: span.column,
        });
    }
}
