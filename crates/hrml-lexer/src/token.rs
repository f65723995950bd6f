/// A word's position in the markup, tracking line and column for diagnostics.
///
/// `start` and `end` are byte offsets into the word's own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for HRML markup.
///
/// Every variant carries the raw word exactly as it appeared in the source.
/// Stripping brackets and quotes is left to [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name` or `<name>`
    OpenTag(String),
    /// `</name>`
    CloseTag(String),
    /// A bare word in attribute position.
    AttrName(String),
    /// The word after an attribute name. Well-formed markup has `=` here.
    Operator(String),
    /// The word after the operator, e.g. `"value"` or `"value">`.
    Value(String),
}

impl TokenKind {
    /// The raw source text of the token.
    pub fn text(&self) -> &str {
        match self {
            TokenKind::OpenTag(s)
            | TokenKind::CloseTag(s)
            | TokenKind::AttrName(s)
            | TokenKind::Operator(s)
            | TokenKind::Value(s) => s,
        }
    }
}

/// A token produced by the HRML scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
