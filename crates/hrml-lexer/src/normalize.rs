//! Bracket and quote stripping for raw token text.
//!
//! The scanner only classifies words; these helpers turn the raw words into
//! the names and values stored in the tree. All of them are tolerant: a
//! missing bracket or quote is simply not stripped.

/// An attribute value with its quoting and tag terminator removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    pub value: &'a str,
    /// The raw word ended in `>`, closing the opening tag.
    pub closes_tag: bool,
}

/// Name of an opening tag: `<name` or `<name>` → `name`.
pub fn tag_name(raw: &str) -> &str {
    let name = raw.strip_prefix('<').unwrap_or(raw);
    name.strip_suffix('>').unwrap_or(name)
}

/// Name of a closing tag: `</name>` → `name`.
pub fn close_tag_name(raw: &str) -> &str {
    let name = raw.strip_prefix("</").unwrap_or(raw);
    name.strip_suffix('>').unwrap_or(name)
}

/// Value of an attribute: `"v"` → `v`, `"v">` → `v` (closing the tag).
///
/// The `>` is removed before the quotes so that a value like `">"` keeps
/// its content.
pub fn attribute_value(raw: &str) -> AttributeValue<'_> {
    let (unterminated, closes_tag) = if raw.len() >= 3 && raw.ends_with("\">") {
        (&raw[..raw.len() - 1], true)
    } else if is_quoted(raw) {
        (raw, false)
    } else {
        match raw.strip_suffix('>') {
            Some(rest) => (rest, true),
            None => (raw, false),
        }
    };

    AttributeValue {
        value: unquote(unterminated),
        closes_tag,
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
