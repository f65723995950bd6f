use crate::token::{Span, Token, TokenKind};

/// What the scanner expects the next word on the current line to be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Expect {
    /// Classify by prefix: open tag, close tag, or attribute name.
    #[default]
    Markup,
    /// The word after an attribute name.
    Operator,
    /// The word after an attribute operator.
    Value,
}

/// HRML markup scanner.
///
/// Splits each line on whitespace and classifies every word by its shape:
/// - `</...` is a closing tag
/// - `<...` is an opening tag
/// - anything else is an attribute name, and the next two words on the
///   same line are taken as its operator and value no matter what they look like
///
/// Attribute state never carries over a line break, so an attribute cut short
/// at the end of a line simply produces fewer operand tokens.
#[derive(Debug, Default)]
pub struct Scanner {
    line: usize,
    expect: Expect,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner positioned before the first line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize a block of markup.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Self::tokenize_lines(source.lines())
    }

    /// Tokenize markup that has already been split into lines.
    pub fn tokenize_lines<'a, I>(lines: I) -> Vec<Token>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut scanner = Scanner::new();
        for line in lines {
            scanner.scan_line(line);
        }
        scanner.tokens
    }

    /// Scan one line, appending its tokens.
    pub fn scan_line(&mut self, line: &str) {
        self.line += 1;
        self.expect = Expect::Markup;

        for (start, word) in split_words(line) {
            let column = line[..start].chars().count() + 1;
            let span = Span::new(start, start + word.len(), self.line, column);
            let kind = self.classify(word);
            self.tokens.push(Token::new(kind, span));
        }
    }

    /// Consume the scanner and return everything scanned so far.
    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }

    fn classify(&mut self, word: &str) -> TokenKind {
        let word = word.to_string();
        match self.expect {
            Expect::Operator => {
                self.expect = Expect::Value;
                TokenKind::Operator(word)
            }
            Expect::Value => {
                self.expect = Expect::Markup;
                TokenKind::Value(word)
            }
            Expect::Markup if word.starts_with("</") => TokenKind::CloseTag(word),
            Expect::Markup if word.starts_with('<') => TokenKind::OpenTag(word),
            Expect::Markup => {
                self.expect = Expect::Operator;
                TokenKind::AttrName(word)
            }
        }
    }
}

/// Split a line on whitespace, keeping each word's byte offset.
fn split_words(line: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;

    for (i, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &line[s..]));
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn open(s: &str) -> TokenKind {
        TokenKind::OpenTag(s.into())
    }

    fn close(s: &str) -> TokenKind {
        TokenKind::CloseTag(s.into())
    }

    fn attr(s: &str) -> TokenKind {
        TokenKind::AttrName(s.into())
    }

    fn op(s: &str) -> TokenKind {
        TokenKind::Operator(s.into())
    }

    fn value(s: &str) -> TokenKind {
        TokenKind::Value(s.into())
    }

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn test_empty_source() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_blank_lines() {
        assert!(kinds("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_open_and_close() {
        assert_eq!(kinds("<a> </a>"), vec![open("<a>"), close("</a>")]);
    }

    #[test]
    fn test_close_tag_not_mistaken_for_open() {
        assert_eq!(kinds("</a>"), vec![close("</a>")]);
    }

    #[test]
    fn test_tags_across_lines() {
        assert_eq!(
            kinds("<a>\n<b>\n</b>\n</a>"),
            vec![open("<a>"), open("<b>"), close("</b>"), close("</a>")]
        );
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    #[test]
    fn test_single_attribute() {
        assert_eq!(
            kinds("<tag1 value = \"HelloWorld\">"),
            vec![open("<tag1"), attr("value"), op("="), value("\"HelloWorld\">")]
        );
    }

    #[test]
    fn test_multiple_attributes() {
        assert_eq!(
            kinds("<a x = \"1\" y = \"2\">"),
            vec![
                open("<a"),
                attr("x"),
                op("="),
                value("\"1\""),
                attr("y"),
                op("="),
                value("\"2\">"),
            ]
        );
    }

    #[test]
    fn test_operands_taken_by_position() {
        // Whatever follows an attribute name is its operator and value,
        // even when it looks like a tag.
        assert_eq!(
            kinds("<a x <b> </b>"),
            vec![open("<a"), attr("x"), op("<b>"), value("</b>")]
        );
    }

    #[test]
    fn test_malformed_operator_still_classified() {
        assert_eq!(
            kinds("<a x : \"1\">"),
            vec![open("<a"), attr("x"), op(":"), value("\"1\">")]
        );
    }

    #[test]
    fn test_attribute_cut_at_line_end() {
        assert_eq!(
            kinds("<a x =\n\"1\">"),
            vec![open("<a"), attr("x"), op("="), attr("\"1\">")]
        );
    }

    // =========================================================================
    // Spans
    // =========================================================================

    #[test]
    fn test_spans_track_line_and_column() {
        let toks = Scanner::tokenize("<a>\n  <b k = \"v\">");
        let spans: Vec<(usize, usize)> = toks.iter().map(|t| (t.span.line, t.span.column)).collect();
        assert_eq!(spans, vec![(1, 1), (2, 3), (2, 6), (2, 8), (2, 10)]);
    }

    #[test]
    fn test_span_offsets_cover_word() {
        let line = "  <b   k";
        let toks = Scanner::tokenize(line);
        assert_eq!(&line[toks[0].span.start..toks[0].span.end], "<b");
        assert_eq!(&line[toks[1].span.start..toks[1].span.end], "k");
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(
            kinds("<a>\r\n</a>\r\n"),
            vec![open("<a>"), close("</a>")]
        );
    }

    #[test]
    fn test_incremental_scan_matches_tokenize() {
        let mut scanner = Scanner::new();
        scanner.scan_line("<a k = \"v\">");
        scanner.scan_line("</a>");
        assert_eq!(scanner.finish(), Scanner::tokenize("<a k = \"v\">\n</a>"));
    }
}
