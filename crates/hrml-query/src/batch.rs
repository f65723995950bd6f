//! Batch input: a header line, markup lines, then query lines.
//!
//! ```text
//! 4 3
//! <tag1 value = "HelloWorld">
//! <tag2 name = "Name1">
//! </tag2>
//! </tag1>
//! tag1.tag2~name
//! tag1~name
//! tag1~value
//! ```

use hrml_parser::{BuildOutput, Diagnostic, TreeBuilder};
use tracing::{debug, warn};

use crate::query::{resolve, NOT_FOUND};
use crate::InputError;

/// A batch split into its markup and query sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<'a> {
    pub markup: Vec<&'a str>,
    /// Trimmed, non-blank query lines. May be shorter than `query_count` if
    /// the input ended early.
    pub queries: Vec<&'a str>,
    pub query_count: usize,
}

/// Answers for every query plus the markup diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub answers: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Batch<'a> {
    /// Split batch input into sections.
    ///
    /// Only a missing or malformed header is an error. If the input ends
    /// before the announced number of lines, the missing markup lines count as
    /// empty and the missing queries answer [`NOT_FOUND`].
    pub fn parse(input: &'a str) -> Result<Self, InputError> {
        let mut lines = input.lines();
        let header = lines.next().ok_or_else(|| InputError::new(1, "missing header line"))?;
        let (line_count, query_count) = parse_header(header)?;

        let markup: Vec<&str> = lines.by_ref().take(line_count).collect();
        if markup.len() < line_count {
            warn!(
                expected = line_count,
                found = markup.len(),
                "input ended inside the markup section"
            );
        }

        let queries: Vec<&str> = lines
            .by_ref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(query_count)
            .collect();
        if queries.len() < query_count {
            warn!(
                expected = query_count,
                found = queries.len(),
                "input ended inside the query section"
            );
        }

        let rest = lines.filter(|l| !l.trim().is_empty()).count();
        if rest > 0 {
            debug!(lines = rest, "ignoring trailing input");
        }

        Ok(Self {
            markup,
            queries,
            query_count,
        })
    }

    /// Build the tag tree from the markup section.
    pub fn build(&self) -> BuildOutput {
        TreeBuilder::build_lines(self.markup.iter().copied())
    }

    /// Build the tree, then answer every query in order.
    pub fn run(&self) -> Report {
        let BuildOutput { tree, diagnostics } = self.build();

        let answers = (0..self.query_count)
            .map(|i| match self.queries.get(i) {
                Some(query) => resolve(&tree, query),
                None => NOT_FOUND.to_string(),
            })
            .collect();

        Report {
            answers,
            diagnostics,
        }
    }
}

/// `lineCount queryCount`. Anything after the two counts is ignored.
fn parse_header(header: &str) -> Result<(usize, usize), InputError> {
    let fields: Vec<&str> = header.split_whitespace().collect();
    let [lines, queries, rest @ ..] = fields.as_slice() else {
        return Err(InputError::new(
            1,
            format!("expected two counts in header, found {:?}", header.trim()),
        ));
    };
    if !rest.is_empty() {
        debug!(extra = ?rest, "ignoring extra header fields");
    }

    let count = |field: &str, what: &str| {
        field
            .parse::<usize>()
            .map_err(|e| InputError::new(1, format!("invalid {what} '{field}': {e}")))
    };

    Ok((count(*lines, "line count")?, count(*queries, "query count")?))
}

/// Parse and run a batch in one step.
pub fn run(input: &str) -> Result<Report, InputError> {
    Ok(Batch::parse(input)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrml_parser::DiagnosticKind;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "4 3\n\
                          <tag1 value = \"HelloWorld\">\n\
                          <tag2 name = \"Name1\">\n\
                          </tag2>\n\
                          </tag1>\n\
                          tag1.tag2~name\n\
                          tag1~name\n\
                          tag1~value\n";

    #[test]
    fn test_sample_batch() {
        let report = run(SAMPLE).unwrap();
        assert_eq!(report.answers, vec!["Name1", NOT_FOUND, "HelloWorld"]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_sections() {
        let batch = Batch::parse(SAMPLE).unwrap();
        assert_eq!(batch.markup.len(), 4);
        assert_eq!(batch.queries, vec!["tag1.tag2~name", "tag1~name", "tag1~value"]);
        assert_eq!(batch.query_count, 3);
    }

    #[test]
    fn test_tag_spanning_lines() {
        let input = "3 2\n<a x = \"1\"\ny = \"2\">\n</a>\na~x\na~y\n";
        let report = run(input).unwrap();
        // Attributes on a continuation line still belong to the open tag.
        assert_eq!(report.answers, vec!["1", "2"]);
    }

    #[test]
    fn test_query_lines_trimmed() {
        let input = "1 1\n<a k = \"v\"> </a>\n   a~k  \r\n";
        assert_eq!(run(input).unwrap().answers, vec!["v"]);
    }

    #[test]
    fn test_blank_lines_do_not_count_as_queries() {
        let input = "1 2\n<a k = \"v\"> </a>\n\na~k\n  \na~x\n";
        let batch = Batch::parse(input).unwrap();
        assert_eq!(batch.queries, vec!["a~k", "a~x"]);
        assert_eq!(batch.run().answers, vec!["v", NOT_FOUND]);
    }

    #[test]
    fn test_blank_line_inside_markup_section_is_markup() {
        let report = run("2 2\n<a k = \"v\"> </a>\n\na~k\n").unwrap();
        // Line 3 is the second markup line, so only one query follows.
        assert_eq!(report.answers, vec!["v", NOT_FOUND]);
    }

    #[test]
    fn test_zero_queries() {
        let report = run("1 0\n<a> </a>\n").unwrap();
        assert!(report.answers.is_empty());
    }

    #[test]
    fn test_answer_count_matches_header_when_input_short() {
        let report = run("1 3\n<a k = \"v\"> </a>\na~k\n").unwrap();
        assert_eq!(report.answers, vec!["v", NOT_FOUND, NOT_FOUND]);
    }

    #[test]
    fn test_short_markup_section() {
        let batch = Batch::parse("5 1\n<a> </a>\n").unwrap();
        assert_eq!(batch.markup, vec!["<a> </a>"]);
        assert!(batch.queries.is_empty());
        assert_eq!(batch.run().answers, vec![NOT_FOUND]);
    }

    #[test]
    fn test_markup_diagnostics_reported() {
        let report = run("2 1\n<a k : \"v\">\n</a>\na~k\n").unwrap();
        assert_eq!(report.answers, vec!["v"]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::UnexpectedOperator);
    }

    #[test]
    fn test_build_exposes_tree() {
        let batch = Batch::parse(SAMPLE).unwrap();
        assert_eq!(batch.build().tree.len(), 3);
    }

    // =========================================================================
    // Header errors
    // =========================================================================

    #[test]
    fn test_empty_input() {
        let err = Batch::parse("").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("missing header"));
    }

    #[test]
    fn test_header_missing_count() {
        assert!(Batch::parse("4\n").is_err());
        assert!(Batch::parse("   \n").is_err());
    }

    #[test]
    fn test_header_extra_fields_ignored() {
        let batch = Batch::parse("1 1 extra 9\n<a k = \"v\"> </a>\na~k\n").unwrap();
        assert_eq!(batch.query_count, 1);
        assert_eq!(batch.run().answers, vec!["v"]);
    }

    #[test]
    fn test_header_not_numeric() {
        let err = Batch::parse("four 3\n").unwrap_err();
        assert!(err.message.contains("invalid line count 'four'"));
        assert!(Batch::parse("4 -1\n").is_err());
    }
}
