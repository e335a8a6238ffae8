//! Labelled parse error reports rendered with [ariadne].
//!
//! Only compiled with the `diagnostics` feature:
//!
//! ```toml
//! [dependencies]
//! medtrend = { version = "0.1", features = ["diagnostics"] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use medtrend::{MedlineParser, RecordParser};
//!
//! let source = "PMID- 1\nTI  - Title\nnot a field line\n";
//! let err = MedlineParser::new().parse(source).unwrap_err();
//! let report = err.to_diagnostic("records.txt", source);
//! assert!(report.contains("records.txt"));
//! ```

use crate::error::ParseError;
use crate::{Record, RecordParser};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;

impl ParseError {
    /// Render this error against the text it was raised for.
    ///
    /// The offending line is labelled; when the error carries the span of the
    /// whole record, that span is labelled too. Falls back to the plain
    /// [Display](std::fmt::Display) text if the report cannot be written.
    pub fn to_diagnostic(&self, filename: &str, source: &str) -> String {
        let line = self.line_range(source);
        let primary = line.clone().or_else(|| self.span_range(source)).unwrap_or(0..0);

        let mut report = Report::build(ReportKind::Error, (filename, primary.clone()))
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, primary.clone()))
                    .with_message(self.error.to_string())
                    .with_color(Color::Red),
            );
        if let Some(record) = self.span_range(source).filter(|r| *r != primary) {
            report = report.with_label(
                Label::new((filename, record))
                    .with_message("in this record")
                    .with_color(Color::Blue),
            );
        }

        let mut buf = Vec::new();
        match report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }

    fn span_range(&self, source: &str) -> Option<Range<usize>> {
        let span = self.span.as_ref()?;
        (span.end <= source.len()).then(|| span.start..span.end)
    }

    fn line_range(&self, source: &str) -> Option<Range<usize>> {
        let index = self.line?.checked_sub(1)?;
        let start: usize = source.split_inclusive('\n').take(index).map(str::len).sum();
        let text = source.split_inclusive('\n').nth(index)?;
        Some(start..start + text.trim_end_matches(['\r', '\n']).len())
    }
}

/// Parse `input`, rendering a failure as a diagnostic report.
pub fn parse_with_diagnostics(
    parser: &dyn RecordParser,
    input: &str,
    filename: &str,
) -> Result<Vec<Record>, String> {
    parser
        .parse(input)
        .map_err(|e| e.to_diagnostic(filename, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceSpan, ValueError};
    use crate::{MedlineParser, RecordFormat};

    #[test]
    fn test_line_range() {
        let source = "PMID- 1\r\nbad line\r\n";
        let err = ParseError::at_line(2, RecordFormat::Medline, ValueError::Syntax("x".into()));
        assert_eq!(err.line_range(source), Some(9..17));
    }

    #[test]
    fn test_out_of_range_span_is_ignored() {
        let err = ParseError::without_position(RecordFormat::Medline, ValueError::Syntax("x".into()))
            .with_span(SourceSpan::new(0, 100));
        assert_eq!(err.span_range("short"), None);
        assert!(err.to_diagnostic("short.txt", "short").contains("short.txt"));
    }

    #[test]
    fn test_parse_with_diagnostics() {
        let source = "PMID- 1\nTI  - Title\nnot a field line\n";
        let report = parse_with_diagnostics(&MedlineParser::new(), source, "records.txt").unwrap_err();
        assert!(report.contains("records.txt"));
        assert!(report.contains("not a field line"));

        let records = parse_with_diagnostics(&MedlineParser::new(), "PMID- 2\n", "ok.txt").unwrap();
        assert_eq!(records.len(), 1);
    }
}
