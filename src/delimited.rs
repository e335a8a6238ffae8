//! Parser for ad-hoc record dumps separated by `---` lines.
//!
//! Some hand-assembled exports concatenate MEDLINE snippets with a literal
//! `"\n---\n"` between records. Fields are located anywhere in a block by the
//! `TAG- value` pattern, indented lines continue the field before them, and
//! only blocks carrying a numeric `PMID` are kept. Each record keeps its block
//! text for keyword searches.
//!
//! # Example
//!
//! ```
//! use medtrend::{DelimitedParser, RecordParser};
//!
//! let input = "PMID- 101\nTI- miR-214 in ovarian cancer\n---\nno identifier here\n---\nPMID- 102\n";
//! let records = DelimitedParser::new().parse(input).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].pmid(), Some("102"));
//! ```

use crate::error::ParseError;
use crate::regex::Regex;
use crate::tags::Tag;
use crate::utils::{RECORD_SEPARATOR, newline_delimiter_of};
use crate::whole_lines::WholeLinesIter;
use crate::{Record, RecordFormat, RecordParser};
use std::sync::LazyLock;
use tracing::debug;

static FIELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9]{0,3}) *- ?(.*)$").unwrap());

static PMID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Parser for `---` delimited record dumps.
#[derive(Debug, Clone, Default)]
pub struct DelimitedParser {}

impl DelimitedParser {
    /// Creates a new delimited parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordParser for DelimitedParser {
    /// Parses every block of the input; blocks without a numeric PMID are skipped.
    fn parse(&self, input: &str) -> Result<Vec<Record>, ParseError> {
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let separator = if newline_delimiter_of(input) == "\r\n" {
            "\r\n---\r\n"
        } else {
            RECORD_SEPARATOR
        };

        let mut skipped = 0;
        let records: Vec<Record> = input
            .split(separator)
            .filter_map(|block| {
                let record = parse_block(block);
                if record.pmid().is_some_and(|p| PMID_REGEX.is_match(p)) {
                    Some(record)
                } else {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            debug!(skipped, "skipped blocks without a PMID");
        }
        Ok(records)
    }

    fn format(&self) -> RecordFormat {
        RecordFormat::Delimited
    }
}

/// Collect every known `TAG- value` field of a block, continuations joined.
fn parse_block(block: &str) -> Record {
    let record: Record = WholeLinesIter::new(block.lines())
        .filter_map(|(_, line)| {
            let caps = FIELD_REGEX.captures(&line)?;
            let tag = Tag::from_tag(caps.get(1)?.as_str())?;
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            Some((tag, value.to_string()))
        })
        .collect();
    record.with_raw_text(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_blocks() {
        let input = "PMID- 101\nTI- First\nAB- mir-214 and bone\n---\nPMID- 102\nTI- Second\n";
        let records = DelimitedParser::new().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pmid(), Some("101"));
        assert_eq!(records[0].text(Tag::Abstract), Some("mir-214 and bone"));
        assert_eq!(records[1].text(Tag::Title), Some("Second"));
    }

    #[test]
    fn test_blocks_without_pmid_are_skipped() {
        let input = "TI- Orphan\n---\nPMID- abc\n---\nPMID- 7\n";
        let records = DelimitedParser::new().parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pmid(), Some("7"));
    }

    #[test]
    fn test_medline_spacing_is_accepted() {
        let input = "PMID- 5\nTI  - Padded tag\nMH  - Humans\nMH  - Female\n";
        let records = DelimitedParser::new().parse(input).unwrap();
        assert_eq!(records[0].text(Tag::Title), Some("Padded tag"));
        assert_eq!(records[0].values(Tag::MeshTerms), &["Humans", "Female"]);
    }

    #[test]
    fn test_crlf_separator() {
        let input = "PMID- 1\r\nTI- One\r\n---\r\nPMID- 2\r\nTI- Two\r\n";
        let records = DelimitedParser::new().parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(Tag::Title), Some("One"));
    }

    #[test]
    fn test_wrapped_title_is_joined() {
        let input = "PMID- 21\nTI  - A study of microRNA expression in\n      ovarian tissue samples.\nDP  - 2015\n---\nPMID- 22\n";
        let records = DelimitedParser::new().parse(input).unwrap();
        assert_eq!(
            records[0].text(Tag::Title),
            Some("A study of microRNA expression in ovarian tissue samples.")
        );
        assert_eq!(records[0].text(Tag::PublicationDate), Some("2015"));
        assert_eq!(
            records[0].raw_text(),
            Some("PMID- 21\nTI  - A study of microRNA expression in\n      ovarian tissue samples.\nDP  - 2015")
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(DelimitedParser::new().parse("\n").unwrap().is_empty());
    }
}
