use crate::RecordFormat;
use crate::error::{ParseError, SourceSpan, ValueError};
use crate::medline::split::BlankLineSplit;
use crate::medline::structure::RawMedlineData;
use crate::whole_lines::WholeLinesIter;
use crate::tags::Tag;
use crate::utils::newline_delimiter_of;
use compact_str::CompactString;
use either::{Either, Left, Right};

/// Longest tag code allowed by the MEDLINE format.
const MAX_TAG_LEN: usize = 4;

/// A syntactically valid field line.
#[derive(Debug, PartialEq)]
enum Entry {
    /// Field with a known tag.
    Known(Tag, String),
    /// Well-formed field whose tag is not in [Tag]; skipped.
    Unknown(CompactString),
}

/// A line which violates the MEDLINE line grammar.
#[derive(Debug, PartialEq)]
struct Malformed {
    line: String,
    reason: &'static str,
}

/// Parse the content of a MEDLINE formatted file into one [RawMedlineData] per
/// record, in input order.
pub(crate) fn medline_parse<S: AsRef<str>>(text: S) -> Result<Vec<RawMedlineData>, ParseError> {
    let text = text.as_ref();
    let text_ptr = text.as_ptr() as usize;
    let line_break = newline_delimiter_of(text);
    BlankLineSplit::new(text, line_break)
        .map(|(line_number, chunk)| {
            let chunk_start = chunk.as_ptr() as usize - text_ptr;
            medline_parse_one(chunk, line_break, line_number, chunk_start)
        })
        .collect()
}

fn medline_parse_one(
    text: &str,
    line_break: &str,
    start_line: usize,
    start_byte: usize,
) -> Result<RawMedlineData, ParseError> {
    let record_span = SourceSpan::new(start_byte, start_byte + text.len());
    let mut entries = Vec::new();
    let mut ignored_tags = Vec::new();
    for (index, line) in WholeLinesIter::new(text.split(line_break)) {
        match parse_complete_entry(line) {
            Right(Entry::Known(tag, value)) => entries.push((tag, value)),
            Right(Entry::Unknown(tag)) => ignored_tags.push(tag),
            Left(Malformed { line, reason }) => {
                return Err(ParseError::at_line(
                    start_line + index,
                    RecordFormat::Medline,
                    ValueError::Syntax(format!("{reason}: '{line}'")),
                )
                .with_span(record_span));
            }
        }
    }
    Ok(RawMedlineData {
        entries,
        ignored_tags,
        start_line,
        record_span,
    })
}

/// Parse the string as a tag-value pair from a MEDLINE formatted file.
fn parse_complete_entry(line: String) -> Either<Malformed, Entry> {
    if line.starts_with([' ', '\t']) {
        return Left(Malformed {
            line,
            reason: "Continuation line without a preceding field",
        });
    }
    let Some((key, value)) = split_on_dash(&line) else {
        return Left(Malformed {
            line,
            reason: "Missing '-' between tag and value",
        });
    };
    if !is_valid_tag(key) {
        return Left(Malformed {
            line,
            reason: "Invalid field tag",
        });
    }
    match Tag::from_tag(key) {
        Some(tag) => Right(Entry::Known(tag, value.trim_end().to_string())),
        None => Right(Entry::Unknown(CompactString::new(key))),
    }
}

/// Split on the first `-` character and remove the whitespace surrounding the removed `-`.
fn split_on_dash(line: &str) -> Option<(&str, &str)> {
    line.split_once('-')
        .map(|(l, r)| (l.trim_end(), r.trim_start()))
}

/// Tags are one to four upper case ASCII letters or digits.
fn is_valid_tag(key: &str) -> bool {
    (1..=MAX_TAG_LEN).contains(&key.len())
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("AU - Albert Einstein", Tag::Author, "Albert Einstein")]
    #[case("AU- Albert Einstein", Tag::Author, "Albert Einstein")]
    #[case("AU -Albert Einstein", Tag::Author, "Albert Einstein")]
    #[case("AU  - Albert Einstein", Tag::Author, "Albert Einstein")]
    #[case("PMID- 12345678", Tag::PubmedUniqueIdentifier, "12345678")]
    #[case("GR  - NIH R01-12345", Tag::GrantNumber, "NIH R01-12345")]
    #[case("TI  - ", Tag::Title, "")]
    fn test_parse_known_entry(#[case] line: &str, #[case] tag: Tag, #[case] value: &str) {
        assert_eq!(
            parse_complete_entry(line.to_string()),
            Right(Entry::Known(tag, value.to_string()))
        );
    }

    #[rstest]
    #[case("ER  -", "ER")]
    #[case("XY  - Unused field", "XY")]
    #[case("OAB - Other abstract", "OAB")]
    fn test_parse_unknown_entry(#[case] line: &str, #[case] tag: &str) {
        assert_eq!(
            parse_complete_entry(line.to_string()),
            Right(Entry::Unknown(CompactString::new(tag)))
        );
    }

    #[rstest]
    #[case("", "Missing '-' between tag and value")]
    #[case("Some random content", "Missing '-' between tag and value")]
    #[case("DNE tag - does not exist", "Invalid field tag")]
    #[case("ti  - lower case", "Invalid field tag")]
    #[case("- no tag", "Invalid field tag")]
    #[case("      orphan - continuation", "Continuation line without a preceding field")]
    fn test_parse_malformed_entry(#[case] line: &str, #[case] reason: &'static str) {
        assert_eq!(
            parse_complete_entry(line.to_string()),
            Left(Malformed {
                line: line.to_string(),
                reason
            })
        );
    }

    #[test]
    fn test_parse_reports_line_of_malformed_record() {
        let text = "PMID- 1\nTI  - One\n\nPMID- 2\nthis line is broken\n";
        let err = medline_parse(text).unwrap_err();
        assert_eq!(err.line, Some(5));
        assert_eq!(err.format, RecordFormat::Medline);
        assert_eq!(err.span, Some(SourceSpan::new(19, 46)));
        assert!(err.to_string().contains("this line is broken"));
    }

    #[test]
    fn test_parse_keeps_record_order_and_spans() {
        let text = "PMID- 1\nTI  - One\n\nPMID- 2\n";
        let raw = medline_parse(text).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].start_line, 1);
        assert_eq!(raw[1].start_line, 4);
        assert_eq!(raw[1].record_span, SourceSpan::new(19, 26));
    }

    #[test]
    fn test_parse_collects_ignored_tags() {
        let raw = medline_parse("PMID- 1\nXY  - ignored\nER  -").unwrap();
        assert_eq!(raw[0].entries.len(), 1);
        assert_eq!(raw[0].ignored_tags, vec!["XY", "ER"]);
    }
}
