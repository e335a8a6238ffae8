//! MEDLINE format parser implementation.
//!
//! Parses the tagged text export produced by PubMed ("Save as PubMed/MEDLINE").
//!
//! # Example
//!
//! ```
//! use medtrend::{MedlineParser, RecordParser, Tag};
//!
//! let input = r#"PMID- 12345678
//! TI  - Example Title
//! AU  - Smith J
//!
//! "#;
//!
//! let parser = MedlineParser::new();
//!
//! let records = parser.parse(input).unwrap();
//! assert_eq!(records[0].text(Tag::Title), Some("Example Title"));
//! ```

mod parse;
mod split;
mod structure;

use crate::error::ParseError;
use crate::medline::parse::medline_parse;
use crate::{Record, RecordFormat, RecordParser};

/// Parser for MEDLINE format records.
///
/// Records are separated by blank lines. Each field line is a tag of up to four
/// upper case characters, a dash and the value; lines starting with whitespace
/// continue the previous field.
#[derive(Debug, Clone, Default)]
pub struct MedlineParser {}

impl MedlineParser {
    /// Creates a new MEDLINE parser instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordParser for MedlineParser {
    /// Parses a string containing one or more records in MEDLINE format.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for the first line that is neither a field line nor
    /// a continuation of one. No partial record is returned.
    fn parse(&self, input: &str) -> Result<Vec<Record>, ParseError> {
        // Handle empty input by returning empty vector
        if input.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(medline_parse(input)?
            .into_iter()
            .map(Record::from)
            .collect())
    }

    fn format(&self) -> RecordFormat {
        RecordFormat::Medline
    }
}
