//! Publication trend analysis over MEDLINE citation exports.
//!
//! `medtrend` reads bibliographic records exported from PubMed, extracts a
//! handful of facts from each record (publication year, funding category,
//! co-mentioned genes, disease keywords) and aggregates them into dense tables
//! ready to be charted.
//!
//! # Features
//!
//! - `medline` - MEDLINE (`.nbib` / `.txt`) export parsing (enabled by default)
//! - `delimited` - ad-hoc `---` delimited record dumps (enabled by default)
//! - `csv` - CSV output sink for every aggregated table (enabled by default)
//! - `cli` - the `medtrend` command-line tool (enabled by default)
//! - `diagnostics` - pretty parse error reports rendered with ariadne
//!
//! # Basic Usage
//!
//! ```rust
//! use medtrend::{MedlineParser, RecordParser};
//! use medtrend::aggregate::count_by_year;
//! use medtrend::extract::publication_year;
//!
//! let input = r#"PMID- 1
//! TI  - First
//! DP  - 2019 Jan
//!
//! PMID- 2
//! TI  - Second
//! DP  - 2021
//! "#;
//!
//! let records = MedlineParser::new().parse(input).unwrap();
//! let table = count_by_year(records.iter().map(publication_year), 2023).unwrap();
//! assert_eq!(table.get(2020), Some(0));
//! assert_eq!(table.total(), 2);
//! ```
//!
//! # Funding categories
//!
//! ```rust
//! use medtrend::{MedlineParser, RecordParser};
//! use medtrend::funding::{FunderTable, FundingCategory, funding_category};
//!
//! let input = "PMID- 1\nDP  - 2019 Jan\nGR  - NIH R01-12345\nGR  - Pfizer XYZ-999\n";
//! let records = MedlineParser::new().parse(input).unwrap();
//! let facts = funding_category(&records[0], &FunderTable::default());
//! assert_eq!(facts[0].category, FundingCategory::Government);
//! assert_eq!(facts[1].category, FundingCategory::PrivateIndustry);
//! ```
//!
//! # Error Handling
//!
//! Loading a file returns [`MedtrendError`], which keeps missing files, read
//! failures, grammar violations and empty aggregations apart:
//!
//! ```rust
//! use medtrend::{load, MedtrendError};
//!
//! match load("/does/not/exist.txt") {
//!     Err(MedtrendError::FileNotFound { path }) => eprintln!("missing {}", path.display()),
//!     Err(e) => eprintln!("error: {e}"),
//!     Ok(records) => println!("{} records", records.len()),
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

pub mod aggregate;
pub mod config;
pub mod cooccurrence;
#[cfg(feature = "delimited")]
pub mod delimited;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod funding;
pub mod keywords;
#[cfg(feature = "medline")]
pub mod medline;
#[cfg(feature = "csv")]
pub mod sink;
pub mod tags;

// Reexports
pub use config::AnalysisConfig;
#[cfg(feature = "delimited")]
pub use delimited::DelimitedParser;
pub use error::{AggregateError, ConfigError, MedtrendError, ParseError, SourceSpan, ValueError};
#[cfg(feature = "medline")]
pub use medline::MedlineParser;
pub use tags::Tag;

mod regex;
mod utils;
#[cfg(any(feature = "medline", feature = "delimited"))]
mod whole_lines;

/// Record formats supported by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Medline,
    Delimited,
    Unknown,
}

impl RecordFormat {
    /// Convert the format to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Medline => "MEDLINE",
            RecordFormat::Delimited => "delimited",
            RecordFormat::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one field in a [Record].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Value of a single-valued tag such as `TI` or `DP`.
    Single(String),
    /// Ordered values of a repeatable tag such as `AU`, `GR`, `MH` or `RN`.
    Multi(Vec<String>),
}

impl FieldValue {
    /// All values as a slice; a single value is a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldValue::Single(s) => std::slice::from_ref(s),
            FieldValue::Multi(v) => v,
        }
    }

    /// The single value, or the first of many.
    pub fn first(&self) -> Option<&str> {
        self.as_slice().first().map(String::as_str)
    }
}

/// One bibliographic record: an ordered mapping from [Tag] to [FieldValue].
///
/// Fields keep the order in which their tag first appeared in the source.
/// A record need not carry every tag; the extractors in [extract] document
/// the default used for each missing tag.
///
/// Parsers of free-form dumps may also keep the record's source text, which
/// [keywords::keyword_category] searches instead of the field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(Tag, FieldValue)>,
    raw: Option<String>,
}

impl Record {
    /// Create a new empty Record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for `tag`.
    ///
    /// Values of multi-valued tags accumulate in order. A repeated
    /// single-valued tag is joined onto the existing value with `" AND "`.
    pub fn insert(&mut self, tag: Tag, value: String) {
        match self.fields.iter_mut().find(|(t, _)| *t == tag) {
            Some((_, FieldValue::Multi(values))) => values.push(value),
            Some((_, FieldValue::Single(existing))) => {
                existing.push_str(" AND ");
                existing.push_str(&value);
            }
            None if tag.is_multi_valued() => self.fields.push((tag, FieldValue::Multi(vec![value]))),
            None => self.fields.push((tag, FieldValue::Single(value))),
        }
    }

    /// Get the value of `tag`, if present.
    pub fn get(&self, tag: Tag) -> Option<&FieldValue> {
        self.fields.iter().find(|(t, _)| *t == tag).map(|(_, v)| v)
    }

    /// Get the (first) value of `tag` as a string.
    pub fn text(&self, tag: Tag) -> Option<&str> {
        self.get(tag).and_then(FieldValue::first)
    }

    /// Get every value of `tag`; empty when the tag is absent.
    pub fn values(&self, tag: Tag) -> &[String] {
        self.get(tag).map(FieldValue::as_slice).unwrap_or(&[])
    }

    /// Whether the record has a value for `tag`.
    pub fn contains(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// PubMed unique identifier.
    pub fn pmid(&self) -> Option<&str> {
        self.text(Tag::PubmedUniqueIdentifier)
    }

    /// Iterate over the fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &FieldValue)> {
        self.fields.iter().map(|(t, v)| (*t, v))
    }

    /// Number of distinct tags in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attach the text the record was parsed from.
    pub fn with_raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw = Some(text.into());
        self
    }

    /// The text the record was parsed from, when the parser kept it.
    pub fn raw_text(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl FromIterator<(Tag, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (Tag, String)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (tag, value) in iter {
            record.insert(tag, value);
        }
        record
    }
}

/// Trait for implementing record parsers.
pub trait RecordParser {
    /// Parse a string containing zero or more records.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input is malformed
    fn parse(&self, input: &str) -> std::result::Result<Vec<Record>, ParseError>;

    /// The format this parser reads.
    fn format(&self) -> RecordFormat;
}

/// Load every record of a MEDLINE file.
///
/// The file is read completely and closed before parsing starts.
///
/// # Errors
///
/// - [`MedtrendError::FileNotFound`] if `path` does not exist
/// - [`MedtrendError::Io`] if the file cannot be read
/// - [`MedtrendError::Parse`] if the content is not valid MEDLINE
#[cfg(feature = "medline")]
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, MedtrendError> {
    load_with(path, &MedlineParser::new())
}

/// Load every record of a file with an explicit parser.
pub fn load_with<P: AsRef<Path>>(
    path: P,
    parser: &dyn RecordParser,
) -> Result<Vec<Record>, MedtrendError> {
    let path = path.as_ref();
    let text = read_source(path)?;
    parse_source(path, &text, parser)
}

/// Parse text already read from `path`, attributing errors to that file.
///
/// Pairs with [read_source] when the caller needs the text again, for example
/// to render a parse error against it.
pub fn parse_source(
    path: &Path,
    text: &str,
    parser: &dyn RecordParser,
) -> Result<Vec<Record>, MedtrendError> {
    let records = parser.parse(text).map_err(|source| MedtrendError::Parse {
        path: Some(path.to_path_buf()),
        source,
    })?;
    info!(
        path = %path.display(),
        format = %parser.format(),
        records = records.len(),
        "loaded records"
    );
    Ok(records)
}

/// Load every record of a file, detecting its format from the content.
pub fn load_detected<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, MedtrendError> {
    let path = path.as_ref();
    let text = read_source(path)?;
    let (records, format) = detect_and_parse(&text).map_err(|e| e.in_file(path))?;
    info!(path = %path.display(), %format, records = records.len(), "loaded records");
    Ok(records)
}

/// Read a whole file into memory, keeping "not found" apart from other I/O errors.
///
/// # Errors
///
/// - [`MedtrendError::FileNotFound`] if `path` does not exist
/// - [`MedtrendError::Io`] for any other read failure
pub fn read_source(path: &Path) -> Result<String, MedtrendError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => MedtrendError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => MedtrendError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Format detection and automatic parsing of record dumps.
///
/// Content containing a `---` separator line is read as the delimited format;
/// otherwise content starting a line with `PMID-` is read as MEDLINE.
///
/// # Examples
///
/// ```
/// use medtrend::{detect_and_parse, RecordFormat};
///
/// let content = "PMID- 1\nTI  - Example Title\n";
/// let (records, format) = detect_and_parse(content).unwrap();
/// assert_eq!(format, RecordFormat::Medline);
/// assert_eq!(records[0].pmid(), Some("1"));
/// ```
pub fn detect_and_parse(content: &str) -> Result<(Vec<Record>, RecordFormat), MedtrendError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok((Vec::new(), RecordFormat::Unknown));
    }

    let has_pmid = trimmed.starts_with("PMID-") || trimmed.contains("\nPMID-");

    if has_pmid && utils::has_separator_line(content) {
        #[cfg(feature = "delimited")]
        {
            let records = DelimitedParser::new()
                .parse(content)
                .map_err(MedtrendError::from)?;
            return Ok((records, RecordFormat::Delimited));
        }
        #[cfg(not(feature = "delimited"))]
        return Err(MedtrendError::UnknownFormat);
    }

    if has_pmid {
        #[cfg(feature = "medline")]
        {
            let records = MedlineParser::new()
                .parse(content)
                .map_err(MedtrendError::from)?;
            return Ok((records, RecordFormat::Medline));
        }
        #[cfg(not(feature = "medline"))]
        return Err(MedtrendError::UnknownFormat);
    }

    Err(MedtrendError::UnknownFormat)
}
