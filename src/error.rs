//! Error types for loading, parsing and aggregating records.
//!
//! Loading failures (missing file, unreadable file, malformed content) and
//! aggregation failures (no usable year left after filtering) are kept in
//! separate types so that callers can report them distinctly.

use crate::RecordFormat;
use crate::aggregate::Exclusions;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A byte-offset span into the original source text.
///
/// Both `start` and `end` are byte offsets from the beginning of the source
/// string.  `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpan {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceSpan {
    /// Create a new `SourceSpan`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Field name constants for consistent error reporting.
pub mod fields {
    pub const PMID: &str = "pmid";
    pub const TAG: &str = "tag";
    pub const LABEL_INTERVAL: &str = "years.label_interval";
    pub const CEILING_YEAR: &str = "years.ceiling_year";
    pub const FINAL_YEAR: &str = "years.final_year";
    pub const COOCCURRENCE: &str = "cooccurrence";
    pub const KEYWORDS: &str = "keywords.diseases";
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum MedtrendError {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse{}: {source}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: ParseError,
    },

    #[error("Unable to detect record format from input")]
    UnknownFormat,

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[cfg(feature = "csv")]
    #[error("Failed to write table: {0}")]
    Sink(#[from] csv::Error),
}

impl MedtrendError {
    /// Attach the source file to a parse error that was raised without one.
    pub fn in_file(self, file: &Path) -> Self {
        match self {
            MedtrendError::Parse { path: None, source } => MedtrendError::Parse {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

impl From<ParseError> for MedtrendError {
    fn from(source: ParseError) -> Self {
        MedtrendError::Parse { path: None, source }
    }
}

/// Parse error with detailed location and context information.
#[derive(Error, Debug)]
#[error("Error in {format} format{}: {error}",
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {} column {}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        (None, Some(c)) => format!(" at column {}", c),
        (None, None) => String::new(),
    }
)]
pub struct ParseError {
    /// Line number where the error occurred (1-based, None if not available)
    pub line: Option<usize>,
    /// Column number where the error occurred (1-based, None if not available)
    pub column: Option<usize>,
    /// Byte-offset span into the source text, for rich diagnostic rendering.
    pub span: Option<SourceSpan>,
    /// The record format being parsed
    pub format: RecordFormat,
    /// The specific error that occurred
    pub error: ValueError,
}

impl ParseError {
    /// Create a new ParseError.
    pub fn new(
        line: Option<usize>,
        column: Option<usize>,
        format: RecordFormat,
        error: ValueError,
    ) -> Self {
        Self {
            line,
            column,
            span: None,
            format,
            error,
        }
    }

    /// Attach a byte-offset span to this error, returning `self` (builder style).
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Create a ParseError with just line information.
    pub fn at_line(line: usize, format: RecordFormat, error: ValueError) -> Self {
        Self::new(Some(line), None, format, error)
    }

    /// Create a ParseError with line and column information.
    pub fn at_position(line: usize, column: usize, format: RecordFormat, error: ValueError) -> Self {
        Self::new(Some(line), Some(column), format, error)
    }

    /// Create a ParseError without position information.
    pub fn without_position(format: RecordFormat, error: ValueError) -> Self {
        Self::new(None, None, format, error)
    }
}

/// Specific value-level errors that can occur during parsing.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("Bad syntax: {0}")]
    Syntax(String),

    #[error("Missing value for {key}")]
    MissingValue {
        field: &'static str,
        key: &'static str,
    },

    #[error("Bad value for {key}: \"{value}\" ({reason})")]
    BadValue {
        field: &'static str,
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors raised while aggregating extracted facts.
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error(
        "No valid publication year among {input} values ({} unparseable, {} after the ceiling year)",
        exclusions.unparseable,
        exclusions.beyond_ceiling
    )]
    EmptyYearRange { input: usize, exclusions: Exclusions },

    #[error("Label interval must be greater than zero")]
    InvalidInterval,
}

/// Errors raised while loading or validating an analysis configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    Validation { field: &'static str, message: String },
}
