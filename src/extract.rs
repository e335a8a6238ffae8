//! Field extractors: total functions from one [Record] to one derived fact.
//!
//! Extraction never fails. Missing tags resolve to the defaults below and any
//! validation (for example whether a year is numeric) happens in
//! [aggregate](crate::aggregate).

use crate::tags::Tag;
use crate::utils::leading_token;
use crate::Record;
use serde::{Deserialize, Serialize};

/// Title used when a record has no `TI`.
pub const NO_TITLE: &str = "No title";
/// Author list used when a record has no `AU`.
pub const NO_AUTHORS: &str = "No authors";
/// Year used when a record has no (or a blank) `DP`.
pub const NO_DATE: &str = "No date";

/// Title, authors and year of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationDetail {
    pub title: String,
    /// `AU` values joined with `", "`.
    pub authors: String,
    /// First token of `DP`, not validated.
    pub year: String,
}

/// Publication year of a record: the first whitespace-delimited token of `DP`,
/// or [NO_DATE].
///
/// ```
/// use medtrend::{Record, Tag};
/// use medtrend::extract::publication_year;
///
/// let record: Record = [(Tag::PublicationDate, "2019 Jan 5".to_string())].into_iter().collect();
/// assert_eq!(publication_year(&record), "2019");
/// assert_eq!(publication_year(&Record::new()), "No date");
/// ```
pub fn publication_year(record: &Record) -> &str {
    record
        .text(Tag::PublicationDate)
        .and_then(leading_token)
        .unwrap_or(NO_DATE)
}

/// Title, joined authors and year of a record, with defaults for missing tags.
pub fn publication_detail(record: &Record) -> PublicationDetail {
    let authors = match record.values(Tag::Author) {
        [] => NO_AUTHORS.to_string(),
        authors => authors.join(", "),
    };
    PublicationDetail {
        title: record.text(Tag::Title).unwrap_or(NO_TITLE).to_string(),
        authors,
        year: publication_year(record).to_string(),
    }
}

/// [publication_detail] of every record, in order.
pub fn publication_details<'a, I>(records: I) -> Vec<PublicationDetail>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().map(publication_detail).collect()
}

/// The year of every detail, in order.
pub fn publication_years(details: &[PublicationDetail]) -> impl Iterator<Item = &str> {
    details.iter().map(|d| d.year.as_str())
}
