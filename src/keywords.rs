//! Disease keyword grouping.
//!
//! A record belongs to the first keyword, in keyword order, that occurs
//! (ignoring case) in its source text, or in any of its field values when the
//! parser kept no source text. Records matching no keyword belong to [OTHER].

use crate::Record;
use serde::Serialize;

/// Disease areas searched by default.
pub const DEFAULT_DISEASE_KEYWORDS: &[&str] = &[
    "cancer",
    "ovarian",
    "hepatoblastoma",
    "pancreas",
    "diabetes",
    "bone",
    "muscle",
    "angiogenesis",
];

/// Group of records matching no keyword.
pub const OTHER: &str = "other";

/// PMIDs of the records assigned to one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordGroup {
    pub keyword: String,
    pub pmids: Vec<String>,
}

/// The first keyword found in the source text of `record`, or in any of its
/// field values when there is no source text.
///
/// ```
/// use medtrend::{Record, Tag};
/// use medtrend::keywords::keyword_category;
///
/// let record: Record = [(Tag::Title, "miR-214 in Ovarian Cancer".to_string())].into_iter().collect();
/// assert_eq!(keyword_category(&record, &["ovarian", "cancer"]), Some("ovarian"));
/// assert_eq!(keyword_category(&record, &["bone"]), None);
/// ```
pub fn keyword_category<'k, K: AsRef<str>>(record: &Record, keywords: &'k [K]) -> Option<&'k str> {
    let values: Vec<String> = match record.raw_text() {
        Some(text) => vec![text.to_lowercase()],
        None => record
            .iter()
            .flat_map(|(_, value)| value.as_slice())
            .map(|v| v.to_lowercase())
            .collect(),
    };
    keywords.iter().map(AsRef::as_ref).find(|keyword| {
        let keyword = keyword.to_lowercase();
        values.iter().any(|v| v.contains(&keyword))
    })
}

/// Group the PMIDs of `records` by [keyword_category].
///
/// Groups follow keyword order with [OTHER] last; empty groups are omitted.
/// Records without a PMID are skipped.
pub fn group_by_keyword<'a, I, K>(records: I, keywords: &[K]) -> Vec<KeywordGroup>
where
    I: IntoIterator<Item = &'a Record>,
    K: AsRef<str>,
{
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); keywords.len() + 1];
    for record in records {
        let Some(pmid) = record.pmid() else {
            continue;
        };
        let slot = keyword_category(record, keywords)
            .and_then(|hit| keywords.iter().position(|k| k.as_ref() == hit))
            .unwrap_or(keywords.len());
        buckets[slot].push(pmid.to_string());
    }

    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .chain(std::iter::once(OTHER.to_string()))
        .zip(buckets)
        .filter(|(_, pmids)| !pmids.is_empty())
        .map(|(keyword, pmids)| KeywordGroup { keyword, pmids })
        .collect()
}
