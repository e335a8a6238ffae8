//! Co-occurrence of indexing terms within a record.
//!
//! Terms are drawn from MeSH headings (`MH`), registry numbers (`RN`) or both.
//! Every unordered pair of distinct matching terms of one record is an edge of
//! the co-occurrence graph; [edge_weights](crate::aggregate::edge_weights)
//! counts how often each edge appears across records.

use crate::tags::Tag;
use crate::Record;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Which fields of a record supply candidate terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSource {
    /// MeSH headings (`MH`).
    #[default]
    Mesh,
    /// Registry numbers and substance names (`RN`).
    Registry,
    /// `MH` followed by `RN`.
    Both,
}

impl TermSource {
    fn tags(&self) -> &'static [Tag] {
        match self {
            TermSource::Mesh => &[Tag::MeshTerms],
            TermSource::Registry => &[Tag::RegistryNumber],
            TermSource::Both => &[Tag::MeshTerms, Tag::RegistryNumber],
        }
    }

    /// Candidate terms of a record, in field order.
    pub fn terms<'r>(&self, record: &'r Record) -> impl Iterator<Item = &'r str> {
        self.tags()
            .iter()
            .flat_map(move |tag| record.values(*tag))
            .map(String::as_str)
    }
}

/// Case-insensitive term predicate.
///
/// ```
/// use medtrend::cooccurrence::TermMatcher;
///
/// let genes = TermMatcher::prefix("gene");
/// assert!(genes.matches("Genes, Tumor Suppressor"));
/// assert!(!genes.matches("Oncogenes"));
/// assert!(TermMatcher::contains("mir-214").matches("0 (MIRN214 microRNA, human) mir-214"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatcher {
    mode: MatchMode,
    /// Always lower case.
    needle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    Prefix,
    Contains,
}

impl TermMatcher {
    /// Matcher for terms starting with `needle`.
    pub fn prefix(needle: &str) -> Self {
        Self {
            mode: MatchMode::Prefix,
            needle: needle.to_lowercase(),
        }
    }

    /// Matcher for terms containing `needle`.
    pub fn contains(needle: &str) -> Self {
        Self {
            mode: MatchMode::Contains,
            needle: needle.to_lowercase(),
        }
    }

    /// The lower-cased needle.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Whether `term` satisfies the matcher, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        match self.mode {
            MatchMode::Prefix => term.starts_with(&self.needle),
            MatchMode::Contains => term.contains(&self.needle),
        }
    }
}

/// An unordered pair of distinct terms, kept in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CooccurrencePair {
    pub a: String,
    pub b: String,
}

impl CooccurrencePair {
    /// The pair as `(a, b)`.
    pub fn as_tuple(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

/// Every pair of distinct terms of `record` accepted by `predicate`.
///
/// Matching terms are trimmed and deduplicated in first-seen order, so `k`
/// distinct terms give `k * (k - 1) / 2` pairs and no pair repeats a term.
pub fn gene_cooccurrence_pairs<F>(
    record: &Record,
    source: TermSource,
    predicate: F,
) -> Vec<CooccurrencePair>
where
    F: Fn(&str) -> bool,
{
    let terms: Vec<&str> = source
        .terms(record)
        .filter(|term| predicate(term))
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .unique()
        .collect();
    terms
        .into_iter()
        .tuple_combinations()
        .map(|(a, b)| CooccurrencePair {
            a: a.to_string(),
            b: b.to_string(),
        })
        .collect()
}

/// [gene_cooccurrence_pairs] of every record, concatenated in order.
pub fn cooccurrence_edges<'a, I, F>(
    records: I,
    source: TermSource,
    predicate: F,
) -> Vec<CooccurrencePair>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&str) -> bool,
{
    records
        .into_iter()
        .flat_map(|record| gene_cooccurrence_pairs(record, source, &predicate))
        .collect()
}
