//! Funding categories of grant references (`GR`).
//!
//! Each grant reference is categorized by its leading whitespace-delimited
//! token (the funder), looked up case-sensitively in a [FunderTable]. Funders
//! missing from the table fall into [FundingCategory::Other].

use crate::extract::publication_year;
use crate::tags::Tag;
use crate::utils::leading_token;
use crate::Record;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default funder to category mappings.
pub(crate) const DEFAULT_FUNDERS: &[(&str, FundingCategory)] = &[
    ("NIH", FundingCategory::Government),
    ("NSF", FundingCategory::Government),
    ("FDA", FundingCategory::Government),
    ("DoD", FundingCategory::Government),
    ("Wellcome", FundingCategory::NonProfit),
    ("Gates", FundingCategory::NonProfit),
    ("Pfizer", FundingCategory::PrivateIndustry),
    ("Merck", FundingCategory::PrivateIndustry),
    ("Novartis", FundingCategory::PrivateIndustry),
    ("Harvard", FundingCategory::Academic),
    ("MIT", FundingCategory::Academic),
];

/// Category of a funding source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FundingCategory {
    Government,
    #[serde(rename = "Non-Profit")]
    NonProfit,
    #[serde(rename = "Private Industry")]
    PrivateIndustry,
    Academic,
    Other,
}

impl FundingCategory {
    /// Every category, in column order.
    pub const ALL: [FundingCategory; 5] = [
        FundingCategory::Government,
        FundingCategory::NonProfit,
        FundingCategory::PrivateIndustry,
        FundingCategory::Academic,
        FundingCategory::Other,
    ];

    /// Display name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingCategory::Government => "Government",
            FundingCategory::NonProfit => "Non-Profit",
            FundingCategory::PrivateIndustry => "Private Industry",
            FundingCategory::Academic => "Academic",
            FundingCategory::Other => "Other",
        }
    }

    /// Column position of the category in [FundingCategory::ALL].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for FundingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grant reference of a record, reduced to its year and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingFact {
    /// The record's [publication_year], not validated.
    pub year: String,
    pub category: FundingCategory,
}

/// Lookup table from funder name to [FundingCategory].
///
/// # Examples
///
/// ```
/// use medtrend::funding::{FunderTable, FundingCategory};
///
/// let mut table = FunderTable::default();
/// table.insert("ERC", FundingCategory::Government);
/// assert_eq!(table.categorize("ERC 12345"), FundingCategory::Government);
/// assert_eq!(table.categorize("Unknown 1"), FundingCategory::Other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunderTable {
    funders: BTreeMap<CompactString, FundingCategory>,
}

impl Default for FunderTable {
    fn default() -> Self {
        DEFAULT_FUNDERS.iter().copied().collect()
    }
}

impl FunderTable {
    /// Creates a table without any funder.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            funders: BTreeMap::new(),
        }
    }

    /// Adds or replaces a funder mapping.
    pub fn insert(&mut self, funder: &str, category: FundingCategory) -> &mut Self {
        self.funders.insert(CompactString::new(funder), category);
        self
    }

    /// The category of an exact funder name.
    pub fn get(&self, funder: &str) -> Option<FundingCategory> {
        self.funders.get(funder).copied()
    }

    /// Categorize a grant reference by its leading token.
    pub fn categorize(&self, grant: &str) -> FundingCategory {
        leading_token(grant)
            .and_then(|funder| self.get(funder))
            .unwrap_or(FundingCategory::Other)
    }

    /// Number of funders in the table.
    pub fn len(&self) -> usize {
        self.funders.len()
    }

    /// Whether the table has no funder.
    pub fn is_empty(&self) -> bool {
        self.funders.is_empty()
    }

    /// Iterate over `(funder, category)` in funder order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FundingCategory)> {
        self.funders.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<(&'a str, FundingCategory)> for FunderTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, FundingCategory)>>(iter: I) -> Self {
        let mut table = FunderTable::empty();
        table.extend(iter);
        table
    }
}

impl<'a> Extend<(&'a str, FundingCategory)> for FunderTable {
    fn extend<I: IntoIterator<Item = (&'a str, FundingCategory)>>(&mut self, iter: I) {
        for (funder, category) in iter {
            self.insert(funder, category);
        }
    }
}

/// One [FundingFact] per grant reference of the record, all with the record's
/// publication year. A record without `GR` yields no facts.
pub fn funding_category(record: &Record, table: &FunderTable) -> Vec<FundingFact> {
    let year = publication_year(record);
    record
        .values(Tag::GrantNumber)
        .iter()
        .map(|grant| FundingFact {
            year: year.to_string(),
            category: table.categorize(grant),
        })
        .collect()
}

/// [funding_category] of every record, concatenated in order.
pub fn funding_facts<'a, I>(records: I, table: &FunderTable) -> Vec<FundingFact>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .flat_map(|r| funding_category(r, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn record(fields: &[(Tag, &str)]) -> Record {
        fields.iter().map(|(t, v)| (*t, v.to_string())).collect()
    }

    #[test]
    fn test_grants_of_one_record() {
        let r = record(&[
            (Tag::PublicationDate, "2019 Jan"),
            (Tag::GrantNumber, "NIH R01-12345"),
            (Tag::GrantNumber, "Pfizer XYZ-999"),
        ]);
        assert_eq!(
            funding_category(&r, &FunderTable::default()),
            vec![
                FundingFact {
                    year: "2019".to_string(),
                    category: FundingCategory::Government
                },
                FundingFact {
                    year: "2019".to_string(),
                    category: FundingCategory::PrivateIndustry
                },
            ]
        );
    }

    #[test]
    fn test_record_without_grants() {
        let r = record(&[(Tag::PublicationDate, "2019")]);
        assert!(funding_category(&r, &FunderTable::default()).is_empty());
    }

    #[test]
    fn test_record_without_date_keeps_facts() {
        let r = record(&[(Tag::GrantNumber, "NSF 1")]);
        let facts = funding_category(&r, &FunderTable::default());
        assert_eq!(facts[0].year, "No date");
        assert_eq!(facts[0].category, FundingCategory::Government);
    }

    #[rstest]
    #[case("NIH R01-12345", FundingCategory::Government)]
    #[case("DoD W81XWH", FundingCategory::Government)]
    #[case("Wellcome 0001", FundingCategory::NonProfit)]
    #[case("Merck 1", FundingCategory::PrivateIndustry)]
    #[case("MIT", FundingCategory::Academic)]
    #[case("nih R01", FundingCategory::Other)]
    #[case("R01 HD012345/HD/NICHD NIH HHS/United States", FundingCategory::Other)]
    #[case("", FundingCategory::Other)]
    #[case("   ", FundingCategory::Other)]
    fn test_categorize(#[case] grant: &str, #[case] expected: FundingCategory) {
        assert_eq!(FunderTable::default().categorize(grant), expected);
    }

    #[test]
    fn test_custom_table() {
        let table: FunderTable = [("Wellcome", FundingCategory::Academic)].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert_eq!(table.categorize("Wellcome 1"), FundingCategory::Academic);
        assert_eq!(table.categorize("NIH 1"), FundingCategory::Other);
    }

    #[test]
    fn test_funding_facts_concatenates_records() {
        let records = vec![
            record(&[(Tag::PublicationDate, "2019"), (Tag::GrantNumber, "NIH 1")]),
            record(&[(Tag::PublicationDate, "2020")]),
            record(&[(Tag::PublicationDate, "2021"), (Tag::GrantNumber, "Gates 2")]),
        ];
        let facts = funding_facts(&records, &FunderTable::default());
        let years: Vec<_> = facts.iter().map(|f| f.year.as_str()).collect();
        assert_eq!(years, vec!["2019", "2021"]);
        assert_eq!(facts[1].category, FundingCategory::NonProfit);
    }

    #[test]
    fn test_category_display_and_index() {
        let names: Vec<_> = FundingCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            vec!["Government", "Non-Profit", "Private Industry", "Academic", "Other"]
        );
        for (i, c) in FundingCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }
}
