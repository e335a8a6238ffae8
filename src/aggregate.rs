//! Aggregation of extracted facts into dense tables.
//!
//! Every table spans the full range between the smallest and largest valid
//! year it was built from, with explicit zero rows for years without data.
//! Year strings that do not parse as an integer in [YEAR_RANGE], and years
//! after the ceiling year, are dropped and counted in an [Exclusions] report.

use crate::cooccurrence::CooccurrencePair;
use crate::error::AggregateError;
use crate::funding::{FundingCategory, FundingFact};
use crate::utils::parse_year;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::debug;

/// Latest publication year counted by default.
pub const DEFAULT_CEILING_YEAR: i32 = 2023;
/// Default spacing between cumulative labels, in years.
pub const DEFAULT_LABEL_INTERVAL: u32 = 20;
/// Default last labelled year.
pub const DEFAULT_FINAL_YEAR: i32 = 2023;

/// Years a table may hold. Anything outside counts as unparseable.
pub const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

const CATEGORIES: usize = FundingCategory::ALL.len();

/// Year values dropped while building a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Exclusions {
    /// Values that are not an integer year in [YEAR_RANGE] (for example `"No date"`).
    pub unparseable: usize,
    /// Valid years after the ceiling year.
    pub beyond_ceiling: usize,
}

impl Exclusions {
    /// Number of dropped values.
    pub fn total(&self) -> usize {
        self.unparseable + self.beyond_ceiling
    }
}

/// Validate one year string against `ceiling`, recording the reason for a drop.
fn accept_year(year: &str, ceiling: Option<i32>, excluded: &mut Exclusions) -> Option<i32> {
    match parse_year(year).filter(|y| YEAR_RANGE.contains(y)) {
        None => {
            excluded.unparseable += 1;
            None
        }
        Some(y) if ceiling.is_some_and(|c| y > c) => {
            excluded.beyond_ceiling += 1;
            None
        }
        Some(y) => Some(y),
    }
}

/// Dense `year -> count` series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCountTable {
    start: i32,
    counts: Vec<u64>,
    excluded: Exclusions,
}

impl YearCountTable {
    /// Count of `year`, `None` outside the table's range.
    pub fn get(&self, year: i32) -> Option<u64> {
        let offset = usize::try_from(year.checked_sub(self.start)?).ok()?;
        self.counts.get(offset).copied()
    }

    /// First year of the table.
    pub fn min_year(&self) -> i32 {
        self.start
    }

    /// Last year of the table.
    pub fn max_year(&self) -> i32 {
        self.start + self.counts.len() as i32 - 1
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of years (rows) in the table.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: a table has at least one year.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Values dropped while counting.
    pub fn excluded(&self) -> Exclusions {
        self.excluded
    }

    /// `(year, count)` in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        (self.start..).zip(self.counts.iter().copied())
    }

    /// The same series over `[start, end]`, zero-filled outside the current range.
    pub(crate) fn reindex(&self, start: i32, end: i32) -> YearCountTable {
        YearCountTable {
            start,
            counts: (start..=end).map(|y| self.get(y).unwrap_or(0)).collect(),
            excluded: self.excluded,
        }
    }
}

/// Count publications per year.
///
/// Each value is trimmed and parsed as an integer year; unparseable values,
/// years outside [YEAR_RANGE] and years after `ceiling_year` are dropped. The result covers every year from
/// the smallest to the largest remaining value.
///
/// # Errors
///
/// [AggregateError::EmptyYearRange] when no value survives filtering.
///
/// # Examples
///
/// ```
/// use medtrend::aggregate::count_by_year;
///
/// let table = count_by_year(["2019", "2019", "not-a-year", "2021"], 2023).unwrap();
/// let rows: Vec<_> = table.iter().collect();
/// assert_eq!(rows, vec![(2019, 2), (2020, 0), (2021, 1)]);
/// assert_eq!(table.excluded().unparseable, 1);
/// ```
pub fn count_by_year<I, S>(years: I, ceiling_year: i32) -> Result<YearCountTable, AggregateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut excluded = Exclusions::default();
    let mut input = 0;
    let valid: Vec<i32> = years
        .into_iter()
        .inspect(|_| input += 1)
        .filter_map(|y| accept_year(y.as_ref(), Some(ceiling_year), &mut excluded))
        .collect();

    let Some((start, end)) = valid.iter().copied().minmax().into_option() else {
        return Err(AggregateError::EmptyYearRange {
            input,
            exclusions: excluded,
        });
    };

    let mut counts = vec![0; (end - start) as usize + 1];
    for year in valid {
        counts[(year - start) as usize] += 1;
    }

    if excluded.total() > 0 {
        debug!(
            unparseable = excluded.unparseable,
            beyond_ceiling = excluded.beyond_ceiling,
            "excluded year values"
        );
    }

    Ok(YearCountTable {
        start,
        counts,
        excluded,
    })
}

/// Reindex several series to the union of their year ranges.
pub fn align_years(tables: &[YearCountTable]) -> Vec<YearCountTable> {
    let Some(start) = tables.iter().map(YearCountTable::min_year).min() else {
        return Vec::new();
    };
    let end = tables
        .iter()
        .map(YearCountTable::max_year)
        .max()
        .unwrap_or(start);
    tables.iter().map(|t| t.reindex(start, end)).collect()
}

/// Dense `(year, category) -> count` table, one column per [FundingCategory].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPivotTable {
    start: i32,
    rows: Vec<[u64; CATEGORIES]>,
    excluded: Exclusions,
}

impl CategoryPivotTable {
    /// Count of `category` in `year`, `None` outside the table's range.
    pub fn get(&self, year: i32, category: FundingCategory) -> Option<u64> {
        let offset = usize::try_from(year.checked_sub(self.start)?).ok()?;
        self.rows.get(offset).map(|row| row[category.index()])
    }

    /// First year of the table.
    pub fn min_year(&self) -> i32 {
        self.start
    }

    /// Last year of the table.
    pub fn max_year(&self) -> i32 {
        self.start + self.rows.len() as i32 - 1
    }

    /// Rows as `(year, counts)` with counts in [FundingCategory::ALL] order.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[u64; CATEGORIES])> + '_ {
        (self.start..).zip(self.rows.iter())
    }

    /// Sum of one column.
    pub fn category_total(&self, category: FundingCategory) -> u64 {
        self.rows.iter().map(|row| row[category.index()]).sum()
    }

    /// Values dropped while pivoting.
    pub fn excluded(&self) -> Exclusions {
        self.excluded
    }
}

/// Count funding facts per year and category.
///
/// Facts whose year does not parse into [YEAR_RANGE] are dropped; no ceiling
/// year applies.
///
/// # Errors
///
/// [AggregateError::EmptyYearRange] when no fact has a valid year.
pub fn pivot_by_year_and_category<'a, I>(facts: I) -> Result<CategoryPivotTable, AggregateError>
where
    I: IntoIterator<Item = &'a FundingFact>,
{
    let mut excluded = Exclusions::default();
    let mut input = 0;
    let valid: Vec<(i32, FundingCategory)> = facts
        .into_iter()
        .inspect(|_| input += 1)
        .filter_map(|fact| Some((accept_year(&fact.year, None, &mut excluded)?, fact.category)))
        .collect();

    let Some((start, end)) = valid.iter().map(|(y, _)| *y).minmax().into_option() else {
        return Err(AggregateError::EmptyYearRange {
            input,
            exclusions: excluded,
        });
    };

    let mut rows = vec![[0; CATEGORIES]; (end - start) as usize + 1];
    for (year, category) in valid {
        rows[(year - start) as usize][category.index()] += 1;
    }

    if excluded.total() > 0 {
        debug!(unparseable = excluded.unparseable, "excluded funding facts");
    }

    Ok(CategoryPivotTable {
        start,
        rows,
        excluded,
    })
}

/// Direction of change of a count against the previous year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increased,
    Decreased,
    #[serde(rename = "No Change")]
    NoChange,
}

impl Trend {
    fn between(previous: u64, current: u64) -> Self {
        match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Trend::Increased,
            std::cmp::Ordering::Less => Trend::Decreased,
            std::cmp::Ordering::Equal => Trend::NoChange,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increased => "Increased",
            Trend::Decreased => "Decreased",
            Trend::NoChange => "No Change",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(year, category) -> Trend`, aligned with the pivot it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendTable {
    start: i32,
    rows: Vec<[Trend; CATEGORIES]>,
}

impl TrendTable {
    pub fn get(&self, year: i32, category: FundingCategory) -> Option<Trend> {
        let offset = usize::try_from(year.checked_sub(self.start)?).ok()?;
        self.rows.get(offset).map(|row| row[category.index()])
    }

    /// Rows as `(year, trends)` with trends in [FundingCategory::ALL] order.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[Trend; CATEGORIES])> + '_ {
        (self.start..).zip(self.rows.iter())
    }
}

/// Year-over-year direction of every category. The first year is all
/// [Trend::NoChange].
pub fn trend_by_year(pivot: &CategoryPivotTable) -> TrendTable {
    let first = [Trend::NoChange; CATEGORIES];
    let rows = std::iter::once(first)
        .chain(
            pivot
                .rows
                .iter()
                .tuple_windows()
                .map(|(prev, cur)| std::array::from_fn(|i| Trend::between(prev[i], cur[i]))),
        )
        .take(pivot.rows.len())
        .collect();
    TrendTable {
        start: pivot.start,
        rows,
    }
}

/// A chart label: the count at `year` and the running total through `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeLabel {
    pub year: i32,
    pub count: u64,
    pub total: u64,
}

/// Labels every `interval` years from the first year of `table`, up to and
/// including `final_year`, which is always labelled.
///
/// Years outside the table count as zero.
///
/// # Errors
///
/// [AggregateError::InvalidInterval] when `interval` is zero.
pub fn cumulative_labels(
    table: &YearCountTable,
    interval: u32,
    final_year: i32,
) -> Result<Vec<CumulativeLabel>, AggregateError> {
    if interval == 0 {
        return Err(AggregateError::InvalidInterval);
    }
    let step = i32::try_from(interval).unwrap_or(i32::MAX);

    let mut years = Vec::new();
    let mut year = Some(table.min_year());
    while let Some(y) = year.filter(|y| *y <= final_year) {
        years.push(y);
        year = y.checked_add(step);
    }
    if years.last() != Some(&final_year) {
        years.push(final_year);
    }

    Ok(years
        .into_iter()
        .map(|year| CumulativeLabel {
            year,
            count: table.get(year).unwrap_or(0),
            total: table
                .iter()
                .take_while(|(y, _)| *y <= year)
                .map(|(_, c)| c)
                .sum(),
        })
        .collect())
}

/// Collapse co-occurrence pairs into weighted edges.
///
/// `(a, b)` and `(b, a)` are the same edge. Edges keep the orientation and
/// the order of their first appearance.
pub fn edge_weights(pairs: &[CooccurrencePair]) -> Vec<(String, String, usize)> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut edges: Vec<(String, String, usize)> = Vec::new();
    for pair in pairs {
        let (a, b) = pair.as_tuple();
        let key = if a <= b { (a, b) } else { (b, a) };
        match index.get(&key) {
            Some(&i) => edges[i].2 += 1,
            None => {
                index.insert(key, edges.len());
                edges.push((a.to_string(), b.to_string(), 1));
            }
        }
    }
    edges
}
