//! CSV output of aggregated tables.
//!
//! Each `write_*` method emits a header row followed by the table rows. Tables
//! of different shapes may be written to the same sink one after another.
//!
//! # Example
//!
//! ```
//! use medtrend::aggregate::count_by_year;
//! use medtrend::sink::CsvSink;
//!
//! let table = count_by_year(["2019", "2021"], 2023).unwrap();
//! let mut sink = CsvSink::new(Vec::new());
//! sink.write_year_series(&[("studies", &table)]).unwrap();
//! let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
//! assert_eq!(csv, "Year,studies\n2019,1\n2020,0\n2021,1\n");
//! ```

use crate::aggregate::{CategoryPivotTable, CumulativeLabel, TrendTable, YearCountTable};
use crate::error::MedtrendError;
use crate::extract::PublicationDetail;
use crate::funding::FundingCategory;
use crate::keywords::KeywordGroup;
use std::io;

const YEAR: &str = "Year";

/// Writes tables as CSV to any [io::Write].
pub struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().flexible(true).from_writer(inner),
        }
    }

    /// One `Year` column plus one column per named series.
    ///
    /// Rows span the union of the series' ranges; a series without a row for
    /// a year contributes 0.
    pub fn write_year_series(&mut self, series: &[(&str, &YearCountTable)]) -> Result<(), MedtrendError> {
        let header = std::iter::once(YEAR).chain(series.iter().map(|(name, _)| *name));
        self.writer.write_record(header)?;

        let start = series.iter().map(|(_, t)| t.min_year()).min();
        let end = series.iter().map(|(_, t)| t.max_year()).max();
        if let (Some(start), Some(end)) = (start, end) {
            for year in start..=end {
                let row = std::iter::once(year.to_string())
                    .chain(series.iter().map(|(_, t)| t.get(year).unwrap_or(0).to_string()));
                self.writer.write_record(row)?;
            }
        }
        Ok(())
    }

    /// `Year` plus one column per funding category.
    pub fn write_pivot(&mut self, pivot: &CategoryPivotTable) -> Result<(), MedtrendError> {
        self.write_category_header()?;
        for (year, counts) in pivot.rows() {
            let row = std::iter::once(year.to_string()).chain(counts.iter().map(u64::to_string));
            self.writer.write_record(row)?;
        }
        Ok(())
    }

    pub fn write_trends(&mut self, trends: &TrendTable) -> Result<(), MedtrendError> {
        self.write_category_header()?;
        for (year, row) in trends.rows() {
            let row = std::iter::once(year.to_string()).chain(row.iter().map(|t| t.to_string()));
            self.writer.write_record(row)?;
        }
        Ok(())
    }

    /// Cumulative labels of named series, one `(series, label)` per row.
    pub fn write_labels(
        &mut self,
        series: &[(&str, &[CumulativeLabel])],
    ) -> Result<(), MedtrendError> {
        self.writer.write_record(["Series", YEAR, "Count", "Total"])?;
        for (name, labels) in series {
            for label in *labels {
                self.writer.write_record([
                    name.to_string(),
                    label.year.to_string(),
                    label.count.to_string(),
                    label.total.to_string(),
                ])?;
            }
        }
        Ok(())
    }

    /// Weighted edge list, one edge per row.
    pub fn write_edges(&mut self, edges: &[(String, String, usize)]) -> Result<(), MedtrendError> {
        self.writer.write_record(["Source", "Target", "Weight"])?;
        for (a, b, weight) in edges {
            self.writer
                .write_record([a.as_str(), b.as_str(), weight.to_string().as_str()])?;
        }
        Ok(())
    }

    /// One `(keyword, pmid)` row per grouped record.
    pub fn write_keyword_groups(&mut self, groups: &[KeywordGroup]) -> Result<(), MedtrendError> {
        self.writer.write_record(["Keyword", "PMID"])?;
        for group in groups {
            for pmid in &group.pmids {
                self.writer.write_record([group.keyword.as_str(), pmid.as_str()])?;
            }
        }
        Ok(())
    }

    pub fn write_details(&mut self, details: &[PublicationDetail]) -> Result<(), MedtrendError> {
        self.writer.write_record(["Title", "Authors", YEAR])?;
        for d in details {
            self.writer
                .write_record([d.title.as_str(), d.authors.as_str(), d.year.as_str()])?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), MedtrendError> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, MedtrendError> {
        self.writer
            .into_inner()
            .map_err(|e| MedtrendError::Sink(csv::Error::from(e.into_error())))
    }

    fn write_category_header(&mut self) -> Result<(), MedtrendError> {
        self.writer.write_record(
            std::iter::once(YEAR).chain(FundingCategory::ALL.iter().map(FundingCategory::as_str)),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{count_by_year, cumulative_labels, pivot_by_year_and_category, trend_by_year};
    use crate::funding::FundingFact;
    use pretty_assertions::assert_eq;

    fn render(write: impl FnOnce(&mut CsvSink<Vec<u8>>) -> Result<(), MedtrendError>) -> String {
        let mut sink = CsvSink::new(Vec::new());
        write(&mut sink).unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_year_series_of_different_ranges() {
        let a = count_by_year(["2019", "2020"], 2023).unwrap();
        let b = count_by_year(["2020", "2021", "2021"], 2023).unwrap();
        let csv = render(|s| s.write_year_series(&[("all", &a), ("genetic", &b)]));
        assert_eq!(csv, "Year,all,genetic\n2019,1,0\n2020,1,1\n2021,0,2\n");
    }

    #[test]
    fn test_pivot_and_trends() {
        let facts = vec![
            FundingFact {
                year: "2019".to_string(),
                category: FundingCategory::Government,
            },
            FundingFact {
                year: "2020".to_string(),
                category: FundingCategory::PrivateIndustry,
            },
        ];
        let pivot = pivot_by_year_and_category(&facts).unwrap();
        let csv = render(|s| s.write_pivot(&pivot));
        assert_eq!(
            csv,
            "Year,Government,Non-Profit,Private Industry,Academic,Other\n2019,1,0,0,0,0\n2020,0,0,1,0,0\n"
        );
        let csv = render(|s| s.write_trends(&trend_by_year(&pivot)));
        assert_eq!(
            csv.lines().nth(2),
            Some("2020,Decreased,No Change,Increased,No Change,No Change")
        );
    }

    #[test]
    fn test_labels() {
        let genetic = count_by_year(["2000", "2010"], 2023).unwrap();
        let all = count_by_year(["2003", "2023"], 2023).unwrap();
        let genetic = cumulative_labels(&genetic, 20, 2023).unwrap();
        let all = cumulative_labels(&all, 20, 2023).unwrap();
        let csv = render(|s| s.write_labels(&[("genetic", genetic.as_slice()), ("all", all.as_slice())]));
        assert_eq!(
            csv,
            "Series,Year,Count,Total\ngenetic,2000,1,1\ngenetic,2020,0,2\ngenetic,2023,0,2\nall,2003,1,1\nall,2023,1,2\n"
        );
    }

    #[test]
    fn test_edges_are_quoted() {
        let edges = vec![("Genes, p53".to_string(), "Genes, ras".to_string(), 2)];
        let csv = render(|s| s.write_edges(&edges));
        assert_eq!(csv, "Source,Target,Weight\n\"Genes, p53\",\"Genes, ras\",2\n");
    }

    #[test]
    fn test_keyword_groups() {
        let groups = vec![
            KeywordGroup {
                keyword: "cancer".to_string(),
                pmids: vec!["1".to_string(), "2".to_string()],
            },
            KeywordGroup {
                keyword: "other".to_string(),
                pmids: vec!["3".to_string()],
            },
        ];
        let csv = render(|s| s.write_keyword_groups(&groups));
        assert_eq!(csv, "Keyword,PMID\ncancer,1\ncancer,2\nother,3\n");
    }
}
