//! File-backed tests of loading, extraction and aggregation.

use medtrend::aggregate::{align_years, count_by_year, pivot_by_year_and_category};
use medtrend::cooccurrence::{TermMatcher, TermSource, cooccurrence_edges};
use medtrend::extract::{publication_details, publication_year, publication_years};
use medtrend::funding::{FunderTable, FundingCategory, FundingFact, funding_facts};
use medtrend::keywords::{DEFAULT_DISEASE_KEYWORDS, group_by_keyword};
use medtrend::sink::CsvSink;
use medtrend::{
    DelimitedParser, MedlineParser, MedtrendError, RecordFormat, Tag, load, load_detected, load_with, parse_source,
    read_source,
};
use pretty_assertions::assert_eq;
use std::path::Path;

const GENETIC: &str = "PMID- 30000001
TI  - Genetic variants in endometriosis.
AU  - Smith J
AU  - Jones B
DP  - 2019 Jan
GR  - NIH R01-12345
GR  - Pfizer XYZ-999
MH  - Endometriosis/genetics
MH  - Gene Alpha
MH  - Gene Beta

PMID- 30000002
TI  - A second study of the genetics
      of endometriosis.
DP  - 2021 Mar 4
GR  - Wellcome 0001
MH  - Gene Alpha
MH  - Gene Beta
MH  - Gene Gamma

PMID- 30000003
TI  - Undated letter.
";

const ALL: &str = "PMID- 1
DP  - 2017

PMID- 2
DP  - 2019

PMID- 3
DP  - 2026 Jan
";

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_medline_file() {
    let dir = tempdir();
    let path = write(dir.path(), "genetic.txt", GENETIC);
    let records = load(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[1].text(Tag::Title),
        Some("A second study of the genetics of endometriosis.")
    );
    let years: Vec<_> = records.iter().map(publication_year).collect();
    assert_eq!(years, vec!["2019", "2021", "No date"]);
}

#[test]
fn test_missing_file_names_exact_path() {
    let dir = tempdir();
    let path = dir.path().join("absent").join("all_endometriosis_studies.txt");
    match load(&path) {
        Err(MedtrendError::FileNotFound { path: missing }) => assert_eq!(missing, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let dir = tempdir();
    let path = write(dir.path(), "bad.txt", "PMID- 1\nthis is not a field\n");
    match load(&path) {
        Err(MedtrendError::Parse { path: Some(p), source }) => {
            assert_eq!(p, path);
            assert_eq!(source.line, Some(2));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_read_then_parse_keeps_the_text() {
    let dir = tempdir();
    let path = write(dir.path(), "bad.txt", "PMID- 1\nthis is not a field\n");
    let text = read_source(&path).unwrap();
    match parse_source(&path, &text, &MedlineParser::new()) {
        Err(MedtrendError::Parse { path: Some(p), source }) => {
            assert_eq!(p, path);
            let span = source.span.unwrap();
            assert_eq!(&text[span.start..span.end], "PMID- 1\nthis is not a field");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_unreadable_path_is_an_io_error() {
    let dir = tempdir();
    assert!(matches!(read_source(dir.path()), Err(MedtrendError::Io { .. })));
}

#[test]
fn test_runs_are_idempotent() {
    let dir = tempdir();
    let path = write(dir.path(), "genetic.txt", GENETIC);
    let run = || {
        let records = load(&path).unwrap();
        let details = publication_details(&records);
        let counts = count_by_year(publication_years(&details), 2023).unwrap();
        let pivot = pivot_by_year_and_category(&funding_facts(&records, &FunderTable::default())).unwrap();
        (counts, pivot)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_funding_scenario() {
    let dir = tempdir();
    let path = write(dir.path(), "genetic.txt", GENETIC);
    let records = load(&path).unwrap();
    let facts = funding_facts(&records[..1], &FunderTable::default());
    assert_eq!(
        facts,
        vec![
            FundingFact {
                year: "2019".to_string(),
                category: FundingCategory::Government,
            },
            FundingFact {
                year: "2019".to_string(),
                category: FundingCategory::PrivateIndustry,
            },
        ]
    );
}

#[test]
fn test_aligned_series_to_csv() {
    let dir = tempdir();
    let genetic = load(write(dir.path(), "genetic.txt", GENETIC)).unwrap();
    let all = load(write(dir.path(), "all.txt", ALL)).unwrap();

    let genetic_counts = count_by_year(genetic.iter().map(publication_year), 2023).unwrap();
    let all_counts = count_by_year(all.iter().map(publication_year), 2023).unwrap();
    assert_eq!(genetic_counts.excluded().unparseable, 1);
    assert_eq!(all_counts.excluded().beyond_ceiling, 1);

    let aligned = align_years(&[genetic_counts, all_counts]);
    let mut sink = CsvSink::new(Vec::new());
    sink.write_year_series(&[("genetic", &aligned[0]), ("all", &aligned[1])])
        .unwrap();
    let csv = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(
        csv,
        "Year,genetic,all\n2017,0,1\n2018,0,0\n2019,1,1\n2020,0,0\n2021,1,0\n"
    );
}

#[test]
fn test_cooccurrence_over_file() {
    let dir = tempdir();
    let records = load(write(dir.path(), "genetic.txt", GENETIC)).unwrap();
    let genes = TermMatcher::prefix("gene");
    let edges = medtrend::aggregate::edge_weights(&cooccurrence_edges(
        &records,
        TermSource::Mesh,
        |t| genes.matches(t),
    ));
    assert_eq!(
        edges,
        vec![
            ("Gene Alpha".to_string(), "Gene Beta".to_string(), 2),
            ("Gene Alpha".to_string(), "Gene Gamma".to_string(), 1),
            ("Gene Beta".to_string(), "Gene Gamma".to_string(), 1),
        ]
    );
}

#[test]
fn test_wrapped_title_in_dump_reaches_its_keyword() {
    let dir = tempdir();
    let dump = "PMID- 21\nTI  - A study of microRNA expression in\n      ovarian tissue samples.\n---\nPMID- 22\nTI  - Unrelated\n";
    let records = load_detected(write(dir.path(), "all_mir_214.txt", dump)).unwrap();
    assert_eq!(
        records[0].text(Tag::Title),
        Some("A study of microRNA expression in ovarian tissue samples.")
    );
    let groups = group_by_keyword(&records, DEFAULT_DISEASE_KEYWORDS);
    assert_eq!(groups[0].keyword, "ovarian");
    assert_eq!(groups[0].pmids, vec!["21".to_string()]);
    assert_eq!(groups[1].keyword, "other");
}

#[test]
fn test_delimited_dump_keyword_groups() {
    let dir = tempdir();
    let dump = "PMID- 11\nTI- miR-214 promotes ovarian cancer\n---\nNo identifier\n---\nPMID- 12\nTI- miR-214 in bone\n---\nPMID- 13\nTI- miR-214 targets\n";
    let path = write(dir.path(), "all_mir_214.txt", dump);

    let detected = load_detected(&path).unwrap();
    let explicit = load_with(&path, &DelimitedParser::new()).unwrap();
    assert_eq!(detected, explicit);
    assert_eq!(medtrend::detect_and_parse(dump).unwrap().1, RecordFormat::Delimited);

    let groups = group_by_keyword(&detected, DEFAULT_DISEASE_KEYWORDS);
    let summary: Vec<_> = groups
        .iter()
        .map(|g| (g.keyword.as_str(), g.pmids.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("cancer", vec!["11".to_string()]),
            ("bone", vec!["12".to_string()]),
            ("other", vec!["13".to_string()]),
        ]
    );
}
