//! medtrend - publication trend tables from PubMed exports.
//!
//! ```bash
//! medtrend years --all-endometriosis-file all.txt --genetic-mechanisms-file gm.txt
//! medtrend years --study all --labels
//! medtrend funding --trend --output trend.csv
//! medtrend cooccurrence --profile mir-214
//! medtrend keywords --mir-214-file all_mir_214.txt
//! ```
//!
//! Input files default to the `[inputs]` section of the configuration.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use medtrend::aggregate::{
    CumulativeLabel, YearCountTable, align_years, count_by_year, cumulative_labels, edge_weights,
    pivot_by_year_and_category, trend_by_year,
};
use medtrend::config::InputsConfig;
use medtrend::cooccurrence::cooccurrence_edges;
use medtrend::extract::{publication_details, publication_years};
use medtrend::funding::funding_facts;
use medtrend::keywords::group_by_keyword;
use medtrend::sink::CsvSink;
use medtrend::{AnalysisConfig, MedlineParser, Record};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "medtrend.toml";
const LOG_ENV: &str = "MEDTREND_LOG";

#[derive(Parser)]
#[command(name = "medtrend")]
#[command(version, about = "Publication trend tables from PubMed exports", long_about = None)]
struct Cli {
    /// Configuration file (default: ./medtrend.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publications per year, one column per input file
    Years {
        #[command(flatten)]
        inputs: StudyInputs,

        /// Which inputs to count; `all` aligns all four series
        #[arg(long, value_enum, default_value_t = Study::Endometriosis)]
        study: Study,

        /// Write cumulative chart labels instead of the yearly counts
        #[arg(long)]
        labels: bool,
    },

    /// Funding categories per year over both inputs
    Funding {
        #[command(flatten)]
        inputs: StudyInputs,

        /// Write year-over-year trends instead of counts
        #[arg(long)]
        trend: bool,
    },

    /// Weighted co-occurrence edges over both inputs
    Cooccurrence {
        #[command(flatten)]
        inputs: StudyInputs,

        /// Name of a configured co-occurrence profile
        #[arg(long, default_value = "gene")]
        profile: String,
    },

    /// PMIDs grouped by disease keyword
    Keywords {
        /// Record dump to group (MEDLINE or `---` delimited)
        #[arg(long, alias = "mir_214_file")]
        mir_214_file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct StudyInputs {
    /// Path to the genetic mechanisms studies file
    #[arg(long, alias = "genetic_mechanisms_file")]
    genetic_mechanisms_file: Option<PathBuf>,

    /// Path to the file of all endometriosis studies
    #[arg(long, alias = "all_endometriosis_file")]
    all_endometriosis_file: Option<PathBuf>,

    /// Path to the IPF genetic mechanisms studies file
    #[arg(long, alias = "genetic_mechanisms_ipf_file")]
    genetic_mechanisms_ipf_file: Option<PathBuf>,

    /// Path to the file of all IPF studies
    #[arg(long, alias = "all_ipf_file")]
    all_ipf_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Study {
    Endometriosis,
    Ipf,
    All,
}

impl StudyInputs {
    /// Named input series of `study`, flags first, then the configured inputs.
    fn resolve(&self, inputs: &InputsConfig, study: Study) -> Result<Vec<(&'static str, PathBuf)>> {
        let genetic_endometriosis = || {
            require(
                self.genetic_mechanisms_file.as_ref().or(inputs.genetic_mechanisms_file.as_ref()),
                "--genetic-mechanisms-file",
            )
        };
        let all_endometriosis = || {
            require(
                self.all_endometriosis_file.as_ref().or(inputs.all_endometriosis_file.as_ref()),
                "--all-endometriosis-file",
            )
        };
        let genetic_ipf = || {
            require(
                self.genetic_mechanisms_ipf_file.as_ref().or(inputs.genetic_mechanisms_ipf_file.as_ref()),
                "--genetic-mechanisms-ipf-file",
            )
        };
        let all_ipf = || require(self.all_ipf_file.as_ref().or(inputs.all_ipf_file.as_ref()), "--all-ipf-file");

        Ok(match study {
            Study::Endometriosis => vec![
                ("genetic_mechanisms", genetic_endometriosis()?),
                ("all_studies", all_endometriosis()?),
            ],
            Study::Ipf => vec![("genetic_mechanisms", genetic_ipf()?), ("all_studies", all_ipf()?)],
            Study::All => vec![
                ("genetic_mechanisms_endometriosis", genetic_endometriosis()?),
                ("all_endometriosis", all_endometriosis()?),
                ("genetic_mechanisms_ipf", genetic_ipf()?),
                ("all_ipf", all_ipf()?),
            ],
        })
    }
}

fn require(path: Option<&PathBuf>, flag: &str) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.clone()),
        None => bail!("no input file: pass {flag} or set it in the [inputs] config section"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "medtrend=debug" } else { "medtrend=info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path).with_context(|| format!("loading config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            AnalysisConfig::load(DEFAULT_CONFIG).with_context(|| format!("loading config {DEFAULT_CONFIG}"))
        }
        None => {
            debug!("no config file, using defaults");
            Ok(AnalysisConfig::default())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut sink = CsvSink::new(open_output(cli.output.as_deref())?);

    match cli.command {
        Commands::Years {
            inputs,
            study,
            labels,
        } => {
            let series = inputs.resolve(&config.inputs, study)?;
            let ceiling = config.years.ceiling_year;
            let counts = series
                .iter()
                .map(|(_, path)| {
                    count_by_year(publication_years(&publication_details(&load_records(path)?)), ceiling)
                        .with_context(|| format!("counting years of {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            let aligned = align_years(&counts);
            let names = series.iter().map(|(name, _)| *name);

            if labels {
                let labelled = aligned
                    .iter()
                    .map(|table| cumulative_labels(table, config.years.label_interval, config.years.final_year))
                    .collect::<Result<Vec<_>, _>>()?;
                let named: Vec<(&str, &[CumulativeLabel])> = names.zip(labelled.iter().map(Vec::as_slice)).collect();
                sink.write_labels(&named)?;
            } else {
                let named: Vec<(&str, &YearCountTable)> = names.zip(&aligned).collect();
                sink.write_year_series(&named)?;
            }
        }
        Commands::Funding { inputs, trend } => {
            let records = load_both(&inputs, &config)?;
            let facts = funding_facts(&records, &config.funding.table());
            info!(facts = facts.len(), "extracted grant references");
            let pivot = pivot_by_year_and_category(&facts)?;
            if trend {
                sink.write_trends(&trend_by_year(&pivot))?;
            } else {
                sink.write_pivot(&pivot)?;
            }
        }
        Commands::Cooccurrence { inputs, profile } => {
            let profile = config
                .profile(&profile)
                .with_context(|| format!("no co-occurrence profile named '{profile}'"))?;
            let records = load_both(&inputs, &config)?;
            let matcher = profile.matcher();
            let pairs = cooccurrence_edges(&records, profile.source, |t| matcher.matches(t));
            let edges = edge_weights(&pairs);
            info!(profile = %profile.name, pairs = pairs.len(), edges = edges.len(), "built co-occurrence graph");
            sink.write_edges(&edges)?;
        }
        Commands::Keywords { mir_214_file } => {
            let path = require(mir_214_file.as_ref().or(config.inputs.mir_214_file.as_ref()), "--mir-214-file")?;
            let records = medtrend::load_detected(&path)?;
            sink.write_keyword_groups(&group_by_keyword(&records, &config.keywords.diseases))?;
        }
    }

    sink.flush()?;
    Ok(())
}

fn load_both(inputs: &StudyInputs, config: &AnalysisConfig) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (_, path) in inputs.resolve(&config.inputs, Study::Endometriosis)? {
        records.extend(load_records(&path)?);
    }
    Ok(records)
}

/// Load a MEDLINE file, rendering parse errors against the text that was read.
fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = medtrend::read_source(path)?;
    match medtrend::parse_source(path, &text, &MedlineParser::new()) {
        Ok(records) => Ok(records),
        #[cfg(feature = "diagnostics")]
        Err(medtrend::MedtrendError::Parse { source, .. }) => {
            bail!("{}", source.to_diagnostic(&path.display().to_string(), &text))
        }
        Err(err) => Err(err.into()),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}
