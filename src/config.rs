//! Analysis configuration, loaded from TOML.
//!
//! Every section is optional; a missing section or key takes the compiled
//! default. A minimal file only names the input files:
//!
//! ```toml
//! [inputs]
//! genetic_mechanisms_file = "data/genetic_mechanisms.txt"
//! all_endometriosis_file = "data/all_endometriosis_studies.txt"
//!
//! [funding]
//! funders = { ERC = "Government" }
//!
//! [[cooccurrence]]
//! name = "gene"
//! source = "mesh"
//! match = "prefix"
//! term = "gene"
//! ```

use crate::aggregate::{DEFAULT_CEILING_YEAR, DEFAULT_FINAL_YEAR, DEFAULT_LABEL_INTERVAL, YEAR_RANGE};
use crate::cooccurrence::{TermMatcher, TermSource};
use crate::error::{ConfigError, fields};
use crate::funding::{FunderTable, FundingCategory};
use crate::keywords::DEFAULT_DISEASE_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Top-level configuration of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub inputs: InputsConfig,
    pub years: YearsConfig,
    pub funding: FundingConfig,
    /// Named co-occurrence profiles, `[[cooccurrence]]` in TOML.
    pub cooccurrence: Vec<CooccurrenceProfile>,
    pub keywords: KeywordsConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            inputs: InputsConfig::default(),
            years: YearsConfig::default(),
            funding: FundingConfig::default(),
            cooccurrence: vec![
                CooccurrenceProfile {
                    name: "gene".to_string(),
                    source: TermSource::Mesh,
                    matching: MatchKind::Prefix,
                    term: "gene".to_string(),
                },
                CooccurrenceProfile {
                    name: "mir-214".to_string(),
                    source: TermSource::Registry,
                    matching: MatchKind::Contains,
                    term: "mir-214".to_string(),
                },
            ],
            keywords: KeywordsConfig::default(),
        }
    }
}

/// Input files of the analyses. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub genetic_mechanisms_file: Option<PathBuf>,
    pub all_endometriosis_file: Option<PathBuf>,
    pub genetic_mechanisms_ipf_file: Option<PathBuf>,
    pub all_ipf_file: Option<PathBuf>,
    pub mir_214_file: Option<PathBuf>,
}

/// Year filtering and chart labelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearsConfig {
    /// Latest year counted. Default: 2023.
    pub ceiling_year: i32,
    /// Years between cumulative labels. Default: 20.
    pub label_interval: u32,
    /// Last labelled year. Default: 2023.
    pub final_year: i32,
}

impl Default for YearsConfig {
    fn default() -> Self {
        Self {
            ceiling_year: DEFAULT_CEILING_YEAR,
            label_interval: DEFAULT_LABEL_INTERVAL,
            final_year: DEFAULT_FINAL_YEAR,
        }
    }
}

/// Funder table adjustments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingConfig {
    /// Additional or overriding funder mappings.
    pub funders: BTreeMap<String, FundingCategory>,
    /// Start from an empty table instead of the default one.
    pub replace_defaults: bool,
}

impl FundingConfig {
    /// The funder table described by this section.
    pub fn table(&self) -> FunderTable {
        let mut table = if self.replace_defaults {
            FunderTable::empty()
        } else {
            FunderTable::default()
        };
        table.extend(self.funders.iter().map(|(k, v)| (k.as_str(), *v)));
        table
    }
}

/// How a profile's term is compared with record terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Prefix,
    Contains,
}

/// One named co-occurrence analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceProfile {
    pub name: String,
    #[serde(default)]
    pub source: TermSource,
    #[serde(rename = "match")]
    pub matching: MatchKind,
    pub term: String,
}

impl CooccurrenceProfile {
    pub fn matcher(&self) -> TermMatcher {
        match self.matching {
            MatchKind::Prefix => TermMatcher::prefix(&self.term),
            MatchKind::Contains => TermMatcher::contains(&self.term),
        }
    }
}

/// Keyword grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    /// Disease keywords, in priority order.
    pub diseases: Vec<String>,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            diseases: DEFAULT_DISEASE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text, &path.display().to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(toml_str, "<string>")?;
        config.validate()?;
        Ok(config)
    }

    fn parse(toml_str: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Check the values deserialization cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.label_interval == 0 {
            return Err(ConfigError::Validation {
                field: fields::LABEL_INTERVAL,
                message: "must be greater than zero".to_string(),
            });
        }
        for (field, year) in [
            (fields::CEILING_YEAR, self.years.ceiling_year),
            (fields::FINAL_YEAR, self.years.final_year),
        ] {
            if !YEAR_RANGE.contains(&year) {
                return Err(ConfigError::Validation {
                    field,
                    message: format!(
                        "{year} is outside {}..={}",
                        YEAR_RANGE.start(),
                        YEAR_RANGE.end()
                    ),
                });
            }
        }

        let mut names = HashSet::new();
        for profile in &self.cooccurrence {
            if !names.insert(profile.name.as_str()) {
                return Err(ConfigError::Validation {
                    field: fields::COOCCURRENCE,
                    message: format!("duplicate profile name '{}'", profile.name),
                });
            }
            if profile.term.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: fields::COOCCURRENCE,
                    message: format!("profile '{}' has an empty term", profile.name),
                });
            }
        }

        if self.keywords.diseases.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation {
                field: fields::KEYWORDS,
                message: "keywords must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// The co-occurrence profile called `name`.
    pub fn profile(&self, name: &str) -> Option<&CooccurrenceProfile> {
        self.cooccurrence.iter().find(|p| p.name == name)
    }
}
