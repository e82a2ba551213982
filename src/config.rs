//! Settings shared by the report and explorer binaries.
//!
//! Every field has a default, so an absent or partial TOML file is fine:
//!
//! ```toml
//! [paths]
//! source = "metadata.csv"
//! sample = "metadata_sample.csv"
//!
//! [report]
//! top_journals = 15
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub sampling: SamplingSettings,
    pub report: ReportSettings,
    pub explorer: ExplorerSettings,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// The full export; may be far larger than memory.
    pub source: PathBuf,
    /// The bounded working sample produced by the sampler.
    pub sample: PathBuf,
    /// Where the batch report writes its images and `summary.json`.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    pub max_rows: usize,
}

/// Aggregation sizes used by the batch report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub top_journals: usize,
    pub top_sources: usize,
    pub top_words: usize,
    pub word_cloud_words: usize,
    pub min_word_length: usize,
}

/// Control bounds for the interactive explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// How many of the most frequent journals the multi-select offers.
    pub journal_choices: usize,
    pub default_top_n: usize,
    pub min_top_n: usize,
    pub max_top_n: usize,
    pub preview_rows: usize,
    /// Year range used when no record carries a year.
    pub fallback_years: (i32, i32),
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("metadata.csv"),
            sample: PathBuf::from("metadata_sample.csv"),
            output_dir: PathBuf::from("plots"),
        }
    }
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self { max_rows: 5000 }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_journals: 10,
            top_sources: 10,
            top_words: 20,
            word_cloud_words: 150,
            min_word_length: 4,
        }
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            journal_choices: 50,
            default_top_n: 10,
            min_top_n: 5,
            max_top_n: 25,
            preview_rows: 200,
            fallback_years: (2019, 2022),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let contents = fs::read_to_string(path)?;
                let settings: Settings = toml::from_str(&contents)?;
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.sampling.max_rows == 0 {
            return Err(PipelineError::Config("sampling.max_rows must be positive".into()));
        }
        let explorer = &self.explorer;
        if explorer.min_top_n == 0 || explorer.min_top_n > explorer.max_top_n {
            return Err(PipelineError::Config(format!(
                "explorer top-N bounds {}..={} are invalid",
                explorer.min_top_n, explorer.max_top_n
            )));
        }
        if explorer.fallback_years.0 > explorer.fallback_years.1 {
            return Err(PipelineError::Config(format!(
                "explorer fallback year range {:?} is reversed",
                explorer.fallback_years
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.sampling.max_rows, 5000);
        assert_eq!(settings.report.min_word_length, 4);
        assert_eq!(settings.explorer.journal_choices, 50);
        assert_eq!(settings.explorer.fallback_years, (2019, 2022));
        assert_eq!(settings.paths.sample, PathBuf::from("metadata_sample.csv"));
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampling]\nmax_rows = 250\n\n[report]\ntop_journals = 3").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.sampling.max_rows, 250);
        assert_eq!(settings.report.top_journals, 3);
        assert_eq!(settings.report.top_sources, 10);
        assert_eq!(settings.paths, PathSettings::default());
    }

    #[test]
    fn zero_max_rows_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampling]\nmax_rows = 0").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[sampling\nmax_rows = ").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, PipelineError::Toml(_)));
    }
}
