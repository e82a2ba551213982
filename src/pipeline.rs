//! The one path both entry points go through: load + clean a sample, then
//! summarize whatever view of it is being shown.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::config::ReportSettings;
use crate::data::aggregate::{self, WordCountStats};
use crate::data::cleaner::clean;
use crate::data::loader::load_raw;
use crate::data::model::{CanonicalRecord, RecordSet};
use crate::error::Result;

/// Read a sample file and clean it.
pub fn load_and_clean(path: &Path) -> Result<RecordSet> {
    let raw = load_raw(path)?;
    clean(&raw)
}

/// Sizes of the aggregations in a [`ViewSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub top_journals: usize,
    pub top_sources: usize,
    pub top_words: usize,
    pub cloud_words: usize,
    pub min_word_length: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions::from(&ReportSettings::default())
    }
}

impl From<&ReportSettings> for SummaryOptions {
    fn from(settings: &ReportSettings) -> Self {
        SummaryOptions {
            top_journals: settings.top_journals,
            top_sources: settings.top_sources,
            top_words: settings.top_words,
            cloud_words: settings.word_cloud_words,
            min_word_length: settings.min_word_length,
        }
    }
}

/// Every aggregation shown for one view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewSummary {
    pub records: usize,
    pub unique_journals: usize,
    pub by_year: BTreeMap<i32, usize>,
    pub top_journals: Vec<(String, usize)>,
    pub top_sources: Vec<(String, usize)>,
    pub top_words: Vec<(String, usize)>,
    /// Larger word list feeding the word cloud.
    #[serde(skip)]
    pub cloud_words: Vec<(String, usize)>,
    pub abstract_lengths: Option<WordCountStats>,
}

/// Compute the summary of `records`. An empty input yields an empty summary.
pub fn summarize(records: &[&CanonicalRecord], options: &SummaryOptions) -> ViewSummary {
    let iter = || records.iter().copied();
    let cloud_words = aggregate::word_frequencies(
        iter(),
        options.min_word_length,
        options.cloud_words.max(options.top_words),
    );
    ViewSummary {
        records: records.len(),
        unique_journals: aggregate::unique_journals(iter()),
        by_year: aggregate::counts_by_year(iter()),
        top_journals: aggregate::top_journals(iter(), options.top_journals),
        top_sources: aggregate::top_sources(iter(), options.top_sources),
        top_words: cloud_words.iter().take(options.top_words).cloned().collect(),
        cloud_words,
        abstract_lengths: aggregate::abstract_length_stats(iter()),
    }
}
