//! Console text and image artifacts of the batch report.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::model::{CleaningReport, RawTable, RecordSet};
use crate::error::Result;
use crate::pipeline::ViewSummary;
use crate::render::{truncate_label, Renderer};

pub const YEAR_TREND_FILE: &str = "publications_by_year.png";
pub const JOURNALS_FILE: &str = "top_journals.png";
pub const WORD_CLOUD_FILE: &str = "wordcloud_titles.png";
pub const SOURCES_FILE: &str = "source_distribution.png";
pub const SUMMARY_FILE: &str = "summary.json";

const PREVIEW_ROWS: usize = 5;
const PREVIEW_WIDTH: usize = 48;

/// Shape, head and missing-value profile of the raw sample.
pub fn describe_raw(table: &RawTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Dataset Preview ---");
    let shown: Vec<usize> = (0..table.headers.len().min(5)).collect();
    let header: Vec<String> = shown
        .iter()
        .map(|&i| truncate_label(&table.headers[i], PREVIEW_WIDTH / 2))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));
    for row in table.rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = shown
            .iter()
            .map(|&i| truncate_label(row.get(i).unwrap_or("NaN"), PREVIEW_WIDTH / 2))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | "));
    }

    let _ = writeln!(out, "\n--- Shape ---");
    let _ = writeln!(out, "Rows: {}, Columns: {}", table.len(), table.headers.len());

    let _ = writeln!(out, "\n--- Missing Values (top 10 columns) ---");
    for (column, missing) in table.missing_profile().into_iter().take(10) {
        let _ = writeln!(out, "{column:<24} {missing}");
    }
    out
}

/// Degradation counts and a preview of the cleaned records.
pub fn describe_cleaned(records: &RecordSet) -> String {
    let report = records.report();
    let mut out = String::new();
    let _ = writeln!(out, "--- Cleaning ---");
    let _ = writeln!(out, "Dropped columns: {}", report.dropped_columns.join(", "));
    let _ = writeln!(out, "Titles filled with placeholder: {}", report.missing_titles);
    let _ = writeln!(out, "Abstracts filled with placeholder: {}", report.missing_abstracts);
    let _ = writeln!(
        out,
        "Records without a year: {} ({} missing, {} unparsable)",
        report.null_years(),
        report.missing_dates,
        report.unparsable_dates
    );

    let _ = writeln!(out, "\n--- Sample after cleaning ---");
    let _ = writeln!(out, "{:<48} {:>6} {:>20}", "title", "year", "abstract_word_count");
    for record in records.iter().take(PREVIEW_ROWS) {
        let year = record.year.map(|y| y.to_string()).unwrap_or_else(|| "NaN".into());
        let _ = writeln!(
            out,
            "{:<48} {:>6} {:>20}",
            truncate_label(&record.title, PREVIEW_WIDTH),
            year,
            record.abstract_word_count
        );
    }
    out
}

/// Every aggregation as console text.
pub fn describe_summary(summary: &ViewSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Publications per Year:");
    if summary.by_year.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (year, count) in &summary.by_year {
        let _ = writeln!(out, "  {year}  {count}");
    }

    list(&mut out, "Top Journals:", &summary.top_journals);
    list(&mut out, "Most Common Words in Titles:", &summary.top_words);
    list(&mut out, "Top Sources:", &summary.top_sources);

    if let Some(stats) = &summary.abstract_lengths {
        let _ = writeln!(
            out,
            "\nAbstract word count: min {}, median {:.1}, mean {:.1}, max {}",
            stats.min, stats.median, stats.mean, stats.max
        );
    }
    out
}

fn list(out: &mut String, heading: &str, items: &[(String, usize)]) {
    let _ = writeln!(out, "\n{heading}");
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (label, count) in items {
        let _ = writeln!(out, "  {count:>6}  {label}");
    }
}

/// Body of `summary.json`: the summary fields plus how much cleaning degraded.
#[derive(Serialize)]
struct SummaryFile<'a> {
    #[serde(flatten)]
    summary: &'a ViewSummary,
    cleaning: &'a CleaningReport,
}

/// Render the four charts and `summary.json` into `dir`, creating it if
/// needed. Returns the written paths.
pub fn write_artifacts<R: Renderer>(
    renderer: &mut R,
    summary: &ViewSummary,
    cleaning: &CleaningReport,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let year_trend = dir.join(YEAR_TREND_FILE);
    renderer.year_trend(&summary.by_year, &year_trend)?;
    let journals = dir.join(JOURNALS_FILE);
    renderer.journal_bars(&summary.top_journals, &journals)?;
    let cloud = dir.join(WORD_CLOUD_FILE);
    renderer.word_cloud(&summary.cloud_words, &cloud)?;
    let sources = dir.join(SOURCES_FILE);
    renderer.source_pie(&summary.top_sources, &sources)?;

    let json = dir.join(SUMMARY_FILE);
    let body = serde_json::to_string_pretty(&SummaryFile { summary, cleaning })
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(&json, body)?;

    Ok(vec![year_trend, journals, cloud, sources, json])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::data::cleaner::clean;
    use crate::data::loader::read_csv;

    /// Records what it was asked to draw instead of drawing it.
    #[derive(Default)]
    struct Recording {
        calls: Vec<(String, usize)>,
    }

    impl Renderer for Recording {
        fn year_trend(&mut self, counts: &BTreeMap<i32, usize>, out: &Path) -> Result<()> {
            self.record(out, counts.len())
        }
        fn journal_bars(&mut self, journals: &[(String, usize)], out: &Path) -> Result<()> {
            self.record(out, journals.len())
        }
        fn word_cloud(&mut self, words: &[(String, usize)], out: &Path) -> Result<()> {
            self.record(out, words.len())
        }
        fn source_pie(&mut self, sources: &[(String, usize)], out: &Path) -> Result<()> {
            self.record(out, sources.len())
        }
    }

    impl Recording {
        fn record(&mut self, out: &Path, len: usize) -> Result<()> {
            let name = out.file_name().unwrap().to_string_lossy().into_owned();
            self.calls.push((name, len));
            Ok(())
        }
    }

    #[test]
    fn artifacts_cover_all_four_charts_and_the_summary() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plots");
        let summary = ViewSummary {
            records: 2,
            by_year: BTreeMap::from([(2020, 2)]),
            top_journals: vec![("J".into(), 2)],
            ..ViewSummary::default()
        };

        let cleaning = CleaningReport {
            rows: 3,
            unparsable_dates: 1,
            dropped_columns: vec!["sha".into()],
            ..CleaningReport::default()
        };

        let mut renderer = Recording::default();
        let written = write_artifacts(&mut renderer, &summary, &cleaning, &out).unwrap();

        assert_eq!(
            renderer.calls,
            vec![
                (YEAR_TREND_FILE.to_string(), 1),
                (JOURNALS_FILE.to_string(), 1),
                (WORD_CLOUD_FILE.to_string(), 0),
                (SOURCES_FILE.to_string(), 0),
            ]
        );
        assert_eq!(written.len(), 5);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(SUMMARY_FILE)).unwrap()).unwrap();
        assert_eq!(json["records"], 2);
        assert_eq!(json["by_year"]["2020"], 2);
        assert_eq!(json["cleaning"]["rows"], 3);
        assert_eq!(json["cleaning"]["unparsable_dates"], 1);
        assert_eq!(json["cleaning"]["dropped_columns"][0], "sha");
    }

    #[test]
    fn descriptions_mention_degradation_and_empty_lists() {
        let csv = "title,abstract,publish_time,journal\n,,not-a-date,J1\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        let raw_text = describe_raw(&table);
        assert!(raw_text.contains("Rows: 1, Columns: 4"));

        let records = clean(&table).unwrap();
        let cleaned = describe_cleaned(&records);
        assert!(cleaned.contains("Records without a year: 1 (0 missing, 1 unparsable)"));

        let summary_text = describe_summary(&ViewSummary::default());
        assert!(summary_text.contains("Top Sources:\n  (none)"));
    }
}
