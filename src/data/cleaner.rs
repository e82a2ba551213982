use chrono::Datelike;

use crate::error::{PipelineError, Result};

use super::dates::parse_publish_time;
use super::model::{
    word_count, CanonicalRecord, CleaningReport, RawTable, RecordSet, NO_ABSTRACT, NO_TITLE,
};

/// Sparse or low-value identifier columns removed during cleaning.
pub const DROPPED_COLUMNS: &[&str] = &[
    "sha",
    "license",
    "pmcid",
    "pubmed_id",
    "arxiv_id",
    "who_covidence_id",
    "has_full_text",
];

/// Provenance column names, in order of preference.
const SOURCE_COLUMNS: &[&str] = &["source_x", "source"];

/// Column positions the cleaner reads, resolved once per table.
struct Columns {
    title: usize,
    abstract_text: usize,
    publish_time: Option<usize>,
    journal: Option<usize>,
    source: Option<usize>,
    authors: Option<usize>,
}

impl Columns {
    fn resolve(table: &RawTable) -> Result<Self> {
        let required = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| PipelineError::Schema(format!("sample has no '{name}' column")))
        };
        Ok(Columns {
            title: required("title")?,
            abstract_text: required("abstract")?,
            publish_time: table.column("publish_time"),
            journal: table.column("journal"),
            source: SOURCE_COLUMNS.iter().find_map(|c| table.column(c)),
            authors: table.column("authors"),
        })
    }
}

/// Turn raw rows into canonical records, one for one and in order.
///
/// Per-field problems never fail: missing text gets a sentinel, unparsable
/// dates become null and are counted in the [`CleaningReport`]. The only
/// error is a table without `title` or `abstract` columns.
pub fn clean(table: &RawTable) -> Result<RecordSet> {
    let cols = Columns::resolve(table)?;

    let mut report = CleaningReport {
        rows: table.len(),
        dropped_columns: DROPPED_COLUMNS
            .iter()
            .filter(|c| table.column(c).is_some())
            .map(|c| c.to_string())
            .collect(),
        ..CleaningReport::default()
    };

    let mut records = Vec::with_capacity(table.len());
    for row in &table.rows {
        let title = match row.get(cols.title) {
            Some(t) => t.to_string(),
            None => {
                report.missing_titles += 1;
                NO_TITLE.to_string()
            }
        };
        let abstract_text = match row.get(cols.abstract_text) {
            Some(a) => a.to_string(),
            None => {
                report.missing_abstracts += 1;
                NO_ABSTRACT.to_string()
            }
        };

        let publish_time = match cols.publish_time.and_then(|i| row.get(i)) {
            Some(raw) => {
                let parsed = parse_publish_time(raw);
                if parsed.is_none() {
                    report.unparsable_dates += 1;
                }
                parsed
            }
            None => {
                report.missing_dates += 1;
                None
            }
        };

        let text = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);

        records.push(CanonicalRecord {
            abstract_word_count: word_count(&abstract_text),
            year: publish_time.map(|t| t.year()),
            title,
            abstract_text,
            publish_time,
            journal: text(cols.journal),
            source: text(cols.source),
            authors: text(cols.authors),
        });
    }

    log_report(&report);
    Ok(RecordSet::new(records, report))
}

fn log_report(report: &CleaningReport) {
    log::info!(
        "Cleaned {} rows: {} missing titles, {} missing abstracts, {} without a year",
        report.rows,
        report.missing_titles,
        report.missing_abstracts,
        report.null_years()
    );
    if !report.dropped_columns.is_empty() {
        log::debug!("Dropped columns: {:?}", report.dropped_columns);
    }
    if report.unparsable_dates > 0 {
        log::warn!(
            "{} of {} publish_time values could not be parsed and were set to null",
            report.unparsable_dates,
            report.rows
        );
    }
}
