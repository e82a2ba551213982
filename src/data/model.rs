use chrono::NaiveDateTime;
use serde::Serialize;

/// Substituted for a missing title.
pub const NO_TITLE: &str = "No title available";
/// Substituted for a missing abstract.
pub const NO_ABSTRACT: &str = "No abstract available";

// ---------------------------------------------------------------------------
// RawTable – the sample file as read, before cleaning
// ---------------------------------------------------------------------------

/// Cell texts read as missing, besides the empty string. These are the
/// markers spreadsheet and dataframe exports write for absent values.
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True if `cell` stands for a missing value. Matching is exact.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

/// One row of the source dataset. Cells line up with [`RawTable::headers`];
/// an empty or NA-marker cell is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub cells: Vec<Option<String>>,
}

impl RawRecord {
    /// Build a record from cell text; see [`is_missing`].
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = cells
            .into_iter()
            .map(Into::into)
            .map(|s: String| if is_missing(&s) { None } else { Some(s) })
            .collect();
        RawRecord { cells }
    }

    /// Cell at `idx`; ragged rows read as missing past their end.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).and_then(|c| c.as_deref())
    }
}

/// Header plus rows of loosely-typed text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<RawRecord>) -> Self {
        RawTable { headers, rows }
    }

    /// Index of the column called `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Missing-cell count per column, most-missing first. Ties keep header
    /// order.
    pub fn missing_profile(&self) -> Vec<(String, usize)> {
        let mut profile: Vec<(String, usize)> = self
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let missing = self.rows.iter().filter(|r| r.get(idx).is_none()).count();
                (name.clone(), missing)
            })
            .collect();
        profile.sort_by(|a, b| b.1.cmp(&a.1));
        profile
    }
}

// ---------------------------------------------------------------------------
// CanonicalRecord – one cleaned paper
// ---------------------------------------------------------------------------

/// A cleaned document-metadata entry.
///
/// `title`, `abstract_text` and `abstract_word_count` are always present;
/// `year` is `Some` exactly when `publish_time` is.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub title: String,
    pub abstract_text: String,
    pub abstract_word_count: usize,
    pub publish_time: Option<NaiveDateTime>,
    pub year: Option<i32>,
    pub journal: Option<String>,
    pub source: Option<String>,
    pub authors: Option<String>,
}

/// Whitespace token count; the sentinel abstract counts as three words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// CleaningReport – how much of the input degraded
// ---------------------------------------------------------------------------

/// Per-field degradation counts gathered while cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows: usize,
    pub missing_titles: usize,
    pub missing_abstracts: usize,
    /// `publish_time` cell was empty.
    pub missing_dates: usize,
    /// `publish_time` cell had text the date parser rejected.
    pub unparsable_dates: usize,
    /// Sparse columns present in the input and dropped.
    pub dropped_columns: Vec<String>,
}

impl CleaningReport {
    /// Rows where at least the date degraded to null.
    pub fn null_years(&self) -> usize {
        self.missing_dates + self.unparsable_dates
    }
}

// ---------------------------------------------------------------------------
// RecordSet – the immutable cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned records in input order, built once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<CanonicalRecord>,
    report: CleaningReport,
}

impl RecordSet {
    pub fn new(records: Vec<CanonicalRecord>, report: CleaningReport) -> Self {
        RecordSet { records, report }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest non-null year.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
