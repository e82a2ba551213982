use std::collections::BTreeSet;

use super::model::{CanonicalRecord, RecordSet};

/// Year range used when no record has a year.
pub const FALLBACK_YEARS: (i32, i32) = (2019, 2022);

// ---------------------------------------------------------------------------
// FilterSpec: what the user selected
// ---------------------------------------------------------------------------

/// Inclusive year bounds plus an optional journal whitelist.
/// An empty `journals` set means "any journal".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub year_min: i32,
    pub year_max: i32,
    pub journals: BTreeSet<String>,
}

impl FilterSpec {
    /// Filter covering the whole observed year range with no journal
    /// constraint; `fallback` applies when no record has a year.
    pub fn default_for(records: &RecordSet, fallback: (i32, i32)) -> Self {
        let (year_min, year_max) = records.year_bounds().unwrap_or(fallback);
        FilterSpec {
            year_min,
            year_max,
            journals: BTreeSet::new(),
        }
    }

    /// Whether a single record passes. A record without a year never does.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        let in_range = record
            .year
            .is_some_and(|y| self.year_min <= y && y <= self.year_max);
        if !in_range {
            return false;
        }
        if self.journals.is_empty() {
            return true;
        }
        record
            .journal
            .as_ref()
            .is_some_and(|j| self.journals.contains(j))
    }
}

// ---------------------------------------------------------------------------
// FilteredView: indices of passing records
// ---------------------------------------------------------------------------

/// The records of a [`RecordSet`] that pass a [`FilterSpec`], in set order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    set: &'a RecordSet,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Positions of the passing records within the set.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CanonicalRecord> + Clone + '_ {
        let records = self.set.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// The passing records as a slice of references.
    pub fn records(&self) -> Vec<&'a CanonicalRecord> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the view of `records` passing `spec`.
pub fn apply<'a>(records: &'a RecordSet, spec: &FilterSpec) -> FilteredView<'a> {
    let indices = records
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView {
        set: records,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CleaningReport, NO_ABSTRACT};

    fn record(year: Option<i32>, journal: Option<&str>) -> CanonicalRecord {
        CanonicalRecord {
            title: format!("paper {year:?}"),
            abstract_text: NO_ABSTRACT.to_string(),
            abstract_word_count: 3,
            publish_time: year.and_then(|y| {
                chrono::NaiveDate::from_ymd_opt(y, 6, 1).map(|d| d.and_time(chrono::NaiveTime::MIN))
            }),
            year,
            journal: journal.map(str::to_string),
            source: None,
            authors: None,
        }
    }

    fn set(records: Vec<CanonicalRecord>) -> RecordSet {
        RecordSet::new(records, CleaningReport::default())
    }

    #[test]
    fn default_spec_spans_observed_years() {
        let records = set(vec![record(Some(2018), None), record(None, None), record(Some(2021), None)]);
        let spec = FilterSpec::default_for(&records, FALLBACK_YEARS);
        assert_eq!((spec.year_min, spec.year_max), (2018, 2021));
        assert!(spec.journals.is_empty());
    }

    #[test]
    fn default_spec_falls_back_without_years() {
        let records = set(vec![record(None, Some("J"))]);
        let spec = FilterSpec::default_for(&records, FALLBACK_YEARS);
        assert_eq!((spec.year_min, spec.year_max), FALLBACK_YEARS);
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn journal_set_restricts_and_excludes_null_journals() {
        let records = set(vec![
            record(Some(2020), Some("A")),
            record(Some(2020), None),
            record(Some(2020), Some("B")),
            record(Some(2020), Some("A")),
        ]);
        let spec = FilterSpec {
            year_min: 2000,
            year_max: 2030,
            journals: BTreeSet::from(["A".to_string()]),
        };
        assert_eq!(apply(&records, &spec).indices(), &[0, 3]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = set(vec![record(Some(2019), None), record(Some(2020), None), record(Some(2021), None)]);
        let spec = FilterSpec {
            year_min: 2019,
            year_max: 2020,
            journals: BTreeSet::new(),
        };
        assert_eq!(apply(&records, &spec).indices(), &[0, 1]);
    }

    #[test]
    fn repeated_application_leaves_the_set_untouched() {
        let records = set(vec![record(Some(2020), Some("A")), record(Some(2021), Some("B"))]);
        let before = records.records().to_vec();
        let narrow = FilterSpec {
            year_min: 2021,
            year_max: 2021,
            journals: BTreeSet::new(),
        };
        let wide = FilterSpec::default_for(&records, FALLBACK_YEARS);
        assert_eq!(apply(&records, &narrow).len(), 1);
        assert_eq!(apply(&records, &wide).len(), 2);
        assert_eq!(apply(&records, &narrow).len(), 1);
        assert_eq!(records.records(), before.as_slice());
    }
}
