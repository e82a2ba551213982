//! Grouped summaries over any sequence of canonical records.
//!
//! Every function takes an iterator of `&CanonicalRecord`, so the same code
//! runs over a whole [`RecordSet`](super::model::RecordSet) or a
//! [`FilteredView`](super::filter::FilteredView). Nulls are skipped and ties
//! keep first-seen order.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::model::CanonicalRecord;

/// Default minimum token length for title word counts.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// Publications per year, ascending by year.
pub fn counts_by_year<'a, I>(records: I) -> BTreeMap<i32, usize>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let mut counts = BTreeMap::new();
    for year in records.into_iter().filter_map(|r| r.year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// The `n` most frequent journals.
pub fn top_journals<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    top_values(records.into_iter().filter_map(|r| r.journal.as_deref()), n)
}

/// The `n` most frequent sources.
pub fn top_sources<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    top_values(records.into_iter().filter_map(|r| r.source.as_deref()), n)
}

/// The `top_k` most frequent lower-cased title words with at least
/// `min_length` characters.
pub fn word_frequencies<'a, I>(records: I, min_length: usize, top_k: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let lowered: Vec<String> = records.into_iter().map(|r| r.title.to_lowercase()).collect();
    let words = lowered
        .iter()
        .flat_map(|t| t.split_whitespace())
        .filter(|w| w.chars().count() >= min_length);
    top_values(words, top_k)
}

/// Number of distinct non-null journals.
pub fn unique_journals<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    records
        .into_iter()
        .filter_map(|r| r.journal.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// Distribution of `abstract_word_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCountStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
}

/// Abstract length statistics, `None` for empty input.
pub fn abstract_length_stats<'a, I>(records: I) -> Option<WordCountStats>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
{
    let mut counts: Vec<usize> = records.into_iter().map(|r| r.abstract_word_count).collect();
    if counts.is_empty() {
        return None;
    }
    counts.sort_unstable();
    let n = counts.len();
    let mean = counts.iter().sum::<usize>() as f64 / n as f64;
    let median = if n % 2 == 1 {
        counts[n / 2] as f64
    } else {
        (counts[n / 2 - 1] + counts[n / 2]) as f64 / 2.0
    };
    Some(WordCountStats {
        count: n,
        min: counts[0],
        max: counts[n - 1],
        mean,
        median,
    })
}

/// Count values, then sort by descending count. The sort is stable over
/// first-seen order, which is what breaks ties.
fn top_values<'v, I>(values: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'v str>,
{
    let mut position: HashMap<&'v str, usize> = HashMap::new();
    let mut counted: Vec<(&'v str, usize)> = Vec::new();
    for value in values {
        match position.get(value) {
            Some(&i) => counted[i].1 += 1,
            None => {
                position.insert(value, counted.len());
                counted.push((value, 1));
            }
        }
    }
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted
        .into_iter()
        .take(n)
        .map(|(v, c)| (v.to_string(), c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::word_count;

    fn paper(title: &str, journal: Option<&str>, source: Option<&str>, year: Option<i32>) -> CanonicalRecord {
        CanonicalRecord {
            title: title.to_string(),
            abstract_text: "a b c".to_string(),
            abstract_word_count: word_count("a b c"),
            publish_time: None,
            year,
            journal: journal.map(str::to_string),
            source: source.map(str::to_string),
            authors: None,
        }
    }

    fn journals(names: &[&str]) -> Vec<CanonicalRecord> {
        names.iter().map(|j| paper("t", Some(j), None, None)).collect()
    }

    #[test]
    fn top_journals_orders_by_count() {
        let records = journals(&["A", "B", "A", "C", "B", "A"]);
        assert_eq!(
            top_journals(&records, 3),
            vec![("A".to_string(), 3), ("B".to_string(), 2), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn ties_keep_first_seen_order_and_truncate() {
        let records = journals(&["Z", "Y", "X", "Y", "Z", "X", "W"]);
        assert_eq!(
            top_journals(&records, 2),
            vec![("Z".to_string(), 2), ("Y".to_string(), 2)]
        );
    }

    #[test]
    fn years_ascend_and_skip_nulls() {
        let records = vec![
            paper("t", None, None, Some(2021)),
            paper("t", None, None, None),
            paper("t", None, None, Some(2019)),
            paper("t", None, None, Some(2021)),
        ];
        let counts: Vec<(i32, usize)> = counts_by_year(&records).into_iter().collect();
        assert_eq!(counts, vec![(2019, 1), (2021, 2)]);
    }

    #[test]
    fn sources_skip_nulls() {
        let records = vec![
            paper("t", None, Some("PMC"), None),
            paper("t", None, None, None),
            paper("t", None, Some("WHO"), None),
            paper("t", None, Some("PMC"), None),
        ];
        assert_eq!(
            top_sources(&records, 10),
            vec![("PMC".to_string(), 2), ("WHO".to_string(), 1)]
        );
    }

    #[test]
    fn word_frequencies_lowercase_and_drop_short_words() {
        let records = vec![
            paper("Viral Spread in Cities", None, None, None),
            paper("viral LOAD and the city", None, None, None),
        ];
        assert_eq!(
            word_frequencies(&records, DEFAULT_MIN_WORD_LENGTH, 10),
            vec![
                ("viral".to_string(), 2),
                ("spread".to_string(), 1),
                ("cities".to_string(), 1),
                ("load".to_string(), 1),
                ("city".to_string(), 1),
            ]
        );
    }

    #[test]
    fn unique_journals_ignores_nulls() {
        let mut records = journals(&["A", "B", "A"]);
        records.push(paper("t", None, None, None));
        assert_eq!(unique_journals(&records), 2);
    }

    #[test]
    fn abstract_stats_use_the_middle_pair_for_even_counts() {
        let mut records = journals(&["A", "B"]);
        records[0].abstract_word_count = 2;
        records[1].abstract_word_count = 5;
        let stats = abstract_length_stats(&records).unwrap();
        assert_eq!((stats.min, stats.max, stats.count), (2, 5, 2));
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.mean, 3.5);
    }

    #[test]
    fn empty_input_gives_empty_results() {
        let records: Vec<CanonicalRecord> = Vec::new();
        assert!(counts_by_year(&records).is_empty());
        assert!(top_journals(&records, 5).is_empty());
        assert!(top_sources(&records, 5).is_empty());
        assert!(word_frequencies(&records, 4, 5).is_empty());
        assert_eq!(unique_journals(&records), 0);
        assert_eq!(abstract_length_stats(&records), None);
    }
}
