use std::io::Write;

use crate::error::Result;

use super::model::CanonicalRecord;

/// Columns of the preview table and of the CSV export.
pub const EXPORT_COLUMNS: [&str; 4] = ["title", "authors", "journal", "year"];

/// Suggested file name for an exported view.
pub const EXPORT_FILE_NAME: &str = "filtered_metadata_sample.csv";

/// The preview/export cells of one record; nulls are empty strings.
pub fn export_row(record: &CanonicalRecord) -> [String; 4] {
    [
        record.title.clone(),
        record.authors.clone().unwrap_or_default(),
        record.journal.clone().unwrap_or_default(),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
    ]
}

/// Write `records` as CSV with the [`EXPORT_COLUMNS`] header.
/// Returns the number of data rows written.
pub fn write_view_csv<'a, I, W>(records: I, out: W) -> Result<usize>
where
    I: IntoIterator<Item = &'a CanonicalRecord>,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(EXPORT_COLUMNS)?;
    let mut rows = 0;
    for record in records {
        writer.write_record(export_row(record))?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::NO_ABSTRACT;

    #[test]
    fn nulls_are_written_as_empty_cells() {
        let record = CanonicalRecord {
            title: "A, study".to_string(),
            abstract_text: NO_ABSTRACT.to_string(),
            abstract_word_count: 3,
            publish_time: None,
            year: None,
            journal: Some("J1".to_string()),
            source: None,
            authors: None,
        };
        let mut out = Vec::new();
        let rows = write_view_csv([&record], &mut out).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "title,authors,journal,year\n\"A, study\",,J1,\n"
        );
    }

    #[test]
    fn empty_view_writes_only_the_header() {
        let mut out = Vec::new();
        let rows = write_view_csv(std::iter::empty(), &mut out).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "title,authors,journal,year\n");
    }
}
