use std::io::Read;
use std::path::Path;

use crate::error::{PipelineError, Result};

use super::model::{RawRecord, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sample file into a [`RawTable`].
///
/// CSV layout: a header row with column names, one paper per row. Any
/// column set is accepted here; the cleaner decides which ones matter.
pub fn load_raw(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(PipelineError::SampleNotFound(path.to_path_buf()));
    }
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let table = read_table(reader)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV from any reader. Used by [`load_raw`] and by tests that keep
/// their fixtures inline.
pub fn read_csv<R: Read>(input: R) -> Result<RawTable> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    read_table(reader)
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

fn read_table<R: Read>(mut reader: csv::Reader<R>) -> Result<RawTable> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawRecord::from_cells(record.iter()));
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_become_missing() {
        let table = read_csv("title,journal\nA,\n,J2\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["title", "journal"]);
        assert_eq!(table.rows[0].get(1), None);
        assert_eq!(table.rows[1].get(0), None);
        assert_eq!(table.rows[1].get(1), Some("J2"));
    }

    #[test]
    fn na_markers_become_missing() {
        let table = read_csv("title,abstract,journal\nNA,N/A,NaN\nNATURE,nan.,None\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0].cells, vec![None, None, None]);
        assert_eq!(table.rows[1].get(0), Some("NATURE"));
        assert_eq!(table.rows[1].get(1), Some("nan."));
        assert_eq!(table.rows[1].get(2), None);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let table = read_csv("title,abstract\n\"A, B\",\"line one\nline two\"\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0].get(0), Some("A, B"));
        assert_eq!(table.rows[0].get(1), Some("line one\nline two"));
    }

    #[test]
    fn short_rows_are_tolerated() {
        let table = read_csv("a,b,c\n1\n1,2,3\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get(2), None);
    }

    #[test]
    fn missing_file_is_sample_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_raw(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::SampleNotFound(_)));
    }
}
