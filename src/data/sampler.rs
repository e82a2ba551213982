use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Default number of rows kept in the working sample.
pub const DEFAULT_MAX_ROWS: usize = 5000;

/// Copy the header and the first `max_rows` records of `source` to `sample`.
///
/// The source is streamed and reading stops once the bound is reached, so
/// the source may be far larger than memory. Output goes to a sibling temp
/// file that is renamed over `sample` only after everything was written;
/// on failure an existing sample is left as it was.
pub fn sample(source: &Path, sample: &Path, max_rows: usize) -> Result<PathBuf> {
    if max_rows == 0 {
        return Err(PipelineError::Config("max_rows must be positive".into()));
    }
    if !source.is_file() {
        return Err(PipelineError::SourceNotFound(source.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(source)?;
    let headers = reader.byte_headers()?.clone();
    if headers.is_empty() {
        return Err(PipelineError::Schema(format!(
            "{} has no header row",
            source.display()
        )));
    }

    let tmp = temp_path(sample);
    let written = write_sample(&mut reader, &headers, &tmp, max_rows);
    let rows = match written {
        Ok(rows) => rows,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(source) = fs::rename(&tmp, sample) {
        let _ = fs::remove_file(&tmp);
        return Err(PipelineError::SampleWriteFailed {
            path: sample.to_path_buf(),
            source,
        });
    }

    log::info!(
        "Wrote {rows} of at most {max_rows} rows from {} to {}",
        source.display(),
        sample.display()
    );
    Ok(sample.to_path_buf())
}

fn write_sample(
    reader: &mut csv::Reader<fs::File>,
    headers: &csv::ByteRecord,
    tmp: &Path,
    max_rows: usize,
) -> Result<usize> {
    let write_failed = |source: io::Error| PipelineError::SampleWriteFailed {
        path: tmp.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(tmp)
        .map_err(|e| write_failed(e.into()))?;
    writer
        .write_byte_record(headers)
        .map_err(|e| write_failed(e.into()))?;

    let mut rows = 0;
    for record in reader.byte_records().take(max_rows) {
        let record = record?;
        writer
            .write_byte_record(&record)
            .map_err(|e| write_failed(e.into()))?;
        rows += 1;
    }
    writer.flush().map_err(write_failed)?;
    Ok(rows)
}

fn temp_path(sample: &Path) -> PathBuf {
    let mut name = sample
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "sample.csv".into());
    name.push(".tmp");
    sample.with_file_name(name)
}
