use std::fs;
use std::path::Path;

use cord19_explorer::data::loader::load_raw;
use cord19_explorer::data::sampler::{sample, DEFAULT_MAX_ROWS};
use cord19_explorer::PipelineError;

fn write_source(path: &Path, rows: usize) {
    let mut body = String::from("cord_uid,sha,title,abstract,publish_time,journal,source_x\n");
    for i in 0..rows {
        body.push_str(&format!(
            "u{i},abc{i},\"Title {i}, part two\",\"Abstract \"\"quoted\"\" {i}\",2020-01-{:02},J{},PMC\n",
            i % 28 + 1,
            i % 3
        ));
    }
    fs::write(path, body).unwrap();
}

#[test]
fn sample_keeps_header_and_first_rows() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metadata.csv");
    let out = dir.path().join("metadata_sample.csv");
    write_source(&source, 50);

    let written = sample(&source, &out, 10).unwrap();
    assert_eq!(written, out);

    let table = load_raw(&out).unwrap();
    assert_eq!(table.len(), 10);
    assert_eq!(
        table.headers,
        vec!["cord_uid", "sha", "title", "abstract", "publish_time", "journal", "source_x"]
    );
    assert_eq!(table.rows[0].get(0), Some("u0"));
    assert_eq!(table.rows[9].get(2), Some("Title 9, part two"));
    assert_eq!(table.rows[9].get(3), Some("Abstract \"quoted\" 9"));
}

#[test]
fn small_source_is_copied_whole() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metadata.csv");
    let out = dir.path().join("metadata_sample.csv");
    write_source(&source, 3);

    sample(&source, &out, DEFAULT_MAX_ROWS).unwrap();
    assert_eq!(load_raw(&out).unwrap().len(), 3);
}

#[test]
fn resampling_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metadata.csv");
    let out = dir.path().join("metadata_sample.csv");
    write_source(&source, 120);

    sample(&source, &out, 100).unwrap();
    let first = fs::read(&out).unwrap();
    sample(&source, &out, 100).unwrap();
    let second = fs::read(&out).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_source_leaves_existing_sample_alone() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("metadata_sample.csv");
    fs::write(&out, "title,abstract\nkeep,me\n").unwrap();

    let err = sample(&dir.path().join("absent.csv"), &out, 10).unwrap_err();
    assert!(matches!(err, PipelineError::SourceNotFound(_)));
    assert_eq!(fs::read_to_string(&out).unwrap(), "title,abstract\nkeep,me\n");
    assert!(!dir.path().join("metadata_sample.csv.tmp").exists());
}

#[test]
fn unwritable_destination_is_a_write_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metadata.csv");
    write_source(&source, 5);

    let out = dir.path().join("no_such_dir").join("metadata_sample.csv");
    let err = sample(&source, &out, 10).unwrap_err();
    assert!(matches!(err, PipelineError::SampleWriteFailed { .. }));
    assert!(!out.exists());
}

#[test]
fn empty_source_is_rejected_and_sample_kept() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("metadata.csv");
    let out = dir.path().join("metadata_sample.csv");
    fs::write(&source, "").unwrap();
    fs::write(&out, "title,abstract\nkeep,me\n").unwrap();

    let err = sample(&source, &out, 10).unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
    assert_eq!(fs::read_to_string(&out).unwrap(), "title,abstract\nkeep,me\n");
    assert!(!dir.path().join("metadata_sample.csv.tmp").exists());
}
