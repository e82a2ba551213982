use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::data::model::RecordSet;
use crate::error::{PipelineError, Result};
use crate::pipeline::load_and_clean;

/// Identity of a file's contents as far as the cache is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSignature {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileSignature {
    pub fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PipelineError::SampleNotFound(path.to_path_buf()),
            _ => PipelineError::Io(e),
        })?;
        Ok(FileSignature {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

/// Memoizes the cleaned record set of one sample file.
///
/// A lookup reuses the cached set while the file's path, modification time
/// and length are unchanged, and reloads otherwise.
#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<(FileSignature, Arc<RecordSet>)>,
    loads: usize,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for `path`, loading and cleaning the file when the
    /// signature differs from the cached one.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<RecordSet>> {
        let signature = FileSignature::of(path)?;
        if let Some((cached, records)) = &self.entry {
            if *cached == signature {
                log::debug!("Reusing cached records for {}", path.display());
                return Ok(Arc::clone(records));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let records = Arc::new(load_and_clean(path)?);
        self.loads += 1;
        self.entry = Some((signature, Arc::clone(&records)));
        Ok(records)
    }

    /// Drop the cached set so the next lookup reloads.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// How many times a file was actually loaded.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        write(&path, "title,abstract\nT,A\n");

        let mut cache = LoadCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn changed_length_triggers_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        write(&path, "title,abstract\nT,A\n");

        let mut cache = LoadCache::new();
        let first = cache.get_or_load(&path).unwrap();
        write(&path, "title,abstract\nT,A\nU,B\n");
        let second = cache.get_or_load(&path).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        write(&path, "title,abstract\nT,A\n");

        let mut cache = LoadCache::new();
        cache.get_or_load(&path).unwrap();
        cache.invalidate();
        cache.get_or_load(&path).unwrap();
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn missing_file_is_sample_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = LoadCache::new();
        let err = cache.get_or_load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::SampleNotFound(_)));
    }
}
