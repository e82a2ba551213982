use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// File-level failures of the pipeline.
///
/// Field-level problems (unparsable dates, missing titles) never show up
/// here; they degrade to null or a sentinel and are counted in the
/// [`CleaningReport`](crate::data::model::CleaningReport).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source dataset not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("sample file not found: {}", .0.display())]
    SampleNotFound(PathBuf),

    #[error("failed to write sample {}: {source}", path.display())]
    SampleWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sample lacks a column the pipeline cannot do without.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
