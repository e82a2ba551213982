//! Sampling, cleaning, aggregation and filtering of CORD-19 style paper
//! metadata, shared by the batch report and the interactive explorer.

pub mod cache;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;

pub use error::{PipelineError, Result};
