/// Data layer: core types, sampling, loading, cleaning, filtering and
/// aggregation.
///
/// Architecture:
/// ```text
///   metadata.csv (large)
///        │
///        ▼
///   ┌──────────┐
///   │ sampler  │  first N rows → metadata_sample.csv
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse CSV → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ cleaner  │  sentinels, dates, derived fields → RecordSet
///   └──────────┘
///        │
///        ├───────────────┐
///        ▼               ▼
///   ┌──────────┐   ┌───────────┐
///   │  filter  │──▶│ aggregate │  counts, top-N, word frequencies
///   └──────────┘   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export  │  filtered view → CSV
///   └──────────┘
/// ```

pub mod aggregate;
pub mod cleaner;
pub mod dates;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sampler;
