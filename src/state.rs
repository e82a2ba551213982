use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use cord19_explorer::cache::LoadCache;
use cord19_explorer::config::{ExplorerSettings, Settings};
use cord19_explorer::data::aggregate;
use cord19_explorer::data::export::write_view_csv;
use cord19_explorer::data::filter::{apply, FilterSpec};
use cord19_explorer::data::model::{CanonicalRecord, RecordSet};
use cord19_explorer::pipeline::{summarize, SummaryOptions, ViewSummary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub sample_path: PathBuf,
    cache: LoadCache,

    /// Cleaned records, shared with the load cache.
    pub records: Arc<RecordSet>,

    pub settings: ExplorerSettings,
    options: SummaryOptions,

    /// Observed (or fallback) year range; bounds of the year sliders.
    pub year_bounds: (i32, i32),

    /// Current filter selection.
    pub filter: FilterSpec,

    /// How many journals the bar chart shows.
    pub top_n: usize,

    /// Journals offered in the multi-select, most frequent first.
    pub journal_choices: Vec<(String, usize)>,

    /// Indices of records passing the current filter.
    pub visible_indices: Vec<usize>,

    /// Aggregations of the visible records.
    pub summary: ViewSummary,

    /// Set whenever `summary` changed and chart images must be redrawn.
    pub charts_dirty: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the sample named in `settings`. Fails if it does not exist; the
    /// explorer never creates it.
    pub fn open(settings: &Settings) -> Result<Self> {
        let sample_path = settings.paths.sample.clone();
        let mut cache = LoadCache::new();
        let records = cache
            .get_or_load(&sample_path)
            .with_context(|| format!("loading {}", sample_path.display()))?;

        let mut options = SummaryOptions::from(&settings.report);
        options.top_journals = settings.explorer.default_top_n;

        let mut state = AppState {
            sample_path,
            cache,
            records: Arc::clone(&records),
            settings: settings.explorer.clone(),
            options,
            year_bounds: settings.explorer.fallback_years,
            filter: FilterSpec::default_for(&records, settings.explorer.fallback_years),
            top_n: settings.explorer.default_top_n,
            journal_choices: Vec::new(),
            visible_indices: Vec::new(),
            summary: ViewSummary::default(),
            charts_dirty: true,
            status_message: None,
        };
        state.set_records(records);
        Ok(state)
    }

    /// Ingest a (re)loaded record set and reset the filter to cover it.
    pub fn set_records(&mut self, records: Arc<RecordSet>) {
        let fallback = self.settings.fallback_years;
        self.year_bounds = records.year_bounds().unwrap_or(fallback);
        self.filter = FilterSpec::default_for(&records, fallback);
        self.journal_choices = aggregate::top_journals(records.iter(), self.settings.journal_choices);
        self.records = records;
        self.refilter();
    }

    /// Recompute the view and every summary after a control change.
    pub fn refilter(&mut self) {
        let view = apply(&self.records, &self.filter);
        self.options.top_journals = self.top_n;
        self.summary = summarize(&view.records(), &self.options);
        self.visible_indices = view.indices().to_vec();
        self.charts_dirty = true;
    }

    /// Reload through the cache; a no-op unless the file changed on disk.
    ///
    /// A failed reload empties the cache, so the next attempt reads the file
    /// again even if its signature matches the old one. The records already
    /// on screen stay.
    pub fn reload(&mut self) -> Result<()> {
        let records = match self.cache.get_or_load(&self.sample_path) {
            Ok(records) => records,
            Err(e) => {
                self.cache.invalidate();
                return Err(e).with_context(|| format!("reloading {}", self.sample_path.display()));
            }
        };
        if Arc::ptr_eq(&records, &self.records) {
            self.status_message = Some("Sample unchanged.".to_string());
        } else {
            log::info!(
                "Reloaded {} records ({} loads this session)",
                records.len(),
                self.cache.loads()
            );
            self.set_records(records);
            self.status_message = Some("Sample reloaded.".to_string());
        }
        Ok(())
    }

    /// Set the year range, keeping `min <= max` inside the observed bounds.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        let (lo, hi) = self.year_bounds;
        let min = min.clamp(lo, hi);
        let max = max.clamp(min, hi);
        if (min, max) != (self.filter.year_min, self.filter.year_max) {
            self.filter.year_min = min;
            self.filter.year_max = max;
            self.refilter();
        }
    }

    /// Add or remove a journal from the filter.
    pub fn toggle_journal(&mut self, journal: &str) {
        if !self.filter.journals.remove(journal) {
            self.filter.journals.insert(journal.to_string());
        }
        self.refilter();
    }

    /// Drop the journal constraint.
    pub fn clear_journals(&mut self) {
        if !self.filter.journals.is_empty() {
            self.filter.journals.clear();
            self.refilter();
        }
    }

    pub fn set_top_n(&mut self, n: usize) {
        let n = n.clamp(self.settings.min_top_n, self.settings.max_top_n);
        if n != self.top_n {
            self.top_n = n;
            self.refilter();
        }
    }

    /// Visible records, in sample order.
    pub fn visible(&self) -> impl Iterator<Item = &CanonicalRecord> + '_ {
        let records = self.records.records();
        self.visible_indices.iter().map(move |&i| &records[i])
    }

    /// The first `preview_rows` visible records.
    pub fn preview(&self) -> Vec<&CanonicalRecord> {
        self.visible().take(self.settings.preview_rows).collect()
    }

    /// Write the visible records (preview columns only) to `path`.
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let rows = write_view_csv(self.visible(), BufWriter::new(file))?;
        log::info!("Exported {rows} records to {}", path.display());
        Ok(rows)
    }
}
