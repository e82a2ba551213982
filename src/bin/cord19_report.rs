use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cord19_explorer::config::Settings;
use cord19_explorer::data::{cleaner, loader, sampler};
use cord19_explorer::pipeline::{summarize, SummaryOptions};
use cord19_explorer::render::PngRenderer;
use cord19_explorer::report;
use cord19_explorer::PipelineError;

/// Trim the metadata export to a sample, clean it, print summaries and
/// write the charts.
#[derive(Parser)]
#[command(name = "cord19-report", version)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Full metadata export to sample from.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Sample file to write and analyse.
    #[arg(long)]
    sample: Option<PathBuf>,

    /// Directory for the chart images and summary.json.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Rows to keep in the sample.
    #[arg(long)]
    max_rows: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Report failed: {e:#}");
            eprintln!("⚠ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(source) = cli.source {
        settings.paths.source = source;
    }
    if let Some(sample) = cli.sample {
        settings.paths.sample = sample;
    }
    if let Some(dir) = cli.output_dir {
        settings.paths.output_dir = dir;
    }
    if let Some(max_rows) = cli.max_rows {
        settings.sampling.max_rows = max_rows;
    }
    settings.validate()?;
    let paths = &settings.paths;

    println!("=== CORD-19 Data Exploration ===\n");

    match sampler::sample(&paths.source, &paths.sample, settings.sampling.max_rows) {
        Ok(path) => println!(
            "✓ {} created with the first {} rows.\n",
            path.display(),
            settings.sampling.max_rows
        ),
        Err(PipelineError::SourceNotFound(path)) => {
            println!("⚠ {} not found, skipping trimming.\n", path.display());
        }
        Err(e) => return Err(e).context("creating sample"),
    }

    let raw = loader::load_raw(&paths.sample)
        .with_context(|| format!("loading {}", paths.sample.display()))?;
    println!("✓ Sample dataset loaded.\n");
    println!("{}", report::describe_raw(&raw));

    let records = cleaner::clean(&raw).context("cleaning sample")?;
    println!("{}", report::describe_cleaned(&records));

    let options = SummaryOptions::from(&settings.report);
    let all: Vec<_> = records.iter().collect();
    let summary = summarize(&all, &options);
    println!("{}", report::describe_summary(&summary));

    let written = report::write_artifacts(
        &mut PngRenderer,
        &summary,
        records.report(),
        &paths.output_dir,
    )
    .with_context(|| format!("writing charts to {}", paths.output_dir.display()))?;
    for path in &written {
        log::info!("Wrote {}", path.display());
    }
    println!(
        "\n✓ Analysis complete. Plots saved in '{}'.",
        paths.output_dir.display()
    );
    Ok(())
}
