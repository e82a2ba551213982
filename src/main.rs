mod app;
mod state;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::ExplorerApp;
use cord19_explorer::config::Settings;
use state::AppState;

/// Interactive, filterable view of the metadata sample.
#[derive(Parser)]
#[command(name = "cord19-explorer", version)]
struct Cli {
    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sample file to explore; must already exist.
    #[arg(long)]
    sample: Option<PathBuf>,
}

fn open_state(cli: Cli) -> Result<AppState> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(sample) = cli.sample {
        settings.paths.sample = sample;
    }
    AppState::open(&settings)
}

fn main() -> ExitCode {
    env_logger::init();

    let state = match open_state(Cli::parse()) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start explorer: {e:#}");
            eprintln!("{e:#}\nRun cord19-report first to create the sample file.");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Exploring {} records", state.records.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "CORD-19 Metadata Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(state)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Explorer exited with an error: {e}");
            ExitCode::FAILURE
        }
    }
}
