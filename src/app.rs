use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExplorerApp {
    pub state: AppState,
    charts: Option<plot::ChartTextures>,
}

impl ExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            charts: None,
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Image charts follow the latest summary.
        if self.state.charts_dirty || self.charts.is_none() {
            self.charts = Some(plot::ChartTextures::build(ctx, &self.state.summary));
            self.state.charts_dirty = false;
        }

        // ---- Central panel: metrics, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(charts) = &self.charts {
                plot::central_panel(ui, &mut self.state, charts);
            }
        });
    }
}
