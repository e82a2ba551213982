use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use cord19_explorer::data::export::EXPORT_FILE_NAME;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Year range ----
    let (lo, hi) = state.year_bounds;
    let mut year_min = state.filter.year_min;
    let mut year_max = state.filter.year_max;
    ui.strong("Year range");
    let min_changed = ui
        .add(egui::Slider::new(&mut year_min, lo..=hi).text("from"))
        .changed();
    let max_changed = ui
        .add(egui::Slider::new(&mut year_max, lo..=hi).text("to"))
        .changed();
    if min_changed || max_changed {
        // Dragging one end past the other drags both.
        if min_changed && year_min > year_max {
            year_max = year_min;
        }
        if max_changed && year_max < year_min {
            year_min = year_max;
        }
        state.set_year_range(year_min, year_max);
    }
    ui.separator();

    // ---- Top N ----
    let mut top_n = state.top_n;
    let bounds = state.settings.min_top_n..=state.settings.max_top_n;
    if ui
        .add(egui::Slider::new(&mut top_n, bounds).text("top journals"))
        .changed()
    {
        state.set_top_n(top_n);
    }
    ui.separator();

    // ---- Journal multi-select ----
    let n_selected = state.filter.journals.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!("Journals ({n_selected} selected)"));
        if ui.small_button("Clear").clicked() {
            state.clear_journals();
        }
    });
    if n_selected == 0 {
        ui.label(RichText::new("No journal filter: showing all.").weak());
    }

    let choices = state.journal_choices.clone();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (journal, count) in &choices {
                let mut checked = state.filter.journals.contains(journal);
                let label = format!("{journal}  ({count})");
                if ui.checkbox(&mut checked, label).changed() {
                    state.toggle_journal(journal);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Reload sample").clicked() {
                if let Err(e) = state.reload() {
                    log::error!("Failed to reload: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
                ui.close_menu();
            }
            if ui.button("Export filtered CSV…").clicked() {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} records, {} visible",
            state.sample_path.display(),
            state.records.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_csv(&path) {
            Ok(rows) => {
                state.status_message = Some(format!("Exported {rows} rows to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
