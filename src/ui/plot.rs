use eframe::egui::{self, Color32, ColorImage, TextureHandle, TextureOptions, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use image::RgbImage;

use cord19_explorer::color::ColorMap;
use cord19_explorer::data::export::{export_row, EXPORT_COLUMNS};
use cord19_explorer::pipeline::ViewSummary;
use cord19_explorer::render::{draw_pie, draw_word_cloud};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Image charts (drawn by the same code as the batch report)
// ---------------------------------------------------------------------------

/// Word cloud and source pie of the current summary, uploaded as textures.
pub struct ChartTextures {
    word_cloud: TextureHandle,
    sources: TextureHandle,
}

impl ChartTextures {
    pub fn build(ctx: &egui::Context, summary: &ViewSummary) -> Self {
        let cloud = draw_word_cloud(&summary.cloud_words);
        let pie = draw_pie("TOP SOURCES (FILTERED)", &summary.top_sources);
        ChartTextures {
            word_cloud: ctx.load_texture("word_cloud", to_color_image(&cloud), TextureOptions::LINEAR),
            sources: ctx.load_texture("source_pie", to_color_image(&pie), TextureOptions::LINEAR),
        }
    }
}

fn to_color_image(img: &RgbImage) -> ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    ColorImage::from_rgb(size, img.as_raw())
}

fn show_texture(ui: &mut Ui, texture: &TextureHandle, max_width: f32) {
    let sized = egui::load::SizedTexture::from_handle(texture);
    ui.add(egui::Image::from_texture(sized).max_width(max_width));
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Metrics, charts, preview table and export for the current view.
pub fn central_panel(ui: &mut Ui, state: &mut AppState, charts: &ChartTextures) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("CORD-19 Metadata Explorer");
            ui.label("Use the side panel to filter by year and journal. Every chart reflects the current filter.");
            ui.add_space(8.0);

            metrics(ui, state);
            ui.separator();

            ui.heading("Publications by Year");
            year_trend(ui, &state.summary);
            ui.separator();

            ui.heading(format!("Top {} Journals", state.top_n));
            journal_bars(ui, &state.summary);
            ui.separator();

            ui.heading("Word Cloud of Titles");
            show_texture(ui, &charts.word_cloud, 800.0);
            ui.separator();

            ui.heading("Distribution by Source");
            show_texture(ui, &charts.sources, 600.0);
            ui.separator();

            ui.heading("Data Preview");
            preview_table(ui, state);
            ui.add_space(6.0);
            if ui.button("Download filtered data (CSV)").clicked() {
                super::panels::save_file_dialog(state);
            }
        });
}

fn metrics(ui: &mut Ui, state: &AppState) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total records (sample)", state.records.len());
        metric(&mut cols[1], "Records after filter", state.summary.records);
        metric(&mut cols[2], "Unique journals (filtered)", state.summary.unique_journals);
    });
}

fn metric(ui: &mut Ui, label: &str, value: usize) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(egui::RichText::new(value.to_string()).size(28.0).strong());
    });
}

fn year_trend(ui: &mut Ui, summary: &ViewSummary) {
    if summary.by_year.is_empty() {
        ui.label("No valid year values available for plotting.");
        return;
    }
    let points: Vec<[f64; 2]> = summary
        .by_year
        .iter()
        .map(|(&year, &count)| [year as f64, count as f64])
        .collect();

    Plot::new("year_trend")
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of papers")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).name("papers").width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0));
        });
}

fn journal_bars(ui: &mut Ui, summary: &ViewSummary) {
    if summary.top_journals.is_empty() {
        ui.label("No journal information available to display.");
        return;
    }
    let colors = ColorMap::new(summary.top_journals.iter().map(|(j, _)| j.as_str()));
    let n = summary.top_journals.len();

    // Largest on top: bar i sits at y = n - 1 - i.
    let bars: Vec<Bar> = summary
        .top_journals
        .iter()
        .enumerate()
        .map(|(i, (journal, count))| {
            let c = colors.color_for(journal);
            Bar::new((n - 1 - i) as f64, *count as f64)
                .name(journal)
                .width(0.7)
                .fill(Color32::from_rgb(c[0], c[1], c[2]))
        })
        .collect();

    let labels: Vec<String> = summary.top_journals.iter().map(|(j, _)| j.clone()).collect();
    Plot::new("top_journals")
        .height(40.0 + 22.0 * n as f32)
        .x_axis_label("Number of papers")
        .allow_scroll(false)
        .y_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels
                .len()
                .checked_sub(1 + idx as usize)
                .and_then(|i| labels.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn preview_table(ui: &mut Ui, state: &AppState) {
    let rows = state.preview();
    if rows.is_empty() {
        ui.label("No records match the current filter.");
        return;
    }
    ui.push_id("preview_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(320.0)
            .column(Column::initial(360.0).resizable(true))
            .column(Column::initial(200.0).resizable(true))
            .column(Column::initial(160.0).resizable(true))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for name in EXPORT_COLUMNS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let cells = export_row(rows[row.index()]);
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
