//! PNG charts for the four summaries.
//!
//! Drawing functions return in-memory images so the explorer can show them
//! as textures; [`PngRenderer`] writes the same images to disk for the batch
//! report. Every chart draws a "NO DATA" placeholder for an empty series.

mod canvas;
mod glyphs;

use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::color::{generate_palette, ColorMap};
use crate::error::Result;

pub use canvas::{truncate_label, Canvas};
use canvas::{BLACK, GRID, WHITE};

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;

/// Something that turns prepared series into image files.
pub trait Renderer {
    fn year_trend(&mut self, counts: &BTreeMap<i32, usize>, out: &Path) -> Result<()>;
    fn journal_bars(&mut self, journals: &[(String, usize)], out: &Path) -> Result<()>;
    fn word_cloud(&mut self, words: &[(String, usize)], out: &Path) -> Result<()>;
    fn source_pie(&mut self, sources: &[(String, usize)], out: &Path) -> Result<()>;
}

/// Writes each chart as a PNG file.
#[derive(Debug, Default)]
pub struct PngRenderer;

impl Renderer for PngRenderer {
    fn year_trend(&mut self, counts: &BTreeMap<i32, usize>, out: &Path) -> Result<()> {
        save(draw_year_trend(counts), out)
    }

    fn journal_bars(&mut self, journals: &[(String, usize)], out: &Path) -> Result<()> {
        save(draw_bars("TOP JOURNALS BY PUBLICATION COUNT", journals), out)
    }

    fn word_cloud(&mut self, words: &[(String, usize)], out: &Path) -> Result<()> {
        save(draw_word_cloud(words), out)
    }

    fn source_pie(&mut self, sources: &[(String, usize)], out: &Path) -> Result<()> {
        save(draw_pie("DISTRIBUTION OF PAPERS BY SOURCE", sources), out)
    }
}

fn save(img: RgbImage, out: &Path) -> Result<()> {
    img.save(out)?;
    log::debug!("Wrote {}", out.display());
    Ok(())
}

fn no_data(canvas: &mut Canvas) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    canvas.text_centered(w / 2, h / 2 - 14, "NO DATA", 4, GRID);
}

fn title(canvas: &mut Canvas, text: &str) {
    let cx = canvas.width() as i64 / 2;
    canvas.text_centered(cx, 14, text, TITLE_SCALE, BLACK);
}

// ---------------------------------------------------------------------------
// Line chart: publications per year
// ---------------------------------------------------------------------------

/// Line chart with one marker per year.
pub fn draw_year_trend(counts: &BTreeMap<i32, usize>) -> RgbImage {
    let mut canvas = Canvas::new(800, 500);
    title(&mut canvas, "PUBLICATIONS BY YEAR");
    if counts.is_empty() {
        no_data(&mut canvas);
        return canvas.into_image();
    }

    let (left, right, top, bottom) = (80_i64, 770_i64, 60_i64, 430_i64);
    let max_count = counts.values().copied().max().unwrap_or(1).max(1) as f64;
    let first = *counts.keys().next().unwrap_or(&0);
    let last = *counts.keys().next_back().unwrap_or(&0);
    let span = (last - first).max(0) as f64;

    let x_of = |year: i32| -> i64 {
        if span == 0.0 {
            (left + right) / 2
        } else {
            left + ((year - first) as f64 / span * (right - left) as f64) as i64
        }
    };
    let y_of = |count: usize| -> i64 { bottom - (count as f64 / max_count * (bottom - top) as f64) as i64 };

    for step in 0..=4 {
        let value = (max_count * step as f64 / 4.0).round() as usize;
        let y = y_of(value);
        canvas.line((left, y), (right, y), 1, GRID);
        let label = value.to_string();
        canvas.text(left - 10 - Canvas::text_width(&label, LABEL_SCALE), y - 7, &label, LABEL_SCALE, BLACK);
    }
    canvas.line((left, top), (left, bottom), 2, BLACK);
    canvas.line((left, bottom), (right, bottom), 2, BLACK);

    let label_every = (counts.len() / 10).max(1);
    let line_color = Rgb([31, 119, 180]);
    let mut prev: Option<(i64, i64)> = None;
    for (i, (&year, &count)) in counts.iter().enumerate() {
        let point = (x_of(year), y_of(count));
        if let Some(p) = prev {
            canvas.line(p, point, 3, line_color);
        }
        canvas.fill_rect(point.0 - 4, point.1 - 4, 9, 9, line_color);
        if i % label_every == 0 {
            canvas.text_centered(point.0, bottom + 12, &year.to_string(), LABEL_SCALE, BLACK);
        }
        prev = Some(point);
    }
    canvas.text_centered((left + right) / 2, 470, "YEAR", LABEL_SCALE, BLACK);
    canvas.into_image()
}

// ---------------------------------------------------------------------------
// Horizontal bars: top journals
// ---------------------------------------------------------------------------

/// Horizontal bar chart, largest bar on top.
pub fn draw_bars(chart_title: &str, items: &[(String, usize)]) -> RgbImage {
    let height = (120 + 36 * items.len() as u32).max(300);
    let mut canvas = Canvas::new(1000, height);
    title(&mut canvas, chart_title);
    if items.is_empty() {
        no_data(&mut canvas);
        return canvas.into_image();
    }

    let (left, right, top) = (330_i64, 900_i64, 70_i64);
    let max_count = items.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as f64;
    let colors = ColorMap::new(items.iter().map(|(label, _)| label.as_str()));

    for (i, (label, count)) in items.iter().enumerate() {
        let y = top + i as i64 * 36;
        let short = truncate_label(label, 26);
        canvas.text(left - 12 - Canvas::text_width(&short, LABEL_SCALE), y + 7, &short, LABEL_SCALE, BLACK);
        let len = ((*count as f64 / max_count) * (right - left) as f64).max(1.0) as i64;
        canvas.fill_rect(left, y, len, 28, colors.color_for(label));
        canvas.text(left + len + 8, y + 7, &count.to_string(), LABEL_SCALE, BLACK);
    }
    canvas.line((left, top - 6), (left, top + items.len() as i64 * 36), 2, BLACK);
    canvas.into_image()
}

// ---------------------------------------------------------------------------
// Pie: source distribution
// ---------------------------------------------------------------------------

/// Pie chart starting at twelve o'clock and running counter-clockwise, with
/// a percentage in each wedge and a legend on the right.
pub fn draw_pie(chart_title: &str, items: &[(String, usize)]) -> RgbImage {
    let mut canvas = Canvas::new(900, 700);
    title(&mut canvas, chart_title);
    let total: usize = items.iter().map(|(_, c)| *c).sum();
    if total == 0 {
        no_data(&mut canvas);
        return canvas.into_image();
    }

    let (cx, cy, r) = (320_i64, 380_i64, 260_i64);
    let colors = ColorMap::new(items.iter().map(|(label, _)| label.as_str()));

    let mut bounds = Vec::with_capacity(items.len());
    let mut acc = 0.0;
    for (_, count) in items {
        let start = acc;
        acc += *count as f64 / total as f64 * TAU;
        bounds.push((start, acc));
    }

    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            let (dx, dy) = ((x - cx) as f64, (cy - y) as f64);
            if dx * dx + dy * dy > (r * r) as f64 {
                continue;
            }
            let angle = (dy.atan2(dx) - PI / 2.0).rem_euclid(TAU);
            let wedge = bounds.iter().position(|&(s, e)| angle >= s && angle < e).unwrap_or(items.len() - 1);
            canvas.put(x, y, colors.color_for(&items[wedge].0));
        }
    }

    for ((_, count), (start, end)) in items.iter().zip(&bounds) {
        let share = *count as f64 / total as f64;
        if share >= 0.03 {
            let mid = PI / 2.0 + (start + end) / 2.0;
            let lx = cx + (mid.cos() * r as f64 * 0.65) as i64;
            let ly = cy - (mid.sin() * r as f64 * 0.65) as i64;
            canvas.text_centered(lx, ly - 7, &format!("{:.1}%", share * 100.0), LABEL_SCALE, WHITE);
        }
    }

    for (i, (label, _)) in items.iter().enumerate() {
        let y = 130 + i as i64 * 30;
        canvas.fill_rect(620, y, 18, 18, colors.color_for(label));
        canvas.text(646, y + 2, &truncate_label(label, 20), LABEL_SCALE, BLACK);
    }
    canvas.into_image()
}

// ---------------------------------------------------------------------------
// Word cloud: title words
// ---------------------------------------------------------------------------

/// Words laid out in centred rows, sized by frequency. Words that no longer
/// fit are left out.
pub fn draw_word_cloud(words: &[(String, usize)]) -> RgbImage {
    let (width, height) = (800_i64, 400_i64);
    let mut canvas = Canvas::new(width as u32, height as u32);
    if words.is_empty() {
        no_data(&mut canvas);
        return canvas.into_image();
    }

    let max = words.iter().map(|(_, c)| *c).max().unwrap_or(1);
    let min = words.iter().map(|(_, c)| *c).min().unwrap_or(1);
    let scale_of = |count: usize| -> u32 {
        if max == min {
            3
        } else {
            1 + ((count - min) as f64 / (max - min) as f64 * 4.0).round() as u32
        }
    };

    let margin = 10_i64;
    let gap = 12_i64;
    let mut rows: Vec<Vec<(&str, u32)>> = vec![Vec::new()];
    let mut row_width = 0_i64;
    for (word, count) in words {
        let scale = scale_of(*count);
        let w = Canvas::text_width(word, scale);
        if w > width - 2 * margin {
            continue;
        }
        let needed = if row_width == 0 { w } else { row_width + gap + w };
        if needed > width - 2 * margin {
            rows.push(Vec::new());
            row_width = w;
        } else {
            row_width = needed;
        }
        if let Some(row) = rows.last_mut() {
            row.push((word.as_str(), scale));
        }
    }

    let palette = generate_palette(8);
    let mut y = margin;
    let mut drawn = 0_usize;
    for row in &rows {
        let row_height = row.iter().map(|(_, s)| Canvas::text_height(*s)).max().unwrap_or(0);
        if row.is_empty() || y + row_height > height - margin {
            break;
        }
        let total: i64 = row.iter().map(|(w, s)| Canvas::text_width(w, *s)).sum::<i64>()
            + gap * (row.len() as i64 - 1);
        let mut x = (width - total) / 2;
        for (word, scale) in row {
            let h = Canvas::text_height(*scale);
            canvas.text(x, y + (row_height - h) / 2, word, *scale, palette[drawn % palette.len()]);
            x += Canvas::text_width(word, *scale) + gap;
            drawn += 1;
        }
        y += row_height + gap;
    }
    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    fn has_ink(img: &RgbImage) -> bool {
        img.pixels().any(|p| *p != WHITE)
    }

    #[test]
    fn empty_series_draw_placeholders() {
        let trend = draw_year_trend(&BTreeMap::new());
        let bars = draw_bars("T", &[]);
        let pie = draw_pie("T", &[]);
        let cloud = draw_word_cloud(&[]);
        for img in [&trend, &bars, &pie, &cloud] {
            assert!(has_ink(img));
        }
    }

    #[test]
    fn bar_chart_grows_with_item_count() {
        let few = draw_bars("T", &series(&[("A", 3)]));
        let many = draw_bars(
            "T",
            &series(&(0..20).map(|_| ("J", 1)).collect::<Vec<_>>()),
        );
        assert!(many.height() > few.height());
    }

    #[test]
    fn single_source_fills_the_whole_pie() {
        let img = draw_pie("T", &series(&[("PMC", 10)]));
        let fill = ColorMap::new(["PMC"]).color_for("PMC");
        assert_eq!(*img.get_pixel(320, 380 - 200), fill);
        assert_eq!(*img.get_pixel(320, 380 + 200), fill);
    }

    #[test]
    fn single_year_trend_draws() {
        let counts = BTreeMap::from([(2020, 5)]);
        assert!(has_ink(&draw_year_trend(&counts)));
    }

    #[test]
    fn png_renderer_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = PngRenderer;
        let out = dir.path().join("cloud.png");
        renderer
            .word_cloud(&series(&[("virus", 5), ("covid", 3), ("health", 1)]), &out)
            .unwrap();
        let img = image::open(&out).unwrap();
        assert_eq!((img.width(), img.height()), (800, 400));
    }
}
