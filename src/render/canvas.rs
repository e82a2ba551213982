use image::{Rgb, RgbImage};

use super::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([30, 30, 30]);
pub const GRID: Rgb<u8> = Rgb([220, 220, 220]);

/// An RGB image with clipped drawing primitives.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            img: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, color);
            }
        }
    }

    /// Bresenham line, `thickness` pixels wide.
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), thickness: i64, color: Rgb<u8>) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness / 2;
        loop {
            self.fill_rect(x0 - half, y0 - half, thickness.max(1), thickness.max(1), color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Width in pixels of `text` drawn at `scale`.
    pub fn text_width(text: &str, scale: u32) -> i64 {
        let n = text.chars().count() as i64;
        if n == 0 {
            return 0;
        }
        n * (GLYPH_WIDTH as i64 + 1) * scale as i64 - scale as i64
    }

    pub fn text_height(scale: u32) -> i64 {
        (GLYPH_HEIGHT * scale) as i64
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let s = scale.max(1) as i64;
        let advance = (GLYPH_WIDTH as i64 + 1) * s;
        for (i, c) in text.chars().enumerate() {
            let gx = x + i as i64 * advance;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(gx + col as i64 * s, y + row as i64 * s, s, s, color);
                    }
                }
            }
        }
    }

    /// Draw `text` horizontally centred on `cx`.
    pub fn text_centered(&mut self, cx: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let x = cx - Self::text_width(text, scale) / 2;
        self.text(x, y, text, scale, color);
    }
}

/// Shorten `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(2);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("..");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_outside_the_canvas_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(-5, -5, 8, 8, BLACK);
        canvas.line((-20, 5), (30, 5), 1, BLACK);
        let img = canvas.into_image();
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(9, 5), BLACK);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
    }

    #[test]
    fn text_width_accounts_for_spacing() {
        assert_eq!(Canvas::text_width("", 2), 0);
        assert_eq!(Canvas::text_width("A", 1), 5);
        assert_eq!(Canvas::text_width("AB", 2), 22);
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("a very long journal name", 8), "a very..");
    }
}
