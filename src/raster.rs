//! Software rasterizer for the viewer window.
//!
//! Draws into a `0x00RRGGBB` pixel buffer, which is what minifb presents.
//! Everything clips silently at the buffer edge.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::error::Result;
use crate::font::{glyph, text_width, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::frame::LineSegment;

/// Pack an RGB color into minifb's pixel format.
pub fn pack_rgb(color: Rgb<u8>) -> u32 {
    let [r, g, b] = color.0;
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn unpack_rgb(pixel: u32) -> Rgb<u8> {
    Rgb([(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8])
}

/// Axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Rgb<u8>) {
        self.pixels.fill(pack_rgb(color));
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb<u8>> {
        if x < self.width && y < self.height {
            Some(unpack_rgb(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    pub fn put_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Bresenham line between two pixel centers, endpoints inclusive.
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let (w, h) = (self.width as i64, self.height as i64);

        // Both ends off the same side: nothing to draw.
        if (x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h) {
            return;
        }

        let packed = pack_rgb(color);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x0, y0, packed);

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

    /// Draw a wireframe segment, rounding its endpoints to pixels.
    pub fn draw_segment(&mut self, line: &LineSegment) {
        let px = |v: f32| v.round().clamp(-1.0e6, 1.0e6) as i64;
        self.draw_line((px(line.from.x), px(line.from.y)), (px(line.to.x), px(line.to.y)), line.color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb<u8>) {
        let packed = pack_rgb(color);
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let x1 = (rect.x + rect.width).round() as i64;
        let y1 = (rect.y + rect.height).round() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, packed);
            }
        }
    }

    /// Draw `text` with its top-left at `(x, y)`, each font pixel blown up
    /// to a `scale` x `scale` block. Characters without a glyph are skipped
    /// but still advance the cursor.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>, scale: usize) {
        let packed = pack_rgb(color);
        let scale = scale.max(1) as i64;
        let mut cx = x;

        for c in text.chars() {
            if let Some(rows) = glyph(c) {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1 {
                            let px = cx + col as i64 * scale;
                            let py = y + row as i64 * scale;
                            for sy in 0..scale {
                                for sx in 0..scale {
                                    self.put_pixel(px + sx, py + sy, packed);
                                }
                            }
                        }
                    }
                }
            }
            cx += ADVANCE as i64 * scale;
        }
    }

    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            unpack_rgb(self.pixels[y as usize * self.width + x as usize])
        })
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

/// Pixel size of `text` at `scale`.
pub fn text_size(text: &str, scale: usize) -> (usize, usize) {
    (text_width(text) * scale, GLYPH_HEIGHT * scale)
}
