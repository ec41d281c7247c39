//! Bold outlined text stamped into pattern strips
//!
//! The text is drawn twice: anchored at the top-left corner and mirrored to
//! the bottom-right corner. Glyphs are filled light and outlined dark so they
//! read on any background.

use crate::io::configuration::{WATERMARK_MARGIN, WATERMARK_MAX_SCALE};
use crate::io::error::Result;
use crate::raster::grid::{BLACK, PixelGrid, WHITE};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

const GLYPH_SIZE: usize = 8;

/// Rasterized text: `true` for glyph pixels, plus a one pixel outline ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMask {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Outline,
    Fill,
}

impl TextMask {
    /// Rasterize `text` with glyphs magnified by `scale`
    ///
    /// Characters without a glyph advance like a space.
    pub fn render(text: &str, scale: usize) -> Self {
        let scale = scale.max(1);
        let glyphs: Vec<[u8; 8]> = text.chars().map(glyph).collect();
        let width = glyphs.len() * GLYPH_SIZE * scale + 2;
        let height = GLYPH_SIZE * scale + 2;
        let mut cells = vec![Cell::Empty; width * height];

        for (index, rows) in glyphs.iter().enumerate() {
            for (gy, bits) in rows.iter().enumerate() {
                // Bold: each lit column also lights its right neighbor
                let bold = *bits | (*bits << 1);
                for gx in 0..GLYPH_SIZE {
                    if bold & (1 << gx) == 0 {
                        continue;
                    }
                    let left = 1 + (index * GLYPH_SIZE + gx) * scale;
                    let top = 1 + gy * scale;
                    for y in top..top + scale {
                        for x in left..left + scale {
                            if let Some(cell) = cells.get_mut(y * width + x) {
                                *cell = Cell::Fill;
                            }
                        }
                    }
                }
            }
        }

        let filled = cells.clone();
        for y in 0..height {
            for x in 0..width {
                let index = y * width + x;
                if filled.get(index) != Some(&Cell::Empty) {
                    continue;
                }
                let touches_fill = neighbors(x, y, width, height)
                    .any(|(nx, ny)| filled.get(ny * width + nx) == Some(&Cell::Fill));
                if touches_fill {
                    if let Some(cell) = cells.get_mut(index) {
                        *cell = Cell::Outline;
                    }
                }
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Width including the outline ring
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height including the outline ring
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether (x, y) is a glyph pixel
    pub fn is_fill(&self, x: usize, y: usize) -> bool {
        x < self.width && self.cells.get(y * self.width + x) == Some(&Cell::Fill)
    }

    /// Whether (x, y) is an outline pixel
    pub fn is_outline(&self, x: usize, y: usize) -> bool {
        x < self.width && self.cells.get(y * self.width + x) == Some(&Cell::Outline)
    }

    /// Write the glyph and outline pixels with the mask's corner at (left, top)
    ///
    /// Parts falling outside `grid` are clipped.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeAccess` only if clipping is inconsistent with `grid`
    pub fn stamp(&self, grid: &mut PixelGrid, left: usize, top: usize) -> Result<()> {
        let visible_width = self.width.min(grid.width().saturating_sub(left));
        let visible_height = self.height.min(grid.height().saturating_sub(top));
        for y in 0..visible_height {
            for x in 0..visible_width {
                let pixel = match self.cells.get(y * self.width + x) {
                    Some(Cell::Fill) => WHITE,
                    Some(Cell::Outline) => BLACK,
                    _ => continue,
                };
                grid.set(left + x, top + y, pixel)?;
            }
        }
        Ok(())
    }
}

/// Largest glyph magnification at which `text` fits across `strip_width`
pub fn fitting_scale(text: &str, strip_width: usize) -> usize {
    let chars = text.chars().count().max(1);
    let available = strip_width.saturating_sub(2 * WATERMARK_MARGIN + 2);
    (available / (chars * GLYPH_SIZE)).clamp(1, WATERMARK_MAX_SCALE)
}

/// Stamp `text` at the top-left and bottom-right corners of `strip`
///
/// Empty or whitespace-only text leaves the strip untouched. Text wider than
/// the strip is clipped at its edges.
///
/// # Errors
///
/// Propagates pixel access errors from [`TextMask::stamp`]
pub fn apply_watermark(strip: &mut PixelGrid, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    let mask = TextMask::render(text, fitting_scale(text, strip.width()));

    mask.stamp(strip, WATERMARK_MARGIN, WATERMARK_MARGIN)?;

    let right = strip.width().saturating_sub(WATERMARK_MARGIN + mask.width());
    let bottom = strip.height().saturating_sub(WATERMARK_MARGIN + mask.height());
    mask.stamp(strip, right, bottom)
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .unwrap_or([0; 8])
}

fn neighbors(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let xs = x.saturating_sub(1)..=(x + 1).min(width - 1);
    xs.flat_map(move |nx| {
        (y.saturating_sub(1)..=(y + 1).min(height - 1)).map(move |ny| (nx, ny))
    })
    .filter(move |&(nx, ny)| (nx, ny) != (x, y))
}
