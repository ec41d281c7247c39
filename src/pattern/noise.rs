//! Blocky grayscale noise tinted by a gradient

use crate::io::configuration::{NOISE_CELL_SIZE, NOISE_MAX_INTENSITY};
use crate::pattern::gradient::Gradient;
use rand::Rng;
use tiny_skia::{BlendMode, Paint, Pixmap, Rect, Transform};

/// Fill `pixmap` with 8x8 noise cells and overlay `gradient` on top
///
/// The overlay blend keeps the cell contrast while taking on the gradient hue.
pub fn paint_noise<R: Rng>(pixmap: &mut Pixmap, gradient: &Gradient, rng: &mut R) {
    paint_cells(pixmap, rng);
    gradient.paint(pixmap, BlendMode::Overlay);
}

/// Fill `pixmap` with opaque gray 8x8 cells
///
/// Each cell gets an independent level between black and 70% white.
pub fn paint_cells<R: Rng>(pixmap: &mut Pixmap, rng: &mut R) {
    let width = pixmap.width();
    let height = pixmap.height();
    let cell = NOISE_CELL_SIZE as f32;
    let max_level = max_cell_level();

    let mut paint = Paint {
        anti_alias: false,
        ..Paint::default()
    };

    for top in (0..height).step_by(NOISE_CELL_SIZE as usize) {
        for left in (0..width).step_by(NOISE_CELL_SIZE as usize) {
            let level = rng.random_range(0..=max_level);
            paint.set_color_rgba8(level, level, level, 255);
            if let Some(rect) = Rect::from_xywh(left as f32, top as f32, cell, cell) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }
}

/// Brightest cell level, `floor(0.7 * 255)`
pub fn max_cell_level() -> u8 {
    (NOISE_MAX_INTENSITY * 255.0).floor() as u8
}
