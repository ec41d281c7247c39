//! Randomly scattered shapes with soft shadows and toroidal wrap
//!
//! Confetti and sprinkles strips are a gradient background covered by a few
//! hundred small shapes. A shape that crosses a strip edge is also drawn
//! translated by the strip width and/or height, so whatever leaves on one
//! side re-enters on the opposite side and the strip tiles without seams.

use crate::io::configuration::{
    CONFETTI_MAX_RADIUS, CONFETTI_MIN_RADIUS, SCATTER_SHAPE_COUNT, SHADOW_LAYERS, SHADOW_OFFSET,
    SHADOW_OPACITY, SPRINKLE_MAX_LENGTH, SPRINKLE_MIN_LENGTH, SPRINKLE_WIDTH,
};
use crate::math::color::{Rgb, hsl_to_rgb};
use crate::pattern::gradient::Gradient;
use rand::Rng;
use std::f32::consts::PI;
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Outline of a scattered shape in strip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Filled circle
    Disc {
        /// Center (x, y)
        center: (f32, f32),
        /// Radius in pixels
        radius: f32,
    },
    /// Line segment with round caps
    Segment {
        /// Start point (x, y)
        from: (f32, f32),
        /// End point (x, y)
        to: (f32, f32),
        /// Stroke width in pixels
        width: f32,
    },
}

/// Axis-aligned extent of a shape as (min_x, min_y, max_x, max_y)
pub type Bounds = (f32, f32, f32, f32);

impl Geometry {
    /// Extent of the shape grown by `margin` on every side
    pub fn bounds(&self, margin: f32) -> Bounds {
        match *self {
            Self::Disc { center, radius } => {
                let r = radius + margin;
                (center.0 - r, center.1 - r, center.0 + r, center.1 + r)
            }
            Self::Segment { from, to, width } => {
                let r = width / 2.0 + margin;
                (
                    from.0.min(to.0) - r,
                    from.1.min(to.1) - r,
                    from.0.max(to.0) + r,
                    from.1.max(to.1) + r,
                )
            }
        }
    }

    /// Vertical center of the shape
    pub fn center_y(&self) -> f32 {
        match *self {
            Self::Disc { center, .. } => center.1,
            Self::Segment { from, to, .. } => f32::midpoint(from.1, to.1),
        }
    }

    fn draw(&self, pixmap: &mut Pixmap, paint: &Paint<'_>, transform: Transform, grow: f32) {
        match *self {
            Self::Disc { center, radius } => {
                if let Some(path) = PathBuilder::from_circle(center.0, center.1, radius + grow) {
                    pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
                }
            }
            Self::Segment { from, to, width } => {
                let mut builder = PathBuilder::new();
                builder.move_to(from.0, from.1);
                builder.line_to(to.0, to.1);
                if let Some(path) = builder.finish() {
                    let stroke = Stroke {
                        width: 2.0f32.mul_add(grow, width),
                        line_cap: LineCap::Round,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, paint, &stroke, transform, None);
                }
            }
        }
    }
}

/// A colored shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterShape {
    /// Outline
    pub geometry: Geometry,
    /// Fill color
    pub color: Rgb,
}

/// Random confetti discs covering a `width` x `height` strip
pub fn random_confetti<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec<ScatterShape> {
    (0..SCATTER_SHAPE_COUNT)
        .map(|_| ScatterShape {
            geometry: Geometry::Disc {
                center: random_point(rng, width, height),
                radius: rng.random_range(CONFETTI_MIN_RADIUS..=CONFETTI_MAX_RADIUS),
            },
            color: random_color(rng),
        })
        .collect()
}

/// Random sprinkle segments covering a `width` x `height` strip
pub fn random_sprinkles<R: Rng>(rng: &mut R, width: f32, height: f32) -> Vec<ScatterShape> {
    (0..SCATTER_SHAPE_COUNT)
        .map(|_| {
            let from = random_point(rng, width, height);
            let length = rng.random_range(SPRINKLE_MIN_LENGTH..=SPRINKLE_MAX_LENGTH);
            let angle = rng.random_range(0.0..PI * 2.0);
            let to = (
                length.mul_add(angle.cos(), from.0),
                length.mul_add(angle.sin(), from.1),
            );
            ScatterShape {
                geometry: Geometry::Segment {
                    from,
                    to,
                    width: SPRINKLE_WIDTH,
                },
                color: random_color(rng),
            }
        })
        .collect()
}

/// Translations at which a shape with `bounds` must be drawn
///
/// Keeps every whole-tile translation `(i * width, j * height)` under which
/// the shape still overlaps the strip. Shapes wider than the strip reach more
/// than one tile away, so the search is not limited to the 3x3 neighborhood.
/// The identity translation comes first.
pub fn wrap_offsets(bounds: Bounds, width: f32, height: f32) -> Vec<(f32, f32)> {
    let (min_x, min_y, max_x, max_y) = bounds;
    let columns = tile_shifts(min_x, max_x, width);
    let rows = tile_shifts(min_y, max_y, height);

    let mut offsets = Vec::with_capacity(columns.len() * rows.len());
    for &dy in &rows {
        for &dx in &columns {
            offsets.push((dx, dy));
        }
    }
    offsets
}

/// Multiples of `extent` that move `min..max` onto `0..extent`, zero first
fn tile_shifts(min: f32, max: f32, extent: f32) -> Vec<f32> {
    if extent <= 0.0 || !(min.is_finite() && max.is_finite()) {
        return vec![0.0];
    }
    let first = (-max / extent).floor() as i64 + 1;
    let last = ((extent - min) / extent).ceil() as i64 - 1;

    let mut shifts = vec![0.0];
    shifts.extend(
        (first..=last)
            .filter(|&k| k != 0)
            .map(|k| k as f32 * extent),
    );
    shifts
}

/// Draw a shape and its soft shadow with toroidal wrap
///
/// The shadow is dark over a light background and light over a dark one.
pub fn draw_wrapped(pixmap: &mut Pixmap, shape: &ScatterShape, background: &Gradient) {
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;
    let offsets = wrap_offsets(shadowed_bounds(&shape.geometry), width, height);
    draw_at(pixmap, shape, background, &offsets);
}

/// Draw a shape and its shadow translated by each of `offsets`
///
/// Every shadow copy is laid down before any fill copy, so where copies of
/// one shape meet, its fill always covers its own shadow.
pub fn draw_at(
    pixmap: &mut Pixmap,
    shape: &ScatterShape,
    background: &Gradient,
    offsets: &[(f32, f32)],
) {
    let height = pixmap.height() as f32;
    let spread = f32::from(SHADOW_LAYERS);

    let shade = if background.is_light_at(shape.geometry.center_y() / height) {
        0
    } else {
        255
    };
    let layer_alpha = (SHADOW_OPACITY / spread * 255.0).round() as u8;
    let mut shadow = Paint::default();
    shadow.set_color_rgba8(shade, shade, shade, layer_alpha);

    let [r, g, b] = shape.color;
    let mut fill = Paint::default();
    fill.set_color_rgba8(r, g, b, 255);

    for &(dx, dy) in offsets {
        let transform = Transform::from_translate(dx + SHADOW_OFFSET.0, dy + SHADOW_OFFSET.1);
        for layer in 0..SHADOW_LAYERS {
            shape
                .geometry
                .draw(pixmap, &shadow, transform, f32::from(SHADOW_LAYERS - layer));
        }
    }
    for &(dx, dy) in offsets {
        shape
            .geometry
            .draw(pixmap, &fill, Transform::from_translate(dx, dy), 0.0);
    }
}

/// Extent of a shape together with its displaced, grown shadow
pub fn shadowed_bounds(geometry: &Geometry) -> Bounds {
    let (min_x, min_y, max_x, max_y) = geometry.bounds(f32::from(SHADOW_LAYERS));
    (
        min_x,
        min_y,
        max_x + SHADOW_OFFSET.0,
        max_y + SHADOW_OFFSET.1,
    )
}

fn random_point<R: Rng>(rng: &mut R, width: f32, height: f32) -> (f32, f32) {
    (
        rng.random_range(0.0..width.max(1.0)),
        rng.random_range(0.0..height.max(1.0)),
    )
}

fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    hsl_to_rgb(
        rng.random_range(0.0..360.0),
        rng.random_range(0.4..=1.0),
        rng.random_range(0.3..=0.8),
    )
}
