//! Three-stop vertical gradients tinting procedural patterns

use crate::io::configuration::{GRADIENT_HUE_STEP, GRADIENT_LIGHTNESS, GRADIENT_SATURATION};
use crate::math::color::{Rgb, hsl_to_rgb, luma, mix};
use rand::Rng;
use tiny_skia::{
    BlendMode, Color, GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode,
    Transform,
};

/// Stop colors at the top, middle and bottom of a strip
pub type Palette = [Rgb; 3];

/// Vertical gradient with stops at 0, 0.5 and 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    stops: Palette,
}

impl Gradient {
    /// Gradient through caller-supplied colors
    pub const fn from_palette(stops: Palette) -> Self {
        Self { stops }
    }

    /// Gradient derived from one random base hue
    ///
    /// The stops sit at `h`, `h + 120` and `h + 240` degrees so the three
    /// hues are always well separated.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_base_hue(rng.random_range(0.0..360.0))
    }

    /// Gradient whose stops are evenly spaced around the hue wheel from `hue`
    pub fn from_base_hue(hue: f32) -> Self {
        let stop =
            |step: f32| hsl_to_rgb(hue + step * GRADIENT_HUE_STEP, GRADIENT_SATURATION, GRADIENT_LIGHTNESS);
        Self {
            stops: [stop(0.0), stop(1.0), stop(2.0)],
        }
    }

    /// Stop colors
    pub const fn palette(&self) -> Palette {
        self.stops
    }

    /// Color at relative position `t` from top (0) to bottom (1)
    pub fn color_at(&self, t: f32) -> Rgb {
        let [top, middle, bottom] = self.stops;
        if t <= 0.5 {
            mix(top, middle, t * 2.0)
        } else {
            mix(middle, bottom, (t - 0.5) * 2.0)
        }
    }

    /// Whether the background at relative height `t` reads as light
    pub fn is_light_at(&self, t: f32) -> bool {
        luma(self.color_at(t)) > 0.5
    }

    /// Paint the gradient over the whole pixmap with `blend_mode`
    pub fn paint(&self, pixmap: &mut Pixmap, blend_mode: BlendMode) {
        let width = pixmap.width() as f32;
        let height = pixmap.height() as f32;
        let stops = self
            .stops
            .iter()
            .zip([0.0, 0.5, 1.0])
            .map(|(&[r, g, b], position)| GradientStop::new(position, Color::from_rgba8(r, g, b, 255)))
            .collect();

        let Some(shader) = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(0.0, height),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };

        let paint = Paint {
            shader,
            blend_mode,
            anti_alias: false,
            ..Paint::default()
        };
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}
