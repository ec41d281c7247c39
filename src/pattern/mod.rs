//! Tileable pattern generation
//!
//! A pattern starts life as a strip exactly one tile wide (`tile_width`, which
//! equals the minimum disparity) and as tall as the output. The strip is either
//! cut from a supplied image or drawn procedurally, optionally watermarked,
//! and finally repeated across the whole output frame.

/// Three-stop vertical gradients
pub mod gradient;
/// Gray noise cells tinted by a gradient
pub mod noise;
/// Scattered confetti and sprinkle shapes with toroidal wrap
pub mod scatter;
/// Strips derived from a supplied image
pub mod source;
/// Watermark text stamping
pub mod watermark;

use crate::io::error::{Result, invalid_dimension};
use crate::raster::grid::PixelGrid;
use gradient::{Gradient, Palette};
use rand::{SeedableRng, rngs::StdRng};
use scatter::{ScatterShape, draw_wrapped, random_confetti, random_sprinkles};
use tiny_skia::{BlendMode, Pixmap};
use tracing::debug;

/// Which kind of pattern to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// Strip cut from a supplied image
    Image(PixelGrid),
    /// Gray 8x8 noise overlaid with a gradient
    Noise,
    /// Gradient background under scattered discs
    Confetti,
    /// Gradient background under scattered round-capped segments
    Sprinkles,
}

impl PatternKind {
    /// Short name used in logs and on the command line
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Noise => "noise",
            Self::Confetti => "confetti",
            Self::Sprinkles => "sprinkles",
        }
    }
}

/// Everything that determines a generated pattern apart from its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    /// Pattern variant
    pub kind: PatternKind,
    /// Gradient stop colors; derived from a random hue when absent
    pub palette: Option<Palette>,
    /// Optional text stamped into the strip
    pub watermark: Option<String>,
    /// Seed for every random choice made while drawing
    pub seed: u64,
}

impl PatternSpec {
    /// Spec for `kind` with a random palette and no watermark
    pub const fn new(kind: PatternKind, seed: u64) -> Self {
        Self {
            kind,
            palette: None,
            watermark: None,
            seed,
        }
    }
}

/// A generated pattern strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    strip: PixelGrid,
}

impl Pattern {
    /// Generate the strip for `spec` at `tile_width` x `height`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for a degenerate strip size and
    /// `UnsupportedPatternSource` if an image source cannot be used
    pub fn generate(spec: &PatternSpec, tile_width: usize, height: usize) -> Result<Self> {
        if tile_width == 0 || height == 0 {
            return Err(invalid_dimension(
                "pattern strip",
                &format!("{tile_width}x{height} has no pixels"),
            ));
        }

        let mut rng = StdRng::seed_from_u64(spec.seed);
        let gradient = spec
            .palette
            .map_or_else(|| Gradient::random(&mut rng), Gradient::from_palette);

        debug!(
            kind = spec.kind.name(),
            tile_width, height, seed = spec.seed, "generating pattern strip"
        );

        let mut strip = match &spec.kind {
            PatternKind::Image(source) => source::image_strip(source, tile_width, height)?,
            PatternKind::Noise => {
                let mut canvas = new_canvas(tile_width, height)?;
                noise::paint_noise(&mut canvas, &gradient, &mut rng);
                canvas_to_grid(&canvas)?
            }
            PatternKind::Confetti => {
                let shapes = random_confetti(&mut rng, tile_width as f32, height as f32);
                scatter_strip(&shapes, &gradient, tile_width, height)?
            }
            PatternKind::Sprinkles => {
                let shapes = random_sprinkles(&mut rng, tile_width as f32, height as f32);
                scatter_strip(&shapes, &gradient, tile_width, height)?
            }
        };

        if let Some(text) = &spec.watermark {
            watermark::apply_watermark(&mut strip, text)?;
        }

        Ok(Self { strip })
    }

    /// The single-tile strip
    pub const fn strip(&self) -> &PixelGrid {
        &self.strip
    }

    /// Width of one tile
    pub const fn tile_width(&self) -> usize {
        self.strip.width()
    }

    /// The strip repeated across a `width` x `height` frame
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the frame is degenerate
    pub fn tiled(&self, width: usize, height: usize) -> Result<PixelGrid> {
        self.strip.tiled(width, height)
    }
}

/// Paint `shapes` over `gradient` onto a fresh strip
///
/// # Errors
///
/// Returns `InvalidDimension` if the strip size is degenerate
pub fn scatter_strip(
    shapes: &[ScatterShape],
    gradient: &Gradient,
    width: usize,
    height: usize,
) -> Result<PixelGrid> {
    let mut canvas = new_canvas(width, height)?;
    gradient.paint(&mut canvas, BlendMode::SourceOver);
    for shape in shapes {
        draw_wrapped(&mut canvas, shape, gradient);
    }
    canvas_to_grid(&canvas)
}

fn new_canvas(width: usize, height: usize) -> Result<Pixmap> {
    u32::try_from(width)
        .ok()
        .zip(u32::try_from(height).ok())
        .and_then(|(w, h)| Pixmap::new(w, h))
        .ok_or_else(|| invalid_dimension("pattern canvas", &format!("{width}x{height}")))
}

fn canvas_to_grid(canvas: &Pixmap) -> Result<PixelGrid> {
    let data = canvas
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    PixelGrid::from_raw(canvas.width() as usize, canvas.height() as usize, data)
}
