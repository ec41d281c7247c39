//! Regeneration of the displayed raster from an explicit configuration
//!
//! The engine owns the inputs supplied by collaborators (depth raster, source
//! image) and the intermediate artifacts derived from them. Each artifact is
//! rebuilt only when something it depends on changes: the depth field when
//! the depth raster, its render options or the output size change, the pattern
//! when its spec or the output size changes. The output itself is always
//! recomputed in full.

use crate::depth::renderer::{DepthRenderOptions, render_depth_field};
use crate::io::configuration::{DEFAULT_DISPARITY_SCALE, DEFAULT_SEED};
use crate::io::error::{Result, invalid_dimension, invalid_parameter};
use crate::pattern::{Pattern, PatternKind, PatternSpec};
use crate::raster::grid::{BLACK, PixelGrid};
use crate::raster::resample::fit_centered;
use crate::synthesis::disparity::DisparityParams;
use crate::synthesis::synthesizer::synthesize;
use tracing::{debug, info_span, warn};

/// Which raster the engine hands back for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// The synthesized stereogram
    #[default]
    Autostereogram,
    /// The rendered depth field
    DepthMap,
    /// The source image fitted into the output frame
    SourceImage,
}

/// Every parameter a regeneration reads
#[derive(Debug, Clone, PartialEq)]
pub struct StereogramConfig {
    /// Disparity multiplier within 0.1..=1.75
    pub disparity_scale: f64,
    /// Pattern to synthesize with
    pub pattern: PatternSpec,
    /// Depth field rendering options
    pub depth: DepthRenderOptions,
    /// Raster to return
    pub output: OutputMode,
}

impl Default for StereogramConfig {
    fn default() -> Self {
        Self {
            disparity_scale: DEFAULT_DISPARITY_SCALE,
            pattern: PatternSpec::new(PatternKind::Noise, DEFAULT_SEED),
            depth: DepthRenderOptions::default(),
            output: OutputMode::Autostereogram,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedDepth {
    options: DepthRenderOptions,
    field: PixelGrid,
}

#[derive(Debug, Clone)]
struct CachedPattern {
    spec: PatternSpec,
    tile_width: usize,
    tiled: PixelGrid,
}

/// Owner of collaborator inputs, cached artifacts and the displayed output
#[derive(Debug, Clone)]
pub struct Engine {
    width: usize,
    height: usize,
    depth_raster: Option<PixelGrid>,
    source_image: Option<PixelGrid>,
    depth: Option<CachedDepth>,
    pattern: Option<CachedPattern>,
    current: Option<PixelGrid>,
}

impl Engine {
    /// Engine producing `width` x `height` rasters
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            depth_raster: None,
            source_image: None,
            depth: None,
            pattern: None,
            current: None,
        })
    }

    /// Output dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Change the output size, discarding every size-dependent artifact
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero
    pub fn set_dimensions(&mut self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.depth = None;
            self.pattern = None;
        }
        Ok(())
    }

    /// Supply the estimated depth raster for the current source image
    pub fn set_depth_raster(&mut self, raster: PixelGrid) {
        self.depth_raster = Some(raster);
        self.depth = None;
    }

    /// Supply the source image used by [`OutputMode::SourceImage`]
    pub fn set_source_image(&mut self, image: PixelGrid) {
        self.source_image = Some(image);
    }

    /// The last successfully regenerated output
    pub const fn current(&self) -> Option<&PixelGrid> {
        self.current.as_ref()
    }

    /// Rendered depth field for `options`, reusing the cached one if valid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if no depth raster was supplied and the
    /// renderer's errors otherwise
    pub fn depth_field(&mut self, options: DepthRenderOptions) -> Result<&PixelGrid> {
        let stale = self.depth.as_ref().is_none_or(|c| c.options != options);
        if stale {
            let raster = self.depth_raster.as_ref().ok_or_else(|| {
                invalid_parameter("depth_raster", &"<none>", &"no depth raster supplied")
            })?;
            debug!(?options, "rendering depth field");
            let field = render_depth_field(raster, self.width, self.height, options)?;
            self.depth = Some(CachedDepth { options, field });
        }
        self.depth
            .as_ref()
            .map(|c| &c.field)
            .ok_or_else(|| invalid_dimension("depth field", &"not rendered"))
    }

    /// Output-sized pattern for `spec`, reusing the cached one if valid
    ///
    /// # Errors
    ///
    /// Propagates pattern generation errors
    pub fn pattern(&mut self, spec: &PatternSpec, tile_width: usize) -> Result<&PixelGrid> {
        let stale = self
            .pattern
            .as_ref()
            .is_none_or(|c| c.tile_width != tile_width || c.spec != *spec);
        if stale {
            let pattern = Pattern::generate(spec, tile_width, self.height)?;
            let tiled = pattern.tiled(self.width, self.height)?;
            self.pattern = Some(CachedPattern {
                spec: spec.clone(),
                tile_width,
                tiled,
            });
        }
        self.pattern
            .as_ref()
            .map(|c| &c.tiled)
            .ok_or_else(|| invalid_dimension("pattern", &"not generated"))
    }

    /// Compute the raster selected by `config` without touching the display
    ///
    /// # Errors
    ///
    /// Returns the first error raised by depth rendering, pattern generation
    /// or synthesis
    pub fn render(&mut self, config: &StereogramConfig) -> Result<PixelGrid> {
        match config.output {
            OutputMode::Autostereogram => {
                let params = DisparityParams::for_width(self.width, config.disparity_scale)?;
                self.depth_field(config.depth)?;
                self.pattern(&config.pattern, params.tile_width())?;
                match (&self.depth, &self.pattern) {
                    (Some(depth), Some(pattern)) => {
                        synthesize(&depth.field, &pattern.tiled, &params)
                    }
                    _ => Err(invalid_dimension("stereogram", &"inputs missing")),
                }
            }
            OutputMode::DepthMap => self.depth_field(config.depth).cloned(),
            OutputMode::SourceImage => {
                let source = self.source_image.as_ref().ok_or_else(|| {
                    invalid_parameter("source_image", &"<none>", &"no source image supplied")
                })?;
                fit_centered(source, self.width, self.height, 0, BLACK).map(|(frame, ..)| frame)
            }
        }
    }

    /// Recompute the displayed output from `config`
    ///
    /// On failure the previous output stays current and the error is returned
    /// for the caller to surface.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted this regeneration
    pub fn regenerate(&mut self, config: &StereogramConfig) -> Result<&PixelGrid> {
        let span = info_span!(
            "regenerate",
            width = self.width,
            height = self.height,
            output = ?config.output,
            pattern = config.pattern.kind.name(),
        );
        let _entered = span.enter();

        match self.render(config) {
            Ok(output) => Ok(&*self.current.insert(output)),
            Err(err) => {
                warn!(error = %err, "regeneration failed, keeping previous output");
                Err(err)
            }
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(invalid_dimension(
            "output",
            &format!("{width}x{height} has no pixels"),
        ));
    }
    Ok(())
}
