//! Command-line interface for batch stereogram rendering from depth rasters

use crate::depth::renderer::{DepthPolarity, DepthPolicy, DepthRenderOptions};
use crate::io::configuration::{
    DEFAULT_DISPARITY_SCALE, DEFAULT_SEED, INPUT_EXTENSIONS, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, StereogramError, invalid_dimension, invalid_parameter};
use crate::io::image::{export_png, load_pattern_source, load_raster};
use crate::io::progress::{ProgressManager, Stage};
use crate::pattern::{PatternKind, PatternSpec};
use crate::synthesis::disparity::check_scale;
use crate::synthesis::engine::{Engine, OutputMode, StereogramConfig};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Pattern variants selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternChoice {
    /// Gray noise tinted by a gradient
    Noise,
    /// Scattered discs over a gradient
    Confetti,
    /// Scattered short strokes over a gradient
    Sprinkles,
    /// Strip cut from --pattern-source (or --source)
    Image,
}

/// Depth edge policies selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyChoice {
    /// Extend the depth image to the frame edges
    Clamp,
    /// Float the depth image in a near plane
    Cutout,
    /// Float the depth image over a far plane
    Popout,
}

/// Depth polarities selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolarityChoice {
    /// Bright values are near
    NearBright,
    /// Dark values are near
    NearDark,
}

/// Output rasters selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputChoice {
    /// The synthesized stereogram
    Autostereogram,
    /// The rendered depth field
    DepthMap,
    /// The source image
    SourceImage,
}

impl From<PolicyChoice> for DepthPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Clamp => Self::Clamp,
            PolicyChoice::Cutout => Self::Cutout,
            PolicyChoice::Popout => Self::Popout,
        }
    }
}

impl From<PolarityChoice> for DepthPolarity {
    fn from(choice: PolarityChoice) -> Self {
        match choice {
            PolarityChoice::NearBright => Self::NearIsBright,
            PolarityChoice::NearDark => Self::NearIsDark,
        }
    }
}

impl From<OutputChoice> for OutputMode {
    fn from(choice: OutputChoice) -> Self {
        match choice {
            OutputChoice::Autostereogram => Self::Autostereogram,
            OutputChoice::DepthMap => Self::DepthMap,
            OutputChoice::SourceImage => Self::SourceImage,
        }
    }
}

#[derive(Parser)]
#[command(name = "autostereo")]
#[command(
    author,
    version,
    about = "Render autostereograms from depth rasters"
)]
/// Command-line arguments for the stereogram renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Depth raster or directory of depth rasters to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Source image shown by --output-mode source-image
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Pattern variant
    #[arg(short, long, value_enum, default_value_t = PatternChoice::Noise)]
    pub pattern: PatternChoice,

    /// Image used by the image pattern
    #[arg(long)]
    pub pattern_source: Option<PathBuf>,

    /// Disparity scale multiplier (0.1 to 1.75)
    #[arg(long, default_value_t = DEFAULT_DISPARITY_SCALE)]
    pub scale: f64,

    /// How the depth image meets the frame edges
    #[arg(short, long, value_enum, default_value_t = PolicyChoice::Clamp)]
    pub depth_policy: PolicyChoice,

    /// Which end of the depth range is near
    #[arg(long, value_enum, default_value_t = PolarityChoice::NearBright)]
    pub polarity: PolarityChoice,

    /// Raster to write
    #[arg(short, long, value_enum, default_value_t = OutputChoice::Autostereogram)]
    pub output_mode: OutputChoice,

    /// Text stamped into the pattern
    #[arg(long)]
    pub watermark: Option<String>,

    /// Random seed for reproducible patterns
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in pixels (defaults to the depth raster width)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in pixels (defaults to the depth raster height)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Keep the clamp policy edges at full strength
    #[arg(long)]
    pub no_soften: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Depth rendering options selected by the flags
    pub fn depth_options(&self) -> DepthRenderOptions {
        DepthRenderOptions {
            policy: self.depth_policy.into(),
            polarity: self.polarity.into(),
            soften_edges: !self.no_soften,
        }
    }

    /// Resolve output dimensions against the depth raster size
    ///
    /// A single given dimension keeps the depth raster's aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the derived dimension overflows or
    /// either dimension is zero
    pub fn output_dimensions(&self, depth_size: (usize, usize)) -> Result<(usize, usize)> {
        let (depth_width, depth_height) = depth_size;
        let dimensions = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scale_side(depth_height, w, depth_width)?),
            (None, Some(h)) => (scale_side(depth_width, h, depth_height)?, h),
            (None, None) => depth_size,
        };
        if dimensions.0 == 0 || dimensions.1 == 0 {
            return Err(invalid_dimension(
                "output",
                &format!("{}x{} has no pixels", dimensions.0, dimensions.1),
            ));
        }
        Ok(dimensions)
    }
}

/// `side * numerator / denominator` without overflowing
fn scale_side(side: usize, numerator: usize, denominator: usize) -> Result<usize> {
    side.checked_mul(numerator)
        .and_then(|product| product.checked_div(denominator))
        .ok_or_else(|| {
            invalid_dimension(
                "output",
                &format!("{side} * {numerator} / {denominator} does not fit in usize"),
            )
        })
}

/// Orchestrates batch processing of depth rasters with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// A file whose regeneration fails with a recoverable error is reported
    /// and skipped; the batch continues.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation fails, the pattern source cannot
    /// be loaded, or an output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        let config = self.build_config()?;
        let source_image = self.cli.source.as_deref().map(load_raster).transpose()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index, &config, source_image.as_ref()) {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => {
                    warn!(file = %file.display(), error = %err, "skipping file");
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.fail_file(index);
                    }
                }
                Err(err) => return Err(err),
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Build the regeneration configuration from the flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `--scale` is out of range or the image
    /// pattern has no source, and an error if the source cannot be decoded
    pub fn build_config(&self) -> Result<StereogramConfig> {
        check_scale(self.cli.scale)?;
        let kind = match self.cli.pattern {
            PatternChoice::Noise => PatternKind::Noise,
            PatternChoice::Confetti => PatternKind::Confetti,
            PatternChoice::Sprinkles => PatternKind::Sprinkles,
            PatternChoice::Image => {
                let path = self
                    .cli
                    .pattern_source
                    .as_ref()
                    .or(self.cli.source.as_ref())
                    .ok_or_else(|| {
                        invalid_parameter(
                            "pattern_source",
                            &"<none>",
                            &"the image pattern needs --pattern-source or --source",
                        )
                    })?;
                PatternKind::Image(load_pattern_source(path)?)
            }
        };

        let mut pattern = PatternSpec::new(kind, self.cli.seed);
        pattern.watermark.clone_from(&self.cli.watermark);

        Ok(StereogramConfig {
            disparity_scale: self.cli.scale,
            pattern,
            depth: self.cli.depth_options(),
            output: self.cli.output_mode.into(),
        })
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_input_file(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG, JPEG or WebP image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(&self.cli.target).map_err(|e| StereogramError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read directory",
                    source: e,
                })?;
            for entry in entries {
                let path = entry?.path();
                if is_input_file(&path) && !is_output_file(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(file = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: &StereogramConfig,
        source_image: Option<&crate::raster::grid::PixelGrid>,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let depth = load_raster(input_path)?;
        let (width, height) = self.cli.output_dimensions(depth.dimensions())?;

        let mut engine = Engine::new(width, height)?;
        engine.set_depth_raster(depth);
        if let Some(source) = source_image {
            engine.set_source_image(source.clone());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.update_stage(index, Stage::Rendering);
        }
        let output = engine.regenerate(config)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.update_stage(index, Stage::Exporting);
        }
        export_png(output, &output_path)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "stereogram written"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    /// Path the result for `input_path` is written to
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_input_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_output_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
