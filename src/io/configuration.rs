//! Configuration constants for stereogram synthesis and pattern generation

// Disparity bounds as a percentage of output width
/// Minimum disparity (and pattern period) in percent of output width
pub const MIN_DISPARITY_PERCENT: usize = 15;
/// Maximum disparity in percent of output width
pub const MAX_DISPARITY_PERCENT: usize = 20;

/// Smallest accepted disparity scale multiplier
pub const MIN_DISPARITY_SCALE: f64 = 0.1;
/// Largest accepted disparity scale multiplier
pub const MAX_DISPARITY_SCALE: f64 = 1.75;
/// Disparity scale used when none is supplied
pub const DEFAULT_DISPARITY_SCALE: f64 = 1.0;

// Noise pattern
/// Edge length of a noise cell in pixels
pub const NOISE_CELL_SIZE: u32 = 8;
/// Brightest noise intensity as a fraction of full white
pub const NOISE_MAX_INTENSITY: f32 = 0.7;

// Scatter patterns (confetti and sprinkles)
/// Number of shapes scattered over a confetti or sprinkles strip
pub const SCATTER_SHAPE_COUNT: usize = 900;
/// Smallest confetti circle radius in pixels
pub const CONFETTI_MIN_RADIUS: f32 = 4.0;
/// Largest confetti circle radius in pixels
pub const CONFETTI_MAX_RADIUS: f32 = 20.0;
/// Shortest sprinkle segment in pixels
pub const SPRINKLE_MIN_LENGTH: f32 = 6.0;
/// Longest sprinkle segment in pixels
pub const SPRINKLE_MAX_LENGTH: f32 = 20.0;
/// Stroke width of a sprinkle segment in pixels
pub const SPRINKLE_WIDTH: f32 = 4.0;
/// Shadow displacement from its shape (x, y) in pixels
pub const SHADOW_OFFSET: (f32, f32) = (2.0, 3.0);
/// Total opacity of a shadow, spread over its soft layers
pub const SHADOW_OPACITY: f32 = 0.3;
/// Number of concentric layers making up a soft shadow
pub const SHADOW_LAYERS: u8 = 3;

// Gradient palette derived from a random base hue
/// Saturation of derived gradient stops
pub const GRADIENT_SATURATION: f32 = 0.65;
/// Lightness of derived gradient stops
pub const GRADIENT_LIGHTNESS: f32 = 0.55;
/// Hue distance between consecutive gradient stops in degrees
pub const GRADIENT_HUE_STEP: f32 = 120.0;

// Depth field rendering
/// Padding around the depth image for cutout/popout, in thousandths of output width
pub const FRAMED_PADDING_PERMILLE: usize = 125;
/// Mute level of the clamp edge vignette at the frame borders
pub const EDGE_MUTE_LEVEL: u8 = 128;
/// Fraction of the width over which the clamp vignette ramps to white
pub const EDGE_MUTE_RAMP: f32 = 0.2;

// Watermark
/// Margin between the watermark and the strip edges in pixels
pub const WATERMARK_MARGIN: usize = 4;
/// Largest glyph magnification for watermark text
pub const WATERMARK_MAX_SCALE: usize = 3;

// Scheduling
/// Time a continuous input must stay unchanged before it is released
pub const DEBOUNCE_SETTLE_MS: u64 = 150;

// Default values for configurable parameters
/// Fixed seed for reproducible pattern generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_stereogram";
/// Extension of exported files
pub const OUTPUT_EXTENSION: &str = "png";
/// Input extensions recognized when processing a directory
pub const INPUT_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
