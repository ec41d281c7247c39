//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::depth::renderer::{DepthPolarity, DepthPolicy};
    use autostereo::io::cli::{Cli, FileProcessor, OutputChoice, PatternChoice, PolicyChoice};
    use autostereo::io::configuration::{DEFAULT_DISPARITY_SCALE, DEFAULT_SEED};
    use autostereo::io::image::export_png;
    use autostereo::pattern::PatternKind;
    use autostereo::raster::grid::PixelGrid;
    use autostereo::synthesis::engine::OutputMode;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn depth_ramp(width: usize, height: usize) -> PixelGrid {
        let mut grid = PixelGrid::new(width, height).unwrap_or_else(|e| panic!("{e}"));
        for y in 0..height {
            for x in 0..width {
                let v = (x * 255 / width) as u8;
                assert!(grid.set(x, y, [v, v, v, 255]).is_ok());
            }
        }
        grid
    }

    // Tests CLI parsing with only the required target argument
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "depth.png"]);

        assert_eq!(cli.target, PathBuf::from("depth.png"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!((cli.scale - DEFAULT_DISPARITY_SCALE).abs() < f64::EPSILON);
        assert_eq!(cli.pattern, PatternChoice::Noise);
        assert_eq!(cli.depth_policy, PolicyChoice::Clamp);
        assert_eq!(cli.output_mode, OutputChoice::Autostereogram);
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests short flags and value enums
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program",
            "depth.png",
            "-p",
            "confetti",
            "-d",
            "popout",
            "-o",
            "depth-map",
            "-s",
            "7",
            "-q",
            "-n",
        ]);

        assert_eq!(cli.pattern, PatternChoice::Confetti);
        assert_eq!(cli.depth_policy, PolicyChoice::Popout);
        assert_eq!(cli.output_mode, OutputChoice::DepthMap);
        assert_eq!(cli.seed, 7);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
    }

    // Tests depth options follow the policy, polarity and softening flags
    #[test]
    fn test_depth_options() {
        let cli = Cli::parse_from([
            "program",
            "depth.png",
            "--depth-policy",
            "cutout",
            "--polarity",
            "near-dark",
            "--no-soften",
        ]);
        let options = cli.depth_options();

        assert_eq!(options.policy, DepthPolicy::Cutout);
        assert_eq!(options.polarity, DepthPolarity::NearIsDark);
        assert!(!options.soften_edges);
    }

    // Tests missing output dimensions follow the depth raster aspect ratio
    #[test]
    fn test_output_dimensions() {
        let resolve = |args: &[&str]| {
            let mut argv = vec!["program", "depth.png"];
            argv.extend_from_slice(args);
            Cli::parse_from(argv)
                .output_dimensions((300, 200))
                .unwrap_or_else(|e| panic!("{e}"))
        };
        assert_eq!(resolve(&[]), (300, 200));
        assert_eq!(resolve(&["-w", "600"]), (600, 400));
        assert_eq!(resolve(&["-H", "100"]), (150, 100));
        assert_eq!(resolve(&["-w", "64", "-H", "48"]), (64, 48));
    }

    // Tests derived dimensions that overflow or collapse to zero are rejected
    #[test]
    fn test_output_dimensions_rejects_degenerate_sizes() {
        let huge = usize::MAX.to_string();
        let cli = Cli::parse_from(["program", "depth.png", "-w", &huge]);
        assert!(matches!(
            cli.output_dimensions((300, 200)),
            Err(StereogramError::InvalidDimension { .. })
        ));

        let cli = Cli::parse_from(["program", "depth.png", "-H", &huge]);
        assert!(matches!(
            cli.output_dimensions((300, 200)),
            Err(StereogramError::InvalidDimension { .. })
        ));

        let cli = Cli::parse_from(["program", "depth.png", "-w", "1"]);
        assert!(matches!(
            cli.output_dimensions((300, 200)),
            Err(StereogramError::InvalidDimension { .. })
        ));
    }

    // Tests the configuration carries flags into the engine settings
    #[test]
    fn test_build_config() {
        let cli = Cli::parse_from([
            "program",
            "depth.png",
            "-p",
            "sprinkles",
            "--scale",
            "1.5",
            "--watermark",
            "HI",
            "-o",
            "source-image",
        ]);
        let config = FileProcessor::new(cli)
            .build_config()
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(matches!(config.pattern.kind, PatternKind::Sprinkles));
        assert_eq!(config.pattern.watermark.as_deref(), Some("HI"));
        assert!((config.disparity_scale - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.output, OutputMode::SourceImage);
    }

    // Tests the image pattern needs a source image
    #[test]
    fn test_image_pattern_requires_source() {
        let cli = Cli::parse_from(["program", "depth.png", "-p", "image"]);
        let result = FileProcessor::new(cli).build_config();
        assert!(matches!(
            result,
            Err(StereogramError::InvalidParameter { .. })
        ));
    }

    // Tests an out-of-range scale fails the batch before any file is rendered
    #[test]
    fn test_scale_checked_before_batch() {
        let cli = Cli::parse_from(["program", "depth.png", "--scale", "5"]);
        assert!(matches!(
            FileProcessor::new(cli).build_config(),
            Err(StereogramError::InvalidParameter {
                parameter: "disparity_scale",
                ..
            })
        ));

        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        assert!(export_png(&depth_ramp(40, 20), &dir.path().join("scene.png")).is_ok());
        let target = dir.path().to_string_lossy().to_string();
        let mut processor =
            FileProcessor::new(Cli::parse_from(["program", &target, "-q", "--scale", "5"]));
        assert!(matches!(
            processor.process(),
            Err(StereogramError::InvalidParameter { .. })
        ));
        assert!(!dir.path().join("scene_stereogram.png").exists());
    }

    // Tests an unreadable depth raster is skipped while the rest of the batch renders
    #[test]
    fn test_process_skips_unreadable_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        assert!(std::fs::write(dir.path().join("broken.png"), "not a png").is_ok());
        assert!(export_png(&depth_ramp(40, 20), &dir.path().join("scene.png")).is_ok());

        let target = dir.path().to_string_lossy().to_string();
        let mut processor = FileProcessor::new(Cli::parse_from(["program", &target]));
        assert!(processor.process().is_ok());

        assert!(!dir.path().join("broken_stereogram.png").exists());
        assert!(dir.path().join("scene_stereogram.png").exists());
    }

    // Tests output paths gain the stereogram suffix and a PNG extension
    #[test]
    fn test_output_path() {
        let output = FileProcessor::get_output_path(Path::new("dir/scene.jpg"));
        assert_eq!(output, PathBuf::from("dir/scene_stereogram.png"));
    }

    // Tests a directory run renders every depth raster and skips finished ones
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let input = dir.path().join("scene.png");
        assert!(export_png(&depth_ramp(40, 20), &input).is_ok());

        let target = dir.path().to_string_lossy().to_string();
        let mut processor = FileProcessor::new(Cli::parse_from(["program", &target, "-q"]));
        assert!(processor.process().is_ok());

        let output = dir.path().join("scene_stereogram.png");
        let image = image::open(&output).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((image.width(), image.height()), (40, 20));

        let modified = std::fs::metadata(&output)
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("{e}"));
        let mut processor = FileProcessor::new(Cli::parse_from(["program", &target, "-q"]));
        assert!(processor.process().is_ok());
        let modified_again = std::fs::metadata(&output)
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(modified, modified_again);
    }

    // Tests targets that are neither images nor directories are rejected
    #[test]
    fn test_invalid_target() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let text = dir.path().join("notes.txt");
        assert!(std::fs::write(&text, "depth").is_ok());

        let target = text.to_string_lossy().to_string();
        let mut processor = FileProcessor::new(Cli::parse_from(["program", &target, "-q"]));
        assert!(matches!(
            processor.process(),
            Err(StereogramError::InvalidParameter { .. })
        ));
    }
}
