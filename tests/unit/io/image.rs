//! Tests for raster loading and PNG export

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::io::image::{decode_pattern_source, export_png, load_pattern_source, load_raster};
    use autostereo::raster::grid::{BLACK, PixelGrid};

    // Tests an exported PNG loads back unchanged
    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("nested").join("out.png");

        let mut grid = PixelGrid::filled(6, 4, BLACK).unwrap_or_else(|e| panic!("{e}"));
        assert!(grid.set(5, 3, [200, 100, 50, 255]).is_ok());
        assert!(export_png(&grid, &path).is_ok());

        let loaded = load_raster(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(loaded, grid);
    }

    // Tests undecodable pattern bytes are reported as an unsupported source
    #[test]
    fn test_decode_garbage_pattern_source() {
        let result = decode_pattern_source(b"definitely not an image");
        assert!(matches!(
            result,
            Err(StereogramError::UnsupportedPatternSource { .. })
        ));
    }

    // Tests pattern sources decode from encoded bytes
    #[test]
    fn test_load_pattern_source() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("pattern.png");
        let grid = PixelGrid::filled(3, 3, [10, 20, 30, 255]).unwrap_or_else(|e| panic!("{e}"));
        assert!(export_png(&grid, &path).is_ok());

        let loaded = load_pattern_source(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(loaded, grid);
    }

    // Tests missing files map to load and file system errors
    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let missing = dir.path().join("missing.png");

        assert!(matches!(
            load_raster(&missing),
            Err(StereogramError::ImageLoad { .. })
        ));
        assert!(matches!(
            load_pattern_source(&missing),
            Err(StereogramError::FileSystem { .. })
        ));
    }

    // Tests encoding failures are reported as export errors
    #[test]
    fn test_export_onto_directory_fails() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let grid = PixelGrid::filled(2, 2, BLACK).unwrap_or_else(|e| panic!("{e}"));

        let result = export_png(&grid, dir.path());
        assert!(matches!(
            result,
            Err(StereogramError::ImageExport { .. })
        ));
        assert!(result.is_err_and(|e| !e.is_recoverable()));
    }
}
