//! Tests for bounds-checked pixel grid storage

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::raster::grid::{BLACK, PixelGrid, WHITE};

    // Tests the buffer always holds width * height * 4 samples
    #[test]
    fn test_new_grid_buffer_length() {
        let grid = PixelGrid::new(7, 3).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(grid.as_raw().len(), 7 * 3 * 4);
        assert_eq!(grid.dimensions(), (7, 3));
        assert_eq!(grid.stride(), 28);
    }

    // Tests zero-sized grids are rejected
    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelGrid::new(0, 5),
            Err(StereogramError::InvalidDimension { .. })
        ));
        assert!(matches!(
            PixelGrid::filled(5, 0, WHITE),
            Err(StereogramError::InvalidDimension { .. })
        ));
    }

    // Tests raw buffers of the wrong length are rejected
    #[test]
    fn test_from_raw_length_mismatch() {
        let result = PixelGrid::from_raw(2, 2, vec![0; 15]);
        assert!(matches!(
            result,
            Err(StereogramError::InvalidDimension { .. })
        ));
        assert!(PixelGrid::from_raw(2, 2, vec![0; 16]).is_ok());
    }

    // Tests set overwrites exactly one pixel and get reads it back
    #[test]
    fn test_set_then_get() {
        let mut grid = PixelGrid::filled(4, 4, BLACK).unwrap_or_else(|e| panic!("{e}"));
        assert!(grid.set(2, 1, [10, 20, 30, 40]).is_ok());

        assert_eq!(grid.get(2, 1).ok(), Some([10, 20, 30, 40]));
        assert_eq!(grid.get(1, 1).ok(), Some(BLACK));
        assert_eq!(grid.get(2, 2).ok(), Some(BLACK));
    }

    // Tests out-of-range coordinates are rejected rather than wrapped into the next row
    #[test]
    fn test_out_of_range_rejected() {
        let mut grid = PixelGrid::new(3, 2).unwrap_or_else(|e| panic!("{e}"));

        match grid.get(3, 0) {
            Err(StereogramError::OutOfRangeAccess {
                x,
                y,
                width,
                height,
            }) => {
                assert_eq!((x, y, width, height), (3, 0, 3, 2));
            }
            other => panic!("expected OutOfRangeAccess, got {other:?}"),
        }
        assert!(grid.set(0, 2, WHITE).is_err());
        assert!(grid.row(2).is_err());
        assert!(grid.as_raw().iter().all(|&v| v == 0));
    }

    // Tests tiling repeats the grid in both directions
    #[test]
    fn test_tiled_repeats() {
        let mut tile = PixelGrid::filled(2, 2, BLACK).unwrap_or_else(|e| panic!("{e}"));
        assert!(tile.set(1, 0, WHITE).is_ok());

        let tiled = tile.tiled(5, 3).unwrap_or_else(|e| panic!("{e}"));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(tiled.get(x, y).ok(), tile.get(x % 2, y % 2).ok());
            }
        }
    }

    // Tests blitting clips parts falling outside the target
    #[test]
    fn test_blit_clips() {
        let mut target = PixelGrid::filled(4, 4, BLACK).unwrap_or_else(|e| panic!("{e}"));
        let patch = PixelGrid::filled(3, 3, WHITE).unwrap_or_else(|e| panic!("{e}"));

        target.blit(&patch, -1, 2);

        assert_eq!(target.get(0, 2).ok(), Some(WHITE));
        assert_eq!(target.get(1, 3).ok(), Some(WHITE));
        assert_eq!(target.get(2, 2).ok(), Some(BLACK));
        assert_eq!(target.get(0, 1).ok(), Some(BLACK));
    }

    // Tests conversion through the image crate preserves samples
    #[test]
    fn test_image_conversion() {
        let mut grid = PixelGrid::new(3, 2).unwrap_or_else(|e| panic!("{e}"));
        assert!(grid.set(2, 1, [1, 2, 3, 4]).is_ok());

        let image = grid.to_image().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [1, 2, 3, 4]);

        let back = PixelGrid::from_image(image).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(back, grid);
    }
}
