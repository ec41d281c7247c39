//! Tests for disparity bounds and the depth-to-offset mapping

#[cfg(test)]
mod tests {
    use autostereo::StereogramError;
    use autostereo::synthesis::disparity::{DisparityParams, check_scale};

    const fn params(min_disparity: usize, max_disparity: usize, scale: f64) -> DisparityParams {
        DisparityParams {
            min_disparity,
            max_disparity,
            scale,
        }
    }

    // Tests bounds are floored percentages of the output width
    #[test]
    fn test_bounds_from_width() {
        let p = DisparityParams::for_width(100, 1.0).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((p.min_disparity, p.max_disparity), (15, 20));
        assert_eq!(p.tile_width(), 15);

        let p = DisparityParams::for_width(641, 1.0).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((p.min_disparity, p.max_disparity), (96, 128));
    }

    // Tests scales outside the accepted range are rejected
    #[test]
    fn test_scale_range_enforced() {
        for scale in [0.05, 1.8, f64::NAN] {
            assert!(matches!(
                DisparityParams::for_width(100, scale),
                Err(StereogramError::InvalidParameter { .. })
            ));
        }
        assert!(DisparityParams::for_width(100, 0.1).is_ok());
        assert!(DisparityParams::for_width(100, 1.75).is_ok());
    }

    // Tests the scale check needs no output width
    #[test]
    fn test_check_scale() {
        assert!(check_scale(1.0).is_ok());
        assert!(check_scale(0.1).is_ok());
        for scale in [0.0, 5.0, -1.0, f64::INFINITY] {
            assert!(matches!(
                check_scale(scale),
                Err(StereogramError::InvalidParameter {
                    parameter: "disparity_scale",
                    ..
                })
            ));
        }
    }

    // Tests widths too narrow for a positive minimum are rejected
    #[test]
    fn test_zero_min_disparity_rejected() {
        assert!(matches!(
            DisparityParams::for_width(6, 1.0),
            Err(StereogramError::InvalidDimension { .. })
        ));
        assert!(params(0, 4, 1.0).validate().is_err());
    }

    // Tests inverted ranges and non-positive scales fail validation
    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(params(10, 8, 1.0).validate().is_err());
        assert!(params(10, 12, 0.0).validate().is_err());
        assert!(params(10, 12, -1.0).validate().is_err());
        assert!(params(10, 12, f64::INFINITY).validate().is_err());
        assert!(params(10, 12, 1.0).validate().is_ok());
    }

    // Tests offset ranges that would reach back past the row start are rejected
    #[test]
    fn test_validate_rejects_offsets_reaching_min() {
        assert!(matches!(
            params(2, 10, 1.0).validate(),
            Err(StereogramError::InvalidDimension { .. })
        ));
    }

    // Tests offsets are truncated rather than rounded
    #[test]
    fn test_offset_floors() {
        let p = params(5, 7, 1.0);
        assert_eq!(p.offset(0), 0);
        assert_eq!(p.offset(127), 0);
        assert_eq!(p.offset(128), 1);
        assert_eq!(p.offset(254), 1);
        assert_eq!(p.offset(255), 2);
    }

    // Tests offsets never decrease with depth or scale
    #[test]
    fn test_offset_monotonic() {
        let scales = [0.1, 0.5, 1.0, 1.25, 1.75];
        for pair in scales.windows(2) {
            let lower = params(150, 200, pair[0]);
            let upper = params(150, 200, pair[1]);
            for depth in 0..=u8::MAX {
                assert!(lower.offset(depth) <= upper.offset(depth));
            }
        }

        let p = params(150, 200, 1.0);
        for depth in 1..=u8::MAX {
            assert!(p.offset(depth - 1) <= p.offset(depth));
        }
    }

    // Tests the lookup table agrees with the direct mapping
    #[test]
    fn test_offset_table_matches() {
        let p = params(96, 128, 1.3);
        let table = p.offset_table();
        for depth in 0..=u8::MAX {
            assert_eq!(table[usize::from(depth)], p.offset(depth));
        }
    }
}
