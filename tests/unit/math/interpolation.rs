//! Tests for piecewise-linear interpolation

#[cfg(test)]
mod tests {
    use autostereo::math::interpolation::Linear;

    // Tests values between stops interpolate linearly
    #[test]
    fn test_linear_between_stops() {
        let curve = Linear::new(vec![0.0, 1.0, 3.0], vec![0.0, 10.0, 30.0])
            .unwrap_or_else(|e| panic!("{e}"));

        assert!((curve.evaluate(0.5) - 5.0).abs() < 1e-9);
        assert!((curve.evaluate(2.0) - 20.0).abs() < 1e-9);
        assert!((curve.evaluate(1.0) - 10.0).abs() < 1e-9);
    }

    // Tests points outside the stop range hold the boundary value
    #[test]
    fn test_linear_clamps_outside() {
        let curve =
            Linear::new(vec![0.0, 1.0], vec![4.0, 8.0]).unwrap_or_else(|e| panic!("{e}"));
        assert!((curve.evaluate(-3.0) - 4.0).abs() < 1e-9);
        assert!((curve.evaluate(7.0) - 8.0).abs() < 1e-9);
    }

    // Tests invalid stop definitions are rejected
    #[test]
    fn test_linear_rejects_invalid() {
        assert!(Linear::new(vec![0.0], vec![1.0]).is_err());
        assert!(Linear::new(vec![0.0, 1.0], vec![1.0]).is_err());
        assert!(Linear::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]).is_err());
    }
}
