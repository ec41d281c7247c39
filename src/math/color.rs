//! Color space conversion and blend formulas

/// Opaque RGB color
pub type Rgb = [u8; 3];

/// Convert hue (degrees), saturation and lightness (0..=1) to RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = (1.0 - 2.0f32.mul_add(l, -1.0).abs()) * s;
    let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [unit_to_byte(r + m), unit_to_byte(g + m), unit_to_byte(b + m)]
}

/// Relative lightness of a color in 0..=1 (Rec. 601 luma)
pub fn luma(color: Rgb) -> f32 {
    let [r, g, b] = color;
    (0.114f32.mul_add(
        f32::from(b),
        0.299f32.mul_add(f32::from(r), 0.587 * f32::from(g)),
    )) / 255.0
}

/// Multiply blend, per channel
pub fn multiply(backdrop: u8, source: u8) -> u8 {
    ((u16::from(backdrop) * u16::from(source) + 127) / 255) as u8
}

/// Linear interpolation between two colors, `t` in 0..=1
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| {
        unit_to_byte((f32::from(to) - f32::from(from)).mul_add(t, f32::from(from)) / 255.0)
    };
    [lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])]
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
