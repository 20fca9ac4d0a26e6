//! Chart Colors
//! Series palette and the diverging heatmap scale, as plain RGB triples.

pub type Rgb = (u8, u8, u8);

pub const URBAN_COLOR: Rgb = (52, 152, 219); // Blue
pub const RURAL_COLOR: Rgb = (231, 76, 60); // Red

pub const PALETTE: [Rgb; 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

/// Red-yellow-blue, reversed: blue for low values, red for high.
const RD_YL_BU_R: [Rgb; 11] = [
    (49, 54, 149),
    (69, 117, 180),
    (116, 173, 209),
    (171, 217, 233),
    (224, 243, 248),
    (255, 255, 191),
    (254, 224, 144),
    (253, 174, 97),
    (244, 109, 67),
    (215, 48, 39),
    (165, 0, 38),
];

/// Color for the n-th series.
pub fn series_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Position of `value` within `[min, max]`, clamped to 0..=1.
/// A degenerate range maps everything to the middle of the scale.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= f64::EPSILON {
        return 0.5;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Heatmap color for a position in 0..=1, linearly interpolated between stops.
pub fn heat_color(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (RD_YL_BU_R.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(RD_YL_BU_R.len() - 1);
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = RD_YL_BU_R[lower];
    let (r1, g1, b1) = RD_YL_BU_R[upper];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    (mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_runs_blue_to_red() {
        assert_eq!(heat_color(0.0), (49, 54, 149));
        assert_eq!(heat_color(1.0), (165, 0, 38));
        assert_eq!(heat_color(0.5), (255, 255, 191));
    }

    #[test]
    fn degenerate_range_maps_to_middle() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
    }
}
