//! Height-to-color classification for terrain rendering.

use crate::grid::ElevationGrid;

/// An RGB color with channels in [0, 1].
pub type Rgb = [f32; 3];

/// Beach / lake shore.
pub const SAND: Rgb = [0.76, 0.70, 0.50];
/// Vegetated slopes.
pub const GRASS: Rgb = [0.30, 0.55, 0.20];
/// Bare rock.
pub const ROCK: Rgb = [0.45, 0.40, 0.35];
/// Peaks.
pub const SNOW: Rgb = [0.95, 0.95, 0.97];

/// Upper bound of the sand → grass band.
const SAND_BAND_END: f32 = 0.1;
/// Upper bound of the grass → rock band.
const GRASS_BAND_END: f32 = 0.5;

/// Color for a relative height on a grid whose range is `max_height`.
///
/// Bands are half-open: `[0, 0.1)` sand → grass, `[0.1, 0.5)` grass → rock,
/// `[0.5, 1.0]` rock → snow. A degenerate range maps everything to sand.
pub fn color_for(height: f64, max_height: f64) -> Rgb {
    let t = if max_height > 0.0 && height.is_finite() {
        (height / max_height).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };

    if t < SAND_BAND_END {
        lerp(SAND, GRASS, t / SAND_BAND_END)
    } else if t < GRASS_BAND_END {
        lerp(GRASS, ROCK, (t - SAND_BAND_END) / (GRASS_BAND_END - SAND_BAND_END))
    } else {
        lerp(ROCK, SNOW, (t - GRASS_BAND_END) / (1.0 - GRASS_BAND_END))
    }
}

/// Per-vertex colors for a whole grid, row-major.
pub fn colorize(grid: &ElevationGrid) -> Vec<Rgb> {
    let max_height = grid.max_height();
    grid.heights()
        .iter()
        .map(|&h| color_for(h as f64, max_height))
        .collect()
}

// Weighted form so f = 0 and f = 1 reproduce the anchors exactly.
fn lerp(from: Rgb, to: Rgb, f: f32) -> Rgb {
    let g = 1.0 - f;
    [
        from[0] * g + to[0] * f,
        from[1] * g + to[1] * f,
        from[2] * g + to[2] * f,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_rgb_eq(actual: Rgb, expected: Rgb) {
        for c in 0..3 {
            assert_relative_eq!(actual[c], expected[c], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_band_endpoints() {
        assert_eq!(color_for(0.0, 100.0), SAND);
        assert_eq!(color_for(100.0, 100.0), SNOW);
        assert_eq!(color_for(37.5, 37.5), SNOW);
    }

    #[test]
    fn test_band_boundaries_belong_to_upper_band() {
        // t = 0.1 starts the grass band, t = 0.5 starts the rock band
        assert_rgb_eq(color_for(10.0, 100.0), GRASS);
        assert_rgb_eq(color_for(50.0, 100.0), ROCK);
    }

    #[test]
    fn test_midpoints_blend_linearly() {
        let c = color_for(5.0, 100.0);
        assert_rgb_eq(
            c,
            [
                (SAND[0] + GRASS[0]) / 2.0,
                (SAND[1] + GRASS[1]) / 2.0,
                (SAND[2] + GRASS[2]) / 2.0,
            ],
        );

        let c = color_for(75.0, 100.0);
        assert_rgb_eq(
            c,
            [
                (ROCK[0] + SNOW[0]) / 2.0,
                (ROCK[1] + SNOW[1]) / 2.0,
                (ROCK[2] + SNOW[2]) / 2.0,
            ],
        );
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(color_for(-5.0, 10.0), SAND);
        assert_eq!(color_for(50.0, 10.0), SNOW);
        assert_eq!(color_for(3.0, 0.0), SAND);
        assert_eq!(color_for(f64::NAN, 10.0), SAND);
    }

    #[test]
    fn test_channels_in_unit_range() {
        for i in 0..=200 {
            let c = color_for(i as f64, 200.0);
            assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_colorize_grid() {
        let grid = ElevationGrid::from_parts(vec![0.0, 4.0, 2.0, 0.0], 2, 2, 1.0, 0.0, 4.0);
        let colors = colorize(&grid);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], SAND);
        assert_eq!(colors[1], SNOW);
        assert_rgb_eq(colors[2], ROCK);
    }
}
