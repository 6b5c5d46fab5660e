//! Normalize, smooth, and quantize the accumulated flow into pixels.
//!
//! Raw accumulation is spiky: a cell on a trunk path can carry hundreds of
//! units while its neighbor carries one. Normalizing, blurring twice with a
//! clipped 3×3 kernel, and re-normalizing turns that into the soft gradient
//! the terrain shader expects to sample.

use serde::{Deserialize, Serialize};

use crate::grid::ScalarGrid;

/// 3×3 kernel weights: center, axis neighbor, diagonal neighbor.
const BLUR_CENTER: f64 = 4.0;
const BLUR_AXIS: f64 = 2.0;
const BLUR_DIAGONAL: f64 = 1.0;

/// Smoothing passes applied between the two normalizations.
const SMOOTH_PASSES: usize = 2;

/// Final 8-bit RGBA image, row-major, row 0 at the cy = -1 edge. The flow
/// value is written to R, G, and B; alpha is always 255.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowMapImage {
    pub size: usize,
    pub pixels: Vec<u8>,
}

/// Scale the grid so its maximum is exactly 1.0. An all-zero field is left
/// untouched; flow values are never negative, so max ≤ 0 means all zero.
pub fn normalize_max(grid: &mut ScalarGrid) {
    let max = grid.max_value();
    if max <= 0.0 {
        return;
    }
    for v in grid.data.iter_mut() {
        *v /= max;
    }
}

/// One weighted 3×3 smoothing pass. Off-grid neighbors are dropped from
/// both the sum and the divisor, so edges average over what exists instead
/// of darkening. Accumulation runs in f64, which keeps a uniform field an
/// exact fixed point of the pass.
pub fn smooth_pass(grid: &ScalarGrid) -> ScalarGrid {
    let size = grid.size;
    let mut out = ScalarGrid::new(size, 0.0);
    for row in 0..size {
        for col in 0..size {
            let mut sum = 0.0f64;
            let mut weight = 0.0f64;
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    if nr < 0 || nr >= size as isize || nc < 0 || nc >= size as isize {
                        continue;
                    }
                    let w = if dr == 0 && dc == 0 {
                        BLUR_CENTER
                    } else if dr == 0 || dc == 0 {
                        BLUR_AXIS
                    } else {
                        BLUR_DIAGONAL
                    };
                    sum += grid.get(nr as usize, nc as usize) as f64 * w;
                    weight += w;
                }
            }
            out.set(row, col, (sum / weight) as f32);
        }
    }
    out
}

/// Quantize a normalized grid to 8-bit grayscale RGBA: `floor(v × 255)`
/// clamped to [0, 255] in R, G, B, with opaque alpha.
pub fn quantize_rgba(grid: &ScalarGrid) -> FlowMapImage {
    let mut pixels = Vec::with_capacity(grid.data.len() * 4);
    for &v in &grid.data {
        let q = (v * 255.0).floor().clamp(0.0, 255.0) as u8;
        pixels.extend_from_slice(&[q, q, q, 255]);
    }
    FlowMapImage { size: grid.size, pixels }
}

/// Full post-processing chain: normalize, smooth twice, re-normalize,
/// quantize.
pub fn postprocess(mut flow: ScalarGrid) -> FlowMapImage {
    normalize_max(&mut flow);
    for _ in 0..SMOOTH_PASSES {
        flow = smooth_pass(&flow);
    }
    normalize_max(&mut flow);
    quantize_rgba(&flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn normalize_sets_max_to_exactly_one() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut grid = ScalarGrid::new(16, 0.0);
        for v in grid.data.iter_mut() {
            *v = rng.gen::<f32>() * 12.5;
        }
        normalize_max(&mut grid);
        assert_eq!(grid.max_value(), 1.0);
        assert!(grid.min_value() >= 0.0);
    }

    #[test]
    fn normalize_leaves_all_zero_field_untouched() {
        let mut grid = ScalarGrid::new(8, 0.0);
        normalize_max(&mut grid);
        assert!(grid.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uniform_field_is_a_blur_fixed_point() {
        let grid = ScalarGrid::new(9, 0.37);
        let smoothed = smooth_pass(&grid);
        for (i, &v) in smoothed.data.iter().enumerate() {
            assert_eq!(v, 0.37, "cell {i} drifted under a uniform blur");
        }
    }

    #[test]
    fn blur_spreads_an_impulse_by_kernel_weight() {
        let mut grid = ScalarGrid::new(5, 0.0);
        grid.set(2, 2, 1.0);
        let smoothed = smooth_pass(&grid);

        // Interior divisor is 16, so the exact shares are powers of two.
        assert_eq!(smoothed.get(2, 2), 0.25);
        assert_eq!(smoothed.get(1, 2), 0.125);
        assert_eq!(smoothed.get(2, 1), 0.125);
        assert_eq!(smoothed.get(1, 1), 0.0625);
        assert_eq!(smoothed.get(3, 3), 0.0625);
        assert_eq!(smoothed.get(0, 2), 0.0);
    }

    #[test]
    fn quantize_floors_and_clamps_to_bytes() {
        let mut grid = ScalarGrid::new(2, 0.0);
        grid.data.copy_from_slice(&[0.0, 0.5, 1.0, 0.999]);

        let image = quantize_rgba(&grid);
        let expected = [
            0, 0, 0, 255, //
            127, 127, 127, 255, //
            255, 255, 255, 255, //
            254, 254, 254, 255,
        ];
        assert_eq!(image.pixels.as_slice(), expected.as_slice());
        assert_eq!(image.size, 2);
    }

    #[test]
    fn postprocess_of_zero_flow_is_black_opaque() {
        let image = postprocess(ScalarGrid::new(4, 0.0));
        for px in image.pixels.chunks_exact(4) {
            assert_eq!(px, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn postprocess_peaks_at_full_white() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut flow = ScalarGrid::new(16, 0.0);
        for v in flow.data.iter_mut() {
            *v = rng.gen::<f32>() * 40.0;
        }
        let image = postprocess(flow);
        let max_byte = image.pixels.chunks_exact(4).map(|px| px[0]).max();
        assert_eq!(max_byte, Some(255), "re-normalized field should hit 255");
    }
}
