use serde::{Deserialize, Serialize};

/// A square 2D grid of f32 values, row-major.
/// Coordinate math uses f64; stored cell values use f32.
///
/// Both the sampled heightfield and the accumulated flow field use this
/// type. The continuous domain is always [-1, 1]² with `cell_center`
/// mapping grid indices into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarGrid {
    /// Row-major cell values.
    pub data: Vec<f32>,
    pub size: usize,
}

impl ScalarGrid {
    /// Create a new grid filled with the given value.
    pub fn new(size: usize, fill: f32) -> Self {
        Self { data: vec![fill; size * size], size }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f32) {
        self.data[row * self.size + col] = val;
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
    }
}

/// Map a grid index to the center of its cell in the continuous [-1, 1]
/// domain. Row indices supply the y coordinate, column indices the x
/// coordinate; row 0 therefore sits at the y = -1 edge.
#[inline]
pub fn cell_center(i: usize, n: usize) -> f64 {
    (i as f64 + 0.5) / n as f64 * 2.0 - 1.0
}
