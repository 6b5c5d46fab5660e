//! Rim-sourced D8 flow accumulation.
//!
//! Unit flow mass is injected into a ring of cells around the crater rim
//! and routed to the steepest strictly-downhill 8-neighbor, one hop per
//! cell, visiting cells in descending height order. Descending order makes
//! the single pass topological: every unit that will ever reach a cell has
//! arrived before that cell forwards. A cell's final value is the total
//! mass that passed through it, which is what the shader blends as a
//! "wetness" channel.
//!
//! Cells with no strictly-downhill neighbor are sinks and simply stop
//! forwarding. That is intentional, not a bug: the rendered gullies end in
//! pooled bright spots at local minima, and spilling or lake-filling would
//! change every image downstream.

use crate::grid::{cell_center, ScalarGrid};
use crate::height::HeightSynthesizer;
use crate::params::ShapeParams;

#[cfg(feature = "threading")]
use rayon::prelude::*;

use std::cmp::Ordering;
use std::f32::consts::SQRT_2;

/// Half-width of the source ring around the crater radius, in continuous
/// units.
pub const SOURCE_BAND: f64 = 0.08;

/// 8-neighbor offsets in raster order, (row, col). Routing ties resolve to
/// the first entry, so this order is part of the output contract.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Hop distances matching `NEIGHBOR_OFFSETS`.
const NEIGHBOR_DISTANCES: [f32; 8] = [SQRT_2, 1.0, SQRT_2, 1.0, 1.0, SQRT_2, 1.0, SQRT_2];

/// Accumulated flow plus the source cells that fed it.
#[derive(Debug, Clone)]
pub struct FlowField {
    /// Total mass routed through each cell, unnormalized.
    pub accumulation: ScalarGrid,
    /// Row-major indices of the rim-band source cells.
    pub sources: Vec<usize>,
}

/// Sample the synthesizer at every cell center of a `size`×`size` grid.
///
/// Rows are independent, so this pass parallelizes under the `threading`
/// feature; the result is identical either way.
pub fn sample_heightfield(synth: &HeightSynthesizer, size: usize) -> ScalarGrid {
    let mut grid = ScalarGrid::new(size, 0.0);

    let fill_row = |(row, out): (usize, &mut [f32])| {
        let cy = cell_center(row, size);
        for (col, v) in out.iter_mut().enumerate() {
            *v = synth.height(cell_center(col, size), cy) as f32;
        }
    };

    #[cfg(feature = "threading")]
    grid.data.par_chunks_mut(size).enumerate().for_each(fill_row);
    #[cfg(not(feature = "threading"))]
    grid.data.chunks_mut(size).enumerate().for_each(fill_row);

    grid
}

/// Cells whose radial distance from the origin falls within
/// `SOURCE_BAND` of the crater radius. Empty when the ring lies entirely
/// outside the sampled [-1, 1]² domain.
pub fn select_sources(shape: &ShapeParams, size: usize) -> Vec<usize> {
    let mut sources = Vec::new();
    for row in 0..size {
        let cy = cell_center(row, size);
        for col in 0..size {
            let cx = cell_center(col, size);
            let r = (cx * cx + cy * cy).sqrt();
            if (r - shape.crater_radius).abs() <= SOURCE_BAND {
                sources.push(row * size + col);
            }
        }
    }
    sources
}

/// Steepest strictly-downhill neighbor of `idx`, or `None` for a sink.
/// Slope is drop over hop distance; the first neighbor in raster order
/// wins ties.
fn descent_target(heights: &ScalarGrid, idx: usize) -> Option<usize> {
    let size = heights.size as isize;
    let row = idx as isize / size;
    let col = idx as isize % size;
    let own = heights.data[idx];

    let mut best = None;
    let mut best_slope = 0.0f32;
    for (k, &(dr, dc)) in NEIGHBOR_OFFSETS.iter().enumerate() {
        let nr = row + dr;
        let nc = col + dc;
        if nr < 0 || nr >= size || nc < 0 || nc >= size {
            continue;
        }
        let ni = (nr * size + nc) as usize;
        let slope = (own - heights.data[ni]) / NEIGHBOR_DISTANCES[k];
        if slope > best_slope {
            best_slope = slope;
            best = Some(ni);
        }
    }
    best
}

/// Route unit mass from the source cells downhill across the heightfield.
///
/// Each cell keeps the mass it saw; forwarding adds a copy downstream
/// rather than draining the cell, so the result reads as through-flow.
pub fn accumulate_flow(heights: &ScalarGrid, sources: &[usize]) -> ScalarGrid {
    let size = heights.size;
    let cells = size * size;

    let mut flow = ScalarGrid::new(size, 0.0);
    for &idx in sources {
        flow.data[idx] = 1.0;
    }

    // Stable sort: ties keep raster order, so plateau routing is
    // reproducible run to run.
    let mut order: Vec<usize> = (0..cells).collect();
    order.sort_by(|&a, &b| {
        heights.data[b]
            .partial_cmp(&heights.data[a])
            .unwrap_or(Ordering::Equal)
    });

    for &idx in &order {
        let here = flow.data[idx];
        if here <= 0.0 {
            continue;
        }
        if let Some(target) = descent_target(heights, idx) {
            flow.data[target] += here;
        }
    }

    flow
}

/// Select sources for the given shape and route them over `heights`.
pub fn compute_flow(heights: &ScalarGrid, shape: &ShapeParams) -> FlowField {
    let sources = select_sources(shape, heights.size);
    let accumulation = accumulate_flow(heights, &sources);
    FlowField { accumulation, sources }
}
