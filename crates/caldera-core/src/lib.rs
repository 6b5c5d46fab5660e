//! Procedural volcanic flow-map generation: seed → layered heightfield →
//! rim-sourced D8 flow accumulation → 64×64 grayscale RGBA texture.
//!
//! The heightfield math mirrors the terrain shader constant for constant;
//! see `height` for the parity rules.

pub mod flow;
pub mod generator;
pub mod grid;
pub mod hash;
pub mod height;
pub mod noise;
pub mod params;
pub mod post;

pub use flow::{accumulate_flow, compute_flow, sample_heightfield, select_sources, FlowField};
pub use generator::{FlowMapGenerator, FlowMapResult, GRID_SIZE};
pub use grid::{cell_center, ScalarGrid};
pub use hash::{hash01, seed_param};
pub use height::HeightSynthesizer;
pub use noise::noise2;
pub use params::{ParamsError, ShapeParams, VolcanoParams};
pub use post::{normalize_max, postprocess, quantize_rgba, smooth_pass, FlowMapImage};
