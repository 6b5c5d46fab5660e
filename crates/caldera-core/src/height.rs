//! Layered volcanic height synthesis.
//!
//! `HeightSynthesizer` mirrors, layer for layer, the elevation function the
//! terrain shader evaluates per vertex: domain warp, radial shape warp,
//! cone, apron skirt, crater rim, crater bowl, gully ridges, and fine
//! roughness. The two evaluators never call each other; they agree because
//! they share every constant below. Changing any coefficient here without
//! the matching shader edit shifts the flow map off the rendered terrain.
//!
//! All shape layers are functions of warped radial *distances*, never of
//! angle, so the field has no angular seam.

use crate::noise::noise2;
use crate::params::{ShapeParams, VolcanoParams};

// ── Layer constants (shared with the shader) ─────────────────────────────────

/// Domain warp: noise frequency, displacement strength, and the radius over
/// which the warp fades in from zero at the origin. An unfaded warp would
/// displace the apex itself, which reads as a rotational glitch dead center.
const WARP_FREQ: f64 = 3.1;
const WARP_STRENGTH: f64 = 0.10;
const WARP_FADE_RADIUS: f64 = 0.18;

/// Shape warp: perturbs radial distances to break perfect circularity.
const SHAPE_FREQ: f64 = 2.7;
const SHAPE_STRENGTH: f64 = 0.16;

/// Apron: Gaussian skirt around the cone base.
const APRON_SIGMA: f64 = 0.55;
const APRON_HEIGHT: f64 = 0.04;
const APRON_FREQ: f64 = 3.6;

/// Rim ring noise frequency and the cone-distance window beyond which the
/// rim fades out entirely.
const RIM_FREQ: f64 = 5.3;
const RIM_FADE_IN: f64 = 0.42;
const RIM_FADE_OUT: f64 = 0.62;

/// Gully carving depth; the band location follows the crater radius.
const GULLY_DEPTH: f64 = 0.05;

/// Fine roughness: base frequency (second octave at 2.3×) and amplitude.
const ROUGH_FREQ: f64 = 16.0;
const ROUGH_AMP: f64 = 0.011;

/// GLSL-style cubic smoothstep on [e0, e1].
#[inline]
fn smoothstep(e0: f64, e1: f64, x: f64) -> f64 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Per-seed elevation evaluator over the continuous [-1, 1]² domain.
///
/// Shape parameters are derived once at construction and reused for every
/// `height` call; they never change during a generation run.
#[derive(Debug, Clone)]
pub struct HeightSynthesizer {
    shape: ShapeParams,
}

impl HeightSynthesizer {
    pub fn new(params: &VolcanoParams) -> Self {
        Self { shape: ShapeParams::derive(params) }
    }

    pub fn shape(&self) -> &ShapeParams {
        &self.shape
    }

    /// Elevation at the continuous coordinate `(cx, cy)`.
    pub fn height(&self, cx: f64, cy: f64) -> f64 {
        let sp = &self.shape;
        let ox = sp.noise_offset_x;
        let oy = sp.noise_offset_y;

        // Domain warp, faded to zero near the origin. The literal offsets
        // decorrelate the x and y warp channels.
        let r0 = (cx * cx + cy * cy).sqrt();
        let fade = smoothstep(0.0, WARP_FADE_RADIUS, r0);
        let wx = noise2(cx * WARP_FREQ + ox, cy * WARP_FREQ + oy);
        let wy = noise2(cx * WARP_FREQ + ox + 17.3, cy * WARP_FREQ + oy + 9.1);
        let px = cx + wx * WARP_STRENGTH * fade;
        let py = cy + wy * WARP_STRENGTH * fade;

        // Shape warp: one blended value that scales the radial distances.
        let s1 = noise2(px * SHAPE_FREQ + ox + 31.7, py * SHAPE_FREQ + oy + 47.2);
        let s2 = noise2(px * SHAPE_FREQ * 2.0 + ox + 11.9, py * SHAPE_FREQ * 2.0 + oy + 23.4);
        let shape_n = s1 * 0.7 + s2 * 0.3;

        // Cone distance: offset apex, distance-warped.
        let dcx = px - sp.cone_offset_x;
        let dcy = py - sp.cone_offset_y;
        let d_cone = (dcx * dcx + dcy * dcy).sqrt() * (1.0 + shape_n * SHAPE_STRENGTH);

        // Crater distance: elliptical and offset, warped at half strength.
        let ecx = (px - sp.crater_offset_x) * sp.ellipticity_x;
        let ecy = (py - sp.crater_offset_y) * sp.ellipticity_y;
        let d_crater = (ecx * ecx + ecy * ecy).sqrt() * (1.0 + shape_n * SHAPE_STRENGTH * 0.5);

        // Cone body.
        let cone = (1.0 - d_cone).max(0.0).powf(1.4) * sp.cone_height;

        // Apron: low Gaussian skirt with a noise lumpiness factor in [0.6, 1].
        let lump = 0.5 + 0.5 * noise2(px * APRON_FREQ + ox + 5.8, py * APRON_FREQ + oy + 13.6);
        let apron_arg = d_cone / APRON_SIGMA;
        let apron = (-(apron_arg * apron_arg)).exp() * APRON_HEIGHT * (0.6 + 0.4 * lump);

        // Crater rim: Gaussian ring in crater distance, noise-modulated,
        // faded out past the cone's mid flank.
        let ring_arg = (d_crater - sp.crater_radius) / sp.rim_width;
        let ring = (-(ring_arg * ring_arg)).exp();
        let rim_noise = 0.75 + 0.25 * noise2(px * RIM_FREQ + ox + 41.3, py * RIM_FREQ + oy + 7.7);
        let rim_fade = 1.0 - smoothstep(RIM_FADE_IN, RIM_FADE_OUT, d_cone);
        let rim = ring * sp.rim_height * rim_noise * rim_fade;

        // Crater bowl: squared smooth falloff from rim to center.
        let bowl_t = 1.0 - smoothstep(0.0, sp.crater_radius, d_crater);
        let bowl = bowl_t * bowl_t * sp.crater_depth;

        // Gully ridges: squared ridged noise carved inside an annular band
        // that opens just outside the rim and closes at the cone base.
        let gf = sp.gully_frequency;
        let g1 = noise2(px * gf + ox + 3.1, py * gf + oy + 71.7);
        let g2 = noise2(px * gf * 2.0 + ox + 19.3, py * gf * 2.0 + oy + 37.9);
        let ridge = 1.0 - (g1 * 0.65 + g2 * 0.35).abs();
        let band = smoothstep(sp.crater_radius + 0.04, sp.crater_radius + 0.12, d_cone)
            * (1.0 - smoothstep(0.72, 0.95, d_cone));
        let gullies = ridge * ridge * GULLY_DEPTH * band;

        // Fine roughness, suppressed toward the crater center.
        let f1 = noise2(px * ROUGH_FREQ + ox + 53.1, py * ROUGH_FREQ + oy + 67.9);
        let f2 = noise2(px * ROUGH_FREQ * 2.3 + ox + 89.7, py * ROUGH_FREQ * 2.3 + oy + 29.3);
        let rough_fade = smoothstep(sp.crater_radius * 0.4, sp.crater_radius * 1.3, d_crater);
        let rough = (f1 * 0.7 + f2 * 0.3) * ROUGH_AMP * rough_fade;

        cone + apron + rim - bowl - gullies + rough
    }
}
