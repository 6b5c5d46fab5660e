use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::seed_param;

/// User-facing generation parameters: one seed plus three tuning scalars.
/// Defaults produce a mid-sized cone with a pronounced crater.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolcanoParams {
    /// Any finite real; fully determines one terrain instance.
    pub seed: f64,
    /// Base cone height before the per-seed remap. Default 0.14.
    pub cone_height: f64,
    /// Base crater radius in [-1, 1] domain units. Default 0.22.
    pub crater_radius: f64,
    /// Base crater bowl depth. Default 0.08.
    pub crater_depth: f64,
}

impl Default for VolcanoParams {
    fn default() -> Self {
        Self {
            seed: 0.0,
            cone_height: 0.14,
            crater_radius: 0.22,
            crater_depth: 0.08,
        }
    }
}

/// Rejected generation parameters.
///
/// The pipeline itself never validates: a NaN seed propagates as NaN
/// output. Callers that want up-front rejection (the CLI does) call
/// [`VolcanoParams::validate`] first.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("seed must be finite, got {0}")]
    NonFiniteSeed(f64),
    #[error("{name} must be finite, got {value}")]
    NonFiniteTuning { name: &'static str, value: f64 },
}

impl VolcanoParams {
    /// Check that the seed and every tuning scalar is a finite real.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.seed.is_finite() {
            return Err(ParamsError::NonFiniteSeed(self.seed));
        }
        for (name, value) in [
            ("cone_height", self.cone_height),
            ("crater_radius", self.crater_radius),
            ("crater_depth", self.crater_depth),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NonFiniteTuning { name, value });
            }
        }
        Ok(())
    }
}

/// The 14 per-seed shape scalars, derived once per generation run.
///
/// Each field is an affine remap of `seed_param(seed, index)` with the index
/// given below. The remap table is shared with the terrain shader; index
/// assignments and coefficients must not drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeParams {
    /// 0: cone_height_base × (0.85 + p·0.30)
    pub cone_height: f64,
    /// 1: crater_radius_base × (0.80 + p·0.40)
    pub crater_radius: f64,
    /// 2: crater_depth_base × (0.70 + p·0.60)
    pub crater_depth: f64,
    /// 3: cone_height_base × (0.16 + p·0.12)
    pub rim_height: f64,
    /// 4: 0.045 + p·0.035 (Gaussian sigma of the rim ring)
    pub rim_width: f64,
    /// 5: (p − 0.5) · 0.06
    pub crater_offset_x: f64,
    /// 6: (p − 0.5) · 0.06
    pub crater_offset_y: f64,
    /// 7: 0.85 + p·0.30 (x scale of the crater distance)
    pub ellipticity_x: f64,
    /// 8: 0.85 + p·0.30
    pub ellipticity_y: f64,
    /// 9: (p − 0.5) · 0.10
    pub cone_offset_x: f64,
    /// 10: (p − 0.5) · 0.10
    pub cone_offset_y: f64,
    /// 11: 9.0 + p·6.0 (noise frequency of the gully ridges)
    pub gully_frequency: f64,
    /// 12: p · 64.0 (per-seed noise-space shift)
    pub noise_offset_x: f64,
    /// 13: p · 64.0
    pub noise_offset_y: f64,
}

impl ShapeParams {
    /// Derive the full parameter set from the seed and tuning scalars.
    pub fn derive(params: &VolcanoParams) -> Self {
        let p = |i: usize| seed_param(params.seed, i);
        Self {
            cone_height: params.cone_height * (0.85 + p(0) * 0.30),
            crater_radius: params.crater_radius * (0.80 + p(1) * 0.40),
            crater_depth: params.crater_depth * (0.70 + p(2) * 0.60),
            rim_height: params.cone_height * (0.16 + p(3) * 0.12),
            rim_width: 0.045 + p(4) * 0.035,
            crater_offset_x: (p(5) - 0.5) * 0.06,
            crater_offset_y: (p(6) - 0.5) * 0.06,
            ellipticity_x: 0.85 + p(7) * 0.30,
            ellipticity_y: 0.85 + p(8) * 0.30,
            cone_offset_x: (p(9) - 0.5) * 0.10,
            cone_offset_y: (p(10) - 0.5) * 0.10,
            gully_frequency: 9.0 + p(11) * 6.0,
            noise_offset_x: p(12) * 64.0,
            noise_offset_y: p(13) * 64.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let params = VolcanoParams { seed: 17.5, ..VolcanoParams::default() };
        let a = ShapeParams::derive(&params);
        let b = ShapeParams::derive(&params);
        assert_eq!(a.cone_height, b.cone_height);
        assert_eq!(a.noise_offset_y, b.noise_offset_y);
    }

    #[test]
    fn derived_values_stay_in_remap_ranges() {
        for s in 0..50 {
            let params = VolcanoParams { seed: s as f64 * 3.7 - 80.0, ..VolcanoParams::default() };
            let sp = ShapeParams::derive(&params);
            assert!(sp.cone_height >= 0.14 * 0.85 && sp.cone_height <= 0.14 * 1.15);
            assert!(sp.crater_radius >= 0.22 * 0.80 && sp.crater_radius <= 0.22 * 1.20);
            assert!(sp.crater_depth >= 0.08 * 0.70 && sp.crater_depth <= 0.08 * 1.30);
            assert!(sp.rim_width >= 0.045 && sp.rim_width <= 0.080);
            assert!(sp.crater_offset_x.abs() <= 0.03);
            assert!(sp.cone_offset_y.abs() <= 0.05);
            assert!(sp.ellipticity_x >= 0.85 && sp.ellipticity_x <= 1.15);
            assert!(sp.gully_frequency >= 9.0 && sp.gully_frequency <= 15.0);
            assert!(sp.noise_offset_x >= 0.0 && sp.noise_offset_x < 64.0);
        }
    }

    #[test]
    fn different_seeds_give_different_shapes() {
        let a = ShapeParams::derive(&VolcanoParams { seed: 1.0, ..VolcanoParams::default() });
        let b = ShapeParams::derive(&VolcanoParams { seed: 2.0, ..VolcanoParams::default() });
        assert_ne!(a.cone_height, b.cone_height);
        assert_ne!(a.crater_radius, b.crater_radius);
    }

    #[test]
    fn validate_rejects_non_finite_inputs() {
        let nan_seed = VolcanoParams { seed: f64::NAN, ..VolcanoParams::default() };
        assert!(matches!(nan_seed.validate(), Err(ParamsError::NonFiniteSeed(_))));

        let inf_radius = VolcanoParams { crater_radius: f64::INFINITY, ..VolcanoParams::default() };
        match inf_radius.validate() {
            Err(ParamsError::NonFiniteTuning { name, .. }) => assert_eq!(name, "crater_radius"),
            other => panic!("expected NonFiniteTuning, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(VolcanoParams::default().validate().is_ok());
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = VolcanoParams { seed: -3.25, ..VolcanoParams::default() };
        let text = serde_json::to_string(&params).unwrap();
        let back: VolcanoParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back.seed, params.seed);
        assert_eq!(back.crater_depth, params.crater_depth);
    }
}
