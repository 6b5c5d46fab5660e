//! Diagnostic visualizer: writes four PNG debug images to data/debug/.
//! Not part of the main pipeline; no tests, no clippy target.

use std::fs;
use std::path::Path;

use caldera_core::generator::{FlowMapGenerator, GRID_SIZE};
use caldera_core::params::VolcanoParams;

const N: usize = GRID_SIZE;

// ── Colour helpers ────────────────────────────────────────────────────────────

/// Elevation → grayscale, normalized over the sampled range.
fn shade(v: f32, min_z: f32, z_range: f32) -> [u8; 3] {
    let c = (((v - min_z) / z_range).clamp(0.0, 1.0) * 255.0) as u8;
    [c, c, c]
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let params = VolcanoParams::default();

    println!("Generating flow map ({N}×{N}, seed {})…", params.seed);
    let result = FlowMapGenerator::new().generate(&params);

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).expect("cannot create data/debug/");

    let min_z = result.heights.min_value();
    let z_range = (result.heights.max_value() - min_z).max(1e-6);

    // ── 1. heightfield.png ───────────────────────────────────────────────────
    {
        let mut img = image::RgbImage::new(N as u32, N as u32);
        for r in 0..N {
            for c in 0..N {
                let [rv, gv, bv] = shade(result.heights.get(r, c), min_z, z_range);
                img.put_pixel(c as u32, r as u32, image::Rgb([rv, gv, bv]));
            }
        }
        let path = out_dir.join("heightfield.png");
        img.save(&path).expect("failed to save heightfield.png");
        println!("Wrote {}", path.display());
    }

    // ── 2. sources.png (rim band in red over shaded relief) ─────────────────
    {
        let mut img = image::RgbImage::new(N as u32, N as u32);
        for r in 0..N {
            for c in 0..N {
                let [rv, gv, bv] = shade(result.heights.get(r, c), min_z, z_range);
                img.put_pixel(c as u32, r as u32, image::Rgb([rv, gv, bv]));
            }
        }
        for &idx in &result.flow.sources {
            let (r, c) = (idx / N, idx % N);
            img.put_pixel(c as u32, r as u32, image::Rgb([220, 30, 30]));
        }
        let path = out_dir.join("sources.png");
        img.save(&path).expect("failed to save sources.png");
        println!("Wrote {}", path.display());
    }

    // ── 3. flow_accumulation.png (log-blue) ──────────────────────────────────
    {
        // log(1 + accum) normalised to [0, 1]: white background, blue where
        // flow concentrates.
        let max_log = result
            .flow
            .accumulation
            .data
            .iter()
            .map(|&a| (1.0 + a as f64).ln())
            .fold(0.0f64, f64::max)
            .max(1.0);
        let mut img = image::RgbImage::new(N as u32, N as u32);
        for r in 0..N {
            for c in 0..N {
                let a = result.flow.accumulation.get(r, c) as f64;
                let t = ((1.0 + a).ln() / max_log).clamp(0.0, 1.0) as f32;
                let b = (255.0 - 75.0 * t) as u8;
                let lo = (255.0 * (1.0 - t)) as u8;
                img.put_pixel(c as u32, r as u32, image::Rgb([lo, lo, b]));
            }
        }
        let path = out_dir.join("flow_accumulation.png");
        img.save(&path).expect("failed to save flow_accumulation.png");
        println!("Wrote {}", path.display());
    }

    // ── 4. flow_map.png (final texture, straight from the pixel buffer) ─────
    {
        let img = image::RgbaImage::from_raw(N as u32, N as u32, result.image.pixels.clone())
            .expect("pixel buffer size mismatch");
        let path = out_dir.join("flow_map.png");
        img.save(&path).expect("failed to save flow_map.png");
        println!("Wrote {}", path.display());
    }

    println!(
        "Done. {} source cells, raw flow max {:.1}.",
        result.flow.sources.len(),
        result.flow.accumulation.max_value()
    );
}
