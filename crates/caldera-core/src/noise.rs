//! 2D gradient noise on the simplex lattice.
//!
//! This is the permutation-polynomial simplex variant evaluated by the
//! terrain shader: gradients are hashed arithmetically with
//! `permute(x) = ((x*34 + 1) * x) mod 289`, so there are no lookup tables
//! and no process-wide state. The skew/unskew constants, the corner falloff
//! `(0.5 - d²)⁴`, the folded gradient construction, and the final 130×
//! scale all have to track the shader's source; only last-bit rounding may
//! differ between the two evaluators.
//!
//! Output is deterministic, continuous, and stays within roughly [-1, 1].

/// (3 - √3) / 6: unskew factor from simplex space.
const C_X: f64 = 0.211324865405187;
/// (√3 - 1) / 2: skew factor into simplex space.
const C_Y: f64 = 0.366025403784439;
/// -1 + 2 · C_X: offset of the far simplex corner.
const C_Z: f64 = -0.577350269189626;
/// 1 / 41: gradient hash divisor.
const C_W: f64 = 0.024390243902439;

/// Floored fractional part (GLSL `fract` semantics).
#[inline]
fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Gradient hash: `((x*34 + 1) * x) mod 289` with floored modulo.
/// Inputs are integers below ~580, so every step is exact in f64.
#[inline]
fn permute(x: f64) -> f64 {
    ((x * 34.0 + 1.0) * x).rem_euclid(289.0)
}

/// One corner's contribution: falloff kernel times the hashed gradient
/// dotted with the corner offset.
#[inline]
fn corner(p: f64, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        return 0.0;
    }
    let mut m = t * t;
    m *= m;
    // Gradient from the hash: gx in [-1, 1), gy folded from it.
    let gx = 2.0 * fract(p * C_W) - 1.0;
    let h = gx.abs() - 0.5;
    let ox = (gx + 0.5).floor();
    let a0 = gx - ox;
    // Taylor inverse-sqrt normalization of the pseudo-gradient.
    m *= 1.79284291400159 - 0.85373472095314 * (a0 * a0 + h * h);
    m * (a0 * x + h * y)
}

/// Evaluate the noise at `(x, y)`.
pub fn noise2(x: f64, y: f64) -> f64 {
    // Skew into simplex cell space and find the cell origin.
    let s = (x + y) * C_Y;
    let i = (x + s).floor();
    let j = (y + s).floor();

    // Unskewed offset from the cell origin.
    let t = (i + j) * C_X;
    let x0 = x - i + t;
    let y0 = y - j + t;

    // Which of the two triangles contains the point.
    let (i1, j1) = if x0 > y0 { (1.0, 0.0) } else { (0.0, 1.0) };

    // Offsets from the middle and far corners.
    let x1 = x0 + C_X - i1;
    let y1 = y0 + C_X - j1;
    let x2 = x0 + C_Z;
    let y2 = y0 + C_Z;

    // Hash the three corners; lattice coords wrap at 289.
    let iw = i.rem_euclid(289.0);
    let jw = j.rem_euclid(289.0);
    let p0 = permute(permute(jw) + iw);
    let p1 = permute(permute(jw + j1) + iw + i1);
    let p2 = permute(permute(jw + 1.0) + iw + 1.0);

    130.0 * (corner(p0, x0, y0) + corner(p1, x1, y1) + corner(p2, x2, y2))
}
