//! Real roots of monic cubic polynomials.

use std::f64::consts::PI;

/// Returns the real roots of `z³ + c2·z² + c1·z + c0`, sorted ascending.
///
/// Three roots are returned when the discriminant allows it, otherwise one.
/// Repeated roots are reported once per multiplicity the trigonometric form
/// produces, so a triple root may appear as three nearly equal values.
pub(super) fn real_roots(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let q = (c2 * c2 - 3.0 * c1) / 9.0;
    let r = (2.0 * c2 * c2 * c2 - 9.0 * c2 * c1 + 27.0 * c0) / 54.0;
    let shift = c2 / 3.0;

    let mut roots = if r * r < q * q * q {
        let sqrt_q = q.sqrt();
        let theta = (r / (q * sqrt_q)).clamp(-1.0, 1.0).acos();
        vec![
            -2.0 * sqrt_q * (theta / 3.0).cos() - shift,
            -2.0 * sqrt_q * ((theta + 2.0 * PI) / 3.0).cos() - shift,
            -2.0 * sqrt_q * ((theta - 2.0 * PI) / 3.0).cos() - shift,
        ]
    } else {
        let a = -r.signum() * (r.abs() + (r * r - q * q * q).sqrt()).cbrt();
        let b = if a == 0.0 { 0.0 } else { q / a };
        vec![a + b - shift]
    };

    for z in &mut roots {
        *z = polish(*z, c2, c1, c0);
    }
    roots.sort_by(f64::total_cmp);
    roots
}

/// Applies a few Newton steps to tighten a root.
fn polish(mut z: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    for _ in 0..3 {
        let f = ((z + c2) * z + c1) * z + c0;
        let df = (3.0 * z + 2.0 * c2) * z + c1;
        if df == 0.0 {
            break;
        }
        let step = f / df;
        if !step.is_finite() {
            break;
        }
        z -= step;
    }
    z
}
