//! Real roots of the cubic compressibility polynomial.

use std::f64::consts::PI;

/// Real roots of `z³ + c2·z² + c1·z + c0 = 0`, sorted ascending.
///
/// Uses the trigonometric form when three real roots exist and Cardano's
/// formula otherwise, then polishes each root with Newton steps.
pub fn real_roots(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let shift = c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2.powi(3) / 27.0 - c2 * c1 / 3.0 + c0;
    let disc = (q / 2.0).powi(2) + (p / 3.0).powi(3);

    let mut roots: Vec<f64> = if p.abs() < 1e-300 {
        vec![(-q).cbrt()]
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        vec![(-q / 2.0 + sq).cbrt() + (-q / 2.0 - sq).cbrt()]
    } else {
        let m = 2.0 * (-p / 3.0).sqrt();
        let arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        (0..3)
            .map(|k| m * (theta - 2.0 * PI * k as f64 / 3.0).cos())
            .collect()
    };

    for t in roots.iter_mut() {
        let mut z = *t - shift;
        for _ in 0..3 {
            let f = ((z + c2) * z + c1) * z + c0;
            let df = (3.0 * z + 2.0 * c2) * z + c1;
            if df.abs() < 1e-300 {
                break;
            }
            z -= f / df;
        }
        *t = z;
    }

    roots.retain(|z| z.is_finite());
    roots.sort_by(|a, b| a.total_cmp(b));
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots(found: &[f64], expected: &[f64]) {
        assert_eq!(found.len(), expected.len(), "roots: {found:?}");
        for (f, e) in found.iter().zip(expected) {
            assert!((f - e).abs() < 1e-10, "{f} vs {e}");
        }
    }

    #[test]
    fn three_distinct_roots() {
        // (z - 1)(z - 2)(z - 3)
        assert_roots(&real_roots(-6.0, 11.0, -6.0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn single_real_root() {
        // (z - 2)(z² + 1)
        assert_roots(&real_roots(-2.0, 1.0, -2.0), &[2.0]);
    }

    #[test]
    fn triple_root() {
        // (z - 0.5)³
        let roots = real_roots(-1.5, 0.75, -0.125);
        assert!(!roots.is_empty());
        for r in roots {
            assert!((r - 0.5).abs() < 1e-4);
        }
    }
}
