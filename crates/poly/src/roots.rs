//! Numeric root finding for real-coefficient polynomials.
//!
//! Degrees 1 and 2 use closed forms. Higher degrees use the Durand–Kerner
//! (Weierstrass) simultaneous iteration, followed by a backward-error check
//! on every root: a root is accepted when `|p(z)|` is small relative to
//! `sum |c_i| |z|^i`. Multiple roots converge only linearly and to roughly
//! half the working precision, which the residual check tolerates.
//!
//! Unit-root factors `1 - x^m` of a lag polynomial have known roots, the
//! `m`-th roots of unity. [`deflate_unit_roots()`] divides them out first so
//! that repeated unit roots never reach the iteration.

use std::f64::consts::TAU;

use num_complex::Complex64;
use tracing::trace;

use crate::error::PolyError;

/// Relative step size below which the iteration is considered converged.
const STEP_TOLERANCE: f64 = 1e-14;

/// Maximum accepted backward error `|p(z)| / sum |c_i| |z|^i`.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Angular offset of the starting points, keeps them off the real axis.
const START_ANGLE: f64 = 0.4;

/// Evaluates `sum coeffs[i] * z^i` with Horner's scheme.
pub fn horner(coeffs: &[f64], z: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
}

/// Finds all finite complex roots of `sum coeffs[i] * x^i`.
///
/// Exactly-zero high-order coefficients are ignored, so the number of roots
/// equals the effective degree. Constant (and zero) polynomials have no
/// reported roots. Roots are returned sorted by real part, then imaginary
/// part; imaginary parts at rounding level are flushed to zero.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PolyError::NonFiniteCoefficients`] | a coefficient is NaN or infinite |
/// | [`PolyError::RootsDidNotConverge`] | iteration fails the residual check |
///
/// # Example
///
/// ```
/// use lagtf_poly::find_roots;
///
/// // x^2 - 1.5x + 0.5 = (x - 1)(x - 0.5)
/// let roots = find_roots(&[0.5, -1.5, 1.0], 100).unwrap();
/// assert_eq!(roots.len(), 2);
/// assert!((roots[0].re - 0.5).abs() < 1e-12);
/// assert!((roots[1].re - 1.0).abs() < 1e-12);
/// ```
pub fn find_roots(coeffs: &[f64], max_iterations: usize) -> Result<Vec<Complex64>, PolyError> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(PolyError::NonFiniteCoefficients);
    }
    let degree = match coeffs.iter().rposition(|&c| c != 0.0) {
        Some(d) if d > 0 => d,
        _ => return Ok(Vec::new()),
    };
    let c = &coeffs[..=degree];

    let mut roots = match degree {
        1 => vec![Complex64::new(-c[0] / c[1], 0.0)],
        2 => quadratic(c[0], c[1], c[2]),
        _ => durand_kerner(c, max_iterations)?,
    };

    for root in &mut roots {
        if root.im.abs() <= 1e-12 * (1.0 + root.re.abs()) {
            root.im = 0.0;
        }
    }
    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    Ok(roots)
}

/// Roots of `c2 x^2 + c1 x + c0` without cancellation in the real case.
fn quadratic(c0: f64, c1: f64, c2: f64) -> Vec<Complex64> {
    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc >= 0.0 {
        let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
        if q == 0.0 {
            return vec![Complex64::new(0.0, 0.0); 2];
        }
        vec![Complex64::new(q / c2, 0.0), Complex64::new(c0 / q, 0.0)]
    } else {
        let re = -c1 / (2.0 * c2);
        let im = (-disc).sqrt() / (2.0 * c2);
        vec![Complex64::new(re, im), Complex64::new(re, -im)]
    }
}

/// Divides factors `1 - L^m` out of an ascending lag polynomial.
///
/// A factor is removed when the division leaves a residual of at most
/// `tolerance` times the largest coefficient. Larger periods are tried
/// first. Returns the quotient and the period of every removed factor, in
/// removal order.
///
/// # Example
///
/// ```
/// use lagtf_poly::roots::deflate_unit_roots;
///
/// // (1 - L)(1 - L^4)(1 - 0.5L)
/// let p = [1.0, -1.5, 0.5, 0.0, -1.0, 1.5, -0.5];
/// let (rest, periods) = deflate_unit_roots(&p, 1e-10);
/// assert_eq!(periods, vec![4, 1]);
/// assert_eq!(rest, vec![1.0, -0.5]);
/// ```
pub fn deflate_unit_roots(coeffs: &[f64], tolerance: f64) -> (Vec<f64>, Vec<usize>) {
    let mut rest = coeffs.to_vec();
    while rest.last() == Some(&0.0) {
        rest.pop();
    }
    let mut periods = Vec::new();
    if rest.iter().all(|&c| c == 0.0) || rest.iter().any(|c| !c.is_finite()) {
        return (rest, periods);
    }

    // A factor with a larger period would also have divided the earlier,
    // longer polynomial, so the search never has to go back up.
    let mut m = rest.len() - 1;
    while m >= 1 {
        match divide_unit_factor(&rest, m, tolerance) {
            Some(quotient) => {
                periods.push(m);
                rest = quotient;
                m = m.min(rest.len() - 1);
            }
            None => m -= 1,
        }
    }
    (rest, periods)
}

/// `p / (1 - L^m)` when the division is exact to `tolerance`.
fn divide_unit_factor(p: &[f64], m: usize, tolerance: f64) -> Option<Vec<f64>> {
    let n = p.len() - 1;
    if m > n {
        return None;
    }
    let mut q: Vec<f64> = Vec::with_capacity(n - m + 1);
    for j in 0..=n - m {
        let carry = if j >= m { q[j - m] } else { 0.0 };
        q.push(p[j] + carry);
    }
    let scale = p.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let exact = p.iter().enumerate().all(|(j, &pj)| {
        let own = q.get(j).copied().unwrap_or(0.0);
        let shifted = j.checked_sub(m).and_then(|k| q.get(k)).copied().unwrap_or(0.0);
        (pj - (own - shifted)).abs() <= tolerance * scale
    });
    exact.then_some(q)
}

/// The `m` roots of `z^m = 1`, starting at `1` and going counterclockwise.
///
/// Components at rounding level are flushed to zero, so `1`, `-1` and `±i`
/// come out exact.
pub fn roots_of_unity(m: usize) -> Vec<Complex64> {
    let flush = |v: f64| if v.abs() < 1e-15 { 0.0 } else { v };
    (0..m)
        .map(|k| {
            let r = Complex64::from_polar(1.0, TAU * k as f64 / m as f64);
            Complex64::new(flush(r.re), flush(r.im))
        })
        .collect()
}

fn durand_kerner(c: &[f64], max_iterations: usize) -> Result<Vec<Complex64>, PolyError> {
    let n = c.len() - 1;
    let lead = c[n];
    let monic: Vec<f64> = c.iter().map(|v| v / lead).collect();

    // Start on a circle whose radius is the geometric mean of the roots.
    let radius = match monic[0].abs() {
        r if r > 0.0 => r.powf(1.0 / n as f64),
        _ => 1.0,
    };
    let mut z: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, TAU * k as f64 / n as f64 + START_ANGLE))
        .collect();

    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        let mut max_step = 0.0_f64;
        for k in 0..n {
            let zk = z[k];
            let mut denom = Complex64::new(1.0, 0.0);
            for (j, zj) in z.iter().enumerate() {
                if j != k {
                    denom *= zk - zj;
                }
            }
            if denom.norm() == 0.0 {
                denom = Complex64::new(f64::EPSILON, 0.0);
            }
            let step = horner(&monic, zk) / denom;
            z[k] = zk - step;
            max_step = max_step.max(step.norm() / (1.0 + zk.norm()));
        }
        if !max_step.is_finite() {
            return Err(PolyError::RootsDidNotConverge { iterations });
        }
        if max_step <= STEP_TOLERANCE {
            break;
        }
    }

    for root in &z {
        let scale = monic
            .iter()
            .rev()
            .fold(0.0, |acc, v| acc * root.norm() + v.abs());
        let residual = horner(&monic, *root).norm();
        if !residual.is_finite() || residual > RESIDUAL_TOLERANCE * scale {
            return Err(PolyError::RootsDidNotConverge { iterations });
        }
    }
    trace!(degree = n, iterations, "durand-kerner converged");
    Ok(z)
}
