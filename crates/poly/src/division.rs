//! Division, power-series expansion and greatest common divisors.
//!
//! Coefficients may be symbolic, so division is only possible when the
//! pivot coefficient is a non-zero number. Long division pivots on the
//! leading coefficient; power-series division pivots on the constant term.
//! The GCD mixes both, step by step.

use crate::error::PolyError;
use crate::expr::Expr;
use crate::poly::LagPolynomial;

/// Returns the numeric value of `pivot` if it can be divided by.
fn invertible(pivot: &Expr, tol: f64) -> Result<f64, PolyError> {
    match pivot.as_constant() {
        Some(value) if value.abs() > tol => Ok(value),
        _ => Err(PolyError::NonInvertiblePivot {
            pivot: pivot.to_string(),
        }),
    }
}

impl LagPolynomial {
    /// Long division `self = q * divisor + r` with `deg r < deg divisor`.
    ///
    /// Terms of the remainder within `tol` of zero are dropped.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PolyError::DivisionByZero`] | `divisor` is the zero polynomial |
    /// | [`PolyError::NonInvertiblePivot`] | leading coefficient of `divisor` is symbolic or ~0 |
    pub fn div_rem(
        &self,
        divisor: &LagPolynomial,
        tol: f64,
    ) -> Result<(LagPolynomial, LagPolynomial), PolyError> {
        let lead = divisor.leading().ok_or(PolyError::DivisionByZero)?;
        let pivot = invertible(lead, tol)?;
        let n = divisor.degree();
        if self.is_zero() || self.degree() < n {
            return Ok((LagPolynomial::zero(), self.clone()));
        }

        let mut rem: Vec<Expr> = self.coeffs().to_vec();
        let mut quot = vec![Expr::zero(); self.degree() - n + 1];
        for k in (0..quot.len()).rev() {
            let q = rem[k + n].div_scalar(pivot);
            if !q.is_zero() {
                for (i, d) in divisor.coeffs().iter().enumerate().take(n) {
                    rem[k + i] = &rem[k + i] - &(&q * d);
                }
            }
            rem[k + n] = Expr::zero();
            quot[k] = q;
        }
        rem.truncate(n);
        Ok((
            LagPolynomial::new(quot),
            LagPolynomial::new(rem).chop(tol),
        ))
    }

    /// First `n_terms` coefficients of the power series `self / divisor`
    /// about `L = 0`.
    ///
    /// Uses the recurrence
    /// `h_j = (a_j - sum_{i=1}^{min(j,k)} d_i h_{j-i}) / d_0`.
    /// When `max_terms` is set, any coefficient growing past that many
    /// symbolic terms aborts the expansion.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PolyError::DivisionByZero`] | `divisor` is the zero polynomial |
    /// | [`PolyError::NonInvertiblePivot`] | `d_0` is symbolic or zero |
    /// | [`PolyError::ExpressionTooLarge`] | a coefficient exceeds `max_terms` |
    pub fn series(
        &self,
        divisor: &LagPolynomial,
        n_terms: usize,
        max_terms: Option<usize>,
    ) -> Result<Vec<Expr>, PolyError> {
        if divisor.is_zero() {
            return Err(PolyError::DivisionByZero);
        }
        let d0 = invertible(&divisor.coeff(0), 0.0)?;
        let k = divisor.degree();

        let mut h: Vec<Expr> = Vec::new();
        for j in 0..n_terms {
            let mut acc = self.coeff(j);
            for i in 1..=j.min(k) {
                let d = &divisor.coeffs()[i];
                if d.is_zero() || h[j - i].is_zero() {
                    continue;
                }
                acc = &acc - &(d * &h[j - i]);
            }
            let hj = if d0 == 1.0 { acc } else { acc.div_scalar(d0) };
            if let Some(limit) = max_terms {
                if hj.term_count() > limit {
                    return Err(PolyError::ExpressionTooLarge {
                        terms: hj.term_count(),
                        limit,
                    });
                }
            }
            h.push(hj);
        }
        Ok(h)
    }

    /// Exact division `self / divisor`, verified to leave no remainder.
    ///
    /// Pivots on the leading coefficient when it is numeric, otherwise on the
    /// constant term.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::InexactDivision`] if a non-negligible remainder
    /// is left, or the pivot errors of [`LagPolynomial::div_rem()`] /
    /// [`LagPolynomial::series()`] when neither end can pivot.
    pub fn div_exact(
        &self,
        divisor: &LagPolynomial,
        tol: f64,
    ) -> Result<LagPolynomial, PolyError> {
        if divisor.is_zero() {
            return Err(PolyError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(LagPolynomial::zero());
        }
        if self.degree() < divisor.degree() {
            return Err(PolyError::InexactDivision {
                degree: self.degree(),
            });
        }

        let quotient = match self.div_rem(divisor, tol) {
            Ok((q, _)) => q,
            Err(PolyError::NonInvertiblePivot { .. }) => {
                let n = self.degree() - divisor.degree() + 1;
                LagPolynomial::new(self.series(divisor, n, None)?)
            }
            Err(e) => return Err(e),
        };

        let leftover = (self - &(&quotient * divisor)).chop(tol);
        if leftover.is_zero() {
            Ok(quotient)
        } else {
            Err(PolyError::InexactDivision {
                degree: leftover.degree(),
            })
        }
    }
}

/// Greatest common divisor of two lag polynomials.
///
/// Runs the Euclidean algorithm with every remainder rescaled to unit
/// maximum coefficient, so `tolerance` is relative. A non-zero remainder of
/// degree 0 (numeric or symbolic) ends the algorithm with a trivial GCD.
///
/// Each step divides on the leading coefficient when it is a number. When it
/// is not, the step is done on the reversed polynomials instead, which needs
/// a numeric non-zero constant term and only discards factors of `L`.
///
/// The result is normalized to constant term 1 when that term is numeric,
/// otherwise to a monic leading term when that one is numeric.
///
/// # Errors
///
/// Returns [`PolyError::NonInvertiblePivot`] when a step can pivot on
/// neither end.
///
/// # Example
///
/// ```
/// use lagtf_poly::{LagPolynomial, gcd};
///
/// let common = LagPolynomial::from_numeric(&[1.0, -0.5]);
/// let a = &common * &LagPolynomial::from_numeric(&[1.0, 0.3]);
/// let b = &common * &LagPolynomial::from_numeric(&[1.0, -1.0]);
/// let g = gcd(&a, &b, 1e-9).unwrap();
/// let c = g.numeric_coeffs().unwrap();
/// assert!((c[0] - 1.0).abs() < 1e-12 && (c[1] + 0.5).abs() < 1e-9);
/// ```
pub fn gcd(
    a: &LagPolynomial,
    b: &LagPolynomial,
    tolerance: f64,
) -> Result<LagPolynomial, PolyError> {
    let (mut r0, mut r1) = (unit_scaled(a), unit_scaled(b));
    loop {
        if r0.degree() < r1.degree() {
            std::mem::swap(&mut r0, &mut r1);
        }
        if r1.is_negligible(tolerance) {
            return Ok(normalize(&r0));
        }
        if r1.degree() == 0 {
            return Ok(LagPolynomial::one());
        }
        let r = remainder(&r0, &r1, tolerance)?;
        r0 = r1;
        r1 = unit_scaled(&r);
    }
}

/// Remainder of one Euclidean step, up to factors of `L`.
fn remainder(
    r0: &LagPolynomial,
    r1: &LagPolynomial,
    tol: f64,
) -> Result<LagPolynomial, PolyError> {
    match r0.div_rem(r1, tol) {
        Ok((_, r)) => Ok(r),
        Err(PolyError::NonInvertiblePivot { pivot }) => {
            let constant = r1.coeff(0);
            if invertible(&constant, tol).is_err() {
                return Err(PolyError::NonInvertiblePivot { pivot });
            }
            let (_, r) = r0.reversed().div_rem(&r1.reversed(), tol)?;
            Ok(r.reversed())
        }
        Err(e) => Err(e),
    }
}

fn unit_scaled(p: &LagPolynomial) -> LagPolynomial {
    match p.max_abs_coefficient() {
        m if m > 0.0 => p.div_scalar(m),
        _ => p.clone(),
    }
}

fn normalize(g: &LagPolynomial) -> LagPolynomial {
    if g.degree() == 0 {
        return LagPolynomial::one();
    }
    if let Some(c0) = g.coeff(0).as_constant().filter(|c| *c != 0.0) {
        return g.div_scalar(c0);
    }
    match g.leading().and_then(Expr::as_constant) {
        Some(lead) if lead != 0.0 => g.div_scalar(lead),
        _ => g.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn num(c: &[f64]) -> LagPolynomial {
        LagPolynomial::from_numeric(c)
    }

    fn phi() -> Expr {
        Expr::unknown("phi_1")
    }

    #[test]
    fn div_rem_numeric() {
        // (1 - 1.5L + 0.5L^2) / (1 - L) = 1 - 0.5L, remainder 0
        let (q, r) = num(&[1.0, -1.5, 0.5]).div_rem(&num(&[1.0, -1.0]), 1e-12).unwrap();
        let qc = q.numeric_coeffs().unwrap();
        assert_abs_diff_eq!(qc[0], 1.0);
        assert_abs_diff_eq!(qc[1], -0.5);
        assert!(r.is_zero());
    }

    #[test]
    fn div_rem_with_remainder() {
        // (1 + L^2) / (1 + L) = (L - 1) remainder 2
        let (q, r) = num(&[1.0, 0.0, 1.0]).div_rem(&num(&[1.0, 1.0]), 1e-12).unwrap();
        assert_eq!(q.numeric_coeffs().unwrap(), vec![-1.0, 1.0]);
        assert_eq!(r.numeric_coeffs().unwrap(), vec![2.0]);
    }

    #[test]
    fn div_rem_symbolic_pivot_fails() {
        let divisor = LagPolynomial::new(vec![Expr::one(), -phi()]);
        let err = num(&[1.0, 0.0, 1.0]).div_rem(&divisor, 1e-12).unwrap_err();
        assert!(matches!(err, PolyError::NonInvertiblePivot { .. }));
        let err = num(&[1.0]).div_rem(&LagPolynomial::zero(), 1e-12).unwrap_err();
        assert_eq!(err, PolyError::DivisionByZero);
    }

    #[test]
    fn series_of_ar1() {
        // 1 / (1 - 0.5L) = sum 0.5^j L^j
        let h = LagPolynomial::one().series(&num(&[1.0, -0.5]), 5, None).unwrap();
        for (j, hj) in h.iter().enumerate() {
            assert_abs_diff_eq!(hj.as_constant().unwrap(), 0.5_f64.powi(j as i32));
        }
    }

    #[test]
    fn series_stays_symbolic() {
        let den = LagPolynomial::new(vec![Expr::one(), -phi()]);
        let h = LagPolynomial::one().series(&den, 3, None).unwrap();
        assert_eq!(h[1].to_string(), "phi_1");
        assert_eq!(h[2].to_string(), "phi_1^2");
    }

    #[test]
    fn series_term_limit() {
        let den = LagPolynomial::new(vec![
            Expr::one(),
            -Expr::unknown("a"),
            -Expr::unknown("b"),
        ]);
        let err = LagPolynomial::one().series(&den, 30, Some(5)).unwrap_err();
        assert!(matches!(err, PolyError::ExpressionTooLarge { limit: 5, .. }));
    }

    #[test]
    fn series_rejects_symbolic_constant_term() {
        let den = LagPolynomial::new(vec![phi(), Expr::one()]);
        let err = LagPolynomial::one().series(&den, 3, None).unwrap_err();
        assert!(matches!(err, PolyError::NonInvertiblePivot { .. }));
    }

    #[test]
    fn div_exact_falls_back_to_constant_pivot() {
        let factor = LagPolynomial::new(vec![Expr::one(), -phi()]);
        let other = num(&[1.0, 0.3]);
        let product = &factor * &other;
        let q = product.div_exact(&factor, 1e-12).unwrap();
        let qc = q.numeric_coeffs().unwrap();
        assert_abs_diff_eq!(qc[0], 1.0);
        assert_abs_diff_eq!(qc[1], 0.3);
    }

    #[test]
    fn div_exact_detects_remainder() {
        let err = num(&[1.0, 0.0, 1.0]).div_exact(&num(&[1.0, 1.0]), 1e-12).unwrap_err();
        assert!(matches!(err, PolyError::InexactDivision { degree: 0 }));
    }

    #[test]
    fn gcd_coprime_is_one() {
        let g = gcd(&num(&[1.0, 0.2]), &num(&[1.0, -0.5]), 1e-9).unwrap();
        assert!(g.is_one());
    }

    #[test]
    fn gcd_numeric_common_factor() {
        let common = num(&[1.0, -0.5]);
        let a = &common * &num(&[1.0, 0.3]);
        let b = &(&common * &num(&[1.0, -1.0])) * &num(&[1.0, 0.0, 0.25]);
        let g = gcd(&a, &b, 1e-9).unwrap();
        let c = g.numeric_coeffs().unwrap();
        assert_eq!(c.len(), 2);
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[1], -0.5, epsilon = 1e-9);
    }

    #[test]
    fn gcd_symbolic_common_factor_needs_reversed_step() {
        let factor = LagPolynomial::new(vec![Expr::one(), -phi()]);
        let a = factor.clone();
        let b = &factor * &num(&[1.0, -1.0]);
        let g = gcd(&a, &b, 1e-9).unwrap();
        assert_eq!(g, factor);
    }

    #[test]
    fn gcd_symbolic_coprime() {
        let ma = LagPolynomial::new(vec![Expr::one(), Expr::unknown("theta_1")]);
        let ar = LagPolynomial::new(vec![Expr::one(), -phi()]);
        let g = gcd(&ma, &ar, 1e-9).unwrap();
        assert!(g.is_one());
    }

    #[test]
    fn gcd_with_zero_returns_other() {
        let p = num(&[2.0, -1.0]);
        let g = gcd(&LagPolynomial::zero(), &p, 1e-9).unwrap();
        assert_eq!(g.numeric_coeffs().unwrap(), vec![1.0, -0.5]);
    }
}
