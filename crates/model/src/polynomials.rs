//! Lag polynomials of a model's components.
//!
//! | Component | Polynomial |
//! |-----------|------------|
//! | AR | `1 - sum ar_i L^i` |
//! | MA | `1 + sum ma_i L^i` |
//! | differencing | `(1 - L)^d` |
//! | seasonal AR | `1 - sum sar_i L^(i m)` |
//! | seasonal MA | `1 + sum sma_i L^(i m)` |
//! | seasonal differencing | `(1 - L^m)^D` |
//!
//! Every zero order yields the identity polynomial `1`. Seasonal builders
//! expect a positive period `m`, which model validation guarantees.

use lagtf_poly::{Expr, LagPolynomial};

use crate::coefficient::Coefficient;
use crate::model::Model;

/// `1 + sign * sum params_i L^(i * stride)` for 1-based `i`.
fn lag_sum(params: &[Coefficient], stride: usize, sign: f64) -> LagPolynomial {
    let mut coeffs = vec![Expr::zero(); params.len() * stride + 1];
    coeffs[0] = Expr::one();
    for (idx, param) in params.iter().enumerate() {
        coeffs[(idx + 1) * stride] = param.to_expr().scale(sign);
    }
    LagPolynomial::new(coeffs)
}

/// `(1 - L^stride)^power`.
fn difference(stride: usize, power: usize) -> LagPolynomial {
    let mut base = vec![Expr::zero(); stride + 1];
    base[0] = Expr::one();
    base[stride] = Expr::constant(-1.0);
    LagPolynomial::new(base).pow(power)
}

/// AR polynomial `1 - ar_1 L - ... - ar_p L^p`.
pub fn ar_polynomial(params: &[Coefficient]) -> LagPolynomial {
    lag_sum(params, 1, -1.0)
}

/// MA polynomial `1 + ma_1 L + ... + ma_q L^q`.
pub fn ma_polynomial(params: &[Coefficient]) -> LagPolynomial {
    lag_sum(params, 1, 1.0)
}

/// Differencing polynomial `(1 - L)^d`.
pub fn difference_polynomial(d: usize) -> LagPolynomial {
    difference(1, d)
}

/// Seasonal AR polynomial `1 - sar_1 L^m - ... - sar_P L^(P m)`.
pub fn seasonal_ar_polynomial(params: &[Coefficient], m: usize) -> LagPolynomial {
    lag_sum(params, m, -1.0)
}

/// Seasonal MA polynomial `1 + sma_1 L^m + ... + sma_Q L^(Q m)`.
pub fn seasonal_ma_polynomial(params: &[Coefficient], m: usize) -> LagPolynomial {
    lag_sum(params, m, 1.0)
}

/// Seasonal differencing polynomial `(1 - L^m)^D`.
#[allow(non_snake_case)]
pub fn seasonal_difference_polynomial(D: usize, m: usize) -> LagPolynomial {
    difference(m, D)
}

/// The six component polynomials of a model.
///
/// A plain model has identity seasonal polynomials.
///
/// # Example
///
/// ```
/// use lagtf_model::{ModelBuilder, ModelPolynomials};
///
/// let model = ModelBuilder::sarima(0, 0, 0, 0, 1, 0, 4).build().unwrap();
/// let polys = ModelPolynomials::from_model(&model);
/// assert_eq!(
///     polys.seasonal_difference().numeric_coeffs().unwrap(),
///     vec![1.0, 0.0, 0.0, 0.0, -1.0]
/// );
/// assert!(polys.ar().is_one());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPolynomials {
    ar: LagPolynomial,
    ma: LagPolynomial,
    difference: LagPolynomial,
    seasonal_ar: LagPolynomial,
    seasonal_ma: LagPolynomial,
    seasonal_difference: LagPolynomial,
}

impl ModelPolynomials {
    /// Builds every component polynomial of `model`.
    pub fn from_model(model: &Model) -> Self {
        let (seasonal_ar, seasonal_ma, seasonal_difference) = match model.seasonal() {
            Some(s) => (
                seasonal_ar_polynomial(s.ar_params(), s.m()),
                seasonal_ma_polynomial(s.ma_params(), s.m()),
                seasonal_difference_polynomial(s.d(), s.m()),
            ),
            None => (
                LagPolynomial::one(),
                LagPolynomial::one(),
                LagPolynomial::one(),
            ),
        };
        Self {
            ar: ar_polynomial(model.ar_params()),
            ma: ma_polynomial(model.ma_params()),
            difference: difference_polynomial(model.d()),
            seasonal_ar,
            seasonal_ma,
            seasonal_difference,
        }
    }

    /// Returns the AR polynomial.
    pub fn ar(&self) -> &LagPolynomial {
        &self.ar
    }

    /// Returns the MA polynomial.
    pub fn ma(&self) -> &LagPolynomial {
        &self.ma
    }

    /// Returns the differencing polynomial.
    pub fn difference(&self) -> &LagPolynomial {
        &self.difference
    }

    /// Returns the seasonal AR polynomial.
    pub fn seasonal_ar(&self) -> &LagPolynomial {
        &self.seasonal_ar
    }

    /// Returns the seasonal MA polynomial.
    pub fn seasonal_ma(&self) -> &LagPolynomial {
        &self.seasonal_ma
    }

    /// Returns the seasonal differencing polynomial.
    pub fn seasonal_difference(&self) -> &LagPolynomial {
        &self.seasonal_difference
    }

    /// Product of the MA factors: the transfer-function numerator.
    pub fn numerator(&self) -> LagPolynomial {
        &self.ma * &self.seasonal_ma
    }

    /// Product of the AR and differencing factors: the transfer-function
    /// denominator.
    pub fn denominator(&self) -> LagPolynomial {
        let ar = &self.ar * &self.seasonal_ar;
        let diff = &self.difference * &self.seasonal_difference;
        &ar * &diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn numeric(params: &[f64]) -> Vec<Coefficient> {
        params.iter().map(|&v| Coefficient::Numeric(v)).collect()
    }

    #[test]
    fn ar_signs_are_negated() {
        let p = ar_polynomial(&numeric(&[0.5, -0.25]));
        assert_eq!(p.numeric_coeffs().unwrap(), vec![1.0, -0.5, 0.25]);
    }

    #[test]
    fn ma_signs_are_kept() {
        let p = ma_polynomial(&numeric(&[0.2]));
        assert_eq!(p.numeric_coeffs().unwrap(), vec![1.0, 0.2]);
    }

    #[test]
    fn zero_orders_are_identity() {
        assert!(ar_polynomial(&[]).is_one());
        assert!(ma_polynomial(&[]).is_one());
        assert!(difference_polynomial(0).is_one());
        assert!(seasonal_difference_polynomial(0, 12).is_one());
        assert!(seasonal_ar_polynomial(&[], 4).is_one());
    }

    #[test]
    fn differencing_is_binomial() {
        assert_eq!(
            difference_polynomial(2).numeric_coeffs().unwrap(),
            vec![1.0, -2.0, 1.0]
        );
        assert_eq!(
            seasonal_difference_polynomial(2, 2).numeric_coeffs().unwrap(),
            vec![1.0, 0.0, -2.0, 0.0, 1.0]
        );
    }

    #[test]
    fn seasonal_terms_are_spaced_by_period() {
        let p = seasonal_ma_polynomial(&numeric(&[0.3, 0.1]), 3);
        let c = p.numeric_coeffs().unwrap();
        assert_eq!(c.len(), 7);
        assert_abs_diff_eq!(c[3], 0.3);
        assert_abs_diff_eq!(c[6], 0.1);
        assert_eq!(c[1], 0.0);
    }

    #[test]
    fn unknown_coefficients_stay_symbolic() {
        let p = ar_polynomial(&[Coefficient::unknown("phi_1")]);
        assert!(!p.is_numeric());
        assert_eq!(p.display_with("B").to_string(), "1 - phi_1*B");
    }
}
