//! Polynomials in a single lag indeterminate with [`Expr`] coefficients.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use num_complex::Complex64;
use serde::{Serialize, Serializer};

use crate::error::PolyError;
use crate::expr::Expr;
use crate::roots::horner;

/// A polynomial `c_0 + c_1 L + ... + c_n L^n` in the lag indeterminate.
///
/// Coefficients are stored in ascending power order and trailing zero
/// coefficients are always trimmed, so [`LagPolynomial::degree()`] is the
/// index of the last stored coefficient. The zero polynomial stores no
/// coefficients.
///
/// The indeterminate itself is anonymous: its name only matters when the
/// polynomial is rendered, see [`LagPolynomial::display_with()`].
///
/// # Example
///
/// ```
/// use lagtf_poly::LagPolynomial;
///
/// let one_minus_l = LagPolynomial::from_numeric(&[1.0, -1.0]);
/// let squared = one_minus_l.pow(2);
/// assert_eq!(squared.numeric_coeffs().unwrap(), vec![1.0, -2.0, 1.0]);
/// assert_eq!(squared.display_with("B").to_string(), "1 - 2*B + B^2");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LagPolynomial {
    coeffs: Vec<Expr>,
}

impl LagPolynomial {
    /// Builds a polynomial from ascending coefficients, trimming trailing zeros.
    pub fn new(coeffs: Vec<Expr>) -> Self {
        let mut poly = Self { coeffs };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The multiplicative identity `1`.
    pub fn one() -> Self {
        Self {
            coeffs: vec![Expr::one()],
        }
    }

    /// Builds a polynomial from ascending numeric coefficients.
    pub fn from_numeric(coeffs: &[f64]) -> Self {
        Self::new(coeffs.iter().map(|&c| Expr::constant(c)).collect())
    }

    /// The single term `coeff * L^power`.
    pub fn monomial(coeff: Expr, power: usize) -> Self {
        let mut coeffs = vec![Expr::zero(); power + 1];
        coeffs[power] = coeff;
        Self::new(coeffs)
    }

    /// Ascending coefficients (no trailing zeros).
    pub fn coeffs(&self) -> &[Expr] {
        &self.coeffs
    }

    /// Coefficient of `L^power`, zero beyond the degree.
    pub fn coeff(&self, power: usize) -> Expr {
        self.coeffs.get(power).cloned().unwrap_or_default()
    }

    /// Highest-power non-zero coefficient.
    pub fn leading(&self) -> Option<&Expr> {
        self.coeffs.last()
    }

    /// Degree of the polynomial (0 for constants and for the zero polynomial).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns `true` for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns `true` for the constant polynomial `1`.
    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].as_constant() == Some(1.0)
    }

    /// Returns `true` if no coefficient contains an unknown.
    pub fn is_numeric(&self) -> bool {
        self.coeffs.iter().all(Expr::is_numeric)
    }

    /// Names of every unknown in any coefficient.
    pub fn unknowns(&self) -> BTreeSet<String> {
        self.coeffs
            .iter()
            .flat_map(|c| c.unknowns().into_iter().map(str::to_string))
            .collect()
    }

    /// Ascending numeric coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::SymbolicCoefficients`] if any coefficient still
    /// contains an unknown.
    pub fn numeric_coeffs(&self) -> Result<Vec<f64>, PolyError> {
        self.coeffs
            .iter()
            .map(|c| {
                c.as_constant().ok_or_else(|| PolyError::SymbolicCoefficients {
                    unknowns: self.unknowns().into_iter().collect::<Vec<_>>().join(", "),
                })
            })
            .collect()
    }

    /// Evaluates every coefficient, resolving unknowns through `lookup`.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<Vec<f64>, PolyError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.coeffs.iter().map(|c| c.eval_with(&lookup)).collect()
    }

    /// Evaluates the polynomial at a complex point.
    pub fn eval_complex<F>(&self, z: Complex64, lookup: F) -> Result<Complex64, PolyError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        Ok(horner(&self.resolve_with(lookup)?, z))
    }

    /// Largest absolute term coefficient across all coefficients.
    pub fn max_abs_coefficient(&self) -> f64 {
        self.coeffs
            .iter()
            .fold(0.0_f64, |acc, c| acc.max(c.max_abs_coefficient()))
    }

    /// Returns `true` if every coefficient is within `tol` of zero.
    pub fn is_negligible(&self, tol: f64) -> bool {
        self.coeffs.iter().all(|c| c.is_negligible(tol))
    }

    /// Drops terms within `tol` of zero from every coefficient.
    pub fn chop(&self, tol: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c.chop(tol)).collect())
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c.scale(factor)).collect())
    }

    /// Divides every coefficient by `divisor`.
    pub fn div_scalar(&self, divisor: f64) -> Self {
        Self::new(self.coeffs.iter().map(|c| c.div_scalar(divisor)).collect())
    }

    /// Reverses the coefficient order: `L^n P(1/L)` for `n = degree()`.
    pub fn reversed(&self) -> Self {
        Self::new(self.coeffs.iter().rev().cloned().collect())
    }

    /// Raises the polynomial to the `n`-th power by repeated multiplication.
    pub fn pow(&self, n: usize) -> Self {
        let mut result = Self::one();
        for _ in 0..n {
            result = &result * self;
        }
        result
    }

    /// Renders the polynomial with `symbol` as the indeterminate.
    pub fn display_with<'a>(&'a self, symbol: &'a str) -> PolyDisplay<'a> {
        PolyDisplay { poly: self, symbol }
    }

    fn trim(&mut self) {
        while self.coeffs.last().is_some_and(Expr::is_zero) {
            self.coeffs.pop();
        }
    }
}

impl Add<&LagPolynomial> for &LagPolynomial {
    type Output = LagPolynomial;

    fn add(self, rhs: &LagPolynomial) -> LagPolynomial {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        LagPolynomial::new((0..n).map(|i| &self.coeff(i) + &rhs.coeff(i)).collect())
    }
}

impl Sub<&LagPolynomial> for &LagPolynomial {
    type Output = LagPolynomial;

    fn sub(self, rhs: &LagPolynomial) -> LagPolynomial {
        let n = self.coeffs.len().max(rhs.coeffs.len());
        LagPolynomial::new((0..n).map(|i| &self.coeff(i) - &rhs.coeff(i)).collect())
    }
}

impl Mul<&LagPolynomial> for &LagPolynomial {
    type Output = LagPolynomial;

    fn mul(self, rhs: &LagPolynomial) -> LagPolynomial {
        if self.is_zero() || rhs.is_zero() {
            return LagPolynomial::zero();
        }
        let mut out = vec![Expr::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                if b.is_zero() {
                    continue;
                }
                out[i + j] += &(a * b);
            }
        }
        LagPolynomial::new(out)
    }
}

impl Mul for LagPolynomial {
    type Output = LagPolynomial;

    fn mul(self, rhs: LagPolynomial) -> LagPolynomial {
        &self * &rhs
    }
}

/// Serializes as the ascending coefficient list.
impl Serialize for LagPolynomial {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.coeffs)
    }
}

/// Display adaptor returned by [`LagPolynomial::display_with()`].
pub struct PolyDisplay<'a> {
    poly: &'a LagPolynomial,
    symbol: &'a str,
}

impl fmt::Display for PolyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, coeff) in self.poly.coeffs.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }
            let (negative, body) = split_sign(coeff);
            match (first, negative) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;

            let lag = match power {
                0 => String::new(),
                1 => self.symbol.to_string(),
                k => format!("{}^{k}", self.symbol),
            };
            match (power, body.as_str()) {
                (0, _) => write!(f, "{body}")?,
                (_, "1") => write!(f, "{lag}")?,
                _ => write!(f, "{body}*{lag}")?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Splits a coefficient into a sign and a rendered magnitude.
fn split_sign(coeff: &Expr) -> (bool, String) {
    if let Some(c) = coeff.as_constant() {
        return (c < 0.0, format!("{}", c.abs()));
    }
    if coeff.term_count() == 1 {
        let negative = coeff.terms().next().is_some_and(|(_, c)| c < 0.0);
        let body = if negative { -coeff } else { coeff.clone() };
        return (negative, body.to_string());
    }
    (false, format!("({coeff})"))
}
