//! Real-coefficient expressions over named unknowns.
//!
//! An [`Expr`] is kept in canonical sum-of-monomials form: every
//! [`Monomial`] appears at most once, factors inside a monomial are sorted
//! by name, and terms whose coefficient becomes exactly zero are dropped.
//! Two expressions built from the same algebra therefore compare equal
//! structurally.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Serialize, Serializer};

use crate::error::PolyError;

/// A product of named unknowns raised to positive integer powers.
///
/// The unit monomial (`1`) has no factors and sorts before every other
/// monomial, so constants always come first inside an [`Expr`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial {
    /// `(name, power)` pairs, sorted by name, powers >= 1.
    factors: Vec<(String, u32)>,
}

impl Monomial {
    /// Returns the unit monomial.
    pub fn one() -> Self {
        Self::default()
    }

    /// Returns the monomial consisting of a single unknown.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            factors: vec![(name.into(), 1)],
        }
    }

    /// Returns `true` for the unit monomial.
    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// Returns the `(name, power)` factors, sorted by name.
    pub fn factors(&self) -> &[(String, u32)] {
        &self.factors
    }

    /// Total degree (sum of powers).
    pub fn degree(&self) -> u32 {
        self.factors.iter().map(|(_, p)| p).sum()
    }

    /// Product of two monomials (merge of the sorted factor lists).
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let (a, b) = (&self.factors, &other.factors);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => {
                    out.push(a[i].clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j].clone());
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push((a[i].0.clone(), a[i].1 + b[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Monomial { factors: out }
    }

    fn eval_with<F>(&self, lookup: &F) -> Result<f64, PolyError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let mut acc = 1.0;
        for (name, power) in &self.factors {
            let value = lookup(name).ok_or_else(|| PolyError::UnboundUnknown {
                name: name.clone(),
            })?;
            acc *= value.powi(*power as i32);
        }
        Ok(acc)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (idx, (name, power)) in self.factors.iter().enumerate() {
            if idx > 0 {
                write!(f, "*")?;
            }
            if *power == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}^{power}")?;
            }
        }
        Ok(())
    }
}

/// A polynomial in named unknowns with `f64` coefficients.
///
/// # Example
///
/// ```
/// use lagtf_poly::Expr;
///
/// let phi = Expr::unknown("phi_1");
/// let e = &(&Expr::one() - &phi) * &(&Expr::one() + &phi);
/// assert_eq!(e.to_string(), "1 - phi_1^2");
/// assert_eq!(e.term_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    terms: BTreeMap<Monomial, f64>,
}

impl Expr {
    /// The zero expression.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// A numeric constant.
    pub fn constant(value: f64) -> Self {
        let mut e = Self::zero();
        e.add_term(Monomial::one(), value);
        e
    }

    /// A single free unknown with coefficient 1.
    pub fn unknown(name: impl Into<String>) -> Self {
        let mut e = Self::zero();
        e.add_term(Monomial::unknown(name), 1.0);
        e
    }

    /// Returns `true` if every term has cancelled.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the numeric value if the expression has no unknowns.
    pub fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self
                .terms
                .iter()
                .next()
                .filter(|(m, _)| m.is_one())
                .map(|(_, c)| *c),
            _ => None,
        }
    }

    /// Returns `true` if the expression has no unknowns.
    pub fn is_numeric(&self) -> bool {
        self.as_constant().is_some()
    }

    /// Number of (non-zero) terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Iterates over `(monomial, coefficient)` pairs in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, f64)> {
        self.terms.iter().map(|(m, c)| (m, *c))
    }

    /// Names of all unknowns appearing in the expression.
    pub fn unknowns(&self) -> BTreeSet<&str> {
        self.terms
            .keys()
            .flat_map(|m| m.factors.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    /// Largest absolute term coefficient (0 for the zero expression).
    pub fn max_abs_coefficient(&self) -> f64 {
        self.terms.values().fold(0.0_f64, |acc, c| acc.max(c.abs()))
    }

    /// Returns `true` if every term coefficient is within `tol` of zero.
    pub fn is_negligible(&self, tol: f64) -> bool {
        self.terms.values().all(|c| c.abs() <= tol)
    }

    /// Drops terms whose coefficient is within `tol` of zero.
    pub fn chop(&self, tol: f64) -> Expr {
        Expr {
            terms: self
                .terms
                .iter()
                .filter(|(_, c)| c.abs() > tol)
                .map(|(m, c)| (m.clone(), *c))
                .collect(),
        }
    }

    /// Multiplies every coefficient by `factor`.
    pub fn scale(&self, factor: f64) -> Expr {
        let mut out = Expr::zero();
        for (m, c) in &self.terms {
            out.add_term(m.clone(), c * factor);
        }
        out
    }

    /// Divides every coefficient by `divisor`.
    pub fn div_scalar(&self, divisor: f64) -> Expr {
        let mut out = Expr::zero();
        for (m, c) in &self.terms {
            out.add_term(m.clone(), c / divisor);
        }
        out
    }

    /// Evaluates the expression, resolving unknowns through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::UnboundUnknown`] for the first unknown that
    /// `lookup` cannot resolve.
    pub fn eval_with<F>(&self, lookup: F) -> Result<f64, PolyError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.terms
            .iter()
            .try_fold(0.0, |acc, (m, c)| Ok(acc + c * m.eval_with(&lookup)?))
    }

    /// Evaluates the expression with values taken from a name → value map.
    pub fn eval(&self, values: &BTreeMap<String, f64>) -> Result<f64, PolyError> {
        self.eval_with(|name| values.get(name).copied())
    }

    fn add_term(&mut self, monomial: Monomial, coeff: f64) {
        if coeff == 0.0 {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Occupied(mut slot) => {
                let sum = *slot.get() + coeff;
                if sum == 0.0 {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(coeff);
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl Add<&Expr> for &Expr {
    type Output = Expr;

    fn add(self, rhs: &Expr) -> Expr {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Expr {
        self += &rhs;
        self
    }
}

impl AddAssign<&Expr> for Expr {
    fn add_assign(&mut self, rhs: &Expr) {
        for (m, c) in &rhs.terms {
            self.add_term(m.clone(), *c);
        }
    }
}

impl Sub<&Expr> for &Expr {
    type Output = Expr;

    fn sub(self, rhs: &Expr) -> Expr {
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), -c);
        }
        out
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        &self - &rhs
    }
}

impl Mul<&Expr> for &Expr {
    type Output = Expr;

    fn mul(self, rhs: &Expr) -> Expr {
        let mut out = Expr::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                out.add_term(ma.mul(mb), ca * cb);
            }
        }
        out
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        &self * &rhs
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.scale(-1.0)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.scale(-1.0)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (idx, (m, c)) in self.terms.iter().enumerate() {
            let negative = *c < 0.0;
            let mag = c.abs();
            match (idx, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            if m.is_one() {
                write!(f, "{mag}")?;
            } else if mag == 1.0 {
                write!(f, "{m}")?;
            } else {
                write!(f, "{mag}*{m}")?;
            }
        }
        Ok(())
    }
}

/// Constants serialize as numbers, everything else as its rendered form.
impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_constant() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.to_string()),
        }
    }
}
