//! Lag polynomials with mixed numeric and symbolic coefficients.
//!
//! This crate is the algebra layer under the transfer-function analysis:
//!
//! | Type / function | Purpose |
//! |-----------------|---------|
//! | [`Expr`] | Real polynomial in named unknowns (`phi_1`, `Theta_2`, ...) |
//! | [`LagPolynomial`] | Polynomial in the lag indeterminate with [`Expr`] coefficients |
//! | [`gcd`] | Best-effort greatest common divisor, works through symbolic pivots |
//! | [`find_roots`] | Complex roots of a numeric polynomial |
//!
//! Coefficients are always ascending: index `i` holds the coefficient of
//! `L^i`.
//!
//! # Quick start
//!
//! ```
//! use lagtf_poly::{Expr, LagPolynomial};
//!
//! // (1 - phi_1 L)(1 - L)
//! let ar = LagPolynomial::new(vec![Expr::one(), -Expr::unknown("phi_1")]);
//! let diff = LagPolynomial::from_numeric(&[1.0, -1.0]);
//! let den = &ar * &diff;
//! assert_eq!(den.display_with("B").to_string(), "1 + (-1 - phi_1)*B + phi_1*B^2");
//! ```

pub mod division;
pub mod error;
pub mod expr;
pub mod poly;
pub mod roots;

pub use division::gcd;
pub use error::PolyError;
pub use expr::{Expr, Monomial};
pub use poly::{LagPolynomial, PolyDisplay};
pub use roots::{deflate_unit_roots, find_roots, horner, roots_of_unity};
