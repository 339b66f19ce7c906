//! Poles, zeros and stability.
//!
//! Polynomials are in the lag operator `L`, while poles and zeros are
//! reported in the `z`-domain, `z = 1/L`: they are the roots of the
//! reversed polynomial `z^k P(1/z)`. For `1 - aL` the pole is `z = a`, and a
//! model is stable when every pole lies strictly inside the unit circle.
//! Roots at `L = 0` correspond to `z = inf` and are not reported.

use lagtf_model::Model;
use lagtf_poly::{LagPolynomial, PolyError, deflate_unit_roots, find_roots, roots_of_unity};
use num_complex::Complex64;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::transfer::{TransferFunction, derive_transfer_function};

/// `z`-domain roots of `poly`, each with its magnitude.
///
/// Unit-root factors `1 - L^m` are divided out first and contribute the
/// `m`-th roots of unity with magnitude exactly 1. Every other root keeps
/// its computed magnitude.
fn z_roots(
    poly: &LagPolynomial,
    config: &AnalysisConfig,
) -> Result<Vec<(Complex64, f64)>, PolyError> {
    let coeffs = poly.numeric_coeffs()?;
    let (rest, periods) = deflate_unit_roots(&coeffs, config.unit_root_tolerance());
    if !periods.is_empty() {
        debug!(?periods, "unit-root factors divided out");
    }
    let reversed: Vec<f64> = rest.into_iter().rev().collect();
    let mut roots: Vec<(Complex64, f64)> = find_roots(&reversed, config.root_max_iterations())?
        .into_iter()
        .map(|r| (r, r.norm()))
        .collect();
    for &m in &periods {
        roots.extend(roots_of_unity(m).into_iter().map(|r| (r, 1.0)));
    }
    roots.sort_by(|a, b| a.0.re.total_cmp(&b.0.re).then(a.0.im.total_cmp(&b.0.im)));
    Ok(roots)
}

fn recover<T>(result: Result<Vec<T>, AnalysisError>, what: &str) -> Vec<T> {
    match result {
        Ok(roots) => roots,
        Err(AnalysisError::Computation(PolyError::SymbolicCoefficients { unknowns })) => {
            debug!(%unknowns, "{what} left unsolved: symbolic coefficients");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "{what} could not be computed");
            Vec::new()
        }
    }
}

fn pole_roots(
    tf: &TransferFunction,
    config: &AnalysisConfig,
) -> Result<Vec<(Complex64, f64)>, AnalysisError> {
    Ok(z_roots(tf.denominator(), config)?)
}

/// Poles of `tf` (roots of the reversed denominator).
///
/// # Errors
///
/// Returns [`AnalysisError::Computation`] when the denominator is symbolic
/// or the root finder fails.
pub fn try_poles(
    tf: &TransferFunction,
    config: &AnalysisConfig,
) -> Result<Vec<Complex64>, AnalysisError> {
    Ok(pole_roots(tf, config)?.into_iter().map(|(r, _)| r).collect())
}

/// Zeros of `tf` (roots of the reversed numerator).
///
/// # Errors
///
/// Same as [`try_poles()`], for the numerator.
pub fn try_zeros(
    tf: &TransferFunction,
    config: &AnalysisConfig,
) -> Result<Vec<Complex64>, AnalysisError> {
    let roots = z_roots(tf.numerator(), config)?;
    Ok(roots.into_iter().map(|(r, _)| r).collect())
}

/// Poles of `tf`; empty when they cannot be computed.
///
/// An empty list is ambiguous between "no poles" and "could not solve", see
/// [`try_poles()`] to tell them apart.
pub fn poles(tf: &TransferFunction, config: &AnalysisConfig) -> Vec<Complex64> {
    recover(try_poles(tf, config), "poles")
}

/// Zeros of `tf`; empty when they cannot be computed.
pub fn zeros(tf: &TransferFunction, config: &AnalysisConfig) -> Vec<Complex64> {
    recover(try_zeros(tf, config), "zeros")
}

/// Returns `true` if every reported pole has magnitude below 1.
///
/// Vacuously `true` when no poles are reported, including when they could
/// not be computed.
pub fn is_stable(tf: &TransferFunction, config: &AnalysisConfig) -> bool {
    recover(pole_roots(tf, config), "poles")
        .iter()
        .all(|&(_, m)| m < 1.0)
}

/// Stability summary of a transfer function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityReport {
    is_stable: bool,
    poles: Vec<Complex64>,
    zeros: Vec<Complex64>,
    pole_magnitudes: Vec<f64>,
    max_pole_magnitude: f64,
    stability_margin: f64,
}

impl StabilityReport {
    /// Builds the report from the poles and zeros of `tf`.
    pub fn from_transfer_function(tf: &TransferFunction, config: &AnalysisConfig) -> Self {
        let (poles, pole_magnitudes): (Vec<Complex64>, Vec<f64>) =
            recover(pole_roots(tf, config), "poles").into_iter().unzip();
        let zeros = zeros(tf, config);
        let max_pole_magnitude = pole_magnitudes.iter().copied().fold(0.0, f64::max);
        Self {
            is_stable: pole_magnitudes.iter().all(|&m| m < 1.0),
            poles,
            zeros,
            pole_magnitudes,
            max_pole_magnitude,
            stability_margin: 1.0 - max_pole_magnitude,
        }
    }

    /// Returns `true` if every pole lies strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.is_stable
    }

    /// Returns the poles.
    pub fn poles(&self) -> &[Complex64] {
        &self.poles
    }

    /// Returns the zeros.
    pub fn zeros(&self) -> &[Complex64] {
        &self.zeros
    }

    /// Returns the pole magnitudes, in pole order.
    pub fn pole_magnitudes(&self) -> &[f64] {
        &self.pole_magnitudes
    }

    /// Returns the largest pole magnitude (0 without poles).
    pub fn max_pole_magnitude(&self) -> f64 {
        self.max_pole_magnitude
    }

    /// Returns `1 - max_pole_magnitude` (1 without poles).
    pub fn stability_margin(&self) -> f64 {
        self.stability_margin
    }
}

/// Derives the transfer function of `model` and reports its stability.
///
/// # Errors
///
/// Only the derivation errors of [`derive_transfer_function()`].
///
/// # Example
///
/// ```
/// use lagtf_analysis::{AnalysisConfig, analyze_stability};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(1, 0, 0).with_ar_params([0.5]).build().unwrap();
/// let report = analyze_stability(&model, &AnalysisConfig::default()).unwrap();
/// assert!(report.is_stable());
/// assert!((report.poles()[0].re - 0.5).abs() < 1e-12);
/// assert!((report.stability_margin() - 0.5).abs() < 1e-12);
/// ```
#[tracing::instrument(skip(model, config), fields(model = %model.name()))]
pub fn analyze_stability(
    model: &Model,
    config: &AnalysisConfig,
) -> Result<StabilityReport, AnalysisError> {
    let tf = derive_transfer_function(model, config)?;
    Ok(StabilityReport::from_transfer_function(&tf, config))
}
