//! Frequency response on the unit circle.

use std::collections::BTreeMap;

use lagtf_model::{CoefficientClass, Model};
use lagtf_poly::horner;
use num_complex::Complex64;
use serde::Serialize;
use tracing::{trace, warn};

use crate::config::{AnalysisConfig, DefaultScales};
use crate::error::AnalysisError;
use crate::transfer::{TransferFunction, derive_transfer_function};

/// Magnitude, phase and gain of `H` at a list of angular frequencies.
///
/// All four sequences have the length of the requested frequency list.
/// Singular entries carry magnitude `+inf`, phase `0` and gain `-inf`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyResponse {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
    phases: Vec<f64>,
    magnitude_db: Vec<f64>,
}

impl FrequencyResponse {
    /// Returns the angular frequencies, as requested.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Returns `|H|` per frequency.
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Returns `arg H` in radians per frequency.
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Returns `20 log10 |H|` per frequency.
    pub fn magnitude_db(&self) -> &[f64] {
        &self.magnitude_db
    }

    /// Returns the number of frequencies.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns `true` for an empty frequency list.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Default values for the unknowns of `model`.
///
/// The unknown at 1-based position `i` of a class gets `scale * i`. An
/// unknown appearing in several positions keeps its first value, in class
/// order AR, MA, seasonal AR, seasonal MA.
///
/// ```
/// use lagtf_analysis::{DefaultScales, default_parameter_values};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::sarima(2, 0, 1, 1, 0, 0, 12).build().unwrap();
/// let values = default_parameter_values(&model, &DefaultScales::default());
/// assert_eq!(values["phi_2"], 0.2);
/// assert_eq!(values["theta_1"], 0.2);
/// assert_eq!(values["Phi_1"], 0.05);
/// ```
pub fn default_parameter_values(
    model: &Model,
    scales: &DefaultScales,
) -> BTreeMap<String, f64> {
    let mut values = BTreeMap::new();
    for class in CoefficientClass::ALL {
        let scale = scales.scale(class);
        for (idx, coeff) in model.params(class).iter().enumerate() {
            if let Some(name) = coeff.unknown_name() {
                values
                    .entry(name.to_string())
                    .or_insert(scale * (idx + 1) as f64);
            }
        }
    }
    values
}

/// `supplied` when given, the defaults of `model` otherwise.
///
/// Supplied values replace the defaults as a whole, so an unknown they leave
/// out stays unresolved.
pub(crate) fn parameter_values(
    model: &Model,
    supplied: Option<&BTreeMap<String, f64>>,
    scales: &DefaultScales,
) -> BTreeMap<String, f64> {
    match supplied {
        Some(values) => values.clone(),
        None => default_parameter_values(model, scales),
    }
}

fn singular() -> (f64, f64) {
    (f64::INFINITY, 0.0)
}

fn decibels(magnitude: f64) -> f64 {
    if magnitude.is_finite() && magnitude > 0.0 {
        20.0 * magnitude.log10()
    } else {
        f64::NEG_INFINITY
    }
}

/// Evaluates `tf` at `z = cos w - i sin w` for every `w` in `frequencies`.
///
/// Unknowns are resolved from `values`. A frequency is singular (magnitude
/// `+inf`, phase `0`) when it is not finite or when `|den(z)|` falls below
/// the singularity threshold. If some unknown has no value, every entry is
/// singular.
pub fn frequency_response(
    tf: &TransferFunction,
    frequencies: &[f64],
    values: &BTreeMap<String, f64>,
    config: &AnalysisConfig,
) -> FrequencyResponse {
    let lookup = |name: &str| values.get(name).copied();
    let resolved = tf
        .numerator()
        .resolve_with(lookup)
        .and_then(|num| Ok((num, tf.denominator().resolve_with(lookup)?)));
    let coeffs = match resolved {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %e, "transfer function could not be evaluated");
            None
        }
    };

    let threshold = config.singularity_threshold();
    let (magnitudes, phases): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .map(|&w| {
            let Some((num, den)) = coeffs.as_ref() else {
                return singular();
            };
            if !w.is_finite() {
                trace!(w, "non-finite frequency");
                return singular();
            }
            let z = Complex64::new(w.cos(), -w.sin());
            let d = horner(den, z);
            if d.norm() < threshold {
                trace!(w, "denominator vanishes");
                return singular();
            }
            let h = horner(num, z) / d;
            (h.norm(), h.arg())
        })
        .unzip();
    let magnitude_db = magnitudes.iter().map(|&m| decibels(m)).collect();

    FrequencyResponse {
        frequencies: frequencies.to_vec(),
        magnitudes,
        phases,
        magnitude_db,
    }
}

/// Derives the transfer function of `model` and evaluates its frequency
/// response.
///
/// Unknowns are resolved from `param_values` when supplied, otherwise from
/// [`default_parameter_values()`]. The two are not merged: an unknown
/// missing from `param_values` leaves every entry singular.
///
/// # Errors
///
/// Only the derivation errors of [`derive_transfer_function()`].
///
/// # Example
///
/// ```
/// use lagtf_analysis::{AnalysisConfig, compute_frequency_response};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(1, 0, 0).with_ar_params([0.5]).build().unwrap();
/// let config = AnalysisConfig::default();
/// let fr = compute_frequency_response(&model, &[0.0], None, &config).unwrap();
/// assert!((fr.magnitudes()[0] - 2.0).abs() < 1e-12);
/// ```
#[tracing::instrument(
    skip(model, frequencies, param_values, config),
    fields(model = %model.name(), n = frequencies.len())
)]
pub fn compute_frequency_response(
    model: &Model,
    frequencies: &[f64],
    param_values: Option<&BTreeMap<String, f64>>,
    config: &AnalysisConfig,
) -> Result<FrequencyResponse, AnalysisError> {
    let tf = derive_transfer_function(model, config)?;
    let values = parameter_values(model, param_values, config.default_scales());
    Ok(frequency_response(&tf, frequencies, &values, config))
}
