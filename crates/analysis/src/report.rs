//! One-call model analysis.

use std::collections::BTreeMap;

use lagtf_model::Model;
use lagtf_poly::LagPolynomial;
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::frequency::{FrequencyResponse, frequency_response, parameter_values};
use crate::impulse::{ImpulseResponse, impulse_response};
use crate::stability::{StabilityReport, poles, zeros};
use crate::transfer::derive_transfer_function;

/// Selects the sections of a [`ModelAnalysis`].
///
/// # Example
///
/// ```
/// use lagtf_analysis::ReportOptions;
///
/// let options = ReportOptions::new().with_impulse(true).with_max_lag(10);
/// assert!(options.include_stability());
/// assert!(options.include_impulse());
/// assert!(!options.include_frequency());
/// assert_eq!(options.frequencies().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    include_stability: bool,
    include_impulse: bool,
    include_frequency: bool,
    /// Largest impulse-response lag.
    max_lag: usize,
    /// Angular frequencies of the frequency response.
    frequencies: Vec<f64>,
    /// Values of the unknowns in the frequency response; empty means defaults.
    param_values: BTreeMap<String, f64>,
}

impl ReportOptions {
    /// Creates the default options.
    ///
    /// Defaults: stability on, impulse and frequency responses off,
    /// `max_lag = 20`, frequencies `[0.0, 0.1, 0.2, 0.3, 0.4, 0.5]`.
    pub fn new() -> Self {
        Self {
            include_stability: true,
            include_impulse: false,
            include_frequency: false,
            max_lag: 20,
            frequencies: vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5],
            param_values: BTreeMap::new(),
        }
    }

    /// Includes or omits the stability section.
    pub fn with_stability(mut self, include: bool) -> Self {
        self.include_stability = include;
        self
    }

    /// Includes or omits the impulse-response section.
    pub fn with_impulse(mut self, include: bool) -> Self {
        self.include_impulse = include;
        self
    }

    /// Includes or omits the frequency-response section.
    pub fn with_frequency(mut self, include: bool) -> Self {
        self.include_frequency = include;
        self
    }

    /// Sets the largest impulse-response lag.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// Sets the frequencies of the frequency response.
    pub fn with_frequencies(mut self, frequencies: Vec<f64>) -> Self {
        self.frequencies = frequencies;
        self
    }

    /// Sets values for unknowns in the frequency response.
    ///
    /// A non-empty map replaces the default values as a whole.
    pub fn with_param_values(mut self, values: BTreeMap<String, f64>) -> Self {
        self.param_values = values;
        self
    }

    /// Returns `true` if the stability section is included.
    pub fn include_stability(&self) -> bool {
        self.include_stability
    }

    /// Returns `true` if the impulse-response section is included.
    pub fn include_impulse(&self) -> bool {
        self.include_impulse
    }

    /// Returns `true` if the frequency-response section is included.
    pub fn include_frequency(&self) -> bool {
        self.include_frequency
    }

    /// Returns the largest impulse-response lag.
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Returns the frequencies of the frequency response.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Returns the supplied values of unknowns.
    pub fn param_values(&self) -> &BTreeMap<String, f64> {
        &self.param_values
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Transfer-function section of a [`ModelAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferFunctionSummary {
    expression: String,
    numerator: LagPolynomial,
    denominator: LagPolynomial,
    reduced: bool,
    poles: Vec<Complex64>,
    zeros: Vec<Complex64>,
}

impl TransferFunctionSummary {
    /// Returns the rendered transfer function, e.g. `H(B) = (1) / (1 - 0.5*B)`.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the numerator polynomial.
    pub fn numerator(&self) -> &LagPolynomial {
        &self.numerator
    }

    /// Returns the denominator polynomial.
    pub fn denominator(&self) -> &LagPolynomial {
        &self.denominator
    }

    /// Returns `true` if a common factor was cancelled.
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Returns the poles (empty if they could not be computed).
    pub fn poles(&self) -> &[Complex64] {
        &self.poles
    }

    /// Returns the zeros (empty if they could not be computed).
    pub fn zeros(&self) -> &[Complex64] {
        &self.zeros
    }
}

/// Combined analysis of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAnalysis {
    model: Model,
    transfer_function: TransferFunctionSummary,
    stability: Option<StabilityReport>,
    impulse_response: Option<ImpulseResponse>,
    frequency_response: Option<FrequencyResponse>,
}

impl ModelAnalysis {
    /// Returns the analysed model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the transfer-function section.
    pub fn transfer_function(&self) -> &TransferFunctionSummary {
        &self.transfer_function
    }

    /// Returns the stability section, if requested.
    pub fn stability(&self) -> Option<&StabilityReport> {
        self.stability.as_ref()
    }

    /// Returns the impulse-response section, if requested.
    pub fn impulse_response(&self) -> Option<&ImpulseResponse> {
        self.impulse_response.as_ref()
    }

    /// Returns the frequency-response section, if requested.
    pub fn frequency_response(&self) -> Option<&FrequencyResponse> {
        self.frequency_response.as_ref()
    }
}

/// Derives the transfer function once and runs the requested analyses on it.
///
/// # Errors
///
/// Only the derivation errors of [`derive_transfer_function()`].
///
/// # Example
///
/// ```
/// use lagtf_analysis::{AnalysisConfig, ReportOptions, analyze_model};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(1, 1, 0).with_ar_params([0.5]).build().unwrap();
/// let options = ReportOptions::new().with_impulse(true).with_max_lag(3);
/// let analysis = analyze_model(&model, &options, &AnalysisConfig::default()).unwrap();
///
/// assert!(!analysis.stability().unwrap().is_stable());
/// assert_eq!(analysis.transfer_function().poles().len(), 2);
/// assert_eq!(analysis.impulse_response().unwrap().len(), 4);
/// assert!(analysis.frequency_response().is_none());
/// ```
#[tracing::instrument(skip(model, options, config), fields(model = %model.name()))]
pub fn analyze_model(
    model: &Model,
    options: &ReportOptions,
    config: &AnalysisConfig,
) -> Result<ModelAnalysis, AnalysisError> {
    let tf = derive_transfer_function(model, config)?;

    let stability = options
        .include_stability
        .then(|| StabilityReport::from_transfer_function(&tf, config));
    let impulse = options
        .include_impulse
        .then(|| impulse_response(&tf, options.max_lag, config));
    let frequency = options.include_frequency.then(|| {
        let supplied = (!options.param_values.is_empty()).then_some(&options.param_values);
        let values = parameter_values(model, supplied, config.default_scales());
        frequency_response(&tf, &options.frequencies, &values, config)
    });

    let (poles, zeros) = match &stability {
        Some(report) => (report.poles().to_vec(), report.zeros().to_vec()),
        None => (poles(&tf, config), zeros(&tf, config)),
    };
    debug!(
        stability = stability.is_some(),
        impulse = impulse.is_some(),
        frequency = frequency.is_some(),
        "analysis complete"
    );

    Ok(ModelAnalysis {
        model: model.clone(),
        transfer_function: TransferFunctionSummary {
            expression: tf.to_string(),
            numerator: tf.numerator().clone(),
            denominator: tf.denominator().clone(),
            reduced: tf.is_reduced(),
            poles,
            zeros,
        },
        stability,
        impulse_response: impulse,
        frequency_response: frequency,
    })
}
