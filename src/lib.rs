//! # lagtf
//!
//! Transfer functions of ARIMA and seasonal ARIMA models, with stability,
//! impulse-response and frequency-response analysis.
//!
//! The functions here run with [`AnalysisConfig::default()`]. For explicit
//! configuration use the [`lagtf_analysis`] entry points, or load a TOML
//! file with [`config::LagtfConfig`] and convert it with [`convert`].
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`lagtf_poly`] | symbolic coefficients, lag polynomials, roots, GCD |
//! | [`lagtf_model`] | model values, validation, component polynomials |
//! | [`lagtf_analysis`] | transfer functions and their analyses |
//!
//! ```
//! use lagtf::Coefficient;
//!
//! let ar = vec![Coefficient::Numeric(0.5)];
//! let ma = vec![Coefficient::Numeric(0.2)];
//! let model = lagtf::create_plain_model(1, 0, 1, Some(ar), Some(ma), None, None).unwrap();
//! let tf = lagtf::derive_transfer_function(&model).unwrap();
//! assert_eq!(tf.to_string(), "H(B) = (1 + 0.2*B) / (1 - 0.5*B)");
//! assert!(lagtf::analyze_stability(&model).unwrap().is_stable());
//! ```

pub mod config;
pub mod convert;
pub mod logging;

use std::collections::BTreeMap;

pub use lagtf_analysis::{
    self, AnalysisConfig, AnalysisError, DefaultScales, FrequencyResponse, ImpulseResponse,
    ModelAnalysis, ReportOptions, StabilityReport, TransferFunction, TransferFunctionSummary,
};
pub use lagtf_model::{
    self, ArimaPart, Coefficient, CoefficientClass, Model, ModelBuilder, ModelError, SeasonalPart,
    create_plain_model, create_seasonal_model,
};
pub use lagtf_poly::{self, Expr, LagPolynomial, PolyError};

/// Derives the transfer function of `model`.
///
/// # Errors
///
/// See [`lagtf_analysis::derive_transfer_function()`].
pub fn derive_transfer_function(model: &Model) -> Result<TransferFunction, AnalysisError> {
    lagtf_analysis::derive_transfer_function(model, &AnalysisConfig::default())
}

/// Reports the poles, zeros and stability of `model`.
///
/// # Errors
///
/// See [`lagtf_analysis::analyze_stability()`].
pub fn analyze_stability(model: &Model) -> Result<StabilityReport, AnalysisError> {
    lagtf_analysis::analyze_stability(model, &AnalysisConfig::default())
}

/// Expands the impulse response of `model` up to `max_lag`.
///
/// # Errors
///
/// See [`lagtf_analysis::compute_impulse_response()`].
pub fn compute_impulse_response(
    model: &Model,
    max_lag: usize,
) -> Result<ImpulseResponse, AnalysisError> {
    lagtf_analysis::compute_impulse_response(model, max_lag, &AnalysisConfig::default())
}

/// Evaluates the frequency response of `model` at `frequencies`.
///
/// # Errors
///
/// See [`lagtf_analysis::compute_frequency_response()`].
pub fn compute_frequency_response(
    model: &Model,
    frequencies: &[f64],
    param_values: Option<&BTreeMap<String, f64>>,
) -> Result<FrequencyResponse, AnalysisError> {
    lagtf_analysis::compute_frequency_response(
        model,
        frequencies,
        param_values,
        &AnalysisConfig::default(),
    )
}

/// Runs the analyses selected by `options` on `model`.
///
/// # Errors
///
/// See [`lagtf_analysis::analyze_model()`].
pub fn analyze_model(
    model: &Model,
    options: &ReportOptions,
) -> Result<ModelAnalysis, AnalysisError> {
    lagtf_analysis::analyze_model(model, options, &AnalysisConfig::default())
}

/// Runs the analyses configured in `config` on `model`.
///
/// # Errors
///
/// Fails if the configuration is invalid or the derivation fails.
pub fn analyze_with_config(
    model: &Model,
    config: &config::LagtfConfig,
) -> anyhow::Result<ModelAnalysis> {
    let (analysis, options) = convert::build_all(config)?;
    let result = lagtf_analysis::analyze_model(model, &options, &analysis)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn plain_model_validation() {
        assert_eq!(
            create_plain_model(0, 0, 0, None, None, None, None).unwrap_err(),
            ModelError::AllOrdersZero
        );
        let ar = Some(vec![Coefficient::Numeric(0.5)]);
        let err = create_plain_model(2, 0, 0, ar, None, None, None).unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn seasonal_model_defaults_are_named() {
        let model = create_seasonal_model(1, 0, 0, 1, 0, 1, 12, None, None, None, None, None, None)
            .unwrap();
        let unknowns: Vec<&str> = model.unknowns().into_iter().collect();
        assert_eq!(unknowns, vec!["Phi_1", "Theta_1", "phi_1"]);
        assert_eq!(model.name(), "SARIMA(1,0,0)(1,0,1,12)");
    }

    #[test]
    fn random_walk_end_to_end() {
        let model = create_plain_model(0, 1, 0, None, None, None, None).unwrap();
        let tf = derive_transfer_function(&model).unwrap();
        assert_eq!(tf.to_string(), "H(B) = (1) / (1 - B)");

        let report = analyze_stability(&model).unwrap();
        assert!(!report.is_stable());
        assert_eq!(report.pole_magnitudes(), &[1.0]);

        let h = compute_impulse_response(&model, 4).unwrap();
        assert_eq!(h.to_numeric().unwrap(), vec![1.0; 5]);

        let fr = compute_frequency_response(&model, &[0.0, 0.5], None).unwrap();
        assert_eq!(fr.magnitudes()[0], f64::INFINITY);
        assert_abs_diff_eq!(
            fr.magnitudes()[1],
            1.0 / (2.0 - 2.0 * 0.5_f64.cos()).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn frequency_response_with_supplied_values() {
        let model = ModelBuilder::arima(0, 0, 1).build().unwrap();
        let values = BTreeMap::from([("theta_1".to_string(), 1.0)]);
        let fr = compute_frequency_response(&model, &[0.0], Some(&values)).unwrap();
        assert_abs_diff_eq!(fr.magnitudes()[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn analysis_from_toml() {
        let text = r#"
            [engine]
            lag_symbol = "L"

            [report]
            include_impulse = true
            max_lag = 3
        "#;
        let config = config::LagtfConfig::from_toml_str(text).unwrap();
        let model = ModelBuilder::arima(1, 0, 0)
            .with_ar_params([0.5])
            .build()
            .unwrap();
        let analysis = analyze_with_config(&model, &config).unwrap();
        assert_eq!(analysis.transfer_function().expression(), "H(L) = (1) / (1 - 0.5*L)");
        assert_eq!(
            analysis.impulse_response().unwrap().to_numeric().unwrap(),
            vec![1.0, 0.5, 0.25, 0.125]
        );

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["model"]["ar_params"][0], 0.5);
        assert_eq!(json["impulse_response"]["3"], 0.125);
    }

    #[test]
    fn invalid_toml_settings_fail() {
        let config = config::LagtfConfig::from_toml_str("[engine]\nmax_degree = 0\n").unwrap();
        let model = create_plain_model(1, 0, 0, None, None, None, None).unwrap();
        let err = analyze_with_config(&model, &config).unwrap_err();
        assert!(format!("{err:#}").contains("max_degree"));
    }

    #[test]
    fn default_report() {
        let model = create_plain_model(0, 0, 1, None, None, None, None).unwrap();
        let analysis = analyze_model(&model, &ReportOptions::default()).unwrap();
        assert!(analysis.stability().unwrap().is_stable());
        assert!(analysis.transfer_function().zeros().is_empty());
    }
}
