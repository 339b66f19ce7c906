//! Impulse response: power-series expansion of the transfer function.

use std::collections::BTreeMap;

use lagtf_model::Model;
use lagtf_poly::Expr;
use serde::Serialize;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::transfer::{TransferFunction, derive_transfer_function};

/// Impulse-response coefficients `h_0, h_1, ...` keyed by lag.
///
/// Coefficients stay symbolic while the model has unknowns. An empty
/// response means the expansion could not be computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImpulseResponse {
    coefficients: BTreeMap<usize, Expr>,
}

impl ImpulseResponse {
    /// Returns the coefficient at `lag`.
    pub fn get(&self, lag: usize) -> Option<&Expr> {
        self.coefficients.get(&lag)
    }

    /// Returns the number of coefficients.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns `true` if the expansion failed (or `max_lag` gave nothing).
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Iterates over `(lag, coefficient)` in lag order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Expr)> {
        self.coefficients.iter().map(|(lag, c)| (*lag, c))
    }

    /// Returns the coefficient map.
    pub fn coefficients(&self) -> &BTreeMap<usize, Expr> {
        &self.coefficients
    }

    /// Returns the coefficients as numbers, if none is symbolic.
    pub fn to_numeric(&self) -> Option<Vec<f64>> {
        self.coefficients.values().map(Expr::as_constant).collect()
    }
}

/// Expands `tf` into its first `max_lag + 1` impulse-response coefficients.
///
/// Uses `h_j = (n_j - sum_{i=1}^{min(j,k)} d_i h_{j-i}) / d_0`. Any failure
/// (symbolic or zero `d_0`, a coefficient above `max_expression_terms`
/// terms, `max_lag` above `max_impulse_lag`) is logged at `warn` and returns
/// an empty response.
pub fn impulse_response(
    tf: &TransferFunction,
    max_lag: usize,
    config: &AnalysisConfig,
) -> ImpulseResponse {
    if max_lag > config.max_impulse_lag() {
        warn!(
            max_lag,
            limit = config.max_impulse_lag(),
            "impulse response lag exceeds the configured limit"
        );
        return ImpulseResponse::default();
    }
    let n_terms = max_lag.saturating_add(1);
    match tf
        .numerator()
        .series(tf.denominator(), n_terms, Some(config.max_expression_terms()))
    {
        Ok(h) => ImpulseResponse {
            coefficients: h.into_iter().enumerate().collect(),
        },
        Err(e) => {
            warn!(error = %e, max_lag, "impulse response expansion failed");
            ImpulseResponse::default()
        }
    }
}

/// Derives the transfer function of `model` and expands its impulse
/// response up to `max_lag`.
///
/// # Errors
///
/// Only the derivation errors of [`derive_transfer_function()`]; expansion
/// failures give an empty response.
///
/// # Example
///
/// ```
/// use lagtf_analysis::{AnalysisConfig, compute_impulse_response};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(0, 0, 1).with_ma_params([0.5]).build().unwrap();
/// let h = compute_impulse_response(&model, 5, &AnalysisConfig::default()).unwrap();
/// assert_eq!(h.to_numeric().unwrap(), vec![1.0, 0.5, 0.0, 0.0, 0.0, 0.0]);
/// ```
#[tracing::instrument(skip(model, config), fields(model = %model.name()))]
pub fn compute_impulse_response(
    model: &Model,
    max_lag: usize,
    config: &AnalysisConfig,
) -> Result<ImpulseResponse, AnalysisError> {
    let tf = derive_transfer_function(model, config)?;
    Ok(impulse_response(&tf, max_lag, config))
}
