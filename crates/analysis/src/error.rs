//! Error types for the lagtf-analysis crate.

use lagtf_model::CoefficientClass;
use lagtf_poly::PolyError;

/// Error type for the analysis entry points.
///
/// Only derivation failures and invalid configuration are fatal. Numeric
/// trouble further down (unsolvable roots, non-invertible pivots, blown-up
/// expansions) is absorbed into empty or sentinel results and never reaches
/// this type, except through the explicit `try_*` functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Returned when a predicted polynomial degree exceeds the configured limit.
    #[error("{side} degree {degree} exceeds the limit of {limit}")]
    DegreeLimitExceeded {
        /// `"numerator"` or `"denominator"`.
        side: &'static str,
        /// Predicted degree.
        degree: usize,
        /// Configured `max_degree`.
        limit: usize,
    },

    /// Returned when a model unknown has the same name as the lag symbol.
    #[error("model unknown {symbol:?} collides with the lag symbol")]
    LagSymbolCollision {
        /// The shared name.
        symbol: String,
    },

    /// Returned when the configured lag symbol is not a valid identifier.
    #[error("invalid lag symbol {symbol:?}")]
    InvalidLagSymbol {
        /// Offending symbol.
        symbol: String,
    },

    /// Returned when a tolerance or threshold is not finite and positive.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidTolerance {
        /// Name of the configuration field.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Returned when a count limit is zero.
    #[error("{name} must be at least 1, got {value}")]
    InvalidLimit {
        /// Name of the configuration field.
        name: &'static str,
        /// Offending value.
        value: usize,
    },

    /// Returned when a default parameter scale is not finite.
    #[error("default {class} scale must be finite, got {value}")]
    InvalidDefaultScale {
        /// Coefficient class of the scale.
        class: CoefficientClass,
        /// Offending value.
        value: f64,
    },

    /// Returned by the `try_*` functions when a numeric computation fails.
    #[error("computation failed: {0}")]
    Computation(#[from] PolyError),
}
