//! Error types for the lagtf-poly crate.

/// Error type for all fallible polynomial computations.
///
/// These are computation failures, not user errors: callers in
/// `lagtf-analysis` recover from most of them locally (an empty root list,
/// an unreduced transfer function, an empty impulse response).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolyError {
    /// Returned when a division needs a pivot coefficient that is not a
    /// non-zero number (symbolic, or numerically zero).
    #[error("pivot coefficient is not an invertible number: {pivot}")]
    NonInvertiblePivot {
        /// Rendered pivot expression.
        pivot: String,
    },

    /// Returned when dividing by the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// Returned when an exact division leaves a non-negligible remainder.
    #[error("division is not exact (remainder degree {degree})")]
    InexactDivision {
        /// Degree of the leftover remainder.
        degree: usize,
    },

    /// Returned when a numeric operation meets a symbolic coefficient.
    #[error("polynomial has symbolic coefficients (unknowns: {unknowns})")]
    SymbolicCoefficients {
        /// Comma-separated unknown names.
        unknowns: String,
    },

    /// Returned when an evaluation needs a value for an unbound unknown.
    #[error("no value bound for unknown {name:?}")]
    UnboundUnknown {
        /// Name of the unknown.
        name: String,
    },

    /// Returned when the root iteration fails to converge or verify.
    #[error("root finding did not converge after {iterations} iterations")]
    RootsDidNotConverge {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// Returned when a polynomial has non-finite numeric coefficients.
    #[error("polynomial has non-finite coefficients")]
    NonFiniteCoefficients,

    /// Returned when a symbolic expression grows past the configured limit.
    #[error("expression has {terms} terms, limit is {limit}")]
    ExpressionTooLarge {
        /// Number of terms in the offending expression.
        terms: usize,
        /// Configured term limit.
        limit: usize,
    },
}
