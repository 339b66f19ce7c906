//! Error types for the lagtf-model crate.

use crate::coefficient::CoefficientClass;

/// Error type for model construction and validation.
///
/// Every variant is a caller error: construction fails fast and no model is
/// produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Returned when `p`, `d` and `q` are all zero for a plain model.
    #[error("p, d and q cannot all be zero")]
    AllOrdersZero,

    /// Returned when every plain and seasonal order of a seasonal model is zero.
    #[error("p, d, q, P, D and Q cannot all be zero")]
    AllSeasonalOrdersZero,

    /// Returned when the seasonal period is zero.
    #[error("seasonal period m must be positive")]
    ZeroPeriod,

    /// Returned when a coefficient list does not match its order.
    #[error("{class} coefficient count ({got}) must equal its order ({expected})")]
    LengthMismatch {
        /// Coefficient class of the offending list.
        class: CoefficientClass,
        /// Order of the class.
        expected: usize,
        /// Number of coefficients supplied.
        got: usize,
    },

    /// Returned when a numeric coefficient is NaN or infinite.
    #[error("{class} coefficient {position} is not finite: {value}")]
    NonFiniteCoefficient {
        /// Coefficient class.
        class: CoefficientClass,
        /// 1-based position within the class.
        position: usize,
        /// Offending value.
        value: f64,
    },

    /// Returned when the model constant is NaN or infinite.
    #[error("constant is not finite: {value}")]
    NonFiniteConstant {
        /// Offending value.
        value: f64,
    },

    /// Returned when an unknown coefficient name is empty or not an identifier.
    #[error("invalid unknown name {name:?}")]
    InvalidUnknownName {
        /// Offending name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_all_orders_zero() {
        assert_eq!(
            ModelError::AllOrdersZero.to_string(),
            "p, d and q cannot all be zero"
        );
        assert_eq!(
            ModelError::AllSeasonalOrdersZero.to_string(),
            "p, d, q, P, D and Q cannot all be zero"
        );
    }

    #[test]
    fn error_zero_period() {
        assert_eq!(
            ModelError::ZeroPeriod.to_string(),
            "seasonal period m must be positive"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = ModelError::LengthMismatch {
            class: CoefficientClass::SeasonalMa,
            expected: 2,
            got: 1,
        };
        assert_eq!(
            e.to_string(),
            "seasonal MA coefficient count (1) must equal its order (2)"
        );
    }

    #[test]
    fn error_non_finite_coefficient() {
        let e = ModelError::NonFiniteCoefficient {
            class: CoefficientClass::Ar,
            position: 2,
            value: f64::NAN,
        };
        assert_eq!(e.to_string(), "AR coefficient 2 is not finite: NaN");
    }

    #[test]
    fn error_non_finite_constant() {
        let e = ModelError::NonFiniteConstant {
            value: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "constant is not finite: inf");
    }

    #[test]
    fn error_invalid_unknown_name() {
        let e = ModelError::InvalidUnknownName {
            name: "1x".to_string(),
        };
        assert_eq!(e.to_string(), "invalid unknown name \"1x\"");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ModelError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ModelError>();
    }
}
