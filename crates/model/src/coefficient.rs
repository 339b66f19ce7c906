//! Model coefficients: concrete numbers or named unknowns.

use std::fmt;

use lagtf_poly::Expr;
use serde::Serialize;

/// A single model coefficient.
///
/// Serializes as a bare number or a bare string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coefficient {
    /// A concrete value.
    Numeric(f64),
    /// A free unknown, kept symbolic through every derivation.
    Unknown(String),
}

impl Coefficient {
    /// Creates a named unknown.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown(name.into())
    }

    /// Returns the value of a numeric coefficient.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Unknown(_) => None,
        }
    }

    /// Returns the name of an unknown coefficient.
    pub fn unknown_name(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Unknown(name) => Some(name),
        }
    }

    /// Lifts the coefficient into the expression algebra.
    pub fn to_expr(&self) -> Expr {
        match self {
            Self::Numeric(v) => Expr::constant(*v),
            Self::Unknown(name) => Expr::unknown(name.clone()),
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for Coefficient {
    fn from(name: &str) -> Self {
        Self::Unknown(name.to_string())
    }
}

impl From<String> for Coefficient {
    fn from(name: String) -> Self {
        Self::Unknown(name)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

/// The four coefficient lists a model can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CoefficientClass {
    /// Non-seasonal autoregressive (`phi_i`).
    Ar,
    /// Non-seasonal moving average (`theta_i`).
    Ma,
    /// Seasonal autoregressive (`Phi_i`).
    SeasonalAr,
    /// Seasonal moving average (`Theta_i`).
    SeasonalMa,
}

impl CoefficientClass {
    /// All classes, in model order.
    pub const ALL: [CoefficientClass; 4] = [Self::Ar, Self::Ma, Self::SeasonalAr, Self::SeasonalMa];

    /// Prefix of the default unknown names of this class.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Ar => "phi",
            Self::Ma => "theta",
            Self::SeasonalAr => "Phi",
            Self::SeasonalMa => "Theta",
        }
    }

    /// Default unknown name for the 1-based `position`, e.g. `theta_2`.
    pub fn default_name(self, position: usize) -> String {
        format!("{}_{position}", self.prefix())
    }
}

impl fmt::Display for CoefficientClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ar => "AR",
            Self::Ma => "MA",
            Self::SeasonalAr => "seasonal AR",
            Self::SeasonalMa => "seasonal MA",
        };
        f.write_str(label)
    }
}

/// Returns `true` if `name` can be used as an unknown.
///
/// Names must start with an ASCII letter or `_` and continue with ASCII
/// alphanumerics or `_`.
pub fn is_valid_unknown_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
