//! Transfer-function derivation and best-effort simplification.

use std::collections::BTreeMap;
use std::fmt;

use lagtf_model::{Model, ModelPolynomials};
use lagtf_poly::{LagPolynomial, PolyError, gcd};
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// A rational function `H(L) = numerator(L) / denominator(L)` in the lag
/// indeterminate.
///
/// Common factors are cancelled at construction when a GCD can be computed.
/// When it cannot, the pair is kept as given; both forms are algebraically
/// equal to the unreduced ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferFunction {
    numerator: LagPolynomial,
    denominator: LagPolynomial,
    lag_symbol: String,
    reduced: bool,
}

impl TransferFunction {
    /// Builds a transfer function, cancelling common factors if possible.
    ///
    /// `tolerance` is the relative GCD tolerance. Simplification failures
    /// are logged at `debug` and leave the pair unreduced.
    pub fn new(
        numerator: LagPolynomial,
        denominator: LagPolynomial,
        lag_symbol: impl Into<String>,
        tolerance: f64,
    ) -> Self {
        let lag_symbol = lag_symbol.into();
        match cancel_common_factor(&numerator, &denominator, tolerance) {
            Ok(Some((num, den))) => {
                debug!(
                    numerator = %num.display_with(&lag_symbol),
                    denominator = %den.display_with(&lag_symbol),
                    "cancelled common factor"
                );
                Self {
                    numerator: num,
                    denominator: den,
                    lag_symbol,
                    reduced: true,
                }
            }
            Ok(None) => Self::unreduced(numerator, denominator, lag_symbol),
            Err(e) => {
                debug!(error = %e, "simplification skipped");
                Self::unreduced(numerator, denominator, lag_symbol)
            }
        }
    }

    /// Builds a transfer function without attempting any cancellation.
    pub fn unreduced(
        numerator: LagPolynomial,
        denominator: LagPolynomial,
        lag_symbol: impl Into<String>,
    ) -> Self {
        Self {
            numerator,
            denominator,
            lag_symbol: lag_symbol.into(),
            reduced: false,
        }
    }

    /// Returns the numerator polynomial.
    pub fn numerator(&self) -> &LagPolynomial {
        &self.numerator
    }

    /// Returns the denominator polynomial.
    pub fn denominator(&self) -> &LagPolynomial {
        &self.denominator
    }

    /// Returns the lag symbol used for rendering.
    pub fn lag_symbol(&self) -> &str {
        &self.lag_symbol
    }

    /// Returns `true` if a non-trivial common factor was cancelled.
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Evaluates `H` at the lag value `lag`, with unknowns taken from `values`.
    ///
    /// A vanishing denominator yields a non-finite result rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`PolyError::UnboundUnknown`] if an unknown has no value.
    pub fn evaluate(
        &self,
        lag: Complex64,
        values: &BTreeMap<String, f64>,
    ) -> Result<Complex64, PolyError> {
        let lookup = |name: &str| values.get(name).copied();
        let num = self.numerator.eval_complex(lag, lookup)?;
        let den = self.denominator.eval_complex(lag, lookup)?;
        Ok(num / den)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = &self.lag_symbol;
        write!(
            f,
            "H({symbol}) = ({}) / ({})",
            self.numerator.display_with(symbol),
            self.denominator.display_with(symbol)
        )
    }
}

/// Divides out the GCD of `num` and `den`; `None` when they are coprime.
fn cancel_common_factor(
    num: &LagPolynomial,
    den: &LagPolynomial,
    tol: f64,
) -> Result<Option<(LagPolynomial, LagPolynomial)>, PolyError> {
    let g = gcd(num, den, tol)?;
    if g.degree() == 0 {
        return Ok(None);
    }
    let reduced_num = num.div_exact(&g, tol)?;
    let reduced_den = den.div_exact(&g, tol)?;
    Ok(Some((reduced_num, reduced_den)))
}

/// Predicted `(numerator, denominator)` degrees of a model's transfer
/// function, before any cancellation.
fn predicted_degrees(model: &Model) -> (usize, usize) {
    let (sp, sd, sq, m) = model
        .seasonal()
        .map_or((0, 0, 0, 0), |s| (s.p(), s.d(), s.q(), s.m()));
    let num = model.q().saturating_add(sq.saturating_mul(m));
    let den = model
        .p()
        .saturating_add(model.d())
        .saturating_add(sp.saturating_add(sd).saturating_mul(m));
    (num, den)
}

/// Derives the transfer function of `model`.
///
/// Plain models give `MA / (AR * (1-L)^d)`; seasonal models multiply in
/// the seasonal MA, seasonal AR and `(1-L^m)^D` factors.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`AnalysisError::LagSymbolCollision`] | a model unknown is named like the lag symbol |
/// | [`AnalysisError::DegreeLimitExceeded`] | predicted degree exceeds `max_degree` |
/// | configuration variants | `config.validate()` fails |
///
/// # Example
///
/// ```
/// use lagtf_analysis::{AnalysisConfig, derive_transfer_function};
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(1, 0, 1)
///     .with_ar_params([0.5])
///     .with_ma_params([0.2])
///     .build()
///     .unwrap();
/// let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
/// assert_eq!(tf.to_string(), "H(B) = (1 + 0.2*B) / (1 - 0.5*B)");
/// ```
#[tracing::instrument(skip(model, config), fields(model = %model.name()))]
pub fn derive_transfer_function(
    model: &Model,
    config: &AnalysisConfig,
) -> Result<TransferFunction, AnalysisError> {
    config.validate()?;
    let symbol = config.lag_symbol();
    if model.unknowns().contains(symbol) {
        return Err(AnalysisError::LagSymbolCollision {
            symbol: symbol.to_string(),
        });
    }

    let limit = config.max_degree();
    let (num_degree, den_degree) = predicted_degrees(model);
    for (side, degree) in [("numerator", num_degree), ("denominator", den_degree)] {
        if degree > limit {
            return Err(AnalysisError::DegreeLimitExceeded {
                side,
                degree,
                limit,
            });
        }
    }

    let polys = ModelPolynomials::from_model(model);
    Ok(TransferFunction::new(
        polys.numerator(),
        polys.denominator(),
        symbol,
        config.gcd_tolerance(),
    ))
}
