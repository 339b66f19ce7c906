//! ARIMA and seasonal ARIMA model values and their builder.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::coefficient::{Coefficient, CoefficientClass, is_valid_unknown_name};
use crate::defaults::materialize_defaults;
use crate::error::ModelError;

/// The non-seasonal part shared by every model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArimaPart {
    p: usize,
    d: usize,
    q: usize,
    ar_params: Vec<Coefficient>,
    ma_params: Vec<Coefficient>,
    constant: f64,
    name: String,
}

impl ArimaPart {
    /// Returns the AR order.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing order.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns the AR coefficients (length `p`).
    pub fn ar_params(&self) -> &[Coefficient] {
        &self.ar_params
    }

    /// Returns the MA coefficients (length `q`).
    pub fn ma_params(&self) -> &[Coefficient] {
        &self.ma_params
    }

    /// Returns the model constant.
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The seasonal part `(P, D, Q, m)` of a seasonal model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPart {
    #[serde(rename = "P")]
    p: usize,
    #[serde(rename = "D")]
    d: usize,
    #[serde(rename = "Q")]
    q: usize,
    m: usize,
    #[serde(rename = "seasonal_ar_params")]
    ar_params: Vec<Coefficient>,
    #[serde(rename = "seasonal_ma_params")]
    ma_params: Vec<Coefficient>,
}

impl SeasonalPart {
    /// Returns the seasonal AR order `P`.
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the seasonal differencing order `D`.
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the seasonal MA order `Q`.
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns the seasonal period `m`.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Returns the seasonal AR coefficients (length `P`).
    pub fn ar_params(&self) -> &[Coefficient] {
        &self.ar_params
    }

    /// Returns the seasonal MA coefficients (length `Q`).
    pub fn ma_params(&self) -> &[Coefficient] {
        &self.ma_params
    }
}

/// A validated, immutable ARIMA or seasonal ARIMA model.
///
/// Built through [`ModelBuilder`], [`create_plain_model()`] or
/// [`create_seasonal_model()`]. Serializes with a `model_type` tag of
/// `"ARIMA"` or `"SARIMA"`.
///
/// # Example
///
/// ```
/// use lagtf_model::ModelBuilder;
///
/// let model = ModelBuilder::arima(1, 0, 1)
///     .with_ar_params([0.5])
///     .build()
///     .unwrap();
/// assert_eq!(model.name(), "ARIMA(1,0,1)");
/// assert_eq!(model.ma_params()[0].unknown_name(), Some("theta_1"));
/// assert_eq!(model.to_string(), "ARIMA(1,0,1): AR(1), I(0), MA(1)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model_type")]
pub enum Model {
    /// `ARIMA(p,d,q)`.
    #[serde(rename = "ARIMA")]
    Plain(ArimaPart),
    /// `SARIMA(p,d,q)(P,D,Q,m)`.
    #[serde(rename = "SARIMA")]
    Seasonal {
        /// Non-seasonal part.
        #[serde(flatten)]
        core: ArimaPart,
        /// Seasonal part.
        #[serde(flatten)]
        seasonal: SeasonalPart,
    },
}

impl Model {
    /// Returns the non-seasonal part.
    pub fn core(&self) -> &ArimaPart {
        match self {
            Model::Plain(core) | Model::Seasonal { core, .. } => core,
        }
    }

    /// Returns the seasonal part, if any.
    pub fn seasonal(&self) -> Option<&SeasonalPart> {
        match self {
            Model::Plain(_) => None,
            Model::Seasonal { seasonal, .. } => Some(seasonal),
        }
    }

    /// Returns `true` for the seasonal variant.
    pub fn is_seasonal(&self) -> bool {
        matches!(self, Model::Seasonal { .. })
    }

    /// Returns the AR order.
    pub fn p(&self) -> usize {
        self.core().p
    }

    /// Returns the differencing order.
    pub fn d(&self) -> usize {
        self.core().d
    }

    /// Returns the MA order.
    pub fn q(&self) -> usize {
        self.core().q
    }

    /// Returns the AR coefficients.
    pub fn ar_params(&self) -> &[Coefficient] {
        &self.core().ar_params
    }

    /// Returns the MA coefficients.
    pub fn ma_params(&self) -> &[Coefficient] {
        &self.core().ma_params
    }

    /// Returns the model constant.
    pub fn constant(&self) -> f64 {
        self.core().constant
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.core().name
    }

    /// Returns the coefficients of `class` (empty seasonal lists for a plain
    /// model).
    pub fn params(&self, class: CoefficientClass) -> &[Coefficient] {
        match class {
            CoefficientClass::Ar => self.ar_params(),
            CoefficientClass::Ma => self.ma_params(),
            CoefficientClass::SeasonalAr => self.seasonal().map_or(&[][..], |s| &s.ar_params),
            CoefficientClass::SeasonalMa => self.seasonal().map_or(&[][..], |s| &s.ma_params),
        }
    }

    /// Names of every unknown coefficient, across all classes.
    pub fn unknowns(&self) -> BTreeSet<&str> {
        CoefficientClass::ALL
            .into_iter()
            .flat_map(|class| self.params(class))
            .filter_map(Coefficient::unknown_name)
            .collect()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core();
        write!(
            f,
            "{}: AR({}), I({}), MA({})",
            core.name, core.p, core.d, core.q
        )?;
        if let Some(s) = self.seasonal() {
            write!(f, ", SAR({}), SI({}), SMA({}), m={}", s.p, s.d, s.q, s.m)?;
        }
        Ok(())
    }
}

/// Builder for [`Model`].
///
/// Omitted coefficient lists are materialized as unknowns (`phi_i`,
/// `theta_i`, `Phi_i`, `Theta_i`) before validation. The name defaults to
/// `ARIMA(p,d,q)` or `SARIMA(p,d,q)(P,D,Q,m)`.
///
/// # Example
///
/// ```
/// use lagtf_model::{Coefficient, ModelBuilder};
///
/// let model = ModelBuilder::sarima(1, 0, 0, 1, 0, 0, 4)
///     .with_ar_params([0.5])
///     .with_seasonal_ar_params([Coefficient::unknown("s")])
///     .build()
///     .unwrap();
/// assert_eq!(model.name(), "SARIMA(1,0,0)(1,0,0,4)");
/// assert!(model.unknowns().contains("s"));
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    p: usize,
    d: usize,
    q: usize,
    /// `(P, D, Q, m)` for a seasonal model.
    seasonal: Option<(usize, usize, usize, usize)>,
    ar_params: Option<Vec<Coefficient>>,
    ma_params: Option<Vec<Coefficient>>,
    seasonal_ar_params: Option<Vec<Coefficient>>,
    seasonal_ma_params: Option<Vec<Coefficient>>,
    constant: f64,
    name: Option<String>,
}

impl ModelBuilder {
    /// Starts an `ARIMA(p,d,q)` model.
    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal: None,
            ar_params: None,
            ma_params: None,
            seasonal_ar_params: None,
            seasonal_ma_params: None,
            constant: 0.0,
            name: None,
        }
    }

    /// Starts a `SARIMA(p,d,q)(P,D,Q,m)` model.
    #[allow(non_snake_case)]
    pub fn sarima(
        p: usize,
        d: usize,
        q: usize,
        P: usize,
        D: usize,
        Q: usize,
        m: usize,
    ) -> Self {
        Self {
            seasonal: Some((P, D, Q, m)),
            ..Self::arima(p, d, q)
        }
    }

    /// Sets the AR coefficients.
    pub fn with_ar_params<I, C>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coefficient>,
    {
        self.ar_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the MA coefficients.
    pub fn with_ma_params<I, C>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coefficient>,
    {
        self.ma_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the seasonal AR coefficients.
    ///
    /// On a plain model any non-empty list fails validation.
    pub fn with_seasonal_ar_params<I, C>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coefficient>,
    {
        self.seasonal_ar_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the seasonal MA coefficients.
    ///
    /// On a plain model any non-empty list fails validation.
    pub fn with_seasonal_ma_params<I, C>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coefficient>,
    {
        self.seasonal_ma_params = Some(params.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the model constant (default 0).
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Sets the model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Materializes defaults, validates, and builds the model.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ModelError::AllOrdersZero`] | plain model with `p = d = q = 0` |
    /// | [`ModelError::AllSeasonalOrdersZero`] | seasonal model with all six orders 0 |
    /// | [`ModelError::ZeroPeriod`] | seasonal model with `m = 0` |
    /// | [`ModelError::LengthMismatch`] | a coefficient list does not match its order |
    /// | [`ModelError::NonFiniteCoefficient`] | a numeric coefficient is NaN or infinite |
    /// | [`ModelError::InvalidUnknownName`] | an unknown name is empty or not an identifier |
    /// | [`ModelError::NonFiniteConstant`] | the constant is NaN or infinite |
    pub fn build(self) -> Result<Model, ModelError> {
        let (sp, sd, sq, m) = self.seasonal.unwrap_or((0, 0, 0, 0));
        match self.seasonal {
            None if self.p == 0 && self.d == 0 && self.q == 0 => {
                return Err(ModelError::AllOrdersZero);
            }
            Some(_) if self.p + self.d + self.q + sp + sd + sq == 0 => {
                return Err(ModelError::AllSeasonalOrdersZero);
            }
            Some(_) if m == 0 => return Err(ModelError::ZeroPeriod),
            _ => {}
        }

        let ar = materialize_defaults(CoefficientClass::Ar, self.p, self.ar_params);
        let ma = materialize_defaults(CoefficientClass::Ma, self.q, self.ma_params);
        let sar =
            materialize_defaults(CoefficientClass::SeasonalAr, sp, self.seasonal_ar_params);
        let sma =
            materialize_defaults(CoefficientClass::SeasonalMa, sq, self.seasonal_ma_params);

        check_params(CoefficientClass::Ar, self.p, &ar)?;
        check_params(CoefficientClass::Ma, self.q, &ma)?;
        check_params(CoefficientClass::SeasonalAr, sp, &sar)?;
        check_params(CoefficientClass::SeasonalMa, sq, &sma)?;
        if !self.constant.is_finite() {
            return Err(ModelError::NonFiniteConstant {
                value: self.constant,
            });
        }

        let name = self.name.unwrap_or_else(|| match self.seasonal {
            None => format!("ARIMA({},{},{})", self.p, self.d, self.q),
            Some(_) => format!(
                "SARIMA({},{},{})({sp},{sd},{sq},{m})",
                self.p, self.d, self.q
            ),
        });
        let core = ArimaPart {
            p: self.p,
            d: self.d,
            q: self.q,
            ar_params: ar,
            ma_params: ma,
            constant: self.constant,
            name,
        };
        Ok(match self.seasonal {
            None => Model::Plain(core),
            Some(_) => Model::Seasonal {
                core,
                seasonal: SeasonalPart {
                    p: sp,
                    d: sd,
                    q: sq,
                    m,
                    ar_params: sar,
                    ma_params: sma,
                },
            },
        })
    }
}

fn check_params(
    class: CoefficientClass,
    order: usize,
    params: &[Coefficient],
) -> Result<(), ModelError> {
    if params.len() != order {
        return Err(ModelError::LengthMismatch {
            class,
            expected: order,
            got: params.len(),
        });
    }
    for (idx, coeff) in params.iter().enumerate() {
        match coeff {
            Coefficient::Numeric(value) if !value.is_finite() => {
                return Err(ModelError::NonFiniteCoefficient {
                    class,
                    position: idx + 1,
                    value: *value,
                });
            }
            Coefficient::Unknown(name) if !is_valid_unknown_name(name) => {
                return Err(ModelError::InvalidUnknownName { name: name.clone() });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Creates an `ARIMA(p,d,q)` model.
///
/// `None` coefficient lists are materialized as unknowns; `None` constant is
/// 0 and `None` name is `"ARIMA(p,d,q)"`.
///
/// # Errors
///
/// See [`ModelBuilder::build()`].
pub fn create_plain_model(
    p: usize,
    d: usize,
    q: usize,
    ar_params: Option<Vec<Coefficient>>,
    ma_params: Option<Vec<Coefficient>>,
    constant: Option<f64>,
    name: Option<String>,
) -> Result<Model, ModelError> {
    ModelBuilder {
        ar_params,
        ma_params,
        constant: constant.unwrap_or(0.0),
        name,
        ..ModelBuilder::arima(p, d, q)
    }
    .build()
}

/// Creates a `SARIMA(p,d,q)(P,D,Q,m)` model.
///
/// Defaults follow [`create_plain_model()`]; the default name is
/// `"SARIMA(p,d,q)(P,D,Q,m)"`.
///
/// # Errors
///
/// See [`ModelBuilder::build()`].
#[allow(clippy::too_many_arguments, non_snake_case)]
pub fn create_seasonal_model(
    p: usize,
    d: usize,
    q: usize,
    P: usize,
    D: usize,
    Q: usize,
    m: usize,
    ar_params: Option<Vec<Coefficient>>,
    ma_params: Option<Vec<Coefficient>>,
    seasonal_ar_params: Option<Vec<Coefficient>>,
    seasonal_ma_params: Option<Vec<Coefficient>>,
    constant: Option<f64>,
    name: Option<String>,
) -> Result<Model, ModelError> {
    ModelBuilder {
        ar_params,
        ma_params,
        seasonal_ar_params,
        seasonal_ma_params,
        constant: constant.unwrap_or(0.0),
        name,
        ..ModelBuilder::sarima(p, d, q, P, D, Q, m)
    }
    .build()
}
