//! Engine configuration for transfer-function analysis.

use lagtf_model::{CoefficientClass, is_valid_unknown_name};

use crate::error::AnalysisError;

/// Per-class scales of the default parameter values used by the frequency
/// response: the `i`-th unknown of a class gets `scale * i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultScales {
    ar: f64,
    ma: f64,
    seasonal_ar: f64,
    seasonal_ma: f64,
}

impl DefaultScales {
    /// Creates a scale set.
    pub fn new(ar: f64, ma: f64, seasonal_ar: f64, seasonal_ma: f64) -> Self {
        Self {
            ar,
            ma,
            seasonal_ar,
            seasonal_ma,
        }
    }

    /// Returns the scale of `class`.
    pub fn scale(&self, class: CoefficientClass) -> f64 {
        match class {
            CoefficientClass::Ar => self.ar,
            CoefficientClass::Ma => self.ma,
            CoefficientClass::SeasonalAr => self.seasonal_ar,
            CoefficientClass::SeasonalMa => self.seasonal_ma,
        }
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        for class in CoefficientClass::ALL {
            let value = self.scale(class);
            if !value.is_finite() {
                return Err(AnalysisError::InvalidDefaultScale { class, value });
            }
        }
        Ok(())
    }
}

impl Default for DefaultScales {
    /// AR `0.1`, MA `0.2`, seasonal AR `0.05`, seasonal MA `0.1`.
    fn default() -> Self {
        Self::new(0.1, 0.2, 0.05, 0.1)
    }
}

/// Configuration shared by every analysis operation.
///
/// # Example
///
/// ```
/// use lagtf_analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_lag_symbol("L")
///     .with_max_degree(256);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.lag_symbol(), "L");
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Name of the lag indeterminate, used for rendering and collision checks.
    lag_symbol: String,
    /// Relative tolerance of the GCD used for simplification.
    gcd_tolerance: f64,
    /// Denominator magnitude below which a frequency is singular.
    singularity_threshold: f64,
    /// Relative residual below which a factor `1 - L^m` counts as exact.
    unit_root_tolerance: f64,
    /// Iteration cap of the root finder.
    root_max_iterations: usize,
    /// Largest polynomial degree a derivation may produce.
    max_degree: usize,
    /// Largest term count of one impulse-response coefficient.
    max_expression_terms: usize,
    /// Largest lag an impulse response may be expanded to.
    max_impulse_lag: usize,
    /// Scales of the default parameter values.
    default_scales: DefaultScales,
}

impl AnalysisConfig {
    /// Creates the default configuration.
    ///
    /// Defaults: `lag_symbol = "B"`, `gcd_tolerance = 1e-9`,
    /// `singularity_threshold = 1e-12`, `unit_root_tolerance = 1e-10`,
    /// `root_max_iterations = 500`, `max_degree = 1024`,
    /// `max_expression_terms = 10_000`, `max_impulse_lag = 100_000`,
    /// default scales per
    /// [`DefaultScales::default()`].
    pub fn new() -> Self {
        Self {
            lag_symbol: "B".to_string(),
            gcd_tolerance: 1e-9,
            singularity_threshold: 1e-12,
            unit_root_tolerance: 1e-10,
            root_max_iterations: 500,
            max_degree: 1024,
            max_expression_terms: 10_000,
            max_impulse_lag: 100_000,
            default_scales: DefaultScales::default(),
        }
    }

    /// Sets the lag symbol.
    pub fn with_lag_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.lag_symbol = symbol.into();
        self
    }

    /// Sets the GCD tolerance.
    pub fn with_gcd_tolerance(mut self, tolerance: f64) -> Self {
        self.gcd_tolerance = tolerance;
        self
    }

    /// Sets the singularity threshold.
    pub fn with_singularity_threshold(mut self, threshold: f64) -> Self {
        self.singularity_threshold = threshold;
        self
    }

    /// Sets the tolerance of exact unit-root factors.
    pub fn with_unit_root_tolerance(mut self, tolerance: f64) -> Self {
        self.unit_root_tolerance = tolerance;
        self
    }

    /// Sets the root-finder iteration cap.
    pub fn with_root_max_iterations(mut self, iterations: usize) -> Self {
        self.root_max_iterations = iterations;
        self
    }

    /// Sets the maximum polynomial degree.
    pub fn with_max_degree(mut self, degree: usize) -> Self {
        self.max_degree = degree;
        self
    }

    /// Sets the maximum term count of an impulse-response coefficient.
    pub fn with_max_expression_terms(mut self, terms: usize) -> Self {
        self.max_expression_terms = terms;
        self
    }

    /// Sets the largest lag an impulse response may reach.
    pub fn with_max_impulse_lag(mut self, lag: usize) -> Self {
        self.max_impulse_lag = lag;
        self
    }

    /// Sets the default parameter scales.
    pub fn with_default_scales(mut self, scales: DefaultScales) -> Self {
        self.default_scales = scales;
        self
    }

    /// Returns the lag symbol.
    pub fn lag_symbol(&self) -> &str {
        &self.lag_symbol
    }

    /// Returns the GCD tolerance.
    pub fn gcd_tolerance(&self) -> f64 {
        self.gcd_tolerance
    }

    /// Returns the singularity threshold.
    pub fn singularity_threshold(&self) -> f64 {
        self.singularity_threshold
    }

    /// Returns the tolerance of exact unit-root factors.
    pub fn unit_root_tolerance(&self) -> f64 {
        self.unit_root_tolerance
    }

    /// Returns the root-finder iteration cap.
    pub fn root_max_iterations(&self) -> usize {
        self.root_max_iterations
    }

    /// Returns the maximum polynomial degree.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Returns the maximum term count of an impulse-response coefficient.
    pub fn max_expression_terms(&self) -> usize {
        self.max_expression_terms
    }

    /// Returns the largest lag an impulse response may reach.
    pub fn max_impulse_lag(&self) -> usize {
        self.max_impulse_lag
    }

    /// Returns the default parameter scales.
    pub fn default_scales(&self) -> &DefaultScales {
        &self.default_scales
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`AnalysisError::InvalidLagSymbol`] | lag symbol is not an identifier |
    /// | [`AnalysisError::InvalidTolerance`] | a tolerance is non-finite or `<= 0` |
    /// | [`AnalysisError::InvalidLimit`] | an iteration, degree, term or lag limit is 0 |
    /// | [`AnalysisError::InvalidDefaultScale`] | a default scale is non-finite |
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !is_valid_unknown_name(&self.lag_symbol) {
            return Err(AnalysisError::InvalidLagSymbol {
                symbol: self.lag_symbol.clone(),
            });
        }
        for (name, value) in [
            ("gcd_tolerance", self.gcd_tolerance),
            ("singularity_threshold", self.singularity_threshold),
            ("unit_root_tolerance", self.unit_root_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AnalysisError::InvalidTolerance { name, value });
            }
        }
        for (name, value) in [
            ("root_max_iterations", self.root_max_iterations),
            ("max_degree", self.max_degree),
            ("max_expression_terms", self.max_expression_terms),
            ("max_impulse_lag", self.max_impulse_lag),
        ] {
            if value < 1 {
                return Err(AnalysisError::InvalidLimit { name, value });
            }
        }
        self.default_scales.validate()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
