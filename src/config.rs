//! TOML configuration file.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level lagtf configuration.
///
/// Every table and key is optional; missing values take the library
/// defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LagtfConfig {
    /// Derivation and numerical settings.
    #[serde(default)]
    pub engine: EngineToml,

    /// Scales of the default unknown values.
    #[serde(default)]
    pub defaults: DefaultsToml,

    /// Sections and ranges of a combined analysis.
    #[serde(default)]
    pub report: ReportToml,
}

impl LagtfConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse TOML config")
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    #[serde(default = "default_lag_symbol")]
    pub lag_symbol: String,
    #[serde(default = "default_gcd_tolerance")]
    pub gcd_tolerance: f64,
    #[serde(default = "default_singularity_threshold")]
    pub singularity_threshold: f64,
    #[serde(default = "default_unit_root_tolerance")]
    pub unit_root_tolerance: f64,
    #[serde(default = "default_root_max_iterations")]
    pub root_max_iterations: usize,
    #[serde(default = "default_max_degree")]
    pub max_degree: usize,
    #[serde(default = "default_max_expression_terms")]
    pub max_expression_terms: usize,
    #[serde(default = "default_max_impulse_lag")]
    pub max_impulse_lag: usize,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            lag_symbol: default_lag_symbol(),
            gcd_tolerance: default_gcd_tolerance(),
            singularity_threshold: default_singularity_threshold(),
            unit_root_tolerance: default_unit_root_tolerance(),
            root_max_iterations: default_root_max_iterations(),
            max_degree: default_max_degree(),
            max_expression_terms: default_max_expression_terms(),
            max_impulse_lag: default_max_impulse_lag(),
        }
    }
}

fn default_lag_symbol() -> String {
    "B".to_string()
}
fn default_gcd_tolerance() -> f64 {
    1e-9
}
fn default_singularity_threshold() -> f64 {
    1e-12
}
fn default_unit_root_tolerance() -> f64 {
    1e-10
}
fn default_root_max_iterations() -> usize {
    500
}
fn default_max_degree() -> usize {
    1024
}
fn default_max_expression_terms() -> usize {
    10_000
}
fn default_max_impulse_lag() -> usize {
    100_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsToml {
    #[serde(default = "default_ar_scale")]
    pub ar: f64,
    #[serde(default = "default_ma_scale")]
    pub ma: f64,
    #[serde(default = "default_seasonal_ar_scale")]
    pub seasonal_ar: f64,
    #[serde(default = "default_seasonal_ma_scale")]
    pub seasonal_ma: f64,
}

impl Default for DefaultsToml {
    fn default() -> Self {
        Self {
            ar: default_ar_scale(),
            ma: default_ma_scale(),
            seasonal_ar: default_seasonal_ar_scale(),
            seasonal_ma: default_seasonal_ma_scale(),
        }
    }
}

fn default_ar_scale() -> f64 {
    0.1
}
fn default_ma_scale() -> f64 {
    0.2
}
fn default_seasonal_ar_scale() -> f64 {
    0.05
}
fn default_seasonal_ma_scale() -> f64 {
    0.1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportToml {
    #[serde(default = "default_true")]
    pub include_stability: bool,
    #[serde(default)]
    pub include_impulse: bool,
    #[serde(default)]
    pub include_frequency: bool,
    #[serde(default = "default_max_lag")]
    pub max_lag: usize,
    #[serde(default = "default_frequencies")]
    pub frequencies: Vec<f64>,
    /// Values of unknowns for the frequency response, e.g. `phi_1 = 0.5`.
    /// When present they replace the defaults, so list every unknown.
    #[serde(default)]
    pub param_values: BTreeMap<String, f64>,
}

impl Default for ReportToml {
    fn default() -> Self {
        Self {
            include_stability: true,
            include_impulse: false,
            include_frequency: false,
            max_lag: default_max_lag(),
            frequencies: default_frequencies(),
            param_values: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_max_lag() -> usize {
    20
}
fn default_frequencies() -> Vec<f64> {
    vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]
}
