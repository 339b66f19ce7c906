//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use lagtf_analysis::{AnalysisConfig, DefaultScales, ReportOptions};
use lagtf_model::is_valid_unknown_name;

use crate::config::{DefaultsToml, EngineToml, LagtfConfig, ReportToml};

/// Builds a validated [`AnalysisConfig`] from the `[engine]` and
/// `[defaults]` tables.
pub fn build_analysis_config(
    engine: &EngineToml,
    defaults: &DefaultsToml,
) -> Result<AnalysisConfig> {
    let scales = DefaultScales::new(
        defaults.ar,
        defaults.ma,
        defaults.seasonal_ar,
        defaults.seasonal_ma,
    );
    let cfg = AnalysisConfig::new()
        .with_lag_symbol(&engine.lag_symbol)
        .with_gcd_tolerance(engine.gcd_tolerance)
        .with_singularity_threshold(engine.singularity_threshold)
        .with_unit_root_tolerance(engine.unit_root_tolerance)
        .with_root_max_iterations(engine.root_max_iterations)
        .with_max_degree(engine.max_degree)
        .with_max_expression_terms(engine.max_expression_terms)
        .with_max_impulse_lag(engine.max_impulse_lag)
        .with_default_scales(scales);
    cfg.validate().context("invalid [engine] or [defaults] settings")?;
    Ok(cfg)
}

/// Builds [`ReportOptions`] from the `[report]` table.
///
/// Parameter values must be named like unknowns and be finite.
pub fn build_report_options(report: &ReportToml) -> Result<ReportOptions> {
    for (name, value) in &report.param_values {
        if !is_valid_unknown_name(name) {
            bail!("invalid parameter name in [report.param_values]: {name:?}");
        }
        if !value.is_finite() {
            bail!("parameter {name} must be finite, got {value}");
        }
    }
    Ok(ReportOptions::new()
        .with_stability(report.include_stability)
        .with_impulse(report.include_impulse)
        .with_frequency(report.include_frequency)
        .with_max_lag(report.max_lag)
        .with_frequencies(report.frequencies.clone())
        .with_param_values(report.param_values.clone()))
}

/// Builds both the analysis configuration and the report options.
pub fn build_all(config: &LagtfConfig) -> Result<(AnalysisConfig, ReportOptions)> {
    let analysis = build_analysis_config(&config.engine, &config.defaults)?;
    let report = build_report_options(&config.report)?;
    Ok((analysis, report))
}
