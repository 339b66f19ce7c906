//! Integration tests for transfer-function derivation and stability.

use approx::assert_abs_diff_eq;
use lagtf_analysis::{
    AnalysisConfig, AnalysisError, TransferFunction, analyze_stability, derive_transfer_function,
    is_stable, poles, zeros,
};
use lagtf_model::{Coefficient, ModelBuilder, create_plain_model, create_seasonal_model};
use lagtf_poly::{Expr, LagPolynomial};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn coeffs(p: &LagPolynomial) -> Vec<f64> {
    p.numeric_coeffs().unwrap()
}

#[test]
fn arima_101() {
    let model = ModelBuilder::arima(1, 0, 1)
        .with_ar_params([0.5])
        .with_ma_params([0.2])
        .build()
        .unwrap();
    let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
    assert_eq!(coeffs(tf.numerator()), vec![1.0, 0.2]);
    assert_eq!(coeffs(tf.denominator()), vec![1.0, -0.5]);
    assert!(!tf.is_reduced());
}

#[test]
fn double_difference_only() {
    let model = create_plain_model(0, 2, 0, None, None, None, None).unwrap();
    let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
    assert!(tf.numerator().is_one());
    assert_eq!(coeffs(tf.denominator()), vec![1.0, -2.0, 1.0]);
    assert_eq!(tf.to_string(), "H(B) = (1) / (1 - 2*B + B^2)");
}

#[test]
fn seasonal_difference_only() {
    let model = create_seasonal_model(0, 0, 0, 0, 1, 0, 4, None, None, None, None, None, None)
        .unwrap();
    let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
    assert_eq!(coeffs(tf.denominator()), vec![1.0, 0.0, 0.0, 0.0, -1.0]);

    let p = poles(&tf, &AnalysisConfig::default());
    assert_eq!(p.len(), 4);
    assert!(p.iter().all(|z| (z.norm() - 1.0).abs() < 1e-9));
}

#[test]
fn multiplicative_seasonal_denominator() {
    let model = ModelBuilder::sarima(1, 0, 0, 1, 0, 0, 4)
        .with_ar_params([0.5])
        .with_seasonal_ar_params([0.8])
        .build()
        .unwrap();
    let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
    let d = coeffs(tf.denominator());
    let expected = [1.0, -0.5, 0.0, 0.0, -0.8, 0.4];
    assert_eq!(d.len(), expected.len());
    for (got, want) in d.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn seasonal_without_seasonal_orders_matches_plain() {
    let cfg = AnalysisConfig::default();
    let plain = ModelBuilder::arima(1, 1, 1)
        .with_ar_params([0.3])
        .with_ma_params([0.4])
        .build()
        .unwrap();
    let seasonal = ModelBuilder::sarima(1, 1, 1, 0, 0, 0, 12)
        .with_ar_params([0.3])
        .with_ma_params([0.4])
        .build()
        .unwrap();
    let a = derive_transfer_function(&plain, &cfg).unwrap();
    let b = derive_transfer_function(&seasonal, &cfg).unwrap();
    assert_eq!(a.numerator(), b.numerator());
    assert_eq!(a.denominator(), b.denominator());
}

#[test]
fn shared_numeric_factor_cancels() {
    // (1 - 0.5B)(1 + 0.3B) / ((1 - 0.5B)(1 - 0.2B))
    let model = ModelBuilder::arima(2, 0, 2)
        .with_ar_params([0.7, -0.1])
        .with_ma_params([-0.2, -0.15])
        .build()
        .unwrap();
    let tf = derive_transfer_function(&model, &AnalysisConfig::default()).unwrap();
    assert!(tf.is_reduced());
    let n = coeffs(tf.numerator());
    let d = coeffs(tf.denominator());
    assert_eq!((n.len(), d.len()), (2, 2));
    assert_abs_diff_eq!(n[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(n[1], 0.3, epsilon = 1e-9);
    assert_abs_diff_eq!(d[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(d[1], -0.2, epsilon = 1e-9);
}

#[test]
fn shared_symbolic_factor_cancels() {
    let shared = LagPolynomial::new(vec![Expr::one(), Expr::unknown("c")]);
    let num = &shared * &LagPolynomial::from_numeric(&[1.0, -0.5]);
    let den = &shared * &LagPolynomial::from_numeric(&[1.0, 0.3]);
    let tf = TransferFunction::new(num, den, "B", 1e-9);
    assert!(tf.is_reduced());
    assert!(tf.numerator().is_numeric());
    assert_abs_diff_eq!(coeffs(tf.numerator())[1], -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(coeffs(tf.denominator())[1], 0.3, epsilon = 1e-9);
}

#[test]
fn symbolic_model_stays_symbolic() {
    let model = ModelBuilder::arima(1, 0, 1).build().unwrap();
    let cfg = AnalysisConfig::default();
    let tf = derive_transfer_function(&model, &cfg).unwrap();
    assert_eq!(tf.to_string(), "H(B) = (1 + theta_1*B) / (1 - phi_1*B)");
    assert!(poles(&tf, &cfg).is_empty());
    assert!(zeros(&tf, &cfg).is_empty());
}

#[test]
fn ar1_stability_boundary() {
    let cfg = AnalysisConfig::default();
    let stable = ModelBuilder::arima(1, 0, 0)
        .with_ar_params([0.5])
        .build()
        .unwrap();
    let unstable = ModelBuilder::arima(1, 0, 0)
        .with_ar_params([1.5])
        .build()
        .unwrap();
    assert!(analyze_stability(&stable, &cfg).unwrap().is_stable());
    let report = analyze_stability(&unstable, &cfg).unwrap();
    assert!(!report.is_stable());
    assert_abs_diff_eq!(report.max_pole_magnitude(), 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(report.stability_margin(), -0.5, epsilon = 1e-12);
}

#[test]
fn differencing_puts_exact_poles_on_the_unit_circle() {
    let cfg = AnalysisConfig::default();
    for d in 1..=6 {
        let model = create_plain_model(0, d, 0, None, None, None, None).unwrap();
        let tf = derive_transfer_function(&model, &cfg).unwrap();
        let p = poles(&tf, &cfg);
        assert_eq!(p, vec![Complex64::new(1.0, 0.0); d], "d = {d}");
        assert!(!is_stable(&tf, &cfg));

        let report = analyze_stability(&model, &cfg).unwrap();
        assert_eq!(report.pole_magnitudes(), vec![1.0; d].as_slice());
        assert_eq!(report.stability_margin(), 0.0);
    }
}

#[test]
fn stationary_part_survives_repeated_differencing() {
    let model = ModelBuilder::arima(1, 3, 0)
        .with_ar_params([0.5])
        .build()
        .unwrap();
    let report = analyze_stability(&model, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.poles().len(), 4);
    assert_abs_diff_eq!(report.poles()[0].re, 0.5, epsilon = 1e-12);
    assert_eq!(&report.pole_magnitudes()[1..], &[1.0; 3]);
    assert_eq!(report.max_pole_magnitude(), 1.0);
}

#[test]
fn double_seasonal_difference_has_exact_unit_poles() {
    let model = ModelBuilder::sarima(0, 2, 0, 0, 2, 0, 12).build().unwrap();
    let report = analyze_stability(&model, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.poles().len(), 26);
    assert!(report.pole_magnitudes().iter().all(|&m| m == 1.0));
    assert_eq!(report.max_pole_magnitude(), 1.0);
    assert_eq!(report.stability_margin(), 0.0);
    let real_ones = report
        .poles()
        .iter()
        .filter(|z| **z == Complex64::new(1.0, 0.0))
        .count();
    assert_eq!(real_ones, 4);
}

#[test]
fn nearly_integrated_ar1_is_stable() {
    let model = ModelBuilder::arima(1, 0, 0)
        .with_ar_params([0.9999995])
        .build()
        .unwrap();
    let report = analyze_stability(&model, &AnalysisConfig::default()).unwrap();
    assert!(report.is_stable());
    assert_eq!(report.pole_magnitudes(), &[0.9999995]);
    assert!(report.stability_margin() > 0.0);
}

#[test]
fn random_ar1_stability_matches_coefficient_magnitude() {
    let mut rng = StdRng::seed_from_u64(11);
    let cfg = AnalysisConfig::default();
    for _ in 0..50 {
        let phi: f64 = rng.random_range(-2.0..2.0);
        if (phi.abs() - 1.0).abs() < 1e-3 {
            continue;
        }
        let model = ModelBuilder::arima(1, 0, 0)
            .with_ar_params([phi])
            .build()
            .unwrap();
        let report = analyze_stability(&model, &cfg).unwrap();
        assert_eq!(report.is_stable(), phi.abs() < 1.0, "phi = {phi}");
        assert_abs_diff_eq!(report.poles()[0].re, phi, epsilon = 1e-9);
    }
}

#[test]
fn lag_symbol_is_configurable() {
    let model = ModelBuilder::arima(1, 0, 0)
        .with_ar_params([Coefficient::unknown("B")])
        .build()
        .unwrap();
    assert!(matches!(
        derive_transfer_function(&model, &AnalysisConfig::default()),
        Err(AnalysisError::LagSymbolCollision { .. })
    ));
    let cfg = AnalysisConfig::new().with_lag_symbol("L");
    let tf = derive_transfer_function(&model, &cfg).unwrap();
    assert_eq!(tf.to_string(), "H(L) = (1) / (1 - B*L)");
}
