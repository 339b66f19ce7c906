//! Integration tests for model construction and component polynomials.

use approx::assert_abs_diff_eq;
use lagtf_model::{Coefficient, ModelBuilder, ModelError, ModelPolynomials};

fn coeffs(polys: &lagtf_poly::LagPolynomial) -> Vec<f64> {
    polys.numeric_coeffs().unwrap()
}

#[test]
fn arima_101_components() {
    let model = ModelBuilder::arima(1, 0, 1)
        .with_ar_params([0.5])
        .with_ma_params([0.2])
        .build()
        .unwrap();
    let polys = ModelPolynomials::from_model(&model);
    assert_eq!(coeffs(&polys.denominator()), vec![1.0, -0.5]);
    assert_eq!(coeffs(&polys.numerator()), vec![1.0, 0.2]);
}

#[test]
fn double_differencing() {
    let model = ModelBuilder::arima(0, 2, 0).build().unwrap();
    let polys = ModelPolynomials::from_model(&model);
    assert_eq!(coeffs(&polys.denominator()), vec![1.0, -2.0, 1.0]);
    assert!(polys.numerator().is_one());
}

#[test]
fn seasonal_differencing_only() {
    let model = ModelBuilder::sarima(0, 0, 0, 0, 1, 0, 4).build().unwrap();
    let polys = ModelPolynomials::from_model(&model);
    assert_eq!(
        coeffs(&polys.denominator()),
        vec![1.0, 0.0, 0.0, 0.0, -1.0]
    );
}

#[test]
fn seasonal_without_seasonal_orders_matches_plain() {
    let plain = ModelBuilder::arima(2, 1, 1)
        .with_ar_params([0.4, -0.2])
        .with_ma_params([0.3])
        .build()
        .unwrap();
    let seasonal = ModelBuilder::sarima(2, 1, 1, 0, 0, 0, 12)
        .with_ar_params([0.4, -0.2])
        .with_ma_params([0.3])
        .build()
        .unwrap();
    let a = ModelPolynomials::from_model(&plain);
    let b = ModelPolynomials::from_model(&seasonal);
    assert_eq!(a.numerator(), b.numerator());
    assert_eq!(a.denominator(), b.denominator());
}

#[test]
fn multiplicative_seasonal_ar() {
    let model = ModelBuilder::sarima(1, 0, 0, 1, 0, 0, 4)
        .with_ar_params([0.5])
        .with_seasonal_ar_params([0.8])
        .build()
        .unwrap();
    let den = coeffs(&ModelPolynomials::from_model(&model).denominator());
    let expected = [1.0, -0.5, 0.0, 0.0, -0.8, 0.4];
    assert_eq!(den.len(), expected.len());
    for (got, want) in den.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn mixed_symbolic_and_numeric_products() {
    let model = ModelBuilder::arima(1, 1, 0)
        .with_ar_params([Coefficient::unknown("a")])
        .build()
        .unwrap();
    let den = ModelPolynomials::from_model(&model).denominator();
    assert_eq!(den.display_with("B").to_string(), "1 + (-1 - a)*B + a*B^2");
}

#[test]
fn default_unknowns_flow_into_polynomials() {
    let model = ModelBuilder::sarima(0, 0, 1, 0, 0, 1, 2).build().unwrap();
    let num = ModelPolynomials::from_model(&model).numerator();
    assert_eq!(
        num.display_with("L").to_string(),
        "1 + theta_1*L + Theta_1*L^2 + Theta_1*theta_1*L^3"
    );
}

#[test]
fn validation_runs_after_materialization() {
    let err = ModelBuilder::sarima(1, 0, 0, 2, 0, 0, 4)
        .with_seasonal_ar_params([0.1])
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::LengthMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));
}
