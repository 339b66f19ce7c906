//! # lagtf-model
//!
//! ARIMA and seasonal ARIMA model values, and the lag polynomials of their
//! components.
//!
//! ```mermaid
//! graph LR
//!     A["ModelBuilder::arima(p, d, q)"] -->|".build()?"| M["Model::Plain"]
//!     B["ModelBuilder::sarima(p, d, q, P, D, Q, m)"] -->|".build()?"| S["Model::Seasonal"]
//!     M --> P["ModelPolynomials::from_model()"]
//!     S --> P
//! ```
//!
//! Coefficients are either numbers or named unknowns ([`Coefficient`]).
//! Lists left out at construction are filled with unknowns named after
//! their class:
//!
//! | Class | Default names |
//! |-------|---------------|
//! | AR | `phi_1 .. phi_p` |
//! | MA | `theta_1 .. theta_q` |
//! | seasonal AR | `Phi_1 .. Phi_P` |
//! | seasonal MA | `Theta_1 .. Theta_Q` |

mod coefficient;
mod defaults;
mod error;
mod model;
mod polynomials;

pub use coefficient::{Coefficient, CoefficientClass, is_valid_unknown_name};
pub use defaults::materialize_defaults;
pub use error::ModelError;
pub use model::{
    ArimaPart, Model, ModelBuilder, SeasonalPart, create_plain_model, create_seasonal_model,
};
pub use polynomials::{
    ModelPolynomials, ar_polynomial, difference_polynomial, ma_polynomial,
    seasonal_ar_polynomial, seasonal_difference_polynomial, seasonal_ma_polynomial,
};
