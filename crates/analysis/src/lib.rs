//! # lagtf-analysis
//!
//! Transfer functions of ARIMA/SARIMA models and the analyses built on them.
//!
//! ```mermaid
//! graph LR
//!     M["Model"] --> T["derive_transfer_function()"]
//!     T --> S["StabilityReport"]
//!     T --> I["ImpulseResponse"]
//!     T --> F["FrequencyResponse"]
//!     S --> A["ModelAnalysis"]
//!     I --> A
//!     F --> A
//! ```
//!
//! Every `compute_*`/`analyze_*` entry point derives the transfer function
//! first; derivation is the only stage that fails. The downstream analyses
//! degrade instead of failing:
//!
//! | Analysis | Degraded result | Logged at |
//! |----------|-----------------|-----------|
//! | simplification | unreduced numerator/denominator | `debug` |
//! | poles/zeros | empty list | `debug` (symbolic) / `warn` |
//! | impulse response | empty response | `warn` |
//! | frequency response | singular entries (`+inf`, phase `0`) | `warn` / `trace` |

mod config;
mod error;
mod frequency;
mod impulse;
mod report;
mod stability;
mod transfer;

pub use config::{AnalysisConfig, DefaultScales};
pub use error::AnalysisError;
pub use frequency::{
    FrequencyResponse, compute_frequency_response, default_parameter_values, frequency_response,
};
pub use impulse::{ImpulseResponse, compute_impulse_response, impulse_response};
pub use report::{ModelAnalysis, ReportOptions, TransferFunctionSummary, analyze_model};
pub use stability::{
    StabilityReport, analyze_stability, is_stable, poles, try_poles, try_zeros, zeros,
};
pub use transfer::{TransferFunction, derive_transfer_function};
