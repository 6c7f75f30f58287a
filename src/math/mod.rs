//! Numeric core: design matrix construction, OLS solving, fit metrics.
//!
//! Everything in here is a pure function over in-memory arrays: no I/O, no
//! logging, no state across calls. Failures come back as typed
//! [`RegressionError`] values; user-facing messaging lives in the report
//! layer.

pub mod design;
pub mod metrics;
pub mod ols;

pub use design::*;
pub use metrics::*;
pub use ols::*;

use thiserror::Error;

use crate::error::AppError;

/// Shape/usage errors from the numeric core.
///
/// Rank deficiency is deliberately *not* represented here: collinear or
/// underdetermined systems are absorbed by the pseudo-inverse (see
/// [`ols::solve_ols`]) and produce a minimum-norm solution instead of an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegressionError {
    #[error("Design matrix has no rows; nothing to fit.")]
    EmptyDesign,
    #[error("Response vector length {response} does not match design matrix row count {rows}.")]
    ResponseLength { rows: usize, response: usize },
    #[error(
        "Coefficient count {coefficients} does not match design matrix column count {columns}."
    )]
    CoefficientCount { columns: usize, coefficients: usize },
    #[error("Pseudo-inverse computation failed: {0}")]
    PseudoInverse(&'static str),
}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        AppError::new(4, err.to_string())
    }
}
