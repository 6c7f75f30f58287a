//! Ordinary least squares via the Moore-Penrose pseudo-inverse.
//!
//! We solve the normal equations as:
//!
//! ```text
//! beta = pinv(Xᵀ X) · Xᵀ · y
//! ```
//!
//! Implementation choices:
//! - The pseudo-inverse is used instead of a direct inverse so that a singular
//!   or near-singular `Xᵀ X` (perfectly collinear predictors, or more columns
//!   than independent observations) still yields a minimum-norm least-squares
//!   solution instead of failing outright.
//! - For a full-rank design matrix the result equals the unique least-squares
//!   estimator. For rank-deficient matrices the result is *a* least-squares
//!   solution, not a unique one; callers should not interpret individual
//!   coefficients of a collinear fit.
//! - All arithmetic is f64. No tolerance knob is exposed; small singular
//!   values are truncated internally.

use nalgebra::{DMatrix, DVector};

use crate::math::RegressionError;

/// Singular values of `Xᵀ X` at or below this threshold are treated as zero
/// when forming the pseudo-inverse.
const PINV_EPS: f64 = 1e-10;

/// Solve the least-squares problem for `beta`.
///
/// Errors on a zero-row design matrix or a response length mismatch; these
/// would otherwise surface as cryptic shape panics deep in the linear algebra.
pub fn solve_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, RegressionError> {
    if x.nrows() == 0 {
        return Err(RegressionError::EmptyDesign);
    }
    if y.len() != x.nrows() {
        return Err(RegressionError::ResponseLength {
            rows: x.nrows(),
            response: y.len(),
        });
    }

    let xt = x.transpose();
    let xtx = &xt * x;
    let pinv = xtx
        .pseudo_inverse(PINV_EPS)
        .map_err(RegressionError::PseudoInverse)?;

    Ok(pinv * (&xt * y))
}
