//! Goodness-of-fit evaluation: R² and adjusted R².
//!
//! Definitions:
//!
//! ```text
//! SSR = Σ (y_i − ŷ_i)²          ŷ = X · beta
//! SST = Σ (y_i − mean(y))²
//! R²  = 1 − SSR / SST
//! R²_adj = 1 − (1 − R²) · (n − 1) / (n − k − 1)    only when n > k + 1
//! ```
//!
//! Two defined absent states (not errors):
//! - `SST == 0` (constant response): R² is undefined and reported as such.
//! - `n <= k + 1`: adjusted R² has no error degrees of freedom and is absent.

use nalgebra::{DMatrix, DVector};

use crate::domain::FitMetrics;
use crate::math::RegressionError;

/// Evaluate fit quality for a coefficient vector against the data it was
/// (or could have been) fitted on.
pub fn evaluate_fit(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    beta: &DVector<f64>,
) -> Result<FitMetrics, RegressionError> {
    if x.nrows() == 0 {
        return Err(RegressionError::EmptyDesign);
    }
    if y.len() != x.nrows() {
        return Err(RegressionError::ResponseLength {
            rows: x.nrows(),
            response: y.len(),
        });
    }
    if beta.len() != x.ncols() {
        return Err(RegressionError::CoefficientCount {
            columns: x.ncols(),
            coefficients: beta.len(),
        });
    }

    let n = x.nrows();
    // Design matrix columns are intercept + k independents.
    let k = x.ncols() - 1;

    let fitted = x * beta;
    let ssr: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(obs, fit)| (obs - fit).powi(2))
        .sum();

    let mean = y.iter().sum::<f64>() / n as f64;
    let sst: f64 = y.iter().map(|obs| (obs - mean).powi(2)).sum();

    // Constant response: 0/0, mathematically undefined. Report the absence
    // rather than letting NaN leak downstream.
    if sst == 0.0 {
        return Ok(FitMetrics {
            n,
            k,
            r_squared: None,
            adj_r_squared: None,
        });
    }

    let r_squared = 1.0 - ssr / sst;
    let adj_r_squared = if n > k + 1 {
        Some(1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0))
    } else {
        None
    };

    Ok(FitMetrics {
        n,
        k,
        r_squared: Some(r_squared),
        adj_r_squared,
    })
}
