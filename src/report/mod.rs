//! Reporting utilities: per-row fits, rankings, and formatted terminal output.

pub mod format;

pub use format::*;

use nalgebra::{DMatrix, DVector};

use crate::domain::RowFit;
use crate::error::AppError;

/// Compute fitted values and residuals for each table row.
pub fn compute_row_fits(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    beta: &DVector<f64>,
) -> Result<Vec<RowFit>, AppError> {
    let fitted = x * beta;

    let mut out = Vec::with_capacity(y.len());
    for (row, (obs, fit)) in y.iter().zip(fitted.iter()).enumerate() {
        if !fit.is_finite() {
            return Err(AppError::new(
                4,
                "Non-finite fitted value during residual computation.",
            ));
        }
        out.push(RowFit {
            row,
            observed: *obs,
            fitted: *fit,
            residual: obs - fit,
        });
    }
    Ok(out)
}

/// Rank rows by absolute residual, worst-fitting first.
pub fn rank_by_abs_residual(row_fits: &[RowFit], top_n: usize) -> Vec<RowFit> {
    let mut sorted = row_fits.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .abs()
            .partial_cmp(&a.residual.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.row.cmp(&b.row))
    });
    sorted.truncate(top_n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_fits_are_observed_minus_fitted() {
        // Line y = 1 + 2x evaluated at x = 1, 2 with observations 3.5 and 4.5.
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[3.5, 4.5]);
        let beta = DVector::from_row_slice(&[1.0, 2.0]);

        let fits = compute_row_fits(&x, &y, &beta).unwrap();
        assert_eq!(fits.len(), 2);
        assert!((fits[0].fitted - 3.0).abs() < 1e-12);
        assert!((fits[0].residual - 0.5).abs() < 1e-12);
        assert!((fits[1].fitted - 5.0).abs() < 1e-12);
        assert!((fits[1].residual + 0.5).abs() < 1e-12);
    }

    #[test]
    fn ranking_orders_by_absolute_residual() {
        let fits = vec![
            RowFit { row: 0, observed: 1.0, fitted: 1.1, residual: -0.1 },
            RowFit { row: 1, observed: 2.0, fitted: 1.0, residual: 1.0 },
            RowFit { row: 2, observed: 3.0, fitted: 3.5, residual: -0.5 },
        ];

        let top = rank_by_abs_residual(&fits, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].row, 1);
        assert_eq!(top[1].row, 2);
    }

    #[test]
    fn ranking_breaks_ties_by_row_index() {
        let fits = vec![
            RowFit { row: 0, observed: 0.0, fitted: 0.5, residual: -0.5 },
            RowFit { row: 1, observed: 0.0, fitted: -0.5, residual: 0.5 },
        ];
        let top = rank_by_abs_residual(&fits, 2);
        assert_eq!(top[0].row, 0);
        assert_eq!(top[1].row, 1);
    }
}
