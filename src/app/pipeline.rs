//! Shared "fit pipeline" logic used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! design matrix -> OLS solve -> fit metrics -> per-row residuals
//!
//! The front-end can then focus on prompting and printing.

use crate::domain::{Coefficient, FittedModel, ObservationTable, RowFit, Selection};
use crate::error::AppError;
use crate::math;
use crate::report;

/// All computed outputs of a single `linfit fit` run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub model: FittedModel,
    pub row_fits: Vec<RowFit>,
}

/// Execute the full regression pipeline and return the computed outputs.
///
/// Everything here is a pure, deterministic function of the table and the
/// selection; running it twice yields bit-identical results.
pub fn run_fit(table: &ObservationTable, selection: &Selection) -> Result<RunOutput, AppError> {
    let x = math::design_matrix(table, selection);
    let y = math::response_vector(table, selection);

    let beta = math::solve_ols(&x, &y)?;
    let metrics = math::evaluate_fit(&x, &y, &beta)?;
    let row_fits = report::compute_row_fits(&x, &y, &beta)?;

    // Coefficient vector is intercept-first, then one slope per independent
    // column in selection order.
    let terms = selection
        .independents()
        .iter()
        .zip(beta.iter().skip(1))
        .map(|(col, value)| Coefficient {
            name: col.name.clone(),
            value: *value,
        })
        .collect();

    let model = FittedModel {
        dependent: selection.dependent().name.clone(),
        intercept: beta[0],
        terms,
        metrics,
    };

    Ok(RunOutput { model, row_fits })
}
