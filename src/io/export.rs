//! Export fitted results.
//!
//! Two formats:
//! - per-row fitted values and residuals as CSV (spreadsheet-friendly)
//! - the fitted model (named coefficients + metrics) as JSON
//!
//! Both are write-only presenter outputs for spreadsheets and downstream
//! scripts; `linfit` itself never reads them back. The JSON schema is
//! defined by `domain::FittedModel`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FittedModel, RowFit};
use crate::error::AppError;

/// Write per-row results to a CSV file.
pub fn write_results_csv(
    path: &Path,
    row_fits: &[RowFit],
    dependent: &str,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "row,{dependent}_observed,{dependent}_fitted,residual")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in row_fits {
        writeln!(
            file,
            "{},{:.10},{:.10},{:.10}",
            r.row, r.observed, r.fitted, r.residual
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the fitted model to a JSON file.
pub fn write_model_json(path: &Path, model: &FittedModel) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create model JSON '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, model)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;

    Ok(())
}
