//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV for spreadsheets and downstream scripts

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An immutable numeric table: named columns, row-major f64 values.
///
/// The ingest layer guarantees that:
/// - every row has exactly one value per column
/// - all values are finite
/// - no two rows are bit-identical duplicates
///
/// The table is never mutated after loading; the regression core borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ObservationTable {
    /// Build a table, validating the row shape against the column list.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, AppError> {
        if columns.is_empty() {
            return Err(AppError::new(3, "Table has no columns."));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AppError::new(
                    3,
                    format!(
                        "Row {} has {} values, expected {} (one per column).",
                        i,
                        row.len(),
                        columns.len()
                    ),
                ));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Single cell value. Indices must come from this table.
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[column]).collect()
    }
}

/// A column reference that has been checked against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub name: String,
    pub index: usize,
}

/// Validated variable selection: one dependent column and an ordered,
/// non-empty list of independent columns.
///
/// Construction goes through [`Selection::resolve`], so holding a `Selection`
/// means the names exist in the table, the dependent is not among the
/// independents, and no independent is repeated. Downstream code can index
/// the table without re-checking names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    dependent: ColumnRef,
    independents: Vec<ColumnRef>,
}

impl Selection {
    /// Resolve names against the table, rejecting invalid combinations.
    pub fn resolve(
        table: &ObservationTable,
        dependent: &str,
        independents: &[String],
    ) -> Result<Self, AppError> {
        if independents.is_empty() {
            return Err(AppError::new(
                2,
                "At least one independent column is required.",
            ));
        }

        let dep_index = table.column_index(dependent).ok_or_else(|| {
            AppError::new(
                2,
                format!(
                    "Unknown dependent column `{dependent}`. Available: {}.",
                    table.column_names().join(", ")
                ),
            )
        })?;

        let mut resolved = Vec::with_capacity(independents.len());
        for name in independents {
            if name == dependent {
                return Err(AppError::new(
                    2,
                    format!("Column `{name}` cannot be both dependent and independent."),
                ));
            }
            if resolved.iter().any(|c: &ColumnRef| &c.name == name) {
                return Err(AppError::new(
                    2,
                    format!("Independent column `{name}` is listed more than once."),
                ));
            }
            let index = table.column_index(name).ok_or_else(|| {
                AppError::new(
                    2,
                    format!(
                        "Unknown independent column `{name}`. Available: {}.",
                        table.column_names().join(", ")
                    ),
                )
            })?;
            resolved.push(ColumnRef {
                name: name.clone(),
                index,
            });
        }

        Ok(Self {
            dependent: ColumnRef {
                name: dependent.to_string(),
                index: dep_index,
            },
            independents: resolved,
        })
    }

    pub fn dependent(&self) -> &ColumnRef {
        &self.dependent
    }

    pub fn independents(&self) -> &[ColumnRef] {
        &self.independents
    }

    /// Number of independent variables (k, excluding the intercept).
    pub fn k(&self) -> usize {
        self.independents.len()
    }
}

/// Goodness-of-fit metrics.
///
/// `r_squared` is `None` only in the degenerate case where the response has no
/// variance (SST == 0), which makes R² mathematically undefined. The presenter
/// states this explicitly instead of printing NaN.
///
/// `adj_r_squared` is `None` whenever `n <= k + 1` (no error degrees of
/// freedom). That is a defined absent state, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Number of observations.
    pub n: usize,
    /// Number of independent variables (excluding intercept).
    pub k: usize,
    pub r_squared: Option<f64>,
    pub adj_r_squared: Option<f64>,
}

impl FitMetrics {
    /// The metric to show first: adjusted R² when available, plain R²
    /// otherwise. Adjusted R² corrects for the mechanical inflation of R²
    /// from adding predictors, so it is preferred for display.
    pub fn preferred(&self) -> Option<(f64, &'static str)> {
        if let Some(adj) = self.adj_r_squared {
            return Some((adj, "adjusted R²"));
        }
        self.r_squared.map(|r2| (r2, "R²"))
    }
}

/// One named slope coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub value: f64,
}

/// The fitted model: intercept-first coefficients plus fit metrics.
///
/// `terms` follows the order of the independent columns in the selection,
/// which is also the column order of the design matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub dependent: String,
    pub intercept: f64,
    pub terms: Vec<Coefficient>,
    pub metrics: FitMetrics,
}

/// Per-row fitted value and residual (for rankings and exports).
#[derive(Debug, Clone, PartialEq)]
pub struct RowFit {
    /// Zero-based row index in the observation table.
    pub row: usize,
    pub observed: f64,
    pub fitted: f64,
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ObservationTable {
        ObservationTable::new(
            vec!["price".to_string(), "area".to_string(), "rooms".to_string()],
            vec![
                vec![200.0, 50.0, 2.0],
                vec![320.0, 80.0, 3.0],
                vec![410.0, 110.0, 4.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn table_rejects_ragged_rows() {
        let err = ObservationTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0], vec![3.0]],
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn selection_resolves_in_request_order() {
        let t = table();
        let sel = Selection::resolve(
            &t,
            "price",
            &["rooms".to_string(), "area".to_string()],
        )
        .unwrap();

        assert_eq!(sel.dependent().index, 0);
        assert_eq!(sel.k(), 2);
        assert_eq!(sel.independents()[0].name, "rooms");
        assert_eq!(sel.independents()[0].index, 2);
        assert_eq!(sel.independents()[1].name, "area");
        assert_eq!(sel.independents()[1].index, 1);
    }

    #[test]
    fn selection_rejects_unknown_columns() {
        let t = table();
        assert!(Selection::resolve(&t, "cost", &["area".to_string()]).is_err());
        assert!(Selection::resolve(&t, "price", &["size".to_string()]).is_err());
    }

    #[test]
    fn selection_rejects_dependent_among_independents() {
        let t = table();
        let err = Selection::resolve(
            &t,
            "price",
            &["area".to_string(), "price".to_string()],
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn selection_rejects_empty_and_repeated_independents() {
        let t = table();
        assert!(Selection::resolve(&t, "price", &[]).is_err());
        assert!(
            Selection::resolve(&t, "price", &["area".to_string(), "area".to_string()]).is_err()
        );
    }

    #[test]
    fn metrics_prefer_adjusted_when_present() {
        let m = FitMetrics {
            n: 10,
            k: 2,
            r_squared: Some(0.9),
            adj_r_squared: Some(0.87),
        };
        assert_eq!(m.preferred(), Some((0.87, "adjusted R²")));

        let fallback = FitMetrics {
            n: 3,
            k: 2,
            r_squared: Some(0.9),
            adj_r_squared: None,
        };
        assert_eq!(fallback.preferred(), Some((0.9, "R²")));

        let undefined = FitMetrics {
            n: 4,
            k: 1,
            r_squared: None,
            adj_r_squared: None,
        };
        assert_eq!(undefined.preferred(), None);
    }
}
