//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! All user-facing wording about degenerate fits ("no variance to explain",
//! "adjusted R² unavailable") lives here; the numeric core only reports
//! absent values.

use crate::domain::{FitMetrics, FittedModel, RowFit, Selection};
use crate::io::ingest::IngestedData;

/// Format the full run summary (dataset stats + selection + equation + fit).
pub fn format_run_summary(
    ingest: &IngestedData,
    selection: &Selection,
    model: &FittedModel,
) -> String {
    let mut out = String::new();

    out.push_str("=== linfit - OLS Regression ===\n");
    out.push_str(&format!(
        "Rows: read={} used={} duplicates_removed={}\n",
        ingest.stats.rows_read, ingest.stats.rows_used, ingest.stats.duplicates_removed
    ));
    if !ingest.stats.dropped_columns.is_empty() {
        out.push_str(&format!(
            "Dropped non-numeric columns: {}\n",
            ingest.stats.dropped_columns.join(", ")
        ));
    }
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped {} malformed row(s); first: line {}: {}\n",
            ingest.row_errors.len(),
            ingest.row_errors[0].line,
            ingest.row_errors[0].message
        ));
    }

    out.push_str(&format!(
        "Model: {} ~ {}\n",
        selection.dependent().name,
        selection
            .independents()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    ));

    out.push('\n');
    out.push_str(&format!("{}\n", format_equation(model)));
    out.push_str(&format_metrics(&model.metrics));

    out
}

/// Format the fitted equation, e.g.
/// `price = 50.1234 + 1.2000·area - 2.0000·age`.
pub fn format_equation(model: &FittedModel) -> String {
    let mut out = format!("{} = {:.4}", model.dependent, model.intercept);
    for term in &model.terms {
        if term.value < 0.0 {
            out.push_str(&format!(" - {:.4}·{}", -term.value, term.name));
        } else {
            out.push_str(&format!(" + {:.4}·{}", term.value, term.name));
        }
    }
    out
}

/// Format the fit-quality block.
///
/// Which metric leads is decided by [`FitMetrics::preferred`]; this function
/// only words the result.
pub fn format_metrics(metrics: &FitMetrics) -> String {
    let Some((value, label)) = metrics.preferred() else {
        return "Fit quality: R² undefined — the response is constant, no variance to explain.\n"
            .to_string();
    };

    let mut out = format!(
        "Fit quality: {label} = {value:.4} ({:.1}% of variance explained",
        value * 100.0
    );
    match (metrics.adj_r_squared, metrics.r_squared) {
        (Some(_), Some(r2)) => {
            out.push_str(&format!("; plain R² = {r2:.4})\n"));
        }
        _ => {
            out.push_str(")\n");
            out.push_str(&format!(
                "Adjusted R² unavailable: n={} observations with k={} predictors leaves no error degrees of freedom.\n",
                metrics.n, metrics.k
            ));
        }
    }

    out
}

/// Format the top-N largest-residual table.
pub fn format_residual_table(ranked: &[RowFit], dependent: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("Largest residuals ({dependent}):\n"));
    out.push_str(&format!(
        "{:>6} {:>14} {:>14} {:>14}\n",
        "row", "observed", "fitted", "residual"
    ));
    out.push_str(&format!(
        "{:->6} {:->14} {:->14} {:->14}\n",
        "", "", "", ""
    ));

    for r in ranked {
        out.push_str(&format!(
            "{:>6} {:>14.4} {:>14.4} {:>14.4}\n",
            r.row, r.observed, r.fitted, r.residual
        ));
    }

    out
}

/// Format the `columns` listing: usable numeric columns with ranges.
pub fn format_columns(ingest: &IngestedData) -> String {
    let mut out = String::new();
    let table = &ingest.table;

    out.push_str(&format!(
        "{} numeric column(s), {} row(s):\n",
        table.n_columns(),
        table.n_rows()
    ));
    out.push_str(&format!(
        "{:<20} {:>14} {:>14} {:>14}\n",
        "column", "min", "max", "mean"
    ));

    for (idx, name) in table.column_names().iter().enumerate() {
        let values = table.column_values(idx);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        out.push_str(&format!(
            "{:<20} {:>14.4} {:>14.4} {:>14.4}\n",
            name, min, max, mean
        ));
    }

    if !ingest.stats.dropped_columns.is_empty() {
        out.push_str(&format!(
            "Dropped non-numeric columns: {}\n",
            ingest.stats.dropped_columns.join(", ")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coefficient;

    fn model(metrics: FitMetrics) -> FittedModel {
        FittedModel {
            dependent: "price".to_string(),
            intercept: 50.1234,
            terms: vec![
                Coefficient { name: "area".to_string(), value: 1.2 },
                Coefficient { name: "age".to_string(), value: -2.0 },
            ],
            metrics,
        }
    }

    #[test]
    fn equation_renders_negative_coefficients_with_minus() {
        let m = model(FitMetrics {
            n: 10,
            k: 2,
            r_squared: Some(0.9),
            adj_r_squared: Some(0.87),
        });
        assert_eq!(
            format_equation(&m),
            "price = 50.1234 + 1.2000·area - 2.0000·age"
        );
    }

    #[test]
    fn metrics_prefer_adjusted() {
        let s = format_metrics(&FitMetrics {
            n: 10,
            k: 2,
            r_squared: Some(0.9012),
            adj_r_squared: Some(0.8716),
        });
        assert!(s.contains("adjusted R² = 0.8716"));
        assert!(s.contains("87.2%"));
    }

    #[test]
    fn metrics_fall_back_to_plain_r_squared() {
        let s = format_metrics(&FitMetrics {
            n: 3,
            k: 2,
            r_squared: Some(0.95),
            adj_r_squared: None,
        });
        assert!(s.contains("R² = 0.9500"));
        assert!(s.contains("Adjusted R² unavailable"));
    }

    #[test]
    fn metrics_headline_follows_preferred() {
        for m in [
            FitMetrics { n: 10, k: 2, r_squared: Some(0.9012), adj_r_squared: Some(0.8716) },
            FitMetrics { n: 3, k: 2, r_squared: Some(0.95), adj_r_squared: None },
        ] {
            let (value, label) = m.preferred().unwrap();
            let s = format_metrics(&m);
            assert!(s.starts_with(&format!("Fit quality: {label} = {value:.4}")));
        }
    }

    #[test]
    fn metrics_state_the_degenerate_case() {
        let s = format_metrics(&FitMetrics {
            n: 4,
            k: 1,
            r_squared: None,
            adj_r_squared: None,
        });
        assert!(s.contains("no variance to explain"));
        assert!(!s.contains("NaN"));
    }
}
