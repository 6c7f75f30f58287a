//! Design matrix and response vector construction.
//!
//! The design matrix has shape `n × (k+1)`:
//!
//! - column 0 is all ones (intercept)
//! - columns `1..=k` hold the selected independent variables, in the order
//!   they were requested
//!
//! Both builders are pure functions of the table and the validated selection.
//! A zero-row table yields a degenerate `0 × (k+1)` matrix; the solver is
//! responsible for rejecting it.

use nalgebra::{DMatrix, DVector};

use crate::domain::{ObservationTable, Selection};

/// Build the design matrix for the selected independent columns.
pub fn design_matrix(table: &ObservationTable, selection: &Selection) -> DMatrix<f64> {
    let n = table.n_rows();
    let k = selection.k();

    DMatrix::from_fn(n, k + 1, |row, col| {
        if col == 0 {
            1.0
        } else {
            table.value(row, selection.independents()[col - 1].index)
        }
    })
}

/// Build the response vector for the dependent column, index-aligned with the
/// design matrix rows.
pub fn response_vector(table: &ObservationTable, selection: &Selection) -> DVector<f64> {
    let dep = selection.dependent().index;
    DVector::from_fn(table.n_rows(), |row, _| table.value(row, dep))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ObservationTable {
        ObservationTable::new(
            vec!["y".to_string(), "a".to_string(), "b".to_string()],
            vec![
                vec![10.0, 1.0, 4.0],
                vec![20.0, 2.0, 5.0],
                vec![30.0, 3.0, 6.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn prepends_exactly_one_intercept_column() {
        let t = table();
        let sel = Selection::resolve(&t, "y", &["a".to_string()]).unwrap();
        let x = design_matrix(&t, &sel);

        assert_eq!(x.shape(), (3, 2));
        for row in 0..3 {
            assert_eq!(x[(row, 0)], 1.0);
        }
        assert_eq!(x.column(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn columns_follow_request_order() {
        let t = table();
        let sel = Selection::resolve(&t, "y", &["b".to_string(), "a".to_string()]).unwrap();
        let x = design_matrix(&t, &sel);

        assert_eq!(x.shape(), (3, 3));
        assert_eq!(x.column(1).iter().copied().collect::<Vec<_>>(), vec![4.0, 5.0, 6.0]);
        assert_eq!(x.column(2).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn response_vector_is_row_aligned() {
        let t = table();
        let sel = Selection::resolve(&t, "y", &["a".to_string()]).unwrap();
        let y = response_vector(&t, &sel);

        assert_eq!(y.iter().copied().collect::<Vec<_>>(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn empty_table_yields_degenerate_matrix() {
        let t = ObservationTable::new(
            vec!["y".to_string(), "a".to_string()],
            Vec::new(),
        )
        .unwrap();
        let sel = Selection::resolve(&t, "y", &["a".to_string()]).unwrap();

        let x = design_matrix(&t, &sel);
        assert_eq!(x.shape(), (0, 2));
        assert_eq!(response_vector(&t, &sel).len(), 0);
    }
}
