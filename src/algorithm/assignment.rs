//! # Assignment
//!
//! Minimum cost matching of the rows of a cost matrix to its columns with the Hungarian method, in
//! the form of successive shortest augmenting paths with row and column potentials.
//!
//! Rectangular matrices are padded to a square with zero cost cells. Cells with cost `+inf` can't
//! be used in a matching.
use thiserror::Error;

use crate::data::number_types::traits::OrderedField;

/// Reasons for not producing an assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// Not all rows have the same length.
    #[error("row {row} has {found} columns, expected {expected}")]
    DimensionMismatch {
        /// First row with a different length.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of this row.
        found: usize,
    },
    /// A cost is NaN or negative infinity.
    #[error("cost at row {row}, column {column} is not a valid cost")]
    InvalidCost {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        column: usize,
    },
    /// No augmenting path exists for a row, all reachable columns are forbidden.
    #[error("row {row} can't be matched without a forbidden cell")]
    NoImprovingEdge {
        /// Row that couldn't be matched.
        row: usize,
    },
}

/// A minimum cost matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<F> {
    /// Sum of the costs of the matched cells.
    pub cost: F,
    /// Matched `(row, column)` pairs, sorted by row.
    ///
    /// Contains as many pairs as the smaller dimension of the cost matrix.
    pub matches: Vec<(usize, usize)>,
}

impl<F: OrderedField> Assignment<F> {
    /// Column matched to a row, if any.
    pub fn column(&self, row: usize) -> Option<usize> {
        self.matches.iter()
            .find(|&&(i, _)| i == row)
            .map(|&(_, j)| j)
    }
}

/// Find a minimum cost matching.
///
/// # Arguments
///
/// * `costs`: Row major cost matrix. All rows should have the same length.
///
/// # Return value
///
/// The matching, or an error if the input is malformed or if forbidden cells prevent a matching.
pub fn solve<F: OrderedField>(costs: &[Vec<F>]) -> Result<Assignment<F>, AssignmentError> {
    let (nr_rows, nr_columns) = validate(costs)?;
    if nr_rows == 0 || nr_columns == 0 {
        return Ok(Assignment { cost: F::zero(), matches: Vec::new() });
    }

    let n = nr_rows.max(nr_columns);
    let cost = |i: usize, j: usize| {
        if i < nr_rows && j < nr_columns { costs[i][j] } else { F::zero() }
    };

    // Indices are shifted by one, index 0 is the virtual column from which each path starts
    let mut u = vec![F::zero(); n + 1];
    let mut v = vec![F::zero(); n + 1];
    // Row matched to each column, 0 when unmatched
    let mut p = vec![0; n + 1];
    let mut way = vec![0; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![F::infinity(); n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = F::infinity();
            let mut j1 = 0;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            if delta.is_infinite() {
                return Err(AssignmentError::NoImprovingEdge { row: i - 1 });
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] = u[p[j]] + delta;
                    v[j] = v[j] - delta;
                } else {
                    minv[j] = minv[j] - delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path
        while j0 != 0 {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
        }
    }

    let mut matches = (1..=n)
        .map(|j| (p[j] - 1, j - 1))
        .filter(|&(i, j)| i < nr_rows && j < nr_columns)
        .collect::<Vec<_>>();
    matches.sort_unstable();

    let total = matches.iter()
        .fold(F::zero(), |total, &(i, j)| total + costs[i][j]);
    log::debug!("assignment of {} rows to {} columns, cost {:?}", nr_rows, nr_columns, total);

    Ok(Assignment { cost: total, matches })
}

fn validate<F: OrderedField>(costs: &[Vec<F>]) -> Result<(usize, usize), AssignmentError> {
    let nr_columns = costs.first().map_or(0, Vec::len);

    for (i, row) in costs.iter().enumerate() {
        if row.len() != nr_columns {
            return Err(AssignmentError::DimensionMismatch { row: i, expected: nr_columns, found: row.len() });
        }
        if let Some(j) = row.iter().position(|&c| c.is_nan() || c == F::neg_infinity()) {
            return Err(AssignmentError::InvalidCost { row: i, column: j });
        }
    }

    Ok((costs.len(), nr_columns))
}
