//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
//! The tableau is stored densely: every row is a `Vec` of the full width.
use std::fmt::{Display, Formatter, Result as FormatResult};

use cumsum::cumsum_array_owned;
use enum_map::{Enum, enum_map, EnumMap};

use crate::algorithm::settings::Tolerances;
use crate::algorithm::simplex::SimplexError;
use crate::data::linear_program::canonical_form::LinearProgram;
use crate::data::linear_program::elements::{BoundDirection, Objective};
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::float::numerical_precision::clean_zero;
use crate::data::number_types::traits::OrderedField;

/// The columns of a tableau are sorted and grouped together by type.
#[allow(missing_docs)]
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColumnType {
    /// Decision variables of the original problem.
    Structural,
    /// One per constraint, these form the initial basis.
    Slack,
    RightHandSide,
}

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// The layout is as follows, with `n` structural variables and `m` constraints:
///
/// /              || Structural (n) | Slack (m) | b |
/// ===============||================|===========|===|
/// Constraint (m) ||        A       |     I     | b |
/// ---------------||----------------|-----------|---|
/// Objective      ||       -c       |     0     | z |
///
/// The slack block is an identity only initially; pivots change it. The objective row holds the
/// negated costs of the maximization form of the problem, so `z` is the objective value of that
/// maximization form.
#[derive(Clone, PartialEq, Debug)]
pub struct Tableau<F> {
    /// Constraint rows, followed by the objective row.
    rows: Vec<Vec<F>>,
    /// For each constraint row, the index of the column that is basic in it.
    basis: Vec<usize>,
    /// Index one past the last column of each group.
    column_group_end: EnumMap<ColumnType, usize>,
    /// Direction of the original problem, used only when reporting the objective value.
    objective: Objective,
    /// Number of pivots performed on this tableau and the tableaus it was derived from.
    nr_pivots: usize,
}

impl<F: OrderedField> Tableau<F> {
    /// Create a tableau with the slack variables as its basis.
    ///
    /// # Arguments
    ///
    /// * `program`: Problem to solve. If its right-hand side contains negative values, the basis
    /// is not primal feasible.
    pub fn new(program: &LinearProgram<F>) -> Self {
        let nr_variables = program.nr_variables();
        let nr_constraints = program.nr_constraints();
        let column_group_end = Self::column_groups(nr_variables, nr_constraints);
        let width = column_group_end[ColumnType::RightHandSide];

        let mut rows = program.constraints().iter()
            .zip(program.b())
            .enumerate()
            .map(|(i, (coefficients, &rhs))| {
                let mut row = Vec::with_capacity(width);
                row.extend_from_slice(coefficients);
                row.extend((0..nr_constraints).map(|k| if k == i { F::one() } else { F::zero() }));
                row.push(rhs);
                row
            })
            .collect::<Vec<_>>();

        let direction = program.objective().into::<F>();
        let mut objective_row = program.cost().iter()
            .map(|&c| -(direction * c))
            .collect::<Vec<_>>();
        objective_row.resize(width, F::zero());
        rows.push(objective_row);

        Self {
            rows,
            basis: (nr_variables..(nr_variables + nr_constraints)).collect(),
            column_group_end,
            objective: program.objective(),
            nr_pivots: 0,
        }
    }

    fn column_groups(nr_variables: usize, nr_constraints: usize) -> EnumMap<ColumnType, usize> {
        let cumulative = cumsum_array_owned([nr_variables, nr_constraints, 1]);
        enum_map! {
            ColumnType::Structural    => cumulative[0],
            ColumnType::Slack         => cumulative[1],
            ColumnType::RightHandSide => cumulative[2],
        }
    }

    /// Normalize the pivot row and eliminate the pivot column from all other rows.
    ///
    /// This is the only operation that changes the values in the tableau. Afterwards, the pivot
    /// column is basic in the pivot row.
    ///
    /// # Arguments
    ///
    /// * `pivot_row`: Constraint row index, in range `0` until `self.nr_rows()`.
    /// * `pivot_column`: Column index, in range `0` until `self.nr_columns()`.
    /// * `tolerance`: Pivot elements with a smaller magnitude are refused.
    pub fn pivot(
        &mut self,
        pivot_row: usize,
        pivot_column: usize,
        tolerance: F,
    ) -> Result<(), SimplexError> {
        debug_assert!(pivot_row < self.nr_rows());
        debug_assert!(pivot_column < self.nr_columns());

        let pivot_value = self.rows[pivot_row][pivot_column];
        if pivot_value.abs() < tolerance {
            return Err(SimplexError::DegeneratePivot { row: pivot_row, column: pivot_column });
        }

        let mut normalized = std::mem::take(&mut self.rows[pivot_row]);
        for value in &mut normalized {
            *value = *value / pivot_value;
        }

        for (i, row) in self.rows.iter_mut().enumerate() {
            if i == pivot_row {
                continue;
            }

            let factor = row[pivot_column];
            if factor != F::zero() {
                for (value, &pivot_row_value) in row.iter_mut().zip(&normalized) {
                    *value = *value - factor * pivot_row_value;
                }
            }
        }
        self.rows[pivot_row] = normalized;

        log::trace!(
            "pivot on ({}, {}), column {} leaves the basis",
            pivot_row, pivot_column, self.basis[pivot_row],
        );
        self.basis[pivot_row] = pivot_column;
        self.nr_pivots += 1;

        Ok(())
    }

    /// Determine the row to pivot on for the primal method, given a column.
    ///
    /// This is the minimum ratio test: among the rows with a positive entry in the column, the row
    /// with the smallest ratio between right-hand side and that entry is chosen. The first such
    /// row wins ties.
    ///
    /// # Return value
    ///
    /// Index of the row to pivot on. If not found, the problem is unbounded in the direction of
    /// the column.
    pub fn select_primal_pivot_row(&self, column: usize, tolerances: &Tolerances<F>) -> Option<usize> {
        debug_assert!(column < self.nr_columns());

        let mut best: Option<(usize, F)> = None;
        for i in 0..self.nr_rows() {
            let entry = self.rows[i][column];
            if entry > tolerances.pivot {
                let ratio = self.rhs(i) / entry;
                match best {
                    Some((_, smallest)) if smallest <= ratio => {},
                    _ => best = Some((i, ratio)),
                }
            }
        }

        best.map(|(i, _)| i)
    }

    /// Determine the column to pivot on for the dual method, given a row.
    ///
    /// Among the columns with a negative entry in the row, the one with the smallest absolute
    /// ratio between relative cost and that entry is chosen. The first such column wins ties.
    ///
    /// # Return value
    ///
    /// Index of the column to pivot on. If not found, the row can't be made feasible and the
    /// problem is infeasible.
    pub fn select_dual_pivot_column(&self, row: usize, tolerances: &Tolerances<F>) -> Option<usize> {
        debug_assert!(row < self.nr_rows());

        let mut best: Option<(usize, F)> = None;
        for j in 0..self.nr_columns() {
            let entry = self.rows[row][j];
            if entry < -tolerances.pivot {
                let ratio = (self.relative_cost(j) / entry).abs();
                match best {
                    Some((_, smallest)) if smallest <= ratio => {},
                    _ => best = Some((j, ratio)),
                }
            }
        }

        best.map(|(j, _)| j)
    }

    /// Create a larger tableau with an extra constraint `coefficients x <= rhs`.
    ///
    /// The new row is placed just above the objective row, and a slack column for it is placed at
    /// the end of the slack block in every row. The row is expressed in terms of the current basis,
    /// such that its slack can be basic in it: the basis of `self` stays valid in the new tableau.
    /// The right-hand side of the new row can become negative, in which case the dual method should
    /// be used to restore feasibility.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: One value per structural variable.
    /// * `rhs`: Right-hand side of the new constraint.
    pub fn with_constraint(&self, coefficients: &[F], rhs: F) -> Self {
        debug_assert_eq!(coefficients.len(), self.nr_variables());

        let new_slack = self.column_group_end[ColumnType::Slack];
        let mut rows = self.rows.iter()
            .map(|row| {
                let mut row = row.clone();
                row.insert(new_slack, F::zero());
                row
            })
            .collect::<Vec<_>>();

        let mut new_row = vec![F::zero(); new_slack + 2];
        new_row[..coefficients.len()].copy_from_slice(coefficients);
        new_row[new_slack] = F::one();
        new_row[new_slack + 1] = rhs;
        for (basis_row, &basis_column) in rows.iter().zip(&self.basis) {
            let factor = new_row[basis_column];
            if factor != F::zero() {
                for (value, &basis_row_value) in new_row.iter_mut().zip(basis_row) {
                    *value = *value - factor * basis_row_value;
                }
            }
        }

        rows.insert(self.nr_rows(), new_row);
        let mut basis = self.basis.clone();
        basis.push(new_slack);

        Self {
            rows,
            basis,
            column_group_end: Self::column_groups(self.nr_variables(), self.nr_rows() + 1),
            objective: self.objective,
            nr_pivots: self.nr_pivots,
        }
    }

    /// Create a larger tableau with a bound on a single structural variable.
    ///
    /// An upper bound `x_j <= value` is added as is, a lower bound `x_j >= value` as
    /// `-x_j <= -value`.
    pub fn with_bound(&self, variable: usize, direction: BoundDirection, value: F) -> Self {
        debug_assert!(variable < self.nr_variables());

        let sign = direction.into::<F>();
        let mut coefficients = vec![F::zero(); self.nr_variables()];
        coefficients[variable] = sign;

        self.with_constraint(&coefficients, sign * value)
    }

    /// Relative cost of a column, the value in the objective row.
    pub fn relative_cost(&self, j: usize) -> F {
        debug_assert!(j < self.nr_columns());

        self.rows[self.nr_rows()][j]
    }

    /// Right-hand side value of a constraint row.
    pub fn rhs(&self, i: usize) -> F {
        debug_assert!(i < self.nr_rows());

        self.rows[i][self.column_group_end[ColumnType::Slack]]
    }

    /// A single value from the tableau.
    ///
    /// # Arguments
    ///
    /// * `i`: Row index, the objective row has index `self.nr_rows()`.
    /// * `j`: Column index, the right-hand side has index `self.nr_columns()`.
    pub fn get(&self, i: usize, j: usize) -> F {
        debug_assert!(i <= self.nr_rows());
        debug_assert!(j <= self.nr_columns());

        self.rows[i][j]
    }

    /// The value in the bottom right corner: the objective value of the maximization form.
    ///
    /// Larger is better, regardless of the direction of the original problem.
    pub fn objective_function_value(&self) -> F {
        self.rows[self.nr_rows()][self.column_group_end[ColumnType::Slack]]
    }

    /// The objective value in the direction of the original problem.
    pub fn objective_value(&self) -> F {
        self.objective.into::<F>() * self.objective_function_value()
    }

    /// Values of the structural variables in the current basic solution.
    ///
    /// A structural variable that is basic takes the right-hand side value of its row, all other
    /// variables are zero.
    pub fn current_bfs(&self) -> Vec<F> {
        let mut values = vec![F::zero(); self.nr_variables()];
        for (i, &column) in self.basis.iter().enumerate() {
            if self.column_type(column) == ColumnType::Structural {
                values[column] = self.rhs(i);
            }
        }

        values
    }

    /// The current basic solution together with its objective value.
    ///
    /// # Arguments
    ///
    /// * `tolerance`: Values closer to zero than this are reported as zero.
    pub fn solution(&self, tolerance: F) -> Solution<F> {
        let values = self.current_bfs().into_iter()
            .map(|value| clean_zero(value, tolerance))
            .collect();

        Solution::new(self.objective_value(), values)
    }

    /// Whether the current basis is primal feasible: no right-hand side is negative.
    pub fn is_primal_feasible(&self, tolerance: F) -> bool {
        (0..self.nr_rows()).all(|i| self.rhs(i) >= -tolerance)
    }

    /// Whether the current basis is dual feasible: no relative cost is negative.
    pub fn is_dual_feasible(&self, tolerance: F) -> bool {
        (0..self.nr_columns()).all(|j| self.relative_cost(j) >= -tolerance)
    }

    /// Whether a column is a unit column.
    ///
    /// # Return value
    ///
    /// The row holding the single one, if the column has a one in a constraint row and (within
    /// the tolerance) zeros everywhere else, including the objective row.
    pub fn unit_column_row(&self, j: usize, tolerance: F) -> Option<usize> {
        debug_assert!(j < self.nr_columns());

        let mut one_at = None;
        for (i, row) in self.rows.iter().enumerate() {
            let value = row[j];
            if (value - F::one()).abs() < tolerance && i < self.nr_rows() && one_at.is_none() {
                one_at = Some(i);
            } else if value.abs() >= tolerance {
                return None;
            }
        }

        one_at
    }

    /// Whether every basic column is a unit column with its one in its own row.
    pub fn is_in_basic_solution_state(&self, tolerance: F) -> bool {
        self.basis.iter().enumerate()
            .all(|(i, &j)| self.unit_column_row(j, tolerance) == Some(i))
    }

    /// Column index that is basic in each row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        debug_assert!(column < self.nr_columns());

        self.basis.contains(&column)
    }

    /// The group that a column belongs to.
    pub fn column_type(&self, j: usize) -> ColumnType {
        debug_assert!(j <= self.nr_columns());

        if j < self.column_group_end[ColumnType::Structural] {
            ColumnType::Structural
        } else if j < self.column_group_end[ColumnType::Slack] {
            ColumnType::Slack
        } else {
            ColumnType::RightHandSide
        }
    }

    /// Number of constraint rows in the tableau, excluding the objective row.
    pub fn nr_rows(&self) -> usize {
        self.basis.len()
    }

    /// Number of variable columns, structural and slack, excluding the right-hand side.
    pub fn nr_columns(&self) -> usize {
        self.column_group_end[ColumnType::Slack]
    }

    /// Number of structural variables.
    pub fn nr_variables(&self) -> usize {
        self.column_group_end[ColumnType::Structural]
    }

    /// Direction of the original problem.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Number of pivots performed, including those on the tableaus this one was derived from.
    pub fn nr_pivots(&self) -> usize {
        self.nr_pivots
    }
}

impl<F: OrderedField> Display for Tableau<F> {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        for row in &self.rows {
            for value in row {
                write!(f, "{:>10.2?} ", value)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
