//! # Pivot rules
//!
//! Strategies for moving from basis to basis, whether primal or dual.
use crate::algorithm::settings::Tolerances;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::number_types::traits::OrderedField;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected for a primal pivot (or the row for a dual pivot), a row
/// (column) needs to be found. This decision is made by the tableau, independent of the strategy.
pub trait PivotRule<F> {
    /// Create a new instance.
    fn new(tableau: &Tableau<F>) -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Return value
    ///
    /// A column with a negative relative cost, or `None` if the tableau is optimal.
    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize>;

    /// Row selection rule for the dual Simplex method.
    ///
    /// # Return value
    ///
    /// A row with a negative right-hand side, or `None` if the tableau is primal feasible.
    fn select_dual_pivot_row(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize>;
}

/// Simply pivot on the first column (row), which has a negative relative cost (right-hand side).
///
/// The behavior is the same for both the primal and dual simplex method.
pub struct FirstProfitable;
impl<F: OrderedField> PivotRule<F> for FirstProfitable {
    fn new(_tableau: &Tableau<F>) -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize> {
        (0..tableau.nr_columns())
            .filter(|&column| !tableau.is_in_basis(column))
            .find(|&column| tableau.relative_cost(column) < -tolerances.optimality)
    }

    fn select_dual_pivot_row(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize> {
        (0..tableau.nr_rows())
            .find(|&row| tableau.rhs(row) < -tolerances.feasibility)
    }
}

/// Simply pivot on the column (row), which has the most negative relative cost (right-hand side).
///
/// The first one wins ties.
pub struct SteepestDescentAlongVariable;
impl<F: OrderedField> PivotRule<F> for SteepestDescentAlongVariable {
    fn new(_tableau: &Tableau<F>) -> Self {
        Self
    }

    fn select_primal_pivot_column(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize> {
        most_negative(
            (0..tableau.nr_columns())
                .filter(|&column| !tableau.is_in_basis(column))
                .map(|column| (column, tableau.relative_cost(column))),
            tolerances.optimality,
        )
    }

    fn select_dual_pivot_row(
        &mut self,
        tableau: &Tableau<F>,
        tolerances: &Tolerances<F>,
    ) -> Option<usize> {
        most_negative(
            (0..tableau.nr_rows()).map(|row| (row, tableau.rhs(row))),
            tolerances.feasibility,
        )
    }
}

fn most_negative<F: OrderedField>(
    values: impl Iterator<Item = (usize, F)>,
    tolerance: F,
) -> Option<usize> {
    let mut smallest: Option<(usize, F)> = None;
    for (index, value) in values.filter(|&(_, value)| value < -tolerance) {
        match smallest {
            Some((_, existing)) if existing <= value => {},
            _ => smallest = Some((index, value)),
        }
    }

    smallest.map(|(index, _)| index)
}

#[cfg(test)]
mod test {
    use crate::algorithm::settings::Tolerances;
    use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, PivotRule, SteepestDescentAlongVariable};
    use crate::algorithm::simplex::tableau::Tableau;
    use crate::data::linear_program::canonical_form::LinearProgram;
    use crate::data::linear_program::elements::Objective;
    use crate::tests::{problem_1, problem_3};

    #[test]
    fn find_profitable_column() {
        let tableau = problem_1::tableau_form();
        let tolerances = Tolerances::default();

        // Costs are -3, -5
        let mut rule = <FirstProfitable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_primal_pivot_column(&tableau, &tolerances), Some(0));
        let mut rule = <SteepestDescentAlongVariable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_primal_pivot_column(&tableau, &tolerances), Some(1));

        let tableau = problem_1::optimal_tableau_form();
        let mut rule = <FirstProfitable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_primal_pivot_column(&tableau, &tolerances), None);
        let mut rule = <SteepestDescentAlongVariable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_primal_pivot_column(&tableau, &tolerances), None);
    }

    #[test]
    fn steepest_descent_ties() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![vec![1f64, 1f64, 1f64]],
            vec![1f64],
            vec![1f64, 2f64, 2f64],
        ).unwrap();
        let tableau = Tableau::new(&program);
        let mut rule = <SteepestDescentAlongVariable as PivotRule<_>>::new(&tableau);

        assert_eq!(rule.select_primal_pivot_column(&tableau, &Tolerances::default()), Some(1));
    }

    #[test]
    fn find_infeasible_row() {
        // Right-hand sides are -3, -5
        let tableau = problem_3::tableau_form();
        let tolerances = Tolerances::default();

        let mut rule = <FirstProfitable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_dual_pivot_row(&tableau, &tolerances), Some(0));
        let mut rule = <SteepestDescentAlongVariable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_dual_pivot_row(&tableau, &tolerances), Some(1));

        let tableau = problem_1::tableau_form();
        let mut rule = <FirstProfitable as PivotRule<_>>::new(&tableau);
        assert_eq!(rule.select_dual_pivot_row(&tableau, &tolerances), None);
    }

    #[test]
    fn tolerance() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![vec![1f64, 1f64]],
            vec![1f64],
            vec![1e-12f64, 1f64],
        ).unwrap();
        let tableau = Tableau::new(&program);
        let mut rule = <FirstProfitable as PivotRule<_>>::new(&tableau);

        // The first cost is too small to be profitable
        assert_eq!(rule.select_primal_pivot_column(&tableau, &Tolerances::default()), Some(1));
    }
}
