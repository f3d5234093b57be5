//! # High-level Simplex logic
//!
//! High level methods implementing the primal and the dual simplex algorithm. The details of this
//! logic are hidden away mostly in the `Tableau` type.
use crate::algorithm::OptimizationResult;
use crate::algorithm::settings::Tolerances;
use crate::algorithm::simplex::SimplexError;
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::traits::OrderedField;

/// Increases the objective value of the basic feasible solution to the maximum.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis (not necessarily optimal <=> dual feasible <=> c >= 0)
/// - All constraint values need to be non-negative (primal feasibility)
///
/// # Arguments
///
/// * `tableau`: Tableau to pivot in place, left in its final state.
/// * `tolerances`: Epsilons for the pivot rule, the ratio test and the pivot itself.
/// * `iteration_limit`: Maximum number of pivots.
///
/// # Return value
///
/// An `OptimizationResult` indicating whether or not the problem has a finite optimum. It cannot be
/// infeasible, as a feasible solution is needed to start using this method.
pub fn primal<F, PR>(
    tableau: &mut Tableau<F>,
    tolerances: &Tolerances<F>,
    iteration_limit: usize,
) -> Result<OptimizationResult<Solution<F>>, SimplexError>
where
    F: OrderedField,
    PR: PivotRule<F>,
{
    if let Some(row) = (0..tableau.nr_rows()).find(|&i| tableau.rhs(i) < -tolerances.feasibility) {
        return Err(SimplexError::InfeasibleStart { row });
    }

    let mut rule = PR::new(tableau);
    let mut iterations = 0;
    loop {
        match rule.select_primal_pivot_column(tableau, tolerances) {
            Some(column) => match tableau.select_primal_pivot_row(column, tolerances) {
                Some(row) => {
                    if iterations == iteration_limit {
                        break Err(SimplexError::IterationLimit { iterations });
                    }
                    tableau.pivot(row, column, tolerances.pivot)?;
                    iterations += 1;
                },
                None => {
                    log::debug!("primal: column {} is unbounded after {} pivots", column, iterations);
                    break Ok(OptimizationResult::Unbounded);
                },
            },
            None => {
                log::debug!(
                    "primal: optimal after {} pivots, value {:?}",
                    iterations, tableau.objective_value(),
                );
                break Ok(OptimizationResult::FiniteOptimum(tableau.solution(tolerances.feasibility)));
            },
        }
    }
}

/// Removes all negative right-hand side values while keeping the relative costs non-negative.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis
/// - All relative costs need to be non-negative (dual feasibility)
///
/// Typically used on a tableau that was optimal before a constraint was added to it, or on a
/// minimization problem with non-negative costs and `>=` constraints.
///
/// # Return value
///
/// An `OptimizationResult` indicating whether or not the problem is feasible. It cannot be
/// unbounded, as a dual feasible solution is needed to start using this method.
pub fn dual<F, PR>(
    tableau: &mut Tableau<F>,
    tolerances: &Tolerances<F>,
    iteration_limit: usize,
) -> Result<OptimizationResult<Solution<F>>, SimplexError>
where
    F: OrderedField,
    PR: PivotRule<F>,
{
    if let Some(column) = (0..tableau.nr_columns())
        .find(|&j| tableau.relative_cost(j) < -tolerances.optimality) {
        return Err(SimplexError::DualInfeasibleStart { column });
    }

    let mut rule = PR::new(tableau);
    let mut iterations = 0;
    loop {
        match rule.select_dual_pivot_row(tableau, tolerances) {
            Some(row) => match tableau.select_dual_pivot_column(row, tolerances) {
                Some(column) => {
                    if iterations == iteration_limit {
                        break Err(SimplexError::IterationLimit { iterations });
                    }
                    tableau.pivot(row, column, tolerances.pivot)?;
                    iterations += 1;
                },
                None => {
                    log::debug!("dual: row {} is infeasible after {} pivots", row, iterations);
                    break Ok(OptimizationResult::Infeasible);
                },
            },
            None => {
                log::debug!(
                    "dual: optimal after {} pivots, value {:?}",
                    iterations, tableau.objective_value(),
                );
                break Ok(OptimizationResult::FiniteOptimum(tableau.solution(tolerances.feasibility)));
            },
        }
    }
}
