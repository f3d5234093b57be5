//! # Vogel's approximation method
//!
//! Greedy construction of an initial feasible plan. For each open row and column, the penalty is
//! the difference between its two cheapest open cells: the extra cost of not using the cheapest
//! one. The line with the largest penalty receives as much as possible in its cheapest cell.
use std::cmp::Ordering;

use itertools::Itertools;

use crate::algorithm::transportation::{ShipmentPlan, TransportationProblem};
use crate::data::number_types::traits::OrderedField;

/// A row or a column of the cost matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Row(usize),
    Column(usize),
}

/// Construct an initial feasible plan.
///
/// Each allocation closes the row whose supply, or the column whose demand, is exhausted. When
/// both are exhausted at once, both close and the plan has fewer basic cells than a basis needs.
///
/// # Arguments
///
/// * `problem`: Balanced transportation problem.
/// * `tolerance`: Remaining supply or demand at or below this value counts as exhausted.
pub fn initial_plan<F: OrderedField>(problem: &TransportationProblem<F>, tolerance: F) -> ShipmentPlan<F> {
    let (m, n) = (problem.nr_sources(), problem.nr_destinations());
    let mut supply = problem.supply().to_vec();
    let mut demand = problem.demand().to_vec();
    let mut open_rows = vec![true; m];
    let mut open_columns = vec![true; n];

    let mut allocation = vec![vec![F::zero(); n]; m];
    let mut basic_cells = Vec::with_capacity(m + n - 1);

    while let Some((i, j)) = select_cell(problem, &open_rows, &open_columns) {
        let amount = supply[i].min(demand[j]);
        allocation[i][j] = allocation[i][j] + amount;
        basic_cells.push((i, j));
        supply[i] = supply[i] - amount;
        demand[j] = demand[j] - amount;
        log::trace!("allocated {:?} to ({}, {})", amount, i, j);

        if supply[i] <= tolerance {
            open_rows[i] = false;
        }
        if demand[j] <= tolerance {
            open_columns[j] = false;
        }
    }

    let total_cost = problem.total_cost(&allocation);
    log::debug!("initial plan with {} basic cells, cost {:?}", basic_cells.len(), total_cost);

    ShipmentPlan { allocation, basic_cells, total_cost }
}

/// The cheapest open cell of the line with the largest penalty.
///
/// Ties between lines go to rows before columns, and to lower indices. Ties between cells go to
/// the lower index.
fn select_cell<F: OrderedField>(
    problem: &TransportationProblem<F>,
    open_rows: &[bool],
    open_columns: &[bool],
) -> Option<(usize, usize)> {
    let rows = open_rows.iter().positions(|&open| open)
        .map(|i| (Line::Row(i), penalty(open_columns.iter().positions(|&open| open).map(|j| problem.cost(i, j)))));
    let columns = open_columns.iter().positions(|&open| open)
        .map(|j| (Line::Column(j), penalty(open_rows.iter().positions(|&open| open).map(|i| problem.cost(i, j)))));

    let mut largest: Option<(Line, F)> = None;
    for (line, gap) in rows.chain(columns) {
        let Some(gap) = gap else { continue };
        if largest.is_none_or(|(_, existing)| gap > existing) {
            largest = Some((line, gap));
        }
    }

    match largest?.0 {
        Line::Row(i) => cheapest(open_columns, |j| problem.cost(i, j)).map(|j| (i, j)),
        Line::Column(j) => cheapest(open_rows, |i| problem.cost(i, j)).map(|i| (i, j)),
    }
}

/// Gap between the two smallest costs, or the cost itself if there is only one.
///
/// `None` if there are no costs.
fn penalty<F: OrderedField>(costs: impl Iterator<Item = F>) -> Option<F> {
    let (smallest, second) = costs.fold((None, None), |(smallest, second), cost| match smallest {
        None => (Some(cost), second),
        Some(s) if cost < s => (Some(cost), Some(s)),
        Some(_) => match second {
            Some(t) if t <= cost => (smallest, second),
            _ => (smallest, Some(cost)),
        },
    });

    smallest.map(|s| second.map_or(s, |t| t - s))
}

fn cheapest<F: OrderedField>(open: &[bool], cost: impl Fn(usize) -> F) -> Option<usize> {
    open.iter().positions(|&is_open| is_open)
        .min_by(|&a, &b| cost(a).partial_cmp(&cost(b)).unwrap_or(Ordering::Equal))
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::transportation::TransportationProblem;
    use crate::algorithm::transportation::vogel::{initial_plan, penalty};
    use crate::tests::transportation;

    #[test]
    fn penalties() {
        assert_eq!(penalty([4f64, 1f64, 3f64].into_iter()), Some(2f64));
        assert_eq!(penalty([2f64, 2f64, 5f64].into_iter()), Some(0f64));
        assert_eq!(penalty([7f64].into_iter()), Some(7f64));
        assert_eq!(penalty(std::iter::empty::<f64>()), None);
    }

    #[test]
    fn textbook() {
        let problem = transportation::textbook();
        let plan = initial_plan(&problem, 1e-9);

        assert_eq!(plan.basic_cells, vec![(2, 1), (0, 0), (2, 3), (0, 3), (1, 3), (1, 2)]);
        assert_eq!(plan.allocation, vec![
            vec![5f64, 0f64, 0f64, 2f64],
            vec![0f64, 0f64, 7f64, 2f64],
            vec![0f64, 8f64, 0f64, 10f64],
        ]);
        assert_abs_diff_eq!(plan.total_cost, transportation::VOGEL_COST);
    }

    #[test]
    fn supply_and_demand_met() {
        for problem in [transportation::textbook(), transportation::two_pivots()] {
            let plan = initial_plan(&problem, 1e-9);

            for (row, &supply) in plan.allocation.iter().zip(problem.supply()) {
                assert_abs_diff_eq!(row.iter().sum::<f64>(), supply, epsilon = 1e-9);
            }
            for (j, &demand) in problem.demand().iter().enumerate() {
                assert_abs_diff_eq!(plan.allocation.iter().map(|row| row[j]).sum::<f64>(), demand, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn two_pivots() {
        let plan = initial_plan(&transportation::two_pivots(), 1e-9);

        assert_abs_diff_eq!(plan.total_cost, transportation::TWO_PIVOTS_VOGEL_COST);
        assert_eq!(plan.basic_cells.len(), 6);
    }

    #[test]
    fn degenerate() {
        let plan = initial_plan(&transportation::degenerate(), 1e-9);

        // The first cell closes both a row and a column
        assert_eq!(plan.basic_cells, vec![(0, 0), (1, 1)]);
        assert_abs_diff_eq!(plan.total_cost, 50f64);
    }

    #[test]
    fn unbalanced() {
        let problem = TransportationProblem::new(
            vec![50f64, 60f64],
            vec![30f64, 40f64, 20f64],
            vec![vec![1f64, 2f64, 3f64], vec![4f64, 5f64, 6f64]],
        ).unwrap();
        let plan = initial_plan(&problem, 1e-9);

        let total = plan.allocation.iter().flatten().sum::<f64>();
        assert_abs_diff_eq!(total, problem.total_supply());
        assert_abs_diff_eq!(total, 110f64);
        assert_eq!(plan.allocation[0].len(), 4);
    }
}
