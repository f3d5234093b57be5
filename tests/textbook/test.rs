use approx::assert_abs_diff_eq;

use relp_tableau::algorithm::OptimizationResult;
use relp_tableau::algorithm::assignment::{self, AssignmentError};
use relp_tableau::algorithm::branch_and_bound::{BranchAndBound, NodeOutcome};
use relp_tableau::algorithm::simplex::Simplex;
use relp_tableau::algorithm::transportation::{Balancing, Transportation, TransportationProblem};
use relp_tableau::data::linear_program::canonical_form::{IntegerProgram, LinearProgram};
use relp_tableau::data::linear_program::elements::Objective;

use super::{distribution, furniture, mixed, production_planning, production_planning_dual};

#[test]
fn primal_and_dual_agree() {
    let simplex = Simplex::default();

    let primal = simplex.solve(&production_planning()).unwrap().finite_optimum().unwrap();
    assert_abs_diff_eq!(primal.objective_value(), 36f64, epsilon = 1e-9);
    assert_abs_diff_eq!(primal.value(0), 2f64, epsilon = 1e-9);
    assert_abs_diff_eq!(primal.value(1), 6f64, epsilon = 1e-9);

    let dual = simplex.solve(&production_planning_dual()).unwrap().finite_optimum().unwrap();
    assert_abs_diff_eq!(dual.objective_value(), 36f64, epsilon = 1e-9);
    assert_abs_diff_eq!(dual.value(1), 1.5f64, epsilon = 1e-9);
    assert_abs_diff_eq!(dual.value(2), 1f64, epsilon = 1e-9);
}

#[test]
fn integral_relaxation_needs_no_branching() {
    let search = BranchAndBound::default().solve(&IntegerProgram::pure(production_planning())).unwrap();

    assert_abs_diff_eq!(search.result.finite_optimum().unwrap().objective_value(), 36f64, epsilon = 1e-9);
    assert_eq!(search.statistics.outcomes[NodeOutcome::Branched], 0);
}

#[test]
fn pure_integer() {
    let program = furniture();
    let relaxation = Simplex::default().solve(program.relaxation()).unwrap().finite_optimum().unwrap();
    assert_abs_diff_eq!(relaxation.objective_value(), 41.25f64, epsilon = 1e-9);

    let search = BranchAndBound::default().solve(&program).unwrap();
    let solution = search.result.finite_optimum().unwrap();
    assert_abs_diff_eq!(solution.objective_value(), 40f64, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.value(0), 5f64, epsilon = 1e-6);
    assert_abs_diff_eq!(solution.value(1), 0f64, epsilon = 1e-6);
    assert!(program.relaxation().is_feasible(solution.values(), 1e-9));
    assert!(search.statistics.outcomes[NodeOutcome::Branched] >= 1);
    assert_eq!(search.incumbent_updates.last(), Some(&solution));
}

#[test]
fn mixed_integer() {
    let search = BranchAndBound::default().solve(&mixed()).unwrap();
    let solution = search.result.finite_optimum().unwrap();

    assert_abs_diff_eq!(solution.objective_value(), 11f64, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.value(0), 2f64, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.value(1), 2.5f64, epsilon = 1e-9);
}

#[test]
fn no_integer_solution() {
    // 2x = 1
    let program = IntegerProgram::pure(LinearProgram::new(
        Objective::Minimize,
        vec![vec![2f64], vec![-2f64]],
        vec![1f64, -1f64],
        vec![1f64],
    ).unwrap());

    let search = BranchAndBound::default().solve(&program).unwrap();
    assert_eq!(search.result, OptimizationResult::Infeasible);
}

#[test]
fn assignment() {
    let costs = vec![
        vec![9f64, 2f64, 7f64, 8f64],
        vec![6f64, 4f64, 3f64, 7f64],
        vec![5f64, 8f64, 1f64, 8f64],
        vec![7f64, 6f64, 9f64, 4f64],
    ];
    let assignment = assignment::solve(&costs).unwrap();
    assert_abs_diff_eq!(assignment.cost, 13f64);
    assert_eq!(assignment.matches, vec![(0, 1), (1, 0), (2, 2), (3, 3)]);

    // Three workers, two jobs: one worker stays idle
    let costs = vec![vec![3f64, 1f64], vec![2f64, 2f64], vec![1f64, 3f64]];
    let assignment = assignment::solve(&costs).unwrap();
    assert_abs_diff_eq!(assignment.cost, 2f64);
    assert_eq!(assignment.matches, vec![(0, 1), (2, 0)]);

    assert_eq!(
        assignment::solve(&[vec![1f64], vec![1f64, 2f64]]),
        Err(AssignmentError::DimensionMismatch { row: 1, expected: 1, found: 2 }),
    );
}

#[test]
fn transportation() {
    let problem = distribution();
    let solver = Transportation::default();

    let initial = solver.initial_plan(&problem);
    assert_abs_diff_eq!(initial.total_cost, 779f64);
    assert_abs_diff_eq!(initial.allocation.iter().flatten().sum::<f64>(), 34f64);

    let optimal = solver.improve(&problem, initial).unwrap();
    assert_abs_diff_eq!(optimal.plan.total_cost, 743f64);
}

#[test]
fn unbalanced_transportation() {
    let problem = TransportationProblem::new(
        vec![20f64, 30f64],
        vec![10f64, 25f64],
        vec![vec![2f64, 3f64], vec![4f64, 1f64]],
    ).unwrap();
    assert_eq!(problem.balancing(), Balancing::DummyDestination);

    let optimal = Transportation::default().solve(&problem).unwrap().plan;
    // 10 from the first source to the first destination, 25 from the second to the second
    assert_abs_diff_eq!(optimal.total_cost, 45f64);
    assert_abs_diff_eq!(optimal.allocation[0][0], 10f64);
    assert_abs_diff_eq!(optimal.allocation[1][1], 25f64);
}
