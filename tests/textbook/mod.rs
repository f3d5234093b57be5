//! # Textbook problems
//!
//! Small instances with well known optimal solutions.
use relp_tableau::algorithm::transportation::TransportationProblem;
use relp_tableau::data::linear_program::canonical_form::{IntegerProgram, LinearProgram};
use relp_tableau::data::linear_program::elements::{Objective, VariableType};

/// # Solving the problems
mod test;

/// maximize 3x + 5y s.t. x <= 4, 2y <= 12, 3x + 2y <= 18.
fn production_planning() -> LinearProgram<f64> {
    LinearProgram::new(
        Objective::Maximize,
        vec![
            vec![1f64, 0f64],
            vec![0f64, 2f64],
            vec![3f64, 2f64],
        ],
        vec![4f64, 12f64, 18f64],
        vec![3f64, 5f64],
    ).unwrap()
}

/// minimize 4u + 12v + 18w s.t. u + 3w >= 3, 2v + 2w >= 5.
fn production_planning_dual() -> LinearProgram<f64> {
    LinearProgram::new(
        Objective::Minimize,
        vec![
            vec![-1f64, 0f64, -3f64],
            vec![0f64, -2f64, -2f64],
        ],
        vec![-3f64, -5f64],
        vec![4f64, 12f64, 18f64],
    ).unwrap()
}

/// maximize 8x + 5y s.t. x + y <= 6, 9x + 5y <= 45, x, y integer.
fn furniture() -> IntegerProgram<f64> {
    IntegerProgram::pure(LinearProgram::new(
        Objective::Maximize,
        vec![
            vec![1f64, 1f64],
            vec![9f64, 5f64],
        ],
        vec![6f64, 45f64],
        vec![8f64, 5f64],
    ).unwrap())
}

/// maximize 3x + 2y s.t. x + y <= 4.5, x <= 2.5, x integer.
fn mixed() -> IntegerProgram<f64> {
    IntegerProgram::new(
        LinearProgram::new(
            Objective::Maximize,
            vec![
                vec![1f64, 1f64],
                vec![1f64, 0f64],
            ],
            vec![4.5f64, 2.5f64],
            vec![3f64, 2f64],
        ).unwrap(),
        vec![VariableType::Integer, VariableType::Continuous],
    ).unwrap()
}

fn distribution() -> TransportationProblem<f64> {
    TransportationProblem::new(
        vec![7f64, 9f64, 18f64],
        vec![5f64, 8f64, 7f64, 14f64],
        vec![
            vec![19f64, 30f64, 50f64, 10f64],
            vec![70f64, 30f64, 40f64, 60f64],
            vec![40f64, 8f64, 70f64, 20f64],
        ],
    ).unwrap()
}
