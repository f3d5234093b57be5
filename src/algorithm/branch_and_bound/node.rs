//! # Nodes of the search tree
//!
//! A node is a relaxation that was solved to a finite optimum. Infeasible relaxations never become
//! nodes; they are counted and dropped.
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::elements::VariableType;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::float::numerical_precision::is_integral;
use crate::data::number_types::traits::OrderedField;

/// A subproblem, owning the optimal tableau of its relaxation.
///
/// No two nodes share a tableau: children receive a larger copy of their parent's tableau.
#[derive(Clone, Debug)]
pub struct Node<F> {
    id: usize,
    depth: usize,
    tableau: Tableau<F>,
    solution: Solution<F>,
    branch_variable: Option<usize>,
}

impl<F: OrderedField> Node<F> {
    /// Wrap a solved relaxation.
    ///
    /// # Arguments
    ///
    /// * `tableau`: Optimal tableau of the relaxation.
    /// * `solution`: The solution read from that tableau.
    /// * `variable_types`: Which variables need to be integer.
    /// * `integrality`: Tolerance for the integrality test.
    pub fn new(
        id: usize,
        depth: usize,
        tableau: Tableau<F>,
        solution: Solution<F>,
        variable_types: &[VariableType],
        integrality: F,
    ) -> Self {
        let branch_variable = first_fractional(solution.values(), variable_types, integrality);

        Self { id, depth, tableau, solution, branch_variable }
    }

    /// Identifier, unique within a search. The root has id `0`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of branching constraints added to the root relaxation.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Optimal tableau of the relaxation.
    pub fn tableau(&self) -> &Tableau<F> {
        &self.tableau
    }

    /// Solution of the relaxation.
    pub fn solution(&self) -> &Solution<F> {
        &self.solution
    }

    /// Objective value of the relaxation in the maximization form: larger is better.
    pub fn bound(&self) -> F {
        self.tableau.objective_function_value()
    }

    /// The first integer variable with a fractional value, if any.
    pub fn branch_variable(&self) -> Option<usize> {
        self.branch_variable
    }

    /// Hand out the solution, dropping the tableau.
    pub fn into_solution(self) -> Solution<F> {
        self.solution
    }
}

/// Index of the first integer variable whose value is not integral.
pub fn first_fractional<F: OrderedField>(
    values: &[F],
    variable_types: &[VariableType],
    tolerance: F,
) -> Option<usize> {
    debug_assert_eq!(values.len(), variable_types.len());

    values.iter().zip(variable_types)
        .position(|(&value, &variable_type)| {
            variable_type == VariableType::Integer && !is_integral(value, tolerance)
        })
}
