//! # Linear programs in canonical form
//!
//! A linear program in `CanonicalForm` has only `<=` as the constraint type and non-negative
//! variables: `optimize c x s.t. A x <= b, x >= 0`. The right-hand side `b` may contain negative
//! values; the primal method refuses those, the dual method is designed for them.
use thiserror::Error;

use crate::data::linear_program::elements::{Objective, VariableType};
use crate::data::number_types::traits::OrderedField;

/// A problem was described with inconsistent dimensions or values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// A problem needs at least one variable.
    #[error("a problem needs at least one variable")]
    NoVariables,
    /// The right-hand side doesn't have a value for every constraint.
    #[error("expected {expected} right-hand side values, found {found}")]
    RightHandSideLength {
        /// Number of constraint rows.
        expected: usize,
        /// Length of the right-hand side.
        found: usize,
    },
    /// A constraint row has a different length than the cost vector.
    #[error("constraint {row} has {found} coefficients, expected {expected}")]
    RowLength {
        /// Index of the offending constraint.
        row: usize,
        /// Number of variables.
        expected: usize,
        /// Length of the row.
        found: usize,
    },
    /// The number of variable types doesn't match the number of variables.
    #[error("expected {expected} variable types, found {found}")]
    VariableTypesLength {
        /// Number of variables.
        expected: usize,
        /// Number of types provided.
        found: usize,
    },
    /// A coefficient is NaN or infinite.
    ///
    /// The row is `None` for the cost vector, the column is `None` for the right-hand side.
    #[error("value at row {row:?}, column {column:?} is not finite")]
    NotFinite {
        /// Constraint index, `None` for the cost row.
        row: Option<usize>,
        /// Variable index, `None` for the right-hand side.
        column: Option<usize>,
    },
}

/// A linear program `optimize c x s.t. A x <= b, x >= 0`.
///
/// Immutable once created, the algorithms copy what they need into their own data structures.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram<F> {
    objective: Objective,
    constraints: Vec<Vec<F>>,
    b: Vec<F>,
    cost: Vec<F>,
}

impl<F: OrderedField> LinearProgram<F> {
    /// Create a new linear program.
    ///
    /// # Arguments
    ///
    /// * `objective`: Direction of optimization.
    /// * `constraints`: One row of coefficients per constraint, each as long as `cost`.
    /// * `b`: Right-hand side, one value per constraint.
    /// * `cost`: Objective function coefficients, in the direction of `objective`.
    ///
    /// # Return value
    ///
    /// The linear program, or a `ProblemError` describing the first inconsistency found.
    pub fn new(
        objective: Objective,
        constraints: Vec<Vec<F>>,
        b: Vec<F>,
        cost: Vec<F>,
    ) -> Result<Self, ProblemError> {
        if cost.is_empty() {
            return Err(ProblemError::NoVariables);
        }
        if b.len() != constraints.len() {
            return Err(ProblemError::RightHandSideLength { expected: constraints.len(), found: b.len() });
        }
        if let Some(column) = cost.iter().position(|v| !v.is_finite()) {
            return Err(ProblemError::NotFinite { row: None, column: Some(column) });
        }
        for (i, (row, rhs)) in constraints.iter().zip(&b).enumerate() {
            if row.len() != cost.len() {
                return Err(ProblemError::RowLength { row: i, expected: cost.len(), found: row.len() });
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(ProblemError::NotFinite { row: Some(i), column: Some(column) });
            }
            if !rhs.is_finite() {
                return Err(ProblemError::NotFinite { row: Some(i), column: None });
            }
        }

        Ok(Self { objective, constraints, b, cost })
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Coefficient rows.
    pub fn constraints(&self) -> &[Vec<F>] {
        &self.constraints
    }

    /// Right-hand side.
    pub fn b(&self) -> &[F] {
        &self.b
    }

    /// Objective function coefficients.
    pub fn cost(&self) -> &[F] {
        &self.cost
    }

    /// Number of constraints, excluding the non-negativity of the variables.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of structural variables.
    pub fn nr_variables(&self) -> usize {
        self.cost.len()
    }

    /// Evaluate the objective function.
    pub fn objective_value(&self, x: &[F]) -> F {
        debug_assert_eq!(x.len(), self.nr_variables());

        inner_product(&self.cost, x)
    }

    /// Whether a point satisfies all constraints and non-negativity, up to a tolerance.
    pub fn is_feasible(&self, x: &[F], tolerance: F) -> bool {
        debug_assert_eq!(x.len(), self.nr_variables());

        x.iter().all(|&v| v >= -tolerance)
            && self.constraints.iter().zip(&self.b)
                .all(|(row, &rhs)| inner_product(row, x) <= rhs + tolerance)
    }
}

fn inner_product<F: OrderedField>(left: &[F], right: &[F]) -> F {
    left.iter().zip(right).fold(F::zero(), |total, (&l, &r)| total + l * r)
}

/// A linear program of which some variables should take whole values.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerProgram<F> {
    relaxation: LinearProgram<F>,
    variable_types: Vec<VariableType>,
}

impl<F: OrderedField> IntegerProgram<F> {
    /// Create a mixed integer program.
    ///
    /// # Arguments
    ///
    /// * `relaxation`: The program without integrality constraints.
    /// * `variable_types`: One type per variable of the relaxation.
    pub fn new(
        relaxation: LinearProgram<F>,
        variable_types: Vec<VariableType>,
    ) -> Result<Self, ProblemError> {
        if variable_types.len() != relaxation.nr_variables() {
            return Err(ProblemError::VariableTypesLength {
                expected: relaxation.nr_variables(),
                found: variable_types.len(),
            });
        }

        Ok(Self { relaxation, variable_types })
    }

    /// Create a pure integer program: all variables are integer.
    pub fn pure(relaxation: LinearProgram<F>) -> Self {
        let variable_types = vec![VariableType::Integer; relaxation.nr_variables()];
        Self { relaxation, variable_types }
    }

    /// The linear program without the integrality constraints.
    pub fn relaxation(&self) -> &LinearProgram<F> {
        &self.relaxation
    }

    /// Type of each variable.
    pub fn variable_types(&self) -> &[VariableType] {
        &self.variable_types
    }

    /// Whether all variables need to be integer.
    pub fn is_pure(&self) -> bool {
        self.variable_types.iter().all(|&t| t == VariableType::Integer)
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::canonical_form::{IntegerProgram, LinearProgram, ProblemError};
    use crate::data::linear_program::elements::{Objective, VariableType};

    #[test]
    fn dimensions() {
        let result = LinearProgram::new(Objective::Maximize, vec![vec![1f64, 2f64]], vec![], vec![1f64, 1f64]);
        assert_eq!(result, Err(ProblemError::RightHandSideLength { expected: 1, found: 0 }));

        let result = LinearProgram::new(Objective::Maximize, vec![vec![1f64]], vec![1f64], vec![1f64, 1f64]);
        assert_eq!(result, Err(ProblemError::RowLength { row: 0, expected: 2, found: 1 }));

        let result = LinearProgram::<f64>::new(Objective::Maximize, vec![], vec![], vec![]);
        assert_eq!(result, Err(ProblemError::NoVariables));
    }

    #[test]
    fn not_finite() {
        let result = LinearProgram::new(Objective::Minimize, vec![vec![1f64, f64::NAN]], vec![1f64], vec![1f64, 1f64]);
        assert_eq!(result, Err(ProblemError::NotFinite { row: Some(0), column: Some(1) }));

        let result = LinearProgram::new(Objective::Minimize, vec![vec![1f64, 1f64]], vec![f64::INFINITY], vec![1f64, 1f64]);
        assert_eq!(result, Err(ProblemError::NotFinite { row: Some(0), column: None }));
    }

    #[test]
    fn feasibility() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![vec![1f64, 1f64]],
            vec![2f64],
            vec![1f64, 2f64],
        ).unwrap();
        assert!(program.is_feasible(&[1f64, 1f64], 1e-9));
        assert!(!program.is_feasible(&[2f64, 1f64], 1e-9));
        assert!(!program.is_feasible(&[-1f64, 1f64], 1e-9));
        assert_eq!(program.objective_value(&[1f64, 1f64]), 3f64);
    }

    #[test]
    fn integer_program() {
        let program = LinearProgram::new(Objective::Maximize, vec![vec![1f64, 1f64]], vec![2f64], vec![1f64, 2f64]).unwrap();
        assert!(IntegerProgram::pure(program.clone()).is_pure());

        let mixed = IntegerProgram::new(program.clone(), vec![VariableType::Integer, VariableType::Continuous]).unwrap();
        assert!(!mixed.is_pure());

        let result = IntegerProgram::new(program, vec![VariableType::Integer]);
        assert_eq!(result, Err(ProblemError::VariableTypesLength { expected: 2, found: 1 }));
    }
}
