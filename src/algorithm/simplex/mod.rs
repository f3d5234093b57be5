//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the simplex algorithm. The
//! algorithm works on a dense tableau and is implemented in both the primal and the dual variant.
//! There is no first phase: the primal method starts from the slack basis, which needs a
//! non-negative right-hand side, the dual method starts from a dual feasible basis.
use thiserror::Error;

use crate::algorithm::OptimizationResult;
use crate::algorithm::settings::{DEFAULT_ITERATION_LIMIT, Tolerances};
use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, SteepestDescentAlongVariable};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::LinearProgram;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::traits::OrderedField;

pub mod logic;
pub mod strategy;
pub mod tableau;

/// Reasons for the simplex method to stop without determining the state of the problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimplexError {
    /// The selected pivot element is too close to zero to divide by.
    #[error("pivot element at row {row}, column {column} is numerically zero")]
    DegeneratePivot {
        /// Row of the pivot.
        row: usize,
        /// Column of the pivot.
        column: usize,
    },
    /// The primal method was started from a basis that isn't primal feasible.
    #[error("right-hand side of row {row} is negative, the primal method can't start")]
    InfeasibleStart {
        /// First row with a negative right-hand side.
        row: usize,
    },
    /// The dual method was started from a basis that isn't dual feasible.
    #[error("relative cost of column {column} is negative, the dual method can't start")]
    DualInfeasibleStart {
        /// First column with a negative relative cost.
        column: usize,
    },
    /// The maximum number of pivots was reached, likely due to cycling.
    #[error("no optimum found after {iterations} pivots")]
    IterationLimit {
        /// Number of pivots performed.
        iterations: usize,
    },
}

/// A simplex engine, holding the configuration used for every solve.
///
/// The primal method selects the most negative relative cost, the dual method the first negative
/// right-hand side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simplex<F> {
    tolerances: Tolerances<F>,
    iteration_limit: usize,
}

impl<F: OrderedField> Simplex<F> {
    /// Create a new engine.
    pub fn new(tolerances: Tolerances<F>) -> Self {
        Self {
            tolerances,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }

    /// Change the maximum number of pivots per solve.
    #[must_use]
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Tolerances used by this engine.
    pub fn tolerances(&self) -> &Tolerances<F> {
        &self.tolerances
    }

    /// Solve a linear program from the slack basis.
    ///
    /// # Return value
    ///
    /// The optimization result, or an error if the slack basis is neither primal nor dual
    /// feasible, or if the computation failed.
    pub fn solve(&self, program: &LinearProgram<F>) -> Result<OptimizationResult<Solution<F>>, SimplexError> {
        let mut tableau = Tableau::new(program);
        self.reoptimize(&mut tableau)
    }

    /// Run the primal method on a primal feasible tableau.
    pub fn primal(&self, tableau: &mut Tableau<F>) -> Result<OptimizationResult<Solution<F>>, SimplexError> {
        logic::primal::<_, SteepestDescentAlongVariable>(tableau, &self.tolerances, self.iteration_limit)
    }

    /// Run the dual method on a dual feasible tableau.
    pub fn dual(&self, tableau: &mut Tableau<F>) -> Result<OptimizationResult<Solution<F>>, SimplexError> {
        logic::dual::<_, FirstProfitable>(tableau, &self.tolerances, self.iteration_limit)
    }

    /// Bring a tableau to optimality, using the method that its current basis allows.
    ///
    /// A primal feasible tableau is finished by the primal method. A dual feasible tableau, like
    /// an optimal tableau to which a constraint was added, is first made primal feasible by the
    /// dual method and then finished by the primal method.
    pub fn reoptimize(&self, tableau: &mut Tableau<F>) -> Result<OptimizationResult<Solution<F>>, SimplexError> {
        if tableau.is_primal_feasible(self.tolerances.feasibility) {
            return self.primal(tableau);
        }

        match self.dual(tableau)? {
            OptimizationResult::FiniteOptimum(_) => self.primal(tableau),
            other => Ok(other),
        }
    }
}

impl<F> Default for Simplex<F>
where
    F: OrderedField,
    Tolerances<F>: Default,
{
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}
