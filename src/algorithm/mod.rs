//! # Algorithms
//!
//! The simplex engines and the branch and bound search that wraps them work on tableaus. The
//! assignment and transportation solvers are independent of that machinery.
pub mod assignment;
pub mod branch_and_bound;
pub mod settings;
pub mod simplex;
pub mod transportation;

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm. Neither infeasibility nor unboundedness is an
/// error: they are properties of the problem, not failures of the computation.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum OptimizationResult<S> {
    Infeasible,
    FiniteOptimum(S),
    Unbounded,
}

impl<S> OptimizationResult<S> {
    /// The optimal solution, if there is one.
    pub fn finite_optimum(self) -> Option<S> {
        match self {
            OptimizationResult::FiniteOptimum(solution) => Some(solution),
            OptimizationResult::Infeasible | OptimizationResult::Unbounded => None,
        }
    }

    /// Whether a finite optimum was found.
    pub fn is_finite_optimum(&self) -> bool {
        matches!(self, OptimizationResult::FiniteOptimum(_))
    }
}
