//! # Representation of feasible solutions
//!
//! Once a problem is solved, the values of the decision variables are collected together with the
//! objective value. Slack values are not part of a solution.
use crate::data::number_types::traits::OrderedField;

/// Represents a solution to a linear or integer program.
///
/// Should represent a solution that is feasible. The objective value is in the direction of the
/// original problem: minimization problems report the minimum.
#[derive(Clone, PartialEq, Debug)]
pub struct Solution<F> {
    /// Value of the objective function for this solution.
    objective_value: F,
    /// One value for each structural variable, in the order of the problem's columns.
    values: Vec<F>,
}

impl<F: OrderedField> Solution<F> {
    /// Create a new `Solution` instance.
    ///
    /// A plain constructor.
    pub fn new(objective_value: F, values: Vec<F>) -> Self {
        Self {
            objective_value,
            values,
        }
    }

    /// Value of the objective function.
    pub fn objective_value(&self) -> F {
        self.objective_value
    }

    /// Value of each structural variable.
    pub fn values(&self) -> &[F] {
        &self.values
    }

    /// Value of a single variable.
    pub fn value(&self, j: usize) -> F {
        debug_assert!(j < self.values.len());

        self.values[j]
    }

    /// Number of variables.
    pub fn nr_variables(&self) -> usize {
        self.values.len()
    }
}
