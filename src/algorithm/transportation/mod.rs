//! # Transportation
//!
//! Shipping goods from sources with a supply to destinations with a demand at minimum cost. An
//! initial plan is found with Vogel's approximation method, which is then improved to optimality
//! with the modified distribution (MODI) method.
use thiserror::Error;

use crate::algorithm::settings::{DEFAULT_ITERATION_LIMIT, Tolerances};
use crate::algorithm::transportation::modi::Improvement;
use crate::data::number_types::traits::OrderedField;

pub mod modi;
pub mod vogel;

/// Reasons for not producing a shipment plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportationError {
    /// There are no sources or no destinations.
    #[error("a transportation problem needs at least one source and one destination")]
    Empty,
    /// The cost matrix doesn't have a row for every source.
    #[error("expected {expected} cost rows, found {found}")]
    CostRows {
        /// Number of sources.
        expected: usize,
        /// Number of cost rows.
        found: usize,
    },
    /// A cost row doesn't have a value for every destination.
    #[error("cost row {row} has {found} values, expected {expected}")]
    CostColumns {
        /// Index of the source.
        row: usize,
        /// Number of destinations.
        expected: usize,
        /// Length of the row.
        found: usize,
    },
    /// A supply is negative or not finite.
    #[error("supply of source {row} is not a finite, non-negative value")]
    InvalidSupply {
        /// Index of the source.
        row: usize,
    },
    /// A demand is negative or not finite.
    #[error("demand of destination {column} is not a finite, non-negative value")]
    InvalidDemand {
        /// Index of the destination.
        column: usize,
    },
    /// A cost is negative or not finite.
    #[error("cost at row {row}, column {column} is not a finite, non-negative value")]
    InvalidCost {
        /// Index of the source.
        row: usize,
        /// Index of the destination.
        column: usize,
    },
    /// A plan to improve doesn't have the shape of the (balanced) problem.
    #[error("plan doesn't match a problem with {rows} sources and {columns} destinations")]
    PlanMismatch {
        /// Number of sources, including a dummy.
        rows: usize,
        /// Number of destinations, including a dummy.
        columns: usize,
    },
    /// A plan ships along a cell that is not part of its basis.
    #[error("cell at row {row}, column {column} ships goods but is not basic")]
    NotBasic {
        /// Index of the source.
        row: usize,
        /// Index of the destination.
        column: usize,
    },
    /// The maximum number of stepping stone pivots was reached.
    #[error("no optimal plan found after {iterations} pivots")]
    IterationLimit {
        /// Number of pivots performed.
        iterations: usize,
    },
}

/// How a problem was balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balancing {
    /// Total supply equaled total demand.
    Balanced,
    /// A zero cost source was appended to cover the excess demand.
    DummySource,
    /// A zero cost destination was appended to absorb the excess supply.
    DummyDestination,
}

/// A balanced transportation problem.
///
/// If total supply and total demand differ, a dummy source or destination with zero cost is
/// appended on construction. Indices of the original sources and destinations are unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationProblem<F> {
    supply: Vec<F>,
    demand: Vec<F>,
    costs: Vec<Vec<F>>,
    balancing: Balancing,
}

impl<F: OrderedField> TransportationProblem<F> {
    /// Create a new problem.
    ///
    /// # Arguments
    ///
    /// * `supply`: Amount available at each source.
    /// * `demand`: Amount needed at each destination.
    /// * `costs`: Cost per unit shipped, one row per source with a value for each destination.
    ///
    /// # Return value
    ///
    /// The balanced problem, or an error describing the first inconsistency found.
    pub fn new(
        mut supply: Vec<F>,
        mut demand: Vec<F>,
        mut costs: Vec<Vec<F>>,
    ) -> Result<Self, TransportationError> {
        if supply.is_empty() || demand.is_empty() {
            return Err(TransportationError::Empty);
        }
        if costs.len() != supply.len() {
            return Err(TransportationError::CostRows { expected: supply.len(), found: costs.len() });
        }
        let invalid = |value: F| !value.is_finite() || value < F::zero();
        if let Some(row) = supply.iter().position(|&s| invalid(s)) {
            return Err(TransportationError::InvalidSupply { row });
        }
        if let Some(column) = demand.iter().position(|&d| invalid(d)) {
            return Err(TransportationError::InvalidDemand { column });
        }
        for (row, values) in costs.iter().enumerate() {
            if values.len() != demand.len() {
                return Err(TransportationError::CostColumns { row, expected: demand.len(), found: values.len() });
            }
            if let Some(column) = values.iter().position(|&c| invalid(c)) {
                return Err(TransportationError::InvalidCost { row, column });
            }
        }

        let total_supply = sum(&supply);
        let total_demand = sum(&demand);
        let difference = total_supply - total_demand;
        let scale = total_supply.max(total_demand).max(F::one());
        let balancing = if difference.abs() <= F::epsilon() * scale {
            Balancing::Balanced
        } else if difference > F::zero() {
            demand.push(difference);
            for row in &mut costs {
                row.push(F::zero());
            }
            Balancing::DummyDestination
        } else {
            supply.push(-difference);
            costs.push(vec![F::zero(); demand.len()]);
            Balancing::DummySource
        };
        if balancing != Balancing::Balanced {
            log::debug!("balanced with {:?} for a difference of {:?}", balancing, difference.abs());
        }

        Ok(Self { supply, demand, costs, balancing })
    }

    /// Supply of each source, including a dummy.
    pub fn supply(&self) -> &[F] {
        &self.supply
    }

    /// Demand of each destination, including a dummy.
    pub fn demand(&self) -> &[F] {
        &self.demand
    }

    /// Cost per unit, including the zero costs of a dummy.
    pub fn costs(&self) -> &[Vec<F>] {
        &self.costs
    }

    /// Cost of shipping one unit from a source to a destination.
    pub fn cost(&self, source: usize, destination: usize) -> F {
        self.costs[source][destination]
    }

    /// Whether, and how, a dummy was added.
    pub fn balancing(&self) -> Balancing {
        self.balancing
    }

    /// Number of sources, including a dummy.
    pub fn nr_sources(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations, including a dummy.
    pub fn nr_destinations(&self) -> usize {
        self.demand.len()
    }

    /// Total supply, which equals the total demand.
    pub fn total_supply(&self) -> F {
        sum(&self.supply)
    }

    /// Cost of a complete allocation grid.
    pub fn total_cost(&self, allocation: &[Vec<F>]) -> F {
        debug_assert_eq!(allocation.len(), self.nr_sources());

        self.costs.iter().zip(allocation)
            .flat_map(|(costs, amounts)| costs.iter().zip(amounts))
            .fold(F::zero(), |total, (&cost, &amount)| total + cost * amount)
    }
}

fn sum<F: OrderedField>(values: &[F]) -> F {
    values.iter().fold(F::zero(), |total, &value| total + value)
}

/// Amounts shipped between each source and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentPlan<F> {
    /// Amount shipped, one row per source and one column per destination.
    pub allocation: Vec<Vec<F>>,
    /// Cells that are part of the basis, in the order that they entered it.
    ///
    /// Some of these may ship nothing.
    pub basic_cells: Vec<(usize, usize)>,
    /// Total cost of the plan.
    pub total_cost: F,
}

/// Solver for transportation problems, holding the configuration used for every solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transportation<F> {
    tolerances: Tolerances<F>,
    iteration_limit: usize,
}

impl<F: OrderedField> Transportation<F> {
    /// Create a new solver.
    pub fn new(tolerances: Tolerances<F>) -> Self {
        Self {
            tolerances,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }

    /// Change the maximum number of stepping stone pivots.
    #[must_use]
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// An initial feasible plan, not necessarily optimal.
    pub fn initial_plan(&self, problem: &TransportationProblem<F>) -> ShipmentPlan<F> {
        vogel::initial_plan(problem, self.tolerances.feasibility)
    }

    /// Improve a feasible plan to optimality.
    pub fn improve(
        &self,
        problem: &TransportationProblem<F>,
        plan: ShipmentPlan<F>,
    ) -> Result<Improvement<F>, TransportationError> {
        modi::improve(problem, plan, &self.tolerances, self.iteration_limit)
    }

    /// Find an optimal plan, starting from Vogel's approximation.
    pub fn solve(&self, problem: &TransportationProblem<F>) -> Result<Improvement<F>, TransportationError> {
        self.improve(problem, self.initial_plan(problem))
    }
}

impl<F> Default for Transportation<F>
where
    F: OrderedField,
    Tolerances<F>: Default,
{
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}
