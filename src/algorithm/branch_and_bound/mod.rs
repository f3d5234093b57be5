//! # Branch and bound
//!
//! Integer and mixed integer programs are solved by repeatedly solving relaxations. A relaxation
//! with a fractional value for an integer variable `x_k = f` is split in two: one child with
//! `x_k <= floor(f)` and one with `x_k >= ceil(f)`. Children are explored breadth-first from a
//! queue of owned nodes, and relaxations that can't improve on the best integer solution found so
//! far (the incumbent) are pruned.
use std::collections::VecDeque;

use enum_map::{Enum, EnumMap};
use thiserror::Error;

use crate::algorithm::OptimizationResult;
use crate::algorithm::branch_and_bound::node::Node;
use crate::algorithm::settings::BranchAndBoundSettings;
use crate::algorithm::simplex::{Simplex, SimplexError};
use crate::algorithm::simplex::tableau::Tableau;
use crate::data::linear_program::canonical_form::IntegerProgram;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::linear_program::solution::Solution;
use crate::data::number_types::traits::OrderedField;

pub mod node;

/// Reasons for the search to stop before the frontier is empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BranchAndBoundError {
    /// Solving the relaxation of a node failed.
    #[error("relaxation of node {node} failed")]
    Simplex {
        /// Node whose relaxation was being solved.
        node: usize,
        /// What went wrong.
        #[source]
        source: SimplexError,
    },
    /// The configured maximum number of nodes was taken from the frontier.
    #[error("node limit reached after exploring {explored} nodes")]
    NodeLimit {
        /// Number of nodes taken from the frontier.
        explored: usize,
    },
}

/// What happened to a node (or a relaxation that didn't become a node).
#[allow(missing_docs)]
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum NodeOutcome {
    /// Split into two children on a fractional variable.
    Branched,
    /// The relaxation had an integral solution.
    Integral,
    /// The relaxation couldn't improve on the incumbent.
    PrunedByBound,
    Infeasible,
}

/// Counters describing a search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    /// Number of nodes taken from the frontier.
    pub nodes_explored: usize,
    /// How often each outcome occurred.
    pub outcomes: EnumMap<NodeOutcome, usize>,
}

impl Statistics {
    fn record(&mut self, outcome: NodeOutcome) {
        self.outcomes[outcome] += 1;
    }
}

/// Everything that a search produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<F> {
    /// The optimal integer solution, or why there is none.
    pub result: OptimizationResult<Solution<F>>,
    /// Every improvement of the incumbent, in the order that they were found.
    ///
    /// The last one, if any, is the optimal solution.
    pub incumbent_updates: Vec<Solution<F>>,
    /// Counters.
    pub statistics: Statistics,
}

/// Breadth-first branch and bound around the primal simplex method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchAndBound<F> {
    settings: BranchAndBoundSettings<F>,
    simplex: Simplex<F>,
}

impl<F: OrderedField> BranchAndBound<F> {
    /// Create a new search driver.
    pub fn new(settings: BranchAndBoundSettings<F>) -> Self {
        let simplex = Simplex::new(settings.tolerances)
            .with_iteration_limit(settings.iteration_limit);

        Self { settings, simplex }
    }

    /// Solve an integer program.
    ///
    /// # Return value
    ///
    /// The optimal solution in `SearchResult::result`, `Infeasible` if no integer solution exists
    /// and `Unbounded` if the root relaxation is unbounded.
    pub fn solve(&self, program: &IntegerProgram<F>) -> Result<SearchResult<F>, BranchAndBoundError> {
        let mut search = Search::new(program, self.settings.tolerances.integrality);

        let mut root_tableau = Tableau::new(program.relaxation());
        let root = match self.relax(&mut root_tableau, 0)? {
            OptimizationResult::FiniteOptimum(solution) => search.node(0, 0, root_tableau, solution),
            OptimizationResult::Infeasible => {
                log::info!("root relaxation is infeasible");
                search.statistics.record(NodeOutcome::Infeasible);
                return Ok(search.finish(OptimizationResult::Infeasible));
            },
            OptimizationResult::Unbounded => {
                log::info!("root relaxation is unbounded");
                return Ok(search.finish(OptimizationResult::Unbounded));
            },
        };
        search.frontier.push_back(root);

        while let Some(node) = search.frontier.pop_front() {
            if let Some(limit) = self.settings.node_limit {
                if search.statistics.nodes_explored >= limit {
                    return Err(BranchAndBoundError::NodeLimit { explored: search.statistics.nodes_explored });
                }
            }
            search.statistics.nodes_explored += 1;

            if !search.improves(node.bound()) {
                log::debug!("node {} pruned, bound {:?}", node.id(), node.bound());
                search.statistics.record(NodeOutcome::PrunedByBound);
                continue;
            }

            let Some(variable) = node.branch_variable() else {
                search.statistics.record(NodeOutcome::Integral);
                search.update_incumbent(node);
                continue;
            };

            log::debug!(
                "node {} at depth {} branches on x{} = {:?}",
                node.id(), node.depth(), variable, node.solution().value(variable),
            );
            search.statistics.record(NodeOutcome::Branched);
            let value = node.solution().value(variable);
            for (direction, bound) in [(BoundDirection::Upper, value.floor()), (BoundDirection::Lower, value.ceil())] {
                let id = search.next_id();
                let mut tableau = node.tableau().with_bound(variable, direction, bound);
                match self.relax(&mut tableau, id)? {
                    OptimizationResult::FiniteOptimum(solution) => {
                        let child = search.node(id, node.depth() + 1, tableau, solution);
                        if search.improves(child.bound()) {
                            search.frontier.push_back(child);
                        } else {
                            search.statistics.record(NodeOutcome::PrunedByBound);
                        }
                    },
                    OptimizationResult::Infeasible => search.statistics.record(NodeOutcome::Infeasible),
                    OptimizationResult::Unbounded => {
                        // Adding a constraint can't make a bounded relaxation unbounded
                        log::warn!("relaxation of node {} is unbounded", id);
                        return Ok(search.finish(OptimizationResult::Unbounded));
                    },
                }
            }
        }

        let result = match search.incumbent.take() {
            Some(node) => OptimizationResult::FiniteOptimum(node.into_solution()),
            None => OptimizationResult::Infeasible,
        };
        log::info!(
            "search finished after {} nodes: {:?}",
            search.statistics.nodes_explored, search.statistics.outcomes,
        );

        Ok(search.finish(result))
    }

    fn relax(
        &self,
        tableau: &mut Tableau<F>,
        node: usize,
    ) -> Result<OptimizationResult<Solution<F>>, BranchAndBoundError> {
        self.simplex.reoptimize(tableau)
            .map_err(|source| BranchAndBoundError::Simplex { node, source })
    }
}

impl<F> Default for BranchAndBound<F>
where
    F: OrderedField,
    BranchAndBoundSettings<F>: Default,
{
    fn default() -> Self {
        Self::new(BranchAndBoundSettings::default())
    }
}

/// State of a single search.
struct Search<'a, F> {
    program: &'a IntegerProgram<F>,
    integrality: F,
    frontier: VecDeque<Node<F>>,
    incumbent: Option<Node<F>>,
    incumbent_updates: Vec<Solution<F>>,
    statistics: Statistics,
    next_id: usize,
}

impl<'a, F: OrderedField> Search<'a, F> {
    fn new(program: &'a IntegerProgram<F>, integrality: F) -> Self {
        Self {
            program,
            integrality,
            frontier: VecDeque::new(),
            incumbent: None,
            incumbent_updates: Vec::new(),
            statistics: Statistics::default(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn node(&self, id: usize, depth: usize, tableau: Tableau<F>, solution: Solution<F>) -> Node<F> {
        Node::new(id, depth, tableau, solution, self.program.variable_types(), self.integrality)
    }

    /// Whether a relaxation bound is strictly better than the incumbent.
    fn improves(&self, bound: F) -> bool {
        self.incumbent.as_ref().is_none_or(|incumbent| bound > incumbent.bound())
    }

    fn update_incumbent(&mut self, node: Node<F>) {
        if self.improves(node.bound()) {
            log::info!(
                "new incumbent from node {}: value {:?}, solution {:?}",
                node.id(), node.solution().objective_value(), node.solution().values(),
            );
            self.incumbent_updates.push(node.solution().clone());
            self.incumbent = Some(node);
        }
    }

    fn finish(self, result: OptimizationResult<Solution<F>>) -> SearchResult<F> {
        SearchResult {
            result,
            incumbent_updates: self.incumbent_updates,
            statistics: self.statistics,
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::OptimizationResult;
    use crate::algorithm::branch_and_bound::{BranchAndBound, BranchAndBoundError, NodeOutcome};
    use crate::algorithm::settings::BranchAndBoundSettings;
    use crate::data::linear_program::canonical_form::{IntegerProgram, LinearProgram};
    use crate::data::linear_program::elements::{Objective, VariableType};
    use crate::data::number_types::float::numerical_precision::is_integral;
    use crate::tests::{problem_1, problem_2};

    #[test]
    fn integral_relaxation() {
        let search = BranchAndBound::default().solve(&problem_1::integer_program()).unwrap();

        let solution = search.result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), problem_1::OPTIMAL_VALUE, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(0), 2f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(1), 6f64, epsilon = 1e-9);
        assert_eq!(search.statistics.nodes_explored, 1);
        assert_eq!(search.statistics.outcomes[NodeOutcome::Branched], 0);
        assert_eq!(search.statistics.outcomes[NodeOutcome::Integral], 1);
        assert_eq!(search.incumbent_updates.len(), 1);
    }

    #[test]
    fn fractional_relaxation() {
        let program = problem_2::integer_program();
        let search = BranchAndBound::default().solve(&program).unwrap();

        let solution = search.result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), problem_2::OPTIMAL_VALUE, epsilon = 1e-9);
        assert!(solution.values().iter().all(|&v| is_integral(v, 1e-6)));
        assert!(program.relaxation().is_feasible(solution.values(), 1e-9));
        assert!(search.statistics.outcomes[NodeOutcome::Branched] >= 1);

        // The last update is the optimum, values only increase
        let last = search.incumbent_updates.last().unwrap();
        assert_eq!(last.objective_value(), solution.objective_value());
        assert!(search.incumbent_updates.windows(2)
            .all(|pair| pair[0].objective_value() < pair[1].objective_value()));
    }

    #[test]
    fn mixed() {
        // Only x integer: the optimum is 2.5 at (1, 1.5)
        let program = IntegerProgram::new(
            problem_2::linear_program(),
            vec![VariableType::Integer, VariableType::Continuous],
        ).unwrap();
        let search = BranchAndBound::default().solve(&program).unwrap();

        let solution = search.result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), 2.5f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(0), 1f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(1), 1.5f64, epsilon = 1e-9);
        assert_eq!(search.statistics.outcomes[NodeOutcome::Branched], 1);
        assert_eq!(search.statistics.outcomes[NodeOutcome::PrunedByBound], 1);
    }

    #[test]
    fn minimize() {
        // minimize 2x + 3y s.t. x + y >= 2.5, optimum 6 at (3, 0)
        let program = IntegerProgram::pure(LinearProgram::new(
            Objective::Minimize,
            vec![vec![-1f64, -1f64]],
            vec![-2.5f64],
            vec![2f64, 3f64],
        ).unwrap());
        let search = BranchAndBound::default().solve(&program).unwrap();

        let solution = search.result.finite_optimum().unwrap();
        assert_abs_diff_eq!(solution.objective_value(), 6f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(0), 3f64, epsilon = 1e-9);
        assert_abs_diff_eq!(solution.value(1), 0f64, epsilon = 1e-9);
    }

    #[test]
    fn infeasible_after_branching() {
        // minimize x s.t. x >= 1/2, x <= 1/2
        let program = IntegerProgram::pure(LinearProgram::new(
            Objective::Minimize,
            vec![vec![-2f64], vec![2f64]],
            vec![-1f64, 1f64],
            vec![1f64],
        ).unwrap());
        let search = BranchAndBound::default().solve(&program).unwrap();

        assert_eq!(search.result, OptimizationResult::Infeasible);
        assert!(search.incumbent_updates.is_empty());
        assert_eq!(search.statistics.outcomes[NodeOutcome::Branched], 1);
        assert_eq!(search.statistics.outcomes[NodeOutcome::Infeasible], 2);
    }

    #[test]
    fn infeasible_root() {
        // minimize x s.t. x >= 2, x <= 1
        let program = IntegerProgram::pure(LinearProgram::new(
            Objective::Minimize,
            vec![vec![-1f64], vec![1f64]],
            vec![-2f64, 1f64],
            vec![1f64],
        ).unwrap());
        let search = BranchAndBound::default().solve(&program).unwrap();

        assert_eq!(search.result, OptimizationResult::Infeasible);
        assert_eq!(search.statistics.nodes_explored, 0);
    }

    #[test]
    fn unbounded_root() {
        let program = IntegerProgram::pure(LinearProgram::new(
            Objective::Maximize,
            vec![vec![1f64, -1f64]],
            vec![1f64],
            vec![1f64, 1f64],
        ).unwrap());
        let search = BranchAndBound::default().solve(&program).unwrap();

        assert_eq!(search.result, OptimizationResult::Unbounded);
    }

    #[test]
    fn node_limit() {
        let settings = BranchAndBoundSettings { node_limit: Some(1), ..Default::default() };
        let result = BranchAndBound::new(settings).solve(&problem_2::integer_program());

        assert_eq!(result, Err(BranchAndBoundError::NodeLimit { explored: 1 }));
    }
}
