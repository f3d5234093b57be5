//! # Configuration of the algorithms
//!
//! Each engine instance holds its own tolerances, such that different instances (and tests) never
//! influence each other.

/// Fixed epsilons used for comparisons of floating point values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances<F> {
    /// Pivot elements with a smaller magnitude are refused; ratio tests ignore smaller entries.
    pub pivot: F,
    /// Right-hand side values below the negation of this value are infeasible.
    pub feasibility: F,
    /// Relative costs below the negation of this value are profitable.
    pub optimality: F,
    /// Values closer than this to a whole number are integral.
    pub integrality: F,
}

impl<F: Copy> Tolerances<F> {
    /// Use the same value for all tolerances but the integrality tolerance.
    pub fn new(epsilon: F, integrality: F) -> Self {
        Self {
            pivot: epsilon,
            feasibility: epsilon,
            optimality: epsilon,
            integrality,
        }
    }
}

macro_rules! default_tolerances {
    ($float:ty, $epsilon:expr, $integrality:expr) => {
        impl Default for Tolerances<$float> {
            fn default() -> Self {
                Self::new($epsilon, $integrality)
            }
        }
    };
}

default_tolerances!(f64, 1e-9, 1e-6);
default_tolerances!(f32, 1e-5, 1e-4);

/// Number of pivots after which an engine gives up, assuming that it is cycling.
pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;

/// Configuration of the branch and bound search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchAndBoundSettings<F> {
    /// Tolerances used by the relaxation solves and the integrality test.
    pub tolerances: Tolerances<F>,
    /// Pivots per relaxation solve.
    pub iteration_limit: usize,
    /// Maximum number of nodes taken from the frontier, unlimited if `None`.
    ///
    /// Checked each time a node is taken from the frontier.
    pub node_limit: Option<usize>,
}

impl<F> Default for BranchAndBoundSettings<F>
where
    Tolerances<F>: Default,
{
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            node_limit: None,
        }
    }
}
