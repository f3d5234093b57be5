//! # Modified distribution method
//!
//! Improves a basic feasible plan to optimality. The basic cells form a spanning tree of the
//! bipartite graph of sources and destinations. Potentials `u` and `v` with `u_i + v_j = c_ij` on
//! every basic cell give the reduced cost `c_ij - u_i - v_j` of each other cell. A cell with a
//! negative reduced cost enters the basis along the unique cycle that it closes in the tree (the
//! stepping stone path).
use std::cmp::Ordering;
use std::collections::VecDeque;

use itertools::{Itertools, iproduct};

use crate::algorithm::settings::Tolerances;
use crate::algorithm::transportation::{ShipmentPlan, TransportationError, TransportationProblem};
use crate::data::number_types::traits::OrderedField;

/// An optimal plan and the work done to find it.
#[derive(Debug, Clone, PartialEq)]
pub struct Improvement<F> {
    /// The optimal plan.
    pub plan: ShipmentPlan<F>,
    /// Number of stepping stone pivots performed.
    pub pivots: usize,
}

/// Improve a basic feasible plan until no cell has a negative reduced cost.
///
/// The basic cells of the plan are first completed to a spanning tree with cells that ship
/// nothing, cheapest first. This is needed after degenerate allocations.
///
/// # Arguments
///
/// * `problem`: The balanced problem that `plan` is feasible for.
/// * `plan`: Feasible plan, all cells that ship goods should be in its basic cells.
/// * `tolerances`: Reduced costs below `-optimality` are improving.
/// * `iteration_limit`: Maximum number of pivots.
pub fn improve<F: OrderedField>(
    problem: &TransportationProblem<F>,
    mut plan: ShipmentPlan<F>,
    tolerances: &Tolerances<F>,
    iteration_limit: usize,
) -> Result<Improvement<F>, TransportationError> {
    let (m, n) = (problem.nr_sources(), problem.nr_destinations());
    let fits = plan.allocation.len() == m
        && plan.allocation.iter().all(|row| row.len() == n)
        && plan.basic_cells.iter().all(|&(i, j)| i < m && j < n);
    if !fits {
        return Err(TransportationError::PlanMismatch { rows: m, columns: n });
    }

    let mut basis = complete_basis(problem, &plan.basic_cells);
    let is_basic = basic_grid(m, n, &basis);
    if let Some((row, column)) = iproduct!(0..m, 0..n)
        .find(|&(i, j)| !is_basic[i][j] && plan.allocation[i][j] > tolerances.feasibility) {
        return Err(TransportationError::NotBasic { row, column });
    }

    let mut pivots = 0;
    loop {
        let (u, v) = potentials(problem, &basis);
        let Some(entering) = entering_cell(problem, &basis, &u, &v, tolerances.optimality) else {
            break;
        };
        if pivots >= iteration_limit {
            return Err(TransportationError::IterationLimit { iterations: pivots });
        }

        let cycle = stepping_stone_path(m, n, &basis, entering);
        let leaving = shift_along_cycle(&mut plan.allocation, entering, &cycle);
        if let Some(position) = basis.iter().position(|&cell| cell == leaving) {
            basis[position] = entering;
        }
        pivots += 1;
        log::debug!("pivot {}: {:?} enters, {:?} leaves", pivots, entering, leaving);
    }

    plan.basic_cells = basis;
    plan.total_cost = problem.total_cost(&plan.allocation);
    log::debug!("optimal plan after {} pivots, cost {:?}", pivots, plan.total_cost);

    Ok(Improvement { plan, pivots })
}

/// Union-find over the rows and columns of the cost matrix, columns offset by the number of rows.
struct Components {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl Components {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Whether the two were in different components.
    fn union(&mut self, x: usize, y: usize) -> bool {
        let (px, py) = (self.find(x), self.find(y));
        if px == py {
            return false;
        }

        match self.rank[px].cmp(&self.rank[py]) {
            Ordering::Less => self.parent[px] = py,
            Ordering::Greater => self.parent[py] = px,
            Ordering::Equal => {
                self.parent[py] = px;
                self.rank[px] += 1;
            },
        }
        true
    }
}

/// Extend the given cells to a spanning tree of `m + n - 1` cells.
///
/// Cells that would close a cycle are dropped.
fn complete_basis<F: OrderedField>(
    problem: &TransportationProblem<F>,
    cells: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let (m, n) = (problem.nr_sources(), problem.nr_destinations());
    let size = m + n - 1;
    let mut components = Components::new(m + n);

    let mut basis = Vec::with_capacity(size);
    for &(i, j) in cells {
        if components.union(i, m + j) {
            basis.push((i, j));
        } else {
            log::warn!("cell ({}, {}) closes a cycle in the basis, dropped", i, j);
        }
    }

    if basis.len() < size {
        // Stable sort, so ties stay in row major order
        let candidates = iproduct!(0..m, 0..n)
            .sorted_by(|&(i1, j1), &(i2, j2)| {
                problem.cost(i1, j1).partial_cmp(&problem.cost(i2, j2)).unwrap_or(Ordering::Equal)
            });
        for (i, j) in candidates {
            if basis.len() == size {
                break;
            }
            if components.union(i, m + j) {
                log::warn!("basis completed with empty cell ({}, {})", i, j);
                basis.push((i, j));
            }
        }
    }

    basis
}

fn basic_grid(m: usize, n: usize, basis: &[(usize, usize)]) -> Vec<Vec<bool>> {
    let mut grid = vec![vec![false; n]; m];
    for &(i, j) in basis {
        grid[i][j] = true;
    }
    grid
}

/// Neighbors of each row `i` (node `i`) and column `j` (node `m + j`) in the basis tree.
fn adjacency(m: usize, n: usize, basis: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); m + n];
    for &(i, j) in basis {
        neighbors[i].push(m + j);
        neighbors[m + j].push(i);
    }
    neighbors
}

/// Row potentials `u` and column potentials `v`, with `u_0 = 0`.
fn potentials<F: OrderedField>(
    problem: &TransportationProblem<F>,
    basis: &[(usize, usize)],
) -> (Vec<F>, Vec<F>) {
    let (m, n) = (problem.nr_sources(), problem.nr_destinations());
    let neighbors = adjacency(m, n, basis);

    let mut potential = vec![None; m + n];
    potential[0] = Some(F::zero());
    let mut queue = VecDeque::from([0]);
    while let Some(node) = queue.pop_front() {
        let Some(value) = potential[node] else { continue };
        for &other in &neighbors[node] {
            if potential[other].is_none() {
                let (i, j) = if node < m { (node, other - m) } else { (other, node - m) };
                potential[other] = Some(problem.cost(i, j) - value);
                queue.push_back(other);
            }
        }
    }

    // The basis is a spanning tree, so every potential is set
    let mut u = potential.into_iter().map(|p| p.unwrap_or_else(F::zero)).collect::<Vec<_>>();
    let v = u.split_off(m);

    (u, v)
}

/// The non-basic cell with the most negative reduced cost, the first in row major order on ties.
fn entering_cell<F: OrderedField>(
    problem: &TransportationProblem<F>,
    basis: &[(usize, usize)],
    u: &[F],
    v: &[F],
    tolerance: F,
) -> Option<(usize, usize)> {
    let (m, n) = (problem.nr_sources(), problem.nr_destinations());
    let is_basic = basic_grid(m, n, basis);

    let mut most_negative: Option<((usize, usize), F)> = None;
    for (i, j) in iproduct!(0..m, 0..n).filter(|&(i, j)| !is_basic[i][j]) {
        let reduced = problem.cost(i, j) - u[i] - v[j];
        if reduced < -tolerance && most_negative.is_none_or(|(_, existing)| reduced < existing) {
            most_negative = Some(((i, j), reduced));
        }
    }

    most_negative.map(|(cell, _)| cell)
}

/// Basic cells on the tree path from the entering cell's column back to its row.
///
/// Together with the entering cell these form the cycle. The first cell shares the column of the
/// entering cell.
fn stepping_stone_path(
    m: usize,
    n: usize,
    basis: &[(usize, usize)],
    (row, column): (usize, usize),
) -> Vec<(usize, usize)> {
    let neighbors = adjacency(m, n, basis);

    let start = m + column;
    let mut previous = vec![None; m + n];
    let mut visited = vec![false; m + n];
    visited[start] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if node == row {
            break;
        }
        for &other in &neighbors[node] {
            if !visited[other] {
                visited[other] = true;
                previous[other] = Some(node);
                queue.push_back(other);
            }
        }
    }

    let mut path = Vec::new();
    let mut node = row;
    while let Some(parent) = previous[node] {
        let cell = if node < m { (node, parent - m) } else { (parent, node - m) };
        path.push(cell);
        node = parent;
    }
    path.reverse();

    path
}

/// Move as much as possible around the cycle, returns the cell that leaves the basis.
///
/// Cells at even positions in `path` lose, cells at odd positions gain.
fn shift_along_cycle<F: OrderedField>(
    allocation: &mut [Vec<F>],
    entering: (usize, usize),
    path: &[(usize, usize)],
) -> (usize, usize) {
    debug_assert!(path.len() % 2 == 1);

    let losing = path.iter().step_by(2)
        .position_min_by(|&&(i1, j1), &&(i2, j2)| {
            allocation[i1][j1].partial_cmp(&allocation[i2][j2]).unwrap_or(Ordering::Equal)
        })
        .unwrap_or(0);
    let leaving = path[2 * losing];
    let theta = allocation[leaving.0][leaving.1];

    allocation[entering.0][entering.1] = allocation[entering.0][entering.1] + theta;
    for (k, &(i, j)) in path.iter().enumerate() {
        allocation[i][j] = if k % 2 == 0 { allocation[i][j] - theta } else { allocation[i][j] + theta };
    }
    allocation[leaving.0][leaving.1] = F::zero();

    leaving
}
