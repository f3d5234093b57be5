//! # Strategies
//!
//! Decisions taken during the Simplex method that don't affect correctness, only the path taken
//! from the initial basis to an optimal one.
pub mod pivot_rule;
