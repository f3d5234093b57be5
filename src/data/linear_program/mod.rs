//! # Representing linear programs
//!
//! A linear program is stored in the canonical form `Ax <= b, x >= 0` with a direction of
//! optimization. Integer programs add a type per variable.
pub mod canonical_form;
pub mod elements;
pub mod solution;
