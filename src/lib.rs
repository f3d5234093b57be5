//! # A dense tableau optimization library
//!
//! Linear programs are solved using the tableau form of the Simplex Method, in both its primal and
//! its dual variant. Integer and mixed-integer programs are solved by a breadth-first branch and
//! bound search around the primal engine. Two combinatorial problems that are special cases of
//! linear programming are solved by dedicated algorithms: the assignment problem (Hungarian method)
//! and the transportation problem (Vogel's approximation, followed by the MODI method).
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
