//! # Floating point numbers
//!
//! Assumed to be fast enough for the dense methods in this crate. Correctness guarantees are harder
//! to give due to (accumulating) rounding errors, all comparisons go through explicit tolerances.
pub mod numerical_precision;
