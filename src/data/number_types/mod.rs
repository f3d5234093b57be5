//! # Number types
//!
//! All algorithms in this crate are written against the `OrderedField` trait rather than against a
//! concrete float. The tests use `f64`, but the same code runs without adaptation on `f32`.
pub mod traits;
pub mod float;
