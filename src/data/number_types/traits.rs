//! # Traits
//!
//! The hierarchy of number types is reduced to a single trait, implemented for the IEEE floats. The
//! contract that the name implies is not kept precisely: floats are not a field, and rounding errors
//! are dealt with by the tolerances in `algorithm::settings`.
use std::fmt::Debug;

use num_traits::Float;

/// The simplex algorithm is defined over the ordered fields. All methods containing algorithmic
/// logic should be defined to work on this trait.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait OrderedField: Float + Debug + Send + Sync + 'static {}
impl<T: Float + Debug + Send + Sync + 'static> OrderedField for T {}
