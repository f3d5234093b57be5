//! Helper methods for the accuracy of floating point calculations.
use num_traits::Float;

/// Distance of a value to the nearest whole number.
pub fn distance_to_integer<F: Float>(value: F) -> F {
    (value - value.round()).abs()
}

/// Whether a value should be treated as a whole number.
///
/// # Arguments
///
/// * `value`: Value to test.
/// * `tolerance`: Strictly positive; values closer than this to a whole number are integral.
pub fn is_integral<F: Float>(value: F, tolerance: F) -> bool {
    debug_assert!(tolerance > F::zero());

    distance_to_integer(value) < tolerance
}

/// Snap values that are within `tolerance` of zero to exactly zero.
///
/// Used when reporting solutions, such that `-0.0000000001` doesn't show up as a value.
pub fn clean_zero<F: Float>(value: F, tolerance: F) -> F {
    if value.abs() < tolerance {
        F::zero()
    } else {
        value
    }
}
