//! # Building blocks to describe linear programs.
use std::ops::Neg;
use std::ops::Not;

use num_traits::One;

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

impl Objective {
    /// Factor that converts a cost into the cost of the maximization form.
    ///
    /// The tableau always maximizes; minimizing `c x` is maximizing `-c x`.
    #[must_use]
    pub fn into<F: One + Neg<Output = F>>(self) -> F {
        match self {
            Objective::Maximize => F::one(),
            Objective::Minimize => -F::one(),
        }
    }
}

/// A variable is either continuous or integer.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum VariableType {
    #[default]
    Continuous,
    Integer,
}

impl Not for VariableType {
    type Output = VariableType;

    fn not(self) -> VariableType {
        match self {
            VariableType::Continuous => VariableType::Integer,
            VariableType::Integer => VariableType::Continuous,
        }
    }
}

/// Direction of a bound.
///
/// Used when branching: a variable receives either an upper bound (rounded down value) or a lower
/// bound (rounded up value).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundDirection {
    /// In the case of a variable, x >= b >= 0.
    Lower,
    /// In the case of a variable, 0 <= x <= b.
    Upper,
}

impl BoundDirection {
    /// Convert a bound direction into a positive or negative one.
    ///
    /// Upper bounds can be added as a `<=` row directly, lower bounds need to be negated to fit
    /// the same shape.
    #[must_use]
    pub fn into<F: One + Neg<Output = F>>(self) -> F {
        match self {
            BoundDirection::Lower => -F::one(),
            BoundDirection::Upper => F::one(),
        }
    }
}

impl Not for BoundDirection {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{BoundDirection, Objective, VariableType};

    #[test]
    fn signs() {
        assert_eq!(BoundDirection::Upper.into::<f64>(), 1f64);
        assert_eq!(BoundDirection::Lower.into::<f64>(), -1f64);
        assert_eq!(Objective::Maximize.into::<f64>(), 1f64);
        assert_eq!(Objective::Minimize.into::<f64>(), -1f64);
    }

    #[test]
    fn negation() {
        assert_eq!(!BoundDirection::Upper, BoundDirection::Lower);
        assert_eq!(!VariableType::Integer, VariableType::Continuous);
    }
}
