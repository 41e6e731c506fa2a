//! Numeric constraints checked once at construction.
//!
//! Engineering inputs arrive as loosely validated numbers. Wrapping them in
//! [`Constrained<T, C>`] records, in the type, that the check already
//! happened: an airflow that is [`StrictlyPositive`] can be divided by, an
//! effectiveness in the [`UnitInterval`] can be used as a weight.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: zero or greater (tonnage, pre-heater size)
//! - [`StrictlyPositive`]: greater than zero (airflow, face area)
//! - [`UnitInterval`]: closed interval `0 ≤ x ≤ 1` (effectiveness, humidity)
//!
//! # Example
//!
//! ```
//! use erv_models::support::constraint::{Constrained, ConstraintError, StrictlyPositive};
//!
//! let supply_cfm = Constrained::<f64, StrictlyPositive>::new(5600.0).unwrap();
//! assert_eq!(supply_cfm.into_inner(), 5600.0);
//!
//! assert_eq!(StrictlyPositive::new(0.0).unwrap_err(), ConstraintError::Zero);
//! ```

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant enforced when a [`Constrained`] value is built.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value that is known to satisfy the constraint `C`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> ConstraintResult<Self> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
