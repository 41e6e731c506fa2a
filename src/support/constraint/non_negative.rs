use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is zero or greater.
///
/// # Examples
///
/// ```
/// use erv_models::support::constraint::NonNegative;
///
/// let tons = NonNegative::new(12.5).unwrap();
/// assert_eq!(tons.into_inner(), 12.5);
///
/// assert!(NonNegative::new(0.0).is_ok());
/// assert!(NonNegative::new(-0.1).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Constructs a non-negative value by flooring negatives at zero.
    ///
    /// `NaN` is mapped to zero as well.
    #[must_use]
    pub fn saturating(value: f64) -> Constrained<f64, NonNegative> {
        let value = if value > 0.0 { value } else { 0.0 };
        Constrained {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Power, power::horsepower};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(2.0).is_ok());
        assert_eq!(NonNegative::new(-2.0), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn saturating_floors_at_zero() {
        assert_eq!(NonNegative::saturating(-3.2).into_inner(), 0.0);
        assert_eq!(NonNegative::saturating(f64::NAN).into_inner(), 0.0);
        assert_eq!(NonNegative::saturating(4.0).into_inner(), 4.0);
    }

    #[test]
    fn brake_power() {
        assert!(NonNegative::new(Power::new::<horsepower>(0.44)).is_ok());
        assert!(NonNegative::new(Power::new::<horsepower>(-0.1)).is_err());
    }
}
