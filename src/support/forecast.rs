//! Two-point linear forecast.
//!
//! Fan curves in the selection tool are characterized by two reference
//! operating points. Values at other airflows come from the straight line
//! through those points, the same way a spreadsheet `FORECAST` cell does.
//! Points outside the reference span are extrapolated, never clamped.

use thiserror::Error;

/// Errors returned by [`forecast`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ForecastError {
    /// The two reference abscissae coincide, so no line is defined.
    #[error("reference points share the same x value ({x})")]
    DegenerateReference { x: f64 },

    /// An input was `NaN` or infinite.
    #[error("forecast inputs must be finite")]
    NonFinite,
}

/// Returns `y1 + (x − x1)(y2 − y1)/(x2 − x1)`.
///
/// # Errors
///
/// Returns [`ForecastError::DegenerateReference`] when `x1 == x2` and
/// [`ForecastError::NonFinite`] when any input is not finite.
///
/// # Example
///
/// ```
/// use erv_models::support::forecast::forecast;
///
/// let bhp = forecast(2500.0, [2000.0, 3000.0], [0.30, 0.40]).unwrap();
/// assert!((bhp - 0.35).abs() < 1e-12);
///
/// // Extrapolates beyond the reference span.
/// let bhp = forecast(4000.0, [2000.0, 3000.0], [0.30, 0.40]).unwrap();
/// assert!((bhp - 0.50).abs() < 1e-12);
/// ```
pub fn forecast(x: f64, xs: [f64; 2], ys: [f64; 2]) -> Result<f64, ForecastError> {
    let [x1, x2] = xs;
    let [y1, y2] = ys;

    if ![x, x1, x2, y1, y2].iter().all(|v| v.is_finite()) {
        return Err(ForecastError::NonFinite);
    }
    if x1 == x2 {
        return Err(ForecastError::DegenerateReference { x: x1 });
    }

    Ok(y1 + (x - x1) * (y2 - y1) / (x2 - x1))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn reproduces_reference_points() {
        let xs = [4000.0, 6000.0];
        let ys = [0.501_093_183_424_750_3, 0.529_391_083_402_822];
        assert_eq!(forecast(4000.0, xs, ys).unwrap(), ys[0]);
        assert_relative_eq!(forecast(6000.0, xs, ys).unwrap(), ys[1], epsilon = 1e-15);
    }

    #[test]
    fn extrapolates_below_span() {
        let value = forecast(3000.0, [4000.0, 6000.0], [0.5, 0.6]).unwrap();
        assert_relative_eq!(value, 0.45, epsilon = 1e-12);
    }

    #[test]
    fn rejects_degenerate_reference() {
        assert_eq!(
            forecast(1.0, [2.0, 2.0], [0.0, 1.0]),
            Err(ForecastError::DegenerateReference { x: 2.0 })
        );
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(
            forecast(f64::NAN, [0.0, 1.0], [0.0, 1.0]),
            Err(ForecastError::NonFinite)
        );
    }

    proptest! {
        #[test]
        fn midpoint_maps_to_mean(
            x1 in -1.0e4..1.0e4_f64,
            span in 1.0..1.0e4_f64,
            y1 in -1.0e3..1.0e3_f64,
            y2 in -1.0e3..1.0e3_f64,
        ) {
            let x2 = x1 + span;
            let mid = forecast((x1 + x2) / 2.0, [x1, x2], [y1, y2]).unwrap();
            prop_assert!((mid - (y1 + y2) / 2.0).abs() <= 1e-9 * (1.0 + y1.abs() + y2.abs()));
        }
    }
}
