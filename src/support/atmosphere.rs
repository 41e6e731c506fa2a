//! Standard-atmosphere pressure as a function of altitude.
//!
//! The pressure model is the barometric formula used throughout the legacy
//! ERV tools:
//!
//! ```text
//! p = 14.696 psia × (1 − 0.0000368 × altitude_ft)^5.25588
//! ```
//!
//! # Example
//!
//! ```
//! use erv_models::support::atmosphere::{AtmosphericContext, atmospheric_pressure_psia};
//! use uom::si::{f64::Length, length::foot};
//!
//! assert_eq!(atmospheric_pressure_psia(0.0), 14.696);
//!
//! let denver = AtmosphericContext::from_altitude(Length::new::<foot>(5280.0));
//! assert!(denver.pressure_psia() < 14.696);
//! ```

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, Pressure},
    length::foot,
    pressure::pound_force_per_square_inch,
};

/// Sea-level standard pressure, psia.
pub const SEA_LEVEL_PRESSURE_PSIA: f64 = 14.696;

/// Linearized pressure lapse rate, per foot of altitude.
pub const ALTITUDE_LAPSE_RATE: f64 = 0.000_036_8;

/// Exponent of the barometric formula.
pub const BAROMETRIC_EXPONENT: f64 = 5.25588;

/// Altitude at which the barometric formula reaches zero pressure, ft.
///
/// Only altitudes strictly below this are physically meaningful.
pub const MAX_MODELED_ALTITUDE_FT: f64 = 1.0 / ALTITUDE_LAPSE_RATE;

/// Returns true if the barometric formula yields a positive pressure at
/// `altitude_ft`.
#[must_use]
pub fn is_modeled_altitude(altitude_ft: f64) -> bool {
    altitude_ft.is_finite() && 1.0 - ALTITUDE_LAPSE_RATE * altitude_ft > 0.0
}

/// Returns the atmospheric pressure in psia at `altitude_ft` feet.
///
/// The base of the power is floored at zero so altitudes beyond
/// [`MAX_MODELED_ALTITUDE_FT`] yield zero pressure instead of `NaN`. Check
/// [`is_modeled_altitude`] first when zero is not an acceptable answer.
#[must_use]
pub fn atmospheric_pressure_psia(altitude_ft: f64) -> f64 {
    let base = (1.0 - ALTITUDE_LAPSE_RATE * altitude_ft).max(0.0);
    SEA_LEVEL_PRESSURE_PSIA * base.powf(BAROMETRIC_EXPONENT)
}

/// Altitude and the atmospheric pressure derived from it.
///
/// Created fresh for every calculation; it holds no state beyond the two
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphericContext {
    /// Altitude above sea level, ft.
    pub altitude_ft: f64,

    /// Atmospheric pressure, psia.
    pub pressure_psia: f64,
}

impl AtmosphericContext {
    /// Standard sea-level conditions.
    #[must_use]
    pub fn sea_level() -> Self {
        Self::from_altitude_ft(0.0)
    }

    /// Creates a context from an altitude quantity.
    #[must_use]
    pub fn from_altitude(altitude: Length) -> Self {
        Self::from_altitude_ft(altitude.get::<foot>())
    }

    /// Creates a context from an altitude in feet.
    #[must_use]
    pub fn from_altitude_ft(altitude_ft: f64) -> Self {
        Self {
            altitude_ft,
            pressure_psia: atmospheric_pressure_psia(altitude_ft),
        }
    }

    /// Returns the altitude as a length quantity.
    #[must_use]
    pub fn altitude(&self) -> Length {
        Length::new::<foot>(self.altitude_ft)
    }

    /// Returns the atmospheric pressure as a pressure quantity.
    #[must_use]
    pub fn pressure(&self) -> Pressure {
        Pressure::new::<pound_force_per_square_inch>(self.pressure_psia)
    }

    /// Returns the atmospheric pressure in psia.
    #[must_use]
    pub fn pressure_psia(&self) -> f64 {
        self.pressure_psia
    }
}
