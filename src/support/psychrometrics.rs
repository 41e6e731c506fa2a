//! Moist-air property functions in engineering units.
//!
//! Temperatures are °F, pressures psia, humidity ratios lb water per lb dry
//! air, and enthalpies Btu per lb dry air. The correlations reproduce the
//! selection tool's spreadsheet functions rather than full ASHRAE rigor:
//! saturation pressure comes from an Antoine-form fit and vapor pressure from
//! the Carrier psychrometer relation.
//!
//! Every function is pure. Instead of failing, invalid inputs produce the
//! documented fallback value of each function (the spreadsheet's "blank cell").
//!
//! # Example
//!
//! ```
//! use erv_models::support::psychrometrics::{grains, enthalpy};
//!
//! let gr = grains(95.0, 14.696, 78.0);
//! assert!(gr > 120.0 && gr < 130.0);
//!
//! let h = enthalpy(95.0, 14.696, 78.0);
//! assert!(h > 40.0 && h < 45.0);
//! ```

mod wet_bulb;

pub use wet_bulb::{WetBulb, WetBulbConfig, WetBulbError, WetBulbTarget, wet_bulb};

use crate::support::atmosphere::{ALTITUDE_LAPSE_RATE, BAROMETRIC_EXPONENT};

/// Ratio of the molecular weights of water vapor and dry air.
pub const MOLECULAR_WEIGHT_RATIO: f64 = 0.62198;

/// Grains of water per pound.
pub const GRAINS_PER_POUND: f64 = 7000.0;

/// Gas constant of dry air, ft·lbf/(lbm·°R).
pub const DRY_AIR_GAS_CONSTANT: f64 = 53.35;

/// Offset between °F and °R.
pub const RANKINE_OFFSET: f64 = 459.67;

/// Specific volume reported when inputs are invalid, ft³/lb.
pub const STANDARD_SPECIFIC_VOLUME: f64 = 13.5;

/// Standard air density at sea level and 70 °F, lb/ft³.
pub const STANDARD_AIR_DENSITY: f64 = 0.075;

const ANTOINE_A: f64 = 8.07131;
const ANTOINE_B: f64 = 1730.63;
const ANTOINE_C: f64 = 233.426;
const KPA_TO_PSIA: f64 = 0.145_037_73;

/// Psychrometer coefficient of the Carrier relation, per °F.
const PSYCHROMETER_COEFFICIENT: f64 = 0.00066;

/// Specific heat of dry air, Btu/(lb·°F).
const CP_DRY_AIR: f64 = 0.24;

/// Latent heat term of water vapor at 32 °F, Btu/lb.
const HG_WATER_VAPOR: f64 = 1061.0;

/// Specific heat of water vapor, Btu/(lb·°F).
const CP_WATER_VAPOR: f64 = 0.444;

/// Returns the saturation pressure of water vapor at `temp_f`, psia.
#[must_use]
pub fn saturation_pressure(temp_f: f64) -> f64 {
    let temp_c = fahrenheit_to_celsius(temp_f);
    (ANTOINE_A - ANTOINE_B / (temp_c + ANTOINE_C)).exp() * KPA_TO_PSIA
}

/// Returns the partial pressure of water vapor implied by a psychrometer
/// reading, psia.
///
/// The result is not floored, so it may be negative for wet bulbs far below
/// the dry bulb.
#[must_use]
pub fn vapor_pressure(dry_bulb_f: f64, pressure_psia: f64, wet_bulb_f: f64) -> f64 {
    let pws = saturation_pressure(wet_bulb_f);
    let depression = dry_bulb_f - wet_bulb_f;
    let correction = 1.0 + 0.00115 * wet_bulb_f;
    pws - (pressure_psia - pws) * depression * PSYCHROMETER_COEFFICIENT * correction
}

/// Returns the humidity ratio (lb water / lb dry air) of a psychrometer
/// reading.
///
/// Fallback: `0.0` when the result is negative or not finite, including the
/// case where vapor pressure reaches the total pressure.
#[must_use]
pub fn humidity_ratio(dry_bulb_f: f64, pressure_psia: f64, wet_bulb_f: f64) -> f64 {
    let pv = vapor_pressure(dry_bulb_f, pressure_psia, wet_bulb_f);
    if pressure_psia <= pv {
        return 0.0;
    }
    let w = MOLECULAR_WEIGHT_RATIO * pv / (pressure_psia - pv);
    if w.is_finite() { w.max(0.0) } else { 0.0 }
}

/// Returns the moisture content in grains per pound of dry air.
///
/// Fallback: `0.0`, as for [`humidity_ratio`].
#[must_use]
pub fn grains(dry_bulb_f: f64, pressure_psia: f64, wet_bulb_f: f64) -> f64 {
    humidity_ratio(dry_bulb_f, pressure_psia, wet_bulb_f) * GRAINS_PER_POUND
}

/// Returns moist-air enthalpy, Btu/lb dry air, from a psychrometer reading.
///
/// Fallback: `0.0` when any input is not finite.
#[must_use]
pub fn enthalpy(dry_bulb_f: f64, pressure_psia: f64, wet_bulb_f: f64) -> f64 {
    if !all_finite(&[dry_bulb_f, pressure_psia, wet_bulb_f]) {
        return 0.0;
    }
    let w = humidity_ratio(dry_bulb_f, pressure_psia, wet_bulb_f);
    enthalpy_from_humidity_ratio(dry_bulb_f, w)
}

/// Returns moist-air enthalpy, Btu/lb dry air, from dry bulb and humidity ratio.
#[must_use]
pub fn enthalpy_from_humidity_ratio(dry_bulb_f: f64, humidity_ratio: f64) -> f64 {
    CP_DRY_AIR * dry_bulb_f + humidity_ratio * (HG_WATER_VAPOR + CP_WATER_VAPOR * dry_bulb_f)
}

/// Returns relative humidity as a fraction in `[0, 1]`.
///
/// Uses the plain psychrometer relation, without the wet-bulb correction
/// factor applied by [`vapor_pressure`].
///
/// Fallback: `0.0` when any input is not finite.
#[must_use]
pub fn humidity_fraction(dry_bulb_f: f64, pressure_psia: f64, wet_bulb_f: f64) -> f64 {
    if !all_finite(&[dry_bulb_f, pressure_psia, wet_bulb_f]) {
        return 0.0;
    }
    let pws = saturation_pressure(wet_bulb_f);
    let pv = pws - (pressure_psia - pws) * (dry_bulb_f - wet_bulb_f) * PSYCHROMETER_COEFFICIENT;
    let rh = pv / saturation_pressure(dry_bulb_f);
    if rh.is_finite() { rh.clamp(0.0, 1.0) } else { 0.0 }
}

/// Returns the dew point, °F, from dry bulb and relative humidity fraction
/// using the Magnus form.
///
/// Fallback: `dry_bulb_f − 10` when the humidity is not in `(0, 1]` or an
/// input is not finite.
#[must_use]
pub fn dewpoint(dry_bulb_f: f64, humidity_fraction: f64) -> f64 {
    if !(humidity_fraction > 0.0 && humidity_fraction <= 1.0) || !dry_bulb_f.is_finite() {
        return dry_bulb_f - 10.0;
    }
    let db_c = fahrenheit_to_celsius(dry_bulb_f);
    let alpha = humidity_fraction.ln() + (17.625 * db_c) / (243.04 + db_c);
    let dp_c = (243.04 * alpha) / (17.625 - alpha);
    dp_c * 9.0 / 5.0 + 32.0
}

/// Returns the specific volume, ft³/lb dry air.
///
/// Fallback: [`STANDARD_SPECIFIC_VOLUME`] when the pressure is not positive
/// or an input is not finite.
#[must_use]
pub fn specific_volume(dry_bulb_f: f64, pressure_psia: f64, humidity_ratio: f64) -> f64 {
    if !all_finite(&[dry_bulb_f, pressure_psia, humidity_ratio]) || pressure_psia <= 0.0 {
        return STANDARD_SPECIFIC_VOLUME;
    }
    let temp_r = dry_bulb_f + RANKINE_OFFSET;
    DRY_AIR_GAS_CONSTANT * temp_r * (1.0 + 1.608 * humidity_ratio) / (144.0 * pressure_psia)
}

/// Returns the density of air, lb/ft³, at an altitude and temperature.
///
/// Scales [`STANDARD_AIR_DENSITY`] by the barometric pressure ratio and the
/// absolute temperature ratio against 70 °F.
#[must_use]
pub fn air_density(altitude_ft: f64, temp_f: f64) -> f64 {
    let pressure_ratio = (1.0 - altitude_ft * ALTITUDE_LAPSE_RATE)
        .max(0.0)
        .powf(BAROMETRIC_EXPONENT);
    let temp_ratio = (temp_f + RANKINE_OFFSET) / (70.0 + RANKINE_OFFSET);
    STANDARD_AIR_DENSITY * pressure_ratio / temp_ratio
}

fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const P: f64 = 14.696;

    #[test]
    fn saturation_pressure_rises_with_temperature() {
        let cold = saturation_pressure(40.0);
        let warm = saturation_pressure(95.0);
        assert!(cold > 0.0);
        assert!(warm > cold);
    }

    #[test]
    fn summer_outdoor_air_grains() {
        assert_relative_eq!(grains(95.0, P, 78.0), 124.66, epsilon = 0.01);
    }

    #[test]
    fn saturated_grains_are_deterministic() {
        let first = grains(75.0, P, 75.0);
        let second = grains(75.0, P, 75.0);
        assert_eq!(first.to_bits(), second.to_bits());
        assert!(first > grains(75.0, P, 65.0));
    }

    #[test]
    fn grains_floor_at_zero() {
        assert_eq!(grains(100.0, P, 20.0), 0.0);
    }

    #[test]
    fn grains_fallback_when_vapor_exceeds_total_pressure() {
        assert_eq!(grains(150.0, 0.5, 150.0), 0.0);
    }

    #[test]
    fn enthalpy_of_dry_air_is_sensible_only() {
        assert_relative_eq!(enthalpy_from_humidity_ratio(70.0, 0.0), 16.8, epsilon = 1e-12);
        assert_eq!(enthalpy(f64::NAN, P, 60.0), 0.0);
    }

    #[test]
    fn humidity_fraction_is_one_when_saturated() {
        assert_relative_eq!(humidity_fraction(70.0, P, 70.0), 1.0, epsilon = 1e-12);
        let rh = humidity_fraction(75.0, P, 62.5);
        assert!(rh > 0.55 && rh < 0.65, "rh = {rh}");
    }

    #[test]
    fn humidity_fraction_omits_wet_bulb_correction() {
        assert_relative_eq!(
            humidity_fraction(95.0, P, 78.0),
            0.575_255_442_592_623_8,
            epsilon = 1e-9
        );

        let corrected = vapor_pressure(95.0, P, 78.0) / saturation_pressure(95.0);
        assert!(humidity_fraction(95.0, P, 78.0) > corrected);
    }

    #[test]
    fn dewpoint_at_saturation_equals_dry_bulb() {
        assert_relative_eq!(dewpoint(70.0, 1.0), 70.0, epsilon = 1e-9);
        assert!(dewpoint(70.0, 0.5) < 70.0);
    }

    #[test]
    fn dewpoint_fallback() {
        assert_eq!(dewpoint(70.0, 0.0), 60.0);
        assert_eq!(dewpoint(70.0, 1.5), 60.0);
    }

    #[test]
    fn specific_volume_of_standard_air() {
        assert_relative_eq!(specific_volume(70.0, P, 0.0), 13.353, epsilon = 1e-3);
        assert_eq!(specific_volume(70.0, 0.0, 0.0), STANDARD_SPECIFIC_VOLUME);
    }

    #[test]
    fn air_density_at_standard_conditions() {
        assert_relative_eq!(air_density(0.0, 70.0), STANDARD_AIR_DENSITY, epsilon = 1e-12);
        assert!(air_density(1000.0, 70.0) < STANDARD_AIR_DENSITY);
    }
}
