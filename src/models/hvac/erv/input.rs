use serde::{Deserialize, Serialize};

/// A dry-bulb/wet-bulb reading for one air stream, °F.
///
/// Either temperature may be absent. Dependent results are then reported
/// as unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirReading {
    pub dry_bulb_f: Option<f64>,
    pub wet_bulb_f: Option<f64>,
}

impl AirReading {
    /// Creates a reading with both temperatures present.
    #[must_use]
    pub fn new(dry_bulb_f: f64, wet_bulb_f: f64) -> Self {
        Self {
            dry_bulb_f: Some(dry_bulb_f),
            wet_bulb_f: Some(wet_bulb_f),
        }
    }

    /// Returns both temperatures when present.
    #[must_use]
    pub fn pair(&self) -> Option<(f64, f64)> {
        Some((self.dry_bulb_f?, self.wet_bulb_f?))
    }
}

/// Outdoor and return air design conditions for one season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConditions {
    pub outdoor: AirReading,
    pub return_air: AirReading,
}

impl SeasonConditions {
    /// Creates conditions from outdoor and return readings.
    #[must_use]
    pub fn new(outdoor: AirReading, return_air: AirReading) -> Self {
        Self {
            outdoor,
            return_air,
        }
    }
}

/// Everything a caller supplies for one calculation.
///
/// The record is plain data: it is validated by the calculator, never by
/// construction, so persisted or partially filled records can be passed as-is.
///
/// # Example
///
/// ```
/// use erv_models::models::hvac::erv::{AirReading, InputRecord, SeasonConditions};
///
/// let input = InputRecord {
///     cooling: SeasonConditions::new(AirReading::new(95.0, 78.0), AirReading::new(75.0, 62.5)),
///     supply_cfm: Some(5600.0),
///     outdoor_cfm: Some(1200.0),
///     erv_size: Some("ERC-4136".into()),
///     ..InputRecord::default()
/// };
///
/// assert_eq!(input.mixed_return_cfm(), Some(4400.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRecord {
    pub cooling: SeasonConditions,
    pub heating: SeasonConditions,

    pub supply_cfm: Option<f64>,
    pub outdoor_cfm: Option<f64>,
    pub exhaust_cfm: Option<f64>,

    pub wheel_type: Option<String>,
    pub unit_model: Option<String>,
    pub erv_size: Option<String>,
    pub filter_type: Option<String>,
    pub purge_angle_deg: Option<f64>,

    /// Nominal cooling capacity of the packaged unit, tons.
    pub unit_tons: Option<f64>,
    /// Rated EER of the packaged unit.
    pub unit_eer: Option<f64>,
    pub unit_voltage: Option<u32>,

    /// City name used for the altitude lookup.
    pub location: Option<String>,
    /// Manually entered altitude, ft. Takes precedence over `location`.
    pub altitude_ft: Option<f64>,

    /// Pre-heater size; any positive value enables pre-heat.
    pub pre_heater_size: Option<f64>,

    pub motor_grounding: bool,
    pub vav_vfd: bool,
}

impl InputRecord {
    /// Returns supply minus outdoor airflow, CFM.
    #[must_use]
    pub fn mixed_return_cfm(&self) -> Option<f64> {
        Some(self.supply_cfm? - self.outdoor_cfm?)
    }

    /// Returns true when a pre-heater is fitted.
    #[must_use]
    pub fn has_pre_heater(&self) -> bool {
        self.pre_heater_size.is_some_and(|size| size > 0.0)
    }
}

/// Returns the trimmed text, or `None` when it is blank.
pub(super) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
