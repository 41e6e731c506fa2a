use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single problem found while validating an [`InputRecord`].
///
/// [`InputRecord`]: super::InputRecord
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{stream} wet bulb ({wet_bulb_f} °F) exceeds dry bulb ({dry_bulb_f} °F)")]
    WetBulbExceedsDryBulb {
        stream: AirStream,
        dry_bulb_f: f64,
        wet_bulb_f: f64,
    },

    #[error("Outdoor Air CFM cannot exceed Supply Air CFM")]
    OutdoorExceedsSupply { outdoor_cfm: f64, supply_cfm: f64 },

    #[error("{field} ({value} CFM) must be between {min} and {max} CFM")]
    AirflowOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} ({value} °F) must be between {min} and {max} °F")]
    TemperatureOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("altitude_ft ({altitude_ft} ft) must be below {max_ft:.0} ft")]
    AltitudeOutOfRange { altitude_ft: f64, max_ft: f64 },
}

/// The full list of problems found in one input record.
///
/// Never empty when returned by the calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(super) fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any error satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&ValidationError) -> bool) -> bool {
        self.0.iter().any(pred)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A selection that is not in the reference tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownModelError {
    #[error("unknown ERV size `{0}`")]
    ErvSize(String),

    #[error("unknown unit model `{0}`")]
    UnitModel(String),
}

/// Errors that stop a calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    UnknownModel(#[from] UnknownModelError),

    #[error("location `{location}` is not in the city table")]
    UnresolvedLocation { location: String },

    #[error("location `{location}` altitude ({altitude_ft} ft) has no positive pressure")]
    AltitudeOutOfRange { location: String, altitude_ft: f64 },
}

/// One of the air streams the calculator reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirStream {
    OutdoorCooling,
    ReturnCooling,
    OutdoorHeating,
    ReturnHeating,
    MixedSupplyCooling,
    MixedSupplyHeating,
}

impl fmt::Display for AirStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutdoorCooling => "outdoor air (cooling)",
            Self::ReturnCooling => "return air (cooling)",
            Self::OutdoorHeating => "outdoor air (heating)",
            Self::ReturnHeating => "return air (heating)",
            Self::MixedSupplyCooling => "mixed supply air (cooling)",
            Self::MixedSupplyHeating => "mixed supply air (heating)",
        })
    }
}

/// A non-fatal condition attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The wet-bulb search stopped before meeting its tolerance.
    NonConvergence { stream: AirStream, iters: usize },

    /// Required brake horsepower exceeds the largest motor bracket.
    OversizedMotor { bhp: f64, selected_hp: f64 },

    /// The location was not found and sea level was assumed.
    UnresolvedLocation { location: String },

    /// The location's tabulated altitude has no positive pressure, so sea
    /// level was assumed.
    AltitudeOutOfRange { location: String, altitude_ft: f64 },

    /// The requested ERV size was replaced by the fallback model.
    DefaultErvModel { requested: String, fallback: String },

    /// The unit model is not in the catalog, so no fan was selected.
    UnresolvedUnitModel { unit_model: String },

    /// Outdoor airflow is outside the wheel's rated window.
    AirflowOutsideWheelLimits {
        outdoor_cfm: f64,
        min_cfm: f64,
        max_cfm: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConvergence { stream, iters } => {
                write!(f, "{stream} wet bulb did not converge after {iters} iterations")
            }
            Self::OversizedMotor { bhp, selected_hp } => {
                write!(f, "{bhp:.3} BHP exceeds the largest motor bracket ({selected_hp} HP)")
            }
            Self::UnresolvedLocation { location } => {
                write!(f, "location `{location}` not found, assuming sea level")
            }
            Self::AltitudeOutOfRange {
                location,
                altitude_ft,
            } => write!(
                f,
                "location `{location}` altitude {altitude_ft} ft is outside the pressure model, \
                 assuming sea level"
            ),
            Self::DefaultErvModel { requested, fallback } => {
                write!(f, "unknown ERV size `{requested}`, using {fallback}")
            }
            Self::UnresolvedUnitModel { unit_model } => {
                write!(f, "unknown unit model `{unit_model}`, fan not selected")
            }
            Self::AirflowOutsideWheelLimits {
                outdoor_cfm,
                min_cfm,
                max_cfm,
            } => write!(
                f,
                "outdoor airflow {outdoor_cfm} CFM is outside the wheel range \
                 {min_cfm}-{max_cfm} CFM"
            ),
        }
    }
}
