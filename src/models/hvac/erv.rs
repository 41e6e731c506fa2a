//! Energy recovery ventilator selection.
//!
//! [`ErvCalculator`] takes one [`InputRecord`] describing the design
//! conditions, airflows, and equipment choices, and produces a
//! [`ResultRecord`] with stream psychrometrics, wheel performance, recovered
//! capacity, the supply fan and motor selection, and the packaged unit's
//! adjusted rating.
//!
//! # Example
//!
//! ```
//! use erv_models::models::hvac::erv::{
//!     AirReading, ErvCalculator, InputRecord, SeasonConditions,
//! };
//!
//! let input = InputRecord {
//!     cooling: SeasonConditions::new(AirReading::new(95.0, 78.0), AirReading::new(75.0, 62.5)),
//!     supply_cfm: Some(5600.0),
//!     outdoor_cfm: Some(1200.0),
//!     erv_size: Some("ERC-4136".into()),
//!     unit_model: Some("Trane - Voyager C".into()),
//!     ..InputRecord::default()
//! };
//!
//! let result = ErvCalculator::default().calculate(&input).unwrap();
//! assert_eq!(result.mixed_return_cfm, Some(4400.0));
//! assert_eq!(result.fan.fan_type.as_deref(), Some("10-10B"));
//! ```

mod config;
mod core;
mod error;
mod input;
mod location;
mod results;

pub use config::{ConfigError, DriveSizing, EngineConfig, Mode};
pub use error::{
    AirStream, CalculationError, UnknownModelError, ValidationError, ValidationErrors, Warning,
};
pub use input::{AirReading, InputRecord, SeasonConditions};
pub use location::CityTable;
pub use results::{
    Capacities, Component, Conditions, DriveKit, ErvPerformance, FanSelection, PsychrometricState,
    ResultRecord, StreamStates, UNAVAILABLE, UnitPerformance,
};

use twine_core::Model;

/// ERV performance and fan selection calculator.
///
/// Holds the engine settings and the city altitude table. Each call to
/// [`ErvCalculator::calculate`] is independent.
#[derive(Debug, Clone)]
pub struct ErvCalculator {
    config: EngineConfig,
    cities: CityTable,
}

impl ErvCalculator {
    /// Creates a calculator using the built-in sample city table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`EngineConfig::check`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.check()?;
        Ok(Self {
            config,
            cities: CityTable::sample(),
        })
    }

    /// Replaces the city altitude table.
    #[must_use]
    pub fn with_cities(self, cities: CityTable) -> Self {
        Self { cities, ..self }
    }

    /// Returns the engine settings in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculates ERV performance and equipment selection for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Validation`] listing every input problem.
    /// In [`Mode::Strict`], unknown ERV sizes, unit models, and locations are
    /// errors too; in [`Mode::Compatibility`] they become [`Warning`]s on
    /// the result.
    pub fn calculate(&self, input: &InputRecord) -> Result<ResultRecord, CalculationError> {
        self::core::calculate(input, &self.config, &self.cities)
    }
}

impl Default for ErvCalculator {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            cities: CityTable::sample(),
        }
    }
}

impl Model for ErvCalculator {
    type Input = InputRecord;
    type Output = ResultRecord;
    type Error = CalculationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calculate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::atmosphere::AtmosphericContext;

    fn design_input() -> InputRecord {
        InputRecord {
            cooling: SeasonConditions::new(
                AirReading::new(95.0, 78.0),
                AirReading::new(75.0, 62.5),
            ),
            heating: SeasonConditions::new(AirReading::new(10.0, 8.0), AirReading::new(70.0, 55.0)),
            supply_cfm: Some(5600.0),
            outdoor_cfm: Some(1200.0),
            erv_size: Some("ERC-4136".into()),
            unit_model: Some("Trane - Voyager C".into()),
            filter_type: Some("MERV 8".into()),
            unit_tons: Some(10.0),
            unit_eer: Some(11.0),
            ..InputRecord::default()
        }
    }

    fn strict() -> ErvCalculator {
        ErvCalculator::new(EngineConfig {
            mode: Mode::Strict,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn design_scenario() {
        let result = ErvCalculator::default().calculate(&design_input()).unwrap();

        assert_eq!(result.mixed_return_cfm, Some(4400.0));
        assert_eq!(result.erv.model.as_deref(), Some("ERC-4136"));
        assert_relative_eq!(result.erv.outlet_cooling.dry_bulb_f.unwrap(), 77.4, epsilon = 1e-9);
        assert_relative_eq!(result.capacity.cooling_tons.unwrap(), 1.9008, epsilon = 1e-9);
        assert_relative_eq!(
            result.erv.mixed_supply_cooling.dry_bulb_f.unwrap(),
            75.514,
            epsilon = 1e-3
        );

        assert_eq!(result.fan.fan_type.as_deref(), Some("10-10B"));
        assert_eq!(result.fan.motor_hp, Some(1.0));

        assert_eq!(result.unit.tonnage_with_erv, Some(8.1));
        assert_eq!(result.unit.eer_with_erv, Some(13.6));

        assert_eq!(result.erv.face_velocity_fpm, Some(1200.0 / 4.1));
        assert_eq!(result.atmosphere, Some(AtmosphericContext::sea_level()));
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn outdoor_exceeding_supply_is_rejected() {
        let input = InputRecord {
            supply_cfm: Some(1000.0),
            outdoor_cfm: Some(1500.0),
            ..design_input()
        };
        let error = ErvCalculator::default().calculate(&input).unwrap_err();

        let CalculationError::Validation(errors) = &error else {
            panic!("expected a validation error, got {error:?}");
        };
        assert!(errors.any(|e| matches!(e, ValidationError::OutdoorExceedsSupply { .. })));
        assert!(error.to_string().contains("Outdoor Air CFM cannot exceed Supply Air CFM"));
    }

    #[test]
    fn fan_selection_is_deterministic() {
        let input = InputRecord {
            outdoor_cfm: Some(3000.0),
            ..design_input()
        };
        let calculator = ErvCalculator::default();
        let first = calculator.calculate(&input).unwrap();

        assert_eq!(first.fan.fan_type.as_deref(), Some("10-10B"));
        assert_eq!(first.fan.motor_hp, Some(1.0));
        for _ in 0..5 {
            assert_eq!(calculator.calculate(&input).unwrap(), first);
        }
    }

    #[test]
    fn unknown_erv_size_by_mode() {
        let input = InputRecord {
            erv_size: Some("UNKNOWN-999".into()),
            ..design_input()
        };

        assert_eq!(
            strict().calculate(&input),
            Err(CalculationError::UnknownModel(UnknownModelError::ErvSize(
                "UNKNOWN-999".into()
            )))
        );

        let result = ErvCalculator::default().calculate(&input).unwrap();
        assert_eq!(result.erv.model.as_deref(), Some("ERC-4132C-4M"));
        assert!(result.capacity.cooling_tons.is_some());
        assert!(result.fan.fan_type.is_some());
        assert_eq!(
            result.warnings,
            vec![Warning::DefaultErvModel {
                requested: "UNKNOWN-999".into(),
                fallback: "ERC-4132C-4M".into()
            }]
        );
    }

    #[test]
    fn unknown_unit_model_by_mode() {
        let input = InputRecord {
            unit_model: Some("Acme 3000".into()),
            ..design_input()
        };

        assert_eq!(
            strict().calculate(&input),
            Err(CalculationError::UnknownModel(UnknownModelError::UnitModel(
                "Acme 3000".into()
            )))
        );

        let result = ErvCalculator::default().calculate(&input).unwrap();
        assert_eq!(result.fan, FanSelection::default());
        assert_eq!(result.unit.tonnage_with_erv, Some(8.1));
        assert_eq!(
            result.warnings,
            vec![Warning::UnresolvedUnitModel {
                unit_model: "Acme 3000".into()
            }]
        );
    }

    #[test]
    fn blank_unit_model_leaves_fan_unresolved() {
        let input = InputRecord {
            unit_model: None,
            ..design_input()
        };
        let result = strict().calculate(&input).unwrap();
        assert_eq!(result.fan, FanSelection::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn missing_optional_temperatures_are_unavailable() {
        let input = InputRecord {
            heating: SeasonConditions::default(),
            unit_tons: None,
            ..design_input()
        };
        let result = ErvCalculator::default().calculate(&input).unwrap();

        assert_eq!(result.streams.outdoor_heating, PsychrometricState::default());
        assert_eq!(result.erv.outlet_heating, Conditions::default());
        assert_eq!(result.erv.mixed_supply_heating, Conditions::default());
        assert_eq!(result.capacity.heating_mbh, None);
        assert_eq!(result.unit, UnitPerformance::default());
        assert!(result.capacity.cooling_tons.is_some());

        let table = result.to_table();
        assert!(table.contains(UNAVAILABLE));
        assert!(!table.contains("NaN"));
    }

    #[test]
    fn altitude_lowers_pressure_and_density() {
        let input = InputRecord {
            location: Some("Denver, CO".into()),
            ..design_input()
        };
        let calculator = ErvCalculator::default();
        let sea_level = calculator.calculate(&design_input()).unwrap();
        let denver = calculator.calculate(&input).unwrap();

        let pressure = |r: &ResultRecord| r.atmosphere.map(|a| a.pressure_psia).unwrap();
        assert!(pressure(&denver) < pressure(&sea_level));
        assert!(denver.air_density.unwrap() < sea_level.air_density.unwrap());
        assert_eq!(denver.location.as_deref(), Some("Denver, CO"));
    }

    #[test]
    fn custom_city_table() {
        let input = InputRecord {
            location: Some("Leadville, CO".into()),
            ..design_input()
        };
        let calculator =
            strict().with_cities(CityTable::from_entries([("Leadville, CO", 10_152.0)]));
        let result = calculator.calculate(&input).unwrap();
        assert_eq!(result.atmosphere.map(|a| a.altitude_ft), Some(10_152.0));

        assert_eq!(
            strict().calculate(&input),
            Err(CalculationError::UnresolvedLocation {
                location: "Leadville, CO".into()
            })
        );
    }

    #[test]
    fn unreachable_altitude_is_rejected() {
        let input = InputRecord {
            altitude_ft: Some(40_000.0),
            ..design_input()
        };
        let error = ErvCalculator::default().calculate(&input).unwrap_err();

        let CalculationError::Validation(errors) = &error else {
            panic!("expected a validation error, got {error:?}");
        };
        assert!(errors.any(|e| matches!(e, ValidationError::AltitudeOutOfRange { .. })));
    }

    #[test]
    fn wet_bulb_non_convergence_is_reported() {
        let mut config = EngineConfig::default();
        config.wet_bulb.max_iters = 2;
        let calculator = ErvCalculator::new(config).unwrap();
        let result = calculator.calculate(&design_input()).unwrap();

        let unconverged = |stream: AirStream| {
            result
                .warnings
                .iter()
                .any(|w| matches!(w, Warning::NonConvergence { stream: s, .. } if *s == stream))
        };
        assert!(unconverged(AirStream::MixedSupplyCooling));
        assert!(unconverged(AirStream::MixedSupplyHeating));

        assert!(result.erv.mixed_supply_cooling.wet_bulb_f.is_some());
        assert!(result.erv.mixed_supply_heating.wet_bulb_f.is_some());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            airflow_range_cfm: [10_000.0, 500.0],
            ..EngineConfig::default()
        };
        assert!(matches!(ErvCalculator::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn model_adapter_matches_calculate() {
        let calculator = ErvCalculator::default();
        let input = design_input();
        assert_eq!(calculator.call(&input), calculator.calculate(&input));
    }

    #[test]
    fn history_records_keep_their_shape() {
        let input = InputRecord {
            heating: SeasonConditions::default(),
            ..design_input()
        };
        let result = ErvCalculator::default().calculate(&input).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["erv"]["outlet_heating"]["dry_bulb_f"].is_null());
        assert!(json["erv"]["outlet_heating"].get("dry_bulb_f").is_some());
        assert_eq!(json["fan"]["fan_type"], "10-10B");

        let restored: ResultRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored.erv.model, result.erv.model);
        assert_eq!(restored.erv.outlet_heating, Conditions::default());
        assert_eq!(restored.warnings, result.warnings);

        let input_json = serde_json::to_string(&input).unwrap();
        let input_back: InputRecord = serde_json::from_str(&input_json).unwrap();
        assert_eq!(input_back, input);
    }
}
