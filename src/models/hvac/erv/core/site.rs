//! Altitude and pressure resolution.

use tracing::{debug, warn};

use crate::{
    models::hvac::erv::{
        CalculationError, CityTable, EngineConfig, InputRecord, Warning, input::non_blank,
    },
    support::atmosphere::{AtmosphericContext, is_modeled_altitude},
};

/// Where the calculation takes place.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Site {
    pub location: Option<String>,
    pub atmosphere: AtmosphericContext,
}

/// Resolves the site altitude.
///
/// A manual altitude wins over the city lookup. A blank location means sea
/// level. A named location missing from `cities`, or tabulated at an altitude
/// with no positive pressure, is an error in strict mode and sea level plus a
/// warning otherwise.
///
/// # Errors
///
/// Returns [`CalculationError::UnresolvedLocation`] or
/// [`CalculationError::AltitudeOutOfRange`] in strict mode when no manual
/// altitude was given and the city lookup fails.
pub(crate) fn resolve_site(
    input: &InputRecord,
    cities: &CityTable,
    config: &EngineConfig,
    warnings: &mut Vec<Warning>,
) -> Result<Site, CalculationError> {
    let location = non_blank(input.location.as_deref()).map(str::to_owned);

    let altitude_ft = match (input.altitude_ft, location.as_deref()) {
        (Some(altitude_ft), _) => altitude_ft,
        (None, None) => 0.0,
        (None, Some(city)) => match cities.altitude_ft(city) {
            Some(altitude_ft) if is_modeled_altitude(altitude_ft) => altitude_ft,
            Some(altitude_ft) if config.is_strict() => {
                return Err(CalculationError::AltitudeOutOfRange {
                    location: city.to_owned(),
                    altitude_ft,
                });
            }
            Some(altitude_ft) => {
                warn!(
                    location = city,
                    altitude_ft,
                    "city altitude outside pressure model, assuming sea level"
                );
                warnings.push(Warning::AltitudeOutOfRange {
                    location: city.to_owned(),
                    altitude_ft,
                });
                0.0
            }
            None if config.is_strict() => {
                return Err(CalculationError::UnresolvedLocation {
                    location: city.to_owned(),
                });
            }
            None => {
                warn!(location = city, "location not in city table, assuming sea level");
                warnings.push(Warning::UnresolvedLocation {
                    location: city.to_owned(),
                });
                0.0
            }
        },
    };

    let atmosphere = AtmosphericContext::from_altitude_ft(altitude_ft);
    debug!(
        altitude_ft,
        pressure_psia = atmosphere.pressure_psia,
        "resolved site"
    );

    Ok(Site {
        location,
        atmosphere,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::hvac::erv::Mode;

    fn resolve(input: &InputRecord, mode: Mode) -> (Result<Site, CalculationError>, Vec<Warning>) {
        let config = EngineConfig {
            mode,
            ..EngineConfig::default()
        };
        let mut warnings = Vec::new();
        let site = resolve_site(input, &CityTable::sample(), &config, &mut warnings);
        (site, warnings)
    }

    #[test]
    fn known_city() {
        let input = InputRecord {
            location: Some("Denver, CO".into()),
            ..InputRecord::default()
        };
        let (site, warnings) = resolve(&input, Mode::Strict);
        let site = site.unwrap();
        assert_eq!(site.atmosphere.altitude_ft, 5280.0);
        assert_relative_eq!(site.atmosphere.pressure_psia, 4.7211, epsilon = 1e-3);
        assert!(warnings.is_empty());
    }

    #[test]
    fn manual_altitude_overrides_city() {
        let input = InputRecord {
            location: Some("Denver, CO".into()),
            altitude_ft: Some(1000.0),
            ..InputRecord::default()
        };
        let (site, _) = resolve(&input, Mode::Compatibility);
        assert_eq!(site.unwrap().atmosphere.altitude_ft, 1000.0);
    }

    #[test]
    fn blank_location_is_sea_level() {
        let input = InputRecord {
            location: Some(String::new()),
            ..InputRecord::default()
        };
        let (site, warnings) = resolve(&input, Mode::Strict);
        let site = site.unwrap();
        assert_eq!(site.atmosphere, AtmosphericContext::sea_level());
        assert_eq!(site.location, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_city_depends_on_mode() {
        let input = InputRecord {
            location: Some("Atlantis".into()),
            ..InputRecord::default()
        };

        let (site, _) = resolve(&input, Mode::Strict);
        assert_eq!(
            site,
            Err(CalculationError::UnresolvedLocation {
                location: "Atlantis".into()
            })
        );

        let (site, warnings) = resolve(&input, Mode::Compatibility);
        assert_eq!(site.unwrap().atmosphere.altitude_ft, 0.0);
        assert_eq!(
            warnings,
            vec![Warning::UnresolvedLocation {
                location: "Atlantis".into()
            }]
        );
    }

    #[test]
    fn city_altitude_without_pressure() {
        let cities = CityTable::from_entries([("Summit", 30_000.0)]);
        let input = InputRecord {
            location: Some("Summit".into()),
            ..InputRecord::default()
        };

        let strict = EngineConfig {
            mode: Mode::Strict,
            ..EngineConfig::default()
        };
        let mut warnings = Vec::new();
        assert_eq!(
            resolve_site(&input, &cities, &strict, &mut warnings),
            Err(CalculationError::AltitudeOutOfRange {
                location: "Summit".into(),
                altitude_ft: 30_000.0
            })
        );

        let site = resolve_site(&input, &cities, &EngineConfig::default(), &mut warnings).unwrap();
        assert_eq!(site.atmosphere, AtmosphericContext::sea_level());
        assert_eq!(
            warnings,
            vec![Warning::AltitudeOutOfRange {
                location: "Summit".into(),
                altitude_ft: 30_000.0
            }]
        );
    }
}
