//! ERV selection calculation.
//!
//! A calculation runs in dependency order: validation, model lookup, site
//! resolution, stream psychrometrics, wheel performance, fan selection,
//! and finally the packaged-unit adjustment. Each stage reads only what the
//! earlier stages produced, and anything a stage cannot compute is left
//! unavailable instead of failing the whole record.

mod catalog;
mod fan;
mod performance;
mod site;
mod streams;
mod unit_performance;
mod validate;

use tracing::{debug, warn};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    psychrometrics::air_density,
};

use super::{
    CalculationError, CityTable, EngineConfig, InputRecord, ResultRecord, UnknownModelError,
    ValidationError, ValidationErrors, Warning, input::non_blank,
};

use catalog::{ErvSize, UnitClass, classify_unit_model, erv_size, filter_multiplier};
use fan::select_fan;
use performance::{Airflows, PerformanceInputs, erv_performance};
use site::resolve_site;
use streams::{pre_heat_conditions, stream_states};
use unit_performance::unit_performance;
use validate::validate;

/// Returns `value` when it is finite.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Rounds to one decimal place, half away from zero.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Runs one full calculation.
///
/// # Errors
///
/// Returns a [`CalculationError`] when validation fails, or in strict mode
/// when the ERV size, unit model, or location cannot be resolved.
pub(crate) fn calculate(
    input: &InputRecord,
    config: &EngineConfig,
    cities: &CityTable,
) -> Result<ResultRecord, CalculationError> {
    validate(input, config)?;
    let airflows = airflows(input)?;

    let mut warnings = Vec::new();

    let size = resolve_erv_size(input, config, &mut warnings)?;
    let class = resolve_unit_class(input, config, &mut warnings)?;
    let site = resolve_site(input, cities, config, &mut warnings)?;
    let pressure_psia = site.atmosphere.pressure_psia;

    let streams = stream_states(input, pressure_psia);
    let density = streams
        .outdoor_cooling
        .dry_bulb_f
        .and_then(|db| finite(air_density(site.atmosphere.altitude_ft, db)));

    let (erv, capacity) = erv_performance(
        &PerformanceInputs {
            size,
            airflows,
            streams: &streams,
            outdoor_heating_db_f: input.heating.outdoor.dry_bulb_f,
            filter_multiplier: filter_multiplier(input.filter_type.as_deref()),
            pressure_psia,
        },
        config,
        &mut warnings,
    );

    let outdoor_cfm = airflows.outdoor.into_inner();
    let fan = select_fan(class, outdoor_cfm, &config.drive_sizing, &mut warnings);
    let unit = unit_performance(input.unit_tons, input.unit_eer, capacity.cooling_tons);

    debug!(
        erv = size.name,
        fan = fan.fan_type.as_deref(),
        warnings = warnings.len(),
        "calculation complete"
    );

    Ok(ResultRecord {
        location: site.location,
        atmosphere: Some(site.atmosphere),
        air_density: density,
        mixed_return_cfm: input.mixed_return_cfm(),
        streams,
        pre_heat: pre_heat_conditions(input),
        erv,
        capacity,
        fan,
        unit,
        warnings,
    })
}

fn airflows(input: &InputRecord) -> Result<Airflows, ValidationErrors> {
    Ok(Airflows {
        supply: positive(input.supply_cfm, "supply_cfm")?,
        outdoor: positive(input.outdoor_cfm, "outdoor_cfm")?,
    })
}

fn positive(
    value: Option<f64>,
    field: &'static str,
) -> Result<Constrained<f64, StrictlyPositive>, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field })?;
    StrictlyPositive::new(value).map_err(|_| ValidationError::NotPositive { field, value })
}

/// Looks up the ERV size, substituting the configured fallback in
/// compatibility mode.
fn resolve_erv_size(
    input: &InputRecord,
    config: &EngineConfig,
    warnings: &mut Vec<Warning>,
) -> Result<&'static ErvSize, CalculationError> {
    let requested = non_blank(input.erv_size.as_deref()).unwrap_or_default();
    if let Some(size) = erv_size(requested) {
        return Ok(size);
    }
    if config.is_strict() {
        return Err(UnknownModelError::ErvSize(requested.to_owned()).into());
    }

    let fallback = config.fallback_erv_model.as_str();
    let size = erv_size(fallback)
        .ok_or_else(|| UnknownModelError::ErvSize(fallback.to_owned()))?;
    warn!(requested, fallback, "unknown ERV size, using fallback");
    warnings.push(Warning::DefaultErvModel {
        requested: requested.to_owned(),
        fallback: fallback.to_owned(),
    });
    Ok(size)
}

/// Classifies the unit model, rejecting unknown models in strict mode.
fn resolve_unit_class(
    input: &InputRecord,
    config: &EngineConfig,
    warnings: &mut Vec<Warning>,
) -> Result<UnitClass, CalculationError> {
    let class = classify_unit_model(input.unit_model.as_deref());
    if class != UnitClass::Unknown {
        return Ok(class);
    }

    let unit_model = non_blank(input.unit_model.as_deref())
        .unwrap_or_default()
        .to_owned();
    if config.is_strict() {
        return Err(UnknownModelError::UnitModel(unit_model).into());
    }
    warn!(%unit_model, "unknown unit model, fan not selected");
    warnings.push(Warning::UnresolvedUnitModel { unit_model });
    Ok(class)
}
