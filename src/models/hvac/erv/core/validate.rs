//! Presence and sanity checks run before any computation.

use crate::{
    models::hvac::erv::{
        AirReading, AirStream, EngineConfig, InputRecord, ValidationError, ValidationErrors,
        input::non_blank,
    },
    support::atmosphere::{MAX_MODELED_ALTITUDE_FT, is_modeled_altitude},
};

/// Accepted design temperature range, °F.
const TEMPERATURE_RANGE_F: [f64; 2] = [-50.0, 150.0];

/// Collects every problem in `input`.
///
/// # Errors
///
/// Returns all problems found, in field order, if there are any.
pub(crate) fn validate(input: &InputRecord, config: &EngineConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    if input.cooling.outdoor.dry_bulb_f.is_none() {
        errors.push(ValidationError::MissingField {
            field: "cooling.outdoor.dry_bulb_f",
        });
    }
    if non_blank(input.erv_size.as_deref()).is_none() {
        errors.push(ValidationError::MissingField { field: "erv_size" });
    }

    let readings = [
        (
            &input.cooling.outdoor,
            AirStream::OutdoorCooling,
            ["cooling.outdoor.dry_bulb_f", "cooling.outdoor.wet_bulb_f"],
        ),
        (
            &input.cooling.return_air,
            AirStream::ReturnCooling,
            ["cooling.return_air.dry_bulb_f", "cooling.return_air.wet_bulb_f"],
        ),
        (
            &input.heating.outdoor,
            AirStream::OutdoorHeating,
            ["heating.outdoor.dry_bulb_f", "heating.outdoor.wet_bulb_f"],
        ),
        (
            &input.heating.return_air,
            AirStream::ReturnHeating,
            ["heating.return_air.dry_bulb_f", "heating.return_air.wet_bulb_f"],
        ),
    ];
    for (reading, stream, fields) in readings {
        check_reading(&mut errors, reading, stream, fields);
    }

    let supply = check_airflow(&mut errors, input.supply_cfm, "supply_cfm", true, config);
    let outdoor = check_airflow(&mut errors, input.outdoor_cfm, "outdoor_cfm", true, config);
    check_airflow(&mut errors, input.exhaust_cfm, "exhaust_cfm", false, config);

    if let (Some(outdoor_cfm), Some(supply_cfm)) = (outdoor, supply)
        && outdoor_cfm > supply_cfm
    {
        errors.push(ValidationError::OutdoorExceedsSupply {
            outdoor_cfm,
            supply_cfm,
        });
    }

    check_non_negative(&mut errors, input.unit_tons, "unit_tons");
    check_non_negative(&mut errors, input.unit_eer, "unit_eer");
    check_non_negative(&mut errors, input.pre_heater_size, "pre_heater_size");

    if let Some(altitude_ft) = input.altitude_ft {
        check_altitude(&mut errors, altitude_ft);
    }

    ValidationErrors::from_vec(errors).map_or(Ok(()), Err)
}

fn check_reading(
    errors: &mut Vec<ValidationError>,
    reading: &AirReading,
    stream: AirStream,
    [dry_bulb_field, wet_bulb_field]: [&'static str; 2],
) {
    let [min, max] = TEMPERATURE_RANGE_F;
    let fields = [
        (reading.dry_bulb_f, dry_bulb_field),
        (reading.wet_bulb_f, wet_bulb_field),
    ];

    let mut in_range = true;
    for (value, field) in fields {
        if let Some(value) = value
            && !(min..=max).contains(&value)
        {
            in_range = false;
            errors.push(ValidationError::TemperatureOutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    if in_range
        && let Some((dry_bulb_f, wet_bulb_f)) = reading.pair()
        && wet_bulb_f > dry_bulb_f
    {
        errors.push(ValidationError::WetBulbExceedsDryBulb {
            stream,
            dry_bulb_f,
            wet_bulb_f,
        });
    }
}

/// Returns the airflow when it is present and usable as a divisor.
fn check_airflow(
    errors: &mut Vec<ValidationError>,
    value: Option<f64>,
    field: &'static str,
    required: bool,
    config: &EngineConfig,
) -> Option<f64> {
    let Some(value) = value else {
        if required {
            errors.push(ValidationError::MissingField { field });
        }
        return None;
    };

    if !(value.is_finite() && value > 0.0) {
        errors.push(ValidationError::NotPositive { field, value });
        return None;
    }

    let [min, max] = config.airflow_range_cfm;
    if config.enforce_airflow_range && !(min..=max).contains(&value) {
        errors.push(ValidationError::AirflowOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Some(value)
}

fn check_altitude(errors: &mut Vec<ValidationError>, altitude_ft: f64) {
    if !altitude_ft.is_finite() {
        errors.push(ValidationError::NotFinite {
            field: "altitude_ft",
        });
    } else if !is_modeled_altitude(altitude_ft) {
        errors.push(ValidationError::AltitudeOutOfRange {
            altitude_ft,
            max_ft: MAX_MODELED_ALTITUDE_FT,
        });
    }
}

fn check_non_negative(errors: &mut Vec<ValidationError>, value: Option<f64>, field: &'static str) {
    match value {
        Some(v) if !v.is_finite() => errors.push(ValidationError::NotFinite { field }),
        Some(v) if v < 0.0 => errors.push(ValidationError::Negative { field, value: v }),
        _ => {}
    }
}
