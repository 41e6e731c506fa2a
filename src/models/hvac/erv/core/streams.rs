//! Psychrometric state of each design air stream.

use crate::{
    models::hvac::erv::{AirReading, Conditions, InputRecord, PsychrometricState, StreamStates},
    support::psychrometrics::{
        GRAINS_PER_POUND, dewpoint, enthalpy, humidity_fraction, humidity_ratio, specific_volume,
    },
};

use super::{finite, round_tenth};

/// Temperature rise across the pre-heater, °F.
pub(crate) const PRE_HEAT_RISE_F: f64 = 26.3;

/// Evaluates one stream at the given pressure.
///
/// Moisture properties need both temperatures; specific volume and dew
/// point additionally need the dry bulb.
pub(crate) fn stream_state(reading: AirReading, pressure_psia: f64) -> PsychrometricState {
    let mut state = PsychrometricState {
        dry_bulb_f: reading.dry_bulb_f.and_then(finite),
        wet_bulb_f: reading.wet_bulb_f.and_then(finite),
        ..PsychrometricState::default()
    };

    let Some((db, wb)) = reading.pair() else {
        return state;
    };

    let w = humidity_ratio(db, pressure_psia, wb);
    let rh = humidity_fraction(db, pressure_psia, wb);

    state.grains = finite(w * GRAINS_PER_POUND);
    state.enthalpy = finite(enthalpy(db, pressure_psia, wb));
    state.relative_humidity = finite(rh);
    state.dew_point_f = if rh > 0.0 { finite(dewpoint(db, rh)) } else { None };
    state.specific_volume = finite(specific_volume(db, pressure_psia, w));
    state
}

/// Outdoor heating air as it reaches the wheel.
///
/// With a pre-heater both temperatures rise by [`PRE_HEAT_RISE_F`].
pub(crate) fn heating_intake(input: &InputRecord) -> AirReading {
    let outdoor = input.heating.outdoor;
    if !input.has_pre_heater() {
        return outdoor;
    }
    AirReading {
        dry_bulb_f: outdoor.dry_bulb_f.map(|t| t + PRE_HEAT_RISE_F),
        wet_bulb_f: outdoor.wet_bulb_f.map(|t| t + PRE_HEAT_RISE_F),
    }
}

/// Reported post-pre-heat conditions, rounded to 0.1 °F.
pub(crate) fn pre_heat_conditions(input: &InputRecord) -> Conditions {
    if !input.has_pre_heater() {
        return Conditions::default();
    }
    let intake = heating_intake(input);
    Conditions {
        dry_bulb_f: intake.dry_bulb_f.map(round_tenth),
        wet_bulb_f: intake.wet_bulb_f.map(round_tenth),
    }
}

/// Evaluates all four design streams.
pub(crate) fn stream_states(input: &InputRecord, pressure_psia: f64) -> StreamStates {
    StreamStates {
        outdoor_cooling: stream_state(input.cooling.outdoor, pressure_psia),
        return_cooling: stream_state(input.cooling.return_air, pressure_psia),
        outdoor_heating: stream_state(heating_intake(input), pressure_psia),
        return_heating: stream_state(input.heating.return_air, pressure_psia),
    }
}
