//! Supply fan selection.
//!
//! Each unit class offers two candidate fans. Brake horsepower is forecast
//! from two-point curve data at the design outdoor airflow, and the fan
//! needing less power wins.

mod drive;
mod motor;

use tracing::{debug, warn};

use crate::{
    models::hvac::erv::{Component, DriveSizing, FanSelection, Warning},
    support::forecast::forecast,
};

use super::catalog::UnitClass;
use motor::{MotorRating, motor_part, select_motor};

/// Rated-capacity margin applied to forecast brake horsepower.
pub(crate) const BHP_SAFETY_FACTOR: f64 = 1.15;

/// Fraction of motor horsepower above which a selection is flagged.
const NEAR_LIMIT_FRACTION: f64 = 0.8;

/// Two-point curve data for one fan.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FanCurve {
    pub name: &'static str,
    /// Name used when the 5 HP bracket is selected.
    pub heavy_duty_name: Option<&'static str>,
    pub rpm: f64,
    pub cfm_points: [f64; 2],
    pub bhp_points: [f64; 2],
    pub static_points: [f64; 2],
    pub ratings: &'static [MotorRating],
}

impl FanCurve {
    /// Forecast brake horsepower with the safety margin applied.
    fn bhp(&self, cfm: f64) -> Option<f64> {
        forecast(cfm, self.cfm_points, self.bhp_points)
            .ok()
            .map(|bhp| bhp * BHP_SAFETY_FACTOR)
    }

    fn static_pressure(&self, cfm: f64) -> Option<f64> {
        forecast(cfm, self.cfm_points, self.static_points).ok()
    }

    fn display_name(&self, motor_hp: f64) -> &'static str {
        match self.heavy_duty_name {
            Some(name) if motor_hp == 5.0 => name,
            _ => self.name,
        }
    }
}

const FAN_10_10B: FanCurve = FanCurve {
    name: "10-10B",
    heavy_duty_name: Some("10-10R"),
    rpm: 934.098_482_917_398_1,
    cfm_points: [2000.0, 3000.0],
    bhp_points: [0.312_991_296_717_218_9, 0.384_039_027_490_473_03],
    static_points: [0.969_185_138_475_610_8, 0.981_607_472_762_157_8],
    ratings: &motor::RATINGS_10_10B,
};

const FAN_W10_10BL: FanCurve = FanCurve {
    name: "W10-10BL",
    heavy_duty_name: Some("W10-10BP"),
    rpm: 967.100_954_326_422_1,
    cfm_points: [4000.0, 6000.0],
    bhp_points: [0.501_093_183_424_750_3, 0.529_391_083_402_822],
    static_points: [0.966_223_450_264_651_5, 0.975_056_288_687_103],
    ratings: &motor::RATINGS_W10_10BL,
};

const FAN_9_6B: FanCurve = FanCurve {
    name: "9-6B",
    heavy_duty_name: None,
    rpm: 1_121.905_755_030_246_8,
    cfm_points: [1500.0, 2500.0],
    bhp_points: [0.4, 0.5],
    static_points: [0.95, 0.97],
    ratings: &motor::RATINGS_9_6B,
};

const FAN_W9_6BL: FanCurve = FanCurve {
    name: "W9-6BL",
    heavy_duty_name: None,
    rpm: 1_009.114_815_890_570_1,
    cfm_points: [3000.0, 5000.0],
    bhp_points: [1.2, 1.5],
    static_points: [0.95, 0.98],
    ratings: &motor::RATINGS_W9_6BL,
};

fn near_motor_limit(bhp: f64, motor_hp: f64) -> bool {
    bhp > NEAR_LIMIT_FRACTION * motor_hp
}

/// Candidate fans for a unit class.
fn candidates(class: UnitClass) -> Option<[&'static FanCurve; 2]> {
    match class {
        UnitClass::Standard => Some([&FAN_10_10B, &FAN_W10_10BL]),
        UnitClass::Precedent => Some([&FAN_9_6B, &FAN_W9_6BL]),
        UnitClass::Blank | UnitClass::Unknown => None,
    }
}

/// Picks the lower-power candidate; ties go to the second.
fn choose(pair: [&'static FanCurve; 2], cfm: f64) -> Option<(&'static FanCurve, f64)> {
    let [first, second] = pair;
    match (first.bhp(cfm), second.bhp(cfm)) {
        (Some(a), Some(b)) if a < b => Some((first, a)),
        (_, Some(b)) => Some((second, b)),
        (Some(a), None) => Some((first, a)),
        (None, None) => None,
    }
}

/// Selects the fan, motor, and drive for a unit class at `outdoor_cfm`.
///
/// Blank and unknown classes yield an empty selection.
pub(crate) fn select_fan(
    class: UnitClass,
    outdoor_cfm: f64,
    drive_sizing: &DriveSizing,
    warnings: &mut Vec<Warning>,
) -> FanSelection {
    let Some((fan, bhp)) = candidates(class).and_then(|pair| choose(pair, outdoor_cfm)) else {
        return FanSelection::default();
    };

    let Some(choice) = select_motor(fan.ratings, bhp) else {
        return FanSelection::default();
    };
    if choice.oversized {
        warn!(fan = fan.name, bhp, selected_hp = choice.hp, "motor oversized");
        warnings.push(Warning::OversizedMotor {
            bhp,
            selected_hp: choice.hp,
        });
    }

    let part = motor_part(choice.hp);
    let selection = FanSelection {
        fan_type: Some(fan.display_name(choice.hp).to_owned()),
        motor_hp: Some(choice.hp),
        fan_rpm: Some(fan.rpm),
        bhp: Some(bhp),
        static_pressure_in_wc: fan.static_pressure(outdoor_cfm),
        motor: part.map(|p| Component::new(p.model, p.part_number)),
        drive: part.and_then(|p| drive::drive_kit(p, fan.rpm, drive_sizing)),
        near_motor_limit: near_motor_limit(bhp, choice.hp),
    };

    debug!(
        fan = fan.name,
        motor_hp = choice.hp,
        bhp,
        outdoor_cfm,
        "selected fan"
    );
    selection
}
