//! Wheel effectiveness, outlet conditions, and recovered capacity.

use tracing::{debug, warn};

use crate::{
    models::hvac::erv::{
        AirStream, Capacities, Conditions, EngineConfig, ErvPerformance, StreamStates, Warning,
    },
    support::{
        constraint::{Constrained, StrictlyPositive, UnitInterval},
        psychrometrics::{GRAINS_PER_POUND, WetBulbTarget, wet_bulb},
    },
};

use super::{
    catalog::{BASE_PRESSURE_DROP_IN_WC, ErvSize},
    finite,
};

/// Highest effectiveness ever reported.
pub(crate) const MAX_EFFECTIVENESS: f64 = 0.99;

/// Sensible heat factor for standard air, Btu/(h·CFM·°F).
const SENSIBLE_HEAT_FACTOR: f64 = 1.08;

const BTU_PER_HOUR_PER_TON: f64 = 12_000.0;
const BTU_PER_HOUR_PER_MBH: f64 = 1_000.0;

/// ERV outlet wet bulb is taken this far below the outlet dry bulb, °F.
const OUTLET_WET_BULB_DEPRESSION_F: f64 = 5.0;

/// Validated airflows for one calculation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Airflows {
    pub supply: Constrained<f64, StrictlyPositive>,
    pub outdoor: Constrained<f64, StrictlyPositive>,
}

impl Airflows {
    fn supply_cfm(&self) -> f64 {
        *self.supply.as_ref()
    }

    fn outdoor_cfm(&self) -> f64 {
        *self.outdoor.as_ref()
    }

    fn return_cfm(&self) -> f64 {
        self.supply_cfm() - self.outdoor_cfm()
    }
}

/// Everything the performance stage reads.
pub(crate) struct PerformanceInputs<'a> {
    pub size: &'static ErvSize,
    pub airflows: Airflows,
    pub streams: &'a StreamStates,
    /// Outdoor heating dry bulb before any pre-heater, °F.
    pub outdoor_heating_db_f: Option<f64>,
    pub filter_multiplier: f64,
    pub pressure_psia: f64,
}

/// Clamps a rated effectiveness into `[0, 0.99]`.
pub(crate) fn effectiveness(rated: f64) -> Option<Constrained<f64, UnitInterval>> {
    if rated.is_nan() {
        return None;
    }
    UnitInterval::new(rated.clamp(0.0, MAX_EFFECTIVENESS)).ok()
}

/// Computes wheel performance and recovered capacity.
pub(crate) fn erv_performance(
    inputs: &PerformanceInputs<'_>,
    config: &EngineConfig,
    warnings: &mut Vec<Warning>,
) -> (ErvPerformance, Capacities) {
    let size = inputs.size;
    let airflows = inputs.airflows;
    let streams = inputs.streams;

    let eff_cooling = effectiveness(size.effectiveness_cooling);
    let eff_heating = effectiveness(size.effectiveness_heating);

    let pressure_drop = finite(BASE_PRESSURE_DROP_IN_WC * inputs.filter_multiplier);

    check_wheel_limits(size, airflows.outdoor_cfm(), warnings);

    let outlet_cooling = outlet(
        streams.outdoor_cooling.dry_bulb_f,
        streams.return_cooling.dry_bulb_f,
        eff_cooling,
    );
    let outlet_heating = outlet(
        inputs.outdoor_heating_db_f,
        streams.return_heating.dry_bulb_f,
        eff_heating,
    );

    let mixed_cooling = mixed_supply(
        outlet_cooling.dry_bulb_f,
        streams.return_cooling.dry_bulb_f,
        streams.return_cooling.grains,
        AirStream::MixedSupplyCooling,
        inputs,
        config,
        warnings,
    );
    let mixed_heating = mixed_supply(
        outlet_heating.dry_bulb_f,
        streams.return_heating.dry_bulb_f,
        streams.return_heating.grains,
        AirStream::MixedSupplyHeating,
        inputs,
        config,
        warnings,
    );

    let cooling_btuh = difference(streams.outdoor_cooling.dry_bulb_f, outlet_cooling.dry_bulb_f)
        .map(|dt| sensible_btuh(airflows.outdoor_cfm(), dt));
    let cooling_mixed_btuh =
        difference(streams.outdoor_cooling.dry_bulb_f, mixed_cooling.dry_bulb_f)
            .map(|dt| sensible_btuh(airflows.supply_cfm(), dt));
    let heating_btuh = difference(outlet_heating.dry_bulb_f, inputs.outdoor_heating_db_f)
        .map(|dt| sensible_btuh(airflows.outdoor_cfm(), dt));

    let capacity = Capacities {
        cooling_tons: cooling_btuh.and_then(|q| finite(q / BTU_PER_HOUR_PER_TON)),
        cooling_mbh: cooling_mixed_btuh.and_then(|q| finite(q / BTU_PER_HOUR_PER_MBH)),
        heating_tons: heating_btuh.and_then(|q| finite(q / BTU_PER_HOUR_PER_TON)),
        heating_mbh: heating_btuh.and_then(|q| finite(q / BTU_PER_HOUR_PER_MBH)),
    };

    let performance = ErvPerformance {
        model: Some(size.name.to_owned()),
        effectiveness_cooling: eff_cooling.map(Constrained::into_inner),
        effectiveness_heating: eff_heating.map(Constrained::into_inner),
        pressure_drop_cooling_in_wc: pressure_drop,
        pressure_drop_heating_in_wc: pressure_drop,
        face_velocity_fpm: face_velocity(airflows.outdoor, size.face_area_ft2),
        outlet_cooling,
        outlet_heating,
        mixed_supply_cooling: mixed_cooling,
        mixed_supply_heating: mixed_heating,
    };

    debug!(
        model = size.name,
        face_velocity_fpm = performance.face_velocity_fpm,
        cooling_tons = capacity.cooling_tons,
        heating_mbh = capacity.heating_mbh,
        "computed ERV performance"
    );

    (performance, capacity)
}

/// Wheel leaving-air conditions for one season.
///
/// Both cooling and heating move the outdoor temperature toward the return
/// temperature by the effectiveness fraction.
fn outlet(
    outdoor_db_f: Option<f64>,
    return_db_f: Option<f64>,
    eff: Option<Constrained<f64, UnitInterval>>,
) -> Conditions {
    let dry_bulb_f = match (outdoor_db_f, return_db_f, eff) {
        (Some(oa), Some(ra), Some(eff)) => finite(oa + (ra - oa) * eff.into_inner()),
        _ => None,
    };
    Conditions {
        dry_bulb_f,
        wet_bulb_f: dry_bulb_f.map(|db| db - OUTLET_WET_BULB_DEPRESSION_F),
    }
}

/// Airflow-weighted mix of ERV outlet air and return air.
fn mixed_supply(
    outlet_db_f: Option<f64>,
    return_db_f: Option<f64>,
    return_grains: Option<f64>,
    stream: AirStream,
    inputs: &PerformanceInputs<'_>,
    config: &EngineConfig,
    warnings: &mut Vec<Warning>,
) -> Conditions {
    let airflows = inputs.airflows;
    let dry_bulb_f = match (outlet_db_f, return_db_f) {
        (Some(erv), Some(ra)) => finite(
            (erv * airflows.outdoor_cfm() + ra * airflows.return_cfm()) / airflows.supply_cfm(),
        ),
        _ => None,
    };

    let wet_bulb_f = match (dry_bulb_f, return_grains) {
        (Some(db), Some(grains)) => {
            let target = WetBulbTarget::HumidityRatio(grains / GRAINS_PER_POUND);
            match wet_bulb(db, inputs.pressure_psia, target, &config.wet_bulb) {
                Ok(solved) => {
                    if !solved.converged {
                        warn!(
                            %stream,
                            iters = solved.iters,
                            "mixed supply wet bulb did not converge"
                        );
                        warnings.push(Warning::NonConvergence {
                            stream,
                            iters: solved.iters,
                        });
                    }
                    finite(solved.temperature_f)
                }
                Err(error) => {
                    debug!(%stream, %error, "mixed supply wet bulb unavailable");
                    None
                }
            }
        }
        _ => None,
    };

    Conditions {
        dry_bulb_f,
        wet_bulb_f,
    }
}

/// Outdoor airflow over the wheel face area, fpm.
fn face_velocity(outdoor: Constrained<f64, StrictlyPositive>, face_area_ft2: f64) -> Option<f64> {
    let area = StrictlyPositive::new(face_area_ft2).ok()?;
    finite(outdoor.into_inner() / area.into_inner())
}

fn check_wheel_limits(size: &ErvSize, outdoor_cfm: f64, warnings: &mut Vec<Warning>) {
    if (size.min_cfm..=size.max_cfm).contains(&outdoor_cfm) {
        return;
    }
    warn!(
        model = size.name,
        outdoor_cfm,
        min_cfm = size.min_cfm,
        max_cfm = size.max_cfm,
        "outdoor airflow outside wheel limits"
    );
    warnings.push(Warning::AirflowOutsideWheelLimits {
        outdoor_cfm,
        min_cfm: size.min_cfm,
        max_cfm: size.max_cfm,
    });
}

fn difference(entering: Option<f64>, leaving: Option<f64>) -> Option<f64> {
    Some(entering? - leaving?)
}

/// Sensible heat rate magnitude, Btu/h.
fn sensible_btuh(cfm: f64, delta_t_f: f64) -> f64 {
    (cfm * SENSIBLE_HEAT_FACTOR * delta_t_f).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use crate::{
        models::hvac::erv::{AirReading, core::catalog::erv_size, core::streams::stream_state},
        support::atmosphere::SEA_LEVEL_PRESSURE_PSIA,
    };

    fn airflows(supply: f64, outdoor: f64) -> Airflows {
        Airflows {
            supply: StrictlyPositive::new(supply).unwrap(),
            outdoor: StrictlyPositive::new(outdoor).unwrap(),
        }
    }

    fn design_streams() -> StreamStates {
        let p = SEA_LEVEL_PRESSURE_PSIA;
        StreamStates {
            outdoor_cooling: stream_state(AirReading::new(95.0, 78.0), p),
            return_cooling: stream_state(AirReading::new(75.0, 62.5), p),
            outdoor_heating: stream_state(AirReading::new(10.0, 8.0), p),
            return_heating: stream_state(AirReading::new(70.0, 55.0), p),
        }
    }

    fn run(
        size: &str,
        supply: f64,
        outdoor: f64,
        streams: &StreamStates,
    ) -> (ErvPerformance, Capacities, Vec<Warning>) {
        let inputs = PerformanceInputs {
            size: erv_size(size).unwrap(),
            airflows: airflows(supply, outdoor),
            streams,
            outdoor_heating_db_f: streams.outdoor_heating.dry_bulb_f,
            filter_multiplier: 1.0,
            pressure_psia: SEA_LEVEL_PRESSURE_PSIA,
        };
        let mut warnings = Vec::new();
        let (performance, capacity) =
            erv_performance(&inputs, &EngineConfig::default(), &mut warnings);
        (performance, capacity, warnings)
    }

    #[test]
    fn design_cooling_outlet_and_capacity() {
        let streams = design_streams();
        let (performance, capacity, warnings) = run("ERC-4136", 5600.0, 1200.0, &streams);

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_relative_eq!(performance.outlet_cooling.dry_bulb_f.unwrap(), 77.4, epsilon = 1e-9);
        assert_relative_eq!(performance.outlet_cooling.wet_bulb_f.unwrap(), 72.4, epsilon = 1e-9);

        let msa = performance.mixed_supply_cooling.dry_bulb_f.unwrap();
        assert_relative_eq!(msa, (77.4 * 1200.0 + 75.0 * 4400.0) / 5600.0, epsilon = 1e-9);

        assert_relative_eq!(
            capacity.cooling_tons.unwrap(),
            1200.0 * 1.08 * 17.6 / 12_000.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            capacity.cooling_mbh.unwrap(),
            5600.0 * 1.08 * (95.0 - msa) / 1_000.0,
            epsilon = 1e-9
        );
        assert_eq!(performance.face_velocity_fpm, Some(1200.0 / 4.1));
        assert_relative_eq!(
            performance.pressure_drop_cooling_in_wc.unwrap(),
            0.434_589,
            epsilon = 1e-6
        );
    }

    #[test]
    fn heating_outlet_warms_outdoor_air() {
        let streams = design_streams();
        let (performance, capacity, _) = run("ERC-4136", 5600.0, 1200.0, &streams);

        let outlet = performance.outlet_heating.dry_bulb_f.unwrap();
        assert_relative_eq!(outlet, 10.0 + 60.0 * 0.85, epsilon = 1e-9);
        assert_relative_eq!(
            capacity.heating_mbh.unwrap(),
            1200.0 * 1.08 * 51.0 / 1_000.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            capacity.heating_tons.unwrap(),
            1200.0 * 1.08 * 51.0 / 12_000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn mixed_supply_wet_bulb_below_dry_bulb() {
        let streams = design_streams();
        let (performance, _, _) = run("ERC-4136", 5600.0, 1200.0, &streams);
        let msa = performance.mixed_supply_cooling;
        let (db, wb) = (msa.dry_bulb_f.unwrap(), msa.wet_bulb_f.unwrap());
        assert!(wb <= db);
        assert!(wb > 55.0, "wb = {wb}");
    }

    #[test]
    fn missing_return_temperature_disables_dependents() {
        let mut streams = design_streams();
        streams.return_cooling = stream_state(AirReading::default(), SEA_LEVEL_PRESSURE_PSIA);
        let (performance, capacity, _) = run("ERC-4136", 5600.0, 1200.0, &streams);

        assert_eq!(performance.outlet_cooling, Conditions::default());
        assert_eq!(performance.mixed_supply_cooling, Conditions::default());
        assert_eq!(capacity.cooling_tons, None);
        assert_eq!(capacity.cooling_mbh, None);
        assert!(capacity.heating_mbh.is_some());
    }

    #[test]
    fn wheel_limit_warning() {
        let streams = design_streams();
        let (_, _, warnings) = run("ERC-3014", 5600.0, 2000.0, &streams);
        assert_eq!(
            warnings,
            vec![Warning::AirflowOutsideWheelLimits {
                outdoor_cfm: 2000.0,
                min_cfm: 210.0,
                max_cfm: 1785.0
            }]
        );
    }

    #[test]
    fn effectiveness_edges() {
        assert_eq!(effectiveness(1.0).unwrap().into_inner(), MAX_EFFECTIVENESS);
        assert_eq!(effectiveness(-0.2).unwrap().into_inner(), 0.0);
        assert!(effectiveness(f64::NAN).is_none());
    }

    proptest! {
        #[test]
        fn effectiveness_never_exceeds_cap(rated in 0.0..10.0_f64) {
            let eff = effectiveness(rated).unwrap().into_inner();
            prop_assert!(eff <= MAX_EFFECTIVENESS);
            if rated <= MAX_EFFECTIVENESS {
                prop_assert_eq!(eff, rated);
            }
        }
    }
}
