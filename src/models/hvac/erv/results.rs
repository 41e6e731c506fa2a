use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::support::atmosphere::AtmosphericContext;

use super::Warning;

/// Placeholder rendered for unavailable values.
pub const UNAVAILABLE: &str = "--";

/// Psychrometric properties of one air stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PsychrometricState {
    pub dry_bulb_f: Option<f64>,
    pub wet_bulb_f: Option<f64>,
    /// Moisture content, grains per lb dry air.
    pub grains: Option<f64>,
    /// Btu per lb dry air.
    pub enthalpy: Option<f64>,
    /// Fraction in `[0, 1]`.
    pub relative_humidity: Option<f64>,
    pub dew_point_f: Option<f64>,
    /// ft³ per lb dry air.
    pub specific_volume: Option<f64>,
}

/// The four design air streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamStates {
    pub outdoor_cooling: PsychrometricState,
    pub return_cooling: PsychrometricState,
    /// Evaluated after the pre-heater when one is fitted.
    pub outdoor_heating: PsychrometricState,
    pub return_heating: PsychrometricState,
}

/// A dry-bulb/wet-bulb pair, °F.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub dry_bulb_f: Option<f64>,
    pub wet_bulb_f: Option<f64>,
}

/// ERV wheel performance at the design conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErvPerformance {
    /// The ERV size actually used, after any fallback.
    pub model: Option<String>,
    pub effectiveness_cooling: Option<f64>,
    pub effectiveness_heating: Option<f64>,
    /// in. w.c., including the filter multiplier.
    pub pressure_drop_cooling_in_wc: Option<f64>,
    pub pressure_drop_heating_in_wc: Option<f64>,
    pub face_velocity_fpm: Option<f64>,
    pub outlet_cooling: Conditions,
    pub outlet_heating: Conditions,
    pub mixed_supply_cooling: Conditions,
    pub mixed_supply_heating: Conditions,
}

/// Sensible capacities recovered by the ERV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Capacities {
    pub cooling_tons: Option<f64>,
    pub cooling_mbh: Option<f64>,
    pub heating_tons: Option<f64>,
    pub heating_mbh: Option<f64>,
}

/// A purchasable part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub part: String,
    pub part_number: String,
}

impl Component {
    pub(super) fn new(part: &str, part_number: &str) -> Self {
        Self {
            part: part.to_owned(),
            part_number: part_number.to_owned(),
        }
    }
}

/// Belt drive parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveKit {
    pub driver: Component,
    pub driven: Component,
    pub belt: Component,
}

/// The selected fan, motor, and drive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FanSelection {
    /// `None` when the unit model is blank or unresolved.
    pub fan_type: Option<String>,
    pub motor_hp: Option<f64>,
    pub fan_rpm: Option<f64>,
    /// Brake horsepower including the 1.15 margin.
    pub bhp: Option<f64>,
    pub static_pressure_in_wc: Option<f64>,
    pub motor: Option<Component>,
    pub drive: Option<DriveKit>,
    /// BHP is above 80 % of the selected motor rating.
    pub near_motor_limit: bool,
}

/// Packaged unit performance with the ERV installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPerformance {
    pub tonnage_with_erv: Option<f64>,
    pub eer_with_erv: Option<f64>,
}

/// Everything one calculation produces.
///
/// Every numeric field is `Option`: `None` means unavailable, never a
/// computed zero. The layout is stable regardless of which inputs were
/// missing, so a serialized record always has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub location: Option<String>,
    pub atmosphere: Option<AtmosphericContext>,
    /// Outdoor air density at the cooling design dry bulb, lb/ft³.
    pub air_density: Option<f64>,
    pub mixed_return_cfm: Option<f64>,
    pub streams: StreamStates,
    /// Outdoor heating air leaving the pre-heater, rounded to 0.1 °F.
    pub pre_heat: Conditions,
    pub erv: ErvPerformance,
    pub capacity: Capacities,
    pub fan: FanSelection,
    pub unit: UnitPerformance,
    pub warnings: Vec<Warning>,
}

impl ResultRecord {
    /// Renders the record as a two-column text table.
    ///
    /// Rows always appear in the same order with display precisions matching
    /// the selection tool. Unavailable values show as [`UNAVAILABLE`].
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut rows: Vec<(&str, String)> = Vec::new();

        rows.push(("Location", text(self.location.as_deref())));
        rows.push(("Altitude (ft)", num(self.atmosphere.map(|a| a.altitude_ft), 1)));
        rows.push(("Pressure (psia)", num(self.atmosphere.map(|a| a.pressure_psia), 3)));
        rows.push(("Air density (lb/ft³)", num(self.air_density, 4)));
        rows.push(("Mixed return CFM", num(self.mixed_return_cfm, 0)));

        for (label, state) in [
            ("OA cooling", &self.streams.outdoor_cooling),
            ("RA cooling", &self.streams.return_cooling),
            ("OA heating", &self.streams.outdoor_heating),
            ("RA heating", &self.streams.return_heating),
        ] {
            rows.push((label, format!("grains {}", num(state.grains, 1))));
            rows.push(("  enthalpy (Btu/lb)", num(state.enthalpy, 2)));
            rows.push(("  RH", percent(state.relative_humidity)));
            rows.push(("  dew point (°F)", num(state.dew_point_f, 1)));
        }

        rows.push(("Post pre-heat DB (°F)", num(self.pre_heat.dry_bulb_f, 1)));
        rows.push(("Post pre-heat WB (°F)", num(self.pre_heat.wet_bulb_f, 1)));

        let erv = &self.erv;
        rows.push(("Model designation", text(erv.model.as_deref())));
        rows.push(("Effectiveness cooling", percent(erv.effectiveness_cooling)));
        rows.push(("Effectiveness heating", percent(erv.effectiveness_heating)));
        rows.push(("Pressure drop cooling (in. w.c.)", num(erv.pressure_drop_cooling_in_wc, 3)));
        rows.push(("Pressure drop heating (in. w.c.)", num(erv.pressure_drop_heating_in_wc, 3)));
        rows.push(("Face velocity (ft/min)", num(erv.face_velocity_fpm, 0)));
        rows.push(("ERV DB cooling (°F)", num(erv.outlet_cooling.dry_bulb_f, 1)));
        rows.push(("ERV WB cooling (°F)", num(erv.outlet_cooling.wet_bulb_f, 1)));
        rows.push(("ERV DB heating (°F)", num(erv.outlet_heating.dry_bulb_f, 1)));
        rows.push(("ERV WB heating (°F)", num(erv.outlet_heating.wet_bulb_f, 1)));
        rows.push(("MSA DB cooling (°F)", num(erv.mixed_supply_cooling.dry_bulb_f, 1)));
        rows.push(("MSA WB cooling (°F)", num(erv.mixed_supply_cooling.wet_bulb_f, 1)));
        rows.push(("MSA DB heating (°F)", num(erv.mixed_supply_heating.dry_bulb_f, 1)));
        rows.push(("MSA WB heating (°F)", num(erv.mixed_supply_heating.wet_bulb_f, 1)));

        rows.push(("ERV cooling tons", num(self.capacity.cooling_tons, 2)));
        rows.push(("Cooling sensible MBH", num(self.capacity.cooling_mbh, 1)));
        rows.push(("ERV heating tons", num(self.capacity.heating_tons, 2)));
        rows.push(("Heating sensible MBH", num(self.capacity.heating_mbh, 1)));

        rows.push(("Tonnage with ERV", num(self.unit.tonnage_with_erv, 1)));
        rows.push(("EER with ERV", num(self.unit.eer_with_erv, 1)));

        let fan = &self.fan;
        rows.push(("Fan type", text(fan.fan_type.as_deref())));
        rows.push(("Motor size (HP)", num(fan.motor_hp, 1)));
        rows.push(("Fan RPM", num(fan.fan_rpm, 0)));
        rows.push(("Fan BHP", num(fan.bhp, 3)));
        rows.push(("Total static pressure (in. w.c.)", num(fan.static_pressure_in_wc, 3)));
        rows.push(("Motor", part(fan.motor.as_ref())));
        rows.push(("Driver pulley", part(fan.drive.as_ref().map(|d| &d.driver))));
        rows.push(("Driven pulley", part(fan.drive.as_ref().map(|d| &d.driven))));
        rows.push(("Belt", part(fan.drive.as_ref().map(|d| &d.belt))));

        let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (label, value) in rows {
            let _ = writeln!(out, "{label:<width$}  {value}");
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
        out
    }
}

fn num(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => UNAVAILABLE.to_owned(),
    }
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", v * 100.0),
        _ => UNAVAILABLE.to_owned(),
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or(UNAVAILABLE).to_owned()
}

fn part(component: Option<&Component>) -> String {
    component.map_or_else(
        || UNAVAILABLE.to_owned(),
        |c| format!("{} ({})", c.part, c.part_number),
    )
}
