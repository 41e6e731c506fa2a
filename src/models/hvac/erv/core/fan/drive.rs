//! Pulley and belt kits.

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::models::hvac::erv::{Component, DriveKit, DriveSizing};

use super::motor::MotorPart;

#[derive(Debug, Clone, Copy)]
struct Pulley {
    name: &'static str,
    /// Pitch diameter, in.
    pitch_in: f64,
    part_number: &'static str,
}

impl Pulley {
    const fn new(name: &'static str, pitch_in: f64, part_number: &'static str) -> Self {
        Self {
            name,
            pitch_in,
            part_number,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Belt {
    name: &'static str,
    /// Pitch length, in.
    length_in: f64,
    part_number: &'static str,
}

impl Belt {
    const fn new(name: &'static str, length_in: f64, part_number: &'static str) -> Self {
        Self {
            name,
            length_in,
            part_number,
        }
    }
}

/// Motor shaft accepted by every stocked driver pulley.
const DRIVER_SHAFT: &str = "7/8";

const DRIVERS: [Pulley; 6] = [
    Pulley::new("1VM25X7/8", 2.5, "VCPBLW-0101"),
    Pulley::new("1VM30X7/8", 3.0, "VCPBLW-0102"),
    Pulley::new("1VM35X7/8", 3.5, "VCPBLW-0103"),
    Pulley::new("1VM40X7/8", 4.0, "VCPBLW-0104"),
    Pulley::new("1VM45X7/8", 4.5, "VCPBLW-0105"),
    Pulley::new("1VM50X7/8", 5.0, "VCPBLW-0117"),
];

const DRIVEN: [Pulley; 5] = [
    Pulley::new("MB63X3/4", 6.3, "VCPBLW-0201"),
    Pulley::new("MB71X3/4", 7.1, "VCPBLW-0202"),
    Pulley::new("MB79X3/4", 7.9, "VCPBLW-0301"),
    Pulley::new("MB83X3/4", 8.3, "VCPBLW-0302"),
    Pulley::new("MB95X3/4", 9.5, "VCPBLW-0303"),
];

const BELTS: [Belt; 8] = [
    Belt::new("BX21", 21.0, "VCPBLW-0301"),
    Belt::new("BX25", 25.0, "VCPBLW-0302"),
    Belt::new("BX31", 31.0, "VCPBLW-0305"),
    Belt::new("BX34", 34.0, "VCPBLW-0308"),
    Belt::new("BX38", 38.0, "VCPBLW-0310"),
    Belt::new("BX42", 42.0, "VCPBLW-0312"),
    Belt::new("BX46", 46.0, "VCPBLW-0315"),
    Belt::new("BX51", 51.0, "VCPBLW-0318"),
];

/// The fixed kit shipped with every motor bracket.
fn static_kit() -> DriveKit {
    DriveKit {
        driver: Component::new("1VM50X7/8", "VCPBLW-0117"),
        driven: Component::new("MB83X3/4", "VCPBLW-0302"),
        belt: Component::new("BX34", "VCPBLW-0308"),
    }
}

/// Resolves the drive for the selected motor and fan speed.
pub(crate) fn drive_kit(motor: &MotorPart, fan_rpm: f64, sizing: &DriveSizing) -> Option<DriveKit> {
    match *sizing {
        DriveSizing::Static => Some(static_kit()),
        DriveSizing::Dynamic {
            motor_rpm,
            center_distance_in,
        } => {
            let kit = matched_kit(motor.shaft, motor_rpm, fan_rpm, center_distance_in);
            if kit.is_none() {
                warn!(
                    shaft = motor.shaft,
                    motor_rpm, fan_rpm, "no stocked pulley pair fits this motor"
                );
            }
            kit
        }
    }
}

/// Chooses the pulley pair closest to `motor_rpm / fan_rpm` and the belt
/// closest to the resulting pitch length.
fn matched_kit(
    shaft: &str,
    motor_rpm: f64,
    fan_rpm: f64,
    center_distance_in: f64,
) -> Option<DriveKit> {
    if shaft != DRIVER_SHAFT || !(fan_rpm > 0.0 && center_distance_in > 0.0) {
        return None;
    }
    let ratio = motor_rpm / fan_rpm;
    if !ratio.is_finite() {
        return None;
    }

    let (driver, driven) = DRIVERS
        .iter()
        .flat_map(|driver| DRIVEN.iter().map(move |driven| (driver, driven)))
        .min_by(|a, b| ratio_error(a, ratio).total_cmp(&ratio_error(b, ratio)))?;

    let length_in = belt_length(driver.pitch_in, driven.pitch_in, center_distance_in);
    let belt = BELTS.iter().min_by(|a, b| {
        (a.length_in - length_in)
            .abs()
            .total_cmp(&(b.length_in - length_in).abs())
    })?;

    debug!(
        ratio,
        driver = driver.name,
        driven = driven.name,
        belt = belt.name,
        length_in,
        "matched drive"
    );

    Some(DriveKit {
        driver: Component::new(driver.name, driver.part_number),
        driven: Component::new(driven.name, driven.part_number),
        belt: Component::new(belt.name, belt.part_number),
    })
}

fn ratio_error((driver, driven): &(&Pulley, &Pulley), ratio: f64) -> f64 {
    (driven.pitch_in / driver.pitch_in - ratio).abs()
}

/// Open belt pitch length for two pulleys at center distance `c`, in.
fn belt_length(d1: f64, d2: f64, c: f64) -> f64 {
    2.0 * c + PI * (d1 + d2) / 2.0 + (d2 - d1).powi(2) / (4.0 * c)
}
