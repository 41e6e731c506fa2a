//! Packaged-unit rating with the ERV carrying part of the load.

use crate::{models::hvac::erv::UnitPerformance, support::constraint::NonNegative};

use super::round_tenth;

/// Adjusts the unit's nominal tonnage and EER for recovered cooling.
///
/// Tonnage never drops below zero. When it reaches zero the stated EER is
/// passed through. Missing inputs leave both values unavailable.
pub(crate) fn unit_performance(
    unit_tons: Option<f64>,
    unit_eer: Option<f64>,
    erv_cooling_tons: Option<f64>,
) -> UnitPerformance {
    let (Some(tons), Some(eer), Some(erv_tons)) = (unit_tons, unit_eer, erv_cooling_tons) else {
        return UnitPerformance::default();
    };

    let adjusted = NonNegative::saturating(tons - erv_tons).into_inner();
    let tonnage = round_tenth(adjusted);
    let eer_with_erv = if tonnage > 0.0 {
        round_tenth(eer * tons / tonnage)
    } else {
        round_tenth(eer)
    };

    UnitPerformance {
        tonnage_with_erv: Some(tonnage),
        eer_with_erv: Some(eer_with_erv),
    }
}
