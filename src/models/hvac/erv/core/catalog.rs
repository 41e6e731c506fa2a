//! Reference tables for ERV wheels, unit models, and filters.

/// Rated data for one ERV wheel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ErvSize {
    pub name: &'static str,
    pub effectiveness_cooling: f64,
    pub effectiveness_heating: f64,
    /// Wheel face area, ft².
    pub face_area_ft2: f64,
    /// Rated wheel airflow window, CFM.
    pub min_cfm: f64,
    pub max_cfm: f64,
}

const ERV_SIZES: [ErvSize; 6] = [
    ErvSize {
        name: "ERC-3014",
        effectiveness_cooling: 0.85,
        effectiveness_heating: 0.82,
        face_area_ft2: 2.1,
        min_cfm: 210.0,
        max_cfm: 1785.0,
    },
    ErvSize {
        name: "ERC-3622",
        effectiveness_cooling: 0.87,
        effectiveness_heating: 0.84,
        face_area_ft2: 3.1,
        min_cfm: 310.0,
        max_cfm: 2635.0,
    },
    ErvSize {
        name: "ERC-4136",
        effectiveness_cooling: 0.88,
        effectiveness_heating: 0.85,
        face_area_ft2: 4.1,
        min_cfm: 410.0,
        max_cfm: 3485.0,
    },
    ErvSize {
        name: "ERC-4634",
        effectiveness_cooling: 0.89,
        effectiveness_heating: 0.86,
        face_area_ft2: 5.2,
        min_cfm: 520.0,
        max_cfm: 4420.0,
    },
    ErvSize {
        name: "ERC-5262",
        effectiveness_cooling: 0.90,
        effectiveness_heating: 0.87,
        face_area_ft2: 7.1,
        min_cfm: 710.0,
        max_cfm: 6035.0,
    },
    ErvSize {
        name: "ERC-4132C-4M",
        effectiveness_cooling: 0.875_202_317_209_211_8,
        effectiveness_heating: 0.843_568_052_112_256_8,
        face_area_ft2: 3.1,
        min_cfm: 410.0,
        max_cfm: 3485.0,
    },
];

/// Wheel pressure drop before the filter multiplier, in. w.c.
pub(crate) const BASE_PRESSURE_DROP_IN_WC: f64 = 0.434_589_058_481_117;

/// Looks up an ERV size by exact name.
pub(crate) fn erv_size(name: &str) -> Option<&'static ErvSize> {
    ERV_SIZES.iter().find(|size| size.name == name)
}

/// Packaged units with a characterized supply fan pair.
const UNIT_MODELS: [&str; 4] = [
    "Trane - Voyager A",
    "Trane - Voyager B",
    "Trane - Voyager C",
    "Custom Unit",
];

/// Which fan pair a unit model draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitClass {
    /// No unit model given.
    Blank,
    Standard,
    Precedent,
    /// Given but not in the catalog.
    Unknown,
}

pub(crate) fn classify_unit_model(unit_model: Option<&str>) -> UnitClass {
    let Some(name) = unit_model.map(str::trim).filter(|n| !n.is_empty()) else {
        return UnitClass::Blank;
    };
    if name.to_ascii_lowercase().contains("precedent") {
        UnitClass::Precedent
    } else if UNIT_MODELS.contains(&name) {
        UnitClass::Standard
    } else {
        UnitClass::Unknown
    }
}

const FILTERS: [(&str, f64); 3] = [("MERV 8", 1.0), ("MERV 13", 1.3), ("HEPA", 1.8)];

/// Returns the pressure-drop multiplier for a filter type.
///
/// Matching ignores case; unknown or absent filters use 1.0.
pub(crate) fn filter_multiplier(filter_type: Option<&str>) -> f64 {
    filter_type
        .map(str::trim)
        .and_then(|f| {
            FILTERS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(f))
                .map(|&(_, multiplier)| multiplier)
        })
        .unwrap_or(1.0)
}
