use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::support::psychrometrics::WetBulbConfig;

/// How the calculator treats unresolved references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Unknown ERV sizes, unit models, and locations are errors.
    Strict,

    /// Unknown references fall back to defaults and attach a warning.
    #[default]
    Compatibility,
}

/// How belt drive components are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriveSizing {
    /// Fixed pulley and belt kit per motor bracket.
    #[default]
    Static,

    /// Pulleys matched to the motor/fan speed ratio and the belt sized for
    /// the given center distance.
    Dynamic {
        motor_rpm: f64,
        center_distance_in: f64,
    },
}

/// Calculator settings.
///
/// Every key is optional in TOML; missing keys take their defaults.
///
/// # Example
///
/// ```
/// use erv_models::models::hvac::erv::{EngineConfig, Mode};
///
/// let config = EngineConfig::from_toml_str(r#"
///     mode = "strict"
///
///     [wet_bulb]
///     max_iters = 30
/// "#).unwrap();
///
/// assert_eq!(config.mode, Mode::Strict);
/// assert_eq!(config.wet_bulb.max_iters, 30);
/// assert_eq!(config.fallback_erv_model, "ERC-4132C-4M");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub mode: Mode,

    /// Reject airflows outside `airflow_range_cfm`.
    pub enforce_airflow_range: bool,
    pub airflow_range_cfm: [f64; 2],

    /// ERV size used when the requested one is unknown in compatibility mode.
    pub fallback_erv_model: String,

    pub wet_bulb: WetBulbConfig,
    pub drive_sizing: DriveSizing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            enforce_airflow_range: true,
            airflow_range_cfm: [500.0, 10_000.0],
            fallback_erv_model: "ERC-4132C-4M".to_owned(),
            wet_bulb: WetBulbConfig::default(),
            drive_sizing: DriveSizing::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns true in strict mode.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.mode == Mode::Strict
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad setting.
    pub fn check(&self) -> Result<(), ConfigError> {
        let [min, max] = self.airflow_range_cfm;
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(ConfigError::Invalid(format!(
                "airflow_range_cfm must be an increasing pair, got [{min}, {max}]"
            )));
        }
        if self.wet_bulb.max_iters == 0 {
            return Err(ConfigError::Invalid("wet_bulb.max_iters must be at least 1".into()));
        }
        if !(self.wet_bulb.temp_tol_f >= 0.0 && self.wet_bulb.residual_tol >= 0.0) {
            return Err(ConfigError::Invalid("wet_bulb tolerances must be non-negative".into()));
        }
        if let DriveSizing::Dynamic {
            motor_rpm,
            center_distance_in,
        } = self.drive_sizing
            && !(motor_rpm > 0.0 && center_distance_in > 0.0)
        {
            return Err(ConfigError::Invalid(
                "dynamic drive sizing needs positive motor_rpm and center_distance_in".into(),
            ));
        }
        Ok(())
    }
}

/// Errors from reading or writing an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
