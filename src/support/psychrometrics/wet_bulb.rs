//! Inverse psychrometrics: wet bulb from dry bulb and a moisture target.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use super::{GRAINS_PER_POUND, enthalpy_from_humidity_ratio, humidity_ratio};

/// Lower end of the wet-bulb search bracket, °F.
const SEARCH_FLOOR_F: f64 = -60.0;

/// Lowest wet bulb reported for dry bulbs above freezing, °F.
const FREEZING_F: f64 = 32.0;

/// The moisture quantity a wet bulb must reproduce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WetBulbTarget {
    /// Humidity ratio, lb water / lb dry air.
    HumidityRatio(f64),

    /// Moist-air enthalpy, Btu/lb dry air.
    Enthalpy(f64),
}

impl WetBulbTarget {
    fn value(self) -> f64 {
        match self {
            Self::HumidityRatio(v) | Self::Enthalpy(v) => v,
        }
    }
}

/// Solver settings for the wet-bulb search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WetBulbConfig {
    /// Maximum bisection iterations.
    pub max_iters: usize,

    /// Absolute wet-bulb tolerance, °F.
    pub temp_tol_f: f64,

    /// Absolute residual tolerance, in grains for humidity targets and
    /// Btu/lb for enthalpy targets.
    pub residual_tol: f64,
}

impl Default for WetBulbConfig {
    fn default() -> Self {
        Self {
            max_iters: 20,
            temp_tol_f: 0.01,
            residual_tol: 0.01,
        }
    }
}

impl WetBulbConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol_f,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}

/// A solved wet bulb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetBulb {
    /// Wet-bulb temperature, °F, clamped to `[min(32, db), db]`.
    pub temperature_f: f64,

    /// Whether the search met its tolerances.
    ///
    /// When `false`, `temperature_f` is the best iterate (or the nearest
    /// bracket end if the target is unreachable).
    pub converged: bool,

    /// Iterations performed.
    pub iters: usize,
}

/// Errors returned by [`wet_bulb`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WetBulbError {
    #[error("dry bulb must be finite, got {0}")]
    DryBulb(f64),

    #[error("pressure must be finite and positive, got {0} psia")]
    Pressure(f64),

    #[error("moisture target must be finite and non-negative, got {0}")]
    Target(f64),
}

/// Finds the wet bulb that reproduces `target` at the given dry bulb and
/// pressure.
///
/// Bisects on `[-60 °F, db]`. The result is clamped to `[min(32, db), db]`.
/// Running out of iterations is not an error; check [`WetBulb::converged`].
///
/// # Errors
///
/// Returns a [`WetBulbError`] if an input is not finite, the pressure is not
/// positive, or the target is negative.
///
/// # Example
///
/// ```
/// use erv_models::support::psychrometrics::{
///     WetBulbConfig, WetBulbTarget, humidity_ratio, wet_bulb,
/// };
///
/// let w = humidity_ratio(80.0, 14.696, 65.0);
/// let solved = wet_bulb(
///     80.0,
///     14.696,
///     WetBulbTarget::HumidityRatio(w),
///     &WetBulbConfig::default(),
/// )
/// .unwrap();
///
/// assert!((solved.temperature_f - 65.0).abs() < 0.1);
/// ```
pub fn wet_bulb(
    dry_bulb_f: f64,
    pressure_psia: f64,
    target: WetBulbTarget,
    config: &WetBulbConfig,
) -> Result<WetBulb, WetBulbError> {
    if !dry_bulb_f.is_finite() {
        return Err(WetBulbError::DryBulb(dry_bulb_f));
    }
    if !(pressure_psia.is_finite() && pressure_psia > 0.0) {
        return Err(WetBulbError::Pressure(pressure_psia));
    }
    let value = target.value();
    if !(value.is_finite() && value >= 0.0) {
        return Err(WetBulbError::Target(value));
    }

    let floor = FREEZING_F.min(dry_bulb_f);
    let clamp = |t: f64| t.clamp(floor, dry_bulb_f);

    let model = MoistAirModel {
        dry_bulb_f,
        pressure_psia,
    };
    let problem = WetBulbProblem { target };

    let result = bisection::solve(
        &model,
        &problem,
        [SEARCH_FLOOR_F, dry_bulb_f],
        &config.bisection(),
        |event: &bisection::Event<'_, MoistAirModel, WetBulbProblem>| {
            if let Ok(eval) = event.result() {
                trace!(x = event.x(), residual = eval.residuals[0], "wet-bulb bisection");
            }
            None
        },
    );

    match result {
        Ok(solution) => {
            let converged = solution.status == bisection::Status::Converged;
            if !converged {
                debug!(
                    dry_bulb_f,
                    residual = solution.residual,
                    iters = solution.iters,
                    "wet-bulb search did not converge"
                );
            }
            Ok(WetBulb {
                temperature_f: clamp(solution.x),
                converged,
                iters: solution.iters,
            })
        }
        Err(error) => {
            // Target outside the bracket: saturated above, bone dry below.
            let saturated = problem.residual(&model.state(dry_bulb_f)) < 0.0;
            let temperature_f = if saturated { dry_bulb_f } else { floor };
            debug!(dry_bulb_f, %error, temperature_f, "wet-bulb target outside search bracket");
            Ok(WetBulb {
                temperature_f,
                converged: false,
                iters: 0,
            })
        }
    }
}

/// Moisture state of air at a trial wet bulb.
#[derive(Debug, Clone, Copy)]
struct MoistAir {
    humidity_ratio: f64,
    enthalpy: f64,
}

/// Evaluates the moisture state implied by a trial wet bulb.
struct MoistAirModel {
    dry_bulb_f: f64,
    pressure_psia: f64,
}

impl MoistAirModel {
    fn state(&self, wet_bulb_f: f64) -> MoistAir {
        let w = humidity_ratio(self.dry_bulb_f, self.pressure_psia, wet_bulb_f);
        MoistAir {
            humidity_ratio: w,
            enthalpy: enthalpy_from_humidity_ratio(self.dry_bulb_f, w),
        }
    }
}

impl Model for MoistAirModel {
    type Input = f64;
    type Output = MoistAir;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.state(*input))
    }
}

/// Residual between the trial state and the target.
///
/// Humidity residuals are scaled to grains so one tolerance fits both modes.
struct WetBulbProblem {
    target: WetBulbTarget,
}

impl WetBulbProblem {
    fn residual(&self, state: &MoistAir) -> f64 {
        match self.target {
            WetBulbTarget::HumidityRatio(w) => (state.humidity_ratio - w) * GRAINS_PER_POUND,
            WetBulbTarget::Enthalpy(h) => state.enthalpy - h,
        }
    }
}

impl EquationProblem<1> for WetBulbProblem {
    type Input = f64;
    type Output = MoistAir;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([self.residual(output)])
    }
}
