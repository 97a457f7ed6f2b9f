//! Annealing configuration and cooling schedules.

use crate::error::{Result, TspError};

/// Cooling schedule for temperature reduction.
///
/// Every variant is strictly decreasing for valid parameters, so the search
/// always reaches its minimum temperature.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.999.
    Geometric {
        /// Cooling rate in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_{k+1} = T_k - decrement`.
    Linear {
        /// Amount subtracted per temperature step. Must be positive.
        decrement: f64,
    },

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Cools fast at high T, slow at low T.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (steps * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.995 }
    }
}

impl CoolingSchedule {
    /// Temperature after one cooling step from `temperature`.
    #[inline]
    pub fn next(&self, temperature: f64) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => temperature * alpha,
            CoolingSchedule::Linear { decrement } => (temperature - decrement).max(0.0),
            CoolingSchedule::LundyMees { beta } => temperature / (1.0 + beta * temperature),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(TspError::NumericInstability(format!(
                        "geometric cooling rate must be in (0, 1), got {alpha}; \
                         the temperature would never reach its minimum"
                    )));
                }
            }
            CoolingSchedule::Linear { decrement } => {
                if !(decrement > 0.0 && decrement.is_finite()) {
                    return Err(TspError::NumericInstability(format!(
                        "linear decrement must be positive and finite, got {decrement}"
                    )));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if !(beta > 0.0 && beta.is_finite()) {
                    return Err(TspError::NumericInstability(format!(
                        "lundy-mees beta must be positive and finite, got {beta}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// How candidate costs are obtained inside the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostMode {
    /// Recompute the full cyclic cost of every candidate, O(N).
    #[default]
    Full,
    /// Use the move's O(1) cost delta when it provides one, falling back to
    /// full recomputation otherwise.
    ///
    /// Floating-point summation order differs from `Full`, so on matrices
    /// with non-integral costs the two modes may make different
    /// accept/reject decisions under the same random draws.
    Incremental,
}

/// Configuration for an annealing run.
///
/// Defaults cool geometrically from 100 000 to 1 at rate 0.995 with one
/// move per temperature step.
///
/// # Examples
///
/// ```
/// use tsp_anneal::anneal::{AnnealConfig, CoolingSchedule};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(1000.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.99 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature. The search stops once T drops to or below this.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of moves tried at each temperature level. Values below 1 are
    /// treated as 1.
    pub iterations_per_temperature: usize,

    /// Safety ceiling on total moves. 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock ceiling in milliseconds, checked once per move. 0 = no limit.
    pub time_limit_ms: u64,

    /// Random seed for reproducibility. `None` draws from OS entropy.
    pub seed: Option<u64>,

    /// Candidate costing strategy.
    pub cost_mode: CostMode,

    /// Whether to record the best cost at every improvement.
    pub record_history: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100_000.0,
            min_temperature: 1.0,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 1,
            max_iterations: 0,
            time_limit_ms: 0,
            seed: None,
            cost_mode: CostMode::Full,
            record_history: true,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    /// Shorthand for geometric cooling at `rate`.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling = CoolingSchedule::Geometric { alpha: rate };
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Validates the configuration.
    ///
    /// Any schedule that could produce a non-terminating or meaningless
    /// loop is reported as [`TspError::NumericInstability`].
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(TspError::NumericInstability(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(TspError::NumericInstability(format!(
                "min_temperature must be positive and finite, got {}",
                self.min_temperature
            )));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(TspError::NumericInstability(format!(
                "min_temperature ({}) must be less than initial_temperature ({})",
                self.min_temperature, self.initial_temperature
            )));
        }
        self.cooling.validate()
    }

    /// Number of temperature steps the schedule takes to freeze.
    ///
    /// Closed-form estimate; the actual count can differ by one step
    /// because of floating-point rounding.
    pub fn estimated_steps(&self) -> usize {
        let t0 = self.initial_temperature;
        let t_min = self.min_temperature;
        let steps = match self.cooling {
            CoolingSchedule::Geometric { alpha } => (t_min / t0).ln() / alpha.ln(),
            CoolingSchedule::Linear { decrement } => (t0 - t_min) / decrement,
            CoolingSchedule::LundyMees { beta } => (1.0 / t_min - 1.0 / t0) / beta,
        };
        if steps.is_finite() && steps > 0.0 {
            steps.ceil() as usize
        } else {
            0
        }
    }
}
