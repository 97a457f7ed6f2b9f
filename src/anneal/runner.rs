//! Annealing execution loop.
//!
//! A run moves through three phases: it initializes a random tour, cools
//! while the temperature is above the configured minimum, and terminates the
//! first time it drops to or below that minimum. Optional ceilings
//! (iterations, wall clock, cancellation) can end the cooling phase early but
//! are inert unless configured.

use super::config::{AnnealConfig, CostMode};
use super::neighbor::{NeighborMove, NeighborPolicy, SwapNeighbor};
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::random::rng_from_seed;
use crate::tour::{cyclic_cost, Tour};
use log::{debug, trace, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The temperature reached the configured minimum.
    Frozen,
    /// `max_iterations` was reached first.
    IterationLimit,
    /// `time_limit_ms` elapsed first.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of an annealing run.
///
/// `best_tour` and `best_cost` are snapshots independent of the search;
/// `best_cost` is always the exact cyclic cost of `best_tour`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// The best tour found.
    pub best_tour: Tour,

    /// Cyclic cost of `best_tour`.
    pub best_cost: f64,

    /// Total number of moves evaluated.
    pub iterations: usize,

    /// Number of cooling steps applied.
    pub temperature_steps: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// What ended the run.
    pub stop_reason: StopReason,

    /// Best cost at the start and after every improvement of the best tour.
    /// Empty when history recording is disabled.
    pub cost_history: Vec<f64>,
}

impl AnnealResult {
    /// Whether the run ended because a ceiling or the cancellation flag
    /// fired rather than the schedule freezing.
    pub fn stopped_early(&self) -> bool {
        self.stop_reason != StopReason::Frozen
    }
}

/// Mutable state owned by a single run.
struct SearchState {
    current: Vec<usize>,
    current_cost: f64,
    candidate: Vec<usize>,
    best: Vec<usize>,
    best_cost: f64,
    temperature: f64,
}

/// Executes simulated annealing over a [`DistanceMatrix`].
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs with the default pairwise-swap neighborhood.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_anneal::{anneal::{AnnealConfig, AnnealRunner}, DistanceMatrix};
    ///
    /// let m = DistanceMatrix::from_rows(&[
    ///     [0.0, 10.0, 5.0, 8.0],
    ///     [10.0, 0.0, 9.0, 6.0],
    ///     [5.0, 9.0, 0.0, 9.0],
    ///     [8.0, 6.0, 9.0, 0.0],
    /// ])
    /// .unwrap();
    /// let result = AnnealRunner::solve(&m, &AnnealConfig::default().with_seed(42)).unwrap();
    /// assert_eq!(result.best_cost, 28.0);
    /// ```
    pub fn solve(matrix: &DistanceMatrix, config: &AnnealConfig) -> Result<AnnealResult> {
        Self::run(matrix, config, &SwapNeighbor)
    }

    /// Runs with the given neighbor policy, seeded from `config.seed`.
    pub fn run<N: NeighborPolicy>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        policy: &N,
    ) -> Result<AnnealResult> {
        Self::run_with_cancel(matrix, config, policy, None)
    }

    /// Runs with an optional cancellation token.
    pub fn run_with_cancel<N: NeighborPolicy>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        policy: &N,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(matrix, config, policy, &mut rng, cancel.as_deref())
    }

    /// Runs with an injected random source. `config.seed` is ignored.
    ///
    /// Fails with [`TspError::DegenerateInput`] for fewer than two
    /// locations and [`TspError::NumericInstability`] for an invalid
    /// schedule or a non-finite value arising mid-run.
    pub fn run_with_rng<N, R>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        policy: &N,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<AnnealResult>
    where
        N: NeighborPolicy,
        R: Rng + ?Sized,
    {
        let n = matrix.len();
        if n < 2 {
            return Err(TspError::DegenerateInput { locations: n });
        }
        config.validate()?;

        let deadline = (config.time_limit_ms > 0)
            .then(|| Instant::now() + Duration::from_millis(config.time_limit_ms));
        let inner_iters = config.iterations_per_temperature.max(1);

        debug!(
            "annealing {} locations: T {} -> {}, {:?}, ~{} steps",
            n,
            config.initial_temperature,
            config.min_temperature,
            config.cooling,
            config.estimated_steps()
        );

        // Initialize
        let current = Tour::random(n, rng).into_inner();
        let current_cost = cyclic_cost(&current, matrix);
        if !current_cost.is_finite() {
            return Err(TspError::NumericInstability(format!(
                "initial tour cost is {current_cost}"
            )));
        }
        let mut state = SearchState {
            candidate: current.clone(),
            best: current.clone(),
            best_cost: current_cost,
            current,
            current_cost,
            temperature: config.initial_temperature,
        };

        let mut iterations = 0usize;
        let mut temperature_steps = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::new();
        if config.record_history {
            cost_history.push(state.best_cost);
        }
        let mut stop_reason = StopReason::Frozen;

        // Both orientations of a two-city cycle are the same tour.
        if n == 2 {
            debug!("two locations: cycle cost {}", state.best_cost);
            return Ok(AnnealResult {
                best_tour: Tour::from_trusted(state.best),
                best_cost: state.best_cost,
                iterations,
                temperature_steps,
                final_temperature: state.temperature,
                accepted_moves,
                improving_moves,
                stop_reason,
                cost_history,
            });
        }

        'cooling: while state.temperature > config.min_temperature {
            for _ in 0..inner_iters {
                if let Some(reason) = ceiling_hit(config, iterations, deadline, cancel) {
                    stop_reason = reason;
                    break 'cooling;
                }

                let mv = policy.propose(&state.current, rng);

                // The candidate lives in scratch space until accepted.
                let delta = match config.cost_mode {
                    CostMode::Incremental => mv.delta(&state.current, matrix),
                    CostMode::Full => None,
                };
                let candidate_cost = match delta {
                    Some(d) => state.current_cost + d,
                    None => {
                        state.candidate.clone_from(&state.current);
                        mv.apply(&mut state.candidate);
                        cyclic_cost(&state.candidate, matrix)
                    }
                };
                if !candidate_cost.is_finite() {
                    return Err(TspError::NumericInstability(format!(
                        "candidate cost became {candidate_cost} at iteration {iterations}"
                    )));
                }

                // Metropolis acceptance criterion
                let accept = if candidate_cost < state.current_cost {
                    improving_moves += 1;
                    true
                } else {
                    let probability =
                        ((state.current_cost - candidate_cost) / state.temperature).exp();
                    if probability.is_nan() {
                        return Err(TspError::NumericInstability(format!(
                            "acceptance probability is NaN at temperature {}",
                            state.temperature
                        )));
                    }
                    rng.random::<f64>() < probability
                };

                if accept {
                    if delta.is_some() {
                        mv.apply(&mut state.current);
                    } else {
                        std::mem::swap(&mut state.current, &mut state.candidate);
                    }
                    state.current_cost = candidate_cost;
                    accepted_moves += 1;

                    // Summed deltas drift in the last ulp; snapshot exact costs only.
                    if delta.is_some() && state.current_cost <= state.best_cost {
                        state.current_cost = cyclic_cost(&state.current, matrix);
                    }
                    if state.current_cost < state.best_cost {
                        state.best.clone_from(&state.current);
                        state.best_cost = state.current_cost;
                        trace!(
                            "new best {} at iteration {} (T = {})",
                            state.best_cost,
                            iterations,
                            state.temperature
                        );
                        if config.record_history {
                            cost_history.push(state.best_cost);
                        }
                    }
                }

                iterations += 1;
            }

            // Cool down
            let next = config.cooling.next(state.temperature);
            if !next.is_finite() || next >= state.temperature {
                return Err(TspError::NumericInstability(format!(
                    "temperature stopped decreasing at {} (next {})",
                    state.temperature, next
                )));
            }
            state.temperature = next;
            temperature_steps += 1;
        }

        if stop_reason != StopReason::Frozen {
            warn!(
                "annealing stopped early ({:?}) at T = {} after {} iterations",
                stop_reason, state.temperature, iterations
            );
        }

        // Re-derive so the reported cost is exact even after incremental updates.
        let best_cost = cyclic_cost(&state.best, matrix);

        debug!(
            "annealing finished: best {} after {} iterations ({} accepted, {} improving)",
            best_cost, iterations, accepted_moves, improving_moves
        );

        Ok(AnnealResult {
            best_tour: Tour::from_trusted(state.best),
            best_cost,
            iterations,
            temperature_steps,
            final_temperature: state.temperature,
            accepted_moves,
            improving_moves,
            stop_reason,
            cost_history,
        })
    }
}

fn ceiling_hit(
    config: &AnnealConfig,
    iterations: usize,
    deadline: Option<Instant>,
    cancel: Option<&AtomicBool>,
) -> Option<StopReason> {
    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Some(StopReason::Cancelled);
    }
    if config.max_iterations > 0 && iterations >= config.max_iterations {
        return Some(StopReason::IterationLimit);
    }
    if deadline.is_some_and(|d| Instant::now() >= d) {
        return Some(StopReason::TimeLimit);
    }
    None
}
