//! Independent restarts reduced to the best result.
//!
//! Each start owns its own search state and random stream; the only
//! coordination is the final minimum-by-cost reduction. With the `parallel`
//! feature the starts run on the rayon thread pool, otherwise sequentially.
//! Both paths return the same result for the same base seed.

use super::config::AnnealConfig;
use super::neighbor::NeighborPolicy;
use super::runner::{AnnealResult, AnnealRunner};
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::random::derive_seeds;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Summary of one start within a multi-start run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartSummary {
    /// Seed the start ran with.
    pub seed: u64,
    /// Best cost it found.
    pub best_cost: f64,
    /// Moves it evaluated.
    pub iterations: usize,
}

/// Result of a multi-start run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiStartResult {
    /// The winning run.
    pub best: AnnealResult,
    /// Index of the winning start.
    pub best_start: usize,
    /// One entry per start, in start order.
    pub starts: Vec<StartSummary>,
}

/// Runs several independent annealing searches and keeps the cheapest.
pub struct MultiStart;

impl MultiStart {
    /// Runs `starts` searches (at least one).
    ///
    /// Start seeds are drawn from a generator seeded with `base`, which is
    /// `config.seed` or a fresh random value.
    pub fn run<N: NeighborPolicy>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        policy: &N,
        starts: usize,
    ) -> Result<MultiStartResult> {
        Self::run_with_cancel(matrix, config, policy, starts, None)
    }

    /// Like [`MultiStart::run`], with a cancellation token shared by all
    /// starts.
    pub fn run_with_cancel<N: NeighborPolicy>(
        matrix: &DistanceMatrix,
        config: &AnnealConfig,
        policy: &N,
        starts: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<MultiStartResult> {
        config.validate()?;
        let starts = starts.max(1);
        let base = config.seed.unwrap_or_else(rand::random);
        let seeds = derive_seeds(base, starts);

        let run_one = |seed: &u64| {
            let cfg = config.clone().with_seed(*seed);
            AnnealRunner::run_with_cancel(matrix, &cfg, policy, cancel.clone())
        };

        #[cfg(feature = "parallel")]
        let mut results: Vec<AnnealResult> =
            seeds.par_iter().map(run_one).collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let mut results: Vec<AnnealResult> = seeds.iter().map(run_one).collect::<Result<_>>()?;

        let summaries: Vec<StartSummary> = seeds
            .iter()
            .zip(&results)
            .map(|(&seed, r)| StartSummary {
                seed,
                best_cost: r.best_cost,
                iterations: r.iterations,
            })
            .collect();

        // Ties go to the lowest start index.
        let mut best_start = 0;
        for (i, r) in results.iter().enumerate().skip(1) {
            if r.best_cost < results[best_start].best_cost {
                best_start = i;
            }
        }

        let best = results.swap_remove(best_start);

        debug!(
            "multi-start: {} starts, best {} from start {}",
            starts, best.best_cost, best_start
        );

        Ok(MultiStartResult {
            best,
            best_start,
            starts: summaries,
        })
    }
}
