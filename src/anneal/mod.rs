//! Simulated annealing for the TSP.
//!
//! A single-solution trajectory search. Worsening moves are accepted with
//! probability `exp(-Δ/T)` (Metropolis criterion), which shrinks as the
//! temperature cools, letting the search leave local optima early and
//! settle late.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod multistart;
mod neighbor;
mod runner;

pub use config::{AnnealConfig, CoolingSchedule, CostMode};
pub use multistart::{MultiStart, MultiStartResult, StartSummary};
pub use neighbor::{
    InsertionNeighbor, Move, NeighborMove, NeighborPolicy, Neighborhood, ReversalNeighbor,
    SwapNeighbor,
};
pub use runner::{AnnealResult, AnnealRunner, StopReason};
