//! Simulated annealing for the Traveling Salesman Problem.
//!
//! Given a dense cost matrix over N locations, searches for a low-cost
//! cycle visiting every location once:
//!
//! - [`tour`]: tours as validated permutations, their cyclic cost, and O(1)
//!   cost deltas for local moves.
//! - [`anneal`]: the annealing loop with pluggable cooling schedules and
//!   neighbor policies, plus independent multi-start composition.
//! - [`exact`]: exhaustive search for checking small instances.
//!
//! The crate is a pure computational routine: no I/O, no global state.
//! Matrix parsing and result presentation belong to the caller.
//!
//! # Example
//!
//! ```
//! use tsp_anneal::anneal::{AnnealConfig, AnnealRunner, ReversalNeighbor};
//! use tsp_anneal::DistanceMatrix;
//!
//! let m = DistanceMatrix::from_rows(&[
//!     [0.0, 10.0, 5.0, 8.0],
//!     [10.0, 0.0, 9.0, 6.0],
//!     [5.0, 9.0, 0.0, 9.0],
//!     [8.0, 6.0, 9.0, 0.0],
//! ])?;
//! let config = AnnealConfig::default().with_seed(7);
//! let result = AnnealRunner::run(&m, &config, &ReversalNeighbor)?;
//! assert_eq!(result.best_tour.len(), 4);
//! # Ok::<(), tsp_anneal::TspError>(())
//! ```

pub mod anneal;
pub mod error;
pub mod exact;
pub mod matrix;
pub mod random;
pub mod tour;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, TspError};
pub use matrix::DistanceMatrix;
pub use tour::Tour;
