//! Error type shared by the evaluator and the search.

use thiserror::Error;

/// Failures surfaced by tour evaluation and annealing.
///
/// Every variant is detected before the search loop starts, except
/// [`TspError::NumericInstability`], which can also abort a running search
/// when a cost or acceptance probability stops being finite.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// Input shapes disagree (ragged matrix, or tour length differs from
    /// the matrix dimension).
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension required by the other input.
        expected: usize,
        /// Dimension actually supplied.
        actual: usize,
    },

    /// The sequence is not a permutation of `0..N`.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// Fewer than two locations; no cycle to optimize.
    #[error("degenerate input: {locations} location(s), at least 2 required")]
    DegenerateInput {
        /// Number of locations supplied.
        locations: usize,
    },

    /// A temperature, cost, or probability is NaN/infinite, or the cooling
    /// schedule would never reach its minimum temperature.
    #[error("numeric instability: {0}")]
    NumericInstability(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
