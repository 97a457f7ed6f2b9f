//! Neighbor moves and the policies that propose them.
//!
//! A policy looks at the current tour and proposes a [`NeighborMove`]. The
//! runner either applies the move to a scratch copy and recomputes the cost,
//! or asks the move for its O(1) cost delta; the current tour itself is only
//! touched once the move is accepted.

use crate::matrix::DistanceMatrix;
use crate::tour::{insertion_delta, reversal_delta, swap_delta};
use rand::Rng;

/// A local perturbation of a tour.
pub trait NeighborMove {
    /// Applies the move in place. The result must remain a permutation.
    fn apply(&self, tour: &mut [usize]);

    /// Cost change the move would cause on `tour`, if it can be computed
    /// without applying it. `None` makes the runner recompute the full cost.
    fn delta(&self, _tour: &[usize], _matrix: &DistanceMatrix) -> Option<f64> {
        None
    }
}

/// Generates candidate moves from the current tour.
///
/// Implementors decide which neighborhood the search explores; the
/// annealing loop is independent of the choice.
pub trait NeighborPolicy: Send + Sync {
    /// The move type this policy proposes.
    type Move: NeighborMove;

    /// Proposes a move on `tour`. Only called with `tour.len() >= 2`.
    fn propose<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Self::Move;

    /// Returns a perturbed copy of `tour`, leaving `tour` untouched.
    fn generate<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Vec<usize> {
        let mv = self.propose(tour, rng);
        let mut candidate = tour.to_vec();
        mv.apply(&mut candidate);
        candidate
    }
}

/// The built-in moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the locations at two positions.
    Swap { i: usize, j: usize },
    /// Reverse the segment `i..=j` (2-opt).
    Reverse { i: usize, j: usize },
    /// Move the location at `from` to position `to` (or-opt of length 1).
    Insert { from: usize, to: usize },
}

impl NeighborMove for Move {
    fn apply(&self, tour: &mut [usize]) {
        match *self {
            Move::Swap { i, j } => {
                if i != j {
                    tour.swap(i, j);
                }
            }
            Move::Reverse { i, j } => {
                let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
                if lo != hi {
                    tour[lo..=hi].reverse();
                }
            }
            Move::Insert { from, to } => {
                if from < to {
                    tour[from..=to].rotate_left(1);
                } else if to < from {
                    tour[to..=from].rotate_right(1);
                }
            }
        }
    }

    fn delta(&self, tour: &[usize], matrix: &DistanceMatrix) -> Option<f64> {
        match *self {
            Move::Swap { i, j } => Some(swap_delta(tour, i, j, matrix)),
            Move::Reverse { i, j } => reversal_delta(tour, i, j, matrix),
            Move::Insert { from, to } => Some(insertion_delta(tour, from, to, matrix)),
        }
    }
}

/// Two distinct positions drawn uniformly.
fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}

/// Uniformly picks two distinct positions and swaps their occupants.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapNeighbor;

impl NeighborPolicy for SwapNeighbor {
    type Move = Move;

    fn propose<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Move {
        let (i, j) = distinct_pair(tour.len(), rng);
        Move::Swap { i, j }
    }
}

/// Reverses the segment between two distinct positions (2-opt).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalNeighbor;

impl NeighborPolicy for ReversalNeighbor {
    type Move = Move;

    fn propose<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Move {
        let (a, b) = distinct_pair(tour.len(), rng);
        Move::Reverse {
            i: a.min(b),
            j: a.max(b),
        }
    }
}

/// Removes one location and reinserts it at another position.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionNeighbor;

impl NeighborPolicy for InsertionNeighbor {
    type Move = Move;

    fn propose<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Move {
        let (from, to) = distinct_pair(tour.len(), rng);
        Move::Insert { from, to }
    }
}

/// Runtime selector over the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Neighborhood {
    #[default]
    Swap,
    Reversal,
    Insertion,
}

impl NeighborPolicy for Neighborhood {
    type Move = Move;

    fn propose<R: Rng + ?Sized>(&self, tour: &[usize], rng: &mut R) -> Move {
        match self {
            Neighborhood::Swap => SwapNeighbor.propose(tour, rng),
            Neighborhood::Reversal => ReversalNeighbor.propose(tour, rng),
            Neighborhood::Insertion => InsertionNeighbor.propose(tour, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tour::{cyclic_cost, validate_permutation};

    fn ring(n: usize) -> DistanceMatrix {
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let d = i.abs_diff(j);
                        d.min(n - d) as f64
                    })
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_distinct_pair_never_equal() {
        let mut rng = create_rng(1);
        for n in 2..10 {
            for _ in 0..200 {
                let (i, j) = distinct_pair(n, &mut rng);
                assert_ne!(i, j);
                assert!(i < n && j < n);
            }
        }
    }

    #[test]
    fn test_generate_leaves_input_untouched() {
        let mut rng = create_rng(3);
        let tour: Vec<usize> = (0..8).collect();
        for policy in [
            Neighborhood::Swap,
            Neighborhood::Reversal,
            Neighborhood::Insertion,
        ] {
            let candidate = policy.generate(&tour, &mut rng);
            assert_eq!(tour, (0..8).collect::<Vec<_>>());
            assert_ne!(candidate, tour, "{policy:?} produced no change");
            assert!(validate_permutation(&candidate).is_ok());
        }
    }

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(9);
        let tour: Vec<usize> = (0..10).collect();
        for _ in 0..50 {
            let candidate = SwapNeighbor.generate(&tour, &mut rng);
            let diffs = tour.iter().zip(&candidate).filter(|(a, b)| a != b).count();
            assert_eq!(diffs, 2);
        }
    }

    #[test]
    fn test_move_delta_agrees_with_apply() {
        let m = ring(9);
        let mut rng = create_rng(21);
        let tour = crate::tour::Tour::random(9, &mut rng).into_inner();
        let base = cyclic_cost(&tour, &m);
        for policy in [
            Neighborhood::Swap,
            Neighborhood::Reversal,
            Neighborhood::Insertion,
        ] {
            for _ in 0..100 {
                let mv = policy.propose(&tour, &mut rng);
                let mut moved = tour.clone();
                mv.apply(&mut moved);
                let delta = mv.delta(&tour, &m).unwrap();
                assert!((cyclic_cost(&moved, &m) - base - delta).abs() < 1e-9, "{mv:?}");
            }
        }
    }

    #[test]
    fn test_single_location_is_noop() {
        let mut rng = create_rng(0);
        let tour = vec![0];
        for policy in [
            Neighborhood::Swap,
            Neighborhood::Reversal,
            Neighborhood::Insertion,
        ] {
            assert_eq!(policy.generate(&tour, &mut rng), vec![0]);
        }
    }
}
