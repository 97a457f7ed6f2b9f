//! Tours and their cyclic cost.
//!
//! A tour is a permutation of `0..N` read as a cycle: the successor of the
//! last location is the first. [`total_cost`] validates its inputs and is
//! meant for entry points; [`cyclic_cost`] skips validation and is what the
//! search loop calls. The delta helpers compute the cost change of a local
//! move in O(1) without materializing the moved tour.

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;

/// A validated visiting order over all locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wraps `order` after checking it is a permutation of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Result<Self> {
        validate_permutation(&order)?;
        Ok(Self(order))
    }

    /// Wraps an order the caller already knows to be a permutation.
    pub(crate) fn from_trusted(order: Vec<usize>) -> Self {
        debug_assert!(validate_permutation(&order).is_ok());
        Self(order)
    }

    /// `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self(order)
    }

    /// Number of locations visited.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tour is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Unwraps the visiting order.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Cyclic cost of this tour against `matrix`.
    pub fn cost(&self, matrix: &DistanceMatrix) -> Result<f64> {
        total_cost(&self.0, matrix)
    }

    /// Rotates the cycle so that location 0 comes first.
    ///
    /// The cost is unchanged; useful for comparing tours found from
    /// different random starts.
    pub fn normalized(&self) -> Self {
        let mut order = self.0.clone();
        if let Some(pos) = order.iter().position(|&c| c == 0) {
            order.rotate_left(pos);
        }
        Self(order)
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TspError;

    fn try_from(order: Vec<usize>) -> Result<Self> {
        Self::new(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.0
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

/// Checks that `order` contains every index of `0..order.len()` exactly once.
pub fn validate_permutation(order: &[usize]) -> Result<()> {
    let n = order.len();
    let mut seen = vec![false; n];
    for &city in order {
        if city >= n {
            return Err(TspError::InvalidTour(format!(
                "location {city} out of range for {n} locations"
            )));
        }
        if seen[city] {
            return Err(TspError::InvalidTour(format!("location {city} visited twice")));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Total cyclic cost of `tour`, including the edge from the last location
/// back to the first.
///
/// Fails with [`TspError::DimensionMismatch`] when the tour length differs
/// from the matrix dimension and [`TspError::InvalidTour`] when it is not a
/// permutation.
///
/// # Examples
///
/// ```
/// use tsp_anneal::{tour::total_cost, DistanceMatrix};
///
/// let m = DistanceMatrix::from_rows(&[
///     [0.0, 10.0, 5.0, 8.0],
///     [10.0, 0.0, 9.0, 6.0],
///     [5.0, 9.0, 0.0, 9.0],
///     [8.0, 6.0, 9.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(total_cost(&[0, 2, 1, 3], &m).unwrap(), 28.0);
/// ```
pub fn total_cost(tour: &[usize], matrix: &DistanceMatrix) -> Result<f64> {
    if tour.len() != matrix.len() {
        return Err(TspError::DimensionMismatch {
            expected: matrix.len(),
            actual: tour.len(),
        });
    }
    validate_permutation(tour)?;
    Ok(cyclic_cost(tour, matrix))
}

/// Unchecked cyclic cost. Callers guarantee `tour` is a permutation sized
/// to `matrix`.
#[inline]
pub fn cyclic_cost(tour: &[usize], matrix: &DistanceMatrix) -> f64 {
    let Some(&last) = tour.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut total = 0.0;
    for &city in tour {
        total += matrix.get(prev, city);
        prev = city;
    }
    total
}

/// Cost change from swapping the occupants of positions `i` and `j`.
///
/// Valid for asymmetric matrices. Returns `0.0` when `i == j`.
pub fn swap_delta(tour: &[usize], i: usize, j: usize, matrix: &DistanceMatrix) -> f64 {
    let n = tour.len();
    if i == j || n < 2 {
        return 0.0;
    }

    // Edge k joins position k-1 to position k. A swap touches at most the
    // edges entering and leaving i and j.
    let mut edges = [i, (i + 1) % n, j, (j + 1) % n];
    edges.sort_unstable();
    let moved = |pos: usize| -> usize {
        if pos == i {
            tour[j]
        } else if pos == j {
            tour[i]
        } else {
            tour[pos]
        }
    };

    let mut delta = 0.0;
    let mut last = usize::MAX;
    for &k in &edges {
        if k == last {
            continue;
        }
        last = k;
        let p = (k + n - 1) % n;
        delta += matrix.get(moved(p), moved(k)) - matrix.get(tour[p], tour[k]);
    }
    delta
}

/// Cost change from reversing the segment `tour[i..=j]` (2-opt).
///
/// Returns `None` for asymmetric matrices, where reversing a segment also
/// changes the cost of every interior edge.
pub fn reversal_delta(tour: &[usize], i: usize, j: usize, matrix: &DistanceMatrix) -> Option<f64> {
    if !matrix.is_symmetric() {
        return None;
    }
    let n = tour.len();
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    if j - i + 1 >= n || i == j {
        return Some(0.0);
    }

    let before = tour[(i + n - 1) % n];
    let after = tour[(j + 1) % n];
    let first = tour[i];
    let last = tour[j];
    Some(
        matrix.get(before, last) + matrix.get(first, after)
            - matrix.get(before, first)
            - matrix.get(last, after),
    )
}

/// Cost change from moving the location at position `from` so that it ends
/// up at position `to`, shifting the locations in between by one.
///
/// Valid for asymmetric matrices.
pub fn insertion_delta(tour: &[usize], from: usize, to: usize, matrix: &DistanceMatrix) -> f64 {
    let n = tour.len();
    if from == to || n < 3 {
        return 0.0;
    }

    let x = tour[from];
    let a = tour[(from + n - 1) % n];
    let b = tour[(from + 1) % n];

    // (p, q) is the edge of the cycle without x that x is spliced into.
    let (p, q) = if from < to {
        if (to + 1) % n == from {
            return 0.0;
        }
        (tour[to], tour[(to + 1) % n])
    } else {
        if (to + n - 1) % n == from {
            return 0.0;
        }
        (tour[(to + n - 1) % n], tour[to])
    };

    matrix.get(a, b) - matrix.get(a, x) - matrix.get(x, b) + matrix.get(p, x) + matrix.get(x, q)
        - matrix.get(p, q)
}
