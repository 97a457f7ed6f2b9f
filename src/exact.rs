//! Exhaustive search for small instances.
//!
//! Enumerates every tour starting at location 0 with branch-and-bound
//! pruning on the partial cost. Exponential in N; intended for checking
//! heuristic results on instances of about a dozen locations or fewer.

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::tour::{cyclic_cost, Tour};

/// Returns an optimal tour and its cost.
///
/// Fails with [`TspError::DegenerateInput`] for fewer than two locations.
///
/// # Examples
///
/// ```
/// use tsp_anneal::{exact::brute_force, DistanceMatrix};
///
/// let m = DistanceMatrix::from_rows(&[
///     [0.0, 10.0, 5.0, 8.0],
///     [10.0, 0.0, 9.0, 6.0],
///     [5.0, 9.0, 0.0, 9.0],
///     [8.0, 6.0, 9.0, 0.0],
/// ])
/// .unwrap();
/// let (_, cost) = brute_force(&m).unwrap();
/// assert_eq!(cost, 28.0);
/// ```
pub fn brute_force(matrix: &DistanceMatrix) -> Result<(Tour, f64)> {
    let n = matrix.len();
    if n < 2 {
        return Err(TspError::DegenerateInput { locations: n });
    }

    let mut search = Search {
        matrix,
        path: Vec::with_capacity(n),
        used: vec![false; n],
        best: (0..n).collect(),
        best_cost: f64::INFINITY,
    };
    search.path.push(0);
    search.used[0] = true;
    search.extend(0.0);

    let best_cost = cyclic_cost(&search.best, matrix);
    Ok((Tour::from_trusted(search.best), best_cost))
}

struct Search<'a> {
    matrix: &'a DistanceMatrix,
    path: Vec<usize>,
    used: Vec<bool>,
    best: Vec<usize>,
    best_cost: f64,
}

impl Search<'_> {
    fn extend(&mut self, partial: f64) {
        // Costs are non-negative, so a prefix this expensive cannot win.
        if partial >= self.best_cost {
            return;
        }
        let n = self.used.len();
        let last = self.path[self.path.len() - 1];

        if self.path.len() == n {
            let total = partial + self.matrix.get(last, self.path[0]);
            if total < self.best_cost {
                self.best_cost = total;
                self.best.clone_from(&self.path);
            }
            return;
        }

        for next in 1..n {
            if self.used[next] {
                continue;
            }
            self.used[next] = true;
            self.path.push(next);
            self.extend(partial + self.matrix.get(last, next));
            self.path.pop();
            self.used[next] = false;
        }
    }
}
