//! Dense pairwise cost matrix.

use crate::error::{Result, TspError};

/// An N×N table of non-negative, finite travel costs stored row-major.
///
/// Construction validates the shape and the entries once, so the search
/// loop can index without further checks. Symmetry is recorded but not
/// required; some incremental cost shortcuts are only available when the
/// matrix is symmetric.
///
/// # Examples
///
/// ```
/// use tsp_anneal::DistanceMatrix;
///
/// let m = DistanceMatrix::from_rows(&[
///     [0.0, 10.0, 5.0],
///     [10.0, 0.0, 9.0],
///     [5.0, 9.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.get(0, 2), 5.0);
/// assert!(m.is_symmetric());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// Fails with [`TspError::DimensionMismatch`] when any row length
    /// differs from the row count, and with [`TspError::NumericInstability`]
    /// when an entry is negative, NaN, or infinite.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(TspError::DimensionMismatch {
                    expected: n,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_flat(n, data)
    }

    /// Builds a matrix from a row-major buffer of `n * n` entries.
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != n * n {
            return Err(TspError::DimensionMismatch {
                expected: n * n,
                actual: data.len(),
            });
        }
        if let Some(pos) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(TspError::NumericInstability(format!(
                "entry ({}, {}) = {} is not a finite non-negative cost",
                pos / n,
                pos % n,
                data[pos]
            )));
        }

        let symmetric = (0..n).all(|i| ((i + 1)..n).all(|j| data[i * n + j] == data[j * n + i]));

        Ok(Self { n, data, symmetric })
    }

    /// Number of locations.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no locations at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        debug_assert!(from < self.n && to < self.n);
        self.data[from * self.n + to]
    }

    /// Whether `get(i, j) == get(j, i)` for every pair.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }
}
