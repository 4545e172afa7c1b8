//! Dense square matrix storage shared by weight and distance inputs.
//!
//! [`SquareMatrix`] stores values row-major in one contiguous buffer. Public
//! construction validates the shape; in-crate mutation only goes through
//! [`SquareMatrix::set_pair`] so symmetric matrices stay symmetric after
//! every write.

use crate::error::{Result, SurrogateError};

/// Owned `n × n` matrix of `f64` values.
///
/// # Examples
/// ```
/// use geosurr_core::SquareMatrix;
///
/// let matrix = SquareMatrix::try_from_rows(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ])?;
/// assert_eq!(matrix.order(), 2);
/// assert_eq!(matrix.get(0, 1), Some(2.0));
/// assert_eq!(matrix.edge_count(), 1);
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix {
    order: usize,
    values: Vec<f64>,
}

impl SquareMatrix {
    /// Creates an all-zero matrix of the given order.
    #[must_use]
    pub fn zeros(order: usize) -> Self {
        Self {
            order,
            values: vec![0.0; order * order],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    /// Returns [`SurrogateError::NotSquare`] when any row length differs from
    /// the number of rows.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let order = rows.len();
        let mut values = Vec::with_capacity(order * order);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != order {
                return Err(SurrogateError::NotSquare {
                    row,
                    rows: order,
                    columns: entries.len(),
                });
            }
            values.extend(entries);
        }
        Ok(Self { order, values })
    }

    /// Builds a matrix from a row-major buffer.
    ///
    /// # Errors
    /// Returns [`SurrogateError::NotSquare`] when `values.len()` is not
    /// `order * order`.
    pub fn from_row_major(order: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != order * order {
            let columns = if order == 0 {
                values.len()
            } else {
                values.len() / order
            };
            return Err(SurrogateError::NotSquare {
                row: 0,
                rows: order,
                columns,
            });
        }
        Ok(Self { order, values })
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> usize { self.order }

    /// Returns `true` when the matrix has no rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.order == 0 }

    /// Returns the entry at `(row, column)` if it is in bounds.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.order || column >= self.order {
            return None;
        }
        self.values.get(row * self.order + column).copied()
    }

    /// Returns the row-major backing buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the matrix and returns its row-major buffer.
    #[must_use]
    pub fn into_row_major(self) -> Vec<f64> {
        self.values
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // `chunks_exact(0)` panics, and an empty matrix has no rows anyway.
        self.values.chunks_exact(self.order.max(1))
    }

    /// Copies the matrix into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Number of unordered off-diagonal node pairs, `n (n - 1) / 2`.
    #[must_use]
    pub fn pair_capacity(&self) -> usize {
        self.order * self.order.saturating_sub(1) / 2
    }

    /// Upper-triangle pairs `(i, j)`, `i < j`, holding a non-zero value, in
    /// row-major order.
    #[must_use]
    pub fn upper_nonzero_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (row, entries) in self.rows().enumerate() {
            for (column, value) in entries.iter().enumerate().skip(row + 1) {
                if *value != 0.0 {
                    pairs.push((row, column));
                }
            }
        }
        pairs
    }

    /// Number of non-zero upper-triangle entries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rows()
            .enumerate()
            .map(|(row, entries)| {
                entries
                    .iter()
                    .skip(row + 1)
                    .filter(|value| **value != 0.0)
                    .count()
            })
            .sum()
    }

    /// Sorted non-zero upper-triangle values: the weight multiset of a
    /// symmetric matrix.
    #[must_use]
    pub fn weight_multiset(&self) -> Vec<f64> {
        let mut weights: Vec<f64> = self
            .upper_nonzero_pairs()
            .into_iter()
            .map(|(row, column)| self.at(row, column))
            .collect();
        weights.sort_by(f64::total_cmp);
        weights
    }

    /// Column sums, which equal node strengths for a symmetric matrix.
    #[must_use]
    pub fn strengths(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.order];
        for entries in self.rows() {
            for (sum, value) in sums.iter_mut().zip(entries) {
                *sum += value;
            }
        }
        sums
    }

    /// Number of non-zero off-diagonal entries per row.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.rows()
            .enumerate()
            .map(|(row, entries)| {
                entries
                    .iter()
                    .enumerate()
                    .filter(|(column, value)| *column != row && **value != 0.0)
                    .count()
            })
            .collect()
    }

    /// Largest absolute difference between mirrored entries together with
    /// its upper-triangle position, or `None` for matrices of order < 2.
    #[must_use]
    pub fn max_asymmetry(&self) -> Option<(usize, usize, f64)> {
        let mut worst: Option<(usize, usize, f64)> = None;
        for row in 0..self.order {
            for column in (row + 1)..self.order {
                let difference = (self.at(row, column) - self.at(column, row)).abs();
                if worst.is_none_or(|(_, _, current)| difference > current) {
                    worst = Some((row, column, difference));
                }
            }
        }
        worst
    }

    /// Returns `true` when every mirrored pair differs by at most `tolerance`.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.max_asymmetry()
            .is_none_or(|(_, _, difference)| difference <= tolerance)
    }

    /// Unchecked read for indices already validated against `order`.
    pub(crate) fn at(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.order + column]
    }

    /// Writes `value` to `(row, column)` and `(column, row)` together.
    pub(crate) fn set_pair(&mut self, row: usize, column: usize, value: f64) {
        let order = self.order;
        self.values[row * order + column] = value;
        self.values[column * order + row] = value;
    }

    /// Replaces each mirrored pair with its mean.
    pub(crate) fn symmetrize(&mut self) {
        for row in 0..self.order {
            for column in (row + 1)..self.order {
                let mean = (self.at(row, column) + self.at(column, row)) / 2.0;
                self.set_pair(row, column, mean);
            }
        }
    }

    /// Mutable row-major access for whole-matrix numeric transforms.
    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}
