//! Strength sequence correction and rank-based reordering.

use crate::{
    error::{Result, SurrogateError},
    matrix::SquareMatrix,
};

/// Repetitions used by the surrogate models when rescaling strengths.
pub const DEFAULT_STRENGTH_ITERATIONS: usize = 9;

/// Places the sorted `values` at the ranks of `scaffold`.
///
/// The output holds exactly the values of `values`; the element at position
/// `k` is the `r`-th smallest value, where `r` is the rank of `scaffold[k]`.
/// Ties in the scaffold keep their input order.
///
/// # Errors
/// Returns [`SurrogateError::InvalidParameters`] when the lengths differ.
///
/// # Examples
/// ```
/// use geosurr_core::rank_reorder;
///
/// let out = rank_reorder(&[10.0, 30.0, 20.0], &[0.3, 0.1, 0.2])?;
/// assert_eq!(out, vec![30.0, 10.0, 20.0]);
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
pub fn rank_reorder(values: &[f64], scaffold: &[f64]) -> Result<Vec<f64>> {
    if values.len() != scaffold.len() {
        return Err(SurrogateError::InvalidParameters {
            reason: format!(
                "rank_reorder needs equal lengths (values {}, scaffold {})",
                values.len(),
                scaffold.len()
            ),
        });
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut by_rank: Vec<usize> = (0..scaffold.len()).collect();
    by_rank.sort_by(|&left, &right| scaffold[left].total_cmp(&scaffold[right]));

    let mut out = vec![0.0; values.len()];
    for (value, position) in sorted.into_iter().zip(by_rank) {
        out[position] = value;
    }
    Ok(out)
}

/// Rescales `matrix` so its strength sequence converges to `target`.
///
/// Columns are scaled by `target[j] / strength[j]`, columns of nodes that
/// start disconnected are held at zero, and after each of the `iterations`
/// repetitions the matrix is symmetrized by averaging with its transpose.
/// With zero iterations only the initial column scaling is applied and the
/// result is generally not symmetric.
///
/// # Errors
/// Returns [`SurrogateError::InvalidParameters`] when `target` does not have
/// one entry per node.
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, strength_correct};
///
/// let matrix = SquareMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 1.0],
///     vec![1.0, 0.0, 1.0],
///     vec![1.0, 1.0, 0.0],
/// ])?;
/// let corrected = strength_correct(&matrix, &[4.0, 4.0, 4.0], 9)?;
/// for strength in corrected.strengths() {
///     assert!((strength - 4.0).abs() < 1e-9);
/// }
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
pub fn strength_correct(
    matrix: &SquareMatrix,
    target: &[f64],
    iterations: usize,
) -> Result<SquareMatrix> {
    let order = matrix.order();
    if target.len() != order {
        return Err(SurrogateError::InvalidParameters {
            reason: format!(
                "target strength sequence has {} entries for {order} nodes",
                target.len()
            ),
        });
    }
    let disconnected: Vec<bool> = matrix
        .strengths()
        .iter()
        .map(|strength| *strength == 0.0)
        .collect();

    let mut corrected = matrix.clone();
    scale_columns(&mut corrected, target, &disconnected);
    for _ in 0..iterations {
        scale_columns(&mut corrected, target, &disconnected);
        corrected.symmetrize();
    }
    Ok(corrected)
}

fn scale_columns(matrix: &mut SquareMatrix, target: &[f64], disconnected: &[bool]) {
    let factors: Vec<f64> = matrix
        .strengths()
        .iter()
        .zip(target)
        .zip(disconnected)
        .map(|((strength, goal), skip)| {
            if *skip || *strength == 0.0 {
                0.0
            } else {
                goal / strength
            }
        })
        .collect();
    let order = matrix.order().max(1);
    for row in matrix.values_mut().chunks_exact_mut(order) {
        for (value, factor) in row.iter_mut().zip(&factors) {
            *value *= factor;
        }
    }
}
