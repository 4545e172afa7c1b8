//! Input validation run before any working copy is created.

use crate::{
    error::{MatrixRole, Result, SurrogateError},
    matrix::SquareMatrix,
};

/// Symmetry tolerance used when callers do not configure one.
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Checks a weight matrix on its own: finite, symmetric, zero diagonal.
///
/// # Errors
/// Returns [`SurrogateError::NonFinite`], [`SurrogateError::Asymmetric`] or
/// [`SurrogateError::SelfLoop`].
pub fn validate_weights(weights: &SquareMatrix, tolerance: f64) -> Result<()> {
    check_finite(weights, MatrixRole::Weights)?;
    check_symmetric(weights, MatrixRole::Weights, tolerance)?;
    for node in 0..weights.order() {
        let weight = weights.at(node, node);
        if weight != 0.0 {
            return Err(SurrogateError::SelfLoop { node, weight });
        }
    }
    Ok(())
}

/// Checks a weight/distance pair: shapes first, then each matrix.
///
/// The distance diagonal is not inspected; only off-diagonal distances take
/// part in rewiring.
///
/// # Errors
/// Returns [`SurrogateError::ShapeMismatch`] when the orders differ, any
/// error of [`validate_weights`], and [`SurrogateError::NonFinite`],
/// [`SurrogateError::Asymmetric`] or [`SurrogateError::NegativeDistance`] for
/// the distances.
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, SurrogateError, validate_inputs};
///
/// let weights = SquareMatrix::zeros(3);
/// let distances = SquareMatrix::zeros(2);
/// let err = validate_inputs(&weights, &distances, 1e-8).unwrap_err();
/// assert!(matches!(err, SurrogateError::ShapeMismatch { weights: 3, distances: 2 }));
/// ```
pub fn validate_inputs(
    weights: &SquareMatrix,
    distances: &SquareMatrix,
    tolerance: f64,
) -> Result<()> {
    validate_pair(weights, distances, tolerance, MissingDistances::Reject)
}

/// Like [`validate_inputs`], but a NaN distance marks a missing pair
/// instead of an error.
///
/// A pair is missing when either half is NaN; missing pairs are skipped by
/// the symmetry and sign checks. Infinite distances are still rejected.
///
/// # Errors
/// Returns the errors of [`validate_inputs`], except
/// [`SurrogateError::NonFinite`] is raised for distances only when an entry
/// is infinite.
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, validate_inputs, validate_inputs_allowing_missing};
///
/// let weights = SquareMatrix::try_from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]])?;
/// let distances = SquareMatrix::try_from_rows(vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]])?;
/// assert!(validate_inputs(&weights, &distances, 1e-8).is_err());
/// validate_inputs_allowing_missing(&weights, &distances, 1e-8)?;
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
pub fn validate_inputs_allowing_missing(
    weights: &SquareMatrix,
    distances: &SquareMatrix,
    tolerance: f64,
) -> Result<()> {
    validate_pair(weights, distances, tolerance, MissingDistances::Allow)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MissingDistances {
    Reject,
    Allow,
}

fn validate_pair(
    weights: &SquareMatrix,
    distances: &SquareMatrix,
    tolerance: f64,
    missing: MissingDistances,
) -> Result<()> {
    if weights.order() != distances.order() {
        return Err(SurrogateError::ShapeMismatch {
            weights: weights.order(),
            distances: distances.order(),
        });
    }
    validate_weights(weights, tolerance)?;
    match missing {
        MissingDistances::Reject => {
            check_finite(distances, MatrixRole::Distances)?;
            check_symmetric(distances, MatrixRole::Distances, tolerance)?;
        }
        MissingDistances::Allow => {
            check_no_infinite(distances)?;
            check_present_symmetric(distances, tolerance)?;
        }
    }
    for row in 0..distances.order() {
        for column in (row + 1)..distances.order() {
            let distance = distances.at(row, column);
            if distance < 0.0 {
                return Err(SurrogateError::NegativeDistance {
                    row,
                    column,
                    distance,
                });
            }
        }
    }
    Ok(())
}

fn check_finite(matrix: &SquareMatrix, role: MatrixRole) -> Result<()> {
    let order = matrix.order();
    match matrix.as_slice().iter().position(|value| !value.is_finite()) {
        Some(index) => Err(SurrogateError::NonFinite {
            matrix: role,
            row: index / order,
            column: index % order,
        }),
        None => Ok(()),
    }
}

fn check_no_infinite(distances: &SquareMatrix) -> Result<()> {
    let order = distances.order();
    match distances
        .as_slice()
        .iter()
        .position(|value| value.is_infinite())
    {
        Some(index) => Err(SurrogateError::NonFinite {
            matrix: MatrixRole::Distances,
            row: index / order,
            column: index % order,
        }),
        None => Ok(()),
    }
}

/// Symmetry over the pairs where both halves are present.
fn check_present_symmetric(distances: &SquareMatrix, tolerance: f64) -> Result<()> {
    let mut worst: Option<(usize, usize, f64)> = None;
    for row in 0..distances.order() {
        for column in (row + 1)..distances.order() {
            let upper = distances.at(row, column);
            let lower = distances.at(column, row);
            if upper.is_nan() || lower.is_nan() {
                continue;
            }
            let difference = (upper - lower).abs();
            if worst.is_none_or(|(_, _, current)| difference > current) {
                worst = Some((row, column, difference));
            }
        }
    }
    match worst {
        Some((row, column, difference)) if difference > tolerance => {
            Err(SurrogateError::Asymmetric {
                matrix: MatrixRole::Distances,
                row,
                column,
                difference,
                tolerance,
            })
        }
        _ => Ok(()),
    }
}

fn check_symmetric(matrix: &SquareMatrix, role: MatrixRole, tolerance: f64) -> Result<()> {
    match matrix.max_asymmetry() {
        Some((row, column, difference)) if difference > tolerance => {
            Err(SurrogateError::Asymmetric {
                matrix: role,
                row,
                column,
                difference,
                tolerance,
            })
        }
        _ => Ok(()),
    }
}
