//! Matrix thresholding and normalisation helpers.

use crate::{
    error::{Result, SurrogateError},
    matrix::SquareMatrix,
};

/// Keeps roughly the strongest `density` percent of off-diagonal entries.
///
/// Entries below the `100 - density` percentile of the off-diagonal values
/// (linear interpolation between closest ranks) are set to zero. Both
/// triangles take part, so a symmetric input stays symmetric.
///
/// # Errors
/// Returns [`SurrogateError::InvalidParameters`] when `density` is outside
/// `[0, 100]`.
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, to_density};
///
/// let weights = SquareMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
/// ])?;
/// let sparse = to_density(&weights, 30.0)?;
/// assert_eq!(sparse.get(0, 1), Some(0.0));
/// assert_eq!(sparse.get(0, 2), Some(0.0));
/// assert_eq!(sparse.get(1, 2), Some(3.0));
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
pub fn to_density(weights: &SquareMatrix, density: f64) -> Result<SquareMatrix> {
    if !(0.0..=100.0).contains(&density) {
        return Err(SurrogateError::InvalidParameters {
            reason: format!("density must lie in [0, 100] percent (got {density})"),
        });
    }
    let mut off_diagonal: Vec<f64> = weights
        .rows()
        .enumerate()
        .flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .filter(move |(column, _)| *column != row)
                .map(|(_, value)| *value)
        })
        .collect();
    let Some(threshold) = percentile(&mut off_diagonal, 100.0 - density) else {
        return Ok(weights.clone());
    };

    let mut thresholded = weights.clone();
    for value in thresholded.values_mut() {
        if *value < threshold {
            *value = 0.0;
        }
    }
    Ok(thresholded)
}

/// Min–max normalises `values` onto `[0, 1]`.
///
/// A constant slice maps to zeros.
///
/// # Examples
/// ```
/// use geosurr_core::rescale;
///
/// assert_eq!(rescale(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(rescale(&[7.0, 7.0]), vec![0.0, 0.0]);
/// ```
#[must_use]
pub fn rescale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|value| if span > 0.0 { (value - min) / span } else { 0.0 })
        .collect()
}

/// Linear-interpolated percentile; `None` for an empty slice.
fn percentile(values: &mut [f64], percent: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let position = percent / 100.0 * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}
