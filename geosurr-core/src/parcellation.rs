//! Rank correlation between two connectivity matrices, block by block over
//! the major brain divisions.
//!
//! Matrices are hemisphere-symmetric: the first half of the nodes covers one
//! hemisphere and the second half mirrors it in the same order. Only the
//! first-hemisphere rows are used as sources. Their columns split into
//! ipsilateral targets (first half) and contralateral targets (second half).

use tracing::{debug, instrument};

use crate::{
    error::{MatrixRole, Result, SurrogateError},
    matrix::SquareMatrix,
};

/// The twelve major brain divisions of the Allen mouse brain atlas, in
/// report order.
pub const BRAIN_DIVISIONS: [&str; 12] = [
    "Isocortex", "OLF", "HPF", "CTXsp", "STR", "PAL", "TH", "HY", "MB", "P", "MY", "CB",
];

/// Spearman correlations between every pair of divisions present in a
/// parcellation.
///
/// A block is `None` when it holds fewer than two samples or either matrix
/// is constant over it.
#[derive(Clone, Debug, PartialEq)]
pub struct DivisionCorrelation {
    divisions: Vec<&'static str>,
    ipsilateral: Vec<Option<f64>>,
    contralateral: Vec<Option<f64>>,
}

impl DivisionCorrelation {
    /// Divisions present in the parcellation, in [`BRAIN_DIVISIONS`] order.
    #[must_use]
    pub fn divisions(&self) -> &[&'static str] {
        &self.divisions
    }

    /// Correlation over connections from `source` to `target` within a
    /// hemisphere. Indices refer to [`DivisionCorrelation::divisions`].
    #[must_use]
    pub fn ipsilateral(&self, source: usize, target: usize) -> Option<f64> {
        self.block(&self.ipsilateral, source, target)
    }

    /// Correlation over connections from `source` to `target` across
    /// hemispheres.
    #[must_use]
    pub fn contralateral(&self, source: usize, target: usize) -> Option<f64> {
        self.block(&self.contralateral, source, target)
    }

    /// Column labels of [`DivisionCorrelation::to_rows`]: each division with
    /// an `-I` suffix, then each with a `-C` suffix.
    #[must_use]
    pub fn column_labels(&self) -> Vec<String> {
        let ipsi = self.divisions.iter().map(|name| format!("{name}-I"));
        let contra = self.divisions.iter().map(|name| format!("{name}-C"));
        ipsi.chain(contra).collect()
    }

    /// One row per source division: ipsilateral blocks followed by
    /// contralateral blocks, with NaN for undefined blocks.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let count = self.divisions.len();
        (0..count)
            .map(|source| {
                let ipsi = (0..count).map(|target| self.ipsilateral(source, target));
                let contra = (0..count).map(|target| self.contralateral(source, target));
                ipsi.chain(contra)
                    .map(|value| value.unwrap_or(f64::NAN))
                    .collect()
            })
            .collect()
    }

    fn block(&self, values: &[Option<f64>], source: usize, target: usize) -> Option<f64> {
        let count = self.divisions.len();
        if source >= count || target >= count {
            return None;
        }
        values[source * count + target]
    }
}

/// Checks that every label names one of the [`BRAIN_DIVISIONS`].
///
/// # Errors
/// Returns [`SurrogateError::UnknownDivision`] for the first unknown label.
pub fn check_parcellation<S: AsRef<str>>(divisions: &[S]) -> Result<()> {
    match divisions
        .iter()
        .position(|label| division_index(label.as_ref()).is_none())
    {
        Some(node) => Err(SurrogateError::UnknownDivision {
            node,
            label: divisions[node].as_ref().to_owned(),
        }),
        None => Ok(()),
    }
}

/// Correlates `first` and `second` block by block over brain divisions.
///
/// `divisions` labels each node of one hemisphere, so both matrices must have
/// order `2 * divisions.len()`. Entries are paired position by position and
/// ranked with ties sharing their average rank.
///
/// # Errors
/// Returns [`SurrogateError::UnknownDivision`] for an unknown label,
/// [`SurrogateError::DivisionCount`] when a matrix order does not match the
/// labels, and [`SurrogateError::NonFinite`] for a NaN or infinite entry.
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, division_correlation};
///
/// let values: Vec<f64> = (0..16).map(f64::from).collect();
/// let first = SquareMatrix::from_row_major(4, values.clone())?;
/// let second = SquareMatrix::from_row_major(4, values.iter().map(|v| v * v).collect())?;
/// let table = division_correlation(&first, &second, &["OLF", "Isocortex"])?;
/// assert_eq!(table.divisions(), ["Isocortex", "OLF"]);
/// assert_eq!(table.ipsilateral(0, 1), None);
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
#[instrument(
    name = "core.division_correlation",
    err,
    skip(first, second, divisions),
    fields(nodes = first.order(), labels = divisions.len()),
)]
pub fn division_correlation<S: AsRef<str>>(
    first: &SquareMatrix,
    second: &SquareMatrix,
    divisions: &[S],
) -> Result<DivisionCorrelation> {
    check_parcellation(divisions)?;
    let half = divisions.len();
    for matrix in [first, second] {
        if matrix.order() != 2 * half {
            return Err(SurrogateError::DivisionCount {
                divisions: half,
                expected: 2 * half,
                order: matrix.order(),
            });
        }
        check_finite(matrix)?;
    }

    let node_division: Vec<usize> = divisions
        .iter()
        .filter_map(|label| division_index(label.as_ref()))
        .collect();
    let present: Vec<usize> = (0..BRAIN_DIVISIONS.len())
        .filter(|division| node_division.contains(division))
        .collect();
    let members: Vec<Vec<usize>> = present
        .iter()
        .map(|division| {
            (0..half)
                .filter(|&node| node_division[node] == *division)
                .collect()
        })
        .collect();

    let count = present.len();
    let mut ipsilateral = Vec::with_capacity(count * count);
    let mut contralateral = Vec::with_capacity(count * count);
    for sources in &members {
        for targets in &members {
            ipsilateral.push(block_correlation(first, second, sources, targets, 0));
            contralateral.push(block_correlation(first, second, sources, targets, half));
        }
    }
    debug!(divisions = count, "division correlation completed");
    Ok(DivisionCorrelation {
        divisions: present.iter().map(|&division| BRAIN_DIVISIONS[division]).collect(),
        ipsilateral,
        contralateral,
    })
}

/// Spearman rank correlation of two paired samples.
///
/// Ties share the average of the ranks they span. Returns `None` when the
/// lengths differ, fewer than two pairs are given, or either sample is
/// constant.
///
/// # Examples
/// ```
/// use geosurr_core::spearman;
///
/// assert_eq!(spearman(&[1.0, 2.0, 3.0], &[10.0, 40.0, 90.0]), Some(1.0));
/// assert_eq!(spearman(&[1.0, 1.0], &[2.0, 3.0]), None);
/// ```
#[must_use]
pub fn spearman(first: &[f64], second: &[f64]) -> Option<f64> {
    if first.len() != second.len() || first.len() < 2 {
        return None;
    }
    pearson(&average_ranks(first), &average_ranks(second))
}

fn division_index(label: &str) -> Option<usize> {
    BRAIN_DIVISIONS.iter().position(|division| *division == label)
}

fn check_finite(matrix: &SquareMatrix) -> Result<()> {
    let order = matrix.order();
    match matrix.as_slice().iter().position(|value| !value.is_finite()) {
        Some(index) => Err(SurrogateError::NonFinite {
            matrix: MatrixRole::Weights,
            row: index / order,
            column: index % order,
        }),
        None => Ok(()),
    }
}

fn block_correlation(
    first: &SquareMatrix,
    second: &SquareMatrix,
    sources: &[usize],
    targets: &[usize],
    offset: usize,
) -> Option<f64> {
    let (left, right): (Vec<f64>, Vec<f64>) = sources
        .iter()
        .flat_map(|&row| targets.iter().map(move |&column| (row, column + offset)))
        .map(|(row, column)| (first.at(row, column), second.at(row, column)))
        .unzip();
    spearman(&left, &right)
}

/// Ranks from 1, ties taking the mean of their positions. The sort is
/// stable so equal values keep their input order.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&left, &right| values[left].total_cmp(&values[right]));
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end + 1) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = rank;
        }
        start = end;
    }
    ranks
}

fn pearson(first: &[f64], second: &[f64]) -> Option<f64> {
    let count = first.len() as f64;
    let mean_first = first.iter().sum::<f64>() / count;
    let mean_second = second.iter().sum::<f64>() / count;
    let (mut covariance, mut var_first, mut var_second) = (0.0, 0.0, 0.0);
    for (left, right) in first.iter().zip(second) {
        let dl = left - mean_first;
        let dr = right - mean_second;
        covariance += dl * dr;
        var_first += dl * dl;
        var_second += dr * dr;
    }
    if var_first == 0.0 || var_second == 0.0 {
        return None;
    }
    Some(covariance / (var_first * var_second).sqrt())
}
