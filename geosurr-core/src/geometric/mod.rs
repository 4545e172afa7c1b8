//! Geometry-preserving and strength-preserving surrogate models.
//!
//! These models do not rewire edges. They keep the input topology and move
//! weights between existing edges, then rescale the result so the node
//! strength sequence matches a target. Because of that rescaling the output
//! weight multiset is only approximately the input's.

mod polyfit;
mod strength;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    error::{Result, SurrogateError},
    matrix::SquareMatrix,
    rng::rng_for,
    validate::{DEFAULT_SYMMETRY_TOLERANCE, validate_inputs_allowing_missing, validate_weights},
};

use self::polyfit::Polynomial;
pub use self::strength::{DEFAULT_STRENGTH_ITERATIONS, rank_reorder, strength_correct};

/// Default degree of the distance trend fitted to log-weights.
pub const DEFAULT_MEAN_ORDER: usize = 3;
/// Default degree of the distance trend fitted to absolute residuals.
pub const DEFAULT_STD_ORDER: usize = 2;
/// Highest polynomial degree accepted for either trend.
pub const MAX_FIT_ORDER: usize = 8;

/// Configures and constructs [`GeometricModel`] instances.
///
/// # Examples
/// ```
/// use geosurr_core::GeometricOptions;
///
/// let model = GeometricOptions::new()
///     .with_mean_order(2)
///     .with_random_seed(7)
///     .build()
///     .expect("options are valid");
/// assert_eq!(model.mean_order(), 2);
/// assert_eq!(model.std_order(), 2);
/// assert_eq!(model.strength_iterations(), 9);
/// ```
#[derive(Clone, Debug)]
pub struct GeometricOptions {
    mean_order: usize,
    std_order: usize,
    strength_iterations: usize,
    random_seed: Option<u64>,
    symmetry_tolerance: f64,
}

impl Default for GeometricOptions {
    fn default() -> Self {
        Self {
            mean_order: DEFAULT_MEAN_ORDER,
            std_order: DEFAULT_STD_ORDER,
            strength_iterations: DEFAULT_STRENGTH_ITERATIONS,
            random_seed: None,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }
}

impl GeometricOptions {
    /// Creates options populated with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the degree of the log-weight trend.
    #[must_use]
    pub fn with_mean_order(mut self, order: usize) -> Self {
        self.mean_order = order;
        self
    }

    /// Sets the degree of the residual spread trend.
    #[must_use]
    pub fn with_std_order(mut self, order: usize) -> Self {
        self.std_order = order;
        self
    }

    /// Sets how many correction rounds follow the initial strength rescale.
    #[must_use]
    pub fn with_strength_iterations(mut self, iterations: usize) -> Self {
        self.strength_iterations = iterations;
        self
    }

    /// Seeds the shuffles so runs are reproducible.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Overrides the absolute tolerance used by input symmetry checks.
    #[must_use]
    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    /// Validates the options and constructs a [`GeometricModel`].
    ///
    /// # Errors
    /// Returns [`SurrogateError::InvalidParameters`] when an order exceeds
    /// [`MAX_FIT_ORDER`] or the tolerance is negative or non-finite.
    pub fn build(self) -> Result<GeometricModel> {
        for (name, order) in [("mean_order", self.mean_order), ("std_order", self.std_order)] {
            if order > MAX_FIT_ORDER {
                return Err(SurrogateError::InvalidParameters {
                    reason: format!("{name} must be at most {MAX_FIT_ORDER} (got {order})"),
                });
            }
        }
        if !self.symmetry_tolerance.is_finite() || self.symmetry_tolerance < 0.0 {
            return Err(SurrogateError::InvalidParameters {
                reason: format!(
                    "symmetry_tolerance must be finite and non-negative (got {})",
                    self.symmetry_tolerance
                ),
            });
        }
        Ok(GeometricModel { options: self })
    }
}

/// Generates surrogates that keep the input topology.
#[derive(Clone, Debug)]
pub struct GeometricModel {
    options: GeometricOptions,
}

impl GeometricModel {
    /// Degree of the log-weight trend.
    #[must_use]
    pub fn mean_order(&self) -> usize {
        self.options.mean_order
    }

    /// Degree of the residual spread trend.
    #[must_use]
    pub fn std_order(&self) -> usize {
        self.options.std_order
    }

    /// Correction rounds after the initial strength rescale.
    #[must_use]
    pub fn strength_iterations(&self) -> usize {
        self.options.strength_iterations
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn random_seed(&self) -> Option<u64> {
        self.options.random_seed
    }

    /// Geometric surrogate using the configured seed or OS entropy.
    ///
    /// # Errors
    /// See [`GeometricModel::geometric_with_rng`].
    pub fn geometric(&self, weights: &SquareMatrix, distances: &SquareMatrix) -> Result<SquareMatrix> {
        let mut rng = rng_for(self.options.random_seed);
        self.geometric_with_rng(weights, distances, &mut rng)
    }

    /// Geometric surrogate drawing from a caller-provided random source.
    ///
    /// Weights are redistributed over the existing edges so that the
    /// polynomial trends of log-weight and of its spread against distance
    /// survive while the residuals are shuffled. Strengths are then corrected
    /// toward the input strength sequence, reordered by the surrogate's own
    /// strength ranks.
    ///
    /// A NaN distance marks a missing pair: an edge there takes no part in
    /// the fits and is left empty in the surrogate, while its weight still
    /// counts toward the target strengths.
    ///
    /// # Errors
    /// Returns the validation errors of
    /// [`crate::validate_inputs_allowing_missing`],
    /// [`SurrogateError::NonPositiveWeight`] for a negative edge weight,
    /// [`SurrogateError::InsufficientEdges`] when there are fewer edges than
    /// coefficients to fit, and [`SurrogateError::DegenerateFit`] when a fit
    /// cannot be solved or its spread is not finite.
    #[instrument(
        name = "core.geometric",
        err,
        skip(self, weights, distances, rng),
        fields(
            nodes = weights.order(),
            mean_order = self.options.mean_order,
            std_order = self.options.std_order,
        ),
    )]
    pub fn geometric_with_rng<R: Rng + ?Sized>(
        &self,
        weights: &SquareMatrix,
        distances: &SquareMatrix,
        rng: &mut R,
    ) -> Result<SquareMatrix> {
        validate_inputs_allowing_missing(weights, distances, self.options.symmetry_tolerance)?;
        let (edges, missing): (Vec<_>, Vec<_>) = weights
            .upper_nonzero_pairs()
            .into_iter()
            .partition(|&(row, column)| {
                !distances.at(row, column).is_nan() && !distances.at(column, row).is_nan()
            });
        if !missing.is_empty() {
            debug!(missing = missing.len(), "edges without a distance are dropped");
        }
        let required = self.options.mean_order.max(self.options.std_order) + 1;
        if edges.len() < required {
            return Err(SurrogateError::InsufficientEdges {
                edges: edges.len(),
                required,
            });
        }

        let mut values = Vec::with_capacity(edges.len());
        let mut lengths = Vec::with_capacity(edges.len());
        for &(row, column) in &edges {
            let weight = weights.at(row, column);
            if weight <= 0.0 {
                return Err(SurrogateError::NonPositiveWeight {
                    row,
                    column,
                    weight,
                });
            }
            values.push(weight);
            lengths.push(distances.at(row, column));
        }
        let log_values: Vec<f64> = values.iter().map(|weight| weight.ln()).collect();

        let trend = Polynomial::fit(&lengths, &log_values, self.options.mean_order)?;
        let residuals: Vec<f64> = lengths
            .iter()
            .zip(&log_values)
            .map(|(&length, value)| value - trend.eval(length))
            .collect();
        let spread_fit = Polynomial::fit(
            &lengths,
            &residuals.iter().map(|value| value.abs()).collect::<Vec<_>>(),
            self.options.std_order,
        )?;
        let spreads: Vec<f64> = lengths.iter().map(|&length| spread_fit.eval(length)).collect();
        if spreads.iter().any(|spread| !spread.is_finite()) {
            return Err(SurrogateError::DegenerateFit {
                order: self.options.std_order,
                reason: "fitted spread is not finite at an edge distance",
            });
        }

        let mut standardized: Vec<f64> = residuals
            .iter()
            .zip(&spreads)
            .map(|(residual, spread)| standardize(*residual, *spread))
            .collect();
        standardized.shuffle(rng);
        let scaffold: Vec<f64> = standardized
            .iter()
            .zip(&spreads)
            .zip(&lengths)
            .map(|((value, spread), &length)| value * spread + trend.eval(length))
            .collect();

        // ln is monotone, so ranking raw weights keeps the multiset exact.
        let placed = rank_reorder(&values, &scaffold)?;
        let surrogate = place_on_edges(weights.order(), &edges, &placed);
        let target = rank_reorder(&weights.strengths(), &surrogate.strengths())?;
        let corrected = strength_correct(&surrogate, &target, self.options.strength_iterations)?;
        debug!(edges = edges.len(), "geometric surrogate completed");
        Ok(corrected)
    }

    /// Strength-preserving random surrogate using the configured seed or OS
    /// entropy.
    ///
    /// # Errors
    /// See [`GeometricModel::shuffled_with_rng`].
    pub fn shuffled(&self, weights: &SquareMatrix) -> Result<SquareMatrix> {
        let mut rng = rng_for(self.options.random_seed);
        self.shuffled_with_rng(weights, &mut rng)
    }

    /// Shuffles the edge weights over the existing topology and corrects the
    /// strengths toward the input's. Distances play no part.
    ///
    /// # Errors
    /// Returns the validation errors of [`crate::validate_weights`].
    #[instrument(
        name = "core.shuffle",
        err,
        skip(self, weights, rng),
        fields(nodes = weights.order()),
    )]
    pub fn shuffled_with_rng<R: Rng + ?Sized>(
        &self,
        weights: &SquareMatrix,
        rng: &mut R,
    ) -> Result<SquareMatrix> {
        validate_weights(weights, self.options.symmetry_tolerance)?;
        let edges = weights.upper_nonzero_pairs();
        let mut values: Vec<f64> = edges
            .iter()
            .map(|&(row, column)| weights.at(row, column))
            .collect();
        values.shuffle(rng);
        let surrogate = place_on_edges(weights.order(), &edges, &values);
        let corrected = strength_correct(
            &surrogate,
            &weights.strengths(),
            self.options.strength_iterations,
        )?;
        debug!(edges = edges.len(), "shuffled surrogate completed");
        Ok(corrected)
    }
}

/// Geometric surrogate with default options.
///
/// # Errors
/// See [`GeometricModel::geometric_with_rng`].
///
/// # Examples
/// ```
/// use geosurr_core::{SquareMatrix, geometric_surrogate};
///
/// let order = 6;
/// let mut weights = vec![0.0; order * order];
/// let mut distances = vec![0.0; order * order];
/// for i in 0..order {
///     for j in 0..order {
///         if i != j {
///             let d = (i as f64 - j as f64).abs();
///             distances[i * order + j] = d;
///             weights[i * order + j] = 1.0 / d + 0.1 * ((i + j) % 3) as f64;
///         }
///     }
/// }
/// let weights = SquareMatrix::from_row_major(order, weights)?;
/// let distances = SquareMatrix::from_row_major(order, distances)?;
/// let surrogate = geometric_surrogate(&weights, &distances, Some(4))?;
/// assert!(surrogate.is_symmetric(1e-12));
/// assert_eq!(surrogate.upper_nonzero_pairs(), weights.upper_nonzero_pairs());
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
pub fn geometric_surrogate(
    weights: &SquareMatrix,
    distances: &SquareMatrix,
    seed: Option<u64>,
) -> Result<SquareMatrix> {
    model_with_seed(seed)?.geometric(weights, distances)
}

/// Strength-preserving random surrogate with default options.
///
/// # Errors
/// See [`GeometricModel::shuffled_with_rng`].
pub fn random_surrogate(weights: &SquareMatrix, seed: Option<u64>) -> Result<SquareMatrix> {
    model_with_seed(seed)?.shuffled(weights)
}

fn model_with_seed(seed: Option<u64>) -> Result<GeometricModel> {
    let options = GeometricOptions::new();
    match seed {
        Some(seed) => options.with_random_seed(seed),
        None => options,
    }
    .build()
}

/// Residuals where the fitted spread vanishes carry no shape information.
fn standardize(residual: f64, spread: f64) -> f64 {
    if spread == 0.0 { 0.0 } else { residual / spread }
}

fn place_on_edges(order: usize, edges: &[(usize, usize)], values: &[f64]) -> SquareMatrix {
    let mut matrix = SquareMatrix::zeros(order);
    for (&(row, column), &value) in edges.iter().zip(values) {
        matrix.set_pair(row, column, value);
    }
    matrix
}
