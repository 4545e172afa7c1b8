//! Synthetic spatial connectomes for benchmarking.
//!
//! Regions are scattered uniformly in the unit cube. Pairs closer than a
//! reach radius are connected with a weight that decays with distance and
//! carries multiplicative jitter, which gives the negative weight-distance
//! relation typical of structural brain graphs. Generation is seeded so every
//! benchmark run sees the same inputs.

use geosurr_core::{SquareMatrix, SurrogateError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic connectome generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// Fewer than two regions were requested.
    #[error("at least two nodes are required (got {nodes})")]
    TooFewNodes {
        /// Requested region count.
        nodes: usize,
    },
    /// The reach radius was not a positive finite number.
    #[error("reach must be positive and finite (got {reach})")]
    InvalidReach {
        /// Requested radius.
        reach: f64,
    },
    /// The generated values did not form valid matrices.
    #[error(transparent)]
    Matrix(#[from] SurrogateError),
}

/// Configuration for synthetic connectome generation.
#[derive(Clone, Debug)]
pub struct SpatialConfig {
    /// Number of regions.
    pub nodes: usize,
    /// Pairs further apart than this stay unconnected.
    pub reach: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Weight and distance matrices of a random spatial graph.
///
/// # Examples
///
/// ```
/// use geosurr_benches::source::{SpatialConfig, SpatialConnectome};
///
/// let config = SpatialConfig { nodes: 12, reach: 0.8, seed: 42 };
/// let connectome = SpatialConnectome::generate(&config).expect("valid config");
/// assert_eq!(connectome.weights().order(), 12);
/// assert!(connectome.weights().is_symmetric(0.0));
/// ```
#[derive(Clone, Debug)]
pub struct SpatialConnectome {
    weights: SquareMatrix,
    distances: SquareMatrix,
}

impl SpatialConnectome {
    /// Generates a connectome from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewNodes`] for fewer than two nodes and
    /// [`SyntheticError::InvalidReach`] for a reach that is not positive and
    /// finite.
    #[expect(
        clippy::float_arithmetic,
        reason = "distance decay and jitter are computed on f64 values"
    )]
    #[expect(
        clippy::indexing_slicing,
        reason = "indices are bounded by the node count used to size the buffers"
    )]
    pub fn generate(config: &SpatialConfig) -> Result<Self, SyntheticError> {
        if config.nodes < 2 {
            return Err(SyntheticError::TooFewNodes {
                nodes: config.nodes,
            });
        }
        if !config.reach.is_finite() || config.reach <= 0.0 {
            return Err(SyntheticError::InvalidReach {
                reach: config.reach,
            });
        }

        let order = config.nodes;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let positions: Vec<[f64; 3]> = (0..order)
            .map(|_| {
                [
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                ]
            })
            .collect();

        let cells = order.saturating_mul(order);
        let mut weight_values = vec![0.0; cells];
        let mut distance_values = vec![0.0; cells];
        for i in 0..order {
            for j in (i + 1)..order {
                let distance = euclidean(&positions[i], &positions[j]);
                let upper = i * order + j;
                let lower = j * order + i;
                distance_values[upper] = distance;
                distance_values[lower] = distance;
                if distance <= config.reach {
                    let jitter: f64 = rng.gen_range(0.5..1.5);
                    let weight = (-2.0 * distance / config.reach).exp() * jitter;
                    weight_values[upper] = weight;
                    weight_values[lower] = weight;
                }
            }
        }

        Ok(Self {
            weights: SquareMatrix::from_row_major(order, weight_values)?,
            distances: SquareMatrix::from_row_major(order, distance_values)?,
        })
    }

    /// Returns the weight matrix.
    #[must_use]
    pub const fn weights(&self) -> &SquareMatrix {
        &self.weights
    }

    /// Returns the distance matrix.
    #[must_use]
    pub const fn distances(&self) -> &SquareMatrix {
        &self.distances
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance requires arithmetic on f64 values"
)]
fn euclidean(left: &[f64; 3], right: &[f64; 3]) -> f64 {
    left.iter()
        .zip(right)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}
