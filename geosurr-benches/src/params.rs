//! Benchmark parameter types.
//!
//! Formats benchmark identifiers so Criterion reports read the same across
//! groups.

use std::fmt;

/// Parameters for a swap-loop benchmark run.
#[derive(Clone, Debug)]
pub struct RewireBenchParams {
    /// Number of regions in the connectome.
    pub nodes: usize,
    /// Swap attempts per edge.
    pub iterations_per_edge: usize,
}

impl fmt::Display for RewireBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.nodes, self.iterations_per_edge)
    }
}

/// Parameters for a geometric or shuffle benchmark run.
#[derive(Clone, Debug)]
pub struct ModelBenchParams {
    /// Number of regions in the connectome.
    pub nodes: usize,
    /// Strength correction repetitions.
    pub strength_iterations: usize,
}

impl fmt::Display for ModelBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},s={}", self.nodes, self.strength_iterations)
    }
}
