//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use geosurr_core::SurrogateError;

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic connectome generation failed.
    #[error("synthetic connectome generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Generator configuration or surrogate generation failed.
    #[error("surrogate operation failed: {0}")]
    Surrogate(#[from] SurrogateError),
}
