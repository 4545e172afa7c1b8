//! Geometric surrogate generation for weighted brain graphs.
//!
//! A connectome is a symmetric weight matrix `W` over brain regions paired
//! with a distance matrix `D`. [`SurrogateGenerator`] rewires `W` with
//! distance-aware double-edge swaps: weights travel with their edges to new
//! node pairs so the weight multiset and every node degree survive while the
//! relation between weight and distance is randomized, or steered toward a
//! target slope. [`GeometricModel`] offers the topology-preserving
//! alternatives: a geometric surrogate that keeps the distance trend of
//! log-weights, and a strength-preserving weight shuffle.
//! [`division_correlation`] compares two connectivity matrices through
//! Spearman correlations per pair of major brain divisions.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod ensemble;
mod error;
mod generator;
mod geometric;
mod matrix;
mod parcellation;
mod report;
mod rewire;
mod rng;
#[cfg(test)]
mod test_utils;
mod transform;
mod validate;

pub use crate::{
    builder::{CollisionPolicy, DEFAULT_ITERATIONS_PER_EDGE, GeneratorBuilder, SwapRule},
    error::{MatrixRole, Result, SurrogateError, SurrogateErrorCode},
    generator::SurrogateGenerator,
    geometric::{
        DEFAULT_MEAN_ORDER, DEFAULT_STD_ORDER, DEFAULT_STRENGTH_ITERATIONS, GeometricModel,
        GeometricOptions, MAX_FIT_ORDER, geometric_surrogate, random_surrogate, rank_reorder,
        strength_correct,
    },
    matrix::SquareMatrix,
    parcellation::{
        BRAIN_DIVISIONS, DivisionCorrelation, check_parcellation, division_correlation, spearman,
    },
    report::{
        CorrelationSample, GenerationWarning, RejectionCounts, RejectionReason, RewireReport,
        Surrogate, SwapOutcome,
    },
    rewire::RewiringSession,
    rng::{mix_member_seed, rng_for, seeded_rng},
    transform::{rescale, to_density},
    validate::{
        DEFAULT_SYMMETRY_TOLERANCE, validate_inputs, validate_inputs_allowing_missing,
        validate_weights,
    },
};
