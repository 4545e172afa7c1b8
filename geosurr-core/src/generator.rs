//! Surrogate generation entry point.
//!
//! Provides [`SurrogateGenerator`], which validates inputs, runs a
//! [`RewiringSession`] for the configured number of attempts, and reports
//! what happened.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::{
    Result,
    builder::{CollisionPolicy, DEFAULT_ITERATIONS_PER_EDGE, SwapRule},
    matrix::SquareMatrix,
    report::{GenerationWarning, RewireReport, Surrogate, SwapOutcome},
    rewire::RewiringSession,
    rng::rng_for,
    validate::validate_inputs,
};

/// Generates distance-randomized surrogates of a weighted graph.
///
/// Each call works on a fresh copy of the weights and owns its random
/// source, so a generator can be shared freely between threads.
///
/// # Examples
/// ```
/// use geosurr_core::{GeneratorBuilder, SquareMatrix};
///
/// let weights = SquareMatrix::try_from_rows(vec![
///     vec![0.0, 2.0, 0.0, 0.0],
///     vec![2.0, 0.0, 0.0, 0.0],
///     vec![0.0, 0.0, 0.0, 5.0],
///     vec![0.0, 0.0, 5.0, 0.0],
/// ])?;
/// let distances = SquareMatrix::try_from_rows(vec![
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 4.0, 5.0],
///     vec![2.0, 4.0, 0.0, 6.0],
///     vec![3.0, 5.0, 6.0, 0.0],
/// ])?;
/// let generator = GeneratorBuilder::new()
///     .with_random_seed(2021)
///     .build()?;
/// let surrogate = generator.generate(&weights, &distances)?;
/// assert_eq!(surrogate.matrix().weight_multiset(), vec![2.0, 5.0]);
/// assert_eq!(surrogate.matrix().degrees(), vec![1, 1, 1, 1]);
/// assert_eq!(surrogate.report().attempts, 20);
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SurrogateGenerator {
    max_iterations: Option<usize>,
    random_seed: Option<u64>,
    swap_rule: SwapRule,
    collision_policy: CollisionPolicy,
    symmetry_tolerance: f64,
    trace_interval: Option<NonZeroUsize>,
}

impl SurrogateGenerator {
    pub(crate) fn new(
        max_iterations: Option<usize>,
        random_seed: Option<u64>,
        swap_rule: SwapRule,
        collision_policy: CollisionPolicy,
        symmetry_tolerance: f64,
        trace_interval: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            max_iterations,
            random_seed,
            swap_rule,
            collision_policy,
            symmetry_tolerance,
            trace_interval,
        }
    }

    /// Returns the explicit attempt cap, if one was configured.
    #[must_use]
    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Returns the acceptance rule.
    #[must_use]
    pub fn swap_rule(&self) -> SwapRule {
        self.swap_rule
    }

    /// Returns the collision policy.
    #[must_use]
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Returns the input symmetry tolerance.
    #[must_use]
    pub fn symmetry_tolerance(&self) -> f64 {
        self.symmetry_tolerance
    }

    /// Attempt budget for a graph with `edges` edges.
    #[must_use]
    pub fn iteration_budget(&self, edges: usize) -> usize {
        self.max_iterations
            .unwrap_or_else(|| edges.saturating_mul(DEFAULT_ITERATIONS_PER_EDGE))
    }

    /// Generates one surrogate using the configured seed, or OS entropy when
    /// no seed was set.
    ///
    /// # Errors
    /// Returns the validation errors of [`crate::validate_inputs`]; nothing
    /// is generated for invalid input.
    pub fn generate(&self, weights: &SquareMatrix, distances: &SquareMatrix) -> Result<Surrogate> {
        let mut rng = rng_for(self.random_seed);
        self.generate_with_rng(weights, distances, &mut rng)
    }

    /// Generates one surrogate drawing from a caller-provided random source.
    ///
    /// The configured seed is ignored.
    ///
    /// # Errors
    /// Returns the validation errors of [`crate::validate_inputs`].
    #[instrument(
        name = "core.generate",
        err,
        skip(self, weights, distances, rng),
        fields(
            nodes = weights.order(),
            rule = ?self.swap_rule,
            policy = ?self.collision_policy,
        ),
    )]
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        weights: &SquareMatrix,
        distances: &SquareMatrix,
        rng: &mut R,
    ) -> Result<Surrogate> {
        let mut session = self.session(weights, distances)?;
        let edges = session.edge_count();
        let mut report = RewireReport {
            edges,
            initial: Some(session.sample()),
            ..RewireReport::default()
        };

        if edges < 2 {
            warn!(edges, "fewer than two edges, returning input unchanged");
            report.warning = Some(GenerationWarning::DegenerateInput { edges });
            report.last = report.initial;
            return Ok(Surrogate::new(session.into_matrix(), report));
        }

        let budget = self.iteration_budget(edges);
        for _ in 0..budget {
            let outcome = session.step(rng);
            record_metrics(&outcome);
            report.record(&outcome);
            if let Some(interval) = self.trace_interval {
                if session.attempts() % interval.get() == 0 {
                    report.trace.push(session.sample());
                }
            }
        }
        report.last = Some(session.sample());

        debug!(
            edges,
            attempts = report.attempts,
            relocations = report.relocations,
            exchanges = report.exchanges,
            rejected = report.rejections.total(),
            "rewiring completed"
        );
        Ok(Surrogate::new(session.into_matrix(), report))
    }

    /// Validates the inputs and opens a step-by-step session.
    ///
    /// # Errors
    /// Returns the validation errors of [`crate::validate_inputs`].
    pub fn session<'d>(
        &self,
        weights: &SquareMatrix,
        distances: &'d SquareMatrix,
    ) -> Result<RewiringSession<'d>> {
        validate_inputs(weights, distances, self.symmetry_tolerance)?;
        Ok(RewiringSession::new(
            weights,
            distances,
            self.swap_rule,
            self.collision_policy,
        ))
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(outcome: &SwapOutcome) {
    metrics::counter!("surrogate_swap_attempts").increment(1);
    match outcome {
        SwapOutcome::Relocated { .. } => {
            metrics::counter!("surrogate_swaps_accepted").increment(1);
        }
        SwapOutcome::Exchanged { .. } => {
            metrics::counter!("surrogate_swaps_accepted").increment(1);
            metrics::counter!("surrogate_value_exchanges").increment(1);
        }
        SwapOutcome::Rejected(reason) => {
            metrics::counter!("surrogate_swaps_rejected", "reason" => reason.as_str())
                .increment(1);
        }
    }
}

#[cfg(not(feature = "metrics"))]
fn record_metrics(_outcome: &SwapOutcome) {}
