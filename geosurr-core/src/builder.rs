//! Builder utilities for configuring surrogate generation.
//!
//! Exposes the swap rule and collision policy selection surface and the
//! validation run before constructing [`SurrogateGenerator`] instances.

use std::num::NonZeroUsize;

use crate::{
    Result, error::SurrogateError, generator::SurrogateGenerator,
    validate::DEFAULT_SYMMETRY_TOLERANCE,
};

/// Attempts per edge used when no explicit iteration budget is set.
pub const DEFAULT_ITERATIONS_PER_EDGE: usize = 10;

/// Decides whether a structurally valid proposal is applied.
///
/// # Examples
/// ```
/// use geosurr_core::SwapRule;
///
/// assert_eq!(SwapRule::default(), SwapRule::DistanceRandomizing);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SwapRule {
    /// Apply every valid proposal; the weight–distance relation is scrambled.
    #[default]
    DistanceRandomizing,
    /// Steer the least-squares slope of weight on distance toward `slope`.
    ///
    /// Proposals that do not move the slope away from the target are always
    /// applied. Others are applied with probability `exp(-Δ / temperature)`
    /// where `Δ` is the increase in distance from the target; a temperature
    /// of zero makes the rule greedy.
    TargetSlope {
        /// Desired slope of weight against distance.
        slope: f64,
        /// Metropolis temperature, finite and non-negative.
        temperature: f64,
    },
}

/// What to do when a proposed target slot already holds a weight.
///
/// # Examples
/// ```
/// use geosurr_core::CollisionPolicy;
///
/// assert_eq!(CollisionPolicy::default(), CollisionPolicy::ExchangeWhenSaturated);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// Reject colliding proposals. A complete graph never changes.
    Reject,
    /// When no vacant slot exists anywhere, exchange the two drawn weights in
    /// place; otherwise reject collisions.
    #[default]
    ExchangeWhenSaturated,
    /// Exchange the two drawn weights in place whenever a target collides,
    /// and on saturated graphs.
    ExchangeOnCollision,
}

impl CollisionPolicy {
    pub(crate) const fn exchanges_when_saturated(self) -> bool {
        !matches!(self, Self::Reject)
    }

    pub(crate) const fn exchanges_on_collision(self) -> bool {
        matches!(self, Self::ExchangeOnCollision)
    }
}

/// Configures and constructs [`SurrogateGenerator`] instances.
///
/// # Examples
/// ```
/// use geosurr_core::{CollisionPolicy, GeneratorBuilder, SwapRule};
///
/// let generator = GeneratorBuilder::new()
///     .with_max_iterations(500)
///     .with_random_seed(2021)
///     .with_collision_policy(CollisionPolicy::Reject)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.max_iterations(), Some(500));
/// assert_eq!(generator.random_seed(), Some(2021));
/// assert_eq!(generator.swap_rule(), SwapRule::DistanceRandomizing);
/// ```
#[derive(Clone, Debug)]
pub struct GeneratorBuilder {
    max_iterations: Option<usize>,
    random_seed: Option<u64>,
    swap_rule: SwapRule,
    collision_policy: CollisionPolicy,
    symmetry_tolerance: f64,
    trace_interval: Option<NonZeroUsize>,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            max_iterations: None,
            random_seed: None,
            swap_rule: SwapRule::default(),
            collision_policy: CollisionPolicy::default(),
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            trace_interval: None,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use geosurr_core::GeneratorBuilder;
    ///
    /// let builder = GeneratorBuilder::new();
    /// assert_eq!(builder.max_iterations(), None);
    /// assert_eq!(builder.symmetry_tolerance(), 1e-8);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of swap attempts. Zero returns the input unchanged.
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Returns the configured attempt cap, if any.
    #[must_use]
    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// Seeds the generator so runs are reproducible.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Selects the acceptance rule.
    ///
    /// # Examples
    /// ```
    /// use geosurr_core::{GeneratorBuilder, SwapRule};
    ///
    /// let rule = SwapRule::TargetSlope { slope: -0.1, temperature: 0.0 };
    /// let builder = GeneratorBuilder::new().with_swap_rule(rule);
    /// assert_eq!(builder.swap_rule(), rule);
    /// ```
    #[must_use]
    pub fn with_swap_rule(mut self, rule: SwapRule) -> Self {
        self.swap_rule = rule;
        self
    }

    /// Returns the configured acceptance rule.
    #[must_use]
    pub fn swap_rule(&self) -> SwapRule {
        self.swap_rule
    }

    /// Selects how colliding proposals are handled.
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Returns the configured collision policy.
    #[must_use]
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Overrides the absolute tolerance used by input symmetry checks.
    #[must_use]
    pub fn with_symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = tolerance;
        self
    }

    /// Returns the configured symmetry tolerance.
    #[must_use]
    pub fn symmetry_tolerance(&self) -> f64 {
        self.symmetry_tolerance
    }

    /// Records the weight–distance correlation every `interval` attempts.
    #[must_use]
    pub fn with_trace_interval(mut self, interval: NonZeroUsize) -> Self {
        self.trace_interval = Some(interval);
        self
    }

    /// Returns the configured trace interval, if any.
    #[must_use]
    pub fn trace_interval(&self) -> Option<NonZeroUsize> {
        self.trace_interval
    }

    /// Validates the configuration and constructs a [`SurrogateGenerator`].
    ///
    /// # Errors
    /// Returns [`SurrogateError::InvalidParameters`] when the tolerance is
    /// negative or non-finite, or when a [`SwapRule::TargetSlope`] carries a
    /// non-finite slope or a negative or non-finite temperature.
    ///
    /// # Examples
    /// ```
    /// use geosurr_core::{GeneratorBuilder, SurrogateError};
    ///
    /// let err = GeneratorBuilder::new()
    ///     .with_symmetry_tolerance(-1.0)
    ///     .build()
    ///     .unwrap_err();
    /// assert!(matches!(err, SurrogateError::InvalidParameters { .. }));
    /// ```
    pub fn build(self) -> Result<SurrogateGenerator> {
        if !self.symmetry_tolerance.is_finite() || self.symmetry_tolerance < 0.0 {
            return Err(SurrogateError::InvalidParameters {
                reason: format!(
                    "symmetry_tolerance must be finite and non-negative (got {})",
                    self.symmetry_tolerance
                ),
            });
        }
        if let SwapRule::TargetSlope { slope, temperature } = self.swap_rule {
            if !slope.is_finite() {
                return Err(SurrogateError::InvalidParameters {
                    reason: format!("target slope must be finite (got {slope})"),
                });
            }
            if !temperature.is_finite() || temperature < 0.0 {
                return Err(SurrogateError::InvalidParameters {
                    reason: format!(
                        "temperature must be finite and non-negative (got {temperature})"
                    ),
                });
            }
        }
        Ok(SurrogateGenerator::new(
            self.max_iterations,
            self.random_seed,
            self.swap_rule,
            self.collision_policy,
            self.symmetry_tolerance,
            self.trace_interval,
        ))
    }
}
