//! Independent surrogate ensembles.
//!
//! Member `k` of an ensemble always draws from the stream seeded with
//! [`mix_member_seed`]`(base, k)`, so results do not depend on how work is
//! scheduled across threads.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::RngCore;
use tracing::{info, instrument};

use crate::{
    Result,
    generator::SurrogateGenerator,
    matrix::SquareMatrix,
    report::Surrogate,
    rng::{mix_member_seed, rng_for, seeded_rng},
    validate::validate_inputs,
};

impl SurrogateGenerator {
    /// Generates `count` independent surrogates.
    ///
    /// The configured seed is the ensemble's base seed; without one a base
    /// seed is drawn from OS entropy. With the `parallel` feature members are
    /// generated on the Rayon pool.
    ///
    /// # Errors
    /// Returns the validation errors of [`crate::validate_inputs`] before
    /// any member is generated.
    ///
    /// # Examples
    /// ```
    /// use geosurr_core::{GeneratorBuilder, SquareMatrix};
    ///
    /// let weights = SquareMatrix::try_from_rows(vec![
    ///     vec![0.0, 1.0, 0.0, 0.0],
    ///     vec![1.0, 0.0, 0.0, 0.0],
    ///     vec![0.0, 0.0, 0.0, 3.0],
    ///     vec![0.0, 0.0, 3.0, 0.0],
    /// ])?;
    /// let distances = SquareMatrix::try_from_rows(vec![
    ///     vec![0.0, 1.0, 1.0, 1.0],
    ///     vec![1.0, 0.0, 1.0, 1.0],
    ///     vec![1.0, 1.0, 0.0, 1.0],
    ///     vec![1.0, 1.0, 1.0, 0.0],
    /// ])?;
    /// let generator = GeneratorBuilder::new().with_random_seed(9).build()?;
    /// let first = generator.ensemble(&weights, &distances, 4)?;
    /// let second = generator.ensemble(&weights, &distances, 4)?;
    /// assert_eq!(first.len(), 4);
    /// assert_eq!(first, second);
    /// # Ok::<(), geosurr_core::SurrogateError>(())
    /// ```
    #[instrument(
        name = "core.ensemble",
        err,
        skip(self, weights, distances),
        fields(nodes = weights.order(), count = count),
    )]
    pub fn ensemble(
        &self,
        weights: &SquareMatrix,
        distances: &SquareMatrix,
        count: usize,
    ) -> Result<Vec<Surrogate>> {
        validate_inputs(weights, distances, self.symmetry_tolerance())?;
        let base_seed = self
            .random_seed()
            .unwrap_or_else(|| rng_for(None).next_u64());

        let generate_member = |member: usize| {
            let mut rng = seeded_rng(mix_member_seed(base_seed, member));
            self.generate_with_rng(weights, distances, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let members: Result<Vec<Surrogate>> =
            (0..count).into_par_iter().map(generate_member).collect();
        #[cfg(not(feature = "parallel"))]
        let members: Result<Vec<Surrogate>> = (0..count).map(generate_member).collect();

        let members = members?;
        info!(members = members.len(), base_seed, "ensemble completed");
        Ok(members)
    }
}
