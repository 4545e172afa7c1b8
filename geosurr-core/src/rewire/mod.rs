//! Distance-aware double-edge swaps over an owned working matrix.
//!
//! A [`RewiringSession`] owns a copy of the weight matrix, the edge index and
//! the running weight–distance moments. Each [`RewiringSession::step`] is one
//! attempt: draw two distinct edges, build a proposal, check it against the
//! structural constraints and the swap rule, then apply it with symmetric
//! pair writes. Every node keeps its degree because each endpoint loses one
//! incident edge and gains one.

mod edges;
mod moments;

use rand::{Rng, distributions::Standard};

use crate::{
    builder::{CollisionPolicy, SwapRule},
    matrix::SquareMatrix,
    report::{CorrelationSample, RejectionReason, SwapOutcome},
};

use self::{
    edges::{EdgeIndex, canonical},
    moments::WeightDistanceMoments,
};

type Pair = (usize, usize);

/// Step-by-step rewiring of one working matrix.
///
/// Obtain a session from [`crate::SurrogateGenerator::session`], which
/// validates the inputs first.
///
/// # Examples
/// ```
/// use geosurr_core::{GeneratorBuilder, SquareMatrix, seeded_rng};
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
/// let generator = GeneratorBuilder::new().build()?;
/// let mut session = generator.session(&weights, &distances)?;
/// let mut rng = seeded_rng(1);
/// for _ in 0..10 {
///     session.step(&mut rng);
///     assert!(session.matrix().is_symmetric(0.0));
/// }
/// assert_eq!(session.matrix().weight_multiset(), vec![2.0, 5.0]);
/// # Ok::<(), geosurr_core::SurrogateError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RewiringSession<'d> {
    working: SquareMatrix,
    distances: &'d SquareMatrix,
    edges: EdgeIndex,
    moments: WeightDistanceMoments,
    rule: SwapRule,
    policy: CollisionPolicy,
    saturated: bool,
    attempts: usize,
}

impl<'d> RewiringSession<'d> {
    /// Inputs must already be validated and of equal order. Asymmetry left
    /// within tolerance is averaged away before the edge index is built, so a
    /// pair with either half non-zero is tracked as an edge.
    pub(crate) fn new(
        weights: &SquareMatrix,
        distances: &'d SquareMatrix,
        rule: SwapRule,
        policy: CollisionPolicy,
    ) -> Self {
        let mut working = weights.clone();
        working.symmetrize();
        let edges = EdgeIndex::new(working.upper_nonzero_pairs());
        let moments = WeightDistanceMoments::from_pairs(
            edges
                .as_slice()
                .iter()
                .map(|&(i, j)| (distances.at(i, j), working.at(i, j))),
        );
        let saturated = edges.len() == working.pair_capacity();
        Self {
            working,
            distances,
            edges,
            moments,
            rule,
            policy,
            saturated,
            attempts: 0,
        }
    }

    /// Returns the working matrix in its current state.
    #[must_use]
    pub fn matrix(&self) -> &SquareMatrix {
        &self.working
    }

    /// Consumes the session and returns the working matrix.
    #[must_use]
    pub fn into_matrix(self) -> SquareMatrix {
        self.working
    }

    /// Number of edges being rewired. Constant over the session.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Current edge positions in canonical `(i, j)`, `i < j` form.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        self.edges.as_slice()
    }

    /// Attempts made so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns `true` when every off-diagonal position holds a weight.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Samples the current weight–distance relationship.
    #[must_use]
    pub fn sample(&self) -> CorrelationSample {
        CorrelationSample {
            iteration: self.attempts,
            pearson: self.moments.pearson(),
            slope: self.moments.slope(),
        }
    }

    /// Makes one swap attempt.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SwapOutcome {
        self.attempts += 1;
        if self.edges.len() < 2 {
            return SwapOutcome::Rejected(RejectionReason::InsufficientEdges);
        }

        let (first, second) = self.edges.draw_pair(rng);
        let a = self.edges.get(first);
        let b = self.edges.get(second);

        if self.saturated && self.policy.exchanges_when_saturated() {
            return self.try_exchange(rng, a, b);
        }
        if shares_endpoint(a, b) {
            return SwapOutcome::Rejected(RejectionReason::SharedEndpoint);
        }

        let targets = if rng.gen_bool(0.5) {
            [(a.0, b.1), (b.0, a.1)]
        } else {
            [(a.0, b.0), (a.1, b.1)]
        };
        if targets.iter().any(|&(i, j)| i == j) {
            return SwapOutcome::Rejected(RejectionReason::SelfLoop);
        }
        if targets.iter().any(|&(i, j)| self.working.at(i, j) != 0.0) {
            if self.policy.exchanges_on_collision() {
                return self.try_exchange(rng, a, b);
            }
            return SwapOutcome::Rejected(RejectionReason::Collision);
        }

        self.try_relocate(rng, [first, second], [a, b], targets)
    }

    fn try_relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        slots: [usize; 2],
        from: [Pair; 2],
        targets: [Pair; 2],
    ) -> SwapOutcome {
        let weights = from.map(|(i, j)| self.working.at(i, j));
        let mut candidate = self.moments;
        for ((weight, old), new) in weights.iter().zip(from).zip(targets) {
            candidate.relocate(*weight, self.distance(old), self.distance(new));
        }
        if !self.rule_accepts(rng, &candidate) {
            return SwapOutcome::Rejected(RejectionReason::Rule);
        }

        for (i, j) in from {
            self.working.set_pair(i, j, 0.0);
        }
        for ((weight, (i, j)), slot) in weights.iter().zip(targets).zip(slots) {
            self.working.set_pair(i, j, *weight);
            self.edges.replace(slot, (i, j));
        }
        self.moments = candidate;
        SwapOutcome::Relocated {
            from,
            to: targets.map(|(i, j)| canonical(i, j)),
        }
    }

    fn try_exchange<R: Rng + ?Sized>(&mut self, rng: &mut R, a: Pair, b: Pair) -> SwapOutcome {
        let weight_a = self.working.at(a.0, a.1);
        let weight_b = self.working.at(b.0, b.1);
        let (distance_a, distance_b) = (self.distance(a), self.distance(b));
        let mut candidate = self.moments;
        candidate.relocate(weight_a, distance_a, distance_b);
        candidate.relocate(weight_b, distance_b, distance_a);
        if !self.rule_accepts(rng, &candidate) {
            return SwapOutcome::Rejected(RejectionReason::Rule);
        }

        self.working.set_pair(a.0, a.1, weight_b);
        self.working.set_pair(b.0, b.1, weight_a);
        self.moments = candidate;
        SwapOutcome::Exchanged { positions: [a, b] }
    }

    fn rule_accepts<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        candidate: &WeightDistanceMoments,
    ) -> bool {
        match self.rule {
            SwapRule::DistanceRandomizing => true,
            SwapRule::TargetSlope { slope, temperature } => {
                let gap = |moments: &WeightDistanceMoments| {
                    moments.slope().map_or(0.0, |current| (current - slope).abs())
                };
                let increase = gap(candidate) - gap(&self.moments);
                if increase <= 0.0 {
                    true
                } else if temperature > 0.0 {
                    let draw: f64 = rng.sample(Standard);
                    draw < (-increase / temperature).exp()
                } else {
                    false
                }
            }
        }
    }

    fn distance(&self, (i, j): Pair) -> f64 {
        self.distances.at(i, j)
    }
}

fn shares_endpoint(a: Pair, b: Pair) -> bool {
    a.0 == b.0 || a.0 == b.1 || a.1 == b.0 || a.1 == b.1
}
