//! Running sums describing how edge weight varies with distance.
//!
//! Relocations only change which distance a weight is paired with, so the
//! weight sums never move; the distance and cross sums are patched per swap.

/// First and second moments of `(distance, weight)` over the edge set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct WeightDistanceMoments {
    count: f64,
    sum_d: f64,
    sum_dd: f64,
    sum_w: f64,
    sum_ww: f64,
    sum_dw: f64,
}

impl WeightDistanceMoments {
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut moments = Self::default();
        for (distance, weight) in pairs {
            moments.count += 1.0;
            moments.sum_d += distance;
            moments.sum_dd += distance * distance;
            moments.sum_w += weight;
            moments.sum_ww += weight * weight;
            moments.sum_dw += distance * weight;
        }
        moments
    }

    /// Moves `weight` from a slot at `old_distance` to one at `new_distance`.
    pub(crate) fn relocate(&mut self, weight: f64, old_distance: f64, new_distance: f64) {
        self.sum_d += new_distance - old_distance;
        self.sum_dd += new_distance * new_distance - old_distance * old_distance;
        self.sum_dw += weight * (new_distance - old_distance);
    }

    /// Least-squares slope of weight on distance.
    pub(crate) fn slope(&self) -> Option<f64> {
        let spread = self.count * self.sum_dd - self.sum_d * self.sum_d;
        if self.count < 2.0 || spread.abs() <= f64::EPSILON * self.sum_dd.abs().max(1.0) {
            return None;
        }
        Some((self.count * self.sum_dw - self.sum_d * self.sum_w) / spread)
    }

    /// Pearson correlation between weight and distance.
    pub(crate) fn pearson(&self) -> Option<f64> {
        let spread_d = self.count * self.sum_dd - self.sum_d * self.sum_d;
        let spread_w = self.count * self.sum_ww - self.sum_w * self.sum_w;
        let denominator = (spread_d * spread_w).sqrt();
        if self.count < 2.0 || !denominator.is_finite() || denominator <= f64::EPSILON {
            return None;
        }
        let r = (self.count * self.sum_dw - self.sum_d * self.sum_w) / denominator;
        Some(r.clamp(-1.0, 1.0))
    }
}
