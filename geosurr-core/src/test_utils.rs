//! Shared test utilities for `geosurr-core`.

use geosurr_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{
    prelude::{Strategy, prop},
    test_runner::Config as ProptestConfig,
};

use crate::matrix::SquareMatrix;

/// Builds a proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Random symmetric weight matrix with a zero diagonal.
///
/// Each upper-triangle slot is empty with probability `1 - density` and
/// otherwise holds a weight in `(0, 10]`.
pub(crate) fn symmetric_weights(
    order: std::ops::RangeInclusive<usize>,
    density: f64,
) -> impl Strategy<Value = SquareMatrix> {
    order.prop_flat_map(move |order| {
        let slots = order * order.saturating_sub(1) / 2;
        prop::collection::vec(
            prop::option::weighted(density, 0.01_f64..=10.0),
            slots,
        )
        .prop_map(move |values| {
            let mut matrix = SquareMatrix::zeros(order);
            let pairs = (0..order).flat_map(|i| ((i + 1)..order).map(move |j| (i, j)));
            for ((i, j), value) in pairs.zip(values) {
                if let Some(weight) = value {
                    matrix.set_pair(i, j, weight);
                }
            }
            matrix
        })
    })
}

/// Euclidean distances between `order` points on a line at unit spacing,
/// scaled by `spacing`.
pub(crate) fn line_distances(order: usize, spacing: f64) -> SquareMatrix {
    let mut matrix = SquareMatrix::zeros(order);
    for i in 0..order {
        for j in (i + 1)..order {
            matrix.set_pair(i, j, (j - i) as f64 * spacing);
        }
    }
    matrix
}
