//! Property suites over random weighted graphs.

use geosurr_core::{CollisionPolicy, GeneratorBuilder, SquareMatrix};
use geosurr_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use test_strategy::Arbitrary;

fn suite_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Random points in the unit square with a sparse weighted graph over them.
#[derive(Clone, Debug)]
struct SpatialGraph {
    weights: SquareMatrix,
    distances: SquareMatrix,
}

fn spatial_graph() -> impl Strategy<Value = SpatialGraph> {
    (2_usize..=10).prop_flat_map(|order| {
        let pairs = order * (order - 1) / 2;
        (
            prop::collection::vec((0.0_f64..1.0, 0.0_f64..1.0), order),
            prop::collection::vec(prop::option::weighted(0.4, 0.05_f64..=5.0), pairs),
        )
            .prop_map(move |(points, slots)| {
                let mut weights = vec![0.0; order * order];
                let mut distances = vec![0.0; order * order];
                let upper = (0..order).flat_map(|i| ((i + 1)..order).map(move |j| (i, j)));
                for ((i, j), slot) in upper.zip(slots) {
                    let (xi, yi) = points[i];
                    let (xj, yj) = points[j];
                    let distance = (xi - xj).hypot(yi - yj);
                    distances[i * order + j] = distance;
                    distances[j * order + i] = distance;
                    if let Some(weight) = slot {
                        weights[i * order + j] = weight;
                        weights[j * order + i] = weight;
                    }
                }
                SpatialGraph {
                    weights: SquareMatrix::from_row_major(order, weights)
                        .expect("generated weights are square"),
                    distances: SquareMatrix::from_row_major(order, distances)
                        .expect("generated distances are square"),
                }
            })
    })
}

#[derive(Clone, Copy, Debug, Arbitrary)]
enum PolicyChoice {
    Reject,
    Saturated,
    Always,
}

impl From<PolicyChoice> for CollisionPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Reject => Self::Reject,
            PolicyChoice::Saturated => Self::ExchangeWhenSaturated,
            PolicyChoice::Always => Self::ExchangeOnCollision,
        }
    }
}

proptest! {
    #![proptest_config(suite_config(48))]

    #[test]
    fn surrogates_keep_weights_degrees_and_symmetry(
        graph in spatial_graph(),
        seed in any::<u64>(),
        iterations in 0_usize..300,
        policy in any::<PolicyChoice>(),
    ) {
        let generator = GeneratorBuilder::new()
            .with_random_seed(seed)
            .with_max_iterations(iterations)
            .with_collision_policy(policy.into())
            .build()
            .expect("configuration is valid");
        let surrogate = generator
            .generate(&graph.weights, &graph.distances)
            .expect("generated inputs are valid");
        let result = surrogate.matrix();

        prop_assert!(result.is_symmetric(0.0));
        prop_assert!((0..result.order()).all(|node| result.get(node, node) == Some(0.0)));
        prop_assert_eq!(result.weight_multiset(), graph.weights.weight_multiset());
        prop_assert_eq!(result.degrees(), graph.weights.degrees());
        if graph.weights.edge_count() >= 2 {
            prop_assert_eq!(surrogate.report().attempts, iterations);
        }
    }

    #[test]
    fn seeded_runs_repeat(graph in spatial_graph(), seed in any::<u64>()) {
        let generator = GeneratorBuilder::new()
            .with_random_seed(seed)
            .with_max_iterations(100)
            .build()
            .expect("configuration is valid");
        let first = generator.generate(&graph.weights, &graph.distances);
        let second = generator.generate(&graph.weights, &graph.distances);
        prop_assert_eq!(first, second);
    }
}
