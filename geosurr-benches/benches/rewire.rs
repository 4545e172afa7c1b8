//! Swap loop benchmarks.
//!
//! Measures full `generate` runs at several connectome sizes and attempt
//! budgets, plus the cost of a single `RewiringSession::step` so the per-swap
//! overhead of the incremental moment updates stays visible.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use geosurr_benches::{
    error::BenchSetupError,
    params::RewireBenchParams,
    source::{SpatialConfig, SpatialConnectome},
};
use geosurr_core::{GeneratorBuilder, SwapRule, seeded_rng};

/// Seed used for all synthetic data and rewiring streams in this benchmark.
const SEED: u64 = 42;

/// Connection radius in the unit cube.
const REACH: f64 = 0.45;

/// Connectome sizes to benchmark.
const NODE_COUNTS: &[usize] = &[64, 128, 256];

/// Attempts per edge to benchmark.
const ITERATIONS_PER_EDGE: &[usize] = &[1, 10];

fn rewire_generate_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("rewire_generate");
    group.sample_size(20);

    for &nodes in NODE_COUNTS {
        let connectome = SpatialConnectome::generate(&SpatialConfig {
            nodes,
            reach: REACH,
            seed: SEED,
        })?;
        let edges = connectome.weights().edge_count();

        for &iterations_per_edge in ITERATIONS_PER_EDGE {
            let generator = GeneratorBuilder::new()
                .with_random_seed(SEED)
                .with_max_iterations(edges.saturating_mul(iterations_per_edge))
                .build()?;
            let params = RewireBenchParams {
                nodes,
                iterations_per_edge,
            };
            group.bench_with_input(
                BenchmarkId::from_parameter(&params),
                &(&generator, &connectome),
                |b, &(generator, connectome)| {
                    b.iter(|| generator.generate(connectome.weights(), connectome.distances()));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn rewire_step_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("rewire_step");

    for &nodes in NODE_COUNTS {
        let connectome = SpatialConnectome::generate(&SpatialConfig {
            nodes,
            reach: REACH,
            seed: SEED,
        })?;
        let generator = GeneratorBuilder::new()
            .with_swap_rule(SwapRule::TargetSlope {
                slope: 0.0,
                temperature: 0.05,
            })
            .build()?;
        let mut session = generator.session(connectome.weights(), connectome.distances())?;
        let mut rng = seeded_rng(SEED);

        group.bench_function(BenchmarkId::new("target_slope", nodes), |b| {
            b.iter(|| session.step(&mut rng));
        });
    }

    group.finish();
    Ok(())
}

fn rewire_generate(c: &mut Criterion) {
    if let Err(err) = rewire_generate_impl(c) {
        panic!("rewire_generate benchmark setup failed: {err}");
    }
}

fn rewire_step(c: &mut Criterion) {
    if let Err(err) = rewire_step_impl(c) {
        panic!("rewire_step benchmark setup failed: {err}");
    }
}

criterion_group!(benches, rewire_generate, rewire_step);
criterion_main!(benches);
