//! Topology-preserving surrogate models and matrix utilities.

mod common;

use common::{grid_connectome, matrix};
use geosurr_core::{
    GeometricOptions, SquareMatrix, SurrogateErrorCode, geometric_surrogate, random_surrogate,
    rescale, seeded_rng, to_density,
};
use geosurr_test_support::recording::capture;
use rstest::{fixture, rstest};

#[fixture]
fn connectome() -> (SquareMatrix, SquareMatrix) {
    grid_connectome(5, 2.3)
}

fn assert_close_sorted(mut actual: Vec<f64>, mut expected: Vec<f64>, relative: f64) {
    actual.sort_by(f64::total_cmp);
    expected.sort_by(f64::total_cmp);
    for (got, want) in actual.iter().zip(&expected) {
        assert!(
            (got - want).abs() <= relative * want.abs(),
            "{got} differs from {want} by more than {relative}"
        );
    }
}

fn assert_topology_kept(surrogate: &SquareMatrix, input: &SquareMatrix) {
    assert!(surrogate.is_symmetric(1e-12));
    for node in 0..surrogate.order() {
        assert_eq!(surrogate.get(node, node), Some(0.0));
    }
    assert_eq!(surrogate.upper_nonzero_pairs(), input.upper_nonzero_pairs());
}

#[rstest]
fn geometric_surrogate_keeps_topology_and_strengths(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, distances) = connectome;
    let surrogate = geometric_surrogate(&weights, &distances, Some(2021)).expect("valid input");
    assert_topology_kept(&surrogate, &weights);
    assert_close_sorted(surrogate.strengths(), weights.strengths(), 0.05);
    assert_ne!(surrogate, weights);
}

#[rstest]
fn random_surrogate_tracks_each_node_strength(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, _) = connectome;
    let surrogate = random_surrogate(&weights, Some(2021)).expect("valid input");
    assert_topology_kept(&surrogate, &weights);
    for (got, want) in surrogate.strengths().iter().zip(weights.strengths()) {
        assert!((got - want).abs() <= 0.05 * want, "{got} far from {want}");
    }
}

#[rstest]
fn seeded_models_are_reproducible(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, distances) = connectome;
    let model = GeometricOptions::new()
        .with_random_seed(9)
        .build()
        .expect("options are valid");
    assert_eq!(
        model.geometric(&weights, &distances).expect("valid input"),
        model.geometric(&weights, &distances).expect("valid input"),
    );
    assert_eq!(
        model.shuffled(&weights).expect("valid input"),
        model
            .shuffled_with_rng(&weights, &mut seeded_rng(9))
            .expect("valid input"),
    );
}

#[rstest]
fn geometric_model_is_instrumented(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, distances) = connectome;
    let model = GeometricOptions::new()
        .with_mean_order(2)
        .with_random_seed(1)
        .build()
        .expect("options are valid");
    let (result, log) = capture(|| model.geometric(&weights, &distances));
    result.expect("valid input");
    let span = log.span("core.geometric").expect("core.geometric span must exist");
    assert_eq!(span.fields.get("mean_order"), Some(&"2".to_owned()));
    assert_eq!(span.fields.get("nodes"), Some(&"25".to_owned()));
}

#[rstest]
fn edges_without_a_distance_are_left_out(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, distances) = connectome;
    let mut rows = distances.to_rows();
    rows[0][1] = f64::NAN;
    rows[1][0] = f64::NAN;
    let distances = matrix(rows);

    let surrogate = geometric_surrogate(&weights, &distances, Some(2021))
        .expect("a NaN distance marks a missing pair");

    assert!(surrogate.is_symmetric(1e-12));
    assert_eq!(surrogate.get(0, 1), Some(0.0));
    let expected: Vec<(usize, usize)> = weights
        .upper_nonzero_pairs()
        .into_iter()
        .filter(|&pair| pair != (0, 1))
        .collect();
    assert_eq!(surrogate.upper_nonzero_pairs(), expected);
}

#[test]
fn infinite_distance_is_still_rejected() {
    let (weights, distances) = grid_connectome(3, 1.5);
    let mut rows = distances.to_rows();
    rows[0][2] = f64::INFINITY;
    rows[2][0] = f64::INFINITY;
    let err = geometric_surrogate(&weights, &matrix(rows), Some(1))
        .expect_err("infinite distance must fail");
    assert_eq!(err.code(), SurrogateErrorCode::NonFinite);
}

#[test]
fn zero_weight_edges_are_not_edges() {
    let weights = matrix(vec![
        vec![0.0, 1.0, 0.0],
        vec![1.0, 0.0, 2.0],
        vec![0.0, 2.0, 0.0],
    ]);
    let distances = matrix(vec![
        vec![0.0, 1.0, 2.0],
        vec![1.0, 0.0, 1.0],
        vec![2.0, 1.0, 0.0],
    ]);
    let err = geometric_surrogate(&weights, &distances, Some(1)).expect_err("two edges only");
    assert_eq!(err.code(), SurrogateErrorCode::InsufficientEdges);
}

#[rstest]
fn density_threshold_keeps_strongest_edges(connectome: (SquareMatrix, SquareMatrix)) {
    let (weights, _) = connectome;
    let sparse = to_density(&weights, 10.0).expect("valid density");
    assert!(sparse.is_symmetric(0.0));
    assert!(sparse.edge_count() <= weights.edge_count());
    let kept_min = sparse
        .weight_multiset()
        .first()
        .copied()
        .expect("some edges survive");
    for (i, j) in weights.upper_nonzero_pairs() {
        let original = weights.get(i, j).expect("in range");
        if sparse.get(i, j) == Some(0.0) {
            assert!(original < kept_min);
        }
    }
}

#[test]
fn rescale_maps_onto_unit_interval() {
    let scaled = rescale(&[3.0, -1.0, 1.0]);
    assert_eq!(scaled, vec![1.0, 0.0, 0.5]);
}
