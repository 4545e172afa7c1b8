//! Division-level rank correlation between connectivity matrices.

use geosurr_core::{
    DivisionCorrelation, SquareMatrix, SurrogateError, SurrogateErrorCode, division_correlation,
};
use geosurr_test_support::recording::capture;
use rstest::{fixture, rstest};

const LABELS: [&str; 4] = ["Isocortex", "Isocortex", "OLF", "OLF"];

/// Order-8 matrix with distinct entries `8 * row + column`.
#[fixture]
fn distinct() -> SquareMatrix {
    let values = (0..64_u32).map(f64::from).collect();
    SquareMatrix::from_row_major(8, values).expect("64 values fill an 8x8 matrix")
}

fn mapped(matrix: &SquareMatrix, f: impl Fn(f64) -> f64) -> SquareMatrix {
    let values = matrix.as_slice().iter().copied().map(f).collect();
    SquareMatrix::from_row_major(matrix.order(), values).expect("order is unchanged")
}

fn assert_every_block(table: &DivisionCorrelation, expected: f64) {
    for row in table.to_rows() {
        for value in row {
            assert!((value - expected).abs() < 1e-12, "{value} != {expected}");
        }
    }
}

#[rstest]
fn monotone_transform_correlates_perfectly(distinct: SquareMatrix) {
    let squared = mapped(&distinct, |value| value * value);
    let table = division_correlation(&distinct, &squared, &LABELS).expect("inputs are valid");
    assert_eq!(table.divisions(), ["Isocortex", "OLF"]);
    assert_every_block(&table, 1.0);
}

#[rstest]
fn reversed_order_anticorrelates(distinct: SquareMatrix) {
    let reversed = mapped(&distinct, |value| 100.0 - value);
    let table = division_correlation(&distinct, &reversed, &LABELS).expect("inputs are valid");
    assert_every_block(&table, -1.0);
    assert_eq!(
        table.column_labels(),
        ["Isocortex-I", "OLF-I", "Isocortex-C", "OLF-C"]
    );
    assert_eq!(table.to_rows().len(), 2);
}

#[rstest]
fn blocks_read_the_hemisphere_halves(distinct: SquareMatrix) {
    // Scramble only the contralateral half of the second matrix.
    let mut rows = distinct.to_rows();
    for row in &mut rows {
        row[4..].reverse();
    }
    let second = SquareMatrix::try_from_rows(rows).expect("rows are square");
    let table = division_correlation(&distinct, &second, &LABELS).expect("inputs are valid");
    assert!((table.ipsilateral(0, 1).expect("defined") - 1.0).abs() < 1e-12);
    assert!((table.ipsilateral(1, 0).expect("defined") - 1.0).abs() < 1e-12);
    // Each contralateral block now pairs ranks 1,2,3,4 with 2,1,4,3.
    assert!((table.contralateral(0, 0).expect("defined") - 0.6).abs() < 1e-12);
    assert!((table.contralateral(0, 1).expect("defined") - 0.6).abs() < 1e-12);
}

#[rstest]
fn divisions_follow_atlas_order(distinct: SquareMatrix) {
    let labels = ["MB", "MB", "Isocortex", "Isocortex"];
    let table = division_correlation(&distinct, &distinct, &labels).expect("inputs are valid");
    assert_eq!(table.divisions(), ["Isocortex", "MB"]);
    assert_eq!(table.ipsilateral(2, 0), None);
}

#[rstest]
fn single_node_blocks_are_undefined(distinct: SquareMatrix) {
    let labels = ["Isocortex", "Isocortex", "Isocortex", "CB"];
    let table = division_correlation(&distinct, &distinct, &labels).expect("inputs are valid");
    assert_eq!(table.divisions(), ["Isocortex", "CB"]);
    assert_eq!(table.ipsilateral(1, 1), None);
    assert!(table.to_rows()[1][1].is_nan());
    assert!((table.ipsilateral(0, 0).expect("nine samples") - 1.0).abs() < 1e-12);
}

#[rstest]
fn unknown_division_is_rejected(distinct: SquareMatrix) {
    let labels = ["Isocortex", "OLF", "Thalamus", "OLF"];
    let err = division_correlation(&distinct, &distinct, &labels)
        .expect_err("`Thalamus` is not an atlas division");
    assert_eq!(err.code(), SurrogateErrorCode::UnknownDivision);
    assert!(matches!(err, SurrogateError::UnknownDivision { node: 2, ref label } if label == "Thalamus"));
}

#[rstest]
fn mismatched_orders_are_rejected(distinct: SquareMatrix) {
    let smaller = SquareMatrix::zeros(6);
    let err = division_correlation(&distinct, &smaller, &LABELS).expect_err("orders differ");
    assert_eq!(
        err,
        SurrogateError::DivisionCount {
            divisions: 4,
            expected: 8,
            order: 6,
        }
    );
}

#[rstest]
fn non_finite_entries_are_rejected(distinct: SquareMatrix) {
    let mut rows = distinct.to_rows();
    rows[1][6] = f64::NAN;
    let second = SquareMatrix::try_from_rows(rows).expect("rows are square");
    let err = division_correlation(&distinct, &second, &LABELS).expect_err("NaN entry");
    assert_eq!(err.code(), SurrogateErrorCode::NonFinite);
}

#[rstest]
fn correlation_is_instrumented(distinct: SquareMatrix) {
    let (result, log) = capture(|| division_correlation(&distinct, &distinct, &LABELS));
    result.expect("inputs are valid");
    let span = log
        .span("core.division_correlation")
        .expect("span must be recorded");
    assert_eq!(span.fields.get("nodes"), Some(&"8".to_owned()));
    assert_eq!(span.fields.get("labels"), Some(&"4".to_owned()));
}
