//! Inputs shared by the integration suites.

use geosurr_core::SquareMatrix;

/// Builds a matrix from nested rows, panicking on malformed fixtures.
#[must_use]
pub fn matrix(rows: Vec<Vec<f64>>) -> SquareMatrix {
    SquareMatrix::try_from_rows(rows).expect("fixture rows must be square")
}

/// Four nodes with edges (0,1)=2.0 and (2,3)=5.0, plus distances 1..6.
#[must_use]
pub fn two_edges() -> (SquareMatrix, SquareMatrix) {
    let weights = matrix(vec![
        vec![0.0, 2.0, 0.0, 0.0],
        vec![2.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 5.0],
        vec![0.0, 0.0, 5.0, 0.0],
    ]);
    let distances = matrix(vec![
        vec![0.0, 1.0, 2.0, 3.0],
        vec![1.0, 0.0, 4.0, 5.0],
        vec![2.0, 4.0, 0.0, 6.0],
        vec![3.0, 5.0, 6.0, 0.0],
    ]);
    (weights, distances)
}

/// Regions on a `side × side` grid with weights decaying in distance.
///
/// Node pairs further apart than `reach` are left unconnected. Weight jitter
/// comes from a fixed integer hash so the fixture never changes.
#[must_use]
pub fn grid_connectome(side: usize, reach: f64) -> (SquareMatrix, SquareMatrix) {
    let order = side * side;
    let position = |node: usize| ((node % side) as f64, (node / side) as f64);
    let mut weights = vec![0.0; order * order];
    let mut distances = vec![0.0; order * order];
    for i in 0..order {
        for j in (i + 1)..order {
            let (xi, yi) = position(i);
            let (xj, yj) = position(j);
            let distance = (xi - xj).hypot(yi - yj);
            distances[i * order + j] = distance;
            distances[j * order + i] = distance;
            if distance <= reach {
                let jitter = ((i * 31 + j * 17) % 13) as f64 / 13.0;
                let weight = (-distance / 2.0).exp() * (0.5 + jitter);
                weights[i * order + j] = weight;
                weights[j * order + i] = weight;
            }
        }
    }
    (
        SquareMatrix::from_row_major(order, weights).expect("grid weights are square"),
        SquareMatrix::from_row_major(order, distances).expect("grid distances are square"),
    )
}
