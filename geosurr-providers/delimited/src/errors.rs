use geosurr_core::SurrogateError;
use thiserror::Error;

/// Errors raised while reading or writing delimited matrices.
///
/// Row and column positions count matrix cells, excluding any header row or
/// index column.
#[derive(Debug, Error)]
pub enum DelimitedMatrixError {
    #[error("input contains no matrix rows")]
    Empty,
    #[error("row {row} has {actual} fields but expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{rows} rows of {fields} fields do not form a square matrix")]
    NotSquare { rows: usize, fields: usize },
    #[error("cell ({row}, {column}) is empty")]
    EmptyCell { row: usize, column: usize },
    #[error("cell ({row}, {column}) is not a number: `{value}`")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("header label `{header}` at position {position} does not match row label `{index}`")]
    LabelMismatch {
        position: usize,
        header: String,
        index: String,
    },
    #[error("{labels} labels supplied for a matrix of order {order}")]
    LabelCount { labels: usize, order: usize },
    #[error("no column named `{name}` in the header")]
    MissingColumn { name: String },
    #[error("matrix error: {0}")]
    Matrix(#[from] SurrogateError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
