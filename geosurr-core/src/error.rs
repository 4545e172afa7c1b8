//! Error types for the geosurr core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Identifies which input matrix an error refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MatrixRole {
    /// The weighted adjacency matrix.
    Weights,
    /// The pairwise distance matrix.
    Distances,
}

impl MatrixRole {
    /// Returns the lowercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weights => "weights",
            Self::Distances => "distances",
        }
    }
}

impl fmt::Display for MatrixRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when validating inputs or generating surrogates.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SurrogateError {
    /// A row did not have as many columns as the matrix has rows.
    #[error("matrix is not square: row {row} has {columns} columns but there are {rows} rows")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Number of rows in the matrix.
        rows: usize,
        /// Number of columns found in the offending row.
        columns: usize,
    },
    /// The weight and distance matrices have different orders.
    #[error("weights are {weights}x{weights} but distances are {distances}x{distances}")]
    ShapeMismatch {
        /// Order of the weight matrix.
        weights: usize,
        /// Order of the distance matrix.
        distances: usize,
    },
    /// A pair of mirrored entries differs by more than the tolerance.
    #[error(
        "{matrix} matrix is not symmetric: entries ({row}, {column}) and ({column}, {row}) differ by {difference:e} (tolerance {tolerance:e})"
    )]
    Asymmetric {
        /// Matrix that failed the check.
        matrix: MatrixRole,
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
        /// Absolute difference between the mirrored entries.
        difference: f64,
        /// Tolerance in force when the check ran.
        tolerance: f64,
    },
    /// An entry was NaN or infinite.
    #[error("{matrix} matrix has a non-finite entry at ({row}, {column})")]
    NonFinite {
        /// Matrix that failed the check.
        matrix: MatrixRole,
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
    },
    /// The weight matrix carries a self-loop.
    #[error("weight matrix has a self-loop of weight {weight} at node {node}")]
    SelfLoop {
        /// Node whose diagonal entry is non-zero.
        node: usize,
        /// Diagonal weight found.
        weight: f64,
    },
    /// A distance between two distinct nodes was negative.
    #[error("distance between nodes {row} and {column} is negative ({distance})")]
    NegativeDistance {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
        /// Offending distance.
        distance: f64,
    },
    /// Configuration values were rejected.
    #[error("invalid parameter: {reason}")]
    InvalidParameters {
        /// Human readable description of the rejected value.
        reason: String,
    },
    /// A model that works on log-weights met a non-positive weight.
    #[error("edge ({row}, {column}) has non-positive weight {weight}; log-weight models need positive weights")]
    NonPositiveWeight {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        column: usize,
        /// Offending weight.
        weight: f64,
    },
    /// Too few edges to fit the requested model.
    #[error("{edges} edges present but at least {required} are required")]
    InsufficientEdges {
        /// Edges found in the weight matrix.
        edges: usize,
        /// Edges needed by the model.
        required: usize,
    },
    /// A polynomial fit produced a scale that cannot be divided by.
    #[error("polynomial fit of order {order} is degenerate: {reason}")]
    DegenerateFit {
        /// Order of the failing polynomial.
        order: usize,
        /// Description of the failure.
        reason: &'static str,
    },
    /// A parcellation label is not one of the major brain divisions.
    #[error("node {node} has unknown brain division `{label}`")]
    UnknownDivision {
        /// Node carrying the label.
        node: usize,
        /// Offending label.
        label: String,
    },
    /// A hemisphere-symmetric matrix does not have two nodes per label.
    #[error("{divisions} division labels need a matrix of order {expected}, got {order}")]
    DivisionCount {
        /// Number of division labels supplied.
        divisions: usize,
        /// Order the labels call for.
        expected: usize,
        /// Order of the matrix supplied.
        order: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SurrogateError`] variants.
    enum SurrogateErrorCode for SurrogateError {
        /// A row did not have as many columns as the matrix has rows.
        NotSquare => NotSquare { .. } => "SURROGATE_NOT_SQUARE",
        /// The weight and distance matrices have different orders.
        ShapeMismatch => ShapeMismatch { .. } => "SURROGATE_SHAPE_MISMATCH",
        /// A pair of mirrored entries differs by more than the tolerance.
        Asymmetric => Asymmetric { .. } => "SURROGATE_ASYMMETRIC",
        /// An entry was NaN or infinite.
        NonFinite => NonFinite { .. } => "SURROGATE_NON_FINITE",
        /// The weight matrix carries a self-loop.
        SelfLoop => SelfLoop { .. } => "SURROGATE_SELF_LOOP",
        /// A distance between two distinct nodes was negative.
        NegativeDistance => NegativeDistance { .. } => "SURROGATE_NEGATIVE_DISTANCE",
        /// Configuration values were rejected.
        InvalidParameters => InvalidParameters { .. } => "SURROGATE_INVALID_PARAMETERS",
        /// A model that works on log-weights met a non-positive weight.
        NonPositiveWeight => NonPositiveWeight { .. } => "SURROGATE_NON_POSITIVE_WEIGHT",
        /// Too few edges to fit the requested model.
        InsufficientEdges => InsufficientEdges { .. } => "SURROGATE_INSUFFICIENT_EDGES",
        /// A polynomial fit produced a scale that cannot be divided by.
        DegenerateFit => DegenerateFit { .. } => "SURROGATE_DEGENERATE_FIT",
        /// A parcellation label is not one of the major brain divisions.
        UnknownDivision => UnknownDivision { .. } => "SURROGATE_UNKNOWN_DIVISION",
        /// A hemisphere-symmetric matrix does not have two nodes per label.
        DivisionCount => DivisionCount { .. } => "SURROGATE_DIVISION_COUNT",
    }
}

impl SurrogateError {
    /// Returns `true` for the shape family (`NotSquare`, `ShapeMismatch`).
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(self, Self::NotSquare { .. } | Self::ShapeMismatch { .. })
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SurrogateError>;
