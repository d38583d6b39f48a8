use thiserror::Error;

use crate::dataset::Class;

/// Errors returned by the estimators in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer points than the algorithm needs.
    #[error("{algorithm} needs at least {required} points, got {found}")]
    TooFewPoints {
        algorithm: &'static str,
        required: usize,
        found: usize,
    },

    /// A binary classifier was given points of only one class.
    #[error("{algorithm} needs points from both classes, none of class {class}")]
    MissingClass {
        algorithm: &'static str,
        class: Class,
    },

    #[error("point {index} has no class label")]
    UnlabeledPoint {
        index: usize,
    },

    /// The geometry of the input admits no answer and no fallback exists.
    #[error("degenerate geometry in {algorithm}: {reason}")]
    DegenerateGeometry {
        algorithm: &'static str,
        reason: &'static str,
    },

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// `predict` was called before `fit`.
    #[error("{estimator} not fitted, call fit() first")]
    NotFitted {
        estimator: &'static str,
    },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
    },

    #[error("invalid run configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// True when the input simply does not contain enough data: too few points,
    /// or one of the two classes missing.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Error::TooFewPoints { .. } | Error::MissingClass { .. })
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
