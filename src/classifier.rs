use crate::dataset::{Class, Dataset};
use crate::error::{Error, Result};
use crate::metrics::accuracy_score;
use crate::{Matrix, Vector};
use std::fmt::Debug;

/// Common interface for the binary classifiers.
///
/// Every implementation answers point queries once fitted; `predict` and
/// `score` are the batched forms over ndarray inputs.
pub trait Classifier: Debug {
    /// Short display name of the estimator.
    fn name(&self) -> &'static str;

    /// Fit the model to a labelled dataset.
    fn fit(&mut self, dataset: &Dataset) -> Result<()>;

    /// Class of a single query location.
    fn predict_point(&self, x: f64, y: f64) -> Result<Class>;

    /// Classes of every row of an `(n, 2)` matrix, as `+1`/`-1`.
    fn predict(&self, x: &Matrix) -> Result<Vector> {
        if x.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: x.ncols() });
        }
        x.rows()
            .into_iter()
            .map(|row| self.predict_point(row[0], row[1]).map(Class::as_f64))
            .collect::<Result<Vec<_>>>()
            .map(Vector::from_vec)
    }

    /// Accuracy on a labelled dataset.
    fn score(&self, dataset: &Dataset) -> Result<f64> {
        let predictions = self.predict(&dataset.features())?;
        accuracy_score(&dataset.labels()?, &predictions)
    }
}
