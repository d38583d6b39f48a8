//! Binary classification and clustering of points in the plane.
//!
//! Every estimator consumes a [`Dataset`] of 2-D [`Point`]s. Classifiers take
//! labels `+1`/`-1` and answer [`Classifier::predict_point`] for any query
//! location; clustering algorithms ignore labels and return one cluster label
//! per input point.
//!
//! ```rust
//! use planeml::{run, Algorithm, Class, Dataset, Point, RunConfig};
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(-2.0, -1.0, Class::Positive),
//!     Point::labeled(-1.0, -2.0, Class::Positive),
//!     Point::labeled(1.0, 2.0, Class::Negative),
//!     Point::labeled(2.0, 1.0, Class::Negative),
//! ]);
//!
//! let outcome = run(Algorithm::DecisionTree, &dataset, &RunConfig::default()).unwrap();
//! assert_eq!(outcome.predict_point(-3.0, -3.0).unwrap(), Class::Positive);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod classifier;
pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod heuristics;
pub mod linear_model;
pub mod metrics;
pub mod naive_bayes;
pub mod neighbors;
mod random;
pub mod runner;
pub mod stats;
pub mod tree;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

pub use classifier::Classifier;
pub use cluster::{estimate_epsilon, Dbscan, DbscanResult, KMeans, KMeansResult, NOISE};
pub use config::RunConfig;
pub use dataset::{Class, Dataset, LabeledPoint, Point};
pub use error::{Error, Result};
pub use linear_model::{BoundaryLine, CentroidSeparator, LogisticModel, LogisticRegression, SeparatorModel};
pub use metrics::accuracy_score;
pub use naive_bayes::{ClassStats, GaussianNaiveBayes, NaiveBayesModel, Posterior};
pub use neighbors::KNeighborsClassifier;
pub use runner::{run, Algorithm, Outcome};
pub use stats::{BoundingBox, Position};
pub use tree::{DecisionTreeClassifier, Feature, Forest, RandomForestClassifier, Split, TreeNode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
