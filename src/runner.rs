//! Algorithm selection and the single-shot `run` entry point.

use crate::classifier::Classifier;
use crate::cluster::{Dbscan, DbscanResult, KMeans, KMeansResult};
use crate::config::RunConfig;
use crate::dataset::{Class, Dataset};
use crate::error::{Error, Result};
use crate::linear_model::{CentroidSeparator, LogisticRegression};
use crate::naive_bayes::GaussianNaiveBayes;
use crate::neighbors::KNeighborsClassifier;
use crate::tree::{DecisionTreeClassifier, RandomForestClassifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Svm,
    Knn,
    DecisionTree,
    RandomForest,
    LogisticRegression,
    NaiveBayes,
    #[serde(rename = "kmeans")]
    KMeans,
    Dbscan,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Svm,
        Algorithm::Knn,
        Algorithm::DecisionTree,
        Algorithm::RandomForest,
        Algorithm::LogisticRegression,
        Algorithm::NaiveBayes,
        Algorithm::KMeans,
        Algorithm::Dbscan,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Svm => "svm",
            Algorithm::Knn => "knn",
            Algorithm::DecisionTree => "decision-tree",
            Algorithm::RandomForest => "random-forest",
            Algorithm::LogisticRegression => "logistic-regression",
            Algorithm::NaiveBayes => "naive-bayes",
            Algorithm::KMeans => "kmeans",
            Algorithm::Dbscan => "dbscan",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Svm => {
                "Support Vector Machine (SVM) finds the hyperplane that best separates classes with the maximum margin between support vectors."
            }
            Algorithm::Knn => {
                "K-Nearest Neighbors classifies points based on the majority class of their k closest neighbors in the feature space."
            }
            Algorithm::DecisionTree => {
                "Decision Tree partitions the space recursively based on features to create regions with homogeneous class labels."
            }
            Algorithm::RandomForest => {
                "Random Forest combines multiple decision trees to improve accuracy and control overfitting."
            }
            Algorithm::LogisticRegression => {
                "Logistic Regression uses a logistic function to model probability and create a linear decision boundary."
            }
            Algorithm::NaiveBayes => "Naive Bayes applies Bayes theorem with strong independence assumptions between features.",
            Algorithm::KMeans => {
                "K-Means groups data into k clusters by minimizing the distance between points and their cluster centroid."
            }
            Algorithm::Dbscan => {
                "DBSCAN identifies clusters as dense regions separated by regions of lower density, without specifying cluster count."
            }
        }
    }

    /// Whether the algorithm consumes class labels.
    pub fn is_supervised(self) -> bool {
        !matches!(self, Algorithm::KMeans | Algorithm::Dbscan)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| Error::InvalidParameter {
                name: "algorithm",
                message: format!("unknown algorithm '{}'", s),
            })
    }
}

/// What a run produces: a fitted classifier to query, or per-point cluster labels.
#[derive(Debug)]
pub enum Outcome {
    Classifier(Box<dyn Classifier>),
    KMeans(KMeansResult),
    Dbscan(DbscanResult),
}

impl Outcome {
    pub fn classifier(&self) -> Option<&dyn Classifier> {
        match self {
            Outcome::Classifier(model) => Some(model.as_ref()),
            _ => None,
        }
    }

    /// Cluster label of every input point; k-means labels are 0-based centroid
    /// indices, DBSCAN labels use 0 for noise.
    pub fn cluster_labels(&self) -> Option<&[usize]> {
        match self {
            Outcome::Classifier(_) => None,
            Outcome::KMeans(result) => Some(&result.assignments),
            Outcome::Dbscan(result) => Some(&result.labels),
        }
    }

    /// Class of `(x, y)` under a fitted classifier.
    pub fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        match self.classifier() {
            Some(model) => model.predict_point(x, y),
            None => Err(Error::NotFitted { estimator: "classifier" }),
        }
    }
}

/// Fit `algorithm` on `dataset`, filling unset parameters from the size-based
/// heuristics.
pub fn run(algorithm: Algorithm, dataset: &Dataset, config: &RunConfig) -> Result<Outcome> {
    dataset.require_points(algorithm.id(), 2)?;
    let n = dataset.len();
    debug!(%algorithm, n_points = n, "starting run");

    match algorithm {
        Algorithm::Svm => fit_classifier(CentroidSeparator::new(), dataset),
        Algorithm::Knn => fit_classifier(KNeighborsClassifier::new(config.knn_k_for(n)), dataset),
        Algorithm::DecisionTree => fit_classifier(DecisionTreeClassifier::new().max_depth(config.max_depth), dataset),
        Algorithm::RandomForest => {
            let mut forest = RandomForestClassifier::new(config.n_trees_for(n)).max_depth(config.max_depth);
            if let Some(seed) = config.seed {
                forest = forest.random_state(seed);
            }
            fit_classifier(forest, dataset)
        }
        Algorithm::LogisticRegression => fit_classifier(
            LogisticRegression::with_params(config.learning_rate, config.iterations),
            dataset,
        ),
        Algorithm::NaiveBayes => fit_classifier(GaussianNaiveBayes::new(), dataset),
        Algorithm::KMeans => {
            let mut kmeans = KMeans::new(config.n_clusters_for(n)).max_iter(config.kmeans_max_iter);
            if let Some(seed) = config.seed {
                kmeans = kmeans.random_state(seed);
            }
            kmeans.fit(dataset)?;
            let result = kmeans.result.ok_or(Error::NotFitted { estimator: "KMeans" })?;
            Ok(Outcome::KMeans(result))
        }
        Algorithm::Dbscan => {
            let mut dbscan = Dbscan::auto().min_pts(config.dbscan_min_pts_for(n));
            if let Some(epsilon) = config.dbscan_epsilon {
                dbscan = dbscan.epsilon(epsilon);
            }
            dbscan.fit(dataset)?;
            let result = dbscan.result.ok_or(Error::NotFitted { estimator: "Dbscan" })?;
            Ok(Outcome::Dbscan(result))
        }
    }
}

fn fit_classifier<C: Classifier + 'static>(mut model: C, dataset: &Dataset) -> Result<Outcome> {
    model.fit(dataset)?;
    Ok(Outcome::Classifier(Box::new(model)))
}
