use super::decision_tree::{grow, Feature, TreeNode};
use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset, LabeledPoint};
use crate::error::{Error, Result};
use crate::random::rng_from_state;
use rand::Rng;
use tracing::info;

/// Bagged ensemble of classification trees.
#[derive(Clone, Debug, PartialEq)]
pub struct Forest {
    trees: Vec<TreeNode>,
}

impl Forest {
    /// Grows `n_trees` trees, each on its own bootstrap resample and with a
    /// single uniformly drawn feature considered at every split.
    pub fn build<R: Rng + ?Sized>(points: &[LabeledPoint], n_trees: usize, max_depth: usize, rng: &mut R) -> Forest {
        let mut trees = Vec::with_capacity(n_trees);
        for _ in 0..n_trees {
            let sample = bootstrap_sample(points, rng);
            let mut random_feature = || {
                if rng.gen_bool(0.5) { Feature::X_ONLY } else { Feature::Y_ONLY }
            };
            trees.push(grow(&sample, 0, max_depth, &mut random_feature));
        }
        Forest { trees }
    }

    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Number of trees voting `(positive, negative)` at `(x, y)`.
    pub fn votes(&self, x: f64, y: f64) -> (usize, usize) {
        let positive = self.trees.iter().filter(|t| t.predict(x, y) == Class::Positive).count();
        (positive, self.trees.len() - positive)
    }

    /// Majority vote across trees; ties go to [`Class::Positive`].
    pub fn predict(&self, x: f64, y: f64) -> Class {
        let (positive, negative) = self.votes(x, y);
        Class::majority(positive, negative)
    }
}

/// `points.len()` independent uniform draws with replacement.
fn bootstrap_sample<R: Rng + ?Sized>(points: &[LabeledPoint], rng: &mut R) -> Vec<LabeledPoint> {
    let n = points.len();
    (0..n).map(|_| points[rng.gen_range(0..n)]).collect()
}

#[derive(Clone, Debug)]
pub struct RandomForestClassifier {
    pub forest: Option<Forest>,
    n_estimators: usize,
    max_depth: usize,
    random_state: Option<u64>,
}

impl RandomForestClassifier {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            forest: None,
            n_estimators,
            max_depth: 3,
            random_state: None,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Fits drawing every random choice from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(&mut self, dataset: &Dataset, rng: &mut R) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidParameter {
                name: "n_estimators",
                message: "must be > 0".to_string(),
            });
        }
        let points = dataset.require_both_classes("random forest")?;

        let forest = Forest::build(&points, self.n_estimators, self.max_depth, rng);
        info!(
            n_points = points.len(),
            n_trees = forest.len(),
            max_depth = self.max_depth,
            "random forest fitted"
        );
        self.forest = Some(forest);
        Ok(())
    }
}

impl Classifier for RandomForestClassifier {
    fn name(&self) -> &'static str {
        "random forest"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let mut rng = rng_from_state(self.random_state);
        self.fit_with_rng(dataset, &mut rng)
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        let forest = self.forest.as_ref().ok_or(Error::NotFitted { estimator: "RandomForestClassifier" })?;
        Ok(forest.predict(x, y))
    }
}
