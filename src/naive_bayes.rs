//! Gaussian naive Bayes over the two coordinates.

use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset, LabeledPoint};
use crate::error::{Error, Result};
use crate::stats::{mean, sample_variance};
use crate::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::info;

/// Added to every sample variance with more than one point.
const VAR_SMOOTHING: f64 = 0.1;

/// Variance used when a class has a single point.
const SINGLE_POINT_VARIANCE: f64 = 1.0;

/// Prior and per-feature Gaussian parameters of one class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub prior: f64,
    pub mean_x: f64,
    pub var_x: f64,
    pub mean_y: f64,
    pub var_y: f64,
}

impl ClassStats {
    pub fn std_x(&self) -> f64 {
        self.var_x.sqrt()
    }

    pub fn std_y(&self) -> f64 {
        self.var_y.sqrt()
    }

    /// Log of `prior * N(x; mean_x, var_x) * N(y; mean_y, var_y)`.
    fn log_joint(&self, x: f64, y: f64) -> f64 {
        self.prior.ln() + log_gaussian(x, self.mean_x, self.var_x) + log_gaussian(y, self.mean_y, self.var_y)
    }
}

/// Normalised posterior for one query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posterior {
    pub class: Class,
    pub positive_prob: f64,
    pub negative_prob: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    pub positive: ClassStats,
    pub negative: ClassStats,
}

impl NaiveBayesModel {
    pub fn stats(&self, class: Class) -> &ClassStats {
        match class {
            Class::Positive => &self.positive,
            Class::Negative => &self.negative,
        }
    }

    /// Equal posteriors go to `-1`.
    pub fn posterior(&self, x: f64, y: f64) -> Posterior {
        let log_positive = self.positive.log_joint(x, y);
        let log_negative = self.negative.log_joint(x, y);

        let log_ratio = log_negative - log_positive;
        let positive_prob = if log_ratio.is_nan() {
            // Both squared offsets overflowed.
            self.far_field_positive_prob(x, y)
        } else {
            1.0 / (1.0 + log_ratio.exp())
        };
        let negative_prob = 1.0 - positive_prob;

        let class = if positive_prob > negative_prob {
            Class::Positive
        } else {
            Class::Negative
        };
        Posterior { class, positive_prob, negative_prob }
    }

    /// Probability of `+1` far enough out that only the quadratic terms
    /// matter. Offsets are rescaled by the largest one before squaring; equal
    /// terms give one half.
    fn far_field_positive_prob(&self, x: f64, y: f64) -> f64 {
        let scale = [
            x - self.positive.mean_x,
            y - self.positive.mean_y,
            x - self.negative.mean_x,
            y - self.negative.mean_y,
        ]
        .iter()
        .fold(0.0_f64, |largest, offset| largest.max(offset.abs()));

        let quadratic = |stats: &ClassStats| {
            ((x - stats.mean_x) / scale).powi(2) / stats.var_x + ((y - stats.mean_y) / scale).powi(2) / stats.var_y
        };
        let positive = quadratic(&self.positive);
        let negative = quadratic(&self.negative);

        if positive < negative {
            1.0
        } else if negative < positive {
            0.0
        } else {
            0.5
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GaussianNaiveBayes {
    pub model: Option<NaiveBayesModel>,
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn posterior(&self, x: f64, y: f64) -> Result<Posterior> {
        let model = self.model.as_ref().ok_or(Error::NotFitted { estimator: "GaussianNaiveBayes" })?;
        Ok(model.posterior(x, y))
    }

    /// Probability of class `+1` for every row of an `(n, 2)` matrix.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let model = self.model.as_ref().ok_or(Error::NotFitted { estimator: "GaussianNaiveBayes" })?;
        if x.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: x.ncols() });
        }
        Ok(x.rows().into_iter().map(|row| model.posterior(row[0], row[1]).positive_prob).collect())
    }
}

impl Classifier for GaussianNaiveBayes {
    fn name(&self) -> &'static str {
        "gaussian naive bayes"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let points = dataset.require_both_classes("naive bayes")?;

        let model = NaiveBayesModel {
            positive: class_stats(&points, Class::Positive)?,
            negative: class_stats(&points, Class::Negative)?,
        };
        info!(
            n_points = points.len(),
            positive_prior = model.positive.prior,
            negative_prior = model.negative.prior,
            "naive bayes fitted"
        );

        self.model = Some(model);
        Ok(())
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        self.posterior(x, y).map(|p| p.class)
    }
}

fn class_stats(points: &[LabeledPoint], class: Class) -> Result<ClassStats> {
    let xs: Vec<f64> = points.iter().filter(|p| p.class == class).map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().filter(|p| p.class == class).map(|p| p.y).collect();

    let missing = || Error::MissingClass { algorithm: "naive bayes", class };
    let mean_x = mean(&xs).ok_or_else(missing)?;
    let mean_y = mean(&ys).ok_or_else(missing)?;

    Ok(ClassStats {
        prior: xs.len() as f64 / points.len() as f64,
        mean_x,
        var_x: smoothed_variance(&xs, mean_x),
        mean_y,
        var_y: smoothed_variance(&ys, mean_y),
    })
}

fn smoothed_variance(values: &[f64], mean: f64) -> f64 {
    sample_variance(values, mean).map_or(SINGLE_POINT_VARIANCE, |v| v + VAR_SMOOTHING)
}

fn log_gaussian(value: f64, mean: f64, variance: f64) -> f64 {
    -(value - mean).powi(2) / (2.0 * variance) - 0.5 * (2.0 * PI * variance).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Point;
    use ndarray::array;

    fn two_groups() -> Dataset {
        Dataset::new(vec![
            Point::labeled(1.0, 1.0, Class::Positive),
            Point::labeled(2.0, 1.0, Class::Positive),
            Point::labeled(1.0, 2.0, Class::Positive),
            Point::labeled(-1.0, -1.0, Class::Negative),
            Point::labeled(-2.0, -1.0, Class::Negative),
        ])
    }

    #[test]
    fn test_naive_bayes_class_stats() {
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&two_groups()).unwrap();
        let model = nb.model.unwrap();

        assert!((model.positive.prior - 0.6).abs() < 1e-12);
        assert!((model.negative.prior - 0.4).abs() < 1e-12);
        assert!((model.positive.mean_x - 4.0 / 3.0).abs() < 1e-12);
        // Sample variance of [1, 2, 1] is 1/3, plus smoothing.
        assert!((model.positive.var_x - (1.0 / 3.0 + 0.1)).abs() < 1e-12);
        // Both negative points share y = -1.
        assert!((model.negative.var_y - 0.1).abs() < 1e-12);
        assert!((model.negative.std_y() - 0.1_f64.sqrt()).abs() < 1e-12);
        assert_eq!(model.stats(Class::Negative), &model.negative);
    }

    #[test]
    fn test_naive_bayes_single_point_variance() {
        let dataset = Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Positive),
            Point::labeled(3.0, 3.0, Class::Negative),
            Point::labeled(4.0, 5.0, Class::Negative),
        ]);
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&dataset).unwrap();

        let model = nb.model.unwrap();
        assert_eq!(model.positive.var_x, 1.0);
        assert_eq!(model.positive.var_y, 1.0);
    }

    #[test]
    fn test_naive_bayes_predicts_training_groups() {
        let dataset = two_groups();
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&dataset).unwrap();

        for p in dataset.points() {
            assert_eq!(nb.predict_point(p.x, p.y).unwrap(), p.class.unwrap());
        }
    }

    #[test]
    fn test_naive_bayes_probabilities_sum_to_one() {
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&two_groups()).unwrap();

        for &(x, y) in &[(0.0, 0.0), (1.5, 1.5), (-1.5, -1.0), (500.0, -500.0), (1e6, 1e6)] {
            let posterior = nb.posterior(x, y).unwrap();
            assert!((posterior.positive_prob + posterior.negative_prob - 1.0).abs() < 1e-9);
            assert!(posterior.positive_prob.is_finite());
        }
    }

    #[test]
    fn test_naive_bayes_extreme_queries_stay_normalised() {
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&two_groups()).unwrap();

        // Squared offsets overflow here; the wider class (var_x 0.6 vs 0.43) wins.
        let posterior = nb.posterior(1e200, 0.0).unwrap();
        assert_eq!(posterior.class, Class::Negative);
        assert_eq!(posterior.positive_prob, 0.0);
        assert_eq!(posterior.negative_prob, 1.0);

        for &(x, y) in &[(-1e200, 1e200), (f64::MAX, f64::MIN), (0.0, 1e300), (f64::INFINITY, 0.0)] {
            let posterior = nb.posterior(x, y).unwrap();
            assert!(!posterior.positive_prob.is_nan());
            assert!((posterior.positive_prob + posterior.negative_prob - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_naive_bayes_equal_posteriors_go_negative() {
        let stats = ClassStats { prior: 0.5, mean_x: 0.0, var_x: 1.0, mean_y: 0.0, var_y: 1.0 };
        let model = NaiveBayesModel { positive: stats, negative: stats };

        let posterior = model.posterior(0.3, -0.7);
        assert_eq!(posterior.class, Class::Negative);
        assert!((posterior.positive_prob - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_naive_bayes_predict_proba() {
        let mut nb = GaussianNaiveBayes::new();
        nb.fit(&two_groups()).unwrap();

        let probabilities = nb.predict_proba(&array![[1.0, 1.0], [-1.5, -1.0]]).unwrap();
        assert!(probabilities[0] > 0.5);
        assert!(probabilities[1] < 0.5);
        assert!(nb.predict_proba(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_naive_bayes_needs_both_classes() {
        let dataset = Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Negative),
            Point::labeled(1.0, 0.0, Class::Negative),
        ]);
        let mut nb = GaussianNaiveBayes::new();
        assert!(nb.fit(&dataset).unwrap_err().is_insufficient_data());
        assert!(nb.posterior(0.0, 0.0).is_err());
    }
}
