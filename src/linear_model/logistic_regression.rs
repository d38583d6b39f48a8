use super::boundary::BoundaryLine;
use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset};
use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fitted linear score `w1*x + w2*y + bias`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub w1: f64,
    pub w2: f64,
    pub bias: f64,
}

impl LogisticModel {
    pub fn decision_function(&self, x: f64, y: f64) -> f64 {
        self.w1 * x + self.w2 * y + self.bias
    }

    /// Probability of class `+1`.
    pub fn probability(&self, x: f64, y: f64) -> f64 {
        sigmoid(self.decision_function(x, y))
    }

    pub fn predict(&self, x: f64, y: f64) -> Class {
        if self.probability(x, y) >= 0.5 {
            Class::Positive
        } else {
            Class::Negative
        }
    }

    /// The 0.5-probability line, `None` while both weights are zero.
    pub fn boundary(&self) -> Option<BoundaryLine> {
        BoundaryLine::from_coefficients(self.w1, self.w2, self.bias)
    }
}

/// Full-batch gradient descent on the log-loss, for a fixed number of
/// iterations from all-zero parameters.
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    pub model: Option<LogisticModel>,
    /// Mean log-loss of the fitted model on its training data.
    pub training_loss: Option<f64>,
    learning_rate: f64,
    iterations: usize,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            model: None,
            training_loss: None,
            learning_rate: 0.1,
            iterations: 100,
        }
    }

    pub fn with_params(learning_rate: f64, iterations: usize) -> Self {
        Self {
            model: None,
            training_loss: None,
            learning_rate,
            iterations,
        }
    }

    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let model = self.model.as_ref().ok_or(Error::NotFitted { estimator: "LogisticRegression" })?;
        if x.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: x.ncols() });
        }
        Ok(x.rows().into_iter().map(|row| model.probability(row[0], row[1])).collect())
    }

    /// Weights `[bias, w1, w2]` after `iterations` steps over a design matrix
    /// whose first column is all ones.
    fn gradient_descent(&self, x: &Matrix, y: &Vector) -> Vector {
        let n_samples = x.nrows() as f64;
        let mut weights = Vector::zeros(x.ncols());

        for _ in 0..self.iterations {
            let predictions = x.dot(&weights).mapv(sigmoid);
            let error = &predictions - y;
            let gradient = x.t().dot(&error) / n_samples;
            weights = &weights - &(gradient * self.learning_rate);
        }

        weights
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &'static str {
        "logistic regression"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "learning_rate",
                message: format!("must be a positive number, got {}", self.learning_rate),
            });
        }
        let points = dataset.require_both_classes("logistic regression")?;

        let mut design = Matrix::ones((points.len(), 3));
        let mut targets = Vector::zeros(points.len());
        for (i, p) in points.iter().enumerate() {
            design[[i, 1]] = p.x;
            design[[i, 2]] = p.y;
            // -1 maps to 0
            targets[i] = if p.class == Class::Positive { 1.0 } else { 0.0 };
        }

        let weights = self.gradient_descent(&design, &targets);
        let model = LogisticModel { w1: weights[1], w2: weights[2], bias: weights[0] };

        let predictions = design.dot(&weights).mapv(sigmoid);
        let loss = logistic_loss(&targets, &predictions);
        debug!(loss, iterations = self.iterations, "logistic regression training loss");
        info!(n_points = points.len(), w1 = model.w1, w2 = model.w2, bias = model.bias, "logistic regression fitted");

        self.model = Some(model);
        self.training_loss = Some(loss);
        Ok(())
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        let model = self.model.as_ref().ok_or(Error::NotFitted { estimator: "LogisticRegression" })?;
        Ok(model.predict(x, y))
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    if z > 500.0 {
        1.0
    } else if z < -500.0 {
        0.0
    } else {
        1.0 / (1.0 + (-z).exp())
    }
}

fn logistic_loss(y_true: &Vector, y_pred: &Vector) -> f64 {
    let epsilon = 1e-15;
    let loss = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&y, &p)| {
            let p = p.clamp(epsilon, 1.0 - epsilon);
            -y * p.ln() - (1.0 - y) * (1.0 - p).ln()
        })
        .sum::<f64>();
    loss / y_true.len() as f64
}
