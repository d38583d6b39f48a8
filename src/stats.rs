//! Geometry and summary statistics shared by the estimators.

use crate::dataset::{Class, LabeledPoint, Point};
use serde::{Deserialize, Serialize};

/// A bare coordinate pair, used for centroids and query locations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        euclidean_distance(self.x, self.y, other.x, other.y)
    }
}

impl From<&Point> for Position {
    fn from(p: &Point) -> Self {
        Position::new(p.x, p.y)
    }
}

impl From<&LabeledPoint> for Position {
    fn from(p: &LabeledPoint) -> Self {
        Position::new(p.x, p.y)
    }
}

/// Axis-aligned box enclosing a set of points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box containing every position, `None` when there are none.
    pub fn enclosing(positions: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let init = Self { min_x: first.x, max_x: first.x, min_y: first.y, max_y: first.y };

        Some(iter.fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[inline]
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance `Σ(v - mean)² / (n - 1)`, `None` when `n <= 1`.
pub fn sample_variance(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() <= 1 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Gini impurity `1 - p₊² - p₋²` of a binary set with `positive` of `total`
/// points in class `+1`. An empty set is pure.
pub fn gini_impurity(positive: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positive as f64 / total as f64;
    let q = 1.0 - p;
    1.0 - (p * p + q * q)
}

/// Size-weighted Gini impurity of a two-way partition, each side given as
/// `(positive, total)`.
pub fn weighted_gini(left: (usize, usize), right: (usize, usize)) -> f64 {
    let total = (left.1 + right.1) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let left_weight = left.1 as f64 / total;
    let right_weight = right.1 as f64 / total;
    left_weight * gini_impurity(left.0, left.1) + right_weight * gini_impurity(right.0, right.1)
}

/// Number of points of class `+1`.
pub(crate) fn count_positive(points: &[LabeledPoint]) -> usize {
    points.iter().filter(|p| p.class == Class::Positive).count()
}

/// Arithmetic mean position, `None` for an empty slice.
pub fn centroid(positions: &[Position]) -> Option<Position> {
    if positions.is_empty() {
        return None;
    }
    let n = positions.len() as f64;
    let (sx, sy) = positions.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Position::new(sx / n, sy / n))
}
