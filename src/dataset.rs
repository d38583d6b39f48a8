use crate::error::{Error, Result};
use crate::{Matrix, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary class label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// Class `+1`.
    Positive,
    /// Class `-1`.
    Negative,
}

impl Class {
    /// Parses a numeric label. Only `1.0` and `-1.0` are accepted.
    pub fn from_label(label: f64) -> Option<Self> {
        if label == 1.0 {
            Some(Class::Positive)
        } else if label == -1.0 {
            Some(Class::Negative)
        } else {
            None
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Class::Positive => 1.0,
            Class::Negative => -1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Class::Positive => Class::Negative,
            Class::Negative => Class::Positive,
        }
    }

    /// Majority vote between two counts. Ties go to [`Class::Positive`].
    pub fn majority(positive: usize, negative: usize) -> Self {
        if positive >= negative {
            Class::Positive
        } else {
            Class::Negative
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Positive => write!(f, "+1"),
            Class::Negative => write!(f, "-1"),
        }
    }
}

/// A point in the plane, optionally carrying a class label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub class: Option<Class>,
}

impl Point {
    pub fn labeled(x: f64, y: f64, class: Class) -> Self {
        Self { x, y, class: Some(class) }
    }

    pub fn unlabeled(x: f64, y: f64) -> Self {
        Self { x, y, class: None }
    }
}

/// A point that is known to carry a class label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub class: Class,
}

impl LabeledPoint {
    pub fn new(x: f64, y: f64, class: Class) -> Self {
        Self { x, y, class }
    }
}

impl From<LabeledPoint> for Point {
    fn from(p: LabeledPoint) -> Self {
        Point::labeled(p.x, p.y, p.class)
    }
}

/// Ordered collection of points that every estimator consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Builds a labelled dataset from an `(n, 2)` feature matrix and a vector of
    /// `+1`/`-1` labels.
    pub fn from_arrays(features: &Matrix, labels: &Vector) -> Result<Self> {
        if features.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: features.ncols() });
        }
        if features.nrows() != labels.len() {
            return Err(Error::DimensionMismatch { expected: features.nrows(), found: labels.len() });
        }

        let points = features
            .rows()
            .into_iter()
            .zip(labels.iter())
            .map(|(row, &label)| {
                let class = Class::from_label(label).ok_or_else(|| Error::InvalidParameter {
                    name: "labels",
                    message: format!("labels must be -1 or +1, got {}", label),
                })?;
                Ok(Point::labeled(row[0], row[1], class))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { points })
    }

    /// Builds an unlabelled dataset from an `(n, 2)` feature matrix.
    pub fn from_features(features: &Matrix) -> Result<Self> {
        if features.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: features.ncols() });
        }

        let points = features
            .rows()
            .into_iter()
            .map(|row| Point::unlabeled(row[0], row[1]))
            .collect();
        Ok(Self { points })
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates as an `(n, 2)` matrix.
    pub fn features(&self) -> Matrix {
        let mut features = Matrix::zeros((self.points.len(), 2));
        for (i, p) in self.points.iter().enumerate() {
            features[[i, 0]] = p.x;
            features[[i, 1]] = p.y;
        }
        features
    }

    /// Labels as a vector of `+1`/`-1`.
    pub fn labels(&self) -> Result<Vector> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, p)| p.class.map(Class::as_f64).ok_or(Error::UnlabeledPoint { index }))
            .collect::<Result<Vec<_>>>()
            .map(Vector::from_vec)
    }

    /// Number of `(positive, negative)` labelled points.
    pub fn class_counts(&self) -> (usize, usize) {
        self.points.iter().fold((0, 0), |(pos, neg), p| match p.class {
            Some(Class::Positive) => (pos + 1, neg),
            Some(Class::Negative) => (pos, neg + 1),
            None => (pos, neg),
        })
    }

    /// All points as labelled points; fails on the first point without a class.
    pub fn labeled_points(&self) -> Result<Vec<LabeledPoint>> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, p)| {
                p.class
                    .map(|class| LabeledPoint::new(p.x, p.y, class))
                    .ok_or(Error::UnlabeledPoint { index })
            })
            .collect()
    }

    pub fn require_points(&self, algorithm: &'static str, required: usize) -> Result<()> {
        if self.points.len() < required {
            return Err(Error::TooFewPoints { algorithm, required, found: self.points.len() });
        }
        Ok(())
    }

    /// Labelled points, provided both classes are present.
    pub fn require_both_classes(&self, algorithm: &'static str) -> Result<Vec<LabeledPoint>> {
        let points = self.labeled_points()?;
        let (positive, negative) = self.class_counts();
        if positive == 0 {
            return Err(Error::MissingClass { algorithm, class: Class::Positive });
        }
        if negative == 0 {
            return Err(Error::MissingClass { algorithm, class: Class::Negative });
        }
        Ok(points)
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dataset_from_arrays() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let labels = array![1.0, -1.0, 1.0];

        let dataset = Dataset::from_arrays(&features, &labels).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.class_counts(), (2, 1));
        assert_eq!(dataset.features(), features);
        assert_eq!(dataset.labels().unwrap(), labels);
    }

    #[test]
    fn test_dataset_rejects_bad_labels() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let labels = array![1.0, 0.0];

        assert!(Dataset::from_arrays(&features, &labels).is_err());
    }

    #[test]
    fn test_dataset_dimension_mismatch() {
        let features = array![[1.0, 2.0, 3.0]];
        let labels = array![1.0];
        assert!(matches!(
            Dataset::from_arrays(&features, &labels),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        ));

        let features = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(Dataset::from_arrays(&features, &labels).is_err());
    }

    #[test]
    fn test_unlabeled_points_rejected_by_classifiers() {
        let dataset = Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Positive),
            Point::unlabeled(1.0, 1.0),
        ]);

        assert!(matches!(dataset.labeled_points(), Err(Error::UnlabeledPoint { index: 1 })));
        assert!(dataset.labels().is_err());
    }

    #[test]
    fn test_require_both_classes() {
        let dataset = Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Positive),
            Point::labeled(1.0, 1.0, Class::Positive),
        ]);

        let err = dataset.require_both_classes("svm").unwrap_err();
        assert!(matches!(err, Error::MissingClass { class: Class::Negative, .. }));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_majority_tie_goes_positive() {
        assert_eq!(Class::majority(2, 2), Class::Positive);
        assert_eq!(Class::majority(1, 2), Class::Negative);
        assert_eq!(Class::majority(0, 0), Class::Positive);
    }
}
