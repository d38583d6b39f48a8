use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset, LabeledPoint};
use crate::error::{Error, Result};
use crate::stats::euclidean_distance;
use std::cmp::Ordering;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct KNeighborsClassifier {
    training: Option<Vec<LabeledPoint>>,
    n_neighbors: usize,
}

impl KNeighborsClassifier {
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            training: None,
            n_neighbors,
        }
    }

    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Indices and distances of the k training points nearest to `(x, y)`,
    /// closest first. Equal distances keep training order.
    pub fn kneighbors(&self, x: f64, y: f64) -> Result<Vec<(usize, f64)>> {
        let training = self.training.as_ref().ok_or(Error::NotFitted { estimator: "KNeighborsClassifier" })?;

        let mut distances: Vec<(usize, f64)> = training
            .iter()
            .enumerate()
            .map(|(i, p)| (i, euclidean_distance(x, y, p.x, p.y)))
            .collect();

        // sort_by is stable
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        distances.truncate(self.n_neighbors);
        Ok(distances)
    }
}

impl Classifier for KNeighborsClassifier {
    fn name(&self) -> &'static str {
        "k-nearest neighbors"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        dataset.require_points("knn", 2)?;
        let points = dataset.labeled_points()?;

        if self.n_neighbors == 0 || self.n_neighbors > points.len() {
            return Err(Error::InvalidParameter {
                name: "n_neighbors",
                message: format!("must be in 1..={}, got {}", points.len(), self.n_neighbors),
            });
        }

        debug!(n_points = points.len(), k = self.n_neighbors, "knn fitted");
        self.training = Some(points);
        Ok(())
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        let neighbors = self.kneighbors(x, y)?;
        let training = self.training.as_ref().ok_or(Error::NotFitted { estimator: "KNeighborsClassifier" })?;

        let positive = neighbors
            .iter()
            .filter(|(i, _)| training[*i].class == Class::Positive)
            .count();
        Ok(Class::majority(positive, neighbors.len() - positive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Point;
    use ndarray::array;

    fn two_groups() -> Dataset {
        Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Positive),
            Point::labeled(1.0, 0.0, Class::Positive),
            Point::labeled(0.0, 1.0, Class::Positive),
            Point::labeled(5.0, 5.0, Class::Negative),
            Point::labeled(6.0, 5.0, Class::Negative),
            Point::labeled(5.0, 6.0, Class::Negative),
        ])
    }

    #[test]
    fn test_knn_exact_match_k1() {
        let dataset = two_groups();
        let mut knn = KNeighborsClassifier::new(1);
        knn.fit(&dataset).unwrap();

        for p in dataset.points() {
            assert_eq!(knn.predict_point(p.x, p.y).unwrap(), p.class.unwrap());
        }
    }

    #[test]
    fn test_knn_majority() {
        let mut knn = KNeighborsClassifier::new(3);
        knn.fit(&two_groups()).unwrap();

        assert_eq!(knn.predict_point(0.5, 0.5).unwrap(), Class::Positive);
        assert_eq!(knn.predict_point(5.5, 5.5).unwrap(), Class::Negative);
    }

    #[test]
    fn test_knn_tie_goes_positive() {
        let dataset = Dataset::new(vec![
            Point::labeled(-1.0, 0.0, Class::Negative),
            Point::labeled(1.0, 0.0, Class::Positive),
        ]);
        let mut knn = KNeighborsClassifier::new(2);
        knn.fit(&dataset).unwrap();

        assert_eq!(knn.predict_point(0.0, 0.0).unwrap(), Class::Positive);
    }

    #[test]
    fn test_knn_stable_neighbor_order() {
        let dataset = Dataset::new(vec![
            Point::labeled(1.0, 0.0, Class::Negative),
            Point::labeled(-1.0, 0.0, Class::Positive),
            Point::labeled(9.0, 9.0, Class::Positive),
        ]);
        let mut knn = KNeighborsClassifier::new(1);
        knn.fit(&dataset).unwrap();

        // Both first points are at distance 1; the earlier one wins.
        let neighbors = knn.kneighbors(0.0, 0.0).unwrap();
        assert_eq!(neighbors[0].0, 0);
        assert_eq!(knn.predict_point(0.0, 0.0).unwrap(), Class::Negative);
    }

    #[test]
    fn test_knn_batch_predict() {
        let mut knn = KNeighborsClassifier::new(1);
        knn.fit(&two_groups()).unwrap();

        let predictions = knn.predict(&array![[0.2, 0.2], [5.2, 5.2]]).unwrap();
        assert_eq!(predictions, array![1.0, -1.0]);
    }

    #[test]
    fn test_knn_insufficient_data() {
        let dataset = Dataset::new(vec![Point::labeled(0.0, 0.0, Class::Positive)]);
        let mut knn = KNeighborsClassifier::new(1);

        let err = knn.fit(&dataset).unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_knn_invalid_k() {
        let mut knn = KNeighborsClassifier::new(0);
        assert!(matches!(knn.fit(&two_groups()), Err(Error::InvalidParameter { .. })));

        let mut knn = KNeighborsClassifier::new(7);
        assert!(matches!(knn.fit(&two_groups()), Err(Error::InvalidParameter { .. })));
    }

    #[test]
    fn test_knn_predict_without_fit() {
        let knn = KNeighborsClassifier::new(1);
        assert!(matches!(knn.predict_point(0.0, 0.0), Err(Error::NotFitted { .. })));
    }
}
