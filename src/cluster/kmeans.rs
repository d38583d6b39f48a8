use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::random::rng_from_state;
use crate::stats::Position;
use crate::Matrix;
use rand::seq::index;
use rand::Rng;
use tracing::{info, warn};

/// Outcome of a k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansResult {
    pub centroids: Vec<Position>,
    /// Centroid index of each input point, in input order.
    pub assignments: Vec<usize>,
    /// Assignment passes performed, at most `max_iter`.
    pub n_iter: usize,
    /// Whether the last pass left every assignment unchanged.
    pub converged: bool,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
}

impl KMeansResult {
    /// Index of the centroid nearest to `(x, y)`; ties go to the lower index.
    pub fn predict_point(&self, x: f64, y: f64) -> usize {
        nearest_centroid(&self.centroids, &Position::new(x, y))
    }

    /// Number of points assigned to each centroid.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &a in &self.assignments {
            sizes[a] += 1;
        }
        sizes
    }

    /// Centroids as a `(k, 2)` matrix.
    pub fn cluster_centers(&self) -> Matrix {
        let mut centers = Matrix::zeros((self.centroids.len(), 2));
        for (k, c) in self.centroids.iter().enumerate() {
            centers[[k, 0]] = c.x;
            centers[[k, 1]] = c.y;
        }
        centers
    }

    /// Distance from every row of `x` to every centroid, shape `(n, k)`.
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        if x.ncols() != 2 {
            return Err(Error::DimensionMismatch { expected: 2, found: x.ncols() });
        }

        let mut distances = Matrix::zeros((x.nrows(), self.centroids.len()));
        for (i, row) in x.rows().into_iter().enumerate() {
            let p = Position::new(row[0], row[1]);
            for (k, c) in self.centroids.iter().enumerate() {
                distances[[i, k]] = p.distance(c);
            }
        }
        Ok(distances)
    }
}

#[derive(Clone, Debug)]
pub struct KMeans {
    pub result: Option<KMeansResult>,
    n_clusters: usize,
    max_iter: usize,
    random_state: Option<u64>,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            result: None,
            n_clusters,
            max_iter: 100,
            random_state: None,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let mut rng = rng_from_state(self.random_state);
        self.fit_with_rng(dataset, &mut rng)
    }

    pub fn fit_predict(&mut self, dataset: &Dataset) -> Result<Vec<usize>> {
        self.fit(dataset)?;
        let result = self.result.as_ref().ok_or(Error::NotFitted { estimator: "KMeans" })?;
        Ok(result.assignments.clone())
    }

    /// Lloyd iterations with every random choice drawn from `rng`. Class
    /// labels, if any, are ignored.
    pub fn fit_with_rng<R: Rng + ?Sized>(&mut self, dataset: &Dataset, rng: &mut R) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(Error::InvalidParameter {
                name: "n_clusters",
                message: "must be > 0".to_string(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be > 0".to_string(),
            });
        }
        dataset.require_points("k-means", 3)?;

        let points: Vec<Position> = dataset.points().iter().map(Position::from).collect();
        let mut centroids = self.initialize_centroids(&points, rng);
        let mut assignments = vec![0; points.len()];
        let mut n_iter = 0;
        let mut converged = false;

        while n_iter < self.max_iter {
            n_iter += 1;

            let mut changed = n_iter == 1;
            for (i, p) in points.iter().enumerate() {
                let closest = nearest_centroid(&centroids, p);
                if assignments[i] != closest {
                    assignments[i] = closest;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            self.update_centroids(&points, &assignments, &mut centroids, rng);
        }

        if !converged {
            warn!(max_iter = self.max_iter, "k-means stopped before converging");
        }

        let inertia = points
            .iter()
            .zip(&assignments)
            .map(|(p, &a)| p.distance(&centroids[a]).powi(2))
            .sum();

        info!(
            n_points = points.len(),
            k = self.n_clusters,
            n_iter,
            converged,
            inertia,
            "k-means fitted"
        );

        self.result = Some(KMeansResult { centroids, assignments, n_iter, converged, inertia });
        Ok(())
    }

    /// Positions of `k` points drawn without replacement; once every point has
    /// been drawn, further centroids repeat positions.
    fn initialize_centroids<R: Rng + ?Sized>(&self, points: &[Position], rng: &mut R) -> Vec<Position> {
        let n = points.len();
        let mut indices = index::sample(rng, n, self.n_clusters.min(n)).into_vec();
        while indices.len() < self.n_clusters {
            indices.push(rng.gen_range(0..n));
        }
        indices.into_iter().map(|i| points[i]).collect()
    }

    fn update_centroids<R: Rng + ?Sized>(
        &self,
        points: &[Position],
        assignments: &[usize],
        centroids: &mut [Position],
        rng: &mut R,
    ) {
        let mut sums = vec![(0.0, 0.0, 0usize); centroids.len()];
        for (p, &a) in points.iter().zip(assignments) {
            sums[a].0 += p.x;
            sums[a].1 += p.y;
            sums[a].2 += 1;
        }

        for (k, &(sx, sy, count)) in sums.iter().enumerate() {
            if count > 0 {
                centroids[k] = Position::new(sx / count as f64, sy / count as f64);
            } else {
                let reseed = rng.gen_range(0..points.len());
                warn!(cluster = k, point = reseed, "empty k-means cluster reseeded");
                centroids[k] = points[reseed];
            }
        }
    }
}

/// Index of the nearest centroid; strict comparison keeps the lowest index on ties.
fn nearest_centroid(centroids: &[Position], p: &Position) -> usize {
    let mut min_distance = f64::INFINITY;
    let mut closest = 0;
    for (k, c) in centroids.iter().enumerate() {
        let distance = p.distance(c);
        if distance < min_distance {
            min_distance = distance;
            closest = k;
        }
    }
    closest
}
