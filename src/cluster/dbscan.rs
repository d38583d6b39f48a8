use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::heuristics;
use crate::stats::Position;
use std::cmp::Ordering;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Label of points that belong to no cluster. Clusters are numbered from 1.
pub const NOISE: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    Unvisited,
    Noise,
    Cluster(usize),
}

/// Outcome of a DBSCAN run.
#[derive(Clone, Debug, PartialEq)]
pub struct DbscanResult {
    /// [`NOISE`] or a 1-based cluster id per input point. Ids follow the order
    /// in which clusters were first created.
    pub labels: Vec<usize>,
    pub n_clusters: usize,
    /// Index 0 counts noise points, index `i` the members of cluster `i`.
    pub cluster_sizes: Vec<usize>,
    /// Points with at least `min_pts` neighbours, ascending.
    pub core_sample_indices: Vec<usize>,
    pub epsilon: f64,
    pub min_pts: usize,
}

impl DbscanResult {
    pub fn n_noise_points(&self) -> usize {
        self.cluster_sizes[NOISE]
    }

    pub fn is_noise(&self, sample_idx: usize) -> bool {
        self.labels[sample_idx] == NOISE
    }

    pub fn is_core_sample(&self, sample_idx: usize) -> bool {
        self.core_sample_indices.binary_search(&sample_idx).is_ok()
    }
}

/// Density clustering. Either parameter left unset is derived from the data:
/// epsilon from the k-distance distribution, `min_pts` from the point count.
#[derive(Clone, Debug, Default)]
pub struct Dbscan {
    pub result: Option<DbscanResult>,
    epsilon: Option<f64>,
    min_pts: Option<usize>,
}

impl Dbscan {
    pub fn new(epsilon: f64, min_pts: usize) -> Self {
        Self {
            result: None,
            epsilon: Some(epsilon),
            min_pts: Some(min_pts),
        }
    }

    /// Both parameters derived from the data at fit time.
    pub fn auto() -> Self {
        Self::default()
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = Some(min_pts);
        self
    }

    pub fn fit_predict(&mut self, dataset: &Dataset) -> Result<Vec<usize>> {
        self.fit(dataset)?;
        let result = self.result.as_ref().ok_or(Error::NotFitted { estimator: "Dbscan" })?;
        Ok(result.labels.clone())
    }

    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        dataset.require_points("dbscan", 3)?;
        let points: Vec<Position> = dataset.points().iter().map(Position::from).collect();

        let epsilon = match self.epsilon {
            Some(epsilon) => epsilon,
            None => {
                let estimated = estimate_epsilon(&points)?;
                debug!(epsilon = estimated, "dbscan epsilon estimated from k-distances");
                estimated
            }
        };
        let min_pts = self.min_pts.unwrap_or_else(|| heuristics::dbscan_min_pts(points.len()));

        if epsilon.is_nan() || epsilon < 0.0 {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                message: format!("must be >= 0, got {}", epsilon),
            });
        }
        if min_pts == 0 {
            return Err(Error::InvalidParameter {
                name: "min_pts",
                message: "must be > 0".to_string(),
            });
        }

        let result = cluster(&points, epsilon, min_pts);
        if result.n_clusters == 0 {
            warn!(epsilon, min_pts, "dbscan labelled every point as noise");
        }
        info!(
            n_points = points.len(),
            epsilon,
            min_pts,
            n_clusters = result.n_clusters,
            n_noise = result.n_noise_points(),
            "dbscan fitted"
        );

        self.result = Some(result);
        Ok(())
    }
}

/// Neighbourhood radius taken from the sorted distances of every point to its
/// k-th nearest neighbour (`k = min(4, n - 1)`), at the 80th percentile.
pub fn estimate_epsilon(points: &[Position]) -> Result<f64> {
    let n = points.len();
    if n < 2 {
        return Err(Error::TooFewPoints { algorithm: "epsilon estimation", required: 2, found: n });
    }
    let k = 4.min(n - 1);

    let mut k_distances: Vec<f64> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut distances: Vec<f64> = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| p.distance(other))
                .collect();
            distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            distances[k - 1]
        })
        .collect();

    k_distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let index = (n as f64 * 0.8).floor() as usize;
    Ok(k_distances[index.min(n - 1)])
}

/// Indices of all other points within `epsilon` of `points[point_idx]`.
fn region_query(points: &[Position], point_idx: usize, epsilon: f64) -> Vec<usize> {
    let point = &points[point_idx];
    points
        .iter()
        .enumerate()
        .filter(|(idx, other)| *idx != point_idx && point.distance(other) <= epsilon)
        .map(|(idx, _)| idx)
        .collect()
}

fn cluster(points: &[Position], epsilon: f64, min_pts: usize) -> DbscanResult {
    let n = points.len();
    let mut labels = vec![Label::Unvisited; n];
    let mut is_core = vec![false; n];
    let mut current_cluster = 0;

    for i in 0..n {
        if labels[i] != Label::Unvisited {
            continue;
        }

        let neighbors = region_query(points, i, epsilon);
        if neighbors.len() < min_pts {
            labels[i] = Label::Noise;
            continue;
        }

        is_core[i] = true;
        current_cluster += 1;
        labels[i] = Label::Cluster(current_cluster);

        // Expand breadth-first
        let mut queued = vec![false; n];
        for &nb in &neighbors {
            queued[nb] = true;
        }
        let mut queue: VecDeque<usize> = neighbors.into_iter().collect();

        while let Some(neighbor_idx) = queue.pop_front() {
            match labels[neighbor_idx] {
                Label::Noise => {
                    // Border point reclaimed from noise.
                    labels[neighbor_idx] = Label::Cluster(current_cluster);
                }
                Label::Unvisited => {
                    labels[neighbor_idx] = Label::Cluster(current_cluster);

                    let neighbor_neighbors = region_query(points, neighbor_idx, epsilon);
                    if neighbor_neighbors.len() >= min_pts {
                        is_core[neighbor_idx] = true;
                        for nn in neighbor_neighbors {
                            if !matches!(labels[nn], Label::Cluster(_)) && !queued[nn] {
                                queued[nn] = true;
                                queue.push_back(nn);
                            }
                        }
                    }
                }
                Label::Cluster(_) => {}
            }
        }
    }

    let labels: Vec<usize> = labels
        .into_iter()
        .map(|label| match label {
            Label::Cluster(id) => id,
            Label::Noise | Label::Unvisited => NOISE,
        })
        .collect();

    let mut cluster_sizes = vec![0; current_cluster + 1];
    for &label in &labels {
        cluster_sizes[label] += 1;
    }

    let core_sample_indices = is_core
        .iter()
        .enumerate()
        .filter(|&(_, &core)| core)
        .map(|(i, _)| i)
        .collect();

    DbscanResult {
        labels,
        n_clusters: current_cluster,
        cluster_sizes,
        core_sample_indices,
        epsilon,
        min_pts,
    }
}
