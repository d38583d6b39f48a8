//! Parameter overrides for [`run`](crate::run).

use crate::error::Result;
use crate::heuristics;
use serde::{Deserialize, Serialize};

/// Per-run parameters. Fields left as `None` fall back to the size-based
/// policies in [`heuristics`](crate::heuristics) when the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub knn_k: Option<usize>,
    pub max_depth: usize,
    pub n_trees: Option<usize>,
    pub n_clusters: Option<usize>,
    pub kmeans_max_iter: usize,
    pub dbscan_epsilon: Option<f64>,
    pub dbscan_min_pts: Option<usize>,
    pub learning_rate: f64,
    pub iterations: usize,
    /// Seed for every random draw; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            knn_k: None,
            max_depth: heuristics::DEFAULT_MAX_DEPTH,
            n_trees: None,
            n_clusters: None,
            kmeans_max_iter: heuristics::DEFAULT_KMEANS_MAX_ITER,
            dbscan_epsilon: None,
            dbscan_min_pts: None,
            learning_rate: heuristics::DEFAULT_LEARNING_RATE,
            iterations: heuristics::DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_knn_k(mut self, k: usize) -> Self {
        self.knn_k = Some(k);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_n_trees(mut self, n: usize) -> Self {
        self.n_trees = Some(n);
        self
    }

    pub fn with_n_clusters(mut self, k: usize) -> Self {
        self.n_clusters = Some(k);
        self
    }

    pub fn with_kmeans_max_iter(mut self, max_iter: usize) -> Self {
        self.kmeans_max_iter = max_iter;
        self
    }

    pub fn with_dbscan_epsilon(mut self, epsilon: f64) -> Self {
        self.dbscan_epsilon = Some(epsilon);
        self
    }

    pub fn with_dbscan_min_pts(mut self, min_pts: usize) -> Self {
        self.dbscan_min_pts = Some(min_pts);
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn knn_k_for(&self, n_points: usize) -> usize {
        self.knn_k.unwrap_or_else(|| heuristics::knn_neighbors(n_points))
    }

    pub fn n_trees_for(&self, n_points: usize) -> usize {
        self.n_trees.unwrap_or_else(|| heuristics::forest_size(n_points))
    }

    pub fn n_clusters_for(&self, n_points: usize) -> usize {
        self.n_clusters.unwrap_or_else(|| heuristics::kmeans_clusters(n_points))
    }

    pub fn dbscan_min_pts_for(&self, n_points: usize) -> usize {
        self.dbscan_min_pts.unwrap_or_else(|| heuristics::dbscan_min_pts(n_points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.kmeans_max_iter, 100);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.iterations, 100);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RunConfig::new()
            .with_knn_k(5)
            .with_n_trees(7)
            .with_dbscan_epsilon(0.75)
            .with_seed(42);

        assert_eq!(config.knn_k_for(100), 5);
        assert_eq!(config.n_trees_for(3), 7);
        assert_eq!(config.dbscan_epsilon, Some(0.75));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_heuristic_fallbacks() {
        let config = RunConfig::default();
        assert_eq!(config.knn_k_for(4), 1);
        assert_eq!(config.n_trees_for(12), 4);
        assert_eq!(config.n_clusters_for(18), 3);
        assert_eq!(config.dbscan_min_pts_for(30), 3);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RunConfig::from_json(r#"{ "max_depth": 5, "seed": 7, "n_clusters": 4 }"#).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.n_clusters, Some(4));
        assert_eq!(config.iterations, 100);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RunConfig::new().with_learning_rate(0.05).with_dbscan_min_pts(3);
        let json = config.to_json().unwrap();
        assert_eq!(RunConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = RunConfig::from_json(r#"{ "max_depth": "deep" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
