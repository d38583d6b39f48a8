//! Size-based defaults for the tunable parameters.
//!
//! These are policies, not properties of the algorithms: callers may pass any
//! value they like, and [`RunConfig`](crate::RunConfig) overrides each of them.

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_KMEANS_MAX_ITER: usize = 100;
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_ITERATIONS: usize = 100;

/// Neighbour count for KNN: 1 up to 5 points, 2 up to 10, 3 beyond.
pub fn knn_neighbors(n_points: usize) -> usize {
    if n_points <= 5 {
        1
    } else if n_points <= 10 {
        2
    } else {
        3
    }
}

/// Tree count for the random forest: `n / 3` bounded to `3..=10`.
pub fn forest_size(n_points: usize) -> usize {
    (n_points / 3).clamp(3, 10)
}

/// Cluster count for k-means: `floor(sqrt(n / 2))` bounded to `2..=5`.
pub fn kmeans_clusters(n_points: usize) -> usize {
    ((n_points as f64 / 2.0).sqrt().floor() as usize).clamp(2, 5)
}

/// DBSCAN density threshold: `n / 10` bounded to `2..=4`.
pub fn dbscan_min_pts(n_points: usize) -> usize {
    (n_points / 10).clamp(2, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knn_neighbors() {
        assert_eq!(knn_neighbors(2), 1);
        assert_eq!(knn_neighbors(5), 1);
        assert_eq!(knn_neighbors(6), 2);
        assert_eq!(knn_neighbors(10), 2);
        assert_eq!(knn_neighbors(11), 3);
        assert_eq!(knn_neighbors(500), 3);
    }

    #[test]
    fn test_forest_size() {
        assert_eq!(forest_size(2), 3);
        assert_eq!(forest_size(12), 4);
        assert_eq!(forest_size(30), 10);
        assert_eq!(forest_size(300), 10);
    }

    #[test]
    fn test_kmeans_clusters() {
        assert_eq!(kmeans_clusters(3), 2);
        assert_eq!(kmeans_clusters(18), 3);
        assert_eq!(kmeans_clusters(32), 4);
        assert_eq!(kmeans_clusters(200), 5);
    }

    #[test]
    fn test_dbscan_min_pts() {
        assert_eq!(dbscan_min_pts(3), 2);
        assert_eq!(dbscan_min_pts(30), 3);
        assert_eq!(dbscan_min_pts(100), 4);
    }
}
