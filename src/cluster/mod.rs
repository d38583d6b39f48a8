//! Clustering algorithms for unlabelled points.
//!
//! This module provides:
//! - `KMeans`: Lloyd's algorithm with random initialisation and empty-cluster reseeding
//! - `Dbscan`: density-based clustering with automatic epsilon estimation
//!
//! Class labels on the input points are ignored.
//!
//! # Examples
//!
//! ## K-Means Clustering
//! ```rust
//! use planeml::{Dataset, KMeans, Point};
//!
//! let dataset = Dataset::new(vec![
//!     Point::unlabeled(1.0, 1.0),
//!     Point::unlabeled(1.5, 2.0),
//!     Point::unlabeled(3.0, 4.0),
//!     Point::unlabeled(5.0, 7.0),
//!     Point::unlabeled(3.5, 5.0),
//!     Point::unlabeled(4.5, 5.0),
//! ]);
//!
//! let mut kmeans = KMeans::new(2).max_iter(100).random_state(42);
//! let labels = kmeans.fit_predict(&dataset).unwrap();
//! assert_eq!(labels.len(), 6);
//!
//! let result = kmeans.result.as_ref().unwrap();
//! println!("centroids: {:?}, inertia: {:.4}", result.centroids, result.inertia);
//! ```
//!
//! ## DBSCAN Clustering
//! ```rust
//! use planeml::{Dataset, Dbscan, Point, NOISE};
//!
//! let dataset = Dataset::new(vec![
//!     Point::unlabeled(0.0, 0.0),
//!     Point::unlabeled(0.0, 1.0),
//!     Point::unlabeled(0.0, 2.0),
//!     Point::unlabeled(10.0, 10.0), // Outlier
//! ]);
//!
//! let mut dbscan = Dbscan::new(1.5, 2);
//! let labels = dbscan.fit_predict(&dataset).unwrap();
//! assert_eq!(labels, vec![1, 1, 1, NOISE]);
//! ```

mod dbscan;
mod kmeans;

pub use dbscan::{estimate_epsilon, Dbscan, DbscanResult, NOISE};
pub use kmeans::{KMeans, KMeansResult};
