//! Instance-based classification.
//!
//! - `KNeighborsClassifier`: majority vote among the k nearest training points
//!
//! # Example
//! ```rust
//! use planeml::{Class, Classifier, Dataset, KNeighborsClassifier, Point};
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(0.0, 0.0, Class::Positive),
//!     Point::labeled(0.5, 0.0, Class::Positive),
//!     Point::labeled(5.0, 5.0, Class::Negative),
//!     Point::labeled(5.5, 5.0, Class::Negative),
//! ]);
//!
//! let mut knn = KNeighborsClassifier::new(1);
//! knn.fit(&dataset).unwrap();
//! assert_eq!(knn.predict_point(4.0, 4.0).unwrap(), Class::Negative);
//! ```

mod knn;

pub use knn::KNeighborsClassifier;
