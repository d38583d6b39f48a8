//! Linear classifiers.
//!
//! This module provides:
//! - `LogisticRegression`: gradient-descent logistic regression for the two classes
//! - `CentroidSeparator`: perpendicular bisector of the class centroids, an SVM stand-in
//!
//! Both expose their decision line as a [`BoundaryLine`].
//!
//! # Examples
//!
//! ## Logistic Regression
//! ```rust
//! use planeml::{Class, Classifier, Dataset, LogisticRegression, Point};
//! use ndarray::array;
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(-2.0, 0.5, Class::Positive),
//!     Point::labeled(-1.0, -0.5, Class::Positive),
//!     Point::labeled(1.0, 0.5, Class::Negative),
//!     Point::labeled(2.0, -0.5, Class::Negative),
//! ]);
//!
//! let mut model = LogisticRegression::with_params(0.1, 100);
//! model.fit(&dataset).unwrap();
//! let predictions = model.predict(&array![[-3.0, 0.0], [3.0, 0.0]]).unwrap();
//! let probabilities = model.predict_proba(&array![[-3.0, 0.0]]).unwrap();
//! assert_eq!(predictions[0], 1.0);
//! assert!(probabilities[0] > 0.5);
//! ```
//!
//! ## Centroid Separator
//! ```rust
//! use planeml::{BoundaryLine, CentroidSeparator, Class, Classifier, Dataset, Point};
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(0.0, 1.0, Class::Positive),
//!     Point::labeled(0.0, -1.0, Class::Positive),
//!     Point::labeled(4.0, 1.0, Class::Negative),
//!     Point::labeled(4.0, -1.0, Class::Negative),
//! ]);
//!
//! let mut separator = CentroidSeparator::new();
//! separator.fit(&dataset).unwrap();
//!
//! let model = separator.model.as_ref().unwrap();
//! assert_eq!(model.boundary, BoundaryLine::Vertical { x: 2.0 });
//! assert_eq!(model.margin, 2.0);
//! ```

mod boundary;
mod logistic_regression;
mod separator;

pub use boundary::BoundaryLine;
pub use logistic_regression::{LogisticModel, LogisticRegression};
pub use separator::{CentroidSeparator, SeparatorModel};
