//! Tree-based classifiers.
//!
//! This module provides:
//! - `DecisionTreeClassifier`: recursive binary partitioning on Gini impurity
//! - `RandomForestClassifier`: bootstrap-aggregated trees with a random feature per split
//!
//! # Examples
//!
//! ## Decision Tree
//! ```rust
//! use planeml::{Class, Classifier, Dataset, DecisionTreeClassifier, Point};
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(-2.0, 1.0, Class::Positive),
//!     Point::labeled(-1.0, 3.0, Class::Positive),
//!     Point::labeled(2.0, 1.0, Class::Negative),
//!     Point::labeled(3.0, 2.0, Class::Negative),
//! ]);
//!
//! let mut tree = DecisionTreeClassifier::new().max_depth(3);
//! tree.fit(&dataset).unwrap();
//!
//! let root = tree.root.as_ref().unwrap();
//! for split in root.splits() {
//!     println!("{:?} <= {:.2} at depth {}", split.feature, split.threshold, split.depth);
//! }
//! assert_eq!(tree.predict_point(-5.0, 0.0).unwrap(), Class::Positive);
//! ```
//!
//! ## Random Forest
//! ```rust
//! use planeml::{Class, Classifier, Dataset, Point, RandomForestClassifier};
//!
//! let dataset = Dataset::new(vec![
//!     Point::labeled(-2.0, -2.0, Class::Positive),
//!     Point::labeled(-1.0, -3.0, Class::Positive),
//!     Point::labeled(2.0, 2.0, Class::Negative),
//!     Point::labeled(3.0, 1.0, Class::Negative),
//! ]);
//!
//! let mut forest = RandomForestClassifier::new(5).random_state(7);
//! forest.fit(&dataset).unwrap();
//!
//! let (positive, negative) = forest.forest.as_ref().unwrap().votes(0.0, 0.0);
//! assert_eq!(positive + negative, 5);
//! ```

mod decision_tree;
mod random_forest;

pub use decision_tree::{DecisionTreeClassifier, Feature, Split, TreeNode};
pub use random_forest::{Forest, RandomForestClassifier};
