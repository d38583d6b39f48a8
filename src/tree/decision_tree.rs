use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset, LabeledPoint};
use crate::error::{Error, Result};
use crate::stats::{count_positive, weighted_gini, BoundingBox, Position};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Coordinate a split is made on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    X,
    Y,
}

impl Feature {
    pub(crate) const BOTH: &'static [Feature] = &[Feature::X, Feature::Y];
    pub(crate) const X_ONLY: &'static [Feature] = &[Feature::X];
    pub(crate) const Y_ONLY: &'static [Feature] = &[Feature::Y];

    #[inline]
    pub fn value(self, x: f64, y: f64) -> f64 {
        match self {
            Feature::X => x,
            Feature::Y => y,
        }
    }

    #[inline]
    fn of(self, p: &LabeledPoint) -> f64 {
        self.value(p.x, p.y)
    }
}

/// Node of a binary classification tree. Children are owned by their parent.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf {
        class: Class,
        n_samples: usize,
        /// `None` only for a leaf built from no points.
        bounds: Option<BoundingBox>,
    },
    Internal {
        feature: Feature,
        /// Points with `feature <= threshold` go left.
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        bounds: BoundingBox,
        depth: usize,
    },
}

/// An internal node's partition, as reported by [`TreeNode::splits`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    pub feature: Feature,
    pub threshold: f64,
    pub bounds: BoundingBox,
    pub depth: usize,
}

impl TreeNode {
    /// Grows a tree evaluating both features at every split.
    pub fn build(points: &[LabeledPoint], max_depth: usize) -> TreeNode {
        grow(points, 0, max_depth, &mut || Feature::BOTH)
    }

    /// Routes `(x, y)` down to a leaf and returns its class.
    pub fn predict(&self, x: f64, y: f64) -> Class {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { class, .. } => return *class,
                TreeNode::Internal { feature, threshold, left, right, .. } => {
                    node = if feature.value(x, y) <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Every internal node in pre-order.
    pub fn splits(&self) -> Vec<Split> {
        let mut out = Vec::new();
        self.collect_splits(&mut out);
        out
    }

    fn collect_splits(&self, out: &mut Vec<Split>) {
        if let TreeNode::Internal { feature, threshold, left, right, bounds, depth } = self {
            out.push(Split { feature: *feature, threshold: *threshold, bounds: *bounds, depth: *depth });
            left.collect_splits(out);
            right.collect_splits(out);
        }
    }
}

fn bounds_of(points: &[LabeledPoint]) -> Option<BoundingBox> {
    BoundingBox::enclosing(points.iter().map(Position::from))
}

fn leaf(points: &[LabeledPoint]) -> TreeNode {
    let positive = count_positive(points);
    TreeNode::Leaf {
        class: Class::majority(positive, points.len() - positive),
        n_samples: points.len(),
        bounds: bounds_of(points),
    }
}

/// Recursive partitioning shared by the single tree and the forest.
///
/// `candidates` is asked once per split search for the features to try, so
/// the forest can restrict each search to one randomly drawn feature.
pub(crate) fn grow<F>(points: &[LabeledPoint], depth: usize, max_depth: usize, candidates: &mut F) -> TreeNode
where
    F: FnMut() -> &'static [Feature],
{
    if depth >= max_depth {
        return leaf(points);
    }
    if points.iter().all(|p| p.class == points[0].class) {
        return leaf(points);
    }

    let features = candidates();
    let Some((feature, threshold)) = best_split(points, features) else {
        return leaf(points);
    };

    let (left, right): (Vec<LabeledPoint>, Vec<LabeledPoint>) =
        points.iter().copied().partition(|p| feature.of(p) <= threshold);
    if left.is_empty() || right.is_empty() {
        return leaf(points);
    }

    debug!(depth, ?feature, threshold, left = left.len(), right = right.len(), "tree split");

    let bounds = match bounds_of(points) {
        Some(bounds) => bounds,
        None => return leaf(points),
    };

    TreeNode::Internal {
        feature,
        threshold,
        left: Box::new(grow(&left, depth + 1, max_depth, candidates)),
        right: Box::new(grow(&right, depth + 1, max_depth, candidates)),
        bounds,
        depth,
    }
}

/// Midpoint threshold with the lowest weighted Gini impurity over the given
/// features. Candidates are scanned feature by feature in ascending order and
/// only a strictly lower impurity replaces the incumbent, so the first
/// candidate found wins ties.
pub(crate) fn best_split(points: &[LabeledPoint], features: &[Feature]) -> Option<(Feature, f64)> {
    if points.len() < 2 {
        return None;
    }

    let total_positive = count_positive(points);
    let mut best: Option<(Feature, f64)> = None;
    let mut best_gini = 1.0;

    for &feature in features {
        let mut values: Vec<f64> = points.iter().map(|p| feature.of(p)).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let (left_positive, left_total) = points
                .iter()
                .filter(|p| feature.of(p) <= threshold)
                .fold((0, 0), |(pos, n), p| (pos + usize::from(p.class == Class::Positive), n + 1));
            let right = (total_positive - left_positive, points.len() - left_total);

            let gini = weighted_gini((left_positive, left_total), right);
            if gini < best_gini {
                best_gini = gini;
                best = Some((feature, threshold));
            }
        }
    }

    best
}

#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier {
    pub root: Option<TreeNode>,
    max_depth: usize,
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: 3,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for DecisionTreeClassifier {
    fn name(&self) -> &'static str {
        "decision tree"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let points = dataset.require_both_classes("decision tree")?;
        let root = TreeNode::build(&points, self.max_depth);

        info!(
            n_points = points.len(),
            depth = root.depth(),
            leaves = root.n_leaves(),
            "decision tree fitted"
        );
        self.root = Some(root);
        Ok(())
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        let root = self.root.as_ref().ok_or(Error::NotFitted { estimator: "DecisionTreeClassifier" })?;
        Ok(root.predict(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Point;

    fn lp(x: f64, y: f64, class: Class) -> LabeledPoint {
        LabeledPoint::new(x, y, class)
    }

    #[test]
    fn test_tree_single_split_on_x() {
        let points = vec![
            lp(0.0, 0.0, Class::Positive),
            lp(1.0, 5.0, Class::Positive),
            lp(4.0, 0.0, Class::Negative),
            lp(5.0, 5.0, Class::Negative),
        ];

        let tree = TreeNode::build(&points, 3);
        match &tree {
            TreeNode::Internal { feature, threshold, depth, .. } => {
                assert_eq!(*feature, Feature::X);
                assert!((threshold - 2.5).abs() < 1e-12);
                assert_eq!(*depth, 0);
            }
            TreeNode::Leaf { .. } => panic!("expected a split"),
        }
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict(-1.0, 0.0), Class::Positive);
        assert_eq!(tree.predict(10.0, 0.0), Class::Negative);
    }

    #[test]
    fn test_tree_prefers_x_on_tie() {
        // Separable along both axes with equal impurity; x is evaluated first.
        let points = vec![lp(0.0, 0.0, Class::Positive), lp(1.0, 1.0, Class::Negative)];

        let tree = TreeNode::build(&points, 3);
        let splits = tree.splits();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].feature, Feature::X);
        assert!((splits[0].threshold - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tree_split_on_y() {
        let points = vec![
            lp(0.0, 0.0, Class::Positive),
            lp(5.0, 1.0, Class::Positive),
            lp(0.0, 6.0, Class::Negative),
            lp(5.0, 7.0, Class::Negative),
        ];

        let tree = TreeNode::build(&points, 3);
        let splits = tree.splits();
        assert_eq!(splits[0].feature, Feature::Y);
        assert!((splits[0].threshold - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_tree_respects_max_depth() {
        // Checkerboard needs more than one level.
        let points = vec![
            lp(0.0, 0.0, Class::Positive),
            lp(1.0, 1.0, Class::Positive),
            lp(0.0, 1.0, Class::Negative),
            lp(1.0, 0.0, Class::Negative),
            lp(2.0, 2.0, Class::Positive),
            lp(2.0, 0.0, Class::Negative),
        ];

        let stump = TreeNode::build(&points, 1);
        assert!(stump.depth() <= 1);

        let root_only = TreeNode::build(&points, 0);
        assert!(root_only.is_leaf());
        // 3 vs 3: tie goes to +1
        assert_eq!(root_only.predict(0.0, 0.0), Class::Positive);
    }

    #[test]
    fn test_tree_duplicate_coordinates_make_leaf() {
        let points = vec![lp(1.0, 1.0, Class::Positive), lp(1.0, 1.0, Class::Negative), lp(1.0, 1.0, Class::Negative)];

        let tree = TreeNode::build(&points, 3);
        match tree {
            TreeNode::Leaf { class, n_samples, .. } => {
                assert_eq!(class, Class::Negative);
                assert_eq!(n_samples, 3);
            }
            TreeNode::Internal { .. } => panic!("no admissible split exists"),
        }
    }

    #[test]
    fn test_tree_is_deterministic() {
        let points = vec![
            lp(0.3, 2.0, Class::Positive),
            lp(1.1, -1.0, Class::Negative),
            lp(-2.0, 0.5, Class::Positive),
            lp(3.0, 3.0, Class::Negative),
            lp(0.0, -3.0, Class::Negative),
            lp(-1.0, 2.5, Class::Positive),
        ];

        assert_eq!(TreeNode::build(&points, 3), TreeNode::build(&points, 3));
    }

    #[test]
    fn test_tree_node_bounds() {
        let points = vec![lp(-1.0, 2.0, Class::Positive), lp(3.0, -4.0, Class::Negative)];
        let tree = TreeNode::build(&points, 3);

        match tree {
            TreeNode::Internal { bounds, left, .. } => {
                assert_eq!(bounds, BoundingBox { min_x: -1.0, max_x: 3.0, min_y: -4.0, max_y: 2.0 });
                match *left {
                    TreeNode::Leaf { bounds, .. } => {
                        assert_eq!(bounds, Some(BoundingBox { min_x: -1.0, max_x: -1.0, min_y: 2.0, max_y: 2.0 }));
                    }
                    TreeNode::Internal { .. } => panic!("expected leaf"),
                }
            }
            TreeNode::Leaf { .. } => panic!("expected a split"),
        }
    }

    #[test]
    fn test_classifier_fits_training_points() {
        let dataset = Dataset::new(vec![
            Point::labeled(-3.0, -3.0, Class::Positive),
            Point::labeled(-2.0, -1.0, Class::Positive),
            Point::labeled(-1.0, -2.0, Class::Positive),
            Point::labeled(2.0, 2.0, Class::Negative),
            Point::labeled(3.0, 1.0, Class::Negative),
            Point::labeled(1.0, 3.0, Class::Negative),
        ]);

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&dataset).unwrap();
        assert!((tree.score(&dataset).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_classifier_needs_both_classes() {
        let dataset = Dataset::new(vec![
            Point::labeled(0.0, 0.0, Class::Negative),
            Point::labeled(1.0, 1.0, Class::Negative),
        ]);

        let mut tree = DecisionTreeClassifier::new();
        let err = tree.fit(&dataset).unwrap_err();
        assert!(matches!(err, Error::MissingClass { class: Class::Positive, .. }));
    }

    #[test]
    fn test_classifier_predict_without_fit() {
        let tree = DecisionTreeClassifier::new();
        assert!(tree.predict_point(0.0, 0.0).is_err());
    }
}
