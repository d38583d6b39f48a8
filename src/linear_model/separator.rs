use super::boundary::BoundaryLine;
use crate::classifier::Classifier;
use crate::dataset::{Class, Dataset, LabeledPoint, Point};
use crate::error::{Error, Result};
use crate::stats::{centroid, Position};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Coordinate tolerance for [`SeparatorModel::is_support_vector`].
const SUPPORT_VECTOR_TOLERANCE: f64 = 1e-3;

/// Offsets smaller than this are treated as zero when orienting the boundary.
const AXIS_EPSILON: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeparatorModel {
    pub positive_centroid: Position,
    pub negative_centroid: Position,
    pub boundary: BoundaryLine,
    pub margin: f64,
    /// Dataset indices of the support vectors, `[positive, negative]`.
    pub support_vectors: [usize; 2],
    support_positions: [Position; 2],
    positive_side: f64,
}

impl SeparatorModel {
    pub fn midpoint(&self) -> Position {
        Position::new(
            (self.positive_centroid.x + self.negative_centroid.x) / 2.0,
            (self.positive_centroid.y + self.negative_centroid.y) / 2.0,
        )
    }

    /// Signed distance to the boundary, positive on the `+1` side.
    pub fn decision_function(&self, x: f64, y: f64) -> f64 {
        self.positive_side * self.boundary.signed_distance(x, y)
    }

    /// Points on the boundary are classified `+1`.
    pub fn predict(&self, x: f64, y: f64) -> Class {
        if self.decision_function(x, y) >= 0.0 {
            Class::Positive
        } else {
            Class::Negative
        }
    }

    /// Lines parallel to the boundary at `margin` on each side, positive side first.
    pub fn margin_lines(&self) -> (BoundaryLine, BoundaryLine) {
        let shift = self.positive_side * self.margin;
        (self.boundary.offset(shift), self.boundary.offset(-shift))
    }

    pub fn is_support_vector(&self, point: &Point) -> bool {
        self.support_positions.iter().any(|sv| {
            (sv.x - point.x).abs() < SUPPORT_VECTOR_TOLERANCE && (sv.y - point.y).abs() < SUPPORT_VECTOR_TOLERANCE
        })
    }
}

/// Linear separator through the midpoint of the two class centroids,
/// perpendicular to the segment joining them.
///
/// This is a geometric stand-in for a support vector machine, not a
/// margin-maximising solver: the "support vectors" are simply the training
/// points of each class closest to the boundary.
#[derive(Clone, Debug, Default)]
pub struct CentroidSeparator {
    pub model: Option<SeparatorModel>,
}

impl CentroidSeparator {
    pub fn new() -> Self {
        Self { model: None }
    }
}

impl Classifier for CentroidSeparator {
    fn name(&self) -> &'static str {
        "centroid separator"
    }

    fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        let points = dataset.require_both_classes("svm")?;

        let of_class = |class: Class| -> Vec<Position> {
            points.iter().filter(|p| p.class == class).map(Position::from).collect()
        };
        let degenerate = |reason| Error::DegenerateGeometry { algorithm: "svm", reason };

        let positive_centroid = centroid(&of_class(Class::Positive)).ok_or(degenerate("no positive points"))?;
        let negative_centroid = centroid(&of_class(Class::Negative)).ok_or(degenerate("no negative points"))?;

        let dx = negative_centroid.x - positive_centroid.x;
        let dy = negative_centroid.y - positive_centroid.y;
        if dx.abs() < AXIS_EPSILON && dy.abs() < AXIS_EPSILON {
            return Err(degenerate("class centroids coincide"));
        }

        let mid_x = (positive_centroid.x + negative_centroid.x) / 2.0;
        let mid_y = (positive_centroid.y + negative_centroid.y) / 2.0;
        let boundary = if dy.abs() < AXIS_EPSILON {
            BoundaryLine::Vertical { x: mid_x }
        } else {
            let slope = -dx / dy;
            BoundaryLine::Sloped { slope, intercept: mid_y - slope * mid_x }
        };
        let positive_side = boundary.signed_distance(positive_centroid.x, positive_centroid.y).signum();

        let (positive_index, positive_distance) = closest_to(&points, &boundary, Class::Positive);
        let (negative_index, negative_distance) = closest_to(&points, &boundary, Class::Negative);
        let margin = positive_distance.min(negative_distance);

        let model = SeparatorModel {
            positive_centroid,
            negative_centroid,
            boundary,
            margin,
            support_vectors: [positive_index, negative_index],
            support_positions: [Position::from(&points[positive_index]), Position::from(&points[negative_index])],
            positive_side,
        };
        info!(n_points = points.len(), margin, boundary = ?model.boundary, "centroid separator fitted");

        self.model = Some(model);
        Ok(())
    }

    fn predict_point(&self, x: f64, y: f64) -> Result<Class> {
        let model = self.model.as_ref().ok_or(Error::NotFitted { estimator: "CentroidSeparator" })?;
        Ok(model.predict(x, y))
    }
}

/// Index and distance of the point of `class` nearest the boundary; the first
/// one wins ties. The class is known to be present.
fn closest_to(points: &[LabeledPoint], boundary: &BoundaryLine, class: Class) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, p) in points.iter().enumerate() {
        if p.class != class {
            continue;
        }
        let distance = boundary.distance(p.x, p.y);
        if distance < best.1 {
            best = (i, distance);
        }
    }
    best
}
