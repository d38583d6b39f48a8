use serde::{Deserialize, Serialize};

/// A straight line in the plane. Vertical lines are kept as their own variant
/// so no slope is ever infinite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoundaryLine {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl BoundaryLine {
    /// Line `a*x + b*y + c = 0`, `None` when `a` and `b` are both zero.
    pub fn from_coefficients(a: f64, b: f64, c: f64) -> Option<Self> {
        if b != 0.0 {
            Some(BoundaryLine::Sloped { slope: -a / b, intercept: -c / b })
        } else if a != 0.0 {
            Some(BoundaryLine::Vertical { x: -c / a })
        } else {
            None
        }
    }

    /// Signed perpendicular distance from `(x, y)`. Positive above a sloped
    /// line and right of a vertical one.
    pub fn signed_distance(&self, x: f64, y: f64) -> f64 {
        match *self {
            BoundaryLine::Sloped { slope, intercept } => (y - slope * x - intercept) / (1.0 + slope * slope).sqrt(),
            BoundaryLine::Vertical { x: x0 } => x - x0,
        }
    }

    pub fn distance(&self, x: f64, y: f64) -> f64 {
        self.signed_distance(x, y).abs()
    }

    /// Parallel line at signed distance `d`, using the same sign convention as
    /// [`signed_distance`](Self::signed_distance).
    pub fn offset(&self, d: f64) -> Self {
        match *self {
            BoundaryLine::Sloped { slope, intercept } => BoundaryLine::Sloped {
                slope,
                intercept: intercept + d * (1.0 + slope * slope).sqrt(),
            },
            BoundaryLine::Vertical { x } => BoundaryLine::Vertical { x: x + d },
        }
    }

    /// Height of the line at `x`; `None` for vertical lines.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            BoundaryLine::Sloped { slope, intercept } => Some(slope * x + intercept),
            BoundaryLine::Vertical { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coefficients() {
        assert_eq!(
            BoundaryLine::from_coefficients(1.0, -1.0, 0.0),
            Some(BoundaryLine::Sloped { slope: 1.0, intercept: 0.0 })
        );
        assert_eq!(BoundaryLine::from_coefficients(2.0, 0.0, -4.0), Some(BoundaryLine::Vertical { x: 2.0 }));
        assert_eq!(BoundaryLine::from_coefficients(0.0, 0.0, 1.0), None);
    }

    #[test]
    fn test_signed_distance() {
        let diagonal = BoundaryLine::Sloped { slope: 1.0, intercept: 0.0 };
        assert!((diagonal.signed_distance(0.0, 2.0) - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((diagonal.signed_distance(2.0, 0.0) + 2.0_f64.sqrt()).abs() < 1e-12);

        let vertical = BoundaryLine::Vertical { x: 1.0 };
        assert_eq!(vertical.signed_distance(3.0, 100.0), 2.0);
        assert_eq!(vertical.distance(-1.0, 0.0), 2.0);
    }

    #[test]
    fn test_offset_is_parallel_at_distance() {
        let line = BoundaryLine::Sloped { slope: 0.5, intercept: 1.0 };
        let shifted = line.offset(2.0);

        // Any point on the shifted line is at signed distance 2 from the original.
        let x = 3.0;
        let y = shifted.y_at(x).unwrap();
        assert!((line.signed_distance(x, y) - 2.0).abs() < 1e-12);

        assert_eq!(BoundaryLine::Vertical { x: 0.0 }.offset(-1.5), BoundaryLine::Vertical { x: -1.5 });
    }
}
