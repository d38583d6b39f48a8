use crate::Vector;
use crate::error::{Error, Result};

/// Fraction of positions where the two label vectors agree.
pub fn accuracy_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(Error::DimensionMismatch { expected: y_true.len(), found: y_pred.len() });
    }
    if y_true.is_empty() {
        return Err(Error::TooFewPoints { algorithm: "accuracy", required: 1, found: 0 });
    }

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| (*actual - *pred).abs() < 1e-10)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_accuracy_score() {
        let y_true = array![1.0, -1.0, 1.0, -1.0];
        let y_pred = array![1.0, -1.0, -1.0, -1.0];

        let acc = accuracy_score(&y_true, &y_pred).unwrap();
        assert!((acc - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_accuracy_score_length_mismatch() {
        let y_true = array![1.0, -1.0];
        let y_pred = array![1.0];

        assert!(accuracy_score(&y_true, &y_pred).is_err());
    }
}
