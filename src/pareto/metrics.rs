//! Quality indicators for front approximations.

use crate::error::{OptimizerError, Result};
use crate::solution::ObjectivePoint;

/// Euclidean distance between two objective points of equal length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Inverted generational distance: the mean distance from each reference
/// point to its nearest obtained point. Lower is better.
///
/// # Errors
///
/// Returns `EmptyPopulation` if either set is empty and `DimensionMismatch` if
/// the points do not all share the reference dimensionality.
///
/// ```rust
/// use rebalance::pareto::inverted_generational_distance;
///
/// let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
/// let igd = inverted_generational_distance(&reference, &reference).unwrap();
/// assert_eq!(igd, 0.0);
/// ```
pub fn inverted_generational_distance(
    obtained: &[ObjectivePoint],
    reference: &[ObjectivePoint],
) -> Result<f64> {
    if obtained.is_empty() || reference.is_empty() {
        return Err(OptimizerError::EmptyPopulation);
    }

    let dimensions = reference[0].len();
    if let Some(point) = obtained
        .iter()
        .chain(reference)
        .find(|p| p.len() != dimensions)
    {
        return Err(OptimizerError::DimensionMismatch {
            expected: dimensions,
            actual: point.len(),
        });
    }

    let total: f64 = reference
        .iter()
        .map(|r| {
            obtained
                .iter()
                .map(|o| euclidean_distance(r, o))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();

    Ok(total / reference.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_igd_single_offset_point() {
        let reference = vec![vec![0.0, 0.0]];
        let obtained = vec![vec![3.0, 4.0], vec![6.0, 8.0]];
        let igd = inverted_generational_distance(&obtained, &reference).unwrap();
        assert!((igd - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_igd_averages_over_reference() {
        let reference = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let obtained = vec![vec![0.0, 1.0]];
        let igd = inverted_generational_distance(&obtained, &reference).unwrap();
        assert!((igd - 2f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_igd_errors() {
        assert!(matches!(
            inverted_generational_distance(&[], &[vec![0.0]]),
            Err(OptimizerError::EmptyPopulation)
        ));
        assert!(matches!(
            inverted_generational_distance(&[vec![0.0]], &[vec![0.0, 1.0]]),
            Err(OptimizerError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }
}
