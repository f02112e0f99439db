//! Pareto dominance between objective points (all objectives minimized).

use std::cmp::Ordering;

/// Outcome of comparing two objective points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The first point dominates the second.
    Dominates,
    /// The second point dominates the first.
    Dominated,
    /// Neither dominates the other, including equal points.
    NonDominated,
}

/// Returns `true` iff `a` is no worse than `b` in every objective and strictly
/// better in at least one.
///
/// ```rust
/// use rebalance::pareto::dominance::dominates;
///
/// assert!(dominates(&[1.0, 3.0], &[2.0, 5.0]));
/// assert!(!dominates(&[1.0, 5.0], &[2.0, 3.0]));
/// assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0]));
/// ```
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Compares two points in a single pass.
pub fn compare(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better = false;
    let mut b_better = false;
    for (x, y) in a.iter().zip(b) {
        match x.partial_cmp(y) {
            Some(Ordering::Less) => a_better = true,
            Some(Ordering::Greater) => b_better = true,
            _ => {}
        }
        if a_better && b_better {
            return Dominance::NonDominated;
        }
    }
    match (a_better, b_better) {
        (true, false) => Dominance::Dominates,
        (false, true) => Dominance::Dominated,
        _ => Dominance::NonDominated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_scenarios() {
        assert!(!dominates(&[1.0, 5.0], &[2.0, 3.0]));
        assert!(!dominates(&[2.0, 3.0], &[1.0, 5.0]));
        assert!(dominates(&[1.0, 3.0], &[2.0, 5.0]));
    }

    #[test]
    fn test_never_dominates_itself() {
        for point in [vec![0.0], vec![1.0, 2.0, 3.0], vec![f64::INFINITY, 1.0]] {
            assert!(!dominates(&point, &point));
            assert_eq!(compare(&point, &point), Dominance::NonDominated);
        }
    }

    #[test]
    fn test_weak_improvement_dominates() {
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
        assert_eq!(compare(&[1.0, 3.0], &[1.0, 2.0]), Dominance::Dominated);
    }

    #[test]
    fn test_compare_agrees_with_dominates() {
        let points = [
            vec![1.0, 5.0],
            vec![2.0, 3.0],
            vec![1.0, 3.0],
            vec![2.0, 5.0],
            vec![f64::INFINITY, f64::INFINITY],
        ];
        for a in &points {
            for b in &points {
                let expected = if dominates(a, b) {
                    Dominance::Dominates
                } else if dominates(b, a) {
                    Dominance::Dominated
                } else {
                    Dominance::NonDominated
                };
                assert_eq!(compare(a, b), expected);
            }
        }
    }

    #[test]
    fn test_penalized_point_is_dominated_by_any_finite_point() {
        assert!(dominates(&[100.0, 100.0], &[f64::INFINITY, f64::INFINITY]));
    }
}
