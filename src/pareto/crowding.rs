//! Crowding distance within a single front.

use crate::evolution::individual::Individual;

/// Computes the crowding distance of every member of `front`, from scratch.
///
/// Fronts with at most two members get `+inf` for everyone. Otherwise, for
/// each objective the front is sorted by that objective, both extremes get
/// `+inf`, and interior members accumulate the normalized gap between their
/// neighbours. A dimension whose range is zero or not finite contributes
/// nothing.
///
/// The front is left sorted by the last objective; callers must not rely on
/// its previous order.
///
/// ```rust
/// use rebalance::evolution::Individual;
/// use rebalance::pareto::crowding_distance;
///
/// let mut front = vec![
///     Individual::new((), vec![0.0, 4.0]),
///     Individual::new((), vec![1.0, 1.0]),
///     Individual::new((), vec![4.0, 0.0]),
/// ];
/// crowding_distance(&mut front);
///
/// let interior = front.iter().find(|ind| ind.objectives == vec![1.0, 1.0]).unwrap();
/// assert_eq!(interior.crowding_distance, 2.0);
/// ```
pub fn crowding_distance<S>(front: &mut [Individual<S>]) {
    let len = front.len();
    if len <= 2 {
        for individual in front.iter_mut() {
            individual.crowding_distance = f64::INFINITY;
        }
        return;
    }

    for individual in front.iter_mut() {
        individual.crowding_distance = 0.0;
    }

    let dimensions = front[0].objectives.len();
    for m in 0..dimensions {
        front.sort_by(|a, b| a.objectives[m].total_cmp(&b.objectives[m]));

        front[0].crowding_distance = f64::INFINITY;
        front[len - 1].crowding_distance = f64::INFINITY;

        let range = front[len - 1].objectives[m] - front[0].objectives[m];
        if range == 0.0 || !range.is_finite() {
            continue;
        }

        for i in 1..len - 1 {
            let gap = front[i + 1].objectives[m] - front[i - 1].objectives[m];
            front[i].crowding_distance += gap / range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(points: &[[f64; 2]]) -> Vec<Individual<usize>> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Individual::new(i, p.to_vec()))
            .collect()
    }

    #[test]
    fn test_two_members_are_infinite() {
        let mut f = front(&[[0.0, 1.0], [0.5, 0.5]]);
        crowding_distance(&mut f);
        assert!(f.iter().all(|ind| ind.crowding_distance == f64::INFINITY));
    }

    #[test]
    fn test_single_member_is_infinite() {
        let mut f = front(&[[3.0, 3.0]]);
        crowding_distance(&mut f);
        assert_eq!(f[0].crowding_distance, f64::INFINITY);
    }

    #[test]
    fn test_extremes_of_every_dimension_are_infinite() {
        let mut f = front(&[[0.0, 10.0], [1.0, 6.0], [2.0, 5.0], [5.0, 2.0], [10.0, 0.0]]);
        crowding_distance(&mut f);

        let by_id = |id: usize| f.iter().find(|ind| ind.solution == id).map(|ind| ind.crowding_distance);
        assert_eq!(by_id(0), Some(f64::INFINITY));
        assert_eq!(by_id(4), Some(f64::INFINITY));
        for id in 1..4 {
            let d = by_id(id).unwrap_or(f64::NAN);
            assert!(d.is_finite() && d > 0.0);
        }
    }

    #[test]
    fn test_evenly_spaced_interior_distances() {
        let mut f = front(&[[0.0, 4.0], [1.0, 3.0], [2.0, 2.0], [3.0, 1.0], [4.0, 0.0]]);
        crowding_distance(&mut f);
        for ind in f.iter().filter(|ind| ind.solution != 0 && ind.solution != 4) {
            assert!((ind.crowding_distance - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_range_dimension_is_skipped() {
        let mut f = front(&[[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]);
        crowding_distance(&mut f);
        let middle = f.iter().find(|ind| ind.solution == 1).map(|ind| ind.crowding_distance);
        // Second dimension is constant, its extremes still get +inf by position.
        assert!(middle.is_some_and(|d| d == 1.0 || d == f64::INFINITY));
        assert!(f.iter().all(|ind| !ind.crowding_distance.is_nan()));
    }

    #[test]
    fn test_penalized_members_do_not_produce_nan() {
        let mut f = front(&[[0.0, 1.0], [f64::INFINITY, f64::INFINITY], [1.0, 0.0], [0.5, 0.5]]);
        crowding_distance(&mut f);
        assert!(f.iter().all(|ind| !ind.crowding_distance.is_nan()));
    }
}
