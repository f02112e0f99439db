//! Fast non-dominated sorting (Deb et al., 2002).

use crate::evolution::individual::Individual;
use crate::pareto::dominance::{compare, Dominance};

/// Partitions a population into fronts and writes each individual's rank.
///
/// Returns the fronts as index lists into `population`: `fronts[0]` holds the
/// non-dominated individuals, `fronts[r]` those dominated only by members of
/// earlier fronts. Every index appears in exactly one front.
///
/// # Complexity
///
/// O(m * n²) for `n` individuals and `m` objectives. Each pair is compared once.
///
/// # Example
///
/// ```rust
/// use rebalance::evolution::Individual;
/// use rebalance::pareto::non_dominated_sort;
///
/// let mut population = vec![
///     Individual::new((), vec![1.0, 5.0]),
///     Individual::new((), vec![2.0, 3.0]),
///     Individual::new((), vec![3.0, 6.0]),
/// ];
/// let fronts = non_dominated_sort(&mut population);
///
/// assert_eq!(fronts, vec![vec![0, 1], vec![2]]);
/// assert_eq!(population[2].rank, 1);
/// ```
pub fn non_dominated_sort<S>(population: &mut [Individual<S>]) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match compare(&population[i].objectives, &population[j].objectives) {
                Dominance::Dominates => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Dominated => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::NonDominated => {}
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut rank = 0;

    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            population[i].rank = rank;
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
        rank += 1;
    }

    fronts
}

/// Sorts a population and splits it into owned fronts, preserving the
/// population order within each front.
pub fn into_fronts<S>(mut population: Vec<Individual<S>>) -> Vec<Vec<Individual<S>>> {
    let fronts = non_dominated_sort(&mut population);

    let mut slots: Vec<Option<Individual<S>>> = population.into_iter().map(Some).collect();
    fronts
        .into_iter()
        .map(|front| {
            let mut members: Vec<usize> = front;
            members.sort_unstable();
            members
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::dominance::dominates;

    fn population(points: &[[f64; 2]]) -> Vec<Individual<()>> {
        points
            .iter()
            .map(|p| Individual::new((), p.to_vec()))
            .collect()
    }

    #[test]
    fn test_single_individual() {
        let mut pop = population(&[[1.0, 1.0]]);
        assert_eq!(non_dominated_sort(&mut pop), vec![vec![0]]);
    }

    #[test]
    fn test_equal_points_share_a_front() {
        let mut pop = population(&[[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        let fronts = non_dominated_sort(&mut pop);
        assert_eq!(fronts.len(), 1);
        assert_eq!(fronts[0].len(), 3);
    }

    #[test]
    fn test_front_partition_properties() {
        let mut pop = population(&[
            [1.0, 9.0],
            [2.0, 7.0],
            [3.0, 8.0],
            [4.0, 4.0],
            [5.0, 5.0],
            [9.0, 1.0],
            [6.0, 6.0],
            [f64::INFINITY, f64::INFINITY],
            [2.0, 7.0],
        ]);
        let fronts = non_dominated_sort(&mut pop);

        let total: usize = fronts.iter().map(Vec::len).sum();
        assert_eq!(total, pop.len());

        for (r, front) in fronts.iter().enumerate() {
            for &i in front {
                assert_eq!(pop[i].rank, r);
                for &j in front {
                    assert!(!pop[i].dominates(&pop[j]));
                }
                if r > 0 {
                    assert!(fronts[r - 1]
                        .iter()
                        .any(|&k| dominates(&pop[k].objectives, &pop[i].objectives)));
                }
            }
        }

        let last = fronts.last().map(|f| f[0]);
        assert_eq!(last, Some(7));
    }

    #[test]
    fn test_into_fronts_moves_every_individual() {
        let pop = population(&[[3.0, 3.0], [1.0, 1.0], [2.0, 2.0], [1.0, 4.0]]);
        let fronts = into_fronts(pop);
        assert_eq!(fronts.len(), 3);
        assert_eq!(fronts[0].len(), 1);
        assert_eq!(fronts[1].len(), 2);
        assert_eq!(fronts[1][0].objectives, vec![2.0, 2.0]);
        assert!(fronts[2].iter().all(|ind| ind.rank == 2));
    }

    #[test]
    fn test_empty_population() {
        let mut pop: Vec<Individual<()>> = Vec::new();
        assert!(non_dominated_sort(&mut pop).is_empty());
    }
}
