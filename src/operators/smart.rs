//! # Constraint-aware variation
//!
//! Smart operators only accept gene changes that keep a solution feasible.
//! A change that would break any constraint is reverted on the spot, so
//! variation never lowers the feasible fraction of the population. When no
//! constraints are registered both operators fall back to the plain operators
//! of [`IntegerSolution`].
//!
//! Failing to find a feasible change is not an error: the gene simply keeps
//! its value.

use crate::constraints::ConstraintSet;
use crate::rng::RandomNumberGenerator;
use crate::solution::{IntegerSolution, Solution};

/// Constraint-aware uniform crossover.
///
/// With probability `probability` the parents are recombined gene by gene:
/// each differing gene pair is swapped with probability 0.5, and the swap is
/// kept only if both children remain feasible. Otherwise the children are
/// exact clones of the parents.
///
/// # Arguments
///
/// * `p1`, `p2` - The parents. They are not modified.
/// * `probability` - Probability of recombining at all.
/// * `constraints` - The constraints both children must keep satisfying.
/// * `rng` - The random number generator of the current task.
pub fn smart_crossover(
    p1: &IntegerSolution,
    p2: &IntegerSolution,
    probability: f64,
    constraints: &ConstraintSet<IntegerSolution>,
    rng: &mut RandomNumberGenerator,
) -> (IntegerSolution, IntegerSolution) {
    if constraints.is_empty() {
        return p1.crossover(p2, probability, rng);
    }

    let mut c1 = p1.clone();
    let mut c2 = p2.clone();
    if rng.gen_probability() >= probability {
        return (c1, c2);
    }

    let len = c1.genes().len().min(c2.genes().len());
    for i in 0..len {
        if rng.gen_probability() >= 0.5 {
            continue;
        }
        let (a, b) = (c1.genes()[i], c2.genes()[i]);
        if a == b {
            continue;
        }

        c1.genes_mut()[i] = b;
        c2.genes_mut()[i] = a;
        if !(constraints.is_feasible(&c1) && constraints.is_feasible(&c2)) {
            c1.genes_mut()[i] = a;
            c2.genes_mut()[i] = b;
        }
    }

    (c1, c2)
}

/// Constraint-aware mutation.
///
/// Each gene is selected with probability `probability`. For a selected gene
/// up to `high - low + 1` random alternative values (never the current one)
/// are tried, and the first one that keeps the solution feasible is applied.
/// If none does, the gene is left unchanged. Genes whose bounds admit a single
/// value are skipped.
pub fn smart_mutate(
    solution: &mut IntegerSolution,
    probability: f64,
    constraints: &ConstraintSet<IntegerSolution>,
    rng: &mut RandomNumberGenerator,
) {
    if constraints.is_empty() {
        solution.mutate(probability, rng);
        return;
    }

    for i in 0..solution.genes().len() {
        if rng.gen_probability() >= probability {
            continue;
        }

        let bounds = solution.bounds()[i];
        if bounds.high <= bounds.low {
            continue;
        }
        let original = solution.genes()[i];
        let attempts = bounds.high - bounds.low + 1;

        for _ in 0..attempts {
            let candidate = alternative_value(original, bounds.low, bounds.high, rng);
            solution.genes_mut()[i] = candidate;
            if constraints.is_feasible(solution) {
                break;
            }
            solution.genes_mut()[i] = original;
        }
    }
}

/// Draws a value in `[low, high]` different from `current`.
fn alternative_value(current: i64, low: i64, high: i64, rng: &mut RandomNumberGenerator) -> i64 {
    if current < low || current > high {
        return rng.gen_i64_inclusive(low, high);
    }
    let value = rng.gen_i64_inclusive(low, high - 1);
    if value >= current {
        value + 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::FnConstraint;
    use crate::solution::Bounds;

    fn at_most_two_on_zero() -> ConstraintSet<IntegerSolution> {
        ConstraintSet::builder()
            .with_constraint(FnConstraint::new("AtMostTwoOnZero", |s: &IntegerSolution| {
                s.genes().iter().filter(|&&g| g == 0).count() <= 2
            }))
            .build()
    }

    #[test]
    fn test_smart_crossover_preserves_feasibility() {
        let constraints = at_most_two_on_zero();
        let bounds = vec![Bounds::new(0, 2); 6];
        let p1 = IntegerSolution::new(vec![0, 0, 1, 1, 2, 2], bounds.clone());
        let p2 = IntegerSolution::new(vec![1, 2, 0, 0, 1, 2], bounds);
        assert!(constraints.is_feasible(&p1) && constraints.is_feasible(&p2));

        for seed in 0..200 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let (c1, c2) = smart_crossover(&p1, &p2, 1.0, &constraints, &mut rng);
            assert!(constraints.is_feasible(&c1));
            assert!(constraints.is_feasible(&c2));
        }
    }

    #[test]
    fn test_smart_crossover_gate_closed_clones() {
        let constraints = at_most_two_on_zero();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let p1 = IntegerSolution::new(vec![0, 1], vec![Bounds::new(0, 2); 2]);
        let p2 = IntegerSolution::new(vec![2, 2], vec![Bounds::new(0, 2); 2]);
        let (c1, c2) = smart_crossover(&p1, &p2, 0.0, &constraints, &mut rng);
        assert_eq!(c1, p1);
        assert_eq!(c2, p2);
    }

    #[test]
    fn test_smart_mutation_without_constraints_stays_in_bounds() {
        let constraints = ConstraintSet::new();
        for seed in 0..100 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let mut solution = IntegerSolution::new(vec![2], vec![Bounds::new(0, 3)]);
            smart_mutate(&mut solution, 1.0, &constraints, &mut rng);
            assert!((0..=3).contains(&solution.genes()[0]));
        }
    }

    #[test]
    fn test_smart_mutation_never_breaks_feasibility() {
        let constraints = at_most_two_on_zero();
        for seed in 0..100 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let mut solution = IntegerSolution::new(vec![0, 0, 1, 2, 1], vec![Bounds::new(0, 2); 5]);
            smart_mutate(&mut solution, 1.0, &constraints, &mut rng);
            assert!(constraints.is_feasible(&solution));
        }
    }

    #[test]
    fn test_smart_mutation_changes_gene_when_possible() {
        let constraints = at_most_two_on_zero();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut solution = IntegerSolution::new(vec![1], vec![Bounds::new(0, 1)]);
        smart_mutate(&mut solution, 1.0, &constraints, &mut rng);
        assert_eq!(solution.genes(), &[0]);
    }

    #[test]
    fn test_smart_mutation_skips_fixed_genes() {
        let constraints = at_most_two_on_zero();
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut solution = IntegerSolution::new(vec![1, 1], vec![Bounds::new(1, 1); 2]);
        smart_mutate(&mut solution, 1.0, &constraints, &mut rng);
        assert_eq!(solution.genes(), &[1, 1]);
    }

    #[test]
    fn test_alternative_value_excludes_current() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        for _ in 0..200 {
            let v = alternative_value(2, 0, 3, &mut rng);
            assert!(v != 2 && (0..=3).contains(&v));
        }
    }
}
