//! # Pareto utilities
//!
//! Dominance, fast non-dominated sorting, crowding distance and front
//! extraction. These work on any population snapshot and are used standalone
//! as well as by the engine.

pub mod crowding;
pub mod dominance;
pub mod metrics;
pub mod sort;

pub use crowding::crowding_distance;
pub use dominance::{dominates, Dominance};
pub use metrics::inverted_generational_distance;
pub use sort::{into_fronts, non_dominated_sort};

use crate::evolution::individual::Individual;
use crate::problem::Problem;
use crate::solution::ObjectivePoint;

/// Returns the members of the first front of `population`, in population order.
pub fn first_front<S: Clone>(population: &[Individual<S>]) -> Vec<Individual<S>> {
    let mut snapshot = population.to_vec();
    let fronts = non_dominated_sort(&mut snapshot);
    let mut members = fronts.into_iter().next().unwrap_or_default();
    members.sort_unstable();
    members.into_iter().map(|i| snapshot[i].clone()).collect()
}

/// Returns the objective points of the first front of `population`.
///
/// The points are recomputed against `problem` without touching adaptive
/// objective state, so every point is expressed on the same normalization.
pub fn pareto_front<P: Problem>(
    population: &[Individual<P::Solution>],
    problem: &P,
) -> Vec<ObjectivePoint> {
    first_front(population)
        .iter()
        .map(|individual| problem.probe(&individual.solution))
        .collect()
}
