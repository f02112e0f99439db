use crate::pareto::dominance::dominates;
use crate::solution::{ObjectivePoint, Solution};

/// A solution together with its objective point and its NSGA-II annotations.
///
/// `rank` is the index of the front the individual belongs to (0 = non-dominated)
/// and `crowding_distance` its density estimate within that front. Both are
/// recomputed every generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Individual<S> {
    pub solution: S,
    pub objectives: ObjectivePoint,
    pub rank: usize,
    pub crowding_distance: f64,
}

impl<S> Individual<S> {
    /// Wraps an evaluated solution. Rank and crowding distance start at zero.
    pub fn new(solution: S, objectives: ObjectivePoint) -> Self {
        Self {
            solution,
            objectives,
            rank: 0,
            crowding_distance: 0.0,
        }
    }

    /// Returns `true` if this individual's objective point dominates `other`'s.
    pub fn dominates(&self, other: &Self) -> bool {
        dominates(&self.objectives, &other.objectives)
    }

    /// Returns `true` if any objective carries the infeasibility penalty.
    pub fn is_penalized(&self) -> bool {
        self.objectives.iter().any(|v| v.is_infinite())
    }
}

impl<S: Solution> Individual<S> {
    pub fn genes(&self) -> &[S::Gene] {
        self.solution.genes()
    }
}

/// An ordered sequence of individuals.
pub type Population<S> = Vec<Individual<S>>;
