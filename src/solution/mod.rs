//! # Solutions
//!
//! A solution is an encoded candidate: a bounded vector of genes. The optimizer
//! never inspects the concrete encoding. It only relies on the capabilities of
//! the [`Solution`] trait: cloning, recombination with another solution of the
//! same kind, and mutation. Two encodings are provided:
//!
//! - [`IntegerSolution`]: one integer per decision variable, used for
//!   assignments where each gene is the index of the node hosting a workload.
//! - [`RealSolution`]: a continuous vector, used by the synthetic benchmark
//!   problems.
//!
//! ## Example
//!
//! ```rust
//! use rebalance::solution::{Bounds, IntegerSolution, Solution};
//! use rebalance::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let a = IntegerSolution::new(vec![0, 0, 0, 0], vec![Bounds::new(0, 3); 4]);
//! let b = IntegerSolution::new(vec![3, 3, 3, 3], vec![Bounds::new(0, 3); 4]);
//!
//! let (mut c1, c2) = a.crossover(&b, 1.0, &mut rng);
//! for (x, y) in c1.genes().iter().zip(c2.genes()) {
//!     // Uniform crossover exchanges whole genes between the children.
//!     assert_eq!(x + y, 3);
//! }
//!
//! c1.mutate(1.0, &mut rng);
//! assert!(c1.is_within_bounds());
//! ```

use std::fmt::Debug;

use crate::constraints::ConstraintSet;
use crate::rng::RandomNumberGenerator;

mod integer;
mod real;

pub use integer::{IntegerSolution, UNASSIGNED};
pub use real::RealSolution;

/// A point in objective space: one value per objective, all minimized.
pub type ObjectivePoint = Vec<f64>;

/// Inclusive bounds of a single gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// Returns `true` if `value` lies in `[low, high]`.
    pub fn contains(&self, value: T) -> bool {
        value >= self.low && value <= self.high
    }

    /// Clamps `value` into `[low, high]`.
    pub fn clamp(&self, value: T) -> T {
        if value < self.low {
            self.low
        } else if value > self.high {
            self.high
        } else {
            value
        }
    }
}

/// The capability set the optimizer requires from a candidate solution.
///
/// Offspring are always produced as new values; parents are borrowed and never
/// modified, so an evaluated solution stays unchanged for the rest of its
/// generation.
pub trait Solution: Clone + Debug + Send + Sync + 'static {
    /// The type of a single decision variable.
    type Gene: Copy + PartialOrd + Debug + Send + Sync;

    /// Returns the decision variables.
    fn genes(&self) -> &[Self::Gene];

    /// Returns the per-gene bounds.
    fn bounds(&self) -> &[Bounds<Self::Gene>];

    /// Recombines `self` with `other` unconditionally, returning two children.
    fn recombine(&self, other: &Self, rng: &mut RandomNumberGenerator) -> (Self, Self);

    /// Mutates the solution in place. Each gene is perturbed with the given probability.
    fn mutate(&mut self, probability: f64, rng: &mut RandomNumberGenerator);

    /// Applies recombination with the given probability.
    ///
    /// When the probability gate does not fire, the children are exact clones
    /// of the parents.
    fn crossover(
        &self,
        other: &Self,
        probability: f64,
        rng: &mut RandomNumberGenerator,
    ) -> (Self, Self) {
        if rng.gen_probability() < probability {
            self.recombine(other, rng)
        } else {
            (self.clone(), other.clone())
        }
    }

    /// Constraint-aware crossover.
    ///
    /// The default ignores the constraints and falls back to [`Solution::crossover`].
    fn constrained_crossover(
        &self,
        other: &Self,
        probability: f64,
        constraints: &ConstraintSet<Self>,
        rng: &mut RandomNumberGenerator,
    ) -> (Self, Self) {
        let _ = constraints;
        self.crossover(other, probability, rng)
    }

    /// Constraint-aware mutation.
    ///
    /// The default ignores the constraints and falls back to [`Solution::mutate`].
    fn constrained_mutate(
        &mut self,
        probability: f64,
        constraints: &ConstraintSet<Self>,
        rng: &mut RandomNumberGenerator,
    ) {
        let _ = constraints;
        self.mutate(probability, rng)
    }

    /// Returns `true` if every gene lies inside its bounds.
    fn is_within_bounds(&self) -> bool {
        self.genes()
            .iter()
            .zip(self.bounds())
            .all(|(gene, bounds)| bounds.contains(*gene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let bounds = Bounds::new(0, 3);
        assert!(bounds.contains(0));
        assert!(bounds.contains(3));
        assert!(!bounds.contains(-1));
        assert!(!bounds.contains(4));
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(0.0, 1.0);
        assert_eq!(bounds.clamp(-0.5), 0.0);
        assert_eq!(bounds.clamp(0.25), 0.25);
        assert_eq!(bounds.clamp(1.5), 1.0);
    }

    #[test]
    fn test_crossover_gate_closed_returns_clones() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let a = IntegerSolution::new(vec![0, 1, 2], vec![Bounds::new(0, 2); 3]);
        let b = IntegerSolution::new(vec![2, 1, 0], vec![Bounds::new(0, 2); 3]);

        let (c1, c2) = a.crossover(&b, 0.0, &mut rng);
        assert_eq!(c1.genes(), a.genes());
        assert_eq!(c2.genes(), b.genes());
    }
}
